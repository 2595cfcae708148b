//! Tokenization adapter over the tree-sitter highlighter.
//!
//! All lexing is delegated to tree-sitter grammars and their highlight
//! queries; this module only selects the grammar and flattens the nested
//! highlight-event stream into a flat list of leaf [`Token`]s per line. Each
//! token carries the full chain of scope tags that were active where it
//! appeared: a nested capture stack of `keyword` inside `function` yields
//! `["function", "keyword"]`, and dotted capture names contribute each dot
//! segment (`punctuation.delimiter` becomes `punctuation`, `delimiter`).

use std::collections::HashMap;

use tree_sitter::Language;
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

use crate::error::{Error, Result};
use crate::token::{fill_empty_lines, Token, TokenLine, PLAIN};

/// Capture names the adapter recognizes. The highlighter maps every query
/// capture to its closest prefix match in this list; captures with no match
/// are emitted as plain text.
pub const RECOGNIZED_NAMES: &[&str] = &[
    "attribute",
    "boolean",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "escape",
    "function",
    "function.builtin",
    "function.macro",
    "function.method",
    "keyword",
    "label",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

/// Languages with a compiled-in grammar, by canonical name.
pub const SUPPORTED_LANGUAGES: &[&str] = &["rust", "javascript", "python", "json", "text"];

/// Map a user-supplied language name or file extension to a canonical name.
pub fn canonical_language(language: &str) -> Option<&'static str> {
    match language.to_ascii_lowercase().as_str() {
        "rust" | "rs" => Some("rust"),
        "javascript" | "js" | "jsx" | "mjs" => Some("javascript"),
        "python" | "py" => Some("python"),
        "json" => Some("json"),
        "text" | "plain" | "txt" => Some("text"),
        _ => None,
    }
}

/// Holds compiled highlight configurations, one per language, built lazily
/// and reused across render passes. Compiling a grammar query is the
/// expensive part; the per-pass parse state lives in a fresh [`Highlighter`].
pub struct GrammarRegistry {
    configs: HashMap<&'static str, HighlightConfiguration>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    /// Tokenize `code` with the grammar registered for `language`.
    ///
    /// Produces one entry per source line; an empty line is represented by a
    /// single filler token with `empty == true`. Tokenizing the empty string
    /// yields exactly one such line. The `text` language bypasses the lexer
    /// and emits plain tokens.
    pub fn tokenize(&mut self, code: &str, language: &str) -> Result<Vec<TokenLine>> {
        let name = canonical_language(language)
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))?;
        if name == "text" {
            return Ok(tokenize_plain(code));
        }
        let config = self.config_for(name)?;
        flatten(code, config)
    }

    fn config_for(&mut self, name: &'static str) -> Result<&HighlightConfiguration> {
        if !self.configs.contains_key(name) {
            let config = build_config(name)?;
            self.configs.insert(name, config);
        }
        Ok(&self.configs[name])
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_config(name: &'static str) -> Result<HighlightConfiguration> {
    let (language, highlights): (Language, &str) = match name {
        "rust" => (
            tree_sitter_rust::LANGUAGE.into(),
            tree_sitter_rust::HIGHLIGHTS_QUERY,
        ),
        "javascript" => (
            tree_sitter_javascript::LANGUAGE.into(),
            tree_sitter_javascript::HIGHLIGHT_QUERY,
        ),
        "python" => (
            tree_sitter_python::LANGUAGE.into(),
            tree_sitter_python::HIGHLIGHTS_QUERY,
        ),
        "json" => (
            tree_sitter_json::LANGUAGE.into(),
            tree_sitter_json::HIGHLIGHTS_QUERY,
        ),
        other => return Err(Error::UnsupportedLanguage(other.to_string())),
    };

    let mut config = HighlightConfiguration::new(language, name, highlights, "", "")
        .map_err(|e| Error::InitializationError(format!("grammar {name}: {e}")))?;
    let recognized: Vec<String> = RECOGNIZED_NAMES.iter().map(|s| s.to_string()).collect();
    config.configure(&recognized);
    Ok(config)
}

/// Run the highlighter and flatten its event stream into token lines.
fn flatten(code: &str, config: &HighlightConfiguration) -> Result<Vec<TokenLine>> {
    let mut highlighter = Highlighter::new();
    let events = highlighter
        .highlight(config, code.as_bytes(), None, |_| None)
        .map_err(|e| Error::TokenizeError(e.to_string()))?;

    let mut stack: Vec<usize> = Vec::new();
    let mut lines: Vec<TokenLine> = Vec::new();
    let mut current: TokenLine = Vec::new();

    for event in events {
        match event.map_err(|e| Error::TokenizeError(e.to_string()))? {
            HighlightEvent::HighlightStart(highlight) => stack.push(highlight.0),
            HighlightEvent::HighlightEnd => {
                stack.pop();
            }
            HighlightEvent::Source { start, end } => {
                let types = tags_for(&stack);
                push_source(&mut lines, &mut current, &code[start..end], &types);
            }
        }
    }

    lines.push(current);
    fill_empty_lines(&mut lines);
    Ok(lines)
}

/// The tag chain for the current highlight stack. An empty stack means plain
/// text.
fn tags_for(stack: &[usize]) -> Vec<String> {
    if stack.is_empty() {
        return vec![PLAIN.to_string()];
    }
    stack
        .iter()
        .flat_map(|&i| RECOGNIZED_NAMES[i].split('.'))
        .map(str::to_string)
        .collect()
}

/// Append a source slice, splitting at newlines into separate token lines.
fn push_source(lines: &mut Vec<TokenLine>, current: &mut TokenLine, text: &str, types: &[String]) {
    let mut rest = text;
    loop {
        match rest.find('\n') {
            Some(i) => {
                let head = &rest[..i];
                if !head.is_empty() {
                    current.push(Token::new(types.to_vec(), head));
                }
                lines.push(std::mem::take(current));
                rest = &rest[i + 1..];
            }
            None => {
                if !rest.is_empty() {
                    current.push(Token::new(types.to_vec(), rest));
                }
                break;
            }
        }
    }
}

/// Lexer bypass for the `text` language: every line is one plain token.
fn tokenize_plain(code: &str) -> Vec<TokenLine> {
    let mut lines: Vec<TokenLine> = code
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![Token::plain(line)]
            }
        })
        .collect();
    fill_empty_lines(&mut lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &TokenLine) -> String {
        line.iter().map(|t| t.content.as_str()).collect()
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut registry = GrammarRegistry::new();
        assert!(matches!(
            registry.tokenize("x", "brainmelt"),
            Err(Error::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn language_aliases_resolve() {
        assert_eq!(canonical_language("RS"), Some("rust"));
        assert_eq!(canonical_language("jsx"), Some("javascript"));
        assert_eq!(canonical_language("py"), Some("python"));
        assert_eq!(canonical_language("weird"), None);
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        let mut registry = GrammarRegistry::new();
        let lines = registry.tokenize("", "javascript").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 1);
        assert!(lines[0][0].empty);
        assert!(lines[0][0].is_plain());
    }

    #[test]
    fn tokens_reassemble_into_the_source() {
        let mut registry = GrammarRegistry::new();
        let code = "const x = 1;\nlet y = x + 2;";
        let lines = registry.tokenize(code, "javascript").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "const x = 1;");
        assert_eq!(line_text(&lines[1]), "let y = x + 2;");
    }

    #[test]
    fn keywords_are_tagged() {
        let mut registry = GrammarRegistry::new();
        let lines = registry.tokenize("const x = 1;", "javascript").unwrap();
        let keyword = lines[0]
            .iter()
            .find(|t| t.content == "const")
            .expect("const token");
        assert!(keyword.types.iter().any(|t| t == "keyword"));
    }

    #[test]
    fn numbers_are_tagged() {
        let mut registry = GrammarRegistry::new();
        let lines = registry.tokenize("const x = 1;", "javascript").unwrap();
        let number = lines[0]
            .iter()
            .find(|t| t.content == "1")
            .expect("number token");
        assert!(number.types.iter().any(|t| t == "number"));
    }

    #[test]
    fn dotted_captures_expand_into_tag_chains() {
        let mut registry = GrammarRegistry::new();
        let lines = registry.tokenize("const x = 1;", "javascript").unwrap();
        let semi = lines[0]
            .iter()
            .find(|t| t.content == ";")
            .expect("semicolon token");
        assert_eq!(semi.types[0], "punctuation");
    }

    #[test]
    fn rust_fn_keyword_is_tagged() {
        let mut registry = GrammarRegistry::new();
        let lines = registry.tokenize("fn main() {}", "rust").unwrap();
        let keyword = lines[0]
            .iter()
            .find(|t| t.content == "fn")
            .expect("fn token");
        assert!(keyword.types.iter().any(|t| t == "keyword"));
    }

    #[test]
    fn blank_lines_become_empty_fillers() {
        let mut registry = GrammarRegistry::new();
        let lines = registry.tokenize("let a = 1;\n\nlet b = 2;", "javascript").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), 1);
        assert!(lines[1][0].empty);
    }

    #[test]
    fn plain_language_bypasses_the_lexer() {
        let mut registry = GrammarRegistry::new();
        let lines = registry.tokenize("just words\nmore words", "text").unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0][0].is_plain());
        assert_eq!(line_text(&lines[1]), "more words");
    }

    #[test]
    fn grammar_configs_are_reused() {
        let mut registry = GrammarRegistry::new();
        registry.tokenize("1", "json").unwrap();
        registry.tokenize("2", "json").unwrap();
        assert_eq!(registry.configs.len(), 1);
    }
}
