//! Token model produced by the tokenization adapter.
//!
//! A [`Token`] is a leaf piece of source text tagged with the full chain of
//! scope tags that were active where it appeared. Untagged text carries the
//! sentinel tag `"plain"`. Tokens are immutable once produced and live for a
//! single render pass.

/// The sentinel tag carried by untagged source text.
pub const PLAIN: &str = "plain";

/// A leaf token: an ordered list of type tags plus the text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Ordered scope tags, outermost first (e.g. `["punctuation", "bracket"]`)
    pub types: Vec<String>,
    /// The source text covered by this token
    pub content: String,
    /// True for the filler token that represents an empty line
    pub empty: bool,
}

impl Token {
    /// Create a token tagged with the given types.
    pub fn new(types: Vec<String>, content: impl Into<String>) -> Self {
        Self {
            types,
            content: content.into(),
            empty: false,
        }
    }

    /// Create an untagged (plain) token.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(vec![PLAIN.to_string()], content)
    }

    /// The filler token carried by a line with no content.
    pub fn empty_line() -> Self {
        Self {
            types: vec![PLAIN.to_string()],
            content: String::new(),
            empty: true,
        }
    }

    /// True when the token carries exactly the plain sentinel tag.
    pub fn is_plain(&self) -> bool {
        self.types.len() == 1 && self.types[0] == PLAIN
    }
}

/// One line of tokens. Lines never contain newline characters; an empty line
/// holds a single [`Token::empty_line`] filler so every line has at least one
/// token to lay out.
pub type TokenLine = Vec<Token>;

/// Ensure every line has at least one token, inserting empty-line fillers.
pub fn fill_empty_lines(lines: &mut Vec<TokenLine>) {
    if lines.is_empty() {
        lines.push(vec![Token::empty_line()]);
        return;
    }
    for line in lines.iter_mut() {
        let blank = line.iter().all(|t| t.content.is_empty());
        if blank {
            line.clear();
            line.push(Token::empty_line());
        }
    }
}
