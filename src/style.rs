//! Token and line style resolution.
//!
//! A [`Style`] is a small mapping of CSS-like properties to values with an
//! explicit layered merge. Resolution precedence, lowest first: theme base
//! style, then theme rules in the order the token's tags list them, then a
//! caller-supplied override. Later layers win per property.
//!
//! Resolution is a pure function of `(token.types, token.empty, theme)`; no
//! lookup state survives between calls.

use serde::{Deserialize, Serialize};

use crate::theme::Theme;
use crate::token::Token;

/// A resolved set of visual properties for a token or line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Style {
    /// The override applied to empty-line filler tokens so they keep their
    /// line box open.
    pub fn inline_block() -> Self {
        Self {
            display: Some("inline-block".to_string()),
            ..Self::default()
        }
    }

    /// True when no property is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge `other` on top of `self`: every property `other` sets wins.
    pub fn merge(&mut self, other: &Style) {
        if other.color.is_some() {
            self.color = other.color.clone();
        }
        if other.background_color.is_some() {
            self.background_color = other.background_color.clone();
        }
        if other.font_style.is_some() {
            self.font_style = other.font_style.clone();
        }
        if other.font_weight.is_some() {
            self.font_weight = other.font_weight.clone();
        }
        if other.text_decoration.is_some() {
            self.text_decoration = other.text_decoration.clone();
        }
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
        if other.display.is_some() {
            self.display = other.display.clone();
        }
    }

    /// `self` merged under `other` (other wins), without mutating either.
    pub fn merged(&self, other: &Style) -> Style {
        let mut out = self.clone();
        out.merge(other);
        out
    }

    pub fn is_italic(&self) -> bool {
        self.font_style.as_deref() == Some("italic")
    }

    pub fn is_bold(&self) -> bool {
        match self.font_weight.as_deref() {
            Some("bold") => true,
            Some(w) => w.parse::<u32>().map(|n| n >= 600).unwrap_or(false),
            None => false,
        }
    }

    pub fn is_underlined(&self) -> bool {
        self.text_decoration.as_deref() == Some("underline")
    }
}

/// Resolve the visual style for a single token against a theme.
///
/// A token tagged exactly `["plain"]` gets no override (it inherits the line
/// style) unless it is an empty-line filler, which resolves to
/// `display: inline-block`. Any other token starts from that same base and
/// merges every theme rule matching each of its tags, in tag order, later
/// tags winning on conflicting properties. A token whose merge produces no
/// properties resolves to `None`; with no theme at all nothing resolves.
pub fn resolve_token_style(token: &Token, theme: Option<&Theme>) -> Option<Style> {
    let theme = theme?;

    if token.is_plain() {
        return token.empty.then(Style::inline_block);
    }

    let mut style = if token.empty {
        Style::inline_block()
    } else {
        Style::default()
    };

    // Zero tags fall through the loop untouched: no rules, no override.
    for tag in &token.types {
        for rule in theme.styles.iter().filter(|r| r.matches(tag)) {
            style.merge(&rule.style);
        }
    }

    if style.is_empty() {
        None
    } else {
        Some(style)
    }
}

/// Resolve the base style for a line container: the theme's `plain` style
/// merged with a caller override, the override winning on conflicts.
pub fn resolve_line_style(theme: Option<&Theme>, override_style: Option<&Style>) -> Option<Style> {
    match (theme, override_style) {
        (Some(t), Some(o)) => Some(t.plain.merged(o)),
        (Some(t), None) => Some(t.plain.clone()),
        (None, Some(o)) => Some(o.clone()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeRule};

    fn test_theme() -> Theme {
        Theme {
            name: "Test".to_string(),
            id: "test".to_string(),
            plain: Style {
                color: Some("#f8f8f2".to_string()),
                background_color: Some("#272822".to_string()),
                ..Style::default()
            },
            styles: vec![
                ThemeRule {
                    types: vec!["keyword".to_string()],
                    style: Style {
                        color: Some("red".to_string()),
                        ..Style::default()
                    },
                },
                ThemeRule {
                    types: vec!["builtin".to_string()],
                    style: Style {
                        color: Some("blue".to_string()),
                        font_style: Some("italic".to_string()),
                        ..Style::default()
                    },
                },
            ],
        }
    }

    #[test]
    fn plain_non_empty_token_has_no_override() {
        let theme = test_theme();
        let token = Token::plain("x");
        assert_eq!(resolve_token_style(&token, Some(&theme)), None);
    }

    #[test]
    fn plain_empty_token_keeps_line_box_open() {
        let theme = test_theme();
        let token = Token::empty_line();
        assert_eq!(
            resolve_token_style(&token, Some(&theme)),
            Some(Style::inline_block())
        );
    }

    #[test]
    fn later_tags_win_on_conflicts() {
        let theme = test_theme();
        let token = Token::new(vec!["keyword".to_string(), "builtin".to_string()], "of");
        let style = resolve_token_style(&token, Some(&theme)).unwrap();
        assert_eq!(style.color.as_deref(), Some("blue"));
        assert_eq!(style.font_style.as_deref(), Some("italic"));
    }

    #[test]
    fn single_known_tag_resolves() {
        let theme = test_theme();
        let token = Token::new(vec!["keyword".to_string()], "const");
        let style = resolve_token_style(&token, Some(&theme)).unwrap();
        assert_eq!(style.color.as_deref(), Some("red"));
    }

    #[test]
    fn unknown_tags_resolve_to_nothing() {
        let theme = test_theme();
        let token = Token::new(vec!["garnish".to_string()], "??");
        assert_eq!(resolve_token_style(&token, Some(&theme)), None);
    }

    #[test]
    fn zero_tags_resolve_like_plain() {
        let theme = test_theme();
        let token = Token::new(Vec::new(), "x");
        assert_eq!(resolve_token_style(&token, Some(&theme)), None);

        let mut empty = Token::new(Vec::new(), "");
        empty.empty = true;
        assert_eq!(
            resolve_token_style(&empty, Some(&theme)),
            Some(Style::inline_block())
        );
    }

    #[test]
    fn no_theme_resolves_to_nothing() {
        let token = Token::new(vec!["keyword".to_string()], "const");
        assert_eq!(resolve_token_style(&token, None), None);
    }

    #[test]
    fn line_style_without_override_is_plain_unchanged() {
        let theme = test_theme();
        let line = resolve_line_style(Some(&theme), None).unwrap();
        assert_eq!(line, theme.plain);
    }

    #[test]
    fn line_style_override_wins() {
        let theme = test_theme();
        let override_style = Style {
            color: Some("#000000".to_string()),
            ..Style::default()
        };
        let line = resolve_line_style(Some(&theme), Some(&override_style)).unwrap();
        assert_eq!(line.color.as_deref(), Some("#000000"));
        assert_eq!(line.background_color, theme.plain.background_color);
    }

    #[test]
    fn line_style_without_theme_is_override_alone() {
        let override_style = Style::inline_block();
        assert_eq!(
            resolve_line_style(None, Some(&override_style)),
            Some(override_style)
        );
        assert_eq!(resolve_line_style(None, None), None);
    }

    #[test]
    fn bold_detection_accepts_numeric_weights() {
        let mut s = Style::default();
        assert!(!s.is_bold());
        s.font_weight = Some("bold".to_string());
        assert!(s.is_bold());
        s.font_weight = Some("700".to_string());
        assert!(s.is_bold());
        s.font_weight = Some("400".to_string());
        assert!(!s.is_bold());
    }
}
