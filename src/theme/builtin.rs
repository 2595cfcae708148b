//! Compiled-in themes.

use super::{Theme, ThemeRule};
use crate::style::Style;

fn color(value: &str) -> Style {
    Style {
        color: Some(value.to_string()),
        ..Style::default()
    }
}

fn italic(value: &str) -> Style {
    Style {
        color: Some(value.to_string()),
        font_style: Some("italic".to_string()),
        ..Style::default()
    }
}

fn rule(types: &[&str], style: Style) -> ThemeRule {
    ThemeRule {
        types: types.iter().map(|t| t.to_string()).collect(),
        style,
    }
}

/// The default dark theme.
pub fn night_owl() -> Theme {
    Theme {
        name: "Night Owl".to_string(),
        id: "night-owl".to_string(),
        plain: Style {
            color: Some("#d6deeb".to_string()),
            background_color: Some("#011627".to_string()),
            ..Style::default()
        },
        styles: vec![
            rule(&["changed"], italic("rgb(162, 191, 252)")),
            rule(&["deleted"], italic("rgba(239, 83, 80, 0.56)")),
            rule(&["inserted", "attr-name"], italic("rgb(173, 219, 103)")),
            rule(&["comment"], italic("rgb(99, 119, 119)")),
            rule(&["string", "url"], color("rgb(173, 219, 103)")),
            rule(&["variable"], color("rgb(214, 222, 235)")),
            rule(&["number"], color("rgb(247, 140, 108)")),
            rule(
                &["builtin", "char", "constant", "function"],
                color("rgb(130, 170, 255)"),
            ),
            rule(&["punctuation"], color("rgb(199, 146, 234)")),
            rule(&["selector", "doctype"], italic("rgb(199, 146, 234)")),
            rule(&["class-name", "type"], color("rgb(255, 203, 139)")),
            rule(&["tag", "operator", "keyword"], color("rgb(127, 219, 202)")),
            rule(&["boolean"], color("rgb(255, 88, 116)")),
            rule(&["property"], color("rgb(128, 203, 196)")),
            rule(&["namespace"], color("rgb(178, 204, 214)")),
        ],
    }
}

pub fn monokai() -> Theme {
    Theme {
        name: "Monokai".to_string(),
        id: "monokai".to_string(),
        plain: Style {
            color: Some("#f8f8f2".to_string()),
            background_color: Some("#272822".to_string()),
            ..Style::default()
        },
        styles: vec![
            rule(&["comment"], color("rgb(136, 132, 111)")),
            rule(&["string", "changed"], color("rgb(230, 219, 116)")),
            rule(
                &["punctuation", "tag", "deleted"],
                color("rgb(249, 38, 114)"),
            ),
            rule(&["keyword"], color("#F92672")),
            rule(&["number", "builtin"], color("rgb(174, 129, 255)")),
            rule(&["variable"], color("rgb(248, 248, 242)")),
            rule(
                &["function", "attr-name", "inserted"],
                color("rgb(166, 226, 46)"),
            ),
            rule(&["type", "class-name"], italic("rgb(102, 217, 239)")),
        ],
    }
}

pub fn dracula() -> Theme {
    Theme {
        name: "Dracula".to_string(),
        id: "dracula".to_string(),
        plain: Style {
            color: Some("#f8f8f2".to_string()),
            background_color: Some("#282a36".to_string()),
            ..Style::default()
        },
        styles: vec![
            rule(&["comment"], color("#6272a4")),
            rule(&["string", "char"], color("#f1fa8c")),
            rule(&["number", "builtin", "boolean", "constant"], color("#bd93f9")),
            rule(&["keyword", "operator", "tag"], color("#ff79c6")),
            rule(&["function", "attr-name"], color("#50fa7b")),
            rule(&["type", "class-name"], italic("#8be9fd")),
            rule(&["punctuation"], color("#f8f8f2")),
            rule(&["variable", "property"], color("#f8f8f2")),
        ],
    }
}

pub fn github_light() -> Theme {
    Theme {
        name: "GitHub Light".to_string(),
        id: "github-light".to_string(),
        plain: Style {
            color: Some("#24292e".to_string()),
            background_color: Some("#ffffff".to_string()),
            ..Style::default()
        },
        styles: vec![
            rule(&["comment"], color("#6a737d")),
            rule(&["string", "char", "url"], color("#032f62")),
            rule(&["number", "builtin", "boolean", "constant"], color("#005cc5")),
            rule(&["keyword", "operator"], color("#d73a49")),
            rule(&["function"], color("#6f42c1")),
            rule(&["type", "class-name"], color("#22863a")),
            rule(&["tag", "attr-name"], color("#22863a")),
            rule(&["punctuation"], color("#24292e")),
            rule(&["variable", "property"], color("#e36209")),
        ],
    }
}
