use crate::core::highlight::TokenClass;
use crate::core::value::NodeKind;
use crate::ui::style::{Color, Style};
use serde::Deserialize;

/// Resolved presentation styles. The core never hardcodes colors; it takes
/// this mapping as an input, built either from `default_theme` or from an
/// external `ThemeConfig`.
#[derive(Debug, Clone)]
pub struct Theme {
    pub key: Style,
    pub string: Style,
    pub number: Style,
    pub boolean: Style,
    pub null: Style,
    pub punctuation: Style,
    pub preview: Style,
    pub label: Style,
    pub accent: Style,
    pub error: Style,
    pub placeholder: Style,
    pub header: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            key: Style::new().color(Color::Cyan),
            string: Style::new().color(Color::Green),
            number: Style::new().color(Color::Yellow),
            boolean: Style::new().color(Color::Magenta),
            null: Style::new().color(Color::Red),
            punctuation: Style::new().color(Color::DarkGrey),
            preview: Style::new().color(Color::DarkGrey),
            label: Style::new().color(Color::DarkGrey),
            accent: Style::new().color(Color::Cyan).bold(),
            error: Style::new().color(Color::Red).bold(),
            placeholder: Style::new().color(Color::DarkGrey),
            header: Style::new().bold(),
        }
    }

    /// Style for a scalar value rendered in the tree or table.
    pub fn scalar(&self, kind: NodeKind) -> Style {
        match kind {
            NodeKind::Null => self.null,
            NodeKind::Bool => self.boolean,
            NodeKind::Number => self.number,
            NodeKind::String => self.string,
            NodeKind::Array | NodeKind::Object => self.punctuation,
        }
    }

    /// Style for a highlighter token in the source pane.
    pub fn token(&self, class: TokenClass) -> Style {
        match class {
            TokenClass::Key => self.key,
            TokenClass::Str => self.string,
            TokenClass::Number => self.number,
            TokenClass::Bool => self.boolean,
            TokenClass::Null => self.null,
            TokenClass::Plain => Style::default(),
        }
    }
}

/// External theme input: named color tokens per syntax role. Missing fields
/// keep the built-in default; unknown fields are rejected so typos surface.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    key: Option<Color>,
    string: Option<Color>,
    number: Option<Color>,
    boolean: Option<Color>,
    null: Option<Color>,
    punctuation: Option<Color>,
    accent: Option<Color>,
}

impl ThemeConfig {
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn into_theme(self) -> Theme {
        let mut theme = Theme::default_theme();
        if let Some(color) = self.key {
            theme.key = Style::new().color(color);
        }
        if let Some(color) = self.string {
            theme.string = Style::new().color(color);
        }
        if let Some(color) = self.number {
            theme.number = Style::new().color(color);
        }
        if let Some(color) = self.boolean {
            theme.boolean = Style::new().color(color);
        }
        if let Some(color) = self.null {
            theme.null = Style::new().color(color);
        }
        if let Some(color) = self.punctuation {
            theme.punctuation = Style::new().color(color);
            theme.preview = Style::new().color(color);
            theme.label = Style::new().color(color);
        }
        if let Some(color) = self.accent {
            theme.accent = Style::new().color(color).bold();
        }
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::ThemeConfig;
    use crate::ui::style::Color;

    #[test]
    fn config_overrides_only_named_roles() {
        let config = ThemeConfig::from_json(r##"{"key":"#33ccff","null":"magenta"}"##)
            .expect("config should parse");
        let theme = config.into_theme();
        assert_eq!(theme.key.color, Some(Color::Rgb(0x33, 0xCC, 0xFF)));
        assert_eq!(theme.null.color, Some(Color::Magenta));
        // Untouched roles keep the defaults.
        assert_eq!(theme.string.color, Some(Color::Green));
    }

    #[test]
    fn unknown_fields_and_colors_are_rejected() {
        assert!(ThemeConfig::from_json(r#"{"strnig":"green"}"#).is_err());
        assert!(ThemeConfig::from_json(r#"{"key":"chartreuse"}"#).is_err());
    }
}
