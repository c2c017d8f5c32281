use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Reset,
    Black,
    DarkGrey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Rgb(u8, u8, u8),
}

/// Parse a named color token or a `#rrggbb` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColor(String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color token '{}'", self.0)
    }
}

impl std::error::Error for UnknownColor {}

impl Color {
    pub fn parse(token: &str) -> Result<Self, UnknownColor> {
        if let Some(hex) = token.strip_prefix('#') {
            if hex.len() == 6
                && let Ok(value) = u32::from_str_radix(hex, 16)
            {
                return Ok(Self::Rgb(
                    (value >> 16) as u8,
                    (value >> 8) as u8,
                    value as u8,
                ));
            }
            return Err(UnknownColor(token.to_string()));
        }
        match token {
            "reset" => Ok(Self::Reset),
            "black" => Ok(Self::Black),
            "dark_grey" => Ok(Self::DarkGrey),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "blue" => Ok(Self::Blue),
            "magenta" => Ok(Self::Magenta),
            "cyan" => Ok(Self::Cyan),
            "white" => Ok(Self::White),
            _ => Err(UnknownColor(token.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::parse(token.as_str()).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_named_and_hex_tokens() {
        assert_eq!(Color::parse("cyan"), Ok(Color::Cyan));
        assert_eq!(Color::parse("dark_grey"), Ok(Color::DarkGrey));
        assert_eq!(Color::parse("#33ccff"), Ok(Color::Rgb(0x33, 0xCC, 0xFF)));
    }

    #[test]
    fn rejects_unknown_tokens_with_the_token_text() {
        let error = Color::parse("chartreuse").expect_err("token should be rejected");
        assert_eq!(error.to_string(), "unknown color token 'chartreuse'");
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#zzzzzz").is_err());
    }
}
