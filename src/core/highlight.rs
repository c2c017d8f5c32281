use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Key,
    Str,
    Number,
    Bool,
    Null,
    Plain,
}

impl TokenClass {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Str => "string",
            Self::Number => "number",
            Self::Bool => "boolean",
            Self::Null => "null",
            Self::Plain => "plain",
        }
    }
}

/// Classified substring of the source text. Concatenating token texts in
/// order reproduces the scanned input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
}

impl Token {
    fn new(text: impl Into<String>, class: TokenClass) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }
}

/// Best-effort lexical colorizer for raw JSON text. Works on any input,
/// valid or not; unmatched characters pass through as `Plain`.
pub struct Highlighter {
    pattern: Regex,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        // One alternation tried left-to-right at each position: a quoted
        // string (with \uXXXX and single-char escapes, optionally followed
        // by a colon that marks it as a key), a bare word literal, or a
        // number. The colon, padded or not, is part of the key's token.
        let pattern = Regex::new(
            r#""(?:\\u[0-9A-Fa-f]{4}|\\[^u]|[^\\"])*"(?:\s*:)?|\b(?:true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?"#,
        )
        .expect("token pattern must compile");
        Self { pattern }
    }

    pub fn tokens(&self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut cursor = 0usize;

        for found in self.pattern.find_iter(source) {
            if found.start() > cursor {
                tokens.push(Token::new(&source[cursor..found.start()], TokenClass::Plain));
            }
            tokens.push(Token::new(found.as_str(), classify(found.as_str())));
            cursor = found.end();
        }
        if cursor < source.len() {
            tokens.push(Token::new(&source[cursor..], TokenClass::Plain));
        }

        tokens
    }

    /// Markup rendering: escape the three reserved characters once, then
    /// tokenize the escaped text and wrap classified tokens in spans.
    pub fn markup(&self, source: &str) -> String {
        let escaped = escape_markup(source);
        let mut out = String::with_capacity(escaped.len());
        for token in self.tokens(escaped.as_str()) {
            match token.class {
                TokenClass::Plain => out.push_str(token.text.as_str()),
                class => {
                    out.push_str("<span class=\"");
                    out.push_str(class.css_class());
                    out.push_str("\">");
                    out.push_str(token.text.as_str());
                    out.push_str("</span>");
                }
            }
        }
        out
    }
}

fn classify(matched: &str) -> TokenClass {
    if matched.starts_with('"') {
        if matched.ends_with(':') {
            TokenClass::Key
        } else {
            TokenClass::Str
        }
    } else {
        match matched {
            "true" | "false" => TokenClass::Bool,
            "null" => TokenClass::Null,
            _ => TokenClass::Number,
        }
    }
}

/// Escape `&`, `<`, `>` for markup output. `&` goes first so entities are
/// not double-escaped.
pub fn escape_markup(source: &str) -> String {
    source
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::{Highlighter, TokenClass, escape_markup};

    fn joined(highlighter: &Highlighter, source: &str) -> String {
        highlighter
            .tokens(source)
            .iter()
            .map(|token| token.text.as_str())
            .collect()
    }

    #[test]
    fn tokens_concatenate_back_to_the_input() {
        let highlighter = Highlighter::new();
        let inputs = [
            r#"{"a": 1, "b": [true, null, -2.5e+10]}"#,
            "not json at all {{{",
            r#""unterminated"#,
            "",
            "  \n\t ",
            r#"{"weird &<>": "x < y & z > w"}"#,
        ];
        for input in inputs {
            assert_eq!(joined(&highlighter, input), input);
            let escaped = escape_markup(input);
            assert_eq!(joined(&highlighter, escaped.as_str()), escaped);
        }
    }

    #[test]
    fn key_and_string_are_distinguished_by_the_colon() {
        let highlighter = Highlighter::new();
        let tokens = highlighter.tokens(r#"{"a": 1}"#);
        let key = tokens
            .iter()
            .find(|token| token.class == TokenClass::Key)
            .expect("key token should exist");
        assert_eq!(key.text, "\"a\":");

        let tokens = highlighter.tokens(r#"["a"]"#);
        assert!(
            tokens
                .iter()
                .any(|token| token.class == TokenClass::Str && token.text == "\"a\"")
        );
        assert!(tokens.iter().all(|token| token.class != TokenClass::Key));
    }

    #[test]
    fn padded_colon_still_marks_a_key() {
        let highlighter = Highlighter::new();
        let tokens = highlighter.tokens("\"a\"  : 1");
        let key = tokens
            .iter()
            .find(|token| token.class == TokenClass::Key)
            .expect("key token should exist");
        assert_eq!(key.text, "\"a\"  :");
    }

    #[test]
    fn literals_and_numbers_get_their_own_classes() {
        let highlighter = Highlighter::new();
        let tokens = highlighter.tokens("[true, false, null, -1.5e3, nullable]");
        let classes: Vec<(&str, TokenClass)> = tokens
            .iter()
            .filter(|token| token.class != TokenClass::Plain)
            .map(|token| (token.text.as_str(), token.class))
            .collect();
        assert_eq!(
            classes,
            vec![
                ("true", TokenClass::Bool),
                ("false", TokenClass::Bool),
                ("null", TokenClass::Null),
                ("-1.5e3", TokenClass::Number),
            ]
        );
    }

    #[test]
    fn escaping_happens_before_tokenizing() {
        let highlighter = Highlighter::new();
        let markup = highlighter.markup(r#"{"tag": "<b> & co"}"#);
        assert!(markup.contains(r#"<span class="string">"&lt;b&gt; &amp; co"</span>"#));
        // The escaped entity must sit inside the colored span, never raw.
        assert!(!markup.contains("<b>"));
    }

    #[test]
    fn escaped_quotes_stay_inside_one_string_token() {
        let highlighter = Highlighter::new();
        let tokens = highlighter.tokens(r#""say \"hi\" twice""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].class, TokenClass::Str);
    }

    #[test]
    fn malformed_input_degrades_to_plain() {
        let highlighter = Highlighter::new();
        let tokens = highlighter.tokens("{,:}");
        assert!(tokens.iter().all(|token| token.class == TokenClass::Plain));
    }
}
