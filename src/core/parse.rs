use crate::core::value::JsonValue;
use indexmap::IndexMap;
use std::fmt;

/// Malformed JSON text. The message is surfaced verbatim in the UI; the
/// offset counts characters, matching what a user sees in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    offset: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.offset)
    }
}

impl std::error::Error for ParseError {}

/// Current document held by the viewer. Blank input is a neutral waiting
/// state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Empty,
    Ready(JsonValue),
    Failed(ParseError),
}

impl Document {
    pub fn from_source(source: &str) -> Self {
        if source.trim().is_empty() {
            return Self::Empty;
        }
        match parse_source(source) {
            Ok(value) => Self::Ready(value),
            Err(error) => Self::Failed(error),
        }
    }

    pub fn value(&self) -> Option<&JsonValue> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

pub fn parse_source(input: &str) -> Result<JsonValue, ParseError> {
    let mut scanner = Scanner { src: input, pos: 0 };
    scanner.skip_ws();
    let value = scanner.value()?;
    scanner.skip_ws();
    if !scanner.at_end() {
        return Err(scanner.error_here("text continues after the document"));
    }
    Ok(value)
}

/// Byte-offset scanner over the source slice. Number literals are carried
/// out as subslices of the input, so they reach the value model verbatim.
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn value(&mut self) -> Result<JsonValue, ParseError> {
        match self.peek() {
            Some('{') => self.object(),
            Some('[') => self.array(),
            Some('"') => self.string().map(JsonValue::String),
            Some('-' | '0'..='9') => self.number(),
            Some(_) => self.literal(),
            None => Err(self.error_here("the document ends before a value")),
        }
    }

    fn literal(&mut self) -> Result<JsonValue, ParseError> {
        for (word, value) in [
            ("true", JsonValue::Bool(true)),
            ("false", JsonValue::Bool(false)),
            ("null", JsonValue::Null),
        ] {
            if self.rest().starts_with(word) {
                self.pos += word.len();
                return Ok(value);
            }
        }
        Err(self.error_here("expected a JSON value"))
    }

    fn object(&mut self) -> Result<JsonValue, ParseError> {
        self.pos += 1; // '{'
        let mut entries = IndexMap::new();
        self.skip_ws();
        if self.eat('}') {
            return Ok(JsonValue::Object(entries));
        }

        loop {
            self.skip_ws();
            if self.peek() != Some('"') {
                return Err(self.error_here("object keys must be quoted strings"));
            }
            let key = self.string()?;
            self.skip_ws();
            self.require(':', "expected ':' after an object key")?;
            self.skip_ws();
            let value = self.value()?;
            // Duplicate keys: the last value wins, at the first key's position.
            entries.insert(key, value);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.require('}', "expected ',' or '}' in an object")?;
            return Ok(JsonValue::Object(entries));
        }
    }

    fn array(&mut self) -> Result<JsonValue, ParseError> {
        self.pos += 1; // '['
        let mut items = Vec::new();
        self.skip_ws();
        if self.eat(']') {
            return Ok(JsonValue::Array(items));
        }

        loop {
            self.skip_ws();
            items.push(self.value()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.require(']', "expected ',' or ']' in an array")?;
            return Ok(JsonValue::Array(items));
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        let opening = self.pos;
        self.pos += 1; // '"'
        let mut out = String::new();

        loop {
            let Some(ch) = self.bump() else {
                return Err(self.error_at(opening, "string is never closed"));
            };
            match ch {
                '"' => return Ok(out),
                '\\' => out.push(self.escape()?),
                ch if (ch as u32) < 0x20 => {
                    let at = self.pos - ch.len_utf8();
                    return Err(self.error_at(at, "raw control character inside a string"));
                }
                ch => out.push(ch),
            }
        }
    }

    fn escape(&mut self) -> Result<char, ParseError> {
        let start = self.pos - 1; // the backslash
        match self.bump() {
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.unicode_escape(start),
            _ => Err(self.error_at(start, "unknown escape sequence")),
        }
    }

    /// One `\uXXXX` unit, pairing UTF-16 surrogates when the first unit is
    /// a high half.
    fn unicode_escape(&mut self, start: usize) -> Result<char, ParseError> {
        let high = self.hex_unit(start)?;
        if !(0xD800..=0xDFFF).contains(&high) {
            return char::from_u32(high).ok_or_else(|| self.error_at(start, "invalid \\u escape"));
        }
        if high >= 0xDC00 {
            return Err(self.error_at(start, "unpaired \\u surrogate"));
        }
        if !(self.eat('\\') && self.eat('u')) {
            return Err(self.error_at(start, "unpaired \\u surrogate"));
        }
        let low = self.hex_unit(start)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(self.error_at(start, "unpaired \\u surrogate"));
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or_else(|| self.error_at(start, "invalid \\u escape"))
    }

    fn hex_unit(&mut self, start: usize) -> Result<u32, ParseError> {
        match self.rest().get(..4) {
            Some(digits) if digits.bytes().all(|b| b.is_ascii_hexdigit()) => {
                self.pos += 4;
                // Cannot fail on four validated hex digits.
                Ok(u32::from_str_radix(digits, 16).unwrap_or(0))
            }
            _ => Err(self.error_at(start, "\\u escape needs four hex digits")),
        }
    }

    fn number(&mut self) -> Result<JsonValue, ParseError> {
        let start = self.pos;
        self.eat('-');
        match self.peek() {
            Some('0') => {
                self.pos += 1;
                if matches!(self.peek(), Some('0'..='9')) {
                    return Err(self.error_at(start, "numbers cannot have leading zeros"));
                }
            }
            Some('1'..='9') => self.digits(),
            _ => return Err(self.error_here("expected a digit")),
        }

        if self.eat('.') {
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(self.error_here("expected digits after the decimal point"));
            }
            self.digits();
        }

        if self.eat('e') || self.eat('E') {
            if !self.eat('+') {
                self.eat('-');
            }
            if !matches!(self.peek(), Some('0'..='9')) {
                return Err(self.error_here("expected digits in the exponent"));
            }
            self.digits();
        }

        Ok(JsonValue::Number(self.src[start..self.pos].to_string()))
    }

    fn digits(&mut self) {
        while matches!(self.peek(), Some('0'..='9')) {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            return true;
        }
        false
    }

    fn require(&mut self, expected: char, message: &str) -> Result<(), ParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    fn skip_ws(&mut self) {
        let rest = self.rest().trim_start_matches([' ', '\t', '\n', '\r']);
        self.pos = self.src.len() - rest.len();
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.pos, message)
    }

    /// Byte offsets are internal; reported positions count characters so
    /// they line up with the editor's cursor column.
    fn error_at(&self, byte: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.src[..byte].chars().count())
    }
}
