//! Recursive-descent JSON parser (RFC 8259).
//!
//! A single cursor walks an immutable byte slice. Each production consumes exactly
//! what it recognizes and never backtracks; one byte of lookahead picks the
//! production in [`Parser::parse_value`].
//!
//! # Number classification
//!
//! A number literal becomes [`Value::Integer`] only when it has no fraction, no
//! exponent, and its text survives a round trip through `i64` unchanged (so `-0`
//! and values beyond `i64` become [`Value::Real`]). The decision is made once here.
//!
//! # Failure
//!
//! The first violation aborts the parse and is returned with the byte offset where
//! it was detected. No partial tree is produced.

use std::path::Path;

use tracing::{debug, trace};

use crate::error::{ErrorCode, JsonError, Result};
use crate::options::ParseOptions;
use crate::utf8;
use crate::value::{Array, Object, Value};

/// Parse a complete JSON document with default options.
pub fn parse(text: &str) -> Result<Value> {
    parse_bytes_with_options(text.as_bytes(), &ParseOptions::default())
}

pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<Value> {
    parse_bytes_with_options(text.as_bytes(), options)
}

/// Parse a document from raw bytes. Non-ASCII bytes inside strings are validated
/// as UTF-8; anywhere else they are a syntax error.
pub fn parse_bytes(input: &[u8]) -> Result<Value> {
    parse_bytes_with_options(input, &ParseOptions::default())
}

pub fn parse_bytes_with_options(input: &[u8], options: &ParseOptions) -> Result<Value> {
    let result = Parser::new(input, *options).parse_document();
    match &result {
        Ok(value) => trace!(
            value_type = %value.value_type(),
            bytes = input.len(),
            "parsed JSON document"
        ),
        Err(err) => debug!(code = ?err.code(), offset = ?err.offset(), "JSON parse failed"),
    }
    result
}

/// Read and parse the file at `path`. An unreadable file fails with
/// `CannotOpenFile`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Value> {
    parse_file_with_options(path, &ParseOptions::default())
}

pub fn parse_file_with_options(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Value> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading JSON file");
    let bytes = std::fs::read(path).map_err(|e| {
        JsonError::new(
            ErrorCode::CannotOpenFile,
            format!("{}: {}", path.display(), e),
        )
    })?;
    parse_bytes_with_options(&bytes, options)
}

/// Whether a string being parsed is an object key or a value. Only affects which
/// error a forbidden `\u0000` reports.
#[derive(Clone, Copy)]
enum StringRole {
    Key,
    Value,
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

/// Human-readable form of an unexpected byte for error details.
fn describe(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("byte {byte:#04x}")
    }
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8], options: ParseOptions) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            options,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn error(&self, code: ErrorCode, detail: impl Into<String>) -> JsonError {
        JsonError::at(code, self.pos, detail)
    }

    /// Error for the byte at the cursor when `expected` was wanted: premature end
    /// if there is no byte, a syntax error otherwise.
    fn unexpected(&self, expected: &str) -> JsonError {
        match self.peek() {
            None => self.error(
                ErrorCode::PrematureEndOfInput,
                format!("expected {expected}, found end of input"),
            ),
            Some(b) => self.error(
                ErrorCode::InvalidSyntax,
                format!("expected {expected}, found {}", describe(b)),
            ),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Top level: one value surrounded by optional whitespace, nothing else.
    fn parse_document(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        self.skip_whitespace();
        if let Some(b) = self.peek() {
            return Err(self.error(
                ErrorCode::EndOfInputExpected,
                format!("unexpected {} after JSON value", describe(b)),
            ));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string(StringRole::Value).map(Value::String),
            Some(b't' | b'f' | b'n') => self.parse_literal(),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            _ => Err(self.unexpected("a JSON value")),
        }
    }

    fn enter_container(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error(
                ErrorCode::StackOverflow,
                format!("nesting deeper than {} levels", self.options.max_depth),
            ));
        }
        Ok(())
    }

    fn leave_container(&mut self) {
        self.depth -= 1;
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter_container()?;
        self.pos += 1; // '{'

        let mut object = Object::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.leave_container();
            return Ok(Value::Object(object));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected("a string key"));
            }
            let key_start = self.pos;
            let key = self.parse_string(StringRole::Key)?;
            if self.options.reject_duplicate_keys && object.contains_key(&key) {
                return Err(JsonError::at(
                    ErrorCode::DuplicateKey,
                    key_start,
                    format!("duplicate key {key:?}"),
                ));
            }

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.unexpected("':' after object key"));
            }
            self.pos += 1;

            let value = self.parse_value()?;
            object.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}' in object")),
            }
        }

        self.leave_container();
        Ok(Value::Object(object))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter_container()?;
        self.pos += 1; // '['

        let mut array = Array::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.leave_container();
            return Ok(Value::Array(array));
        }

        loop {
            array.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']' in array")),
            }
        }

        self.leave_container();
        Ok(Value::Array(array))
    }

    /// Parse a quoted string starting at the opening quote.
    ///
    /// Bytes are collected into a buffer: ASCII is copied directly, multi-byte
    /// characters are checked with [`utf8::decode`] and copied, escapes are
    /// expanded (with `\u` going through [`utf8::encode`]).
    fn parse_string(&mut self, role: StringRole) -> Result<String> {
        let open = self.pos;
        self.pos += 1; // '"'
        let mut buf = Vec::new();

        loop {
            let Some(b) = self.peek() else {
                return Err(JsonError::at(
                    ErrorCode::InvalidSyntax,
                    open,
                    "unterminated string",
                ));
            };
            match b {
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    self.parse_escape(&mut buf, open, role)?;
                }
                0x00..=0x1F => {
                    return Err(self.error(
                        ErrorCode::InvalidSyntax,
                        format!("unescaped control character {b:#04x} in string"),
                    ));
                }
                0x20..=0x7F => {
                    buf.push(b);
                    self.pos += 1;
                }
                _ => {
                    let start = self.pos;
                    if utf8::decode(self.input, &mut self.pos).is_none() {
                        return Err(self.error(
                            ErrorCode::InvalidUTF8,
                            "invalid UTF-8 sequence in string",
                        ));
                    }
                    buf.extend_from_slice(&self.input[start..self.pos]);
                }
            }
        }

        String::from_utf8(buf)
            .map_err(|_| JsonError::at(ErrorCode::InvalidUTF8, open, "string is not valid UTF-8"))
    }

    /// Expand one escape. The cursor sits just past the backslash.
    fn parse_escape(&mut self, buf: &mut Vec<u8>, open: usize, role: StringRole) -> Result<()> {
        let escape_start = self.pos - 1;
        let Some(c) = self.peek() else {
            return Err(JsonError::at(
                ErrorCode::InvalidSyntax,
                open,
                "unterminated string",
            ));
        };
        self.pos += 1;

        let byte = match c {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => return self.parse_unicode_escape(buf, escape_start, role),
            other => {
                return Err(JsonError::at(
                    ErrorCode::InvalidSyntax,
                    escape_start,
                    format!("invalid escape sequence: backslash followed by {}", describe(other)),
                ));
            }
        };
        buf.push(byte);
        Ok(())
    }

    /// Read the four hex digits of a `\u` escape.
    fn read_hex4(&mut self) -> Result<u16> {
        let start = self.pos;
        let digits = self.input.get(start..start + 4).ok_or_else(|| {
            JsonError::at(ErrorCode::InvalidSyntax, start, "truncated \\u escape")
        })?;

        let mut unit: u16 = 0;
        for &d in digits {
            let nibble = char::from(d).to_digit(16).ok_or_else(|| {
                JsonError::at(
                    ErrorCode::InvalidSyntax,
                    start,
                    format!("invalid hex digit {} in \\u escape", describe(d)),
                )
            })?;
            unit = (unit << 4) | nibble as u16;
        }
        self.pos += 4;
        Ok(unit)
    }

    /// `\uXXXX`, assembling a surrogate pair when the first unit is a high
    /// surrogate. Unpaired surrogates fail with `InvalidUTF8`.
    fn parse_unicode_escape(
        &mut self,
        buf: &mut Vec<u8>,
        escape_start: usize,
        role: StringRole,
    ) -> Result<()> {
        let unit = self.read_hex4()?;

        let code_point = match unit {
            0xD800..=0xDBFF => {
                if !self.input[self.pos..].starts_with(b"\\u") {
                    return Err(JsonError::at(
                        ErrorCode::InvalidUTF8,
                        escape_start,
                        format!("unpaired high surrogate \\u{unit:04X}"),
                    ));
                }
                self.pos += 2;
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(JsonError::at(
                        ErrorCode::InvalidUTF8,
                        escape_start,
                        format!("high surrogate \\u{unit:04X} followed by \\u{low:04X}"),
                    ));
                }
                0x10000 + ((i32::from(unit) - 0xD800) << 10) + (i32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(JsonError::at(
                    ErrorCode::InvalidUTF8,
                    escape_start,
                    format!("unpaired low surrogate \\u{unit:04X}"),
                ));
            }
            _ => i32::from(unit),
        };

        if code_point == 0 && !self.options.allow_nul {
            let code = match role {
                StringRole::Key => ErrorCode::NullByteInKey,
                StringRole::Value => ErrorCode::NullCharacter,
            };
            return Err(JsonError::at(code, escape_start, "\\u0000 is not allowed"));
        }

        utf8::encode(code_point, buf)
            .map_err(|e| JsonError::at(e.code(), escape_start, e.detail().to_string()))?;
        Ok(())
    }

    /// Advance past a run of ASCII digits, returning how many were consumed.
    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        self.pos - start
    }

    /// `-? (0 | [1-9][0-9]*) (.[0-9]+)? ([eE][+-]?[0-9]+)?`
    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(JsonError::at(
                        ErrorCode::InvalidNumber,
                        start,
                        "leading zeros are not allowed",
                    ));
                }
            }
            Some(b'1'..=b'9') => {
                self.skip_digits();
            }
            _ => {
                return Err(JsonError::at(
                    ErrorCode::InvalidNumber,
                    start,
                    "expected digit",
                ));
            }
        }

        let mut integral = true;
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            if self.skip_digits() == 0 {
                return Err(JsonError::at(
                    ErrorCode::InvalidNumber,
                    start,
                    "expected digit after decimal point",
                ));
            }
        }
        if let Some(b'e' | b'E') = self.peek() {
            integral = false;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(JsonError::at(
                    ErrorCode::InvalidNumber,
                    start,
                    "expected digit in exponent",
                ));
            }
        }

        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| JsonError::at(ErrorCode::InvalidNumber, start, "malformed number"))?;
        classify_number(text, integral).map_err(|code| {
            JsonError::at(code, start, format!("cannot represent number {text}"))
        })
    }

    /// `true`, `false` or `null`, compared against the whole run of letters at the
    /// cursor so `nul` and `nullx` are both rejected.
    fn parse_literal(&mut self) -> Result<Value> {
        let start = self.pos;
        let len = self.input[start..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let word = &self.input[start..start + len];

        let value = match word {
            b"true" => Value::Boolean(true),
            b"false" => Value::Boolean(false),
            b"null" => Value::Null,
            _ => {
                return Err(JsonError::at(
                    ErrorCode::InvalidSyntax,
                    start,
                    format!("invalid literal '{}'", String::from_utf8_lossy(word)),
                ));
            }
        };
        self.pos += len;
        Ok(value)
    }
}

/// Turn a grammatically valid number literal into an integer or real value.
fn classify_number(text: &str, integral: bool) -> std::result::Result<Value, ErrorCode> {
    if integral {
        if let Ok(n) = text.parse::<i64>() {
            if n.to_string() == text {
                return Ok(Value::Integer(n));
            }
        }
    }
    let real: f64 = text.parse().map_err(|_| ErrorCode::InvalidNumber)?;
    if !real.is_finite() {
        return Err(ErrorCode::NumericOverflow);
    }
    Ok(Value::Real(real))
}
