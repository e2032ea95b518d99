//! Recursive-descent scan over manifest source bytes.
//!
//! One cursor walk emits the value tree and records each value's first
//! token under its canonical pointer. Line/col counters are maintained
//! incrementally while the cursor advances, so the scan stays O(n) with
//! no re-reading of earlier text.

use indexmap::IndexMap;
use manifest_json_pointer::format_json_pointer;
use serde_json::{Map, Number, Value};

use crate::{ParseError, Parsed, Position, PositionIndex};

pub(crate) struct SourceScanner<'a> {
    data: &'a [u8],
    x: usize,
    line: u32,
    col: u32,
    path: Vec<String>,
    positions: PositionIndex,
}

impl<'a> SourceScanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        SourceScanner {
            data: text.as_bytes(),
            x: 0,
            line: 1,
            col: 1,
            path: Vec::new(),
            positions: IndexMap::new(),
        }
    }

    pub(crate) fn read_document(mut self) -> Result<Parsed, ParseError> {
        self.skip_whitespace();
        let value = self.read_value()?;
        self.skip_whitespace();
        if self.x < self.data.len() {
            return Err(self.err(format!(
                "Unexpected trailing character '{}'",
                self.peek_char()
            )));
        }
        Ok(Parsed {
            value,
            positions: self.positions,
        })
    }

    // ── Cursor ───────────────────────────────────────────────────────────

    /// Consume `n` bytes, keeping the 1-based line/col counters current.
    /// UTF-8 continuation bytes do not advance the column.
    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            let b = self.data[self.x];
            self.x += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else if b & 0xC0 != 0x80 {
                self.col += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.x < self.data.len() {
            match self.data[self.x] {
                b' ' | b'\t' | b'\n' | b'\r' => self.advance(1),
                _ => break,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    /// The character under the cursor, for error messages. The input is a
    /// `&str`, so decoding from any token boundary is safe.
    fn peek_char(&self) -> char {
        std::str::from_utf8(&self.data[self.x..])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or('?')
    }

    fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError::at(message, self.line, self.col)
    }

    fn eof(&self) -> ParseError {
        self.err("Unexpected end of input")
    }

    /// Record the position of the value whose first token is under the
    /// cursor, keyed by the canonical pointer for the current path.
    fn mark(&mut self) {
        let pointer = format_json_pointer(&self.path);
        self.positions.insert(
            pointer,
            Position {
                line: self.line,
                col: self.col,
            },
        );
    }

    // ── Values ───────────────────────────────────────────────────────────

    fn read_value(&mut self) -> Result<Value, ParseError> {
        let ch = self.peek().ok_or_else(|| self.eof())?;
        self.mark();
        match ch {
            b'"' => Ok(Value::String(self.read_string()?)),
            b'{' => self.read_object(),
            b'[' => self.read_array(),
            b't' => self.read_literal(b"true", Value::Bool(true)),
            b'f' => self.read_literal(b"false", Value::Bool(false)),
            b'n' => self.read_literal(b"null", Value::Null),
            b'-' | b'0'..=b'9' => self.read_number(),
            _ => Err(self.err(format!("Unexpected character '{}'", self.peek_char()))),
        }
    }

    fn read_literal(&mut self, word: &[u8], value: Value) -> Result<Value, ParseError> {
        if self.x + word.len() > self.data.len() || &self.data[self.x..self.x + word.len()] != word
        {
            return Err(self.err(format!("Unexpected character '{}'", self.peek_char())));
        }
        self.advance(word.len());
        Ok(value)
    }

    fn read_number(&mut self) -> Result<Value, ParseError> {
        let start = self.x;
        let (start_line, start_col) = (self.line, self.col);
        if self.peek() == Some(b'-') {
            self.advance(1);
        }
        let int_digits = self.consume_digits();
        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.advance(1);
            if self.consume_digits() == 0 {
                return Err(ParseError::at("Invalid number", start_line, start_col));
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            is_float = true;
            self.advance(1);
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.advance(1);
            }
            if self.consume_digits() == 0 {
                return Err(ParseError::at("Invalid number", start_line, start_col));
            }
        }
        if int_digits == 0 {
            return Err(ParseError::at("Invalid number", start_line, start_col));
        }

        // Token boundaries are ASCII, so the slice is valid UTF-8.
        let s = std::str::from_utf8(&self.data[start..self.x])
            .map_err(|_| ParseError::at("Invalid number", start_line, start_col))?;
        if !is_float {
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Value::Number(Number::from(i)));
            }
            if let Ok(u) = s.parse::<u64>() {
                return Ok(Value::Number(Number::from(u)));
            }
        }
        let f: f64 = s
            .parse()
            .map_err(|_| ParseError::at("Invalid number", start_line, start_col))?;
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| ParseError::at("Invalid number", start_line, start_col))
    }

    fn consume_digits(&mut self) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance(1);
            count += 1;
        }
        count
    }

    fn read_string(&mut self) -> Result<String, ParseError> {
        let (start_line, start_col) = (self.line, self.col);
        self.advance(1); // opening quote
        let body_start = self.x;
        loop {
            match self.peek() {
                None => return Err(self.err("Unterminated string")),
                Some(b'"') => break,
                Some(b'\\') => {
                    if self.x + 1 >= self.data.len() {
                        self.advance(1);
                        return Err(self.err("Unterminated string"));
                    }
                    self.advance(2);
                }
                Some(_) => self.advance(1),
            }
        }
        let body = &self.data[body_start..self.x];
        self.advance(1); // closing quote
        decode_string_body(body)
            .ok_or_else(|| ParseError::at("Invalid string escape", start_line, start_col))
    }

    fn read_array(&mut self) -> Result<Value, ParseError> {
        self.advance(1); // [
        let mut arr: Vec<Value> = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.advance(1);
            return Ok(Value::Array(arr));
        }
        loop {
            self.path.push(arr.len().to_string());
            let value = self.read_value()?;
            self.path.pop();
            arr.push(value);
            self.skip_whitespace();
            match self.peek() {
                Some(b']') => {
                    self.advance(1);
                    return Ok(Value::Array(arr));
                }
                Some(b',') => {
                    self.advance(1);
                    self.skip_whitespace();
                }
                None => return Err(self.eof()),
                Some(_) => {
                    return Err(self.err(format!("Expected ',' or ']', found '{}'", self.peek_char())))
                }
            }
        }
    }

    fn read_object(&mut self) -> Result<Value, ParseError> {
        self.advance(1); // {
        let mut map = Map::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.advance(1);
            return Ok(Value::Object(map));
        }
        loop {
            if self.peek() != Some(b'"') {
                return Err(match self.peek() {
                    None => self.eof(),
                    Some(_) => self.err(format!(
                        "Expected object key, found '{}'",
                        self.peek_char()
                    )),
                });
            }
            let key = self.read_string()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(match self.peek() {
                    None => self.eof(),
                    Some(_) => {
                        self.err(format!("Expected ':', found '{}'", self.peek_char()))
                    }
                });
            }
            self.advance(1);
            self.skip_whitespace();
            self.path.push(key.clone());
            let value = self.read_value()?;
            self.path.pop();
            // Duplicate keys: the later occurrence wins, as in a plain parse.
            map.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b'}') => {
                    self.advance(1);
                    return Ok(Value::Object(map));
                }
                Some(b',') => {
                    self.advance(1);
                    self.skip_whitespace();
                }
                None => return Err(self.eof()),
                Some(_) => {
                    return Err(self.err(format!("Expected ',' or '}}', found '{}'", self.peek_char())))
                }
            }
        }
    }
}

/// Decode a JSON string body (between the quotes), handling escapes.
/// Delegates the escape grammar to `serde_json` on the slow path.
fn decode_string_body(bytes: &[u8]) -> Option<String> {
    if !bytes.contains(&b'\\') {
        return std::str::from_utf8(bytes).ok().map(str::to_string);
    }
    let mut quoted = Vec::with_capacity(bytes.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(bytes);
    quoted.push(b'"');
    serde_json::from_slice(&quoted).ok()
}
