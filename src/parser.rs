// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::ops::Range;
use std::str::FromStr;

use log::debug;
use log::trace;

use super::buffer::Buffer;
use super::buffer::StrSlice;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;
use super::object::Object;
use super::options::ParseOptions;
use super::util::parse_string;
use super::util::validate_utf8;
use super::value::JsonString;
use super::value::Value;

/// Parses JSON text into a value that owns a private copy of `buf`.
///
/// Strings without escapes are slices of that copy, so the copy is made once
/// per document rather than once per string. The input may be dropped as soon
/// as this returns.
pub fn parse_value(buf: &[u8]) -> Result<Value<'static>> {
    let buffer = Buffer::copy_from(buf);
    parse_buffer(&buffer)
}

/// Parses JSON text held by a shared [`Buffer`]. String slices in the result
/// keep clones of the caller's handle, no bytes are copied.
pub fn parse_buffer(buffer: &Buffer) -> Result<Value<'static>> {
    let options = ParseOptions::default();
    Parser::shared(buffer, &options).parse().map(|(value, _)| value)
}

/// Parses JSON text without copying it. Strings without escapes borrow `buf`,
/// so the result cannot outlive it.
pub fn parse_value_borrowed(buf: &[u8]) -> Result<Value<'_>> {
    let options = ParseOptions::default().copy_input(false);
    Parser::borrowed(buf, &options).parse().map(|(value, _)| value)
}

/// Parses JSON text according to `options`.
///
/// Returns the value and the offset just past it. With
/// [`allow_trailing_characters`](ParseOptions::allow_trailing_characters)
/// the offset is where the caller can resume reading.
pub fn parse_with_options<'a>(
    buf: &'a [u8],
    options: &ParseOptions,
) -> Result<(Value<'a>, usize)> {
    if options.copy_input {
        let buffer = Buffer::copy_from(buf);
        Parser::shared(&buffer, options).parse()
    } else {
        Parser::borrowed(buf, options).parse()
    }
}

impl FromStr for Value<'static> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_value(s.as_bytes())
    }
}

// Where string slices point to.
enum Source<'b, 'a> {
    Shared(&'b Buffer),
    Borrowed(&'a [u8]),
}

struct Parser<'b, 'a> {
    buf: &'b [u8],
    source: Source<'b, 'a>,
    idx: usize,
    depth: usize,
    options: &'b ParseOptions,
}

impl<'b, 'a: 'b> Parser<'b, 'a> {
    fn shared(buffer: &'b Buffer, options: &'b ParseOptions) -> Parser<'b, 'a> {
        Self {
            buf: buffer.as_bytes(),
            source: Source::Shared(buffer),
            idx: 0,
            depth: 0,
            options,
        }
    }

    fn borrowed(buf: &'a [u8], options: &'b ParseOptions) -> Parser<'b, 'a> {
        Self {
            buf,
            source: Source::Borrowed(buf),
            idx: 0,
            depth: 0,
            options,
        }
    }

    fn parse(mut self) -> Result<(Value<'a>, usize)> {
        self.parse_document()
            .inspect(|(_, end)| trace!("parsed JSON value of {} bytes", end))
            .inspect_err(|err| debug!("rejected JSON text of {} bytes: {}", self.buf.len(), err))
    }

    fn parse_document(&mut self) -> Result<(Value<'a>, usize)> {
        let value = self.parse_json_value()?;
        let end = self.idx;
        if self.options.require_trailing_whitespace_only {
            self.skip_whitespace();
            if self.idx < self.buf.len() {
                return Err(self.error(ParseErrorCode::UnexpectedTrailingCharacters));
            }
        }
        Ok((value, end))
    }

    fn parse_json_value(&mut self) -> Result<Value<'a>> {
        self.skip_whitespace();
        let c = self.next()?;
        match c {
            b'n' => self.parse_json_null(),
            b't' => self.parse_json_true(),
            b'f' => self.parse_json_false(),
            b'0'..=b'9' | b'-' => self.parse_json_number(),
            b'"' => self.parse_json_string().map(Value::String),
            b'[' => self.parse_json_array(),
            b'{' => self.parse_json_object(),
            _ => Err(self.error(ParseErrorCode::ExpectedSomeValue)),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.idx).copied()
    }

    #[inline]
    fn next(&self) -> Result<u8> {
        match self.peek() {
            Some(c) => Ok(c),
            None => Err(self.error(ParseErrorCode::InvalidEOF)),
        }
    }

    #[inline]
    fn must_is(&mut self, c: u8) -> Result<()> {
        if self.next()? == c {
            self.step();
            Ok(())
        } else {
            Err(self.error(ParseErrorCode::ExpectedSomeIdent))
        }
    }

    #[inline]
    fn step(&mut self) {
        self.idx += 1;
    }

    // Reports the byte at the current position.
    fn error(&self, code: ParseErrorCode) -> Error {
        Error::syntax(code, self.idx, self.peek())
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.step();
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        match self.options.max_depth {
            Some(max) if self.depth > max => {
                Err(self.error(ParseErrorCode::RecursionLimitExceeded))
            }
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_json_null(&mut self) -> Result<Value<'a>> {
        for v in *b"null" {
            self.must_is(v)?;
        }
        Ok(Value::Null)
    }

    fn parse_json_true(&mut self) -> Result<Value<'a>> {
        for v in *b"true" {
            self.must_is(v)?;
        }
        Ok(Value::Bool(true))
    }

    fn parse_json_false(&mut self) -> Result<Value<'a>> {
        for v in *b"false" {
            self.must_is(v)?;
        }
        Ok(Value::Bool(false))
    }

    /// Parses the run of number characters at the cursor.
    ///
    /// The run is handed to `fast_float2` as a whole, so a run that is not
    /// entirely one number (`1-2`, `1e`, `--1`) is rejected rather than
    /// split.
    fn parse_json_number(&mut self) -> Result<Value<'a>> {
        let start = self.idx;
        while let Some(b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E') = self.peek() {
            self.step();
        }
        match fast_float2::parse::<f64, _>(&self.buf[start..self.idx]) {
            // out-of-range literals saturate to infinity
            Ok(v) if v.is_finite() => Ok(Value::Number(v)),
            _ => Err(Error::syntax(
                ParseErrorCode::InvalidNumberValue,
                start,
                self.buf.get(start).copied(),
            )),
        }
    }

    /// Parses a string at the cursor.
    ///
    /// A string without escapes becomes a slice of the source and allocates
    /// nothing; a string with escapes is decoded into an owned `String`.
    fn parse_json_string(&mut self) -> Result<JsonString<'a>> {
        self.must_is(b'"')?;
        let start = self.idx;
        let mut escaped = false;
        loop {
            let Some(offset) = self.buf[self.idx..]
                .iter()
                .position(|c| matches!(c, b'"' | b'\\'))
            else {
                self.idx = self.buf.len();
                return Err(self.error(ParseErrorCode::InvalidEOF));
            };
            self.idx += offset;
            if self.buf[self.idx] == b'"' {
                break;
            }
            escaped = true;
            self.idx += 2;
            if self.idx > self.buf.len() {
                self.idx = self.buf.len();
                return Err(self.error(ParseErrorCode::InvalidEOF));
            }
        }
        let end = self.idx;
        self.step();

        let data = validate_utf8(&self.buf[start..end]).map_err(|offset| {
            Error::syntax(
                ParseErrorCode::InvalidStringValue,
                start + offset,
                self.buf.get(start + offset).copied(),
            )
        })?;
        if escaped {
            parse_string(data, start).map(JsonString::owned)
        } else {
            Ok(JsonString::borrowed(self.slice(start..end)))
        }
    }

    // `range` has been validated as UTF-8.
    fn slice(&self, range: Range<usize>) -> StrSlice<'a> {
        match self.source {
            // SAFETY: `buf` is the content of `buffer`.
            Source::Shared(buffer) => unsafe { StrSlice::shared_unchecked(buffer, range) },
            // SAFETY: `buf` is `bytes`.
            Source::Borrowed(bytes) => {
                StrSlice::borrowed(unsafe { std::str::from_utf8_unchecked(&bytes[range]) })
            }
        }
    }

    fn parse_json_array(&mut self) -> Result<Value<'a>> {
        self.enter()?;
        self.must_is(b'[')?;

        let mut values = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.step();
            self.leave();
            return Ok(Value::Array(values));
        }
        loop {
            values.push(self.parse_json_value()?);
            self.skip_whitespace();
            match self.next()? {
                b',' => self.step(),
                b']' => {
                    self.step();
                    break;
                }
                _ => return Err(self.error(ParseErrorCode::ExpectedArrayCommaOrEnd)),
            }
        }
        self.leave();
        Ok(Value::Array(values))
    }

    /// Parses an object at the cursor.
    ///
    /// A repeated key keeps the position of its first occurrence and takes
    /// the value of its last.
    fn parse_json_object(&mut self) -> Result<Value<'a>> {
        self.enter()?;
        self.must_is(b'{')?;

        let mut obj = Object::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.step();
            self.leave();
            return Ok(Value::Object(Box::new(obj)));
        }
        loop {
            self.skip_whitespace();
            if self.next()? != b'"' {
                return Err(self.error(ParseErrorCode::KeyMustBeAString));
            }
            let key = self.parse_json_string()?;

            self.skip_whitespace();
            if self.next()? != b':' {
                return Err(self.error(ParseErrorCode::ExpectedColon));
            }
            self.step();

            let value = self.parse_json_value()?;
            *obj.get_or_insert_null(&key) = value;

            self.skip_whitespace();
            match self.next()? {
                b',' => self.step(),
                b'}' => {
                    self.step();
                    break;
                }
                _ => return Err(self.error(ParseErrorCode::ExpectedObjectCommaOrEnd)),
            }
        }
        self.leave();
        Ok(Value::Object(Box::new(obj)))
    }
}
