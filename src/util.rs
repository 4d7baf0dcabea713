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

use super::constants::*;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;

#[allow(clippy::zero_prefixed_literal)]
static HEX: [u8; 256] = {
    const __: u8 = 255; // not a hex digit
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 0
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
        00, 01, 02, 03, 04, 05, 06, 07, 08, 09, __, __, __, __, __, __, // 3
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

/// Checks that `data` is UTF-8. On failure returns the offset of the first
/// byte that is not part of a valid sequence.
#[inline]
pub(crate) fn validate_utf8(data: &[u8]) -> std::result::Result<&str, usize> {
    if data.is_ascii() {
        // SAFETY: ASCII is a subset of UTF-8.
        return Ok(unsafe { std::str::from_utf8_unchecked(data) });
    }
    std::str::from_utf8(data).map_err(|e| e.valid_up_to())
}

/// Decodes the escape sequences of a string body.
///
/// `start` is the offset of `data` in the parsed text and is only used to
/// position errors. Runs of unescaped characters are copied as they are.
pub(crate) fn parse_string(data: &str, start: usize) -> Result<String> {
    let bytes = data.as_bytes();
    let mut buf = String::with_capacity(data.len());
    let mut idx = 0;
    while let Some(offset) = bytes[idx..].iter().position(|b| *b == b'\\') {
        buf.push_str(&data[idx..idx + offset]);
        idx = parse_escaped_string(bytes, idx + offset + 1, start, &mut buf)?;
    }
    buf.push_str(&data[idx..]);
    Ok(buf)
}

// `idx` points just past the backslash; returns the index after the escape.
fn parse_escaped_string(bytes: &[u8], idx: usize, start: usize, buf: &mut String) -> Result<usize> {
    let Some(&byte) = bytes.get(idx) else {
        return Err(Error::syntax(
            ParseErrorCode::InvalidEOF,
            start + idx,
            None,
        ));
    };
    match byte {
        b'\\' => buf.push(BS),
        b'"' => buf.push(QU),
        b'n' => buf.push(NN),
        b'r' => buf.push(RR),
        b't' => buf.push(TT),
        b'u' => {
            let (c, next) = parse_unicode_escape(bytes, idx + 1, start)?;
            buf.push(c);
            return Ok(next);
        }
        other => {
            return Err(Error::syntax(
                ParseErrorCode::InvalidEscaped(other),
                start + idx,
                Some(other),
            ))
        }
    }
    Ok(idx + 1)
}

fn parse_unicode_escape(bytes: &[u8], idx: usize, start: usize) -> Result<(char, usize)> {
    let n1 = decode_hex_escape(bytes, idx, start)?;
    let next = idx + UNICODE_LEN;
    match n1 {
        // Low surrogate without preceding high surrogate
        0xDC00..=0xDFFF => Err(Error::syntax(
            ParseErrorCode::InvalidSurrogateInHexEscape(n1),
            start + idx,
            None,
        )),

        // Non-BMP characters are encoded as a sequence of two hex
        // escapes, representing UTF-16 surrogates.
        0xD800..=0xDBFF => {
            if bytes.get(next..next + 2) != Some(&b"\\u"[..]) {
                return Err(Error::syntax(
                    ParseErrorCode::InvalidLoneLeadingSurrogateInHexEscape(n1),
                    start + next,
                    bytes.get(next).copied(),
                ));
            }
            let n2 = decode_hex_escape(bytes, next + 2, start)?;
            if !(0xDC00..=0xDFFF).contains(&n2) {
                return Err(Error::syntax(
                    ParseErrorCode::InvalidSurrogateInHexEscape(n2),
                    start + next + 2,
                    None,
                ));
            }
            let n = ((u32::from(n1 - 0xD800) << 10) | u32::from(n2 - 0xDC00)) + 0x1_0000;
            char::from_u32(n)
                .map(|c| (c, next + 2 + UNICODE_LEN))
                .ok_or_else(|| {
                    Error::syntax(
                        ParseErrorCode::InvalidSurrogateInHexEscape(n2),
                        start + next + 2,
                        None,
                    )
                })
        }

        n => char::from_u32(u32::from(n))
            .map(|c| (c, next))
            .ok_or_else(|| {
                Error::syntax(
                    ParseErrorCode::InvalidSurrogateInHexEscape(n),
                    start + idx,
                    None,
                )
            }),
    }
}

#[inline]
fn decode_hex_val(val: u8) -> Option<u16> {
    let n = HEX[val as usize] as u16;
    if n == 255 {
        None
    } else {
        Some(n)
    }
}

#[inline]
fn decode_hex_escape(bytes: &[u8], idx: usize, start: usize) -> Result<u16> {
    let Some(numbers) = bytes.get(idx..idx + UNICODE_LEN) else {
        return Err(Error::syntax(
            ParseErrorCode::UnexpectedEndOfHexEscape,
            start + bytes.len(),
            None,
        ));
    };
    let mut n = 0;
    for (i, number) in numbers.iter().enumerate() {
        match decode_hex_val(*number) {
            Some(hex) => n = (n << 4) + hex,
            None => {
                return Err(Error::syntax(
                    ParseErrorCode::InvalidHex(*number),
                    start + idx + i,
                    Some(*number),
                ))
            }
        }
    }
    Ok(n)
}
