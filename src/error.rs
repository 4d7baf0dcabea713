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

use std::fmt::Display;
use std::fmt::Formatter;

use crate::keypath::KeyPath;
use crate::value::ValueKind;

/// The reason a JSON text was rejected by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorCode {
    InvalidEOF,
    InvalidNumberValue,
    InvalidStringValue,
    ExpectedSomeIdent,
    ExpectedSomeValue,
    ExpectedColon,
    ExpectedArrayCommaOrEnd,
    ExpectedObjectCommaOrEnd,
    UnexpectedTrailingCharacters,
    KeyMustBeAString,
    InvalidEscaped(u8),
    InvalidHex(u8),
    InvalidLoneLeadingSurrogateInHexEscape(u16),
    InvalidSurrogateInHexEscape(u16),
    UnexpectedEndOfHexEscape,
    RecursionLimitExceeded,
}

impl Display for ParseErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            ParseErrorCode::InvalidEOF => f.write_str("EOF while parsing a value"),
            ParseErrorCode::InvalidNumberValue => f.write_str("invalid number"),
            ParseErrorCode::InvalidStringValue => f.write_str("invalid string value"),
            ParseErrorCode::ExpectedSomeIdent => f.write_str("expected ident"),
            ParseErrorCode::ExpectedSomeValue => f.write_str("expected value"),
            ParseErrorCode::ExpectedColon => f.write_str("expected `:`"),
            ParseErrorCode::ExpectedArrayCommaOrEnd => f.write_str("expected `,` or `]`"),
            ParseErrorCode::ExpectedObjectCommaOrEnd => f.write_str("expected `,` or `}`"),
            ParseErrorCode::UnexpectedTrailingCharacters => f.write_str("trailing characters"),
            ParseErrorCode::KeyMustBeAString => f.write_str("key must be a string"),
            ParseErrorCode::InvalidEscaped(n) => write!(f, "invalid escaped '{:X}'", n),
            ParseErrorCode::InvalidHex(n) => write!(f, "invalid hex '{:X}'", n),
            ParseErrorCode::InvalidLoneLeadingSurrogateInHexEscape(n) => {
                write!(f, "lone leading surrogate in hex escape '{:X}'", n)
            }
            ParseErrorCode::InvalidSurrogateInHexEscape(n) => {
                write!(f, "invalid surrogate in hex escape '{:X}'", n)
            }
            ParseErrorCode::UnexpectedEndOfHexEscape => f.write_str("unexpected end of hex escape"),
            ParseErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

/// Errors produced by parsing and by the checked accessor family.
///
/// The navigation variants carry the path that resolved successfully before
/// the failing key, so `find_checked` reports where a lookup stopped.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{code}, pos {pos}")]
    Syntax {
        code: ParseErrorCode,
        pos: usize,
        found: Option<u8>,
    },
    #[error("key \"{key}\" not found at {path}")]
    KeyNotFound {
        key: String,
        path: KeyPath<'static>,
    },
    #[error("index {index} out of range for array of length {len} at {path}")]
    IndexOutOfRange {
        index: i64,
        len: usize,
        path: KeyPath<'static>,
    },
    #[error("expected {expected}, found {found} at {path}")]
    WrongType {
        expected: ValueKind,
        found: ValueKind,
        path: KeyPath<'static>,
    },
    #[error("no element matches the predicate")]
    NoMatch,
    #[error("invalid key path")]
    InvalidKeyPath,
}

impl Error {
    pub(crate) fn syntax(code: ParseErrorCode, pos: usize, found: Option<u8>) -> Error {
        Error::Syntax { code, pos, found }
    }

    pub(crate) fn wrong_type(expected: ValueKind, found: ValueKind) -> Error {
        Error::WrongType {
            expected,
            found,
            path: KeyPath::default(),
        }
    }

    /// Returns the byte offset of a syntax error.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Syntax { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// Returns `true` for the not-found family: a missing key, an index out
    /// of range, or a search without a match.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::KeyNotFound { .. } | Error::IndexOutOfRange { .. } | Error::NoMatch
        )
    }

    /// Records the keys resolved before a navigation failure.
    pub(crate) fn at_path(mut self, prefix: KeyPath<'static>) -> Error {
        match &mut self {
            Error::KeyNotFound { path, .. }
            | Error::IndexOutOfRange { path, .. }
            | Error::WrongType { path, .. } => *path = prefix,
            _ => {}
        }
        self
    }
}

pub type Result<T> = std::result::Result<T, Error>;
