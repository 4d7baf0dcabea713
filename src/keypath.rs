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

use std::borrow::Cow;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Deref;

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::character::complete::i64;
use nom::character::complete::multispace0;
use nom::combinator::map;
use nom::combinator::map_res;
use nom::error::ErrorKind;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::sequence::preceded;
use nom::sequence::terminated;
use nom::IResult;
use nom::Parser;

use crate::Error;

/// One step of a lookup: an array index or an object key.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Key<'a> {
    /// represents the index of an Array, negative values count from the end.
    Index(i64),
    /// represents the field name of an Object.
    Name(Cow<'a, str>),
}

impl Key<'_> {
    pub fn into_owned(self) -> Key<'static> {
        match self {
            Key::Index(idx) => Key::Index(idx),
            Key::Name(name) => Key::Name(Cow::Owned(name.into_owned())),
        }
    }

    pub fn to_owned_key(&self) -> Key<'static> {
        self.clone().into_owned()
    }
}

impl From<i64> for Key<'_> {
    fn from(idx: i64) -> Self {
        Key::Index(idx)
    }
}

impl From<i32> for Key<'_> {
    fn from(idx: i32) -> Self {
        Key::Index(idx.into())
    }
}

impl From<u32> for Key<'_> {
    fn from(idx: u32) -> Self {
        Key::Index(idx.into())
    }
}

impl From<usize> for Key<'_> {
    fn from(idx: usize) -> Self {
        // anything past i64::MAX is out of range for every array
        Key::Index(i64::try_from(idx).unwrap_or(i64::MAX))
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(Cow::Borrowed(name))
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Key::Name(Cow::Borrowed(name.as_str()))
    }
}

impl From<String> for Key<'_> {
    fn from(name: String) -> Self {
        Key::Name(Cow::Owned(name))
    }
}

impl<'a> From<Cow<'a, str>> for Key<'a> {
    fn from(name: Cow<'a, str>) -> Self {
        Key::Name(name)
    }
}

impl Display for Key<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Index(idx) => write!(f, "{idx}"),
            Key::Name(name) if needs_quotes(name) => {
                write!(f, "\"")?;
                for c in name.chars() {
                    if c == '"' || c == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "\"")
            }
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

fn needs_quotes(name: &str) -> bool {
    // a raw name must not begin like an index
    let numeric_prefix = match name.as_bytes() {
        [b'-' | b'+', c, ..] | [c, ..] => c.is_ascii_digit(),
        [] => true,
    };
    numeric_prefix || name.bytes().any(|c| !is_raw_name_byte(c))
}

fn is_raw_name_byte(c: u8) -> bool {
    !matches!(c, b',' | b'{' | b'}' | b'"' | b'\\') && !c.is_ascii_whitespace()
}

/// An ordered sequence of keys, written as `{info,-1}`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct KeyPath<'a> {
    pub keys: Vec<Key<'a>>,
}

impl<'a> KeyPath<'a> {
    pub fn new(keys: Vec<Key<'a>>) -> KeyPath<'a> {
        KeyPath { keys }
    }

    pub fn push(&mut self, key: impl Into<Key<'a>>) {
        self.keys.push(key.into());
    }

    pub fn as_slice(&self) -> &[Key<'a>] {
        &self.keys
    }

    pub fn into_owned(self) -> KeyPath<'static> {
        KeyPath {
            keys: self.keys.into_iter().map(Key::into_owned).collect(),
        }
    }
}

impl KeyPath<'static> {
    pub(crate) fn from_prefix(keys: &[Key<'_>]) -> KeyPath<'static> {
        KeyPath {
            keys: keys.iter().map(Key::to_owned_key).collect(),
        }
    }
}

impl<'a> Deref for KeyPath<'a> {
    type Target = [Key<'a>];

    fn deref(&self) -> &[Key<'a>] {
        &self.keys
    }
}

impl<'a, K: Into<Key<'a>>> FromIterator<K> for KeyPath<'a> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        KeyPath {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for KeyPath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{key}")?;
        }
        write!(f, "}}")?;
        Ok(())
    }
}

/// Builds a fixed-size path of [`Key`]s from string and integer literals.
///
/// ```rust
/// use bufjson::{keys, parse_value};
///
/// let value = parse_value(br#"{"info":[1,2,3]}"#).unwrap();
/// assert_eq!(value.find(&keys!["info", -1]).unwrap().as_f64(), Some(3.0));
/// ```
#[macro_export]
macro_rules! keys {
    ($($key:expr),* $(,)?) => {
        [$($crate::Key::from($key)),*]
    };
}

/// Parsing the input string to a key path.
pub fn parse_key_path(input: &[u8]) -> Result<KeyPath<'_>, Error> {
    match key_path(input) {
        Ok((rest, keys)) => {
            if !rest.is_empty() {
                return Err(Error::InvalidKeyPath);
            }
            Ok(KeyPath { keys })
        }
        Err(nom::Err::Error(_) | nom::Err::Failure(_)) => Err(Error::InvalidKeyPath),
        Err(nom::Err::Incomplete(_)) => unreachable!(),
    }
}

fn key(input: &[u8]) -> IResult<&[u8], Key<'_>> {
    alt((
        map(i64, Key::Index),
        map(quoted_name, Key::Name),
        map(raw_name, Key::Name),
    ))
    .parse(input)
}

fn raw_name(input: &[u8]) -> IResult<&[u8], Cow<'_, str>> {
    map(
        map_res(take_while1(is_raw_name_byte), std::str::from_utf8),
        Cow::Borrowed,
    )
    .parse(input)
}

fn quoted_name(input: &[u8]) -> IResult<&[u8], Cow<'_, str>> {
    let (body, _) = char::<_, nom::error::Error<&[u8]>>('"').parse(input)?;
    let mut escaped = false;
    let mut idx = 0;
    let end = loop {
        match body.get(idx) {
            Some(b'\\') => {
                escaped = true;
                idx += 2;
            }
            Some(b'"') => break idx,
            Some(_) => idx += 1,
            None => return Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Char))),
        }
    };
    let raw = std::str::from_utf8(&body[..end])
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, ErrorKind::Verify)))?;
    let name = if escaped {
        let mut name = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => name.extend(chars.next()),
                c => name.push(c),
            }
        }
        Cow::Owned(name)
    } else {
        Cow::Borrowed(raw)
    };
    Ok((&body[end + 1..], name))
}

fn key_path(input: &[u8]) -> IResult<&[u8], Vec<Key<'_>>> {
    alt((
        delimited(
            preceded(multispace0, char('{')),
            separated_list1(char(','), delimited(multispace0, key, multispace0)),
            terminated(char('}'), multispace0),
        ),
        map(
            delimited(
                preceded(multispace0, char('{')),
                multispace0,
                terminated(char('}'), multispace0),
            ),
            |_| vec![],
        ),
    ))
    .parse(input)
}
