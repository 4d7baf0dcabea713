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

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;

use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;
use serde::Serialize;
use serde::Serializer;

use crate::buffer::StrSlice;
use crate::constants::MAX_SAFE_INTEGER;
use crate::object::Object;
use crate::value::Value;

impl Display for Value<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl Value<'_> {
    /// Writes the value as compact JSON text.
    pub fn write_to<W: Write>(&self, w: &mut W) -> fmt::Result {
        match self {
            Value::Null => w.write_str("null"),
            Value::Bool(v) => w.write_str(if *v { "true" } else { "false" }),
            Value::Number(v) => write_number(*v, w),
            Value::String(v) => escape_string(v, w),
            Value::Array(vs) => {
                w.write_char('[')?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        w.write_char(',')?;
                    }
                    v.write_to(w)?;
                }
                w.write_char(']')
            }
            Value::Object(obj) => {
                w.write_char('{')?;
                for (i, (k, v)) in obj.iter().enumerate() {
                    if i > 0 {
                        w.write_char(',')?;
                    }
                    escape_string(k, w)?;
                    w.write_char(':')?;
                    v.write_to(w)?;
                }
                w.write_char('}')
            }
        }
    }

    /// Serializes the value as compact JSON text into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

// Integers are written without a fraction while every integer of that
// magnitude is exact in f64. NaN and infinities have no JSON form.
fn write_number<W: Write>(n: f64, w: &mut W) -> fmt::Result {
    if !n.is_finite() {
        return w.write_str("null");
    }
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        let mut buffer = itoa::Buffer::new();
        w.write_str(buffer.format(n as i64))
    } else {
        let mut buffer = ryu::Buffer::new();
        w.write_str(buffer.format_finite(n))
    }
}

fn escape_string<W: Write>(s: &str, w: &mut W) -> fmt::Result {
    w.write_char('"')?;
    let bytes = s.as_bytes();
    let mut last_start = 0;
    for (i, byte) in bytes.iter().enumerate() {
        // add backslash for escaped characters.
        let c = match byte {
            0x5C => "\\\\",
            0x22 => "\\\"",
            0x0A => "\\n",
            0x0D => "\\r",
            0x09 => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };
        if i > last_start {
            w.write_str(&s[last_start..i])?;
        }
        if c.is_empty() {
            write!(w, "\\u{:04x}", byte)?;
        } else {
            w.write_str(c)?;
        }
        last_start = i + 1;
    }
    if last_start < bytes.len() {
        w.write_str(&s[last_start..])?;
    }
    w.write_char('"')
}

impl Serialize for Value<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Number(v) if !v.is_finite() => serializer.serialize_unit(),
            Value::Number(v) if v.fract() == 0.0 && v.abs() < MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*v as i64)
            }
            Value::Number(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Array(vs) => {
                let mut serialize_seq = serializer.serialize_seq(Some(vs.len()))?;
                for v in vs {
                    serialize_seq.serialize_element(v)?;
                }
                serialize_seq.end()
            }
            Value::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl Serialize for Object<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut serialize_map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            serialize_map.serialize_entry(k, v)?;
        }
        serialize_map.end()
    }
}

impl Serialize for StrSlice<'_> {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self)
    }
}
