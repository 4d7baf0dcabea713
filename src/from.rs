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

use core::iter::FromIterator;
use std::borrow::Cow;

use serde_json::Map as JsonMap;
use serde_json::Number as JsonNumber;
use serde_json::Value as JsonValue;

use crate::buffer::StrSlice;
use crate::constants::MAX_SAFE_INTEGER;
use crate::object::Object;
use crate::value::JsonString;
use crate::value::Value;

macro_rules! from_number {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

// Integers beyond 2^53 lose precision.
from_number! {
    i8 i16 i32 i64 isize
    u8 u16 u32 u64 usize
    f32 f64
}

impl From<bool> for Value<'_> {
    fn from(f: bool) -> Self {
        Value::Bool(f)
    }
}

impl From<String> for Value<'_> {
    fn from(f: String) -> Self {
        Value::String(JsonString::owned(f))
    }
}

/// Borrows `f`; no characters are copied.
impl<'a> From<&'a str> for Value<'a> {
    fn from(f: &'a str) -> Self {
        Value::String(JsonString::borrowed(StrSlice::borrowed(f)))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(f: Cow<'a, str>) -> Self {
        match f {
            Cow::Borrowed(s) => Value::from(s),
            Cow::Owned(s) => Value::from(s),
        }
    }
}

impl<'a> From<StrSlice<'a>> for Value<'a> {
    fn from(f: StrSlice<'a>) -> Self {
        Value::String(JsonString::borrowed(f))
    }
}

impl<'a> From<JsonString<'a>> for Value<'a> {
    fn from(f: JsonString<'a>) -> Self {
        Value::String(f)
    }
}

impl<'a> From<Object<'a>> for Value<'a> {
    fn from(o: Object<'a>) -> Self {
        Value::Object(Box::new(o))
    }
}

impl<'a, T: Into<Value<'a>>> From<Vec<T>> for Value<'a> {
    fn from(f: Vec<T>) -> Self {
        Value::Array(f.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(f: Option<T>) -> Self {
        f.map_or(Value::Null, Into::into)
    }
}

impl<'a, T: Into<Value<'a>>> FromIterator<T> for Value<'a> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a, K: Into<String>, V: Into<Value<'a>>> FromIterator<(K, V)> for Value<'a> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(Box::new(iter.into_iter().collect()))
    }
}

impl From<()> for Value<'_> {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<'a> Value<'a> {
    /// Builds an array from anything convertible into values.
    ///
    /// ```rust
    /// use bufjson::Value;
    ///
    /// let value = Value::array([1, 2, 3]);
    /// assert_eq!(value.to_string(), "[1,2,3]");
    /// ```
    pub fn array<I>(iter: I) -> Value<'a>
    where
        I: IntoIterator,
        I::Item: Into<Value<'a>>,
    {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }

    /// Builds an object from key/value pairs. A repeated key replaces the
    /// earlier value in place.
    pub fn object<I, K, V>(iter: I) -> Value<'a>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value<'a>>,
    {
        Value::Object(Box::new(iter.into_iter().collect()))
    }
}

impl From<&JsonValue> for Value<'static> {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(v) => Value::Bool(*v),
            // `as_f64` only fails for arbitrary precision numbers out of range
            JsonValue::Number(v) => v.as_f64().map_or(Value::Null, Value::Number),
            JsonValue::String(v) => Value::from(v.clone()),
            JsonValue::Array(arr) => Value::Array(arr.iter().map(Value::from).collect()),
            JsonValue::Object(obj) => {
                let mut map = Object::with_capacity(obj.len());
                for (k, v) in obj.iter() {
                    map.set(k.as_str(), Value::from(v));
                }
                Value::Object(Box::new(map))
            }
        }
    }
}

impl From<JsonValue> for Value<'static> {
    fn from(value: JsonValue) -> Self {
        (&value).into()
    }
}

impl From<&Value<'_>> for JsonValue {
    fn from(value: &Value<'_>) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(v) => JsonValue::Bool(*v),
            Value::Number(v) => {
                if v.fract() == 0.0 && v.abs() < MAX_SAFE_INTEGER {
                    JsonValue::Number((*v as i64).into())
                } else if let Some(n) = JsonNumber::from_f64(*v) {
                    JsonValue::Number(n)
                } else {
                    // If the value is NaN or Infinity, fallback to NULL
                    JsonValue::Null
                }
            }
            Value::String(v) => JsonValue::String(v.to_string()),
            Value::Array(arr) => JsonValue::Array(arr.iter().map(JsonValue::from).collect()),
            Value::Object(obj) => {
                let mut map = JsonMap::with_capacity(obj.len());
                for (k, v) in obj.iter() {
                    map.insert(k.clone(), JsonValue::from(v));
                }
                JsonValue::Object(map)
            }
        }
    }
}

impl From<Value<'_>> for JsonValue {
    fn from(value: Value<'_>) -> Self {
        (&value).into()
    }
}
