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

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::buffer::StrSlice;
use crate::constants::*;
use crate::cow::CowCell;
use crate::error::Error;
use crate::error::Result;
use crate::object::Object;

/// A JSON string: a slice of the parsed text, or an owned copy once it has
/// been unescaped or mutated.
pub type JsonString<'a> = CowCell<StrSlice<'a>, String>;

/// A JSON array.
pub type Array<'a> = Vec<Value<'a>>;

/// The shared `null` returned by the `*_or_null` accessors on a miss.
pub static NULL: Value<'static> = Value::Null;

/// Represents a JSON value.
///
/// Strings borrow from the parsed text where possible. The lifetime `'a`
/// is the lifetime of caller-owned text; values parsed from a copied or
/// shared [`Buffer`](crate::Buffer) are `Value<'static>`.
#[derive(Clone, Default, PartialEq)]
pub enum Value<'a> {
    /// Represents a JSON null value
    #[default]
    Null,
    /// Represents a JSON string value
    String(JsonString<'a>),
    /// Represents a JSON number, integral or not
    Number(f64),
    /// Represents a JSON boolean value (true or false)
    Bool(bool),
    /// Represents a JSON object, boxed to keep `Value` small
    Object(Box<Object<'a>>),
    /// Represents a JSON array of values
    Array(Array<'a>),
}

/// The active member of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    String,
    Number,
    Bool,
    Object,
    Array,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Null => TYPE_NULL,
            ValueKind::String => TYPE_STRING,
            ValueKind::Number => TYPE_NUMBER,
            ValueKind::Bool => TYPE_BOOLEAN,
            ValueKind::Object => TYPE_OBJECT,
            ValueKind::Array => TYPE_ARRAY,
        };
        f.write_str(name)
    }
}

impl Debug for Value<'_> {
    fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
        match *self {
            Value::Null => formatter.debug_tuple("Null").finish(),
            Value::Bool(v) => formatter.debug_tuple("Bool").field(&v).finish(),
            Value::Number(v) => formatter.debug_tuple("Number").field(&v).finish(),
            Value::String(ref v) => formatter.debug_tuple("String").field(v).finish(),
            Value::Array(ref v) => {
                formatter.write_str("Array(")?;
                Debug::fmt(v, formatter)?;
                formatter.write_str(")")
            }
            Value::Object(ref v) => {
                formatter.write_str("Object(")?;
                Debug::fmt(v, formatter)?;
                formatter.write_str(")")
            }
        }
    }
}

/// Marker for the `null` member, used with [`Value::is`] and [`Value::ensure`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null;

mod private {
    pub trait Sealed {}
}

/// A payload type of one [`Value`] member.
///
/// Implemented for [`Null`], [`JsonString`], `f64`, `bool`, [`Object`] and
/// [`Array`]. Downcasts through this trait never convert between members.
pub trait Variant<'a>: Sized + private::Sealed {
    const KIND: ValueKind;

    fn project<'v>(value: &'v Value<'a>) -> Option<&'v Self>;

    fn project_mut<'v>(value: &'v mut Value<'a>) -> Option<&'v mut Self>;

    /// Moves the payload out, or hands the value back on a mismatch.
    fn extract(value: Value<'a>) -> std::result::Result<Self, Value<'a>>;
}

impl private::Sealed for Null {}

impl<'a> Variant<'a> for Null {
    const KIND: ValueKind = ValueKind::Null;

    fn project<'v>(value: &'v Value<'a>) -> Option<&'v Self> {
        value.is_null().then_some(&Null)
    }

    fn project_mut<'v>(value: &'v mut Value<'a>) -> Option<&'v mut Self> {
        // boxing a zero-sized type does not allocate
        value.is_null().then(|| Box::leak(Box::new(Null)))
    }

    fn extract(value: Value<'a>) -> std::result::Result<Self, Value<'a>> {
        match value {
            Value::Null => Ok(Null),
            other => Err(other),
        }
    }
}

macro_rules! impl_variant {
    ($lt:lifetime, $ty:ty, $kind:ident) => {
        impl<$lt> private::Sealed for $ty {}

        impl<$lt> Variant<$lt> for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn project<'v>(value: &'v Value<$lt>) -> Option<&'v Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }

            fn project_mut<'v>(value: &'v mut Value<$lt>) -> Option<&'v mut Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }

            fn extract(value: Value<$lt>) -> std::result::Result<Self, Value<$lt>> {
                match value {
                    Value::$kind(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

impl_variant!('a, JsonString<'a>, String);
impl_variant!('a, f64, Number);
impl_variant!('a, bool, Bool);
impl_variant!('a, Array<'a>, Array);

impl private::Sealed for Object<'_> {}

impl<'a> Variant<'a> for Object<'a> {
    const KIND: ValueKind = ValueKind::Object;

    fn project<'v>(value: &'v Value<'a>) -> Option<&'v Self> {
        match value {
            Value::Object(obj) => Some(&**obj),
            _ => None,
        }
    }

    fn project_mut<'v>(value: &'v mut Value<'a>) -> Option<&'v mut Self> {
        match value {
            Value::Object(obj) => Some(&mut **obj),
            _ => None,
        }
    }

    fn extract(value: Value<'a>) -> std::result::Result<Self, Value<'a>> {
        match value {
            Value::Object(obj) => Ok(*obj),
            other => Err(other),
        }
    }
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }

    /// Tests the active member.
    pub fn is<T: Variant<'a>>(&self) -> bool {
        self.kind() == T::KIND
    }

    /// Borrows the payload if `T` is the active member.
    pub fn ensure<T: Variant<'a>>(&self) -> Option<&T> {
        T::project(self)
    }

    pub fn ensure_mut<T: Variant<'a>>(&mut self) -> Option<&mut T> {
        T::project_mut(self)
    }

    /// Like [`ensure`](Value::ensure), reporting a mismatch as
    /// [`Error::WrongType`].
    pub fn ensure_checked<T: Variant<'a>>(&self) -> Result<&T> {
        T::project(self).ok_or_else(|| Error::wrong_type(T::KIND, self.kind()))
    }

    /// Moves the payload out if `T` is the active member.
    pub fn into_ensure<T: Variant<'a>>(self) -> Option<T> {
        T::extract(self).ok()
    }

    pub fn into_ensure_checked<T: Variant<'a>>(self) -> Result<T> {
        T::extract(self).map_err(|v| Error::wrong_type(T::KIND, v.kind()))
    }

    /// Moves the value out, leaving `Null` behind.
    pub fn take(&mut self) -> Value<'a> {
        std::mem::take(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_deref()),
            _ => None,
        }
    }

    pub fn as_json_string(&self) -> Option<&JsonString<'a>> {
        self.ensure()
    }

    /// Returns the owned string, promoting a borrowed slice first.
    pub fn as_string_mut(&mut self) -> Option<&mut String> {
        match self {
            Value::String(s) => Some(s.to_mut()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number if it is integral and fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n)
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object<'a>> {
        self.ensure()
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object<'a>> {
        self.ensure_mut()
    }

    pub fn as_array(&self) -> Option<&Array<'a>> {
        self.ensure()
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array<'a>> {
        self.ensure_mut()
    }

    pub fn array_length(&self) -> Option<usize> {
        self.as_array().map(Vec::len)
    }

    /// Detaches every string from borrowed text, yielding a value that
    /// owns or shares all of its data.
    pub fn into_static(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(v) => Value::Bool(v),
            Value::Number(v) => Value::Number(v),
            Value::String(s) => Value::String(match s {
                CowCell::Borrowed(slice) => JsonString::borrowed(slice.into_static()),
                CowCell::Owned(s) => JsonString::owned(s),
            }),
            Value::Array(vs) => Value::Array(vs.into_iter().map(Value::into_static).collect()),
            Value::Object(obj) => Value::Object(Box::new(obj.into_static())),
        }
    }
}
