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

//! `bufjson` is a `JSON` document model and parser built around shared buffers. It turns a byte buffer into a navigable tree of values, copying as little of the text as possible.
//!
//! ## Features
//!
//! - Zero-copy strings: a string without escapes is a slice of the parsed text, so parsing allocates once per container rather than once per string.
//! - Three ways to own the text: copy it into a private shared [`Buffer`] ([`parse_value`]), share a caller's [`Buffer`] ([`parse_buffer`]), or borrow it for the lifetime of the value ([`parse_value_borrowed`]).
//! - Uniform lookups: get by key or index, find by [`Key`] path, search arrays by predicate. Each comes in borrowing, cloning and moving flavours, returning an `Option`, the shared [`NULL`] sentinel, or an [`Error`] that names where the lookup stopped.
//! - Interop: `serde::Serialize` and conversions from and to `serde_json::Value`.
//!
//! ## Example
//!
//! ```rust
//! use bufjson::{keys, parse_value, Value};
//!
//! let text = br#"{"info": {"name": "Joe", "scores": [7, 8, 9]}}"#.to_vec();
//! let value = parse_value(&text).unwrap();
//! drop(text);
//!
//! assert_eq!(value["info"]["name"].as_str(), Some("Joe"));
//! assert_eq!(value.find(&keys!["info", "scores", -1]), Some(&Value::from(9)));
//! assert!(value.find_or_null(&keys!["info", "age"]).is_null());
//!
//! let err = value.find_checked(&keys!["info", "age"]).unwrap_err();
//! assert_eq!(err.to_string(), r#"key "age" not found at {info}"#);
//! ```
//!
//! ## Numbers
//!
//! Every number is held as an `f64`. Integers up to 2^53 in magnitude round-trip
//! exactly and are written back without a fraction.

#![allow(clippy::uninlined_format_args)]

mod access;
mod buffer;
mod constants;
mod cow;
mod error;
mod from;
pub mod keypath;
mod map;
mod object;
mod options;
mod parser;
mod ser;
mod util;
mod value;

pub use buffer::Buffer;
pub use buffer::StrSlice;
pub use cow::CowCell;
pub use error::Error;
pub use error::ParseErrorCode;
pub use error::Result;
pub use keypath::parse_key_path;
pub use keypath::Key;
pub use keypath::KeyPath;
pub use map::LinearMap;
pub use object::Object;
pub use options::ParseOptions;
pub use parser::parse_buffer;
pub use parser::parse_value;
pub use parser::parse_value_borrowed;
pub use parser::parse_with_options;
pub use value::*;
