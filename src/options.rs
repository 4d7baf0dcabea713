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

/// Configuration for [`parse_with_options`](crate::parse_with_options).
///
/// ```rust
/// use bufjson::{parse_with_options, ParseOptions};
///
/// let text = br#"{"id":7} trailing log line"#;
/// let options = ParseOptions::default().allow_trailing_characters(true);
/// let (value, end) = parse_with_options(text, &options).unwrap();
/// assert_eq!(value.to_string(), r#"{"id":7}"#);
/// assert_eq!(end, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Copy the input into a private shared buffer.
    ///
    /// When `false`, string slices borrow the input directly and the parsed
    /// value cannot outlive it.
    ///
    /// # Default
    ///
    /// `true`
    pub copy_input: bool,

    /// Reject anything but whitespace after the top-level value.
    ///
    /// Turn this off to parse a document embedded in a larger text; the
    /// returned offset then tells where the value ended.
    ///
    /// # Default
    ///
    /// `true`
    pub require_trailing_whitespace_only: bool,

    /// Maximum nesting depth of objects and arrays.
    ///
    /// # Default
    ///
    /// `None` (unlimited; nesting depth is bounded by the call stack)
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            copy_input: true,
            require_trailing_whitespace_only: true,
            max_depth: None,
        }
    }
}

impl ParseOptions {
    pub fn copy_input(mut self, copy_input: bool) -> Self {
        self.copy_input = copy_input;
        self
    }

    pub fn allow_trailing_characters(mut self, allow: bool) -> Self {
        self.require_trailing_whitespace_only = !allow;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
