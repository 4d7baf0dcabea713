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

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Deref;
use std::ops::Range;
use std::sync::Arc;

/// A reference-counted, immutable text buffer.
///
/// Cloning a `Buffer` only clones the handle. Every [`StrSlice`] cut from a
/// buffer holds such a handle, so the bytes stay alive as long as any slice
/// derived from them.
#[derive(Clone)]
pub struct Buffer {
    data: Arc<[u8]>,
}

impl Buffer {
    /// Creates a buffer holding a private copy of `data`.
    pub fn copy_from(data: &[u8]) -> Buffer {
        log::trace!("copying {} bytes into a shared buffer", data.len());
        Buffer {
            data: Arc::from(data),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if both handles point to the same allocation.
    pub fn ptr_eq(&self, other: &Buffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Number of live handles sharing this buffer.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Buffer { data: data.into() }
    }
}

impl From<String> for Buffer {
    fn from(data: String) -> Self {
        Buffer::from(data.into_bytes())
    }
}

impl From<&str> for Buffer {
    fn from(data: &str) -> Self {
        Buffer::copy_from(data.as_bytes())
    }
}

impl Debug for Buffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.data.len())
            .field("handles", &self.handle_count())
            .finish()
    }
}

#[derive(Clone)]
enum Repr<'a> {
    // `range` is in bounds and the bytes it covers are valid UTF-8.
    Shared { buffer: Buffer, range: Range<usize> },
    Borrowed(&'a str),
}

/// A string view that never owns its characters.
///
/// A slice either points into a shared [`Buffer`], whose handle it carries,
/// or into caller-owned text whose lifetime is tracked by `'a`. Comparisons,
/// hashing and formatting only look at the referenced characters.
#[derive(Clone)]
pub struct StrSlice<'a> {
    repr: Repr<'a>,
}

impl<'a> StrSlice<'a> {
    /// Creates a slice over a freshly allocated copy of `s`.
    pub fn copied(s: &str) -> StrSlice<'static> {
        let buffer = Buffer::copy_from(s.as_bytes());
        let range = 0..buffer.len();
        StrSlice {
            repr: Repr::Shared { buffer, range },
        }
    }

    /// Creates a slice over `range` of a caller-supplied buffer, sharing its
    /// handle. Returns `None` if the range is out of bounds or not valid UTF-8.
    pub fn shared(buffer: &Buffer, range: Range<usize>) -> Option<StrSlice<'static>> {
        let bytes = buffer.as_bytes().get(range.clone())?;
        std::str::from_utf8(bytes).ok()?;
        Some(StrSlice {
            repr: Repr::Shared {
                buffer: buffer.clone(),
                range,
            },
        })
    }

    /// Creates a slice over `range` of `buffer` without validation.
    ///
    /// # Safety
    ///
    /// `range` must lie within `buffer` and cover valid UTF-8.
    pub(crate) unsafe fn shared_unchecked(buffer: &Buffer, range: Range<usize>) -> StrSlice<'static> {
        debug_assert!(std::str::from_utf8(&buffer.as_bytes()[range.clone()]).is_ok());
        StrSlice {
            repr: Repr::Shared {
                buffer: buffer.clone(),
                range,
            },
        }
    }

    /// Creates a slice over caller-owned text. No handle is kept: the borrow
    /// checker enforces that `s` outlives the slice.
    pub fn borrowed(s: &'a str) -> StrSlice<'a> {
        StrSlice {
            repr: Repr::Borrowed(s),
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Shared { buffer, range } => {
                let bytes = &buffer.as_bytes()[range.clone()];
                // SAFETY: the range was validated as UTF-8 on construction.
                unsafe { std::str::from_utf8_unchecked(bytes) }
            }
            Repr::Borrowed(s) => s,
        }
    }

    /// Returns a slice that no longer borrows caller text. Shared slices keep
    /// their handle; borrowed ones are copied into a fresh buffer.
    pub fn into_static(self) -> StrSlice<'static> {
        match self.repr {
            Repr::Shared { buffer, range } => StrSlice {
                repr: Repr::Shared { buffer, range },
            },
            Repr::Borrowed(s) => StrSlice::copied(s),
        }
    }

    /// The shared buffer backing this slice, if any.
    pub fn buffer(&self) -> Option<&Buffer> {
        match &self.repr {
            Repr::Shared { buffer, .. } => Some(buffer),
            Repr::Borrowed(_) => None,
        }
    }
}

impl Deref for StrSlice<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for StrSlice<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for StrSlice<'_> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<'a> From<&'a str> for StrSlice<'a> {
    fn from(s: &'a str) -> Self {
        StrSlice::borrowed(s)
    }
}

impl PartialEq for StrSlice<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for StrSlice<'_> {}

impl PartialEq<str> for StrSlice<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for StrSlice<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for StrSlice<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StrSlice<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for StrSlice<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl Debug for StrSlice<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for StrSlice<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.as_str(), f)
    }
}
