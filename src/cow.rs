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

use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Deref;

/// A copy-on-write cell holding either a lightweight borrowed view `B`
/// or an owned value `O` of the same logical content.
///
/// Unlike [`std::borrow::Cow`], the borrowed side is a value type of its own
/// (for instance a slice that keeps its backing buffer alive), so both sides
/// only need to dereference to the same target. Reads never promote; the
/// first mutable access converts the borrowed view into an owned value.
#[derive(Clone)]
pub enum CowCell<B, O> {
    Borrowed(B),
    Owned(O),
}

impl<B, O> CowCell<B, O>
where
    B: Deref,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
    pub fn borrowed(value: B) -> Self {
        CowCell::Borrowed(value)
    }

    pub fn owned(value: O) -> Self {
        CowCell::Owned(value)
    }

    pub fn set_borrowed(&mut self, value: B) -> &mut Self {
        *self = CowCell::Borrowed(value);
        self
    }

    pub fn set_owned(&mut self, value: O) -> &mut Self {
        *self = CowCell::Owned(value);
        self
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, CowCell::Borrowed(_))
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, CowCell::Owned(_))
    }

    /// Returns the borrowed view, if that is the current representation.
    pub fn as_borrowed(&self) -> Option<&B> {
        match self {
            CowCell::Borrowed(b) => Some(b),
            CowCell::Owned(_) => None,
        }
    }

    /// Reads the content without changing the representation.
    pub fn as_deref(&self) -> &B::Target {
        match self {
            CowCell::Borrowed(b) => b,
            CowCell::Owned(o) => o,
        }
    }

    /// Returns an owned copy of the content, leaving `self` untouched.
    pub fn to_owned_value(&self) -> O {
        O::from(self.as_deref())
    }

    /// Promotes a borrowed view to an owned value in place and returns it
    /// mutably. Already owned content is returned as is.
    pub fn to_mut(&mut self) -> &mut O {
        match self {
            CowCell::Owned(o) => o,
            CowCell::Borrowed(b) => {
                *self = CowCell::Owned(O::from(&**b));
                self.to_mut()
            }
        }
    }

    pub fn into_owned(self) -> O {
        match self {
            CowCell::Borrowed(b) => O::from(&*b),
            CowCell::Owned(o) => o,
        }
    }
}

impl<B, O> Deref for CowCell<B, O>
where
    B: Deref,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
    type Target = B::Target;

    fn deref(&self) -> &Self::Target {
        self.as_deref()
    }
}

impl<B, O> Default for CowCell<B, O>
where
    O: Default,
{
    fn default() -> Self {
        CowCell::Owned(O::default())
    }
}

impl<B, O> PartialEq for CowCell<B, O>
where
    B: Deref,
    B::Target: PartialEq,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_deref() == other.as_deref()
    }
}

impl<B, O> Eq for CowCell<B, O>
where
    B: Deref,
    B::Target: Eq,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
}

impl<B, O> PartialOrd for CowCell<B, O>
where
    B: Deref,
    B::Target: Ord,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<B, O> Ord for CowCell<B, O>
where
    B: Deref,
    B::Target: Ord,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_deref().cmp(other.as_deref())
    }
}

impl<B, O> Hash for CowCell<B, O>
where
    B: Deref,
    B::Target: Hash,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_deref().hash(state)
    }
}

impl<B, O> Debug for CowCell<B, O>
where
    B: Deref,
    B::Target: Debug,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.as_deref(), f)
    }
}

impl<B, O> Display for CowCell<B, O>
where
    B: Deref,
    B::Target: Display,
    O: Deref<Target = B::Target> + for<'x> From<&'x B::Target>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.as_deref(), f)
    }
}
