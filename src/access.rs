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

//! Lookups on [`Value`] by key, by path and by predicate.
//!
//! Key and path lookups go through one traversal (`resolve`, `resolve_path`)
//! that reports failures as [`Error`]. The public methods only
//! differ in how they hand out the result and what they do on failure:
//!
//! | ownership | optional | sentinel | checked |
//! |---|---|---|---|
//! | borrow | `get` | `get_or_null` | `get_checked` |
//! | clone | `get_cloned` | `get_cloned_or_null` | `get_cloned_checked` |
//! | move | `into_get` | `into_get_or_null` | `into_get_checked` |
//!
//! `find*` and `search*` follow the same scheme.

use std::ops::Index;

use crate::error::Error;
use crate::error::Result;
use crate::keypath::Key;
use crate::keypath::KeyPath;
use crate::value::Array;
use crate::value::Value;
use crate::value::ValueKind;
use crate::value::NULL;

fn or_null<'v, 'a>(res: Result<&'v Value<'a>>) -> &'v Value<'a> {
    res.unwrap_or(&NULL)
}

fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let idx = if index < 0 { index.checked_add(len)? } else { index };
    if (0..len).contains(&idx) {
        usize::try_from(idx).ok()
    } else {
        None
    }
}

fn mismatch(key: &Key<'_>, found: ValueKind) -> Error {
    let expected = match key {
        Key::Index(_) => ValueKind::Array,
        Key::Name(_) => ValueKind::Object,
    };
    Error::wrong_type(expected, found)
}

fn not_found(key: &Key<'_>, len: usize) -> Error {
    match key {
        Key::Index(index) => Error::IndexOutOfRange {
            index: *index,
            len,
            path: KeyPath::default(),
        },
        Key::Name(name) => Error::KeyNotFound {
            key: name.to_string(),
            path: KeyPath::default(),
        },
    }
}

impl<'a> Value<'a> {
    fn resolve(&self, key: &Key<'_>) -> Result<&Value<'a>> {
        match (self, key) {
            (Value::Array(arr), Key::Index(index)) => normalize_index(*index, arr.len())
                .map(|idx| &arr[idx])
                .ok_or_else(|| not_found(key, arr.len())),
            (Value::Object(obj), Key::Name(name)) => {
                obj.get(name).ok_or_else(|| not_found(key, obj.len()))
            }
            _ => Err(mismatch(key, self.kind())),
        }
    }

    fn resolve_mut(&mut self, key: &Key<'_>) -> Result<&mut Value<'a>> {
        let kind = self.kind();
        match (self, key) {
            (Value::Array(arr), Key::Index(index)) => {
                let len = arr.len();
                match normalize_index(*index, len) {
                    Some(idx) => Ok(&mut arr[idx]),
                    None => Err(not_found(key, len)),
                }
            }
            (Value::Object(obj), Key::Name(name)) => {
                let len = obj.len();
                obj.get_mut(name).ok_or_else(|| not_found(key, len))
            }
            _ => Err(mismatch(key, kind)),
        }
    }

    fn resolve_path(&self, path: &[Key<'_>]) -> Result<&Value<'a>> {
        let mut curr = self;
        for (i, key) in path.iter().enumerate() {
            curr = curr
                .resolve(key)
                .map_err(|e| e.at_path(KeyPath::from_prefix(&path[..i])))?;
        }
        Ok(curr)
    }

    fn resolve_path_mut(&mut self, path: &[Key<'_>]) -> Result<&mut Value<'a>> {
        let mut curr = self;
        for (i, key) in path.iter().enumerate() {
            curr = curr
                .resolve_mut(key)
                .map_err(|e| e.at_path(KeyPath::from_prefix(&path[..i])))?;
        }
        Ok(curr)
    }

    // get

    /// Returns the element at an array index or the entry under an object
    /// key. Negative indices count from the end, `-1` being the last element.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Option<&Value<'a>> {
        self.resolve(&key.into()).ok()
    }

    pub fn get_mut<'k>(&mut self, key: impl Into<Key<'k>>) -> Option<&mut Value<'a>> {
        self.resolve_mut(&key.into()).ok()
    }

    pub fn get_or_null<'k>(&self, key: impl Into<Key<'k>>) -> &Value<'a> {
        or_null(self.resolve(&key.into()))
    }

    pub fn get_checked<'k>(&self, key: impl Into<Key<'k>>) -> Result<&Value<'a>> {
        self.resolve(&key.into())
    }

    pub fn get_cloned<'k>(&self, key: impl Into<Key<'k>>) -> Option<Value<'a>> {
        self.get(key).cloned()
    }

    pub fn get_cloned_or_null<'k>(&self, key: impl Into<Key<'k>>) -> Value<'a> {
        self.get_or_null(key).clone()
    }

    pub fn get_cloned_checked<'k>(&self, key: impl Into<Key<'k>>) -> Result<Value<'a>> {
        self.get_checked(key).cloned()
    }

    /// Consumes the value and moves the child out without cloning it.
    pub fn into_get<'k>(self, key: impl Into<Key<'k>>) -> Option<Value<'a>> {
        self.into_get_checked(key).ok()
    }

    pub fn into_get_or_null<'k>(self, key: impl Into<Key<'k>>) -> Value<'a> {
        self.into_get_checked(key).unwrap_or_default()
    }

    pub fn into_get_checked<'k>(mut self, key: impl Into<Key<'k>>) -> Result<Value<'a>> {
        self.resolve_mut(&key.into()).map(Value::take)
    }

    // find

    /// Applies [`get`](Value::get) for each key of `path` in turn, stopping
    /// at the first failure. An empty path yields `self`.
    pub fn find(&self, path: &[Key<'_>]) -> Option<&Value<'a>> {
        self.resolve_path(path).ok()
    }

    pub fn find_mut(&mut self, path: &[Key<'_>]) -> Option<&mut Value<'a>> {
        self.resolve_path_mut(path).ok()
    }

    pub fn find_or_null(&self, path: &[Key<'_>]) -> &Value<'a> {
        or_null(self.resolve_path(path))
    }

    /// Like [`find`](Value::find); the error names the failing key and the
    /// part of the path that did resolve.
    pub fn find_checked(&self, path: &[Key<'_>]) -> Result<&Value<'a>> {
        self.resolve_path(path)
    }

    pub fn find_cloned(&self, path: &[Key<'_>]) -> Option<Value<'a>> {
        self.find(path).cloned()
    }

    pub fn find_cloned_or_null(&self, path: &[Key<'_>]) -> Value<'a> {
        self.find_or_null(path).clone()
    }

    pub fn find_cloned_checked(&self, path: &[Key<'_>]) -> Result<Value<'a>> {
        self.find_checked(path).cloned()
    }

    pub fn into_find(self, path: &[Key<'_>]) -> Option<Value<'a>> {
        self.into_find_checked(path).ok()
    }

    pub fn into_find_or_null(self, path: &[Key<'_>]) -> Value<'a> {
        self.into_find_checked(path).unwrap_or_default()
    }

    pub fn into_find_checked(mut self, path: &[Key<'_>]) -> Result<Value<'a>> {
        self.resolve_path_mut(path).map(Value::take)
    }

    // search

    /// Returns the first array element matching `pred`. Objects and scalars
    /// are not searched.
    pub fn search<P>(&self, pred: P) -> Option<&Value<'a>>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        self.search_checked(pred).ok()
    }

    pub fn search_mut<P>(&mut self, mut pred: P) -> Option<&mut Value<'a>>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        self.ensure_mut::<Array>()?.iter_mut().find(|v| pred(v))
    }

    pub fn search_or_null<P>(&self, pred: P) -> &Value<'a>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        or_null(self.search_checked(pred))
    }

    pub fn search_checked<P>(&self, mut pred: P) -> Result<&Value<'a>>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        self.ensure_checked::<Array>()?
            .iter()
            .find(|v| pred(v))
            .ok_or(Error::NoMatch)
    }

    pub fn search_cloned<P>(&self, pred: P) -> Option<Value<'a>>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        self.search(pred).cloned()
    }

    pub fn search_cloned_or_null<P>(&self, pred: P) -> Value<'a>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        self.search_or_null(pred).clone()
    }

    pub fn search_cloned_checked<P>(&self, pred: P) -> Result<Value<'a>>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        self.search_checked(pred).cloned()
    }

    pub fn into_search<P>(self, pred: P) -> Option<Value<'a>>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        self.into_search_checked(pred).ok()
    }

    pub fn into_search_or_null<P>(self, pred: P) -> Value<'a>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        self.into_search_checked(pred).unwrap_or_default()
    }

    pub fn into_search_checked<P>(self, mut pred: P) -> Result<Value<'a>>
    where
        P: FnMut(&Value<'a>) -> bool,
    {
        let mut arr = self.into_ensure_checked::<Array>()?;
        let idx = arr.iter().position(|v| pred(v)).ok_or(Error::NoMatch)?;
        Ok(arr.swap_remove(idx))
    }
}

impl<'a> Index<&str> for Value<'a> {
    type Output = Value<'a>;

    fn index(&self, key: &str) -> &Value<'a> {
        self.get_or_null(key)
    }
}

impl<'a> Index<usize> for Value<'a> {
    type Output = Value<'a>;

    fn index(&self, idx: usize) -> &Value<'a> {
        self.get_or_null(idx)
    }
}
