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
use std::fmt::Formatter;
use std::ops::Index;

use crate::map::Iter;
use crate::map::IterMut;
use crate::map::LinearMap;
use crate::value::Value;
use crate::value::NULL;

/// A JSON object: string keys mapped to values in insertion order.
///
/// Accessors come in three ownership modes. `get` borrows, `get_cloned`
/// clones, and `into_get` consumes the object and moves the entry out
/// without cloning. Each mode has an optional form and an `_or_null` form
/// that returns the shared `null` instead of `None`.
#[derive(Clone, Default, PartialEq)]
pub struct Object<'a> {
    entries: LinearMap<String, Value<'a>>,
}

impl<'a> Object<'a> {
    pub fn new() -> Object<'a> {
        Object {
            entries: LinearMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Object<'a> {
        Object {
            entries: LinearMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns `true` if `key` exists and maps to a value equal to `value`.
    pub fn contains_entry(&self, key: &str, value: &Value<'_>) -> bool {
        self.entries.find(key).is_some_and(|v| v == value)
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value<'a>>) -> Option<Value<'a>> {
        self.entries.insert(key.into(), value.into())
    }

    /// Inserts `value` only if `key` is absent. Returns whether it was inserted.
    pub fn set_if_absent(&mut self, key: &str, value: impl Into<Value<'a>>) -> bool {
        let (_, inserted) = self.entries.try_emplace(key, || value.into());
        inserted
    }

    pub fn remove(&mut self, key: &str) -> Option<Value<'a>> {
        self.entries.erase(key)
    }

    /// Returns the value under `key`, inserting `null` first if it is absent.
    pub fn get_or_insert_null(&mut self, key: &str) -> &mut Value<'a> {
        let (slot, _) = self.entries.try_emplace(key, Value::default);
        slot
    }

    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        self.entries.find(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<'a>> {
        self.entries.find_mut(key)
    }

    pub fn get_or_null(&self, key: &str) -> &Value<'a> {
        self.get(key).unwrap_or(&NULL)
    }

    pub fn get_cloned(&self, key: &str) -> Option<Value<'a>> {
        self.get(key).cloned()
    }

    pub fn get_cloned_or_null(&self, key: &str) -> Value<'a> {
        self.get_cloned(key).unwrap_or_default()
    }

    /// Consumes the object and moves the entry under `key` out.
    pub fn into_get(mut self, key: &str) -> Option<Value<'a>> {
        self.entries.erase(key)
    }

    pub fn into_get_or_null(self, key: &str) -> Value<'a> {
        self.into_get(key).unwrap_or_default()
    }

    pub fn iter(&self) -> Iter<'_, String, Value<'a>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, String, Value<'a>> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &String> + ExactSizeIterator {
        self.entries.keys()
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value<'a>> + ExactSizeIterator {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Value<'a>> + ExactSizeIterator {
        self.entries.values_mut()
    }

    pub(crate) fn into_static(self) -> Object<'static> {
        Object {
            entries: self
                .entries
                .into_iter()
                .map(|(k, v)| (k, v.into_static()))
                .collect(),
        }
    }
}

impl Debug for Object<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.entries, f)
    }
}

impl<'a> Index<&str> for Object<'a> {
    type Output = Value<'a>;

    fn index(&self, key: &str) -> &Value<'a> {
        self.get_or_null(key)
    }
}

impl<'a, K: Into<String>, V: Into<Value<'a>>> FromIterator<(K, V)> for Object<'a> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Object::new();
        obj.extend(iter);
        obj
    }
}

impl<'a, K: Into<String>, V: Into<Value<'a>>> Extend<(K, V)> for Object<'a> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<'a> IntoIterator for Object<'a> {
    type Item = (String, Value<'a>);
    type IntoIter = std::vec::IntoIter<(String, Value<'a>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'o, 'a> IntoIterator for &'o Object<'a> {
    type Item = (&'o String, &'o Value<'a>);
    type IntoIter = Iter<'o, String, Value<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
