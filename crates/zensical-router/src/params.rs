// Copyright (c) 2025 Zensical and contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Route parameters.

use serde::Serialize;
use serde_json::Value;
use std::collections::btree_map::{self, BTreeMap};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route parameters.
///
/// Parameters map names to decoded values, which are produced by the value
/// parsers of path, query and hash matchers. Values are JSON values, so that
/// parsers can produce numbers, booleans, lists or any other structure.
/// Parameters are ordered by name, which keeps comparison and serialization
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params {
    /// Parameter map.
    inner: BTreeMap<String, Value>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Params {
    /// Creates route parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Params;
    ///
    /// // Create route parameters
    /// let params = Params::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for the given name.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use zensical_router::Params;
    ///
    /// // Create route parameters and insert value
    /// let mut params = Params::new();
    /// params.insert("id", json!(42));
    ///
    /// // Obtain reference to value
    /// assert_eq!(params.get("id"), Some(&json!(42)));
    /// ```
    #[inline]
    pub fn get<K>(&self, name: K) -> Option<&Value>
    where
        K: AsRef<str>,
    {
        self.inner.get(name.as_ref())
    }

    /// Returns whether the parameter is contained.
    #[inline]
    pub fn contains<K>(&self, name: K) -> bool
    where
        K: AsRef<str>,
    {
        self.inner.contains_key(name.as_ref())
    }

    /// Inserts a value, returning the previous value, if any.
    #[inline]
    pub fn insert<K, V>(&mut self, name: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.inner.insert(name.into(), value.into())
    }

    /// Removes the value for the given name.
    #[inline]
    pub fn remove<K>(&mut self, name: K) -> Option<Value>
    where
        K: AsRef<str>,
    {
        self.inner.remove(name.as_ref())
    }

    /// Returns an iterator over all parameters.
    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.inner.iter()
    }
}

#[allow(clippy::must_use_candidate)]
impl Params {
    /// Returns the number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether there are any parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    /// Creates route parameters from an iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Params;
    ///
    /// // Create route parameters from iterator
    /// let params = Params::from_iter([("id", "42"), ("slug", "intro")]);
    /// assert_eq!(params.len(), 2);
    /// ```
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    /// Extends the route parameters, overwriting existing values.
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (K, V)>,
    {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    /// Creates a consuming iterator over all parameters.
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    /// Creates an iterator over all parameters.
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Params> for Value {
    /// Converts route parameters into a JSON object.
    fn from(params: Params) -> Self {
        Value::Object(params.inner.into_iter().collect())
    }
}
