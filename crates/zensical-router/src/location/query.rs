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

//! Query string.

use std::fmt;

use super::encoding::{decode, encode};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Query string.
///
/// When parsing a query string with [`Query::from`], keys and values are
/// percent-decoded and stored in a parameter list, as query strings might
/// have multiple values for the same key, and ordering always needs to be
/// preserved when formatting with [`fmt::Display`]. Only those characters
/// for which percent-encoding is required are percent-encoded when printing
/// the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    /// List of parameters.
    inner: Vec<(String, String)>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Query {
    /// Creates a query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Query;
    ///
    /// // Create query string
    /// let query = Query::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last parameter value for the given key.
    ///
    /// If the parameter appears multiple times in the query string, the last
    /// value wins. Use [`Query::get_all`] to retrieve all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Query;
    ///
    /// // Create query string from string
    /// let query = Query::from("page=1&page=2");
    /// assert_eq!(query.get("page"), Some("2"));
    /// ```
    pub fn get<K>(&self, key: K) -> Option<&str>
    where
        K: AsRef<str>,
    {
        self.get_all(key).last()
    }

    /// Returns an iterator over all parameter values for the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Query;
    ///
    /// // Create query string and add parameters
    /// let mut query = Query::new();
    /// query.add("key", "a");
    /// query.add("key", "b");
    ///
    /// // Iterate over parameter values
    /// for value in query.get_all("key") {
    ///     println!("{value}");
    /// }
    /// ```
    pub fn get_all<K>(&self, key: K) -> impl Iterator<Item = &str>
    where
        K: AsRef<str>,
    {
        self.inner.iter().filter_map(move |(k, value)| {
            (k == key.as_ref()).then_some(value.as_str())
        })
    }

    /// Returns whether the parameter is contained.
    pub fn contains<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        self.inner.iter().any(|(k, _)| k == key.as_ref())
    }

    /// Adds the given key-value pair as a parameter.
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.push((key.into(), value.into()));
    }

    /// Replaces all values for the given key with the given values.
    ///
    /// The new values take the position of the first existing value, or are
    /// appended if the key is not contained.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Query;
    ///
    /// // Create query string and replace parameter
    /// let mut query = Query::from("a=1&b=2&a=3");
    /// query.set("a", ["4"]);
    /// assert_eq!(query.to_string(), "a=4&b=2");
    /// ```
    pub fn set<K, I, V>(&mut self, key: K, values: I)
    where
        K: AsRef<str>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.as_ref();
        let position = self.inner.iter().position(|(k, _)| k == key);
        self.remove(key);

        // Insert values at position of first existing value
        let index = position.unwrap_or(self.inner.len());
        let values =
            values.into_iter().map(|value| (key.to_owned(), value.into()));
        self.inner.splice(index..index, values);
    }

    /// Removes the given parameter.
    pub fn remove<K>(&mut self, key: K)
    where
        K: AsRef<str>,
    {
        self.inner.retain(|(k, _)| k != key.as_ref());
    }

    /// Returns an iterator over all key-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[allow(clippy::must_use_candidate)]
impl Query {
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

impl From<&str> for Query {
    /// Creates a query string from a string.
    ///
    /// The string is expected to be a sequence of key-value pairs connected
    /// with `&`, with the initial `?` separator removed. Empty pairs are
    /// skipped, and a key without `=` has an empty value.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Query;
    ///
    /// // Create query string from string
    /// let query = Query::from("query=search&limit=25");
    /// assert_eq!(query.get("limit"), Some("25"));
    /// ```
    fn from(value: &str) -> Self {
        let value = value.strip_prefix('?').unwrap_or(value);
        value
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (decode(key), decode(value)),
                None => (decode(pair), "".into()),
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    /// Creates a query string from an iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Query;
    ///
    /// // Create query string from iterator
    /// let query = Query::from_iter([
    ///     ("query", "search"),
    ///     ("limit", "25"),
    /// ]);
    /// ```
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut query = Query::new();
        for (key, value) in iter {
            query.add(key, value);
        }
        query
    }
}

impl fmt::Display for Query {
    /// Formats the query string for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.inner.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }

            // Write parameter key and value, if any
            f.write_str(encode(key).as_ref())?;
            if !value.is_empty() {
                f.write_str("=")?;
                f.write_str(encode(value).as_ref())?;
            }
        }

        // No errors occurred
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let test_cases = vec![
            ("", vec![]),
            ("?a=1", vec![("a", "1")]),
            ("a=1&b", vec![("a", "1"), ("b", "")]),
            ("a=1&&a=2", vec![("a", "1"), ("a", "2")]),
            ("q=a+b&x=%26", vec![("q", "a b"), ("x", "&")]),
            ("k=a=b", vec![("k", "a=b")]),
        ];

        for (value, expected) in test_cases {
            let query = Query::from(value);
            assert_eq!(
                query.iter().collect::<Vec<_>>(),
                expected,
                "Failed for: {value}"
            );
        }
    }

    #[test]
    fn test_display() {
        let query = Query::from_iter([("q", "a b"), ("flag", "")]);
        assert_eq!(query.to_string(), "q=a%20b&flag");
    }
}
