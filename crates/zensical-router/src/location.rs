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

//! Location.

use serde_json::Value;

use super::params::Params;

mod encoding;
mod query;

pub use query::Query;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Location.
///
/// Locations describe where to navigate, and come in three shapes, which are
/// distinguished by the fields that are set:
///
/// - __Path__: an absolute or relative path, optionally with a query string
///   and hash, e.g., `/users/42?tab=posts#bio` or `../settings`. This is the
///   shape created from strings.
///
/// - __Named__: the name of a route and its parameters, which is looked up
///   directly, and from which the path is built.
///
/// - __Relative__: neither path nor name, in which case name, parameters,
///   query string and hash are inherited from the current location, and the
///   given fields take precedence.
///
/// Fields that are [`None`] are unspecified, and only inherited for relative
/// locations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Location {
    /// Route name.
    pub name: Option<String>,
    /// Path, which is resolved against the current path if relative.
    pub path: Option<String>,
    /// Route parameters.
    pub params: Params,
    /// Query string.
    pub query: Option<Query>,
    /// Hash, including the leading `#`.
    pub hash: Option<String>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Location {
    /// Creates a location for the route with the given name.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Location;
    ///
    /// // Create named location
    /// let location = Location::named("user").param("id", 42);
    /// ```
    #[must_use]
    pub fn named<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        Self { name: Some(name.into()), ..Self::default() }
    }

    /// Creates a location for the given path.
    ///
    /// Other than when converting from a string, the path is used as is, so
    /// query string and hash must be set separately.
    #[must_use]
    pub fn path<P>(path: P) -> Self
    where
        P: Into<String>,
    {
        Self { path: Some(path.into()), ..Self::default() }
    }

    /// Creates a location relative to the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Location;
    ///
    /// // Create relative location, only changing the hash
    /// let location = Location::relative().hash("top");
    /// ```
    #[inline]
    #[must_use]
    pub fn relative() -> Self {
        Self::default()
    }

    /// Sets a route parameter.
    #[must_use]
    pub fn param<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.params.insert(name, value);
        self
    }

    /// Adds a query string parameter.
    #[must_use]
    pub fn query<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query.get_or_insert_with(Query::new).add(key, value);
        self
    }

    /// Sets the hash, adding the leading `#` if necessary.
    #[must_use]
    pub fn hash<H>(mut self, hash: H) -> Self
    where
        H: Into<String>,
    {
        let hash = hash.into();
        self.hash = Some(if hash.is_empty() || hash.starts_with('#') {
            hash
        } else {
            format!("#{hash}")
        });
        self
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl From<&str> for Location {
    /// Creates a location from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Location;
    ///
    /// // Create location from string
    /// let location = Location::from("/users/42?tab=posts#bio");
    /// assert_eq!(location.path.as_deref(), Some("/users/42"));
    /// assert_eq!(location.hash.as_deref(), Some("#bio"));
    /// ```
    fn from(value: &str) -> Self {
        let (path, query, hash) = split(value);
        Self {
            path: Some(path.to_owned()),
            query: Some(Query::from(query)),
            hash: Some(hash.to_owned()),
            ..Self::default()
        }
    }
}

impl From<String> for Location {
    /// Creates a location from a string.
    #[inline]
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Splits a URL into path, query string and hash.
///
/// The query string is returned without the leading `?`, but the hash keeps
/// its leading `#`, since an empty hash and a missing hash are the same.
pub(crate) fn split(value: &str) -> (&str, &str, &str) {
    let (rest, hash) = match value.find('#') {
        Some(index) => value.split_at(index),
        None => (value, ""),
    };
    match rest.split_once('?') {
        Some((path, query)) => (path, query, hash),
        None => (rest, "", hash),
    }
}

/// Resolves a path relative to the given path.
///
/// Absolute paths are returned as they are. Otherwise, the last segment of
/// the given path is replaced, `.` segments refer to the current directory,
/// and `..` segments to the parent directory, never going above the root.
/// An empty path resolves to the given path.
///
/// # Examples
///
/// ```
/// use zensical_router::location::resolve_relative;
///
/// // Resolve relative paths
/// assert_eq!(resolve_relative("b", "/a/c"), "/a/b");
/// assert_eq!(resolve_relative("../b", "/a/c/d"), "/a/b");
/// ```
#[must_use]
pub fn resolve_relative(to: &str, from: &str) -> String {
    if to.starts_with('/') {
        return to.to_owned();
    }
    if to.is_empty() {
        return from.to_owned();
    }

    // Trailing dot segments refer to directories
    let from: Vec<&str> = from.split('/').collect();
    let mut to: Vec<&str> = to.split('/').collect();
    if matches!(to.last(), Some(&(".." | "."))) {
        to.push("");
    }

    // Consume leading dot segments, moving up for each parent reference
    let mut position = from.len() - 1;
    let mut index = 0;
    while let Some(segment) = to.get(index) {
        match *segment {
            "." => {}
            ".." => position = position.saturating_sub(1).max(1),
            _ => break,
        }
        index += 1;
    }
    format!("{}/{}", from[..position].join("/"), to[index..].join("/"))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let test_cases = vec![
            ("/a", ("/a", "", "")),
            ("/a?x=1", ("/a", "x=1", "")),
            ("/a#h", ("/a", "", "#h")),
            ("/a?x=1#h?y", ("/a", "x=1", "#h?y")),
            ("?x=1", ("", "x=1", "")),
        ];

        for (value, expected) in test_cases {
            assert_eq!(split(value), expected, "Failed for: {value}");
        }
    }

    #[test]
    fn test_resolve_relative() {
        let test_cases = vec![
            ("/x", "/a/b", "/x"),
            ("", "/a/b", "/a/b"),
            ("c", "/a/b", "/a/c"),
            ("./c", "/a/b", "/a/c"),
            ("../c", "/a/b/d", "/a/c"),
            ("../../../c", "/a/b", "/c"),
            ("..", "/a/b/c", "/a/"),
            (".", "/a/b", "/a/"),
        ];

        for (to, from, expected) in test_cases {
            assert_eq!(
                resolve_relative(to, from),
                expected,
                "Failed for: {to} from {from}"
            );
        }
    }
}
