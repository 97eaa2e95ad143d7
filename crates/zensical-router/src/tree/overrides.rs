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

//! Route overrides.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::matcher::{Format, HashMatcher, QueryMatcher};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Route name override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Name {
    /// Explicit name.
    Named(String),
    /// No name, so the route can't be resolved by name.
    Unnamed,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route override.
///
/// Overrides are partial route definitions that change what is derived from
/// the file key of a node, or add to it. A node might receive overrides from
/// several sources, e.g., one per named view, which are kept as layers and
/// merged in order with [`RouteOverride::merge`].
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use serde_json::json;
/// use zensical_router::RouteOverride;
///
/// // Deserialize override
/// let overrides: RouteOverride = serde_json::from_value(json!({
///     "name": false,
///     "alias": "/people/:id",
///     "params": { "path": { "id": "int" }, "query": { "page": "int" } }
/// }))?;
/// assert_eq!(overrides.alias, ["/people/:id"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteOverride {
    /// Path template, absolute or relative to the parent.
    pub path: Option<String>,
    /// Route name.
    pub name: Option<Name>,
    /// Arbitrary metadata.
    pub meta: Option<Value>,
    /// Alias path templates.
    #[serde(deserialize_with = "one_or_many")]
    pub alias: Vec<String>,
    /// Parameter overrides.
    pub params: ParamOverrides,
    /// Hash parameter.
    pub hash: Option<HashOverride>,
}

/// Parameter overrides.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamOverrides {
    /// Value parser identifiers of path parameters, by parameter name.
    pub path: BTreeMap<String, String>,
    /// Query parameters, by parameter name.
    pub query: BTreeMap<String, QueryOverride>,
}

/// Query parameter override.
///
/// In configuration, a plain string is a shorthand for the parser.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "QueryOverrideRepr")]
pub struct QueryOverride {
    /// Query string key, if different from the parameter name.
    pub key: Option<String>,
    /// Value parser identifier.
    pub parser: Option<String>,
    /// Parameter format.
    pub format: Option<Format>,
    /// Default value.
    pub default: Option<Value>,
    /// Whether the parameter is required.
    pub required: Option<bool>,
}

/// Hash parameter override.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashOverride {
    /// Parameter name.
    pub param: Option<String>,
    /// Value parser identifier.
    pub parser: Option<String>,
    /// Default value.
    pub default: Option<Value>,
}

/// Query parameter override representation.
#[derive(Deserialize)]
#[serde(untagged)]
enum QueryOverrideRepr {
    /// Parser shorthand.
    Parser(String),
    /// Full form.
    Full {
        #[serde(default)]
        key: Option<String>,
        #[serde(default)]
        parser: Option<String>,
        #[serde(default)]
        format: Option<Format>,
        #[serde(default)]
        default: Option<Value>,
        #[serde(default)]
        required: Option<bool>,
    },
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl RouteOverride {
    /// Merges the given override into this one.
    ///
    /// Path, name and per-parameter settings of the given override win, but
    /// aliases accumulate, and metadata is merged deeply - objects are merged
    /// recursively and arrays are concatenated.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use zensical_router::RouteOverride;
    ///
    /// // Create overrides
    /// let a = RouteOverride {
    ///     meta: Some(json!({ "tags": ["a"], "auth": { "role": "user" } })),
    ///     alias: vec!["/a".into()],
    ///     ..Default::default()
    /// };
    /// let b = RouteOverride {
    ///     meta: Some(json!({ "tags": ["b"], "auth": { "strict": true } })),
    ///     alias: vec!["/b".into()],
    ///     ..Default::default()
    /// };
    ///
    /// // Merge overrides
    /// let merged = a.merge(b);
    /// assert_eq!(merged.alias, ["/a", "/b"]);
    /// assert_eq!(merged.meta, Some(json!({
    ///     "tags": ["a", "b"],
    ///     "auth": { "role": "user", "strict": true }
    /// })));
    /// ```
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        if other.path.is_some() {
            self.path = other.path;
        }
        if other.name.is_some() {
            self.name = other.name;
        }
        self.meta = match (self.meta, other.meta) {
            (Some(a), Some(b)) => Some(merge_value(a, b)),
            (a, b) => b.or(a),
        };
        self.alias.extend(other.alias);

        // Merge parameter overrides per parameter
        self.params.path.extend(other.params.path);
        for (name, query) in other.params.query {
            let merged = match self.params.query.remove(&name) {
                Some(prev) => prev.merge(query),
                None => query,
            };
            self.params.query.insert(name, merged);
        }
        self.hash = match (self.hash, other.hash) {
            (Some(a), Some(b)) => Some(a.merge(b)),
            (a, b) => b.or(a),
        };
        self
    }

    /// Returns the fields that the given override sets to different values.
    ///
    /// Only path and name are considered, since all other fields are meant
    /// to be contributed from several sources.
    #[must_use]
    pub fn conflicts(&self, other: &Self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if conflict(self.path.as_ref(), other.path.as_ref()) {
            fields.push("path");
        }
        if conflict(self.name.as_ref(), other.name.as_ref()) {
            fields.push("name");
        }
        fields
    }

    /// Returns whether the override doesn't change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Creates the query matchers for the query parameter overrides.
    #[must_use]
    pub fn query_matchers(&self) -> Vec<QueryMatcher> {
        let iter = self.params.query.iter().map(|(name, query)| {
            let mut matcher = QueryMatcher::new(name.as_str())
                .format(query.format.unwrap_or_default())
                .required(query.required.unwrap_or(false));
            if let Some(key) = &query.key {
                matcher = matcher.key(key.as_str());
            }
            if let Some(parser) = &query.parser {
                matcher = matcher.parser(parser.as_str());
            }
            if let Some(default) = &query.default {
                matcher = matcher.default(default.clone());
            }
            matcher
        });
        iter.collect()
    }

    /// Creates the hash matcher for the hash parameter override, if any.
    ///
    /// The parameter is named `hash`, unless given.
    #[must_use]
    pub fn hash_matcher(&self) -> Option<HashMatcher> {
        self.hash.as_ref().map(|hash| {
            let name = hash.param.as_deref().unwrap_or("hash");
            let mut matcher = HashMatcher::new(name);
            if let Some(parser) = &hash.parser {
                matcher = matcher.parser(parser.as_str());
            }
            if let Some(default) = &hash.default {
                matcher = matcher.default(default.clone());
            }
            matcher
        })
    }
}

impl QueryOverride {
    /// Merges the given query parameter override into this one.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            key: other.key.or(self.key),
            parser: other.parser.or(self.parser),
            format: other.format.or(self.format),
            default: other.default.or(self.default),
            required: other.required.or(self.required),
        }
    }
}

impl HashOverride {
    /// Merges the given hash parameter override into this one.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            param: other.param.or(self.param),
            parser: other.parser.or(self.parser),
            default: other.default.or(self.default),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<'de> Deserialize<'de> for Name {
    /// Deserializes a route name from a string, or `false` for no name.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Named(String),
            Flag(bool),
        }

        // Only `false` is meaningful as a flag
        match Repr::deserialize(deserializer)? {
            Repr::Named(name) => Ok(Name::Named(name)),
            Repr::Flag(false) => Ok(Name::Unnamed),
            Repr::Flag(true) => {
                Err(de::Error::custom("expected a route name or `false`"))
            }
        }
    }
}

impl From<QueryOverrideRepr> for QueryOverride {
    /// Creates a query parameter override from its representation.
    fn from(repr: QueryOverrideRepr) -> Self {
        match repr {
            QueryOverrideRepr::Parser(parser) => {
                Self { parser: Some(parser), ..Self::default() }
            }
            QueryOverrideRepr::Full {
                key,
                parser,
                format,
                default,
                required,
            } => Self { key, parser, format, default, required },
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Deserializes a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        One(String),
        Many(Vec<String>),
    }

    // Normalize into list
    Ok(match Repr::deserialize(deserializer)? {
        Repr::One(value) => vec![value],
        Repr::Many(values) => values,
    })
}

/// Merges two values deeply.
fn merge_value(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a), Value::Object(b)) => {
            for (key, value) in b {
                let merged = match a.remove(&key) {
                    Some(prev) => merge_value(prev, value),
                    None => value,
                };
                a.insert(key, merged);
            }
            Value::Object(a)
        }
        (Value::Array(mut a), Value::Array(b)) => {
            a.extend(b);
            Value::Array(a)
        }
        (_, b) => b,
    }
}

/// Returns whether both values are set, but differ.
fn conflict<T>(a: Option<&T>, b: Option<&T>) -> bool
where
    T: PartialEq,
{
    matches!((a, b), (Some(a), Some(b)) if a != b)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_merge() {
        let a = RouteOverride {
            path: Some("/a".into()),
            name: Some(Name::Named("a".into())),
            ..Default::default()
        };
        let b = RouteOverride {
            name: Some(Name::Unnamed),
            ..Default::default()
        };
        let merged = a.merge(b);
        assert_eq!(merged.path.as_deref(), Some("/a"));
        assert_eq!(merged.name, Some(Name::Unnamed));
    }

    #[test]
    fn test_merge_value() {
        let test_cases = vec![
            (json!({ "a": 1 }), json!({ "b": 2 }), json!({ "a": 1, "b": 2 })),
            (json!([1]), json!([2, 3]), json!([1, 2, 3])),
            (json!({ "a": [1] }), json!({ "a": [2] }), json!({ "a": [1, 2] })),
            (json!({ "a": 1 }), json!([2]), json!([2])),
            (json!("a"), json!(null), json!(null)),
        ];

        for (a, b, expected) in test_cases {
            assert_eq!(merge_value(a, b), expected);
        }
    }

    #[test]
    fn test_merge_query() {
        let mut a = RouteOverride::default();
        a.params.query.insert(
            "page".into(),
            QueryOverride { parser: Some("int".into()), ..Default::default() },
        );
        let mut b = RouteOverride::default();
        b.params.query.insert(
            "page".into(),
            QueryOverride { default: Some(json!(1)), ..Default::default() },
        );

        // Settings of the same parameter are merged field by field
        let merged = a.merge(b);
        let page = &merged.params.query["page"];
        assert_eq!(page.parser.as_deref(), Some("int"));
        assert_eq!(page.default, Some(json!(1)));
    }

    #[test]
    fn test_conflicts() {
        let a = RouteOverride { path: Some("/a".into()), ..Default::default() };
        let b = RouteOverride { path: Some("/b".into()), ..Default::default() };
        assert_eq!(a.conflicts(&b), vec!["path"]);
        assert!(a.conflicts(&a.clone()).is_empty());
    }

    #[test]
    fn test_deserialize() {
        let overrides: RouteOverride = serde_json::from_value(json!({
            "path": "/u/:id",
            "name": "user",
            "params": {
                "query": {
                    "tags": { "format": "array" },
                    "page": "int"
                }
            },
            "hash": { "param": "section" }
        }))
        .unwrap();
        assert_eq!(overrides.name, Some(Name::Named("user".into())));
        assert_eq!(overrides.params.query["tags"].format, Some(Format::Array));
        assert_eq!(overrides.params.query["page"].parser.as_deref(), Some("int"));
        assert_eq!(overrides.query_matchers().len(), 2);
        assert_eq!(overrides.hash_matcher().unwrap().name(), "section");

        // Names can only be disabled with `false`
        let result: Result<RouteOverride, _> =
            serde_json::from_value(json!({ "name": true }));
        assert!(result.is_err());
    }
}
