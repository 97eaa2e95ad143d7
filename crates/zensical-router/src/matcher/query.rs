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

//! Query matcher.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::location::Query;
use crate::params::Params;
use crate::parser::Registry;

use super::{Error, Matcher, Miss, Result};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Query parameter format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Single value - the last one, if the key is repeated.
    #[default]
    Value,
    /// List of all values, empty if the key is absent.
    Array,
}

/// Default value.
#[derive(Clone)]
pub enum DefaultValue {
    /// Fixed value.
    Value(Value),
    /// Function computing the value on each use.
    Thunk(Arc<dyn Fn() -> Value + Send + Sync>),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Query matcher.
///
/// Query matchers extract a single parameter from the query string. If the
/// key is absent or its value can't be decoded, the default value is used if
/// given, which always takes precedence over the parameter being required.
/// Otherwise, an absent key is a miss for required parameters, and omitted
/// for all others, while a value that can't be decoded is always a miss.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use zensical_router::matcher::{Format, Matcher, QueryMatcher};
/// use zensical_router::{Query, Registry};
///
/// // Create query matcher
/// let matcher = QueryMatcher::new("tags").format(Format::Array);
///
/// // Absent keys decode to empty lists
/// let params = matcher.matches(&Query::new(), &Registry::new()).unwrap();
/// assert_eq!(params.get("tags"), Some(&json!([])));
/// ```
#[derive(Clone, Debug)]
pub struct QueryMatcher {
    /// Parameter name.
    name: String,
    /// Query string key.
    key: String,
    /// Parameter format.
    format: Format,
    /// Value parser identifier.
    parser: Option<String>,
    /// Default value.
    default: Option<DefaultValue>,
    /// Whether the parameter is required.
    required: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl DefaultValue {
    /// Returns the default value.
    #[must_use]
    pub fn get(&self) -> Value {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::Thunk(f) => f(),
        }
    }
}

// ----------------------------------------------------------------------------

impl QueryMatcher {
    /// Creates a query matcher for the parameter with the given name.
    ///
    /// The query string key defaults to the parameter name.
    #[must_use]
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            format: Format::Value,
            parser: None,
            default: None,
            required: false,
        }
    }

    /// Sets the query string key.
    #[must_use]
    pub fn key<K>(mut self, key: K) -> Self
    where
        K: Into<String>,
    {
        self.key = key.into();
        self
    }

    /// Sets the parameter format.
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Sets the value parser identifier.
    #[must_use]
    pub fn parser<P>(mut self, parser: P) -> Self
    where
        P: Into<String>,
    {
        self.parser = Some(parser.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default<V>(mut self, value: V) -> Self
    where
        V: Into<Value>,
    {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    /// Sets a function computing the default value.
    #[must_use]
    pub fn default_with<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Thunk(Arc::new(f)));
        self
    }

    /// Sets whether the parameter is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

#[allow(clippy::must_use_candidate)]
impl QueryMatcher {
    /// Returns the parameter name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the query string key.
    #[inline]
    pub fn query_key(&self) -> &str {
        &self.key
    }

    /// Returns the value parser identifier.
    #[inline]
    pub fn parser_id(&self) -> Option<&str> {
        self.parser.as_deref()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Matcher<Query> for QueryMatcher {
    type Output = Vec<(String, String)>;

    /// Attempts to extract the parameter from the given query string.
    fn matches(
        &self, query: &Query, parsers: &Registry,
    ) -> std::result::Result<Params, Miss> {
        let parser = parsers.resolve(self.parser.as_deref());
        let values: Vec<&str> = query.get_all(&self.key).collect();

        // Decode the last value, or all values for lists, where an absent key
        // is an empty list and thus never missing
        let value = match self.format {
            Format::Value => match values.last() {
                Some(value) => parser.get(value).map(Some),
                None if self.default.is_some() => Err(Miss),
                None if self.required => return Err(Miss),
                None => Ok(None),
            },
            Format::Array => values
                .iter()
                .map(|value| parser.get(value))
                .collect::<std::result::Result<_, _>>()
                .map(|values| Some(Value::Array(values))),
        };

        // Fall back to the default value, if any
        let value = match (value, &self.default) {
            (Ok(value), _) => value,
            (Err(_), Some(default)) => Some(default.get()),
            (Err(miss), None) => return Err(miss),
        };

        // Return parameter, if any
        let mut params = Params::new();
        if let Some(value) = value {
            params.insert(self.name.clone(), value);
        }
        Ok(params)
    }

    /// Builds the query string pairs from the given parameters.
    fn build(
        &self, params: &Params, parsers: &Registry,
    ) -> Result<Self::Output> {
        let parser = parsers.resolve(self.parser.as_deref());
        let values = match params.get(&self.name) {
            None | Some(Value::Null) => {
                if self.required && self.default.is_none() {
                    return Err(Error::MissingParam { name: self.name.clone() });
                }
                return Ok(Vec::new());
            }
            Some(Value::Array(values)) if self.format == Format::Array => {
                values.iter().map(|value| parser.set(value)).collect()
            }
            Some(value) => vec![parser.set(value)],
        };

        // Pair values with key
        let iter = values.into_iter().map(|value| (self.key.clone(), value));
        Ok(iter.collect())
    }
}

// ----------------------------------------------------------------------------

impl From<Value> for DefaultValue {
    /// Creates a fixed default value.
    #[inline]
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

impl fmt::Debug for DefaultValue {
    /// Formats the default value for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => {
                f.debug_tuple("Value").field(value).finish()
            }
            DefaultValue::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Extracts the parameter value from the match result.
    fn value(
        matcher: &QueryMatcher, query: &str,
    ) -> std::result::Result<Option<Value>, Miss> {
        let params = matcher.matches(&Query::from(query), &Registry::new())?;
        Ok(params.get(matcher.name()).cloned())
    }

    #[test]
    fn test_matches_value() {
        let matcher = QueryMatcher::new("page").parser("int");
        let test_cases = vec![
            ("page=2", Ok(Some(json!(2)))),
            ("page=1&page=3", Ok(Some(json!(3)))),
            ("", Ok(None)),
            ("page=x", Err(Miss)),
        ];

        for (query, expected) in test_cases {
            assert_eq!(value(&matcher, query), expected, "Failed for: {query}");
        }
    }

    #[test]
    fn test_matches_array() {
        let matcher = QueryMatcher::new("id").format(Format::Array);
        let test_cases = vec![
            ("id=a&id=b", Ok(Some(json!(["a", "b"])))),
            ("id=a", Ok(Some(json!(["a"])))),
            ("", Ok(Some(json!([])))),
        ];

        for (query, expected) in test_cases {
            assert_eq!(value(&matcher, query), expected, "Failed for: {query}");
        }
    }

    #[test]
    fn test_matches_required_with_default() {
        let matcher = QueryMatcher::new("page")
            .parser("int")
            .required(true)
            .default(1);
        assert_eq!(value(&matcher, ""), Ok(Some(json!(1))));
        assert_eq!(value(&matcher, "page=x"), Ok(Some(json!(1))));

        // Without default, absent keys miss
        let matcher = QueryMatcher::new("page").required(true);
        assert_eq!(value(&matcher, ""), Err(Miss));
    }

    #[test]
    fn test_matches_default_with() {
        let matcher = QueryMatcher::new("sort").default_with(|| json!("asc"));
        assert_eq!(value(&matcher, ""), Ok(Some(json!("asc"))));
    }

    #[test]
    fn test_build() {
        let parsers = Registry::new();
        let matcher = QueryMatcher::new("tags").key("t").format(Format::Array);
        let params = Params::from_iter([("tags", json!(["a", "b"]))]);
        assert_eq!(
            matcher.build(&params, &parsers).unwrap(),
            vec![("t".to_string(), "a".to_string()), ("t".into(), "b".into())]
        );

        // Required parameters must have a value
        let matcher = QueryMatcher::new("q").required(true);
        assert!(matcher.build(&Params::new(), &parsers).is_err());
    }
}
