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

//! Hash matcher.

use serde_json::Value;
use zensical_path::encoding::decode;

use crate::params::Params;
use crate::parser::Registry;

use super::{Matcher, Miss, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Hash matcher.
///
/// Hash matchers decode the hash, without the leading `#`, into a single
/// parameter. An empty hash yields the default value if given, and no value
/// otherwise, which is never a miss.
#[derive(Clone, Debug)]
pub struct HashMatcher {
    /// Parameter name.
    name: String,
    /// Value parser identifier.
    parser: Option<String>,
    /// Default value.
    default: Option<Value>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl HashMatcher {
    /// Creates a hash matcher for the parameter with the given name.
    #[must_use]
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        Self { name: name.into(), parser: None, default: None }
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
        self.default = Some(value.into());
        self
    }
}

#[allow(clippy::must_use_candidate)]
impl HashMatcher {
    /// Returns the parameter name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
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

impl Matcher<str> for HashMatcher {
    type Output = Option<String>;

    /// Attempts to extract the parameter from the given hash.
    fn matches(
        &self, hash: &str, parsers: &Registry,
    ) -> std::result::Result<Params, Miss> {
        let hash = hash.strip_prefix('#').unwrap_or(hash);
        let value = if hash.is_empty() {
            self.default.clone()
        } else {
            let parser = parsers.resolve(self.parser.as_deref());
            match (parser.get(&decode(hash)), &self.default) {
                (Ok(value), _) => Some(value),
                (Err(_), Some(default)) => Some(default.clone()),
                (Err(miss), None) => return Err(miss),
            }
        };

        // Return parameter, if any
        let mut params = Params::new();
        if let Some(value) = value {
            params.insert(self.name.clone(), value);
        }
        Ok(params)
    }

    /// Builds the hash, without the leading `#`, from the given parameters.
    fn build(
        &self, params: &Params, parsers: &Registry,
    ) -> Result<Self::Output> {
        let parser = parsers.resolve(self.parser.as_deref());
        Ok(match params.get(&self.name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(parser.set(value)),
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_matches() {
        let parsers = Registry::new();
        let matcher = HashMatcher::new("section").parser("int").default(0);
        let test_cases = vec![
            ("#3", json!({ "section": 3 })),
            ("", json!({ "section": 0 })),
            ("#top", json!({ "section": 0 })),
        ];

        for (hash, expected) in test_cases {
            let params = matcher.matches(hash, &parsers).map(Value::from);
            assert_eq!(params, Ok(expected), "Failed for: {hash}");
        }
    }

    #[test]
    fn test_matches_without_default() {
        let parsers = Registry::new();
        let matcher = HashMatcher::new("section").parser("int");
        assert_eq!(matcher.matches("#top", &parsers), Err(Miss));
        assert_eq!(matcher.matches("", &parsers), Ok(Params::new()));
    }
}
