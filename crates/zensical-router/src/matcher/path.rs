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

//! Path matcher.

use serde_json::Value;
use zensical_path::{Capture, Param, Pattern};

use crate::params::Params;
use crate::parser::Registry;

use super::{Matcher, Miss, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Path matcher.
///
/// Path matchers decode the values captured by a compiled [`Pattern`] with
/// the parsers attached to each parameter. Absent optional parameters decode
/// to `null`, or to an empty list if they are also repeatable, so a matched
/// location always carries all parameters of its path.
#[derive(Clone, Debug)]
pub struct PathMatcher {
    /// Compiled pattern.
    pattern: Pattern,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl PathMatcher {
    /// Creates a path matcher.
    #[inline]
    #[must_use]
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }
}

#[allow(clippy::must_use_candidate)]
impl PathMatcher {
    /// Returns the compiled pattern.
    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the parameters.
    #[inline]
    pub fn params(&self) -> &[Param] {
        self.pattern.params()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Matcher<str> for PathMatcher {
    type Output = String;

    /// Attempts to extract parameters from the given path.
    fn matches(
        &self, path: &str, parsers: &Registry,
    ) -> std::result::Result<Params, Miss> {
        let captures = self.pattern.matches(path).ok_or(Miss)?;

        // Decode captured values - a value that the parser rejects means the
        // whole path doesn't match
        let mut params = Params::new();
        for (param, capture) in self.pattern.params().iter().zip(captures) {
            let parser = parsers.resolve(param.parser.as_deref());
            let value = match capture {
                Capture::Absent if param.is_repeatable() => {
                    Value::Array(Vec::new())
                }
                Capture::Absent => Value::Null,
                Capture::Single(value) => parser.get(&value)?,
                Capture::Repeated(values) => Value::Array(
                    values
                        .iter()
                        .map(|value| parser.get(value))
                        .collect::<std::result::Result<_, _>>()?,
                ),
            };
            params.insert(param.name.clone(), value);
        }
        Ok(params)
    }

    /// Builds the path from the given parameters.
    fn build(&self, params: &Params, parsers: &Registry) -> Result<String> {
        let values: Vec<Vec<String>> = self
            .pattern
            .params()
            .iter()
            .map(|param| {
                let parser = parsers.resolve(param.parser.as_deref());
                match params.get(&param.name) {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(values)) => {
                        values.iter().map(|value| parser.set(value)).collect()
                    }
                    Some(value) => vec![parser.set(value)],
                }
            })
            .collect();

        // Build path
        Ok(self.pattern.build(&values)?)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;
    use zensical_path::{Options, Segment};

    use super::*;

    /// Creates a path matcher from a path template.
    fn matcher(template: &str) -> PathMatcher {
        PathMatcher::new(Pattern::parse(template, &Options::default()).unwrap())
    }

    #[test]
    fn test_matches() {
        let parsers = Registry::new();
        let test_cases = vec![
            ("/users/:id", "/users/42", Ok(json!({ "id": "42" }))),
            ("/team/:id?", "/team", Ok(json!({ "id": null }))),
            ("/docs/:path*", "/docs", Ok(json!({ "path": [] }))),
            ("/docs/:path+", "/docs/a/b", Ok(json!({ "path": ["a", "b"] }))),
            ("/users/:id", "/teams/42", Err(Miss)),
        ];

        for (template, path, expected) in test_cases {
            let params = matcher(template).matches(path, &parsers);
            assert_eq!(params.map(Value::from), expected, "{template}");
        }
    }

    #[test]
    fn test_matches_with_parser() {
        let parsers = Registry::new();
        let segment = Segment::parse_file("items.[id=int]", &Options::default());
        let pattern = Pattern::compile(&segment.unwrap().levels()).unwrap();

        // Values are decoded with the attached parser
        let matcher = PathMatcher::new(pattern);
        assert_eq!(
            matcher.matches("/items/7", &parsers).map(Value::from),
            Ok(json!({ "id": 7 }))
        );
        assert_eq!(matcher.matches("/items/abc", &parsers), Err(Miss));
    }

    #[test]
    fn test_build() {
        let parsers = Registry::new();
        let test_cases = vec![
            ("/users/:id", ("id", json!(42)), "/users/42"),
            ("/team/:id?", ("id", json!(null)), "/team"),
            ("/docs/:path*", ("path", json!(["a", "b"])), "/docs/a/b"),
            ("/:path(.*)", ("path", json!("a/b")), "/a/b"),
        ];

        for (template, param, expected) in test_cases {
            let params = Params::from_iter([param]);
            let path = matcher(template).build(&params, &parsers).unwrap();
            assert_eq!(path, expected, "{template}");
        }
    }

    #[test]
    fn test_build_missing() {
        let parsers = Registry::new();
        let result = matcher("/users/:id").build(&Params::new(), &parsers);
        assert!(result.is_err());
    }
}
