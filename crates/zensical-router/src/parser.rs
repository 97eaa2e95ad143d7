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

//! Value parser registry.

use ahash::HashMap;
use serde_json::Value;
use std::fmt;

use super::matcher::Miss;

mod builtin;

pub use builtin::{Bool, Int, Passthrough, Text};

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Value parser.
///
/// Parsers convert between the raw string form of a parameter, as it appears
/// in a path, query string or hash, and its typed value. Decoding might fail,
/// which is signalled with a [`Miss`], so the route that declared the parser
/// doesn't match. Encoding is total.
pub trait Parser: Send + Sync {
    /// Decodes the given raw value.
    ///
    /// # Errors
    ///
    /// Returns [`Miss`] if the value can't be decoded.
    fn get(&self, value: &str) -> Result<Value, Miss>;

    /// Encodes the given value.
    fn set(&self, value: &Value) -> String;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Value parser registry.
///
/// The registry maps parser identifiers, as used in `[id=int]`, to parsers.
/// The built-in parsers `int`, `bool` and `string` are always available, and
/// custom parsers can be added with [`Registry::register`]. Identifiers that
/// are not registered resolve to [`Passthrough`], which doesn't decode.
pub struct Registry {
    /// Parsers by identifier.
    parsers: HashMap<String, Box<dyn Parser>>,
}

/// Value parser from functions.
pub struct FromFn<G, S> {
    /// Decoder.
    get: G,
    /// Encoder.
    set: S,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Registry {
    /// Creates a value parser registry with the built-in parsers.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Registry;
    ///
    /// // Create registry
    /// let registry = Registry::new();
    /// assert!(registry.contains("int"));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self { parsers: HashMap::default() };
        registry
            .register("int", Int)
            .register("bool", Bool)
            .register("string", Text);
        registry
    }

    /// Registers a parser, replacing any parser with the same identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::Value;
    /// use zensical_router::parser::{from_fn, Registry};
    ///
    /// // Create registry and register parser
    /// let mut registry = Registry::new();
    /// registry.register("upper", from_fn(
    ///     |value| Ok(Value::from(value.to_uppercase())),
    ///     |value| value.as_str().unwrap_or_default().to_lowercase(),
    /// ));
    /// ```
    pub fn register<I, P>(&mut self, id: I, parser: P) -> &mut Self
    where
        I: Into<String>,
        P: Parser + 'static,
    {
        self.parsers.insert(id.into(), Box::new(parser));
        self
    }

    /// Returns the parser for the given identifier.
    pub fn get<I>(&self, id: I) -> Option<&dyn Parser>
    where
        I: AsRef<str>,
    {
        self.parsers.get(id.as_ref()).map(AsRef::as_ref)
    }

    /// Returns whether a parser is registered for the given identifier.
    pub fn contains<I>(&self, id: I) -> bool
    where
        I: AsRef<str>,
    {
        self.parsers.contains_key(id.as_ref())
    }

    /// Resolves the parser for the given identifier.
    ///
    /// Parameters without identifier and unknown identifiers both resolve to
    /// [`Passthrough`], which keeps raw values as strings.
    #[must_use]
    pub fn resolve(&self, id: Option<&str>) -> &dyn Parser {
        id.and_then(|id| self.get(id)).unwrap_or(&Passthrough)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<G, S> Parser for FromFn<G, S>
where
    G: Fn(&str) -> Result<Value, Miss> + Send + Sync,
    S: Fn(&Value) -> String + Send + Sync,
{
    #[inline]
    fn get(&self, value: &str) -> Result<Value, Miss> {
        (self.get)(value)
    }

    #[inline]
    fn set(&self, value: &Value) -> String {
        (self.set)(value)
    }
}

// ----------------------------------------------------------------------------

impl Default for Registry {
    /// Creates a value parser registry with the built-in parsers.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    /// Formats the registry for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.parsers.keys().collect();
        ids.sort();
        f.debug_struct("Registry").field("parsers", &ids).finish()
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Creates a value parser from a decoder and an encoder.
pub fn from_fn<G, S>(get: G, set: S) -> FromFn<G, S>
where
    G: Fn(&str) -> Result<Value, Miss> + Send + Sync,
    S: Fn(&Value) -> String + Send + Sync,
{
    FromFn { get, set }
}

/// Converts a value into its raw string form without a parser.
///
/// Strings are used verbatim, `null` becomes the empty string, and all other
/// values are serialized as JSON, e.g., `42` or `true`.
#[must_use]
pub fn to_raw(value: &Value) -> String {
    match value {
        Value::String(value) => value.clone(),
        Value::Null => String::new(),
        _ => value.to_string(),
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
    fn test_resolve() {
        let registry = Registry::new();
        let test_cases = vec![
            (Some("int"), "42", Ok(json!(42))),
            (Some("int"), "abc", Err(Miss)),
            (Some("bool"), "true", Ok(json!(true))),
            (Some("string"), "42", Ok(json!("42"))),
            (Some("unknown"), "42", Ok(json!("42"))),
            (None, "42", Ok(json!("42"))),
        ];

        for (id, value, expected) in test_cases {
            let parser = registry.resolve(id);
            assert_eq!(parser.get(value), expected, "Failed for: {id:?}");
        }
    }

    #[test]
    fn test_register() {
        let mut registry = Registry::new();
        registry.register(
            "even",
            from_fn(
                |value| match value.parse::<u64>() {
                    Ok(n) if n % 2 == 0 => Ok(Value::from(n)),
                    _ => Err(Miss),
                },
                to_raw,
            ),
        );

        // Custom parser decodes and encodes
        let parser = registry.resolve(Some("even"));
        assert_eq!(parser.get("4"), Ok(json!(4)));
        assert_eq!(parser.get("5"), Err(Miss));
        assert_eq!(parser.set(&json!(4)), "4");
    }

    #[test]
    fn test_to_raw() {
        let test_cases = vec![
            (json!("a b"), "a b"),
            (json!(null), ""),
            (json!(7), "7"),
            (json!(false), "false"),
        ];

        for (value, expected) in test_cases {
            assert_eq!(to_raw(&value), expected);
        }
    }
}
