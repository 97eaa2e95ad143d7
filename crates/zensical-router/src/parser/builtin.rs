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

//! Built-in value parsers.

use serde_json::Value;

use super::{to_raw, Miss, Parser};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Integer parser, registered as `int`.
///
/// Accepts an optional minus sign followed by decimal digits, and decodes into
/// a JSON number. Leading plus signs, whitespace and overflowing values miss.
#[derive(Clone, Copy, Debug, Default)]
pub struct Int;

/// Boolean parser, registered as `bool`.
///
/// Accepts exactly `true` and `false`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bool;

/// String parser, registered as `string`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Text;

/// Passthrough parser, used when no parser is registered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Parser for Int {
    fn get(&self, value: &str) -> Result<Value, Miss> {
        let digits = value.strip_prefix('-').unwrap_or(value);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Miss);
        }

        // Digits are checked, so only overflow can fail here
        value.parse::<i64>().map(Value::from).map_err(|_| Miss)
    }

    #[inline]
    fn set(&self, value: &Value) -> String {
        to_raw(value)
    }
}

impl Parser for Bool {
    fn get(&self, value: &str) -> Result<Value, Miss> {
        match value {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(Miss),
        }
    }

    #[inline]
    fn set(&self, value: &Value) -> String {
        to_raw(value)
    }
}

impl Parser for Text {
    #[inline]
    fn get(&self, value: &str) -> Result<Value, Miss> {
        Ok(Value::from(value))
    }

    #[inline]
    fn set(&self, value: &Value) -> String {
        to_raw(value)
    }
}

impl Parser for Passthrough {
    #[inline]
    fn get(&self, value: &str) -> Result<Value, Miss> {
        Ok(Value::from(value))
    }

    #[inline]
    fn set(&self, value: &Value) -> String {
        to_raw(value)
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
    fn test_int() {
        let test_cases = vec![
            ("0", Ok(json!(0))),
            ("42", Ok(json!(42))),
            ("-7", Ok(json!(-7))),
            ("+7", Err(Miss)),
            ("", Err(Miss)),
            ("-", Err(Miss)),
            ("1.5", Err(Miss)),
            ("99999999999999999999", Err(Miss)),
        ];

        for (value, expected) in test_cases {
            assert_eq!(Int.get(value), expected, "Failed for: {value}");
        }
    }

    #[test]
    fn test_bool() {
        let test_cases = vec![
            ("true", Ok(json!(true))),
            ("false", Ok(json!(false))),
            ("yes", Err(Miss)),
        ];

        for (value, expected) in test_cases {
            assert_eq!(Bool.get(value), expected, "Failed for: {value}");
        }
        assert_eq!(Bool.set(&json!(true)), "true");
    }
}
