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

//! Path template parser.

use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;

use super::{
    Error, Modifier, Options, Param, Result, Segment, SubSegment, Warning,
};
use super::is_name_char;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Regular expression denoting a splat parameter.
const SPLAT: &str = ".*";

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Parses a path template.
pub fn parse(raw: &str, options: &Options) -> Result<Segment> {
    let mut parts = Vec::new();
    let mut warnings = Vec::new();
    let mut text = String::new();

    // Scan template, treating everything that isn't a parameter or escape as
    // literal text, including slashes, which are split into levels later on
    let mut chars = raw.chars().peekable();
    while let Some(char) = chars.next() {
        match char {
            '\\' => text.push(chars.next().unwrap_or('\\')),
            ':' => {
                if !text.is_empty() {
                    parts.push(SubSegment::Static(std::mem::take(&mut text)));
                }

                // Read parameter and check for empty names, which are always
                // replaced with the fallback name
                let mut param = read_param(&mut chars, raw)?;
                if param.name.is_empty() {
                    param.name.clone_from(&options.fallback_name);
                    warnings.push(Warning::EmptyName {
                        segment: raw.to_string(),
                        fallback: param.name.clone(),
                    });
                }
                parts.push(SubSegment::Param(param));
            }
            _ => text.push(char),
        }
    }

    // Flush remaining literal text
    if !text.is_empty() {
        parts.push(SubSegment::Static(text));
    }
    Ok(Segment::from_sub_segments(parts, warnings))
}

/// Reads a parameter after its leading `:`.
fn read_param(chars: &mut Peekable<Chars<'_>>, raw: &str) -> Result<Param> {
    let mut name = String::new();
    while let Some(&char) = chars.peek() {
        if !is_name_char(char) {
            break;
        }
        name.push(char);
        chars.next();
    }

    // Read custom regular expression, if any
    let mut regex = None;
    if chars.next_if_eq(&'(').is_some() {
        regex = Some(read_regex(chars, raw)?).filter(|src| !src.is_empty());
    }

    // Read modifier, if any
    let modifier = match chars.next_if(|char| matches!(char, '?' | '+' | '*')) {
        Some('?') => Modifier::Optional,
        Some('+') => Modifier::Repeatable,
        Some('*') => Modifier::OptionalRepeatable,
        _ => Modifier::None,
    };

    // A parameter matching anything is a splat, which can only be optional
    if regex.as_deref() == Some(SPLAT) {
        if modifier == Modifier::Repeatable {
            return Err(Error::InvalidModifier { segment: raw.to_string() });
        }
        let optional = modifier.is_optional();
        return Ok(Param {
            modifier: Modifier::new(optional, false),
            splat: true,
            ..Param::new(name)
        });
    }

    // Ensure custom regular expression compiles and has no capture groups,
    // as each parameter must map to exactly one capture group
    if let Some(src) = &regex {
        let valid = Regex::new(&format!("^(?:{src})$"))
            .is_ok_and(|regex| regex.captures_len() == 1);
        if !valid {
            return Err(Error::InvalidRegex {
                segment: raw.to_string(),
                regex: src.clone(),
            });
        }
    }

    // Return parameter
    Ok(Param { modifier, regex, ..Param::new(name) })
}

/// Reads a custom regular expression after its opening parenthesis.
fn read_regex(chars: &mut Peekable<Chars<'_>>, raw: &str) -> Result<String> {
    let mut src = String::new();
    let mut depth = 0_usize;
    loop {
        match chars.next() {
            Some('\\') => {
                src.push('\\');
                if let Some(char) = chars.next() {
                    src.push(char);
                }
            }
            Some('(') => {
                depth += 1;
                src.push('(');
            }
            Some(')') if depth == 0 => return Ok(src),
            Some(')') => {
                depth -= 1;
                src.push(')');
            }
            Some(char) => src.push(char),
            None => {
                return Err(Error::Unterminated { segment: raw.to_string() });
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let options = Options::default();
        let test_cases = vec![
            ("/users/:id", vec![("id", Modifier::None, false, None)]),
            ("/users/:id?", vec![("id", Modifier::Optional, false, None)]),
            ("/:rest+", vec![("rest", Modifier::Repeatable, false, None)]),
            (
                "/:rest*",
                vec![("rest", Modifier::OptionalRepeatable, false, None)],
            ),
            ("/:rest(.*)", vec![("rest", Modifier::None, true, None)]),
            ("/:rest(.*)*", vec![("rest", Modifier::Optional, true, None)]),
            (
                "/:id(\\d+)",
                vec![("id", Modifier::None, false, Some("\\d+"))],
            ),
            (
                "/:a-:b",
                vec![
                    ("a", Modifier::None, false, None),
                    ("b", Modifier::None, false, None),
                ],
            ),
        ];

        for (raw, expected) in test_cases {
            let segment = parse(raw, &options).unwrap();
            let params: Vec<_> = segment
                .params
                .iter()
                .map(|p| {
                    (p.name.as_str(), p.modifier, p.splat, p.regex.as_deref())
                })
                .collect();
            assert_eq!(params, expected, "Failed for: {raw}");
        }
    }

    #[test]
    fn test_parse_escapes() {
        let options = Options::default();
        let segment = parse("/a\\:b", &options).unwrap();
        assert!(segment.params.is_empty());
        assert_eq!(
            segment.sub_segments,
            vec![SubSegment::Static(String::from("/a:b"))]
        );
    }

    #[test]
    fn test_parse_errors() {
        let options = Options::default();
        let test_cases = vec![
            ("/:id(\\d+", "unterminated"),
            ("/:id((\\d)+)", "regex"),
            ("/:id([)", "regex"),
            ("/:rest(.*)+", "modifier"),
        ];

        for (raw, kind) in test_cases {
            let err = parse(raw, &options).unwrap_err();
            let ok = match kind {
                "unterminated" => matches!(err, Error::Unterminated { .. }),
                "regex" => matches!(err, Error::InvalidRegex { .. }),
                _ => matches!(err, Error::InvalidModifier { .. }),
            };
            assert!(ok, "Failed for: {raw}");
        }
    }
}
