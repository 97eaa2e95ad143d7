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

//! File segment parser.

use super::{
    Error, Modifier, Options, Param, Result, Segment, SubSegment, Warning,
};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Scanner state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Literal text.
    Static,
    /// After `[`, which might be followed by another `[`.
    ParamOptionalStart,
    /// Parameter name.
    Param,
    /// Parameter parser, after `=`.
    ParamParser,
    /// After `]`, which might be followed by a modifier.
    Modifier,
    /// Character code, after `[x+`.
    CharCode,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// File segment scanner.
///
/// The scanner consumes the raw segment character by character, buffering
/// literal text, parameter names, parsers and character codes, and flushing
/// those buffers into sub-segments on state transitions.
struct Scanner<'a> {
    /// Raw segment.
    raw: &'a str,
    /// Parser options.
    options: &'a Options,
    /// Current state.
    state: State,
    /// Literal text buffer.
    text: String,
    /// Parameter name buffer.
    name: String,
    /// Parameter parser buffer.
    parser: Option<String>,
    /// Character code buffer.
    code: String,
    /// Whether the current parameter is optional.
    optional: bool,
    /// Whether the closing bracket of an optional parameter is pending.
    pending: bool,
    /// Sub-segments.
    parts: Vec<SubSegment>,
    /// Warnings.
    warnings: Vec<Warning>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Scanner<'a> {
    /// Creates a file segment scanner.
    fn new(raw: &'a str, options: &'a Options) -> Self {
        Self {
            raw,
            options,
            state: State::Static,
            text: String::new(),
            name: String::new(),
            parser: None,
            code: String::new(),
            optional: false,
            pending: false,
            parts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Consumes the next character.
    fn step(&mut self, char: char) -> Result {
        match self.state {
            State::Static => match char {
                '[' => {
                    self.flush_text();
                    self.state = State::ParamOptionalStart;
                }
                '.' if self.options.dot_nesting => self.text.push('/'),
                _ => self.text.push(char),
            },

            // A second bracket marks the parameter as optional, everything
            // else is already part of the parameter name
            State::ParamOptionalStart => {
                self.state = State::Param;
                if char == '[' {
                    self.optional = true;
                } else {
                    return self.step(char);
                }
            }

            // Character codes are introduced with `x+` right after the opening
            // bracket, which is why they can't be optional
            State::Param => match char {
                ']' => self.close(),
                '=' => {
                    self.parser = Some(String::new());
                    self.state = State::ParamParser;
                }
                '+' if !self.optional && self.name == "x" => {
                    self.name.clear();
                    self.state = State::CharCode;
                }
                _ => self.name.push(char),
            },

            State::ParamParser => match char {
                ']' => self.close(),
                _ => {
                    if let Some(parser) = self.parser.as_mut() {
                        parser.push(char);
                    }
                }
            },

            // Optional parameters must be closed with a second bracket before
            // a modifier can follow
            State::Modifier => {
                if self.pending {
                    if char != ']' {
                        return Err(self.unterminated());
                    }
                    self.pending = false;
                } else if char == '+' {
                    self.flush_param(true)?;
                    self.state = State::Static;
                } else {
                    self.flush_param(false)?;
                    self.state = State::Static;
                    return self.step(char);
                }
            }

            State::CharCode => match char {
                ']' => {
                    self.flush_code()?;
                    self.state = State::Static;
                }
                _ => self.code.push(char),
            },
        }

        // No errors occurred
        Ok(())
    }

    /// Closes a parameter bracket.
    fn close(&mut self) {
        self.pending = self.optional;
        self.state = State::Modifier;
    }

    /// Finishes scanning and returns the segment.
    fn finish(mut self) -> Result<Segment> {
        match self.state {
            State::Static => self.flush_text(),
            State::Modifier if !self.pending => self.flush_param(false)?,
            _ => return Err(self.unterminated()),
        }
        Ok(Segment::from_sub_segments(self.parts, self.warnings))
    }

    /// Flushes the literal text buffer into a sub-segment.
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.parts.push(SubSegment::Static(text));
        }
    }

    /// Flushes the parameter buffers into a sub-segment.
    fn flush_param(&mut self, repeatable: bool) -> Result {
        let mut name = std::mem::take(&mut self.name);
        let parser = self.parser.take();
        let optional = std::mem::replace(&mut self.optional, false);

        // Splat parameters capture the rest of the path, so they can't be
        // combined with a repeatable modifier
        let splat = match name.strip_prefix("...") {
            Some(rest) => {
                name = rest.to_string();
                true
            }
            None => false,
        };
        if splat && repeatable {
            return Err(Error::InvalidModifier {
                segment: self.raw.to_string(),
            });
        }

        // Empty names are replaced with the fallback name
        if name.is_empty() {
            name.clone_from(&self.options.fallback_name);
            self.warnings.push(Warning::EmptyName {
                segment: self.raw.to_string(),
                fallback: name.clone(),
            });
        }

        // Create parameter
        self.parts.push(SubSegment::Param(Param {
            name,
            modifier: Modifier::new(optional, repeatable),
            splat,
            parser: parser.filter(|parser| !parser.is_empty()),
            regex: None,
        }));
        Ok(())
    }

    /// Flushes the character code buffer into the literal text buffer.
    fn flush_code(&mut self) -> Result {
        let code = std::mem::take(&mut self.code);
        let value = (code.len() == 2)
            .then(|| u8::from_str_radix(&code, 16).ok())
            .flatten()
            .filter(|_| code.chars().all(|char| char.is_ascii_hexdigit()));

        // Append decoded character to literal text
        match value {
            Some(value) => {
                self.text.push(char::from(value));
                Ok(())
            }
            None => Err(Error::InvalidCharCode {
                segment: self.raw.to_string(),
                code,
            }),
        }
    }

    /// Creates an error for an unterminated parameter.
    fn unterminated(&self) -> Error {
        Error::Unterminated { segment: self.raw.to_string() }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Parses a raw file segment.
pub fn parse(raw: &str, options: &Options) -> Result<Segment> {
    let mut scanner = Scanner::new(raw, options);
    for char in raw.chars() {
        scanner.step(char)?;
    }
    scanner.finish()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates a parameter with the given name and modifier.
    fn param(name: &str, modifier: Modifier) -> SubSegment {
        SubSegment::Param(Param { modifier, ..Param::new(name) })
    }

    /// Creates literal text.
    fn text(value: &str) -> SubSegment {
        SubSegment::Static(String::from(value))
    }

    #[test]
    fn test_parse() {
        let options = Options::default();
        let test_cases = vec![
            ("about", "about", vec![text("about")]),
            ("[id]", ":id", vec![param("id", Modifier::None)]),
            ("[[id]]", ":id?", vec![param("id", Modifier::Optional)]),
            ("[id]+", ":id+", vec![param("id", Modifier::Repeatable)]),
            (
                "[[id]]+",
                ":id*",
                vec![param("id", Modifier::OptionalRepeatable)],
            ),
            (
                "a-[id]-b-[slug]",
                "a-:id-b-:slug",
                vec![
                    text("a-"),
                    param("id", Modifier::None),
                    text("-b-"),
                    param("slug", Modifier::None),
                ],
            ),
            ("[x+2E]well-known", ".well-known", vec![text(".well-known")]),
            ("users.[id]", "users/:id", vec![
                text("users/"),
                param("id", Modifier::None),
            ]),
        ];

        for (raw, template, parts) in test_cases {
            let segment = parse(raw, &options).unwrap();
            assert_eq!(segment.template, template, "Failed for: {raw}");
            assert_eq!(segment.sub_segments, parts, "Failed for: {raw}");
        }
    }

    #[test]
    fn test_parse_splat() {
        let options = Options::default();
        let segment = parse("[...path]", &options).unwrap();
        assert!(segment.params[0].splat);
        assert_eq!(segment.params[0].name, "path");
        assert_eq!(segment.template, ":path(.*)");

        // Optional splat
        let segment = parse("[[...path]]", &options).unwrap();
        assert!(segment.params[0].splat);
        assert!(segment.params[0].is_optional());
    }

    #[test]
    fn test_parse_parser() {
        let options = Options::default();
        let segment = parse("[id=int]", &options).unwrap();
        assert_eq!(segment.params[0].parser.as_deref(), Some("int"));

        // Optional parameter with parser
        let segment = parse("[[page=int]]", &options).unwrap();
        assert_eq!(segment.params[0].parser.as_deref(), Some("int"));
        assert!(segment.params[0].is_optional());
    }

    #[test]
    fn test_parse_without_dot_nesting() {
        let options = Options { dot_nesting: false, ..Options::default() };
        let segment = parse("users.[id]", &options).unwrap();
        assert_eq!(segment.sub_segments[0], text("users."));
    }

    #[test]
    fn test_parse_empty_name() {
        let options = Options::default();
        let segment = parse("[]", &options).unwrap();
        assert_eq!(segment.params[0].name, "pathMatch");
        assert_eq!(segment.warnings.len(), 1);
    }

    #[test]
    fn test_parse_errors() {
        let options = Options::default();
        let test_cases = vec!["[id", "[[id]", "[[id", "[id=int", "[x+2E"];
        for raw in test_cases {
            let err = parse(raw, &options).unwrap_err();
            assert!(
                matches!(err, Error::Unterminated { .. }),
                "Failed for: {raw}"
            );
        }

        // Invalid character codes
        for raw in ["[x+2]", "[x+2E2]", "[x+ZZ]"] {
            let err = parse(raw, &options).unwrap_err();
            assert!(
                matches!(err, Error::InvalidCharCode { .. }),
                "Failed for: {raw}"
            );
        }

        // Repeatable splat
        let err = parse("[...path]+", &options).unwrap_err();
        assert!(matches!(err, Error::InvalidModifier { .. }));
    }
}
