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

//! Segment parser.

use serde::Deserialize;
use std::fmt::{self, Write};

mod error;
mod file;
mod raw;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Characters with a meaning in path templates, escaped when printed.
const RESERVED: &[char] = &[':', '(', ')', '*', '?', '+', '\\'];

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Parameter modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Exactly once.
    #[default]
    None,
    /// Zero or once (`?`).
    Optional,
    /// Once or more (`+`).
    Repeatable,
    /// Zero or more (`*`).
    OptionalRepeatable,
}

/// Sub-segment.
///
/// Sub-segments are either literal text, or parameters, in the order in which
/// they appear in the raw segment. Literal text is stored decoded, and only
/// encoded when compiled into a [`Pattern`][] or when building paths.
///
/// [`Pattern`]: crate::Pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubSegment {
    /// Literal text.
    Static(String),
    /// Parameter.
    Param(Param),
}

/// Segment parser warning.
///
/// Warnings don't abort parsing, but should be surfaced as diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// Empty parameter name, replaced with the fallback name.
    EmptyName {
        /// Raw segment.
        segment: String,
        /// Fallback name.
        fallback: String,
    },
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Segment parser options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Whether dots in file segments create nested path levels.
    pub dot_nesting: bool,
    /// Name given to parameters with an empty name.
    pub fallback_name: String,
}

/// Parameter descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter modifier.
    pub modifier: Modifier,
    /// Whether the parameter matches the rest of the path, including slashes.
    pub splat: bool,
    /// Value parser identifier.
    pub parser: Option<String>,
    /// Custom regular expression, if any.
    pub regex: Option<String>,
}

/// Parsed segment.
///
/// A segment is the result of parsing a raw file segment like `a-[id]-b` or
/// a path template like `/users/:id`. The template is the human-readable form
/// of the segment, which is again valid input for [`Segment::parse_path`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    /// Human-readable path template.
    pub template: String,
    /// Parameters, in order of appearance.
    pub params: Vec<Param>,
    /// Sub-segments, in order of appearance.
    pub sub_segments: Vec<SubSegment>,
    /// Warnings raised while parsing.
    pub warnings: Vec<Warning>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Modifier {
    /// Creates a modifier from the given flags.
    #[must_use]
    pub fn new(optional: bool, repeatable: bool) -> Self {
        match (optional, repeatable) {
            (false, false) => Modifier::None,
            (true, false) => Modifier::Optional,
            (false, true) => Modifier::Repeatable,
            (true, true) => Modifier::OptionalRepeatable,
        }
    }

    /// Returns whether the modifier allows absence.
    #[must_use]
    pub fn is_optional(self) -> bool {
        matches!(self, Modifier::Optional | Modifier::OptionalRepeatable)
    }

    /// Returns whether the modifier allows repetition.
    #[must_use]
    pub fn is_repeatable(self) -> bool {
        matches!(self, Modifier::Repeatable | Modifier::OptionalRepeatable)
    }
}

// ----------------------------------------------------------------------------

impl Param {
    /// Creates a required parameter.
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            modifier: Modifier::None,
            splat: false,
            parser: None,
            regex: None,
        }
    }

    /// Returns whether the parameter might be absent.
    #[inline]
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.modifier.is_optional()
    }

    /// Returns whether the parameter captures a list of segments.
    #[inline]
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        !self.splat && self.modifier.is_repeatable()
    }
}

// ----------------------------------------------------------------------------

impl Segment {
    /// Parses a raw file segment.
    ///
    /// File segments use brackets to denote parameters, e.g. `[id]` for a
    /// required, `[[id]]` for an optional, `[id]+` for a repeatable, and
    /// `[...path]` for a splat parameter. Parsers are attached with `=`, as
    /// in `[id=int]`, and characters which can't be part of file names are
    /// written as `[x+HH]`, where `HH` are exactly two hex digits.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the segment is malformed, i.e., if brackets
    /// are not terminated or character codes are invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_path::{Options, Segment};
    ///
    /// // Parse raw file segment
    /// let segment = Segment::parse_file("a-[id]-b", &Options::default())?;
    /// assert_eq!(segment.template, "a-:id-b");
    /// assert_eq!(segment.params[0].name, "id");
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse_file(raw: &str, options: &Options) -> Result<Self> {
        file::parse(raw, options)
    }

    /// Parses a path template.
    ///
    /// Path templates denote parameters with `:name`, optionally followed by
    /// a custom regular expression in parentheses and a modifier, one of `?`,
    /// `+` or `*`. Characters with a special meaning are escaped with `\`. The
    /// template might contain slashes, which are kept as literal text.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the template is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_path::{Options, Segment};
    ///
    /// // Parse path template
    /// let options = Options::default();
    /// let segment = Segment::parse_path("/users/:id(\\d+)", &options)?;
    /// assert_eq!(segment.params[0].regex.as_deref(), Some("\\d+"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse_path(raw: &str, options: &Options) -> Result<Self> {
        raw::parse(raw, options)
    }

    /// Creates a segment from sub-segments.
    ///
    /// Consecutive literals are joined, and the template and parameters are
    /// derived from the sub-segments.
    #[must_use]
    pub fn from_sub_segments(
        sub_segments: Vec<SubSegment>, warnings: Vec<Warning>,
    ) -> Self {
        let mut parts: Vec<SubSegment> = Vec::with_capacity(sub_segments.len());
        for part in sub_segments {
            match (parts.last_mut(), part) {
                (_, SubSegment::Static(text)) if text.is_empty() => {}
                (Some(SubSegment::Static(prev)), SubSegment::Static(text)) => {
                    prev.push_str(&text);
                }
                (_, part) => parts.push(part),
            }
        }

        // Derive template - literals directly following a parameter must not
        // continue its name, so a leading word character is escaped
        let mut template = String::new();
        let mut after_param = false;
        for part in &parts {
            let text = part.to_string();
            if after_param && text.starts_with(is_name_char) {
                template.push('\\');
            }
            template.push_str(&text);
            after_param = matches!(part, SubSegment::Param(_));
        }

        // Derive parameters
        let params = parts
            .iter()
            .filter_map(|part| match part {
                SubSegment::Param(param) => Some(param.clone()),
                SubSegment::Static(_) => None,
            })
            .collect();

        // Return segment
        Self { template, params, sub_segments: parts, warnings }
    }

    /// Splits the segment into path levels at literal slashes.
    ///
    /// Empty levels are dropped, so `/users/:id` yields two levels, and a
    /// segment without any content yields none.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_path::{Options, Segment};
    ///
    /// // Parse dot-nested file segment and split it
    /// let segment = Segment::parse_file("users.[id]", &Options::default())?;
    /// assert_eq!(segment.levels().len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn levels(&self) -> Vec<Vec<SubSegment>> {
        let mut levels = vec![Vec::new()];
        for part in &self.sub_segments {
            match part {
                SubSegment::Static(text) => {
                    let mut iter = text.split('/');
                    if let Some(first) = iter.next() {
                        push_static(&mut levels, first);
                    }

                    // Every further piece starts a new level
                    for piece in iter {
                        levels.push(Vec::new());
                        push_static(&mut levels, piece);
                    }
                }
                SubSegment::Param(param) => {
                    if let Some(level) = levels.last_mut() {
                        level.push(SubSegment::Param(param.clone()));
                    }
                }
            }
        }

        // Drop empty levels
        levels.retain(|level| !level.is_empty());
        levels
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Options {
    /// Creates default segment parser options.
    fn default() -> Self {
        Self {
            dot_nesting: true,
            fallback_name: String::from("pathMatch"),
        }
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for SubSegment {
    /// Formats the sub-segment as part of a path template.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubSegment::Static(text) => {
                for char in text.chars() {
                    if RESERVED.contains(&char) {
                        f.write_char('\\')?;
                    }
                    f.write_char(char)?;
                }
                Ok(())
            }
            SubSegment::Param(param) => param.fmt(f),
        }
    }
}

impl fmt::Display for Param {
    /// Formats the parameter as part of a path template.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)?;
        if self.splat {
            f.write_str("(.*)")?;
            return if self.is_optional() { f.write_str("?") } else { Ok(()) };
        }

        // Write custom regular expression and modifier, if any
        if let Some(regex) = &self.regex {
            write!(f, "({regex})")?;
        }
        match self.modifier {
            Modifier::None => Ok(()),
            Modifier::Optional => f.write_str("?"),
            Modifier::Repeatable => f.write_str("+"),
            Modifier::OptionalRepeatable => f.write_str("*"),
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns whether the character can be part of a parameter name.
fn is_name_char(char: char) -> bool {
    char.is_ascii_alphanumeric() || char == '_'
}

/// Appends literal text to the last level.
fn push_static(levels: &mut [Vec<SubSegment>], text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(level) = levels.last_mut() {
        match level.last_mut() {
            Some(SubSegment::Static(prev)) => prev.push_str(text),
            _ => level.push(SubSegment::Static(text.to_string())),
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
    fn test_levels() {
        let options = Options::default();
        let test_cases = vec![
            ("/users/:id", vec!["users", ":id"]),
            ("users", vec!["users"]),
            ("/", vec![]),
            ("", vec![]),
            ("/a//b/", vec!["a", "b"]),
            ("/a-:id-b/:slug?", vec!["a-:id-b", ":slug?"]),
        ];

        for (raw, expected) in test_cases {
            let segment = Segment::parse_path(raw, &options).unwrap();
            let levels: Vec<String> = segment
                .levels()
                .iter()
                .map(|level| level.iter().map(ToString::to_string).collect())
                .collect();
            assert_eq!(levels, expected, "Failed for template: {raw}");
        }
    }

    #[test]
    fn test_template_round_trip() {
        let options = Options::default();
        for raw in ["a-[id]-b", "[[id]]", "[...path]", "[id]+", "[[x]]+"] {
            let segment = Segment::parse_file(raw, &options).unwrap();
            let parsed = Segment::parse_path(&segment.template, &options);
            assert_eq!(
                parsed.unwrap().sub_segments,
                segment.sub_segments,
                "Failed for segment: {raw}"
            );
        }
    }

    #[test]
    fn test_template_escapes_reserved() {
        let segment = SubSegment::Static(String::from("a:b(c)"));
        assert_eq!(segment.to_string(), "a\\:b\\(c\\)");
    }
}
