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

//! Pattern compiler.

use regex::Regex;
use std::collections::HashSet;
use std::fmt::{self, Write};

use super::encoding::{decode, encode_path, encode_segment};
use super::score::Score;
use super::segment::{self, Options, Param, Segment, SubSegment};

mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Pattern part.
///
/// Parts describe how to rebuild a path from parameter values, which is the
/// inverse of matching. Each part corresponds to one path level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    /// Literal text.
    Static(String),
    /// Parameter, referenced by index.
    Param(usize),
    /// Literal text and parameters within the same level.
    Mixed(Vec<Part>),
}

/// Captured parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Optional parameter that did not match.
    Absent,
    /// Single value.
    Single(String),
    /// Values of a repeatable parameter, one per path level.
    Repeated(Vec<String>),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Compiled pattern.
///
/// Patterns are compiled from a chain of path levels, from the root to the
/// leaf, into a case-insensitive regular expression with exactly one capture
/// group per parameter. Besides matching, patterns know how to build paths
/// from parameter values, and carry the [`Score`] used for ranking.
#[derive(Clone, Debug)]
pub struct Pattern {
    /// Regular expression.
    regex: Regex,
    /// Parameters, in order of capture groups.
    params: Vec<Param>,
    /// Parts, one per path level.
    parts: Vec<Part>,
    /// Specificity score.
    score: Score,
    /// Human-readable path template.
    template: String,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Pattern {
    /// Compiles a pattern from the given path levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Segment`] if a parameter name is used more than once,
    /// and [`Error::Regex`] if the regular expression can't be compiled.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_path::{Options, Pattern, Segment};
    ///
    /// // Compile pattern from levels
    /// let segment = Segment::parse_file("users.[id]", &Options::default())?;
    /// let pattern = Pattern::compile(&segment.levels())?;
    /// assert_eq!(pattern.template(), "/users/:id");
    /// # Ok(())
    /// # }
    /// ```
    pub fn compile(levels: &[Vec<SubSegment>]) -> Result<Self> {
        let template = format!(
            "/{}",
            levels
                .iter()
                .map(|level| {
                    Segment::from_sub_segments(level.clone(), Vec::new())
                        .template
                })
                .collect::<Vec<_>>()
                .join("/")
        );

        // Collect parameters and ensure that names are unique, since values
        // are looked up by name when building paths
        let mut names = HashSet::new();
        let mut params = Vec::new();
        for part in levels.iter().flatten() {
            if let SubSegment::Param(param) = part {
                if !names.insert(param.name.as_str()) {
                    return Err(Error::Segment(segment::Error::DuplicateParam {
                        segment: template,
                        name: param.name.clone(),
                    }));
                }
                params.push(param.clone());
            }
        }

        // Compile regular expression and parts
        let regex = Regex::new(&compile_regex(levels))?;
        let parts = compile_parts(levels);
        Ok(Self {
            regex,
            params,
            parts,
            score: Score::new(levels),
            template,
        })
    }

    /// Parses and compiles a path template.
    ///
    /// Warnings raised while parsing are discarded - use [`Segment`] and
    /// [`Pattern::compile`] directly if they're relevant.
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
    /// use zensical_path::{Options, Pattern};
    ///
    /// // Parse and compile pattern
    /// let pattern = Pattern::parse("/team/:id?", &Options::default())?;
    /// assert!(pattern.matches("/team").is_some());
    /// assert!(pattern.matches("/team/123").is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(template: &str, options: &Options) -> Result<Self> {
        let segment = Segment::parse_path(template, options)?;
        Self::compile(&segment.levels())
    }

    /// Attempts to match the given path.
    ///
    /// The path is expected to be normalized, i.e., encoded as produced by
    /// [`normalize`][]. Captured values are decoded, and values of repeatable
    /// parameters are split into levels. Matching is case-insensitive, but
    /// the case of captured values is preserved.
    ///
    /// [`normalize`]: crate::encoding::normalize
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_path::{Capture, Options, Pattern};
    ///
    /// // Match path against pattern
    /// let pattern = Pattern::parse("/users/:id", &Options::default())?;
    /// let captures = pattern.matches("/USERS/Alice");
    /// assert_eq!(captures, Some(vec![Capture::Single("Alice".into())]));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Vec<Capture>> {
        let captures = self.regex.captures(path)?;
        let iter = self.params.iter().enumerate().map(|(i, param)| {
            let value = captures
                .get(i + 1)
                .map(|value| value.as_str())
                .filter(|value| !(value.is_empty() && param.is_optional()));

            // Decode value, and split values of repeatable parameters
            match value {
                None => Capture::Absent,
                Some(value) if param.is_repeatable() => Capture::Repeated(
                    value
                        .split('/')
                        .filter(|value| !value.is_empty())
                        .map(|value| decode(value).into_owned())
                        .collect(),
                ),
                Some(value) => Capture::Single(decode(value).into_owned()),
            }
        });
        Some(iter.collect())
    }

    /// Builds a path from the given parameter values.
    ///
    /// Values are given in the order of [`Pattern::params`], and each entry
    /// holds all values of the parameter, which is only more than one for
    /// repeatable parameters. Levels that end up empty are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParam`] if a required parameter has no value,
    /// and [`Error::NotRepeatable`] if a parameter has too many values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_path::{Options, Pattern};
    ///
    /// // Build path from values
    /// let pattern = Pattern::parse("/docs/:path+", &Options::default())?;
    /// let path = pattern.build(&[vec!["a".into(), "b c".into()]])?;
    /// assert_eq!(path, "/docs/a/b%20c");
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(&self, values: &[Vec<String>]) -> Result<String> {
        let mut levels = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            let level = self.build_part(part, values)?;
            if !level.is_empty() {
                levels.push(level);
            }
        }
        Ok(format!("/{}", levels.join("/")))
    }

    /// Builds a single part from the given parameter values.
    fn build_part(
        &self, part: &Part, values: &[Vec<String>],
    ) -> Result<String> {
        match part {
            Part::Static(text) => Ok(encode_path(text).into_owned()),
            Part::Param(index) => self.build_param(*index, values),
            Part::Mixed(parts) => {
                let mut level = String::new();
                for part in parts {
                    level.push_str(&self.build_part(part, values)?);
                }
                Ok(level)
            }
        }
    }

    /// Builds a single parameter from the given parameter values.
    fn build_param(
        &self, index: usize, values: &[Vec<String>],
    ) -> Result<String> {
        let param = &self.params[index];
        let values = values.get(index).map(Vec::as_slice).unwrap_or_default();

        // Empty values only satisfy optional parameters and splats
        let empty = match values {
            [] => true,
            [value] => value.is_empty() && !param.splat,
            _ => false,
        };
        if empty {
            return if param.is_optional() {
                Ok(String::new())
            } else {
                Err(Error::MissingParam { name: param.name.clone() })
            };
        }

        // Join values of repeatable parameters, and encode slashes in all
        // other values except for splats, which span multiple levels
        if param.is_repeatable() {
            let iter = values.iter().map(|value| encode_segment(value));
            Ok(iter.collect::<Vec<_>>().join("/"))
        } else if let [value] = values {
            Ok(if param.splat {
                encode_path(value).into_owned()
            } else {
                encode_segment(value).into_owned()
            })
        } else {
            Err(Error::NotRepeatable { name: param.name.clone() })
        }
    }
}

#[allow(clippy::must_use_candidate)]
impl Pattern {
    /// Returns the parameters, in order of capture groups.
    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns the parts, one per path level.
    #[inline]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Returns the specificity score.
    #[inline]
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Returns the human-readable path template.
    #[inline]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the source of the regular expression.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Pattern {
    /// Formats the pattern for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Compiles the regular expression source for the given levels.
///
/// Levels are joined with a single `/`, except for levels consisting of only
/// an optional parameter, which include the leading slash in their optional
/// group, so `/team` and `/team/123` both match `/team/:id?`. One trailing
/// slash is always accepted.
fn compile_regex(levels: &[Vec<SubSegment>]) -> String {
    let mut source = String::from("(?i)^");
    for level in levels {
        if let [SubSegment::Param(param)] = level.as_slice()
            && param.is_optional()
        {
            let _ = write!(source, "(?:/{})?", compile_group(param));
            continue;
        }

        // Compile level
        source.push('/');
        for part in level {
            match part {
                SubSegment::Static(text) => {
                    source.push_str(&regex::escape(&encode_path(text)));
                }
                SubSegment::Param(param) => {
                    source.push_str(&compile_group(param));
                    if param.is_optional() {
                        source.push('?');
                    }
                }
            }
        }
    }

    // Accept optional trailing slash
    source.push_str("/?$");
    source
}

/// Compiles the capture group for the given parameter.
fn compile_group(param: &Param) -> String {
    if param.splat {
        return String::from("(.*)");
    }
    match (&param.regex, param.is_repeatable()) {
        (Some(src), true) => format!("((?:{src})(?:/(?:{src}))*)"),
        (Some(src), false) => format!("({src})"),
        (None, true) => String::from("(.+?)"),
        (None, false) => String::from("([^/]+?)"),
    }
}

/// Compiles the parts for the given levels.
fn compile_parts(levels: &[Vec<SubSegment>]) -> Vec<Part> {
    let mut index = 0;
    let iter = levels.iter().map(|level| {
        let mut parts: Vec<Part> = level
            .iter()
            .map(|part| match part {
                SubSegment::Static(text) => Part::Static(text.clone()),
                SubSegment::Param(_) => {
                    index += 1;
                    Part::Param(index - 1)
                }
            })
            .collect();

        // Levels with a single part are not wrapped
        match parts.len() {
            1 => parts.remove(0),
            _ => Part::Mixed(parts),
        }
    });
    iter.collect()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses and compiles a path template.
    fn pattern(template: &str) -> Pattern {
        Pattern::parse(template, &Options::default()).unwrap()
    }

    /// Creates a single capture.
    fn single(value: &str) -> Capture {
        Capture::Single(String::from(value))
    }

    #[test]
    fn test_compile_regex() {
        let test_cases = vec![
            ("/", "(?i)^/?$"),
            ("/users/:id", "(?i)^/users/([^/]+?)/?$"),
            ("/team/:id?", "(?i)^/team(?:/([^/]+?))?/?$"),
            ("/docs/:path+", "(?i)^/docs/(.+?)/?$"),
            ("/:path(.*)", "(?i)^/(.*)/?$"),
            ("/:id(\\d+)", "(?i)^/(\\d+)/?$"),
        ];

        for (template, expected) in test_cases {
            assert_eq!(pattern(template).as_str(), expected, "{template}");
        }
    }

    #[test]
    fn test_matches() {
        let test_cases = vec![
            ("/users/:id", "/users/42", Some(vec![single("42")])),
            ("/users/:id", "/users/42/", Some(vec![single("42")])),
            ("/users/:id", "/users", None),
            ("/users/:id", "/users/42/x", None),
            ("/team/:id?", "/team", Some(vec![Capture::Absent])),
            ("/team/:id?", "/team/9", Some(vec![single("9")])),
            (
                "/docs/:path+",
                "/docs/a/b",
                Some(vec![Capture::Repeated(vec!["a".into(), "b".into()])]),
            ),
            ("/docs/:path*", "/docs", Some(vec![Capture::Absent])),
            ("/:path(.*)", "/a/b", Some(vec![single("a/b")])),
            ("/:id(\\d+)", "/abc", None),
            ("/a-:id-b", "/a-x-b", Some(vec![single("x")])),
            ("/hello world", "/hello%20world", Some(vec![])),
            ("/users/:id", "/users/a%20b", Some(vec![single("a b")])),
        ];

        for (template, path, expected) in test_cases {
            assert_eq!(
                pattern(template).matches(path),
                expected,
                "Failed for {template} against {path}"
            );
        }
    }

    #[test]
    fn test_matches_case_insensitive() {
        let pattern = pattern("/users/:id/profile");
        assert_eq!(
            pattern.matches("/USERS/Bob/Profile"),
            Some(vec![single("Bob")])
        );
    }

    #[test]
    fn test_parts() {
        let pattern = pattern("/users/a-:id/:slug?");
        assert_eq!(
            pattern.parts(),
            &[
                Part::Static("users".into()),
                Part::Mixed(vec![Part::Static("a-".into()), Part::Param(0)]),
                Part::Param(1),
            ]
        );
    }

    #[test]
    fn test_build() {
        let pattern = pattern("/users/:id/:slug?");
        let path = pattern.build(&[vec!["42".into()], vec![]]).unwrap();
        assert_eq!(path, "/users/42");

        // Values are encoded
        let path = pattern.build(&[vec!["a/b".into()], vec!["c".into()]]);
        assert_eq!(path.unwrap(), "/users/a%2Fb/c");

        // Required parameters must have a value
        let err = pattern.build(&[vec![], vec![]]).unwrap_err();
        assert!(matches!(err, Error::MissingParam { .. }));

        // Only repeatable parameters take multiple values
        let err = pattern.build(&[vec!["a".into(), "b".into()], vec![]]);
        assert!(matches!(err.unwrap_err(), Error::NotRepeatable { .. }));
    }

    #[test]
    fn test_build_round_trip() {
        let test_cases = vec![
            ("/users/:id", vec![vec!["a b".to_string()]]),
            ("/docs/:path+", vec![vec!["a".to_string(), "b".to_string()]]),
            ("/files/:path(.*)", vec![vec!["a/b/c".to_string()]]),
            ("/a-:x-b-:y", vec![vec!["1".to_string()], vec!["2".to_string()]]),
        ];

        for (template, values) in test_cases {
            let pattern = pattern(template);
            let path = pattern.build(&values).unwrap();
            let captures = pattern.matches(&path).unwrap();
            let rebuilt: Vec<Vec<String>> = captures
                .into_iter()
                .map(|capture| match capture {
                    Capture::Absent => vec![],
                    Capture::Single(value) => vec![value],
                    Capture::Repeated(values) => values,
                })
                .collect();
            assert_eq!(rebuilt, values, "Failed for: {template}");
        }
    }

    #[test]
    fn test_compile_duplicate_params() {
        let options = Options::default();
        let err = Pattern::parse("/:id/:id", &options).unwrap_err();
        assert!(matches!(
            err,
            Error::Segment(segment::Error::DuplicateParam { .. })
        ));
    }
}
