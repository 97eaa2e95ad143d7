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

//! Specificity score.

use std::cmp::Ordering;

use super::segment::{Param, SubSegment};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Score of literal text.
pub const STATIC: i32 = 300;

/// Score of a path without any levels, i.e., `/`.
pub const ROOT: i32 = 90;

/// Score of a parameter.
pub const PARAM: i32 = 80;

/// Bonus for parameters with a custom regular expression.
pub const BONUS_REGEX: i32 = 10;

/// Penalty for optional parameters.
pub const PENALTY_OPTIONAL: i32 = 10;

/// Penalty for repeatable parameters.
pub const PENALTY_REPEATABLE: i32 = 20;

/// Penalty for splat parameters.
pub const PENALTY_SPLAT: i32 = 500;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Specificity score.
///
/// A score holds one tuple per path level, and each tuple holds one number per
/// sub-segment of the level. Tuples are never summed up, but compared element
/// by element, so that a literal beats a parameter in the same position, and
/// a required parameter beats an optional one, which beats a splat.
///
/// The [`Ord`] implementation orders more specific scores first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Score {
    /// Tuples, one per level.
    levels: Vec<Vec<i32>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Score {
    /// Computes the score for the given levels.
    ///
    /// A path without levels scores as [`ROOT`], so that `/` is preferred
    /// over patterns with optional parameters that also match `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_path::{Options, Score, Segment};
    ///
    /// // Compute scores for static and dynamic path
    /// let options = Options::default();
    /// let a = Segment::parse_path("/a/static", &options)?;
    /// let b = Segment::parse_path("/a/:id", &options)?;
    /// assert!(Score::new(&a.levels()) < Score::new(&b.levels()));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(levels: &[Vec<SubSegment>]) -> Self {
        if levels.is_empty() {
            return Self { levels: vec![vec![ROOT]] };
        }

        // Compute one tuple per level
        let levels = levels
            .iter()
            .map(|level| {
                level
                    .iter()
                    .map(|part| match part {
                        SubSegment::Static(_) => STATIC,
                        SubSegment::Param(param) => score_param(param),
                    })
                    .collect()
            })
            .collect();

        // Return score
        Self { levels }
    }

    /// Returns the tuples, one per level.
    #[inline]
    #[must_use]
    pub fn levels(&self) -> &[Vec<i32>] {
        &self.levels
    }

    /// Returns whether the last number of the last tuple is negative.
    ///
    /// This is the case for patterns ending in a splat parameter.
    #[must_use]
    pub fn is_last_negative(&self) -> bool {
        self.levels
            .last()
            .and_then(|level| level.last())
            .is_some_and(|score| *score < 0)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Ord for Score {
    /// Compares two scores, ordering more specific scores first.
    ///
    /// Tuples are compared pairwise from the root. If all pairs are equal,
    /// but one score has exactly one more level, a trailing splat sorts it
    /// last. Otherwise, the score with more levels sorts first.
    fn cmp(&self, other: &Self) -> Ordering {
        let iter = self.levels.iter().zip(&other.levels);
        for (a, b) in iter {
            let ordering = compare_tuples(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        // Scores with a trailing splat are tried last among equals
        if self.levels.len().abs_diff(other.levels.len()) == 1 {
            if self.is_last_negative() {
                return Ordering::Greater;
            }
            if other.is_last_negative() {
                return Ordering::Less;
            }
        }

        // More levels sort first
        other.levels.len().cmp(&self.levels.len())
    }
}

impl PartialOrd for Score {
    /// Compares two scores, ordering more specific scores first.
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Computes the score of a parameter.
fn score_param(param: &Param) -> i32 {
    if param.splat {
        return PARAM - PENALTY_SPLAT;
    }

    // Apply bonus and penalties
    let mut score = PARAM;
    if param.regex.is_some() {
        score += BONUS_REGEX;
    }
    if param.modifier.is_optional() {
        score -= PENALTY_OPTIONAL;
    }
    if param.modifier.is_repeatable() {
        score -= PENALTY_REPEATABLE;
    }
    score
}

/// Compares two tuples, ordering more specific tuples first.
///
/// The first differing number decides, and higher numbers sort first. If one
/// tuple is a prefix of the other, the shorter one only sorts first if it's
/// a single literal, as a full literal level beats a longer dynamic one.
fn compare_tuples(a: &[i32], b: &[i32]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        if x != y {
            return y.cmp(x);
        }
    }

    // One tuple is a prefix of the other
    match a.len().cmp(&b.len()) {
        Ordering::Less if a == [STATIC] => Ordering::Less,
        Ordering::Less => Ordering::Greater,
        Ordering::Greater if b == [STATIC] => Ordering::Greater,
        Ordering::Greater => Ordering::Less,
        Ordering::Equal => Ordering::Equal,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{Options, Segment};

    /// Computes the score of a path template.
    fn score(template: &str) -> Score {
        let segment = Segment::parse_path(template, &Options::default());
        Score::new(&segment.unwrap().levels())
    }

    #[test]
    fn test_new() {
        let test_cases = vec![
            ("/", vec![vec![ROOT]]),
            ("/a/static", vec![vec![300], vec![300]]),
            ("/a/:id", vec![vec![300], vec![80]]),
            ("/a/:id?", vec![vec![300], vec![70]]),
            ("/a/:rest+", vec![vec![300], vec![60]]),
            ("/a/:rest*", vec![vec![300], vec![50]]),
            ("/a/:rest(.*)", vec![vec![300], vec![-420]]),
            ("/a/:id(\\d+)", vec![vec![300], vec![90]]),
            ("/a-:id", vec![vec![300, 80]]),
        ];

        for (template, expected) in test_cases {
            assert_eq!(
                score(template).levels(),
                expected.as_slice(),
                "Failed for: {template}"
            );
        }
    }

    #[test]
    fn test_order() {
        let mut templates = vec![
            "/a/:rest(.*)",
            "/a/:rest+",
            "/a/:id?",
            "/a/:id",
            "/a/static",
        ];
        templates.sort_by_key(|template| score(template));
        assert_eq!(
            templates,
            vec!["/a/static", "/a/:id", "/a/:id?", "/a/:rest+", "/a/:rest(.*)"]
        );
    }

    #[test]
    fn test_compare_tuples() {
        let test_cases = vec![
            (vec![300], vec![300, 80], Ordering::Less),
            (vec![80], vec![80, 300], Ordering::Greater),
            (vec![300, 80], vec![300], Ordering::Greater),
            (vec![80, 300], vec![80], Ordering::Less),
            (vec![300, 80], vec![300, 80], Ordering::Equal),
        ];

        for (a, b, expected) in test_cases {
            assert_eq!(compare_tuples(&a, &b), expected, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_compare_levels() {
        // More levels sort first, unless the extra level is a splat
        assert!(score("/a/:id") < score("/a"));
        assert!(score("/a") < score("/a/:rest(.*)"));
        assert!(score("/a/b/:id") < score("/a"));
        assert_eq!(score("/a/:id").cmp(&score("/b/:id")), Ordering::Equal);
        assert!(score("/") < score("/:id?"));
    }
}
