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

//! Matchers.

use std::fmt;

use super::params::Params;
use super::parser::Registry;

mod error;
mod hash;
mod path;
mod query;

pub use error::{Error, Result};
pub use hash::HashMatcher;
pub use path::PathMatcher;
pub use query::{DefaultValue, Format, QueryMatcher};

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Matcher.
///
/// Matchers extract parameters from one part of a location - path, query
/// string or hash - and build that part from parameters again. All values
/// are decoded and encoded through the parsers of the given [`Registry`].
pub trait Matcher<I: ?Sized> {
    /// Built representation.
    type Output;

    /// Attempts to extract parameters from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`Miss`] if the input doesn't match, or a value can't be
    /// decoded and there's no default to fall back to.
    fn matches(
        &self, input: &I, parsers: &Registry,
    ) -> std::result::Result<Params, Miss>;

    /// Builds the representation from the given parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a required parameter is missing, or a value
    /// doesn't fit the parameter.
    fn build(
        &self, params: &Params, parsers: &Registry,
    ) -> Result<Self::Output>;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Miss.
///
/// A miss signals that a candidate doesn't match, which is expected when
/// trying candidates in order, and thus not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Miss;

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Miss {
    /// Formats the miss for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no match")
    }
}
