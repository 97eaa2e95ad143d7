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

//! Segment parser error.

use std::result;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Segment parser error.
///
/// All variants carry the raw segment or template that failed to parse, so
/// that errors can be attributed to the offending file or route definition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Bracket or group not terminated.
    #[error("unterminated parameter in segment `{segment}`")]
    Unterminated {
        /// Raw segment.
        segment: String,
    },

    /// Character code escape not made of exactly two hex digits.
    #[error("invalid character code `{code}` in segment `{segment}`")]
    InvalidCharCode {
        /// Raw segment.
        segment: String,
        /// Character code.
        code: String,
    },

    /// Splat parameter combined with a repeatable modifier.
    #[error("splat parameter cannot be repeatable in segment `{segment}`")]
    InvalidModifier {
        /// Raw segment.
        segment: String,
    },

    /// Custom regular expression not valid or containing capture groups.
    #[error("invalid regular expression `{regex}` in `{segment}`")]
    InvalidRegex {
        /// Raw segment.
        segment: String,
        /// Regular expression source.
        regex: String,
    },

    /// Parameter name used more than once.
    #[error("duplicate parameter `{name}` in `{segment}`")]
    DuplicateParam {
        /// Raw segment.
        segment: String,
        /// Parameter name.
        name: String,
    },
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Segment parser result.
pub type Result<T = ()> = result::Result<T, Error>;
