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

//! Route tree error.

use std::result;
use thiserror::Error;
use zensical_path::{pattern, segment};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Route tree error.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed segment or path template.
    #[error("invalid route `{key}`: {source}")]
    Segment {
        /// Route key.
        key: String,
        /// Segment error.
        #[source]
        source: segment::Error,
    },

    /// Pattern that can't be compiled.
    #[error("invalid route `{key}`: {source}")]
    Pattern {
        /// Route key.
        key: String,
        /// Pattern error.
        #[source]
        source: pattern::Error,
    },

    /// Route not found.
    #[error("route not found: `{key}`")]
    NotFound {
        /// Route key.
        key: String,
    },
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Route tree result.
pub type Result<T = ()> = result::Result<T, Error>;
