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

//! Resolver error.

use std::result;
use thiserror::Error;

use crate::matcher;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Resolver error.
#[derive(Debug, Error)]
pub enum Error {
    /// Named location with a name that's not registered.
    #[error("unknown route name: {name}")]
    UnknownName {
        /// Route name.
        name: String,
    },

    /// Relative location without current location.
    #[error("relative location requires a current location")]
    RelativeWithoutCurrent,

    /// Parameters that don't round-trip through the built path.
    #[error("invalid parameters for route: {name}")]
    InvalidParams {
        /// Route name.
        name: String,
    },

    /// Matcher error, e.g., missing required parameter.
    #[error(transparent)]
    Matcher(#[from] matcher::Error),
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Resolver result.
pub type Result<T = ()> = result::Result<T, Error>;
