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

//! Route path templates.
//!
//! This crate implements the building blocks of file-based routing: parsing
//! of raw path segments (`users/[id]`, `docs/[...path]`) and path templates
//! (`/users/:id(\d+)?`) into sub-segments, compilation of a chain of segments
//! into a case-insensitive [`Pattern`] that matches and builds paths, and the
//! [`Score`] that orders patterns from most to least specific.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod encoding;
pub mod pattern;
pub mod score;
pub mod segment;

pub use pattern::{Capture, Part, Pattern};
pub use score::Score;
pub use segment::{Modifier, Options, Param, Segment, SubSegment};
