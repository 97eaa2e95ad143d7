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

//! Hierarchical route tree and location resolver.
//!
//! Routes are inserted into a [`Tree`] by slash-delimited file keys such as
//! `users/[id]`, each carrying named view targets. The tree compiles every
//! node into a path matcher inheriting from its ancestors, merges override
//! layers, and keeps matchable nodes ranked from most to least specific. A
//! [`Resolver`] then resolves URLs and symbolic [`Location`] descriptors
//! against the tree, decoding parameters through the parser [`Registry`].

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod diagnostic;
pub mod location;
pub mod manifest;
pub mod matcher;
pub mod params;
pub mod parser;
pub mod resolver;
pub mod tree;

pub use diagnostic::{Diagnostic, Severity};
pub use location::{Location, Query};
pub use manifest::Manifest;
pub use params::Params;
pub use parser::{Parser, Registry};
pub use resolver::{ResolvedLocation, Resolver};
pub use tree::{Node, NodeId, RouteOverride, Tree};
