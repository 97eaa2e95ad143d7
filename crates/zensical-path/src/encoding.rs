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

//! Path encoding.

use percent_encoding::{AsciiSet, percent_decode_str, utf8_percent_encode};
use std::borrow::Cow;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Character set to be percent-encoded when normalizing paths.
///
/// Existing escapes are kept as they are, which is why `%` is not part of the
/// set - incoming paths might be encoded, decoded, or a mix of both.
#[rustfmt::skip]
const NORMALIZE: &AsciiSet = &percent_encoding::CONTROLS
    .add(b' ').add(b'"').add(b'#').add(b'<').add(b'>').add(b'?').add(b'[')
    .add(b'\\').add(b']').add(b'^').add(b'`').add(b'{').add(b'|').add(b'}');

/// Character set to be percent-encoded in paths.
const PATH: &AsciiSet = &NORMALIZE.add(b'%');

/// Character set to be percent-encoded in path segments.
const SEGMENT: &AsciiSet = &PATH.add(b'/');

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Encodes a string used in a path, keeping slashes.
///
/// # Examples
///
/// ```
/// use zensical_path::encoding::encode_path;
///
/// // Encode path
/// let path = encode_path("/docs/hello world");
/// assert_eq!(path, "/docs/hello%20world");
/// ```
#[inline]
#[must_use]
pub fn encode_path(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, PATH).into()
}

/// Encodes a string used as a single path segment, including slashes.
///
/// # Examples
///
/// ```
/// use zensical_path::encoding::encode_segment;
///
/// // Encode path segment
/// let segment = encode_segment("a/b");
/// assert_eq!(segment, "a%2Fb");
/// ```
#[inline]
#[must_use]
pub fn encode_segment(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, SEGMENT).into()
}

/// Decodes a string used in a path.
///
/// Invalid UTF-8 sequences are replaced, as paths are user input.
#[inline]
#[must_use]
pub fn decode(value: &str) -> Cow<'_, str> {
    percent_decode_str(value).decode_utf8_lossy()
}

/// Normalizes a path for matching.
///
/// Characters which must be encoded in paths are encoded, while existing
/// escapes are left untouched, so `/a b` and `/a%20b` normalize to the same
/// path. Literals of patterns are encoded with the same character set.
///
/// # Examples
///
/// ```
/// use zensical_path::encoding::normalize;
///
/// // Normalize path
/// assert_eq!(normalize("/a b"), "/a%20b");
/// assert_eq!(normalize("/a%20b"), "/a%20b");
/// ```
#[inline]
#[must_use]
pub fn normalize(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, NORMALIZE).into()
}
