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

//! Route manifest.

use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::tree::{self, RouteOverride, Tree};

mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route manifest.
///
/// Manifests describe a set of routes in JSON, as an alternative to routes
/// discovered from files. Each route names the key of the node, the view and
/// its target, and optionally an override, which is set as a layer from the
/// given source, or the key if none is given.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use zensical_router::{Manifest, Resolver};
///
/// // Parse manifest and create tree
/// let manifest: Manifest = r#"{
///     "routes": [
///         { "key": "users/[id]", "target": "user.html",
///           "override": { "name": "user" } }
///     ]
/// }"#.parse()?;
/// let tree = manifest.into_tree()?;
///
/// // Resolve path
/// let resolver = Resolver::new(&tree);
/// let resolved = resolver.resolve("/users/42", None)?;
/// assert_eq!(resolved.name.as_deref(), Some("user"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Route tree options.
    pub options: tree::Options,
    /// Routes.
    pub routes: Vec<Entry>,
}

/// Route manifest entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// Route key.
    pub key: String,
    /// View name.
    #[serde(default = "default_view")]
    pub view: String,
    /// View target.
    pub target: String,
    /// Override source.
    #[serde(default)]
    pub source: Option<String>,
    /// Route override.
    #[serde(default, rename = "override")]
    pub overrides: Option<RouteOverride>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Manifest {
    /// Loads a manifest from the file at the given path.
    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        fs::read_to_string(path)?.parse()
    }

    /// Reads a manifest from the given reader.
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: Read,
    {
        serde_json::from_reader(reader).map_err(Into::into)
    }

    /// Adds all routes to the given tree.
    ///
    /// Routes are added in order, and adding stops at the first route that
    /// can't be added, leaving all previous routes in the tree.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn apply(&self, tree: &mut Tree<String>) -> Result {
        for (index, entry) in self.routes.iter().enumerate() {
            let err = |source| Error::Entry {
                index,
                key: entry.key.clone(),
                source,
            };

            // Insert view target, and set override, if any
            tree.insert(&entry.key, entry.view.as_str(), entry.target.clone())
                .map_err(err)?;
            if let Some(overrides) = &entry.overrides {
                let source = entry.source.as_deref().unwrap_or(&entry.key);
                tree.set_override(&entry.key, source, overrides.clone())
                    .map_err(err)?;
            }
        }
        Ok(())
    }

    /// Creates a tree with the options of the manifest, and adds all routes.
    pub fn into_tree(self) -> Result<Tree<String>> {
        let mut tree = Tree::with_options(self.options.clone());
        self.apply(&mut tree)?;
        Ok(tree)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl FromStr for Manifest {
    type Err = Error;

    /// Parses a manifest from JSON.
    fn from_str(value: &str) -> Result<Self> {
        serde_json::from_str(value).map_err(Into::into)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns the default view name.
fn default_view() -> String {
    String::from("default")
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::tree;

    use super::*;

    #[test]
    fn test_parse() {
        let manifest: Manifest = r#"{
            "options": { "groups": false, "path": { "dot_nesting": false } },
            "routes": [
                { "key": "index", "target": "home.html" },
                {
                    "key": "users/[id]",
                    "view": "sidebar",
                    "target": "user.html",
                    "source": "users.json",
                    "override": { "name": "user", "meta": { "auth": true } }
                }
            ]
        }"#
        .parse()
        .unwrap();
        assert!(!manifest.options.groups);
        assert!(!manifest.options.path.dot_nesting);
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes[0].view, "default");
        assert_eq!(manifest.routes[1].source.as_deref(), Some("users.json"));
        let overrides = manifest.routes[1].overrides.as_ref().unwrap();
        assert_eq!(overrides.meta, Some(json!({ "auth": true })));
    }

    #[test]
    fn test_parse_invalid() {
        let test_cases = vec![
            r#"{ "routes": [{ "key": "a" }] }"#,
            r#"{ "routes": [{ "key": "a", "target": "a", "extra": 1 }] }"#,
            r#"{ "routes": [{ "key": "a", "target": "a", "override": 1 }] }"#,
            r#"{ "routes": "a" }"#,
        ];
        for value in test_cases {
            let result = value.parse::<Manifest>();
            let ok = matches!(result, Err(Error::Json(_)));
            assert!(ok, "Failed for: {value}");
        }
    }

    #[test]
    fn test_into_tree() {
        let manifest: Manifest = r#"{
            "routes": [
                { "key": "users/[id]", "target": "user.html" },
                { "key": "users/[id]", "view": "aside", "target": "a.html" },
                {
                    "key": "users/[id]",
                    "target": "user.html",
                    "source": "a",
                    "override": { "alias": "/u/:id" }
                }
            ]
        }"#
        .parse()
        .unwrap();
        let tree = manifest.into_tree().unwrap();

        // Views and override layers are attached
        let node = tree.get("users/[id]").unwrap();
        assert_eq!(node.view("default").map(String::as_str), Some("user.html"));
        assert_eq!(node.view("aside").map(String::as_str), Some("a.html"));
        let sources: Vec<_> = node.layers().map(|(source, _)| source).collect();
        assert_eq!(sources, ["a"]);
        assert_eq!(node.aliases().collect::<Vec<_>>(), ["/u/:id"]);
    }

    #[test]
    fn test_apply_invalid() {
        let manifest: Manifest = r#"{
            "routes": [
                { "key": "about", "target": "about.html" },
                { "key": "users/[id", "target": "user.html" }
            ]
        }"#
        .parse()
        .unwrap();
        let mut tree = Tree::new();
        let err = manifest.apply(&mut tree).unwrap_err();
        assert!(matches!(err, Error::Entry {
            index: 1,
            source: tree::Error::Segment { .. },
            ..
        }));

        // Previous routes are kept
        assert!(tree.get("about").is_some());
    }
}
