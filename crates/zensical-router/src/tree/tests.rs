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

//! Route tree tests.

use serde_json::json;

use crate::diagnostic::Severity;

use super::*;

/// Creates an override with the given path.
fn path(path: &str) -> RouteOverride {
    RouteOverride {
        path: Some(String::from(path)),
        ..Default::default()
    }
}

/// Creates an override with the given aliases.
fn alias(aliases: &[&str]) -> RouteOverride {
    RouteOverride {
        alias: aliases.iter().map(|&alias| String::from(alias)).collect(),
        ..Default::default()
    }
}

#[test]
fn test_insert() {
    let test_cases = vec![
        ("about", "/about", Some("/about"), Kind::Path),
        ("users/index", "/users", Some("/users/"), Kind::Index),
        ("users/[id]", "/users/:id", Some("/users/[id]"), Kind::Path),
        ("users.[id]", "/users/:id", Some("/users.[id]"), Kind::Path),
        ("(admin)/x", "/x", Some("/(admin)/x"), Kind::Path),
        ("docs/[...p]", "/docs/:p(.*)", Some("/docs/[...p]"), Kind::Path),
        ("index", "/", Some("/"), Kind::Index),
    ];
    for (key, full_path, name, kind) in test_cases {
        let mut tree = Tree::new();
        let id = tree.insert(key, "default", ()).unwrap();
        let node = &tree[id];
        assert_eq!(node.key(), key, "Failed for: {key}");
        assert_eq!(node.full_path(), full_path, "Failed for: {key}");
        assert_eq!(node.name(), name, "Failed for: {key}");
        assert_eq!(node.kind(), kind, "Failed for: {key}");
        assert!(node.is_matchable(), "Failed for: {key}");
    }
}

#[test]
fn test_insert_creates_ancestors() {
    let mut tree = Tree::new();
    tree.insert("users/[id]/edit", "default", ()).unwrap();
    assert_eq!(tree.len(), 3);

    // Ancestors exist, but aren't matchable
    let node = tree.get("users/[id]").unwrap();
    assert_eq!(node.full_path(), "/users/:id");
    assert!(!node.is_matchable());
    assert_eq!(tree.ranked().len(), 1);
}

#[test]
fn test_insert_groups_disabled() {
    let options = Options { groups: false, ..Options::default() };
    let mut tree = Tree::with_options(options);
    let id = tree.insert("(admin)/settings", "default", ()).unwrap();
    assert_eq!(tree[id].full_path(), "/(admin)/settings");
}

#[test]
fn test_insert_duplicate_view() {
    let mut tree = Tree::new();
    tree.insert("about", "default", "a").unwrap();
    tree.insert("about", "default", "b").unwrap();
    tree.insert("about", "sidebar", "c").unwrap();

    // Replaced target is reported
    let node = tree.get("about").unwrap();
    assert_eq!(node.view("default"), Some(&"b"));
    assert_eq!(node.view("sidebar"), Some(&"c"));
    assert_eq!(tree.diagnostics().len(), 1);
    assert_eq!(tree.diagnostics()[0].severity, Severity::Warning);
}

#[test]
fn test_insert_invalid() {
    let mut tree = Tree::new();
    tree.insert("users", "default", ()).unwrap();
    let result = tree.insert("users/[id/edit", "default", ());
    assert!(matches!(result, Err(Error::Segment { .. })));

    // Tree is unchanged, and error is reported
    assert_eq!(tree.len(), 1);
    assert!(tree.get("users").unwrap().children().next().is_none());
    let diagnostics = tree.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn test_insert_empty_name() {
    let mut tree = Tree::new();
    let id = tree.insert("files/[]", "default", ()).unwrap();
    assert_eq!(tree[id].full_path(), "/files/:pathMatch");
    assert_eq!(tree.diagnostics().len(), 1);
}

#[test]
fn test_remove() {
    let mut tree = Tree::new();
    tree.insert("users/[id]/edit", "default", "edit").unwrap();
    tree.insert("users", "default", "users").unwrap();
    let target = tree.remove("users/[id]/edit", "default").unwrap();
    assert_eq!(target, Some("edit"));

    // Empty nodes are pruned up to the first non-empty ancestor
    assert!(tree.find("users/[id]").is_none());
    assert!(tree.find("users").is_some());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.ranked().len(), 1);

    // Removing the last route leaves an empty tree
    assert_eq!(tree.remove("users", "default").unwrap(), Some("users"));
    assert!(tree.is_empty());
    assert!(tree.ranked().is_empty());
}

#[test]
fn test_remove_keeps_parent_of_children() {
    let mut tree = Tree::new();
    tree.insert("users", "default", ()).unwrap();
    tree.insert("users/[id]", "default", ()).unwrap();
    tree.remove("users", "default").unwrap();

    // Node stays, since it has children
    let node = tree.get("users").unwrap();
    assert!(!node.is_matchable());
    assert_eq!(tree.ranked().len(), 1);
}

#[test]
fn test_remove_missing() {
    let mut tree = Tree::<()>::new();
    let result = tree.remove("missing", "default");
    assert!(matches!(result, Err(Error::NotFound { .. })));

    // Missing view
    tree.insert("about", "default", ()).unwrap();
    assert_eq!(tree.remove("about", "sidebar").unwrap(), None);
    assert!(tree.find("about").is_some());
}

#[test]
fn test_set_override_path() {
    let test_cases = vec![
        (":id(\\d+)", "/users/:id(\\d+)", "/users/:id(\\d+)/edit"),
        ("/u/:id", "/u/:id", "/u/:id/edit"),
        ("people/:id", "/users/people/:id", "/users/people/:id/edit"),
    ];
    for (template, full_path, child_path) in test_cases {
        let mut tree = Tree::new();
        tree.insert("users/[id]", "default", ()).unwrap();
        tree.insert("users/[id]/edit", "default", ()).unwrap();
        tree.set_override("users/[id]", "a", path(template)).unwrap();

        // Descendants are recompiled
        let node = tree.get("users/[id]").unwrap();
        assert_eq!(node.full_path(), full_path, "Failed for: {template}");
        let node = tree.get("users/[id]/edit").unwrap();
        assert_eq!(node.full_path(), child_path, "Failed for: {template}");
    }
}

#[test]
fn test_set_override_invalid() {
    let mut tree = Tree::new();
    tree.insert("users/[id]", "default", ()).unwrap();
    tree.set_override("users/[id]", "a", path("/u/:id")).unwrap();
    let result = tree.set_override("users/[id]", "a", path("/u/:id(\\d+"));
    assert!(result.is_err());

    // Previous layer is kept
    let node = tree.get("users/[id]").unwrap();
    assert_eq!(node.full_path(), "/u/:id");
    assert_eq!(node.layers().count(), 1);
    assert_eq!(node.overrides().path.as_deref(), Some("/u/:id"));

    // Nodes created for the override are removed again
    let result = tree.set_override("docs", "a", path("/:id(\\d+"));
    assert!(result.is_err());
    assert!(tree.find("docs").is_none());
}

#[test]
fn test_set_override_layers() {
    let mut tree = Tree::new();
    tree.insert("about", "default", ()).unwrap();
    let overrides = RouteOverride {
        meta: Some(json!({ "title": "About", "tags": ["a"] })),
        ..Default::default()
    };
    tree.set_override("about", "page", overrides).unwrap();
    let overrides = RouteOverride {
        path: Some(String::from("/about-us")),
        meta: Some(json!({ "tags": ["b"] })),
        ..Default::default()
    };
    tree.set_override("about", "config", overrides).unwrap();

    // Layers are merged in order
    let node = tree.get("about").unwrap();
    assert_eq!(node.full_path(), "/about-us");
    assert_eq!(
        node.meta(),
        Some(&json!({ "title": "About", "tags": ["a", "b"] }))
    );

    // Removing a layer merges the remaining ones
    let layer = tree.remove_override("about", "config").unwrap();
    assert_eq!(layer.unwrap().path.as_deref(), Some("/about-us"));
    let node = tree.get("about").unwrap();
    assert_eq!(node.full_path(), "/about");
    assert_eq!(node.meta(), Some(&json!({ "title": "About", "tags": ["a"] })));
    assert_eq!(tree.remove_override("about", "config").unwrap(), None);
}

#[test]
fn test_set_override_conflict() {
    let mut tree = Tree::new();
    tree.insert("about", "default", ()).unwrap();
    tree.set_override("about", "a", path("/a")).unwrap();
    tree.set_override("about", "b", path("/b")).unwrap();

    // Last layer wins, and the conflict is reported
    assert_eq!(tree.get("about").unwrap().full_path(), "/b");
    let diagnostics = tree.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("path"));
}

#[test]
fn test_set_override_name() {
    let mut tree = Tree::new();
    tree.insert("about", "default", ()).unwrap();
    let overrides = RouteOverride {
        name: Some(Name::Named(String::from("about"))),
        ..Default::default()
    };
    tree.set_override("about", "a", overrides).unwrap();
    assert_eq!(tree.get("about").unwrap().name(), Some("about"));

    // Unnamed route
    let overrides = RouteOverride {
        name: Some(Name::Unnamed),
        ..Default::default()
    };
    tree.set_override("about", "a", overrides).unwrap();
    assert_eq!(tree.get("about").unwrap().name(), None);
}

#[test]
fn test_set_override_params() {
    let mut tree = Tree::new();
    tree.insert("users/[id]", "default", ()).unwrap();
    let mut overrides = RouteOverride::default();
    overrides.params.path.insert(String::from("id"), String::from("int"));
    tree.set_override("users/[id]", "a", overrides).unwrap();

    // Parser is assigned to parameter
    let node = tree.get("users/[id]").unwrap();
    assert_eq!(node.params()[0].parser.as_deref(), Some("int"));
}

#[test]
fn test_alias() {
    let mut tree = Tree::new();
    tree.insert("users/[id]", "default", ()).unwrap();
    tree.insert("users/[id]/edit", "default", ()).unwrap();
    tree.set_override("users/[id]", "a", alias(&["/people/:id", "/u/:id"]))
        .unwrap();

    // Aliases are inherited by descendants
    let node = tree.get("users/[id]").unwrap();
    let aliases: Vec<_> = node.aliases().collect();
    assert_eq!(aliases, ["/people/:id", "/u/:id"]);
    let node = tree.get("users/[id]/edit").unwrap();
    let aliases: Vec<_> = node.aliases().collect();
    assert_eq!(aliases, ["/people/:id/edit", "/u/:id/edit"]);

    // Each alias is ranked
    assert_eq!(tree.ranked().len(), 6);
}

#[test]
fn test_alias_relative() {
    let mut tree = Tree::new();
    tree.insert("users/[id]", "default", ()).unwrap();
    tree.set_override("users/[id]", "a", alias(&["member/:id"])).unwrap();

    // Relative aliases are joined with the parent path
    let node = tree.get("users/[id]").unwrap();
    let aliases: Vec<_> = node.aliases().collect();
    assert_eq!(aliases, ["/users/member/:id"]);
    assert_eq!(tree.diagnostics().len(), 1);
}

#[test]
fn test_iter() {
    let mut tree = Tree::new();
    tree.insert("b", "default", ()).unwrap();
    tree.insert("a/c", "default", ()).unwrap();
    tree.insert("a", "default", ()).unwrap();

    // Nodes are visited in pre-order, with children sorted by segment
    let keys: Vec<_> = tree.iter().map(Node::key).collect();
    assert_eq!(keys, ["", "a", "a/c", "b"]);
}

#[test]
fn test_chain() {
    let mut tree = Tree::new();
    let id = tree.insert("(admin)/users/[id]", "default", ()).unwrap();
    let keys: Vec<_> = tree
        .chain(id)
        .into_iter()
        .map(|id| tree[id].key())
        .collect();
    assert_eq!(keys, ["(admin)", "(admin)/users", "(admin)/users/[id]"]);
}
