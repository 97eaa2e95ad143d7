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

//! Route tree.

use ahash::HashMap;
use serde::Deserialize;
use slab::Slab;
use std::collections::BTreeMap;
use std::mem;
use std::ops::Index;
use zensical_path::segment::Warning;
use zensical_path::{Pattern, Segment, SubSegment};

use super::diagnostic::Diagnostic;
use super::matcher::PathMatcher;
use super::parser::Registry;

mod error;
mod iter;
mod node;
mod overrides;
mod rank;

pub use error::{Error, Result};
pub use iter::{Ancestors, Iter};
pub use node::{Kind, Node, NodeId};
use node::{Alias, Compiled};
pub use overrides::{
    HashOverride, Name, ParamOverrides, QueryOverride, RouteOverride,
};
pub use rank::Candidate;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route tree options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Segment parser options.
    pub path: zensical_path::Options,
    /// Whether `index` segments add nothing to the path.
    pub index: bool,
    /// Whether `(name)` segments are groups, adding nothing to the path.
    pub groups: bool,
}

/// Route tree.
///
/// The tree stores routes by slash-delimited keys, which mirror the file
/// hierarchy they were discovered from, e.g., `users/[id]/index`. Inserting
/// a view target creates all missing nodes along the key. Nodes compile their
/// path matcher from the segments of all ancestors, and are recompiled with
/// their descendants whenever their overrides change.
///
/// Nodes with view targets are matchable, and kept ranked from most to least
/// specific as they are inserted, so that resolving a path tries candidates
/// in order and stops at the first match.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use zensical_router::Tree;
///
/// // Create tree and insert routes
/// let mut tree = Tree::new();
/// tree.insert("users/index", "default", "users.html")?;
/// tree.insert("users/[id]", "default", "user.html")?;
///
/// // Obtain route by key
/// let node = tree.get("users/[id]").unwrap();
/// assert_eq!(node.full_path(), "/users/:id");
/// assert_eq!(node.name(), Some("/users/[id]"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Tree<T> {
    /// Node arena.
    nodes: Slab<Node<T>>,
    /// Root node.
    root: NodeId,
    /// Ranked candidates.
    ranked: Vec<Candidate>,
    /// Value parser registry.
    parsers: Registry,
    /// Route tree options.
    options: Options,
    /// Collected diagnostics.
    diagnostics: Vec<Diagnostic>,
    /// Next insertion stamp.
    stamp: u64,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Tree<T> {
    /// Creates a route tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use zensical_router::Tree;
    ///
    /// // Create tree
    /// let tree = Tree::<()>::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates a route tree with the given options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        let mut nodes = Slab::new();
        let entry = nodes.vacant_entry();
        let root = NodeId(entry.key());
        entry.insert(Node {
            id: root,
            key: String::new(),
            segment: String::new(),
            kind: Kind::Root,
            parent: None,
            children: BTreeMap::new(),
            views: BTreeMap::new(),
            layers: Vec::new(),
            overrides: RouteOverride::default(),
            compiled: Compiled::root(),
            stamp: 0,
        });

        // Return empty tree
        Self {
            nodes,
            root,
            ranked: Vec::new(),
            parsers: Registry::new(),
            options,
            diagnostics: Vec::new(),
            stamp: 0,
        }
    }

    /// Inserts a view target for the route with the given key.
    ///
    /// Missing nodes along the key are created. If the view already has a
    /// target, it is replaced and a warning is recorded.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a segment of the key is malformed, in which
    /// case the tree is left unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(key = key.as_ref()))
    )]
    pub fn insert<K, V>(&mut self, key: K, view: V, target: T) -> Result<NodeId>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let key = key.as_ref();
        let id = self.create(key)?;

        // Attach view target, and rank node, as it might have become matchable
        let view = view.into();
        let node = &mut self.nodes[id.0];
        if node.views.insert(view.clone(), target).is_some() {
            let message = format!("duplicate view `{view}` replaced");
            let key = node.key.clone();
            self.report(Diagnostic::warning(message, key));
        }
        self.rank(id);
        Ok(id)
    }

    /// Removes the view target for the route with the given key.
    ///
    /// Nodes without view targets, overrides and children are pruned, along
    /// with all ancestors that become empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there's no route with the given key.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(key = key.as_ref()))
    )]
    pub fn remove<K, V>(&mut self, key: K, view: V) -> Result<Option<T>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let id = self.find_or_err(key.as_ref())?;
        let target = self.nodes[id.0].views.remove(view.as_ref());
        if target.is_some() && !self[id].is_matchable() {
            self.prune_or_rank(id);
        }
        Ok(target)
    }

    /// Sets the override layer from the given source for the route with the
    /// given key.
    ///
    /// Missing nodes along the key are created. An existing layer from the
    /// same source is replaced, and all layers are merged in order. Layers
    /// setting path or name to different values are reported as conflicts.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the resulting path or an alias is malformed, in
    /// which case the tree is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use zensical_router::{RouteOverride, Tree};
    ///
    /// // Create tree and insert route
    /// let mut tree = Tree::new();
    /// tree.insert("users/[id]", "default", ())?;
    ///
    /// // Set override for route
    /// tree.set_override("users/[id]", "users/[id].vue", RouteOverride {
    ///     path: Some(String::from(":id(\\d+)")),
    ///     ..Default::default()
    /// })?;
    /// let node = tree.get("users/[id]").unwrap();
    /// assert_eq!(node.full_path(), "/users/:id(\\d+)");
    /// # Ok(())
    /// # }
    /// ```
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(key = key.as_ref()))
    )]
    pub fn set_override<K, S>(
        &mut self, key: K, source: S, overrides: RouteOverride,
    ) -> Result<NodeId>
    where
        K: AsRef<str>,
        S: Into<String>,
    {
        let key = key.as_ref();
        let exists = self.find(key).is_some();
        let id = self.create(key)?;

        // Replace or append layer, and keep previous state for rollback
        let source = source.into();
        let node = &mut self.nodes[id.0];
        let layers = node.layers.clone();
        match node.layers.iter_mut().find(|(s, _)| *s == source) {
            Some((_, layer)) => *layer = overrides,
            None => node.layers.push((source, overrides)),
        }

        // Recompile node, and restore previous state on error
        if let Err(err) = self.apply_layers(id) {
            if exists {
                self.nodes[id.0].layers = layers;
                self.merge_layers(id);
            } else {
                self.nodes[id.0].layers.clear();
                self.prune(id);
            }
            return Err(err);
        }
        Ok(id)
    }

    /// Removes the override layer from the given source for the route with
    /// the given key, and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there's no route with the given key, or
    /// an [`Error`] if the remaining layers result in a malformed path, in
    /// which case the tree is left unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(key = key.as_ref()))
    )]
    pub fn remove_override<K, S>(
        &mut self, key: K, source: S,
    ) -> Result<Option<RouteOverride>>
    where
        K: AsRef<str>,
        S: AsRef<str>,
    {
        let id = self.find_or_err(key.as_ref())?;
        let node = &mut self.nodes[id.0];
        let source = source.as_ref();
        let position = node.layers.iter().position(|(s, _)| s == source);
        let Some(index) = position else {
            return Ok(None);
        };

        // Remove layer, and restore it on error
        let layer = node.layers.remove(index);
        if let Err(err) = self.apply_layers(id) {
            self.nodes[id.0].layers.insert(index, layer);
            self.merge_layers(id);
            return Err(err);
        }

        // Prune node if it became empty
        if self[id].is_prunable() {
            self.prune(id);
        }
        Ok(Some(layer.1))
    }

    /// Returns the identifier of the route with the given key.
    pub fn find<K>(&self, key: K) -> Option<NodeId>
    where
        K: AsRef<str>,
    {
        let mut id = self.root;
        for segment in segments(key.as_ref()) {
            id = *self[id].children.get(segment)?;
        }
        Some(id)
    }

    /// Returns the route with the given key.
    pub fn get<K>(&self, key: K) -> Option<&Node<T>>
    where
        K: AsRef<str>,
    {
        self.find(key).map(|id| &self[id])
    }

    /// Returns the route with the given identifier.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Returns an iterator over all nodes in depth-first pre-order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.root)
    }

    /// Returns an iterator over the ancestors of the given node.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors::new(self, id)
    }

    /// Returns the chain of nodes from the root to the given node.
    ///
    /// The root itself is not part of the chain, but groups are, so that their
    /// metadata and query matchers are available.
    #[must_use]
    pub fn chain(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain: Vec<NodeId> = self
            .ancestors(id)
            .filter(|&ancestor| ancestor != self.root)
            .collect();
        chain.reverse();
        if id != self.root {
            chain.push(id);
        }
        chain
    }

    /// Returns the candidates in the order in which they are ranked.
    ///
    /// The order is maintained incrementally, as nodes are inserted.
    #[inline]
    #[must_use]
    pub fn ranked(&self) -> &[Candidate] {
        &self.ranked
    }

    /// Takes all collected diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }

    /// Returns a mutable reference to the value parser registry.
    pub fn parsers_mut(&mut self) -> &mut Registry {
        &mut self.parsers
    }
}

#[allow(clippy::must_use_candidate)]
impl<T> Tree<T> {
    /// Returns the root node identifier.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the value parser registry.
    #[inline]
    pub fn parsers(&self) -> &Registry {
        &self.parsers
    }

    /// Returns the route tree options.
    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the collected diagnostics.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the number of nodes, excluding the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns whether there are no nodes besides the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Tree<T> {
    /// Returns the route with the given key, or an error.
    fn find_or_err(&self, key: &str) -> Result<NodeId> {
        self.find(key).ok_or_else(|| Error::NotFound { key: key.to_owned() })
    }

    /// Records a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    /// Creates all missing nodes along the given key.
    ///
    /// Each node is compiled before it's created, and if compilation fails,
    /// all nodes created so far are removed again.
    fn create(&mut self, key: &str) -> Result<NodeId> {
        let mut id = self.root;
        let mut created = Vec::new();
        let mut diagnostics = Vec::new();
        for segment in segments(key) {
            if let Some(&child) = self[id].children.get(segment) {
                id = child;
                continue;
            }

            // Compile node as a child of the current node
            let path = match self[id].key.as_str() {
                "" => segment.to_owned(),
                parent => format!("{parent}/{segment}"),
            };
            let kind = self.options.kind(segment);
            let result = self.compile(
                Some(&self[id].compiled),
                &path,
                segment,
                kind,
                &RouteOverride::default(),
            );
            let compiled = match result {
                Ok(compiled) => compiled,
                Err(err) => {
                    for id in created.into_iter().rev() {
                        self.detach(id);
                    }
                    self.report(Diagnostic::error(err.to_string(), key));
                    return Err(err);
                }
            };

            // Create node and link it to its parent
            let entry = self.nodes.vacant_entry();
            let child = NodeId(entry.key());
            let (compiled, warnings) = compiled;
            entry.insert(Node {
                id: child,
                key: path,
                segment: segment.to_owned(),
                kind,
                parent: Some(id),
                children: BTreeMap::new(),
                views: BTreeMap::new(),
                layers: Vec::new(),
                overrides: RouteOverride::default(),
                compiled,
                stamp: 0,
            });
            self.nodes[id.0].children.insert(segment.to_owned(), child);
            diagnostics.extend(warnings);
            created.push(child);
            id = child;
        }

        // Report diagnostics of created nodes
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
        Ok(id)
    }

    /// Removes the given node, which must not have children.
    fn detach(&mut self, id: NodeId) {
        let node = self.nodes.remove(id.0);
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.remove(&node.segment);
        }
        self.ranked.retain(|candidate| candidate.node != id);
    }

    /// Removes the given node and all ancestors that become empty.
    fn prune(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            if !self[id].is_prunable() {
                break;
            }
            current = self[id].parent;
            self.detach(id);
        }
    }

    /// Removes the given node if it became empty, or ranks it again.
    fn prune_or_rank(&mut self, id: NodeId) {
        if self[id].is_prunable() {
            self.prune(id);
        } else {
            self.rank(id);
        }
    }

    /// Merges the override layers of the given node.
    fn merge_layers(&mut self, id: NodeId) -> Vec<Diagnostic> {
        let node = &mut self.nodes[id.0];
        let mut diagnostics = Vec::new();
        let mut merged = RouteOverride::default();
        for (source, layer) in &node.layers {
            for field in merged.conflicts(layer) {
                let message = format!("conflicting `{field}` from `{source}`");
                let key = node.key.as_str();
                diagnostics.push(Diagnostic::warning(message, key));
            }
            merged = merged.merge(layer.clone());
        }
        node.overrides = merged;
        diagnostics
    }

    /// Merges the override layers of the given node, recompiles it with all
    /// descendants, and ranks them.
    fn apply_layers(&mut self, id: NodeId) -> Result {
        let previous = self[id].overrides.clone();
        let mut diagnostics = self.merge_layers(id);
        match self.recompile(id) {
            Ok(warnings) => diagnostics.extend(warnings),
            Err(err) => {
                self.nodes[id.0].overrides = previous;
                let key = self[id].key.clone();
                self.report(Diagnostic::error(err.to_string(), key));
                return Err(err);
            }
        }

        // Report diagnostics and rank nodes
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
        self.rank(id);
        Ok(())
    }

    /// Recompiles the given node with all descendants.
    ///
    /// Nodes are compiled in pre-order, so parents are compiled before their
    /// children. Nothing is changed unless all nodes compile.
    fn recompile(&mut self, id: NodeId) -> Result<Vec<Diagnostic>> {
        let ids: Vec<NodeId> = Iter::new(self, id).map(Node::id).collect();
        let mut compiled: HashMap<NodeId, Compiled> = HashMap::default();
        let mut diagnostics = Vec::new();
        for &id in &ids {
            let node = &self[id];
            let parent = node.parent.map(|parent| {
                compiled.get(&parent).unwrap_or(&self[parent].compiled)
            });
            let (result, warnings) = self.compile(
                parent,
                &node.key,
                &node.segment,
                node.kind,
                &node.overrides,
            )?;
            compiled.insert(id, result);
            diagnostics.extend(warnings);
        }

        // All nodes compiled, so commit
        for (id, result) in compiled {
            self.nodes[id.0].compiled = result;
        }
        Ok(diagnostics)
    }

    /// Ranks the given node and all descendants again.
    ///
    /// All candidates of the nodes are removed and inserted again. Nodes are
    /// stamped when they become matchable, and keep their stamp as long as
    /// they stay matchable, so registration order survives ranking.
    fn rank(&mut self, id: NodeId) {
        let ids: Vec<NodeId> = Iter::new(self, id).map(Node::id).collect();
        self.ranked.retain(|candidate| !ids.contains(&candidate.node));
        for id in ids {
            let matchable = self[id].is_matchable();
            let node = &mut self.nodes[id.0];
            if !matchable {
                node.stamp = 0;
                continue;
            }
            if node.stamp == 0 {
                self.stamp += 1;
                node.stamp = self.stamp;
            }

            // Insert candidates for path and aliases
            for candidate in self.candidates(id) {
                let index = self.insertion_index(candidate);
                self.ranked.insert(index, candidate);
            }
        }
    }

    /// Compiles a node from its segment and overrides.
    ///
    /// The path of a node is derived from its segment, unless overridden by
    /// a path template, which replaces the segment if relative, and the path
    /// of all ancestors if absolute. Aliases are inherited from the parent,
    /// unless the path is absolute.
    fn compile(
        &self, parent: Option<&Compiled>, key: &str, segment: &str, kind: Kind,
        overrides: &RouteOverride,
    ) -> Result<(Compiled, Vec<Diagnostic>)> {
        let mut diagnostics = Vec::new();
        let base = parent
            .map(|parent| parent.levels.as_slice())
            .unwrap_or_default();

        // Determine own levels and whether they replace the parent's path
        let (mut own, absolute) = match &overrides.path {
            Some(path) => {
                let segment = self.parse(key, path, true, &mut diagnostics)?;
                (segment.levels(), path.starts_with('/'))
            }
            None if kind == Kind::Path => {
                let parsed = self.parse(key, segment, false, &mut diagnostics)?;
                (parsed.levels(), false)
            }
            None => (Vec::new(), false),
        };
        for part in own.iter_mut().flatten() {
            if let SubSegment::Param(param) = part
                && let Some(parser) = overrides.params.path.get(&param.name)
            {
                param.parser = Some(parser.clone());
            }
        }

        // Compile path, and aliases of this node before inherited ones
        let levels = if absolute { own.clone() } else { join(base, &own) };
        let matcher = self.matcher(key, &levels)?;
        let mut aliases = Vec::new();
        for alias in &overrides.alias {
            let segment = self.parse(key, alias, true, &mut diagnostics)?;
            let levels = if alias.starts_with('/') {
                segment.levels()
            } else {
                let message =
                    format!("relative alias `{alias}` joined with parent path");
                diagnostics.push(Diagnostic::warning(message, key));
                join(base, &segment.levels())
            };
            let matcher = self.matcher(key, &levels)?;
            aliases.push(Alias { levels, matcher });
        }
        if let (Some(parent), false) = (parent, absolute) {
            for alias in &parent.aliases {
                let levels = join(&alias.levels, &own);
                let matcher = self.matcher(key, &levels)?;
                aliases.push(Alias { levels, matcher });
            }
        }

        // Derive name from key, unless overridden
        let name = match &overrides.name {
            Some(Name::Named(name)) => Some(name.clone()),
            Some(Name::Unnamed) => None,
            None => Some(self.options.name(key)),
        };

        // Return compiled node
        let compiled = Compiled {
            levels,
            matcher,
            aliases,
            query: overrides.query_matchers(),
            hash: overrides.hash_matcher(),
            name,
        };
        Ok((compiled, diagnostics))
    }

    /// Parses a file segment or path template.
    fn parse(
        &self, key: &str, raw: &str, template: bool,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Segment> {
        let options = &self.options.path;
        let result = if template {
            Segment::parse_path(raw, options)
        } else {
            Segment::parse_file(raw, options)
        };
        let segment = result.map_err(|source| Error::Segment {
            key: key.to_owned(),
            source,
        })?;

        // Surface parser warnings
        for warning in &segment.warnings {
            let Warning::EmptyName { segment, fallback } = warning;
            let message = format!(
                "empty parameter name in `{segment}`, using `{fallback}`"
            );
            diagnostics.push(Diagnostic::warning(message, key));
        }
        Ok(segment)
    }

    /// Compiles a path matcher for the given levels.
    fn matcher(
        &self, key: &str, levels: &[Vec<SubSegment>],
    ) -> Result<PathMatcher> {
        Pattern::compile(levels)
            .map(PathMatcher::new)
            .map_err(|source| Error::Pattern { key: key.to_owned(), source })
    }
}

// ----------------------------------------------------------------------------

impl Options {
    /// Returns the kind of node for the given segment.
    fn kind(&self, segment: &str) -> Kind {
        if self.index && segment == "index" {
            Kind::Index
        } else if self.groups
            && segment.starts_with('(')
            && segment.ends_with(')')
        {
            Kind::Group
        } else {
            Kind::Path
        }
    }

    /// Returns the default route name for the given key.
    ///
    /// Names are derived from keys by prefixing them with a slash, where an
    /// `index` segment is replaced with a trailing slash, e.g., `users/index`
    /// is named `/users/`, which distinguishes it from `users`.
    fn name(&self, key: &str) -> String {
        let mut segments: Vec<&str> = segments(key).collect();
        let index = self.index && segments.last() == Some(&"index");
        if index {
            segments.pop();
        }
        match (segments.is_empty(), index) {
            (true, _) => String::from("/"),
            (false, true) => format!("/{}/", segments.join("/")),
            (false, false) => format!("/{}", segments.join("/")),
        }
    }
}

impl Compiled {
    /// Creates the compiled root, which matches `/`.
    fn root() -> Self {
        let pattern = Pattern::compile(&[]).expect("invariant");
        Self {
            levels: Vec::new(),
            matcher: PathMatcher::new(pattern),
            aliases: Vec::new(),
            query: Vec::new(),
            hash: None,
            name: None,
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Options {
    /// Creates default route tree options.
    fn default() -> Self {
        Self {
            path: zensical_path::Options::default(),
            index: true,
            groups: true,
        }
    }
}

impl<T> Default for Tree<T> {
    /// Creates a route tree.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Tree<T> {
    type Output = Node<T>;

    /// Returns the route with the given identifier.
    ///
    /// # Panics
    ///
    /// Panics if the node doesn't exist.
    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a Node<T>;
    type IntoIter = Iter<'a, T>;

    /// Creates an iterator over all nodes in depth-first pre-order.
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns an iterator over the non-empty segments of a key.
fn segments(key: &str) -> impl Iterator<Item = &str> {
    key.split('/').filter(|segment| !segment.is_empty())
}

/// Joins two lists of levels.
fn join(a: &[Vec<SubSegment>], b: &[Vec<SubSegment>]) -> Vec<Vec<SubSegment>> {
    a.iter().chain(b).cloned().collect()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests;
