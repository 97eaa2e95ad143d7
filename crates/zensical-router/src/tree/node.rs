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

//! Route node.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use zensical_path::{Param, Score, SubSegment};

use crate::matcher::{HashMatcher, PathMatcher, QueryMatcher};

use super::overrides::RouteOverride;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Route node kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Root node.
    Root,
    /// Node contributing its segment to the path.
    Path,
    /// Index node, which adds nothing to the path of its parent.
    Index,
    /// Group node, which organizes routes without adding to the path.
    Group,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route node identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// Route node.
///
/// Nodes are owned by the [`Tree`][], and refer to their parent and children
/// by [`NodeId`]. Each node carries its view targets, its override layers and
/// what is compiled from both, i.e., its path matcher, which includes the
/// path of all ancestors, its aliases, query and hash matchers, and name.
///
/// [`Tree`]: crate::Tree
#[derive(Debug)]
pub struct Node<T> {
    /// Node identifier.
    pub(crate) id: NodeId,
    /// Route key.
    pub(crate) key: String,
    /// Raw segment.
    pub(crate) segment: String,
    /// Node kind.
    pub(crate) kind: Kind,
    /// Parent node, if any.
    pub(crate) parent: Option<NodeId>,
    /// Child nodes, by raw segment.
    pub(crate) children: BTreeMap<String, NodeId>,
    /// View targets, by view name.
    pub(crate) views: BTreeMap<String, T>,
    /// Override layers, by source.
    pub(crate) layers: Vec<(String, RouteOverride)>,
    /// Merged override layers.
    pub(crate) overrides: RouteOverride,
    /// Compiled route.
    pub(crate) compiled: Compiled,
    /// Registration stamp, or zero if not matchable.
    pub(crate) stamp: u64,
}

/// Compiled route.
#[derive(Clone, Debug)]
pub(crate) struct Compiled {
    /// Path levels from the root.
    pub levels: Vec<Vec<SubSegment>>,
    /// Path matcher.
    pub matcher: PathMatcher,
    /// Alias routes.
    pub aliases: Vec<Alias>,
    /// Query matchers.
    pub query: Vec<QueryMatcher>,
    /// Hash matcher.
    pub hash: Option<HashMatcher>,
    /// Route name.
    pub name: Option<String>,
}

/// Compiled alias route.
#[derive(Clone, Debug)]
pub(crate) struct Alias {
    /// Path levels from the root.
    pub levels: Vec<Vec<SubSegment>>,
    /// Path matcher.
    pub matcher: PathMatcher,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Node<T> {
    /// Returns the path matcher for the canonical path or an alias.
    pub(crate) fn matcher_for(&self, alias: Option<usize>) -> &PathMatcher {
        alias
            .and_then(|index| self.compiled.aliases.get(index))
            .map_or(&self.compiled.matcher, |alias| &alias.matcher)
    }

    /// Returns whether the node can be removed without losing anything.
    pub(crate) fn is_prunable(&self) -> bool {
        self.kind != Kind::Root
            && self.views.is_empty()
            && self.layers.is_empty()
            && self.children.is_empty()
    }

    /// Returns the view target for the given view name.
    pub fn view<V>(&self, name: V) -> Option<&T>
    where
        V: AsRef<str>,
    {
        self.views.get(name.as_ref())
    }

    /// Returns an iterator over the child node identifiers.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.children.values().copied()
    }

    /// Returns an iterator over the alias path templates.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        let iter = self.compiled.aliases.iter();
        iter.map(|alias| alias.matcher.pattern().template())
    }

    /// Returns an iterator over the override layers and their sources.
    pub fn layers(&self) -> impl Iterator<Item = (&str, &RouteOverride)> {
        let iter = self.layers.iter();
        iter.map(|(source, overrides)| (source.as_str(), overrides))
    }
}

#[allow(clippy::must_use_candidate)]
impl<T> Node<T> {
    /// Returns the node identifier.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the route key, e.g., `users/[id]`.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the raw segment, e.g., `[id]`.
    #[inline]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Returns the node kind.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the parent node identifier, if any.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the view targets.
    #[inline]
    pub fn views(&self) -> &BTreeMap<String, T> {
        &self.views
    }

    /// Returns the route name, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.compiled.name.as_deref()
    }

    /// Returns the path template from the root, e.g., `/users/:id`.
    #[inline]
    pub fn full_path(&self) -> &str {
        self.compiled.matcher.pattern().template()
    }

    /// Returns the path parameters from the root.
    #[inline]
    pub fn params(&self) -> &[Param] {
        self.compiled.matcher.params()
    }

    /// Returns the metadata.
    #[inline]
    pub fn meta(&self) -> Option<&Value> {
        self.overrides.meta.as_ref()
    }

    /// Returns the merged overrides.
    #[inline]
    pub fn overrides(&self) -> &RouteOverride {
        &self.overrides
    }

    /// Returns the path matcher.
    #[inline]
    pub fn matcher(&self) -> &PathMatcher {
        &self.compiled.matcher
    }

    /// Returns the query matchers declared on this node.
    #[inline]
    pub fn query_matchers(&self) -> &[QueryMatcher] {
        &self.compiled.query
    }

    /// Returns the hash matcher declared on this node, if any.
    #[inline]
    pub fn hash_matcher(&self) -> Option<&HashMatcher> {
        self.compiled.hash.as_ref()
    }

    /// Returns the specificity score of the path.
    #[inline]
    pub fn score(&self) -> &Score {
        self.compiled.matcher.pattern().score()
    }

    /// Returns whether the node has view targets, and can thus be matched.
    #[inline]
    pub fn is_matchable(&self) -> bool {
        !self.views.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for NodeId {
    /// Formats the node identifier for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
