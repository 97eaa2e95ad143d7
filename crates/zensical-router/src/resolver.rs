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

//! Location resolver.

use ahash::HashMap;
use std::fmt;
use zensical_path::encoding::normalize;

use super::diagnostic::Diagnostic;
use super::location::{self, Location, Query};
use super::matcher::{Matcher, Miss};
use super::params::Params;
use super::tree::{Candidate, Node, NodeId, Tree};

mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Location resolver.
///
/// Resolvers snapshot the ranked candidates of a [`Tree`], and index matchable
/// routes by name. Paths are resolved by trying all candidates in order, and
/// the first one whose path, query and hash matchers accept the location wins.
/// Named locations are looked up directly, built, and then checked against
/// the path matcher of the route, so that the parameters of the result are
/// always the ones that the built path resolves to.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use zensical_router::{Location, Resolver, Tree};
///
/// // Create tree and insert routes
/// let mut tree = Tree::new();
/// tree.insert("users/[id]", "default", "user.html")?;
///
/// // Create resolver and resolve path
/// let resolver = Resolver::new(&tree);
/// let resolved = resolver.resolve("/users/42?tab=posts#bio", None)?;
/// assert_eq!(resolved.name.as_deref(), Some("/users/[id]"));
/// assert_eq!(resolved.params.get("id").unwrap(), "42");
///
/// // Resolve named location
/// let location = Location::named("/users/[id]").param("id", "7");
/// let resolved = resolver.resolve(location, None)?;
/// assert_eq!(resolved.full_path, "/users/7");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Resolver<'a, T> {
    /// Route tree.
    tree: &'a Tree<T>,
    /// Candidates in match order.
    order: Vec<Candidate>,
    /// Routes by name.
    names: HashMap<String, NodeId>,
    /// Collected diagnostics.
    diagnostics: Vec<Diagnostic>,
}

/// Resolved location.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedLocation {
    /// Route name, if any.
    pub name: Option<String>,
    /// Path with query string and hash.
    pub full_path: String,
    /// Path.
    pub path: String,
    /// Query string.
    pub query: Query,
    /// Hash, including the leading `#`, or empty.
    pub hash: String,
    /// Decoded parameters from path, query string and hash.
    pub params: Params,
    /// Chain of matched routes, from the outermost to the matched route.
    pub matched: Vec<NodeId>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a, T> Resolver<'a, T> {
    /// Creates a resolver using the incrementally ranked candidates.
    #[must_use]
    pub fn new(tree: &'a Tree<T>) -> Self {
        Self::with_order(tree, tree.ranked().to_vec())
    }

    /// Creates a resolver by sorting all candidates at once.
    ///
    /// The order is the same as the one maintained by the tree, but derived
    /// from scratch, which is useful when routes were loaded in bulk.
    #[must_use]
    pub fn sorted(tree: &'a Tree<T>) -> Self {
        Self::with_order(tree, tree.sorted())
    }

    /// Creates a resolver with the given order, and indexes routes by name.
    fn with_order(tree: &'a Tree<T>, order: Vec<Candidate>) -> Self {
        let mut resolver = Self {
            tree,
            order,
            names: HashMap::default(),
            diagnostics: Vec::new(),
        };

        // Index names of matchable routes, where the first one wins
        let ids: Vec<NodeId> = resolver.records().map(Node::id).collect();
        for id in ids {
            let node = &tree[id];
            if let Some(name) = node.name() {
                if resolver.names.contains_key(name) {
                    let message = format!("duplicate route name `{name}`");
                    resolver.report(Diagnostic::warning(message, node.key()));
                } else {
                    resolver.names.insert(name.to_owned(), id);
                }
            }
            resolver.check_parsers(node);
        }
        resolver
    }

    /// Resolves a location.
    ///
    /// Relative paths and relative locations are resolved against the given
    /// current location. A path that no route matches is not an error, but
    /// results in a location without matched routes. If the matched route of
    /// the current location is no longer part of the tree, its path is
    /// resolved again instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] if a named location refers to a name
    /// that's not registered, [`Error::RelativeWithoutCurrent`] if there's
    /// no current location for a relative one, or an [`Error`] if building
    /// the path from the given parameters fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn resolve<L>(
        &self, location: L, current: Option<&ResolvedLocation>,
    ) -> Result<ResolvedLocation>
    where
        L: Into<Location>,
    {
        let location = location.into();
        if let Some(name) = &location.name {
            let id = self.lookup(name)?;
            let params = inherit(&self.tree[id], current, location.params);
            let (query, hash) = (location.query, location.hash);
            return self.resolve_node(id, &params, query, hash);
        }

        // Resolve path, which might be relative to the current path
        if let Some(path) = &location.path {
            let path = if path.starts_with('/') {
                path.clone()
            } else {
                let current = current.ok_or(Error::RelativeWithoutCurrent)?;
                location::resolve_relative(path, &current.path)
            };
            let query = location.query.unwrap_or_default();
            let hash = location.hash.unwrap_or_default();
            return Ok(self.resolve_path(&path, query, hash));
        }

        // Resolve relative location, inheriting from the current location
        let current = current.ok_or(Error::RelativeWithoutCurrent)?;
        let query = location.query.unwrap_or_else(|| current.query.clone());
        let hash = location.hash.unwrap_or_else(|| current.hash.clone());
        match self.current_node(current) {
            Some(id) => {
                let mut params = current.params.clone();
                params.extend(location.params);
                self.resolve_node(id, &params, Some(query), Some(hash))
            }
            None => Ok(self.resolve_path(&current.path, query, hash)),
        }
    }

    /// Builds the full path for a named location.
    ///
    /// Other than [`Resolver::resolve`], the built path isn't checked against
    /// the path matcher of the route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] if the name is not registered, or an
    /// [`Error`] if a required parameter is missing.
    pub fn build(
        &self, location: &Location, current: Option<&ResolvedLocation>,
    ) -> Result<String> {
        let name = location.name.as_deref().unwrap_or_default();
        let id = self.lookup(name)?;
        let params = inherit(&self.tree[id], current, location.params.clone());
        let query = location.query.clone();
        let (path, query, hash) =
            self.build_node(id, &params, query, location.hash.clone())?;
        Ok(format_full_path(&path, &query, &hash))
    }

    /// Returns an iterator over all matchable routes in match order.
    ///
    /// Routes with aliases are only returned once, at the position of their
    /// most specific path.
    pub fn records(&self) -> impl Iterator<Item = &'a Node<T>> {
        let tree = self.tree;
        let mut seen = Vec::new();
        self.order
            .iter()
            .filter(move |candidate| {
                let first = !seen.contains(&candidate.node);
                if first {
                    seen.push(candidate.node);
                }
                first
            })
            .map(move |candidate| &tree[candidate.node])
    }

    /// Returns the route with the given name.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&'a Node<T>> {
        let tree = self.tree;
        self.names.get(name).map(|&id| &tree[id])
    }

    /// Returns the collected diagnostics.
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl<T> Resolver<'_, T> {
    /// Returns the route with the given name, or an error.
    fn lookup(&self, name: &str) -> Result<NodeId> {
        self.names.get(name).copied().ok_or_else(|| Error::UnknownName {
            name: name.to_owned(),
        })
    }

    /// Returns the matched route of the given location, if it's still part
    /// of the tree with the same chain and name.
    fn current_node(&self, current: &ResolvedLocation) -> Option<NodeId> {
        let id = current.node()?;
        let node = self.tree.node(id)?;
        let valid = node.is_matchable()
            && node.name() == current.name.as_deref()
            && self.tree.chain(id) == current.matched;
        valid.then_some(id)
    }

    /// Records a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    /// Reports parser identifiers of the given route that aren't registered,
    /// as their values are passed through undecoded.
    fn check_parsers(&mut self, node: &Node<T>) {
        let tree = self.tree;
        let parsers = tree.parsers();
        let path = node.params().iter().map(|param| param.parser.as_deref());
        let query = tree.chain(node.id()).into_iter().flat_map(|id| {
            let node = &tree[id];
            let query = node.query_matchers().iter().map(|m| m.parser_id());
            let hash = node.hash_matcher().map(|m| m.parser_id());
            query.chain(hash).collect::<Vec<_>>()
        });

        // Collect unknown parser identifiers
        let mut unknown: Vec<&str> = path
            .chain(query)
            .flatten()
            .filter(|&id| !parsers.contains(id))
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        for id in unknown {
            let message = format!("unknown parser `{id}`, passing through");
            self.report(Diagnostic::warning(message, node.key()));
        }
    }

    /// Resolves a path by trying all candidates in order.
    fn resolve_path(
        &self, path: &str, query: Query, hash: String,
    ) -> ResolvedLocation {
        let normalized = normalize(path).into_owned();
        for candidate in &self.order {
            let node = &self.tree[candidate.node];
            let parsers = self.tree.parsers();
            let matcher = node.matcher_for(candidate.alias);
            let Ok(mut params) = matcher.matches(normalized.as_str(), parsers)
            else {
                continue;
            };

            // Match query string and hash against the chain
            let matched = self.tree.chain(candidate.node);
            let Ok(extra) = self.match_chain(&matched, &query, &hash) else {
                continue;
            };
            params.extend(extra);
            return ResolvedLocation {
                name: node.name().map(ToOwned::to_owned),
                full_path: format_full_path(&normalized, &query, &hash),
                path: normalized,
                query,
                hash,
                params,
                matched,
            };
        }

        // No route matched, so keep the location as it was given
        ResolvedLocation {
            full_path: format_full_path(path, &query, &hash),
            path: path.to_owned(),
            query,
            hash,
            ..ResolvedLocation::default()
        }
    }

    /// Resolves a location for the given route by building and matching it.
    fn resolve_node(
        &self, id: NodeId, params: &Params, query: Option<Query>,
        hash: Option<String>,
    ) -> Result<ResolvedLocation> {
        let node = &self.tree[id];
        let (path, query, hash) = self.build_node(id, params, query, hash)?;

        // Match the built location, so parameters are consistent with it
        let invalid = || Error::InvalidParams {
            name: node.name().unwrap_or(node.key()).to_owned(),
        };
        let parsers = self.tree.parsers();
        let mut params = node
            .matcher()
            .matches(path.as_str(), parsers)
            .map_err(|_| invalid())?;
        let matched = self.tree.chain(id);
        let extra = self
            .match_chain(&matched, &query, &hash)
            .map_err(|_| invalid())?;
        params.extend(extra);

        // Return resolved location
        Ok(ResolvedLocation {
            name: node.name().map(ToOwned::to_owned),
            full_path: format_full_path(&path, &query, &hash),
            path,
            query,
            hash,
            params,
            matched,
        })
    }

    /// Builds path, query string and hash for the given route.
    ///
    /// Query parameters and hash built from the parameters take precedence
    /// over the given ones.
    fn build_node(
        &self, id: NodeId, params: &Params, query: Option<Query>,
        hash: Option<String>,
    ) -> Result<(String, Query, String)> {
        let parsers = self.tree.parsers();
        let path = self.tree[id].matcher().build(params, parsers)?;
        let path = normalize(&path).into_owned();

        // Build query string and hash from the chain
        let mut query = query.unwrap_or_default();
        let mut hash = hash.unwrap_or_default();
        for id in self.tree.chain(id) {
            let node = &self.tree[id];
            for matcher in node.query_matchers() {
                let pairs = matcher.build(params, parsers)?;
                if !pairs.is_empty() {
                    let values = pairs.into_iter().map(|(_, value)| value);
                    query.set(matcher.query_key(), values);
                }
            }
            if let Some(matcher) = node.hash_matcher()
                && let Some(value) = matcher.build(params, parsers)?
            {
                hash = format!("#{value}");
            }
        }
        Ok((path, query, hash))
    }

    /// Matches query string and hash against the matchers of the chain.
    ///
    /// Query matchers are applied from the outermost to the matched route,
    /// while only the innermost hash matcher is applied.
    fn match_chain(
        &self, chain: &[NodeId], query: &Query, hash: &str,
    ) -> std::result::Result<Params, Miss> {
        let parsers = self.tree.parsers();
        let mut params = Params::new();
        let mut hash_matcher = None;
        for &id in chain {
            let node = &self.tree[id];
            for matcher in node.query_matchers() {
                params.extend(matcher.matches(query, parsers)?);
            }
            hash_matcher = node.hash_matcher().or(hash_matcher);
        }
        if let Some(matcher) = hash_matcher {
            params.extend(matcher.matches(hash, parsers)?);
        }
        Ok(params)
    }
}

#[allow(clippy::must_use_candidate)]
impl ResolvedLocation {
    /// Returns whether a route matched.
    #[inline]
    pub fn is_match(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Returns the matched route, if any.
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        self.matched.last().copied()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for ResolvedLocation {
    /// Formats the resolved location for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Merges the given parameters over the path parameters of the current
/// location that the route declares.
fn inherit<T>(
    node: &Node<T>, current: Option<&ResolvedLocation>, params: Params,
) -> Params {
    let mut inherited = Params::new();
    if let Some(current) = current {
        for param in node.params() {
            if let Some(value) = current.params.get(&param.name) {
                inherited.insert(param.name.clone(), value.clone());
            }
        }
    }
    inherited.extend(params);
    inherited
}

/// Formats path, query string and hash as a full path.
fn format_full_path(path: &str, query: &Query, hash: &str) -> String {
    if query.is_empty() {
        format!("{path}{hash}")
    } else {
        format!("{path}?{query}{hash}")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
