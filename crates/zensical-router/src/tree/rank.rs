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

//! Route ranking.

use std::cmp::Ordering;
use zensical_path::Score;

use super::{NodeId, Tree};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Match candidate.
///
/// Every matchable node is a candidate for its canonical path, and for each
/// of its aliases, which are tried in the order of their specificity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Node identifier.
    pub node: NodeId,
    /// Alias index, or [`None`] for the canonical path.
    pub alias: Option<usize>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<T> Tree<T> {
    /// Returns the specificity score of the given candidate.
    pub(crate) fn score_of(&self, candidate: Candidate) -> &Score {
        let node = &self[candidate.node];
        node.matcher_for(candidate.alias).pattern().score()
    }

    /// Returns the ancestor before which the given candidate is ranked.
    ///
    /// This is the nearest matchable ancestor with the same score, so that
    /// index routes are tried before their parent.
    fn insertion_ancestor(&self, candidate: Candidate) -> Option<NodeId> {
        let score = self.score_of(candidate);
        self.ancestors(candidate.node).find(|&id| {
            let node = &self[id];
            node.is_matchable() && node.score() == score
        })
    }

    /// Returns the lineage of the given candidate.
    ///
    /// The lineage lists the stamps of the chain of insertion ancestors, from
    /// the outermost one down to the candidate itself, where aliases follow
    /// the canonical path of their node.
    fn lineage(&self, candidate: Candidate) -> Vec<(u64, usize)> {
        let alias = candidate.alias.map_or(0, |index| index + 1);
        let mut lineage = vec![(self[candidate.node].stamp, alias)];
        let mut current = candidate;
        while let Some(id) = self.insertion_ancestor(current) {
            lineage.push((self[id].stamp, 0));
            current = Candidate { node: id, alias: None };
        }
        lineage.reverse();
        lineage
    }

    /// Compares two candidates by rank.
    ///
    /// More specific candidates are ranked first. Candidates with the same
    /// score are ranked in registration order, except that candidates are
    /// ranked right before their insertion ancestor, after all candidates
    /// registered there earlier.
    fn compare(&self, a: Candidate, b: Candidate) -> Ordering {
        self.score_of(a).cmp(self.score_of(b)).then_with(|| {
            let (a, b) = (self.lineage(a), self.lineage(b));
            let mut iter = a.iter().zip(&b);
            match iter.find(|(x, y)| x != y) {
                Some((x, y)) => x.cmp(y),
                None => b.len().cmp(&a.len()),
            }
        })
    }

    /// Returns the index at which the given candidate is ranked.
    ///
    /// The index is found with a binary search over the ranked candidates,
    /// which must not contain the candidate.
    pub(crate) fn insertion_index(&self, candidate: Candidate) -> usize {
        self.ranked.partition_point(|&other| {
            self.compare(other, candidate) == Ordering::Less
        })
    }

    /// Returns the candidates of the given node, which must be matchable.
    pub(crate) fn candidates(
        &self, id: NodeId,
    ) -> impl Iterator<Item = Candidate> + use<T> {
        let aliases = self[id].compiled.aliases.len();
        let iter = (0..aliases).map(Some);
        [None]
            .into_iter()
            .chain(iter)
            .map(move |alias| Candidate { node: id, alias })
    }

    /// Returns all candidates, sorted once from scratch.
    ///
    /// This yields the same order as ranking candidates one by one.
    pub(crate) fn sorted(&self) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .iter()
            .filter(|node| node.is_matchable())
            .flat_map(|node| self.candidates(node.id()))
            .collect();
        candidates.sort_by(|a, b| self.compare(*a, *b));
        candidates
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::tree::{RouteOverride, Tree};

    /// Returns the full paths of the ranked candidates.
    fn ranked(tree: &Tree<()>) -> Vec<&str> {
        let iter = tree.ranked().iter().map(|candidate| {
            tree[candidate.node].matcher_for(candidate.alias).pattern().template()
        });
        iter.collect()
    }

    #[test]
    fn test_ranked_by_specificity() {
        let keys = [
            "a/[...rest]",
            "a/[[id]]",
            "a/[rest]+",
            "a/static",
            "a/[id]",
        ];

        // Ranking is independent of insertion order
        for offset in 0..keys.len() {
            let mut tree = Tree::new();
            for i in 0..keys.len() {
                tree.insert(keys[(i + offset) % keys.len()], "default", ())
                    .unwrap();
            }
            assert_eq!(ranked(&tree), vec![
                "/a/static",
                "/a/:id",
                "/a/:id?",
                "/a/:rest+",
                "/a/:rest(.*)",
            ]);
        }
    }

    #[test]
    fn test_ranked_index_before_parent() {
        let mut tree = Tree::new();
        tree.insert("users", "default", ()).unwrap();
        tree.insert("users/index", "default", ()).unwrap();
        tree.insert("users/[id]", "default", ()).unwrap();
        let keys: Vec<&str> = tree
            .ranked()
            .iter()
            .map(|candidate| tree[candidate.node].key())
            .collect();
        assert_eq!(keys, vec!["users/[id]", "users/index", "users"]);
    }

    #[test]
    fn test_ranked_in_registration_order() {
        let test_cases = vec![
            (vec!["b/[y]", "a/[x]"], vec!["b/[y]", "a/[x]"]),
            (vec!["a/[x]", "b/[y]"], vec!["a/[x]", "b/[y]"]),
            (vec!["a/[slug]", "a/[id]", "a"], vec!["a/[slug]", "a/[id]", "a"]),
            (vec!["a/[slug]", "b/[x]", "a"], vec!["a/[slug]", "b/[x]", "a"]),
            (vec!["a/index", "b", "a"], vec!["b", "a/index", "a"]),
        ];
        for (keys, expected) in test_cases {
            let mut tree = Tree::new();
            for key in &keys {
                tree.insert(key, "default", ()).unwrap();
            }
            let ranked: Vec<&str> = tree
                .ranked()
                .iter()
                .map(|candidate| tree[candidate.node].key())
                .collect();
            assert_eq!(ranked, expected, "Failed for: {keys:?}");
            assert_eq!(tree.sorted(), tree.ranked());
        }
    }

    #[test]
    fn test_ranked_after_parent_removed() {
        let mut tree = Tree::new();
        for key in ["a/[slug]", "b/[x]", "a", "a/[id]"] {
            tree.insert(key, "default", ()).unwrap();
        }
        tree.remove("a", "default").unwrap();
        let keys: Vec<&str> = tree
            .ranked()
            .iter()
            .map(|candidate| tree[candidate.node].key())
            .collect();
        assert_eq!(keys, vec!["a/[slug]", "b/[x]", "a/[id]"]);
        assert_eq!(tree.sorted(), tree.ranked());
    }

    #[test]
    fn test_sorted_agrees_with_ranked() {
        let mut tree = Tree::new();
        let keys = [
            "index",
            "[...all]",
            "users",
            "users/index",
            "users/(admin)/settings",
            "users/[id]",
            "users/[id]/index",
            "users/[id]/posts.[[page]]",
            "docs/[path]+",
            "(marketing)/about",
            "(marketing)/index",
        ];
        for key in keys {
            tree.insert(key, "default", ()).unwrap();
        }
        tree.set_override(
            "users/[id]",
            "users/[id]",
            RouteOverride { alias: vec!["/u/:id".into()], ..Default::default() },
        )
        .unwrap();
        tree.remove("users/index", "default").unwrap();
        tree.insert("users/index", "default", ()).unwrap();
        assert_eq!(tree.sorted(), tree.ranked());
    }
}
