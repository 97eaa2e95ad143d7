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

//! Route tree iterators.

use std::collections::btree_map::Values;

use super::{Node, NodeId, Tree};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Route tree iterator, visiting nodes in depth-first pre-order.
pub struct Iter<'a, T> {
    /// Route tree.
    tree: &'a Tree<T>,
    /// Node to visit first.
    start: Option<NodeId>,
    /// Iteration stack.
    stack: Vec<Values<'a, String, NodeId>>,
}

/// Ancestor iterator, visiting the parent chain from the parent upwards.
pub struct Ancestors<'a, T> {
    /// Route tree.
    tree: &'a Tree<T>,
    /// Current node.
    current: Option<NodeId>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a, T> Iter<'a, T> {
    /// Creates a route tree iterator starting at the given node.
    pub(crate) fn new(tree: &'a Tree<T>, id: NodeId) -> Self {
        Self { tree, start: Some(id), stack: Vec::new() }
    }
}

impl<'a, T> Ancestors<'a, T> {
    /// Creates an ancestor iterator for the given node.
    pub(crate) fn new(tree: &'a Tree<T>, id: NodeId) -> Self {
        Self { tree, current: tree[id].parent }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Node<T>;

    /// Advances the iterator and returns the next node.
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(id) = self.start.take() {
            let node = &self.tree[id];
            self.stack.push(node.children.values());
            return Some(node);
        }

        // Visit children before siblings
        while let Some(children) = self.stack.last_mut() {
            if let Some(&id) = children.next() {
                let node = &self.tree[id];
                self.stack.push(node.children.values());
                return Some(node);
            }
            self.stack.pop();
        }

        // No more nodes
        None
    }
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = NodeId;

    /// Advances the iterator and returns the next ancestor.
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree[id].parent;
        Some(id)
    }
}
