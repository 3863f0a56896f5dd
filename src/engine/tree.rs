//! Parse tree nodes and traversals
//!
//! A [`TreeNode`] never copies input text: it records a half-open span over
//! the input buffer it shares with the parse that produced it. Text is
//! materialized on request.
//!
//! # Traversals
//!
//! Three orders are available, each as a lazy iterator that can be created
//! again at any time to restart:
//!
//! - [`TreeNode::dfs`]: parents before children, children left to right
//! - [`TreeNode::bfs`]: level by level
//! - [`TreeNode::leaves_first`]: children before parents
//!
//! [`TreeNode::find`] and [`TreeNode::find_all`] search by rule name over any
//! of these orders.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Order used by traversal-driven searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Traversal {
    /// Pre-order, depth first
    #[default]
    DepthFirst,
    /// Level order
    BreadthFirst,
    /// Post-order, depth first
    LeavesFirst,
}

/// A node of a parse tree
#[derive(Clone)]
pub struct TreeNode {
    rule: Arc<str>,
    input: Arc<[char]>,
    start: usize,
    length: usize,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a childless node spanning `[start, start + length)`
    ///
    /// # Panics
    ///
    /// Panics if the span does not lie inside `input`.
    pub fn leaf(rule: Arc<str>, input: Arc<[char]>, start: usize, length: usize) -> Self {
        assert!(
            start + length <= input.len(),
            "span {}..{} of {:?} exceeds input length {}",
            start,
            start + length,
            rule,
            input.len()
        );
        Self {
            rule,
            input,
            start,
            length,
            children: Vec::new(),
        }
    }

    /// Create a node spanning from its first child's start to its last
    /// child's end
    ///
    /// With no children the node is zero-width at `start`.
    pub fn branch(
        rule: Arc<str>,
        input: Arc<[char]>,
        start: usize,
        children: Vec<TreeNode>,
    ) -> Self {
        let (start, length) = match (children.first(), children.last()) {
            (Some(first), Some(last)) => (first.start, last.end() - first.start),
            _ => (start, 0),
        };
        Self {
            rule,
            input,
            start,
            length,
            children,
        }
    }

    /// Name of the rule that produced this node
    #[inline]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Offset of the first character covered
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of characters covered
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Offset one past the last character covered
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// The full input this node points into
    #[inline]
    pub fn input(&self) -> &Arc<[char]> {
        &self.input
    }

    /// Characters covered by this node
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.input[self.start..self.end()]
    }

    /// Text covered by this node
    pub fn text(&self) -> String {
        self.chars().iter().collect()
    }

    /// Child nodes in order
    #[inline]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Child at `index`, if present
    #[inline]
    pub fn child_at(&self, index: usize) -> Option<&TreeNode> {
        self.children.get(index)
    }

    /// Number of children
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether the node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order iterator over this subtree
    pub fn dfs(&self) -> Dfs<'_> {
        Dfs { stack: vec![self] }
    }

    /// Level-order iterator over this subtree
    pub fn bfs(&self) -> Bfs<'_> {
        let mut queue = VecDeque::new();
        queue.push_back(self);
        Bfs { queue }
    }

    /// Post-order iterator over this subtree
    pub fn leaves_first(&self) -> LeavesFirst<'_> {
        LeavesFirst {
            stack: vec![(self, false)],
        }
    }

    /// Iterator over this subtree in the given order
    pub fn traverse(&self, order: Traversal) -> Traverse<'_> {
        match order {
            Traversal::DepthFirst => Traverse::DepthFirst(self.dfs()),
            Traversal::BreadthFirst => Traverse::BreadthFirst(self.bfs()),
            Traversal::LeavesFirst => Traverse::LeavesFirst(self.leaves_first()),
        }
    }

    /// First node produced by `rule` in the given order
    pub fn find(&self, rule: &str, order: Traversal) -> Option<&TreeNode> {
        self.traverse(order).find(|n| n.rule() == rule)
    }

    /// All nodes produced by `rule` in the given order
    pub fn find_all(&self, rule: &str, order: Traversal) -> Vec<&TreeNode> {
        self.traverse(order).filter(|n| n.rule() == rule).collect()
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule
            && self.start == other.start
            && self.length == other.length
            && self.children == other.children
    }
}

impl Eq for TreeNode {}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("rule", &self.rule)
            .field("start", &self.start)
            .field("length", &self.length)
            .field("text", &self.text())
            .field("children", &self.children)
            .finish()
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TreeNode", 5)?;
        s.serialize_field("rule", &*self.rule)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("length", &self.length)?;
        s.serialize_field("text", &self.text())?;
        s.serialize_field("children", &self.children)?;
        s.end()
    }
}

/// Pre-order traversal, see [`TreeNode::dfs`]
#[derive(Debug, Clone)]
pub struct Dfs<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Dfs<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Level-order traversal, see [`TreeNode::bfs`]
#[derive(Debug, Clone)]
pub struct Bfs<'a> {
    queue: VecDeque<&'a TreeNode>,
}

impl<'a> Iterator for Bfs<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter());
        Some(node)
    }
}

/// Post-order traversal, see [`TreeNode::leaves_first`]
#[derive(Debug, Clone)]
pub struct LeavesFirst<'a> {
    /// `(node, children already pushed)`
    stack: Vec<(&'a TreeNode, bool)>,
}

impl<'a> Iterator for LeavesFirst<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded || node.children.is_empty() {
                return Some(node);
            }
            self.stack.push((node, true));
            self.stack
                .extend(node.children.iter().rev().map(|child| (child, false)));
        }
    }
}

/// Traversal in a runtime-selected order, see [`TreeNode::traverse`]
#[derive(Debug, Clone)]
pub enum Traverse<'a> {
    /// Pre-order
    DepthFirst(Dfs<'a>),
    /// Level order
    BreadthFirst(Bfs<'a>),
    /// Post-order
    LeavesFirst(LeavesFirst<'a>),
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traverse::DepthFirst(it) => it.next(),
            Traverse::BreadthFirst(it) => it.next(),
            Traverse::LeavesFirst(it) => it.next(),
        }
    }
}
