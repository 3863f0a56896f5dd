//! Tree visitors
//!
//! Two ways to walk a parse tree by rule name:
//!
//! - Implement [`Visitor`] and match on [`TreeNode::rule`] in `visit`. This is
//!   the shape generated visitor skeletons take.
//! - Register closures on a [`RuleDispatcher`] when the set of handled rules
//!   is only known at runtime.
//!
//! In both, nodes without a handler go to an "unknown" fallback that by
//! default descends into the children.

use super::tree::TreeNode;
use super::NameMap;

/// Visitor over a parse tree
///
/// ```rust
/// use pegloom::{GrammarBuilder, TreeNode, Visitor, walk};
///
/// struct Letters(String);
///
/// impl Visitor for Letters {
///     fn visit(&mut self, node: &TreeNode) {
///         match node.rule() {
///             "letter" => self.0.push_str(&node.text()),
///             _ => self.visit_unknown(node),
///         }
///     }
/// }
///
/// let mut g = GrammarBuilder::new();
/// g.set_root("word").plus("word", "letter").chr("letter", "az").range("az", 'a', 'z');
/// let grammar = g.build().unwrap();
/// let output = grammar.new_parser().parse("abc").unwrap();
///
/// let mut letters = Letters(String::new());
/// walk(&mut letters, output.parse_tree().unwrap());
/// assert_eq!(letters.0, "abc");
/// ```
pub trait Visitor {
    /// Handle `node`; the default sends it to [`visit_unknown`](Visitor::visit_unknown)
    fn visit(&mut self, node: &TreeNode) {
        self.visit_unknown(node);
    }

    /// Fallback for nodes without a dedicated handler
    fn visit_unknown(&mut self, node: &TreeNode) {
        self.visit_children(node);
    }

    /// Visit every child in order
    fn visit_children(&mut self, node: &TreeNode) {
        for child in node.children() {
            self.visit(child);
        }
    }
}

/// Start `visitor` at `root`
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, root: &TreeNode) {
    visitor.visit(root);
}

type Handler<C> = Box<dyn Fn(&RuleDispatcher<C>, &mut C, &TreeNode) + Send + Sync>;

/// Routes nodes to per-rule closures
///
/// Handlers receive the dispatcher so they can continue the walk, and a
/// caller-owned context for their results.
///
/// ```rust
/// use pegloom::{GrammarBuilder, RuleDispatcher};
///
/// let mut g = GrammarBuilder::new();
/// g.set_root("digits").plus("digits", "digit").chr("digit", "d").range("d", '0', '9');
/// let grammar = g.build().unwrap();
/// let output = grammar.new_parser().parse("123").unwrap();
///
/// let sum = RuleDispatcher::new().on("digit", |_, total: &mut u32, node| {
///     *total += node.text().parse::<u32>().unwrap();
/// });
/// let mut total = 0;
/// sum.visit(&mut total, output.parse_tree().unwrap());
/// assert_eq!(total, 6);
/// ```
pub struct RuleDispatcher<C> {
    handlers: NameMap<Handler<C>>,
    unknown: Option<Handler<C>>,
}

impl<C> Default for RuleDispatcher<C> {
    fn default() -> Self {
        Self {
            handlers: NameMap::default(),
            unknown: None,
        }
    }
}

impl<C> RuleDispatcher<C> {
    /// Dispatcher without handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle nodes produced by `rule`
    pub fn on<F>(mut self, rule: &str, handler: F) -> Self
    where
        F: Fn(&RuleDispatcher<C>, &mut C, &TreeNode) + Send + Sync + 'static,
    {
        self.handlers.insert(rule.to_string(), Box::new(handler));
        self
    }

    /// Replace the fallback for unhandled rules
    pub fn on_unknown<F>(mut self, handler: F) -> Self
    where
        F: Fn(&RuleDispatcher<C>, &mut C, &TreeNode) + Send + Sync + 'static,
    {
        self.unknown = Some(Box::new(handler));
        self
    }

    /// Whether `rule` has a handler
    pub fn handles(&self, rule: &str) -> bool {
        self.handlers.contains_key(rule)
    }

    /// Route `node` to its handler
    pub fn visit(&self, ctx: &mut C, node: &TreeNode) {
        match self.handlers.get(node.rule()) {
            Some(handler) => handler(self, ctx, node),
            None => self.visit_unknown(ctx, node),
        }
    }

    /// Fallback: the registered unknown handler, or a walk over the children
    pub fn visit_unknown(&self, ctx: &mut C, node: &TreeNode) {
        match &self.unknown {
            Some(handler) => handler(self, ctx, node),
            None => self.visit_children(ctx, node),
        }
    }

    /// Visit every child in order
    pub fn visit_children(&self, ctx: &mut C, node: &TreeNode) {
        for child in node.children() {
            self.visit(ctx, child);
        }
    }
}
