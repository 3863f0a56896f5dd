//! Rule representation
//!
//! A [`Grammar`](super::grammar::Grammar) stores its rules in a flat arena.
//! Rules refer to their operands through [`RuleId`] handles, so mutually and
//! self-recursive rules need no shared ownership.

use super::char_class::CharClass;
use std::fmt;
use std::sync::Arc;

/// Name of the end-of-input rule every grammar carries
pub const END_RULE: &str = "END";

/// Handle of a rule inside its grammar's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) usize);

impl RuleId {
    /// Arena index of the rule
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rule variants
///
/// The set is closed; matching dispatches on it with an exhaustive `match`.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Exact character sequence (may be empty)
    Literal(Box<[char]>),
    /// One character accepted by a class
    Char(Arc<CharClass>),
    /// All operands in order
    Sequence(Vec<RuleId>),
    /// First operand that matches
    Choice(Vec<RuleId>),
    /// `minimum..=maximum` matches of one item; `None` is unbounded
    Repetition {
        /// Repeated rule
        item: RuleId,
        /// Mandatory matches
        minimum: usize,
        /// Upper bound
        maximum: Option<usize>,
    },
    /// Positive lookahead
    And(RuleId),
    /// Negative lookahead
    Not(RuleId),
    /// Succeeds only when no input remains
    End,
    /// Direct-left-recursive sequence, `base shared+` reduced left-branching
    ///
    /// `shared` is a hidden [`RuleKind::Sequence`] holding the tail operands.
    SequenceDlr {
        /// Rule matched once at the start
        base: RuleId,
        /// Tail sequence matched repeatedly
        shared: RuleId,
    },
}

impl RuleKind {
    /// Short label for the variant
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::Literal(_) => "str",
            RuleKind::Char(_) => "chr",
            RuleKind::Sequence(_) => "sequence",
            RuleKind::Choice(_) => "choose",
            RuleKind::Repetition { .. } => "repeat",
            RuleKind::And(_) => "and",
            RuleKind::Not(_) => "not",
            RuleKind::End => "end",
            RuleKind::SequenceDlr { .. } => "sequence-dlr",
        }
    }
}

/// A named rule
#[derive(Debug, Clone)]
pub struct Rule {
    name: Arc<str>,
    kind: RuleKind,
}

impl Rule {
    pub(crate) fn new(name: Arc<str>, kind: RuleKind) -> Self {
        Self { name, kind }
    }

    /// Rule name, unique within its grammar
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the name, as stored in tree nodes and trace events
    #[inline]
    pub fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    /// Variant and operands
    #[inline]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Whether a successful match can move the cursor
    ///
    /// False for the predicates (`and`, `not`, `END`).
    pub fn advances(&self) -> bool {
        !matches!(
            self.kind,
            RuleKind::And(_) | RuleKind::Not(_) | RuleKind::End
        )
    }

    /// Operand handles in declaration order
    pub fn operands(&self) -> Vec<RuleId> {
        match &self.kind {
            RuleKind::Literal(_) | RuleKind::Char(_) | RuleKind::End => Vec::new(),
            RuleKind::Sequence(ids) | RuleKind::Choice(ids) => ids.clone(),
            RuleKind::Repetition { item, .. } => vec![*item],
            RuleKind::And(item) | RuleKind::Not(item) => vec![*item],
            RuleKind::SequenceDlr { base, shared } => vec![*base, *shared],
        }
    }
}
