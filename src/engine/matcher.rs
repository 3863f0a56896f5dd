//! Rule interpretation
//!
//! One function per [`RuleKind`] variant. Every attempt follows the same
//! protocol:
//!
//! 1. `state.begin` records a `Begin` event and yields the start position.
//! 2. On success the cursor is past the consumed span (predicates rewind it)
//!    and `state.succeed` records a `Success` event.
//! 3. On failure `state.fail` records a `Fail` event and restores the cursor
//!    to the start position.
//!
//! `Err` is reserved for aborting the whole attempt (recursion limit); it is
//! never used for ordinary non-matches.

use super::char_class::CharClass;
use super::error::ParseError;
use super::grammar::Grammar;
use super::rule::{Rule, RuleId, RuleKind};
use super::state::State;
use super::tree::TreeNode;
use std::sync::Arc;

/// Outcome of one rule attempt
pub(crate) type MatchResult = Result<Option<TreeNode>, ParseError>;

/// Interprets the rules of one grammar
pub(crate) struct Matcher<'g> {
    grammar: &'g Grammar,
    max_depth: usize,
}

impl<'g> Matcher<'g> {
    pub(crate) fn new(grammar: &'g Grammar, max_depth: usize) -> Self {
        Self { grammar, max_depth }
    }

    pub(crate) fn match_rule(&self, id: RuleId, state: &mut State) -> MatchResult {
        state.enter(self.max_depth)?;

        let rule = self.grammar.rule_at(id);
        let result = match rule.kind() {
            RuleKind::Literal(literal) => Ok(self.match_literal(rule, literal, state)),
            RuleKind::Char(class) => Ok(self.match_char(rule, class, state)),
            RuleKind::Sequence(operands) => self.match_sequence(rule, operands, state),
            RuleKind::Choice(options) => self.match_choice(rule, options, state),
            RuleKind::Repetition {
                item,
                minimum,
                maximum,
            } => self.match_repetition(rule, *item, *minimum, *maximum, state),
            RuleKind::And(item) => self.match_and(rule, *item, state),
            RuleKind::Not(item) => self.match_not(rule, *item, state),
            RuleKind::End => Ok(self.match_end(rule, state)),
            RuleKind::SequenceDlr { base, shared } => {
                self.match_sequence_dlr(rule, *base, *shared, state)
            }
        };

        state.exit();
        result
    }

    fn match_literal(&self, rule: &Rule, literal: &[char], state: &mut State) -> Option<TreeNode> {
        let name = rule.name_arc();
        let start = state.begin(name);

        for &expected in literal {
            if state.next() != Some(expected) {
                state.fail(name, start);
                return None;
            }
        }

        state.succeed(name);
        Some(TreeNode::leaf(
            Arc::clone(name),
            Arc::clone(state.input()),
            start,
            literal.len(),
        ))
    }

    fn match_char(&self, rule: &Rule, class: &CharClass, state: &mut State) -> Option<TreeNode> {
        let name = rule.name_arc();
        let start = state.begin(name);

        match state.next() {
            Some(c) if class.matches(c) => {
                state.succeed(name);
                Some(TreeNode::leaf(
                    Arc::clone(name),
                    Arc::clone(state.input()),
                    start,
                    1,
                ))
            }
            _ => {
                state.fail(name, start);
                None
            }
        }
    }

    fn match_sequence(&self, rule: &Rule, operands: &[RuleId], state: &mut State) -> MatchResult {
        let name = rule.name_arc();
        let start = state.begin(name);

        let mut children = Vec::with_capacity(operands.len());
        for &operand in operands {
            match self.match_rule(operand, state)? {
                Some(node) => children.push(node),
                None => {
                    state.fail(name, start);
                    return Ok(None);
                }
            }
        }

        state.succeed(name);
        Ok(Some(self.branch(name, state, start, children)))
    }

    fn match_choice(&self, rule: &Rule, options: &[RuleId], state: &mut State) -> MatchResult {
        let name = rule.name_arc();
        let start = state.begin(name);

        for &option in options {
            if let Some(node) = self.match_rule(option, state)? {
                state.succeed(name);
                return Ok(Some(self.branch(name, state, start, vec![node])));
            }
        }

        state.fail(name, start);
        Ok(None)
    }

    fn match_repetition(
        &self,
        rule: &Rule,
        item: RuleId,
        minimum: usize,
        maximum: Option<usize>,
        state: &mut State,
    ) -> MatchResult {
        let name = rule.name_arc();
        let start = state.begin(name);

        let mut children = Vec::new();
        for _ in 0..minimum {
            match self.match_rule(item, state)? {
                Some(node) => children.push(node),
                None => {
                    state.fail(name, start);
                    return Ok(None);
                }
            }
        }

        // Optional tail stops at end of input so zero-width items cannot spin there
        let maximum = maximum.unwrap_or(usize::MAX);
        while children.len() < maximum && state.remaining() > 0 {
            match self.match_rule(item, state)? {
                Some(node) => children.push(node),
                None => break,
            }
        }

        state.succeed(name);
        Ok(Some(self.branch(name, state, start, children)))
    }

    fn match_and(&self, rule: &Rule, item: RuleId, state: &mut State) -> MatchResult {
        let name = rule.name_arc();
        let start = state.begin(name);

        match self.match_rule(item, state)? {
            Some(node) => {
                state.succeed(name);
                state.restore(start);
                Ok(Some(self.branch(name, state, start, vec![node])))
            }
            None => {
                state.fail(name, start);
                Ok(None)
            }
        }
    }

    fn match_not(&self, rule: &Rule, item: RuleId, state: &mut State) -> MatchResult {
        let name = rule.name_arc();
        let start = state.begin(name);

        if self.match_rule(item, state)?.is_some() {
            state.fail(name, start);
            return Ok(None);
        }

        state.succeed(name);
        state.restore(start);
        Ok(Some(self.branch(name, state, start, Vec::new())))
    }

    fn match_end(&self, rule: &Rule, state: &mut State) -> Option<TreeNode> {
        let name = rule.name_arc();
        let start = state.begin(name);

        if state.remaining() != 0 {
            state.fail(name, start);
            return None;
        }

        state.succeed(name);
        Some(self.branch(name, state, start, Vec::new()))
    }

    fn match_sequence_dlr(
        &self,
        rule: &Rule,
        base: RuleId,
        shared: RuleId,
        state: &mut State,
    ) -> MatchResult {
        let name = rule.name_arc();
        let start = state.begin(name);

        let mut result = match self.match_rule(base, state)? {
            Some(node) => node,
            None => {
                state.fail(name, start);
                return Ok(None);
            }
        };

        let mut reductions = 0usize;
        while let Some(tail) = self.match_rule(shared, state)? {
            result = self.reduce(name, state, result, tail);
            reductions += 1;
        }

        // The tail is mandatory at least once
        if reductions == 0 {
            state.fail(name, start);
            return Ok(None);
        }

        state.succeed(name);
        Ok(Some(result))
    }

    /// Fold one tail match into the running left-branching result
    fn reduce(&self, name: &Arc<str>, state: &State, previous: TreeNode, tail: TreeNode) -> TreeNode {
        let start = previous.start();
        let mut children = Vec::with_capacity(tail.child_count() + 1);
        children.push(previous);
        children.extend(tail.children().iter().cloned());
        self.branch(name, state, start, children)
    }

    #[inline]
    fn branch(&self, name: &Arc<str>, state: &State, start: usize, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::branch(Arc::clone(name), Arc::clone(state.input()), start, children)
    }
}
