//! Immutable grammar arena
//!
//! A [`Grammar`] is produced once by [`GrammarBuilder::build`](super::builder::GrammarBuilder::build)
//! and never changes afterwards, so it can be shared by any number of
//! concurrent parsers.

use super::error::ParseError;
use super::grammar_analysis::{GrammarAnalyzer, GrammarWarning};
use super::matcher::Matcher;
use super::parser::{Parser, ParserConfig, DEFAULT_MAX_RECURSION_DEPTH};
use super::rule::{Rule, RuleId};
use super::state::State;
use super::tree::TreeNode;
use super::NameMap;

/// Rules addressed by [`RuleId`], a root, and the trace capacity
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
    /// Declared names only; hidden helper rules are not listed
    names: NameMap<RuleId>,
    root: RuleId,
    trace_count: usize,
}

impl Grammar {
    pub(crate) fn new(
        rules: Vec<Rule>,
        names: NameMap<RuleId>,
        root: RuleId,
        trace_count: usize,
    ) -> Self {
        Self {
            rules,
            names,
            root,
            trace_count,
        }
    }

    /// Handle of the root rule
    #[inline]
    pub fn root(&self) -> RuleId {
        self.root
    }

    /// The root rule
    #[inline]
    pub fn root_rule(&self) -> &Rule {
        self.rule_at(self.root)
    }

    /// Rule behind `id`, or `None` if the handle belongs to another grammar
    #[inline]
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    #[inline]
    pub(crate) fn rule_at(&self, id: RuleId) -> &Rule {
        &self.rules[id.0]
    }

    /// Handle of a declared rule
    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        self.names.get(name).copied()
    }

    /// Declared rule by name
    pub fn rule_by_name(&self, name: &str) -> Option<&Rule> {
        self.rule_id(name).map(|id| self.rule_at(id))
    }

    /// All rules in arena order, hidden helper rules included
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules.iter().enumerate().map(|(i, r)| (RuleId(i), r))
    }

    /// Number of rules in the arena
    #[inline]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Capacity of the tracer each parse gets
    #[inline]
    pub fn trace_count(&self) -> usize {
        self.trace_count
    }

    /// Create a parser with the default [`ParserConfig`]
    pub fn new_parser(&self) -> Parser<'_> {
        Parser::new(self)
    }

    /// Create a parser with custom limits
    pub fn new_parser_with_config(&self, config: ParserConfig) -> Parser<'_> {
        Parser::with_config(self, config)
    }

    /// Attempt one rule at the current position of `state`
    ///
    /// Uses the default recursion limit. Useful for driving single rules in
    /// tests and tools; whole-input parsing goes through [`Parser`].
    pub fn match_rule(&self, id: RuleId, state: &mut State) -> Result<Option<TreeNode>, ParseError> {
        Matcher::new(self, DEFAULT_MAX_RECURSION_DEPTH).match_rule(id, state)
    }

    /// Run the static checks of [`GrammarAnalyzer`]
    pub fn analyze(&self) -> Vec<GrammarWarning> {
        GrammarAnalyzer::new(self).analyze()
    }
}
