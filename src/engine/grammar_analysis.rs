//! Grammar analysis and warnings
//!
//! The engine interprets whatever it is given, so some grammars build fine
//! and then misbehave at parse time. This module flags them up front:
//! - Left recursion not expressed through a left-recursive sequence
//!   (runs into the recursion limit)
//! - Repetitions over items that can match the empty string (may spin at
//!   zero width before the end of input)
//! - Left-recursive sequences whose tail can match the empty string
//! - Empty sequences and choices
//! - Repetitions with a maximum of zero
//! - Rules unreachable from the root
//!
//! # Example
//!
//! ```
//! use pegloom::{GrammarBuilder, WarningKind};
//!
//! let mut g = GrammarBuilder::new();
//! g.set_root("expr")
//!     .choose("expr", &["sum", "num"])
//!     .sequence("sum", &["expr", "plus", "num"])
//!     .str("plus", "+")
//!     .str("num", "1");
//! let grammar = g.build().unwrap();
//!
//! let warnings = grammar.analyze();
//! assert!(warnings.iter().any(|w| w.kind == WarningKind::LeftRecursion));
//! ```

use super::grammar::Grammar;
use super::rule::{RuleId, RuleKind, END_RULE};
use std::collections::HashSet;
use std::fmt;

/// Kind of grammar warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A rule can reach itself without consuming input
    ///
    /// Example: `expr = expr "+" term / term` written as a plain choice
    LeftRecursion,

    /// An unbounded repetition over an item that can match the empty string
    NullableRepetition,

    /// A left-recursive sequence whose tail can match the empty string
    ///
    /// Such a rule never stops reducing.
    InfiniteLoop,

    /// Empty sequence or choice
    ///
    /// An empty sequence always matches. An empty choice never matches.
    EmptyComposite,

    /// Repetition with a maximum of zero (always matches nothing)
    UselessRepetition,

    /// A rule is declared but cannot be reached from the root
    UnreachableRule,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftRecursion => write!(f, "left recursion"),
            Self::NullableRepetition => write!(f, "nullable repetition"),
            Self::InfiniteLoop => write!(f, "infinite loop"),
            Self::EmptyComposite => write!(f, "empty composite"),
            Self::UselessRepetition => write!(f, "useless repetition"),
            Self::UnreachableRule => write!(f, "unreachable rule"),
        }
    }
}

/// A grammar warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarWarning {
    /// The kind of warning
    pub kind: WarningKind,
    /// Rule the warning is about
    pub rule: String,
    /// Human-readable message
    pub message: String,
    /// Related rules (e.g. the left-recursive chain)
    pub related_rules: Vec<String>,
}

impl GrammarWarning {
    /// Create a new warning
    pub fn new(kind: WarningKind, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            rule: rule.into(),
            message: message.into(),
            related_rules: Vec::new(),
        }
    }

    /// Add related rules to the warning
    pub fn with_related(mut self, rules: Vec<String>) -> Self {
        self.related_rules = rules;
        self
    }
}

impl fmt::Display for GrammarWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[rule {}] {}: {}", self.rule, self.kind, self.message)?;
        if !self.related_rules.is_empty() {
            write!(f, " (related rules: {})", self.related_rules.join(" -> "))?;
        }
        Ok(())
    }
}

/// Grammar analyzer
pub struct GrammarAnalyzer<'a> {
    grammar: &'a Grammar,
    /// Whether each rule can succeed without consuming input
    nullable: Vec<bool>,
}

impl<'a> GrammarAnalyzer<'a> {
    /// Create a new analyzer for the given grammar
    pub fn new(grammar: &'a Grammar) -> Self {
        let nullable = compute_nullable(grammar);
        Self { grammar, nullable }
    }

    /// Whether `id` can succeed without consuming input
    pub fn is_nullable(&self, id: RuleId) -> bool {
        self.nullable.get(id.index()).copied().unwrap_or(false)
    }

    /// Analyze the grammar and return all warnings
    pub fn analyze(&self) -> Vec<GrammarWarning> {
        let mut warnings = Vec::new();

        self.detect_left_recursion(&mut warnings);
        self.detect_nullable_repetitions(&mut warnings);
        self.detect_empty_composites(&mut warnings);
        self.detect_useless_repetitions(&mut warnings);
        self.detect_unreachable_rules(&mut warnings);

        log_debug!("grammar analysis produced {} warnings", warnings.len());
        warnings
    }

    fn name(&self, id: RuleId) -> String {
        self.grammar.rule_at(id).name().to_string()
    }

    /// Rules attempted at the position where `id` starts
    fn left_calls(&self, id: RuleId) -> Vec<RuleId> {
        match self.grammar.rule_at(id).kind() {
            RuleKind::Literal(_) | RuleKind::Char(_) | RuleKind::End => Vec::new(),
            RuleKind::Sequence(operands) => {
                let mut calls = Vec::new();
                for &operand in operands {
                    calls.push(operand);
                    if !self.is_nullable(operand) {
                        break;
                    }
                }
                calls
            }
            RuleKind::Choice(options) => options.clone(),
            RuleKind::Repetition { item, maximum, .. } => {
                if *maximum == Some(0) {
                    Vec::new()
                } else {
                    vec![*item]
                }
            }
            RuleKind::And(item) | RuleKind::Not(item) => vec![*item],
            RuleKind::SequenceDlr { base, shared } => {
                if self.is_nullable(*base) {
                    vec![*base, *shared]
                } else {
                    vec![*base]
                }
            }
        }
    }

    fn detect_left_recursion(&self, warnings: &mut Vec<GrammarWarning>) {
        for (id, rule) in self.grammar.rules() {
            if let Some(path) = self.find_left_recursive_path(id, id, &mut HashSet::new()) {
                let chain: Vec<String> = path.into_iter().map(|r| self.name(r)).collect();
                warnings.push(
                    GrammarWarning::new(
                        WarningKind::LeftRecursion,
                        rule.name(),
                        format!(
                            "Rule {} can reach itself without consuming input",
                            rule.name()
                        ),
                    )
                    .with_related(chain),
                );
            }
        }
    }

    /// Path of left calls from `from` back to `target`
    fn find_left_recursive_path(
        &self,
        from: RuleId,
        target: RuleId,
        visited: &mut HashSet<RuleId>,
    ) -> Option<Vec<RuleId>> {
        if !visited.insert(from) {
            return None;
        }

        for callee in self.left_calls(from) {
            if callee == target {
                return Some(vec![from, callee]);
            }
            if let Some(mut path) = self.find_left_recursive_path(callee, target, visited) {
                path.insert(0, from);
                return Some(path);
            }
        }
        None
    }

    fn detect_nullable_repetitions(&self, warnings: &mut Vec<GrammarWarning>) {
        for (_, rule) in self.grammar.rules() {
            match rule.kind() {
                RuleKind::Repetition {
                    item,
                    maximum: None,
                    ..
                } if self.is_nullable(*item) => {
                    warnings.push(GrammarWarning::new(
                        WarningKind::NullableRepetition,
                        rule.name(),
                        format!(
                            "Repetition {} repeats {}, which can match the empty string",
                            rule.name(),
                            self.name(*item)
                        ),
                    ));
                }
                RuleKind::SequenceDlr { shared, .. } if self.is_nullable(*shared) => {
                    warnings.push(GrammarWarning::new(
                        WarningKind::InfiniteLoop,
                        rule.name(),
                        format!(
                            "Left-recursive sequence {} has a tail that can match the empty string",
                            rule.name()
                        ),
                    ));
                }
                _ => {}
            }
        }
    }

    fn detect_empty_composites(&self, warnings: &mut Vec<GrammarWarning>) {
        for (_, rule) in self.grammar.rules() {
            let message = match rule.kind() {
                RuleKind::Sequence(operands) if operands.is_empty() => {
                    "Empty sequence always matches"
                }
                RuleKind::Choice(options) if options.is_empty() => "Empty choice never matches",
                _ => continue,
            };
            warnings.push(GrammarWarning::new(
                WarningKind::EmptyComposite,
                rule.name(),
                message,
            ));
        }
    }

    fn detect_useless_repetitions(&self, warnings: &mut Vec<GrammarWarning>) {
        for (_, rule) in self.grammar.rules() {
            if let RuleKind::Repetition {
                maximum: Some(0), ..
            } = rule.kind()
            {
                warnings.push(GrammarWarning::new(
                    WarningKind::UselessRepetition,
                    rule.name(),
                    format!("Repetition {} has maximum 0 and matches nothing", rule.name()),
                ));
            }
        }
    }

    fn detect_unreachable_rules(&self, warnings: &mut Vec<GrammarWarning>) {
        let mut reachable = HashSet::new();
        let mut stack = vec![self.grammar.root()];
        while let Some(id) = stack.pop() {
            if reachable.insert(id) {
                stack.extend(self.grammar.rule_at(id).operands());
            }
        }

        for (id, rule) in self.grammar.rules() {
            if !reachable.contains(&id) && rule.name() != END_RULE {
                warnings.push(GrammarWarning::new(
                    WarningKind::UnreachableRule,
                    rule.name(),
                    format!("Rule {} is never reachable from the root", rule.name()),
                ));
            }
        }
    }
}

/// Least fixpoint of "can succeed without consuming input"
fn compute_nullable(grammar: &Grammar) -> Vec<bool> {
    let mut nullable = vec![false; grammar.rule_count()];
    let mut changed = true;

    while changed {
        changed = false;
        for (id, rule) in grammar.rules() {
            if nullable[id.index()] {
                continue;
            }
            let is = |r: &RuleId| nullable[r.index()];
            let now = match rule.kind() {
                RuleKind::Literal(chars) => chars.is_empty(),
                RuleKind::Char(_) => false,
                RuleKind::Sequence(operands) => operands.iter().all(is),
                RuleKind::Choice(options) => options.iter().any(is),
                RuleKind::Repetition { item, minimum, .. } => *minimum == 0 || is(item),
                RuleKind::And(_) | RuleKind::Not(_) | RuleKind::End => true,
                RuleKind::SequenceDlr { base, shared } => is(base) && is(shared),
            };
            if now {
                nullable[id.index()] = true;
                changed = true;
            }
        }
    }

    nullable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::builder::GrammarBuilder;

    fn kinds(warnings: &[GrammarWarning]) -> Vec<WarningKind> {
        warnings.iter().map(|w| w.kind).collect()
    }

    #[test]
    fn test_clean_grammar() {
        let mut g = GrammarBuilder::new();
        g.set_root("sum")
            .sequence_dlr("sum", "num", &["plus", "num"])
            .str("plus", "+")
            .plus("num", "digit")
            .chr("digit", "d")
            .range("d", '0', '9');
        let grammar = g.build().unwrap();
        assert!(grammar.analyze().is_empty(), "{:?}", grammar.analyze());
    }

    #[test]
    fn test_indirect_left_recursion() {
        let mut g = GrammarBuilder::new();
        g.set_root("a")
            .sequence("a", &["b", "x"])
            .choose("b", &["a", "x"])
            .str("x", "x");
        let grammar = g.build().unwrap();
        let warnings = grammar.analyze();

        let lr: Vec<&GrammarWarning> = warnings
            .iter()
            .filter(|w| w.kind == WarningKind::LeftRecursion)
            .collect();
        assert_eq!(lr.len(), 2);
        assert_eq!(lr[0].related_rules, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_recursion_behind_nullable_prefix() {
        let mut g = GrammarBuilder::new();
        g.set_root("a")
            .sequence("a", &["opt", "a"])
            .option("opt", "x")
            .str("x", "x");
        let grammar = g.build().unwrap();
        assert!(kinds(&grammar.analyze()).contains(&WarningKind::LeftRecursion));
    }

    #[test]
    fn test_nullable_repetition_and_dlr_tail() {
        let mut g = GrammarBuilder::new();
        g.set_root("s")
            .sequence("s", &["loop", "dlr"])
            .star("loop", "maybe")
            .option("maybe", "x")
            .sequence_dlr("dlr", "x", &["maybe"])
            .str("x", "x");
        let grammar = g.build().unwrap();
        let kinds = kinds(&grammar.analyze());
        assert!(kinds.contains(&WarningKind::NullableRepetition));
        assert!(kinds.contains(&WarningKind::InfiniteLoop));
    }

    #[test]
    fn test_empty_useless_unreachable() {
        let mut g = GrammarBuilder::new();
        g.set_root("s")
            .sequence("s", &["none", "zero"])
            .choose("none", &[])
            .repeat("zero", "x", 0, Some(0))
            .str("x", "x")
            .str("orphan", "o");
        let grammar = g.build().unwrap();
        let warnings = grammar.analyze();
        let kinds = kinds(&warnings);
        assert!(kinds.contains(&WarningKind::EmptyComposite));
        assert!(kinds.contains(&WarningKind::UselessRepetition));

        let unreachable: Vec<&str> = warnings
            .iter()
            .filter(|w| w.kind == WarningKind::UnreachableRule)
            .map(|w| w.rule.as_str())
            .collect();
        assert_eq!(unreachable, vec!["orphan"]);
    }

    #[test]
    fn test_nullable_fixpoint_handles_cycles() {
        let mut g = GrammarBuilder::new();
        g.set_root("a")
            .choose("a", &["b", "e"])
            .choose("b", &["a"])
            .str("e", "");
        let grammar = g.build().unwrap();
        let analyzer = GrammarAnalyzer::new(&grammar);
        assert!(analyzer.is_nullable(grammar.rule_id("a").unwrap()));
        assert!(analyzer.is_nullable(grammar.rule_id("b").unwrap()));
    }

    #[test]
    fn test_warning_display() {
        let w = GrammarWarning::new(WarningKind::LeftRecursion, "a", "loops")
            .with_related(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(
            w.to_string(),
            "[rule a] left recursion: loops (related rules: a -> b -> a)"
        );
    }
}
