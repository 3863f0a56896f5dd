//! Two-phase grammar construction
//!
//! Rules may refer to each other in any order, including mutual and
//! self-reference, so construction happens in two passes over the recorded
//! declarations:
//!
//! 1. **Declare**: every rule name gets a [`RuleId`] slot in the arena and
//!    every class name gets registered. Repeated names are rejected.
//! 2. **Wire**: every declaration's operand names are resolved to handles and
//!    the slot is filled in. Unknown names are rejected.
//!
//! Rules and classes live in separate namespaces. The `END` rule is always
//! present.
//!
//! # Example
//!
//! ```rust
//! use pegloom::GrammarBuilder;
//!
//! let mut g = GrammarBuilder::new();
//! g.set_root("number")
//!     .plus("number", "digit")
//!     .chr("digit", "digits")
//!     .range("digits", '0', '9');
//!
//! let grammar = g.build().unwrap();
//! let output = grammar.new_parser().parse("42").unwrap();
//! assert!(output.success());
//! ```
//!
//! The same declarations can be exchanged as JSON through
//! [`GrammarDeclarations`], which is how external grammar compilers hand
//! grammars to the engine.

use super::char_class::{CharClass, ClassKind};
use super::error::BuildError;
use super::grammar::Grammar;
use super::rule::{Rule, RuleId, RuleKind, END_RULE};
use super::NameMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default capacity of the per-parse tracer
pub const DEFAULT_TRACE_COUNT: usize = 1024;

/// One rule, described by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleDeclaration {
    /// All operands in order
    Sequence {
        /// Rule name
        name: String,
        /// Operand rule names
        operands: Vec<String>,
    },
    /// First matching option
    Choice {
        /// Rule name
        name: String,
        /// Option rule names
        options: Vec<String>,
    },
    /// Bounded repetition; a missing `maximum` is unbounded
    Repetition {
        /// Rule name
        name: String,
        /// Repeated rule name
        item: String,
        /// Mandatory matches
        minimum: usize,
        /// Upper bound
        #[serde(default)]
        maximum: Option<usize>,
    },
    /// Positive lookahead
    And {
        /// Rule name
        name: String,
        /// Checked rule name
        item: String,
    },
    /// Negative lookahead
    Not {
        /// Rule name
        name: String,
        /// Checked rule name
        item: String,
    },
    /// Direct-left-recursive sequence
    SequenceDlr {
        /// Rule name
        name: String,
        /// Rule matched once at the start
        base: String,
        /// Tail rule names matched repeatedly
        shared: Vec<String>,
    },
    /// Literal text
    Str {
        /// Rule name
        name: String,
        /// Text to match
        literal: String,
    },
    /// One character from a class
    Chr {
        /// Rule name
        name: String,
        /// Class name
        class: String,
    },
}

impl RuleDeclaration {
    /// Declared rule name
    pub fn name(&self) -> &str {
        match self {
            RuleDeclaration::Sequence { name, .. }
            | RuleDeclaration::Choice { name, .. }
            | RuleDeclaration::Repetition { name, .. }
            | RuleDeclaration::And { name, .. }
            | RuleDeclaration::Not { name, .. }
            | RuleDeclaration::SequenceDlr { name, .. }
            | RuleDeclaration::Str { name, .. }
            | RuleDeclaration::Chr { name, .. } => name,
        }
    }
}

/// One character class, described by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassDeclaration {
    /// Inclusive range
    Range {
        /// Class name
        name: String,
        /// First character
        low: char,
        /// Last character
        high: char,
    },
    /// Union of classes
    Combine {
        /// Class name
        name: String,
        /// Member class names
        members: Vec<String>,
    },
    /// `include` minus `exclude`
    Exclude {
        /// Class name
        name: String,
        /// Class that must match
        include: String,
        /// Class that must not match
        exclude: String,
    },
    /// Complement of a class
    Negate {
        /// Class name
        name: String,
        /// Complemented class name
        class: String,
    },
}

impl ClassDeclaration {
    /// Declared class name
    pub fn name(&self) -> &str {
        match self {
            ClassDeclaration::Range { name, .. }
            | ClassDeclaration::Combine { name, .. }
            | ClassDeclaration::Exclude { name, .. }
            | ClassDeclaration::Negate { name, .. } => name,
        }
    }
}

fn default_trace_count() -> usize {
    DEFAULT_TRACE_COUNT
}

/// Serializable description of a whole grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarDeclarations {
    /// Root rule name
    #[serde(default)]
    pub root: Option<String>,
    /// Tracer capacity for each parse
    #[serde(default = "default_trace_count")]
    pub trace_count: usize,
    /// Rules in declaration order
    #[serde(default)]
    pub rules: Vec<RuleDeclaration>,
    /// Character classes in declaration order
    #[serde(default)]
    pub classes: Vec<ClassDeclaration>,
}

impl Default for GrammarDeclarations {
    fn default() -> Self {
        Self {
            root: None,
            trace_count: DEFAULT_TRACE_COUNT,
            rules: Vec::new(),
            classes: Vec::new(),
        }
    }
}

impl GrammarDeclarations {
    /// Serialize to JSON
    #[inline]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    #[inline]
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Records grammar declarations and turns them into a [`Grammar`]
///
/// Declaration methods chain and never fail; every consistency check runs in
/// [`build`](GrammarBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    declarations: GrammarDeclarations,
}

impl GrammarBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing declarations
    pub fn from_declarations(declarations: GrammarDeclarations) -> Self {
        Self { declarations }
    }

    /// Start from JSON-encoded [`GrammarDeclarations`]
    pub fn from_json(s: &str) -> Result<Self, BuildError> {
        GrammarDeclarations::from_json(s)
            .map(Self::from_declarations)
            .map_err(|e| BuildError::InvalidDeclarations {
                reason: e.to_string(),
            })
    }

    /// Declarations recorded so far
    pub fn declarations(&self) -> &GrammarDeclarations {
        &self.declarations
    }

    /// Serialize the recorded declarations to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.declarations.to_json()
    }

    /// Add a rule declaration
    pub fn declare_rule(&mut self, declaration: RuleDeclaration) -> &mut Self {
        self.declarations.rules.push(declaration);
        self
    }

    /// Add a class declaration
    pub fn declare_class(&mut self, declaration: ClassDeclaration) -> &mut Self {
        self.declarations.classes.push(declaration);
        self
    }

    // ========================================================================
    // Rules
    // ========================================================================

    /// `name = operands[0] , operands[1] , ...`
    pub fn sequence(&mut self, name: &str, operands: &[&str]) -> &mut Self {
        self.declare_rule(RuleDeclaration::Sequence {
            name: name.to_string(),
            operands: to_strings(operands),
        })
    }

    /// `name = options[0] / options[1] / ...`
    pub fn choose(&mut self, name: &str, options: &[&str]) -> &mut Self {
        self.declare_rule(RuleDeclaration::Choice {
            name: name.to_string(),
            options: to_strings(options),
        })
    }

    /// `name = item{minimum, maximum}`; `None` leaves the maximum unbounded
    pub fn repeat(
        &mut self,
        name: &str,
        item: &str,
        minimum: usize,
        maximum: Option<usize>,
    ) -> &mut Self {
        self.declare_rule(RuleDeclaration::Repetition {
            name: name.to_string(),
            item: item.to_string(),
            minimum,
            maximum,
        })
    }

    /// `name = item*`
    pub fn star(&mut self, name: &str, item: &str) -> &mut Self {
        self.repeat(name, item, 0, None)
    }

    /// `name = item+`
    pub fn plus(&mut self, name: &str, item: &str) -> &mut Self {
        self.repeat(name, item, 1, None)
    }

    /// `name = item?`
    pub fn option(&mut self, name: &str, item: &str) -> &mut Self {
        self.repeat(name, item, 0, Some(1))
    }

    /// `name = &item`
    pub fn and(&mut self, name: &str, item: &str) -> &mut Self {
        self.declare_rule(RuleDeclaration::And {
            name: name.to_string(),
            item: item.to_string(),
        })
    }

    /// `name = !item`
    pub fn not(&mut self, name: &str, item: &str) -> &mut Self {
        self.declare_rule(RuleDeclaration::Not {
            name: name.to_string(),
            item: item.to_string(),
        })
    }

    /// `name = name shared... / base`, matched as `base (shared...)+`
    pub fn sequence_dlr(&mut self, name: &str, base: &str, shared: &[&str]) -> &mut Self {
        self.declare_rule(RuleDeclaration::SequenceDlr {
            name: name.to_string(),
            base: base.to_string(),
            shared: to_strings(shared),
        })
    }

    /// `name = "literal"`
    pub fn str(&mut self, name: &str, literal: &str) -> &mut Self {
        self.declare_rule(RuleDeclaration::Str {
            name: name.to_string(),
            literal: literal.to_string(),
        })
    }

    /// `name = [class]`
    pub fn chr(&mut self, name: &str, class: &str) -> &mut Self {
        self.declare_rule(RuleDeclaration::Chr {
            name: name.to_string(),
            class: class.to_string(),
        })
    }

    // ========================================================================
    // Character classes
    // ========================================================================

    /// Class of characters in `low..=high`
    pub fn range(&mut self, name: &str, low: char, high: char) -> &mut Self {
        self.declare_class(ClassDeclaration::Range {
            name: name.to_string(),
            low,
            high,
        })
    }

    /// Union of classes
    pub fn combine(&mut self, name: &str, members: &[&str]) -> &mut Self {
        self.declare_class(ClassDeclaration::Combine {
            name: name.to_string(),
            members: to_strings(members),
        })
    }

    /// Characters in `include` but not in `exclude`
    pub fn exclude(&mut self, name: &str, include: &str, exclude: &str) -> &mut Self {
        self.declare_class(ClassDeclaration::Exclude {
            name: name.to_string(),
            include: include.to_string(),
            exclude: exclude.to_string(),
        })
    }

    /// Complement of a class
    pub fn negate(&mut self, name: &str, class: &str) -> &mut Self {
        self.declare_class(ClassDeclaration::Negate {
            name: name.to_string(),
            class: class.to_string(),
        })
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Rule every parse starts from
    pub fn set_root(&mut self, name: &str) -> &mut Self {
        self.declarations.root = Some(name.to_string());
        self
    }

    /// Tracer capacity for each parse (default [`DEFAULT_TRACE_COUNT`])
    pub fn set_trace_count(&mut self, count: usize) -> &mut Self {
        self.declarations.trace_count = count;
        self
    }

    /// Resolve all declarations into an immutable [`Grammar`]
    pub fn build(&self) -> Result<Grammar, BuildError> {
        let decls = &self.declarations;

        // Phase 1: declare
        let rule_slots = declare_rules(&decls.rules)?;
        let class_index = declare_classes(&decls.classes)?;

        // Phase 2: wire
        let classes = ClassResolver::new(&decls.classes, &class_index).resolve_all()?;
        let rules = wire_rules(&decls.rules, &rule_slots, &classes)?;

        let root_name = decls.root.clone().unwrap_or_default();
        let root = rule_slots
            .names
            .get(root_name.as_str())
            .copied()
            .ok_or(BuildError::MissingRoot { name: root_name })?;

        log_debug!(
            "built grammar: {} rules, {} classes, root {:?}",
            rules.len(),
            classes.len(),
            decls.root
        );

        Ok(Grammar::new(rules, rule_slots.names, root, decls.trace_count))
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn hidden_shared_name(name: &str) -> String {
    format!("{}(shared)", name)
}

/// Result of the rule declaration pass
struct RuleSlots {
    names: NameMap<RuleId>,
    /// Hidden tail rule of each DLR declaration, by declaration index
    shared: Vec<Option<RuleId>>,
    len: usize,
}

fn declare_rules(decls: &[RuleDeclaration]) -> Result<RuleSlots, BuildError> {
    let mut names = NameMap::default();
    names.insert(END_RULE.to_string(), RuleId(0));
    let mut next = 1;
    let mut shared = Vec::with_capacity(decls.len());

    for decl in decls {
        let name = decl.name();
        if names.contains_key(name) {
            return Err(BuildError::DuplicateRule {
                name: name.to_string(),
            });
        }
        names.insert(name.to_string(), RuleId(next));
        next += 1;

        if let RuleDeclaration::SequenceDlr { .. } = decl {
            shared.push(Some(RuleId(next)));
            next += 1;
        } else {
            shared.push(None);
        }
    }

    Ok(RuleSlots {
        names,
        shared,
        len: next,
    })
}

fn declare_classes(decls: &[ClassDeclaration]) -> Result<NameMap<usize>, BuildError> {
    let mut index = NameMap::default();
    for (i, decl) in decls.iter().enumerate() {
        if index.insert(decl.name().to_string(), i).is_some() {
            return Err(BuildError::DuplicateClass {
                name: decl.name().to_string(),
            });
        }
    }
    Ok(index)
}

/// Depth-first class resolution with memoization and cycle detection
struct ClassResolver<'a> {
    decls: &'a [ClassDeclaration],
    index: &'a NameMap<usize>,
    resolved: Vec<Option<Arc<CharClass>>>,
    in_progress: Vec<bool>,
}

impl<'a> ClassResolver<'a> {
    fn new(decls: &'a [ClassDeclaration], index: &'a NameMap<usize>) -> Self {
        Self {
            decls,
            index,
            resolved: vec![None; decls.len()],
            in_progress: vec![false; decls.len()],
        }
    }

    fn resolve_all(mut self) -> Result<NameMap<Arc<CharClass>>, BuildError> {
        let mut classes = NameMap::default();
        for i in 0..self.decls.len() {
            let class = self.resolve(i)?;
            classes.insert(self.decls[i].name().to_string(), class);
        }
        Ok(classes)
    }

    fn lookup(&mut self, name: &str) -> Result<Arc<CharClass>, BuildError> {
        let i = *self.index.get(name).ok_or_else(|| BuildError::NoSuchClass {
            name: name.to_string(),
        })?;
        self.resolve(i)
    }

    fn resolve(&mut self, i: usize) -> Result<Arc<CharClass>, BuildError> {
        if let Some(class) = &self.resolved[i] {
            return Ok(Arc::clone(class));
        }

        let decls = self.decls;
        let decl = &decls[i];
        if self.in_progress[i] {
            return Err(BuildError::CyclicClass {
                name: decl.name().to_string(),
            });
        }
        self.in_progress[i] = true;

        let kind = match decl {
            ClassDeclaration::Range { name, low, high } => {
                if low > high {
                    return Err(BuildError::InvertedRange {
                        name: name.clone(),
                        low: *low,
                        high: *high,
                    });
                }
                ClassKind::Range {
                    low: *low,
                    high: *high,
                }
            }
            ClassDeclaration::Combine { members, .. } => ClassKind::Combination(
                members
                    .iter()
                    .map(|m| self.lookup(m))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ClassDeclaration::Exclude {
                include, exclude, ..
            } => ClassKind::Exclusion {
                include: self.lookup(include)?,
                exclude: self.lookup(exclude)?,
            },
            ClassDeclaration::Negate { class, .. } => ClassKind::Negation(self.lookup(class)?),
        };

        let class = Arc::new(CharClass::new(decl.name(), kind));
        self.in_progress[i] = false;
        self.resolved[i] = Some(Arc::clone(&class));
        Ok(class)
    }
}

fn lookup_rule(names: &NameMap<RuleId>, name: &str) -> Result<RuleId, BuildError> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| BuildError::NoSuchRule {
            name: name.to_string(),
        })
}

fn lookup_rules(names: &NameMap<RuleId>, operands: &[String]) -> Result<Vec<RuleId>, BuildError> {
    operands.iter().map(|n| lookup_rule(names, n)).collect()
}

fn wire_rules(
    decls: &[RuleDeclaration],
    slots: &RuleSlots,
    classes: &NameMap<Arc<CharClass>>,
) -> Result<Vec<Rule>, BuildError> {
    let names = &slots.names;
    let mut rules: Vec<Option<Rule>> = vec![None; slots.len];
    rules[0] = Some(Rule::new(Arc::from(END_RULE), RuleKind::End));

    for (decl, shared_slot) in decls.iter().zip(&slots.shared) {
        let name = decl.name();
        let id = lookup_rule(names, name)?;

        let kind = match decl {
            RuleDeclaration::Sequence { operands, .. } => {
                RuleKind::Sequence(lookup_rules(names, operands)?)
            }
            RuleDeclaration::Choice { options, .. } => {
                RuleKind::Choice(lookup_rules(names, options)?)
            }
            RuleDeclaration::Repetition {
                item,
                minimum,
                maximum,
                ..
            } => {
                if let Some(maximum) = *maximum {
                    if *minimum > maximum {
                        return Err(BuildError::InvertedBounds {
                            name: name.to_string(),
                            minimum: *minimum,
                            maximum,
                        });
                    }
                }
                RuleKind::Repetition {
                    item: lookup_rule(names, item)?,
                    minimum: *minimum,
                    maximum: *maximum,
                }
            }
            RuleDeclaration::And { item, .. } => RuleKind::And(lookup_rule(names, item)?),
            RuleDeclaration::Not { item, .. } => RuleKind::Not(lookup_rule(names, item)?),
            RuleDeclaration::SequenceDlr { base, shared, .. } => {
                let shared_id = match shared_slot {
                    Some(id) if !shared.is_empty() => *id,
                    _ => {
                        return Err(BuildError::InvalidRule {
                            name: name.to_string(),
                            reason: "left-recursive sequence needs at least one shared operand"
                                .to_string(),
                        })
                    }
                };
                rules[shared_id.0] = Some(Rule::new(
                    Arc::from(hidden_shared_name(name)),
                    RuleKind::Sequence(lookup_rules(names, shared)?),
                ));
                RuleKind::SequenceDlr {
                    base: lookup_rule(names, base)?,
                    shared: shared_id,
                }
            }
            RuleDeclaration::Str { literal, .. } => {
                RuleKind::Literal(literal.chars().collect::<Vec<_>>().into_boxed_slice())
            }
            RuleDeclaration::Chr { class, .. } => {
                let class = classes
                    .get(class.as_str())
                    .ok_or_else(|| BuildError::NoSuchClass {
                        name: class.clone(),
                    })?;
                RuleKind::Char(Arc::clone(class))
            }
        };

        rules[id.0] = Some(Rule::new(Arc::from(name), kind));
    }

    Ok(rules.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_and_self_references() {
        let mut g = GrammarBuilder::new();
        g.set_root("list")
            .choose("list", &["pair", "item"])
            .sequence("pair", &["item", "comma", "list"])
            .str("comma", ",")
            .chr("item", "lower")
            .range("lower", 'a', 'z');

        let grammar = g.build().unwrap();
        assert_eq!(grammar.root_rule().name(), "list");
        assert!(grammar.rule_id("END").is_some());
        assert!(grammar.new_parser().parse("a,b,c").unwrap().success());
    }

    #[test]
    fn test_duplicate_rule() {
        let mut g = GrammarBuilder::new();
        g.str("a", "x").str("a", "y").set_root("a");
        assert_eq!(
            g.build().unwrap_err(),
            BuildError::DuplicateRule {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_end_is_reserved() {
        let mut g = GrammarBuilder::new();
        g.str("END", "x").set_root("END");
        assert!(matches!(g.build(), Err(BuildError::DuplicateRule { .. })));
    }

    #[test]
    fn test_rules_and_classes_have_separate_namespaces() {
        let mut g = GrammarBuilder::new();
        g.chr("digit", "digit").range("digit", '0', '9').set_root("digit");
        assert!(g.build().is_ok());
    }

    #[test]
    fn test_duplicate_class() {
        let mut g = GrammarBuilder::new();
        g.range("c", 'a', 'b').range("c", 'x', 'y');
        g.chr("r", "c").set_root("r");
        assert!(matches!(g.build(), Err(BuildError::DuplicateClass { .. })));
    }

    #[test]
    fn test_unresolved_names() {
        let mut g = GrammarBuilder::new();
        g.sequence("s", &["missing"]).set_root("s");
        assert_eq!(
            g.build().unwrap_err(),
            BuildError::NoSuchRule {
                name: "missing".to_string()
            }
        );

        let mut g = GrammarBuilder::new();
        g.chr("c", "nope").set_root("c");
        assert!(matches!(g.build(), Err(BuildError::NoSuchClass { .. })));

        let mut g = GrammarBuilder::new();
        g.negate("n", "ghost").str("x", "x").set_root("x");
        assert!(matches!(g.build(), Err(BuildError::NoSuchClass { .. })));
    }

    #[test]
    fn test_missing_root() {
        let mut g = GrammarBuilder::new();
        g.str("a", "a");
        assert!(matches!(g.build(), Err(BuildError::MissingRoot { .. })));

        g.set_root("b");
        assert_eq!(
            g.build().unwrap_err(),
            BuildError::MissingRoot {
                name: "b".to_string()
            }
        );
    }

    #[test]
    fn test_inverted_bounds_and_ranges() {
        let mut g = GrammarBuilder::new();
        g.repeat("r", "a", 3, Some(2)).str("a", "a").set_root("r");
        assert!(matches!(
            g.build(),
            Err(BuildError::InvertedBounds {
                minimum: 3,
                maximum: 2,
                ..
            })
        ));

        let mut g = GrammarBuilder::new();
        g.range("bad", 'z', 'a').chr("r", "bad").set_root("r");
        assert!(matches!(g.build(), Err(BuildError::InvertedRange { .. })));
    }

    #[test]
    fn test_class_cycle() {
        let mut g = GrammarBuilder::new();
        g.combine("a", &["b"]).negate("b", "a").chr("r", "a").set_root("r");
        assert!(matches!(g.build(), Err(BuildError::CyclicClass { .. })));
    }

    #[test]
    fn test_classes_resolve_in_any_order() {
        let mut g = GrammarBuilder::new();
        g.exclude("consonant", "lower", "vowel")
            .combine("vowel", &["a", "e"])
            .range("a", 'a', 'a')
            .range("e", 'e', 'e')
            .range("lower", 'a', 'z')
            .chr("c", "consonant")
            .set_root("c");
        let grammar = g.build().unwrap();
        let parser = grammar.new_parser();
        assert!(parser.parse("b").unwrap().success());
        assert!(!parser.parse("e").unwrap().success());
    }

    #[test]
    fn test_dlr_needs_shared_operands() {
        let mut g = GrammarBuilder::new();
        g.sequence_dlr("d", "a", &[]).str("a", "a").set_root("d");
        assert!(matches!(g.build(), Err(BuildError::InvalidRule { .. })));
    }

    #[test]
    fn test_dlr_hidden_rule_is_not_named() {
        let mut g = GrammarBuilder::new();
        g.sequence_dlr("d", "a", &["a"]).str("a", "a").set_root("d");
        let grammar = g.build().unwrap();
        assert!(grammar.rule_id("d(shared)").is_none());
        assert!(grammar.rules().any(|(_, r)| r.name() == "d(shared)"));
    }

    #[test]
    fn test_json_round_trip_builds_same_grammar() {
        let mut g = GrammarBuilder::new();
        g.set_root("word")
            .set_trace_count(16)
            .plus("word", "letter")
            .chr("letter", "alpha")
            .range("alpha", 'a', 'z');

        let json = g.to_json().unwrap();
        let restored = GrammarBuilder::from_json(&json).unwrap();
        assert_eq!(restored.declarations(), g.declarations());

        let grammar = restored.build().unwrap();
        assert_eq!(grammar.trace_count(), 16);
        assert!(grammar.new_parser().parse("abc").unwrap().success());
    }

    #[test]
    fn test_json_defaults_and_errors() {
        let json = r#"{
            "root": "x",
            "rules": [{ "kind": "repetition", "name": "x", "item": "y", "minimum": 0 },
                      { "kind": "str", "name": "y", "literal": "y" }]
        }"#;
        let builder = GrammarBuilder::from_json(json).unwrap();
        assert_eq!(builder.declarations().trace_count, DEFAULT_TRACE_COUNT);
        assert!(builder.build().is_ok());

        assert!(matches!(
            GrammarBuilder::from_json("{ not json"),
            Err(BuildError::InvalidDeclarations { .. })
        ));
    }
}
