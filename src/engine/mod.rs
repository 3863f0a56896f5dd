//! PEG engine
//!
//! Grammars are declared through a [`GrammarBuilder`], frozen into an
//! immutable [`Grammar`], and run by [`Parser`]s that each own their mutable
//! [`State`].
//!
//! # Module Organization
//!
//! ## Grammar
//! - [`char_class`] - Character classes (ranges, unions, exclusions, negations)
//! - [`rule`] - Rule variants and rule ids
//! - [`builder`] - Two-phase grammar construction and JSON declarations
//! - [`grammar`] - Frozen, shareable grammar
//! - [`grammar_analysis`] - Static checks over a built grammar
//!
//! ## Parsing
//! - [`state`] - Cursor, high-water mark and tracer of one attempt
//! - [`parser`] - Parser entry point and limits
//! - [`output`] - Parse result and failure report
//! - [`parallel`] - Batch parsing
//!
//! ## Results
//! - [`tree`] - Parse tree and traversals
//! - [`visitor`] - Rule-name dispatch over trees
//! - [`trace`] - Bounded event log
//! - [`source_location`] - Line/column tracking
//! - [`debug`] - Tree printer, grammar diagrams, source context
//! - [`error`] - Build and parse errors

/// Logging macros - no-op unless the `logging` feature is enabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod builder;
pub mod char_class;
pub mod debug;
pub mod error;
pub mod grammar;
pub mod grammar_analysis;
mod matcher;
pub mod output;
pub mod parser;
pub mod rule;
pub mod source_location;
pub mod state;
pub mod trace;
pub mod tree;
pub mod visitor;

// Batch parsing (always available, uses rayon when feature is enabled)
pub mod parallel;

/// Name-keyed lookup table used for rules, classes and visitor handlers
pub(crate) type NameMap<V> = hashbrown::HashMap<String, V, ahash::RandomState>;

// ============================================================================
// Grammar
// ============================================================================

pub use builder::{
    ClassDeclaration, GrammarBuilder, GrammarDeclarations, RuleDeclaration, DEFAULT_TRACE_COUNT,
};
pub use char_class::{CharClass, ClassKind};
pub use grammar::Grammar;
pub use grammar_analysis::{GrammarAnalyzer, GrammarWarning, WarningKind};
pub use rule::{Rule, RuleId, RuleKind, END_RULE};

// ============================================================================
// Parsing
// ============================================================================

pub use output::{ParserOutput, ReportOptions};
pub use parallel::{parse_batch_parallel, parse_batch_with_config, ParallelConfig};
pub use parser::{Parser, ParserConfig, DEFAULT_MAX_INPUT_SIZE, DEFAULT_MAX_RECURSION_DEPTH};
pub use state::State;

// ============================================================================
// Results
// ============================================================================

pub use debug::{GrammarVisualizer, SourceFormatter, TreePrinter};
pub use error::{BuildError, ParseError};
pub use source_location::{
    line_at_offset, line_ranges, LinesAndColumns, NewlineStyle, SourcePosition, SourceSpan,
};
pub use trace::{Trace, TraceElement, TraceReason, Tracer};
pub use tree::{Traversal, TreeNode};
pub use visitor::{walk, RuleDispatcher, Visitor};
