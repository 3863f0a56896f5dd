//! Pegloom - Interpreting PEG Engine
//!
//! Grammars are assembled at runtime from named rules and character classes,
//! then run against text by a backtracking interpreter. It provides:
//! - Two-phase grammar building with forward and recursive references
//! - Grammars declared in code or loaded from JSON
//! - Direct left recursion through the `sequence_dlr` rule
//! - Parse trees with depth-first, breadth-first and leaves-first traversal
//! - Bounded trace of rule attempts for failure diagnosis
//! - Line/column error positions under CR, LF or CRLF conventions
//! - Visitors dispatching on rule names
//! - Static grammar analysis and Mermaid/DOT visualization
//! - Optional batch parsing on rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use pegloom::GrammarBuilder;
//!
//! // greeting = "hello" " "+ name END
//! let mut g = GrammarBuilder::new();
//! g.set_root("greeting")
//!     .sequence("greeting", &["hello", "spaces", "name", "END"])
//!     .str("hello", "hello")
//!     .plus("spaces", "space")
//!     .str("space", " ")
//!     .plus("name", "letter")
//!     .chr("letter", "alpha")
//!     .range("lower", 'a', 'z')
//!     .range("upper", 'A', 'Z')
//!     .combine("alpha", &["lower", "upper"]);
//!
//! let grammar = g.build().unwrap();
//! let output = grammar.new_parser().parse("hello World").unwrap();
//! assert!(output.success());
//!
//! let name = output.parse_tree().unwrap().child_at(2).unwrap();
//! assert_eq!(name.text(), "World");
//! ```
//!
//! ## Loading a Grammar from JSON
//!
//! ```rust
//! use pegloom::GrammarBuilder;
//!
//! let json = r#"{
//!     "root": "bit",
//!     "rules": [
//!         { "kind": "choice", "name": "bit", "options": ["zero", "one"] },
//!         { "kind": "str", "name": "zero", "literal": "0" },
//!         { "kind": "str", "name": "one", "literal": "1" }
//!     ]
//! }"#;
//!
//! let grammar = GrammarBuilder::from_json(json).unwrap().build().unwrap();
//! assert!(grammar.new_parser().parse("1").unwrap().success());
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `parallel` - Run batch parsing on rayon's thread pool

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]

// Prelude module for convenient imports
pub mod prelude;

pub mod engine;

/// Re-export commonly used types for convenience
pub use engine::{
    // Debug tools
    debug::{GrammarVisualizer, SourceFormatter, TreePrinter},
    // Batch parsing
    parallel::{parse_batch_parallel, ParallelConfig},
    // Source positions
    source_location::{LinesAndColumns, NewlineStyle, SourcePosition, SourceSpan},
    // Tracing
    trace::{Trace, TraceElement, TraceReason, Tracer},
    // Visitors
    visitor::{walk, RuleDispatcher, Visitor},
    BuildError,
    CharClass,
    ClassDeclaration,
    ClassKind,
    Grammar,
    GrammarAnalyzer,
    GrammarBuilder,
    GrammarDeclarations,
    GrammarWarning,
    ParseError,
    Parser,
    ParserConfig,
    ParserOutput,
    ReportOptions,
    Rule,
    RuleDeclaration,
    RuleId,
    RuleKind,
    State,
    Traversal,
    TreeNode,
    WarningKind,
};
