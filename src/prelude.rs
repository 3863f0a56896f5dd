//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from pegloom.
//! Importing this module with a wildcard import brings the core types into scope:
//!
//! ```
//! use pegloom::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! ## Building
//! - [`GrammarBuilder`] - Two-phase grammar builder
//! - [`Grammar`] - Frozen grammar
//! - [`BuildError`] - Grammar construction error
//!
//! ## Parsing
//! - [`Parser`] - Parser entry point
//! - [`ParserConfig`] - Input size and recursion limits
//! - [`ParserOutput`] - Result of a parse attempt
//! - [`ReportOptions`] - Failure report sections
//! - [`ParseError`] - Limit violations
//!
//! ## Trees
//! - [`TreeNode`] - Parse tree node
//! - [`Traversal`] - Traversal order
//! - [`Visitor`] - Visitor trait
//! - [`walk`] - Start a visitor at a node
//!
//! ## Diagnostics
//! - [`NewlineStyle`] - Line ending convention
//! - [`SourcePosition`] - Line and column of an offset
//! - [`Trace`] - Recorded rule attempts

// ============================================================================
// Building
// ============================================================================

pub use crate::engine::{BuildError, Grammar, GrammarBuilder};

// ============================================================================
// Parsing
// ============================================================================

pub use crate::engine::{ParseError, Parser, ParserConfig, ParserOutput, ReportOptions};

// ============================================================================
// Trees
// ============================================================================

pub use crate::engine::{walk, Traversal, TreeNode, Visitor};

// ============================================================================
// Diagnostics
// ============================================================================

pub use crate::engine::{NewlineStyle, SourcePosition, Trace};
