//! Error types for grammar construction and parsing
//!
//! Two families of errors exist:
//! - [`BuildError`] is returned by [`GrammarBuilder::build`](super::builder::GrammarBuilder::build)
//!   when the declared grammar is inconsistent.
//! - [`ParseError`] is returned by [`Parser::parse`](super::parser::Parser::parse) when a
//!   resource limit aborts the attempt.
//!
//! Ordinary non-matching input is neither: it is reported through
//! [`ParserOutput::success`](super::output::ParserOutput::success).

use super::trace::Trace;
use std::fmt;

/// Error raised while turning declarations into a [`Grammar`](super::grammar::Grammar)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Two rules share a name (this includes the implicit `END` rule)
    DuplicateRule {
        /// The repeated rule name
        name: String,
    },

    /// Two character classes share a name
    DuplicateClass {
        /// The repeated class name
        name: String,
    },

    /// A rule refers to a rule that was never declared
    NoSuchRule {
        /// The unresolved rule name
        name: String,
    },

    /// A rule or class refers to a class that was never declared
    NoSuchClass {
        /// The unresolved class name
        name: String,
    },

    /// The configured root rule does not exist
    MissingRoot {
        /// The configured root name
        name: String,
    },

    /// A repetition declares `minimum > maximum`
    InvertedBounds {
        /// The repetition rule name
        name: String,
        /// Declared minimum
        minimum: usize,
        /// Declared maximum
        maximum: usize,
    },

    /// A range class declares `low > high`
    InvertedRange {
        /// The class name
        name: String,
        /// Declared low bound
        low: char,
        /// Declared high bound
        high: char,
    },

    /// A class is (indirectly) defined in terms of itself
    CyclicClass {
        /// A class on the cycle
        name: String,
    },

    /// A rule declaration is structurally unusable
    InvalidRule {
        /// The rule name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Serialized declarations could not be decoded
    InvalidDeclarations {
        /// Decoder message
        reason: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateRule { name } => write!(f, "Duplicate Rule: {}", name),
            BuildError::DuplicateClass { name } => {
                write!(f, "Duplicate Character-Class: {}", name)
            }
            BuildError::NoSuchRule { name } => write!(f, "No Such Rule: {}", name),
            BuildError::NoSuchClass { name } => write!(f, "No Such Character-Class: {}", name),
            BuildError::MissingRoot { name } => {
                write!(f, "The root grammar rule does not exist: {:?}", name)
            }
            BuildError::InvertedBounds {
                name,
                minimum,
                maximum,
            } => write!(
                f,
                "Repetition {}: minimum {} exceeds maximum {}",
                name, minimum, maximum
            ),
            BuildError::InvertedRange { name, low, high } => write!(
                f,
                "Character-Class {}: range start {:?} exceeds range end {:?}",
                name, low, high
            ),
            BuildError::CyclicClass { name } => {
                write!(f, "Character-Class {} is defined in terms of itself", name)
            }
            BuildError::InvalidRule { name, reason } => {
                write!(f, "Invalid Rule {}: {}", name, reason)
            }
            BuildError::InvalidDeclarations { reason } => {
                write!(f, "Invalid grammar declarations: {}", reason)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Error that aborts a parse attempt
///
/// A parse that simply does not match is *not* an error.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Input exceeds maximum allowed size
    InputTooLarge {
        /// Size of the input in characters
        input_size: usize,
        /// Maximum allowed size
        max_size: usize,
    },

    /// Nested rule attempts exceeded the configured depth
    ///
    /// This is what runaway (typically indirectly left-recursive) grammars
    /// run into. The trace holds the most recent events before the abort.
    RecursionLimitExceeded {
        /// Depth reached
        depth: usize,
        /// Maximum allowed depth
        max_depth: usize,
        /// Snapshot of the tracer at the moment of the abort
        trace: Trace,
    },
}

impl ParseError {
    /// Trace captured when the attempt was aborted, if any
    pub fn trace(&self) -> Option<&Trace> {
        match self {
            ParseError::RecursionLimitExceeded { trace, .. } => Some(trace),
            ParseError::InputTooLarge { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InputTooLarge {
                input_size,
                max_size,
            } => {
                write!(
                    f,
                    "Input too large: {} characters exceeds limit of {} characters",
                    input_size, max_size
                )
            }
            ParseError::RecursionLimitExceeded {
                depth, max_depth, ..
            } => {
                write!(
                    f,
                    "Recursion limit exceeded: depth {} exceeds limit of {}",
                    depth, max_depth
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_display() {
        let err = BuildError::NoSuchRule {
            name: "expr".to_string(),
        };
        assert_eq!(err.to_string(), "No Such Rule: expr");

        let err = BuildError::InvertedBounds {
            name: "digits".to_string(),
            minimum: 3,
            maximum: 1,
        };
        assert!(err.to_string().contains("minimum 3 exceeds maximum 1"));
    }

    #[test]
    fn test_parse_error_trace_accessor() {
        let err = ParseError::InputTooLarge {
            input_size: 10,
            max_size: 5,
        };
        assert!(err.trace().is_none());
        assert!(err.to_string().contains("10 characters"));
    }
}
