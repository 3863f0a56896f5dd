//! Parser entry point
//!
//! A [`Parser`] borrows an immutable [`Grammar`] and runs independent parse
//! attempts against it. Every call to [`Parser::parse`] builds a fresh
//! [`State`] with its own tracer, so parsers created from one grammar can
//! run concurrently without interfering.

use super::error::ParseError;
use super::grammar::Grammar;
use super::matcher::Matcher;
use super::output::ParserOutput;
use super::state::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default maximum input size in characters (100M)
pub const DEFAULT_MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

/// Default maximum number of nested rule attempts
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 1000;

/// Configuration options for the parser
///
/// A limit of `0` disables that check.
///
/// # Example
///
/// ```rust
/// use pegloom::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_max_input_size(10 * 1024 * 1024)
///     .with_max_recursion_depth(500);
/// assert_eq!(config.max_recursion_depth, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum allowed input size in characters
    pub max_input_size: usize,

    /// Maximum allowed nesting of rule attempts
    pub max_recursion_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    /// Set the maximum recursion depth
    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }
}

/// Runs parse attempts for one grammar
#[derive(Debug, Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
    config: ParserConfig,
}

impl<'g> Parser<'g> {
    /// Create a parser with the default configuration
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::with_config(grammar, ParserConfig::default())
    }

    /// Create a parser with custom limits
    pub fn with_config(grammar: &'g Grammar, config: ParserConfig) -> Self {
        Self { grammar, config }
    }

    /// Grammar this parser runs
    #[inline]
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Active limits
    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a string
    ///
    /// Non-matching input is `Ok` with [`ParserOutput::success`] false; `Err`
    /// means a limit aborted the attempt.
    pub fn parse(&self, input: &str) -> Result<ParserOutput, ParseError> {
        self.parse_chars(input.chars().collect::<Vec<_>>().into())
    }

    /// Parse a character buffer, sharing it with the resulting tree
    pub fn parse_chars(&self, input: Arc<[char]>) -> Result<ParserOutput, ParseError> {
        self.check_input_size(input.len())?;

        log_debug!(
            "Starting parse: input_len={}, root={}",
            input.len(),
            self.grammar.root_rule().name()
        );

        let mut state = State::new(Arc::clone(&input), self.grammar.trace_count());
        let matcher = Matcher::new(self.grammar, self.config.max_recursion_depth);

        let tree = match matcher.match_rule(self.grammar.root(), &mut state) {
            Ok(tree) => tree,
            Err(e) => {
                log_debug!("Parse aborted: {}", e);
                return Err(e);
            }
        };

        let farthest = state.farthest_position();
        log_debug!(
            "Parse finished: success={}, farthest_position={}",
            tree.is_some(),
            farthest
        );

        Ok(ParserOutput::new(input, tree, farthest, state.into_tracer().output()))
    }

    fn check_input_size(&self, size: usize) -> Result<(), ParseError> {
        let max = self.config.max_input_size;
        if max > 0 && size > max {
            return Err(ParseError::InputTooLarge {
                input_size: size,
                max_size: max,
            });
        }
        Ok(())
    }
}
