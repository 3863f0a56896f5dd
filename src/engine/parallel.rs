//! Batch parsing
//!
//! A [`Grammar`] is immutable after building, so many inputs can be parsed
//! against it at once. With the `parallel` feature the batch runs on rayon's
//! work-stealing pool; without it the same functions run sequentially.
//!
//! Results are always returned in input order.
//!
//! ```rust
//! use pegloom::GrammarBuilder;
//! use pegloom::engine::parallel::parse_batch_parallel;
//!
//! let mut g = GrammarBuilder::new();
//! g.set_root("word").plus("word", "letter").chr("letter", "az").range("az", 'a', 'z');
//! let grammar = g.build().unwrap();
//!
//! let results = parse_batch_parallel(&grammar, &["abc", "123", "xyz"]);
//! let ok: Vec<bool> = results.iter().map(|r| r.as_ref().unwrap().success()).collect();
//! assert_eq!(ok, vec![true, false, true]);
//! ```

use super::error::ParseError;
use super::grammar::Grammar;
use super::output::ParserOutput;
use super::parser::{Parser, ParserConfig};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Outcome of one input in a batch
pub type BatchResult = Result<ParserOutput, ParseError>;

/// Parse every input with the default parser configuration
#[cfg(feature = "rayon")]
pub fn parse_batch_parallel(grammar: &Grammar, inputs: &[&str]) -> Vec<BatchResult> {
    let parser = grammar.new_parser();
    inputs.par_iter().map(|input| parser.parse(input)).collect()
}

/// Parse every input with the default parser configuration
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_parallel(grammar: &Grammar, inputs: &[&str]) -> Vec<BatchResult> {
    let parser = grammar.new_parser();
    inputs.iter().map(|input| parser.parse(input)).collect()
}

/// Parse owned inputs
#[cfg(feature = "rayon")]
pub fn parse_batch_parallel_owned(grammar: &Grammar, inputs: Vec<String>) -> Vec<BatchResult> {
    let parser = grammar.new_parser();
    inputs
        .into_par_iter()
        .map(|input| parser.parse(&input))
        .collect()
}

/// Parse owned inputs
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_parallel_owned(grammar: &Grammar, inputs: Vec<String>) -> Vec<BatchResult> {
    let parser = grammar.new_parser();
    inputs.into_iter().map(|input| parser.parse(&input)).collect()
}

/// Configuration for batch parsing
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    /// Number of worker threads (None = rayon's global pool)
    pub num_threads: Option<usize>,
    /// Limits applied to every parse in the batch
    pub parser: ParserConfig,
}

impl ParallelConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads to use
    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    /// Set the per-parse limits
    pub fn with_parser_config(mut self, config: ParserConfig) -> Self {
        self.parser = config;
        self
    }
}

/// Parse every input under `config`
///
/// When a dedicated pool of `num_threads` cannot be created the batch falls
/// back to the global pool.
#[cfg(feature = "rayon")]
pub fn parse_batch_with_config(
    grammar: &Grammar,
    inputs: &[&str],
    config: &ParallelConfig,
) -> Vec<BatchResult> {
    let parser = Parser::with_config(grammar, config.parser);
    let run = || -> Vec<BatchResult> { inputs.par_iter().map(|input| parser.parse(input)).collect() };

    match config.num_threads {
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(run),
            Err(_e) => {
                log_debug!("Falling back to the global pool: {}", _e);
                run()
            }
        },
        None => run(),
    }
}

/// Parse every input under `config`
#[cfg(not(feature = "rayon"))]
pub fn parse_batch_with_config(
    grammar: &Grammar,
    inputs: &[&str],
    config: &ParallelConfig,
) -> Vec<BatchResult> {
    let parser = Parser::with_config(grammar, config.parser);
    inputs.iter().map(|input| parser.parse(input)).collect()
}
