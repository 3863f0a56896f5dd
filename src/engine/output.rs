//! Result of one parse attempt

use super::source_location::{LinesAndColumns, NewlineStyle, SourcePosition};
use super::trace::Trace;
use super::tree::TreeNode;
use std::fmt::Write as _;
use std::sync::Arc;

/// What [`ParserOutput::report`] includes besides the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Approximate line and column of the syntax error
    pub estimate: bool,
    /// Exact length of consumption
    pub exact: bool,
    /// Recorded trace
    pub trace: bool,
    /// Newline convention for line numbers; `None` guesses from the input,
    /// falling back to the platform convention
    pub newline: Option<NewlineStyle>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            estimate: true,
            exact: true,
            trace: false,
            newline: None,
        }
    }
}

impl ReportOptions {
    /// Include everything
    pub fn verbose() -> Self {
        Self {
            trace: true,
            ..Self::default()
        }
    }
}

/// Tree (if the root matched), farthest position and trace of a parse
#[derive(Debug, Clone)]
pub struct ParserOutput {
    input: Arc<[char]>,
    tree: Option<TreeNode>,
    farthest_position: usize,
    trace: Trace,
}

impl ParserOutput {
    pub(crate) fn new(
        input: Arc<[char]>,
        tree: Option<TreeNode>,
        farthest_position: usize,
        trace: Trace,
    ) -> Self {
        Self {
            input,
            tree,
            farthest_position,
            trace,
        }
    }

    /// Whether the root rule matched
    ///
    /// The root does not have to consume the whole input; grammars that
    /// require it end the root with `END`.
    #[inline]
    pub fn success(&self) -> bool {
        self.tree.is_some()
    }

    /// Root of the parse tree
    #[inline]
    pub fn parse_tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    /// Take the parse tree out of the output
    pub fn into_parse_tree(self) -> Option<TreeNode> {
        self.tree
    }

    /// Offset of the farthest character examined
    ///
    /// On failure this is the best estimate of where the syntax error is.
    #[inline]
    pub fn length_of_consumption(&self) -> usize {
        self.farthest_position
    }

    /// Events recorded during the attempt
    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Input that was parsed
    #[inline]
    pub fn input(&self) -> &Arc<[char]> {
        &self.input
    }

    /// Line and column of [`length_of_consumption`](ParserOutput::length_of_consumption)
    pub fn error_position(&self, style: NewlineStyle) -> SourcePosition {
        LinesAndColumns::new(&self.input, style).position(self.farthest_position)
    }

    /// Human-readable summary
    pub fn report(&self, options: &ReportOptions) -> String {
        let mut out = String::new();

        if self.success() {
            out.push_str("Parsing Succeeded!\n");
            return out;
        }

        out.push_str("Parsing Failed!\n");

        if options.estimate {
            let style = options.newline.unwrap_or_else(|| {
                NewlineStyle::guess_chars(&self.input, NewlineStyle::from_system())
            });
            let position = self.error_position(style);
            writeln!(out).unwrap();
            writeln!(out, "Syntax Error Position (Approximate):").unwrap();
            writeln!(out, "  Line: #{}", position.line).unwrap();
            writeln!(out, "  Column: #{}", position.column).unwrap();
        }

        if options.exact {
            writeln!(out).unwrap();
            writeln!(out, "Length of Consumption: {}", self.farthest_position).unwrap();
        }

        if options.trace {
            writeln!(out).unwrap();
            write!(out, "{}", self.trace).unwrap();
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::builder::GrammarBuilder;

    fn lines_grammar() -> crate::engine::grammar::Grammar {
        let mut g = GrammarBuilder::new();
        g.set_root("doc")
            .sequence("doc", &["line", "nl", "line", "END"])
            .str("line", "abc")
            .str("nl", "\n");
        g.build().unwrap()
    }

    #[test]
    fn test_report_success() {
        let grammar = lines_grammar();
        let output = grammar.new_parser().parse("abc\nabc").unwrap();
        assert_eq!(output.report(&ReportOptions::verbose()), "Parsing Succeeded!\n");
    }

    #[test]
    fn test_report_failure_position() {
        let grammar = lines_grammar();
        let output = grammar.new_parser().parse("abc\nabX").unwrap();
        assert!(!output.success());
        assert_eq!(output.length_of_consumption(), 6);

        let position = output.error_position(NewlineStyle::Lf);
        assert_eq!((position.line, position.column), (2, 3));

        let report = output.report(&ReportOptions {
            newline: Some(NewlineStyle::Lf),
            ..ReportOptions::default()
        });
        assert_eq!(
            report,
            "Parsing Failed!\n\
             \n\
             Syntax Error Position (Approximate):\n  \
             Line: #2\n  \
             Column: #3\n\
             \n\
             Length of Consumption: 6\n"
        );
    }

    #[test]
    fn test_report_with_trace() {
        let grammar = lines_grammar();
        let output = grammar.new_parser().parse("x").unwrap();
        let report = output.report(&ReportOptions {
            estimate: false,
            exact: false,
            trace: true,
            newline: None,
        });
        assert!(report.starts_with("Parsing Failed!\n\nTracer Records ("));
        assert!(report.contains("doc => FAIL @ 0"));
    }
}
