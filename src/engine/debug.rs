//! Developer Experience Tools
//!
//! Debugging and visualization helpers for grammar authors.
//!
//! # Features
//! - Parse tree pretty printing
//! - Grammar visualization (Mermaid/DOT diagrams)
//! - Error context (source line with a caret)

use super::grammar::Grammar;
use super::rule::{Rule, RuleKind};
use super::source_location::{line_ranges, LinesAndColumns, NewlineStyle};
use super::tree::TreeNode;
use std::fmt::Write;

/// Parse tree pretty printer
pub struct TreePrinter {
    /// Indentation string
    indent: String,
    /// Maximum depth to print
    max_depth: Option<usize>,
    /// Print `line:column` spans instead of offsets
    newline: Option<NewlineStyle>,
}

impl TreePrinter {
    /// Create a new tree printer
    pub fn new() -> Self {
        Self {
            indent: "  ".to_string(),
            max_depth: None,
            newline: None,
        }
    }

    /// Set the indentation string
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Set the maximum depth to print
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Show spans as line/column ranges
    pub fn line_columns(mut self, style: NewlineStyle) -> Self {
        self.newline = Some(style);
        self
    }

    /// Render a tree, one node per line
    pub fn print(&self, node: &TreeNode) -> String {
        let table = self
            .newline
            .map(|style| LinesAndColumns::new(node.input(), style));
        let mut output = String::new();
        self.print_node(node, table.as_ref(), 0, &mut output);
        output
    }

    fn print_node(
        &self,
        node: &TreeNode,
        table: Option<&LinesAndColumns>,
        depth: usize,
        output: &mut String,
    ) {
        let indent = self.indent.repeat(depth);

        if let Some(max) = self.max_depth {
            if depth > max {
                writeln!(output, "{}...", indent).unwrap();
                return;
            }
        }

        let span = match table {
            Some(table) => table.span(node.start(), node.end()).to_string(),
            None => format!("{}..{}", node.start(), node.end()),
        };

        if node.is_leaf() {
            writeln!(output, "{}{} @{} {:?}", indent, node.rule(), span, node.text()).unwrap();
        } else {
            writeln!(output, "{}{} @{}", indent, node.rule(), span).unwrap();
            for child in node.children() {
                self.print_node(child, table, depth + 1, output);
            }
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Grammar visualizer
pub struct GrammarVisualizer<'a> {
    grammar: &'a Grammar,
}

impl<'a> GrammarVisualizer<'a> {
    /// Create a new grammar visualizer
    pub fn new(grammar: &'a Grammar) -> Self {
        Self { grammar }
    }

    /// Generate a Mermaid diagram
    pub fn to_mermaid(&self) -> String {
        let mut output = String::new();
        output.push_str("graph TD\n");

        writeln!(output, "  root[Root: {}]", self.grammar.root_rule().name()).unwrap();

        for (id, rule) in self.grammar.rules() {
            writeln!(
                output,
                "  r{}[\"{}: {}\"]",
                id.index(),
                escape(rule.name()),
                escape(&rule_label(rule))
            )
            .unwrap();
            for operand in rule.operands() {
                writeln!(output, "  r{} --> r{}", id.index(), operand.index()).unwrap();
            }
        }

        writeln!(output, "  root --> r{}", self.grammar.root().index()).unwrap();
        output
    }

    /// Generate a GraphViz DOT diagram
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph Grammar {\n");
        output.push_str("  rankdir=TB;\n");
        output.push_str("  node [shape=box];\n");

        for (id, rule) in self.grammar.rules() {
            writeln!(
                output,
                "  r{} [label=\"{}: {}\"]",
                id.index(),
                escape(rule.name()),
                escape(&rule_label(rule))
            )
            .unwrap();
            for operand in rule.operands() {
                writeln!(output, "  r{} -> r{}", id.index(), operand.index()).unwrap();
            }
        }

        writeln!(
            output,
            "  r{} [style=filled, fillcolor=lightblue]",
            self.grammar.root().index()
        )
        .unwrap();

        output.push_str("}\n");
        output
    }
}

fn rule_label(rule: &Rule) -> String {
    match rule.kind() {
        RuleKind::Literal(chars) => format!("str({:?})", chars.iter().collect::<String>()),
        RuleKind::Char(class) => format!("chr({})", class.name()),
        RuleKind::Sequence(ids) => format!("sequence({})", ids.len()),
        RuleKind::Choice(ids) => format!("choose({})", ids.len()),
        RuleKind::Repetition {
            minimum, maximum, ..
        } => {
            let max_str = maximum
                .map(|m| m.to_string())
                .unwrap_or_else(|| "∞".to_string());
            format!("repeat({}..{})", minimum, max_str)
        }
        kind => kind.label().to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Source code formatter for showing parse context
pub struct SourceFormatter;

impl SourceFormatter {
    /// Format the line holding `offset`, `context_lines` lines around it,
    /// and a caret under the offset
    pub fn format_line(
        input: &[char],
        offset: usize,
        context_lines: usize,
        style: NewlineStyle,
    ) -> String {
        let mut output = String::new();

        let lines = line_ranges(input, style);
        let position = LinesAndColumns::new(input, style).position(offset);
        let current_line = position.line - 1;

        let start_line = current_line.saturating_sub(context_lines);
        let end_line = (current_line + context_lines + 1).min(lines.len());

        for (i, &(line_start, line_end)) in lines.iter().enumerate().take(end_line).skip(start_line)
        {
            let content: String = input[line_start..line_end].iter().collect();
            writeln!(output, "{:4} | {}", i + 1, content).unwrap();

            if i == current_line {
                writeln!(output, "     | {}^", " ".repeat(position.column - 1)).unwrap();
            }
        }

        output
    }
}
