//! Infix calculator
//!
//! Left-associative `+ - * /` with parentheses, built from left-recursive
//! sequences and evaluated with a [`Visitor`].
//!
//! Run with: cargo run --example calculator -- "1 + 2 * (3 - 4) / 5"

use pegloom::{walk, BuildError, Grammar, GrammarBuilder, ReportOptions, TreeNode, Visitor};

/// ```text
/// expr    = sp sum sp END
/// sum     = product : sp add-op sp , product
/// product = factor : sp mul-op sp , factor
/// factor  = number | "(" sp sum sp ")"
/// ```
fn calculator() -> Result<Grammar, BuildError> {
    let mut g = GrammarBuilder::new();
    g.set_root("expr")
        .sequence("expr", &["sp", "sum", "sp", "END"])
        .choose("sum", &["add", "product"])
        .sequence_dlr("add", "product", &["add-op", "product"])
        .choose("product", &["mul", "factor"])
        .sequence_dlr("mul", "factor", &["mul-op", "factor"])
        .choose("factor", &["number", "group"])
        .sequence("group", &["open", "sp", "sum", "sp", "close"])
        .sequence("add-op", &["sp", "add-char", "sp"])
        .sequence("mul-op", &["sp", "mul-char", "sp"])
        .chr("add-char", "additive")
        .chr("mul-char", "multiplicative")
        .plus("number", "digit")
        .chr("digit", "0-9")
        .star("sp", "space")
        .str("space", " ")
        .str("open", "(")
        .str("close", ")")
        .range("0-9", '0', '9')
        .range("plus", '+', '+')
        .range("minus", '-', '-')
        .range("times", '*', '*')
        .range("slash", '/', '/')
        .combine("additive", &["plus", "minus"])
        .combine("multiplicative", &["times", "slash"]);
    g.build()
}

/// Evaluates a parse tree bottom-up on a value stack
#[derive(Default)]
struct Evaluator {
    stack: Vec<f64>,
}

impl Evaluator {
    fn apply(&mut self, op: &str) {
        let right = self.stack.pop().unwrap_or(f64::NAN);
        let left = self.stack.pop().unwrap_or(f64::NAN);
        self.stack.push(match op {
            "+" => left + right,
            "-" => left - right,
            "*" => left * right,
            "/" => left / right,
            _ => f64::NAN,
        });
    }
}

impl Visitor for Evaluator {
    fn visit(&mut self, node: &TreeNode) {
        match node.rule() {
            "number" => self.stack.push(node.text().parse().unwrap_or(f64::NAN)),
            // every reduction is [left, operator, right]
            "add" | "mul" => {
                if let [left, op, right] = node.children() {
                    self.visit(left);
                    self.visit(right);
                    self.apply(op.text().trim());
                }
            }
            "sp" | "END" => {}
            _ => self.visit_unknown(node),
        }
    }
}

fn evaluate(grammar: &Grammar, input: &str) -> Result<f64, String> {
    let output = grammar
        .new_parser()
        .parse(input)
        .map_err(|e| e.to_string())?;

    let tree = match output.parse_tree() {
        Some(tree) => tree,
        None => return Err(output.report(&ReportOptions::default())),
    };

    let mut evaluator = Evaluator::default();
    walk(&mut evaluator, tree);
    evaluator
        .stack
        .pop()
        .ok_or_else(|| "empty expression".to_string())
}

fn main() {
    let grammar = match calculator() {
        Ok(grammar) => grammar,
        Err(e) => {
            eprintln!("grammar error: {}", e);
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<&str> = if args.is_empty() {
        vec!["1 + 2 * 3", "(1 + 2) * 3", "10 - 4 - 3", "8 / (3 - 3)", "2 * (3 +"]
    } else {
        args.iter().map(String::as_str).collect()
    };

    for input in inputs {
        match evaluate(&grammar, input) {
            Ok(value) => println!("{} = {}", input, value),
            Err(report) => println!("{}\n{}", input, report),
        }
    }
}
