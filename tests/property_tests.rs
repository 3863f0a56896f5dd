//! Property-based tests using proptest
//!
//! These tests use property-based testing to verify parser behavior across
//! a wide range of inputs.

use pegloom::{Grammar, GrammarBuilder, State, Traversal, TreeNode};
use proptest::prelude::*;
use std::sync::Arc;

/// A grammar touching every rule variant
///
/// ```text
/// doc    = item+ END
/// item   = &letter word | number | sum | punct
/// word   = letter+ !digit
/// number = digit{1,3}
/// sum    = number : "+" , number
/// punct  = "," | ";"
/// ```
fn kitchen_sink() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.set_root("doc")
        .sequence("doc", &["items", "END"])
        .plus("items", "item")
        .choose("item", &["word-item", "sum", "number", "punct"])
        .sequence("word-item", &["peek-letter", "word"])
        .and("peek-letter", "letter")
        .sequence("word", &["letters", "no-digit"])
        .plus("letters", "letter")
        .not("no-digit", "digit")
        .repeat("number", "digit", 1, Some(3))
        .sequence_dlr("sum", "number", &["plus", "number"])
        .str("plus", "+")
        .choose("punct", &["comma", "semi"])
        .str("comma", ",")
        .str("semi", ";")
        .chr("letter", "ab")
        .chr("digit", "01")
        .range("ab", 'a', 'b')
        .range("01", '0', '1');
    g.build().unwrap()
}

fn chars(s: &str) -> Arc<[char]> {
    s.chars().collect::<Vec<_>>().into()
}

fn check_spans(node: &TreeNode, input_len: usize) -> Result<(), TestCaseError> {
    prop_assert!(node.end() <= input_len);
    if !node.is_leaf() {
        let first = &node.children()[0];
        let last = &node.children()[node.child_count() - 1];
        prop_assert_eq!((node.start(), node.end()), (first.start(), last.end()));
    }
    for child in node.children() {
        check_spans(child, input_len)?;
    }
    Ok(())
}

fn rules(grammar: &Grammar) -> Vec<pegloom::RuleId> {
    grammar.rules().map(|(id, _)| id).collect()
}

proptest! {
    /// Every node lies inside the input and covers exactly its children
    #[test]
    fn test_span_invariant(input in "[ab01+,;x]{0,24}") {
        let grammar = kitchen_sink();
        let output = grammar.new_parser().parse(&input).unwrap();
        if let Some(tree) = output.parse_tree() {
            check_spans(tree, input.chars().count())?;
        }
    }

    /// Failing rules leave the cursor where they started
    #[test]
    fn test_failure_restores_position(input in "[ab01+,;x]{0,12}", offset in 0usize..12) {
        let grammar = kitchen_sink();
        let text = chars(&input);
        let offset = offset.min(text.len());

        for id in rules(&grammar) {
            let mut state = State::new(Arc::clone(&text), 0);
            for _ in 0..offset {
                state.next();
            }
            let before = state.position();
            let result = grammar.match_rule(id, &mut state).unwrap();
            match result {
                None => prop_assert_eq!(state.position(), before),
                Some(node) => {
                    prop_assert_eq!(node.start().min(before), before);
                    prop_assert!(state.position() >= before);
                }
            }
        }
    }

    /// Predicates never move the cursor, whether they match or not
    #[test]
    fn test_predicates_do_not_move_cursor(input in "[ab01x]{0,8}") {
        let grammar = kitchen_sink();
        let text = chars(&input);

        for name in ["peek-letter", "no-digit", "END"] {
            let id = grammar.rule_id(name).unwrap();
            let mut state = State::new(Arc::clone(&text), 0);
            let before_farthest = state.farthest_position();
            let result = grammar.match_rule(id, &mut state).unwrap();
            prop_assert_eq!(state.position(), 0);
            if name == "END" {
                prop_assert_eq!(state.farthest_position(), before_farthest);
            }
            if let Some(node) = result {
                if name != "peek-letter" {
                    prop_assert_eq!(node.length(), 0);
                }
            }
        }
    }

    /// Each traversal visits every node once, and restarting it repeats it
    #[test]
    fn test_traversals_are_idempotent(input in "[ab01+,;]{1,24}") {
        let grammar = kitchen_sink();
        let output = grammar.new_parser().parse(&input).unwrap();
        if let Some(tree) = output.parse_tree() {
            let total = tree.dfs().count();
            for order in [Traversal::DepthFirst, Traversal::BreadthFirst, Traversal::LeavesFirst] {
                let first: Vec<*const TreeNode> =
                    tree.traverse(order).map(|n| n as *const TreeNode).collect();
                let second: Vec<*const TreeNode> =
                    tree.traverse(order).map(|n| n as *const TreeNode).collect();
                prop_assert_eq!(first.len(), total);
                prop_assert_eq!(&first, &second);

                let mut unique = first.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), total);
            }
        }
    }

    /// A grammar of `[a-z]+` accepts exactly the non-empty lowercase prefix
    #[test]
    fn test_plus_consumes_longest_prefix(word in "[a-z]{0,10}", tail in "[0-9]{0,3}") {
        let mut g = GrammarBuilder::new();
        g.set_root("word").plus("word", "letter").chr("letter", "az").range("az", 'a', 'z');
        let grammar = g.build().unwrap();

        let output = grammar.new_parser().parse(&format!("{}{}", word, tail)).unwrap();
        prop_assert_eq!(output.success(), !word.is_empty());
        if let Some(tree) = output.parse_tree() {
            prop_assert_eq!(tree.text(), word.clone());
            prop_assert_eq!(tree.child_count(), word.len());
        }
    }

    /// Parsing is deterministic
    #[test]
    fn test_parse_is_deterministic(input in "[ab01+,;]{0,16}") {
        let grammar = kitchen_sink();
        let parser = grammar.new_parser();
        let first = parser.parse(&input).unwrap();
        let second = parser.parse(&input).unwrap();

        prop_assert_eq!(first.success(), second.success());
        prop_assert_eq!(first.length_of_consumption(), second.length_of_consumption());
        prop_assert_eq!(first.parse_tree(), second.parse_tree());
        prop_assert_eq!(first.trace(), second.trace());
    }
}
