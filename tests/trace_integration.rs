//! Integration tests for diagnostics
//!
//! Covers the bounded trace, failure reports, error positions under the
//! supported newline conventions, and recursion-limit aborts.

use pegloom::{
    GrammarBuilder, NewlineStyle, ParseError, ParserConfig, ReportOptions, TraceReason,
};

#[test]
fn test_trace_of_failed_parse() {
    let mut g = GrammarBuilder::new();
    g.set_root("pair")
        .sequence("pair", &["a", "b"])
        .str("a", "a")
        .str("b", "b");
    let grammar = g.build().unwrap();

    let output = grammar.new_parser().parse("ax").unwrap();
    let events: Vec<(&str, TraceReason, usize)> = output
        .trace()
        .elements()
        .iter()
        .map(|e| (e.rule(), e.reason(), e.position()))
        .collect();

    assert_eq!(
        events,
        vec![
            ("pair", TraceReason::Begin, 0),
            ("a", TraceReason::Begin, 0),
            ("a", TraceReason::Success, 1),
            ("b", TraceReason::Begin, 1),
            ("b", TraceReason::Fail, 2),
            ("pair", TraceReason::Fail, 1),
        ]
    );
    assert_eq!(output.trace().total(), 6);
}

#[test]
fn test_trace_capacity_keeps_most_recent() {
    let mut g = GrammarBuilder::new();
    g.set_root("many")
        .star("many", "x")
        .str("x", "x")
        .set_trace_count(4);
    let grammar = g.build().unwrap();

    let output = grammar.new_parser().parse("xxx").unwrap();
    let trace = output.trace();

    // many + 3 successful x + 0 extra attempts at end of input
    assert_eq!(trace.total(), 8);
    assert_eq!(trace.elements().len(), 4);
    let last = trace.last().unwrap();
    assert_eq!((last.rule(), last.reason()), ("many", TraceReason::Success));
}

#[test]
fn test_zero_trace_count_records_nothing() {
    let mut g = GrammarBuilder::new();
    g.set_root("x").str("x", "x").set_trace_count(0);
    let grammar = g.build().unwrap();

    let output = grammar.new_parser().parse("x").unwrap();
    assert!(output.trace().is_empty());
    assert_eq!(output.trace().total(), 2);
}

#[test]
fn test_report_sections() {
    let mut g = GrammarBuilder::new();
    g.set_root("doc")
        .sequence("doc", &["word", "nl", "word", "END"])
        .plus("word", "letter")
        .chr("letter", "az")
        .range("az", 'a', 'z')
        .str("nl", "\r\n");
    let grammar = g.build().unwrap();

    let output = grammar.new_parser().parse("abc\r\nde!").unwrap();
    assert!(!output.success());
    assert_eq!(output.length_of_consumption(), 7);

    // CRLF is guessed from the input
    let report = output.report(&ReportOptions::default());
    assert!(report.contains("  Line: #2\n  Column: #3\n"));
    assert!(report.contains("Length of Consumption: 7\n"));
    assert!(!report.contains("Tracer Records"));

    let verbose = output.report(&ReportOptions::verbose());
    assert!(verbose.contains("Tracer Records ("));
    assert!(verbose.contains("(Most Recent Call Last):"));
    assert!(verbose.ends_with("doc => FAIL @ 7\n"));
}

#[test]
fn test_error_position_per_newline_style() {
    let mut g = GrammarBuilder::new();
    g.set_root("never").str("never", "\r\r\rz");
    let grammar = g.build().unwrap();

    let output = grammar.new_parser().parse("\r\r\ry").unwrap();
    assert_eq!(output.length_of_consumption(), 3);

    let cr = output.error_position(NewlineStyle::Cr);
    assert_eq!((cr.line, cr.column), (4, 1));

    let lf = output.error_position(NewlineStyle::Lf);
    assert_eq!((lf.line, lf.column), (1, 4));
}

#[test]
fn test_recursion_limit_keeps_recent_events() {
    // expr = expr "+" | "1", never reaches "1"
    let mut g = GrammarBuilder::new();
    g.set_root("expr")
        .choose("expr", &["sum", "one"])
        .sequence("sum", &["expr", "plus"])
        .str("plus", "+")
        .str("one", "1")
        .set_trace_count(10);
    let grammar = g.build().unwrap();

    let parser = grammar.new_parser_with_config(ParserConfig::new().with_max_recursion_depth(100));
    match parser.parse("1+1") {
        Err(ParseError::RecursionLimitExceeded {
            depth,
            max_depth,
            trace,
        }) => {
            assert_eq!(max_depth, 100);
            assert_eq!(depth, 101);
            assert_eq!(trace.elements().len(), 10);
            assert!(trace.total() > 10);
            assert!(trace
                .elements()
                .iter()
                .all(|e| e.reason() == TraceReason::Begin));
        }
        other => panic!("expected recursion limit, got {:?}", other),
    }
}

#[test]
fn test_parse_error_display() {
    let mut g = GrammarBuilder::new();
    g.set_root("x").str("x", "x");
    let grammar = g.build().unwrap();

    let err = grammar
        .new_parser_with_config(ParserConfig::new().with_max_input_size(2))
        .parse("xxx")
        .unwrap_err();
    assert!(err.trace().is_none());
    assert!(!err.to_string().is_empty());
}
