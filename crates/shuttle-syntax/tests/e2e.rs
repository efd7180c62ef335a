//! End-to-end tests for shuttle-syntax using insta for snapshot testing.
//!
//! These tests drive the public API the way a front end would: compile a
//! query, enumerate matches, rewrite text, and inspect the tree.

use insta::assert_snapshot;
use rstest::{fixture, rstest};

use shuttle_syntax::inspect::{node_at_offset, outline};
use shuttle_syntax::{
    Matcher, Parser, Query, QueryErrorKind, QueryStats, SupportedLanguage, Transformation,
    TransformationError,
};

/// Fixture providing a C++ parser.
#[fixture]
fn cpp_parser() -> Parser {
    Parser::new(SupportedLanguage::Cpp).unwrap_or_else(|err| panic!("parser: {err}"))
}

fn compile(pattern: &str) -> Query {
    Query::compile(SupportedLanguage::Cpp, pattern).unwrap_or_else(|err| panic!("query: {err}"))
}

// =============================================================================
// Query compilation
// =============================================================================

#[test]
fn unbalanced_query_points_at_the_first_unmatched_token() {
    let pattern = "(identifier @id";
    let Err(error) = Query::compile(SupportedLanguage::Cpp, pattern) else {
        panic!("query should not compile");
    };

    assert_eq!(error.kind(), QueryErrorKind::Syntax);
    assert_eq!(error.byte_offset(), 0);
    assert_eq!(error.highlight_span(pattern), 0..1);
    assert_snapshot!(error.to_string(), @"syntax error in query at 1:1: unclosed '('");
}

#[test]
fn multi_line_query_errors_report_line_and_column() {
    let pattern = "(identifier) @id\n  (no_such_kind) @x";
    let Err(error) = Query::compile(SupportedLanguage::Cpp, pattern) else {
        panic!("query should not compile");
    };

    assert_eq!(error.kind(), QueryErrorKind::NodeType);
    assert_eq!((error.line(), error.column()), (2, 4));
    let span = error.highlight_span(pattern);
    assert_eq!(pattern.get(span), Some("no_such_kind"));
}

// =============================================================================
// Matching
// =============================================================================

#[rstest]
fn matches_list_captures_in_document_order(mut cpp_parser: Parser) {
    let parsed = cpp_parser
        .parse("int foo;\ndouble bar;\n")
        .unwrap_or_else(|| panic!("parse"));
    let query = compile("(declaration type: (_) @type declarator: (_) @name)");
    let mut matcher = Matcher::new();

    let lines: Vec<String> = matcher
        .execute(&query, &parsed)
        .flat_map(|found| {
            let pattern = found.pattern_index();
            found
                .captures()
                .iter()
                .map(|capture| {
                    let (line, column) = capture.start_position();
                    format!(
                        "{pattern} {} {} {line}:{column} {:?}",
                        capture.name(),
                        capture.kind(),
                        capture.text()
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect();

    assert_snapshot!(lines.join("\n"), @r#"
    0 type primitive_type 1:1 "int"
    0 name identifier 1:5 "foo"
    0 type primitive_type 2:1 "double"
    0 name identifier 2:8 "bar"
    "#);
}

#[rstest]
fn statistics_count_every_capture(mut cpp_parser: Parser) {
    let parsed = cpp_parser
        .parse("int foo; int bar;")
        .unwrap_or_else(|| panic!("parse"));
    let query = compile("(identifier) @id\n(primitive_type) @type");

    let stats = QueryStats::collect(&query, &parsed);

    assert_snapshot!(stats.to_string(), @"2 patterns, 4 matches, 4 captures");
}

// =============================================================================
// Transformation
// =============================================================================

#[test]
fn single_iteration_renames_the_identifier() {
    let mut rewrite = Transformation::new("int foo;", compile("(identifier) @id"), "${id}_renamed")
        .unwrap_or_else(|err| panic!("transformation: {err}"));

    let once = rewrite
        .apply_once("int foo;")
        .unwrap_or_else(|err| panic!("iteration: {err}"));

    assert_eq!(once.as_deref(), Some("int foo_renamed;"));
}

#[test]
fn self_matching_template_fails_after_exactly_one_hundred_replacements() {
    let mut rewrite = Transformation::new("int foo;", compile("(identifier) @id"), "${id}_renamed")
        .unwrap_or_else(|err| panic!("transformation: {err}"));

    let result = rewrite.run();

    assert_eq!(
        result,
        Err(TransformationError::MaxReplacementsExceeded { limit: 100 })
    );
    assert_eq!(rewrite.replacements_made(), 100);
    assert_snapshot!(
        TransformationError::MaxReplacementsExceeded { limit: 100 }.to_string(),
        @"exceeded max replacements (100)"
    );
}

#[test]
fn rewrite_of_a_function_signature() {
    let source = "int add(int a, int b) { return a + b; }\n";
    let query = compile(
        "(function_definition declarator: (function_declarator declarator: (identifier) @name \
         parameters: (parameter_list) @params)) @fn",
    );
    let mut rewrite = Transformation::new(source, query, "int ${name}${params};")
        .unwrap_or_else(|err| panic!("transformation: {err}"));

    let output = rewrite
        .run()
        .unwrap_or_else(|err| panic!("run: {err}"));

    assert_snapshot!(output.trim_end(), @"int add(int a, int b);");
    assert_eq!(rewrite.replacements_made(), 1);
}

#[test]
fn strict_mode_reports_the_first_syntax_error() {
    let mut rewrite = Transformation::new("int foo(", compile("(identifier) @id"), "${id}")
        .unwrap_or_else(|err| panic!("transformation: {err}"))
        .require_valid_syntax(true);

    let Err(TransformationError::Parse { message }) = rewrite.run() else {
        panic!("strict mode should reject the source");
    };

    assert!(message.contains("1:"), "message: {message}");
}

#[test]
fn unbound_capture_aborts_without_partial_output() {
    let query = compile("(identifier) @id\n(string_literal) @text");
    let mut rewrite = Transformation::new("int foo;", query, "${text}")
        .unwrap_or_else(|err| panic!("transformation: {err}"));

    assert_eq!(
        rewrite.run(),
        Err(TransformationError::UnboundCapture {
            name: "text".to_owned()
        })
    );
    assert_eq!(rewrite.source(), "int foo;");
}

// =============================================================================
// Inspection
// =============================================================================

#[rstest]
fn outline_renders_named_nodes_with_fields(mut cpp_parser: Parser) {
    let parsed = cpp_parser
        .parse("int foo;")
        .unwrap_or_else(|| panic!("parse"));

    let rendered = outline(&parsed, true).to_string();

    assert_snapshot!(rendered.trim_end(), @r"
    translation_unit [0, 0] - [0, 8]
      declaration [0, 0] - [0, 8]
        type: primitive_type [0, 0] - [0, 3]
        declarator: identifier [0, 4] - [0, 7]
    ");
}

#[rstest]
fn node_lookup_walks_to_the_innermost_node(mut cpp_parser: Parser) {
    let parsed = cpp_parser
        .parse("int add(int a, int b);")
        .unwrap_or_else(|| panic!("parse"));

    let node = node_at_offset(&parsed, 12).unwrap_or_else(|| panic!("node"));

    assert_eq!(node.kind(), "identifier");
    assert_eq!(parsed.node_text(node), "a");
}
