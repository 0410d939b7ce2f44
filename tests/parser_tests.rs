//! Parser tests

use milisp::lexer::tokenize;
use milisp::{LexError, LispError, Node, parse, parse_tokens};
use pretty_assertions::assert_eq;

fn sym(name: &str) -> Node {
    Node::symbol(name)
}

#[test]
fn test_parse_number() {
    assert_eq!(parse("1").unwrap(), Node::Number(1.0));
}

#[test]
fn test_parse_text() {
    assert_eq!(parse("\"ok\"").unwrap(), Node::text("ok"));
}

#[test]
fn test_parse_symbol_with_surrounding_comments() {
    assert_eq!(parse("# lead\n  x  # trail").unwrap(), sym("x"));
}

#[test]
fn test_parse_single_element_list() {
    assert_eq!(parse("(a)").unwrap(), Node::list([sym("a")]));
}

#[test]
fn test_parse_nesting_follows_parens() {
    assert_eq!(
        parse("(a (b c))").unwrap(),
        Node::list([sym("a"), Node::list([sym("b"), sym("c")])])
    );
}

#[test]
fn test_parse_empty_list() {
    assert_eq!(parse("()").unwrap(), Node::List(vec![]));
    assert_eq!(
        parse("(f ())").unwrap(),
        Node::list([sym("f"), Node::List(vec![])])
    );
}

#[test]
fn test_parse_operation_position_form() {
    assert_eq!(
        parse("((op \"+\") x 2)").unwrap(),
        Node::list([
            Node::list([sym("op"), Node::text("+")]),
            sym("x"),
            Node::Number(2.0),
        ])
    );
}

#[test]
fn test_parse_multiline_program() {
    let source = r#"
(prog                     # execute all following expressions
    (set "x" 1)           # x = 1
    (loop "i" 1 N         # for i = 1; i <= N; i++
        (set "x" (* x i)) # x = x * i
    )
    x                     # return x
)
"#;
    let ast = parse(source).unwrap();
    insta::assert_snapshot!(
        ast.to_string(),
        @r#"(prog (set "x" 1) (loop "i" 1 N (set "x" (* x i))) x)"#
    );
}

#[test]
fn test_parse_empty_fails() {
    let err = parse("").unwrap_err();
    assert!(matches!(err, LispError::UnexpectedEof { .. }));
    assert_eq!(err.to_string(), "Unexpected end of input");
}

#[test]
fn test_parse_comment_only_fails() {
    let err = parse("  # nothing here\n").unwrap_err();
    assert!(matches!(err, LispError::UnexpectedEof { .. }));
}

#[test]
fn test_parse_lone_close_fails() {
    assert!(matches!(
        parse(")").unwrap_err(),
        LispError::UnmatchedClose { .. }
    ));
}

#[test]
fn test_parse_unclosed_fails() {
    assert!(matches!(
        parse("(a").unwrap_err(),
        LispError::UnexpectedEof { .. }
    ));
    assert!(matches!(
        parse("(a (b c)").unwrap_err(),
        LispError::UnexpectedEof { .. }
    ));
}

#[test]
fn test_parse_extra_close_fails() {
    let err = parse("(a))").unwrap_err();
    assert!(matches!(err, LispError::UnmatchedClose { .. }));
    assert_eq!(err.offset(), 3);
}

#[test]
fn test_parse_trailing_form_fails() {
    assert!(matches!(
        parse("(a) (b)").unwrap_err(),
        LispError::TrailingTokens { .. }
    ));
    assert!(matches!(
        parse("1 2").unwrap_err(),
        LispError::TrailingTokens { .. }
    ));
}

#[test]
fn test_parse_propagates_lex_error() {
    let err = parse("(a \\)").unwrap_err();
    match err {
        LispError::Lex(LexError::UnexpectedInput { .. }) => {}
        other => panic!("Expected lex error, got {:?}", other),
    }
}

#[test]
fn test_parse_tokens_from_lexer() {
    let ast = parse_tokens(tokenize("(f 1 \"two\")")).unwrap();
    assert_eq!(
        ast,
        Node::list([sym("f"), Node::Number(1.0), Node::text("two")])
    );
}

#[test]
fn test_parse_deep_nesting() {
    let depth = 200;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let ast = parse(&source).unwrap();
    assert_eq!(ast.depth(), depth);
}

#[test]
fn test_ast_json() {
    let ast = parse("(f 1 \"a\")").unwrap();
    let json = serde_json::to_string(&ast).unwrap();
    assert_eq!(
        json,
        r#"{"List":[{"Symbol":"f"},{"Number":1.0},{"Text":"a"}]}"#
    );
    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ast);
}
