use milisp::{Node, lex, parse};
use proptest::prelude::*;

/// Whitespace, comments and newlines in any mix
fn blank_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(" ".to_owned()),
            Just("\t".to_owned()),
            Just("\r\n".to_owned()),
            Just("\x0c".to_owned()),
            "#[^\n]*\n",
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

fn symbol() -> impl Strategy<Value = String> {
    "[a-zA-Z_+*/<>=!?-][a-zA-Z0-9_+*/<>=!?.-]{0,8}"
        .prop_filter("must not read as a number", |s| s.parse::<f64>().is_err())
}

fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        (-1.0e9..1.0e9f64).prop_map(Node::Number),
        any::<String>().prop_map(Node::Text),
        symbol().prop_map(Node::Symbol),
    ]
}

fn tree() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(5, 64, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Node::List)
    })
}

proptest! {
    /// Text holding only whitespace and comments lexes to nothing and
    /// never parses.
    #[test]
    fn blank_text_has_no_tokens(text in blank_text()) {
        prop_assert!(lex(&text).unwrap().is_empty());
        prop_assert!(parse(&text).is_err());
    }

    /// Rendering a tree and parsing it back gives the same tree
    #[test]
    fn rendering_parses_back(node in tree()) {
        let rendered = node.to_string();
        prop_assert_eq!(parse(&rendered).unwrap(), node);
    }

    /// Arbitrary input yields a tree or an error, never a panic
    #[test]
    fn parser_does_not_panic(s in "\\PC*") {
        let _ = parse(&s);
    }

    /// Wrapping a form in parens adds exactly one level of nesting
    #[test]
    fn parens_add_one_level(node in tree()) {
        let wrapped = format!("(f {})", node);
        let parsed = parse(&wrapped).unwrap();
        prop_assert_eq!(parsed.depth(), node.depth() + 1);
    }
}
