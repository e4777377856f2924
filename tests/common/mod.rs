//! Source generators shared by the property tests.
#![allow(dead_code)]

use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "struct", "let", "do", "if", "else", "for", "in", "while", "and", "or", "xor", "new", "true",
    "false",
];

const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "//", "and", "or", "xor", "==", "!=", "<", "<=", ">", ">=",
];

pub fn arb_ident() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,3}")
        .unwrap()
        .prop_filter("keywords are not identifiers", |s| {
            !KEYWORDS.contains(&s.as_str())
        })
}

fn arb_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_ident(),
        (0u32..10_000).prop_map(|n| n.to_string()),
        (0u32..100, 0u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
        Just("true".to_string()),
        Just("false".to_string()),
        prop::string::string_regex("\"[a-z ]{0,5}\"").unwrap(),
        prop::string::string_regex("'[a-z]'").unwrap(),
    ]
}

fn is_leaf(source: &str) -> bool {
    source
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Leaves stay bare, anything compound is parenthesized.
fn operand(source: String) -> String {
    if is_leaf(&source) {
        source
    } else {
        format!("({source})")
    }
}

/// Single-line expression sources that always parse.
pub fn arb_expression() -> impl Strategy<Value = String> {
    arb_leaf().prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(OPERATORS), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {op} {}", operand(l), operand(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(receiver, message)| format!("{} {}", operand(receiver), operand(message))),
            inner.clone().prop_map(|e| format!("-{}", operand(e))),
            inner.clone().prop_map(|e| format!("!{}", operand(e))),
            (inner.clone(), arb_ident()).prop_map(|(e, name)| format!("{}.{name}", operand(e))),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|elements| format!("[{}]", elements.join(", "))),
            prop::collection::vec(inner.clone(), 1..3).prop_map(|elements| match elements.len() {
                1 => format!("({},)", elements[0]),
                _ => format!("({})", elements.join(", ")),
            }),
            (arb_ident(), inner.clone())
                .prop_map(|(key, value)| format!("{{Message {key}: {value}}}")),
            inner.prop_map(|e| format!("({e})")),
        ]
    })
}

/// Wraps statement lines into the body of `Program.Main`.
pub fn program_with_body(lines: &[String]) -> String {
    let mut source = String::from("struct Program:\n  Main(system):\n");
    for line in lines {
        source.push_str("    ");
        source.push_str(line);
        source.push('\n');
    }
    source
}
