use super::*;
use serde_json::json;

fn object_json(source: &str) -> Value {
    let entries = parse_object_literal(source).expect("parse object literal");
    Literal::Object(entries).to_json().expect("object has JSON form")
}

#[test]
fn parses_nested_plain_values() {
    let value = object_json(
        r#"{
            label: { input: { type: 'text', placeholder: "Buy now", max: 40 } },
            flags: [true, false, null, -1.5, 0x10],
            'quoted key': `plain template`,
        }"#,
    );
    assert_eq!(
        value,
        json!({
            "label": { "input": { "type": "text", "placeholder": "Buy now", "max": 40 } },
            "flags": [true, false, null, -1.5, 16],
            "quoted key": "plain template"
        })
    );
}

#[test]
fn keeps_declaration_order() {
    let entries = parse_object_literal("{ zeta: 1, alpha: 2, mid: 3 }").expect("parse");
    let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn repeated_key_keeps_first_position_and_last_value() {
    let value = object_json("{ a: 1, b: 2, a: 3 }");
    assert_eq!(serde_json::to_string(&value).expect("encode"), r#"{"a":3,"b":2}"#);
}

#[test]
fn non_literal_values_are_opaque_and_never_evaluated() {
    let entries = parse_object_literal(
        "{ type: String, default: () => ({ x: 1 }), compute() { return process.exit(1) }, \
         sum: 1 + 2, call: fetch('/x'), shorthand, ok: 'yes' }",
    )
    .expect("parse");
    let opaque: Vec<&str> = entries
        .iter()
        .filter(|(_, value)| *value == Literal::Opaque)
        .map(|(key, _)| key.as_str())
        .collect();
    assert_eq!(
        opaque,
        vec!["type", "default", "compute", "sum", "call", "shorthand"]
    );
    assert_eq!(
        Literal::Object(entries).to_json(),
        Some(json!({ "ok": "yes" }))
    );
}

#[test]
fn json_conversion_mirrors_encode_decode() {
    let value = object_json("{ u: undefined, n: NaN, i: -Infinity, list: [String, undefined, 1] }");
    assert_eq!(value, json!({ "n": null, "i": null, "list": [null, null, 1] }));
}

#[test]
fn spreads_and_computed_keys_are_skipped() {
    let value = object_json("{ ...base, [key]: 1, kept: 2 }");
    assert_eq!(value, json!({ "kept": 2 }));
}

#[test]
fn accessor_and_generator_members_are_opaque() {
    let entries =
        parse_object_literal("{ get size() { return 1 }, async load() {}, *items() {}, get: 4 }")
            .expect("parse");
    let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["size", "load", "items", "get"]);
    assert_eq!(entries[3].1, Literal::Number(4.0));
}

#[test]
fn unescapes_string_contents() {
    let value = object_json(r#"{ s: 'it\'s A\x42\u{1F600}\n' }"#);
    assert_eq!(value, json!({ "s": "it's AB\u{1F600}\n" }));
}

#[test]
fn rejects_non_object_input() {
    assert_eq!(
        parse_object_literal("['a', 'b']"),
        Err(LiteralError::NotAnObject)
    );
    assert_eq!(parse_object_literal(""), Err(LiteralError::UnexpectedEnd));
}

#[test]
fn rejects_unbalanced_object() {
    assert_eq!(
        parse_object_literal("{ a: { b: 1 }"),
        Err(LiteralError::UnexpectedEnd)
    );
}

#[test]
fn rejects_trailing_tokens() {
    assert!(matches!(
        parse_object_literal("{ a: 1 } extra"),
        Err(LiteralError::UnexpectedToken { .. })
    ));
}
