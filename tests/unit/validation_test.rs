//! Unit tests for structural validation

use structconv::parser::payload::encode_payload;
use structconv::validation::ComparisonKind;
use structconv::{convert_document, validate_conversion, ConversionConfig, Validator};

fn b64(text: &str) -> String {
    encode_payload(text.as_bytes())
}

#[test]
fn test_equivalent_xml_and_json() {
    let outcome = validate_conversion(
        "xml",
        "json",
        &b64("<note>test</note>"),
        &b64(r#"{"note": "test"}"#),
        "{}",
    );
    assert!(outcome.is_valid);
    assert_eq!(outcome.comparison_kind, ComparisonKind::StructuralEquality);
    assert_eq!(outcome.src_format, "xml");
    assert_eq!(outcome.dst_format, "json");
}

#[test]
fn test_value_mismatch() {
    let outcome = validate_conversion(
        "xml",
        "json",
        &b64("<root><val>1</val></root>"),
        &b64(r#"{"root": {"val": "2"}}"#),
        "{}",
    );
    assert!(!outcome.is_valid);
    assert_eq!(
        outcome.reason.as_deref(),
        Some("documents differ at $.root.val: string \"1\" vs string \"2\"")
    );
}

#[test]
fn test_converted_output_validates_against_source() {
    let xml = b64("<shop><item>a</item><item>b</item><owner id=\"7\">Ann</owner></shop>");
    let converted = convert_document("xml", "json", &xml);
    let outcome = validate_conversion("xml", "json", &xml, converted.payload.as_deref().unwrap(), "");
    assert!(outcome.is_valid, "{:?}", outcome.reason);
}

#[test]
fn test_same_format_comparison() {
    let outcome = validate_conversion(
        "json",
        "JSON",
        &b64(r#"{"a": [1, 2], "b": {"c": null}}"#),
        &b64(r#"{"b": {"c": null}, "a": [1, 2]}"#),
        "{}",
    );
    assert!(outcome.is_valid);
}

#[test]
fn test_sequence_order_matters() {
    let outcome = validate_conversion(
        "json",
        "json",
        &b64("[1, 2, 3]"),
        &b64("[3, 2, 1]"),
        "{}",
    );
    assert!(!outcome.is_valid);
}

#[test]
fn test_single_child_versus_one_element_array() {
    let outcome = validate_conversion(
        "xml",
        "json",
        &b64("<list><item>a</item></list>"),
        &b64(r#"{"list": {"item": ["a"]}}"#),
        "{}",
    );
    assert!(!outcome.is_valid);
}

#[test]
fn test_invalid_inputs_yield_invalid_outcomes() {
    let good = b64(r#"{"a": 1}"#);

    let bad_json = validate_conversion("json", "json", &good, &b64("{\"a\": "), "{}");
    assert!(!bad_json.is_valid);
    assert!(bad_json
        .reason
        .unwrap()
        .starts_with("destination: JSON Parsing Error: Invalid JSON"));

    let bad_base64 = validate_conversion("json", "json", "***", &good, "{}");
    assert!(!bad_base64.is_valid);
    assert!(bad_base64.reason.unwrap().starts_with("source: Decode Error"));

    let unknown = validate_conversion("toml", "json", &good, &good, "{}");
    assert!(!unknown.is_valid);
    assert_eq!(unknown.reason.as_deref(), Some("source: Unsupported format: toml"));
}

#[test]
fn test_deeply_nested_conversion_validates_against_source() {
    let depth = 200;
    let mut xml = String::new();
    for level in 0..depth {
        xml.push_str(&format!("<n{}>", level));
    }
    xml.push_str("leaf");
    for level in (0..depth).rev() {
        xml.push_str(&format!("</n{}>", level));
    }
    let xml = b64(&xml);

    let converted = convert_document("xml", "json", &xml);
    let json = converted.payload.as_deref().expect("conversion should succeed");
    let outcome = validate_conversion("xml", "json", &xml, json, "{}");
    assert!(outcome.is_valid, "{:?}", outcome.reason);
}

#[test]
fn test_wide_documents_compare() {
    let width = 50_000;
    let forward: Vec<String> = (0..width).map(|i| format!(r#""k{}": {}"#, i, i)).collect();
    let backward: Vec<String> = forward.iter().rev().cloned().collect();
    let src = b64(&format!("{{{}}}", forward.join(",")));
    let dst = b64(&format!("{{{}}}", backward.join(",")));

    let outcome = validate_conversion("json", "json", &src, &dst, "{}");
    assert!(outcome.is_valid, "{:?}", outcome.reason);
}

#[test]
fn test_payload_limit_applies() {
    let validator = Validator::new(ConversionConfig::default().with_max_payload_bytes(1024));
    let big = b64(&format!(r#"{{"a": "{}"}}"#, "x".repeat(4096)));
    let outcome = validator.validate("json", "json", &big, &big, "{}");
    assert!(!outcome.is_valid);
}

#[test]
fn test_malformed_criteria_are_ignored() {
    let outcome = validate_conversion(
        "xml",
        "json",
        &b64("<note>test</note>"),
        &b64(r#"{"note": "test"}"#),
        "not json at all",
    );
    assert!(outcome.is_valid);
}
