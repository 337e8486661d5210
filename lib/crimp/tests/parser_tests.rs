//! Behavioral tests for the response parser public API.

use crimp::{ParseOptions, parse};
use crimp_core::{Error, Format, ParsedPayload, ResponseRecord, Row};

fn record(content_type: &str, body: &str) -> ResponseRecord {
    ResponseRecord::new(200, body).with_header("Content-Type", content_type)
}

#[test]
fn url_encoded_json_payload() {
    // URL-encoded {"x":1}
    let record = record("application/json", "%7B%22x%22%3A1%7D");
    let payload = parse(&record, &ParseOptions::new()).expect("payload");
    assert_eq!(payload.as_json(), Some(&serde_json::json!({"x": 1})));
}

#[test]
fn malformed_json_never_silently_succeeds() {
    let record = record("application/json", "not json at all");
    let err = parse(&record, &ParseOptions::new()).expect_err("should fail");
    assert_eq!(err.format(), Some(Format::Json));
}

#[test]
fn csv_without_header_row() {
    let record = record("text/plain", "1,2\n3,4");
    let options = ParseOptions::new().format(Format::Csv).fields(false);
    let payload = parse(&record, &options).expect("payload");
    assert_eq!(
        payload,
        ParsedPayload::Rows(vec![
            Row::Cells(vec!["1".to_string(), "2".to_string()]),
            Row::Cells(vec!["3".to_string(), "4".to_string()]),
        ])
    );
}

#[test]
fn csv_with_default_header_row() {
    let record = record("text/csv", "a,b\n1,2");
    let payload = parse(&record, &ParseOptions::new()).expect("payload");
    let rows = payload.as_rows().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("a"), Some("1"));
    assert_eq!(rows[0].get("b"), Some("2"));
}

#[test]
fn quoted_csv_field_keeps_inner_delimiter() {
    let record = record("text/csv", "name,quote\nada,\"first, not last\"");
    let payload = parse(&record, &ParseOptions::new()).expect("payload");
    let rows = payload.as_rows().expect("rows");
    assert_eq!(rows[0].get("quote"), Some("first, not last"));
}

#[test]
fn unterminated_quote_is_a_typed_error() {
    let record = record("text/csv", "a,b\n\"open,2");
    let err = parse(&record, &ParseOptions::new()).expect_err("should fail");
    assert!(matches!(err, Error::UnterminatedQuotedField { line: 2 }));
}

#[test]
fn xml_tree_shape() {
    let record = record("application/xml", r#"<root a="1"><child>text</child></root>"#);
    let payload = parse(&record, &ParseOptions::new()).expect("payload");
    let root = payload.as_xml().expect("xml root");

    assert_eq!(root.tag, "root");
    assert_eq!(root.attribute("a"), Some("1"));
    assert_eq!(root.node_value, "");
    assert_eq!(root.nodes.len(), 1);
    let child = root.child("child").expect("child");
    assert_eq!(child.node_value, "text");
}

#[test]
fn no_content_type_returns_body_verbatim() {
    let record = ResponseRecord::new(200, "just some text\nwith lines");
    let payload = parse(&record, &ParseOptions::new()).expect("payload");
    assert_eq!(payload.as_text(), Some("just some text\nwith lines"));
}
