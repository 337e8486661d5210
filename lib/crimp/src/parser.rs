//! Content-negotiated response parsing.
//!
//! [`parse`] resolves the payload format (explicit override, then
//! `Content-Type` sniffing, then plain text) and converts a completed
//! [`ResponseRecord`] body into a [`ParsedPayload`]. The transform is pure and
//! synchronous: it is invoked exactly once per completed response, owns no
//! state, and on failure returns an error rather than a partial structure.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crimp_core::{Error, Format, ParsedPayload, ResponseRecord, Result};

use crate::ParseOptions;
use crate::delimited;
use crate::xml;

/// Parse a completed response into a structured payload.
///
/// # Example
///
/// ```
/// use crimp::{ParseOptions, parse};
/// use crimp_core::ResponseRecord;
///
/// let record = ResponseRecord::new(200, "a,b\n1,2")
///     .with_header("Content-Type", "text/csv");
/// let payload = parse(&record, &ParseOptions::new()).unwrap();
/// let rows = payload.as_rows().unwrap();
/// assert_eq!(rows[0].get("a"), Some("1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedPayload`] when the body does not parse as the
/// resolved format, and [`Error::UnterminatedQuotedField`] for a delimited
/// body with an unclosed quote.
pub fn parse(record: &ResponseRecord, options: &ParseOptions) -> Result<ParsedPayload> {
    let format = options
        .format
        .or_else(|| record.content_type().and_then(Format::from_content_type))
        .unwrap_or(Format::Text);

    match format {
        Format::Json => parse_json(record.text()),
        Format::Xml => match record.xml() {
            Some(tree) => Ok(ParsedPayload::Xml(tree.clone())),
            None => xml::tree_from_str(record.text()).map(ParsedPayload::Xml),
        },
        Format::Csv | Format::Tsv => {
            let delimiter = options
                .delimiter
                .or(format.default_delimiter())
                .unwrap_or(',');
            delimited::parse_rows(record.text(), delimiter, options.fields).map(ParsedPayload::Rows)
        }
        Format::Text => Ok(ParsedPayload::Text(record.text().to_string())),
    }
}

/// URL-decode the body, then parse it as JSON.
fn parse_json(body: &str) -> Result<ParsedPayload> {
    let decoded: Cow<'_, str> = percent_decode_str(body)
        .decode_utf8()
        .map_err(|_| Error::malformed(Format::Json, body))?;

    serde_json::from_str(&decoded)
        .map(ParsedPayload::Json)
        .map_err(|error| Error::malformed(Format::Json, json_offending(&decoded, &error)))
}

/// Slice the decoded text from the failure position reported by `serde_json`.
fn json_offending<'a>(text: &'a str, error: &serde_json::Error) -> &'a str {
    let line = text.lines().nth(error.line().saturating_sub(1));
    line.map_or(text, |line| {
        let at = error.column().saturating_sub(1);
        line.get(at..).unwrap_or(line)
    })
}
