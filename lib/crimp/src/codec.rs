//! Query-string encoding and decoding.
//!
//! [`build_query`] turns a [`QueryInput`] into a `&`-joined, percent-encoded
//! query string; [`parse_query`] reverses the process for a query string, a
//! `?`-prefixed query, or a full URL. Both are pure transforms: encoding is
//! deterministic in the iteration order of its input, and no sorting happens
//! anywhere.

use std::collections::HashMap;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crimp_core::{Control, FormField, QueryInput, QueryValue};

/// Characters escaped by the `encodeURIComponent` rule: everything except
/// alphanumerics and `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one key or value.
fn component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Percent-decode one key or value. Invalid sequences decode lossily.
fn decode_component(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// A field name is submitted without any bracket suffix it already carries.
fn base_name(name: &str) -> &str {
    name.split('[').next().unwrap_or(name)
}

/// Encode a structured input into a query string.
///
/// Output pairs appear in input iteration order, with no leading `?`. Empty
/// input encodes to the empty string.
///
/// # Example
///
/// ```
/// use crimp::build_query;
/// use crimp_core::QueryInput;
///
/// let input = QueryInput::map(vec![("tags", vec!["x", "y"])]);
/// assert_eq!(build_query(&input), "tags%5B0%5D=x&tags%5B1%5D=y");
/// ```
#[must_use]
pub fn build_query(input: &QueryInput) -> String {
    let mut pairs = Vec::new();

    match input {
        QueryInput::Map(entries) => {
            for (key, value) in entries {
                push_value(&mut pairs, key, value);
            }
        }
        QueryInput::Pairs(entries) => {
            for (key, value) in entries {
                push_value(&mut pairs, key, value);
            }
        }
        QueryInput::Form(fields) => {
            // Per-name counter for checkbox and multi-select suffixes,
            // counting submitted entries only
            let mut counters: HashMap<&str, usize> = HashMap::new();
            for field in fields {
                push_field(&mut pairs, &mut counters, field);
            }
        }
    }

    pairs.join("&")
}

fn push_value(pairs: &mut Vec<String>, key: &str, value: &QueryValue) {
    match value {
        QueryValue::Single(value) => {
            pairs.push(format!("{}={}", component(key), component(value)));
        }
        QueryValue::List(values) => {
            for (index, value) in values.iter().enumerate() {
                pairs.push(format!(
                    "{}={}",
                    component(&format!("{key}[{index}]")),
                    component(value)
                ));
            }
        }
    }
}

fn push_field<'a>(
    pairs: &mut Vec<String>,
    counters: &mut HashMap<&'a str, usize>,
    field: &'a FormField,
) {
    let name = base_name(&field.name);

    match &field.control {
        Control::Checkbox {
            value: Some(value),
            checked: true,
        } => {
            let index = next_index(counters, name);
            pairs.push(format!(
                "{}={}",
                component(&format!("{name}[{index}]")),
                component(value)
            ));
        }
        Control::Radio {
            value: Some(value),
            checked: true,
        } => {
            pairs.push(format!("{}={}", component(name), component(value)));
        }
        Control::SelectMultiple { options } => {
            for option in options.iter().filter(|option| option.selected) {
                let index = next_index(counters, name);
                pairs.push(format!(
                    "{}={}",
                    component(&format!("{name}[{index}]")),
                    component(&option.value)
                ));
            }
        }
        Control::Text { value: Some(value) } | Control::Other { value: Some(value) } => {
            pairs.push(format!("{}={}", component(name), component(value)));
        }
        // Unchecked boxes and value-less fields contribute nothing
        Control::Checkbox { .. }
        | Control::Radio { .. }
        | Control::Text { value: None }
        | Control::Other { value: None } => {}
    }
}

fn next_index<'a>(counters: &mut HashMap<&'a str, usize>, name: &'a str) -> usize {
    let entry = counters.entry(name).or_insert(0);
    let index = *entry;
    *entry += 1;
    index
}

/// Decode a query string into an ordered mapping.
///
/// Accepts a bare query, a `?`-prefixed query, or a full URL: only the
/// substring after the first `?` (when one is present) and before any `#` is
/// parsed. Pairs split on the first `=` only; a pair with no `=` maps its key
/// to `None`; a later duplicate key overwrites an earlier one.
///
/// # Example
///
/// ```
/// use crimp::parse_query;
///
/// let vars = parse_query("https://example.com/?a=1&b=2#top");
/// assert_eq!(vars.get("a"), Some(&Some("1".to_string())));
/// ```
#[must_use]
pub fn parse_query(query: &str) -> IndexMap<String, Option<String>> {
    let raw = query.find('?').map_or(query, |at| {
        query.get(at + 1..).unwrap_or_default()
    });
    let raw = raw.find('#').map_or(raw, |at| {
        raw.get(..at).unwrap_or_default()
    });

    let mut vars = IndexMap::new();
    if raw.is_empty() {
        return vars;
    }

    for pair in raw.split('&') {
        match pair.split_once('=') {
            Some((name, value)) => {
                vars.insert(decode_component(name), Some(decode_component(value)));
            }
            None => {
                vars.insert(decode_component(pair), None);
            }
        }
    }
    vars
}

/// Decode a query string and return one value by key.
///
/// Returns `None` when the key is absent or carries no `=value` part.
#[must_use]
pub fn query_value(query: &str, key: &str) -> Option<String> {
    parse_query(query).swap_remove(key).flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crimp_core::SelectOption;

    #[test]
    fn empty_input_encodes_empty() {
        let input = QueryInput::map(Vec::<(String, QueryValue)>::new());
        assert_eq!(build_query(&input), "");
    }

    #[test]
    fn map_scalar_and_array() {
        let input = QueryInput::map(vec![
            ("q", QueryValue::from("rust")),
            ("tags", QueryValue::from(vec!["x", "y"])),
        ]);
        assert_eq!(build_query(&input), "q=rust&tags%5B0%5D=x&tags%5B1%5D=y");
    }

    #[test]
    fn pairs_keep_duplicates() {
        let input = QueryInput::pairs(vec![("a", "1"), ("a", "2")]);
        assert_eq!(build_query(&input), "a=1&a=2");
    }

    #[test]
    fn component_encoding_matches_encode_uri_component() {
        let input = QueryInput::map(vec![("k", "a&b=c ?/")]);
        assert_eq!(build_query(&input), "k=a%26b%3Dc%20%3F%2F");

        // The encodeURIComponent pass-through set
        let input = QueryInput::map(vec![("k", "-_.!~*'()AZaz09")]);
        assert_eq!(build_query(&input), "k=-_.!~*'()AZaz09");
    }

    #[test]
    fn form_checkbox_indexing_counts_checked_only() {
        let input = QueryInput::form(vec![
            FormField::checkbox("colors", "red", true),
            FormField::checkbox("colors", "green", false),
            FormField::checkbox("colors", "blue", true),
        ]);
        assert_eq!(
            build_query(&input),
            "colors%5B0%5D=red&colors%5B1%5D=blue"
        );
    }

    #[test]
    fn form_radio_is_not_indexed() {
        let input = QueryInput::form(vec![
            FormField::radio("size", "s", false),
            FormField::radio("size", "m", true),
        ]);
        assert_eq!(build_query(&input), "size=m");
    }

    #[test]
    fn form_select_multiple_counts_selected_in_order() {
        let input = QueryInput::form(vec![FormField::select_multiple(
            "pets",
            vec![
                SelectOption::new("cat", true),
                SelectOption::new("dog", false),
                SelectOption::new("fox", true),
            ],
        )]);
        assert_eq!(build_query(&input), "pets%5B0%5D=cat&pets%5B1%5D=fox");
    }

    #[test]
    fn form_name_truncated_at_bracket() {
        let input = QueryInput::form(vec![FormField::checkbox("colors[]", "red", true)]);
        assert_eq!(build_query(&input), "colors%5B0%5D=red");
    }

    #[test]
    fn form_skips_value_less_fields() {
        let input = QueryInput::form(vec![
            FormField::without_value("ghost"),
            FormField::text("name", "ada"),
        ]);
        assert_eq!(build_query(&input), "name=ada");
    }

    #[test]
    fn checked_radio_does_not_advance_checkbox_index() {
        let input = QueryInput::form(vec![
            FormField::radio("opt", "r", true),
            FormField::checkbox("opt", "c", true),
        ]);
        assert_eq!(build_query(&input), "opt=r&opt%5B0%5D=c");
    }

    #[test]
    fn checkbox_counters_are_scoped_per_name() {
        let input = QueryInput::form(vec![
            FormField::checkbox("a", "1", true),
            FormField::checkbox("b", "2", true),
            FormField::checkbox("a", "3", true),
        ]);
        assert_eq!(build_query(&input), "a%5B0%5D=1&b%5B0%5D=2&a%5B1%5D=3");
    }

    #[test]
    fn decode_empty_is_empty() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
        assert!(parse_query("https://example.com/page?").is_empty());
    }

    #[test]
    fn decode_full_url_strips_fragment() {
        let vars = parse_query("https://example.com/?a=1&b=2#section");
        assert_eq!(vars.get("a"), Some(&Some("1".to_string())));
        assert_eq!(vars.get("b"), Some(&Some("2".to_string())));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn decode_splits_on_first_equals_only() {
        let vars = parse_query("expr=a%3Db=c");
        assert_eq!(vars.get("expr"), Some(&Some("a=b=c".to_string())));
    }

    #[test]
    fn decode_last_duplicate_wins() {
        let vars = parse_query("a=1&b=2&a=3");
        assert_eq!(vars.get("a"), Some(&Some("3".to_string())));
        assert_eq!(vars.get("b"), Some(&Some("2".to_string())));
    }

    #[test]
    fn decode_pair_without_equals() {
        let vars = parse_query("flag&a=1");
        assert_eq!(vars.get("flag"), Some(&None));
        assert_eq!(vars.get("a"), Some(&Some("1".to_string())));
    }

    #[test]
    fn query_value_lookup() {
        assert_eq!(query_value("?a=1&b=2", "b"), Some("2".to_string()));
        assert_eq!(query_value("?a=1", "missing"), None);
        assert_eq!(query_value("flag", "flag"), None);
    }

    #[test]
    fn round_trip_map() {
        let input = QueryInput::map(vec![
            ("name", QueryValue::from("Grace Hopper")),
            ("lang", QueryValue::from("rust & co")),
        ]);
        let encoded = build_query(&input);
        let vars = parse_query(&encoded);

        assert_eq!(vars.get("name"), Some(&Some("Grace Hopper".to_string())));
        assert_eq!(vars.get("lang"), Some(&Some("rust & co".to_string())));
        let keys: Vec<_> = vars.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "lang"]);
    }

    #[test]
    fn round_trip_array_elements() {
        let input = QueryInput::map(vec![("tags", vec!["x", "y"])]);
        let vars = parse_query(&build_query(&input));

        // Array keys come back with their reconstructed index suffix
        assert_eq!(vars.get("tags[0]"), Some(&Some("x".to_string())));
        assert_eq!(vars.get("tags[1]"), Some(&Some("y".to_string())));
    }
}
