//! XML response parsing.
//!
//! Maps a `roxmltree` document onto the owned [`XmlNode`] tree: depth-first,
//! attributes in document order, direct text children concatenated into
//! `node_value` with whitespace-only runs dropped. Attribute and text values
//! are HTML-escaped and newlines become `\n`. Note that XML parsing
//! normalizes literal newlines in attribute values to spaces first, so only
//! `&#10;` references reach the escaper as newlines there.

use crimp_core::{Error, Format, Result, XmlNode};

/// Parse an XML body into a tree rooted at the first real element.
///
/// An empty (or whitespace-only) document yields a default, empty node.
pub(crate) fn tree_from_str(text: &str) -> Result<XmlNode> {
    if text.trim().is_empty() {
        return Ok(XmlNode::default());
    }

    // Bodies may open with a doctype declaration, which the parser rejects
    // unless DTDs are allowed
    let parsing_options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(text, parsing_options).map_err(|error| {
        let row = usize::try_from(error.pos().row).unwrap_or(usize::MAX);
        let offending = text.lines().nth(row.saturating_sub(1)).unwrap_or(text);
        Error::malformed(Format::Xml, offending)
    })?;

    Ok(convert(document.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> XmlNode {
    let mut tree = XmlNode::new(node.tag_name().name());

    for attribute in node.attributes() {
        tree.attributes
            .insert(attribute.name().to_string(), escape(attribute.value()));
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_text() {
            if let Some(value) = child.text() {
                if !value.trim().is_empty() {
                    text.push_str(value);
                }
            }
        } else if child.is_element() {
            tree.nodes.push(convert(child));
        }
    }
    tree.node_value = escape(&text);

    tree
}

/// HTML-escape a text value, with literal newlines escaped to `\n`.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_tree_shape() {
        let root = tree_from_str(r#"<root a="1"><child>text</child></root>"#).expect("tree");

        assert_eq!(root.tag, "root");
        assert_eq!(root.attribute("a"), Some("1"));
        assert_eq!(root.node_value, "");
        assert_eq!(root.nodes.len(), 1);

        let child = root.child("child").expect("child");
        assert_eq!(child.node_value, "text");
        assert!(child.nodes.is_empty());
    }

    #[test]
    fn leaf_gets_explicit_empty_node_value() {
        let root = tree_from_str("<root><leaf/></root>").expect("tree");
        let leaf = root.child("leaf").expect("leaf");
        assert_eq!(leaf.node_value, "");
    }

    #[test]
    fn whitespace_only_text_dropped() {
        let root = tree_from_str("<root>\n  <child>v</child>\n</root>").expect("tree");
        assert_eq!(root.node_value, "");
        assert_eq!(root.child("child").expect("child").node_value, "v");
    }

    #[test]
    fn direct_text_children_concatenated() {
        let root = tree_from_str("<root>one<child/>two</root>").expect("tree");
        assert_eq!(root.node_value, "onetwo");
    }

    #[test]
    fn attribute_values_html_escaped() {
        let root = tree_from_str(r#"<root a="x &amp; &lt;y&gt;"/>"#).expect("tree");
        assert_eq!(root.attribute("a"), Some("x &amp; &lt;y&gt;"));
    }

    #[test]
    fn newlines_in_attributes_escaped() {
        // A literal newline in an attribute is normalized to a space during
        // XML parsing; only a character reference survives as a real newline
        let root = tree_from_str("<root a=\"line1&#10;line2\"/>").expect("tree");
        assert_eq!(root.attribute("a"), Some("line1\\nline2"));
    }

    #[test]
    fn literal_attribute_newlines_normalize_to_space() {
        let root = tree_from_str("<root a=\"line1\nline2\"/>").expect("tree");
        assert_eq!(root.attribute("a"), Some("line1 line2"));
    }

    #[test]
    fn newlines_in_text_escaped() {
        let root = tree_from_str("<root>line1\nline2</root>").expect("tree");
        assert_eq!(root.node_value, "line1\\nline2");
    }

    #[test]
    fn doctype_is_skipped() {
        let root = tree_from_str("<!DOCTYPE html>\n<root><x/></root>").expect("tree");
        assert_eq!(root.tag, "root");
    }

    #[test]
    fn empty_document_is_empty_node() {
        let root = tree_from_str("   \n ").expect("tree");
        assert_eq!(root, XmlNode::default());
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = tree_from_str("<root><unclosed></root>").expect_err("should fail");
        assert_eq!(err.format(), Some(Format::Xml));
    }
}
