//! Parsed response payloads.
//!
//! [`ParsedPayload`] is the owned result of a single response parse: constructed
//! once, never mutated afterwards. The XML and delimited shapes keep their
//! document order via `indexmap` and plain vectors.

use indexmap::IndexMap;
use serde::Serialize;

/// An XML element mapped to a plain data tree.
///
/// Attribute values and `node_value` are HTML-escaped, with literal newlines
/// escaped to `\n`. A childless element still carries an explicit empty
/// `node_value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// Attributes in document order.
    pub attributes: IndexMap<String, String>,
    /// Concatenated direct text children (whitespace-only runs dropped).
    pub node_value: String,
    /// Child elements in document order.
    pub nodes: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an empty element with a tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First direct child with the given tag.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&Self> {
        self.nodes.iter().find(|node| node.tag == tag)
    }
}

/// One row of a delimited body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Row {
    /// Header-row mode: cells keyed by column name, in column order.
    Named(IndexMap<String, String>),
    /// No-header mode: cells in order.
    Cells(Vec<String>),
}

impl Row {
    /// Cell by column name (header-row mode only).
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        match self {
            Self::Named(cells) => cells.get(column).map(String::as_str),
            Self::Cells(_) => None,
        }
    }

    /// Number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Named(cells) => cells.len(),
            Self::Cells(cells) => cells.len(),
        }
    }

    /// Returns `true` for a row with no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Structured value produced by one response parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedPayload {
    /// Parsed JSON value.
    Json(serde_json::Value),
    /// XML document mapped to a tree, rooted at the first real element.
    Xml(XmlNode),
    /// Delimited body as ordered rows.
    Rows(Vec<Row>),
    /// Verbatim body text.
    Text(String),
}

impl ParsedPayload {
    /// The JSON value, if this payload is JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The XML root, if this payload is XML.
    #[must_use]
    pub const fn as_xml(&self) -> Option<&XmlNode> {
        match self {
            Self::Xml(root) => Some(root),
            _ => None,
        }
    }

    /// The rows, if this payload is delimited text.
    #[must_use]
    pub fn as_rows(&self) -> Option<&[Row]> {
        match self {
            Self::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// The raw text, if this payload is plain text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}
