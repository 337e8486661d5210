//! HTTP response records.
//!
//! [`ResponseRecord`] is the completed-response value a transport hands to the
//! parser: status, headers as received, the body text, and optionally an XML
//! tree that was already built elsewhere.
//!
//! # Example
//!
//! ```ignore
//! let user: User = record.json()?;
//! ```

use indexmap::IndexMap;

use crate::XmlNode;

/// A completed HTTP response, as handed over by a transport.
#[derive(Debug, Clone, Default)]
pub struct ResponseRecord {
    status: u16,
    status_text: String,
    headers: IndexMap<String, String>,
    text: String,
    xml: Option<XmlNode>,
}

impl ResponseRecord {
    /// Creates a record from a status code and body text.
    #[must_use]
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the status reason phrase.
    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Records a header as received. Name case is preserved; a duplicate of an
    /// identical name overwrites the earlier value (last wins).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attaches a pre-parsed XML tree; the parser uses it instead of re-parsing
    /// the body text.
    #[must_use]
    pub fn with_xml(mut self, xml: XmlNode) -> Self {
        self.xml = Some(xml);
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Status reason phrase, if the transport recorded one.
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Response headers in received order, names as received.
    #[must_use]
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Single header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// `Content-Type` header value, matched case-insensitively on the name.
    ///
    /// Transports normalize header-name case differently, so the lookup cannot
    /// rely on the exact spelling.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }

    /// Raw body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pre-parsed XML tree, if one was attached.
    #[must_use]
    pub const fn xml(&self) -> Option<&XmlNode> {
        self.xml.as_ref()
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Deserialize the body text as JSON into a typed value.
    ///
    /// Uses `serde_path_to_error` so a failure names the exact path of the
    /// field that did not deserialize.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonDeserialization`] if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        let mut deserializer = serde_json::Deserializer::from_str(&self.text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
        })
    }
}
