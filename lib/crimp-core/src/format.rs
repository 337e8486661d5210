//! Payload format resolution.

use derive_more::Display;

/// Payload format for a response body.
///
/// Resolution order is: explicit override, then `Content-Type` sniffing via
/// [`Format::from_content_type`], then [`Format::Text`] as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Format {
    /// JSON body (`application/json` and friends).
    #[display("json")]
    Json,
    /// XML body (`application/xml`, `text/xml`).
    #[display("xml")]
    Xml,
    /// Comma-delimited body (`text/csv`).
    #[display("csv")]
    Csv,
    /// Tab-delimited body (`text/tab-separated-values`, `text/tsv`).
    #[display("tsv")]
    Tsv,
    /// Anything else: the body is returned verbatim.
    #[display("text")]
    Text,
}

impl Format {
    /// Sniff a format from a `Content-Type` header value.
    ///
    /// Matching is a case-insensitive substring test, checked in the order
    /// `json`, `xml`, `csv`, `tsv`. Returns `None` when nothing matches.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let lower = content_type.to_lowercase();
        if lower.contains("json") {
            Some(Self::Json)
        } else if lower.contains("xml") {
            Some(Self::Xml)
        } else if lower.contains("csv") {
            Some(Self::Csv)
        } else if lower.contains("tsv") || lower.contains("tab-separated-values") {
            Some(Self::Tsv)
        } else {
            None
        }
    }

    /// Default delimiter for delimited formats.
    #[must_use]
    pub const fn default_delimiter(self) -> Option<char> {
        match self {
            Self::Csv => Some(','),
            Self::Tsv => Some('\t'),
            Self::Json | Self::Xml | Self::Text => None,
        }
    }

    /// Returns `true` for the delimited-text formats.
    #[must_use]
    pub const fn is_delimited(self) -> bool {
        matches!(self, Self::Csv | Self::Tsv)
    }
}
