//! Response parsing options.

use crimp_core::Format;

/// Options for a single response parse.
///
/// # Example
///
/// ```
/// use crimp::ParseOptions;
/// use crimp_core::Format;
///
/// let options = ParseOptions::new()
///     .format(Format::Csv)
///     .fields(false)
///     .delimiter(';');
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Explicit format override; wins over `Content-Type` sniffing.
    pub format: Option<Format>,
    /// Whether the first line of a delimited body names the columns.
    pub fields: bool,
    /// Delimiter override for delimited bodies.
    pub delimiter: Option<char>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            format: None,
            fields: true,
            delimiter: None,
        }
    }
}

impl ParseOptions {
    /// Default options: sniff the format, expect a header row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a payload format.
    #[must_use]
    pub const fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Set whether a delimited body starts with a header row.
    #[must_use]
    pub const fn fields(mut self, fields: bool) -> Self {
        self.fields = fields;
        self
    }

    /// Override the delimiter for delimited bodies.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}
