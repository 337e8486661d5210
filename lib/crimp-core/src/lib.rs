//! Core types for the crimp request toolkit.
//!
//! This crate provides the foundational types used by crimp:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`ResponseRecord`] - A completed HTTP response as handed over by a transport
//! - [`Format`] - Payload format resolved from a hint or `Content-Type`
//! - [`QueryInput`] - Tagged input shapes for query-string encoding
//! - [`ParsedPayload`], [`XmlNode`], [`Row`] - Structured parse results
//! - [`Error`] and [`Result`] - Error handling

mod error;
mod format;
mod method;
mod payload;
pub mod prelude;
mod query;
mod request;
mod response;

pub use error::{Error, Result};
pub use format::Format;
pub use method::Method;
pub use payload::{ParsedPayload, Row, XmlNode};
pub use query::{Control, FormField, QueryInput, QueryValue, SelectOption};
pub use request::{Request, RequestBuilder};
pub use response::ResponseRecord;
