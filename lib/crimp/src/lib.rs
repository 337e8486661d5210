//! Query-string codec, content-negotiated response parsing, and request
//! dispatch.
//!
//! The two cores are pure transforms: [`build_query`]/[`parse_query`] encode
//! and decode URL query strings, and [`parse`] converts a completed HTTP
//! response into a structured payload picked by format negotiation
//! (JSON/XML/CSV/TSV/plain text). Around them, [`RequestManager`] dispatches
//! requests through a [`Transport`] and tracks them in an explicit in-flight
//! table.
//!
//! # Example
//!
//! ```ignore
//! use crimp::prelude::*;
//!
//! let manager = RequestManager::new(HyperTransport::new());
//! let outcome = manager
//!     .get("https://api.example.com/report.csv", None, &ParseOptions::new())
//!     .await?;
//!
//! for row in outcome.payload().as_rows().unwrap_or_default() {
//!     println!("{:?}", row.get("name"));
//! }
//! ```

mod client;
pub mod codec;
mod config;
mod delimited;
mod manager;
mod options;
mod parser;
pub mod prelude;
mod transport;
mod xml;

pub use client::HyperTransport;
pub use codec::{build_query, parse_query, query_value};
pub use config::{TransportConfig, TransportConfigBuilder};
pub use manager::{InFlight, Outcome, RequestId, RequestManager};
pub use options::ParseOptions;
pub use parser::parse;
pub use transport::Transport;

// Re-export core types
pub use crimp_core::{
    Control, Error, Format, FormField, Method, ParsedPayload, QueryInput, QueryValue, Request,
    RequestBuilder, ResponseRecord, Result, Row, SelectOption, XmlNode,
};
