//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use crimp::prelude::*;
//! ```

pub use crate::{
    Control, Error, Format, FormField, HyperTransport, Method, Outcome, ParseOptions,
    ParsedPayload, QueryInput, QueryValue, Request, RequestBuilder, RequestManager, ResponseRecord,
    Result, Row, SelectOption, Transport, TransportConfig, XmlNode, build_query, parse,
    parse_query, query_value,
};
