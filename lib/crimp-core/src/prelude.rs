//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types
//! for easy glob importing:
//!
//! ```ignore
//! use crimp_core::prelude::*;
//! ```

pub use crate::{
    Control, Error, Format, FormField, Method, ParsedPayload, QueryInput, QueryValue, Request,
    RequestBuilder, ResponseRecord, Result, Row, SelectOption, XmlNode,
};
