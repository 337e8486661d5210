//! Transport trait.
//!
//! The parser and codec are pure; everything that touches the network sits
//! behind [`Transport`]. A transport performs one request, resolves success or
//! failure, and hands back a completed [`ResponseRecord`]. Cancellation,
//! retry, and timeout are transport concerns; the parsing core never sees an
//! in-progress request.

use std::future::Future;

use crimp_core::{Request, ResponseRecord, Result};

/// One-shot HTTP execution.
///
/// Implement this to plug a custom transport (or a test stub) into
/// [`crate::RequestManager`].
///
/// # Example
///
/// ```ignore
/// struct CannedTransport(ResponseRecord);
///
/// impl Transport for CannedTransport {
///     async fn execute(&self, _request: Request) -> Result<ResponseRecord> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Execute an HTTP request and return the completed response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - A body that is not valid text
    fn execute(&self, request: Request) -> impl Future<Output = Result<ResponseRecord>> + Send;
}
