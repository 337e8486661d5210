//! Request dispatch and in-flight tracking.
//!
//! [`RequestManager`] owns an explicit table of in-flight requests, keyed by
//! an opaque generated [`RequestId`]. Each dispatch registers a handle, runs
//! the transport, unregisters, and then parses the completed response exactly
//! once. Multiple requests may be in flight concurrently through a shared
//! `&RequestManager`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tracing::{Instrument, Level, debug, info, span, warn};

use crimp_core::{Method, ParsedPayload, QueryInput, Request, ResponseRecord, Result};

use crate::codec::build_query;
use crate::parser::parse;
use crate::{ParseOptions, Transport};

/// Opaque handle identifying one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// What the manager knows about a request while it is in flight.
#[derive(Debug, Clone)]
pub struct InFlight {
    method: Method,
    url: String,
    started: Instant,
}

impl InFlight {
    /// Method of the pending request.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL of the pending request.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Time elapsed since dispatch.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}

/// A completed, parsed exchange.
#[derive(Debug, Clone)]
pub struct Outcome {
    record: ResponseRecord,
    payload: ParsedPayload,
}

impl Outcome {
    /// The completed response as received.
    #[must_use]
    pub const fn record(&self) -> &ResponseRecord {
        &self.record
    }

    /// The parsed payload.
    #[must_use]
    pub const fn payload(&self) -> &ParsedPayload {
        &self.payload
    }

    /// Consume into the parsed payload.
    #[must_use]
    pub fn into_payload(self) -> ParsedPayload {
        self.payload
    }

    /// Consume into (record, payload).
    #[must_use]
    pub fn into_parts(self) -> (ResponseRecord, ParsedPayload) {
        (self.record, self.payload)
    }
}

/// Dispatches requests through a [`Transport`] and parses completed responses.
///
/// # Example
///
/// ```ignore
/// use crimp::{HyperTransport, ParseOptions, RequestManager};
///
/// let manager = RequestManager::new(HyperTransport::new());
/// let outcome = manager.get("https://api.example.com/rows.csv", None, &ParseOptions::new()).await?;
/// ```
#[derive(Debug)]
pub struct RequestManager<T> {
    transport: T,
    next_id: AtomicU64,
    in_flight: Mutex<HashMap<RequestId, InFlight>>,
}

impl<T> RequestManager<T> {
    /// Create a manager around a transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.table().len()
    }

    /// Handles of the requests currently in flight.
    #[must_use]
    pub fn pending(&self) -> Vec<RequestId> {
        self.table().keys().copied().collect()
    }

    fn table(&self) -> std::sync::MutexGuard<'_, HashMap<RequestId, InFlight>> {
        self.in_flight
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn register(&self, request: &Request) -> RequestId {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.table().insert(
            id,
            InFlight {
                method: request.method(),
                url: request.url().to_string(),
                started: Instant::now(),
            },
        );
        id
    }

    fn unregister(&self, id: RequestId) {
        self.table().remove(&id);
    }
}

impl<T: Transport> RequestManager<T> {
    /// Dispatch a request and parse the completed response.
    ///
    /// # Errors
    ///
    /// Returns transport errors as-is and parse failures as typed errors;
    /// either way the in-flight entry is removed.
    pub async fn send(&self, request: Request, options: &ParseOptions) -> Result<Outcome> {
        let id = self.register(&request);
        let method = request.method();
        let url = request.url().to_string();
        let span = span!(Level::INFO, "http_request", id = id.0, %method, %url);

        async move {
            debug!(headers = ?request.headers(), "dispatching request");
            let started = Instant::now();
            let result = self.transport.execute(request).await;
            self.unregister(id);

            let elapsed = started.elapsed();
            // Saturating conversion to u64 (truncates after ~584 million years)
            let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(record) => {
                    let status = record.status();
                    if record.is_success() {
                        info!(status, elapsed_ms, "request completed");
                    } else {
                        warn!(status, elapsed_ms, "request completed with HTTP error");
                    }
                }
                Err(err) => {
                    warn!(error = %err, elapsed_ms, "request failed");
                }
            }

            let record = result?;
            let payload = parse(&record, options)?;
            Ok(Outcome { record, payload })
        }
        .instrument(span)
        .await
    }

    /// Perform a GET request, appending the encoded query data to the URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, the transport fails, or the
    /// response body does not parse.
    pub async fn get(
        &self,
        url: &str,
        data: Option<&QueryInput>,
        options: &ParseOptions,
    ) -> Result<Outcome> {
        let mut target = url.to_string();
        if let Some(data) = data {
            let query = build_query(data);
            if !query.is_empty() {
                target.push('?');
                target.push_str(&query);
            }
        }
        let url = url::Url::parse(&target)?;
        let request = Request::builder(Method::Get, url).build();
        self.send(request, options).await
    }

    /// Perform a POST request, sending the encoded query data as a
    /// form-urlencoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, the transport fails, or the
    /// response body does not parse.
    pub async fn post(
        &self,
        url: &str,
        data: Option<&QueryInput>,
        options: &ParseOptions,
    ) -> Result<Outcome> {
        let url = url::Url::parse(url)?;
        let body = data.map(build_query).unwrap_or_default();
        let request = Request::builder(Method::Post, url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Content-Length", body.len().to_string())
            .body(body)
            .build();
        self.send(request, options).await
    }
}
