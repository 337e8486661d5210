//! Hyper-backed transport implementation.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use indexmap::IndexMap;

use crimp_core::{Error, Method, Request, ResponseRecord, Result};

use crate::Transport;
use crate::config::TransportConfig;

/// HTTP transport using hyper-util with connection pooling and rustls TLS.
///
/// # Example
///
/// ```ignore
/// use crimp::HyperTransport;
/// use std::time::Duration;
///
/// let transport = HyperTransport::with_config(
///     TransportConfig::builder()
///         .timeout(Duration::from_secs(10))
///         .build(),
/// );
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration.
    #[must_use]
    pub fn with_config(config: TransportConfig) -> Self {
        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(Self::connector());

        Self { inner, config }
    }

    /// TLS-capable connector backed by the Mozilla root set. Plain `http://`
    /// targets are still accepted.
    fn connector() -> HttpsConnector<HttpConnector> {
        let roots: rustls::RootCertStore =
            webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
        let tls = rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();

        HttpsConnectorBuilder::new()
            .with_tls_config(tls)
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build()
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Build a hyper request from a crimp request.
    fn build_hyper_request(request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http_method(method))
            .uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = body.map_or_else(Full::default, |text| Full::new(Bytes::from(text)));
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Collect response headers, name case as received, last duplicate wins.
    fn collect_headers(headers: &http::HeaderMap) -> IndexMap<String, String> {
        let mut collected = IndexMap::new();
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                collected.insert(name.to_string(), value.to_string());
            }
        }
        collected
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    async fn execute(&self, request: Request) -> Result<ResponseRecord> {
        let hyper_request = Self::build_hyper_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(hyper_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let headers = Self::collect_headers(response.headers());

        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();
        let text = String::from_utf8(bytes.to_vec()).map_err(|e| Error::invalid_body(e.to_string()))?;

        let mut record = ResponseRecord::new(status.as_u16(), text).with_status_text(status_text);
        for (name, value) in headers {
            record = record.with_header(name, value);
        }
        Ok(record)
    }
}

fn http_method(method: Method) -> http::Method {
    match method {
        Method::Get => http::Method::GET,
        Method::Post => http::Method::POST,
        Method::Put => http::Method::PUT,
        Method::Delete => http::Method::DELETE,
        Method::Patch => http::Method::PATCH,
        Method::Head => http::Method::HEAD,
        Method::Options => http::Method::OPTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_default() {
        let transport = HyperTransport::new();
        assert_eq!(
            transport.config().timeout,
            std::time::Duration::from_secs(30)
        );
    }

    #[test]
    fn transport_is_clone_and_debug() {
        let transport = HyperTransport::new();
        let _cloned = transport.clone();
        let debug = format!("{transport:?}");
        assert!(debug.contains("HyperTransport"));
    }

    #[test]
    fn method_mapping() {
        assert_eq!(http_method(Method::Get), http::Method::GET);
        assert_eq!(http_method(Method::Post), http::Method::POST);
    }

    #[test]
    fn builds_request_with_body() {
        let url = url::Url::parse("http://example.com/submit").expect("valid URL");
        let request = Request::builder(Method::Post, url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("a=1")
            .build();

        let hyper_request = HyperTransport::build_hyper_request(request).expect("request");
        assert_eq!(hyper_request.method(), http::Method::POST);
        assert_eq!(
            hyper_request
                .headers()
                .get("Content-Type")
                .and_then(|v| v.to_str().ok()),
            Some("application/x-www-form-urlencoded")
        );
    }
}
