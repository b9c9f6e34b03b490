use crate::application::services::{HttpClient, HttpRequestService};
use crate::domain::entities::{Request, Response};
use crate::domain::errors::{TransportError, error_chain};
use crate::domain::value_objects::ResolvedHeaders;
use crate::infrastructure::config::ClientConfig;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use http::header::{CONTENT_LENGTH, HeaderMap, HeaderName, HeaderValue};
use http::{Method, Uri};
use hyper::Request as HyperRequest;
use hyper::body::Bytes;
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::time::Instant;

type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Infrastructure implementation of HttpClient using Hyper
/// Handles both plain HTTP and TLS through a native-tls connector
pub struct HyperHttpClient {
    client: HyperClient,
    config: ClientConfig,
}

impl HyperHttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        let tls = tokio_native_tls::native_tls::TlsConnector::new()
            .map_err(|e| anyhow!("Failed to initialize TLS: {}", e))?;
        let connector = HttpsConnector::from((http, tokio_native_tls::TlsConnector::from(tls)));
        let client = Client::builder(TokioExecutor::new()).build::<_, Full<Bytes>>(connector);
        Ok(Self { client, config })
    }

    /// Creates a configured HTTP request service using this client
    pub fn create_request_service(self) -> HttpRequestService {
        HttpRequestService::new(Box::new(self))
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let hyper_request = RequestAdapter::to_hyper_request(request)?;
        let started = Instant::now();
        let exchange = self.exchange(hyper_request);
        let response = match self.config.max_time {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| TransportError::Timeout(limit))??,
            None => exchange.await?,
        };
        log::debug!("exchange finished in {:?}", started.elapsed());
        Ok(response)
    }
}

impl HyperHttpClient {
    async fn exchange(&self, request: HyperRequest<Full<Bytes>>) -> Result<Response, TransportError> {
        let hyper_response = self.client.request(request).await.map_err(|e| {
            if e.is_connect() {
                TransportError::Connect(error_chain(&e))
            } else {
                TransportError::Protocol(error_chain(&e))
            }
        })?;
        ResponseAdapter::to_domain_response(hyper_response).await
    }
}

/// Adapter for converting domain requests to Hyper requests
struct RequestAdapter;

impl RequestAdapter {
    fn to_hyper_request(domain_request: Request) -> Result<HyperRequest<Full<Bytes>>, TransportError> {
        let method = Method::from_bytes(domain_request.method.as_str().as_bytes())
            .map_err(|e| invalid(format!("method '{}': {}", domain_request.method, e)))?;
        let uri = domain_request
            .url
            .parse::<Uri>()
            .map_err(|e| invalid(format!("URL '{}': {}", domain_request.url, e)))?;

        let mut headers = HeaderAdapter::to_header_map(&domain_request.headers)?;
        let body = BodyAdapter::to_hyper_body(domain_request.body, &mut headers);

        let mut hyper_request = HyperRequest::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .map_err(|e| invalid(error_chain(&e)))?;
        *hyper_request.headers_mut() = headers;
        Ok(hyper_request)
    }
}

fn invalid(message: String) -> TransportError {
    TransportError::InvalidRequest(message)
}

/// Adapter for converting resolved command-line headers to a Hyper header map
struct HeaderAdapter;

impl HeaderAdapter {
    fn to_header_map(headers: &ResolvedHeaders) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| invalid(format!("header name '{}': {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| invalid(format!("header '{}' value: {}", name, e)))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

/// Adapter for converting domain request bodies to Hyper bodies
struct BodyAdapter;

impl BodyAdapter {
    /// A present body, even an empty one, is announced with `Content-Length`.
    fn to_hyper_body(body: Option<String>, headers: &mut HeaderMap) -> Full<Bytes> {
        match body {
            Some(data) => {
                if !headers.contains_key(CONTENT_LENGTH) {
                    headers.insert(CONTENT_LENGTH, HeaderValue::from(data.len()));
                }
                Full::new(Bytes::from(data))
            }
            None => Full::new(Bytes::new()),
        }
    }
}

/// Adapter for converting domain responses from Hyper responses
struct ResponseAdapter;

impl ResponseAdapter {
    async fn to_domain_response(
        hyper_response: hyper::Response<hyper::body::Incoming>,
    ) -> Result<Response, TransportError> {
        let status = hyper_response.status().as_u16();
        let headers = Self::extract_headers(hyper_response.headers());
        let body = Self::extract_response_body(hyper_response).await?;

        Ok(Response { status, headers, body })
    }

    fn extract_headers(headers: &HeaderMap) -> Vec<(String, String)> {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    canonical_header_name(name.as_str()),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }

    async fn extract_response_body(
        response: hyper::Response<hyper::body::Incoming>,
    ) -> Result<String, TransportError> {
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Body(error_chain(&e)))?
            .to_bytes();

        Ok(String::from_utf8_lossy(&body_bytes).into_owned())
    }
}

/// Restores the conventional `Title-Case` spelling of a header name, which
/// hyper hands back lowercased: the first letter and every letter after a
/// hyphen are upper-cased, the rest lower-cased.
fn canonical_header_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            canonical.push(c.to_ascii_uppercase());
        } else {
            canonical.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    canonical
}
