use crate::domain::entities::{HttpOutcome, Request, Response};
use crate::domain::errors::TransportError;
use async_trait::async_trait;

/// Trait for HTTP clients to enable mocking and dependency inversion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// Runs the single request/response exchange
pub struct HttpRequestService {
    http_client: Box<dyn HttpClient>,
}

impl HttpRequestService {
    pub fn new(http_client: Box<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Sends the resolved request. Any response, whatever its status, is a
    /// completed exchange; only transport failures end up in `Failed`.
    pub async fn send_request(&self, request: Request) -> HttpOutcome {
        log::debug!("sending {} {}", request.method, request.url);
        match self.http_client.send(request).await {
            Ok(response) => {
                log::debug!("received status {}", response.status);
                HttpOutcome::Completed(response)
            }
            Err(err) => {
                log::debug!("transport failure: {:?}", err);
                HttpOutcome::Failed(err)
            }
        }
    }
}
