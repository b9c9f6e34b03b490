use crate::domain::errors::TransportError;
use crate::domain::value_objects::{Method, ResolvedHeaders};

/// The single request described on the command line, before header resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    pub headers: Vec<String>, // Raw `Name: Value` strings, in the order given
    pub body: Option<String>,
}

impl RequestSpec {
    /// Applies the header-splitting policy and produces what the transport sends.
    pub fn resolve(&self) -> Request {
        Request {
            method: self.method.clone(),
            url: self.url.clone(),
            headers: ResolvedHeaders::from_raw(&self.headers),
            body: self.body.clone(),
        }
    }
}

/// Represents an HTTP request ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: ResolvedHeaders,
    pub body: Option<String>,
}

/// Represents an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>, // In the order the transport exposes them
    pub body: String,
}

/// Result of the one exchange this process performs.
///
/// Any status code, 4xx and 5xx included, is a completed exchange.
#[derive(Debug)]
pub enum HttpOutcome {
    Completed(Response),
    Failed(TransportError),
}

impl HttpOutcome {
    pub const EXIT_SUCCESS: u8 = 0;
    pub const EXIT_TRANSPORT_FAILURE: u8 = 1;

    pub fn exit_code(&self) -> u8 {
        match self {
            HttpOutcome::Completed(_) => Self::EXIT_SUCCESS,
            HttpOutcome::Failed(_) => Self::EXIT_TRANSPORT_FAILURE,
        }
    }
}
