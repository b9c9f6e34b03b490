use crate::domain::entities::RequestSpec;
use crate::domain::value_objects::Method;
use anyhow::{Result, anyhow};

/// Assembles a `RequestSpec` from command-line values.
///
/// Pure: no network access and no header parsing happen here.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    url: Option<String>,
    headers: Vec<String>,
    body: Option<String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Option<&str>) -> Self {
        self.method = Some(Method::resolve(method));
        self
    }

    pub fn url(mut self, raw_url: &str) -> Self {
        self.url = Some(raw_url.to_string());
        self
    }

    pub fn headers(mut self, raw_headers: &[String]) -> Self {
        self.headers.extend(raw_headers.iter().cloned());
        self
    }

    pub fn body(mut self, data: Option<&str>) -> Self {
        self.body = data.map(str::to_string);
        self
    }

    pub fn build(self) -> Result<RequestSpec> {
        let url = self.url.ok_or_else(|| anyhow!("missing URL"))?;
        Ok(RequestSpec {
            url,
            method: self.method.unwrap_or_default(),
            headers: self.headers,
            body: self.body,
        })
    }
}
