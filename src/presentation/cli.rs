use crate::application::builders::request_builder::RequestBuilder;
use crate::application::services::HttpRequestService;
use crate::domain::entities::{HttpOutcome, RequestSpec};
use crate::infrastructure::config::ClientConfig;
use crate::infrastructure::output;
use anyhow::Result;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

/// CLI configuration for kurl
///
/// Flag names follow https://curl.se/docs/manpage.html
#[derive(Parser, Debug)]
#[command(name = "kurl", version)]
#[command(about = "kurl: send one HTTP request and trace the exchange", long_about = None)]
pub struct Cli {
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub url: String,

    /// HTTP method to be used
    #[arg(short = 'X', long = "request")]
    pub method: Option<String>,

    /// HTTP metadata; headers to be sent as 'Name: Value'
    #[arg(short = 'H', long = "header", allow_hyphen_values = true)]
    pub headers: Vec<String>,

    /// Data to be sent as the HTTP payload
    #[arg(long = "data-raw", allow_hyphen_values = true)]
    pub data_raw: Option<String>,

    /// Maximum time in seconds allowed for the whole exchange, 0 for no limit
    #[arg(
        short = 'm',
        long = "max-time",
        value_name = "SECONDS",
        allow_hyphen_values = true,
        value_parser = parse_max_time
    )]
    pub max_time: Option<Duration>,

    /// Log transport details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Accepts fractional seconds; rejects negative, NaN and out-of-range values.
fn parse_max_time(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", raw))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("'{}': {}", raw, e))
}

impl Cli {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.max_time, self.verbose)
    }

    pub fn request_spec(&self) -> Result<RequestSpec> {
        RequestBuilder::new()
            .url(&self.url)
            .method(self.method.as_deref())
            .headers(&self.headers)
            .body(self.data_raw.as_deref())
            .build()
    }

    pub async fn run<W: Write>(
        &self,
        request_service: &HttpRequestService,
        out: &mut W,
    ) -> Result<ExitCode> {
        let spec = self.request_spec()?;
        let outcome = trace_exchange(request_service, &spec, out).await?;
        Ok(ExitCode::from(outcome.exit_code()))
    }
}

/// Resolves headers, prints the request, sends it and prints what came back.
///
/// A transport failure is printed as a diagnostic and returned in the
/// outcome. `Err` only means the trace itself could not be written.
pub async fn trace_exchange<W: Write>(
    request_service: &HttpRequestService,
    spec: &RequestSpec,
    out: &mut W,
) -> Result<HttpOutcome> {
    let request = spec.resolve();
    output::print_request(out, &request)?;

    let outcome = request_service.send_request(request).await;
    match &outcome {
        HttpOutcome::Completed(response) => output::print_response(out, response)?,
        HttpOutcome::Failed(err) => output::print_failure(out, err)?,
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::MockHttpClient;
    use crate::domain::entities::Response;
    use crate::domain::errors::TransportError;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("kurl").chain(args.iter().copied())).unwrap()
    }

    fn pong() -> Response {
        Response {
            status: 200,
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: "pong".to_string(),
        }
    }

    async fn run_traced(client: MockHttpClient, args: &[&str]) -> (HttpOutcome, String) {
        let service = HttpRequestService::new(Box::new(client));
        let spec = parse(args).request_spec().unwrap();
        let mut out = Vec::new();
        let outcome = trace_exchange(&service, &spec, &mut out).await.unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn bare_url() {
        let spec = parse(&["http://example.test/ping"]).request_spec().unwrap();
        assert_eq!(spec.url, "http://example.test/ping");
        assert_eq!(spec.method.as_str(), "GET");
        assert!(spec.headers.is_empty());
        assert_eq!(spec.body, None);
    }

    #[test]
    fn short_and_long_flags() {
        let short = parse(&["-X", "PUT", "-H", "A: 1", "-H", "A: 2", "http://example.test"]);
        let long = parse(&[
            "--request", "PUT", "--header", "A: 1", "--header", "A: 2", "http://example.test",
        ]);
        assert_eq!(short.request_spec().unwrap(), long.request_spec().unwrap());
        assert_eq!(short.headers, vec!["A: 1", "A: 2"]);
    }

    #[test]
    fn empty_method_falls_back_to_get() {
        let spec = parse(&["-X", "", "http://example.test"]).request_spec().unwrap();
        assert_eq!(spec.method.as_str(), "GET");
    }

    #[test]
    fn explicit_empty_data_is_a_body() {
        let spec = parse(&["--data-raw", "", "http://example.test"]).request_spec().unwrap();
        assert_eq!(spec.body.as_deref(), Some(""));
    }

    #[test]
    fn data_is_kept_verbatim() {
        let spec = parse(&["--request", "POST", "--data-raw", " {\"a\":1} ", "http://example.test"])
            .request_spec()
            .unwrap();
        assert_eq!(spec.body.as_deref(), Some(" {\"a\":1} "));
    }

    #[test]
    fn missing_url_is_a_usage_error() {
        let err = Cli::try_parse_from(["kurl", "-X", "GET"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_url_is_a_usage_error() {
        let err = Cli::try_parse_from(["kurl", ""]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn max_time_builds_config() {
        let config = parse(&["-m", "2.5", "-v", "http://example.test"]).config();
        assert_eq!(config.max_time, Some(Duration::from_millis(2500)));
        assert!(config.verbose);
    }

    #[test]
    fn zero_max_time_means_no_limit() {
        let config = parse(&["--max-time", "0", "http://example.test"]).config();
        assert_eq!(config.max_time, None);
    }

    #[test]
    fn out_of_range_max_time_is_a_usage_error() {
        for value in ["1e30", "-2", "NaN", "inf", "soon"] {
            let err = Cli::try_parse_from(["kurl", "-m", value, "http://example.test"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "value {}", value);
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[tokio::test]
    async fn completed_exchange_prints_both_traces() {
        let mut client = MockHttpClient::new();
        client
            .expect_send()
            .withf(|request| {
                request.method.as_str() == "GET"
                    && request.url == "http://example.test/ping"
                    && request.headers.is_empty()
                    && request.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(pong()));

        let (outcome, text) = run_traced(client, &["http://example.test/ping"]).await;

        assert_eq!(outcome.exit_code(), 0);
        assert!(text.starts_with("* Request: GET http://example.test/ping\n"));
        assert!(text.contains("\t<none>\n"));
        assert!(text.contains("* Response: 200"));
        assert!(text.contains("\t- Content-Type=text/plain\n"));
        assert!(text.ends_with("\tpong\n"));
    }

    #[tokio::test]
    async fn request_trace_shows_resolved_headers() {
        let mut client = MockHttpClient::new();
        client.expect_send().returning(|_| Ok(pong()));

        let (_, text) = run_traced(
            client,
            &["-X", "PUT", "-H", "A: 1", "-H", "Malformed", "-H", "A: 2", "http://example.test"],
        )
        .await;

        assert!(text.contains("* Request Headers:\n\t- A=2\n\n"));
        assert!(!text.contains("Malformed"));
    }

    #[tokio::test]
    async fn transport_failure_skips_response_trace() {
        let mut client = MockHttpClient::new();
        client
            .expect_send()
            .withf(|request| request.body.as_deref() == Some("{\"a\":1}"))
            .returning(|_| Err(TransportError::Connect("Connection refused".into())));

        let (outcome, text) = run_traced(
            client,
            &["--request", "POST", "--data-raw", "{\"a\":1}", "http://127.0.0.1:9"],
        )
        .await;

        assert_eq!(outcome.exit_code(), 1);
        assert!(text.contains("* Request: POST http://127.0.0.1:9"));
        assert!(text.contains("Connection refused"));
        assert!(!text.contains("* Response"));
    }
}
