use clap::Parser;
use kurl::infrastructure::config::init_logging;
use kurl::infrastructure::http_client::HyperHttpClient;
use kurl::presentation::cli::Cli;
use std::process::ExitCode;

/// kurl: a narrow curl look-alike
///
/// Sends exactly one HTTP request built from `-X`, `-H` and `--data-raw`,
/// prints the outgoing request and the response, and exits with 1 when no
/// response could be obtained.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();
    init_logging(&config);

    let request_service = match HyperHttpClient::new(config) {
        Ok(http_client) => http_client.create_request_service(),
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match cli.run(&request_service, &mut stdout).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
