use log::LevelFilter;
use std::time::Duration;

/// Runtime knobs that shape how the one request is carried out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    /// Upper bound for the whole exchange. `None` waits as long as the transport does.
    pub max_time: Option<Duration>,
    pub verbose: bool,
}

impl ClientConfig {
    /// A zero `max_time` means no limit, as with curl's `--max-time 0`.
    pub fn new(max_time: Option<Duration>, verbose: bool) -> Self {
        Self {
            max_time: max_time.filter(|limit| !limit.is_zero()),
            verbose,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

/// Sends diagnostics to stderr so they never interleave with the trace on stdout.
/// `RUST_LOG` overrides the level picked from `--verbose`. Call once per process.
pub fn init_logging(config: &ClientConfig) {
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}
