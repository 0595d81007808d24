use crate::error::AssessError;
use tracing_subscriber::EnvFilter;

/// Level implied by `-v`/`-q`, if the user passed either.
pub fn level_from_flags(verbose: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("error");
    }
    match verbose {
        0 => None,
        1 => Some("info"),
        _ => Some("debug"),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the configured level.
pub fn init(level: &str) -> Result<(), AssessError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| AssessError::ConfigParse(format!("invalid log level '{level}': {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| AssessError::ConfigParse(format!("logging already initialised: {e}")))
}
