use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start logging to stderr. `RUST_LOG` overrides `default_spec`
/// (e.g. `"warn"`, `"ml_tic_tac_toe=debug"`). Keep the handle alive for the
/// lifetime of the program.
pub fn init(default_spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(default_spec)?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()
}
