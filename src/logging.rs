//! Diagnostic output. Evaluation progress goes through the `log` facade; this
//! sets up a `log4rs` backend writing to stderr for binaries and harnesses that
//! don't configure their own.
use crate::error::{Error, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

const PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}";

/// # Errors
/// `Logging` if the configuration is rejected by `log4rs`.
pub fn stderr_config(level: LevelFilter) -> Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Installs a stderr logger as the global logger.
///
/// # Errors
/// `Logging` if a global logger is already installed.
pub fn init_stderr(level: LevelFilter) -> Result<Handle> {
    let config = stderr_config(level)?;
    log4rs::init_config(config).map_err(|e| Error::Logging(e.to_string()))
}
