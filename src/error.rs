use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Failures that stop the binary before or outside gameplay.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open log file: {0}")]
    LogFile(#[source] io::Error),
    #[error("logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
}
