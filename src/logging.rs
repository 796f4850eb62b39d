use std::fs::{File, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::AppError;

/// Routes `log` output to `path`.
///
/// The game owns the terminal, so nothing is logged unless a file is given.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(path: Option<&Path>) -> Result<(), AppError> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = open_log_file(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    log::info!("logging to {}", path.display());
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(AppError::LogFile)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(AppError::LogFile)
}
