//! Diagnostic logging setup.
//!
//! Filtering follows `RUST_LOG` and defaults to `warn`. The full-screen chat
//! owns the terminal, so it only logs when a file is given.

use std::error::Error;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Disabled,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Where diagnostics go for a command, given the optional `--log-file`.
    pub fn for_command(log_file: Option<&Path>, owns_terminal: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None if owns_terminal => LogTarget::Disabled,
            None => LogTarget::Stderr,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn open_log_file(path: &Path) -> Result<File, Box<dyn Error>> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

pub fn init_tracing(target: &LogTarget) -> Result<(), Box<dyn Error>> {
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| err.to_string().into()),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| err.to_string().into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn terminal_commands_stay_silent_without_a_file() {
        assert_eq!(LogTarget::for_command(None, true), LogTarget::Disabled);
        assert_eq!(LogTarget::for_command(None, false), LogTarget::Stderr);
    }

    #[test]
    fn log_file_wins_for_every_command() {
        let path = Path::new("/tmp/rentalqa.log");
        for owns_terminal in [true, false] {
            assert_eq!(
                LogTarget::for_command(Some(path), owns_terminal),
                LogTarget::File(path.to_path_buf())
            );
        }
    }

    #[test]
    fn open_log_file_creates_missing_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("rentalqa.log");

        open_log_file(&path).expect("log file opens");

        assert!(path.exists());
    }

    #[test]
    fn disabled_target_installs_nothing() {
        init_tracing(&LogTarget::Disabled).expect("no-op init");
    }
}
