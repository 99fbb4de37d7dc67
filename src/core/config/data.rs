use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{DEFAULT_BACKEND_URL, GREETING_TEXT};
use crate::utils::url::normalize_base_url;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the answering service (e.g., "http://localhost:8000")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
    /// First bot message of every session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
}

impl Config {
    /// Picks the service URL: command-line override, then config, then the
    /// built-in default.
    pub fn resolve_backend_url(&self, override_url: Option<&str>) -> String {
        let non_blank = |url: &&str| !url.trim().is_empty();
        let chosen = override_url
            .filter(non_blank)
            .or(self.backend_url.as_deref().filter(non_blank))
            .unwrap_or(DEFAULT_BACKEND_URL);
        normalize_base_url(chosen.trim())
    }

    pub fn greeting_text(&self) -> &str {
        self.greeting
            .as_deref()
            .filter(|greeting| !greeting.trim().is_empty())
            .unwrap_or(GREETING_TEXT)
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
