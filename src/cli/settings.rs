//! `set` / `unset` handling for the config file.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::core::config::Config;
use crate::utils::url::validate_backend_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    BackendUrl,
    Greeting,
}

impl SettingKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::BackendUrl => "backend-url",
            SettingKey::Greeting => "greeting",
        }
    }
}

impl FromStr for SettingKey {
    type Err = SettingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "backend-url" => Ok(SettingKey::BackendUrl),
            "greeting" => Ok(SettingKey::Greeting),
            other => Err(SettingError::UnknownKey(other.to_string())),
        }
    }
}

/// Errors that can occur when modifying configuration settings.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The value was rejected for this key.
    InvalidValue { key: SettingKey, reason: String },
}

impl SettingError {
    /// Print the error message to stderr with appropriate formatting.
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(_) => {
                eprintln!("❌ {self}");
                eprintln!("   Known keys: backend-url, greeting");
            }
            SettingError::InvalidValue { .. } => eprintln!("❌ {self}"),
        }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::InvalidValue { key, reason } => {
                write!(f, "Invalid value for {}: {reason}", key.as_str())
            }
        }
    }
}

impl Error for SettingError {}

/// Applies `key = value` to `config` and returns the confirmation line.
pub fn apply_set(config: &mut Config, key: SettingKey, value: &str) -> Result<String, SettingError> {
    match key {
        SettingKey::BackendUrl => {
            let url = validate_backend_url(value)
                .map_err(|reason| SettingError::InvalidValue { key, reason })?;
            let message = format!("✅ Set backend-url to: {url}");
            config.backend_url = Some(url);
            Ok(message)
        }
        SettingKey::Greeting => {
            let greeting = value.trim();
            if greeting.is_empty() {
                return Err(SettingError::InvalidValue {
                    key,
                    reason: "greeting cannot be empty".to_string(),
                });
            }
            config.greeting = Some(greeting.to_string());
            Ok(format!("✅ Set greeting to: {greeting}"))
        }
    }
}

pub fn apply_unset(config: &mut Config, key: SettingKey) -> String {
    match key {
        SettingKey::BackendUrl => config.backend_url = None,
        SettingKey::Greeting => config.greeting = None,
    }
    format!("✅ Unset {}", key.as_str())
}

pub fn run_set(key: Option<&str>, value: Option<Vec<String>>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    let value = value.map(|parts| parts.join(" ")).unwrap_or_default();

    let Some(key) = key.filter(|_| !value.trim().is_empty()) else {
        config.print_all();
        return Ok(());
    };

    let outcome = key
        .parse::<SettingKey>()
        .and_then(|key| apply_set(&mut config, key, &value));
    match outcome {
        Ok(message) => {
            config.save()?;
            println!("{message}");
            Ok(())
        }
        Err(err) => {
            err.print();
            std::process::exit(1);
        }
    }
}

pub fn run_unset(key: &str) -> Result<(), Box<dyn Error>> {
    let key = match key.parse::<SettingKey>() {
        Ok(key) => key,
        Err(err) => {
            err.print();
            std::process::exit(1);
        }
    };

    let mut config = Config::load()?;
    let message = apply_unset(&mut config, key);
    config.save()?;
    println!("{message}");
    Ok(())
}
