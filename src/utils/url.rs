//! URL helpers for talking to the answering service.
//!
//! Base URLs come from the command line or the config file, so they are
//! normalized before endpoints are appended to avoid double slashes.

use reqwest::Url;

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use rentalqa::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000///"), "http://localhost:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them
///
/// # Examples
///
/// ```
/// use rentalqa::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000", "ask"),
///     "http://localhost:8000/ask"
/// );
/// assert_eq!(
///     construct_api_url("https://qa.example.com/api/", "/health"),
///     "https://qa.example.com/api/health"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Check that `candidate` is an absolute http(s) URL and return it normalized.
pub fn validate_backend_url(candidate: &str) -> Result<String, String> {
    let trimmed = candidate.trim();
    let parsed = Url::parse(trimmed).map_err(|err| format!("Invalid URL '{trimmed}': {err}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(normalize_base_url(trimmed)),
        other => Err(format!(
            "Unsupported URL scheme '{other}' in '{trimmed}' (expected http or https)"
        )),
    }
}
