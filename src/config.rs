use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clinic Desk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Per-request timeout when `CLINIC_API_TIMEOUT_SECS` is unset or invalid.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Lifetime of a stored access token (24 hours, same as the login cookie).
pub const SESSION_MAX_AGE_SECS: i64 = 86_400;

/// Host and port pairs that serve the frontend itself and can never be the API.
const FRONTEND_DEV_HOSTS: &[(&str, u16)] = &[("localhost", 3000), ("127.0.0.1", 3000)];

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "clinic_desk=info,warn"
}

/// Get the application data directory (~/.clinic-desk/).
///
/// `None` when the home directory cannot be determined.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".clinic-desk"))
}

/// Default location of the persisted session token.
pub fn default_session_file() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("session.json"))
}

/// Runtime configuration for the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Priority for the base URL: `CLINIC_API_BASE_URL`, then `API_BASE_URL`,
    /// then [`DEFAULT_API_BASE_URL`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let configured = lookup("CLINIC_API_BASE_URL")
            .or_else(|| lookup("API_BASE_URL"))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let base_url = resolve_base_url(configured.as_deref());

        let timeout_secs = match lookup("CLINIC_API_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(value = %raw, "Ignoring invalid CLINIC_API_TIMEOUT_SECS");
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let session_file = lookup("CLINIC_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(default_session_file);

        Self {
            base_url,
            timeout_secs,
            session_file,
        }
    }
}

/// Pick the API base URL, rejecting the frontend's own dev server and
/// anything that does not parse as an absolute URL.
fn resolve_base_url(configured: Option<&str>) -> String {
    let Some(url) = configured else {
        return DEFAULT_API_BASE_URL.to_string();
    };

    let parsed = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(
                configured = url,
                error = %e,
                fallback = DEFAULT_API_BASE_URL,
                "API base URL is not a valid URL, using default"
            );
            return DEFAULT_API_BASE_URL.to_string();
        }
    };

    if is_frontend_dev_server(&parsed) {
        tracing::warn!(
            configured = url,
            fallback = DEFAULT_API_BASE_URL,
            "API base URL points at the frontend dev server, using default"
        );
        return DEFAULT_API_BASE_URL.to_string();
    }

    url.trim_end_matches('/').to_string()
}

fn is_frontend_dev_server(url: &reqwest::Url) -> bool {
    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return false;
    };
    FRONTEND_DEV_HOSTS
        .iter()
        .any(|(dev_host, dev_port)| host.eq_ignore_ascii_case(dev_host) && port == *dev_port)
}
