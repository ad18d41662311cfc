pub mod busy;
pub mod config;
pub mod disposition; // Trial disposition workflow
pub mod error;
pub mod listing;
pub mod models;
pub mod notify;
pub mod routes;
pub mod services; // One function per REST endpoint
pub mod session;
pub mod transport;
pub mod validation;

pub use disposition::{Disposition, DispositionAction, DispositionDraft, FailurePolicy, TrialDesk};
pub use error::{ClientError, FieldErrors};
pub use transport::{HttpTransport, Transport};

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use config::ClientConfig;
use session::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise [`config::default_log_filter`]
/// applies. Calling this twice is harmless.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}

/// Build the HTTP transport for `config`.
///
/// Tokens persist to `config.session_file` when set and stay in memory
/// otherwise.
pub fn connect(config: &ClientConfig) -> Result<Arc<HttpTransport>, ClientError> {
    let tokens: Arc<dyn TokenStore> = match &config.session_file {
        Some(path) => Arc::new(FileTokenStore::new(path)),
        None => Arc::new(MemoryTokenStore::new()),
    };
    let transport = HttpTransport::new(config, tokens)?;
    tracing::info!(base_url = %transport.base_url(), "Clinic API client ready");
    Ok(Arc::new(transport))
}
