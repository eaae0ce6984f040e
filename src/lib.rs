//! Documind: document lifecycle tracking and content extraction.
//!
//! Uploads become tracked `Document` records, the extraction pipeline
//! turns their bytes into text (degrading gracefully when a backend
//! fails), the activity log keeps a bounded trail of what happened,
//! and the query service answers questions grounded in extracted
//! content. All state lives in an explicit [`tracker::Tracker`].

pub mod config;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod stats;
pub mod store;
pub mod tracker;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set, otherwise the crate default filter is
/// used. Call once at startup.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(
        app = config::APP_NAME,
        version = config::APP_VERSION,
        "Tracing initialized"
    );
}
