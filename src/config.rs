use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Documind";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Conversion base for the processing-time heuristic (one time-unit per MB).
pub const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// Timeout around external extraction/answer backend calls, the only
/// unbounded-latency operations in the pipeline.
pub const BACKEND_TIMEOUT_SECS: u64 = 120;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "documind=info"
}

/// Get the application data directory
/// ~/Documind/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Documind")
}

/// Directory holding the persisted store blobs
pub fn store_dir() -> PathBuf {
    app_data_dir().join("store")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Documind"));
    }

    #[test]
    fn store_dir_under_app_data() {
        let store = store_dir();
        let app = app_data_dir();
        assert!(store.starts_with(app));
        assert!(store.ends_with("store"));
    }

    #[test]
    fn app_name_is_documind() {
        assert_eq!(APP_NAME, "Documind");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn default_filter_targets_crate() {
        assert!(default_log_filter().starts_with("documind"));
    }
}
