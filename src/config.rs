use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Carewatch";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "carewatch=info"
}

/// Get the application data directory
/// ~/Carewatch/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Carewatch")
}

/// Get the path of the user-editable vital reference table, if deployed.
/// The engine falls back to the bundled tables when this file is absent.
pub fn reference_path() -> PathBuf {
    app_data_dir().join("vital_reference.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Carewatch"));
    }

    #[test]
    fn reference_path_under_app_data() {
        let path = reference_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("vital_reference.json"));
    }

    #[test]
    fn app_name_is_carewatch() {
        assert_eq!(APP_NAME, "Carewatch");
    }
}
