//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Package version plus build date and commit, e.g. `0.1.0 (2026-10-17 abc1234)`.
pub fn version_string() -> String {
    format!(
        "{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_build_commit_format() {
        // Should be 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_string_contains_package_version() {
        let version = version_string();
        assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(version.contains(BUILD_COMMIT));
    }
}
