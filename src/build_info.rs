//! Build information
//!
//! What `build.rs` embedded, plus the schema version this binary migrates to. Reported by
//! `nuts_status` and printed in the startup banner.

use serde::Serialize;

use crate::db::migrations::SCHEMA_VERSION;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Raw counter text; absent when built without the build script
const RAW_BUILD_NUMBER: Option<&str> = option_env!("NUTS_BUILD_NUMBER");

/// Build time in ISO 8601 (UTC)
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTS_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile, `debug` or `release`
pub const BUILD_PROFILE: &str = match option_env!("NUTS_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

/// Build counter, 0 when unknown
pub fn build_number() -> u64 {
    parse_build_number(RAW_BUILD_NUMBER)
}

fn parse_build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub profile: &'static str,
    /// Schema version the migrations bring a database to
    pub schema_version: i32,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: build_number(),
            build_timestamp: BUILD_TIMESTAMP,
            profile: BUILD_PROFILE,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// One-line form, e.g. `v1.0.0 build 12 (release, schema v1)`
    pub fn summary(&self) -> String {
        format!(
            "v{} build {} ({}, schema v{})",
            self.version, self.build_number, self.profile, self.schema_version
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  Nuts Balance {}", info.summary());
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_number() {
        assert_eq!(parse_build_number(Some("42")), 42);
        assert_eq!(parse_build_number(Some(" 7\n")), 7);
        assert_eq!(parse_build_number(Some("4x")), 0);
        assert_eq!(parse_build_number(None), 0);
    }

    #[test]
    fn test_summary_names_schema() {
        let info = BuildInfo {
            version: "1.0.0",
            build_number: 12,
            build_timestamp: "2024-01-01T00:00:00Z",
            profile: "release",
            schema_version: 1,
        };
        assert_eq!(info.summary(), "v1.0.0 build 12 (release, schema v1)");
    }

    #[test]
    fn test_current_tracks_migrations() {
        let info = BuildInfo::current();
        assert_eq!(info.version, VERSION);
        assert_eq!(info.schema_version, SCHEMA_VERSION);
    }
}
