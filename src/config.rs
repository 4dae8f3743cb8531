//! Runtime configuration

use std::path::{Path, PathBuf};

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "NUTS_DATABASE_PATH";

/// Database path from `NUTS_DATABASE_PATH`, or `data/nuts.db` under the project root
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));
            default_database_path(&exe_dir)
        })
}

/// `data/nuts.db` next to the project root, stepping out of `target/{debug,release}`
fn default_database_path(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(root) = path.parent().and_then(Path::parent) {
            path = root.to_path_buf();
        }
    }
    path.push("data");
    path.push("nuts.db");
    path
}
