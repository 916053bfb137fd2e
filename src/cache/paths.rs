// Cache path utilities.
// Locates the per-user cache file for name resolution state.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/nota on macOS/Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nota").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the resolution cache file.
pub fn cache_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("cache.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_location() {
        let path = cache_file().unwrap();
        assert!(path.ends_with("cache.json"));
        assert!(path.to_string_lossy().contains("nota"));
    }
}
