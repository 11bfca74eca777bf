use std::{env, path::PathBuf};

use dirs_next::{config_dir, data_local_dir, home_dir};

/// Application directory name under the platform config/data roots.
pub const APP_DIR_NAME: &str = "quill";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolve a path from `env_var` when it is set and non-blank, otherwise
/// join `file_name` onto `root` (falling back to the working directory).
pub fn path_from_env_or(env_var: &str, root: Option<PathBuf>, file_name: &str) -> PathBuf {
    if let Ok(path) = env::var(env_var) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    root.unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(file_name)
}

/// `~/.config/quill/<file_name>` unless overridden by `env_var`.
pub fn config_path(env_var: &str, file_name: &str) -> PathBuf {
    path_from_env_or(env_var, config_dir(), file_name)
}

/// `~/.local/share/quill/<file_name>` unless overridden by `env_var`.
pub fn data_path(env_var: &str, file_name: &str) -> PathBuf {
    path_from_env_or(env_var, data_local_dir(), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde(" /tmp/quill.json "), PathBuf::from("/tmp/quill.json"));
    }

    #[test]
    fn env_override_wins_over_default_root() {
        temp_env::with_var("QUILL_TEST_PATH", Some("/tmp/override.json"), || {
            let path = path_from_env_or("QUILL_TEST_PATH", Some(PathBuf::from("/etc")), "config.json");
            assert_eq!(path, PathBuf::from("/tmp/override.json"));
        });
        temp_env::with_var("QUILL_TEST_PATH", Some("   "), || {
            let path = path_from_env_or("QUILL_TEST_PATH", Some(PathBuf::from("/etc")), "config.json");
            assert_eq!(path, PathBuf::from("/etc/quill/config.json"));
        });
    }
}
