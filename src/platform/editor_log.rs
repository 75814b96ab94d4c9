// BuildSleuth - platform/editor_log.rs
//
// Where the Unity editor writes Editor.log on each desktop OS.
//
// Locations:
//   Windows: %LOCALAPPDATA%\Unity\Editor\Editor.log
//   macOS:   ~/Library/Logs/Unity/Editor.log
//   Linux:   ~/.config/unity3d/Editor.log

use crate::util::constants;
use crate::util::error::LocateError;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Desktop platforms the Unity editor runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
}

impl HostOs {
    /// The OS this binary was compiled for, if the editor runs there.
    pub fn current() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::MacOs),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }
}

/// Directory holding Editor.log (and Editor-prev.log) for `os`.
///
/// `home` is the user's home directory; `local_data` is the per-user local
/// application data directory (only used on Windows).
pub fn editor_log_dir(os: HostOs, home: &Path, local_data: &Path) -> PathBuf {
    match os {
        HostOs::Windows => local_data.join("Unity").join("Editor"),
        HostOs::MacOs => home.join("Library").join("Logs").join("Unity"),
        HostOs::Linux => home.join(".config").join("unity3d"),
    }
}

/// Full path of the current session's Editor.log for `os`.
pub fn editor_log_path(os: HostOs, home: &Path, local_data: &Path) -> PathBuf {
    editor_log_dir(os, home, local_data).join(constants::EDITOR_LOG_FILE_NAME)
}

/// Resolve the Editor.log path for the running platform.
///
/// Does not check that the file exists; the load pipeline reports a missing
/// log with the path it looked at.
pub fn default_editor_log() -> Result<PathBuf, LocateError> {
    let os = HostOs::current().ok_or(LocateError::UnsupportedPlatform {
        os: std::env::consts::OS,
    })?;
    let base = BaseDirs::new().ok_or(LocateError::NoHomeDirectory)?;
    let path = editor_log_path(os, base.home_dir(), base.data_local_dir());
    tracing::debug!(path = %path.display(), ?os, "Resolved default Editor.log");
    Ok(path)
}

/// List `Editor*.log` files in `dir`, current session first.
///
/// Unity rotates the previous session to `Editor-prev.log`; offering it lets
/// the user inspect the last build after restarting the editor.
pub fn candidate_logs(dir: &Path) -> Vec<PathBuf> {
    let pattern = dir.join(constants::EDITOR_LOG_GLOB);
    let pattern = pattern.to_string_lossy();

    let mut found: Vec<PathBuf> = match glob::glob(&pattern) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable log candidate");
                    None
                }
            })
            .collect(),
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "Invalid log glob pattern");
            Vec::new()
        }
    };

    found.sort_by_key(|p| {
        let is_current = p
            .file_name()
            .is_some_and(|n| n == constants::EDITOR_LOG_FILE_NAME);
        (!is_current, p.clone())
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_uses_local_app_data() {
        let path = editor_log_path(
            HostOs::Windows,
            Path::new("/home/u"),
            Path::new("/appdata/local"),
        );
        assert_eq!(
            path,
            Path::new("/appdata/local/Unity/Editor/Editor.log").to_path_buf()
        );
    }

    #[test]
    fn test_macos_uses_library_logs() {
        let path = editor_log_path(HostOs::MacOs, Path::new("/Users/u"), Path::new("/x"));
        assert_eq!(
            path,
            Path::new("/Users/u/Library/Logs/Unity/Editor.log").to_path_buf()
        );
    }

    #[test]
    fn test_linux_uses_dot_config() {
        let path = editor_log_path(HostOs::Linux, Path::new("/home/u"), Path::new("/x"));
        assert_eq!(
            path,
            Path::new("/home/u/.config/unity3d/Editor.log").to_path_buf()
        );
    }

    #[test]
    fn test_candidate_logs_current_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Editor-prev.log"), "prev").unwrap();
        std::fs::write(dir.path().join("Editor.log"), "current").unwrap();
        std::fs::write(dir.path().join("Player.log"), "ignored").unwrap();

        let logs = candidate_logs(dir.path());
        let names: Vec<_> = logs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Editor.log", "Editor-prev.log"]);
    }

    #[test]
    fn test_candidate_logs_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(candidate_logs(&dir.path().join("nope")).is_empty());
    }
}
