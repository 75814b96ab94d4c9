// BuildSleuth - platform/fs.rs
//
// Filesystem helpers: scratch copies of the live editor log, lossy line
// reading, asset lookup inside a Unity project, and file-manager reveal.

use crate::util::constants;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use walkdir::WalkDir;

// =============================================================================
// Scratch copy
// =============================================================================

/// A private copy of the editor log, deleted when dropped.
///
/// Unity keeps Editor.log open for writing while the editor runs; parsing a
/// copy avoids sharing violations on Windows and a file that grows mid-read.
#[derive(Debug)]
pub struct ScratchCopy {
    path: PathBuf,
}

impl ScratchCopy {
    /// Copy `source` into `scratch_dir`, creating the directory if needed.
    pub fn create(source: &Path, scratch_dir: &Path) -> io::Result<Self> {
        static SEQ: AtomicU64 = AtomicU64::new(0);

        std::fs::create_dir_all(scratch_dir)?;
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        let path = scratch_dir.join(format!(
            "{}-{}-{seq}.log",
            constants::SCRATCH_LOG_STEM,
            std::process::id()
        ));
        let bytes = std::fs::copy(source, &path)?;

        tracing::debug!(
            source = %source.display(),
            scratch = %path.display(),
            bytes,
            "Editor log copied to scratch"
        );
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchCopy {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to delete scratch copy"
                );
            }
        }
    }
}

// =============================================================================
// Line reading
// =============================================================================

/// Iterator over the lines of a reader, replacing invalid UTF-8.
///
/// Editor.log mixes output from native plugins; a stray non-UTF-8 byte must
/// not end the read early the way `BufRead::lines` would.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Wrap any reader in a [`LossyLines`] iterator.
pub fn lossy_lines<R: BufRead>(reader: R) -> LossyLines<R> {
    LossyLines {
        reader,
        buf: Vec::new(),
    }
}

/// Open `path` and iterate its lines lazily, lossy on encoding errors.
pub fn read_lines_lossy(path: &Path) -> io::Result<LossyLines<BufReader<std::fs::File>>> {
    let file = std::fs::File::open(path)?;
    Ok(lossy_lines(BufReader::new(file)))
}

// =============================================================================
// Asset lookup
// =============================================================================

/// Find the file on disk for a record name inside a Unity project.
///
/// Build report names are usually project-relative (`Assets/UI/Logo.png`),
/// so the name is first joined onto `project_root`. Failing that, the
/// project's `Assets` tree is searched for a file with the same file name.
pub fn resolve_asset_path(project_root: &Path, asset_name: &str) -> Option<PathBuf> {
    if asset_name.trim().is_empty() {
        return None;
    }
    let direct = project_root.join(asset_name);
    if direct.is_file() {
        return Some(direct);
    }

    let wanted = Path::new(asset_name).file_name()?;
    let assets_dir = project_root.join(constants::PROJECT_ASSETS_DIR);
    if !assets_dir.is_dir() {
        tracing::debug!(dir = %assets_dir.display(), "Project has no Assets directory");
        return None;
    }

    let hit = WalkDir::new(&assets_dir)
        .max_depth(constants::MAX_ASSET_SEARCH_DEPTH)
        .into_iter()
        .take(constants::MAX_ASSET_SEARCH_ENTRIES)
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable project entry");
                None
            }
        })
        .find(|e| e.file_type().is_file() && e.file_name() == wanted)
        .map(|e| e.into_path());

    tracing::debug!(asset = asset_name, found = hit.is_some(), "Asset search finished");
    hit
}

// =============================================================================
// File manager
// =============================================================================

/// Open the system file manager and highlight `path` within it.
///
/// Platform behaviour:
/// - **Windows**: `explorer.exe /select,"<path>"`
/// - **macOS**: `open -R "<path>"`
/// - **Linux**: `xdg-open "<parent>"` (no standard per-file selection API)
///
/// The subprocess is spawned detached; launch failures are returned so the
/// UI can put them in the status bar.
pub fn reveal_in_file_manager(path: &Path) -> io::Result<()> {
    let mut command = reveal_command(path);
    match command.spawn() {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to reveal file in file manager"
            );
            Err(e)
        }
    }
}

#[cfg(target_os = "windows")]
fn reveal_command(path: &Path) -> std::process::Command {
    // `/select,<path>` must be a single argument with no space after the comma.
    let mut cmd = std::process::Command::new("explorer");
    cmd.arg(format!("/select,{}", path.display()));
    cmd
}

#[cfg(target_os = "macos")]
fn reveal_command(path: &Path) -> std::process::Command {
    let mut cmd = std::process::Command::new("open");
    cmd.arg("-R").arg(path);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn reveal_command(path: &Path) -> std::process::Command {
    let parent = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };
    let mut cmd = std::process::Command::new("xdg-open");
    cmd.arg(parent);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scratch_copy_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Editor.log");
        fs::write(&source, "hello\n").unwrap();

        let scratch_dir = dir.path().join("cache");
        let scratch_path = {
            let copy = ScratchCopy::create(&source, &scratch_dir).unwrap();
            assert_eq!(fs::read_to_string(copy.path()).unwrap(), "hello\n");
            copy.path().to_path_buf()
        };
        assert!(!scratch_path.exists());
        assert!(source.exists());
    }

    #[test]
    fn test_scratch_copies_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Editor.log");
        fs::write(&source, "x").unwrap();
        let a = ScratchCopy::create(&source, dir.path()).unwrap();
        let b = ScratchCopy::create(&source, dir.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_scratch_copy_missing_source_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScratchCopy::create(&dir.path().join("missing.log"), dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_lossy_lines_strips_crlf_and_replaces_invalid_utf8() {
        let data: &[u8] = b"first\r\nsec\xffond\nlast";
        let lines: Vec<String> = lossy_lines(data).map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["first", "sec\u{fffd}ond", "last"]);
    }

    #[test]
    fn test_resolve_asset_direct_path() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("Assets").join("UI");
        fs::create_dir_all(&asset).unwrap();
        fs::write(asset.join("Logo.png"), "png").unwrap();

        let found = resolve_asset_path(dir.path(), "Assets/UI/Logo.png").unwrap();
        assert_eq!(found, dir.path().join("Assets/UI/Logo.png"));
    }

    #[test]
    fn test_resolve_asset_by_file_name_search() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Assets").join("Art").join("Moved");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Hero.fbx"), "fbx").unwrap();

        let found = resolve_asset_path(dir.path(), "Assets/Models/Hero.fbx").unwrap();
        assert_eq!(found, nested.join("Hero.fbx"));
    }

    #[test]
    fn test_resolve_asset_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Assets")).unwrap();
        assert!(resolve_asset_path(dir.path(), "Assets/Nope.png").is_none());
        assert!(resolve_asset_path(dir.path(), "").is_none());
    }
}
