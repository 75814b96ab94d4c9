// BuildSleuth - app/report.rs
//
// Load lifecycle: locate Editor.log, copy it to scratch, stream its lines
// through the parser, and hand back a BuildReport.
//
// Architecture:
//   - `load_report` is the synchronous pipeline, used directly by the
//     headless CLI and by the background thread.
//   - `LoadManager` lives on the UI thread and runs `load_report` on a
//     background thread, reporting via an mpsc channel.
//   - An `Arc<AtomicBool>` cancel flag is checked before each line is pulled,
//     so cancelling simply stops feeding the parser.

use crate::core::classify;
use crate::core::model::BuildReport;
use crate::core::parser::{self, RecordFilter};
use crate::platform::{editor_log, fs};
use crate::util::error::{BuildSleuthError, LocateError, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Instant;

// =============================================================================
// Request / outcome
// =============================================================================

/// Everything needed to run one load.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// The editor log to read.
    pub log_path: PathBuf,
    /// Where the scratch copy is written.
    pub scratch_dir: PathBuf,
    /// Drop internal assets while parsing instead of keeping the full set.
    pub project_assets_only: bool,
}

/// How a load ended when it did not fail.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(BuildReport),
    Cancelled,
}

/// Messages from the background load thread to the UI.
#[derive(Debug)]
pub enum LoadProgress {
    Started { path: PathBuf },
    Completed { report: BuildReport },
    Failed { error: String },
    Cancelled,
}

/// Pick the log to read: CLI argument, then config, then the per-OS default.
pub fn resolve_log_path(
    cli_path: Option<&Path>,
    config_path: Option<&Path>,
) -> std::result::Result<PathBuf, LocateError> {
    if let Some(path) = cli_path.or(config_path) {
        return Ok(path.to_path_buf());
    }
    editor_log::default_editor_log()
}

// =============================================================================
// Pipeline
// =============================================================================

/// Run the full pipeline synchronously.
///
/// The scratch copy is removed when this returns, whatever the outcome.
pub fn load_report(request: &LoadRequest, cancel: &AtomicBool) -> Result<LoadOutcome> {
    let started = Instant::now();
    let source = &request.log_path;

    if !source.is_file() {
        return Err(LocateError::LogNotFound {
            path: source.clone(),
        }
        .into());
    }

    let scratch =
        fs::ScratchCopy::create(source, &request.scratch_dir).map_err(|e| BuildSleuthError::Io {
            path: source.clone(),
            operation: "copy to scratch",
            source: e,
        })?;

    let lines = fs::read_lines_lossy(scratch.path()).map_err(|e| BuildSleuthError::Io {
        path: scratch.path().to_path_buf(),
        operation: "open",
        source: e,
    })?;

    let mut read_error = None;
    let mut cancelled = false;
    let feed = lines.map_while(|line| {
        if cancel.load(Ordering::SeqCst) {
            cancelled = true;
            return None;
        }
        match line {
            Ok(line) => Some(line),
            Err(e) => {
                read_error = Some(e);
                None
            }
        }
    });

    let filter: Option<RecordFilter<'_>> = if request.project_assets_only {
        Some(&classify::project_assets_only)
    } else {
        None
    };
    let output = parser::parse_with_stats(feed, filter);

    if let Some(e) = read_error {
        return Err(BuildSleuthError::Io {
            path: scratch.path().to_path_buf(),
            operation: "read",
            source: e,
        });
    }
    if cancelled {
        tracing::info!(path = %source.display(), "Load cancelled");
        return Ok(LoadOutcome::Cancelled);
    }

    let report = BuildReport {
        source: source.clone(),
        records: output.records,
        stats: output.stats,
        parsed_at: Utc::now(),
        duration: started.elapsed(),
    };

    tracing::info!(
        path = %source.display(),
        records = report.records.len(),
        section_found = report.stats.section_found,
        elapsed_ms = report.duration.as_millis() as u64,
        "Build report loaded"
    );

    Ok(LoadOutcome::Loaded(report))
}

// =============================================================================
// LoadManager
// =============================================================================

/// Runs loads on a background thread.
pub struct LoadManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<LoadProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl LoadManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start loading; any load already running is cancelled first.
    pub fn start_load(&mut self, request: LoadRequest) {
        self.cancel_load();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        std::thread::spawn(move || run_load(request, tx, cancel));

        tracing::info!("Load started");
    }

    /// Request cancellation of the running load.
    ///
    /// The progress channel is dropped as well, so a report the thread had
    /// already finished is never delivered.
    pub fn cancel_load(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
        self.progress_rx = None;
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    pub fn poll_progress(&self) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

fn run_load(request: LoadRequest, tx: mpsc::Sender<LoadProgress>, cancel: Arc<AtomicBool>) {
    // Receiver dropped means the UI went away; nothing left to tell.
    let _ = tx.send(LoadProgress::Started {
        path: request.log_path.clone(),
    });

    let msg = match load_report(&request, &cancel) {
        Ok(LoadOutcome::Loaded(report)) => LoadProgress::Completed { report },
        Ok(LoadOutcome::Cancelled) => LoadProgress::Cancelled,
        Err(e) => {
            tracing::warn!(error = %e, "Load failed");
            LoadProgress::Failed {
                error: e.to_string(),
            }
        }
    };
    let _ = tx.send(msg);
}
