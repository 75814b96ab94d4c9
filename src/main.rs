// BuildSleuth - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation (debug mode support)
// 3. Headless `--print` mode for scripts and CI
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use buildsleuth::app;

pub use buildsleuth::core;
pub use buildsleuth::platform;
pub use buildsleuth::ui;
pub use buildsleuth::util;

use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PrintFormat {
    /// Aligned plain-text table.
    Table,
    Csv,
    Json,
}

/// BuildSleuth - Unity build size report viewer.
///
/// Reads the "Used Assets and files from the Resources folder" section that
/// the Unity Editor writes to Editor.log after a player build, and shows
/// which assets take up space.
#[derive(Parser, Debug)]
#[command(name = "BuildSleuth", version, about)]
struct Cli {
    /// Editor log to read (defaults to the platform's Editor.log).
    log: Option<PathBuf>,

    /// Unity project root, used to locate assets on disk.
    #[arg(short = 'p', long = "project")]
    project: Option<PathBuf>,

    /// Include built-in resources and package assets.
    #[arg(short = 'i', long = "include-internal")]
    include_internal: bool,

    /// Print the report to stdout instead of opening the GUI.
    #[arg(long = "print", value_enum)]
    print: Option<PrintFormat>,

    /// Write `--print` output to this file instead of stdout.
    #[arg(short = 'o', long = "output", requires = "print")]
    output: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before tracing is up so its [logging] level can apply;
    // its warnings are re-emitted below once logging is initialised.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "BuildSleuth starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let include_internal = cli.include_internal || config.show_internal;
    let project_root = cli.project.clone().or_else(|| config.project_root.clone());

    if let Some(format) = cli.print {
        let request = app::report::resolve_log_path(cli.log.as_deref(), config.log_path.as_deref())
            .map(|log_path| app::report::LoadRequest {
                log_path,
                scratch_dir: platform_paths.cache_dir.clone(),
                project_assets_only: !include_internal,
            });
        let result = request
            .map_err(util::error::BuildSleuthError::from)
            .and_then(|request| run_headless(&request, format, cli.output.as_deref()));
        match result {
            Ok(count) => {
                tracing::info!(records = count, "Report printed");
            }
            Err(e) => {
                tracing::error!(error = %e, "Headless run failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // ---- GUI ----
    let view = core::view::ViewState::new(include_internal, config.default_sort);
    let mut state = app::state::AppState::new(platform_paths.cache_dir.clone(), view, cli.debug);
    state.project_root = project_root;
    state.export_dir = Some(platform_paths.data_dir.clone());
    state.dark_mode = config.dark_mode;
    state.font_size = config.font_size;
    state.warnings = config_warnings;

    match app::report::resolve_log_path(cli.log.as_deref(), config.log_path.as_deref()) {
        Ok(path) => {
            state.available_logs = path
                .parent()
                .map(platform::editor_log::candidate_logs)
                .unwrap_or_default();
            state.log_path = Some(path);
            state.pending_load = true;
        }
        Err(e) => {
            tracing::warn!(error = %e, "No editor log resolved at startup");
            state.status_message = format!("{e}. Use File \u{2192} Open Log\u{2026}");
        }
    }

    tracing::info!("Ready to launch GUI");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::BuildSleuthApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch BuildSleuth GUI: {e}");
        std::process::exit(1);
    }
}

/// Load the report and write it in `format` to `output` (stdout if None).
fn run_headless(
    request: &app::report::LoadRequest,
    format: PrintFormat,
    output: Option<&Path>,
) -> util::error::Result<usize> {
    let never_cancel = AtomicBool::new(false);
    let report = match app::report::load_report(request, &never_cancel)? {
        app::report::LoadOutcome::Loaded(report) => report,
        app::report::LoadOutcome::Cancelled => return Ok(0),
    };
    if !report.stats.section_found {
        tracing::warn!(
            path = %report.source.display(),
            "No build size report found; build a player in Unity first"
        );
    }

    let (writer, dest): (Box<dyn Write>, &Path) = match output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| util::error::BuildSleuthError::Io {
                path: path.to_path_buf(),
                operation: "create",
                source: e,
            })?;
            (Box::new(std::io::BufWriter::new(file)), path)
        }
        None => (Box::new(std::io::stdout().lock()), Path::new("<stdout>")),
    };

    let records = report.records.iter();
    let count = match format {
        PrintFormat::Table => core::export::write_table(records, writer, dest)?,
        PrintFormat::Csv => core::export::export_csv(records, writer, dest)?,
        PrintFormat::Json => core::export::export_json(records, writer, dest)?,
    };
    Ok(count)
}
