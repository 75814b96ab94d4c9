// BuildSleuth - tests/e2e_report.rs
//
// End-to-end tests for the load pipeline.
//
// These tests exercise the real filesystem: a build log on disk is copied to
// a scratch directory, streamed through the parser, filtered, sorted, and
// exported. No mocks.

use buildsleuth::app::report::{load_report, LoadOutcome, LoadRequest};
use buildsleuth::core::classify;
use buildsleuth::core::export;
use buildsleuth::core::model::{BuildReport, SizeRecord};
use buildsleuth::core::parser;
use buildsleuth::core::view::{self, SortColumn, ViewState};
use buildsleuth::platform::editor_log;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(log_path: PathBuf, scratch: &Path, project_assets_only: bool) -> BuildReport {
    let request = LoadRequest {
        log_path,
        scratch_dir: scratch.to_path_buf(),
        project_assets_only,
    };
    match load_report(&request, &AtomicBool::new(false)).expect("load should succeed") {
        LoadOutcome::Loaded(report) => report,
        LoadOutcome::Cancelled => panic!("load was not cancelled"),
    }
}

fn names(records: &[SizeRecord]) -> Vec<&str> {
    records.iter().map(SizeRecord::name).collect()
}

// =============================================================================
// Load pipeline
// =============================================================================

/// The full fixture yields every record between the marker and the rule,
/// in log order, and nothing from the category table or after the rule.
#[test]
fn e2e_fixture_loads_all_records_in_log_order() {
    let scratch = tempfile::tempdir().unwrap();
    let report = load(fixture("editor_build.log"), scratch.path(), false);

    assert!(report.stats.section_found);
    assert!(report.stats.section_closed);
    assert_eq!(
        names(&report.records),
        vec![
            "Assets/Textures/Environment/Terrain_Albedo.png",
            "Assets/Audio/Music/MainTheme.ogg",
            "Resources/unity_builtin_extra",
            "Packages/com.unity.render-pipelines.universal/Shaders/Lit.shader",
            "Assets/Models/Hero/Hero.fbx",
            "Built-in Shader: Standard",
            "Assets/Scripts/Generated/Lookup Table.asset",
            "Assets/Materials/Hero.mat",
        ]
    );

    let first = &report.records[0];
    assert_eq!(first.size(), "12.3 mb");
    assert_eq!(first.percentage(), "18.4%");
    assert_eq!(report.internal_count(), 3);
}

/// Filtering at parse time drops exactly the internal assets.
#[test]
fn e2e_project_only_load_drops_internal_assets() {
    let scratch = tempfile::tempdir().unwrap();
    let report = load(fixture("editor_build.log"), scratch.path(), true);

    assert_eq!(report.records.len(), 5);
    assert_eq!(report.stats.filtered_out, 3);
    assert!(report.records.iter().all(|r| !r.is_internal()));
}

/// Filtering at parse time and filtering the retained superset agree.
#[test]
fn e2e_parse_time_filter_matches_view_filter() {
    let scratch = tempfile::tempdir().unwrap();
    let full = load(fixture("editor_build.log"), scratch.path(), false);
    let filtered = load(fixture("editor_build.log"), scratch.path(), true);

    let visible: Vec<SizeRecord> = view::visible_indices(&full.records, &ViewState::default())
        .into_iter()
        .map(|i| full.records[i].clone())
        .collect();
    assert_eq!(visible, filtered.records);
}

/// Loading the same file twice gives the same records.
#[test]
fn e2e_reload_is_idempotent() {
    let scratch = tempfile::tempdir().unwrap();
    let a = load(fixture("editor_build.log"), scratch.path(), false);
    let b = load(fixture("editor_build.log"), scratch.path(), false);
    assert_eq!(a.records, b.records);
}

/// The scratch copy is gone once the load returns; the source is untouched.
#[test]
fn e2e_scratch_copy_is_cleaned_up() {
    let scratch = tempfile::tempdir().unwrap();
    let source = fixture("editor_build.log");
    let before = std::fs::read(&source).unwrap();
    load(source.clone(), scratch.path(), false);

    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    assert_eq!(std::fs::read(&source).unwrap(), before);
}

/// A log with no build report yields an empty report, not an error.
#[test]
fn e2e_log_without_section_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("Editor.log");
    std::fs::write(&log, "Initialize engine version: 2022.3.20f1\nExiting batchmode\n").unwrap();

    let report = load(log, &dir.path().join("scratch"), false);
    assert!(report.records.is_empty());
    assert!(!report.stats.section_found);
    assert_eq!(report.stats.lines_read, 2);
}

/// CRLF line endings and invalid UTF-8 bytes elsewhere in the log do not
/// disturb the records.
#[test]
fn e2e_crlf_and_invalid_utf8_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("Editor.log");
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(b"Player log \xff\xfe garbage\r\n");
    bytes.extend_from_slice(buildsleuth::util::constants::SECTION_MARKER.as_bytes());
    bytes.extend_from_slice(b"\r\n 1.5 mb\t 50.0% Assets/A.png\r\n");
    bytes.extend_from_slice(b" 2.0 kb\t 0.1% Assets/B \xff.png\r\n");
    bytes.extend_from_slice("-".repeat(79).as_bytes());
    bytes.extend_from_slice(b"\r\n");
    std::fs::write(&log, bytes).unwrap();

    let report = load(log, &dir.path().join("scratch"), false);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].name(), "Assets/A.png");
    assert_eq!(report.records[0].percentage(), "50.0%");
    assert!(report.records[1].name().starts_with("Assets/B "));
    assert!(report.stats.section_closed);
}

// =============================================================================
// View + export
// =============================================================================

/// Sorting by size with internal assets shown puts the largest first.
#[test]
fn e2e_size_sort_over_full_report() {
    let scratch = tempfile::tempdir().unwrap();
    let report = load(fixture("editor_build.log"), scratch.path(), false);

    let view = ViewState::new(true, SortColumn::Size);
    let order = view::visible_indices(&report.records, &view);
    let sizes: Vec<&str> = order.iter().map(|&i| report.records[i].size()).collect();
    assert_eq!(sizes.first(), Some(&"12.3 mb"));
    assert_eq!(sizes.last(), Some(&"12.5 kb"));
    assert_eq!(order.len(), report.records.len());
}

/// CSV export of the project-only view has one header plus one row per asset.
#[test]
fn e2e_csv_export_of_project_assets() {
    let scratch = tempfile::tempdir().unwrap();
    let report = load(fixture("editor_build.log"), scratch.path(), true);
    let out_path = scratch.path().join("sizes.csv");

    let mut buf = Vec::new();
    let n = export::export_csv(&report.records, &mut buf, &out_path).unwrap();
    assert_eq!(n, 5);

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("name,size,percentage"));
    assert!(text.contains("Assets/Models/Hero/Hero.fbx,2.7 mb,4.0%"));
    assert!(!text.contains("Built-in"));
}

/// JSON export round-trips the three text fields.
#[test]
fn e2e_json_export_fields() {
    let scratch = tempfile::tempdir().unwrap();
    let report = load(fixture("editor_build.log"), scratch.path(), false);

    let mut buf = Vec::new();
    export::export_json(&report.records, &mut buf, Path::new("sizes.json")).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 8);
    assert_eq!(items[1]["name"], "Assets/Audio/Music/MainTheme.ogg");
    assert_eq!(items[1]["size"], "8.0 mb");
    assert_eq!(items[1]["percentage"], "12.0%");
}

// =============================================================================
// Parser on raw text
// =============================================================================

/// Parsing the fixture text directly matches the file pipeline.
#[test]
fn e2e_parser_on_fixture_text_matches_pipeline() {
    let scratch = tempfile::tempdir().unwrap();
    let text = std::fs::read_to_string(fixture("editor_build.log")).unwrap();
    let direct = parser::parse(text.lines(), Some(&classify::project_assets_only));
    let piped = load(fixture("editor_build.log"), scratch.path(), true);
    assert_eq!(direct, piped.records);
}

// =============================================================================
// Log discovery
// =============================================================================

/// Editor.log is listed before rotated logs; unrelated files are skipped.
#[test]
fn e2e_candidate_logs_lists_editor_logs() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["Editor-prev.log", "Editor.log", "Player.log", "Editor.txt"] {
        std::fs::write(dir.path().join(name), "").unwrap();
    }
    let found = editor_log::candidate_logs(dir.path());
    let names: Vec<String> = found
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Editor.log", "Editor-prev.log"]);
}
