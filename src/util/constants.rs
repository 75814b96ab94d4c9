// BuildSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "BuildSleuth";

/// Application identifier used for config/cache directories.
pub const APP_ID: &str = "BuildSleuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default logging level when neither RUST_LOG, --debug nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Name of the configuration file, stored one level above the config dir.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Editor log format
// =============================================================================

/// Line that opens the asset-size block of a Unity build report.
pub const SECTION_MARKER: &str =
    "Used Assets and files from the Resources folder, sorted by uncompressed size:";

/// Length of the dashed rule that closes the asset-size block.
pub const CLOSING_RULE_LEN: usize = 79;

/// Record line pattern: size token, percentage token, asset name.
///
/// Group 1 is the size (`12.3 mb`), group 2 the percentage (`4.5%`), group 3
/// the name with trailing whitespace excluded.
pub const RECORD_PATTERN: &str =
    r"(?i)\s*(\d+(?:\.\d+)?\s*(?:kb|mb))\s+(\d+(?:\.\d+)?%)\s+(\S.*?)\s*$";

/// File name Unity writes the current editor session log to.
pub const EDITOR_LOG_FILE_NAME: &str = "Editor.log";

/// Glob matching the current and previous editor session logs.
pub const EDITOR_LOG_GLOB: &str = "Editor*.log";

/// File stem of the scratch copies taken before parsing.
pub const SCRATCH_LOG_STEM: &str = "Editor_temp";

// =============================================================================
// Internal asset classification
// =============================================================================

/// Name prefix of assets compiled into the editor itself.
pub const BUILTIN_PREFIX: &str = "Built-in ";

/// Name fragment of the built-in extra resources bundle.
pub const BUILTIN_EXTRA_MARKER: &str = "unity_builtin_extra";

/// Name fragment of assets shipped by packages rather than the project.
pub const PACKAGES_MARKER: &str = "Packages";

// =============================================================================
// Asset lookup limits
// =============================================================================

/// Project subdirectory searched when an asset name does not resolve directly.
pub const PROJECT_ASSETS_DIR: &str = "Assets";

/// Maximum directory recursion depth when searching a project for an asset.
pub const MAX_ASSET_SEARCH_DEPTH: usize = 32;

/// Maximum directory entries inspected per asset search.
pub const MAX_ASSET_SEARCH_ENTRIES: usize = 200_000;

// =============================================================================
// UI
// =============================================================================

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Minimum configurable font size.
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Maximum configurable font size.
pub const MAX_FONT_SIZE: f32 = 32.0;

/// Bytes per kilobyte as used by the Unity build report.
pub const BYTES_PER_KB: f64 = 1024.0;

/// Bytes per megabyte as used by the Unity build report.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
