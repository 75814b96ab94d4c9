// BuildSleuth - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::view::SortColumn;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for BuildSleuth configuration and scratch files.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/buildsleuth/ or %APPDATA%\BuildSleuth\)
    pub config_dir: PathBuf,

    /// Cache directory; scratch copies of Editor.log live here while parsing.
    pub cache_dir: PathBuf,

    /// Data directory for exports offered as the default save location.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the system temp directory for scratch files and the
    /// current directory for everything else if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let cache_dir = proj_dirs.cache_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                cache = %cache_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                cache_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using fallbacks");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                cache_dir: std::env::temp_dir().join(constants::APP_ID),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[editor]` section.
    pub editor: EditorSection,
    /// `[project]` section.
    pub project: ProjectSection,
    /// `[report]` section.
    pub report: ReportSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[editor]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct EditorSection {
    /// Explicit Editor.log location, overriding the per-OS default.
    pub log_path: Option<String>,
}

/// `[project]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Unity project root used to locate assets on disk.
    pub root: Option<String>,
}

/// `[report]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Show built-in and package assets on startup.
    pub show_internal: Option<bool>,
    /// Initial sort column: "source", "name", "size" or "percentage".
    pub default_sort: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}


/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Editor / project --
    /// Editor.log override.
    pub log_path: Option<PathBuf>,
    /// Unity project root.
    pub project_root: Option<PathBuf>,

    // -- Report --
    /// Include internal assets in the table on startup.
    pub show_internal: bool,
    /// Initial sort column.
    pub default_sort: SortColumn,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            project_root: None,
            show_internal: false,
            default_sort: SortColumn::Source,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` for the given config directory.
///
/// The file lives one level above `config_dir` so the user-visible path is
/// `%APPDATA%\BuildSleuth\config.toml` rather than the deeper `config\` path.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir
        .parent()
        .unwrap_or(config_dir)
        .join(constants::CONFIG_FILE_NAME);
    load_config_file(&config_path)
}

/// Load and validate a specific config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning so the
/// application still starts but the user is informed.
pub fn load_config_file(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Could not read config file");
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Failed to parse config file");
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Check each field, accumulating every problem rather than stopping at the first.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Editor: log_path --
    if let Some(path) = raw.editor.log_path.filter(|p| !p.trim().is_empty()) {
        config.log_path = Some(PathBuf::from(path));
    }

    // -- Project: root --
    if let Some(root) = raw.project.root.filter(|p| !p.trim().is_empty()) {
        let root = PathBuf::from(root);
        if !root.is_dir() {
            warnings.push(format!(
                "[project] root = \"{}\" is not a directory. Asset locate will be unavailable.",
                root.display()
            ));
        }
        config.project_root = Some(root);
    }

    // -- Report --
    if let Some(show) = raw.report.show_internal {
        config.show_internal = show;
    }
    if let Some(sort) = raw.report.default_sort {
        match SortColumn::from_config(&sort) {
            Some(column) => config.default_sort = column,
            None => warnings.push(format!(
                "[report] default_sort = \"{sort}\" is not recognised. \
                 Valid values: source, name, size, percentage. Using default (source).",
            )),
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "ui.font_size".to_string(),
                value: size.to_string(),
                expected: format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_FONT_SIZE
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    config
}
