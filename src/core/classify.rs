// BuildSleuth - core/classify.rs
//
// Internal-asset classification. Kept out of the parser's scan loop so the
// parser stays format-only and callers choose whether to apply it.

use crate::core::model::SizeRecord;
use crate::util::constants;

/// True for assets that belong to the engine's built-in resources or to a
/// package rather than to the project's own content.
///
/// A name is internal when it starts with `"Built-in "`, or mentions
/// `unity_builtin_extra`, or mentions `Packages`.
pub fn is_internal_asset(name: &str) -> bool {
    name.starts_with(constants::BUILTIN_PREFIX)
        || name.contains(constants::BUILTIN_EXTRA_MARKER)
        || name.contains(constants::PACKAGES_MARKER)
}

/// Parser filter that keeps only project assets.
pub fn project_assets_only(record: &SizeRecord) -> bool {
    !is_internal_asset(record.name())
}
