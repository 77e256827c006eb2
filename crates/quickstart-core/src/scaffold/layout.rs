//! Directory layouts materialized into a new project

use crate::error::ScaffoldError;
use std::fs;
use std::path::{Path, PathBuf};

/// Clean architecture layout, relative to the project's `lib/` directory
///
/// `feature_name` is a literal placeholder for the user to rename.
pub const CLEAN_ARCHITECTURE: &[&str] = &[
    "core",
    "features/feature_name/data/datasources",
    "features/feature_name/data/models",
    "features/feature_name/data/repositories",
    "features/feature_name/domain/entities",
    "features/feature_name/domain/repositories",
    "features/feature_name/domain/usecases",
    "features/feature_name/presentation/bloc_or_providers_or_controllers",
    "features/feature_name/presentation/pages",
    "features/feature_name/presentation/widgets",
];

/// Create every directory in `layout` under `base`
///
/// Intermediate directories are created as needed and existing ones are left
/// alone, so running this twice is harmless. Returns the created leaf paths in
/// layout order.
pub fn materialize(base: &Path, layout: &[&str]) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut created = Vec::with_capacity(layout.len());
    for entry in layout {
        let path = base.join(entry.trim_end_matches('/'));
        fs::create_dir_all(&path).map_err(|source| ScaffoldError::CreateDir {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "created directory");
        created.push(path);
    }
    Ok(created)
}
