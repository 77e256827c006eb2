//! Answers collected from the user before scaffolding

use crate::error::ScaffoldError;
use crate::scaffold::catalog::Catalog;
use serde::Deserialize;
use std::path::Path;

/// Everything the scaffolder needs to know about the new project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAnswers {
    pub project_name: String,
    /// Create the clean architecture layout under `lib/`
    pub clean_architecture: bool,
    /// Catalog values to add, in selection order
    pub dependencies: Vec<String>,
}

impl UserAnswers {
    /// Build validated answers
    ///
    /// `dependencies` may name packages by label or value; they are resolved
    /// against `catalog`.
    pub fn new<S: AsRef<str>>(
        project_name: &str,
        clean_architecture: bool,
        dependencies: &[S],
        catalog: &Catalog,
    ) -> Result<Self, ScaffoldError> {
        let project_name = project_name.trim();
        validate_project_name(project_name)?;
        Ok(Self {
            project_name: project_name.to_string(),
            clean_architecture,
            dependencies: catalog.resolve(dependencies)?,
        })
    }
}

/// Pre-filled answers loaded from a YAML file
///
/// ```yaml
/// project_name: demo_app
/// clean_architecture: true
/// dependencies: [http, equatable]
/// ```
///
/// Missing fields fall back to prompting (or to defaults with `--yes`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswersFile {
    pub project_name: Option<String>,
    pub clean_architecture: Option<bool>,
    pub dependencies: Option<Vec<String>>,
}

impl AnswersFile {
    pub fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    pub fn load(path: &Path) -> Result<Self, ScaffoldError> {
        let wrap = |source: Box<dyn std::error::Error + Send + Sync>| ScaffoldError::AnswersFile {
            path: path.to_path_buf(),
            source,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        Self::parse(&contents).map_err(|e| wrap(e.into()))
    }
}

/// Check that `name` can be passed to `flutter create` as a single directory
pub fn validate_project_name(name: &str) -> Result<(), ScaffoldError> {
    let reason = if name.is_empty() {
        Some("name must not be empty")
    } else if name == "." || name == ".." {
        Some("name must not be a relative directory reference")
    } else if name.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else if name.chars().any(char::is_whitespace) {
        Some("name must not contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ScaffoldError::InvalidProjectName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
