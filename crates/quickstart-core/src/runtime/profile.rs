//! Shell profile editing for PATH extension

use crate::error::ScaffoldError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A shell rc file (e.g. `~/.zshrc`) that can be extended with PATH entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellProfile {
    path: PathBuf,
}

impl ShellProfile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve a profile file relative to the user's home directory
    pub fn in_home(file_name: &str) -> Result<Self, ScaffoldError> {
        Ok(Self::new(home_dir()?.join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The line appended to the profile for `bin_dir`
    pub fn export_line(bin_dir: &Path) -> String {
        format!("export PATH=\"$PATH:{}\"", bin_dir.display())
    }

    /// Append a PATH export for `bin_dir`
    ///
    /// Returns `false` without touching the file when the identical line is
    /// already present. A missing profile file is created.
    pub fn append_path(&self, bin_dir: &Path) -> Result<bool, ScaffoldError> {
        let line = Self::export_line(bin_dir);
        let profile_error = |source| ScaffoldError::Profile {
            path: self.path.clone(),
            source,
        };

        let existing = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(profile_error(e)),
        };

        if existing.lines().any(|l| l.trim() == line) {
            tracing::debug!(profile = %self.path.display(), "PATH export already present");
            return Ok(false);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(profile_error)?;

        // Keep the export on its own line even if the file lacks a trailing newline
        let prefix = if existing.is_empty() || existing.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        writeln!(file, "{}{}", prefix, line).map_err(profile_error)?;

        tracing::debug!(profile = %self.path.display(), %line, "appended PATH export");
        Ok(true)
    }
}

/// Get the user's home directory
///
/// `HOME` wins over the platform lookup so that overrides (containers, tests)
/// are respected.
pub fn home_dir() -> Result<PathBuf, ScaffoldError> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    dirs::home_dir().ok_or(ScaffoldError::HomeDirMissing)
}
