//! Optional packages offered during scaffolding

use crate::error::ScaffoldError;

/// One selectable package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Shown in the prompt
    pub label: &'static str,
    /// Passed to the package-add command
    pub value: &'static str,
    /// Pre-checked in the prompt
    pub default_selected: bool,
}

impl CatalogEntry {
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            value: label,
            default_selected: true,
        }
    }

    /// Entry whose add-command value differs from its label
    pub const fn with_value(label: &'static str, value: &'static str) -> Self {
        Self {
            label,
            value,
            default_selected: true,
        }
    }
}

/// Packages offered for a new Flutter project
///
/// `build_runner` is only needed at build time, so it is added as a dev
/// dependency using the `dev:` prefix understood by `flutter pub add`.
pub const FLUTTER_PACKAGES: &[CatalogEntry] = &[
    CatalogEntry::new("http"),
    CatalogEntry::new("riverpod"),
    CatalogEntry::new("equatable"),
    CatalogEntry::new("get_it"),
    CatalogEntry::new("injectable"),
    CatalogEntry::new("json_annotation"),
    CatalogEntry::new("retrofit"),
    CatalogEntry::with_value("build_runner", "dev:build_runner"),
];

/// A fixed set of packages and their defaults
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [CatalogEntry],
}

impl Catalog {
    pub const fn new(entries: &'static [CatalogEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    /// Values of every default-selected entry, in catalog order
    pub fn defaults(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.default_selected)
            .map(|e| e.value.to_string())
            .collect()
    }

    /// Look an entry up by label or value
    pub fn find(&self, name: &str) -> Option<&'static CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.label == name || e.value == name)
    }

    /// Turn user-supplied names into catalog values
    ///
    /// Accepts labels or values and keeps the order given. Surrounding
    /// whitespace is ignored, blank names and duplicates are dropped, and
    /// anything outside the catalog is rejected. `--dependencies ""` therefore
    /// selects nothing.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<String>, ScaffoldError> {
        let mut values: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let entry = self
                .find(name)
                .ok_or_else(|| ScaffoldError::UnknownDependency(name.to_string()))?;
            if !values.iter().any(|v| v == entry.value) {
                values.push(entry.value.to_string());
            }
        }
        Ok(values)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(FLUTTER_PACKAGES)
    }
}
