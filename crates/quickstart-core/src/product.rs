//! Product configuration trait for CLI binaries
//!
//! Each binary describes the toolchain it wraps, the layout it generates and
//! the packages it offers; the session logic is shared.

use crate::runtime::tool::ToolConfig;
use crate::scaffold::catalog::Catalog;
use std::path::Path;

/// Configuration trait for a scaffolding product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// The toolchain that creates projects and adds packages
    fn toolchain(&self) -> ToolConfig;

    /// Directory inside a new project that receives the layout
    fn source_dir(&self) -> &'static str;

    /// Relative directories created when the user opts into the architecture
    fn layout(&self) -> &'static [&'static str];

    /// Packages offered in the dependency prompt
    fn catalog(&self) -> Catalog;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
