//! Quickstart Core - Shared library for scaffolding Flutter projects
//!
//! The library checks for a toolchain (installing it through the OS package
//! manager when missing), creates a project with it, lays out a clean
//! architecture directory tree and adds a chosen set of packages.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Toolchain provisioning, layout
//!   materialization, project creation and package addition
//! - **Layer 2: Session Orchestration** - `ProductConfig` trait and `Session`,
//!   generic over the [`CommandRunner`] and [`Prompter`] seams
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use quickstart_core::{Session, SystemRunner};
//!
//! let runner = SystemRunner::new();
//! let summary = Session::new(&MyConfig, &runner, &my_prompter, std::env::current_dir()?)
//!     .run()
//!     .await?;
//! println!("created {}", summary.root.display());
//! ```

pub mod error;
pub mod product;
pub mod prompt;
pub mod runtime;
pub mod scaffold;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use product::ProductConfig;
pub use prompt::Prompter;
pub use runtime::{CommandOutput, CommandRunner, CommandSpec, SystemRunner, ToolConfig};
pub use scaffold::{Catalog, CatalogEntry, UserAnswers, CLEAN_ARCHITECTURE, FLUTTER_PACKAGES};
pub use session::{DeclinePolicy, ProjectSummary, Session};

#[cfg(feature = "tui")]
pub use tui::{check, run};
