//! Toolchain detection and external command execution
//!
//! This module provides:
//! - A [`CommandRunner`] seam for every shell invocation
//! - Toolchain provisioning through an OS package manager
//! - Shell profile editing for PATH extension

pub mod exec;
pub mod profile;
pub mod tool;

pub use exec::{run_checked, CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use profile::ShellProfile;
pub use tool::{PackageManagerConfig, PathStatus, ToolConfig, ToolManager};
