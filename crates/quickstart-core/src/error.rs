//! Typed failures raised by the provisioner and the scaffolder

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a scaffolding session
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The toolchain is absent and there is no package manager to install it with
    #[error(
        "{package_manager} is not installed. You need to install {toolchain} manually.\n\
         Visit {docs_url} to download and install {toolchain}."
    )]
    PackageManagerMissing {
        package_manager: String,
        toolchain: String,
        docs_url: String,
    },

    /// The user chose not to install the toolchain
    #[error("{toolchain} installation is required to proceed.")]
    ToolchainDeclined { toolchain: String },

    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    #[error("unknown dependency {0:?}")]
    UnknownDependency(String),

    #[error("project directory {} was not created", .0.display())]
    ProjectMissing(PathBuf),

    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to update shell profile {}", .path.display())]
    Profile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not determine home directory")]
    HomeDirMissing,

    #[error("failed to read answers file {}", .path.display())]
    AnswersFile {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
