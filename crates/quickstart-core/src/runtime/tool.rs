//! Toolchain detection and provisioning
//!
//! Checks whether a CLI toolchain (e.g. `flutter`) is on `PATH`, installs it
//! through an OS package manager when it is not, and extends the user's shell
//! profile if the fresh install is still not resolvable.

use crate::error::ScaffoldError;
use crate::runtime::exec::{run_checked, CommandRunner, CommandSpec};
use crate::runtime::profile::ShellProfile;
use std::path::{Path, PathBuf};

/// Package manager used to install a toolchain
#[derive(Debug, Clone)]
pub struct PackageManagerConfig {
    /// Binary name (e.g., "brew")
    pub program: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Arguments that install the toolchain
    pub install_args: &'static [&'static str],
}

/// Configuration for a CLI toolchain
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "flutter")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Manual installation instructions
    pub docs_url: &'static str,
    pub package_manager: PackageManagerConfig,
    /// Where the package manager is expected to leave the binaries
    pub bin_dir: &'static str,
    /// Profile file under the home directory that receives the PATH export
    pub shell_profile: &'static str,
}

/// How the toolchain ended up reachable after provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStatus {
    /// Already resolvable through `PATH`
    OnPath(PathBuf),
    /// Not on `PATH`; the profile was extended (or already had the export)
    ProfileUpdated {
        profile: PathBuf,
        appended: bool,
        reloaded: bool,
    },
}

/// Manager for checking and installing a CLI toolchain
#[derive(Debug)]
pub struct ToolManager<'a, R> {
    config: &'a ToolConfig,
    runner: &'a R,
}

impl<'a, R: CommandRunner> ToolManager<'a, R> {
    pub fn new(config: &'a ToolConfig, runner: &'a R) -> Self {
        Self { config, runner }
    }

    /// Locate the toolchain on `PATH`
    pub fn detect(&self) -> Option<PathBuf> {
        self.runner.which(self.config.name)
    }

    pub fn is_installed(&self) -> bool {
        self.detect().is_some()
    }

    /// The package manager invocation that installs the toolchain
    pub fn install_command(&self) -> CommandSpec {
        let pm = &self.config.package_manager;
        CommandSpec::new(pm.program).args(pm.install_args.iter().copied())
    }

    /// Install the toolchain through the package manager
    ///
    /// Fails with [`ScaffoldError::PackageManagerMissing`] when the package
    /// manager itself is not on `PATH`; nothing is run in that case.
    pub async fn provision(&self) -> Result<(), ScaffoldError> {
        let pm = &self.config.package_manager;
        if self.runner.which(pm.program).is_none() {
            return Err(ScaffoldError::PackageManagerMissing {
                package_manager: pm.display_name.to_string(),
                toolchain: self.config.display_name.to_string(),
                docs_url: self.config.docs_url.to_string(),
            });
        }

        let command = self.install_command();
        tracing::info!(command = %command, "installing toolchain");
        run_checked(self.runner, &command).await?;
        Ok(())
    }

    /// Make sure future shells can resolve the toolchain
    ///
    /// Reloading the profile runs in a child shell, so it can never change the
    /// `PATH` of this process. Callers that keep going in the same run should
    /// use [`ToolManager::program`] to get an invocable path.
    pub async fn ensure_path_configured(
        &self,
        profile: &ShellProfile,
    ) -> Result<PathStatus, ScaffoldError> {
        if let Some(path) = self.detect() {
            return Ok(PathStatus::OnPath(path));
        }

        let appended = profile.append_path(Path::new(self.config.bin_dir))?;

        let reload = CommandSpec::new("zsh")
            .arg("-c")
            .arg(format!("source {}", profile.path().display()));
        let reloaded = match self.runner.run(&reload).await {
            Ok(output) if output.is_success() => true,
            Ok(output) => {
                tracing::warn!(code = ?output.code, "profile reload exited unsuccessfully");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile reload could not be started");
                false
            }
        };

        Ok(PathStatus::ProfileUpdated {
            profile: profile.path().to_path_buf(),
            appended,
            reloaded,
        })
    }

    /// Path to invoke the toolchain with for the rest of this process
    ///
    /// The bare binary name when it resolves through `PATH`, otherwise the
    /// binary inside the configured install directory.
    pub fn program(&self) -> PathBuf {
        if self.is_installed() {
            PathBuf::from(self.config.name)
        } else {
            Path::new(self.config.bin_dir).join(self.config.name)
        }
    }
}
