//! The scaffolding session: toolchain check, then project creation
//!
//! `check` runs the provisioner alone; `run` runs the provisioner and, once
//! the toolchain is usable, the scaffolder. Each is a single linear pass.

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::prompt::Prompter;
use crate::runtime::exec::CommandRunner;
use crate::runtime::profile::ShellProfile;
use crate::runtime::tool::{PathStatus, ToolManager};
use crate::scaffold::answers::UserAnswers;
use crate::scaffold::project::Scaffolder;
use anyhow::Result;
use std::path::PathBuf;

/// What to do when the toolchain is missing and the user declines to install it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclinePolicy {
    /// Fail with [`ScaffoldError::ToolchainDeclined`]
    Abort,
    /// Warn and return normally
    Continue,
}

/// Result of a completed `run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub root: PathBuf,
    pub answers: UserAnswers,
    /// Layout directories created (empty when the user opted out)
    pub directories: Vec<PathBuf>,
    /// Whether the package-add command ran
    pub dependencies_added: bool,
}

/// One invocation of the CLI
pub struct Session<'a, C, R, P> {
    config: &'a C,
    runner: &'a R,
    prompter: &'a P,
    workdir: PathBuf,
    profile: Option<ShellProfile>,
}

impl<'a, C, R, P> Session<'a, C, R, P>
where
    C: ProductConfig,
    R: CommandRunner,
    P: Prompter,
{
    pub fn new(config: &'a C, runner: &'a R, prompter: &'a P, workdir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            runner,
            prompter,
            workdir: workdir.into(),
            profile: None,
        }
    }

    /// Use `profile` instead of the configured file in the home directory
    pub fn with_profile(mut self, profile: ShellProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    fn shell_profile(&self) -> Result<ShellProfile, ScaffoldError> {
        match &self.profile {
            Some(profile) => Ok(profile.clone()),
            None => ShellProfile::in_home(self.config.toolchain().shell_profile),
        }
    }

    fn declined(&self) -> ScaffoldError {
        ScaffoldError::ToolchainDeclined {
            toolchain: self.config.toolchain().display_name.to_string(),
        }
    }

    /// Make sure the toolchain is available, installing it if the user agrees
    ///
    /// Returns how to invoke the toolchain, or `None` when it is still missing
    /// because the user declined under [`DeclinePolicy::Continue`].
    pub async fn ensure_toolchain(&self, policy: DeclinePolicy) -> Result<Option<PathBuf>> {
        if let Some(program) = self.locate_or_install().await? {
            return Ok(Some(program));
        }

        match policy {
            DeclinePolicy::Abort => Err(self.declined().into()),
            DeclinePolicy::Continue => {
                self.prompter.warning(&format!(
                    "{} installation is required to proceed.",
                    self.config.toolchain().display_name
                ))?;
                Ok(None)
            }
        }
    }

    /// Detect the toolchain or install it; `None` means the user declined
    async fn locate_or_install(&self) -> Result<Option<PathBuf>> {
        let toolchain = self.config.toolchain();
        let tool = ToolManager::new(&toolchain, self.runner);

        if tool.is_installed() {
            self.prompter.success(&format!(
                "{} is already installed.",
                toolchain.display_name
            ))?;
            return Ok(Some(tool.program()));
        }

        self.prompter.warning(&format!(
            "{} is not installed on your system.",
            toolchain.display_name
        ))?;

        let install = self.prompter.confirm(
            &format!("Would you like to install {} now?", toolchain.display_name),
            true,
        )?;

        if !install {
            return Ok(None);
        }

        self.prompter.step(&format!(
            "Installing {}: {}",
            toolchain.display_name,
            tool.install_command()
        ))?;
        tool.provision().await?;

        let profile = self.shell_profile()?;
        match tool.ensure_path_configured(&profile).await? {
            PathStatus::OnPath(_) => {
                self.prompter.success(&format!(
                    "{} has been installed and is on your PATH.",
                    toolchain.display_name
                ))?;
            }
            PathStatus::ProfileUpdated {
                profile, appended, ..
            } => {
                let how = if appended { "added to" } else { "already in" };
                self.prompter.success(&format!(
                    "{} has been installed and {} your PATH via {}.",
                    toolchain.display_name,
                    how,
                    profile.display()
                ))?;
                self.prompter.info(&format!(
                    "Open a new terminal (or run `source {}`) so other shells pick up the change.",
                    profile.display()
                ))?;
            }
        }

        Ok(Some(tool.program()))
    }

    /// Toolchain check only
    pub async fn check(&self, policy: DeclinePolicy) -> Result<()> {
        self.ensure_toolchain(policy).await?;
        Ok(())
    }

    /// Full scaffolding pass
    pub async fn run(&self) -> Result<ProjectSummary> {
        let program = self
            .locate_or_install()
            .await?
            .ok_or_else(|| self.declined())?;

        let answers = self.prompter.collect_answers(&self.config.catalog())?;
        let scaffolder = Scaffolder::new(self.runner, program, &self.workdir);

        self.prompter.step(&format!(
            "Creating {} project: {}",
            self.config.display_name(),
            answers.project_name
        ))?;
        let root = scaffolder.create_project(&answers.project_name).await?;
        tracing::debug!(root = %root.display(), "project created");

        let mut directories = Vec::new();
        if answers.clean_architecture {
            self.prompter
                .step("Setting up Clean Architecture structure...")?;
            directories = scaffolder.apply_architecture(
                &root,
                self.config.source_dir(),
                self.config.layout(),
            )?;
            self.prompter.success(&format!(
                "Clean Architecture structure created ({} directories)",
                directories.len()
            ))?;
        }

        let dependencies_added = if answers.dependencies.is_empty() {
            false
        } else {
            self.prompter.step(&format!(
                "Adding selected dependencies: {}",
                answers.dependencies.join(" ")
            ))?;
            let added = scaffolder
                .install_dependencies(&root, &answers.dependencies)
                .await?;
            self.prompter.success("Dependencies added successfully!")?;
            added
        };

        self.prompter.success(&format!(
            "{} project setup complete!",
            self.config.display_name()
        ))?;

        Ok(ProjectSummary {
            root,
            answers,
            directories,
            dependencies_added,
        })
    }
}
