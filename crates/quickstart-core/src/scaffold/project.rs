//! Project creation, layout and dependency steps

use crate::error::ScaffoldError;
use crate::runtime::exec::{run_checked, CommandRunner, CommandSpec};
use crate::scaffold::answers::validate_project_name;
use crate::scaffold::layout;
use std::path::{Path, PathBuf};

/// Runs the toolchain against a new project
///
/// `program` is how the toolchain is invoked (usually just `flutter`), and
/// `workdir` is where new projects are created.
#[derive(Debug)]
pub struct Scaffolder<'a, R> {
    runner: &'a R,
    program: PathBuf,
    workdir: PathBuf,
}

impl<'a, R: CommandRunner> Scaffolder<'a, R> {
    pub fn new(runner: &'a R, program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    pub fn create_command(&self, name: &str) -> CommandSpec {
        CommandSpec::new(&self.program)
            .arg("create")
            .arg(name)
            .current_dir(&self.workdir)
    }

    pub fn add_command(&self, root: &Path, packages: &[String]) -> CommandSpec {
        CommandSpec::new(&self.program)
            .args(["pub", "add"])
            .args(packages.iter().cloned())
            .current_dir(root)
    }

    /// Create the project and return its root directory
    ///
    /// Every later step runs relative to the returned root.
    pub async fn create_project(&self, name: &str) -> Result<PathBuf, ScaffoldError> {
        validate_project_name(name)?;

        run_checked(self.runner, &self.create_command(name)).await?;

        let root = self.workdir.join(name);
        if !root.is_dir() {
            return Err(ScaffoldError::ProjectMissing(root));
        }
        Ok(root)
    }

    /// Create `layout` under the project's source directory
    pub fn apply_architecture(
        &self,
        root: &Path,
        source_dir: &str,
        layout: &[&str],
    ) -> Result<Vec<PathBuf>, ScaffoldError> {
        layout::materialize(&root.join(source_dir), layout)
    }

    /// Add `packages` with a single package-add invocation
    ///
    /// Returns `false` without running anything when `packages` is empty.
    pub async fn install_dependencies(
        &self,
        root: &Path,
        packages: &[String],
    ) -> Result<bool, ScaffoldError> {
        if packages.is_empty() {
            return Ok(false);
        }
        run_checked(self.runner, &self.add_command(root, packages)).await?;
        Ok(true)
    }
}
