//! Charm-style CLI prompts using cliclack

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::prompt::Prompter;
use crate::runtime::exec::SystemRunner;
use crate::scaffold::answers::{validate_project_name, AnswersFile, UserAnswers};
use crate::scaffold::catalog::Catalog;
use crate::session::{DeclinePolicy, Session};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the run command
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// YAML file with pre-filled answers
    pub answers: Option<PathBuf>,

    /// Project name (skips the name prompt)
    pub name: Option<String>,

    /// Packages to add (skips the dependency prompt)
    pub dependencies: Option<Vec<String>>,

    /// Do not create the clean architecture layout (skips the prompt)
    pub no_architecture: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// CLI arguments for the toolchain check command
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Fail when the user declines to install the toolchain
    pub strict: bool,

    /// Auto-confirm the install prompt
    pub yes: bool,
}

impl CheckArgs {
    pub fn decline_policy(&self) -> DeclinePolicy {
        if self.strict {
            DeclinePolicy::Abort
        } else {
            DeclinePolicy::Continue
        }
    }
}

/// Answers known before any prompt is shown
///
/// Flags win over the answers file; anything still missing is asked for, or
/// taken from its default in `--yes` mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preset {
    pub project_name: Option<String>,
    pub clean_architecture: Option<bool>,
    pub dependencies: Option<Vec<String>>,
    pub assume_yes: bool,
}

impl Preset {
    pub fn from_args(args: &RunArgs) -> Result<Self> {
        let file = match &args.answers {
            Some(path) => AnswersFile::load(path)?,
            None => AnswersFile::default(),
        };

        Ok(Self {
            project_name: args.name.clone().or(file.project_name),
            clean_architecture: if args.no_architecture {
                Some(false)
            } else {
                file.clean_architecture
            },
            dependencies: args.dependencies.clone().or(file.dependencies),
            assume_yes: args.yes,
        })
    }
}

/// [`Prompter`] backed by cliclack, answering from a [`Preset`] where it can
#[derive(Debug, Clone, Default)]
pub struct InteractivePrompter {
    preset: Preset,
}

impl InteractivePrompter {
    pub fn new(preset: Preset) -> Self {
        Self { preset }
    }

    fn project_name(&self) -> Result<String> {
        if let Some(name) = &self.preset.project_name {
            cliclack::log::info(format!("Project name: {}", name))?;
            return Ok(name.clone());
        }
        if self.preset.assume_yes {
            anyhow::bail!("A project name is required in --yes mode (use --name or --answers).");
        }

        let name: String = cliclack::input("Enter your project name")
            .placeholder("my_app")
            .validate(|input: &String| {
                validate_project_name(input.trim()).map_err(|e| match e {
                    ScaffoldError::InvalidProjectName { reason, .. } => reason.to_string(),
                    other => other.to_string(),
                })
            })
            .interact()?;
        Ok(name)
    }

    fn clean_architecture(&self) -> Result<bool> {
        if let Some(opt_in) = self.preset.clean_architecture {
            return Ok(opt_in);
        }
        if self.preset.assume_yes {
            return Ok(true);
        }

        let opt_in = cliclack::confirm("Do you want to set up a Clean Architecture structure?")
            .initial_value(true)
            .interact()?;
        Ok(opt_in)
    }

    fn dependencies(&self, catalog: &Catalog) -> Result<Vec<String>> {
        if let Some(deps) = &self.preset.dependencies {
            return Ok(deps.clone());
        }
        if self.preset.assume_yes {
            return Ok(catalog.defaults());
        }

        let mut multi = cliclack::multiselect("Select additional dependencies to install");
        for entry in catalog.entries() {
            let hint = if entry.value != entry.label {
                entry.value
            } else {
                ""
            };
            multi = multi.item(entry.value, entry.label, hint);
        }
        let defaults: Vec<&'static str> = catalog
            .entries()
            .iter()
            .filter(|e| e.default_selected)
            .map(|e| e.value)
            .collect();

        let selected: Vec<&'static str> = multi
            .initial_values(defaults)
            .required(false)
            .interact()?;
        Ok(selected.into_iter().map(str::to_string).collect())
    }
}

impl Prompter for InteractivePrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.preset.assume_yes {
            cliclack::log::info(format!("{} yes (--yes mode)", prompt))?;
            return Ok(true);
        }
        Ok(cliclack::confirm(prompt).initial_value(default).interact()?)
    }

    fn collect_answers(&self, catalog: &Catalog) -> Result<UserAnswers> {
        let name = self.project_name()?;
        let clean_architecture = self.clean_architecture()?;
        let dependencies = self.dependencies(catalog)?;
        Ok(UserAnswers::new(&name, clean_architecture, &dependencies, catalog)?)
    }

    fn step(&self, message: &str) -> Result<()> {
        Ok(cliclack::log::step(message)?)
    }

    fn info(&self, message: &str) -> Result<()> {
        Ok(cliclack::log::info(message)?)
    }

    fn success(&self, message: &str) -> Result<()> {
        Ok(cliclack::log::success(message)?)
    }

    fn warning(&self, message: &str) -> Result<()> {
        Ok(cliclack::log::warning(message)?)
    }
}

/// Run the full scaffolding flow with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: RunArgs) -> Result<()> {
    tracing::debug!(product = config.name(), ?args, "starting run");
    cliclack::intro(format!("Welcome to {}!", config.display_name()))?;

    let prompter = InteractivePrompter::new(Preset::from_args(&args)?);
    let runner = SystemRunner::new();
    let workdir = std::env::current_dir()?;

    let summary = Session::new(config, &runner, &prompter, workdir)
        .run()
        .await?;

    print_next_steps(config, &summary.root)
}

/// Check for the toolchain, offering to install it
pub async fn check<C: ProductConfig>(config: &C, args: CheckArgs) -> Result<()> {
    tracing::debug!(product = config.name(), ?args, "starting toolchain check");
    cliclack::intro(format!("{} toolchain check", config.display_name()))?;

    let prompter = InteractivePrompter::new(Preset {
        assume_yes: args.yes,
        ..Preset::default()
    });
    let runner = SystemRunner::new();
    let workdir = std::env::current_dir()?;

    Session::new(config, &runner, &prompter, workdir)
        .check(args.decline_policy())
        .await?;

    cliclack::outro("Done")?;
    Ok(())
}

/// Report a failed session and close the prompt frame
pub fn report_failure(err: &anyhow::Error) {
    let _ = cliclack::log::error(format!("{:#}", err));
    let _ = cliclack::outro_cancel("Setup cancelled.");
}

fn print_next_steps<C: ProductConfig>(config: &C, project_dir: &Path) -> Result<()> {
    let steps = config.next_steps(project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
