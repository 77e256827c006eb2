//! Flutter QuickStart CLI - Project scaffolding for Flutter apps

use clap::{ArgAction, Parser, Subcommand};
use quickstart_core::runtime::{PackageManagerConfig, ToolConfig};
use quickstart_core::scaffold::{Catalog, CLEAN_ARCHITECTURE, FLUTTER_PACKAGES};
use quickstart_core::tui::{CheckArgs, RunArgs};
use quickstart_core::ProductConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Flutter product configuration
#[derive(Clone)]
pub struct FlutterConfig;

impl ProductConfig for FlutterConfig {
    fn name(&self) -> &'static str {
        "flutter-quickstart"
    }

    fn display_name(&self) -> &'static str {
        "Flutter QuickStart"
    }

    fn toolchain(&self) -> ToolConfig {
        ToolConfig {
            name: "flutter",
            display_name: "Flutter",
            docs_url: "https://flutter.dev/docs/get-started/install",
            package_manager: PackageManagerConfig {
                program: "brew",
                display_name: "Homebrew",
                install_args: &["install", "--cask", "flutter"],
            },
            bin_dir: "/usr/local/bin/flutter/bin",
            shell_profile: ".zshrc",
        }
    }

    fn source_dir(&self) -> &'static str {
        "lib"
    }

    fn layout(&self) -> &'static [&'static str] {
        CLEAN_ARCHITECTURE
    }

    fn catalog(&self) -> Catalog {
        Catalog::new(FLUTTER_PACKAGES)
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        // Step 2: Run the app
        steps.push("flutter run".to_string());

        // Step 3: Rename the placeholder feature
        steps.push("Rename lib/features/feature_name to your first feature".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "flutter-quickstart")]
#[command(about = "Initialize Flutter projects with a clean architecture structure")]
#[command(version)]
pub struct Args {
    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print diagnostic errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new Flutter project with clean architecture structure
    Run(CliRunArgs),
    /// Check if Flutter is installed, and install it if not
    #[command(name = "check-flutter")]
    CheckFlutter(CliCheckArgs),
}

#[derive(Parser, Debug)]
pub struct CliRunArgs {
    /// YAML file with pre-filled answers (project_name, clean_architecture, dependencies)
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Packages to add (comma-separated, e.g. http,riverpod)
    #[arg(short, long, value_delimiter = ',')]
    pub dependencies: Option<Vec<String>>,

    /// Add no packages
    #[arg(long = "no-dependencies", conflicts_with = "dependencies")]
    pub no_dependencies: bool,

    /// Skip the clean architecture directory structure
    #[arg(long = "no-architecture")]
    pub no_architecture: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliRunArgs> for RunArgs {
    fn from(args: CliRunArgs) -> Self {
        RunArgs {
            answers: args.answers,
            name: args.name,
            dependencies: if args.no_dependencies {
                Some(Vec::new())
            } else {
                args.dependencies
            },
            no_architecture: args.no_architecture,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliCheckArgs {
    /// Exit with an error if Flutter is missing and not installed
    #[arg(long)]
    pub strict: bool,

    /// Install without asking when Flutter is missing
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCheckArgs> for CheckArgs {
    fn from(args: CliCheckArgs) -> Self {
        CheckArgs {
            strict: args.strict,
            yes: args.yes,
        }
    }
}

/// Initialize tracing; `RUST_LOG` wins over the verbosity flags
fn init_tracing(verbose: u8, quiet: bool) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully; a running child gets the same signal
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);
    let config = FlutterConfig;

    let result = match args.command {
        Command::Run(run_args) => quickstart_core::run(&config, run_args.into()).await,
        Command::CheckFlutter(check_args) => {
            quickstart_core::check(&config, check_args.into()).await
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "session failed");
            quickstart_core::tui::report_failure(&err);
            ExitCode::FAILURE
        }
    }
}
