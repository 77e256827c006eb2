//! End-to-end session tests with a fake command runner and scripted prompts

use anyhow::Result;
use quickstart_core::runtime::{PackageManagerConfig, ShellProfile};
use quickstart_core::{
    Catalog, CommandOutput, CommandRunner, CommandSpec, DeclinePolicy, ProductConfig, Prompter,
    ScaffoldError, Session, ToolConfig, UserAnswers, CLEAN_ARCHITECTURE, FLUTTER_PACKAGES,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

#[derive(Clone)]
struct TestConfig;

impl ProductConfig for TestConfig {
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

    fn next_steps(&self, _dir: &Path) -> Vec<String> {
        Vec::new()
    }
}

/// Records every command; `create` commands make the project directory
#[derive(Default)]
struct FakeRunner {
    on_path: Mutex<HashSet<String>>,
    /// Exit code by command prefix
    failures: HashMap<String, i32>,
    /// Programs that appear on PATH once `brew install` has run
    installs: Vec<String>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl FakeRunner {
    fn with_path(programs: &[&str]) -> Self {
        let runner = Self::default();
        runner
            .on_path
            .lock()
            .unwrap()
            .extend(programs.iter().map(|p| p.to_string()));
        runner
    }

    fn fail(mut self, prefix: &str, code: i32) -> Self {
        self.failures.insert(prefix.to_string(), code);
        self
    }

    fn installs(mut self, program: &str) -> Self {
        self.installs.push(program.to_string());
        self
    }

    fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn which(&self, program: &str) -> Option<PathBuf> {
        self.on_path
            .lock()
            .unwrap()
            .contains(program)
            .then(|| PathBuf::from("/fake/bin").join(program))
    }

    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, ScaffoldError> {
        self.calls.lock().unwrap().push(command.clone());
        let rendered = command.to_string();

        if let Some((_, code)) = self
            .failures
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
        {
            return Ok(CommandOutput::failure(*code));
        }

        if command.program == Path::new("brew") {
            self.on_path
                .lock()
                .unwrap()
                .extend(self.installs.iter().cloned());
        }

        if command.args.first().map(String::as_str) == Some("create") {
            let dir = command.current_dir.clone().unwrap_or_default();
            fs::create_dir_all(dir.join(&command.args[1])).unwrap();
        }

        Ok(CommandOutput::success())
    }
}

/// Canned answers; records every note it is asked to show
struct ScriptedPrompter {
    install: bool,
    answers: UserAnswers,
    asked_for_answers: RefCell<bool>,
    notes: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(name: &str, clean_architecture: bool, dependencies: &[&str]) -> Self {
        Self {
            install: true,
            answers: UserAnswers::new(name, clean_architecture, dependencies, &Catalog::default())
                .unwrap(),
            asked_for_answers: RefCell::new(false),
            notes: RefCell::new(Vec::new()),
        }
    }

    fn declining(mut self) -> Self {
        self.install = false;
        self
    }

    fn note(&self, level: &str, message: &str) -> Result<()> {
        self.notes.borrow_mut().push(format!("{level}: {message}"));
        Ok(())
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        self.note("confirm", prompt)?;
        Ok(self.install)
    }

    fn collect_answers(&self, _catalog: &Catalog) -> Result<UserAnswers> {
        *self.asked_for_answers.borrow_mut() = true;
        Ok(self.answers.clone())
    }

    fn step(&self, message: &str) -> Result<()> {
        self.note("step", message)
    }

    fn info(&self, message: &str) -> Result<()> {
        self.note("info", message)
    }

    fn success(&self, message: &str) -> Result<()> {
        self.note("success", message)
    }

    fn warning(&self, message: &str) -> Result<()> {
        self.note("warning", message)
    }
}

fn scaffold_error(err: &anyhow::Error) -> &ScaffoldError {
    err.downcast_ref::<ScaffoldError>()
        .expect("expected a ScaffoldError")
}

#[tokio::test]
async fn demo_app_scenario_runs_steps_in_order() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["flutter"]);
    let prompter = ScriptedPrompter::new("demo_app", true, &["http", "equatable"]);

    let summary = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .with_profile(ShellProfile::new(tmp.path().join(".zshrc")))
        .run()
        .await
        .unwrap();

    assert_eq!(
        runner.commands(),
        vec!["flutter create demo_app", "flutter pub add http equatable"]
    );
    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls[0].current_dir.as_deref(), Some(tmp.path()));
    assert_eq!(
        calls[1].current_dir.as_deref(),
        Some(tmp.path().join("demo_app").as_path())
    );

    let lib = tmp.path().join("demo_app/lib");
    assert_eq!(summary.directories.len(), 10);
    for dir in CLEAN_ARCHITECTURE {
        assert!(lib.join(dir).is_dir(), "missing {dir}");
    }
    assert!(summary.dependencies_added);
    assert!(!tmp.path().join(".zshrc").exists());
}

#[tokio::test]
async fn opting_out_of_architecture_creates_nothing_under_lib() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["flutter"]);
    let prompter = ScriptedPrompter::new("demo_app", false, &["http"]);

    let summary = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .run()
        .await
        .unwrap();

    assert!(summary.directories.is_empty());
    assert!(!tmp.path().join("demo_app/lib").exists());
}

#[tokio::test]
async fn empty_selection_skips_package_add() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["flutter"]);
    let prompter = ScriptedPrompter::new("demo_app", true, &[]);

    let summary = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .run()
        .await
        .unwrap();

    assert_eq!(runner.commands(), vec!["flutter create demo_app"]);
    assert!(!summary.dependencies_added);
}

#[tokio::test]
async fn dependencies_keep_selection_order() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["flutter"]);
    let prompter = ScriptedPrompter::new("demo_app", false, &["riverpod", "http"]);

    Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .run()
        .await
        .unwrap();

    assert_eq!(
        runner.commands().last().map(String::as_str),
        Some("flutter pub add riverpod http")
    );
}

#[tokio::test]
async fn dev_dependency_uses_its_catalog_value() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["flutter"]);
    let prompter = ScriptedPrompter::new("demo_app", false, &["http", "build_runner"]);

    Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .run()
        .await
        .unwrap();

    assert_eq!(
        runner.commands().last().map(String::as_str),
        Some("flutter pub add http dev:build_runner")
    );
}

#[tokio::test]
async fn present_toolchain_never_provisions() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["flutter", "brew"]);
    let prompter = ScriptedPrompter::new("demo_app", false, &[]);

    Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .with_profile(ShellProfile::new(tmp.path().join(".zshrc")))
        .check(DeclinePolicy::Abort)
        .await
        .unwrap();

    assert!(runner.commands().is_empty());
    assert!(!tmp.path().join(".zshrc").exists());
    assert!(!prompter
        .notes
        .borrow()
        .iter()
        .any(|n| n.starts_with("confirm")));
}

#[tokio::test]
async fn missing_package_manager_stops_before_project_creation() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::default();
    let prompter = ScriptedPrompter::new("demo_app", true, &["http"]);

    let err = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .with_profile(ShellProfile::new(tmp.path().join(".zshrc")))
        .run()
        .await
        .unwrap_err();

    match scaffold_error(&err) {
        ScaffoldError::PackageManagerMissing { docs_url, .. } => {
            assert_eq!(docs_url, "https://flutter.dev/docs/get-started/install");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(runner.commands().is_empty());
    assert!(!*prompter.asked_for_answers.borrow());
    assert!(!tmp.path().join("demo_app").exists());
}

#[tokio::test]
async fn declining_install_aborts_run() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["brew"]);
    let prompter = ScriptedPrompter::new("demo_app", true, &[]).declining();

    let err = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        scaffold_error(&err),
        ScaffoldError::ToolchainDeclined { .. }
    ));
    assert!(runner.commands().is_empty());
    assert!(!*prompter.asked_for_answers.borrow());
}

#[tokio::test]
async fn declining_install_under_continue_policy_only_warns() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["brew"]);
    let prompter = ScriptedPrompter::new("demo_app", true, &[]).declining();

    Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .check(DeclinePolicy::Continue)
        .await
        .unwrap();

    assert!(runner.commands().is_empty());
    assert!(prompter
        .notes
        .borrow()
        .contains(&"warning: Flutter installation is required to proceed.".to_string()));
}

#[tokio::test]
async fn check_strict_decline_errors() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["brew"]);
    let prompter = ScriptedPrompter::new("demo_app", true, &[]).declining();

    let err = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .check(DeclinePolicy::Abort)
        .await
        .unwrap_err();

    match scaffold_error(&err) {
        ScaffoldError::ToolchainDeclined { toolchain } => assert_eq!(toolchain, "Flutter"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(runner.commands().is_empty());
    assert!(!prompter
        .notes
        .borrow()
        .contains(&"warning: Flutter installation is required to proceed.".to_string()));
}

#[tokio::test]
async fn install_that_lands_on_path_leaves_profile_alone() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["brew"]).installs("flutter");
    let prompter = ScriptedPrompter::new("demo_app", false, &[]);
    let profile = tmp.path().join(".zshrc");

    let summary = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .with_profile(ShellProfile::new(&profile))
        .run()
        .await
        .unwrap();

    assert_eq!(
        runner.commands(),
        vec!["brew install --cask flutter", "flutter create demo_app"]
    );
    assert!(!profile.exists());
    assert_eq!(summary.root, tmp.path().join("demo_app"));
}

#[tokio::test]
async fn install_off_path_extends_profile_and_uses_absolute_program() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["brew"]);
    let prompter = ScriptedPrompter::new("demo_app", false, &["http"]);
    let profile = tmp.path().join(".zshrc");

    Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .with_profile(ShellProfile::new(&profile))
        .run()
        .await
        .unwrap();

    let contents = fs::read_to_string(&profile).unwrap();
    assert_eq!(
        contents.trim_end(),
        "export PATH=\"$PATH:/usr/local/bin/flutter/bin\""
    );

    let commands = runner.commands();
    assert_eq!(commands[0], "brew install --cask flutter");
    assert!(commands[1].starts_with("zsh -c source "));
    assert_eq!(
        commands[2],
        "/usr/local/bin/flutter/bin/flutter create demo_app"
    );
    assert_eq!(
        commands[3],
        "/usr/local/bin/flutter/bin/flutter pub add http"
    );
}

#[tokio::test]
async fn failing_install_is_reported() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["brew"]).fail("brew install", 1);
    let prompter = ScriptedPrompter::new("demo_app", true, &[]);

    let err = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .with_profile(ShellProfile::new(tmp.path().join(".zshrc")))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        scaffold_error(&err),
        ScaffoldError::CommandFailed { code: Some(1), .. }
    ));
    assert!(!*prompter.asked_for_answers.borrow());
}

#[tokio::test]
async fn failing_create_stops_before_layout_and_packages() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["flutter"]).fail("flutter create", 64);
    let prompter = ScriptedPrompter::new("demo_app", true, &["http"]);

    let err = Session::new(&TestConfig, &runner, &prompter, tmp.path())
        .run()
        .await
        .unwrap_err();

    match scaffold_error(&err) {
        ScaffoldError::CommandFailed { command, code } => {
            assert_eq!(command, "flutter create demo_app");
            assert_eq!(*code, Some(64));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(runner.commands(), vec!["flutter create demo_app"]);
    assert!(!tmp.path().join("demo_app").exists());
}

#[tokio::test]
async fn rerunning_architecture_on_existing_project_is_harmless() {
    let tmp = TempDir::new().unwrap();
    let runner = FakeRunner::with_path(&["flutter"]);
    let prompter = ScriptedPrompter::new("demo_app", true, &[]);
    let session = Session::new(&TestConfig, &runner, &prompter, tmp.path());

    let first = session.run().await.unwrap();
    let second = session.run().await.unwrap();

    assert_eq!(first.directories, second.directories);
    let lib_entries = fs::read_dir(tmp.path().join("demo_app/lib")).unwrap().count();
    assert_eq!(lib_entries, 2);
}
