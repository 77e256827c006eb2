//! External command execution
//!
//! Every shell invocation made by the provisioner and the scaffolder goes
//! through [`CommandRunner`], so tests can swap in a fake and assert on the
//! exact sequence of commands without a real toolchain.

use crate::error::ScaffoldError;
use colored::Colorize;
use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command as TokioCommand;

/// A single program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Directory to run in; `None` inherits the process working directory
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability boundary for everything that touches external programs
pub trait CommandRunner: Send + Sync {
    /// Resolve `program` on the current `PATH`
    fn which(&self, program: &str) -> Option<PathBuf>;

    /// Run a command to completion
    ///
    /// A non-zero exit is reported through [`CommandOutput::code`], not as an
    /// error; only failing to start or wait on the process is an `Err`.
    fn run(
        &self,
        command: &CommandSpec,
    ) -> impl Future<Output = Result<CommandOutput, ScaffoldError>> + Send;
}

/// Run a command and turn a non-zero exit into [`ScaffoldError::CommandFailed`]
pub async fn run_checked<R: CommandRunner>(
    runner: &R,
    command: &CommandSpec,
) -> Result<CommandOutput, ScaffoldError> {
    let output = runner.run(command).await?;
    if output.is_success() {
        Ok(output)
    } else {
        Err(ScaffoldError::CommandFailed {
            command: command.to_string(),
            code: output.code,
        })
    }
}

/// Runs commands on the host, streaming their output to the terminal
#[derive(Debug, Clone)]
pub struct SystemRunner {
    echo: bool,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self { echo: true }
    }

    /// Capture output without echoing it
    pub fn quiet() -> Self {
        Self { echo: false }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn which(&self, program: &str) -> Option<PathBuf> {
        let found = which::which(program).ok();
        tracing::debug!(program, found = ?found, "PATH lookup");
        found
    }

    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, ScaffoldError> {
        let spawn_error = |source: io::Error| ScaffoldError::Spawn {
            command: command.to_string(),
            source,
        };

        tracing::debug!(command = %command, cwd = ?command.current_dir, "spawning");

        let mut cmd = TokioCommand::new(&command.program);
        cmd.args(&command.args)
            .kill_on_drop(true)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(spawn_error)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| spawn_error(io::Error::other("stdout was not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| spawn_error(io::Error::other("stderr was not captured")))?;

        let echo = self.echo;
        let (stdout, stderr) = tokio::join!(
            pump(stdout, move |line| {
                if echo {
                    println!("  {}", line);
                }
            }),
            pump(stderr, move |line| {
                if echo {
                    eprintln!("  {}", line.yellow());
                }
            }),
        );

        // Reap the child even when a stream broke, so it never outlives the run
        let status = child.wait().await.map_err(spawn_error)?;
        let (stdout, stderr) = (stdout.map_err(spawn_error)?, stderr.map_err(spawn_error)?);
        tracing::debug!(command = %command, code = ?status.code(), "finished");

        Ok(CommandOutput {
            code: status.code(),
            stdout,
            stderr,
        })
    }
}

/// Read a child stream line by line, echoing and collecting it
///
/// Tools like `brew` may print bytes that are not UTF-8; those are replaced
/// rather than treated as a read failure.
async fn pump<R, F>(reader: R, mut on_line: F) -> io::Result<String>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut captured = String::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        on_line(line);
        captured.push_str(line);
        captured.push('\n');
    }
    Ok(captured)
}
