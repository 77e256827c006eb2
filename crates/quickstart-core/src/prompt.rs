//! User interaction seam
//!
//! The session never talks to the terminal directly: questions and progress
//! notes go through [`Prompter`], so tests can answer from a script.

use crate::scaffold::answers::UserAnswers;
use crate::scaffold::catalog::Catalog;
use anyhow::Result;

pub trait Prompter {
    /// Ask a yes/no question
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Ask for the project name, the architecture opt-in and the packages,
    /// in that order
    fn collect_answers(&self, catalog: &Catalog) -> Result<UserAnswers>;

    /// Progress note for a step about to run
    fn step(&self, message: &str) -> Result<()>;

    fn info(&self, message: &str) -> Result<()>;

    fn success(&self, message: &str) -> Result<()>;

    fn warning(&self, message: &str) -> Result<()>;
}
