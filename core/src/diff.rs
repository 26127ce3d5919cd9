//! Step through the WA testcases of the most recent run with an external diff tool.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{bail, Context as _};

use crate::report::RecentRun;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTool {
    program: String,
    args: Vec<String>,
}

impl DiffTool {
    pub const DEFAULT: &'static str = "diff";

    /// `"vimdiff -R"` is program `vimdiff` with leading argument `-R`.
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let mut words = s.split_whitespace().map(str::to_owned);
        let Some(program) = words.next() else {
            bail!("Empty diff tool")
        };
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn command(&self, output: &Path, answer: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(output).arg(answer);
        cmd
    }

    pub fn run(&self, output: &Path, answer: &Path) -> anyhow::Result<ExitStatus> {
        self.command(output, answer)
            .status()
            .with_context(|| format!("Failed to spawn diff tool '{}'", self.program))
    }
}

impl fmt::Display for DiffTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl Default for DiffTool {
    fn default() -> Self {
        Self {
            program: Self::DEFAULT.to_owned(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiffSession {
    recent: RecentRun,
}

impl DiffSession {
    pub fn load(recent_filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let recent = RecentRun::load(&recent_filepath).context("Failed to load recent run")?;
        Ok(Self { recent })
    }

    pub fn new(recent: RecentRun) -> Self {
        Self { recent }
    }

    pub fn recent(&self) -> &RecentRun {
        &self.recent
    }

    /// `(name, .out path, .ans path)` of every WA testcase, in run order.
    pub fn targets(&self) -> impl Iterator<Item = (&str, PathBuf, PathBuf)> + '_ {
        self.recent.wa_list.iter().map(|name| {
            (
                name.as_str(),
                self.recent.output_path(name),
                self.recent.answer_path(name),
            )
        })
    }
}
