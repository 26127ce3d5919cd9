pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

use colored::Colorize;
use error::*;
use solve_webclient::Source;

use crate::compile::CompileCache;
use crate::config::Config;
use crate::diff::{DiffSession, DiffTool};
use crate::interactive::{self, DiffChoice};
use crate::problem::ProblemName;
use crate::report::{RecentRun, RunReport};
use crate::style::{self, ConsoleReporter};
use crate::testing::{FsTestcase, TestRunner, TestcaseLayout};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub testcase_root: PathBuf,
    pub layout: TestcaseLayout,
    /// Skip judging and attach the program to the terminal.
    pub manual: bool,
    pub time_limit: Duration,
}

impl RunOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            testcase_root: cfg.run.testcase_dir.clone(),
            layout: TestcaseLayout::default(),
            manual: false,
            time_limit: cfg.run.time_limit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Judge,
    Manual,
}

impl RunMode {
    /// No testcases means manual mode, even when it was not requested.
    pub fn decide(manual_requested: bool, num_testcases: usize) -> Self {
        if manual_requested || num_testcases == 0 {
            Self::Manual
        } else {
            Self::Judge
        }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Judged(RunReport),
    Manual(ExitStatus),
}

pub async fn do_run(
    source_file: impl AsRef<Path>,
    opts: &RunOptions,
    cfg: &Config,
) -> Result<RunOutcome> {
    let source_file = source_file.as_ref();
    let artifact = CompileCache::new(&cfg.compile).resolve(source_file).await?;

    let problem = ProblemName::from_source_file(source_file)
        .with_context(|| format!("Not a file path: {:?}", source_file))?;
    let testcase_dir = opts.layout.testcase_dir(&opts.testcase_root, &problem);
    let testcases = FsTestcase::enumerate(&testcase_dir).context("Failed to find testcases")?;

    let runner = TestRunner::new(&artifact.path).time_limit(opts.time_limit);

    if RunMode::decide(opts.manual, testcases.len()) == RunMode::Manual {
        if !opts.manual {
            println!("{}", "No input data!".bright_red());
        }
        println!(
            "{}",
            format!("Runtime Mode ({})", artifact.path.to_string_lossy()).bright_cyan()
        );
        let status = runner.run_interactive().await?;
        return Ok(RunOutcome::Manual(status));
    }

    let report = self::judge(&runner, &problem, &testcase_dir, &testcases).await?;

    let recent_file = RecentRun::filepath_for_source(source_file);
    report
        .recent_run()
        .save(&recent_file)
        .context("Failed to save recent run")?;

    Ok(RunOutcome::Judged(report))
}

/// Judge the testcases with streamed console output.
pub async fn judge(
    runner: &TestRunner,
    problem: &ProblemName,
    testcase_dir: impl AsRef<Path>,
    testcases: &[FsTestcase],
) -> Result<RunReport> {
    let abs_dir = fsutil::absolute_path(testcase_dir)?;
    let mut report = RunReport::new(problem.as_str(), abs_dir);
    let mut reporter = ConsoleReporter::new(testcases);

    runner.judge(testcases, &mut report, &mut reporter).await;
    println!("{}", style::max_time_line(report.max_elapsed_ms));
    Ok(report)
}

/// Returns (testcase_dir, saved_testcases)
pub async fn fetch_testcases(
    source: Source,
    problem: &str,
    testcase_root: impl AsRef<Path>,
    layout: TestcaseLayout,
) -> Result<(PathBuf, Vec<FsTestcase>)> {
    let problem = ProblemName::parse_loose(problem);
    ensure!(!problem.as_str().is_empty(), "Empty problem id");

    let cli = solve_webclient::new_client(source);
    let samples = cli
        .fetch_testcases(problem.as_str())
        .await
        .context("Failed to fetch testcases")?;

    let dir = layout.testcase_dir(testcase_root, &problem);
    let saved = FsTestcase::save_samples(&dir, &samples).context("Failed to save testcases")?;
    Ok((dir, saved))
}

pub fn do_diff(recent_file: impl AsRef<Path>, tool: &DiffTool, assume_yes: bool) -> Result<()> {
    let session = DiffSession::load(recent_file)?;
    let recent = session.recent();

    print!("{}", format!("diff {}. ", recent.problem_name).bright_cyan());
    if recent.wa_list.is_empty() {
        println!("{}", "There is no WA!".bright_cyan());
        return Ok(());
    }

    let num_wa = recent.wa_list.len();
    println!(
        "{} {}",
        format!("{} WA({})", num_wa, recent.wa_list.join(", ")).bright_cyan(),
        tool.to_string().blue(),
    );

    for (i, (name, output, answer)) in session.targets().enumerate() {
        println!("{} ({}/{})", name, i + 1, num_wa);

        let choice = if assume_yes {
            DiffChoice::Show
        } else {
            interactive::ask_diff_choice().context("Failed to read answer")?
        };
        match choice {
            DiffChoice::Show => {
                let status = tool.run(&output, &answer)?;
                log::debug!("{} exited with {}", tool, status);
            }
            DiffChoice::Skip => continue,
            DiffChoice::Quit => break,
        }
    }
    Ok(())
}
