use std::path::PathBuf;
use std::time::Duration;

use solve_core::{
    action::{self, RunOptions, RunOutcome},
    compile,
    testing::TestcaseLayout,
    Config,
};

use super::{GlobalArgs, SubcmdResult};

/// Compile FILENAME and judge it against its testcases
#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub filename: PathBuf,

    /// Testcase root dir [default: `run.testcase_dir` in solve.toml]
    #[arg(short = 'c', long)]
    pub testcase_directory: Option<PathBuf>,

    /// Find testcases directly in the testcase root instead of `{root}/{problem}/`
    #[arg(short = 'N', long)]
    pub no_subdirectory: bool,

    /// Ignore testcases and type the input manually
    #[arg(short, long)]
    pub runtime: bool,

    /// Time limit in seconds [default: `run.time_limit` in solve.toml]
    #[arg(short, long)]
    pub timelimit: Option<u64>,
}

pub async fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    anyhow::ensure!(
        args.filename.is_file(),
        "No such file: {:?}",
        args.filename
    );
    let cfg = Config::load_for_dir(compile::source_dir(&args.filename))?;

    let mut opts = RunOptions::from_config(&cfg);
    if let Some(dir) = &args.testcase_directory {
        opts.testcase_root = dir.clone();
    }
    if let Some(secs) = args.timelimit {
        opts.time_limit = Duration::from_secs(secs);
    }
    opts.layout = TestcaseLayout::from_flat_flag(args.no_subdirectory);
    opts.manual = args.runtime;

    match action::do_run(&args.filename, &opts, &cfg).await? {
        RunOutcome::Judged(report) => {
            log::debug!(
                "{} testcases, {} WA",
                report.results.len(),
                report.wrong_answers.len()
            );
        }
        RunOutcome::Manual(status) => {
            log::debug!("Program exited with {}", status);
        }
    }
    Ok(())
}
