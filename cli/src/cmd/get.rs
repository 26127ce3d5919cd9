use std::path::PathBuf;

use solve_core::{action, testing::TestcaseLayout, Config};
use solve_webclient::Source;

use super::{GlobalArgs, SubcmdResult};
use crate::util;

/// Fetch sample testcases of PROBLEM from SOURCE
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Source site, matched by prefix (e.g. `boj`)
    #[arg()]
    pub source: String,

    /// Problem id; anything after the first `_` or `.` is ignored
    #[arg()]
    pub problem: String,

    /// Testcase root dir [default: `run.testcase_dir` in solve.toml]
    #[arg(short = 'c', long)]
    pub testcase_directory: Option<PathBuf>,

    /// Save testcases directly in the testcase root instead of `{root}/{problem}/`
    #[arg(short = 'N', long)]
    pub no_subdirectory: bool,
}

pub async fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let source = Source::guess(&args.source)?;
    let testcase_root = match &args.testcase_directory {
        Some(dir) => dir.clone(),
        None => Config::load_for_dir(util::current_dir())?.run.testcase_dir,
    };

    let (dir, saved) = action::fetch_testcases(
        source,
        &args.problem,
        &testcase_root,
        TestcaseLayout::from_flat_flag(args.no_subdirectory),
    )
    .await?;

    log::info!("Saved in '{}'", dir.to_string_lossy());
    println!("Successfully crawled {} testcases", saved.len());
    Ok(())
}
