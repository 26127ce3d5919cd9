use std::path::PathBuf;

use solve_core::{action, diff::DiffTool, report::RecentRun};

use super::{GlobalArgs, SubcmdResult};

/// Diff the output and answer of each WA testcase in the most recent run
#[derive(Debug, clap::Args)]
pub struct Args {
    /// Diff command; extra words are passed before the two file paths
    #[arg(short, long, default_value = DiffTool::DEFAULT)]
    pub tool: String,

    /// Do not ask; show every WA testcase
    #[arg(short)]
    pub yes: bool,

    /// Dir of the solution file whose run to inspect
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,
}

pub fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let tool = DiffTool::parse(&args.tool)?;
    action::do_diff(RecentRun::filepath(&args.dir), &tool, args.yes)
}
