pub mod diff;
pub mod get;
pub mod run;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    #[command(alias("d"))]
    Diff(diff::Args),

    #[command(alias("g"))]
    Get(get::Args),

    #[command(alias("r"))]
    Run(run::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Diff(args) => diff::exec(args, self),
            Get(args) => get::exec(args, self).await,
            Run(args) => run::exec(args, self).await,
        }
    }
}
