//! Developer tasks for the userstore workspace, run as `cargo xtask <task>`.

use clap::Parser;

mod dynamodb;
mod prelude;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Developer tasks for userstore")]
struct Cli {
    #[command(flatten)]
    output: Output,

    #[command(subcommand)]
    task: Task,
}

/// How much a task prints.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct Output {
    /// Print nothing but errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List every user a task writes
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Task {
    /// Create, destroy or seed the users table
    Dynamodb(dynamodb::DynamodbCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.task {
        Task::Dynamodb(command) => dynamodb::run(command, cli.output).await?,
    }

    Ok(())
}
