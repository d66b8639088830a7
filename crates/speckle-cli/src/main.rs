use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;
mod picker;

#[derive(Parser)]
#[command(name = "speckle")]
#[command(about = "List Speckle streams the way the Streams node does", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an account and list its streams
    Streams {
        /// Node state file to restore from (and save to with --save)
        #[arg(long)]
        state: Option<PathBuf>,
        /// Persist the node state after listing
        #[arg(long)]
        save: bool,
        /// Stream id to select as the node output
        #[arg(long)]
        select: Option<String>,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// List accounts stored on this machine
    Accounts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Streams {
            state,
            save,
            select,
            json,
        } => {
            commands::streams::run(commands::streams::StreamsArgs {
                state,
                save,
                select,
                json,
            })
            .await?
        }
        Commands::Accounts => commands::accounts::list().await?,
    }

    Ok(())
}
