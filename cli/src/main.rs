mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{join, render};

pub async fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logger(cli.verbose);

    match &cli.command {
        Commands::Render(args) => render::run(&cli, args).await,
        Commands::Join(args) => join::run(&cli, args).await,
    }
}

/// `-v` info, `-vv` debug; `RUST_LOG` wins when set.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> { run().await }
