//! CLI entry point - the composition root.

use clap::{CommandFactory, Parser};

use acadmin_cli::{Cli, Commands, handlers, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve(args) => handlers::serve::execute(args).await?,
        Commands::InitDb(args) => handlers::init_db::execute(&args).await?,
    }

    Ok(())
}
