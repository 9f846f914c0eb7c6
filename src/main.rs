use anyhow::Result;
use clap::Parser;
use sentiscope::cli::commands::{Cli, Commands};
use sentiscope::cli::handlers::{handle_analyze_command, handle_interactive_command};
use sentiscope::cli::utils::{init_logging, print_info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, &cli.log_format);

    match cli.command {
        Commands::Analyze {
            texts,
            file,
            options,
            csv,
            json,
            pdf,
        } => handle_analyze_command(texts, file, options, csv, json, pdf).await,

        Commands::Interactive { options } => handle_interactive_command(options).await,

        Commands::Info => {
            print_info();
            Ok(())
        }
    }
}
