use anyhow::Result;
use boomabrovers::cli::SubmitArgs;
use clap::{Parser, Subcommand};

/// boomabrovers - contact submission service
#[derive(Parser)]
#[command(name = "boomabrovers")]
#[command(about = "Contact form API and submission client for the Boomabrovers site", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Validate and send one contact submission through the configured transport
    Submit(SubmitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = boomabrovers::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    boomabrovers::observability::init_observability(
        "boomabrovers",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Serve { host, port } => boomabrovers::cli::serve(config, host, port).await,
        Commands::Migrate => boomabrovers::cli::migrate(config).await,
        Commands::Submit(args) => boomabrovers::cli::submit(config, args).await,
    }
}
