use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use wallet_tracker::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Process ADD/SUB/DEL/SHOW commands read from stdin, one per line
    Run {
        /// User whose balances the commands apply to
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        user: i64,
    },
    /// Print the current price of BASE in QUOTE, e.g. `quote BTC USDT`
    Quote { base: String, quote: String },
}

impl From<Commands> for wallet_tracker::AppCommand {
    fn from(cmd: Commands) -> wallet_tracker::AppCommand {
        match cmd {
            Commands::Run { user } => wallet_tracker::AppCommand::Run { user },
            Commands::Quote { base, quote } => wallet_tracker::AppCommand::Quote { base, quote },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => wallet_tracker::cli::setup::setup(),
        Some(cmd) => wallet_tracker::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
