pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{PriceProvider, UserId, Wallet};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    /// Read commands from stdin on behalf of `user`
    Run { user: UserId },
    /// Look up a single price
    Quote { base: String, quote: String },
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Wallet tracker starting...");

    let config = load_config(config_path)?;
    let price_provider = providers::BinanceProvider::from_config(&config.providers.binance)?;

    match command {
        AppCommand::Run { user } => {
            let mut wallet = Wallet::new(Arc::new(price_provider), config.valuation);
            cli::session::run(&mut wallet, user).await
        }
        AppCommand::Quote { base, quote } => {
            let base = base.to_uppercase();
            let quote = quote.to_uppercase();
            let price = price_provider.fetch_price(&base, &quote).await?;
            println!(
                "{}{}: {}",
                base,
                quote,
                cli::ui::style_text(&price.to_string(), cli::ui::StyleType::Value)
            );
            Ok(())
        }
    }
}
