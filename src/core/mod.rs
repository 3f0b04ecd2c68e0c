//! Core business logic: ledger, operations and valuation

pub mod command;
pub mod config;
pub mod error;
pub mod ledger;
pub mod log;
pub mod operation;
pub mod price;
pub mod valuation;
pub mod wallet;

// Re-export main types for cleaner imports
pub use command::Command;
pub use error::WalletError;
pub use ledger::{Account, Ledger, UserId};
pub use price::PriceProvider;
pub use valuation::Valuation;
pub use wallet::{Reply, Wallet};
