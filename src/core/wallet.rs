//! Command handler owning the ledger.
//!
//! `Wallet` is the single writer of its [`Ledger`]: every handler takes
//! `&mut self`, so commands are applied one at a time to completion. Sharing
//! a wallet between concurrent workers requires wrapping it in a lock.
use crate::core::command::Command;
use crate::core::config::ValuationConfig;
use crate::core::error::WalletError;
use crate::core::ledger::{Ledger, UserId};
use crate::core::operation::{self, Confirmation};
use crate::core::price::PriceProvider;
use crate::core::valuation::{self, Valuation};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Confirmation(Confirmation),
    Report(Valuation),
}

impl Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Confirmation(c) => c.fmt(f),
            Reply::Report(v) => v.fmt(f),
        }
    }
}

pub struct Wallet {
    ledger: Ledger,
    price_provider: Arc<dyn PriceProvider>,
    valuation: ValuationConfig,
}

impl Wallet {
    pub fn new(price_provider: Arc<dyn PriceProvider>, valuation: ValuationConfig) -> Self {
        Self {
            ledger: Ledger::new(),
            price_provider,
            valuation,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Handles one text command and renders the reply, or the error, as text.
    pub async fn handle(&mut self, user: UserId, text: &str) -> String {
        info!(user, text, "Received command");
        match self.dispatch(user, text).await {
            Ok(reply) => reply.to_string(),
            Err(e) => {
                warn!(user, text, error = %e, "Command rejected");
                e.to_string()
            }
        }
    }

    pub async fn dispatch(&mut self, user: UserId, text: &str) -> Result<Reply, WalletError> {
        let command: Command = text.parse()?;
        self.execute(user, command).await
    }

    pub async fn execute(&mut self, user: UserId, command: Command) -> Result<Reply, WalletError> {
        let reply = match command {
            Command::Add { currency, amount } => Reply::Confirmation(operation::credit(
                &mut self.ledger,
                user,
                &currency,
                &amount,
            )?),
            Command::Sub { currency, amount } => Reply::Confirmation(operation::debit(
                &mut self.ledger,
                user,
                &currency,
                &amount,
            )?),
            Command::Del { currency } => Reply::Confirmation(operation::delete_currency(
                &mut self.ledger,
                user,
                &currency,
            )),
            Command::Show => Reply::Report(
                valuation::value_account(
                    self.ledger.get(user),
                    self.price_provider.as_ref(),
                    &self.valuation,
                )
                .await?,
            ),
        };
        Ok(reply)
    }
}
