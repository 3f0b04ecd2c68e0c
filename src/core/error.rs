//! Errors surfaced to the user while handling a single command.

use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid amount \"{input}\": {reason}")]
    InvalidAmount { input: String, reason: String },
    #[error("not enough funds on balance")]
    InsufficientFunds,
    #[error("{reason}")]
    QuoteUnavailable { pair: String, reason: String },
    #[error("unsupported operation")]
    UnsupportedOperation,
    #[error("malformed command, usage: {usage}")]
    MalformedCommand { usage: &'static str },
}

impl WalletError {
    pub(crate) fn invalid_amount(input: &str, err: ParseFloatError) -> Self {
        WalletError::InvalidAmount {
            input: input.to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn quote_unavailable(pair: String, err: &anyhow::Error) -> Self {
        WalletError::QuoteUnavailable {
            pair,
            reason: err.to_string(),
        }
    }
}
