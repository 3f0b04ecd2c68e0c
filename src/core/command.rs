//! Text command parsing.
use crate::core::error::WalletError;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { currency: String, amount: String },
    Sub { currency: String, amount: String },
    Del { currency: String },
    Show,
}

impl FromStr for Command {
    type Err = WalletError;

    /// Keywords are case-sensitive; currency codes are upper-cased and
    /// amounts are kept as text for the operation to parse. Extra tokens
    /// are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        match tokens.next() {
            Some("ADD") => {
                let (currency, amount) = currency_and_amount(tokens, "ADD <currency> <amount>")?;
                Ok(Command::Add { currency, amount })
            }
            Some("SUB") => {
                let (currency, amount) = currency_and_amount(tokens, "SUB <currency> <amount>")?;
                Ok(Command::Sub { currency, amount })
            }
            Some("DEL") => {
                let usage = "DEL <currency>";
                let currency = tokens
                    .next()
                    .ok_or(WalletError::MalformedCommand { usage })?;
                Ok(Command::Del {
                    currency: currency_code(currency, usage)?,
                })
            }
            Some("SHOW") => Ok(Command::Show),
            _ => Err(WalletError::UnsupportedOperation),
        }
    }
}

fn currency_and_amount<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    usage: &'static str,
) -> Result<(String, String), WalletError> {
    match (tokens.next(), tokens.next()) {
        (Some(currency), Some(amount)) => {
            Ok((currency_code(currency, usage)?, amount.to_string()))
        }
        _ => Err(WalletError::MalformedCommand { usage }),
    }
}

/// Currency codes are ASCII letters and digits only, since they end up in pair symbols.
fn currency_code(token: &str, usage: &'static str) -> Result<String, WalletError> {
    if !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(WalletError::MalformedCommand { usage });
    }
    Ok(token.to_ascii_uppercase())
}
