//! Balance mutations applied to a single (user, currency) pair.
use crate::core::error::WalletError;
use crate::core::ledger::{Ledger, UserId};
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Credit,
    Debit,
}

impl Mutation {
    fn apply(self, balance: f64, amount: f64) -> Result<f64, WalletError> {
        match self {
            Mutation::Credit => Ok(balance + amount),
            Mutation::Debit => {
                if balance < amount {
                    return Err(WalletError::InsufficientFunds);
                }
                Ok(balance - amount)
            }
        }
    }
}

/// Successful outcome of a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Balance { currency: String, balance: f64 },
    Deleted { currency: String },
}

impl Display for Confirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confirmation::Balance { currency, balance } => {
                write!(f, "Balance: {currency} {balance:.6}")
            }
            Confirmation::Deleted { .. } => write!(f, "currency deleted"),
        }
    }
}

/// Parses a base-10 amount. Non-finite values are rejected.
pub fn parse_amount(text: &str) -> Result<f64, WalletError> {
    let amount: f64 = text
        .parse()
        .map_err(|e| WalletError::invalid_amount(text, e))?;
    if !amount.is_finite() {
        return Err(WalletError::InvalidAmount {
            input: text.to_string(),
            reason: "amount must be a finite number".to_string(),
        });
    }
    Ok(amount)
}

pub fn credit(
    ledger: &mut Ledger,
    user: UserId,
    currency: &str,
    amount_text: &str,
) -> Result<Confirmation, WalletError> {
    apply(ledger, user, currency, amount_text, Mutation::Credit)
}

pub fn debit(
    ledger: &mut Ledger,
    user: UserId,
    currency: &str,
    amount_text: &str,
) -> Result<Confirmation, WalletError> {
    apply(ledger, user, currency, amount_text, Mutation::Debit)
}

/// Removes `currency` from the user's account. Absent currencies and
/// unknown users are a no-op, and no account is created.
pub fn delete_currency(ledger: &mut Ledger, user: UserId, currency: &str) -> Confirmation {
    let removed = ledger
        .get_mut(user)
        .and_then(|account| account.remove(currency));
    debug!(user, currency, ?removed, "Deleted currency");
    Confirmation::Deleted {
        currency: currency.to_string(),
    }
}

/// Computes the new balance before assigning it, so a rejected mutation
/// leaves the account untouched.
fn apply(
    ledger: &mut Ledger,
    user: UserId,
    currency: &str,
    amount_text: &str,
    mutation: Mutation,
) -> Result<Confirmation, WalletError> {
    let amount = parse_amount(amount_text)?;

    let account = ledger.get_or_create(user);
    let current = account.balance(currency);
    let balance = mutation.apply(current, amount)?;
    if !balance.is_finite() {
        return Err(WalletError::InvalidAmount {
            input: amount_text.to_string(),
            reason: "resulting balance is out of range".to_string(),
        });
    }
    account.set_balance(currency, balance);

    debug!(user, currency, ?mutation, amount, current, balance, "Applied mutation");
    Ok(Confirmation::Balance {
        currency: currency.to_string(),
        balance,
    })
}
