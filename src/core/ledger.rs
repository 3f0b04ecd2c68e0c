//! In-memory per-user balances.
use std::collections::{BTreeMap, HashMap};

/// Opaque identity of a user, e.g. a chat id.
pub type UserId = i64;

/// A single user's balances keyed by currency code.
///
/// Holdings iterate in currency-code order so reports are deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Account {
    balances: BTreeMap<String, f64>,
}

impl Account {
    /// Balance for `currency`, `0.0` when the currency was never touched.
    pub fn balance(&self, currency: &str) -> f64 {
        self.balances.get(currency).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.balances.contains_key(currency)
    }

    pub(crate) fn set_balance(&mut self, currency: &str, balance: f64) {
        self.balances.insert(currency.to_string(), balance);
    }

    pub(crate) fn remove(&mut self, currency: &str) -> Option<f64> {
        self.balances.remove(currency)
    }

    pub fn holdings(&self) -> impl Iterator<Item = (&str, f64)> {
        self.balances.iter().map(|(c, b)| (c.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

/// All accounts, at most one per user. Accounts are only ever created,
/// never removed, for the lifetime of the process.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<UserId, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: UserId) -> Option<&Account> {
        self.accounts.get(&user)
    }

    pub(crate) fn get_mut(&mut self, user: UserId) -> Option<&mut Account> {
        self.accounts.get_mut(&user)
    }

    /// Returns the user's account, registering an empty one first if needed.
    pub fn get_or_create(&mut self, user: UserId) -> &mut Account {
        self.accounts.entry(user).or_default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
