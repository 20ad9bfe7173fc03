//! Typed identifier for persisted accounts.
//!
//! Ids are assigned by the store on insert, so there is no way to mint one
//! from inside the domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for an [`Account`](crate::account::Account).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    /// Wrap a raw id handed out by the store.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the inner integer.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The text is not the decimal form of an account id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid account id {0:?}")]
pub struct ParseAccountIdError(String);

/// Only the form [`Display`](fmt::Display) produces is accepted, so `+5`,
/// `007` and `-0` do not alias existing ids.
impl FromStr for AccountId {
    type Err = ParseAccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .ok()
            .filter(|raw| raw.to_string() == s)
            .map(Self)
            .ok_or_else(|| ParseAccountIdError(s.to_string()))
    }
}
