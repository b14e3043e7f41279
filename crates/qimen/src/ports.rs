//! Port traits for the collaborators a reading depends on.
//!
//! The chart core never calls these; the `readings` crate sequences them.
//! Infrastructure crates (`ledger`, `llm`) provide the implementations, and
//! this crate supplies the clocks (see [`crate::clock`]).

use async_trait::async_trait;

use crate::{CivilInstant, CompletionError, LedgerError, Points, UserId};

/// Supplies the civil instant to chart, already localised to the reference
/// offset.
pub trait Clock: Send + Sync {
    /// The current civil date and time.
    fn now(&self) -> CivilInstant;
}

/// A per-user points balance.
///
/// Every operation fails with [`LedgerError::UserNotFound`] for an unknown
/// user. Debits and credits of zero fail with [`LedgerError::InvalidAmount`].
pub trait PointsLedger: Send + Sync {
    /// Current balance of `user`.
    fn balance(&self, user: &UserId) -> Result<Points, LedgerError>;

    /// Removes `amount` from `user`'s balance and returns the new balance.
    ///
    /// Fails with [`LedgerError::InsufficientPoints`], leaving the balance
    /// unchanged, when the balance is smaller than `amount`.
    fn debit(&self, user: &UserId, amount: Points) -> Result<Points, LedgerError>;

    /// Adds `amount` to `user`'s balance and returns the new balance.
    fn credit(&self, user: &UserId, amount: Points) -> Result<Points, LedgerError>;
}

/// Turns a prompt into a response text.
#[async_trait]
pub trait TextCompleter: Send + Sync {
    /// Submits `prompt` and returns the provider's answer.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
