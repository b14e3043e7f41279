//! Error and retry-policy types for the Qimen domain.
//!
//! Chart generation itself has no error states: every formula is total over
//! real calendar dates. The errors here belong to the edges of a reading:
//! building the instant to chart, the points ledger, and the text-completion
//! provider.
//!
//! [`RetryPolicy`] is a cross-cutting concern: any error type that participates
//! in retry decisions must be able to produce a [`RetryPolicy`].

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Email, Points, UserId};

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// Returned by infrastructure error types to let the reading service decide
/// whether to re-invoke an operation or give up.
///
/// - `Retryable` errors: transport timeouts, rate limits, provider 5xx.
/// - `NonRetryable` errors: rejected requests, empty or malformed responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt. `None` means retry
        /// immediately or apply the caller's own back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried.
    NonRetryable,
}

impl RetryPolicy {
    /// Returns `true` for [`RetryPolicy::Retryable`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }
}

// ---------------------------------------------------------------------------
// Ledger errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`crate::PointsLedger`] implementation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum LedgerError {
    /// No account exists with the given id.
    #[error("User not found: {user}")]
    UserNotFound {
        /// The id that was looked up.
        user: UserId,
    },

    /// A debit asked for more points than the account holds.
    ///
    /// The balance is left untouched.
    #[error("Insufficient points: balance {balance}, requested {requested}")]
    InsufficientPoints {
        /// Balance at the time of the request.
        balance: Points,
        /// Amount that was requested.
        requested: Points,
    },

    /// Debits and credits must move a strictly positive amount.
    #[error("Amount must be positive")]
    InvalidAmount,

    /// Registration was attempted with an address that already has an account.
    #[error("Email is already registered: {email}")]
    EmailAlreadyRegistered {
        /// The duplicate address.
        email: Email,
    },

    /// Registration was attempted with a malformed address.
    #[error("Invalid email address: {value}")]
    InvalidEmail {
        /// The rejected input.
        value: String,
    },

    /// Registration was attempted with a password shorter than the minimum.
    #[error("Password must be at least {min_length} characters")]
    WeakPassword {
        /// Minimum accepted length.
        min_length: usize,
    },

    /// E-mail and password did not match a stored account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The daily sign-in award was already claimed for this civil day.
    #[error("User has already signed in on {day}")]
    AlreadySignedIn {
        /// The civil day of the rejected sign-in.
        day: NaiveDate,
    },

    /// The backing store could not be read or written.
    #[error("Ledger storage error: {message}")]
    Storage {
        /// Description of the underlying failure.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Completion errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`crate::TextCompleter`] implementation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum CompletionError {
    /// The request never produced an HTTP response (connect failure, timeout).
    #[error("Completion transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The provider throttled the request.
    #[error("Completion provider rate limited the request")]
    RateLimited {
        /// Delay requested by the provider via `Retry-After`, when present.
        retry_after: Option<Duration>,
    },

    /// The provider answered with a non-success status.
    #[error("Completion provider returned {status}: {message}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The provider answered successfully but with no usable choice.
    #[error("Completion provider returned no choices")]
    EmptyResponse,

    /// The provider's response body could not be decoded.
    #[error("Malformed completion response: {message}")]
    MalformedResponse {
        /// Decoder error description.
        message: String,
    },
}

impl CompletionError {
    /// Classifies this failure for the caller's retry loop.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Transport { .. } => RetryPolicy::Retryable { after: None },
            Self::RateLimited { retry_after } => RetryPolicy::Retryable {
                after: *retry_after,
            },
            Self::Provider { status, .. } if *status >= 500 => {
                RetryPolicy::Retryable { after: None }
            }
            Self::Provider { .. } | Self::EmptyResponse | Self::MalformedResponse { .. } => {
                RetryPolicy::NonRetryable
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level errors
// ---------------------------------------------------------------------------

/// Errors that stop a reading from being produced.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum QimenError {
    /// The instant to chart could not be constructed from user input.
    #[error("Invalid date/time '{input}': {reason}")]
    InvalidInstant {
        /// The raw input that was rejected.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A reading was requested with a blank question.
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// The runtime configuration is invalid.
    ///
    /// Produced at load time; no reading is attempted with an invalid config.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The points ledger refused or failed an operation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The text-completion provider failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}
