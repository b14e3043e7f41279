//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for example,
//! a [`UserId`] with an [`Email`] even though both are strings under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or only whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Identifies an account in the points ledger.
    ///
    /// Freshly registered accounts get a random UUID string; the CLI's
    /// default testing account uses the fixed id `"tester"`.
    UserId
}

impl UserId {
    /// Generates a new random account identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

string_id! {
    /// Identifies a chat-completions model (e.g. `"gpt-3.5-turbo"`).
    ModelName
}

// ---------------------------------------------------------------------------

/// An account e-mail address.
///
/// Only the shape is checked: an `@` followed by a domain part that contains
/// a dot. Deliverability is not this type's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parses an address, returning `None` when it lacks the `user@domain.tld`
    /// shape.
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let (local, domain) = v.rsplit_once('@')?;
        if local.is_empty() || !domain.contains('.') {
            return None;
        }
        Some(Self(v))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
