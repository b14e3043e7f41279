//! Points ledger infrastructure adapter.
//!
//! Implements the [`qimen::PointsLedger`] trait over a single JSON file and
//! adds the account operations a reading service needs around it:
//! registration, credential checks and the daily sign-in award.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File layout, serialisation and record bookkeeping live
//! here. The [`qimen`] crate sees only [`qimen::PointsLedger`].
//!
//! ## Storage
//!
//! One pretty-printed JSON object keyed by user id:
//!
//! ```json
//! {
//!   "tester": {
//!     "id": "tester",
//!     "email": "tester@example.com",
//!     "password": "secret1",
//!     "points": 30,
//!     "last_signin": "2024-03-15"
//!   }
//! }
//! ```
//!
//! The file is read and rewritten on every operation. It is a development
//! store: passwords are kept as given and concurrent writers are not
//! coordinated.

mod store;

pub use store::{Account, JsonFileLedger, LedgerSettings, MIN_PASSWORD_LENGTH};
