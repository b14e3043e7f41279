//! Qimen reading service.
//!
//! A reading charts an instant, renders the chart and a question into a
//! prompt, charges the querent's points and asks the text completer for an
//! answer. [`ReadingKind`] names the four reading flavours and their fixed
//! questions; [`ReadingService`] runs one reading end to end.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** The service sequences calls between the chart
//! rules in [`qimen`] and the [`qimen::Clock`], [`qimen::PointsLedger`] and
//! [`qimen::TextCompleter`] ports. It contains no chart rules of its own.

mod kind;
mod service;

pub use kind::{CryptoAsset, ParseAssetError, ReadingKind};
pub use service::{ReadingOutcome, ReadingService, ReadingSettings};
