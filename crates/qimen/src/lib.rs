//! Qimen Dunjia chart domain.
//!
//! This crate maps a civil instant to a Qimen Dunjia chart (four sexagenary
//! pillars, a Yin or Yang board, a ju number, and stars, gates and optional
//! deities flown onto the nine palaces) and renders charts as prompts for a
//! text-completion provider. It also defines the identifiers, value types,
//! errors and port traits shared by the infrastructure crates.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** Chart generation is pure and
//! synchronous: no I/O, no shared state, loops bounded by 9 or 24 steps.
//! Infrastructure crates implement the ports; they never add chart rules.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`julian`] | Julian Day Numbers for civil dates |
//! | [`sexagenary`] | Heavenly stems, earthly branches, [`Pillar`] |
//! | [`solar_term`] | The 24 fixed-boundary solar terms |
//! | [`pillars`] | Year/month/day/hour pillar calculator |
//! | [`board`] | Board polarity, decan and ju selection |
//! | [`symbols`] | Stars, gates, deities |
//! | [`palace`] | Palaces, [`PalaceMap`], the flying walk |
//! | [`chart`] | Chart assembly |
//! | [`prompt`] | Chart-to-prompt formatting |
//! | [`ports`] | [`Clock`], [`PointsLedger`], [`TextCompleter`] |
//! | [`clock`] | Clock implementations and instant parsing |
//! | [`identifiers`] | Newtype identifiers (`UserId`, `Email`, ...) |
//! | [`types`] | Value types (`Points`, `CivilInstant`) |
//! | [`errors`] | Error and retry-policy types |

pub mod board;
pub mod chart;
pub mod clock;
pub mod errors;
pub mod identifiers;
pub mod julian;
pub mod palace;
pub mod pillars;
pub mod ports;
pub mod prompt;
pub mod sexagenary;
pub mod solar_term;
pub mod symbols;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use board::{board_and_ju, BoardReading, BoardType, Decan, Ju};
pub use chart::{generate_chart, generate_chart_with, Chart, ChartOptions, PalaceCell};
pub use clock::{
    localize_birth, parse_birth_instant, parse_civil_instant, parse_time_zone, parse_utc_offset,
    FixedClock, ZoneClock,
};
pub use errors::{CompletionError, LedgerError, QimenError, RetryPolicy};
pub use identifiers::{Email, ModelName, UserId};
pub use palace::{fly_items, fly_items_skipping_center, flight_path, Palace, PalaceMap, PALACES};
pub use pillars::{compute_pillars, Pillars};
pub use ports::{Clock, PointsLedger, TextCompleter};
pub use prompt::chart_to_prompt;
pub use sexagenary::{EarthlyBranch, HeavenlyStem, Pillar};
pub use solar_term::{solar_term_index, SolarTerm};
pub use symbols::{Deity, Gate, Star, EIGHT_DEITIES, EIGHT_GATES, NINE_STARS};
pub use types::{CivilInstant, Points};
