//! Shared value types for the Qimen domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants (balances are non-negative, instants are
//! already localised) and participate in domain computations.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

/// A points balance or an amount of points to move in or out of a ledger.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Points(u64);

impl Points {
    /// Creates a [`Points`] value from a raw integer.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` if this amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtracts `rhs`, returning `None` when the result would be negative.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl std::fmt::Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for Points {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Points {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A civil date and wall-clock time whose local offset has already been
/// resolved by the caller.
///
/// The chart core performs no timezone math: everything it derives (pillars,
/// solar term, decan) is a function of the civil fields alone. Wrapping
/// [`NaiveDateTime`] keeps callers from depending on `chrono` types directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CivilInstant(NaiveDateTime);

impl CivilInstant {
    /// Wraps an already-localised [`NaiveDateTime`].
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self(dt)
    }

    /// Builds an instant from calendar fields, returning `None` for
    /// impossible dates or times.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .map(Self)
    }

    /// Converts a UTC instant to the civil time observed in `zone`.
    pub fn in_zone<Z: TimeZone>(utc: DateTime<Utc>, zone: &Z) -> Self {
        Self(utc.with_timezone(zone).naive_local())
    }

    /// Returns the civil date.
    pub fn date(self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the civil year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the civil month (1-12).
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Returns the day of the month (1-31).
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Returns the hour of the day (0-23).
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    /// Returns the underlying [`NaiveDateTime`].
    pub fn as_naive(self) -> NaiveDateTime {
        self.0
    }
}

impl std::fmt::Display for CivilInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}
