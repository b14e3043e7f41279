//! Clocks and instant parsing.
//!
//! Readings are cast in one reference time zone (by default
//! `America/Los_Angeles`, so daylight saving time applies). Birth times given
//! without an offset are taken as wall-clock time in that zone; times with an
//! explicit offset are converted into it.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::ports::Clock;
use crate::{CivilInstant, QimenError};

/// Reads the system clock and reports civil time in a reference zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneClock {
    zone: Tz,
}

impl ZoneClock {
    /// A clock reporting civil time in `zone`.
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// The reference zone.
    pub fn zone(&self) -> Tz {
        self.zone
    }
}

impl Clock for ZoneClock {
    fn now(&self) -> CivilInstant {
        CivilInstant::in_zone(Utc::now(), &self.zone)
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(CivilInstant);

impl FixedClock {
    pub fn new(instant: CivilInstant) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> CivilInstant {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn invalid(input: &str, reason: impl Into<String>) -> QimenError {
    QimenError::InvalidInstant {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// Parses an IANA zone name such as `America/Los_Angeles`.
pub fn parse_time_zone(input: &str) -> Result<Tz, QimenError> {
    let s = input.trim();
    s.parse::<Tz>()
        .map_err(|e| invalid(input, format!("unknown time zone: {e}")))
}

/// Parses a UTC offset: `Z`, `UTC`, `±HH`, `±HHMM` or `±HH:MM`.
pub fn parse_utc_offset(input: &str) -> Result<FixedOffset, QimenError> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| invalid(input, "offset out of range"));
    }
    if !s.is_ascii() {
        return Err(invalid(input, "offset must be ASCII"));
    }
    let sign = match s.as_bytes().first() {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => return Err(invalid(input, "offset must start with '+' or '-'")),
    };
    let rest = &s[1..];
    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours
        .parse()
        .map_err(|_| invalid(input, "offset hours are not a number"))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| invalid(input, "offset minutes are not a number"))?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid(input, "offset out of range"));
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| invalid(input, "offset out of range"))
}

fn parse_time(input: &str) -> Result<NaiveTime, QimenError> {
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|e| invalid(input, e.to_string()))
}

/// Splits an optional trailing offset (`Z` or `±HH:MM`) off a time string.
fn split_offset(input: &str) -> Result<(&str, Option<FixedOffset>), QimenError> {
    if let Some(time) = input.strip_suffix(['Z', 'z']) {
        return Ok((time, Some(parse_utc_offset("Z")?)));
    }
    match input.rfind(['+', '-']) {
        Some(pos) => {
            let (time, offset) = input.split_at(pos);
            Ok((time, Some(parse_utc_offset(offset)?)))
        }
        None => Ok((input, None)),
    }
}

/// Combines a birth date and time into the civil instant to chart.
///
/// With `source` unset the wall-clock fields are used as-is (they are
/// already civil time in `reference`); otherwise the moment is converted
/// from `source` into `reference`, whose offset on that date may include
/// daylight saving time.
pub fn localize_birth(
    date: NaiveDate,
    time: NaiveTime,
    source: Option<FixedOffset>,
    reference: &Tz,
) -> Option<CivilInstant> {
    let naive = NaiveDateTime::new(date, time);
    match source {
        None => Some(CivilInstant::from_naive(naive)),
        Some(offset) => naive
            .and_local_timezone(offset)
            .earliest()
            .map(|dt| CivilInstant::in_zone(dt.with_timezone(&Utc), reference)),
    }
}

/// Parses `YYYY-MM-DD` and `HH:MM[:SS][Z|±HH:MM]` into a birth instant in
/// the `reference` zone. Space between the time and its offset is allowed.
pub fn parse_birth_instant(
    date: &str,
    time: &str,
    reference: &Tz,
) -> Result<CivilInstant, QimenError> {
    let date_part = date.trim();
    let time_part = time.trim();
    let parsed_date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| invalid(date_part, e.to_string()))?;
    let (clock_part, source) = split_offset(time_part)?;
    let parsed_time = parse_time(clock_part.trim())?;
    localize_birth(parsed_date, parsed_time, source, reference)
        .ok_or_else(|| invalid(time_part, "instant out of range"))
}

/// Parses a civil instant such as `2024-03-01 09:30` or
/// `2024-03-01T09:30:15`.
pub fn parse_civil_instant(input: &str) -> Result<CivilInstant, QimenError> {
    let s = input.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(CivilInstant::from_naive)
        .ok_or_else(|| invalid(s, "expected YYYY-MM-DD HH:MM[:SS]"))
}
