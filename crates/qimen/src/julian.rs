//! Julian Day Numbers for civil dates.
//!
//! The day pillar and every "days since" computation in the chart are taken
//! as differences of Julian Day Numbers, which keeps them total over the
//! proleptic Gregorian calendar with no date-construction failures.

use chrono::{Datelike, NaiveDate};

/// Julian Day Number of a proleptic Gregorian date.
///
/// January and February are counted as months 13 and 14 of the preceding
/// year. The classic `floor(365.25 (y + 4716)) + floor(30.6001 (m + 1))`
/// terms are evaluated in exact integer arithmetic.
///
/// `julian_day_number(2000, 1, 1) == 2_451_545`.
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let mut y = i64::from(year);
    let mut m = i64::from(month);
    if m <= 2 {
        y -= 1;
        m += 12;
    }
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (1461 * (y + 4716)).div_euclid(4) + (306_001 * (m + 1)).div_euclid(10_000) + i64::from(day) + b
        - 1524
}

/// [`julian_day_number`] for a [`NaiveDate`].
pub fn julian_day_number_of(date: NaiveDate) -> i64 {
    julian_day_number(date.year(), date.month(), date.day())
}
