//! The 24 solar terms on fixed civil-calendar boundaries.
//!
//! Boundaries are the average start dates of each term and repeat unchanged
//! every year. True astronomical terms drift by up to a day around these
//! dates; charts near a boundary inherit that approximation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::julian::julian_day_number;

/// The 24 solar terms, in calendar order starting at Minor Cold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SolarTerm {
    MinorCold,
    MajorCold,
    StartOfSpring,
    RainWater,
    AwakeningOfInsects,
    SpringEquinox,
    ClearAndBright,
    GrainRain,
    StartOfSummer,
    GrainBuds,
    GrainInEar,
    SummerSolstice,
    MinorHeat,
    MajorHeat,
    StartOfAutumn,
    EndOfHeat,
    WhiteDew,
    AutumnEquinox,
    ColdDew,
    FrostsDescent,
    StartOfWinter,
    MinorSnow,
    MajorSnow,
    WinterSolstice,
}

/// All 24 terms in order (index 0 = Minor Cold).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::MinorCold,
    SolarTerm::MajorCold,
    SolarTerm::StartOfSpring,
    SolarTerm::RainWater,
    SolarTerm::AwakeningOfInsects,
    SolarTerm::SpringEquinox,
    SolarTerm::ClearAndBright,
    SolarTerm::GrainRain,
    SolarTerm::StartOfSummer,
    SolarTerm::GrainBuds,
    SolarTerm::GrainInEar,
    SolarTerm::SummerSolstice,
    SolarTerm::MinorHeat,
    SolarTerm::MajorHeat,
    SolarTerm::StartOfAutumn,
    SolarTerm::EndOfHeat,
    SolarTerm::WhiteDew,
    SolarTerm::AutumnEquinox,
    SolarTerm::ColdDew,
    SolarTerm::FrostsDescent,
    SolarTerm::StartOfWinter,
    SolarTerm::MinorSnow,
    SolarTerm::MajorSnow,
    SolarTerm::WinterSolstice,
];

/// (month, day) on which each term starts, indexed like [`ALL_SOLAR_TERMS`].
pub const SOLAR_TERM_BOUNDARIES: [(u32, u32); 24] = [
    (1, 6),
    (1, 20),
    (2, 4),
    (2, 19),
    (3, 6),
    (3, 21),
    (4, 5),
    (4, 20),
    (5, 5),
    (5, 21),
    (6, 6),
    (6, 21),
    (7, 7),
    (7, 22),
    (8, 7),
    (8, 23),
    (9, 7),
    (9, 23),
    (10, 8),
    (10, 23),
    (11, 7),
    (11, 22),
    (12, 7),
    (12, 22),
];

const SOLAR_TERM_NAMES: [&str; 24] = [
    "Minor Cold",
    "Major Cold",
    "Start of Spring",
    "Rain Water",
    "Awakening of Insects",
    "Spring Equinox",
    "Clear and Bright",
    "Grain Rain",
    "Start of Summer",
    "Grain Buds",
    "Grain in Ear",
    "Summer Solstice",
    "Minor Heat",
    "Major Heat",
    "Start of Autumn",
    "End of Heat",
    "White Dew",
    "Autumn Equinox",
    "Cold Dew",
    "Frost's Descent",
    "Start of Winter",
    "Minor Snow",
    "Major Snow",
    "Winter Solstice",
];

const SOLAR_TERM_GLYPHS: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

impl SolarTerm {
    /// Term at `index`, wrapping onto the 24-cycle.
    pub fn from_index(index: i64) -> Self {
        ALL_SOLAR_TERMS[index.rem_euclid(24) as usize]
    }

    /// 0-based index (Minor Cold=0 .. Winter Solstice=23).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// English name.
    pub fn name(self) -> &'static str {
        SOLAR_TERM_NAMES[self.index() as usize]
    }

    /// Chinese name.
    pub fn glyph(self) -> &'static str {
        SOLAR_TERM_GLYPHS[self.index() as usize]
    }

    /// (month, day) on which the term starts each year.
    pub fn boundary(self) -> (u32, u32) {
        SOLAR_TERM_BOUNDARIES[self.index() as usize]
    }

    /// The term in effect on `date`: the last boundary at or before it.
    ///
    /// Dates before Minor Cold (Jan 1-5) belong to the Winter Solstice that
    /// began in the previous December.
    pub fn containing(date: NaiveDate) -> Self {
        let key = (date.month(), date.day());
        SOLAR_TERM_BOUNDARIES
            .iter()
            .rposition(|&boundary| boundary <= key)
            .map_or(SolarTerm::WinterSolstice, |i| ALL_SOLAR_TERMS[i])
    }

    /// Whole days from this term's most recent start up to `date`.
    ///
    /// The start is taken in `date`'s year, or in the previous year when
    /// `date` precedes the boundary (the Jan 1-5 Winter Solstice tail).
    pub fn days_since_start(self, date: NaiveDate) -> i64 {
        let (month, day) = self.boundary();
        let jd = julian_day_number(date.year(), date.month(), date.day());
        let days = jd - julian_day_number(date.year(), month, day);
        if days >= 0 {
            days
        } else {
            jd - julian_day_number(date.year() - 1, month, day)
        }
    }
}

impl std::fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Index in `[0, 24)` of the solar term containing `date`.
pub fn solar_term_index(date: NaiveDate) -> u8 {
    SolarTerm::containing(date).index()
}
