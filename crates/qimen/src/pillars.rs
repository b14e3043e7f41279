//! Year, month, day and hour pillars of a civil instant.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::julian::julian_day_number_of;
use crate::sexagenary::{HeavenlyStem, Pillar};
use crate::solar_term::SolarTerm;
use crate::CivilInstant;

/// Month-stem of the first month (Start of Spring), keyed by
/// `year_stem mod 5`.
const FIRST_MONTH_STEMS: [i64; 5] = [2, 4, 6, 8, 0];

/// The four pillars of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillars {
    /// Turns at Start of Spring, not on Jan 1.
    pub year: Pillar,
    /// Turns at every second solar term, starting from Start of Spring.
    pub month: Pillar,
    /// Cycles with the Julian Day Number.
    pub day: Pillar,
    /// Two-hour branch; 23:00 already belongs to 子.
    pub hour: Pillar,
}

impl Pillars {
    /// Pillars in year, month, day, hour order.
    pub fn as_array(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }
}

/// Computes all four pillars for `instant`.
pub fn compute_pillars(instant: CivilInstant) -> Pillars {
    let date = instant.date();
    let year = year_pillar(date);
    let day = day_pillar(date);
    Pillars {
        year,
        month: month_pillar(SolarTerm::containing(date), year.stem),
        day,
        hour: hour_pillar(instant.hour(), day.stem),
    }
}

/// Day pillar from the Julian Day Number: stem `(JDN + 9) mod 10`, branch
/// `(JDN + 1) mod 12`.
pub fn day_pillar(date: NaiveDate) -> Pillar {
    let jd = julian_day_number_of(date);
    Pillar::from_indices(jd + 9, jd + 1)
}

/// Hour pillar for an hour of the day (0-23).
///
/// Branch 0 spans 23:00-00:59 and each later branch the next two hours.
/// The day stem is not advanced at 23:00.
pub fn hour_pillar(hour: u32, day_stem: HeavenlyStem) -> Pillar {
    let branch = i64::from((hour + 1) / 2 % 12);
    Pillar::from_indices(2 * i64::from(day_stem.index()) + branch, branch)
}

/// Year pillar. The pillar year turns at Start of Spring, so dates before
/// it count toward the previous civil year.
pub fn year_pillar(date: NaiveDate) -> Pillar {
    let pillar_year = if (date.month(), date.day()) < SolarTerm::StartOfSpring.boundary() {
        date.year() - 1
    } else {
        date.year()
    };
    let offset = i64::from(pillar_year) - 4;
    Pillar::from_indices(offset, offset)
}

/// Month pillar: two solar terms per month, month 0 beginning at Start of
/// Spring.
pub fn month_pillar(term: SolarTerm, year_stem: HeavenlyStem) -> Pillar {
    let month_number = (i64::from(term.index()) - 2).div_euclid(2).rem_euclid(12);
    let first = FIRST_MONTH_STEMS[usize::from(year_stem.index() % 5)];
    Pillar::from_indices(first + month_number, month_number + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sexagenary::EarthlyBranch;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn j2000_day_is_wu_wu() {
        assert_eq!(day_pillar(ymd(2000, 1, 1)).label(), "戊午");
    }

    #[test]
    fn hour_branch_boundaries() {
        let stem = HeavenlyStem::Jia;
        assert_eq!(hour_pillar(23, stem).branch, EarthlyBranch::Zi);
        assert_eq!(hour_pillar(0, stem).branch, EarthlyBranch::Zi);
        assert_eq!(hour_pillar(1, stem).branch, EarthlyBranch::Chou);
        assert_eq!(hour_pillar(22, stem).branch, EarthlyBranch::Hai);
    }

    #[test]
    fn hour_stem_follows_day_stem() {
        // Jia day: Zi hour is Jia-Zi; Ji day: Zi hour is Jia-Zi again.
        assert_eq!(hour_pillar(0, HeavenlyStem::Jia).label(), "甲子");
        assert_eq!(hour_pillar(0, HeavenlyStem::Ji).label(), "甲子");
        assert_eq!(hour_pillar(12, HeavenlyStem::Yi).label(), "壬午");
    }

    #[test]
    fn year_turns_at_start_of_spring() {
        assert_eq!(year_pillar(ymd(2024, 2, 3)).label(), "癸卯");
        assert_eq!(year_pillar(ymd(2024, 2, 4)).label(), "甲辰");
        assert_eq!(year_pillar(ymd(1984, 6, 1)).label(), "甲子");
    }

    #[test]
    fn first_month_of_a_jia_year_is_bing_yin() {
        assert_eq!(
            month_pillar(SolarTerm::StartOfSpring, HeavenlyStem::Jia).label(),
            "丙寅"
        );
        assert_eq!(month_pillar(SolarTerm::RainWater, HeavenlyStem::Jia).label(), "丙寅");
        assert_eq!(
            month_pillar(SolarTerm::AwakeningOfInsects, HeavenlyStem::Jia).label(),
            "丁卯"
        );
    }

    #[test]
    fn minor_cold_closes_the_month_cycle() {
        // (0 - 2) div 2 = -1 -> month 11, the Chou month.
        let p = month_pillar(SolarTerm::MinorCold, HeavenlyStem::Gui);
        assert_eq!(p.branch, EarthlyBranch::Chou);
        assert_eq!(p.label(), "乙丑");
    }

    #[test]
    fn compute_pillars_combines_all_four() {
        let p = compute_pillars(CivilInstant::from_ymd_hms(2000, 1, 1, 12, 0, 0).unwrap());
        assert_eq!(p.day.label(), "戊午");
        assert_eq!(p.hour.label(), "戊午");
        assert_eq!(p.year.label(), "己卯");
        assert_eq!(p.as_array().len(), 4);
    }
}
