use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;
use qimen::pillars::{day_pillar, hour_pillar};
use qimen::{
    fly_items, fly_items_skipping_center, generate_chart, solar_term_index, BoardType,
    CivilInstant, EarthlyBranch, Ju, Palace, SolarTerm, EIGHT_GATES, NINE_STARS,
};

fn board() -> impl Strategy<Value = BoardType> {
    prop_oneof![Just(BoardType::Yang), Just(BoardType::Yin)]
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2200, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("day <= 28 is valid"))
}

fn instant() -> impl Strategy<Value = CivilInstant> {
    (date(), 0u32..24, 0u32..60).prop_map(|(d, h, m)| {
        CivilInstant::from_naive(d.and_hms_opt(h, m, 0).expect("valid time"))
    })
}

proptest! {
    #[test]
    fn stars_form_a_bijection_onto_palaces(board in board(), ju in 1u8..=9) {
        let map = fly_items(board, Ju::new(ju).unwrap(), NINE_STARS);
        let placed: HashSet<_> = map.occupied().map(|(_, s)| *s).collect();
        prop_assert_eq!(map.len(), 9);
        prop_assert_eq!(placed.len(), 9);
    }

    #[test]
    fn gates_fill_eight_outer_palaces(board in board(), ju in 1u8..=9) {
        let map = fly_items_skipping_center(board, Ju::new(ju).unwrap(), EIGHT_GATES);
        let palaces: HashSet<Palace> = map.occupied().map(|(p, _)| p).collect();
        prop_assert_eq!(palaces.len(), 8);
        prop_assert!(!palaces.contains(&Palace::CENTER));
        let gates: HashSet<_> = map.occupied().map(|(_, g)| *g).collect();
        prop_assert_eq!(gates.len(), 8);
    }

    #[test]
    fn every_chart_places_all_stars_and_eight_gates(at in instant()) {
        let chart = generate_chart(at);
        let stars: HashSet<_> = chart.palaces().iter().filter_map(|c| c.star).collect();
        prop_assert_eq!(stars.len(), 9);
        prop_assert_eq!(chart.palaces().iter().filter(|c| c.gate.is_some()).count(), 8);
        prop_assert!(chart.palace(Palace::CENTER).gate.is_none());
    }

    #[test]
    fn board_type_follows_the_solar_term(at in instant()) {
        let chart = generate_chart(at);
        let index = chart.solar_term().index();
        let expected = if (11..23).contains(&index) { BoardType::Yin } else { BoardType::Yang };
        prop_assert_eq!(chart.board_type(), expected);
    }

    #[test]
    fn day_pillar_repeats_every_sixty_days(d in date(), gap in 1u64..400) {
        let later = d.checked_add_days(Days::new(gap)).unwrap();
        let a = day_pillar(d);
        let b = day_pillar(later);
        prop_assert_eq!(a.stem == b.stem, gap % 10 == 0);
        prop_assert_eq!(a.branch == b.branch, gap % 12 == 0);
        prop_assert_eq!(a == b, gap % 60 == 0);
    }

    #[test]
    fn day_pillars_are_canonical(d in date()) {
        prop_assert!(day_pillar(d).is_canonical());
    }
}

#[test]
fn solar_term_is_monotonic_through_each_year() {
    for year in [1999, 2023, 2024, 2100] {
        let mut day = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        let mut previous = solar_term_index(day);
        assert_eq!(previous, 23);
        let mut changes = Vec::new();
        while let Some(next) = day.succ_opt().filter(|d| d.year() == year) {
            let index = solar_term_index(next);
            if index != previous {
                let expected = if previous == 23 { 0 } else { previous + 1 };
                assert_eq!(index, expected, "{next}");
                changes.push(next);
            }
            previous = index;
            day = next;
        }
        // 23 -> 0 on Jan 6, then 0 -> 1 ... 22 -> 23 on Dec 22.
        assert_eq!(changes.len(), 24, "{year}");
        for (change, term) in changes.iter().zip(qimen::solar_term::ALL_SOLAR_TERMS) {
            let (m, d) = term.boundary();
            assert_eq!(*change, NaiveDate::from_ymd_opt(year, m, d).unwrap());
        }
        assert_eq!(SolarTerm::containing(day), SolarTerm::WinterSolstice);
    }
}

#[test]
fn zi_hour_spans_midnight() {
    for stem in qimen::sexagenary::ALL_STEMS {
        let late = hour_pillar(23, stem);
        let early = hour_pillar(0, stem);
        assert_eq!(late.branch, EarthlyBranch::Zi);
        assert_eq!(early.branch, EarthlyBranch::Zi);
        assert_eq!(late, early);
    }
    let late = generate_chart(CivilInstant::from_ymd_hms(2024, 5, 1, 23, 0, 0).unwrap());
    let early = generate_chart(CivilInstant::from_ymd_hms(2024, 5, 1, 0, 30, 0).unwrap());
    assert_eq!(late.pillars().hour.branch, EarthlyBranch::Zi);
    assert_eq!(early.pillars().hour.branch, EarthlyBranch::Zi);
    assert_eq!(late.pillars().day, early.pillars().day);
}
