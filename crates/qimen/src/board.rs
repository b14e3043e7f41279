//! Board polarity and ju selection.
//!
//! The half-year from Summer Solstice up to Winter Solstice runs a Yin
//! (reverse) board; the rest of the year runs Yang (forward). Within each
//! solar term the ju is read from the traditional three-yuan tables by which
//! ten-day decan the date falls in.

use serde::{Deserialize, Serialize};

use crate::solar_term::SolarTerm;
use crate::CivilInstant;

/// Ju triples for Yin terms that are not in [`YIN_JU`].
const YIN_FALLBACK: [u8; 3] = [1, 4, 7];

/// Ju triples for Yang terms that are not in [`YANG_JU`].
const YANG_FALLBACK: [u8; 3] = [1, 7, 4];

/// (term index, [upper, middle, lower] ju) for Yin-board terms.
const YIN_JU: [(u8, [u8; 3]); 12] = [
    (11, [9, 3, 6]),
    (12, [8, 2, 5]),
    (13, [7, 1, 4]),
    (14, [2, 5, 8]),
    (15, [1, 4, 7]),
    (16, [9, 3, 6]),
    (17, [7, 1, 4]),
    (18, [6, 9, 3]),
    (19, [5, 8, 2]),
    (20, [6, 9, 3]),
    (21, [5, 8, 2]),
    (22, [4, 7, 1]),
];

/// (term index, [upper, middle, lower] ju) for Yang-board terms.
const YANG_JU: [(u8, [u8; 3]); 12] = [
    (23, [1, 7, 4]),
    (0, [2, 8, 5]),
    (1, [3, 9, 6]),
    (2, [8, 5, 2]),
    (3, [9, 6, 3]),
    (4, [1, 7, 4]),
    (5, [3, 9, 6]),
    (6, [4, 1, 7]),
    (7, [5, 2, 8]),
    (8, [4, 1, 7]),
    (9, [5, 2, 8]),
    (10, [6, 3, 9]),
];

/// Flying direction of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardType {
    /// Forward flying: palace numbers ascend.
    Yang,
    /// Reverse flying: palace numbers descend.
    Yin,
}

impl BoardType {
    /// Board for a solar term: Yin for Summer Solstice through Major Snow.
    pub fn for_term(term: SolarTerm) -> Self {
        if (11..23).contains(&term.index()) {
            Self::Yin
        } else {
            Self::Yang
        }
    }

    /// `"Yin"` or `"Yang"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yang => "Yang",
            Self::Yin => "Yin",
        }
    }
}

impl std::fmt::Display for BoardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which ten-day third of a solar term a date falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decan {
    /// Days 0-9 of the term (上元).
    Upper,
    /// Days 10-19 (中元).
    Middle,
    /// Day 20 onward (下元).
    Lower,
}

impl Decan {
    /// Decan for a day offset into the term: `< 10` upper, `< 20` middle,
    /// otherwise lower.
    pub fn from_days(days: i64) -> Self {
        if days < 10 {
            Self::Upper
        } else if days < 20 {
            Self::Middle
        } else {
            Self::Lower
        }
    }

    /// 0, 1 or 2.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Starting palace number for flying, always in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Ju(u8);

impl Ju {
    /// Creates a [`Ju`], returning `None` outside `1..=9`.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the ju number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 0-based offset of the starting palace.
    pub(crate) const fn start_offset(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Ju {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("ju must be in 1..=9, got {value}"))
    }
}

impl From<Ju> for u8 {
    fn from(ju: Ju) -> u8 {
        ju.0
    }
}

impl std::fmt::Display for Ju {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board metadata derived from the instant's solar term and decan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardReading {
    /// Yin from Summer Solstice up to Winter Solstice, otherwise Yang.
    pub board_type: BoardType,
    /// Term containing the instant's civil date.
    pub solar_term: SolarTerm,
    /// Ten-day third of `solar_term` the date falls in.
    pub decan: Decan,
    /// Starting palace for flying.
    pub ju: Ju,
}

/// Selects board polarity, solar term, decan and ju for `instant`.
///
/// Jan 1-5 belong to Winter Solstice and count their decan from the previous
/// Dec 22, so they land in the middle decan (2024-01-01 is ju 7). Charts that
/// count those days from Dec 7 instead give the lower decan and ju 4.
pub fn board_and_ju(instant: CivilInstant) -> BoardReading {
    let date = instant.date();
    let solar_term = SolarTerm::containing(date);
    let board_type = BoardType::for_term(solar_term);
    let decan = Decan::from_days(solar_term.days_since_start(date));
    BoardReading {
        board_type,
        solar_term,
        decan,
        ju: ju_for(board_type, solar_term, decan),
    }
}

/// Ju from the Yin or Yang table, falling back to the board's default
/// triple for terms the table does not list.
pub fn ju_for(board_type: BoardType, term: SolarTerm, decan: Decan) -> Ju {
    let (table, fallback) = match board_type {
        BoardType::Yin => (&YIN_JU, YIN_FALLBACK),
        BoardType::Yang => (&YANG_JU, YANG_FALLBACK),
    };
    let triple = table
        .iter()
        .find(|(index, _)| *index == term.index())
        .map_or(fallback, |(_, triple)| *triple);
    // Every table entry lies in 1..=9.
    Ju(triple[decan.index()])
}
