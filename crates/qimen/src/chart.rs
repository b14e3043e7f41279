//! Chart assembly.
//!
//! [`generate_chart`] runs the pillar calculator, board selector and palace
//! flyer for one instant and freezes the result into a [`Chart`]. A chart is
//! a value: it exposes no mutators and is discarded after its prompt is built.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::{board_and_ju, BoardReading, BoardType, Decan, Ju};
use crate::palace::{fly_items, fly_items_skipping_center, Palace, PALACES};
use crate::pillars::{compute_pillars, Pillars};
use crate::solar_term::SolarTerm;
use crate::symbols::{Deity, Gate, Star, EIGHT_DEITIES, EIGHT_GATES, NINE_STARS};
use crate::CivilInstant;

/// Optional parts of a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Fly the eight deities alongside the gates.
    pub include_deities: bool,
}

/// What one palace holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PalaceCell {
    pub palace: Palace,
    /// Every palace holds a star.
    pub star: Option<Star>,
    /// Always `None` for the centre palace.
    pub gate: Option<Gate>,
    /// `None` for the centre palace and for charts built without deities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deity: Option<Deity>,
}

/// An immutable Qimen Dunjia chart.
///
/// Charts serialize for display but are only ever built by
/// [`generate_chart`], so a chart with a gate in the centre palace cannot be
/// read back in from JSON:
///
/// ```compile_fail
/// let chart: qimen::Chart = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    instant: CivilInstant,
    pillars: Pillars,
    board: BoardReading,
    deities_included: bool,
    palaces: [PalaceCell; 9],
}

impl Chart {
    /// The instant the chart was cast for.
    pub fn instant(&self) -> CivilInstant {
        self.instant
    }

    /// Year, month, day and hour pillars.
    pub fn pillars(&self) -> &Pillars {
        &self.pillars
    }

    /// Board metadata (polarity, solar term, decan, ju).
    pub fn board(&self) -> &BoardReading {
        &self.board
    }

    pub fn board_type(&self) -> BoardType {
        self.board.board_type
    }

    pub fn solar_term(&self) -> SolarTerm {
        self.board.solar_term
    }

    pub fn decan(&self) -> Decan {
        self.board.decan
    }

    pub fn ju(&self) -> Ju {
        self.board.ju
    }

    /// Whether deities were flown for this chart.
    pub fn deities_included(&self) -> bool {
        self.deities_included
    }

    /// All nine palaces in ascending number order.
    pub fn palaces(&self) -> &[PalaceCell; 9] {
        &self.palaces
    }

    /// Contents of one palace.
    pub fn palace(&self, palace: Palace) -> &PalaceCell {
        &self.palaces[usize::from(palace.number() - 1)]
    }
}

/// Casts a chart for `instant` with stars and gates only.
pub fn generate_chart(instant: CivilInstant) -> Chart {
    generate_chart_with(instant, ChartOptions::default())
}

/// Casts a chart for `instant`.
#[instrument(level = "debug", skip_all, fields(instant = %instant))]
pub fn generate_chart_with(instant: CivilInstant, options: ChartOptions) -> Chart {
    let pillars = compute_pillars(instant);
    for (unit, pillar) in ["year", "month", "day", "hour"].iter().zip(pillars.as_array()) {
        if !pillar.is_canonical() {
            debug!(unit = *unit, pillar = %pillar, "pillar is outside the 60-combination cycle");
        }
    }

    let board = board_and_ju(instant);
    let stars = fly_items(board.board_type, board.ju, NINE_STARS);
    let gates = fly_items_skipping_center(board.board_type, board.ju, EIGHT_GATES);
    let deities = options
        .include_deities
        .then(|| fly_items_skipping_center(board.board_type, board.ju, EIGHT_DEITIES));

    let palaces = PALACES.map(|palace| PalaceCell {
        palace,
        star: stars.get(palace).copied(),
        gate: gates.get(palace).copied(),
        deity: deities.as_ref().and_then(|d| d.get(palace).copied()),
    });

    debug!(
        board = %board.board_type,
        term = %board.solar_term,
        ju = board.ju.get(),
        "chart assembled"
    );

    Chart {
        instant,
        pillars,
        board,
        deities_included: options.include_deities,
        palaces,
    }
}
