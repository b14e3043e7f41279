//! Plain-text chart rendering for the terminal.

use qimen::{Chart, PalaceCell, PALACES};

/// Palace numbers in their Lo Shu square positions, south at the top.
const LO_SHU_ROWS: [[u8; 3]; 3] = [[4, 9, 2], [3, 5, 7], [8, 1, 6]];

const EMPTY: &str = "—";

fn cell_text(cell: &PalaceCell, with_deity: bool) -> String {
    let star = cell.star.map_or(EMPTY, |s| s.glyph());
    let gate = cell.gate.map_or(EMPTY, |g| g.glyph());
    if with_deity {
        let deity = cell.deity.map_or(EMPTY, |d| d.glyph());
        format!("{} {gate} {star} {deity}", cell.palace)
    } else {
        format!("{} {gate} {star}", cell.palace)
    }
}

/// Header lines followed by the nine palaces laid out as the Lo Shu square.
pub fn render_chart(chart: &Chart) -> String {
    let pillars = chart
        .pillars()
        .as_array()
        .map(|p| p.label())
        .join(" ");
    let term = chart.solar_term();
    let mut out = format!(
        "Instant: {}\nPillars: {pillars}\nSolar term: {} {} ({:?} decan)\nBoard: {} dun, Ju: {}\n",
        chart.instant(),
        term.name(),
        term.glyph(),
        chart.decan(),
        chart.board_type(),
        chart.ju(),
    );

    let with_deity = chart.deities_included();
    let cells: Vec<String> = PALACES
        .iter()
        .map(|p| cell_text(chart.palace(*p), with_deity))
        .collect();
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);

    for row in LO_SHU_ROWS {
        let line: Vec<String> = row
            .iter()
            .map(|n| {
                let text = &cells[usize::from(*n) - 1];
                let pad = width - text.chars().count();
                format!("{text}{}", " ".repeat(pad))
            })
            .collect();
        out.push_str(&format!("  {}\n", line.join(" | ")));
    }
    out
}
