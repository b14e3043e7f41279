//! Chart-to-prompt rendering.
//!
//! The output is a pure function of its inputs: no timestamps or other
//! ambient values are embedded, so equal inputs always produce equal bytes.

use crate::chart::Chart;

const PREAMBLE: &str =
    "You are a Qimen Dunjia divination assistant.  Use the provided chart to guide your answer.";

/// Stands in for an empty palace slot.
pub const EMPTY_SLOT: &str = "—";

/// Renders `chart`, an optional context block and the trimmed `question` as
/// a line-oriented prompt.
///
/// ```text
/// You are a Qimen Dunjia divination assistant.  Use the provided chart to guide your answer.
/// Year pillar: 甲辰, Month pillar: 丙子, Day pillar: 戊午, Hour pillar: 丁巳
/// Board type: Yang dun, Ju: 1
/// Palaces (position: Gate/Star):
///   1: 休/天蓬
///   ...
/// Question:
/// What should I focus on?
/// ```
///
/// Palaces are listed 1 through 9. Charts cast with deities add a third
/// `/Deity` column. An empty or absent `context` omits the context block.
pub fn chart_to_prompt(chart: &Chart, question: &str, context: Option<&str>) -> String {
    let pillars = chart.pillars();
    let mut lines: Vec<String> = Vec::with_capacity(16);

    lines.push(PREAMBLE.to_string());
    lines.push(format!(
        "Year pillar: {}, Month pillar: {}, Day pillar: {}, Hour pillar: {}",
        pillars.year, pillars.month, pillars.day, pillars.hour
    ));
    lines.push(format!(
        "Board type: {} dun, Ju: {}",
        chart.board_type(),
        chart.ju()
    ));

    if chart.deities_included() {
        lines.push("Palaces (position: Gate/Star/Deity):".to_string());
    } else {
        lines.push("Palaces (position: Gate/Star):".to_string());
    }
    for cell in chart.palaces() {
        let gate = cell.gate.map_or(EMPTY_SLOT, |g| g.glyph());
        let star = cell.star.map_or(EMPTY_SLOT, |s| s.glyph());
        if chart.deities_included() {
            let deity = cell.deity.map_or(EMPTY_SLOT, |d| d.glyph());
            lines.push(format!("  {}: {gate}/{star}/{deity}", cell.palace));
        } else {
            lines.push(format!("  {}: {gate}/{star}", cell.palace));
        }
    }

    if let Some(context) = context.filter(|c| !c.is_empty()) {
        lines.push("Context:".to_string());
        lines.push(context.to_string());
    }

    lines.push("Question:".to_string());
    lines.push(question.trim().to_string());
    lines.join("\n")
}
