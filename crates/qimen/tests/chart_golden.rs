//! Golden-value tests for chart generation and prompt rendering.
//!
//! Expected charts are fixed reference readings for instants away from the
//! January wrap, where every rule of the generator is exercised once.

use qimen::{
    board_and_ju, chart_to_prompt, generate_chart, BoardType, CivilInstant, Decan, Palace,
    SolarTerm, Star,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> CivilInstant {
    CivilInstant::from_ymd_hms(y, m, d, h, min, 0).expect("valid instant")
}

fn labels(instant: CivilInstant) -> [String; 4] {
    let chart = generate_chart(instant);
    chart.pillars().as_array().map(|p| p.label())
}

#[test]
fn pillars_for_reference_instants() {
    assert_eq!(labels(at(2024, 3, 15, 14, 30)), ["甲辰", "丁卯", "戊寅", "己未"]);
    assert_eq!(labels(at(2023, 8, 30, 23, 15)), ["癸卯", "庚申", "庚申", "丙子"]);
    assert_eq!(labels(at(2024, 12, 25, 10, 0)), ["甲辰", "丙子", "癸亥", "丁巳"]);
    assert_eq!(labels(at(2024, 7, 1, 12, 0)), ["甲辰", "庚午", "丙寅", "甲午"]);
    assert_eq!(labels(at(2024, 8, 1, 15, 0)), ["甲辰", "辛未", "丁酉", "戊申"]);
}

#[test]
fn board_for_reference_instants() {
    let spring = board_and_ju(at(2024, 3, 15, 14, 30));
    assert_eq!(spring.solar_term, SolarTerm::AwakeningOfInsects);
    assert_eq!(spring.board_type, BoardType::Yang);
    assert_eq!(spring.decan, Decan::Upper);
    assert_eq!(spring.ju.get(), 1);

    let heat = board_and_ju(at(2024, 8, 1, 15, 0));
    assert_eq!(heat.solar_term, SolarTerm::MajorHeat);
    assert_eq!(heat.board_type, BoardType::Yin);
    assert_eq!(heat.ju.get(), 1);
}

#[test]
fn yin_ju_one_walks_backwards() {
    let chart = generate_chart(at(2023, 8, 30, 23, 15));
    assert_eq!(chart.board_type(), BoardType::Yin);
    assert_eq!(chart.ju().get(), 1);
    let order = [1, 9, 8, 7, 6, 5, 4, 3, 2];
    for (star, number) in qimen::NINE_STARS.iter().zip(order) {
        let palace = Palace::new(number).expect("palace");
        assert_eq!(chart.palace(palace).star, Some(*star), "palace {number}");
    }
    assert_eq!(chart.palace(Palace::CENTER).star, Some(Star::Xin));
}

#[test]
fn yang_prompt_with_context() {
    let chart = generate_chart(at(2024, 3, 15, 14, 30));
    let prompt = chart_to_prompt(&chart, "  Should I accept the offer? ", Some("Career context."));
    let expected = "\
You are a Qimen Dunjia divination assistant.  Use the provided chart to guide your answer.
Year pillar: 甲辰, Month pillar: 丁卯, Day pillar: 戊寅, Hour pillar: 己未
Board type: Yang dun, Ju: 1
Palaces (position: Gate/Star):
  1: 休/天蓬
  2: 生/天芮
  3: 伤/天冲
  4: 杜/天辅
  5: —/天禽
  6: 景/天心
  7: 死/天柱
  8: 惊/天任
  9: 开/天英
Context:
Career context.
Question:
Should I accept the offer?";
    assert_eq!(prompt, expected);
}

#[test]
fn yin_prompt_without_context() {
    let chart = generate_chart(at(2023, 8, 30, 23, 15));
    let prompt = chart_to_prompt(&chart, "Where is my lost ring?", None);
    let expected = "\
You are a Qimen Dunjia divination assistant.  Use the provided chart to guide your answer.
Year pillar: 癸卯, Month pillar: 庚申, Day pillar: 庚申, Hour pillar: 丙子
Board type: Yin dun, Ju: 1
Palaces (position: Gate/Star):
  1: 休/天蓬
  2: 开/天英
  3: 惊/天任
  4: 死/天柱
  5: —/天心
  6: 景/天禽
  7: 杜/天辅
  8: 伤/天冲
  9: 生/天芮
Question:
Where is my lost ring?";
    assert_eq!(prompt, expected);
}

#[test]
fn prompt_is_byte_stable() {
    let chart = generate_chart(at(2025, 10, 1, 6, 0));
    let a = chart_to_prompt(&chart, "q", Some("c"));
    let b = chart_to_prompt(&generate_chart(at(2025, 10, 1, 6, 0)), "q", Some("c"));
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn chart_serializes_to_json() {
    let chart = generate_chart(at(2024, 3, 15, 14, 30));
    let json = serde_json::to_value(&chart).expect("serialize");
    assert_eq!(json["board"]["board_type"], "yang");
    assert_eq!(json["board"]["ju"], 1);
    assert_eq!(json["palaces"].as_array().map(Vec::len), Some(9));
    assert_eq!(json["palaces"][4]["gate"], serde_json::Value::Null);
}
