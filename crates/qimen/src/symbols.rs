//! Stars, gates and deities flown onto the palaces, each listed in flying
//! order.

use serde::{Deserialize, Serialize};

/// The nine stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Star {
    Peng,
    Rui,
    Chong,
    Fu,
    Qin,
    Xin,
    Zhu,
    Ren,
    Ying,
}

/// All nine stars in flying order.
pub const NINE_STARS: [Star; 9] = [
    Star::Peng,
    Star::Rui,
    Star::Chong,
    Star::Fu,
    Star::Qin,
    Star::Xin,
    Star::Zhu,
    Star::Ren,
    Star::Ying,
];

const STAR_GLYPHS: [&str; 9] = [
    "天蓬", "天芮", "天冲", "天辅", "天禽", "天心", "天柱", "天任", "天英",
];

impl Star {
    /// Chinese name.
    pub fn glyph(self) -> &'static str {
        STAR_GLYPHS[self as usize]
    }
}

/// The eight gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// 休
    Rest,
    /// 生
    Life,
    /// 伤
    Harm,
    /// 杜
    Delusion,
    /// 景
    Scenery,
    /// 死
    Death,
    /// 惊
    Fear,
    /// 开
    Open,
}

/// All eight gates in flying order.
pub const EIGHT_GATES: [Gate; 8] = [
    Gate::Rest,
    Gate::Life,
    Gate::Harm,
    Gate::Delusion,
    Gate::Scenery,
    Gate::Death,
    Gate::Fear,
    Gate::Open,
];

const GATE_GLYPHS: [&str; 8] = ["休", "生", "伤", "杜", "景", "死", "惊", "开"];

impl Gate {
    /// Chinese name.
    pub fn glyph(self) -> &'static str {
        GATE_GLYPHS[self as usize]
    }
}

/// The eight deities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deity {
    /// 值符
    Chief,
    /// 腾蛇
    Serpent,
    /// 太阴
    Moon,
    /// 六合
    SixHarmony,
    /// 白虎
    WhiteTiger,
    /// 玄武
    BlackTortoise,
    /// 九地
    NineEarth,
    /// 九天
    NineHeaven,
}

/// All eight deities in flying order.
pub const EIGHT_DEITIES: [Deity; 8] = [
    Deity::Chief,
    Deity::Serpent,
    Deity::Moon,
    Deity::SixHarmony,
    Deity::WhiteTiger,
    Deity::BlackTortoise,
    Deity::NineEarth,
    Deity::NineHeaven,
];

const DEITY_GLYPHS: [&str; 8] = ["值符", "腾蛇", "太阴", "六合", "白虎", "玄武", "九地", "九天"];

impl Deity {
    /// Chinese name.
    pub fn glyph(self) -> &'static str {
        DEITY_GLYPHS[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_tables_follow_flying_order() {
        assert_eq!(NINE_STARS.map(Star::glyph)[0], "天蓬");
        assert_eq!(NINE_STARS.map(Star::glyph)[8], "天英");
        assert_eq!(EIGHT_GATES.map(Gate::glyph).concat(), "休生伤杜景死惊开");
        assert_eq!(EIGHT_DEITIES.map(Deity::glyph)[0], "值符");
    }
}
