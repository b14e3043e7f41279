//! Heavenly stems, earthly branches and the pillars they form.
//!
//! Stems cycle with period 10 and branches with period 12; a (stem, branch)
//! pair names a year, month, day or hour. Pairs are stored exactly as the
//! pillar formulas produce them. [`Pillar::is_canonical`] reports whether a
//! pair belongs to the traditional 60-combination cycle.

use serde::{Deserialize, Serialize};

/// The ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum HeavenlyStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in cycle order (index 0 = Jia).
pub const ALL_STEMS: [HeavenlyStem; 10] = [
    HeavenlyStem::Jia,
    HeavenlyStem::Yi,
    HeavenlyStem::Bing,
    HeavenlyStem::Ding,
    HeavenlyStem::Wu,
    HeavenlyStem::Ji,
    HeavenlyStem::Geng,
    HeavenlyStem::Xin,
    HeavenlyStem::Ren,
    HeavenlyStem::Gui,
];

const STEM_GLYPHS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl HeavenlyStem {
    /// Stem at `index`, wrapping any integer onto the 10-cycle.
    pub fn from_index(index: i64) -> Self {
        ALL_STEMS[index.rem_euclid(10) as usize]
    }

    /// 0-based index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Chinese glyph.
    pub fn glyph(self) -> &'static str {
        STEM_GLYPHS[self.index() as usize]
    }
}

/// The twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum EarthlyBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in cycle order (index 0 = Zi).
pub const ALL_BRANCHES: [EarthlyBranch; 12] = [
    EarthlyBranch::Zi,
    EarthlyBranch::Chou,
    EarthlyBranch::Yin,
    EarthlyBranch::Mao,
    EarthlyBranch::Chen,
    EarthlyBranch::Si,
    EarthlyBranch::Wu,
    EarthlyBranch::Wei,
    EarthlyBranch::Shen,
    EarthlyBranch::You,
    EarthlyBranch::Xu,
    EarthlyBranch::Hai,
];

const BRANCH_GLYPHS: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

impl EarthlyBranch {
    /// Branch at `index`, wrapping any integer onto the 12-cycle.
    pub fn from_index(index: i64) -> Self {
        ALL_BRANCHES[index.rem_euclid(12) as usize]
    }

    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Chinese glyph.
    pub fn glyph(self) -> &'static str {
        BRANCH_GLYPHS[self.index() as usize]
    }
}

/// A (stem, branch) pair naming one time unit of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    /// Heavenly stem.
    pub stem: HeavenlyStem,
    /// Earthly branch.
    pub branch: EarthlyBranch,
}

impl Pillar {
    /// Builds a pillar from raw indices, wrapping each onto its cycle.
    pub fn from_indices(stem: i64, branch: i64) -> Self {
        Self {
            stem: HeavenlyStem::from_index(stem),
            branch: EarthlyBranch::from_index(branch),
        }
    }

    /// Whether the pair occurs in the 60-combination cycle, i.e. stem and
    /// branch indices share parity.
    pub fn is_canonical(self) -> bool {
        self.stem.index() % 2 == self.branch.index() % 2
    }

    /// Two-glyph label, e.g. `"甲子"`.
    pub fn label(self) -> String {
        format!("{}{}", self.stem.glyph(), self.branch.glyph())
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.glyph(), self.branch.glyph())
    }
}
