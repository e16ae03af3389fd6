//! Score-driven environments (visual themes)

use serde::{Deserialize, Serialize};

use super::state::DecorationKind;
use crate::color::{self, Rgb};

/// Named visual theme, chosen purely from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Grass,
    Desert,
    Snow,
    Cave,
    Lava,
}

/// Palette and glyph cycles for one environment
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub ground_color: Rgb,
    pub ground_glyphs: &'static [char],
    pub bg_color: Rgb,
    pub bg_glyphs: &'static [char],
    pub fill_color: Rgb,
    pub fill_glyph: char,
}

const GRASS: Theme = Theme {
    ground_color: color::GREEN,
    ground_glyphs: &['#', '=', '"', ','],
    bg_color: Rgb(0, 180, 0),
    bg_glyphs: &['^', 'Y', '*', 'T'],
    fill_color: Rgb(100, 80, 50),
    fill_glyph: '.',
};

const DESERT: Theme = Theme {
    ground_color: color::YELLOW,
    ground_glyphs: &['~', '.', '_', ':'],
    bg_color: Rgb(200, 150, 50),
    bg_glyphs: &['A', 'n', '^', 'o'],
    fill_color: Rgb(180, 130, 40),
    fill_glyph: ':',
};

const SNOW: Theme = Theme {
    ground_color: color::WHITE,
    ground_glyphs: &['*', '.', '~', '_'],
    bg_color: Rgb(200, 200, 220),
    bg_glyphs: &['^', 'A', '*', 'T'],
    fill_color: Rgb(180, 180, 200),
    fill_glyph: '.',
};

const CAVE: Theme = Theme {
    ground_color: Rgb(150, 150, 150),
    ground_glyphs: &['#', '=', '_', '.'],
    bg_color: Rgb(100, 100, 100),
    bg_glyphs: &['^', 'V', '|', 'M'],
    fill_color: Rgb(80, 80, 80),
    fill_glyph: '#',
};

const LAVA: Theme = Theme {
    ground_color: Rgb(200, 50, 0),
    ground_glyphs: &['#', '=', '~', '^'],
    bg_color: Rgb(255, 100, 0),
    bg_glyphs: &['^', 'M', 'W', '~'],
    fill_color: Rgb(150, 30, 0),
    fill_glyph: '.',
};

/// (score below which the environment applies, environment), ascending
const SCORE_BANDS: [(u64, Environment); 4] = [
    (500, Environment::Grass),
    (1200, Environment::Desert),
    (2000, Environment::Snow),
    (3000, Environment::Cave),
];

impl Environment {
    pub fn for_score(score: u64) -> Self {
        SCORE_BANDS
            .iter()
            .find(|(limit, _)| score < *limit)
            .map(|(_, env)| *env)
            .unwrap_or(Environment::Lava)
    }

    pub fn name(self) -> &'static str {
        match self {
            Environment::Grass => "grass",
            Environment::Desert => "desert",
            Environment::Snow => "snow",
            Environment::Cave => "cave",
            Environment::Lava => "lava",
        }
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            Environment::Grass => &GRASS,
            Environment::Desert => &DESERT,
            Environment::Snow => &SNOW,
            Environment::Cave => &CAVE,
            Environment::Lava => &LAVA,
        }
    }

    /// Whether the sky (sun, moon) is visible
    pub fn has_sky(self) -> bool {
        self != Environment::Cave
    }

    pub fn has_snowfall(self) -> bool {
        self == Environment::Snow
    }

    /// Background decorations that may spawn here
    pub fn decoration_kinds(self) -> &'static [DecorationKind] {
        match self {
            Environment::Snow => &[
                DecorationKind::Mountain,
                DecorationKind::SmallMountain,
                DecorationKind::Snowman,
                DecorationKind::SnowDrift,
            ],
            Environment::Desert => &[DecorationKind::SmallMountain],
            _ => &[DecorationKind::Mountain, DecorationKind::SmallMountain],
        }
    }
}
