//! Obstacle, power-up and decoration spawning
//!
//! Obstacle types come from an ordered table of score bands; spacing between
//! obstacles is derived from the jump kinematics so every obstacle can be
//! cleared at the current scroll speed.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::environment::Environment;
use super::kinematics::JumpKinematics;
use super::state::{Decoration, DecorationKind, Obstacle, ObstacleKind, Powerup, PowerupKind};
use crate::consts::*;

/// Obstacle odds that apply once the score passes a threshold
#[derive(Debug, Clone, Copy)]
pub struct SpawnBand {
    /// Band applies when score is strictly greater than this
    pub above_score: u64,
    /// (probability, kind) pairs; whatever is left over spawns `Easy`
    pub odds: &'static [(f32, ObstacleKind)],
}

/// Score bands, highest threshold first. The first band the score passes wins.
pub const OBSTACLE_BANDS: &[SpawnBand] = &[
    SpawnBand {
        above_score: 2500,
        odds: &[
            (0.08, ObstacleKind::Bird),
            (0.08, ObstacleKind::Cow),
            (0.08, ObstacleKind::House),
            (0.08, ObstacleKind::Cactus),
            (0.08, ObstacleKind::Spike),
        ],
    },
    SpawnBand {
        above_score: 1500,
        odds: &[
            (0.12, ObstacleKind::Bird),
            (0.10, ObstacleKind::Cow),
            (0.10, ObstacleKind::Cactus),
            (0.08, ObstacleKind::Spike),
        ],
    },
    SpawnBand {
        above_score: 800,
        odds: &[
            (0.15, ObstacleKind::Bird),
            (0.10, ObstacleKind::Cactus),
            (0.10, ObstacleKind::Spike),
        ],
    },
    SpawnBand {
        above_score: 300,
        odds: &[(0.15, ObstacleKind::Cactus), (0.10, ObstacleKind::Spike)],
    },
];

/// Band in effect for a score (None below the first threshold)
pub fn band_for_score(score: u64) -> Option<&'static SpawnBand> {
    OBSTACLE_BANDS.iter().find(|band| score > band.above_score)
}

/// Pick the kind for a uniform draw `roll` in [0, 1)
pub fn kind_for_roll(score: u64, roll: f32) -> ObstacleKind {
    let Some(band) = band_for_score(score) else {
        return ObstacleKind::Easy;
    };
    let mut cumulative = 0.0;
    for &(chance, kind) in band.odds {
        cumulative += chance;
        if roll < cumulative {
            return kind;
        }
    }
    ObstacleKind::Easy
}

/// Draw an obstacle kind for the current score
pub fn choose_obstacle_kind<R: Rng + ?Sized>(score: u64, rng: &mut R) -> ObstacleKind {
    if band_for_score(score).is_none() {
        return ObstacleKind::Easy;
    }
    kind_for_roll(score, rng.random::<f32>())
}

/// Minimum ticks before the next obstacle so the one just placed is jumpable
///
/// Distance covered during a full jump, plus the obstacle itself, plus room
/// to land, converted to ticks at the current speed.
pub fn min_spawn_gap(kinematics: &JumpKinematics, scroll_speed: f32, obstacle_width: f32) -> i32 {
    let jump_distance = kinematics.jump_duration * scroll_speed;
    let min_distance = jump_distance + obstacle_width + LANDING_BUFFER;
    (min_distance / scroll_speed.max(MIN_SPEED_DIVISOR)) as i32
}

/// Decides when and what to spawn
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Ticks until the next obstacle (counts down to zero, then spawns)
    pub obstacle_timer: i32,
    pub powerup_timer: i32,
    pub decoration_timer: i32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            obstacle_timer: INITIAL_SPAWN_DELAY,
            powerup_timer: INITIAL_POWERUP_DELAY,
            decoration_timer: 0,
        }
    }

    /// Advance the obstacle timer, spawning at the right edge when it runs out
    pub fn tick_obstacle<R: Rng + ?Sized>(
        &mut self,
        score: u64,
        scroll_speed: f32,
        kinematics: &JumpKinematics,
        rng: &mut R,
    ) -> Option<Obstacle> {
        if self.obstacle_timer > 0 {
            self.obstacle_timer -= 1;
            return None;
        }

        let kind = choose_obstacle_kind(score, rng);
        let obstacle = Obstacle::new(kind, SCREEN_COLS as f32, rng);

        let min_gap = min_spawn_gap(kinematics, scroll_speed, obstacle.width);
        let extra = (min_gap as f32 * rng.random_range(0.1f32..0.5)) as i32;
        self.obstacle_timer = min_gap + extra;

        log::debug!(
            "Spawned {:?} at score {} (next in {} ticks)",
            kind,
            score,
            self.obstacle_timer
        );
        Some(obstacle)
    }

    /// Advance the power-up timer; kind and spacing are independent of score
    pub fn tick_powerup<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Powerup> {
        self.powerup_timer -= 1;
        if self.powerup_timer > 0 {
            return None;
        }

        let kind = *PowerupKind::ALL.choose(rng)?;
        self.powerup_timer = rng.random_range(POWERUP_SPACING_MIN..=POWERUP_SPACING_MAX);
        log::debug!("Spawned {:?} power-up", kind);
        Some(Powerup::new(kind, SCREEN_COLS as f32, rng))
    }

    /// Advance the decoration timer; the environment decides what may appear
    pub fn tick_decoration<R: Rng + ?Sized>(
        &mut self,
        environment: Environment,
        rng: &mut R,
    ) -> Option<Decoration> {
        self.decoration_timer -= 1;
        if self.decoration_timer > 0 {
            return None;
        }

        let kind = *environment.decoration_kinds().choose(rng)?;
        self.decoration_timer = rng.random_range(DECORATION_SPACING_MIN..=DECORATION_SPACING_MAX);
        Some(Decoration::new(kind, DECORATION_SPAWN_X))
    }

    /// Scenery present at the start of a run
    pub fn initial_decorations<R: Rng + ?Sized>(rng: &mut R) -> Vec<Decoration> {
        (0..3)
            .map(|i| {
                let x = (i * 30 + rng.random_range(0..=10)) as f32;
                let kind = if rng.random_bool(0.5) {
                    DecorationKind::Mountain
                } else {
                    DecorationKind::SmallMountain
                };
                Decoration::new(kind, x)
            })
            .collect()
    }
}
