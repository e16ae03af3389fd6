//! Demo-mode pilot
//!
//! Reads the engine state and decides the discrete inputs for the next frame.
//! Used by the headless driver; the engine never calls it.

use super::collision::player_hitbox;
use super::engine::GameEngine;
use super::state::Obstacle;
use crate::consts::{GROUND_ROW, SCREEN_COLS};

/// Extra columns of lead before committing to a jump
const JUMP_MARGIN: f32 = 1.0;

/// Inputs to apply before the next `update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PilotAction {
    pub jump: bool,
    pub fire: bool,
}

impl PilotAction {
    /// Feed the action to the engine
    pub fn apply(self, engine: &mut GameEngine) {
        if self.jump {
            engine.jump();
        }
        if self.fire {
            engine.fire_weapon();
        }
    }
}

/// Decide what to do this frame
pub fn decide(engine: &GameEngine) -> PilotAction {
    if engine.is_game_over() {
        return PilotAction::default();
    }

    let player = &engine.player;
    let hitbox = player_hitbox(player);
    let (lane_top, lane_bottom) = (hitbox.y as f32, hitbox.bottom() as f32);
    let speed = engine.scroll_speed.max(f32::EPSILON);
    let kin = engine.kinematics();

    // Nearest live obstacle in the player's lane that has not yet passed
    let behind = hitbox.x as f32;
    let in_lane = |o: &&Obstacle| o.pos.y < lane_bottom && o.pos.y + o.height > lane_top;
    let threat = engine
        .obstacles
        .iter()
        .filter(|o| o.alive && o.pos.x + o.width > behind)
        .filter(in_lane)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    // Jump so the player's feet are at obstacle height when it arrives
    let jump = player.on_ground
        && !player.in_nirvana()
        && threat.is_some_and(|o| {
            let gap = o.pos.x - hitbox.right() as f32;
            let height = GROUND_ROW - o.pos.y;
            let lead = speed * kin.ticks_to_height(height) + JUMP_MARGIN;
            gap <= lead
        })
        && !flyer_overhead(engine, speed * kin.jump_duration);

    let fire = player.ammo > 0
        && engine.bullets.is_empty()
        && threat.is_some_and(|o| !o.kind.is_flat_top() && o.pos.x < SCREEN_COLS as f32);

    PilotAction { jump, fire }
}

/// A flying obstacle close enough to be hit by a jump starting now
fn flyer_overhead(engine: &GameEngine, reach: f32) -> bool {
    let left = engine.player.pos.x;
    let right = left + engine.player.width + reach;
    engine
        .obstacles
        .iter()
        .filter(|o| o.alive && o.kind.is_flying())
        .any(|o| o.pos.x < right && o.pos.x + o.width > left)
}
