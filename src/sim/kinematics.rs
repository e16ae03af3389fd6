//! Jump kinematics derived from obstacle geometry
//!
//! The jump is sized so a standing jump clears the tallest obstacle with
//! `JUMP_CLEARANCE_MULTIPLIER` margin. Both the player's jump and the
//! spawner's spacing are computed from the same numbers.

use crate::consts::{GRAVITY, JUMP_CLEARANCE_MULTIPLIER};

use super::state::ObstacleKind;

/// Jump physics derived once from the obstacle set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpKinematics {
    /// Tallest obstacle glyph, in rows
    pub max_obstacle_height: f32,
    /// Apex height of a standing jump, in rows
    pub desired_jump_height: f32,
    /// Downward acceleration (rows/tick²)
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative = upward)
    pub jump_force: f32,
    /// Total airtime of a standing jump, in ticks
    pub jump_duration: f32,
}

impl JumpKinematics {
    /// Resolve kinematics for a set of obstacle heights
    ///
    /// Recompute whenever the obstacle art changes.
    pub fn resolve(obstacle_heights: impl IntoIterator<Item = usize>, gravity: f32) -> Self {
        let max_obstacle_height = obstacle_heights.into_iter().max().unwrap_or(0) as f32;
        let desired_jump_height = max_obstacle_height * JUMP_CLEARANCE_MULTIPLIER;
        let jump_force = -(2.0 * gravity * desired_jump_height).sqrt();
        let jump_duration = 2.0 * (-jump_force / gravity);

        Self {
            max_obstacle_height,
            desired_jump_height,
            gravity,
            jump_force,
            jump_duration,
        }
    }

    /// Kinematics for the built-in obstacle set
    pub fn standard() -> Self {
        Self::resolve(ObstacleKind::ALL.iter().map(|k| k.max_art_height()), GRAVITY)
    }

    /// Apex reached by a jump starting with `velocity` (rows above takeoff)
    pub fn apex_for(&self, velocity: f32) -> f32 {
        velocity * velocity / (2.0 * self.gravity)
    }

    /// Ticks after takeoff until a standing jump first reaches `height` rows
    ///
    /// Heights above the apex resolve to the time of the apex.
    pub fn ticks_to_height(&self, height: f32) -> f32 {
        if self.gravity <= 0.0 {
            return 0.0;
        }
        let launch = -self.jump_force;
        let discriminant = launch * launch - 2.0 * self.gravity * height;
        if discriminant <= 0.0 {
            return launch / self.gravity;
        }
        (launch - discriminant.sqrt()) / self.gravity
    }
}

impl Default for JumpKinematics {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUND_ROW, PLAYER_HEIGHT};

    #[test]
    fn test_standard_kinematics() {
        let kin = JumpKinematics::standard();
        // House is the tallest obstacle at 8 rows
        assert_eq!(kin.max_obstacle_height, 8.0);
        assert!((kin.desired_jump_height - 9.6).abs() < 1e-4);
        assert!(kin.jump_force < 0.0);
        assert!((kin.jump_duration - 2.0 * -kin.jump_force / kin.gravity).abs() < 1e-3);
    }

    #[test]
    fn test_apex_clears_every_obstacle() {
        let kin = JumpKinematics::standard();
        let apex = kin.apex_for(kin.jump_force);
        assert!((apex - kin.desired_jump_height).abs() < 1e-3);
        for kind in ObstacleKind::ALL {
            assert!(apex >= kind.max_art_height() as f32 * JUMP_CLEARANCE_MULTIPLIER - 1e-3);
        }
    }

    #[test]
    fn test_discrete_jump_clears_tallest_obstacle() {
        // Step the same Euler integration the player uses
        let kin = JumpKinematics::standard();
        let start = GROUND_ROW - PLAYER_HEIGHT;
        let mut y = start;
        let mut vel = kin.jump_force;
        let mut highest = y;
        for _ in 0..(kin.jump_duration as usize + 10) {
            vel += kin.gravity;
            y += vel;
            highest = highest.min(y);
        }
        assert!(start - highest >= kin.max_obstacle_height);
    }

    #[test]
    fn test_ticks_to_height() {
        let kin = JumpKinematics::standard();
        assert_eq!(kin.ticks_to_height(0.0), 0.0);
        let apex_time = kin.jump_duration / 2.0;
        assert!((kin.ticks_to_height(kin.desired_jump_height) - apex_time).abs() < 0.5);
        assert!((kin.ticks_to_height(100.0) - apex_time).abs() < 1e-3);
        assert!(kin.ticks_to_height(4.0) < kin.ticks_to_height(8.0));
    }

    #[test]
    fn test_resolve_empty_set() {
        let kin = JumpKinematics::resolve(std::iter::empty(), GRAVITY);
        assert_eq!(kin.jump_force, 0.0);
        assert_eq!(kin.jump_duration, 0.0);
    }
}
