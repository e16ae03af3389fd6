//! The player character: jump physics, power-up timers and the acid tiers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::kinematics::JumpKinematics;
use super::state::{PlayerSnapshot, PowerupKind};
use crate::art::{self, Art};
use crate::consts::*;

/// Acid effect tier, derived from the remaining acid time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AcidLevel {
    Sober = 0,
    /// Up to 10 seconds left: psychedelic colors
    Buzzed = 1,
    /// Up to 20 seconds left: glyph substitution over the whole frame
    Tripping = 2,
    /// More than 20 seconds left: floating, invincible
    Nirvana = 3,
}

impl AcidLevel {
    /// Tier for a remaining acid time in ticks
    pub fn from_timer(acid_timer: u32) -> Self {
        if acid_timer == 0 {
            return AcidLevel::Sober;
        }
        let secs = acid_timer as f32 / TARGET_FPS as f32;
        if secs <= 10.0 {
            AcidLevel::Buzzed
        } else if secs <= 20.0 {
            AcidLevel::Tripping
        } else {
            AcidLevel::Nirvana
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the collision box
    pub pos: Vec2,
    /// Vertical velocity (negative = upward)
    pub vel_y: f32,
    pub on_ground: bool,
    pub jumps_left: u32,
    /// Remaining jetpack-granted mid-air jumps
    pub jetpack_jumps: u32,
    pub ammo: u32,
    pub has_beans: bool,
    pub beans_timer: u32,
    pub acid_timer: u32,
    pub acid_flash_timer: u32,
    pub nirvana_flash_timer: u32,
    /// Invincibility countdown after nirvana ends
    pub grace_period: u32,
    pub width: f32,
    pub height: f32,
    was_in_nirvana: bool,
    kinematics: JumpKinematics,
}

impl Player {
    pub fn new(kinematics: JumpKinematics) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_ROW - PLAYER_HEIGHT),
            vel_y: 0.0,
            on_ground: true,
            jumps_left: MAX_JUMPS,
            jetpack_jumps: 0,
            ammo: 0,
            has_beans: false,
            beans_timer: 0,
            acid_timer: 0,
            acid_flash_timer: 0,
            nirvana_flash_timer: 0,
            grace_period: 0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            was_in_nirvana: false,
            kinematics,
        }
    }

    pub fn kinematics(&self) -> &JumpKinematics {
        &self.kinematics
    }

    /// Row the top of the player rests at when standing on the ground
    #[inline]
    pub fn ground_y(&self) -> f32 {
        GROUND_ROW - self.height
    }

    pub fn acid_level(&self) -> AcidLevel {
        AcidLevel::from_timer(self.acid_timer)
    }

    pub fn in_nirvana(&self) -> bool {
        self.acid_level() == AcidLevel::Nirvana
    }

    pub fn is_invincible(&self) -> bool {
        self.in_nirvana() || self.grace_period > 0
    }

    /// Art for the current pose: lotus in nirvana, tucked in the air, else running
    pub fn pose(&self, frame: u64) -> Art {
        if self.in_nirvana() {
            art::PLAYER_LOTUS
        } else if !self.on_ground {
            art::PLAYER_JUMP
        } else if (frame / 8) % 2 == 0 {
            art::PLAYER_RUN_1
        } else {
            art::PLAYER_RUN_2
        }
    }

    /// Jump charges restored on landing
    pub fn max_jumps(&self) -> u32 {
        MAX_JUMPS + u32::from(self.jetpack_jumps > 0)
    }

    /// Attempt a jump; returns false (and changes nothing) without charges
    pub fn jump(&mut self) -> bool {
        if self.jumps_left == 0 {
            return false;
        }
        self.vel_y = self.kinematics.jump_force;
        self.jumps_left -= 1;
        self.on_ground = false;
        // Every jump burns fuel while the jetpack has charges
        self.jetpack_jumps = self.jetpack_jumps.saturating_sub(1);
        true
    }

    /// Involuntary hop from the beans; does not spend a charge
    pub fn fart_jump(&mut self) {
        self.vel_y = self.kinematics.jump_force * FART_JUMP_FACTOR;
        self.on_ground = false;
    }

    /// Bounce after landing on a stompable enemy
    pub fn stomp_bounce(&mut self) {
        self.vel_y = self.kinematics.jump_force * STOMP_BOUNCE_FACTOR;
        self.on_ground = false;
    }

    /// Stand on a surface whose top edge is at `top_row`
    pub fn land_on(&mut self, top_row: f32) {
        self.pos.y = top_row - self.height;
        self.vel_y = 0.0;
        self.jumps_left = self.max_jumps();
        self.on_ground = true;
    }

    /// Apply the player-side effect of a power-up
    ///
    /// The stopwatch slows the world rather than the player and is handled by
    /// the engine.
    pub fn apply_powerup(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Jetpack => {
                self.jetpack_jumps += JETPACK_BONUS_JUMPS;
                self.jumps_left = self.max_jumps();
            }
            PowerupKind::Beans => {
                self.has_beans = true;
                self.beans_timer = BEANS_TICKS;
            }
            PowerupKind::Pistol => self.ammo += PISTOL_AMMO,
            PowerupKind::Acid => {
                self.acid_timer += ACID_TICKS_PER_PICKUP;
                self.acid_flash_timer = FLASH_TICKS;
            }
            PowerupKind::Stopwatch => {}
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        let nirvana = self.in_nirvana();
        if nirvana && !self.was_in_nirvana {
            self.nirvana_flash_timer = FLASH_TICKS;
            log::debug!("Nirvana reached (acid timer {})", self.acid_timer);
        }
        if self.was_in_nirvana && !nirvana {
            self.grace_period = GRACE_PERIOD_TICKS;
        }
        self.was_in_nirvana = nirvana;
        self.grace_period = self.grace_period.saturating_sub(1);

        if nirvana {
            // Flight mode: ease toward a fixed altitude, gravity suspended
            self.pos.y += (NIRVANA_ALTITUDE - self.pos.y) * NIRVANA_SMOOTHING;
            self.vel_y = 0.0;
            self.on_ground = false;
        } else {
            self.vel_y += self.kinematics.gravity;
            self.pos.y += self.vel_y;
            let ground_y = self.ground_y();
            if self.pos.y >= ground_y {
                self.land_on(GROUND_ROW);
            }
        }

        if self.has_beans {
            self.beans_timer = self.beans_timer.saturating_sub(1);
            if self.beans_timer == 0 {
                self.has_beans = false;
            }
        }
        self.acid_timer = self.acid_timer.saturating_sub(1);
        self.acid_flash_timer = self.acid_flash_timer.saturating_sub(1);
        self.nirvana_flash_timer = self.nirvana_flash_timer.saturating_sub(1);
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            jumps_left: self.jumps_left,
            ammo: self.ammo,
            jetpack_jumps: self.jetpack_jumps,
            has_beans: self.has_beans,
            beans_timer: self.beans_timer,
            acid_timer: self.acid_timer,
            acid_level: self.acid_level().as_u8(),
            grace_period: self.grace_period,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(JumpKinematics::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECOND: u32 = TARGET_FPS;

    #[test]
    fn test_pose_selection() {
        let mut player = Player::default();
        assert_eq!(player.pose(0), art::PLAYER_RUN_1);
        assert_eq!(player.pose(8), art::PLAYER_RUN_2);
        player.jump();
        assert_eq!(player.pose(0), art::PLAYER_JUMP);
        player.acid_timer = 30 * 60;
        assert_eq!(player.pose(0), art::PLAYER_LOTUS);
    }

    #[test]
    fn test_acid_level_thresholds() {
        assert_eq!(AcidLevel::from_timer(0), AcidLevel::Sober);
        assert_eq!(AcidLevel::from_timer(5 * SECOND), AcidLevel::Buzzed);
        assert_eq!(AcidLevel::from_timer(10 * SECOND), AcidLevel::Buzzed);
        assert_eq!(AcidLevel::from_timer(15 * SECOND), AcidLevel::Tripping);
        assert_eq!(AcidLevel::from_timer(20 * SECOND), AcidLevel::Tripping);
        assert_eq!(AcidLevel::from_timer(25 * SECOND), AcidLevel::Nirvana);
    }

    #[test]
    fn test_jump_consumes_charge() {
        let mut player = Player::default();
        assert!(player.jump());
        assert_eq!(player.jumps_left, 0);
        assert!(!player.on_ground);
        assert_eq!(player.vel_y, player.kinematics().jump_force);

        // Mid-air with no charges: no-op
        let vel = player.vel_y;
        assert!(!player.jump());
        assert_eq!(player.jumps_left, 0);
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_landing_restores_charges() {
        let mut player = Player::default();
        player.jump();
        let mut ticks = 0;
        while !player.on_ground {
            player.update();
            ticks += 1;
            assert!(ticks < 500);
        }
        assert_eq!(player.pos.y, player.ground_y());
        assert_eq!(player.jumps_left, MAX_JUMPS);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_jetpack_grants_double_jump() {
        let mut player = Player::default();
        player.apply_powerup(PowerupKind::Jetpack);
        assert_eq!(player.jetpack_jumps, JETPACK_BONUS_JUMPS);
        assert_eq!(player.jumps_left, 2);

        assert!(player.jump());
        assert_eq!(player.jetpack_jumps, JETPACK_BONUS_JUMPS - 1);
        assert!(player.jump());
        assert_eq!(player.jetpack_jumps, JETPACK_BONUS_JUMPS - 2);
        assert!(!player.jump());
    }

    #[test]
    fn test_jetpack_runs_dry() {
        let mut player = Player::default();
        player.apply_powerup(PowerupKind::Jetpack);
        for _ in 0..JETPACK_BONUS_JUMPS {
            player.on_ground = true;
            player.jumps_left = player.max_jumps();
            assert!(player.jump());
        }
        assert_eq!(player.jetpack_jumps, 0);
        assert_eq!(player.max_jumps(), MAX_JUMPS);
    }

    #[test]
    fn test_fart_and_stomp_impulses() {
        let mut player = Player::default();
        let force = player.kinematics().jump_force;

        player.fart_jump();
        assert!((player.vel_y - force * 0.8).abs() < 1e-6);
        assert_eq!(player.jumps_left, MAX_JUMPS);

        player.stomp_bounce();
        assert!((player.vel_y - force * 0.6).abs() < 1e-6);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_acid_stacks_additively() {
        let mut player = Player::default();
        player.apply_powerup(PowerupKind::Acid);
        player.apply_powerup(PowerupKind::Acid);
        assert_eq!(player.acid_timer, 2 * ACID_TICKS_PER_PICKUP);
        assert_eq!(player.acid_flash_timer, FLASH_TICKS);
        assert_eq!(player.acid_level(), AcidLevel::Tripping);
    }

    #[test]
    fn test_beans_expire() {
        let mut player = Player::default();
        player.apply_powerup(PowerupKind::Beans);
        assert!(player.has_beans);
        for _ in 0..BEANS_TICKS {
            player.update();
        }
        assert!(!player.has_beans);
        assert_eq!(player.beans_timer, 0);
    }

    #[test]
    fn test_nirvana_floats_then_grants_grace() {
        let mut player = Player::default();
        player.acid_timer = 60 * SECOND;
        assert!(player.is_invincible());

        player.update();
        assert_eq!(player.nirvana_flash_timer, FLASH_TICKS - 1);
        assert_eq!(player.vel_y, 0.0);
        assert!(player.pos.y < player.ground_y());

        for _ in 0..600 {
            player.update();
        }
        assert!((player.pos.y - NIRVANA_ALTITUDE).abs() < 0.5);

        // Ride the timer down out of nirvana
        while player.in_nirvana() {
            player.update();
        }
        player.update();
        assert!(player.grace_period > 0);
        assert!(player.is_invincible());
        assert!(!player.in_nirvana());

        for _ in 0..GRACE_PERIOD_TICKS {
            player.update();
        }
        assert_eq!(player.grace_period, 0);
        assert!(!player.is_invincible());
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut player = Player::default();
        for _ in 0..10 {
            player.update();
        }
        assert_eq!(player.acid_timer, 0);
        assert_eq!(player.grace_period, 0);
        assert_eq!(player.acid_flash_timer, 0);
    }

    proptest! {
        #[test]
        fn prop_acid_level_never_rises_as_timer_drains(timer in 0u32..5000) {
            let now = AcidLevel::from_timer(timer);
            let later = AcidLevel::from_timer(timer.saturating_sub(1));
            prop_assert!(later <= now);
        }

        #[test]
        fn prop_jump_never_underflows(presses in proptest::collection::vec(any::<bool>(), 1..200)) {
            let mut player = Player::default();
            for press in presses {
                if press {
                    let before = player.jumps_left;
                    let jumped = player.jump();
                    if before == 0 {
                        prop_assert!(!jumped);
                        prop_assert_eq!(player.jumps_left, 0);
                    } else {
                        prop_assert!(jumped);
                        prop_assert_eq!(player.jumps_left, before - 1);
                    }
                }
                player.update();
            }
        }

        #[test]
        fn prop_player_never_sinks_below_ground(
            jumps in proptest::collection::vec(any::<bool>(), 1..400),
            acid in 0u32..2000,
        ) {
            let mut player = Player::default();
            player.acid_timer = acid;
            for jump in jumps {
                if jump {
                    player.jump();
                }
                player.update();
                prop_assert!(player.pos.y <= player.ground_y() + 1e-4);
            }
        }
    }
}
