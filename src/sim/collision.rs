//! Collision detection and response on the character grid
//!
//! Boxes are snapped to whole cells (truncating toward zero) before testing,
//! so contact matches what is drawn on screen.

use glam::Vec2;

use super::player::Player;
use super::state::{Bullet, Obstacle, Powerup, PowerupKind};
use crate::consts::{HITBOX_PADDING, LANDING_TOLERANCE};

/// Axis-aligned box in whole cells (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Aabb {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: pos.x as i32,
            y: pos.y as i32,
            width: width as i32,
            height: height as i32,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

impl From<&Obstacle> for Aabb {
    fn from(obstacle: &Obstacle) -> Self {
        Aabb::new(obstacle.pos, obstacle.width, obstacle.height)
    }
}

impl From<&Powerup> for Aabb {
    fn from(powerup: &Powerup) -> Self {
        Aabb::new(powerup.pos, powerup.width, powerup.height)
    }
}

/// Full player box, used for power-up pickups
pub fn player_box(player: &Player) -> Aabb {
    Aabb::new(player.pos, player.width, player.height)
}

/// Forgiving player box for obstacle contact
///
/// Inset on the sides and the head. The feet stay flush so standing on the
/// ground or a platform lines up with the obstacle tops.
pub fn player_hitbox(player: &Player) -> Aabb {
    let full = player_box(player);
    Aabb {
        x: full.x + HITBOX_PADDING,
        y: full.y + HITBOX_PADDING,
        width: full.width - HITBOX_PADDING * 2,
        height: full.height - HITBOX_PADDING,
    }
}

/// Outcome of testing the player against every obstacle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObstacleContact {
    /// Touched an obstacle in a way that kills (unless invincible)
    pub fatal: bool,
    /// Landed on and destroyed at least one stompable enemy
    pub stomped: bool,
}

/// Resolve player/obstacle contact for this tick
///
/// Landing on a stompable enemy destroys it and bounces the player; landing
/// on a flat-top obstacle snaps the player onto it. Both keep scanning. Any
/// other contact is fatal and ends the scan.
pub fn resolve_obstacles(player: &mut Player, obstacles: &mut [Obstacle]) -> ObstacleContact {
    let hitbox = player_hitbox(player);
    let mut contact = ObstacleContact::default();

    for obstacle in obstacles.iter_mut().filter(|o| o.alive) {
        let obs_box = Aabb::from(&*obstacle);
        if !hitbox.overlaps(&obs_box) {
            continue;
        }

        let landing = hitbox.bottom() <= obs_box.y + LANDING_TOLERANCE && player.vel_y >= 0.0;
        if landing {
            if obstacle.kind.is_stompable() {
                obstacle.alive = false;
                player.stomp_bounce();
                contact.stomped = true;
                log::debug!("Stomped {:?}", obstacle.kind);
                continue;
            }
            if obstacle.kind.is_flat_top() {
                player.land_on(obs_box.y as f32);
                continue;
            }
        }

        contact.fatal = true;
        return contact;
    }

    contact
}

/// Pick up every power-up overlapping the player
///
/// Player-side effects are applied here; returns the kinds collected (in
/// pickup order) so the caller can apply world effects such as the stopwatch.
pub fn collect_powerups(player: &mut Player, powerups: &mut Vec<Powerup>) -> Vec<PowerupKind> {
    let body = player_box(player);
    let mut collected = Vec::new();

    powerups.retain(|powerup| {
        if body.overlaps(&Aabb::from(powerup)) {
            player.apply_powerup(powerup.kind);
            collected.push(powerup.kind);
            false
        } else {
            true
        }
    });

    collected
}

/// Bullets destroy the first live obstacle their tip is inside; returns kills
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, obstacles: &mut [Obstacle]) -> usize {
    let mut kills = 0;

    bullets.retain(|bullet| {
        let (bx, by) = (bullet.pos.x as i32, bullet.pos.y as i32);
        let target = obstacles
            .iter_mut()
            .find(|o| o.alive && Aabb::from(&**o).contains(bx, by));
        match target {
            Some(obstacle) => {
                obstacle.alive = false;
                kills += 1;
                false
            }
            None => true,
        }
    });

    kills
}
