//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Frame-stepped only (one `update` per rendered frame)
//! - One seeded RNG owned by the engine
//! - Grid-snapped collision so contact matches what is drawn
//! - No terminal or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod engine;
pub mod environment;
pub mod kinematics;
pub mod player;
pub mod spawn;
pub mod state;

pub use autopilot::{PilotAction, decide};
pub use collision::{Aabb, ObstacleContact, player_hitbox};
pub use engine::{GameEngine, GamePhase, Slowdown, base_scroll_speed};
pub use environment::{Environment, Theme};
pub use kinematics::JumpKinematics;
pub use player::{AcidLevel, Player};
pub use spawn::Spawner;
pub use state::{
    Bullet, Decoration, DecorationKind, EventReport, Obstacle, ObstacleKind, PlayerSnapshot,
    Powerup, PowerupKind, StateSnapshot,
};
