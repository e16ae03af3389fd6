//! ASCII Runner - A side-scrolling arcade runner on a character grid
//!
//! Core modules:
//! - `sim`: Deterministic frame-stepped simulation (physics, spawning, collisions, scoring)
//! - `render`: Layered glyph/color/depth compositor for any character renderer
//! - `art`: Static glyph art tables
//! - `highscores`: Persistent top-5 leaderboard
//! - `settings`: Runtime configuration

pub mod art;
pub mod color;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use color::Rgb;
pub use highscores::HighScores;
pub use render::{Cell, Depth, ScreenBuffer};
pub use settings::Settings;
pub use sim::{EventReport, GameEngine, PowerupKind, StateSnapshot};

/// Game configuration constants
///
/// Durations are in ticks; the driver steps the engine at `TARGET_FPS`.
pub mod consts {
    /// Frames per second the external driver is expected to tick at
    pub const TARGET_FPS: u32 = 60;

    /// Visible grid dimensions
    pub const SCREEN_COLS: usize = 80;
    pub const SCREEN_ROWS: usize = 25;

    /// Row of the ground line (entities stand with their bottom edge here)
    pub const GROUND_ROW: f32 = 22.0;
    /// Rows of the background terrain band and the fill band below it
    pub const BG_TERRAIN_TOP: i32 = 12;
    pub const BG_TERRAIN_BOTTOM: i32 = 17;

    /// Player defaults
    pub const PLAYER_X: f32 = 10.0;
    pub const PLAYER_WIDTH: f32 = 5.0;
    pub const PLAYER_HEIGHT: f32 = 4.0;
    pub const MAX_JUMPS: u32 = 1;

    /// Physics
    pub const GRAVITY: f32 = 0.035;
    /// Jump apex as a multiple of the tallest obstacle
    pub const JUMP_CLEARANCE_MULTIPLIER: f32 = 1.2;
    pub const FART_JUMP_FACTOR: f32 = 0.8;
    pub const STOMP_BOUNCE_FACTOR: f32 = 0.6;

    /// Nirvana floats the player toward this row
    pub const NIRVANA_ALTITUDE: f32 = 6.0;
    pub const NIRVANA_SMOOTHING: f32 = 0.1;

    /// Scroll speed: BASE + score / PROGRESSION (+0.1 per 200 points)
    pub const BASE_SCROLL_SPEED: f32 = 0.3;
    pub const SPEED_PROGRESSION: f32 = 2000.0;

    /// Camera starts following when the player is above this row
    pub const CAMERA_FOLLOW_THRESHOLD: f32 = 5.0;
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// Power-up effects
    pub const JETPACK_BONUS_JUMPS: u32 = 10;
    pub const PISTOL_AMMO: u32 = 10;
    pub const BEANS_TICKS: u32 = 600;
    /// Added to the acid timer per pickup (10 seconds)
    pub const ACID_TICKS_PER_PICKUP: u32 = 600;
    pub const STOPWATCH_TICKS: u32 = 300;
    /// Fraction of the current scroll speed removed by a stopwatch
    pub const STOPWATCH_REDUCTION: f32 = 0.6;
    pub const FLASH_TICKS: u32 = 60;
    /// Invincibility after nirvana ends (2 seconds)
    pub const GRACE_PERIOD_TICKS: u32 = 120;

    /// Spawning
    pub const INITIAL_SPAWN_DELAY: i32 = 180;
    pub const INITIAL_POWERUP_DELAY: i32 = 120;
    pub const POWERUP_SPACING_MIN: i32 = 80;
    pub const POWERUP_SPACING_MAX: i32 = 180;
    /// Highest lift of a power-up above its ground position
    pub const POWERUP_MAX_LIFT: i32 = 8;
    /// Extra columns after a jump lands before the next obstacle
    pub const LANDING_BUFFER: f32 = 8.0;
    /// Floor for the speed divisor in spawn spacing
    pub const MIN_SPEED_DIVISOR: f32 = 0.1;

    /// Collision
    pub const HITBOX_PADDING: i32 = 1;
    /// Rows below an obstacle top that still count as landing on it
    pub const LANDING_TOLERANCE: i32 = 3;

    pub const BULLET_SPEED: f32 = 3.0;

    /// Per-tick chance of a flatulence event while beans are active
    pub const FART_CHANCE: f64 = 0.005;
    pub const FART_PUFF_LIFE: u32 = 15;

    /// Ambient particles
    pub const LAVA_SPAWN_CHANCE: f64 = 0.15;
    pub const SNOW_SPAWN_CHANCE: f64 = 0.1;
    pub const MAX_SNOWFLAKES: usize = 30;
    pub const STAR_COUNT: usize = 100;

    /// Background decorations
    pub const DECORATION_PARALLAX: f32 = 0.05;
    pub const DECORATION_SPAWN_X: f32 = 85.0;
    pub const DECORATION_SPACING_MIN: i32 = 200;
    pub const DECORATION_SPACING_MAX: i32 = 400;
    pub const BG_PARALLAX: f32 = 0.3;
    pub const FILL_PARALLAX: f32 = 0.5;
}
