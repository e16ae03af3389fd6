//! Entity types, per-tick event report and HUD snapshot
//!
//! Each entity is a small state + update unit. None of them hold references
//! to each other; the engine owns every collection.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::art::{self, Art};
use crate::color::{self, Rgb};
use crate::consts::*;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Flat-top ground hazard the player can stand on
    Easy,
    /// Flying organic enemy, stompable
    Bird,
    /// Ground organic enemy, stompable
    Cow,
    /// Tall static hazard (late game)
    House,
    Cactus,
    Spike,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 6] = [
        ObstacleKind::Easy,
        ObstacleKind::Bird,
        ObstacleKind::Cow,
        ObstacleKind::House,
        ObstacleKind::Cactus,
        ObstacleKind::Spike,
    ];

    /// Every art variant this kind may be drawn with
    pub fn art_variants(self) -> &'static [Art] {
        match self {
            ObstacleKind::Easy => &art::EASY_VARIANTS,
            ObstacleKind::Bird => &[art::BIRD],
            ObstacleKind::Cow => &[art::COW],
            ObstacleKind::House => &[art::HOUSE],
            ObstacleKind::Cactus => &[art::CACTUS],
            ObstacleKind::Spike => &[art::SPIKE],
        }
    }

    /// Tallest art variant, in rows
    pub fn max_art_height(self) -> usize {
        self.art_variants()
            .iter()
            .map(|variant| art::art_height(*variant))
            .max()
            .unwrap_or(0)
    }

    /// Organic enemies die when landed on
    pub fn is_stompable(self) -> bool {
        matches!(self, ObstacleKind::Bird | ObstacleKind::Cow)
    }

    /// The player can land and stand on these
    pub fn is_flat_top(self) -> bool {
        self == ObstacleKind::Easy
    }

    pub fn is_flying(self) -> bool {
        self == ObstacleKind::Bird
    }
}

/// An obstacle entity
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub art: Art,
    pub width: f32,
    pub height: f32,
    /// Center row of the bobbing flight path (flying kinds only)
    pub fly_row: f32,
    /// False once destroyed by a bullet or a stomp
    pub alive: bool,
}

impl Obstacle {
    /// Create an obstacle at column `x`, resting on the ground or flying
    pub fn new<R: Rng + ?Sized>(kind: ObstacleKind, x: f32, rng: &mut R) -> Self {
        let art = kind
            .art_variants()
            .choose(rng)
            .copied()
            .unwrap_or(art::EASY_MOUND);
        let width = art::art_width(art) as f32;
        let height = art::art_height(art) as f32;

        let fly_row = if kind.is_flying() {
            rng.random_range(8..=14) as f32
        } else {
            0.0
        };
        let y = if kind.is_flying() {
            fly_row
        } else {
            GROUND_ROW - height
        };

        Self {
            kind,
            pos: Vec2::new(x, y),
            art,
            width,
            height,
            fly_row,
            alive: true,
        }
    }

    /// Scroll left; flying kinds bob with their horizontal position
    pub fn update(&mut self, scroll_speed: f32) {
        self.pos.x -= scroll_speed;
        if self.kind.is_flying() {
            self.pos.y = self.fly_row + (self.pos.x * 0.1).sin() * 2.0;
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.width < 0.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerupKind {
    /// Adds ammo
    Pistol,
    /// Bonus mid-air jumps
    Jetpack,
    /// Random flatulence jumps for a while
    Beans,
    /// Stacking trip timer, tier 3 is nirvana
    Acid,
    /// Temporary slowdown
    Stopwatch,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 5] = [
        PowerupKind::Pistol,
        PowerupKind::Jetpack,
        PowerupKind::Beans,
        PowerupKind::Acid,
        PowerupKind::Stopwatch,
    ];

    pub fn art(self) -> Art {
        match self {
            PowerupKind::Pistol => &["[=>"],
            PowerupKind::Jetpack => &["<J>"],
            PowerupKind::Beans => &["{B}"],
            PowerupKind::Acid => &["<*>"],
            PowerupKind::Stopwatch => &["(O)"],
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            PowerupKind::Pistol => color::ORANGE,
            PowerupKind::Jetpack => color::CYAN,
            PowerupKind::Beans => color::LIME,
            PowerupKind::Acid => color::MAGENTA,
            PowerupKind::Stopwatch => color::YELLOW,
        }
    }
}

/// A power-up entity
#[derive(Debug, Clone)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Powerup {
    /// Create a power-up at column `x`, lifted a random amount above the ground
    pub fn new<R: Rng + ?Sized>(kind: PowerupKind, x: f32, rng: &mut R) -> Self {
        let art = kind.art();
        let width = art::art_width(art) as f32;
        let height = art::art_height(art) as f32;
        let lift = rng.random_range(0..=POWERUP_MAX_LIFT) as f32;
        Self {
            kind,
            pos: Vec2::new(x, GROUND_ROW - height - lift),
            width,
            height,
        }
    }

    pub fn update(&mut self, scroll_speed: f32) {
        self.pos.x -= scroll_speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.width < 0.0
    }
}

/// A bullet fired from the player's pistol
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub const GLYPHS: &'static str = "->";

    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: BULLET_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x >= SCREEN_COLS as f32
    }
}

/// A puff of gas left behind by a flatulence jump
#[derive(Debug, Clone)]
pub struct FartPuff {
    pub pos: Vec2,
    pub life: u32,
}

impl FartPuff {
    const GLYPHS: [char; 4] = ['~', 'o', '*', '.'];

    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            life: FART_PUFF_LIFE,
        }
    }

    pub fn update(&mut self) {
        self.life = self.life.saturating_sub(1);
        self.pos.y += 0.2;
    }

    pub fn is_done(&self) -> bool {
        self.life == 0
    }

    /// Glyph for the current stage of the puff's life
    pub fn glyph(&self) -> char {
        let age = (FART_PUFF_LIFE - self.life.min(FART_PUFF_LIFE)) / 4;
        Self::GLYPHS[(age as usize).min(3)]
    }
}

/// A psychedelic blob drifting across the screen during the acid effect
#[derive(Debug, Clone)]
pub struct LavaBlob {
    pub pos: Vec2,
    /// Drifts right-to-left when true, bottom-to-top otherwise
    pub horizontal: bool,
    pub speed: f32,
    pub wobble: f32,
    pub wobble_speed: f32,
    pub glyph: char,
    pub color: Rgb,
}

impl LavaBlob {
    pub fn new<R: Rng + ?Sized>(horizontal: bool, rng: &mut R) -> Self {
        let (pos, speed) = if horizontal {
            let x = SCREEN_COLS as i32 + rng.random_range(0..=5);
            let y = rng.random_range(5..=SCREEN_ROWS as i32 - 3);
            (Vec2::new(x as f32, y as f32), rng.random_range(0.3..0.6))
        } else {
            let x = rng.random_range(0..SCREEN_COLS as i32);
            let y = SCREEN_ROWS as i32 + rng.random_range(0..=5);
            (Vec2::new(x as f32, y as f32), rng.random_range(0.1..0.3))
        };
        let glyph = match rng.random_range(1..=3) {
            1 => 'o',
            2 => 'O',
            _ => '@',
        };

        Self {
            pos,
            horizontal,
            speed,
            wobble: rng.random_range(0.0..std::f32::consts::TAU),
            wobble_speed: rng.random_range(0.05..0.15),
            glyph,
            color: *color::PSYCHEDELIC.choose(rng).unwrap_or(&color::MAGENTA),
        }
    }

    pub fn update(&mut self) {
        self.wobble += self.wobble_speed;
        let sway = self.wobble.sin() * 0.3;
        if self.horizontal {
            self.pos.x -= self.speed;
            self.pos.y += sway;
        } else {
            self.pos.y -= self.speed;
            self.pos.x += sway;
        }
    }

    pub fn is_off_screen(&self) -> bool {
        if self.horizontal {
            self.pos.x < -2.0
        } else {
            self.pos.y < -2.0
        }
    }
}

/// A falling snowflake (snow environment only)
#[derive(Debug, Clone)]
pub struct Snowflake {
    pub pos: Vec2,
    pub speed: f32,
    pub drift: f32,
    pub glyph: char,
}

impl Snowflake {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.random_range(0..SCREEN_COLS as i32) as f32;
        let y = rng.random_range(-10..=0) as f32;
        Self {
            pos: Vec2::new(x, y),
            speed: rng.random_range(0.05..0.15),
            drift: rng.random_range(-0.02..0.02),
            glyph: *['*', '.', '+', 'o'].choose(rng).unwrap_or(&'*'),
        }
    }

    /// Fall and drift, wrapping around the horizontal edges
    pub fn update(&mut self) {
        self.pos.y += self.speed;
        self.pos.x += self.drift;
        if self.pos.x < 0.0 {
            self.pos.x = SCREEN_COLS as f32 - 1.0;
        } else if self.pos.x >= SCREEN_COLS as f32 {
            self.pos.x = 0.0;
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y >= SCREEN_ROWS as f32
    }
}

/// Background decoration types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    Mountain,
    SmallMountain,
    Snowman,
    SnowDrift,
}

impl DecorationKind {
    fn layout(self) -> (Art, i32, Rgb) {
        match self {
            DecorationKind::Mountain => (art::MOUNTAIN, 6, Rgb(100, 100, 120)),
            DecorationKind::SmallMountain => (art::SMALL_MOUNTAIN, 8, Rgb(80, 80, 100)),
            DecorationKind::Snowman => (art::SNOWMAN, 8, color::WHITE),
            DecorationKind::SnowDrift => (art::SNOW_DRIFT, 10, Rgb(220, 220, 240)),
        }
    }
}

/// A slow-scrolling background decoration (mountains, snowmen)
#[derive(Debug, Clone)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub x: f32,
    /// Fixed top row
    pub row: i32,
    pub art: Art,
    pub color: Rgb,
    pub width: f32,
}

impl Decoration {
    pub fn new(kind: DecorationKind, x: f32) -> Self {
        let (art, row, color) = kind.layout();
        Self {
            kind,
            x,
            row,
            art,
            color,
            width: art::art_width(art) as f32,
        }
    }

    pub fn update(&mut self, scroll_speed: f32) {
        self.x -= scroll_speed * DECORATION_PARALLAX;
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// A fixed star above the visible field, revealed when the camera rises
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub col: i32,
    /// Negative: rows above the top of the screen
    pub row: i32,
    pub glyph: char,
    pub color: Rgb,
}

impl Star {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        const BRIGHTNESS: [Rgb; 4] = [
            Rgb(100, 100, 120),
            Rgb(150, 150, 180),
            Rgb(200, 200, 255),
            Rgb(255, 255, 255),
        ];
        Self {
            col: rng.random_range(0..SCREEN_COLS as i32),
            row: rng.random_range(-(SCREEN_ROWS as i32) * 2..=-1),
            glyph: *['.', '*', '+', 'o'].choose(rng).unwrap_or(&'.'),
            color: *BRIGHTNESS.choose(rng).unwrap_or(&color::WHITE),
        }
    }
}

/// Events produced by one tick, consumed by audio/FX
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventReport {
    pub game_over: bool,
    pub died: bool,
    pub farted: bool,
    pub stomped: bool,
    /// Every power-up picked up this tick, in pickup order
    pub collected: Vec<PowerupKind>,
}

impl EventReport {
    /// Report returned by ticks after the run has ended
    pub fn already_over() -> Self {
        Self {
            game_over: true,
            ..Default::default()
        }
    }
}

/// Player fields exposed to the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub jumps_left: u32,
    pub ammo: u32,
    pub jetpack_jumps: u32,
    pub has_beans: bool,
    pub beans_timer: u32,
    pub acid_timer: u32,
    pub acid_level: u8,
    pub grace_period: u32,
}

/// Read-only snapshot of the engine for HUD rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    pub player: PlayerSnapshot,
    pub stopwatch_timer: u32,
    pub frame: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacle_classes() {
        assert!(ObstacleKind::Bird.is_stompable());
        assert!(ObstacleKind::Cow.is_stompable());
        assert!(!ObstacleKind::House.is_stompable());
        assert!(ObstacleKind::Easy.is_flat_top());
        assert!(!ObstacleKind::Cactus.is_flat_top());
        assert!(ObstacleKind::Bird.is_flying());
    }

    #[test]
    fn test_ground_obstacle_rests_on_ground() {
        let mut rng = Pcg32::seed_from_u64(1);
        for kind in [ObstacleKind::Easy, ObstacleKind::Cow, ObstacleKind::House] {
            let obs = Obstacle::new(kind, 80.0, &mut rng);
            assert_eq!(obs.pos.y + obs.height, GROUND_ROW);
            assert!(obs.alive);
        }
    }

    #[test]
    fn test_bird_bobs_around_flight_row() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut bird = Obstacle::new(ObstacleKind::Bird, 80.0, &mut rng);
        assert!((8.0..=14.0).contains(&bird.fly_row));
        for _ in 0..200 {
            bird.update(0.5);
            assert!((bird.pos.y - bird.fly_row).abs() <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_obstacle_leaves_screen() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut obs = Obstacle::new(ObstacleKind::Spike, 0.0, &mut rng);
        assert!(!obs.is_off_screen());
        obs.update(obs.width + 0.5);
        assert!(obs.is_off_screen());
    }

    #[test]
    fn test_powerup_placement_band() {
        let mut rng = Pcg32::seed_from_u64(4);
        for kind in PowerupKind::ALL {
            for _ in 0..20 {
                let p = Powerup::new(kind, 80.0, &mut rng);
                let bottom = p.pos.y + p.height;
                assert!(bottom <= GROUND_ROW);
                assert!(bottom >= GROUND_ROW - POWERUP_MAX_LIFT as f32);
            }
        }
    }

    #[test]
    fn test_fart_puff_lifecycle() {
        let mut puff = FartPuff::new(Vec2::new(12.0, 20.0));
        assert_eq!(puff.glyph(), '~');
        for _ in 0..FART_PUFF_LIFE - 1 {
            puff.update();
        }
        assert_eq!(puff.glyph(), '.');
        assert!(!puff.is_done());
        puff.update();
        assert!(puff.is_done());
    }

    #[test]
    fn test_bullet_flies_off_right_edge() {
        let mut bullet = Bullet::new(Vec2::new(75.0, 19.0));
        bullet.update();
        assert!(!bullet.is_off_screen());
        bullet.update();
        assert!(bullet.is_off_screen());
    }

    #[test]
    fn test_lava_blob_drifts_off() {
        let mut rng = Pcg32::seed_from_u64(5);
        for horizontal in [true, false] {
            let mut blob = LavaBlob::new(horizontal, &mut rng);
            let mut ticks = 0;
            while !blob.is_off_screen() {
                blob.update();
                ticks += 1;
                assert!(ticks < 2000, "blob never left the screen");
            }
        }
    }

    #[test]
    fn test_snowflake_wraps_horizontally() {
        let mut flake = Snowflake {
            pos: Vec2::new(0.01, 0.0),
            speed: 0.1,
            drift: -0.02,
            glyph: '*',
        };
        flake.update();
        assert_eq!(flake.pos.x, SCREEN_COLS as f32 - 1.0);
    }

    #[test]
    fn test_event_report_serializes_collected_names() {
        let report = EventReport {
            collected: vec![PowerupKind::Acid, PowerupKind::Stopwatch],
            ..Default::default()
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"acid\""));
        assert!(json.contains("\"stopwatch\""));
    }
}
