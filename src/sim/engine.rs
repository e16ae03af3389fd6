//! The game engine: owns all gameplay state and advances it one frame at a time
//!
//! Single-threaded and frame-stepped. The driver calls `update` once per
//! rendered frame, feeds discrete input through `jump`/`fire_weapon`, and
//! pulls `screen_buffer`/`snapshot` for display.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{collect_powerups, resolve_bullet_hits, resolve_obstacles};
use super::environment::Environment;
use super::kinematics::JumpKinematics;
use super::player::Player;
use super::spawn::Spawner;
use super::state::{
    Bullet, Decoration, EventReport, FartPuff, LavaBlob, Obstacle, Powerup, PowerupKind, Snowflake,
    Star, StateSnapshot,
};
use crate::consts::*;
use crate::render::{self, ScreenBuffer};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// Terminal until `reset`
    GameOver,
}

/// Scroll speed for a score, ignoring any slowdown
#[inline]
pub fn base_scroll_speed(score: u64) -> f32 {
    BASE_SCROLL_SPEED + score as f32 / SPEED_PROGRESSION
}

/// Stopwatch slowdown: removes a fraction of the speed, fading out linearly
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Slowdown {
    pub timer: u32,
    /// Speed removed at full strength
    pub reduction: f32,
}

impl Slowdown {
    /// Start (or restart) the effect relative to the current speed
    pub fn start(&mut self, current_speed: f32) {
        self.timer = STOPWATCH_TICKS;
        self.reduction = current_speed * STOPWATCH_REDUCTION;
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0
    }

    /// Advance one tick and return the effective speed
    pub fn apply(&mut self, base_speed: f32) -> f32 {
        if self.timer > 0 {
            self.timer -= 1;
            let strength = self.timer as f32 / STOPWATCH_TICKS as f32;
            base_speed - self.reduction * strength
        } else {
            self.reduction = 0.0;
            base_speed
        }
    }
}

/// Core game logic, renderer agnostic
pub struct GameEngine {
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<Powerup>,
    pub bullets: Vec<Bullet>,
    pub fart_puffs: Vec<FartPuff>,
    pub lava_blobs: Vec<LavaBlob>,
    pub snowflakes: Vec<Snowflake>,
    pub decorations: Vec<Decoration>,
    pub stars: Vec<Star>,
    pub spawner: Spawner,
    /// Monotonic while running, frozen at death
    pub score: u64,
    /// Best score reached since the engine was created
    pub high_score: u64,
    pub scroll_speed: f32,
    pub slowdown: Slowdown,
    /// World scroll distance (drives the ground cycle)
    pub scroll_offset: f32,
    /// Slower parallax scroll for the background band
    pub bg_scroll_offset: f32,
    /// Vertical camera offset (negative = looking up)
    pub camera_y: f32,
    pub frame: u64,
    environment: Environment,
    kinematics: JumpKinematics,
    seed: u64,
    rng: Pcg32,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Create an engine with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create an engine with a fixed seed (reproducible runs)
    pub fn with_seed(seed: u64) -> Self {
        let kinematics = JumpKinematics::standard();
        let mut engine = Self {
            phase: GamePhase::Running,
            player: Player::new(kinematics),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            bullets: Vec::new(),
            fart_puffs: Vec::new(),
            lava_blobs: Vec::new(),
            snowflakes: Vec::new(),
            decorations: Vec::new(),
            stars: Vec::new(),
            spawner: Spawner::new(),
            score: 0,
            high_score: 0,
            scroll_speed: BASE_SCROLL_SPEED,
            slowdown: Slowdown::default(),
            scroll_offset: 0.0,
            bg_scroll_offset: 0.0,
            camera_y: 0.0,
            frame: 0,
            environment: Environment::for_score(0),
            kinematics,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        engine.reset();
        engine
    }

    /// Start a fresh run; the high score survives
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.player = Player::new(self.kinematics);
        self.obstacles.clear();
        self.powerups.clear();
        self.bullets.clear();
        self.fart_puffs.clear();
        self.lava_blobs.clear();
        self.snowflakes.clear();
        self.spawner = Spawner::new();
        self.score = 0;
        self.scroll_speed = BASE_SCROLL_SPEED;
        self.slowdown = Slowdown::default();
        self.scroll_offset = 0.0;
        self.bg_scroll_offset = 0.0;
        self.camera_y = 0.0;
        self.frame = 0;
        self.environment = Environment::for_score(0);

        let rng = &mut self.rng;
        self.stars = (0..STAR_COUNT).map(|_| Star::new(rng)).collect();
        self.decorations = Spawner::initial_decorations(rng);

        log::info!("New run (seed {}, high score {})", self.seed, self.high_score);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn kinematics(&self) -> &JumpKinematics {
        &self.kinematics
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Attempt a jump; true iff a charge was consumed
    pub fn jump(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.player.jump()
    }

    /// Fire the pistol; true iff ammo was available and a bullet spawned
    pub fn fire_weapon(&mut self) -> bool {
        if self.is_game_over() || self.player.ammo == 0 {
            return false;
        }
        let muzzle = Vec2::new(self.player.pos.x + self.player.width, self.player.pos.y + 1.0);
        self.bullets.push(Bullet::new(muzzle));
        self.player.ammo -= 1;
        true
    }

    /// Advance the simulation one frame
    pub fn update(&mut self) -> EventReport {
        if self.is_game_over() {
            return EventReport::already_over();
        }

        let mut events = EventReport::default();

        self.frame += 1;
        self.player.update();

        if let Some(obstacle) = self.spawner.tick_obstacle(
            self.score,
            self.scroll_speed,
            &self.kinematics,
            &mut self.rng,
        ) {
            self.obstacles.push(obstacle);
        }
        if let Some(powerup) = self.spawner.tick_powerup(&mut self.rng) {
            self.powerups.push(powerup);
        }

        self.follow_player();

        self.scroll_speed = self.slowdown.apply(base_scroll_speed(self.score));
        self.scroll_offset += self.scroll_speed;
        self.bg_scroll_offset += self.scroll_speed * BG_PARALLAX;

        self.advance_entities();
        self.update_ambient_particles();
        self.prune_entities();

        events.collected = collect_powerups(&mut self.player, &mut self.powerups);
        for kind in &events.collected {
            log::debug!("Collected {:?}", kind);
            if *kind == PowerupKind::Stopwatch {
                self.slowdown.start(self.scroll_speed);
            }
        }
        resolve_bullet_hits(&mut self.bullets, &mut self.obstacles);

        if self.player.has_beans && self.rng.random_bool(FART_CHANCE) {
            self.player.fart_jump();
            let vent = Vec2::new(
                self.player.pos.x + (self.player.width as i32 / 2) as f32,
                self.player.pos.y + self.player.height,
            );
            self.fart_puffs.push(FartPuff::new(vent));
            events.farted = true;
        }

        let contact = resolve_obstacles(&mut self.player, &mut self.obstacles);
        events.stomped = contact.stomped;

        if contact.fatal && !self.player.is_invincible() {
            self.phase = GamePhase::GameOver;
            events.died = true;
            events.game_over = true;
            if self.score > self.high_score {
                self.high_score = self.score;
                log::info!("New high score: {}", self.high_score);
            }
            log::info!("Game over at score {} (frame {})", self.score, self.frame);
        } else {
            self.score += 1;
            self.track_environment();
        }

        events
    }

    /// Smoothly pan the camera up when the player climbs near the top
    fn follow_player(&mut self) {
        let target = if self.player.pos.y < CAMERA_FOLLOW_THRESHOLD {
            -(CAMERA_FOLLOW_THRESHOLD - self.player.pos.y)
        } else {
            0.0
        };
        self.camera_y += (target - self.camera_y) * CAMERA_SMOOTHING;
    }

    fn advance_entities(&mut self) {
        let speed = self.scroll_speed;
        for obstacle in &mut self.obstacles {
            obstacle.update(speed);
        }
        for powerup in &mut self.powerups {
            powerup.update(speed);
        }
        for bullet in &mut self.bullets {
            bullet.update();
        }
        for puff in &mut self.fart_puffs {
            puff.update();
        }
    }

    /// Lava blobs while tripping, snow in the snow environment, scenery always
    fn update_ambient_particles(&mut self) {
        if self.player.acid_timer > 0 {
            for blob in &mut self.lava_blobs {
                blob.update();
            }
            if self.rng.random_bool(LAVA_SPAWN_CHANCE) {
                let horizontal = self.rng.random_bool(0.5);
                self.lava_blobs.push(LavaBlob::new(horizontal, &mut self.rng));
            }
            self.lava_blobs.retain(|b| !b.is_off_screen());
        } else {
            self.lava_blobs.clear();
        }

        let environment = Environment::for_score(self.score);
        if environment.has_snowfall() {
            for flake in &mut self.snowflakes {
                flake.update();
            }
            self.snowflakes.retain(|f| !f.is_off_screen());
            if self.snowflakes.len() < MAX_SNOWFLAKES && self.rng.random_bool(SNOW_SPAWN_CHANCE) {
                self.snowflakes.push(Snowflake::new(&mut self.rng));
            }
        } else {
            self.snowflakes.clear();
        }

        for decoration in &mut self.decorations {
            decoration.update(self.scroll_speed);
        }
        self.decorations.retain(|d| !d.is_off_screen());
        if let Some(decoration) = self.spawner.tick_decoration(environment, &mut self.rng) {
            self.decorations.push(decoration);
        }
    }

    fn prune_entities(&mut self) {
        self.obstacles.retain(|o| o.alive && !o.is_off_screen());
        self.powerups.retain(|p| !p.is_off_screen());
        self.bullets.retain(|b| !b.is_off_screen());
        self.fart_puffs.retain(|p| !p.is_done());
    }

    fn track_environment(&mut self) {
        let environment = Environment::for_score(self.score);
        if environment != self.environment {
            log::info!("Entering {} at score {}", environment.name(), self.score);
            self.environment = environment;
        }
    }

    /// Read-only snapshot for the HUD
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            score: self.score,
            high_score: self.high_score,
            game_over: self.is_game_over(),
            player: self.player.snapshot(),
            stopwatch_timer: self.slowdown.timer,
            frame: self.frame,
        }
    }

    /// Compose the running screen
    pub fn screen_buffer(&self) -> ScreenBuffer {
        render::compose_screen(self)
    }

    /// Compose the death screen; its flames flicker on every call
    pub fn game_over_buffer(&mut self) -> ScreenBuffer {
        render::compose_game_over(self.score, self.high_score, self.frame, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    fn place(engine: &mut GameEngine, kind: ObstacleKind, x: f32) {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut obstacle = Obstacle::new(kind, x, &mut rng);
        if kind.is_flying() {
            obstacle.fly_row = engine.player.pos.y;
        }
        engine.obstacles.push(obstacle);
    }

    #[test]
    fn test_fresh_engine_state() {
        let engine = GameEngine::with_seed(1);
        let state = engine.snapshot();
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert_eq!(state.player.ammo, 0);
        assert_eq!(state.player.jumps_left, 1);
        assert_eq!(state.frame, 0);
        assert_eq!(engine.stars.len(), STAR_COUNT);
        assert_eq!(engine.decorations.len(), 3);
    }

    #[test]
    fn test_update_advances_score_and_frame() {
        let mut engine = GameEngine::with_seed(2);
        for _ in 0..10 {
            let events = engine.update();
            assert!(!events.game_over);
        }
        assert_eq!(engine.score, 10);
        assert_eq!(engine.frame, 10);
    }

    #[test]
    fn test_fatal_collision_ends_run() {
        let mut engine = GameEngine::with_seed(3);
        engine.score = 500;
        let x = engine.player.pos.x;
        place(&mut engine, ObstacleKind::Cactus, x);

        let events = engine.update();
        assert!(events.died);
        assert!(events.game_over);
        assert!(engine.is_game_over());
        assert_eq!(engine.score, 500);
        assert_eq!(engine.high_score, 500);

        let frame = engine.frame;
        let events = engine.update();
        assert_eq!(events, EventReport::already_over());
        assert_eq!(engine.score, 500);
        assert_eq!(engine.frame, frame);
        assert!(!engine.jump());
    }

    #[test]
    fn test_invincible_player_survives_contact() {
        let mut engine = GameEngine::with_seed(4);
        engine.player.grace_period = 60;
        let x = engine.player.pos.x;
        place(&mut engine, ObstacleKind::Cactus, x);
        let events = engine.update();
        assert!(!events.died);
        assert!(!engine.is_game_over());
        assert_eq!(engine.score, 1);
    }

    #[test]
    fn test_high_score_survives_reset() {
        let mut engine = GameEngine::with_seed(5);
        engine.score = 42;
        let x = engine.player.pos.x;
        place(&mut engine, ObstacleKind::Spike, x);
        engine.update();
        assert!(engine.is_game_over());

        engine.reset();
        assert!(!engine.is_game_over());
        assert_eq!(engine.score, 0);
        assert_eq!(engine.high_score, 42);
        assert!(engine.obstacles.is_empty());
    }

    #[test]
    fn test_fire_weapon_spawns_bullet_at_muzzle() {
        let mut engine = GameEngine::with_seed(6);
        assert!(!engine.fire_weapon());

        engine.player.ammo = 1;
        assert!(engine.fire_weapon());
        assert_eq!(engine.player.ammo, 0);
        assert_eq!(engine.bullets.len(), 1);
        assert_eq!(engine.bullets[0].pos.x, engine.player.pos.x + engine.player.width);

        assert!(!engine.fire_weapon());
        assert_eq!(engine.bullets.len(), 1);
    }

    #[test]
    fn test_stopwatch_slows_scrolling() {
        let mut engine = GameEngine::with_seed(7);
        engine.score = 1000;
        engine.update();
        let normal = engine.scroll_speed;

        engine.powerups.push(Powerup {
            kind: PowerupKind::Stopwatch,
            pos: engine.player.pos,
            width: 3.0,
            height: 1.0,
        });
        let events = engine.update();
        assert!(events.collected.contains(&PowerupKind::Stopwatch));
        assert!(engine.slowdown.is_active());

        engine.update();
        assert!(engine.scroll_speed < normal);
        assert_eq!(engine.snapshot().stopwatch_timer, STOPWATCH_TICKS - 1);

        for _ in 0..STOPWATCH_TICKS {
            engine.obstacles.clear();
            engine.powerups.clear();
            engine.update();
        }
        assert!(!engine.is_game_over());
        assert!(!engine.slowdown.is_active());
        assert_eq!(engine.scroll_speed, base_scroll_speed(engine.score - 1));
    }

    #[test]
    fn test_acid_spawns_lava_and_clears_after() {
        let mut engine = GameEngine::with_seed(8);
        engine.player.acid_timer = 300;
        for _ in 0..100 {
            engine.update();
        }
        assert!(!engine.lava_blobs.is_empty());

        engine.player.acid_timer = 0;
        engine.update();
        assert!(engine.lava_blobs.is_empty());
    }

    #[test]
    fn test_snow_environment_brings_snowflakes() {
        let mut engine = GameEngine::with_seed(9);
        engine.score = 1300;
        for _ in 0..150 {
            engine.obstacles.clear();
            engine.update();
        }
        assert_eq!(engine.environment(), Environment::Snow);
        assert!(!engine.snowflakes.is_empty());
        assert!(engine.snowflakes.len() <= MAX_SNOWFLAKES);
    }

    #[test]
    fn test_beans_fart_lifts_player() {
        let mut engine = GameEngine::with_seed(10);
        engine.player.apply_powerup(PowerupKind::Beans);
        let force = engine.kinematics().jump_force;

        // 0.995^5000 is effectively zero, so the loop always ends in a fart
        let mut farted = false;
        for _ in 0..5000 {
            engine.obstacles.clear();
            engine.powerups.clear();
            engine.fart_puffs.clear();
            engine.player.beans_timer = BEANS_TICKS;
            if engine.update().farted {
                farted = true;
                break;
            }
        }
        assert!(farted);

        let player = &engine.player;
        assert!(player.has_beans);
        assert!(!player.on_ground);
        assert!((player.vel_y - force * 0.8).abs() < 1e-6);
        assert_eq!(engine.fart_puffs.len(), 1);
        let vent_x = player.pos.x + (player.width as i32 / 2) as f32;
        let vent = Vec2::new(vent_x, player.pos.y + player.height);
        assert_eq!(engine.fart_puffs[0].pos, vent);
        assert_eq!(engine.fart_puffs[0].life, FART_PUFF_LIFE);
    }

    #[test]
    fn test_camera_follows_high_player() {
        let mut engine = GameEngine::with_seed(11);
        engine.player.pos.y = 0.0;
        engine.player.vel_y = 0.0;
        engine.follow_player();
        assert!(engine.camera_y < 0.0);

        engine.player.pos.y = engine.player.ground_y();
        for _ in 0..200 {
            engine.follow_player();
        }
        assert!(engine.camera_y.abs() < 0.01);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameEngine::with_seed(99);
        let mut b = GameEngine::with_seed(99);
        for frame in 0..1500u32 {
            if frame % 37 == 0 {
                a.jump();
                b.jump();
            }
            assert_eq!(a.update(), b.update());
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.screen_buffer(), b.screen_buffer());
    }

    proptest! {
        #[test]
        fn prop_base_speed_non_decreasing(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(base_scroll_speed(high) >= base_scroll_speed(low));
        }
    }
}
