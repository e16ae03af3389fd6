//! Running-screen compositor
//!
//! Layers are painted back to front; later layers overwrite earlier ones.
//! Every world-space row is shifted by the camera, overlays are not.

use super::buffer::{Blanks, Cell, Depth, ScreenBuffer, centered};
use crate::art;
use crate::color::{self, Rgb};
use crate::consts::*;
use crate::sim::{AcidLevel, Bullet, Environment, GameEngine};

/// Salts that keep the per-layer acid flicker independent
mod salt {
    pub const DECORATION: u64 = 1;
    pub const SNOW: u64 = 2;
    pub const BACKGROUND: u64 = 3;
    pub const FILL: u64 = 4;
    pub const GROUND: u64 = 5;
    pub const OBSTACLE: u64 = 6;
}

const MOON_COLOR: Rgb = Rgb(200, 200, 220);
const SKY_COL: i32 = 65;
const SKY_ROW: i32 = 1;
const FLASH_ROW: i32 = 2;

/// Compose the running screen for the engine's current state
pub fn compose_screen(engine: &GameEngine) -> ScreenBuffer {
    let mut screen = ScreenBuffer::new();
    let frame = Frame::new(engine);

    frame.sky(&mut screen);
    frame.scenery(&mut screen);
    frame.terrain(&mut screen);
    frame.entities(&mut screen);
    frame.player(&mut screen);
    frame.overlays(&mut screen);

    if engine.player.acid_level() == AcidLevel::Tripping {
        screen.substitute(art::trip_glyph);
    }
    screen
}

/// Per-call view of the engine with the camera applied
struct Frame<'a> {
    engine: &'a GameEngine,
    cam_y: i32,
    environment: Environment,
    acid: bool,
}

impl<'a> Frame<'a> {
    fn new(engine: &'a GameEngine) -> Self {
        Self {
            engine,
            cam_y: engine.camera_y as i32,
            environment: Environment::for_score(engine.score),
            acid: engine.player.acid_timer > 0,
        }
    }

    /// World row to screen row
    #[inline]
    fn row(&self, world_row: i32) -> i32 {
        world_row - self.cam_y
    }

    /// Base color, or a flickering one while the acid effect runs
    fn tint(&self, base: Rgb, salt: u64) -> Rgb {
        if self.acid {
            color::flicker(self.engine.frame, salt)
        } else {
            base
        }
    }

    fn sky(&self, screen: &mut ScreenBuffer) {
        for star in &self.engine.stars {
            screen.put(
                star.col,
                self.row(star.row),
                Cell::new(star.glyph, star.color, Depth::Far),
            );
        }

        if !self.environment.has_sky() {
            return;
        }
        let is_day = (self.engine.score / 500) % 2 == 0;
        let (body, body_color) = if is_day {
            (art::SUN, color::YELLOW)
        } else {
            (art::MOON, MOON_COLOR)
        };
        screen.draw_art(
            body,
            SKY_COL,
            self.row(SKY_ROW),
            Depth::Far,
            Blanks::Skip,
            |_, _| body_color,
        );
    }

    /// Background decorations and ambient particles
    fn scenery(&self, screen: &mut ScreenBuffer) {
        for (n, decoration) in self.engine.decorations.iter().enumerate() {
            let tint = self.tint(decoration.color, salt::DECORATION + ((n as u64) << 8));
            screen.draw_art(
                decoration.art,
                decoration.x as i32,
                self.row(decoration.row),
                Depth::Far,
                Blanks::Skip,
                |_, _| tint,
            );
        }

        for (n, flake) in self.engine.snowflakes.iter().enumerate() {
            let tint = self.tint(color::WHITE, salt::SNOW + ((n as u64) << 8));
            screen.put(
                flake.pos.x as i32,
                self.row(flake.pos.y as i32),
                Cell::new(flake.glyph, tint, Depth::Mid),
            );
        }

        for blob in &self.engine.lava_blobs {
            screen.put(
                blob.pos.x as i32,
                self.row(blob.pos.y as i32),
                Cell::new(blob.glyph, blob.color, Depth::Mid),
            );
        }
    }

    /// Background band, fill band and the ground line
    fn terrain(&self, screen: &mut ScreenBuffer) {
        let theme = self.environment.theme();
        let cols = SCREEN_COLS as i32;

        let bg_color = self.tint(theme.bg_color, salt::BACKGROUND);
        let bg_offset = self.engine.bg_scroll_offset as i32;
        for x in 0..cols {
            let shifted = x + bg_offset;
            let lift = (shifted / 8) % 3 - 1;
            let glyph = cycle(theme.bg_glyphs, shifted);
            screen.put(
                x,
                self.row(BG_TERRAIN_TOP + lift),
                Cell::new(glyph, bg_color, Depth::Mid),
            );
        }

        let fill_color = self.tint(theme.fill_color, salt::FILL);
        let fill_glyphs = [theme.fill_glyph, '.', theme.fill_glyph, ':'];
        let fill_offset = (self.engine.scroll_offset * FILL_PARALLAX) as i32;
        let ground_row = GROUND_ROW as i32;
        for y in BG_TERRAIN_BOTTOM..ground_row {
            for x in 0..cols {
                let glyph = cycle(&fill_glyphs, x + fill_offset + y);
                screen.put(x, self.row(y), Cell::new(glyph, fill_color, Depth::Mid));
            }
        }

        let ground_color = self.tint(theme.ground_color, salt::GROUND);
        let ground_offset = self.engine.scroll_offset as i32;
        for x in 0..cols {
            let glyph = cycle(theme.ground_glyphs, x + ground_offset);
            screen.put(x, self.row(ground_row), Cell::new(glyph, ground_color, Depth::Near));
        }
    }

    /// Obstacles, power-ups, puffs and bullets
    fn entities(&self, screen: &mut ScreenBuffer) {
        for (n, obstacle) in self.engine.obstacles.iter().enumerate() {
            if !obstacle.alive {
                continue;
            }
            let tint = self.tint(color::RED, salt::OBSTACLE + ((n as u64) << 8));
            screen.draw_art(
                obstacle.art,
                obstacle.pos.x as i32,
                self.row(obstacle.pos.y as i32),
                Depth::Near,
                Blanks::Erase,
                |_, _| tint,
            );
        }

        for powerup in &self.engine.powerups {
            let tint = powerup.kind.color();
            screen.draw_art(
                powerup.kind.art(),
                powerup.pos.x as i32,
                self.row(powerup.pos.y as i32),
                Depth::Near,
                Blanks::Skip,
                |_, _| tint,
            );
        }

        for puff in &self.engine.fart_puffs {
            screen.put(
                puff.pos.x as i32,
                self.row(puff.pos.y as i32),
                Cell::new(puff.glyph(), color::LIME, Depth::Near),
            );
        }

        for bullet in &self.engine.bullets {
            screen.draw_text(
                Bullet::GLYPHS,
                bullet.pos.x as i32,
                self.row(bullet.pos.y as i32),
                color::ORANGE,
                Depth::Near,
            );
        }
    }

    /// Nirvana halo, then the player sprite on top
    fn player(&self, screen: &mut ScreenBuffer) {
        let player = &self.engine.player;
        let frame = self.engine.frame;
        let (px, py) = (player.pos.x as i32, player.pos.y as i32);

        if player.in_nirvana() {
            let eye_x = px + player.width as i32 / 2 - art::art_width(art::RAINBOW_EYE) as i32 / 2;
            screen.draw_art(
                art::RAINBOW_EYE,
                eye_x,
                self.row(py - 1),
                Depth::Near,
                Blanks::Skip,
                |i, j| color::psychedelic((i + j) as u64 + frame / 3),
            );
        }

        let mut tint = if player.acid_timer > 0 {
            color::psychedelic(frame)
        } else {
            color::CYAN
        };
        if player.grace_period > 0 && (frame / 4) % 2 == 0 {
            tint = color::WHITE;
        }
        screen.draw_art(
            player.pose(frame),
            px,
            self.row(py),
            Depth::Near,
            Blanks::Skip,
            |_, _| tint,
        );
    }

    /// Flash texts, pinned to the screen rather than the world
    fn overlays(&self, screen: &mut ScreenBuffer) {
        let player = &self.engine.player;
        let flashes = [
            (player.acid_flash_timer, art::ACID_FLASH),
            (player.nirvana_flash_timer, art::NIRVANA_FLASH),
        ];
        for (timer, text) in flashes {
            if timer == 0 || timer % 6 >= 3 {
                continue;
            }
            let frame = self.engine.frame;
            screen.draw_art(
                text,
                centered(art::art_width(text)),
                FLASH_ROW,
                Depth::Near,
                Blanks::Skip,
                |i, j| color::psychedelic((i + j) as u64 + frame),
            );
        }
    }
}

/// Glyph from a repeating cycle; negative positions wrap too
#[inline]
fn cycle(glyphs: &[char], position: i32) -> char {
    if glyphs.is_empty() {
        return ' ';
    }
    glyphs[position.rem_euclid(glyphs.len() as i32) as usize]
}
