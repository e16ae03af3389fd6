//! Death screen: the gates of hell
//!
//! Animated through the caller's RNG, so consecutive calls flicker.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::buffer::{Blanks, Cell, Depth, ScreenBuffer, centered};
use crate::art;
use crate::color::{self, Rgb};
use crate::consts::{SCREEN_COLS, SCREEN_ROWS};

const FLAME_GLYPHS: [char; 7] = ['^', 'W', 'M', '*', '~', 'v', 'A'];
const FLAME_COLORS: [Rgb; 4] = [color::RED, color::ORANGE, color::YELLOW, Rgb(255, 100, 0)];
const GATE_FLAME_COLORS: [Rgb; 4] = [color::RED, color::ORANGE, color::YELLOW, Rgb(255, 50, 0)];
const CHAR_GLYPHS: [char; 4] = ['#', '=', '_', '~'];

const EMBER_CHANCE: f64 = 0.1;
const FLAME_COUNT: usize = 40;
const FLAME_SPREAD: i32 = 8;
const FLAME_ROWS: std::ops::RangeInclusive<i32> = 8..=18;
const DEATH_PLAYER_ROW: i32 = 19;
const PROMPT: &str = "PRESS SPACE TO CONTINUE";
const PROMPT_BLINK: u64 = 30;

/// Compose the death screen
pub fn compose_game_over<R: Rng + ?Sized>(
    score: u64,
    high_score: u64,
    frame: u64,
    rng: &mut R,
) -> ScreenBuffer {
    let mut screen = ScreenBuffer::new();
    let (cols, rows) = (SCREEN_COLS as i32, SCREEN_ROWS as i32);

    // Embers, darker toward the top
    for y in 0..rows {
        for x in 0..cols {
            if rng.random_bool(EMBER_CHANCE) {
                let glow = Rgb(50 + (y * 3) as u8, 0, 0);
                screen.put(x, y, Cell::new('.', glow, Depth::Near));
            }
        }
    }

    let gates_x = centered(art::art_width(art::GATES_OF_HELL));
    for (i, row) in art::GATES_OF_HELL.iter().enumerate() {
        for (j, glyph) in row.chars().enumerate() {
            if glyph == ' ' {
                continue;
            }
            let tint = gate_color(glyph, rng);
            screen.put(gates_x + j as i32, i as i32, Cell::new(glyph, tint, Depth::Near));
        }
    }

    screen.draw_art(
        art::DEATH_PLAYER,
        cols / 2 - 1,
        DEATH_PLAYER_ROW,
        Depth::Near,
        Blanks::Skip,
        |_, _| color::CYAN,
    );

    // Flames pouring out of the gate, only over empty or ember cells
    let center = cols / 2;
    for _ in 0..FLAME_COUNT {
        let x = center + rng.random_range(-FLAME_SPREAD..=FLAME_SPREAD);
        let y = rng.random_range(FLAME_ROWS);
        let glyph = *FLAME_GLYPHS.choose(rng).unwrap_or(&'^');
        let tint = *FLAME_COLORS.choose(rng).unwrap_or(&color::RED);
        let open = screen
            .get(x, y)
            .is_some_and(|cell| matches!(cell.glyph, ' ' | '.'));
        if open {
            screen.put(x, y, Cell::new(glyph, tint, Depth::Near));
        }
    }

    // Charred ground
    for x in 0..cols {
        let glyph = *CHAR_GLYPHS.choose(rng).unwrap_or(&'#');
        let tint = if rng.random_bool(0.7) {
            Rgb(40, 20, 10)
        } else {
            Rgb(60, 30, 0)
        };
        screen.put(x, rows - 3, Cell::new(glyph, tint, Depth::Near));
    }

    let scores = format!("Score: {score}  High: {high_score}");
    screen.draw_text(
        &scores,
        centered(scores.chars().count()),
        rows - 2,
        color::GRAY,
        Depth::Near,
    );

    if (frame / PROMPT_BLINK) % 2 == 0 {
        screen.draw_text(PROMPT, centered(PROMPT.len()), rows - 1, color::CYAN, Depth::Near);
    }

    screen
}

/// Per-glyph coloring of the gate art
fn gate_color<R: Rng + ?Sized>(glyph: char, rng: &mut R) -> Rgb {
    match glyph {
        '(' | ')' => {
            if rng.random_bool(0.7) {
                *GATE_FLAME_COLORS.choose(rng).unwrap_or(&color::RED)
            } else {
                Rgb(255, 200, 0)
            }
        }
        '^' => *[color::ORANGE, color::YELLOW, color::RED]
            .choose(rng)
            .unwrap_or(&color::ORANGE),
        'A'..='Z' => {
            if rng.random_bool(0.9) {
                Rgb(200, 0, 0)
            } else {
                Rgb(255, 100, 0)
            }
        }
        '|' | '_' | '/' | '\\' => {
            if rng.random_bool(0.85) {
                Rgb(80, 80, 90)
            } else {
                Rgb(120, 60, 0)
            }
        }
        'o' => color::CYAN,
        _ => Rgb(100, 100, 110),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn line(screen: &ScreenBuffer, row: usize) -> String {
        screen.to_text().lines().nth(row).unwrap_or_default().to_string()
    }

    #[test]
    fn test_score_line_and_prompt() {
        let mut rng = Pcg32::seed_from_u64(1);
        let screen = compose_game_over(123, 456, 0, &mut rng);
        assert!(line(&screen, SCREEN_ROWS - 2).contains("Score: 123  High: 456"));
        assert!(line(&screen, SCREEN_ROWS - 1).contains(PROMPT));

        let blinked = compose_game_over(123, 456, PROMPT_BLINK, &mut rng);
        assert!(!line(&blinked, SCREEN_ROWS - 1).contains(PROMPT));
    }

    #[test]
    fn test_gate_title_is_drawn() {
        let mut rng = Pcg32::seed_from_u64(2);
        let screen = compose_game_over(0, 0, 0, &mut rng);
        // Embers may sit between the letters
        let title = line(&screen, 0).replace('.', " ");
        assert!(title.contains("A B A N D O N"));
    }

    #[test]
    fn test_charred_ground_row() {
        let mut rng = Pcg32::seed_from_u64(3);
        let screen = compose_game_over(0, 0, 0, &mut rng);
        let ground = line(&screen, SCREEN_ROWS - 3);
        assert!(ground.chars().all(|c| CHAR_GLYPHS.contains(&c)));
    }

    #[test]
    fn test_death_player_in_cyan() {
        let mut rng = Pcg32::seed_from_u64(4);
        let screen = compose_game_over(0, 0, 0, &mut rng);
        let head = screen.get(SCREEN_COLS as i32 / 2, DEATH_PLAYER_ROW).copied();
        assert_eq!(head.map(|c| (c.glyph, c.color)), Some(('o', color::CYAN)));
    }

    #[test]
    fn test_flames_animate_between_calls() {
        let mut rng = Pcg32::seed_from_u64(5);
        let first = compose_game_over(10, 10, 0, &mut rng);
        let second = compose_game_over(10, 10, 0, &mut rng);
        assert_ne!(first, second);
    }
}
