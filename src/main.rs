//! ASCII Runner entry point
//!
//! Headless demo: runs one game with the autopilot, logs events, prints the
//! final screen and records the score.

use std::path::PathBuf;

use ascii_runner::sim::autopilot;
use ascii_runner::{HighScores, Settings};

fn main() {
    env_logger::init();
    log::info!("ASCII Runner (native) starting...");

    let settings = std::env::args()
        .nth(1)
        .map(|path| Settings::load(&PathBuf::from(path)))
        .unwrap_or_default();

    let mut engine = settings.engine();
    log::info!("Seed: {}", engine.seed());

    while !engine.is_game_over() && engine.frame < settings.max_frames {
        if settings.autopilot {
            autopilot::decide(&engine).apply(&mut engine);
        }
        let events = engine.update();
        if events.stomped {
            log::info!("Stomp at score {}", engine.score);
        }
        if events.farted {
            log::debug!("Fart jump at score {}", engine.score);
        }
        for kind in &events.collected {
            log::info!("Picked up {:?} at score {}", kind, engine.score);
        }
    }

    let screen = if engine.is_game_over() {
        engine.game_over_buffer()
    } else {
        engine.screen_buffer()
    };
    print!("{}", screen.to_text());

    let state = engine.snapshot();
    println!("Final score: {} (frame {})", state.score, state.frame);

    let mut scores = HighScores::load(&settings.high_scores_path);
    if let Some(rank) = scores.add_score(settings.player_name.clone(), state.score) {
        println!("New high score! Rank #{rank}");
        if let Err(err) = scores.save(&settings.high_scores_path) {
            log::warn!("Could not save high scores: {err}");
        }
    }
    for (i, entry) in scores.entries.iter().enumerate() {
        println!("{:>2}. {:<12} {:>6}", i + 1, entry.name, entry.score);
    }
}
