//! RGB colors and the psychedelic palette

use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const RED: Rgb = Rgb(255, 100, 100);
pub const CYAN: Rgb = Rgb(0, 255, 255);
pub const MAGENTA: Rgb = Rgb(255, 0, 255);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const PINK: Rgb = Rgb(255, 105, 180);
pub const PURPLE: Rgb = Rgb(148, 0, 211);
pub const LIME: Rgb = Rgb(50, 255, 50);
pub const BLUE: Rgb = Rgb(100, 100, 255);
pub const GRAY: Rgb = Rgb(150, 150, 150);

/// Colors cycled through while the acid effect is active
pub const PSYCHEDELIC: [Rgb; 9] = [MAGENTA, CYAN, PINK, PURPLE, ORANGE, LIME, YELLOW, RED, BLUE];

/// Cycle through the psychedelic palette by index
#[inline]
pub fn psychedelic(index: u64) -> Rgb {
    PSYCHEDELIC[(index % PSYCHEDELIC.len() as u64) as usize]
}

/// Pseudo-random psychedelic color for a (frame, salt) pair
///
/// Stable for a given frame so composing the screen twice gives the same
/// picture, but jumps around from frame to frame.
pub fn flicker(frame: u64, salt: u64) -> Rgb {
    let hash = frame
        .wrapping_mul(2654435761)
        .wrapping_add(salt.wrapping_mul(40503))
        .rotate_left(13)
        .wrapping_mul(2654435761);
    psychedelic(hash >> 16)
}
