//! Character-grid rendering
//!
//! Produces plain glyph/color/depth grids; any terminal or canvas front end
//! can draw them.

pub mod buffer;
pub mod compositor;
pub mod game_over;

pub use buffer::{Blanks, Cell, Depth, ScreenBuffer};
pub use compositor::compose_screen;
pub use game_over::compose_game_over;
