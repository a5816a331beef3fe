//! The JSON form of a game, used for fixtures and for handing boards between tools
//!
//! ```json
//! { "turn": 3, "rows": ["#####", "#P.G#", "#####"] }
//! ```

use serde::{Deserialize, Serialize};

use crate::compact_representation::{Board, LayoutError};

/// A game as it is stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// How many ticks have been played so far
    #[serde(default)]
    pub turn: i32,
    /// The board in the text layout format, one string per row
    pub rows: Vec<String>,
}

impl Game {
    /// Capture a board at the given turn
    pub fn from_board(board: &Board, turn: i32) -> Self {
        Self {
            turn,
            rows: board.to_string().lines().map(str::to_owned).collect(),
        }
    }

    /// Parse the rows into a [Board]
    pub fn to_board(&self) -> Result<Board, LayoutError> {
        self.rows.join("\n").parse()
    }
}
