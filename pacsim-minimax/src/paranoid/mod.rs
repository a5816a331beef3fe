//! The `paranoid` minimax variant: Pac-Man maximizes, and every ghost is assumed to be working
//! with the others to minimize Pac-Man's score.
//!
//! Each node is scored from Pac-Man's point of view. When propagating scores up the tree we take
//! the highest score on Pac-Man's plies and the lowest on the ghosts' plies. The whole tree is
//! expanded to the requested depth, nothing is pruned.
//!
//! ```rust
//! use pacsim_minimax::paranoid::{MinimaxAgent, SearchOptions};
//! use pacsim_types::{wire_representation::Game, Board};
//!
//! // Boards are usually stored as JSON fixtures
//! let json = r########"{
//!     "turn": 0,
//!     "rows": ["#######", "#P. ..#", "#.#-#.#", "#.G G.#", "#######"]
//! }"########;
//! let wire_game: Game = serde_json::from_str(json).unwrap();
//! let board: Board = wire_game.to_board().unwrap();
//!
//! // Look one full round ahead: Pac-Man, then each ghost
//! let options = SearchOptions {
//!     depth: 1,
//!     ..Default::default()
//! };
//!
//! let agent = MinimaxAgent::new(board, wire_game.turn, "pacman", options);
//!
//! let tree = agent.single_minimax().unwrap();
//! println!("{}", tree.to_text_tree());
//!
//! assert!(agent.choose_move().is_some());
//! ```

mod score;
pub use score::{
    Scorable, WrappedScorable, WrappedScore, DEFAULT_CRITICAL_DISTANCE, LOSS_VALUE, WIN_VALUE,
};

mod heuristic;
pub use heuristic::{EvalWeights, LeafEvaluator};

mod configuration;
pub use configuration::Configuration;

pub mod tree;

mod eval;
pub use eval::{choose_move, MinimaxAgent, SearchOptions};
