#![deny(missing_debug_implementations, missing_docs)]
//! Game representation for the Pac-Man pursuit game.
//!
//! The grid is split in two: an immutable [compact_representation::Layout] (walls, the ghost
//! house and the pellets present when the layout was loaded) that is shared behind an `Arc`, and
//! a cheap-to-clone [compact_representation::Board] snapshot that records where the agents are
//! and which pellets have been eaten since. Search code only talks to the board through the
//! capability traits in [types].

pub mod compact_representation;
pub mod shortest_path;
pub mod types;
pub mod wire_representation;

pub use compact_representation::{Board, Cell, Layout, LayoutError};
pub use types::{Direction, Position};
