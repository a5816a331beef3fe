//! Positions, directions and the capability traits a game board exposes to the search.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::compact_representation::Cell;

/// A cell on the grid, addressed by row (top to bottom) and column (left to right)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    #[allow(missing_docs)]
    pub row: i32,
    #[allow(missing_docs)]
    pub col: i32,
}

impl Position {
    /// Construct a position from a row and a column
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move this position by the given `(row, col)` vector
    pub fn add_vec(&self, (row, col): (i32, i32)) -> Self {
        Self {
            row: self.row + row,
            col: self.col + col,
        }
    }

    /// The position one step in the given direction
    pub fn step(&self, dir: Direction) -> Self {
        self.add_vec(dir.to_vector())
    }

    /// Grid distance ignoring walls
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four cardinal moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[allow(missing_docs)]
    North,
    #[allow(missing_docs)]
    East,
    #[allow(missing_docs)]
    South,
    #[allow(missing_docs)]
    West,
}

impl Direction {
    /// All the directions, in the order the search generates them
    pub const fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// The `(row, col)` offset of a single step in this direction
    pub const fn to_vector(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Index of this direction in [Direction::all]
    pub const fn as_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// The direction of a single cardinal step from `from` to `to`
    ///
    /// Returns `None` if the two positions are not exactly one step apart
    pub fn from_delta(from: &Position, to: &Position) -> Option<Direction> {
        let delta = (to.row - from.row, to.col - from.col);

        Direction::all()
            .into_iter()
            .find(|dir| dir.to_vector() == delta)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };

        write!(f, "{s}")
    }
}

/// What occupies a neighboring cell
///
/// Agents take precedence over the cell underneath them. Cells off the edge of the grid are
/// reported as [Cell::Wall].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// The static cell, with no agent on it
    Cell(Cell),
    /// Pac-Man is standing here
    Maximizer,
    /// A ghost is standing here
    Minimizer,
}

impl CellKind {
    /// Is this a wall (or off the grid)
    pub fn is_wall(&self) -> bool {
        matches!(self, CellKind::Cell(Cell::Wall))
    }
}

/// The agents of the game, in the order they act within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Actor {
    /// Pac-Man
    Maximizer,
    /// The first ghost
    Minimizer1,
    /// The second ghost
    Minimizer2,
}

impl Actor {
    /// Is this Pac-Man
    pub fn is_maximizer(&self) -> bool {
        matches!(self, Actor::Maximizer)
    }

    /// The ghost index of this actor, `None` for Pac-Man
    pub fn minimizer_index(&self) -> Option<usize> {
        match self {
            Actor::Maximizer => None,
            Actor::Minimizer1 => Some(0),
            Actor::Minimizer2 => Some(1),
        }
    }

    /// The round-robin turn order for a board with `minimizers` ghosts on it
    ///
    /// Ghosts beyond the second are not supported and are left out
    pub fn round(minimizers: usize) -> &'static [Actor] {
        static ALL: [Actor; 3] = [Actor::Maximizer, Actor::Minimizer1, Actor::Minimizer2];

        &ALL[..=minimizers.min(2)]
    }
}

impl Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Actor::Maximizer => "pacman",
            Actor::Minimizer1 => "ghost-1",
            Actor::Minimizer2 => "ghost-2",
        };

        write!(f, "{s}")
    }
}

/// Find the agents on a board
pub trait AgentLocatableGame {
    /// Where Pac-Man is, if still on the board
    fn find_maximizer(&self) -> Option<Position>;

    /// Where the ghosts are, in ghost order
    fn find_minimizers(&self) -> Vec<Position>;

    /// Where the given actor is
    fn position_of(&self, actor: Actor) -> Option<Position> {
        match actor.minimizer_index() {
            None => self.find_maximizer(),
            Some(i) => self.find_minimizers().get(i).copied(),
        }
    }

    /// Has a ghost landed on Pac-Man's cell. A board without Pac-Man counts as caught
    fn is_caught(&self) -> bool {
        match self.find_maximizer() {
            Some(pos) => self.find_minimizers().contains(&pos),
            None => true,
        }
    }
}

/// Classify the cells around a position
pub trait NeighborDeterminableGame {
    /// The neighboring position in `dir` and what currently occupies it
    fn neighbor(&self, dir: Direction, pos: &Position) -> (Position, CellKind);
}

/// Relocate an agent, producing a new board
pub trait AgentMovableGame: Sized {
    /// Returns a board where `actor` has left its cell and now stands at `to`
    ///
    /// `self` is left untouched. When Pac-Man moves onto a pellet the pellet is removed from the
    /// returned board only. Agents are addressed by [Actor] rather than by their old cell since
    /// ghosts may share a cell.
    fn move_agent(&self, actor: Actor, to: &Position) -> Self;
}

/// Query the pellets that are left
pub trait PickupGettableGame {
    /// Every pellet that has not been eaten yet
    fn remaining_pickups(&self) -> Vec<Position>;

    /// How many pellets are left
    fn pickup_count(&self) -> usize {
        self.remaining_pickups().len()
    }
}

/// Wall-respecting shortest paths
///
/// `mover` decides which cells can be walked through, so Pac-Man's paths go around the ghost
/// house while a ghost's may cut through it
pub trait ShortestPathCalculable {
    /// The number of steps on a shortest path from `from` to `to`
    ///
    /// Returns `None` if `to` can't be reached
    fn shortest_path_length(&self, mover: Actor, from: &Position, to: &Position) -> Option<u32>;

    /// The number of steps to the closest of `targets`
    fn shortest_distance(
        &self,
        mover: Actor,
        from: &Position,
        targets: &[Position],
    ) -> Option<u32>;

    /// The number of steps to each of `targets`, in the same order
    fn shortest_path_lengths(
        &self,
        mover: Actor,
        from: &Position,
        targets: &[Position],
    ) -> Vec<Option<u32>> {
        targets
            .iter()
            .map(|t| self.shortest_path_length(mover, from, t))
            .collect()
    }
}
