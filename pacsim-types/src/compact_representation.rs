//! The structurally shared board used by the search
//!
//! A [Layout] never changes once loaded. A [Board] points at its layout through an `Arc` and
//! only records what can change during a game: the agent positions and the pellets eaten so
//! far. Cloning a board therefore costs a reference count bump and copying a handful of
//! positions, which is what lets every edge of the search tree carry its own snapshot.

use std::{fmt::Display, str::FromStr, sync::Arc};

use itertools::Itertools;
use thiserror::Error;
use tinyvec::{ArrayVec, TinyVec};

use crate::{
    shortest_path,
    types::{
        Actor, AgentLocatableGame, AgentMovableGame, CellKind, Direction,
        NeighborDeterminableGame, PickupGettableGame, Position, ShortestPathCalculable,
    },
};

/// The most ghosts a board can hold
pub const MAX_MINIMIZERS: usize = 2;

/// The static contents of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable for everyone
    Wall,
    /// Open floor
    Empty,
    /// A regular pellet
    Food,
    /// A power pellet
    Power,
    /// The ghosts' home enclosure. Ghosts may walk here, Pac-Man may not
    House,
}

impl Cell {
    /// Pellets are the pickups Pac-Man is trying to clear
    pub fn is_pickup(&self) -> bool {
        matches!(self, Cell::Food | Cell::Power)
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Wall),
            ' ' | 'P' | 'G' => Some(Cell::Empty),
            '.' => Some(Cell::Food),
            'o' => Some(Cell::Power),
            '-' => Some(Cell::House),
            _ => None,
        }
    }

    fn as_char(&self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Empty => ' ',
            Cell::Food => '.',
            Cell::Power => 'o',
            Cell::House => '-',
        }
    }
}

/// Problems found while reading a text layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LayoutError {
    #[error("the layout has no rows")]
    Empty,

    #[error("unknown cell '{character}' at row {row}, column {col}")]
    UnknownCell {
        character: char,
        row: usize,
        col: usize,
    },

    #[error("found a second Pac-Man at {second}, the first was at {first}")]
    MultipleMaximizers { first: Position, second: Position },

    #[error("found {count} ghosts, at most 2 are supported")]
    TooManyMinimizers { count: usize },
}

/// The immutable part of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    pickups: Vec<Position>,
}

impl Layout {
    /// Build a layout from rows of cells
    ///
    /// Rows shorter than the widest row are padded with walls
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, LayoutError> {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);

        if height == 0 || width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let padding = width - row.len();
            cells.extend(row);
            cells.extend(std::iter::repeat(Cell::Wall).take(padding));
        }

        let pickups = (0..height)
            .cartesian_product(0..width)
            .filter(|&(r, c)| cells[r * width + c].is_pickup())
            .map(|(r, c)| Position::new(r as i32, c as i32))
            .collect();

        Ok(Self {
            width,
            height,
            cells,
            pickups,
        })
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Is this position on the grid
    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// The static cell at `pos`. Anything off the grid is a wall
    pub fn cell_at(&self, pos: &Position) -> Cell {
        if self.in_bounds(pos) {
            self.cells[pos.row as usize * self.width + pos.col as usize]
        } else {
            Cell::Wall
        }
    }

    #[allow(missing_docs)]
    pub fn is_wall(&self, pos: &Position) -> bool {
        self.cell_at(pos) == Cell::Wall
    }

    /// Can `mover` never stand on `pos`. Walls block everyone, the house blocks Pac-Man
    pub fn blocks(&self, mover: Actor, pos: &Position) -> bool {
        match self.cell_at(pos) {
            Cell::Wall => true,
            Cell::House => mover.is_maximizer(),
            _ => false,
        }
    }

    /// The pellets present when the layout was built, in row-major order
    pub fn initial_pickups(&self) -> &[Position] {
        &self.pickups
    }
}

/// A snapshot of a game in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    layout: Arc<Layout>,
    maximizer: Option<Position>,
    minimizers: ArrayVec<[Position; MAX_MINIMIZERS]>,
    eaten: TinyVec<[Position; 8]>,
}

impl Board {
    /// Place the agents on a layout. No pellets have been eaten yet
    pub fn new(
        layout: Arc<Layout>,
        maximizer: Option<Position>,
        minimizers: &[Position],
    ) -> Result<Self, LayoutError> {
        if minimizers.len() > MAX_MINIMIZERS {
            return Err(LayoutError::TooManyMinimizers {
                count: minimizers.len(),
            });
        }

        let mut board = Self {
            layout,
            maximizer,
            minimizers: minimizers.iter().copied().collect(),
            eaten: TinyVec::default(),
        };

        // Pac-Man starting on a pellet has already eaten it
        if let Some(pos) = maximizer {
            board.eat(&pos);
        }

        Ok(board)
    }

    /// The shared static layout
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Remove Pac-Man from the board, as happens when a ghost catches him
    pub fn without_maximizer(&self) -> Self {
        Self {
            maximizer: None,
            ..self.clone()
        }
    }

    /// Is Pac-Man still alive and has he eaten everything
    pub fn is_cleared(&self) -> bool {
        self.maximizer.is_some() && self.pickup_count() == 0
    }

    fn is_eaten(&self, pos: &Position) -> bool {
        self.eaten.contains(pos)
    }

    fn eat(&mut self, pos: &Position) {
        if self.layout.cell_at(pos).is_pickup() && !self.is_eaten(pos) {
            self.eaten.push(*pos);
        }
    }

    /// The cell at `pos` as it is now, with eaten pellets turned into floor
    pub fn current_cell(&self, pos: &Position) -> Cell {
        match self.layout.cell_at(pos) {
            c if c.is_pickup() && self.is_eaten(pos) => Cell::Empty,
            c => c,
        }
    }
}

impl AgentLocatableGame for Board {
    fn find_maximizer(&self) -> Option<Position> {
        self.maximizer
    }

    fn find_minimizers(&self) -> Vec<Position> {
        self.minimizers.to_vec()
    }

    fn position_of(&self, actor: Actor) -> Option<Position> {
        match actor.minimizer_index() {
            None => self.maximizer,
            Some(i) => self.minimizers.get(i).copied(),
        }
    }
}

impl NeighborDeterminableGame for Board {
    fn neighbor(&self, dir: Direction, pos: &Position) -> (Position, CellKind) {
        let next = pos.step(dir);

        let kind = if self.minimizers.contains(&next) {
            CellKind::Minimizer
        } else if self.maximizer == Some(next) {
            CellKind::Maximizer
        } else {
            CellKind::Cell(self.current_cell(&next))
        };

        (next, kind)
    }
}

impl AgentMovableGame for Board {
    fn move_agent(&self, actor: Actor, to: &Position) -> Self {
        let mut next = self.clone();

        match actor.minimizer_index() {
            None => {
                if next.maximizer.is_some() {
                    next.maximizer = Some(*to);
                    next.eat(to);
                }
            }
            Some(i) => {
                if let Some(pos) = next.minimizers.get_mut(i) {
                    *pos = *to;
                }
            }
        }

        next
    }
}

impl PickupGettableGame for Board {
    fn remaining_pickups(&self) -> Vec<Position> {
        self.layout
            .initial_pickups()
            .iter()
            .filter(|p| !self.is_eaten(p))
            .copied()
            .collect()
    }

    fn pickup_count(&self) -> usize {
        self.layout.initial_pickups().len() - self.eaten.len()
    }
}

impl ShortestPathCalculable for Board {
    fn shortest_path_length(&self, mover: Actor, from: &Position, to: &Position) -> Option<u32> {
        shortest_path::bfs_distance(&self.layout, mover, from, std::slice::from_ref(to))
    }

    fn shortest_distance(
        &self,
        mover: Actor,
        from: &Position,
        targets: &[Position],
    ) -> Option<u32> {
        shortest_path::bfs_distance(&self.layout, mover, from, targets)
    }

    fn shortest_path_lengths(
        &self,
        mover: Actor,
        from: &Position,
        targets: &[Position],
    ) -> Vec<Option<u32>> {
        let distances = shortest_path::bfs_distances(&self.layout, mover, from);

        targets.iter().map(|t| distances.get(t).copied()).collect()
    }
}

impl FromStr for Board {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut maximizer: Option<Position> = None;
        let mut minimizers = vec![];
        let mut rows = vec![];

        for (r, line) in s.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());

            for (c, character) in line.chars().enumerate() {
                let pos = Position::new(r as i32, c as i32);
                let cell = Cell::from_char(character).ok_or(LayoutError::UnknownCell {
                    character,
                    row: r,
                    col: c,
                })?;

                match character {
                    'P' => {
                        if let Some(first) = maximizer {
                            return Err(LayoutError::MultipleMaximizers { first, second: pos });
                        }
                        maximizer = Some(pos);
                    }
                    'G' => minimizers.push(pos),
                    _ => {}
                }

                row.push(cell);
            }

            rows.push(row);
        }

        // Trailing blank lines are not part of the grid
        while rows.last().map_or(false, |r| r.is_empty()) {
            rows.pop();
        }

        let layout = Layout::new(rows)?;

        Board::new(Arc::new(layout), maximizer, &minimizers)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = (0..self.layout.height)
            .map(|r| {
                (0..self.layout.width)
                    .map(|c| {
                        let pos = Position::new(r as i32, c as i32);
                        if self.minimizers.contains(&pos) {
                            'G'
                        } else if self.maximizer == Some(pos) {
                            'P'
                        } else {
                            self.current_cell(&pos).as_char()
                        }
                    })
                    .collect::<String>()
            })
            .join("\n");

        write!(f, "{rendered}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
#######
#P..o #
# ### #
#  G -#
#######";

    #[test]
    fn test_parse_finds_agents_and_pickups() {
        let board: Board = SMALL.parse().unwrap();

        assert_eq!(board.find_maximizer(), Some(Position::new(1, 1)));
        assert_eq!(board.find_minimizers(), vec![Position::new(3, 3)]);
        assert_eq!(
            board.remaining_pickups(),
            vec![
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(1, 4)
            ]
        );
        assert_eq!(board.layout().width(), 7);
        assert_eq!(board.layout().height(), 5);
    }

    #[test]
    fn test_display_round_trips() {
        let board: Board = SMALL.parse().unwrap();

        assert_eq!(board.to_string(), SMALL);
    }

    #[test]
    fn test_short_rows_are_padded_with_walls() {
        let board: Board = "#P.\n#".parse().unwrap();

        assert_eq!(board.layout().cell_at(&Position::new(1, 2)), Cell::Wall);
        assert_eq!(board.to_string(), "#P.\n###");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Board>(), Err(LayoutError::Empty));
        assert_eq!(
            "#P#\n#x#".parse::<Board>(),
            Err(LayoutError::UnknownCell {
                character: 'x',
                row: 1,
                col: 1
            })
        );
        assert_eq!(
            "PP".parse::<Board>(),
            Err(LayoutError::MultipleMaximizers {
                first: Position::new(0, 0),
                second: Position::new(0, 1)
            })
        );
        assert_eq!(
            "PGGG".parse::<Board>(),
            Err(LayoutError::TooManyMinimizers { count: 3 })
        );
    }

    #[test]
    fn test_off_grid_neighbors_are_walls() {
        let board: Board = "P.".parse().unwrap();
        let origin = Position::new(0, 0);

        assert_eq!(
            board.neighbor(Direction::North, &origin),
            (Position::new(-1, 0), CellKind::Cell(Cell::Wall))
        );
        assert_eq!(
            board.neighbor(Direction::East, &origin),
            (Position::new(0, 1), CellKind::Cell(Cell::Food))
        );
    }

    #[test]
    fn test_neighbor_reports_agents_over_cells() {
        let board: Board = "PG\n. ".parse().unwrap();

        assert_eq!(
            board.neighbor(Direction::East, &Position::new(0, 0)).1,
            CellKind::Minimizer
        );
        assert_eq!(
            board.neighbor(Direction::West, &Position::new(0, 1)).1,
            CellKind::Maximizer
        );
    }

    #[test]
    fn test_moving_pacman_eats_only_in_the_new_board() {
        let board: Board = "P.o".parse().unwrap();
        let moved = board.move_agent(Actor::Maximizer, &Position::new(0, 1));

        assert_eq!(board.pickup_count(), 2);
        assert_eq!(moved.pickup_count(), 1);
        assert_eq!(moved.remaining_pickups(), vec![Position::new(0, 2)]);
        assert_eq!(moved.current_cell(&Position::new(0, 1)), Cell::Empty);
        assert_eq!(moved.to_string(), " Po");
    }

    #[test]
    fn test_moving_a_ghost_leaves_pellets_alone() {
        let board: Board = "G.P".parse().unwrap();
        let moved = board.move_agent(Actor::Minimizer1, &Position::new(0, 1));

        assert_eq!(moved.pickup_count(), 1);
        assert_eq!(moved.find_minimizers(), vec![Position::new(0, 1)]);
        assert_eq!(moved.to_string(), " GP");
    }

    #[test]
    fn test_stacked_ghosts_move_independently() {
        let layout = Layout::new(vec![vec![Cell::Empty; 3]]).unwrap();
        let board = Board::new(
            Arc::new(layout),
            None,
            &[Position::new(0, 1), Position::new(0, 1)],
        )
        .unwrap();

        let moved = board.move_agent(Actor::Minimizer2, &Position::new(0, 2));

        assert_eq!(
            moved.find_minimizers(),
            vec![Position::new(0, 1), Position::new(0, 2)]
        );
    }

    #[test]
    fn test_house_blocks_only_pacman() {
        let board: Board = "#####\n#P-.#\n#G  #\n#####".parse().unwrap();
        let pacman = Position::new(1, 1);
        let pellet = Position::new(1, 3);

        assert!(board.layout().blocks(Actor::Maximizer, &Position::new(1, 2)));
        assert!(!board.layout().blocks(Actor::Minimizer1, &Position::new(1, 2)));
        assert_eq!(
            board.shortest_path_length(Actor::Maximizer, &pacman, &pellet),
            Some(4)
        );
        assert_eq!(
            board.shortest_path_length(Actor::Minimizer1, &pacman, &pellet),
            Some(2)
        );
    }

    #[test]
    fn test_caught_and_cleared() {
        let board: Board = "PG.".parse().unwrap();
        assert!(!board.is_caught());
        assert!(!board.is_cleared());

        let caught = board.move_agent(Actor::Minimizer1, &Position::new(0, 0));
        assert!(caught.is_caught());

        let cleared = "P".parse::<Board>().unwrap();
        assert!(cleared.is_cleared());
        assert!(!cleared.without_maximizer().is_cleared());
        assert!(cleared.without_maximizer().is_caught());
    }
}
