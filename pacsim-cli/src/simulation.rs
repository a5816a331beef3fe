//! The game loop around the engine
//!
//! Every tick Pac-Man asks the engine for a move and takes it, then each ghost takes one step
//! along a shortest path toward him. Ghosts with several equally short options pick one at
//! random from a seeded generator, so a seed always replays the same game.

use std::collections::HashMap;

use pacsim_minimax::paranoid::{MinimaxAgent, SearchOptions};
use pacsim_types::{
    shortest_path::bfs_distances,
    types::{Actor, AgentLocatableGame, AgentMovableGame, Direction},
    Board, Position,
};
use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};

/// How a simulated game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Outcome {
    /// Pac-Man ate every pellet
    Cleared,
    /// A ghost reached Pac-Man's cell
    Caught,
    /// The engine had no move to offer
    Stalled,
    /// The tick limit was hit with the game still going
    OutOfTicks,
}

impl Outcome {
    pub fn all() -> [Self; 4] {
        [
            Outcome::Cleared,
            Outcome::Caught,
            Outcome::Stalled,
            Outcome::OutOfTicks,
        ]
    }
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tick {
    pub turn: i32,
    pub pacman: Option<Direction>,
    pub ghosts: Vec<Option<Direction>>,
    pub outcome: Option<Outcome>,
}

#[derive(Debug)]
pub(crate) struct Simulation {
    board: Board,
    turn: i32,
    options: SearchOptions,
    rng: StdRng,
}

impl Simulation {
    pub fn new(board: Board, turn: i32, options: SearchOptions, seed: u64) -> Self {
        Self {
            board,
            turn,
            options,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> i32 {
        self.turn
    }

    /// Play one tick. Once a tick reports an outcome the game is over
    pub fn tick(&mut self) -> Tick {
        let agent = MinimaxAgent::new(self.board.clone(), self.turn, "pacman", self.options);

        let mut tick = Tick {
            turn: self.turn,
            pacman: None,
            ghosts: vec![],
            outcome: None,
        };

        let (dir, pacman) = match (agent.choose_move(), self.board.find_maximizer()) {
            (Some(dir), Some(pacman)) => (dir, pacman),
            _ => {
                tick.outcome = Some(Outcome::Stalled);
                return tick;
            }
        };

        let pacman = pacman.step(dir);
        self.board = self.board.move_agent(Actor::Maximizer, &pacman);
        self.turn += 1;
        tick.pacman = Some(dir);

        if self.board.is_cleared() {
            tick.outcome = Some(Outcome::Cleared);
            return tick;
        }

        let round = Actor::round(self.board.find_minimizers().len());
        for ghost in round.iter().filter(|a| !a.is_maximizer()) {
            let step = self.chase_step(*ghost, &pacman);
            if let (Some(dir), Some(from)) = (step, self.board.position_of(*ghost)) {
                self.board = self.board.move_agent(*ghost, &from.step(dir));
            }
            debug!(ghost = %ghost, direction = ?step, "ghost moved");
            tick.ghosts.push(step);

            if self.board.is_caught() {
                tick.outcome = Some(Outcome::Caught);
                return tick;
            }
        }

        tick
    }

    /// Play until the game ends or `max_ticks` ticks have been played, calling `on_tick` after
    /// every tick
    pub fn run(&mut self, max_ticks: usize, mut on_tick: impl FnMut(&Self, &Tick)) -> Outcome {
        for _ in 0..max_ticks {
            let tick = self.tick();
            on_tick(self, &tick);

            if let Some(outcome) = tick.outcome {
                info!(turn = self.turn, ?outcome, "game over");
                return outcome;
            }
        }

        info!(turn = self.turn, "ran out of ticks");
        Outcome::OutOfTicks
    }

    /// Play `runs` games from `board`, seeding run `n` with `seed + n`
    ///
    /// `on_run` sees each run's seed, outcome and final turn. Returns how often each outcome
    /// came up
    pub fn tally(
        board: &Board,
        turn: i32,
        options: SearchOptions,
        seed: u64,
        runs: u64,
        max_ticks: usize,
        mut on_run: impl FnMut(u64, Outcome, i32),
    ) -> HashMap<Outcome, usize> {
        (0..runs)
            .map(|n| {
                let seed = seed.wrapping_add(n);
                let mut simulation = Self::new(board.clone(), turn, options, seed);
                let outcome = simulation.run(max_ticks, |_, _| {});
                on_run(seed, outcome, simulation.turn());

                outcome
            })
            .counts()
    }

    /// A random direction among those that bring `ghost` one step closer to `target`
    ///
    /// Ghosts that can't reach their target wander to any open neighbor instead
    fn chase_step(&mut self, ghost: Actor, target: &Position) -> Option<Direction> {
        let from = self.board.position_of(ghost)?;
        let layout = self.board.layout();
        let distances = bfs_distances(layout, ghost, target);

        let open: Vec<Direction> = Direction::all()
            .into_iter()
            .filter(|dir| !layout.is_wall(&from.step(*dir)))
            .collect();

        let closer: Vec<Direction> = match distances.get(&from) {
            Some(d) => open
                .iter()
                .copied()
                .filter(|dir| {
                    distances
                        .get(&from.step(*dir))
                        .map_or(false, |next| next + 1 == *d)
                })
                .collect(),
            None => vec![],
        };

        if closer.is_empty() {
            open.choose(&mut self.rng).copied()
        } else {
            closer.choose(&mut self.rng).copied()
        }
    }
}
