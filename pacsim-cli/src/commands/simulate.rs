use std::path::PathBuf;

use color_eyre::eyre::Result;
use itertools::Itertools;

use crate::{
    board_file::{load_board, load_options},
    simulation::{Outcome, Simulation},
};

#[derive(clap::Args, Debug)]
pub(crate) struct Simulate {
    /// Board to start from, either a text layout or a JSON game
    #[clap(short, long, value_parser)]
    board: PathBuf,

    /// Number of full rounds Pac-Man looks ahead. Overrides the options file
    #[clap(short, long, value_parser)]
    depth: Option<usize>,

    /// JSON file with search options and evaluation weights
    #[clap(short, long, value_parser)]
    options: Option<PathBuf>,

    /// Stop after this many ticks
    #[clap(short, long, value_parser, default_value_t = 200)]
    max_ticks: usize,

    /// Seed for the ghosts' tie breaking. Run `n` is seeded with `seed + n`
    #[clap(short, long, value_parser, default_value_t = 0)]
    seed: u64,

    /// Play this many games and report how they ended. Boards are only printed for a single run
    #[clap(short, long, value_parser, default_value_t = 1)]
    runs: u64,
}

impl Simulate {
    pub(crate) fn run(self) -> Result<()> {
        let (board, turn) = load_board(&self.board)?;
        let options = load_options(self.options.as_deref(), self.depth)?;

        if self.runs > 1 {
            let outcomes = Simulation::tally(
                &board,
                turn,
                options,
                self.seed,
                self.runs,
                self.max_ticks,
                |seed, outcome, turns| println!("Seed {seed}: {}", summary(outcome, turns)),
            );

            println!();
            for outcome in Outcome::all() {
                let count = outcomes.get(&outcome).copied().unwrap_or(0);
                println!("{outcome:?}: {count} of {}", self.runs);
            }

            return Ok(());
        }

        println!("{board}");
        println!();

        let mut simulation = Simulation::new(board, turn, options, self.seed);
        let outcome = simulation.run(self.max_ticks, |sim, tick| {
            let pacman = tick
                .pacman
                .map_or("nothing".to_owned(), |dir| dir.to_string());
            let ghosts = tick
                .ghosts
                .iter()
                .map(|dir| dir.map_or("stay".to_owned(), |d| d.to_string()))
                .join(", ");

            println!("Turn {}: pacman {pacman}, ghosts [{ghosts}]", tick.turn);
            println!("{}", sim.board());
            println!();
        });

        println!("{}", summary(outcome, simulation.turn()));

        Ok(())
    }
}

fn summary(outcome: Outcome, turn: i32) -> String {
    let text = match outcome {
        Outcome::Cleared => "Pac-Man cleared the board",
        Outcome::Caught => "Pac-Man was caught",
        Outcome::Stalled => "Pac-Man had no move to make",
        Outcome::OutOfTicks => "Ran out of ticks",
    };

    format!("{text} after {turn} turns")
}
