pub mod simulate;
pub mod solve;

use simulate::Simulate;
use solve::Solve;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Choose a single move for a board and explain the choice
    Solve(Solve),
    /// Play a whole game against chasing ghosts
    Simulate(Simulate),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Simulate(s) => s.run()?,
        }

        Ok(())
    }
}
