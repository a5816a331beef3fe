use std::path::PathBuf;

use color_eyre::eyre::Result;
use itertools::Itertools;
use pacsim_minimax::paranoid::MinimaxAgent;

use crate::board_file::{load_board, load_options};

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Board to solve, either a text layout or a JSON game
    #[clap(short, long, value_parser)]
    board: PathBuf,

    /// Number of full rounds to look ahead. Overrides the options file
    #[clap(short, long, value_parser)]
    depth: Option<usize>,

    /// JSON file with search options and evaluation weights
    #[clap(short, long, value_parser)]
    options: Option<PathBuf>,

    /// Print the whole game tree
    #[clap(short, long)]
    tree: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let (board, turn) = load_board(&self.board)?;
        let options = load_options(self.options.as_deref(), self.depth)?;

        println!("{board}");
        println!();

        let agent = MinimaxAgent::new(board, turn, "pacman", options);

        let Some(result) = agent.single_minimax() else {
            println!("There is no Pac-Man on this board");
            return Ok(());
        };

        for (dir, score) in result.options() {
            let score = score.map_or("unscored".to_owned(), |s| format!("{s:?}"));
            println!("{dir}: {score}");
        }

        match result.best_move() {
            Some((dir, score)) => {
                println!("At turn {turn}, Pac-Man should move {dir} ({score:?})");
                println!(
                    "Expected route: {}",
                    result
                        .chosen_route()
                        .iter()
                        .map(|(actor, dir)| format!("{actor} {dir}"))
                        .join(", ")
                );
            }
            None => println!("At turn {turn}, there is no move to make"),
        }

        println!(
            "Searched {} nodes, {} of them leaves",
            result.node_count(),
            result.leaf_count()
        );

        if self.tree {
            println!();
            println!("{}", result.to_text_tree());
        }

        Ok(())
    }
}
