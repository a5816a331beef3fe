use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use pacsim_minimax::paranoid::SearchOptions;
use pacsim_types::{wire_representation::Game, Board};

/// Read a board and the turn it was captured at
///
/// `.json` files use the wire format, anything else is read as a text layout starting at turn 0
pub(crate) fn load_board(path: &Path) -> Result<(Board, i32)> {
    let contents =
        fs::read_to_string(path).wrap_err_with(|| format!("Couldn't read {}", path.display()))?;

    if path.extension().map_or(false, |ext| ext == "json") {
        let game: Game = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("{} is not a valid game", path.display()))?;
        let board = game
            .to_board()
            .wrap_err_with(|| format!("Bad layout in {}", path.display()))?;

        Ok((board, game.turn))
    } else {
        let board = contents
            .parse::<Board>()
            .wrap_err_with(|| format!("Bad layout in {}", path.display()))?;

        Ok((board, 0))
    }
}

/// Search options from an optional JSON file, with the depth overridden if one was given
pub(crate) fn load_options(path: Option<&Path>, depth: Option<usize>) -> Result<SearchOptions> {
    let mut options = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .wrap_err_with(|| format!("Couldn't read {}", path.display()))?;
            serde_json::from_str(&contents)
                .wrap_err_with(|| format!("{} is not a valid options file", path.display()))?
        }
        None => SearchOptions::default(),
    };

    if let Some(depth) = depth {
        options.depth = depth;
    }

    Ok(options)
}
