use std::{fmt::Debug, marker::PhantomData};

use decorum::N64;
use derivative::Derivative;
use itertools::Itertools;
use pacsim_types::types::{
    AgentLocatableGame, AgentMovableGame, Direction, NeighborDeterminableGame, PickupGettableGame,
    ShortestPathCalculable,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

use super::{tree, Configuration, EvalWeights, LeafEvaluator, Scorable, WrappedScorable};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Optional properties that can be defined for a [MinimaxAgent]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use pacsim_minimax::paranoid::SearchOptions;
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// ```
pub struct SearchOptions {
    /// How many full rounds to look ahead. Zero means no move is ever chosen
    pub depth: usize,
    /// Weights handed to the default [LeafEvaluator]
    pub weights: EvalWeights,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            weights: EvalWeights::default(),
        }
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a game board and a scoring function and can be used to run
/// minimax
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxAgent<GameType, ScoreType, ScorableType>
where
    ScorableType: Scorable<GameType, ScoreType>,
{
    /// The snapshot to decide a move for
    pub game: GameType,
    /// Which tick of the game this is, only used for tracing
    pub turn: i32,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// Only used for tracing
    pub name: &'static str,
    options: SearchOptions,
    _phantom: PhantomData<ScoreType>,
}

impl<GameType, ScoreType, ScorableType> WrappedScorable<GameType, ScoreType>
    for MinimaxAgent<GameType, ScoreType, ScorableType>
where
    ScoreType: Debug + PartialOrd + Ord + Copy,
    GameType: AgentLocatableGame + PickupGettableGame,
    ScorableType: Scorable<GameType, ScoreType>,
{
    fn score(&self, node: &GameType) -> ScoreType {
        self.score_function.score(node)
    }

    fn critical_distance(&self) -> u32 {
        self.options.weights.critical_distance
    }
}

impl<GameType, ScoreType, ScorableType> MinimaxAgent<GameType, ScoreType, ScorableType>
where
    ScorableType: Scorable<GameType, ScoreType>,
{
    /// Construct a `MinimaxAgent` with your own scoring function
    ///
    /// Anything that implements [Scorable] works, including plain closures. Wins and losses are
    /// still decided by [WrappedScorable::wrapped_score], so the function only sees positions
    /// that are still in play.
    pub fn with_heuristic(
        game: GameType,
        turn: i32,
        score_function: ScorableType,
        name: &'static str,
        options: SearchOptions,
    ) -> Self {
        Self {
            game,
            turn,
            score_function,
            name,
            options,
            _phantom: PhantomData,
        }
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

impl<GameType> MinimaxAgent<GameType, N64, LeafEvaluator>
where
    GameType: AgentLocatableGame + PickupGettableGame + ShortestPathCalculable,
{
    /// Construct a `MinimaxAgent` that scores leaves with the default [LeafEvaluator]
    ///
    /// ```rust
    /// use pacsim_minimax::paranoid::{MinimaxAgent, SearchOptions};
    /// use pacsim_types::{Board, Direction};
    ///
    /// let board: Board = "P .".parse().unwrap();
    /// let agent = MinimaxAgent::new(board, 0, "pacman", SearchOptions::default());
    ///
    /// assert_eq!(agent.choose_move(), Some(Direction::East));
    /// ```
    pub fn new(game: GameType, turn: i32, name: &'static str, options: SearchOptions) -> Self {
        let evaluator = LeafEvaluator::for_game(&game, options.weights);

        Self::with_heuristic(game, turn, evaluator, name, options)
    }
}

impl<GameType, ScoreType, ScorableType> MinimaxAgent<GameType, ScoreType, ScorableType>
where
    GameType: AgentLocatableGame + NeighborDeterminableGame + AgentMovableGame + PickupGettableGame,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
    ScorableType: Scorable<GameType, ScoreType>,
{
    /// Build and evaluate the tree without backing the scores up
    ///
    /// Returns `None` when Pac-Man is not on the board.
    pub fn build_tree(&self) -> Option<Configuration<ScoreType>> {
        tree::build(&self.game, self.options.depth, self)
    }

    /// Build the tree and back the leaf scores up to the root
    ///
    /// The return value is a recursive struct that tells you the score of the current node, and
    /// the score of all its children nodes. This is also the benchmark entry point
    pub fn single_minimax(&self) -> Option<Configuration<ScoreType>> {
        let mut root = self.build_tree()?;
        root.minimax_value();

        Some(root)
    }

    /// Pick the next move to make
    ///
    /// Returns `None` when there is nothing to decide: the depth is zero, Pac-Man is missing, or
    /// every direction is blocked.
    pub fn choose_move(&self) -> Option<Direction> {
        info_span!(
            "choose_move",
            agent_name = self.name,
            turn = self.turn,
            depth = self.options.depth,
            chosen_score = tracing::field::Empty,
            chosen_direction = tracing::field::Empty,
            nodes = tracing::field::Empty,
        )
        .in_scope(|| {
            if self.options.depth == 0 {
                warn!("Search depth is zero, not choosing a move");
                return None;
            }

            let root = self.single_minimax()?;

            for (dir, value) in root.options() {
                debug!(direction = %dir, score = ?value, "scored option");
            }

            let current_span = tracing::Span::current();
            current_span.record("nodes", root.node_count());

            match root.best_move() {
                Some((dir, score)) => {
                    current_span.record("chosen_score", format!("{:?}", score).as_str());
                    current_span.record("chosen_direction", dir.to_string().as_str());
                    let route = root
                        .chosen_route()
                        .iter()
                        .map(|(actor, dir)| format!("{actor} {dir}"))
                        .join(", ");
                    debug!(%route, "expected route");

                    Some(dir)
                }
                None => {
                    warn!("No legal moves for Pac-Man");
                    None
                }
            }
        })
    }
}

/// Choose a move for `game` with the default heuristic, looking `depth` rounds ahead
pub fn choose_move<GameType>(game: &GameType, depth: usize) -> Option<Direction>
where
    GameType: AgentLocatableGame
        + NeighborDeterminableGame
        + AgentMovableGame
        + PickupGettableGame
        + ShortestPathCalculable
        + Clone,
{
    let options = SearchOptions {
        depth,
        ..Default::default()
    };

    MinimaxAgent::new(game.clone(), 0, "pacman", options).choose_move()
}
