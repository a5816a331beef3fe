use std::{cmp::Reverse, fmt::Debug};

use decorum::N64;
use pacsim_types::types::{AgentLocatableGame, PickupGettableGame};

/// Utility reported for a won position, above anything the heuristic produces
pub const WIN_VALUE: f64 = 1_000_000.0;

/// Utility reported for a lost position, below anything the heuristic produces
pub const LOSS_VALUE: f64 = -1_000_000.0;

/// How close a ghost has to be, in Manhattan distance, before we count the position as lost
pub const DEFAULT_CRITICAL_DISTANCE: u32 = 1;

#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Copy)]
/// The wrapped score type. This takes into account the score provided by the score function, but
/// wraps it with a Score based on the game state. This allows us to say that wins are better than
/// any score and loses are worse than any score, etc.
pub enum WrappedScore<ScoreType>
where
    ScoreType: PartialOrd + Ord + Debug + Clone + Copy,
{
    /// A ghost got us, the depth is recorded because we prefer surviving longer
    Lose(i64),
    /// We order this based on the score provided by the score function
    Scored(ScoreType),
    /// Every pellet is gone, the depth is recorded because we prefer winning sooner
    Win(Reverse<i64>),
}

impl<ScoreType> WrappedScore<ScoreType>
where
    ScoreType: PartialOrd + Ord + Debug + Clone + Copy,
{
    /// Returns the best possible score
    pub fn best_possible_score() -> Self {
        WrappedScore::Win(Reverse(i64::MIN))
    }

    /// Returns the worst possible score
    pub fn worst_possible_score() -> Self {
        WrappedScore::Lose(i64::MIN)
    }

    /// Returns the depth from this score IFF the score is a terminal node. Otherwise returns None
    pub fn terminal_depth(&self) -> Option<i64> {
        match &self {
            Self::Win(Reverse(d)) | Self::Lose(d) => Some(*d),
            Self::Scored(_) => None,
        }
    }
}

impl WrappedScore<N64> {
    /// Flatten this score to a single number, with wins and losses at fixed extremes
    pub fn utility(&self) -> f64 {
        match self {
            WrappedScore::Lose(_) => LOSS_VALUE,
            WrappedScore::Scored(s) => s.into_inner(),
            WrappedScore::Win(_) => WIN_VALUE,
        }
    }
}

/// This trait is used to control something that can return a score from a game board
///
/// We use this trait to be able to layer in different scoring approaches
pub trait Scorable<GameType, ScoreType> {
    /// Convert the given GameType into a ScoreType
    fn score(&self, game: &GameType) -> ScoreType;
}

impl<GameType, ScoreType, FnLike: Fn(&GameType) -> ScoreType> Scorable<GameType, ScoreType>
    for FnLike
{
    fn score(&self, game: &GameType) -> ScoreType {
        (self)(game)
    }
}

/// Provides an implementation for `wrapped_score` if the implementer implements the `score`
/// function.
///
/// `wrapped_score` takes care of the win and lose short-circuits so that the underlying scoring
/// functions only ever see positions that are still in play
pub trait WrappedScorable<GameType, ScoreType>
where
    ScoreType: PartialOrd + Ord + Copy + Debug,
    GameType: AgentLocatableGame + PickupGettableGame,
{
    /// This is the the scoring function for positions that are neither won nor lost
    fn score(&self, node: &GameType) -> ScoreType;

    /// Ghosts at or within this Manhattan distance of Pac-Man count as a loss
    fn critical_distance(&self) -> u32 {
        DEFAULT_CRITICAL_DISTANCE
    }

    /// Score a terminal node of the search tree
    ///
    /// `depth` is the number of plies played to reach `node`. No pellets left is a win no matter
    /// where the ghosts are. Otherwise a missing Pac-Man or a ghost inside the critical distance
    /// is a loss. Anything else is scored by [WrappedScorable::score].
    fn wrapped_score(&self, node: &GameType, depth: i64) -> WrappedScore<ScoreType> {
        if node.pickup_count() == 0 {
            return WrappedScore::Win(Reverse(depth));
        }

        let maximizer = match node.find_maximizer() {
            Some(p) => p,
            None => return WrappedScore::Lose(depth),
        };

        let critical_distance = self.critical_distance();
        if node
            .find_minimizers()
            .iter()
            .any(|m| m.manhattan_distance(&maximizer) <= critical_distance)
        {
            return WrappedScore::Lose(depth);
        }

        WrappedScore::Scored(self.score(node))
    }
}
