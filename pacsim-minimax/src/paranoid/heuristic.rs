use decorum::N64;
use pacsim_types::types::{Actor, AgentLocatableGame, PickupGettableGame, ShortestPathCalculable};
use serde::{Deserialize, Serialize};

use super::{score::DEFAULT_CRITICAL_DISTANCE, Scorable, WrappedScorable};

/// Tunable weights for [LeafEvaluator]
///
/// ```
/// use pacsim_minimax::paranoid::EvalWeights;
///
/// let defaults = EvalWeights::default();
///
/// assert_eq!(defaults.threat, 4.0);
/// assert_eq!(defaults.reward, 2.0);
/// assert_eq!(defaults.critical_distance, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Added for every pellet eaten between the start of the decision and the leaf
    pub progress: f64,
    /// Flat bonus for every leaf that is not lost, so safe positions beat risky ones
    pub safe_distance_bonus: f64,
    /// Subtracted, divided by the path length to the closest ghost
    pub threat: f64,
    /// Added, divided by the path length to the closest pellet
    pub reward: f64,
    /// Subtracted for every step of path length summed over all remaining pellets
    pub scatter: f64,
    /// Ghosts at or within this Manhattan distance make the leaf a loss
    pub critical_distance: u32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            progress: 10.0,
            safe_distance_bonus: 5.0,
            threat: 4.0,
            reward: 2.0,
            scatter: 0.01,
            critical_distance: DEFAULT_CRITICAL_DISTANCE,
        }
    }
}

/// The default leaf heuristic
///
/// Rewards eating pellets, staying away from the ghosts and being close to the next pellet, and
/// penalises leaving pellets spread far away. Wins and losses are handled by
/// [WrappedScorable::wrapped_score] before [Scorable::score] is ever reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafEvaluator {
    weights: EvalWeights,
    initial_pickups: usize,
}

impl LeafEvaluator {
    /// Build an evaluator for a decision starting from `game`
    ///
    /// The pellet count of `game` is the baseline for the progress term
    pub fn for_game<GameType: PickupGettableGame>(game: &GameType, weights: EvalWeights) -> Self {
        Self {
            weights,
            initial_pickups: game.pickup_count(),
        }
    }

    #[allow(missing_docs)]
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }
}

impl<GameType> Scorable<GameType, N64> for LeafEvaluator
where
    GameType: AgentLocatableGame + PickupGettableGame + ShortestPathCalculable,
{
    fn score(&self, game: &GameType) -> N64 {
        let weights = &self.weights;
        let me = match game.find_maximizer() {
            Some(p) => p,
            None => return N64::from(0.0),
        };

        let remaining = game.remaining_pickups();
        let eaten = self.initial_pickups.saturating_sub(remaining.len());

        let mut total = weights.progress * eaten as f64;

        // Ghost paths may cut through the house
        total += weights.safe_distance_bonus;
        let ghosts = game.find_minimizers();
        if let Some(d) = game.shortest_distance(Actor::Minimizer1, &me, &ghosts) {
            total -= weights.threat / d.max(1) as f64;
        }

        let distances = game.shortest_path_lengths(Actor::Maximizer, &me, &remaining);

        if let Some(nearest) = distances.iter().flatten().min() {
            total += weights.reward / (*nearest).max(1) as f64;
        }

        let spread: u32 = distances.iter().flatten().sum();
        total -= weights.scatter * spread as f64;

        N64::from(total)
    }
}

impl<GameType> WrappedScorable<GameType, N64> for LeafEvaluator
where
    GameType: AgentLocatableGame + PickupGettableGame + ShortestPathCalculable,
{
    fn score(&self, node: &GameType) -> N64 {
        Scorable::score(self, node)
    }

    fn critical_distance(&self) -> u32 {
        self.weights.critical_distance
    }
}
