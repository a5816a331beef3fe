use std::fmt::Debug;

use pacsim_types::types::{Actor, AgentLocatableGame, Direction, Position};
use text_trees::StringTreeNode;

use super::WrappedScore;

#[derive(Debug, Clone, PartialEq)]
/// One node of the game tree
///
/// A configuration records where every agent stands after the move that produced it, and which
/// agent is about to move. Only that agent's position changes across the edges to its children.
pub struct Configuration<ScoreType>
where
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// The agent that moves next from this configuration
    pub actor: Actor,
    /// The move that produced this configuration. `None` for the root
    pub last_move: Option<(Actor, Direction)>,
    #[allow(missing_docs)]
    pub maximizer: Position,
    /// Ghost positions, in ghost order
    pub minimizers: Vec<Position>,
    /// `None` until this node is evaluated (leaves) or reached by [Configuration::minimax_value]
    pub value: Option<WrappedScore<ScoreType>>,
    /// Successors in generation order: North, East, South, West. Illegal moves have no node
    pub children: Vec<Self>,
}

impl<ScoreType> Configuration<ScoreType>
where
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// Snapshot the agent positions of `game`
    ///
    /// Returns `None` if Pac-Man is not on the board
    pub fn from_game<GameType: AgentLocatableGame>(
        game: &GameType,
        actor: Actor,
        last_move: Option<(Actor, Direction)>,
    ) -> Option<Self> {
        Some(Self {
            actor,
            last_move,
            maximizer: game.find_maximizer()?,
            minimizers: game.find_minimizers(),
            value: None,
            children: vec![],
        })
    }

    /// Is this a leaf of the tree, either at the depth limit or a dead end
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Where the given agent stands in this configuration
    pub fn position_of(&self, actor: Actor) -> Option<Position> {
        match actor.minimizer_index() {
            None => Some(self.maximizer),
            Some(i) => self.minimizers.get(i).copied(),
        }
    }

    /// Back the leaf scores up the tree
    ///
    /// Leaves return their stored value. Nodes where Pac-Man moves take the max over their
    /// children, nodes where a ghost moves take the min. Children that were never given a value
    /// are left out of the reduction. Every visited node has its value overwritten with the
    /// result, so running this twice on the same tree gives the same answer.
    pub fn minimax_value(&mut self) -> Option<WrappedScore<ScoreType>> {
        if self.is_leaf() {
            return self.value;
        }

        let values = self.children.iter_mut().filter_map(|c| c.minimax_value());
        let reduced = if self.actor.is_maximizer() {
            values.max()
        } else {
            values.min()
        };

        self.value = reduced;
        reduced
    }

    /// The strictly best child of an already backed-up tree, and the move leading to it
    ///
    /// The first child wins ties, so with equal scores North beats East beats South beats West.
    /// Returns `None` when there are no valued children.
    pub fn best_option(&self) -> Option<(&Self, WrappedScore<ScoreType>)> {
        let mut best: Option<(&Self, WrappedScore<ScoreType>)> = None;

        for child in &self.children {
            let value = match child.value {
                Some(v) => v,
                None => continue,
            };

            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((child, value)),
            }
        }

        best
    }

    /// The direction Pac-Man should take from this configuration, and the score it leads to
    ///
    /// The direction is worked out from Pac-Man's position here and in the chosen child.
    pub fn best_move(&self) -> Option<(Direction, WrappedScore<ScoreType>)> {
        let (child, value) = self.best_option()?;

        Direction::from_delta(&self.maximizer, &child.maximizer).map(|d| (d, value))
    }

    /// Each of the moves available from this node with the score it was backed up with
    pub fn options(&self) -> Vec<(Direction, Option<WrappedScore<ScoreType>>)> {
        self.children
            .iter()
            .filter_map(|child| child.last_move.map(|(_, dir)| (dir, child.value)))
            .collect()
    }

    /// Returns all the moves in the 'route' through the game tree that minimax expects
    /// This is useful for debugging as it shows each of the moves we and the ghosts made during
    /// the search
    pub fn chosen_route(&self) -> Vec<(Actor, Direction)> {
        let chosen = self
            .children
            .iter()
            .find(|c| c.value.is_some() && c.value == self.value);

        match chosen {
            None => vec![],
            Some(child) => {
                let mut tail = child.chosen_route();
                if let Some(m) = child.last_move {
                    tail.insert(0, m);
                }
                tail
            }
        }
    }

    /// How many nodes are in this tree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// How many leaves are in this tree
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(|c| c.leaf_count()).sum()
        }
    }

    /// This returns a visual representation of the game tree that minimax generated
    /// It shows the score, the moving agent and the move at each level
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        let mut node = StringTreeNode::new(format!("{} {:?}", label, self.value));

        for child in &self.children {
            let label = match child.last_move {
                Some((actor, dir)) => format!("{actor} {dir}"),
                None => "?".to_owned(),
            };
            node.push_node(child.to_text_tree_node(label));
        }

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(
        last_move: (Actor, Direction),
        maximizer: Position,
        value: WrappedScore<i32>,
    ) -> Configuration<i32> {
        Configuration {
            actor: Actor::Maximizer,
            last_move: Some(last_move),
            maximizer,
            minimizers: vec![],
            value: Some(value),
            children: vec![],
        }
    }

    fn ghost_node(
        dir: Direction,
        maximizer: Position,
        leaves: Vec<Configuration<i32>>,
    ) -> Configuration<i32> {
        Configuration {
            actor: Actor::Minimizer1,
            last_move: Some((Actor::Maximizer, dir)),
            maximizer,
            minimizers: vec![],
            value: None,
            children: leaves,
        }
    }

    /// Pac-Man at (1, 1) can go North or East, a single ghost answers each move twice
    fn small_tree() -> Configuration<i32> {
        let north = Position::new(0, 1);
        let east = Position::new(1, 2);

        Configuration {
            actor: Actor::Maximizer,
            last_move: None,
            maximizer: Position::new(1, 1),
            minimizers: vec![],
            value: None,
            children: vec![
                ghost_node(
                    Direction::North,
                    north,
                    vec![
                        leaf((Actor::Minimizer1, Direction::South), north, WrappedScore::Scored(3)),
                        leaf((Actor::Minimizer1, Direction::West), north, WrappedScore::Scored(8)),
                    ],
                ),
                ghost_node(
                    Direction::East,
                    east,
                    vec![
                        leaf((Actor::Minimizer1, Direction::North), east, WrappedScore::Scored(5)),
                        leaf((Actor::Minimizer1, Direction::East), east, WrappedScore::Scored(6)),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_max_over_mins() {
        let mut tree = small_tree();

        assert_eq!(tree.minimax_value(), Some(WrappedScore::Scored(5)));
        assert_eq!(tree.children[0].value, Some(WrappedScore::Scored(3)));
        assert_eq!(tree.children[1].value, Some(WrappedScore::Scored(5)));
    }

    #[test]
    fn test_minimax_value_is_idempotent() {
        let mut tree = small_tree();
        let first = tree.minimax_value();
        let snapshot = tree.clone();

        assert_eq!(tree.minimax_value(), first);
        assert_eq!(tree, snapshot);
    }

    #[test]
    fn test_root_value_is_max_of_children() {
        let mut tree = small_tree();
        let root = tree.minimax_value();
        let children_max = tree
            .children
            .iter_mut()
            .filter_map(|c| c.minimax_value())
            .max();

        assert_eq!(root, children_max);
    }

    #[test]
    fn test_best_move_and_route() {
        let mut tree = small_tree();
        tree.minimax_value();

        assert_eq!(
            tree.best_move(),
            Some((Direction::East, WrappedScore::Scored(5)))
        );
        assert_eq!(
            tree.chosen_route(),
            vec![
                (Actor::Maximizer, Direction::East),
                (Actor::Minimizer1, Direction::North)
            ]
        );
        assert_eq!(
            tree.options(),
            vec![
                (Direction::North, Some(WrappedScore::Scored(3))),
                (Direction::East, Some(WrappedScore::Scored(5)))
            ]
        );
    }

    #[test]
    fn test_ties_go_to_the_first_child() {
        let mut tree = small_tree();
        tree.children[0].children[0].value = Some(WrappedScore::Scored(5));
        tree.minimax_value();

        assert_eq!(
            tree.best_move(),
            Some((Direction::North, WrappedScore::Scored(5)))
        );
    }

    #[test]
    fn test_unvalued_children_are_skipped() {
        let mut tree = small_tree();
        tree.children[1].children.clear();
        tree.minimax_value();

        assert_eq!(tree.value, Some(WrappedScore::Scored(3)));
        assert_eq!(
            tree.best_move(),
            Some((Direction::North, WrappedScore::Scored(3)))
        );
    }

    #[test]
    fn test_childless_root_has_no_move() {
        let mut root: Configuration<i32> = Configuration {
            actor: Actor::Maximizer,
            last_move: None,
            maximizer: Position::new(0, 0),
            minimizers: vec![],
            value: None,
            children: vec![],
        };

        assert_eq!(root.minimax_value(), None);
        assert_eq!(root.best_move(), None);
        assert!(root.chosen_route().is_empty());
    }

    #[test]
    fn test_counts_and_text_tree() {
        let mut tree = small_tree();
        tree.minimax_value();

        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.leaf_count(), 4);

        let text = tree.to_text_tree();
        assert!(text.contains("root Some(Scored(5))"));
        assert!(text.contains("pacman east Some(Scored(5))"));
        assert!(text.contains("ghost-1 west Some(Scored(8))"));
    }
}
