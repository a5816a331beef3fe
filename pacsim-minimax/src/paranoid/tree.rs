//! Building the full game tree up to a fixed number of rounds
//!
//! A round is one move by every agent on the board, Pac-Man first and then each ghost in order.
//! `depth` counts rounds, so a depth of 2 on a board with two ghosts looks 6 plies ahead.

use std::fmt::Debug;

use pacsim_types::{
    compact_representation::Cell,
    types::{
        Actor, AgentLocatableGame, AgentMovableGame, CellKind, Direction,
        NeighborDeterminableGame, PickupGettableGame,
    },
};

use super::{Configuration, WrappedScorable};

/// Can `actor` step onto a cell that currently looks like `kind`
///
/// Pac-Man is kept out of walls, the ghost house and any cell holding a ghost. Ghosts are only
/// kept out of walls.
pub fn is_legal(actor: Actor, kind: CellKind) -> bool {
    match (actor.is_maximizer(), kind) {
        (_, CellKind::Cell(Cell::Wall)) => false,
        (true, CellKind::Minimizer | CellKind::Cell(Cell::House)) => false,
        _ => true,
    }
}

/// Build and evaluate the game tree rooted at `game`
///
/// Returns `None` when Pac-Man is not on the board. With a `depth` of zero the root is returned
/// without any children.
pub fn build<GameType, ScoreType, ScorerType>(
    game: &GameType,
    depth: usize,
    scorer: &ScorerType,
) -> Option<Configuration<ScoreType>>
where
    GameType: AgentLocatableGame + NeighborDeterminableGame + AgentMovableGame + PickupGettableGame,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
    ScorerType: WrappedScorable<GameType, ScoreType>,
{
    let round = Actor::round(game.find_minimizers().len());
    let mut root = Configuration::from_game(game, round[0], None)?;

    if depth > 0 {
        expand(&mut root, game, round, 0, 0, depth, scorer);
    }

    Some(root)
}

/// Generate the children of `node`, then recurse into each of them
///
/// `game` is the snapshot matching `node`, `ply` is the round we are in and `actor_index` is
/// the position of `node.actor` within `round`. A child is terminal once the last actor of the
/// final round has moved, or as soon as a ghost catches Pac-Man or the last pellet is eaten. A
/// non-terminal child that ends up with no legal continuation is a dead end and is evaluated
/// where it stands.
pub fn expand<GameType, ScoreType, ScorerType>(
    node: &mut Configuration<ScoreType>,
    game: &GameType,
    round: &[Actor],
    ply: usize,
    actor_index: usize,
    depth: usize,
    scorer: &ScorerType,
) where
    GameType: AgentLocatableGame + NeighborDeterminableGame + AgentMovableGame + PickupGettableGame,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
    ScorerType: WrappedScorable<GameType, ScoreType>,
{
    let actor = round[actor_index];
    let position = match game.position_of(actor) {
        Some(p) => p,
        None => return,
    };

    let (next_ply, next_index) = if actor_index + 1 == round.len() {
        (ply + 1, 0)
    } else {
        (ply, actor_index + 1)
    };
    let plies_played = (ply * round.len() + actor_index + 1) as i64;
    let is_terminal = next_ply == depth;

    for dir in Direction::all() {
        let (to, kind) = game.neighbor(dir, &position);
        if !is_legal(actor, kind) {
            continue;
        }

        let next_game = game.move_agent(actor, &to);
        let mut child =
            match Configuration::from_game(&next_game, round[next_index], Some((actor, dir))) {
                Some(c) => c,
                None => continue,
            };

        // A capture or a cleared board ends the game, whatever depth is left
        let is_over = next_game.is_caught() || next_game.pickup_count() == 0;

        if !is_terminal && !is_over {
            expand(
                &mut child,
                &next_game,
                round,
                next_ply,
                next_index,
                depth,
                scorer,
            );
        }

        if child.is_leaf() {
            child.value = Some(scorer.wrapped_score(&next_game, plies_played));
        }

        node.children.push(child);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as CountCell;

    use pacsim_types::{Board, Position};

    use super::*;
    use crate::paranoid::WrappedScore;

    /// Scores everything the same and counts how often it was asked
    #[derive(Debug, Default)]
    struct Counting {
        calls: CountCell<usize>,
    }

    impl WrappedScorable<Board, i64> for Counting {
        fn score(&self, _node: &Board) -> i64 {
            0
        }

        fn wrapped_score(&self, _node: &Board, depth: i64) -> WrappedScore<i64> {
            self.calls.set(self.calls.get() + 1);
            WrappedScore::Scored(depth)
        }
    }

    const TWO_GHOSTS: &str = include_str!("../../../fixtures/two_ghosts.txt");

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn check_edges(node: &Configuration<i64>, round: &[Actor]) {
        assert!(node.children.len() <= 4);

        let index = round.iter().position(|a| *a == node.actor).unwrap();
        let next = round[(index + 1) % round.len()];

        for child in &node.children {
            assert_eq!(child.actor, next);
            let (mover, dir) = child.last_move.unwrap();
            assert_eq!(mover, node.actor);

            let from = node.position_of(node.actor).unwrap();
            let to = child.position_of(node.actor).unwrap();
            assert_eq!(Direction::from_delta(&from, &to), Some(dir));

            for other in round.iter().filter(|a| **a != node.actor) {
                assert_eq!(node.position_of(*other), child.position_of(*other));
            }

            check_edges(child, round);
        }
    }

    #[test]
    fn test_legality() {
        let wall = CellKind::Cell(Cell::Wall);
        let house = CellKind::Cell(Cell::House);

        assert!(!is_legal(Actor::Maximizer, wall));
        assert!(!is_legal(Actor::Maximizer, house));
        assert!(!is_legal(Actor::Maximizer, CellKind::Minimizer));
        assert!(is_legal(Actor::Maximizer, CellKind::Cell(Cell::Food)));
        assert!(is_legal(Actor::Maximizer, CellKind::Cell(Cell::Power)));

        assert!(!is_legal(Actor::Minimizer1, wall));
        assert!(is_legal(Actor::Minimizer1, house));
        assert!(is_legal(Actor::Minimizer2, CellKind::Minimizer));
        assert!(is_legal(Actor::Minimizer2, CellKind::Maximizer));
    }

    #[test]
    fn test_depth_zero_is_a_bare_root() {
        let game = board(TWO_GHOSTS);
        let root = build(&game, 0, &Counting::default()).unwrap();

        assert!(root.children.is_empty());
        assert_eq!(root.value, None);
    }

    #[test]
    fn test_missing_pacman_builds_nothing() {
        let game = board(TWO_GHOSTS).without_maximizer();

        assert_eq!(build(&game, 1, &Counting::default()), None);
    }

    #[test]
    fn test_edges_move_only_the_actor() {
        let game = board(TWO_GHOSTS);
        let root = build(&game, 2, &Counting::default()).unwrap();

        assert_eq!(root.actor, Actor::Maximizer);
        check_edges(&root, Actor::round(2));
    }

    #[test]
    fn test_every_leaf_is_evaluated_once() {
        let game = board(TWO_GHOSTS);
        let scorer = Counting::default();
        let root = build(&game, 1, &scorer).unwrap();

        assert_eq!(scorer.calls.get(), root.leaf_count());

        fn all_leaves_valued(node: &Configuration<i64>) -> bool {
            if node.is_leaf() {
                node.value.is_some()
            } else {
                node.value.is_none() && node.children.iter().all(all_leaves_valued)
            }
        }
        assert!(all_leaves_valued(&root));
    }

    #[test]
    fn test_one_round_counts_all_three_plies() {
        let game = board(TWO_GHOSTS);
        let root = build(&game, 1, &Counting::default()).unwrap();

        let leaf = &root.children[0].children[0].children[0];
        assert!(leaf.is_leaf());
        assert_eq!(leaf.actor, Actor::Maximizer);
        assert_eq!(leaf.value, Some(WrappedScore::Scored(3)));
    }

    #[test]
    fn test_corridor_without_ghosts() {
        // Pac-Man can only go east first, then east or back west
        let game = board("P .");
        let root = build(&game, 2, &Counting::default()).unwrap();

        assert_eq!(root.node_count(), 4);
        assert_eq!(root.leaf_count(), 2);
        assert_eq!(
            root.children[0].last_move,
            Some((Actor::Maximizer, Direction::East))
        );
        assert_eq!(root.children[0].maximizer, Position::new(0, 1));
    }

    #[test]
    fn test_dead_ends_are_evaluated_where_they_stop() {
        // Pac-Man has to back into the pocket, and the ghost can follow to seal it
        let game = board("# PG #");
        let root = build(&game, 2, &Counting::default()).unwrap();

        assert_eq!(root.children.len(), 1);
        let west = &root.children[0];
        assert_eq!(west.last_move, Some((Actor::Maximizer, Direction::West)));

        let sealed = west
            .children
            .iter()
            .find(|c| c.minimizers == vec![Position::new(0, 2)])
            .unwrap();
        assert!(sealed.is_leaf());
        assert_eq!(sealed.value, Some(WrappedScore::Scored(2)));

        let open = west
            .children
            .iter()
            .find(|c| c.minimizers == vec![Position::new(0, 4)])
            .unwrap();
        assert!(!open.is_leaf());
    }

    #[test]
    fn test_a_capture_ends_the_branch() {
        let game = board("#   P G.#");
        let scorer = Counting::default();
        let root = build(&game, 3, &scorer).unwrap();

        let east = root
            .children
            .iter()
            .find(|c| c.last_move == Some((Actor::Maximizer, Direction::East)))
            .unwrap();
        let caught = east
            .children
            .iter()
            .find(|c| c.minimizers == vec![east.maximizer])
            .unwrap();

        assert!(caught.is_leaf());
        assert_eq!(caught.value, Some(WrappedScore::Scored(2)));
        assert_eq!(scorer.calls.get(), root.leaf_count());
    }

    #[test]
    fn test_eating_the_last_pellet_ends_the_branch() {
        let game = board("P.");
        let root = build(&game, 3, &Counting::default()).unwrap();

        assert_eq!(root.node_count(), 2);
        assert!(root.children[0].is_leaf());
        assert_eq!(root.children[0].value, Some(WrappedScore::Scored(1)));
    }

    #[test]
    fn test_walled_in_pacman_has_no_children() {
        let game = board("###\n#P#\n###");
        let scorer = Counting::default();
        let root = build(&game, 2, &scorer).unwrap();

        assert!(root.children.is_empty());
        assert_eq!(scorer.calls.get(), 0);
    }

    #[test]
    fn test_pacman_never_enters_the_house_or_a_ghost() {
        let game = board("#-P G#");
        let root = build(&game, 1, &Counting::default()).unwrap();

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].maximizer, Position::new(0, 3));

        let blocked = board("#-PG#");
        let root = build(&blocked, 1, &Counting::default()).unwrap();
        assert!(root.children.is_empty());
    }
}
