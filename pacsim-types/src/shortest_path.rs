//! Breadth first search over the static layout
//!
//! Every step costs one, so a plain BFS gives exact shortest paths. Walls block everyone and
//! the ghost house blocks Pac-Man, agents are ignored.

use std::collections::{HashMap, VecDeque};

use crate::{
    compact_representation::Layout,
    types::{Actor, Direction, Position},
};

/// The number of steps `mover` needs from `start` to the closest of `targets`
///
/// Returns `Some(0)` when `start` is itself a target and `None` when no target is reachable or
/// `targets` is empty.
pub fn bfs_distance(
    layout: &Layout,
    mover: Actor,
    start: &Position,
    targets: &[Position],
) -> Option<u32> {
    bfs_inner(layout, mover, start, targets).map(|(cost, _, _)| cost)
}

/// Flood the layout from `start`, returning the distance to every cell `mover` can reach
pub fn bfs_distances(layout: &Layout, mover: Actor, start: &Position) -> HashMap<Position, u32> {
    let mut distances = HashMap::new();

    if layout.blocks(mover, start) {
        return distances;
    }

    let mut to_search = VecDeque::new();
    distances.insert(*start, 0);
    to_search.push_back(*start);

    while let Some(current) = to_search.pop_front() {
        let cost = distances[&current];

        for neighbor in Direction::all().map(|dir| current.step(dir)) {
            if layout.blocks(mover, &neighbor) || distances.contains_key(&neighbor) {
                continue;
            }

            distances.insert(neighbor, cost + 1);
            to_search.push_back(neighbor);
        }
    }

    distances
}

/// A shortest path from `start` to the closest of `targets`, both ends included
///
/// Returns an empty path when nothing is reachable
pub fn bfs_path(
    layout: &Layout,
    mover: Actor,
    start: &Position,
    targets: &[Position],
) -> Vec<Position> {
    let mut path = vec![];

    if let Some((_, best_target, mut paths_from)) = bfs_inner(layout, mover, start, targets) {
        let mut current = Some(best_target);

        while let Some(c) = current {
            current = paths_from.remove(&c).flatten();
            path.push(c);
        }
    }

    path.reverse();

    path
}

/// The first step of a shortest path from `start` toward the closest of `targets`
pub fn bfs_next_direction(
    layout: &Layout,
    mover: Actor,
    start: &Position,
    targets: &[Position],
) -> Option<Direction> {
    let path = bfs_path(layout, mover, start, targets);

    path.get(1).and_then(|next| Direction::from_delta(start, next))
}

#[allow(clippy::type_complexity)]
fn bfs_inner(
    layout: &Layout,
    mover: Actor,
    start: &Position,
    targets: &[Position],
) -> Option<(u32, Position, HashMap<Position, Option<Position>>)> {
    if targets.is_empty() || layout.blocks(mover, start) {
        return None;
    }

    let mut paths_from: HashMap<Position, Option<Position>> = HashMap::new();
    let mut to_search: VecDeque<(Position, u32)> = VecDeque::new();

    paths_from.insert(*start, None);
    to_search.push_back((*start, 0));

    while let Some((current, cost)) = to_search.pop_front() {
        if targets.contains(&current) {
            return Some((cost, current, paths_from));
        }

        for dir in Direction::all() {
            let neighbor = current.step(dir);

            if layout.blocks(mover, &neighbor) || paths_from.contains_key(&neighbor) {
                continue;
            }

            paths_from.insert(neighbor, Some(current));
            to_search.push_back((neighbor, cost + 1));
        }
    }

    None
}
