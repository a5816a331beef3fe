#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements the minimax search Pac-Man uses to pick a move. You provide a 'scoring'
//! function that turns a given board into anything that implements the `Ord` trait, or use the
//! default [paranoid::LeafEvaluator].
//!
//! We lean on the `pacsim-types` crate for the board, and in particular for the capability
//! traits used to find the agents, classify neighboring cells and generate successor boards.

pub mod paranoid;
