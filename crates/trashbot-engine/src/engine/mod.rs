//! Episode state machine and its configuration.
//!
//! - [`GridWorld`] - one episode: ground truth grid, robot position, turn counter and score
//! - [`GridConfig`] - grid size, turn limit, trash density and [`BoundaryMode`]
//! - [`ScoreConfig`] - reward or penalty for each kind of action outcome
//! - [`EpisodeStats`] - per-episode counters of action outcomes
//!
//! # Episode Flow
//!
//! 1. Build a [`GridWorld`] from a [`GridConfig`] and a random source
//! 2. Observe the surroundings with [`GridWorld::cell_at`]
//! 3. Apply one action per turn ([`GridWorld::move_robot`], [`GridWorld::skip_turn`],
//!    [`GridWorld::collect_trash`] or [`GridWorld::apply_action`])
//! 4. Stop once [`GridWorld::is_game_over`] returns `true` and read the score
//!
//! Terminal episodes absorb every further mutating call, so a driver loop may keep
//! calling actions without checking for termination first.

pub use self::{config::*, episode_stats::*, grid_world::*};

mod config;
mod episode_stats;
mod grid_world;
