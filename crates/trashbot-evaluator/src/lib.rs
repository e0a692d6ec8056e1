//! Policies for the trash picking robot and fitness evaluation of evolved policies.
//!
//! This crate sits between the episode engine (`trashbot-engine`) and the genetic
//! search (`trashbot-training`):
//!
//! ```text
//! GeneticOptimizer (trashbot-training)
//!     ↓ asks for fitness of
//! PolicyGenome ([`genome`])
//!     ↓ played as a lookup table by
//! GenomePolicy ([`policy`]) over Observation keys ([`observation`])
//!     ↓ on fresh GridWorld episodes driven by
//! FitnessEvaluator ([`fitness_evaluator`])
//! ```
//!
//! # Observations
//!
//! A policy only sees the five cells of the cross centred on the robot (centre,
//! north, east, south, west). Each cell is one of Empty, Trash or Wall, so there
//! are `3^5 = 243` distinct observations and a genome stores exactly one action
//! per observation.
//!
//! # Policies
//!
//! - [`policy::GenomePolicy`] - evolved lookup table
//! - [`policy::ClassifierPolicy`] - reactive policy backed by an [`classifier::OnlineClassifier`]
//! - [`policy::RandomPolicy`] - uniformly random non-sentinel actions
//!
//! # Failure Policy
//!
//! A corrupted policy that silently mis-scores would mislead the search, so
//! simulation-level problems (sentinel actions, hidden cells at sampled offsets)
//! abort the episode with an [`EvaluationError`] instead of being skipped.

use trashbot_engine::{ActionError, GridConfigError, Position};

pub mod cancel;
pub mod classifier;
pub mod episode;
pub mod fitness_evaluator;
pub mod genome;
pub mod observation;
pub mod policy;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenomeError {
    #[display("genome has {actual} genes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[display("genome holds the None sentinel at index {index}")]
    SentinelGene { index: usize },
    #[display("unknown action name {name:?} at index {index}")]
    UnknownAction { index: usize, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ObservationError {
    #[display("cell at {position:?} is hidden from the robot")]
    HiddenCell { position: Position },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvaluationError {
    #[display("invalid action: {_0}")]
    #[from]
    Action(ActionError),
    #[display("invalid observation: {_0}")]
    #[from]
    Observation(ObservationError),
    #[display("invalid genome: {_0}")]
    #[from]
    Genome(GenomeError),
    #[display("invalid grid configuration: {_0}")]
    #[from]
    Grid(GridConfigError),
    #[display("evaluation cancelled")]
    Cancelled,
}
