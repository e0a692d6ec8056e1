//! Decision makers that choose the robot's action each turn.

use rand::Rng;
use trashbot_engine::{GridWorld, RobotAction};
use tracing::trace;

use crate::{
    EvaluationError, classifier::OnlineClassifier, genome::PolicyGenome, observation::Observation,
};

/// Chooses an action for the current state of an episode.
pub trait Policy {
    fn select_action<R>(
        &mut self,
        world: &GridWorld,
        rng: &mut R,
    ) -> Result<RobotAction, EvaluationError>
    where
        R: Rng + ?Sized;
}

/// Draws a uniformly random non-sentinel action.
pub fn random_action<R>(rng: &mut R) -> RobotAction
where
    R: Rng + ?Sized,
{
    RobotAction::GENES[rng.random_range(0..RobotAction::GENE_COUNT)]
}

/// Plays a [`PolicyGenome`] as a lookup table indexed by observation key.
#[derive(Debug, Clone, Copy)]
pub struct GenomePolicy<'a> {
    genome: &'a PolicyGenome,
}

impl<'a> GenomePolicy<'a> {
    #[must_use]
    pub fn new(genome: &'a PolicyGenome) -> Self {
        Self { genome }
    }
}

impl Policy for GenomePolicy<'_> {
    fn select_action<R>(
        &mut self,
        world: &GridWorld,
        _rng: &mut R,
    ) -> Result<RobotAction, EvaluationError>
    where
        R: Rng + ?Sized,
    {
        let key = Observation::observe(world)?.key();
        // Genomes are validated to cover every key, so this only guards the sentinel.
        Ok(self.genome.action_for(key).unwrap_or(RobotAction::None))
    }
}

/// Reactive policy backed by an online classifier.
///
/// When the classifier cannot make a prediction the policy falls back to a
/// uniformly random action.
#[derive(Debug, Clone, Default)]
pub struct ClassifierPolicy<C> {
    classifier: C,
}

impl<C> ClassifierPolicy<C>
where
    C: OnlineClassifier,
{
    #[must_use]
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    #[must_use]
    pub fn into_inner(self) -> C {
        self.classifier
    }
}

impl<C> Policy for ClassifierPolicy<C>
where
    C: OnlineClassifier,
{
    fn select_action<R>(
        &mut self,
        world: &GridWorld,
        rng: &mut R,
    ) -> Result<RobotAction, EvaluationError>
    where
        R: Rng + ?Sized,
    {
        let observation = Observation::observe(world)?;
        let action = match self.classifier.predict(&observation) {
            Some(action) => action,
            None => {
                trace!(key = observation.key(), "no prediction, falling back to random action");
                random_action(rng)
            }
        };
        Ok(action)
    }
}

/// Chooses uniformly among the non-sentinel actions every turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn select_action<R>(
        &mut self,
        _world: &GridWorld,
        rng: &mut R,
    ) -> Result<RobotAction, EvaluationError>
    where
        R: Rng + ?Sized,
    {
        Ok(random_action(rng))
    }
}
