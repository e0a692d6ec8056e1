//! Online classifiers that learn an action policy from example decisions.
//!
//! A classifier records `(action, observation)` examples one at a time and
//! predicts the most likely action for a new observation. This is the reactive
//! alternative to an evolved genome: it can be trained from a human player's
//! choices or distilled from an existing policy.

use trashbot_engine::{ActionError, RobotAction};

use crate::observation::{OBSERVATION_LEN, Observation, ObservedCell};

/// An incrementally trained action classifier over observation features.
pub trait OnlineClassifier {
    /// Records one training example. The `None` sentinel is not a valid label.
    fn update(&mut self, action: RobotAction, observation: &Observation) -> Result<(), ActionError>;

    /// Returns the best predicted action, or `None` if no prediction can be made.
    fn predict(&self, observation: &Observation) -> Option<RobotAction>;
}

/// Categorical naive Bayes with Laplace smoothing.
///
/// Each of the five sampled cells is an independent categorical feature with the
/// values Empty, Trash and Wall. The classifier predicts the action maximising
/// `log P(action) + Σ log P(cell_i | action)` over actions seen at least once.
///
/// ```
/// use trashbot_engine::RobotAction;
/// use trashbot_evaluator::{
///     classifier::{NaiveBayesClassifier, OnlineClassifier as _},
///     observation::Observation,
/// };
///
/// let mut classifier = NaiveBayesClassifier::new();
/// let observation = Observation::from_key(1).unwrap(); // trash under the robot
/// assert_eq!(classifier.predict(&observation), None);
///
/// classifier.update(RobotAction::CollectTrash, &observation).unwrap();
/// assert_eq!(classifier.predict(&observation), Some(RobotAction::CollectTrash));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesClassifier {
    total: usize,
    class_counts: [usize; RobotAction::GENE_COUNT],
    feature_counts: [[[usize; ObservedCell::LEN]; OBSERVATION_LEN]; RobotAction::GENE_COUNT],
}

impl NaiveBayesClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded examples.
    #[must_use]
    pub fn example_count(&self) -> usize {
        self.total
    }

    #[expect(clippy::cast_precision_loss)]
    fn log_posterior(&self, class: usize, observation: &Observation) -> f64 {
        let class_count = self.class_counts[class] as f64;
        let prior = (class_count / self.total as f64).ln();
        let smoothing = ObservedCell::LEN as f64;
        observation
            .cells()
            .iter()
            .enumerate()
            .map(|(feature, cell)| {
                let count = self.feature_counts[class][feature][cell.digit()] as f64;
                ((count + 1.0) / (class_count + smoothing)).ln()
            })
            .sum::<f64>()
            + prior
    }
}

impl OnlineClassifier for NaiveBayesClassifier {
    fn update(&mut self, action: RobotAction, observation: &Observation) -> Result<(), ActionError> {
        let class = action.gene_index().ok_or(ActionError::Sentinel)?;
        self.total += 1;
        self.class_counts[class] += 1;
        for (feature, cell) in observation.cells().iter().enumerate() {
            self.feature_counts[class][feature][cell.digit()] += 1;
        }
        Ok(())
    }

    fn predict(&self, observation: &Observation) -> Option<RobotAction> {
        let mut best: Option<(usize, f64)> = None;
        for class in (0..RobotAction::GENE_COUNT).filter(|c| self.class_counts[*c] > 0) {
            let score = self.log_posterior(class, observation);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((class, score));
            }
        }
        best.map(|(class, _)| RobotAction::GENES[class])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untrained_classifier_has_no_prediction() {
        let classifier = NaiveBayesClassifier::new();
        for observation in Observation::all() {
            assert_eq!(classifier.predict(&observation), None);
        }
    }

    #[test]
    fn test_update_rejects_sentinel() {
        let mut classifier = NaiveBayesClassifier::new();
        let observation = Observation::from_key(0).unwrap();
        assert_eq!(
            classifier.update(RobotAction::None, &observation),
            Err(ActionError::Sentinel)
        );
        assert_eq!(classifier.example_count(), 0);
    }

    #[test]
    fn test_learns_feature_dependent_actions() {
        let mut classifier = NaiveBayesClassifier::new();
        // Collect whenever the centre holds trash, otherwise walk east.
        for observation in Observation::all() {
            let action = if observation.center().is_trash() {
                RobotAction::CollectTrash
            } else {
                RobotAction::MoveEast
            };
            classifier.update(action, &observation).unwrap();
        }
        assert_eq!(classifier.example_count(), 243);

        for observation in Observation::all() {
            let expected = if observation.center().is_trash() {
                RobotAction::CollectTrash
            } else {
                RobotAction::MoveEast
            };
            assert_eq!(classifier.predict(&observation), Some(expected));
        }
    }

    #[test]
    fn test_majority_label_wins_for_identical_features() {
        let mut classifier = NaiveBayesClassifier::new();
        let observation = Observation::from_key(100).unwrap();
        classifier.update(RobotAction::SkipTurn, &observation).unwrap();
        classifier.update(RobotAction::MoveWest, &observation).unwrap();
        classifier.update(RobotAction::MoveWest, &observation).unwrap();
        assert_eq!(classifier.predict(&observation), Some(RobotAction::MoveWest));
    }
}
