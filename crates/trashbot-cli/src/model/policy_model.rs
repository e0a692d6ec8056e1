use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trashbot_engine::{GridConfig, RobotAction, ScoreConfig};
use trashbot_evaluator::{GenomeError, genome::PolicyGenome};

use crate::util;

/// A trained genome together with the world it was trained for.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PolicyModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub fitness: Option<f32>,
    pub grid: GridConfig,
    pub score: ScoreConfig,
    pub genes: Vec<RobotAction>,
}

impl PolicyModel {
    pub fn new(
        name: impl Into<String>,
        genome: &PolicyGenome,
        grid: GridConfig,
        score: ScoreConfig,
    ) -> Self {
        Self {
            name: name.into(),
            trained_at: Utc::now(),
            fitness: genome.fitness(),
            grid,
            score,
            genes: genome.genes().to_vec(),
        }
    }

    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("policy model", path)
    }

    /// Rebuilds the genome, rejecting tables of the wrong length or containing
    /// the sentinel action.
    pub fn to_genome(&self) -> Result<PolicyGenome, GenomeError> {
        let genome = PolicyGenome::new(self.genes.clone())?;
        Ok(match self.fitness {
            Some(fitness) => genome.with_fitness(fitness),
            None => genome,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn test_json_round_trip_restores_genome() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let genome = PolicyGenome::random(&mut rng).with_fitness(12.5);
        let model = PolicyModel::new("test", &genome, GridConfig::default(), ScoreConfig::DEFAULT);

        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"genes\":[\""));
        let restored: PolicyModel = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, model);
        assert_eq!(restored.to_genome().unwrap(), genome);
    }

    #[test]
    fn test_corrupt_genes_rejected() {
        let mut rng = Pcg64Mcg::seed_from_u64(4);
        let genome = PolicyGenome::random(&mut rng);
        let mut model = PolicyModel::new("test", &genome, GridConfig::default(), ScoreConfig::DEFAULT);
        model.genes.pop();
        assert!(matches!(
            model.to_genome(),
            Err(GenomeError::LengthMismatch { .. })
        ));

        model.genes.push(RobotAction::None);
        assert!(matches!(
            model.to_genome(),
            Err(GenomeError::SentinelGene { .. })
        ));
    }
}
