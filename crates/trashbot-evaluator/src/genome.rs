//! Lookup-table policies evolved by the genetic search.

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};
use trashbot_engine::RobotAction;

use crate::{GenomeError, observation::KEY_COUNT};

/// Number of genes in a genome: one action per observation key.
pub const GENOME_LEN: usize = KEY_COUNT;

/// A complete policy: the action to take for each of the 243 observation keys.
///
/// The gene sequence is validated at construction (exact length, no `None`
/// sentinel) and never changes afterwards; genetic operators always build new
/// genomes. Fitness is unset until the genome has been evaluated.
///
/// Genomes display as the comma-separated list of action names used for
/// persistence, and parse back from the same format:
///
/// ```
/// use trashbot_engine::RobotAction;
/// use trashbot_evaluator::genome::{GENOME_LEN, PolicyGenome};
///
/// let genome = PolicyGenome::new(vec![RobotAction::SkipTurn; GENOME_LEN]).unwrap();
/// let text = genome.to_string();
/// assert!(text.starts_with("SkipTurn,SkipTurn,"));
///
/// let parsed: PolicyGenome = text.parse().unwrap();
/// assert_eq!(parsed.genes(), genome.genes());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenomeRecord", into = "GenomeRecord")]
pub struct PolicyGenome {
    genes: Vec<RobotAction>,
    fitness: Option<f32>,
}

impl PolicyGenome {
    /// Creates an unevaluated genome.
    ///
    /// Rejects gene sequences that are not exactly [`GENOME_LEN`] long or that
    /// contain [`RobotAction::None`].
    pub fn new(genes: Vec<RobotAction>) -> Result<Self, GenomeError> {
        if genes.len() != GENOME_LEN {
            return Err(GenomeError::LengthMismatch {
                expected: GENOME_LEN,
                actual: genes.len(),
            });
        }
        if let Some(index) = genes.iter().position(|g| g.is_none()) {
            return Err(GenomeError::SentinelGene { index });
        }
        Ok(Self {
            genes,
            fitness: None,
        })
    }

    /// Creates an unevaluated genome whose genes are drawn independently and
    /// uniformly from [`RobotAction::GENES`].
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let genes = (0..GENOME_LEN).map(|_| random_gene(rng)).collect();
        Self {
            genes,
            fitness: None,
        }
    }

    /// Returns a new unevaluated genome with `self`'s genes before `split` and
    /// `other`'s genes from `split` on.
    ///
    /// `split` is clamped to the genome length.
    #[must_use]
    pub fn splice(&self, other: &Self, split: usize) -> Self {
        let split = split.min(GENOME_LEN);
        let genes = self.genes[..split]
            .iter()
            .chain(&other.genes[split..])
            .copied()
            .collect();
        Self {
            genes,
            fitness: None,
        }
    }

    /// Returns a new unevaluated genome where every gene for which
    /// `should_resample` returns `true` is replaced by a uniformly random
    /// non-sentinel action.
    ///
    /// `should_resample` is called once per gene, in order, with the same `rng`
    /// that draws the replacements.
    #[must_use]
    pub fn resample_genes<R, F>(&self, rng: &mut R, mut should_resample: F) -> Self
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> bool,
    {
        let genes = self
            .genes
            .iter()
            .map(|&gene| {
                if should_resample(rng) {
                    random_gene(rng)
                } else {
                    gene
                }
            })
            .collect();
        Self {
            genes,
            fitness: None,
        }
    }

    /// Parses a comma-separated list of action names.
    pub fn from_names<'a, I>(names: I) -> Result<Self, GenomeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let genes = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.trim();
                name.parse::<RobotAction>()
                    .map_err(|_| GenomeError::UnknownAction {
                        index,
                        name: name.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(genes)
    }

    #[must_use]
    pub fn genes(&self) -> &[RobotAction] {
        &self.genes
    }

    /// Returns the action stored for an observation key.
    #[must_use]
    pub fn action_for(&self, key: usize) -> Option<RobotAction> {
        self.genes.get(key).copied()
    }

    #[must_use]
    pub fn fitness(&self) -> Option<f32> {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f32) {
        self.fitness = Some(fitness);
    }

    #[must_use]
    pub fn with_fitness(mut self, fitness: f32) -> Self {
        self.set_fitness(fitness);
        self
    }

    /// Iterates over the gene names, ready for joining into a persisted list.
    pub fn gene_names(&self) -> impl Iterator<Item = String> + '_ {
        self.genes.iter().map(ToString::to_string)
    }
}

impl fmt::Display for PolicyGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{gene}")?;
        }
        Ok(())
    }
}

impl FromStr for PolicyGenome {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_names(s.trim().split(','))
    }
}

#[derive(Serialize, Deserialize)]
struct GenomeRecord {
    fitness: Option<f32>,
    genes: Vec<RobotAction>,
}

impl TryFrom<GenomeRecord> for PolicyGenome {
    type Error = GenomeError;

    fn try_from(record: GenomeRecord) -> Result<Self, Self::Error> {
        let mut genome = Self::new(record.genes)?;
        genome.fitness = record.fitness;
        Ok(genome)
    }
}

impl From<PolicyGenome> for GenomeRecord {
    fn from(genome: PolicyGenome) -> Self {
        Self {
            fitness: genome.fitness,
            genes: genome.genes,
        }
    }
}

fn random_gene<R>(rng: &mut R) -> RobotAction
where
    R: Rng + ?Sized,
{
    RobotAction::GENES[rng.random_range(0..RobotAction::GENE_COUNT)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(action: RobotAction) -> Vec<RobotAction> {
        vec![action; GENOME_LEN]
    }

    #[test]
    fn test_new_genome_is_unevaluated() {
        let genome = PolicyGenome::new(uniform(RobotAction::MoveEast)).unwrap();
        assert_eq!(genome.fitness(), None);
        assert_eq!(genome.genes().len(), GENOME_LEN);
        assert_eq!(genome.action_for(242), Some(RobotAction::MoveEast));
        assert_eq!(genome.action_for(243), None);
    }

    #[test]
    fn test_random_genome_has_no_sentinel() {
        let mut rng = rand::rng();
        let genome = PolicyGenome::random(&mut rng);
        assert_eq!(genome.genes().len(), GENOME_LEN);
        assert!(genome.genes().iter().all(|g| !g.is_none()));
        assert_eq!(genome.fitness(), None);
    }

    #[test]
    fn test_splice_takes_prefix_and_suffix() {
        let north = PolicyGenome::new(uniform(RobotAction::MoveNorth)).unwrap();
        let south = PolicyGenome::new(uniform(RobotAction::MoveSouth))
            .unwrap()
            .with_fitness(3.0);

        let child = north.splice(&south, 100);
        assert!(child.genes()[..100].iter().all(|g| *g == RobotAction::MoveNorth));
        assert!(child.genes()[100..].iter().all(|g| *g == RobotAction::MoveSouth));
        assert_eq!(child.fitness(), None);

        assert_eq!(north.splice(&south, 0).genes(), south.genes());
        assert_eq!(north.splice(&south, 1000).genes(), north.genes());
    }

    #[test]
    fn test_resample_genes_keeps_rejected_genes() {
        let mut rng = rand::rng();
        let genome = PolicyGenome::new(uniform(RobotAction::SkipTurn))
            .unwrap()
            .with_fitness(1.0);

        let kept = genome.resample_genes(&mut rng, |_| false);
        assert_eq!(kept.genes(), genome.genes());
        assert_eq!(kept.fitness(), None);

        let mut calls = 0;
        let resampled = genome.resample_genes(&mut rng, |_| {
            calls += 1;
            true
        });
        assert_eq!(calls, GENOME_LEN);
        assert!(resampled.genes().iter().all(|g| !g.is_none()));
    }

    #[test]
    fn test_rejects_wrong_length() {
        for len in [0, 242, 244] {
            let result = PolicyGenome::new(vec![RobotAction::SkipTurn; len]);
            assert_eq!(
                result,
                Err(GenomeError::LengthMismatch {
                    expected: GENOME_LEN,
                    actual: len
                })
            );
        }
    }

    #[test]
    fn test_rejects_sentinel_gene() {
        let mut genes = uniform(RobotAction::CollectTrash);
        genes[17] = RobotAction::None;
        assert_eq!(
            PolicyGenome::new(genes),
            Err(GenomeError::SentinelGene { index: 17 })
        );
    }

    #[test]
    fn test_parse_reports_unknown_names() {
        let mut names = vec!["SkipTurn"; GENOME_LEN];
        names[3] = "Dance";
        let result = PolicyGenome::from_names(names);
        assert_eq!(
            result,
            Err(GenomeError::UnknownAction {
                index: 3,
                name: "Dance".to_owned()
            })
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let text = vec![" MoveSouth "; GENOME_LEN].join(",");
        let genome: PolicyGenome = format!("{text}\n").parse().unwrap();
        assert!(genome.genes().iter().all(|g| *g == RobotAction::MoveSouth));
    }

    #[test]
    fn test_json_keeps_fitness_and_validates() {
        let genome = PolicyGenome::new(uniform(RobotAction::MoveRandom))
            .unwrap()
            .with_fitness(12.5);
        let json = serde_json::to_string(&genome).unwrap();
        let back: PolicyGenome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, genome);

        let truncated = r#"{"fitness":null,"genes":["SkipTurn"]}"#;
        assert!(serde_json::from_str::<PolicyGenome>(truncated).is_err());
    }
}
