use std::{fmt, time::Duration};

use trashbot_engine::GridConfig;

/// Human-readable record of a training run, written as `info.txt`.
///
/// The summary lines are followed by a blank line and the comma-separated
/// best-so-far fitness after each generation.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_chance: f64,
    pub game_runs: usize,
    pub grid: GridConfig,
    pub fitness: Option<f32>,
    pub elapsed: Duration,
    pub fitness_log: Vec<Option<f32>>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Population size: {}", self.population_size)?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(f, "Mutation chance: {}", self.mutation_chance)?;
        writeln!(f, "Game runs: {}", self.game_runs)?;
        writeln!(f, "Grid size: {}x{}", self.grid.rows, self.grid.cols)?;
        writeln!(f, "Max turns: {}", self.grid.max_turns)?;
        writeln!(f, "Trash probability: {}", self.grid.trash_spawn_chance)?;
        writeln!(f, "Fitness: {}", OptionalFitness(self.fitness))?;
        writeln!(f, "Time: {}", Elapsed(self.elapsed))?;
        writeln!(f)?;
        for (i, fitness) in self.fitness_log.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", OptionalFitness(*fitness))?;
        }
        writeln!(f)
    }
}

struct OptionalFitness(Option<f32>);

impl fmt::Display for OptionalFitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(fitness) => write!(f, "{fitness}"),
            None => f.write_str("N/A"),
        }
    }
}

/// `hh:mm:ss.mmm`
struct Elapsed(Duration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            secs / 3600,
            secs / 60 % 60,
            secs % 60,
            self.0.subsec_millis()
        )
    }
}
