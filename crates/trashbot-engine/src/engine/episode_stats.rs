/// Counters of action outcomes within one episode.
///
/// The score alone does not tell a wall bump from a failed collection once
/// penalties are reconfigured, so the episode also counts each outcome.
///
/// # Example
///
/// ```
/// use trashbot_engine::EpisodeStats;
///
/// let mut stats = EpisodeStats::new();
/// stats.record_collection(true);
/// stats.record_collection(false);
///
/// assert_eq!(stats.trash_collected(), 1);
/// assert_eq!(stats.failed_collections(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeStats {
    moves: usize,
    wall_bumps: usize,
    skipped_turns: usize,
    trash_collected: usize,
    failed_collections: usize,
}

impl EpisodeStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            moves: 0,
            wall_bumps: 0,
            skipped_turns: 0,
            trash_collected: 0,
            failed_collections: 0,
        }
    }

    /// Successful moves.
    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }

    /// Move attempts that were blocked by the grid edge.
    #[must_use]
    pub const fn wall_bumps(&self) -> usize {
        self.wall_bumps
    }

    #[must_use]
    pub const fn skipped_turns(&self) -> usize {
        self.skipped_turns
    }

    #[must_use]
    pub const fn trash_collected(&self) -> usize {
        self.trash_collected
    }

    /// Collect attempts on a cell without trash.
    #[must_use]
    pub const fn failed_collections(&self) -> usize {
        self.failed_collections
    }

    pub const fn record_move(&mut self, moved: bool) {
        if moved {
            self.moves += 1;
        } else {
            self.wall_bumps += 1;
        }
    }

    pub const fn record_skip(&mut self) {
        self.skipped_turns += 1;
    }

    pub const fn record_collection(&mut self, collected: bool) {
        if collected {
            self.trash_collected += 1;
        } else {
            self.failed_collections += 1;
        }
    }
}
