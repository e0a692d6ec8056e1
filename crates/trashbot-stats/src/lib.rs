//! Small statistics helpers for summarising fitness values and episode scores.
//!
//! ```
//! use trashbot_stats::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([4.0, -1.0, 9.0]).unwrap();
//! assert_eq!(stats.count, 3);
//! assert_eq!(stats.min, -1.0);
//! assert_eq!(stats.max, 9.0);
//! assert_eq!(stats.mean, 4.0);
//! ```

pub use self::descriptive::*;

mod descriptive;
