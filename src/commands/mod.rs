//! Command implementations

pub mod analyze;
pub mod daily;
pub mod play;

pub use analyze::{SeedAnalysis, analyze_seed};
pub use daily::{DailyConfig, read_existing, run_daily};
pub use play::{PlayConfig, missed_words, run_play};
