pub mod aggregate;
pub mod commands;
pub mod config;
pub mod demo_data;
pub mod error;
pub mod export;
pub mod import;
pub mod leaderboard;
pub mod logging;
pub mod model;
pub mod mutations;
pub mod period;
pub mod ranking;
pub mod scoring;
pub mod store;

pub use aggregate::{PlayerLine, PlayerTotals, aggregate};
pub use error::{CommandError, EngineError, ImportError, StoreError};
pub use ranking::{RankedEntry, rank, rank_map};
pub use scoring::{ScoreWeights, StarScore, StarScores, compute_star_score, compute_star_score_with};
pub use store::Store;
