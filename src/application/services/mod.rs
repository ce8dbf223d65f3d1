//! Application Services
//!
//! - `scoreboard`: start/finish/score operations over the match registry
//! - `summary`: ranking of active matches for the live summary

pub mod scoreboard;
pub mod summary;

pub use scoreboard::{ScoreboardConfig, ScoreboardService};
pub use summary::{compare_for_summary, format_summary, rank_matches};
