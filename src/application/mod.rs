//! Application Layer - Scoreboard Services
//!
//! Orchestrates the domain layer: validation, conflict enforcement, score
//! mutation and summary generation. Independent of infrastructure; the key
//! generator, registry and metrics are injected.

pub mod services;

pub use services::{ScoreboardConfig, ScoreboardService};
