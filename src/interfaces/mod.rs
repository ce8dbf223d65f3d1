//! Interfaces Layer - External Entry Points
//!
//! ## Modules
//! - `cli`: command-line interface (script replay, simulation)
//! - `tools`: load simulation

pub mod cli;
pub mod tools;
