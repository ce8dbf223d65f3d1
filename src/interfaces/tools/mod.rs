//! Tools and Utilities Module
//!
//! ## Available Tools
//! - `simulation`: concurrent load simulation behind `scoreboard simulate`

pub mod simulation;

pub use simulation::{run_simulation, SimulationConfig, SimulationError, SimulationReport};
