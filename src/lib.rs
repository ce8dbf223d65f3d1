// Global allocator: jemalloc holds up better than the system allocator when
// many threads start and finish matches at once
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use application::services::{ScoreboardConfig, ScoreboardService};
pub use domain::{
    ErrorKind, Match, MatchKeyGenerator, MatchRegistry, MatchView, ScoreboardError,
    SimpleMatchKeyGenerator, Side,
};
