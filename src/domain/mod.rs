//! Domain Layer - Match State Core
//!
//! Pure in-memory state with no I/O: the match registry, scores, key
//! generation and input validation.
//!
//! ## Modules
//! - `registry`: concurrency-safe store of active matches
//! - `match_state`: the `Match` entity and its snapshot view
//! - `score`: atomic score counters and the `Side` selector
//! - `key`: injectable key generation
//! - `validation`: team name checks
//! - `error`: rejection taxonomy

pub mod error;
pub mod key;
pub mod match_state;
pub mod registry;
pub mod score;
pub mod validation;

pub use error::{ErrorKind, Result, ScoreboardError};
pub use key::{MatchKeyGenerator, PairKeyGenerator, SimpleMatchKeyGenerator};
pub use match_state::{Match, MatchView};
pub use registry::MatchRegistry;
pub use score::{Score, ScoreLine, Side};
