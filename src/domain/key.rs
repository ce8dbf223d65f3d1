//! Match Key Generation
//!
//! The registry never derives keys itself; the scoreboard service is handed a
//! [`MatchKeyGenerator`] and asks it for the key of a `(home, away)` pair.
//!
//! ## Contract
//! - **Pure**: no side effects, same input always yields the same key
//! - **Order-sensitive**: `(A, B)` and `(B, A)` map to different keys, so a
//!   reversed fixture is only found through an explicit lookup of the swapped
//!   key, never by accidental collision
//! - **Unique**: distinct ordered pairs map to distinct keys
//!
//! ## Example
//! ```rust
//! use live_scoreboard::domain::key::{MatchKeyGenerator, SimpleMatchKeyGenerator};
//!
//! let keys = SimpleMatchKeyGenerator;
//! assert_eq!(keys.generate_key("Spain", "Brazil"), "5:Spain vs Brazil");
//! assert_ne!(keys.generate_key("Spain", "Brazil"), keys.generate_key("Brazil", "Spain"));
//! ```

use std::hash::Hash;

/// Maps an ordered team pair to a registry key
pub trait MatchKeyGenerator: Send + Sync {
    /// Opaque, comparable key type
    type Key: Eq + Hash + Clone + Send + Sync + std::fmt::Debug;

    fn generate_key(&self, home: &str, away: &str) -> Self::Key;
}

/// Default generator: `"<home length>:<home> vs <away>"`
///
/// The byte length of the home name fixes where it ends, so names that
/// themselves contain `" vs "` still map to distinct keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMatchKeyGenerator;

impl MatchKeyGenerator for SimpleMatchKeyGenerator {
    type Key = String;

    fn generate_key(&self, home: &str, away: &str) -> String {
        format!("{}:{} vs {}", home.len(), home, away)
    }
}

/// Generator keyed by the ordered pair itself
#[derive(Debug, Clone, Copy, Default)]
pub struct PairKeyGenerator;

impl MatchKeyGenerator for PairKeyGenerator {
    type Key = (String, String);

    fn generate_key(&self, home: &str, away: &str) -> (String, String) {
        (home.to_owned(), away.to_owned())
    }
}
