//! Team Name Validation
//!
//! Input checks shared by every operation that takes a team pair. They run
//! before any registry access, so a rejected request never touches state.
//!
//! ## Validation Rules
//! - Home team name must not be empty
//! - Away team name must not be empty
//! - Home and away must differ (exact, case-sensitive comparison)
//!
//! The reversed-fixture check needs the registry and lives in the
//! scoreboard service.

use super::error::{Result, ScoreboardError};

/// Validates the names of a team pair
pub fn validate_team_names(home: &str, away: &str) -> Result<()> {
    if home.is_empty() {
        return Err(ScoreboardError::InvalidArgument(
            "home team name cannot be empty".to_string(),
        ));
    }

    if away.is_empty() {
        return Err(ScoreboardError::InvalidArgument(
            "away team name cannot be empty".to_string(),
        ));
    }

    if home == away {
        return Err(ScoreboardError::InvalidArgument(format!(
            "home team and away team cannot be the same ({})",
            home
        )));
    }

    Ok(())
}
