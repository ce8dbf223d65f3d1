//! Summary Ranking
//!
//! Orders active matches for the live summary:
//! 1. Total goals (home + away), highest first
//! 2. Among equal totals, the match that started most recently first
//! 3. Among equal start times, the most recently registered first
//!
//! Registration sequences are unique within a registry, so the order is
//! total and a fixed sequence of operations always yields the same summary,
//! whatever the clock resolution.
//!
//! Ranking works on [`MatchView`] snapshots: each score is read exactly once,
//! so goals landing mid-sort cannot make the comparator inconsistent.

use crate::domain::match_state::{Match, MatchView};
use std::cmp::Ordering;
use std::sync::Arc;

/// Summary order between two snapshots
pub fn compare_for_summary(a: &MatchView, b: &MatchView) -> Ordering {
    b.score
        .total()
        .cmp(&a.score.total())
        .then_with(|| b.started_at.cmp(&a.started_at))
        .then_with(|| b.sequence.cmp(&a.sequence))
}

/// Snapshots and ranks `matches`
pub fn rank_matches<I>(matches: I) -> Vec<MatchView>
where
    I: IntoIterator<Item = Arc<Match>>,
{
    let mut views: Vec<MatchView> = matches.into_iter().map(|m| m.view()).collect();
    views.sort_unstable_by(compare_for_summary);
    views
}

/// Renders ranked views as `"<home> <homeScore> - <away> <awayScore>"` lines
pub fn format_summary(views: &[MatchView]) -> Vec<String> {
    views.iter().map(ToString::to_string).collect()
}
