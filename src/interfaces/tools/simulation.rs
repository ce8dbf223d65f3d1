//! Load Simulation
//!
//! Drives a scoreboard the way a busy match day would: many independent
//! matches started at once from several threads, goals landing on all of
//! them concurrently, then every match finished.
//!
//! Matches are partitioned across workers by index (`i % threads`), so each
//! worker owns a disjoint set of teams. A correct scoreboard therefore
//! accepts every start, records every goal and ends empty; the report's
//! [`SimulationReport::is_consistent`] checks exactly that.

use crate::application::services::ScoreboardService;
use crate::domain::key::MatchKeyGenerator;
use crate::domain::score::Side;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;

/// How many summary lines the report keeps
const TOP_OF_SUMMARY: usize = 5;

/// Simulation parameters
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Number of independent matches
    pub matches: usize,

    /// Goals recorded on each match
    pub goals_per_match: u32,

    /// Worker threads
    pub threads: usize,

    /// Seed for choosing which side scores
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            matches: 1000,
            goals_per_match: 10,
            threads: num_cpus::get(),
            seed: 42,
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("simulation worker panicked")]
    WorkerPanicked,

    #[error("simulation task failed: {0}")]
    Join(String),
}

/// Simulation results
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub threads: usize,
    pub matches_requested: usize,
    pub matches_started: u64,
    pub start_rejections: u64,
    pub goals_expected: u64,
    pub goals_recorded: u64,
    pub matches_finished: u64,
    /// Matches still active after the finish phase
    pub leftover_matches: usize,
    pub elapsed_ms: u64,
    pub ops_per_sec: f64,
    /// Leading summary lines taken before the finish phase
    pub top_of_summary: Vec<String>,
}

impl SimulationReport {
    /// Every start and goal accepted, and the board ended empty
    pub fn is_consistent(&self) -> bool {
        self.matches_started == self.matches_requested as u64
            && self.start_rejections == 0
            && self.goals_recorded == self.goals_expected
            && self.matches_finished == self.matches_started
            && self.leftover_matches == 0
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PhaseCount {
    accepted: u64,
    rejected: u64,
}

impl PhaseCount {
    fn record<T, E>(&mut self, result: Result<T, E>) {
        match result {
            Ok(_) => self.accepted += 1,
            Err(_) => self.rejected += 1,
        }
    }

    fn merge(counts: Vec<PhaseCount>) -> PhaseCount {
        counts.into_iter().fold(PhaseCount::default(), |acc, c| PhaseCount {
            accepted: acc.accepted + c.accepted,
            rejected: acc.rejected + c.rejected,
        })
    }
}

fn team_names(index: usize) -> (String, String) {
    (format!("Home{}", index), format!("Away{}", index))
}

/// Runs `work(worker)` on `threads` scoped threads and collects the counts
fn run_phase<F>(threads: usize, work: F) -> Result<PhaseCount, SimulationError>
where
    F: Fn(usize) -> PhaseCount + Sync,
{
    let counts = crossbeam::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| {
                let work = &work;
                scope.spawn(move |_| work(worker))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| SimulationError::WorkerPanicked))
            .collect::<Result<Vec<_>, _>>()
    })
    .map_err(|_| SimulationError::WorkerPanicked)??;

    Ok(PhaseCount::merge(counts))
}

/// Runs the start / score / finish phases against `board`
pub fn run_simulation<G: MatchKeyGenerator>(
    board: &ScoreboardService<G>,
    config: &SimulationConfig,
) -> Result<SimulationReport, SimulationError> {
    let threads = config.threads.max(1);
    let started_at = Instant::now();

    let starts = run_phase(threads, |worker| {
        let mut count = PhaseCount::default();
        for index in (worker..config.matches).step_by(threads) {
            let (home, away) = team_names(index);
            count.record(board.start_match(&home, &away));
        }
        count
    })?;

    let goals = run_phase(threads, |worker| {
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(worker as u64));
        let mut count = PhaseCount::default();
        let mine: Vec<(String, String)> = (worker..config.matches)
            .step_by(threads)
            .map(team_names)
            .collect();

        // Round-robin over this worker's matches so goals interleave
        for _ in 0..config.goals_per_match {
            for (home, away) in &mine {
                let side = if rng.gen_bool(0.5) { Side::Home } else { Side::Away };
                count.record(board.update_score(home, away, side));
            }
        }
        count
    })?;

    let top_of_summary: Vec<String> = board.get_summary().into_iter().take(TOP_OF_SUMMARY).collect();

    let finishes = run_phase(threads, |worker| {
        let mut count = PhaseCount::default();
        for index in (worker..config.matches).step_by(threads) {
            let (home, away) = team_names(index);
            count.record(board.finish_match(&home, &away));
        }
        count
    })?;

    let elapsed = started_at.elapsed();
    let operations = starts.accepted + starts.rejected + goals.accepted + goals.rejected
        + finishes.accepted + finishes.rejected;
    let ops_per_sec = if elapsed.as_secs_f64() > 0.0 {
        operations as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    Ok(SimulationReport {
        threads,
        matches_requested: config.matches,
        matches_started: starts.accepted,
        start_rejections: starts.rejected,
        goals_expected: config.matches as u64 * u64::from(config.goals_per_match),
        goals_recorded: goals.accepted,
        matches_finished: finishes.accepted,
        leftover_matches: board.active_matches(),
        elapsed_ms: elapsed.as_millis() as u64,
        ops_per_sec,
        top_of_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::key::SimpleMatchKeyGenerator;

    fn config(matches: usize, goals_per_match: u32, threads: usize) -> SimulationConfig {
        SimulationConfig {
            matches,
            goals_per_match,
            threads,
            seed: 7,
        }
    }

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.matches, 1000);
        assert_eq!(config.goals_per_match, 10);
        assert!(config.threads >= 1);
    }

    #[test]
    fn test_simulation_is_consistent() {
        let board = ScoreboardService::new(SimpleMatchKeyGenerator);
        let report = run_simulation(&board, &config(200, 5, 4)).unwrap();

        assert!(report.is_consistent(), "{:?}", report);
        assert_eq!(report.matches_started, 200);
        assert_eq!(report.goals_recorded, 1000);
        assert_eq!(report.top_of_summary.len(), TOP_OF_SUMMARY);
        assert_eq!(board.active_matches(), 0);
        assert_eq!(board.metrics().total_goals(), 1000);
    }

    #[test]
    fn test_zero_threads_treated_as_one() {
        let board = ScoreboardService::new(SimpleMatchKeyGenerator);
        let report = run_simulation(&board, &config(10, 1, 0)).unwrap();
        assert_eq!(report.threads, 1);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_busy_team_shows_up_as_inconsistent() {
        let board = ScoreboardService::new(SimpleMatchKeyGenerator);
        board.start_match("Home3", "Somebody").unwrap();

        let report = run_simulation(&board, &config(10, 2, 2)).unwrap();
        assert_eq!(report.start_rejections, 1);
        assert!(!report.is_consistent());
        assert_eq!(report.leftover_matches, 1);
    }

    #[test]
    fn test_top_of_summary_ranked_by_total() {
        let board = ScoreboardService::new(SimpleMatchKeyGenerator);
        let report = run_simulation(&board, &config(3, 4, 1)).unwrap();

        // Every match has the same total, so the latest registration leads
        assert!(report.top_of_summary[0].starts_with("Home2 "));
        assert!(report.top_of_summary[2].starts_with("Home0 "));
    }
}
