//! GRASP run statistics.
//!
//! Tracks per-iteration lengths, 2-opt move counts, timing and the history
//! of incumbent improvements.

use std::time::Duration;

use crate::localsearch::LocalSearchStats;

/// Outcome of one GRASP iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// 0-based iteration index.
    pub iteration: u64,
    /// Registry index the construction started from.
    pub start_index: usize,
    /// Length of the tour after construction.
    pub constructed_length: f64,
    /// Length of the tour after local search.
    pub refined_length: f64,
    /// Incumbent length once this iteration finished.
    pub best_length: f64,
    /// Local search counters for this iteration.
    pub local_search: LocalSearchStats,
}

/// Record of an incumbent replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct TourImprovement {
    /// Time since solving started when the improvement occurred.
    pub time_offset: Duration,
    /// Iteration that produced the new incumbent.
    pub iteration: u64,
    /// The new incumbent length.
    pub length: f64,
}

/// Complete statistics for a GRASP run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraspStatistics {
    /// Total time spent solving.
    pub total_duration: Duration,
    /// Iterations completed.
    pub iteration_count: u64,
    /// 2-opt moves evaluated across all iterations.
    pub moves_evaluated: u64,
    /// 2-opt moves accepted across all iterations.
    pub moves_accepted: u64,
    /// One record per completed iteration, in order.
    pub iterations: Vec<IterationRecord>,
    /// History of incumbent replacements, the first iteration included.
    pub improvement_history: Vec<TourImprovement>,
}

impl GraspStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_iteration(&mut self, record: IterationRecord) {
        self.iteration_count += 1;
        self.moves_evaluated += record.local_search.moves_evaluated;
        self.moves_accepted += record.local_search.moves_accepted;
        self.iterations.push(record);
    }

    pub(crate) fn record_improvement(&mut self, improvement: TourImprovement) {
        self.improvement_history.push(improvement);
    }

    /// Returns the 2-opt acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }

    /// Returns the average time per iteration.
    pub fn avg_time_per_iteration(&self) -> Duration {
        if self.iteration_count == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.iteration_count as u32
        }
    }

    /// Returns the number of incumbent replacements.
    pub fn improvement_count(&self) -> usize {
        self.improvement_history.len()
    }

    /// Returns the best length reached, if any iteration completed.
    pub fn best_length(&self) -> Option<f64> {
        self.improvement_history.last().map(|i| i.length)
    }

    /// Incumbent length after each iteration.
    pub fn best_length_trace(&self) -> Vec<f64> {
        self.iterations.iter().map(|r| r.best_length).collect()
    }
}
