use super::swipe::CommitListener;
use super::{Candidate, DecisionStatistics, SwipeDirection};
use crate::error::{Result, TuneSwipeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub candidate_id: u64,
    pub direction: SwipeDirection,
    pub decided_at: DateTime<Utc>,
}

/// Session history of like/pass decisions, fed by the swipe controller's
/// commit callback.
#[derive(Debug, Default)]
pub struct DecisionLog {
    total_candidates: usize,
    decisions: Vec<DecisionRecord>,
}

impl DecisionLog {
    pub fn new(total_candidates: usize) -> Self {
        Self {
            total_candidates,
            decisions: Vec::new(),
        }
    }

    pub fn record(&mut self, candidate_id: u64, direction: SwipeDirection) {
        self.decisions.push(DecisionRecord {
            candidate_id,
            direction,
            decided_at: Utc::now(),
        });
    }

    pub fn decisions(&self) -> &[DecisionRecord] {
        &self.decisions
    }

    pub fn last(&self) -> Option<&DecisionRecord> {
        self.decisions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Ids of liked candidates, in decision order, without repeats.
    pub fn liked_ids(&self) -> Vec<u64> {
        let mut ids = Vec::new();
        for record in &self.decisions {
            if record.direction == SwipeDirection::Right && !ids.contains(&record.candidate_id) {
                ids.push(record.candidate_id);
            }
        }
        ids
    }

    pub fn get_statistics(&self) -> DecisionStatistics {
        let mut liked = 0;
        let mut passed = 0;

        for record in &self.decisions {
            match record.direction {
                SwipeDirection::Right => liked += 1,
                SwipeDirection::Left => passed += 1,
            }
        }

        DecisionStatistics {
            total_candidates: self.total_candidates,
            liked,
            passed,
        }
    }

    /// Writes the decision history as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let export_error = |e: &dyn std::fmt::Display| {
            TuneSwipeError::ExportError(format!(
                "Failed to write decisions to {}: {}",
                path.display(),
                e
            ))
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| export_error(&e))?;
            }
        }
        let contents =
            serde_json::to_string_pretty(&self.decisions).map_err(|e| export_error(&e))?;
        fs::write(path, contents).map_err(|e| export_error(&e))?;
        Ok(())
    }
}

impl<C: Candidate> CommitListener<C> for DecisionLog {
    fn on_commit(&mut self, direction: SwipeDirection, candidate: &C) {
        self.record(candidate.id(), direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Card(u64);

    impl Candidate for Card {
        fn id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_decision_log_new() {
        let log = DecisionLog::new(4);
        assert!(log.is_empty());
        assert_eq!(log.get_statistics().total_candidates, 4);
    }

    #[test]
    fn test_decision_log_record() {
        let mut log = DecisionLog::new(4);
        log.record(7, SwipeDirection::Right);

        assert_eq!(log.decisions().len(), 1);
        let last = log.last().unwrap();
        assert_eq!(last.candidate_id, 7);
        assert_eq!(last.direction, SwipeDirection::Right);
    }

    #[test]
    fn test_decision_log_as_commit_listener() {
        let mut log = DecisionLog::new(2);
        log.on_commit(SwipeDirection::Left, &Card(3));

        assert_eq!(log.last().unwrap().candidate_id, 3);
        assert_eq!(log.last().unwrap().direction, SwipeDirection::Left);
    }

    #[test]
    fn test_decision_log_get_statistics() {
        let mut log = DecisionLog::new(6);
        log.record(1, SwipeDirection::Right);
        log.record(3, SwipeDirection::Left);
        log.record(5, SwipeDirection::Left);
        log.record(1, SwipeDirection::Right);

        let stats = log.get_statistics();
        assert_eq!(stats.total_candidates, 6);
        assert_eq!(stats.liked, 2);
        assert_eq!(stats.passed, 2);
    }

    #[test]
    fn test_liked_ids_deduplicated_in_order() {
        let mut log = DecisionLog::new(6);
        log.record(4, SwipeDirection::Right);
        log.record(2, SwipeDirection::Left);
        log.record(1, SwipeDirection::Right);
        log.record(4, SwipeDirection::Right);

        assert_eq!(log.liked_ids(), vec![4, 1]);
    }

    #[test]
    fn test_write_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("decisions.json");

        let mut log = DecisionLog::new(3);
        log.record(2, SwipeDirection::Right);
        log.record(9, SwipeDirection::Left);
        log.write_json(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<DecisionRecord> = serde_json::from_str(&contents).unwrap();
        assert_eq!(records, log.decisions());
        assert!(contents.contains("\"right\""));
    }

    #[test]
    fn test_write_json_failure_is_export_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = DecisionLog::new(1);
        log.record(2, SwipeDirection::Right);

        // A directory can't be overwritten with a file.
        let err = log.write_json(temp_dir.path()).unwrap_err();

        assert!(matches!(err, TuneSwipeError::ExportError(_)));
        assert!(err.to_string().contains("Failed to write decisions"));
    }
}
