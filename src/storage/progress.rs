//! Per-problem progress records (sync scope)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{StorageArea, StorageError, Store};
use crate::problem::Platform;

const PROGRESS_PREFIX: &str = "progress_";

/// Progress snapshot for one problem
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemProgress {
    pub problem_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub hints_used: u8,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub time_spent_secs: u64,
    #[serde(default)]
    pub solved: bool,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub updated_at: i64,
}

/// Storage key for a problem's progress
pub fn progress_key(problem_id: &str) -> String {
    format!("{PROGRESS_PREFIX}{problem_id}")
}

impl Store {
    /// Overwrite the progress record for a problem
    pub fn save_progress(&self, progress: &ProblemProgress) -> Result<(), StorageError> {
        self.set(StorageArea::Sync, &progress_key(&progress.problem_id), progress)
    }

    pub fn problem_progress(&self, problem_id: &str) -> Result<Option<ProblemProgress>, StorageError> {
        self.get(StorageArea::Sync, &progress_key(problem_id))
    }

    /// Every stored progress record
    pub fn all_progress(&self) -> Result<Vec<ProblemProgress>, StorageError> {
        let mut records = Vec::new();
        for key in self.keys(StorageArea::Sync)? {
            if key.starts_with(PROGRESS_PREFIX) {
                if let Some(record) = self.get(StorageArea::Sync, &key)? {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    /// Flag a problem solved, creating its record if needed
    ///
    /// Returns `false` when it was already solved.
    pub fn mark_problem_solved(&self, problem_id: &str, now_ms: i64) -> Result<bool, StorageError> {
        let mut progress = self.problem_progress(problem_id)?.unwrap_or_else(|| ProblemProgress {
            problem_id: problem_id.to_string(),
            ..Default::default()
        });
        if progress.solved {
            return Ok(false);
        }
        progress.solved = true;
        progress.updated_at = now_ms;
        self.save_progress(&progress)?;
        Ok(true)
    }

    /// Mark a problem solved and count it in today's and the total stats
    ///
    /// A problem already marked solved is not counted twice.
    pub fn solve_problem(
        &self,
        problem_id: &str,
        now_ms: i64,
        today: NaiveDate,
    ) -> Result<bool, StorageError> {
        if !self.mark_problem_solved(problem_id, now_ms)? {
            return Ok(false);
        }
        let time_spent = self.problem_progress(problem_id)?.map_or(0, |p| p.time_spent_secs);
        self.record_solved(today, time_spent)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::temp_store;

    #[test]
    fn solving_counts_once() {
        let (_dir, store) = temp_store();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        store
            .save_progress(&ProblemProgress {
                problem_id: "leetcode-two-sum".into(),
                time_spent_secs: 420,
                ..Default::default()
            })
            .unwrap();

        assert!(store.solve_problem("leetcode-two-sum", 5, today).unwrap());
        assert!(!store.solve_problem("leetcode-two-sum", 6, today).unwrap());

        let totals = store.total_stats().unwrap();
        assert_eq!(totals.problems_solved, 1);
        assert_eq!(totals.total_time, 420);
        assert_eq!(store.daily_stats().unwrap().day(today).problems_solved, 1);
    }

    #[test]
    fn key_has_prefix() {
        assert_eq!(progress_key("leetcode-two-sum"), "progress_leetcode-two-sum");
    }

    #[test]
    fn save_and_load_progress() {
        let (_dir, store) = temp_store();
        let progress = ProblemProgress {
            problem_id: "leetcode-two-sum".into(),
            title: "Two Sum".into(),
            platform: Platform::LeetCode,
            hints_used: 2,
            attempts: 3,
            time_spent_secs: 300,
            solved: false,
            updated_at: 1,
        };
        store.save_progress(&progress).unwrap();

        assert_eq!(store.problem_progress("leetcode-two-sum").unwrap(), Some(progress));
        assert_eq!(store.all_progress().unwrap().len(), 1);
    }

    #[test]
    fn mark_solved_once() {
        let (_dir, store) = temp_store();
        store.set(StorageArea::Sync, "hintMode", "click").unwrap();

        assert!(store.mark_problem_solved("codeforces-4A", 5).unwrap());
        assert!(!store.mark_problem_solved("codeforces-4A", 6).unwrap());

        let record = store.problem_progress("codeforces-4A").unwrap().unwrap();
        assert!(record.solved);
        assert_eq!(record.updated_at, 5);
        // Settings keys in the same scope are not progress records
        assert_eq!(store.all_progress().unwrap().len(), 1);
    }
}
