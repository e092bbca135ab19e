//! Where hints and answers come from
//!
//! The canned backend classifies with keyword rules and answers from fixed
//! tables, then holds the result for a fixed delay to behave like a remote
//! call. A networked backend can implement the same trait.

use std::future::Future;
use std::time::Duration;

use crate::classify::classify;
use crate::hints::{HintSet, hints_for};
use crate::mentor;
use crate::messaging::MentorContext;
use crate::problem::ProblemRecord;

/// Produces hints and answers for the worker
pub trait MentorBackend: Send + Sync + 'static {
    /// Hints for a problem
    fn problem_hints(&self, record: ProblemRecord) -> impl Future<Output = HintSet> + Send;

    /// Answer to a free-form question
    fn answer(&self, question: String, context: MentorContext)
    -> impl Future<Output = String> + Send;
}

/// A computation that completes after a fixed delay
///
/// Always resolves; there is no cancellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deferred {
    delay: Duration,
}

impl Deferred {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Wait out the delay, then compute the value
    pub async fn resolve<T>(&self, compute: impl FnOnce() -> T) -> T {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        compute()
    }
}

/// Keyword-table backend with simulated latency
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedMentor {
    hints: Deferred,
    answers: Deferred,
}

impl CannedMentor {
    pub fn new(hint_delay: Duration, answer_delay: Duration) -> Self {
        Self { hints: Deferred::new(hint_delay), answers: Deferred::new(answer_delay) }
    }

    /// No simulated latency
    pub fn immediate() -> Self {
        Self::default()
    }
}

impl MentorBackend for CannedMentor {
    async fn problem_hints(&self, record: ProblemRecord) -> HintSet {
        self.hints
            .resolve(|| {
                let category = classify(&record);
                tracing::debug!("Classified {:?} as {}", record.title, category);
                hints_for(category)
            })
            .await
    }

    async fn answer(&self, question: String, _context: MentorContext) -> String {
        self.answers.resolve(|| mentor::respond(&question).to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ProblemCategory;
    use std::time::Instant;

    #[tokio::test]
    async fn canned_hints_use_worker_classifier() {
        let record = ProblemRecord {
            title: "Number of Islands".into(),
            description: "Count connected groups of land.".into(),
            ..Default::default()
        };
        let hints = CannedMentor::immediate().problem_hints(record).await;
        assert_eq!(hints, hints_for(ProblemCategory::Graph));
    }

    #[tokio::test]
    async fn canned_answer_matches_keywords() {
        let answer = CannedMentor::immediate()
            .answer("What's the time complexity?".into(), MentorContext::default())
            .await;
        assert!(answer.starts_with("To analyze time complexity"));
    }

    #[tokio::test(start_paused = true)]
    async fn deferred_waits_for_its_delay() {
        let deferred = Deferred::new(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();
        let value = deferred.resolve(|| 42).await;

        assert_eq!(value, 42);
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn zero_delay_resolves_immediately() {
        let started = Instant::now();
        assert_eq!(Deferred::default().resolve(|| "done").await, "done");
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
