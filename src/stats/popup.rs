//! The quick-look popup

use chrono::NaiveDate;

use crate::config::SettingsRecord;
use crate::messaging::{MessagingError, Response};
use crate::problem::Platform;
use crate::storage::analytics::ANALYTICS_KEY;
use crate::storage::stats::{DAILY_STATS_KEY, TOTAL_STATS_KEY};
use crate::storage::{AnalyticsLog, DailyStats, StorageArea, Store, TotalStats};

/// Shown when the page is not a supported platform
pub const NOT_SUPPORTED: &str = "Not Supported";

/// Shown when the widget cannot name the current problem
pub const NO_ACTIVE_PROBLEM: &str = "Navigate to a problem";

/// Everything the popup displays
#[derive(Debug, Clone, PartialEq)]
pub struct PopupSummary {
    pub platform: String,
    pub active_problem: String,
    pub hints_today: u32,
    pub problems_solved: u32,
    pub settings: SettingsRecord,
    /// 0.0 to 100.0
    pub learning_progress: f64,
}

impl PopupSummary {
    /// Gather the popup from storage
    ///
    /// `active_problem` is whatever the widget answered to `getCurrentProblem`.
    pub fn load(
        store: &Store,
        platform: Platform,
        active_problem: Option<String>,
        today: NaiveDate,
    ) -> Self {
        let daily: DailyStats = store.get_or_default(StorageArea::Local, DAILY_STATS_KEY);
        let totals: TotalStats = store.get_or_default(StorageArea::Local, TOTAL_STATS_KEY);
        let analytics: AnalyticsLog = store.get_or_default(StorageArea::Local, ANALYTICS_KEY);

        Self {
            platform: platform.display_name().unwrap_or(NOT_SUPPORTED).to_string(),
            active_problem: active_problem
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NO_ACTIVE_PROBLEM.to_string()),
            hints_today: daily.day(today).hints_used,
            problems_solved: totals.problems_solved,
            settings: SettingsRecord::load(store),
            learning_progress: learning_progress(&totals, analytics.len()),
        }
    }

    pub fn progress_message(&self) -> &'static str {
        progress_message(self.learning_progress)
    }
}

/// Pull the problem title out of a `getCurrentProblem` exchange
///
/// Any delivery failure means the widget is not there to ask.
pub fn active_problem_title(reply: Result<Response, MessagingError>) -> Option<String> {
    match reply {
        Ok(Response::CurrentProblem { problem_title }) => problem_title,
        Ok(other) => {
            tracing::debug!("Unexpected reply to getCurrentProblem: {:?}", other);
            None
        }
        Err(e) => {
            tracing::debug!("Widget unavailable: {}", e);
            None
        }
    }
}

/// Learning progress score
pub fn learning_progress(totals: &TotalStats, analytics_len: usize) -> f64 {
    let solved = totals.problems_solved as f64;
    let efficiency = if analytics_len > 0 {
        (100.0 - (totals.total_hints as f64 / solved.max(1.0)) * 10.0).max(0.0)
    } else {
        0.0
    };
    (solved * 10.0 + efficiency * 0.5).min(100.0)
}

/// Encouragement for a progress score
pub fn progress_message(progress: f64) -> &'static str {
    if progress < 20.0 {
        "Just getting started! Every expert was once a beginner."
    } else if progress < 50.0 {
        "You're building momentum! Keep practicing."
    } else if progress < 80.0 {
        "Great progress! You're becoming more efficient."
    } else {
        "Excellent! You're mastering problem-solving patterns."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::HintUsage;
    use crate::storage::tests::temp_store;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn empty_store_shows_fallbacks() {
        let (_dir, store) = temp_store();
        let summary = PopupSummary::load(&store, Platform::Unknown, None, today());

        assert_eq!(summary.platform, "Not Supported");
        assert_eq!(summary.active_problem, "Navigate to a problem");
        assert_eq!(summary.hints_today, 0);
        assert_eq!(summary.problems_solved, 0);
        assert_eq!(summary.settings, SettingsRecord::default());
        assert_eq!(summary.learning_progress, 0.0);
        assert!(summary.progress_message().starts_with("Just getting started"));
    }

    #[test]
    fn reads_today_and_totals() {
        let (_dir, store) = temp_store();
        let usage = HintUsage {
            hint_level: 1,
            url: "https://leetcode.com/problems/two-sum/".into(),
            problem_type: None,
            problem_title: None,
        };
        store.track_hint_usage(usage.clone(), 1, today()).unwrap();
        store.track_hint_usage(usage, 2, today().pred_opt().unwrap()).unwrap();
        store.record_solved(today(), 60).unwrap();

        let summary =
            PopupSummary::load(&store, Platform::LeetCode, Some("Two Sum".into()), today());
        assert_eq!(summary.platform, "LeetCode");
        assert_eq!(summary.active_problem, "Two Sum");
        assert_eq!(summary.hints_today, 1);
        assert_eq!(summary.problems_solved, 1);
        // efficiency = 100 - 2/1*10 = 80, progress = 10 + 40
        assert_eq!(summary.learning_progress, 50.0);
    }

    #[test]
    fn progress_formula() {
        let totals = TotalStats { problems_solved: 3, total_hints: 6, ..Default::default() };
        // efficiency 80 -> 30 + 40
        assert_eq!(learning_progress(&totals, 6), 70.0);
        // no analytics means no efficiency credit
        assert_eq!(learning_progress(&totals, 0), 30.0);

        let many = TotalStats { problems_solved: 12, ..Default::default() };
        assert_eq!(learning_progress(&many, 1), 100.0);

        let hint_heavy = TotalStats { total_hints: 40, ..Default::default() };
        assert_eq!(learning_progress(&hint_heavy, 40), 0.0);
    }

    #[test]
    fn message_tiers() {
        assert!(progress_message(19.9).starts_with("Just getting started"));
        assert!(progress_message(20.0).starts_with("You're building momentum"));
        assert!(progress_message(50.0).starts_with("Great progress"));
        assert!(progress_message(80.0).starts_with("Excellent"));
    }

    #[test]
    fn title_from_reply() {
        let ok = Ok(Response::CurrentProblem { problem_title: Some("Two Sum".into()) });
        assert_eq!(active_problem_title(ok), Some("Two Sum".to_string()));

        let gone = Err(MessagingError::NoResponse { action: "getCurrentProblem" });
        assert_eq!(active_problem_title(gone), None);
    }
}
