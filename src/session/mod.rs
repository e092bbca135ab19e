//! Per-page mentor session and the hint progression state machine
//!
//! A session is created for every page load and owned by the UI. Nothing in it
//! survives navigation; only the analytics it reports are persisted.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::classify::{WidgetCategory, classify_widget};
use crate::hints::{HINT_LEVELS, Hint, HintSet, widget_hints};
use crate::problem::{self, Platform, ProblemRecord};
use crate::storage::{HintUsage, ProblemProgress};

/// Counters for the current page session
#[derive(Debug, Clone)]
pub struct ProgressionState {
    /// Hints unlocked so far, never above [`HINT_LEVELS`]
    hints_used: u8,
    /// Editor interactions observed
    attempts: u32,
    start_time: Instant,
    /// When the most recent hint was revealed (session start before that)
    last_reveal: Instant,
}

impl ProgressionState {
    pub fn new(now: Instant) -> Self {
        Self { hints_used: 0, attempts: 0, start_time: now, last_reveal: now }
    }

    pub fn hints_used(&self) -> u8 {
        self.hints_used
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn is_complete(&self) -> bool {
        self.hints_used as usize >= HINT_LEVELS
    }

    /// Percentage of hints unlocked
    pub fn progress_percent(&self) -> u8 {
        (self.hints_used as usize * 100 / HINT_LEVELS) as u8
    }

    /// Whole minutes elapsed since the session began
    pub fn minutes_spent(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.start_time).as_secs() / 60
    }
}

/// Outcome of asking for the next hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal<'a> {
    /// A new hint was unlocked; `usage` should be reported to the worker
    Unlocked { hint: &'a Hint, usage: HintUsage },
    /// Every hint is already visible; nothing changed
    AllUnlocked,
    /// The page has no detected problem, so there are no hints to reveal
    NotDetected,
}

/// Terminal notice shown once every hint is out
pub const ALL_UNLOCKED_NOTICE: &str =
    "You've unlocked all available hints! Try implementing your solution.";

/// Everything the widget knows about the current page
#[derive(Debug, Clone)]
pub struct MentorSession {
    url: String,
    problem_id: String,
    record: ProblemRecord,
    category: WidgetCategory,
    hints: HintSet,
    progression: ProgressionState,
    minimized: bool,
}

impl MentorSession {
    /// Build a session for an already-extracted record
    pub fn new<R: Rng + ?Sized>(url: impl Into<String>, record: ProblemRecord, rng: &mut R) -> Self {
        let url = url.into();
        let category = classify_widget(&record);
        let hints = widget_hints(category, rng);
        let problem_id = problem::problem_id(&url, &record);

        Self {
            url,
            problem_id,
            record,
            category,
            hints,
            progression: ProgressionState::new(Instant::now()),
            minimized: false,
        }
    }

    /// Detect the platform, scrape the page, and build a session
    pub fn from_page(url: &str, html: &str) -> Self {
        let platform = Platform::detect(url);
        let record = problem::extract(platform, html);
        if record.is_detected() {
            tracing::info!("Problem detected: {}", record.title);
        } else {
            tracing::info!("Could not detect a problem on {}", url);
        }
        Self::new(url, record, &mut rand::thread_rng())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn problem_id(&self) -> &str {
        &self.problem_id
    }

    pub fn record(&self) -> &ProblemRecord {
        &self.record
    }

    pub fn category(&self) -> WidgetCategory {
        self.category
    }

    pub fn hints(&self) -> &HintSet {
        &self.hints
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn is_detected(&self) -> bool {
        self.record.is_detected()
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Whether the hint at `index` (0-based) is visible
    pub fn is_unlocked(&self, index: usize) -> bool {
        index < self.progression.hints_used as usize
    }

    /// Unlock the next hint
    pub fn reveal_next(&mut self) -> Reveal<'_> {
        self.reveal_next_at(Instant::now())
    }

    fn reveal_next_at(&mut self, now: Instant) -> Reveal<'_> {
        if !self.is_detected() {
            return Reveal::NotDetected;
        }
        if self.progression.is_complete() {
            return Reveal::AllUnlocked;
        }

        let index = self.progression.hints_used as usize;
        self.progression.hints_used += 1;
        self.progression.last_reveal = now;

        let hint = &self.hints[index];
        tracing::debug!("Hint {} used for problem: {}", hint.level, self.record.title);

        let usage = HintUsage {
            hint_level: hint.level,
            url: self.url.clone(),
            problem_type: Some(self.category.as_str().to_string()),
            problem_title: Some(self.record.title.clone()),
        };
        Reveal::Unlocked { hint, usage }
    }

    /// Count an interaction with the code editor
    pub fn record_editor_activity(&mut self) {
        self.progression.attempts += 1;
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    /// Minutes spent on this page
    pub fn time_spent_minutes(&self) -> u64 {
        self.progression.minutes_spent(Instant::now())
    }

    /// In timed mode: has `delay` passed since the last reveal?
    pub fn timed_hint_due(&self, now: Instant, delay: Duration) -> bool {
        self.is_detected()
            && !self.progression.is_complete()
            && now.saturating_duration_since(self.progression.last_reveal) >= delay
    }

    /// Label of the primary action button
    pub fn next_button_label(&self) -> String {
        match self.progression.hints_used {
            0 => "Get First Hint".to_string(),
            n if n as usize >= HINT_LEVELS => "All Hints Unlocked!".to_string(),
            n => format!("Get Hint {}", n + 1),
        }
    }

    /// Snapshot for `progress_<problemId>`
    pub fn progress_snapshot(&self, now_ms: i64) -> ProblemProgress {
        ProblemProgress {
            problem_id: self.problem_id.clone(),
            title: self.record.title.clone(),
            platform: self.record.platform,
            hints_used: self.progression.hints_used,
            attempts: self.progression.attempts,
            time_spent_secs: self.progression.start_time.elapsed().as_secs(),
            solved: false,
            updated_at: now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn two_sum() -> MentorSession {
        let record = ProblemRecord {
            title: "Two Sum".into(),
            description: "Return indices of two numbers that add up to target.".into(),
            tags: vec!["Array".into(), "Hash Table".into()],
            difficulty: "Easy".into(),
            platform: Platform::LeetCode,
        };
        MentorSession::new(
            "https://leetcode.com/problems/two-sum/",
            record,
            &mut StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn fresh_session_is_locked() {
        let session = two_sum();
        assert_eq!(session.progression().hints_used(), 0);
        assert_eq!(session.progression().progress_percent(), 0);
        assert!(!session.is_unlocked(0));
        assert_eq!(session.next_button_label(), "Get First Hint");
        assert_eq!(session.problem_id(), "leetcode-two-sum");
        assert_eq!(session.category(), WidgetCategory::Array);
    }

    #[test]
    fn five_reveals_stop_at_four() {
        let mut session = two_sum();
        let mut used = Vec::new();
        let mut outcomes = Vec::new();

        for _ in 0..5 {
            let outcome = match session.reveal_next() {
                Reveal::Unlocked { hint, .. } => Some(hint.level),
                Reveal::AllUnlocked => None,
                Reveal::NotDetected => panic!("problem should be detected"),
            };
            outcomes.push(outcome);
            used.push(session.progression().hints_used());
        }

        assert_eq!(used, vec![1, 2, 3, 4, 4]);
        assert_eq!(outcomes, vec![Some(1), Some(2), Some(3), Some(4), None]);
        assert_eq!(session.progression().progress_percent(), 100);
        assert_eq!(session.next_button_label(), "All Hints Unlocked!");
    }

    #[test]
    fn reveal_reports_usage() {
        let mut session = two_sum();
        match session.reveal_next() {
            Reveal::Unlocked { hint, usage } => {
                assert_eq!(hint.title, "Problem Understanding");
                assert_eq!(usage.hint_level, 1);
                assert_eq!(usage.url, "https://leetcode.com/problems/two-sum/");
                assert_eq!(usage.problem_type.as_deref(), Some("array"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(session.is_unlocked(0));
        assert!(!session.is_unlocked(1));
        assert_eq!(session.progression().progress_percent(), 25);
        assert_eq!(session.next_button_label(), "Get Hint 2");
    }

    #[test]
    fn undetected_page_has_nothing_to_reveal() {
        let mut session = MentorSession::new(
            "https://leetcode.com/problems/x/",
            ProblemRecord::default(),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(!session.is_detected());
        assert_eq!(session.reveal_next(), Reveal::NotDetected);
        assert_eq!(session.progression().hints_used(), 0);
    }

    #[test]
    fn from_page_without_selectors_is_not_detected() {
        let session =
            MentorSession::from_page("https://codeforces.com/problemset/problem/1/A", "<p>hi</p>");
        assert!(!session.is_detected());
        assert_eq!(session.record().platform, Platform::Codeforces);
    }

    #[test]
    fn editor_activity_counts_attempts() {
        let mut session = two_sum();
        session.record_editor_activity();
        session.record_editor_activity();
        assert_eq!(session.progression().attempts(), 2);
        assert_eq!(session.progress_snapshot(7).attempts, 2);
    }

    #[test]
    fn minimize_toggles() {
        let mut session = two_sum();
        session.toggle_minimized();
        assert!(session.is_minimized());
        session.toggle_minimized();
        assert!(!session.is_minimized());
    }

    #[test]
    fn timed_hints_wait_for_delay() {
        let mut session = two_sum();
        let start = session.progression().start_time();
        let delay = Duration::from_secs(30);

        assert!(!session.timed_hint_due(start + Duration::from_secs(10), delay));
        assert!(session.timed_hint_due(start + Duration::from_secs(30), delay));

        let later = start + Duration::from_secs(31);
        assert!(matches!(session.reveal_next_at(later), Reveal::Unlocked { .. }));
        assert!(!session.timed_hint_due(later + Duration::from_secs(5), delay));
        assert!(session.timed_hint_due(later + Duration::from_secs(30), delay));
    }

    #[test]
    fn minutes_spent_rounds_down() {
        let state = ProgressionState::new(Instant::now());
        let start = state.start_time();
        assert_eq!(state.minutes_spent(start + Duration::from_secs(59)), 0);
        assert_eq!(state.minutes_spent(start + Duration::from_secs(125)), 2);
    }
}
