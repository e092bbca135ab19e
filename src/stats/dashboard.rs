//! The full learning dashboard

use chrono::{Days, NaiveDate};

use crate::classify::SkillArea;
use crate::storage::analytics::ANALYTICS_KEY;
use crate::storage::stats::{DAILY_STATS_KEY, TOTAL_STATS_KEY};
use crate::storage::{
    AnalyticsEvent, AnalyticsLog, DailyStats, ProblemProgress, StorageArea, Store, TotalStats,
};

/// Longest streak the dashboard will count
const MAX_STREAK_DAYS: u64 = 365;

/// Problems per skill area that count as 100%
const SKILL_TARGET: usize = 50;

/// Entries in the recent-activity list
const RECENT_ACTIVITY: usize = 10;

/// Totals over the last seven days, today included
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeeklyStats {
    pub problems: u32,
    pub hints: u32,
    pub efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillProgress {
    pub area: SkillArea,
    pub count: usize,
    /// 0.0 to 100.0
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// Everything the dashboard displays
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub totals: TotalStats,
    pub efficiency: f64,
    pub streak: u32,
    pub weekly: WeeklyStats,
    pub skills: Vec<SkillProgress>,
    pub achievements: Vec<Achievement>,
    pub recent: Vec<AnalyticsEvent>,
    /// Saved per-problem progress, most recently updated first
    pub problems: Vec<ProblemProgress>,
}

impl Dashboard {
    /// Gather the dashboard from storage
    pub fn load(store: &Store, today: NaiveDate) -> Self {
        let daily: DailyStats = store.get_or_default(StorageArea::Local, DAILY_STATS_KEY);
        let totals: TotalStats = store.get_or_default(StorageArea::Local, TOTAL_STATS_KEY);
        let analytics: AnalyticsLog = store.get_or_default(StorageArea::Local, ANALYTICS_KEY);

        let mut dashboard = Self::compute(&daily, totals, &analytics, today);
        dashboard.problems = match store.all_progress() {
            Ok(mut problems) => {
                problems.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                problems
            }
            Err(e) => {
                tracing::warn!("Failed to read problem progress: {}", e);
                Vec::new()
            }
        };
        dashboard
    }

    pub fn compute(
        daily: &DailyStats,
        totals: TotalStats,
        analytics: &AnalyticsLog,
        today: NaiveDate,
    ) -> Self {
        Self {
            totals,
            efficiency: efficiency(totals.total_hints, totals.problems_solved),
            streak: study_streak(daily, today),
            weekly: weekly_stats(daily, today),
            skills: skill_progress(analytics),
            achievements: achievements(&totals),
            recent: analytics.recent(RECENT_ACTIVITY).into_iter().cloned().collect(),
            problems: Vec::new(),
        }
    }
}

/// Efficiency score: fewer hints per solved problem is better
pub fn efficiency(hints: u32, solved: u32) -> f64 {
    if solved == 0 {
        return 0.0;
    }
    (100.0 - (hints as f64 / solved as f64) * 20.0).max(0.0)
}

/// Consecutive days with a solved problem, counting back from today
///
/// An empty today does not break the streak; the day before it does.
pub fn study_streak(daily: &DailyStats, today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..MAX_STREAK_DAYS {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        if daily.day(date).problems_solved > 0 {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

pub fn weekly_stats(daily: &DailyStats, today: NaiveDate) -> WeeklyStats {
    let (problems, hints) = (0..7)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| daily.day(date))
        .fold((0, 0), |(p, h), day| (p + day.problems_solved, h + day.hints_used));

    WeeklyStats { problems, hints, efficiency: efficiency(hints, problems) }
}

/// Hint events per skill area, measured against a fixed target
pub fn skill_progress(analytics: &AnalyticsLog) -> Vec<SkillProgress> {
    SkillArea::ALL
        .into_iter()
        .map(|area| {
            let count = analytics
                .events()
                .iter()
                .filter_map(|e| e.problem_type.as_deref())
                .filter(|t| SkillArea::from_problem_type(t) == Some(area))
                .count();
            let percent = (count as f64 / SKILL_TARGET as f64 * 100.0).min(100.0);
            SkillProgress { area, count, percent }
        })
        .collect()
}

pub fn achievements(totals: &TotalStats) -> Vec<Achievement> {
    vec![
        Achievement {
            name: "First Hint",
            description: "Used your first hint",
            unlocked: totals.total_hints > 0,
        },
        Achievement {
            name: "Ten Solved",
            description: "Solved ten problems",
            unlocked: totals.problems_solved >= 10,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn daily(entries: &[(u32, u32, u32)]) -> DailyStats {
        let mut stats = DailyStats::default();
        for &(d, hints, solved) in entries {
            let slot = stats.day_mut(day(d));
            slot.hints_used = hints;
            slot.problems_solved = solved;
        }
        stats
    }

    fn event(timestamp: i64, problem_type: Option<&str>) -> AnalyticsEvent {
        AnalyticsEvent {
            hint_level: 1,
            url: "https://leetcode.com/problems/two-sum/".into(),
            timestamp,
            problem_type: problem_type.map(str::to_string),
            problem_title: None,
        }
    }

    #[test]
    fn efficiency_formula() {
        assert_eq!(efficiency(0, 0), 0.0);
        assert_eq!(efficiency(4, 2), 60.0);
        assert_eq!(efficiency(20, 1), 0.0);
        assert_eq!(efficiency(0, 3), 100.0);
    }

    #[test]
    fn streak_allows_empty_today() {
        let stats = daily(&[(15, 0, 1), (16, 0, 2), (17, 0, 1)]);
        assert_eq!(study_streak(&stats, day(18)), 3);
        assert_eq!(study_streak(&stats, day(17)), 3);
    }

    #[test]
    fn streak_breaks_on_gap() {
        let stats = daily(&[(14, 0, 1), (16, 3, 0), (17, 0, 1), (18, 0, 1)]);
        assert_eq!(study_streak(&stats, day(18)), 2);
        assert_eq!(study_streak(&DailyStats::default(), day(18)), 0);
    }

    #[test]
    fn weekly_window_is_seven_days() {
        let stats = daily(&[(11, 9, 9), (12, 2, 1), (18, 2, 1)]);
        let weekly = weekly_stats(&stats, day(18));
        assert_eq!(weekly.problems, 2);
        assert_eq!(weekly.hints, 4);
        assert_eq!(weekly.efficiency, 60.0);
    }

    #[test]
    fn skills_bucket_both_classifier_vocabularies() {
        let mut log = AnalyticsLog::default();
        log.push(event(1, Some("array")));
        log.push(event(2, Some("string")));
        log.push(event(3, Some("dp")));
        log.push(event(4, Some("dynamic_programming")));
        log.push(event(5, Some("tree")));
        log.push(event(6, Some("sorting")));
        log.push(event(7, None));

        let counts: Vec<(SkillArea, usize)> =
            skill_progress(&log).iter().map(|s| (s.area, s.count)).collect();
        assert_eq!(
            counts,
            vec![
                (SkillArea::ArraysStrings, 2),
                (SkillArea::DynamicProgramming, 2),
                (SkillArea::GraphsTrees, 1),
            ]
        );
        assert_eq!(skill_progress(&log)[0].percent, 4.0);
    }

    #[test]
    fn skill_percent_caps_at_full() {
        let mut log = AnalyticsLog::default();
        for ts in 0..60 {
            log.push(event(ts, Some("graph")));
        }
        assert_eq!(skill_progress(&log)[2].percent, 100.0);
    }

    #[test]
    fn achievements_unlock_on_thresholds() {
        let fresh = achievements(&TotalStats::default());
        assert!(fresh.iter().all(|a| !a.unlocked));

        let veteran = achievements(&TotalStats { problems_solved: 10, total_hints: 1, ..Default::default() });
        assert!(veteran.iter().all(|a| a.unlocked));
    }

    #[test]
    fn recent_activity_is_ten_newest() {
        let mut log = AnalyticsLog::default();
        for ts in 0..15 {
            log.push(event(ts, None));
        }
        let dashboard = Dashboard::compute(&DailyStats::default(), TotalStats::default(), &log, day(18));
        let stamps: Vec<i64> = dashboard.recent.iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, (5..15).rev().collect::<Vec<_>>());
    }

    #[test]
    fn load_from_empty_store() {
        let (_dir, store) = crate::storage::tests::temp_store();
        let dashboard = Dashboard::load(&store, day(18));
        assert_eq!(dashboard.totals, TotalStats::default());
        assert_eq!(dashboard.streak, 0);
        assert!(dashboard.recent.is_empty());
        assert_eq!(dashboard.skills.len(), 3);
        assert!(dashboard.problems.is_empty());
    }

    #[test]
    fn load_lists_problems_newest_first() {
        let (_dir, store) = crate::storage::tests::temp_store();
        for (id, updated_at) in [("leetcode-two-sum", 10), ("codeforces-1-a", 30), ("hackerrank-x", 20)] {
            let progress = ProblemProgress { problem_id: id.into(), updated_at, ..Default::default() };
            store.save_progress(&progress).unwrap();
        }
        store.solve_problem("leetcode-two-sum", 5, day(18)).unwrap();

        let dashboard = Dashboard::load(&store, day(18));
        let ids: Vec<&str> = dashboard.problems.iter().map(|p| p.problem_id.as_str()).collect();
        assert_eq!(ids, vec!["codeforces-1-a", "hackerrank-x", "leetcode-two-sum"]);
        assert!(dashboard.problems[2].solved);
        assert_eq!(dashboard.totals.problems_solved, 1);
    }
}
