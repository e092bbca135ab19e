//! Aggregate counters shown by the popup and dashboard

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{StorageArea, StorageError, Store};

pub const DAILY_STATS_KEY: &str = "dailyStats";
pub const TOTAL_STATS_KEY: &str = "totalStats";

/// Counters for one calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    #[serde(default)]
    pub hints_used: u32,
    #[serde(default)]
    pub problems_solved: u32,
    #[serde(default)]
    pub questions_asked: u32,
}

/// Per-day counters keyed by local date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyStats {
    days: BTreeMap<NaiveDate, DayStats>,
}

impl DailyStats {
    /// Counters for a day, zero when nothing was recorded
    pub fn day(&self, date: NaiveDate) -> DayStats {
        self.days.get(&date).copied().unwrap_or_default()
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayStats {
        self.days.entry(date).or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// All-time counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalStats {
    #[serde(default)]
    pub problems_solved: u32,
    #[serde(default)]
    pub total_hints: u32,
    /// Seconds spent on problems
    #[serde(default)]
    pub total_time: u64,
    #[serde(default)]
    pub questions_asked: u32,
}

impl Store {
    pub fn daily_stats(&self) -> Result<DailyStats, StorageError> {
        Ok(self.get(StorageArea::Local, DAILY_STATS_KEY)?.unwrap_or_default())
    }

    pub fn total_stats(&self) -> Result<TotalStats, StorageError> {
        Ok(self.get(StorageArea::Local, TOTAL_STATS_KEY)?.unwrap_or_default())
    }

    /// Count one revealed hint for `today` and overall
    pub(crate) fn bump_hint_counters(&self, today: NaiveDate) -> Result<(), StorageError> {
        self.update_counters(today, |day, total| {
            day.hints_used += 1;
            total.total_hints += 1;
        })
    }

    /// Count one solved problem for `today` and overall, plus the time it took
    pub fn record_solved(&self, today: NaiveDate, time_spent_secs: u64) -> Result<(), StorageError> {
        self.update_counters(today, |day, total| {
            day.problems_solved += 1;
            total.problems_solved += 1;
            total.total_time += time_spent_secs;
        })
    }

    /// Count one question put to the mentor, for `today` and overall
    pub fn record_question(&self, today: NaiveDate) -> Result<(), StorageError> {
        self.update_counters(today, |day, total| {
            day.questions_asked += 1;
            total.questions_asked += 1;
        })
    }

    fn update_counters(
        &self,
        today: NaiveDate,
        update: impl FnOnce(&mut DayStats, &mut TotalStats),
    ) -> Result<(), StorageError> {
        let mut daily = self.daily_stats()?;
        let mut total = self.total_stats()?;
        update(daily.day_mut(today), &mut total);

        self.set_many(
            StorageArea::Local,
            [
                (DAILY_STATS_KEY.to_string(), serde_json::to_value(&daily)?),
                (TOTAL_STATS_KEY.to_string(), serde_json::to_value(total)?),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::temp_store;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn missing_day_is_zero() {
        let stats = DailyStats::default();
        assert_eq!(stats.day(date(1)), DayStats::default());
    }

    #[test]
    fn daily_stats_serialize_by_iso_date() {
        let mut stats = DailyStats::default();
        stats.day_mut(date(18)).hints_used = 3;

        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"2026-10-18":{"hintsUsed":3,"problemsSolved":0,"questionsAsked":0}}"#);

        let back: DailyStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.day(date(18)).hints_used, 3);
    }

    #[test]
    fn totals_tolerate_missing_fields() {
        let total: TotalStats = serde_json::from_str(r#"{"problemsSolved":4}"#).unwrap();
        assert_eq!(total.problems_solved, 4);
        assert_eq!(total.total_hints, 0);
    }

    #[test]
    fn record_solved_updates_both_counters() {
        let (_dir, store) = temp_store();
        store.record_solved(date(17), 120).unwrap();
        store.record_solved(date(18), 60).unwrap();

        let daily = store.daily_stats().unwrap();
        assert_eq!(daily.day(date(17)).problems_solved, 1);
        assert_eq!(daily.day(date(18)).problems_solved, 1);

        let total = store.total_stats().unwrap();
        assert_eq!(total.problems_solved, 2);
        assert_eq!(total.total_time, 180);
    }

    #[test]
    fn questions_are_counted_per_day_and_overall() {
        let (_dir, store) = temp_store();
        store.record_question(date(18)).unwrap();
        store.record_question(date(18)).unwrap();

        assert_eq!(store.daily_stats().unwrap().day(date(18)).questions_asked, 2);
        let total = store.total_stats().unwrap();
        assert_eq!(total.questions_asked, 2);
        assert_eq!(total.total_hints, 0);
    }
}
