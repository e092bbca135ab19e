//! Hint-usage analytics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{StorageArea, StorageError, Store};

/// Storage key of the analytics log (local scope)
pub const ANALYTICS_KEY: &str = "hintAnalytics";

/// Events kept in the log; older ones are evicted first
pub const MAX_EVENTS: usize = 1000;

/// What the widget reports when a hint is revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintUsage {
    pub hint_level: u8,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_title: Option<String>,
}

/// A stored hint-usage event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub hint_level: u8,
    pub url: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_title: Option<String>,
}

impl AnalyticsEvent {
    /// Stamp a usage report
    pub fn from_usage(usage: HintUsage, timestamp: i64) -> Self {
        Self {
            hint_level: usage.hint_level,
            url: usage.url,
            timestamp,
            problem_type: usage.problem_type,
            problem_title: usage.problem_title,
        }
    }
}

/// Append-only, capped event log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyticsLog {
    events: Vec<AnalyticsEvent>,
}

impl AnalyticsLog {
    /// Append an event, evicting the oldest beyond [`MAX_EVENTS`]
    pub fn push(&mut self, event: AnalyticsEvent) {
        self.events.push(event);
        if self.events.len() > MAX_EVENTS {
            let excess = self.events.len() - MAX_EVENTS;
            self.events.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events oldest first
    pub fn events(&self) -> &[AnalyticsEvent] {
        &self.events
    }

    /// Up to `n` events, newest first
    pub fn recent(&self, n: usize) -> Vec<&AnalyticsEvent> {
        let mut sorted: Vec<&AnalyticsEvent> = self.events.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted.truncate(n);
        sorted
    }
}

impl Store {
    /// Load the analytics log
    pub fn hint_analytics(&self) -> Result<AnalyticsLog, StorageError> {
        Ok(self.get(StorageArea::Local, ANALYTICS_KEY)?.unwrap_or_default())
    }

    /// Record a revealed hint: append the event and bump today's and total counters
    pub fn track_hint_usage(
        &self,
        usage: HintUsage,
        timestamp: i64,
        today: NaiveDate,
    ) -> Result<AnalyticsEvent, StorageError> {
        let event = AnalyticsEvent::from_usage(usage, timestamp);

        let mut log = self.hint_analytics()?;
        log.push(event.clone());
        self.set(StorageArea::Local, ANALYTICS_KEY, &log)?;

        self.bump_hint_counters(today)?;
        Ok(event)
    }
}
