//! Read-only summaries for the popup and the dashboard
//!
//! Both views read the storage bridge directly and never write to it. A
//! storage failure degrades to empty counters.

pub mod dashboard;
pub mod popup;

pub use dashboard::{Achievement, Dashboard, SkillProgress, WeeklyStats};
pub use popup::PopupSummary;
