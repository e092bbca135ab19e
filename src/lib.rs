//! Coding Mentor - progressive hints for competitive-programming problems
//!
//! The mentor reads a problem page from LeetCode, Codeforces, or HackerRank,
//! classifies it, and releases four hints one at a time, from understanding
//! the problem to an implementation strategy. Usage is tracked locally so the
//! popup and dashboard can show how much help each solve needed.

pub mod app;
pub mod classify;
pub mod config;
pub mod hints;
pub mod mentor;
pub mod messaging;
pub mod problem;
pub mod session;
pub mod stats;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
