//! Problem pages: platform detection, the extracted record, and stable ids
//!
//! A page load produces exactly one [`ProblemRecord`]. Extraction never fails;
//! a page the extractor does not understand yields an empty record, which the
//! widget shows as "problem not detected".

pub mod extract;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

pub use extract::extract;

/// Problem-hosting sites the mentor knows how to read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    LeetCode,
    Codeforces,
    HackerRank,
    #[default]
    Unknown,
}

impl Platform {
    /// Detect the platform from a page URL
    ///
    /// Accepts full URLs or bare hostnames. Anything unparseable is `Unknown`.
    pub fn detect(url: &str) -> Self {
        let host = match Url::parse(url) {
            Ok(parsed) => parsed.host_str().map(str::to_lowercase),
            // Bare hostnames ("leetcode.com/problems/..") don't parse as URLs
            Err(_) => url.split('/').next().map(str::to_lowercase),
        };

        match host.as_deref() {
            Some(h) if h.contains("leetcode.com") => Self::LeetCode,
            Some(h) if h.contains("codeforces.com") => Self::Codeforces,
            Some(h) if h.contains("hackerrank.com") => Self::HackerRank,
            _ => Self::Unknown,
        }
    }

    /// Human-readable name, `None` for unsupported pages
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            Self::LeetCode => Some("LeetCode"),
            Self::Codeforces => Some("Codeforces"),
            Self::HackerRank => Some("HackerRank"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name().unwrap_or("Unknown"))
    }
}

/// Best-effort description of the problem on the current page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub difficulty: String,
    pub platform: Platform,
}

impl ProblemRecord {
    /// A problem counts as detected once both title and statement were found
    pub fn is_detected(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}

static LEETCODE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/problems/([^/]+)").expect("valid regex"));
static CODEFORCES_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/(?:problemset/problem|contest)/(\d+)/(?:problem/)?([A-Za-z0-9]+)")
        .expect("valid regex")
});
static HACKERRANK_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/challenges/([^/]+)").expect("valid regex"));

/// Stable identifier for per-problem progress (`progress_<id>`)
///
/// Derived from the URL path when the platform's layout is recognised,
/// otherwise from the problem title.
pub fn problem_id(url: &str, record: &ProblemRecord) -> String {
    let from_url = Url::parse(url).ok().and_then(|parsed| {
        let path = parsed.path().to_string();
        match Platform::detect(url) {
            Platform::LeetCode => LEETCODE_PATH
                .captures(&path)
                .map(|c| format!("leetcode-{}", c[1].to_lowercase())),
            Platform::Codeforces => CODEFORCES_PATH
                .captures(&path)
                .map(|c| format!("codeforces-{}{}", &c[1], c[2].to_uppercase())),
            Platform::HackerRank => HACKERRANK_PATH
                .captures(&path)
                .map(|c| format!("hackerrank-{}", c[1].to_lowercase())),
            Platform::Unknown => None,
        }
    });

    from_url.unwrap_or_else(|| slugify(&record.title))
}

/// Lowercase, alphanumeric-and-dash form of a title
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() { "untitled".to_string() } else { slug }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_platforms() {
        assert_eq!(Platform::detect("https://leetcode.com/problems/two-sum/"), Platform::LeetCode);
        assert_eq!(
            Platform::detect("https://codeforces.com/problemset/problem/4/A"),
            Platform::Codeforces
        );
        assert_eq!(
            Platform::detect("https://www.hackerrank.com/challenges/solve-me-first"),
            Platform::HackerRank
        );
    }

    #[test]
    fn detects_bare_hostnames() {
        assert_eq!(Platform::detect("leetcode.com/problems/two-sum"), Platform::LeetCode);
    }

    #[test]
    fn unknown_hosts_are_unknown() {
        assert_eq!(Platform::detect("https://example.com/leetcode.com"), Platform::Unknown);
        assert_eq!(Platform::detect(""), Platform::Unknown);
        assert_eq!(Platform::Unknown.display_name(), None);
    }

    #[test]
    fn detection_requires_title_and_description() {
        let mut record = ProblemRecord { title: "Two Sum".into(), ..Default::default() };
        assert!(!record.is_detected());
        record.description = "Given an array".into();
        assert!(record.is_detected());
    }

    #[test]
    fn problem_id_from_leetcode_url() {
        let record = ProblemRecord::default();
        assert_eq!(
            problem_id("https://leetcode.com/problems/Two-Sum/description/", &record),
            "leetcode-two-sum"
        );
    }

    #[test]
    fn problem_id_from_codeforces_urls() {
        let record = ProblemRecord::default();
        assert_eq!(
            problem_id("https://codeforces.com/problemset/problem/4/a", &record),
            "codeforces-4A"
        );
        assert_eq!(
            problem_id("https://codeforces.com/contest/1791/problem/C", &record),
            "codeforces-1791C"
        );
    }

    #[test]
    fn problem_id_falls_back_to_title() {
        let record = ProblemRecord { title: "  Merge K Sorted Lists!".into(), ..Default::default() };
        assert_eq!(problem_id("not a url", &record), "merge-k-sorted-lists");
        assert_eq!(problem_id("", &ProblemRecord::default()), "untitled");
    }
}
