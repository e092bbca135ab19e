//! Keyword classification of problems
//!
//! Two classifiers exist and they are intentionally kept apart: the worker
//! buckets problems into eight categories with a fixed rule priority, while the
//! in-page widget uses a coarser six-way split with its own keywords. They do
//! not agree on every input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::problem::ProblemRecord;

/// Category assigned by the worker classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemCategory {
    Array,
    Tree,
    Graph,
    DynamicProgramming,
    String,
    Sorting,
    Search,
    General,
}

impl ProblemCategory {
    pub const ALL: [ProblemCategory; 8] = [
        Self::Array,
        Self::Tree,
        Self::Graph,
        Self::DynamicProgramming,
        Self::String,
        Self::Sorting,
        Self::Search,
        Self::General,
    ];

    /// Storage/wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Tree => "tree",
            Self::Graph => "graph",
            Self::DynamicProgramming => "dynamic_programming",
            Self::String => "string",
            Self::Sorting => "sorting",
            Self::Search => "search",
            Self::General => "general",
        }
    }

    /// Parse a stored name; anything unrecognised is `General`
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::General)
    }

    /// Dashboard skill area, if the category counts toward one
    pub fn broad(&self) -> Option<SkillArea> {
        match self {
            Self::Array | Self::String => Some(SkillArea::ArraysStrings),
            Self::DynamicProgramming => Some(SkillArea::DynamicProgramming),
            Self::Graph | Self::Tree => Some(SkillArea::GraphsTrees),
            Self::Sorting | Self::Search | Self::General => None,
        }
    }
}

impl FromStr for ProblemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown problem category: {}", s))
    }
}

impl fmt::Display for ProblemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category assigned by the widget classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetCategory {
    Array,
    Tree,
    Graph,
    Dp,
    String,
    General,
}

impl WidgetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Tree => "tree",
            Self::Graph => "graph",
            Self::Dp => "dp",
            Self::String => "string",
            Self::General => "general",
        }
    }
}

impl WidgetCategory {
    pub fn broad(&self) -> Option<SkillArea> {
        match self {
            Self::Array | Self::String => Some(SkillArea::ArraysStrings),
            Self::Dp => Some(SkillArea::DynamicProgramming),
            Self::Graph | Self::Tree => Some(SkillArea::GraphsTrees),
            Self::General => None,
        }
    }
}

/// Coarse skill buckets shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillArea {
    ArraysStrings,
    DynamicProgramming,
    GraphsTrees,
}

impl SkillArea {
    pub const ALL: [SkillArea; 3] =
        [Self::ArraysStrings, Self::DynamicProgramming, Self::GraphsTrees];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ArraysStrings => "Arrays & Strings",
            Self::DynamicProgramming => "Dynamic Programming",
            Self::GraphsTrees => "Graphs & Trees",
        }
    }

    /// Bucket for a stored `problemType`, which may come from either classifier
    pub fn from_problem_type(problem_type: &str) -> Option<Self> {
        match problem_type.trim().to_lowercase().as_str() {
            "dp" => Some(Self::DynamicProgramming),
            other => ProblemCategory::parse_lenient(other).broad(),
        }
    }
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification rule: tag equality or any keyword in the text
struct Rule {
    category: ProblemCategory,
    tag: Option<&'static str>,
    keywords: &'static [&'static str],
}

/// Priority order matters: categories overlap in keyword space
const RULES: &[Rule] = &[
    Rule {
        category: ProblemCategory::DynamicProgramming,
        tag: Some("dynamic programming"),
        keywords: &["optimal", "maximum", "minimum"],
    },
    Rule {
        category: ProblemCategory::Graph,
        tag: Some("graph"),
        keywords: &["node", "edge", "connected"],
    },
    Rule { category: ProblemCategory::Tree, tag: Some("tree"), keywords: &["binary tree", "root"] },
    Rule {
        category: ProblemCategory::Array,
        tag: Some("array"),
        keywords: &["array", "sum", "target"],
    },
    Rule {
        category: ProblemCategory::String,
        tag: Some("string"),
        keywords: &["string", "substring"],
    },
    Rule { category: ProblemCategory::Sorting, tag: None, keywords: &["sort", "order"] },
    Rule { category: ProblemCategory::Search, tag: None, keywords: &["search", "find"] },
];

/// Classify a problem with the worker's priority-ordered rules
pub fn classify(record: &ProblemRecord) -> ProblemCategory {
    let text = format!("{} {}", record.title, record.description).to_lowercase();
    let tags: Vec<String> = record.tags.iter().map(|t| t.to_lowercase()).collect();

    RULES
        .iter()
        .find(|rule| {
            rule.tag.is_some_and(|tag| tags.iter().any(|t| t == tag))
                || rule.keywords.iter().any(|k| text.contains(k))
        })
        .map_or(ProblemCategory::General, |rule| rule.category)
}

/// Classify a problem the way the in-page widget does
pub fn classify_widget(record: &ProblemRecord) -> WidgetCategory {
    let text = format!(
        "{} {} {}",
        record.description.to_lowercase(),
        record.title.to_lowercase(),
        record.tags.iter().map(|t| t.to_lowercase()).collect::<Vec<_>>().join(" ")
    );
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if has(&["array", "sum", "target"]) {
        WidgetCategory::Array
    } else if has(&["tree", "binary"]) {
        WidgetCategory::Tree
    } else if has(&["graph", "node", "edge"]) {
        WidgetCategory::Graph
    } else if has(&["dynamic", "dp", "optimal"]) {
        WidgetCategory::Dp
    } else if has(&["string", "substring"]) {
        WidgetCategory::String
    } else {
        WidgetCategory::General
    }
}
