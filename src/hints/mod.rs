//! Canned hint tables
//!
//! Every category maps to exactly four hints, ordered from gentle nudge to
//! implementation strategy.

mod templates;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::classify::{ProblemCategory, WidgetCategory};
use templates::{
    APPROACH_HINTS, DATA_STRUCTURE_HINTS, IMPLEMENTATION_POOL, UNDERSTANDING_POOL, WORKER_HINTS,
};

/// Number of hint levels per problem
pub const HINT_LEVELS: usize = 4;

/// A single hint at one disclosure level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// 1-based disclosure level
    pub level: u8,
    pub title: String,
    pub content: String,
}

/// Exactly four hints, level 1 first
pub type HintSet = [Hint; HINT_LEVELS];

/// Titles used by the worker's hint sets
const WORKER_TITLES: [&str; HINT_LEVELS] = [
    "Problem Understanding",
    "Approach Direction",
    "Data Structures & Algorithms",
    "Implementation Strategy",
];

/// Titles used by the widget's hint sets
const WIDGET_TITLES: [&str; HINT_LEVELS] =
    ["Problem Understanding", "Approach Direction", "Data Structures", "Implementation Guide"];

const UNDERSTANDING_PREFIX: &str = "Let's understand what this problem is asking. ";

fn build(titles: [&str; HINT_LEVELS], contents: [String; HINT_LEVELS]) -> HintSet {
    let mut level = 0u8;
    contents.map(|content| {
        let title = titles[level as usize].to_string();
        level += 1;
        Hint { level, title, content }
    })
}

/// Hint set for a worker category
pub fn hints_for(category: ProblemCategory) -> HintSet {
    let table = WORKER_HINTS
        .iter()
        .find(|(c, _)| *c == category)
        .or_else(|| WORKER_HINTS.iter().find(|(c, _)| *c == ProblemCategory::General))
        .map(|(_, hints)| hints)
        .unwrap_or(&WORKER_HINTS[WORKER_HINTS.len() - 1].1);

    build(
        WORKER_TITLES,
        [
            format!("{UNDERSTANDING_PREFIX}{}", table[0]),
            table[1].to_string(),
            table[2].to_string(),
            table[3].to_string(),
        ],
    )
}

/// Hint set the widget builds for itself
///
/// The understanding and implementation hints are drawn at random from small
/// pools, so the same problem may read differently across sessions.
pub fn widget_hints<R: Rng + ?Sized>(category: WidgetCategory, rng: &mut R) -> HintSet {
    let understanding = UNDERSTANDING_POOL.choose(rng).copied().unwrap_or(UNDERSTANDING_POOL[0]);
    let implementation =
        IMPLEMENTATION_POOL.choose(rng).copied().unwrap_or(IMPLEMENTATION_POOL[0]);

    build(
        WIDGET_TITLES,
        [
            understanding.to_string(),
            per_category(&APPROACH_HINTS, category).to_string(),
            per_category(&DATA_STRUCTURE_HINTS, category).to_string(),
            implementation.to_string(),
        ],
    )
}

fn per_category(table: &[(WidgetCategory, &'static str)], category: WidgetCategory) -> &'static str {
    table
        .iter()
        .find(|(c, _)| *c == category)
        .or_else(|| table.iter().find(|(c, _)| *c == WidgetCategory::General))
        .map_or("", |(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_category_has_four_levels() {
        for category in ProblemCategory::ALL {
            let hints = hints_for(category);
            let levels: Vec<u8> = hints.iter().map(|h| h.level).collect();
            assert_eq!(levels, vec![1, 2, 3, 4]);
            assert!(hints.iter().all(|h| !h.content.is_empty()));
        }
    }

    #[test]
    fn array_understanding_hint() {
        let hints = hints_for(ProblemCategory::Array);
        assert_eq!(hints[0].title, "Problem Understanding");
        assert_eq!(
            hints[0].content,
            "Let's understand what this problem is asking. \
             Can you solve this with a single pass through the array?"
        );
        assert_eq!(hints[3].title, "Implementation Strategy");
    }

    #[test]
    fn widget_hints_use_category_tables() {
        let mut rng = StdRng::seed_from_u64(7);
        let hints = widget_hints(WidgetCategory::Tree, &mut rng);

        assert_eq!(hints[1].title, "Approach Direction");
        assert!(hints[1].content.starts_with("Consider tree traversal methods"));
        assert_eq!(hints[2].title, "Data Structures");
        assert!(hints[2].content.contains("queue for level-order"));
        assert!(UNDERSTANDING_POOL.contains(&hints[0].content.as_str()));
        assert!(IMPLEMENTATION_POOL.contains(&hints[3].content.as_str()));
    }

    #[test]
    fn widget_flavor_text_varies() {
        let mut rng = StdRng::seed_from_u64(42);
        let openings: std::collections::HashSet<String> = (0..64)
            .map(|_| widget_hints(WidgetCategory::General, &mut rng)[0].content.clone())
            .collect();
        assert!(openings.len() > 1);
    }
}
