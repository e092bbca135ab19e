//! Canned answers to mentor questions
//!
//! Questions are matched against keyword buckets in priority order; the first
//! bucket that hits supplies the answer.

/// A keyword bucket and its canned answer
struct Topic {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const WORKER_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["space complexity"],
        answer: "Space complexity considers extra memory used. Recursive calls use O(depth) stack space. Arrays and hash maps use O(n) space where n is the number of elements stored.",
    },
    Topic {
        keywords: &["time complexity", "big o"],
        answer: "To analyze time complexity, count the number of operations relative to input size. Nested loops often indicate O(n²), while single loops are O(n). Hash map lookups are O(1) on average.",
    },
    Topic {
        keywords: &["optimize", "improve"],
        answer: "Common optimization strategies: 1) Use better data structures (hash maps for O(1) lookup), 2) Eliminate redundant work, 3) Use two pointers instead of nested loops, 4) Consider sorting first if it simplifies the logic.",
    },
    Topic {
        keywords: &["debug", "wrong", "error"],
        answer: "Debugging tips: 1) Test with simple examples, 2) Check edge cases (empty input, single element), 3) Verify loop boundaries, 4) Print intermediate values to trace execution.",
    },
    Topic {
        keywords: &["approach", "algorithm"],
        answer: "When choosing an approach: 1) Start with brute force to understand the problem, 2) Identify bottlenecks, 3) Consider if sorting helps, 4) Think about what data structure would make operations efficient.",
    },
];

const WORKER_DEFAULT: &str = "That's a great question! Can you be more specific about what aspect you'd like help with? For example, are you asking about the algorithm approach, implementation details, or complexity analysis?";

const INLINE_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["complexity", "time", "space"],
        answer: "Great question about complexity! Let's analyze your approach step by step. What operations are you performing in nested loops? Each nested loop typically adds a factor to your time complexity.",
    },
    Topic {
        keywords: &["optimize", "faster"],
        answer: "To optimize your solution, consider: 1) Can you eliminate redundant operations? 2) Is there a more efficient data structure? 3) Can you solve it in fewer passes through the data?",
    },
    Topic {
        keywords: &["stuck", "help"],
        answer: "When you're stuck, try: 1) Work through a small example manually, 2) Think about what data structure could help, 3) Consider if you've seen a similar problem before.",
    },
];

const INLINE_DEFAULT: &str = "That's a thoughtful question! Try breaking it down into smaller parts. What specific aspect would you like me to elaborate on?";

fn lookup(question: &str, topics: &[Topic], fallback: &'static str) -> &'static str {
    let question = question.to_lowercase();
    topics
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| question.contains(k)))
        .map_or(fallback, |topic| topic.answer)
}

/// Answer a question the way the worker does
pub fn respond(question: &str) -> &'static str {
    lookup(question, WORKER_TOPICS, WORKER_DEFAULT)
}

/// Answer a question the way the in-page widget does
pub fn respond_inline(question: &str) -> &'static str {
    lookup(question, INLINE_TOPICS, INLINE_DEFAULT)
}

/// Normalise a question, `None` when there is nothing to ask
pub fn validate_question(question: &str) -> Option<&str> {
    let trimmed = question.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_complexity_question() {
        let answer = respond("What's the time complexity?");
        assert!(answer.starts_with("To analyze time complexity"));
        assert_ne!(answer, WORKER_DEFAULT);
    }

    #[test]
    fn big_o_is_time_complexity() {
        assert!(respond("Is this Big O of n?").starts_with("To analyze time complexity"));
    }

    #[test]
    fn space_complexity_checked_first() {
        let answer = respond("Compare the space complexity and time complexity");
        assert!(answer.starts_with("Space complexity considers"));
    }

    #[test]
    fn worker_buckets_in_order() {
        assert!(respond("How can I optimize this?").starts_with("Common optimization"));
        assert!(respond("My answer is WRONG").starts_with("Debugging tips"));
        assert!(respond("Which algorithm fits?").starts_with("When choosing an approach"));
        assert_eq!(respond("Hello there"), WORKER_DEFAULT);
    }

    #[test]
    fn inline_buckets() {
        assert!(respond_inline("Why is my solution slow? time limit").starts_with("Great question"));
        assert!(respond_inline("make it faster").starts_with("To optimize"));
        assert!(respond_inline("I'm stuck").starts_with("When you're stuck"));
        assert_eq!(respond_inline("What is a heap?"), INLINE_DEFAULT);
    }

    #[test]
    fn variants_disagree_on_debugging() {
        assert!(respond("debug please").starts_with("Debugging tips"));
        assert_eq!(respond_inline("debug please"), INLINE_DEFAULT);
    }

    #[test]
    fn empty_questions_are_rejected() {
        assert_eq!(validate_question("   "), None);
        assert_eq!(validate_question(""), None);
        assert_eq!(validate_question("  why?  "), Some("why?"));
    }
}
