//! Static hint text

use crate::classify::{ProblemCategory, WidgetCategory};

pub(super) const WORKER_HINTS: [(ProblemCategory, [&str; 4]); 8] = [
    (
        ProblemCategory::DynamicProgramming,
        [
            "This problem has optimal substructure. Can you identify the smaller subproblems?",
            "Think about memoization - what values would you want to cache to avoid recalculation?",
            "Consider bottom-up vs top-down approaches. Which feels more natural for this problem?",
            "Define your DP state clearly: dp[i] represents what exactly?",
        ],
    ),
    (
        ProblemCategory::Graph,
        [
            "How would you represent this graph? Adjacency list or matrix?",
            "Do you need to visit all nodes, find shortest path, or detect cycles?",
            "Consider BFS for shortest path, DFS for exploration or cycle detection.",
            "Don't forget to track visited nodes to avoid infinite loops.",
        ],
    ),
    (
        ProblemCategory::Tree,
        [
            "What type of tree traversal would be most helpful here?",
            "Think recursively - what would you do at each node?",
            "Consider the base case: what happens at leaf nodes?",
            "Would you need to pass information up or down the tree?",
        ],
    ),
    (
        ProblemCategory::Array,
        [
            "Can you solve this with a single pass through the array?",
            "Would sorting the array first make the problem easier?",
            "Consider using two pointers or a sliding window technique.",
            "A hash map might help you track elements you've seen before.",
        ],
    ),
    (
        ProblemCategory::String,
        [
            "Are you looking for patterns, substrings, or character frequencies?",
            "Consider using a sliding window for substring problems.",
            "Hash maps are great for character counting problems.",
            "Think about whether you need to process the string left-to-right or if other orders help.",
        ],
    ),
    (
        ProblemCategory::Sorting,
        [
            "What sorting algorithm would be most appropriate here?",
            "Can you solve this without explicitly sorting? (using heap, etc.)",
            "Consider the time complexity requirements - is O(n log n) acceptable?",
            "Sometimes partial sorting or finding kth element is sufficient.",
        ],
    ),
    (
        ProblemCategory::Search,
        [
            "Is this a linear search problem or can you use binary search?",
            "For binary search, what property makes the search space 'sorted'?",
            "Consider whether you're searching for an exact value or a condition.",
            "What are your search boundaries and how do they change?",
        ],
    ),
    (
        ProblemCategory::General,
        [
            "Break down the problem into smaller, manageable parts.",
            "What's the brute force approach? Can you optimize from there?",
            "Consider the constraints - they often hint at the expected solution complexity.",
            "Work through a small example step by step to understand the pattern.",
        ],
    ),
];

pub(super) const UNDERSTANDING_POOL: [&str; 4] = [
    "Let's break down what this problem is really asking. Can you identify the input, output, and constraints?",
    "Think about this problem step by step. What's the core operation you need to perform?",
    "Before jumping to code, make sure you understand the problem with a simple example.",
    "What patterns do you notice in the given examples? How does the input relate to the output?",
];

pub(super) const IMPLEMENTATION_POOL: [&str; 4] = [
    "Here's a pseudo-code structure to get you started. Focus on the main logic flow first, then handle edge cases.",
    "Break your solution into smaller functions. What are the key operations you need to implement?",
    "Consider the time and space complexity of your approach. Can you optimize further?",
    "Don't forget to handle edge cases like empty inputs, single elements, or boundary conditions.",
];

pub(super) const APPROACH_HINTS: [(WidgetCategory, &str); 6] = [
    (
        WidgetCategory::Array,
        "Start with a brute force approach - try all possible combinations. Then think about how to optimize using techniques like two pointers or hash maps.",
    ),
    (
        WidgetCategory::Tree,
        "Consider tree traversal methods. Would DFS or BFS be more appropriate here? Think about the order you need to visit nodes.",
    ),
    (
        WidgetCategory::Graph,
        "This looks like a graph problem. Consider if you need to find paths, detect cycles, or explore connected components.",
    ),
    (
        WidgetCategory::Dp,
        "This might benefit from dynamic programming. Can you identify overlapping subproblems? What would be your base case?",
    ),
    (
        WidgetCategory::String,
        "For string problems, consider if you need pattern matching, sliding window, or character frequency analysis.",
    ),
    (
        WidgetCategory::General,
        "Start with the simplest approach that works, even if it's not optimal. What's the most straightforward way to solve this?",
    ),
];

pub(super) const DATA_STRUCTURE_HINTS: [(WidgetCategory, &str); 6] = [
    (
        WidgetCategory::Array,
        "Consider using a hash map to store values you've seen, or two pointers to avoid nested loops.",
    ),
    (
        WidgetCategory::Tree,
        "You might need a stack for iterative traversal, or a queue for level-order traversal.",
    ),
    (
        WidgetCategory::Graph,
        "Think about using adjacency lists, visited arrays, or union-find data structures.",
    ),
    (WidgetCategory::Dp, "A 2D array or memoization map could help store intermediate results."),
    (
        WidgetCategory::String,
        "Hash maps for character counting, or arrays for character frequency might be useful.",
    ),
    (
        WidgetCategory::General,
        "What data structure would help you access or organize the data more efficiently?",
    ),
];
