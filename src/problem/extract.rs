//! Platform-specific scraping of problem pages
//!
//! Each field is read by an ordered list of CSS selectors. The first selector
//! that produces non-empty text wins; when every selector misses, the field is
//! left empty. Nothing here returns an error.

use scraper::{ElementRef, Html, Node, Selector};

use super::{Platform, ProblemRecord};

/// Ordered selector candidates for one field
#[derive(Debug, Clone, Copy)]
pub struct FieldStrategy {
    /// Field name, used for logging only
    pub field: &'static str,
    /// Candidates in priority order
    pub selectors: &'static [&'static str],
}

/// All field strategies for one platform
#[derive(Debug, Clone, Copy)]
pub struct PlatformSelectors {
    pub title: FieldStrategy,
    pub description: FieldStrategy,
    pub tags: FieldStrategy,
    pub difficulty: FieldStrategy,
}

const NONE: &[&str] = &[];

/// Elements that start a new paragraph in a problem statement
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "pre", "li", "ul", "ol", "br", "h1", "h2", "h3", "h4", "h5", "h6", "section",
    "blockquote", "table", "tr",
];

const LEETCODE: PlatformSelectors = PlatformSelectors {
    title: FieldStrategy {
        field: "title",
        selectors: &[
            "a.hover\\:text-blue-s",
            "[data-cy=\"question-title\"]",
            "div.flex-col > div.flex.items-start > div.flex.items-start > div.flex.items-start > div > div > a.text-title-large",
            "a.text-title-large",
        ],
    },
    description: FieldStrategy {
        field: "description",
        selectors: &["[data-track-load=\"description_content\"]", ".content__u3I1", ".question-content"],
    },
    tags: FieldStrategy { field: "tags", selectors: &["[class*=\"tag\"]", ".topic-tag"] },
    difficulty: FieldStrategy { field: "difficulty", selectors: &["[diff]", ".difficulty"] },
};

const CODEFORCES: PlatformSelectors = PlatformSelectors {
    title: FieldStrategy {
        field: "title",
        selectors: &[".title", ".problem-statement .header .title"],
    },
    description: FieldStrategy { field: "description", selectors: &[".problem-statement"] },
    tags: FieldStrategy { field: "tags", selectors: &[".tag-box"] },
    difficulty: FieldStrategy { field: "difficulty", selectors: NONE },
};

const HACKERRANK: PlatformSelectors = PlatformSelectors {
    title: FieldStrategy { field: "title", selectors: &[".ui-icon-label", ".challenge-name"] },
    description: FieldStrategy {
        field: "description",
        selectors: &[".challenge-body", ".problem-statement"],
    },
    tags: FieldStrategy { field: "tags", selectors: NONE },
    difficulty: FieldStrategy { field: "difficulty", selectors: &[".difficulty"] },
};

/// Selector table for a platform, `None` for unsupported pages
pub fn selectors_for(platform: Platform) -> Option<&'static PlatformSelectors> {
    match platform {
        Platform::LeetCode => Some(&LEETCODE),
        Platform::Codeforces => Some(&CODEFORCES),
        Platform::HackerRank => Some(&HACKERRANK),
        Platform::Unknown => None,
    }
}

/// Extract a problem record from page HTML
pub fn extract(platform: Platform, html: &str) -> ProblemRecord {
    let Some(selectors) = selectors_for(platform) else {
        tracing::debug!("No selectors for {:?}; returning empty record", platform);
        return ProblemRecord { platform, ..Default::default() };
    };

    let document = Html::parse_document(html);

    ProblemRecord {
        title: first_text(&document, &selectors.title, element_text),
        description: first_text(&document, &selectors.description, block_text),
        tags: first_list(&document, &selectors.tags),
        difficulty: first_text(&document, &selectors.difficulty, element_text),
        platform,
    }
}

/// Text of the first element matched by the first selector that yields any text
fn first_text(
    document: &Html,
    strategy: &FieldStrategy,
    text_of: fn(ElementRef<'_>) -> String,
) -> String {
    for candidate in strategy.selectors {
        let Some(selector) = parse_selector(candidate) else {
            continue;
        };
        if let Some(text) = document.select(&selector).next().map(text_of) {
            if !text.is_empty() {
                return text;
            }
        }
    }
    tracing::debug!("All {} selectors missed", strategy.field);
    String::new()
}

/// Texts of every element matched by the first selector that matches anything
fn first_list(document: &Html, strategy: &FieldStrategy) -> Vec<String> {
    for candidate in strategy.selectors {
        let Some(selector) = parse_selector(candidate) else {
            continue;
        };
        let items: Vec<String> = document
            .select(&selector)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect();
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

fn parse_selector(candidate: &str) -> Option<Selector> {
    match Selector::parse(candidate) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Skipping unparseable selector {:?}: {:?}", candidate, e);
            None
        }
    }
}

/// Trimmed text content with runs of whitespace collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Like [`element_text`], but block elements become paragraphs separated by a blank line
fn block_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_blocks(element, &mut raw);
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn push_blocks(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
            Node::Element(inner) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&inner.name());
                if block {
                    out.push('\n');
                }
                push_blocks(child, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}
