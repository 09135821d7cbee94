//! Shared page texts for integration tests

pub const CAT_URL: &str = "http://a.test";

pub const CAT_TEXT: &str = "The cat sat on the mat";

/// Stems of [`CAT_TEXT`] in position order
pub const CAT_STEMS: [&str; 3] = ["cat", "sat", "mat"];

pub const DOG_TEXT: &str = "A dog chased the cat. The dog was running!";

pub const ARTICLE_TEXT: &str = "Rust's ownership model guarantees memory safety \
    without a garbage collector. Borrowing rules are checked at compile time, \
    and the compiler rejects programs with dangling references.";

/// URLs for pages indexed in bulk
pub fn page_urls(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("http://bulk.test/page/{i}")).collect()
}
