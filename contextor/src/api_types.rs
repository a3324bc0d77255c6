//! Public API types re-used by external crates (e.g., the HTTP API layer).

use serde::Serialize;

/// A `(source url, supporting text)` pair backing a claim in the answer.
///
/// # Example
/// ```
/// use contextor::Citation;
/// let c = Citation::new("https://example.com/lesson", "Cosine similarity is ...");
/// assert_eq!(c.url, "https://example.com/lesson");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub url: String,
    pub text: String,
}

impl Citation {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// Final answer together with the citations extracted from it.
///
/// Serializes as `{"answer": "...", "links": [{"url": "...", "text": "..."}]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QaAnswer {
    pub answer: String,
    pub links: Vec<Citation>,
}
