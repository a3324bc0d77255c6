//! Prompt builder: instructions, the question, and one block per retrieved chunk.
//!
//! The citation line format requested here is what [`crate::parse`] reads back.
//! Change both together.

use rag_store::SearchHit;

use crate::parse::{SOURCES_MARKER, SOURCE_LABEL, TEXT_LABEL};

/// Build the full prompt for the generation model.
///
/// Deterministic: the same question and hits always produce the same string.
///
/// # Example
/// ```
/// # use contextor::build_prompt;
/// # use rag_store::SearchHit;
/// let hits = vec![SearchHit { url: "https://a".into(), text: "alpha".into(), score: 0.9 }];
/// let prompt = build_prompt("What is alpha?", &hits);
/// assert!(prompt.contains("What is alpha?"));
/// assert!(prompt.contains("Source: https://a\nalpha"));
/// ```
pub fn build_prompt(question: &str, hits: &[SearchHit]) -> String {
    let context = hits
        .iter()
        .map(|h| format!("{SOURCE_LABEL} {}\n{}", h.url, h.text.trim()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"You are a helpful teaching assistant answering questions about course material.
Use ONLY the sources provided below. If they do not contain the answer, say so.

Rules:
- Every factual claim in your answer must be supported by one of the sources and cite its URL.
- Every URL you cite in the answer must appear in the "{SOURCES_MARKER}" list, and every entry
  in that list must be cited in the answer. No extra or missing entries.
- Write each entry of the "{SOURCES_MARKER}" list on its own line in exactly this format:
  {SOURCE_LABEL} <url>, {TEXT_LABEL} "<short quote from that source supporting the answer>"

Question:
{question}

Context:
{context}

Respond in this layout:
<your answer>

{SOURCES_MARKER}
{SOURCE_LABEL} <url_1>, {TEXT_LABEL} "<quote_1>"
{SOURCE_LABEL} <url_2>, {TEXT_LABEL} "<quote_2>"
"#,
        question = question.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_answer;

    fn hit(url: &str, text: &str) -> SearchHit {
        SearchHit {
            url: url.into(),
            text: text.into(),
            score: 0.8,
        }
    }

    #[test]
    fn contains_question_and_labeled_blocks() {
        let hits = vec![hit("https://a", "first"), hit("https://b", "second")];
        let p = build_prompt("  What is X?  ", &hits);
        assert!(p.contains("Question:\nWhat is X?\n"));
        assert!(p.contains("Source: https://a\nfirst\n\nSource: https://b\nsecond"));
        assert!(p.contains(r#"Source: <url>, Text: "<short quote"#));
        assert_eq!(p, build_prompt("What is X?", &hits));
    }

    #[test]
    fn format_example_round_trips_through_parser() {
        // The sample line shown to the model must be something the parser accepts.
        let sample = format!("Body\n{SOURCES_MARKER}\n{SOURCE_LABEL} https://a, {TEXT_LABEL} \"q\"");
        let parsed = parse_answer(&sample);
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.links[0].url, "https://a");
    }
}
