//! Keyword relevance scoring over course materials.
//!
//! A document's score is the number of times the question's tokens occur in
//! its body. Matching is literal substring search on case-folded text; no
//! pattern is ever compiled from user input.

use database::CourseMaterial;

/// How many top-scoring documents make up the evidence set.
pub const EVIDENCE_LIMIT: usize = 3;

/// Per-document character budget inside the generation context.
pub const CONTEXT_CHAR_BUDGET: usize = 1500;

/// Characters of body shown as a source excerpt.
pub const EXCERPT_CHARS: usize = 200;

/// Something with a title and a text body that can be scored.
pub trait Document {
    fn title(&self) -> &str;
    fn body(&self) -> &str;
}

impl Document for CourseMaterial {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.content
    }
}

/// A document with its positive relevance score.
#[derive(Debug)]
pub struct ScoredDocument<'a, D> {
    pub document: &'a D,
    pub score: usize,
}

/// Case-folded whitespace tokens longer than one character.
pub fn query_tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Sum of non-overlapping occurrences of each token in an already
/// case-folded body.
pub fn score_text(tokens: &[String], folded_body: &str) -> usize {
    tokens
        .iter()
        .map(|token| folded_body.matches(token.as_str()).count())
        .sum()
}

/// Score every document against `query`, drop zero scores and sort by
/// descending score. Ties keep their input order.
pub fn rank_documents<'a, D: Document>(query: &str, documents: &'a [D]) -> Vec<ScoredDocument<'a, D>> {
    let tokens = query_tokens(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredDocument<'a, D>> = documents
        .iter()
        .map(|document| ScoredDocument {
            document,
            score: score_text(&tokens, &document.body().to_lowercase()),
        })
        .filter(|scored| scored.score > 0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Confidence in percent: how many of the evidence slots were filled.
pub fn confidence(evidence_count: usize) -> f64 {
    (evidence_count as f64 / EVIDENCE_LIMIT as f64).min(1.0) * 100.0
}

/// Concatenate the evidence into one delimited context block.
pub fn build_context<D: Document>(evidence: &[ScoredDocument<'_, D>]) -> String {
    evidence
        .iter()
        .enumerate()
        .map(|(i, scored)| {
            format!(
                "[Source {}: {}]\n{}",
                i + 1,
                scored.document.title(),
                truncate_chars(scored.document.body(), CONTEXT_CHAR_BUDGET)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Short preview of a document body.
pub fn excerpt(body: &str) -> String {
    format!("{}...", truncate_chars(body, EXCERPT_CHARS))
}

/// The first `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
