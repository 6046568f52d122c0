use crate::corpus::{Corpus, CorpusEntry};

/// Fixed response returned when no corpus entry scores above zero.
pub const FALLBACK_ANSWER: &str = "I'm not sure about that specific detail. \
    Could you please rephrase or contact our support team directly?";

/// A winning corpus entry together with its keyword-hit count.
///
/// # Examples
///
/// ```
/// use attache_intent::{best_match, Corpus};
///
/// let corpus = Corpus::builtin();
/// let m = best_match(&corpus, "what services do you offer?").unwrap();
/// assert_eq!(m.entry.id, "services");
/// assert!(m.score >= 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// The highest-scoring entry.
    pub entry: &'a CorpusEntry,
    /// Number of the entry's keywords found in the query.
    pub score: usize,
}

/// Find the best-scoring corpus entry for `query`, or `None` when no keyword
/// of any entry occurs in it.
///
/// The query is lower-cased whole; comparison is substring containment with
/// no trimming, tokenization, or punctuation stripping. Each entry scores
/// one point per keyword contained in the query, unweighted. The corpus is
/// scanned in order and only a strictly greater score replaces the leader,
/// so ties keep the earlier entry.
///
/// Pure function of (query, corpus); the empty query is valid and scores
/// zero everywhere.
///
/// # Examples
///
/// ```
/// use attache_intent::{best_match, Corpus};
///
/// let corpus = Corpus::builtin();
/// assert!(best_match(&corpus, "qwzx").is_none());
/// assert!(best_match(&corpus, "").is_none());
/// ```
pub fn best_match<'a>(corpus: &'a Corpus, query: &str) -> Option<Match<'a>> {
    let normalized = query.to_lowercase();

    let mut best: Option<Match<'a>> = None;
    for entry in corpus.entries() {
        let score = entry
            .keywords
            .iter()
            .filter(|keyword| normalized.contains(keyword.as_str()))
            .count();
        if score > best.map_or(0, |m| m.score) {
            best = Some(Match { entry, score });
        }
    }
    best
}

/// The winning entry's answer verbatim, or [`FALLBACK_ANSWER`] when nothing
/// scores.
///
/// # Examples
///
/// ```
/// use attache_intent::{respond, Corpus, FALLBACK_ANSWER};
///
/// let corpus = Corpus::builtin();
/// assert_eq!(respond(&corpus, "asdkjasd"), FALLBACK_ANSWER);
/// assert_ne!(respond(&corpus, "how much does it cost?"), FALLBACK_ANSWER);
/// ```
pub fn respond<'a>(corpus: &'a Corpus, query: &str) -> &'a str {
    match best_match(corpus, query) {
        Some(m) => &m.entry.answer,
        None => FALLBACK_ANSWER,
    }
}
