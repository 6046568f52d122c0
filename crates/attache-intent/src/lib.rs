//! Keyword-scored intent matching over a canned question/answer corpus.
//!
//! The matcher maps a free-text user utterance to the single best-fitting
//! canned answer, or to a fixed fallback when nothing scores. It is a pure
//! function of (query, corpus): no state, no I/O, no failure modes.
//!
//! - [`Corpus`]: ordered, immutable set of [`CorpusEntry`] values, loaded
//!   from TOML or from the built-in table.
//! - [`best_match`] / [`respond`]: the scoring scan and the string-level
//!   convenience wrapper around it.

mod corpus;
mod matcher;

pub use corpus::{Corpus, CorpusEntry};
pub use matcher::{best_match, respond, Match, FALLBACK_ANSWER};
