use std::path::Path;

use attache_core::AttacheError;
use serde::Deserialize;

/// Built-in question/answer table, used when no corpus path is configured.
const BUILTIN_CORPUS: &str = include_str!("default_corpus.toml");

/// One canned question/answer unit with its trigger keywords.
///
/// Entries are immutable after load. Keywords are stored lower-cased;
/// matching is case-insensitive substring containment, not whole-word
/// tokens.
///
/// # Examples
///
/// ```
/// use attache_intent::Corpus;
///
/// let corpus = Corpus::builtin();
/// let entry = corpus.entries().next().unwrap();
/// assert!(!entry.keywords.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorpusEntry {
    /// Stable identifier, unique within the corpus.
    pub id: String,
    /// Trigger keywords, lower-cased at load.
    pub keywords: Vec<String>,
    /// The canned answer returned verbatim on a match.
    pub answer: String,
}

#[derive(Deserialize)]
struct CorpusFile {
    #[serde(default, rename = "entry")]
    entries: Vec<CorpusEntry>,
}

/// A fixed, ordered sequence of [`CorpusEntry`] values.
///
/// Entry order is significant only as a tie-break: when two entries score
/// equally, the earlier one wins.
///
/// # Examples
///
/// ```
/// use attache_intent::Corpus;
///
/// let corpus = Corpus::from_toml(r#"
/// [[entry]]
/// id = "greeting"
/// keywords = ["hello", "hi"]
/// answer = "Hello! How can I help?"
/// "#).unwrap();
/// assert_eq!(corpus.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    /// The built-in corpus shipped with the binary.
    ///
    /// # Examples
    ///
    /// ```
    /// use attache_intent::Corpus;
    ///
    /// assert!(!Corpus::builtin().is_empty());
    /// ```
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_CORPUS).expect("built-in corpus must be valid")
    }

    /// Load a corpus from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::FileNotFound`] if the path does not exist,
    /// [`AttacheError::Toml`] on parse failure, or
    /// [`AttacheError::Config`] when validation fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use attache_intent::Corpus;
    /// use std::path::Path;
    ///
    /// let corpus = Corpus::from_file(Path::new("corpus.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, AttacheError> {
        if !path.exists() {
            return Err(AttacheError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a corpus from a TOML string.
    ///
    /// Keywords are lower-cased here so the matcher can compare against a
    /// lower-cased query directly.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Config`] when the corpus is empty, an entry
    /// has no keywords or a blank keyword, or two entries share an id.
    pub fn from_toml(content: &str) -> Result<Self, AttacheError> {
        let file: CorpusFile = toml::from_str(content)?;
        let mut entries = file.entries;

        if entries.is_empty() {
            return Err(AttacheError::Config("corpus has no entries".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &mut entries {
            if entry.id.trim().is_empty() {
                return Err(AttacheError::Config("corpus entry with blank id".into()));
            }
            if !seen.insert(entry.id.clone()) {
                return Err(AttacheError::Config(format!(
                    "duplicate corpus entry id: {}",
                    entry.id
                )));
            }
            if entry.keywords.is_empty() {
                return Err(AttacheError::Config(format!(
                    "corpus entry '{}' has no keywords",
                    entry.id
                )));
            }
            for keyword in &mut entry.keywords {
                if keyword.trim().is_empty() {
                    return Err(AttacheError::Config(format!(
                        "corpus entry '{}' has a blank keyword",
                        entry.id
                    )));
                }
                *keyword = keyword.to_lowercase();
            }
        }

        Ok(Self { entries })
    }

    /// Iterate entries in corpus order.
    pub fn entries(&self) -> impl Iterator<Item = &CorpusEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the corpus holds no entries. Unreachable through the
    /// public constructors, which reject empty corpora.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_corpus_loads_and_validates() {
        let corpus = Corpus::builtin();
        assert!(corpus.len() >= 10);
    }

    #[test]
    fn keywords_are_lowercased_at_load() {
        let corpus = Corpus::from_toml(
            r#"
            [[entry]]
            id = "a"
            keywords = ["Hello", "SERVICES"]
            answer = "x"
            "#,
        )
        .unwrap();
        let entry = corpus.entries().next().unwrap();
        assert_eq!(entry.keywords, vec!["hello", "services"]);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let err = Corpus::from_toml("").unwrap_err();
        assert!(err.to_string().contains("no entries"));
    }

    #[test]
    fn entry_without_keywords_is_rejected() {
        let err = Corpus::from_toml(
            r#"
            [[entry]]
            id = "a"
            keywords = []
            answer = "x"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no keywords"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Corpus::from_toml(
            r#"
            [[entry]]
            id = "a"
            keywords = ["x"]
            answer = "x"

            [[entry]]
            id = "a"
            keywords = ["y"]
            answer = "y"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let err = Corpus::from_toml(
            r#"
            [[entry]]
            id = "a"
            keywords = ["ok", "  "]
            answer = "x"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("blank keyword"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Corpus::from_file(Path::new("/no/such/corpus.toml")).unwrap_err();
        assert!(err.to_string().contains("/no/such/corpus.toml"));
    }

    #[test]
    fn builtin_ids_are_unique() {
        let corpus = Corpus::builtin();
        let ids: std::collections::HashSet<_> = corpus.entries().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), corpus.len());
    }
}
