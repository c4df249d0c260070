use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json;

use errors::*;

/// Words excluded from grouping when no other list is configured.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "of", "to", "in", "am", "is", "are", "at", "not"
];

/// On-disk form of a stop word list. Both `stop_words` and `stopWords` name the list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StopWordsConfig {
    #[serde(alias = "stopWords")]
    stop_words: Vec<String>,
}

/// `StopWords` is the immutable set of tokens which are never grouped or counted.
///
/// It is built once when a job starts and then only ever read, so a single instance can be
/// shared between any number of map tasks.
#[derive(Clone, Debug, PartialEq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Builds a set from arbitrary tokens. Every token is folded to lowercase, since that is the
    /// form words take by the time they are checked against the set.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopWords {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Reads a stop word list from a JSON file of the form `{"stop_words": ["the", "a"]}`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .chain_err(|| format!("Unable to open stop word file {}.", path.display()))?;
        let config: StopWordsConfig = serde_json::from_reader(BufReader::new(file))
            .chain_err(|| format!("Error parsing stop word file {}.", path.display()))?;

        info!(
            "Loaded {} stop words from {}",
            config.stop_words.len(),
            path.display()
        );
        Ok(StopWords::from_words(config.stop_words))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        StopWords::from_words(DEFAULT_STOP_WORDS)
    }
}
