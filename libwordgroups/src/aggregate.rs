use std::collections::HashMap;
use std::fmt;

use errors::*;

/// `GroupSummary` is the record produced for one anagram group.
///
/// Per-word counts are deliberately not kept; only the group size, the total number of
/// occurrences and the distinct spellings are reported.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GroupSummary {
    pub distinct_word_count: u64,
    pub total_occurrence_count: u64,
    pub words: Vec<String>,
}

/// Formats the summary as a tab separated output record, e.g. `3\t5\tale lea tea`.
impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.distinct_word_count,
            self.total_occurrence_count,
            self.words.join(" ")
        )
    }
}

/// `WordTally` is the running frequency tally for one group.
///
/// Recording is order independent, so words for a key may be fed in any order. Tallies built
/// from separate deliveries of the same key can be merged before the result is summarised.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct WordTally {
    counts: HashMap<String, u64>,
    total: u64,
}

impl WordTally {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn record<S: Into<String>>(&mut self, word: S) {
        *self.counts.entry(word.into()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Folds a partial tally for the same key into this one.
    pub fn merge(&mut self, other: WordTally) {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
        self.total += other.total;
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).cloned().unwrap_or(0)
    }

    pub fn distinct_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Consumes the tally and produces the summary for `key`.
    ///
    /// An empty tally means the shuffle delivered a key without any words, which is a broken
    /// invariant upstream and is reported as `ErrorKind::EmptyGroup`.
    pub fn summarize(self, key: &str) -> Result<GroupSummary> {
        if self.is_empty() {
            return Err(ErrorKind::EmptyGroup(key.to_owned()).into());
        }

        let mut words: Vec<String> = self.counts.into_iter().map(|(word, _)| word).collect();
        words.sort();

        Ok(GroupSummary {
            distinct_word_count: words.len() as u64,
            total_occurrence_count: self.total,
            words,
        })
    }
}

/// `aggregate` folds every word delivered for `key` into a tally and summarises it.
pub fn aggregate<I, S>(key: &str, values: I) -> Result<GroupSummary>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tally = WordTally::new();
    for word in values {
        tally.record(word);
    }
    tally.summarize(key)
}
