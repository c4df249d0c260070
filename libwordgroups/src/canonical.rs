use regex::Regex;

use errors::*;
use stop_words::StopWords;

// A word is a maximal run of letters once the line has been folded to lowercase. Splitting on
// every other character means "don't" yields "don" and "t".
const WORD_PATTERN: &str = "[a-z]+";

/// `canonical_key` returns the letters of `word` sorted into ascending code point order.
///
/// Two words are anagrams of one another exactly when their canonical keys are equal.
pub fn canonical_key(word: &str) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

/// The `Canonicalizer` turns lines of text into `(canonical key, word)` pairs.
///
/// It owns the stop word set and the compiled word pattern, both of which are read-only once
/// constructed, so one `Canonicalizer` can be shared across threads for the lifetime of a job.
#[derive(Debug)]
pub struct Canonicalizer {
    stop_words: StopWords,
    word_pattern: Regex,
}

impl Canonicalizer {
    pub fn new(stop_words: StopWords) -> Result<Self> {
        let word_pattern = Regex::new(WORD_PATTERN).chain_err(|| "Error compiling word pattern.")?;
        Ok(Canonicalizer {
            stop_words,
            word_pattern,
        })
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Lazily produces the pairs for a single line. Lines are independent of one another and a
    /// line with no letters in it simply produces nothing.
    pub fn canonicalize(&self, line: &str) -> CanonicalPairs {
        CanonicalPairs {
            canonicalizer: self,
            folded: line.to_lowercase(),
            offset: 0,
        }
    }
}

/// Iterator over the `(canonical key, word)` pairs of one line.
pub struct CanonicalPairs<'a> {
    canonicalizer: &'a Canonicalizer,
    folded: String,
    offset: usize,
}

impl<'a> Iterator for CanonicalPairs<'a> {
    type Item = (String, String);

    fn next(&mut self) -> Option<(String, String)> {
        loop {
            let word = {
                let found = self.canonicalizer
                    .word_pattern
                    .find_at(&self.folded, self.offset)?;
                self.offset = found.end();
                found.as_str()
            };

            if self.canonicalizer.stop_words.contains(word) {
                continue;
            }

            return Some((canonical_key(word), word.to_owned()));
        }
    }
}
