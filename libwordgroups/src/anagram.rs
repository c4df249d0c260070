use std::sync::Arc;

use aggregate::{aggregate, GroupSummary, WordTally};
use canonical::Canonicalizer;
use combiner::Combine;
use emitter::{EmitFinal, EmitIntermediate};
use errors::*;
use intermediate::IntermediateInputKV;
use mapper::{Map, MapInputKV};
use reducer::Reduce;

/// `AnagramMapper` emits a `(canonical key, word)` pair for every word of its input text.
#[derive(Clone)]
pub struct AnagramMapper {
    canonicalizer: Arc<Canonicalizer>,
}

impl AnagramMapper {
    pub fn new(canonicalizer: Arc<Canonicalizer>) -> Self {
        AnagramMapper { canonicalizer }
    }
}

impl Map for AnagramMapper {
    type Key = String;
    type Value = String;
    fn map<E>(&self, input: MapInputKV, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        let MapInputKV { key, value } = input;
        for line in value.lines() {
            for (group_key, word) in self.canonicalizer.canonicalize(line) {
                emitter
                    .emit(group_key, word)
                    .chain_err(|| format!("Error emitting map output for {}.", key))?;
            }
        }
        Ok(())
    }
}

/// `AnagramReducer` summarises every word delivered for one canonical key.
#[derive(Clone, Copy, Default)]
pub struct AnagramReducer;

impl Reduce for AnagramReducer {
    type Value = String;
    type Output = GroupSummary;
    fn reduce<E>(&self, input: IntermediateInputKV<Self::Value>, mut emitter: E) -> Result<()>
    where
        E: EmitFinal<Self::Output>,
    {
        let IntermediateInputKV { key, values } = input;
        let summary = aggregate(&key, values)?;
        emitter
            .emit(summary)
            .chain_err(|| format!("Error emitting summary for group {}.", key))?;
        Ok(())
    }
}

/// `AnagramCombiner` tallies the words one map task emitted for a key.
#[derive(Clone, Copy, Default)]
pub struct AnagramCombiner;

impl Combine for AnagramCombiner {
    type Value = String;
    type Partial = WordTally;
    fn combine<E>(&self, input: IntermediateInputKV<Self::Value>, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<String, Self::Partial>,
    {
        let IntermediateInputKV { key, values } = input;
        let mut tally = WordTally::new();
        for word in values {
            tally.record(word);
        }
        if tally.is_empty() {
            return Err(ErrorKind::EmptyGroup(key).into());
        }

        emitter
            .emit(key, tally)
            .chain_err(|| "Error emitting combined tally.")?;
        Ok(())
    }
}

/// `CombinedAnagramReducer` merges the partial tallies produced by `AnagramCombiner` for one key
/// and summarises the result.
#[derive(Clone, Copy, Default)]
pub struct CombinedAnagramReducer;

impl Reduce for CombinedAnagramReducer {
    type Value = WordTally;
    type Output = GroupSummary;
    fn reduce<E>(&self, input: IntermediateInputKV<Self::Value>, mut emitter: E) -> Result<()>
    where
        E: EmitFinal<Self::Output>,
    {
        let IntermediateInputKV { key, values } = input;
        let mut tally = WordTally::new();
        for partial in values {
            tally.merge(partial);
        }

        let summary = tally.summarize(&key)?;
        emitter
            .emit(summary)
            .chain_err(|| format!("Error emitting summary for group {}.", key))?;
        Ok(())
    }
}
