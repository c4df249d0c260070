use std::collections::BTreeMap;

use serde::Serialize;

use intermediate::IntermediateInputKV;
use serialise::IntermediateOutputObject;

/// `Shuffle` is an in-process grouping of partitioned map output.
///
/// Map outputs from any number of map tasks are added one at a time. Once every map task has
/// finished, each partition can be taken out as a list of `IntermediateInputKV`s, one per key,
/// holding every value emitted for that key exactly once. Keys come out in ascending order.
#[derive(Debug)]
pub struct Shuffle<V>
where
    V: Default + Serialize,
{
    partitions: BTreeMap<u64, BTreeMap<String, Vec<V>>>,
}

impl<V> Default for Shuffle<V>
where
    V: Default + Serialize,
{
    fn default() -> Self {
        Shuffle {
            partitions: BTreeMap::new(),
        }
    }
}

impl<V> Shuffle<V>
where
    V: Default + Serialize,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Routes every pair of a map task's output to the group for its key.
    pub fn add_map_output(&mut self, map_output: IntermediateOutputObject<String, V>) {
        for (partition, pairs) in map_output.partitions {
            let groups = self.partitions.entry(partition).or_insert_with(BTreeMap::new);
            for pair in pairs {
                groups.entry(pair.key).or_insert_with(Vec::new).push(pair.value);
            }
        }
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn key_count(&self) -> usize {
        self.partitions.values().map(|groups| groups.len()).sum()
    }

    /// Consumes the shuffle, yielding each non-empty partition with its groups.
    pub fn into_partitions(self) -> BTreeMap<u64, Vec<IntermediateInputKV<V>>> {
        self.partitions
            .into_iter()
            .map(|(partition, groups)| {
                let inputs = groups
                    .into_iter()
                    .map(|(key, values)| IntermediateInputKV::new(key, values))
                    .collect();
                (partition, inputs)
            })
            .collect()
    }
}
