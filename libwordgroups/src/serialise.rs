use std::collections::BTreeMap;

use serde::Serialize;

use emitter::{EmitFinal, EmitPartitionedIntermediate};
use errors::*;

/// `IntermediateOutputPair` is a struct representing an intermediate key-value pair as outputted
/// from a map operation.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct IntermediateOutputPair<K: Serialize, V: Serialize> {
    pub key: K,
    pub value: V,
}

/// `IntermediateOutputObject` is a struct comprising a collection of `IntermediateOutputPair`s,
/// representing the entire output of a map operation, ready to be serialised to JSON.
///
/// Pairs are grouped by the partition they were assigned to. Partitions are kept in a `BTreeMap`
/// so the serialised form is the same from run to run.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct IntermediateOutputObject<K: Serialize, V: Serialize> {
    pub partitions: BTreeMap<u64, Vec<IntermediateOutputPair<K, V>>>,
}

impl<K: Serialize, V: Serialize> IntermediateOutputObject<K, V> {
    pub fn pair_count(&self) -> usize {
        self.partitions.values().map(|pairs| pairs.len()).sum()
    }
}

/// `FinalOutputObject` is a struct comprising a collection of serialisable values representing
/// the entire output of a reduce operation, ready to be serialised to JSON.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct FinalOutputObject<V: Serialize> {
    pub values: Vec<V>,
}

/// A struct implementing `EmitPartitionedIntermediate` which emits to an
/// `IntermediateOutputObject`.
pub struct IntermediateOutputObjectEmitter<'a, K: 'a, V: 'a>
where
    K: Serialize,
    V: Serialize,
{
    sink: &'a mut IntermediateOutputObject<K, V>,
}

impl<'a, K, V> IntermediateOutputObjectEmitter<'a, K, V>
where
    K: Serialize,
    V: Serialize,
{
    /// Constructs a new `IntermediateOutputObjectEmitter` with a mutable reference to a given
    /// `IntermediateOutputObject`.
    ///
    /// # Arguments
    ///
    /// * `sink` - A mutable reference to the `IntermediateOutputObject` to receive the emitted
    ///            values.
    pub fn new(sink: &'a mut IntermediateOutputObject<K, V>) -> Self {
        IntermediateOutputObjectEmitter { sink }
    }
}

impl<'a, K, V> EmitPartitionedIntermediate<K, V> for IntermediateOutputObjectEmitter<'a, K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn emit(&mut self, partition: u64, key: K, value: V) -> Result<()> {
        self.sink
            .partitions
            .entry(partition)
            .or_insert_with(Vec::new)
            .push(IntermediateOutputPair { key, value });
        Ok(())
    }
}

/// A struct implementing `EmitFinal` which emits to a `FinalOutputObject`.
pub struct FinalOutputObjectEmitter<'a, V: 'a + Serialize> {
    sink: &'a mut FinalOutputObject<V>,
}

impl<'a, V: Serialize> FinalOutputObjectEmitter<'a, V> {
    /// Constructs a new `FinalOutputObjectEmitter` with a mutable reference to a given
    /// `FinalOutputObject`.
    pub fn new(sink: &'a mut FinalOutputObject<V>) -> Self {
        FinalOutputObjectEmitter { sink }
    }
}

impl<'a, V: Serialize> EmitFinal<V> for FinalOutputObjectEmitter<'a, V> {
    fn emit(&mut self, value: V) -> Result<()> {
        self.sink.values.push(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json;
    use super::*;

    #[test]
    fn intermediate_output_object_json_format() {
        let mut output = IntermediateOutputObject::default();
        {
            let mut emitter = IntermediateOutputObjectEmitter::new(&mut output);
            emitter.emit(1, "ael", "lea").unwrap();
            emitter.emit(0, "ael", "ale").unwrap();
        }
        let expected_json_string = "{\"partitions\":{\"0\":[{\"key\":\"ael\",\"value\":\"ale\"}],\
                                    \"1\":[{\"key\":\"ael\",\"value\":\"lea\"}]}}";

        let json_string = serde_json::to_string(&output).unwrap();

        assert_eq!(expected_json_string, json_string);
        assert_eq!(2, output.pair_count());
    }

    #[test]
    fn final_output_object_json_format() {
        let mut output = FinalOutputObject::default();
        {
            let mut emitter = FinalOutputObjectEmitter::new(&mut output);
            emitter.emit("2\t3\tale lea").unwrap();
        }

        let json_string = serde_json::to_string(&output).unwrap();

        assert_eq!(r#"{"values":["2\t3\tale lea"]}"#, json_string);
    }
}
