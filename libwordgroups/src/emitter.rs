use serde::Serialize;

use errors::*;

/// The `EmitIntermediate` trait specifies structs which can send key-value pairs to an in-memory
/// data structure.
///
/// `EmitIntermediate` is intended for use by `Map` operations. Since these in-memory data
/// structures will eventually be serialised, they must implement the `serde::Serialize` trait.
pub trait EmitIntermediate<K, V>
where
    K: Serialize,
    V: Serialize,
{
    /// Takes ownership of a key-value pair and moves it somewhere else.
    ///
    /// # Arguments
    ///
    /// * `key` - A value implementing `Serialize`.
    /// * `value` - A value implementing `Serialize`.
    fn emit(&mut self, key: K, value: V) -> Result<()>;
}

/// The `EmitPartitionedIntermediate` trait specifies structs which can send key-value pairs to a
/// partitioned in-memory data structure.
pub trait EmitPartitionedIntermediate<K, V>
where
    K: Serialize,
    V: Serialize,
{
    /// Takes ownership of a key-value pair and stores it under the given partition.
    fn emit(&mut self, partition: u64, key: K, value: V) -> Result<()>;
}

/// The `EmitFinal` trait specifies structs which can send values to an in-memory data structure.
///
/// `EmitFinal` is intended for use in `Reduce` operations.
pub trait EmitFinal<V>
where
    V: Serialize,
{
    /// Takes ownership of a value and moves it somewhere else.
    fn emit(&mut self, value: V) -> Result<()>;
}

/// A struct implementing `EmitIntermediate` which emits to a `std::vec::Vec`.
pub struct IntermediateVecEmitter<'a, K: 'a, V: 'a>
where
    K: Serialize,
    V: Serialize,
{
    sink: &'a mut Vec<(K, V)>,
}

impl<'a, K, V> IntermediateVecEmitter<'a, K, V>
where
    K: Serialize,
    V: Serialize,
{
    /// Constructs a new `IntermediateVecEmitter` with a mutable reference to a given `Vec`.
    ///
    /// # Arguments
    ///
    /// * `sink` - A mutable reference to the `Vec` to receive the emitted values.
    pub fn new(sink: &'a mut Vec<(K, V)>) -> Self {
        IntermediateVecEmitter { sink }
    }
}

impl<'a, K, V> EmitIntermediate<K, V> for IntermediateVecEmitter<'a, K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn emit(&mut self, key: K, value: V) -> Result<()> {
        self.sink.push((key, value));
        Ok(())
    }
}

/// A struct implementing `EmitFinal` which emits to a `std::vec::Vec`.
pub struct FinalVecEmitter<'a, V: 'a>
where
    V: Serialize,
{
    sink: &'a mut Vec<V>,
}

impl<'a, V> FinalVecEmitter<'a, V>
where
    V: Serialize,
{
    /// Constructs a new `FinalVecEmitter` with a mutable reference to a given `Vec`.
    ///
    /// # Arguments
    ///
    /// * `sink` - A mutable reference to the `Vec` to receive the emitted values.
    pub fn new(sink: &'a mut Vec<V>) -> Self {
        FinalVecEmitter { sink }
    }
}

impl<'a, V> EmitFinal<V> for FinalVecEmitter<'a, V>
where
    V: Serialize,
{
    fn emit(&mut self, value: V) -> Result<()> {
        self.sink.push(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intermediate_vec_emitter_with_string_string() {
        let mut vec: Vec<(String, String)> = Vec::new();

        {
            let mut emitter = IntermediateVecEmitter::new(&mut vec);
            emitter.emit("act".to_owned(), "cat".to_owned()).unwrap();
        }

        assert_eq!(vec![("act".to_owned(), "cat".to_owned())], vec);
    }

    #[test]
    fn intermediate_vec_emitter_keeps_duplicate_keys() {
        let mut vec: Vec<(String, String)> = Vec::new();

        {
            let mut emitter = IntermediateVecEmitter::new(&mut vec);
            emitter.emit("ael".to_owned(), "ale".to_owned()).unwrap();
            emitter.emit("ael".to_owned(), "lea".to_owned()).unwrap();
        }

        assert_eq!(2, vec.len());
        assert_eq!("ale", vec[0].1);
        assert_eq!("lea", vec[1].1);
    }

    #[test]
    fn final_vec_emitter_with_u64() {
        let mut vec: Vec<u64> = Vec::new();

        {
            let mut emitter = FinalVecEmitter::new(&mut vec);
            emitter.emit(0xDEAD).unwrap();
            emitter.emit(0xBEEF).unwrap();
        }

        assert_eq!(vec![0xDEAD, 0xBEEF], vec);
    }
}
