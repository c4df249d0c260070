use serde::Serialize;
use serde::de::DeserializeOwned;

use emitter::EmitFinal;
use errors::*;
use intermediate::IntermediateInputKV;

/// The `Reduce` trait defines a function for performing a reduce operation.
///
/// The output types are decided by the implementation of this trait.
///
/// # Arguments
///
/// * `input` - A `IntermediateInputKV` containing the input data for the reduce operation.
/// * `emitter` - A struct implementing the `EmitFinal` trait, provided by the reduce runner.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the reduce operation are sent out
/// through the `emitter`.
pub trait Reduce {
    type Value: Default + Serialize + DeserializeOwned;
    type Output: Serialize;
    fn reduce<E>(&self, input: IntermediateInputKV<Self::Value>, emitter: E) -> Result<()>
    where
        E: EmitFinal<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::FinalVecEmitter;

    struct LengthReducer;
    impl Reduce for LengthReducer {
        type Value = String;
        type Output = usize;
        fn reduce<E>(&self, input: IntermediateInputKV<Self::Value>, mut emitter: E) -> Result<()>
        where
            E: EmitFinal<Self::Output>,
        {
            let longest = input.values.iter().map(|word| word.len()).max().unwrap_or(0);
            emitter.emit(longest)?;
            Ok(())
        }
    }

    #[test]
    fn reducer_emits_through_emitter() {
        let words = vec!["tops".to_owned(), "spot".to_owned(), "opts".to_owned()];
        let input = IntermediateInputKV::new("opst".to_owned(), words);
        let mut sink: Vec<usize> = Vec::new();

        LengthReducer
            .reduce(input, FinalVecEmitter::new(&mut sink))
            .unwrap();

        assert_eq!(vec![4], sink);
    }

    #[test]
    fn reduce_input_kv_construction() {
        let input = IntermediateInputKV::new("ael".to_owned(), vec!["ale".to_owned()]);

        assert_eq!("ael", input.key);
        assert_eq!("ale", input.values[0]);
    }
}
