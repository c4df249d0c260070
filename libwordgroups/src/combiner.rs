use serde::Serialize;
use serde::de::DeserializeOwned;

use emitter::EmitIntermediate;
use errors::*;
use intermediate::IntermediateInputKV;

/// The `Combine` trait defines a function for pre-aggregating the output of a single map task.
///
/// A combiner sees only the values one map task emitted for a key, and turns them into partial
/// results which a reducer later folds together with the partials from every other map task.
///
/// # Arguments
///
/// * `input`   - A `IntermediateInputKV` containing the values of one key from one map task.
/// * `emitter` - A struct implementing the `EmitIntermediate` trait,
///               provided by the combine runner.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the combine operation are sent out
/// through the `emitter`, keyed by the same key as the input.
pub trait Combine {
    type Value: Default + Serialize + DeserializeOwned;
    type Partial: Default + Serialize + DeserializeOwned;
    fn combine<E>(&self, input: IntermediateInputKV<Self::Value>, emitter: E) -> Result<()>
    where
        E: EmitIntermediate<String, Self::Partial>;
}
