use serde::Serialize;

use emitter::EmitIntermediate;
use errors::*;

/// The `MapInputKV` is a struct for passing input data to a `Map`.
///
/// `key` names where the text came from (e.g. a file and line number) and `value` holds the text
/// itself, which may span many lines.
#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MapInputKV {
    pub key: String,
    pub value: String,
}

impl MapInputKV {
    pub fn new(key: String, value: String) -> Self {
        MapInputKV { key, value }
    }
}

/// The `Map` trait defines a function for performing a map operation.
///
/// The output types are decided by the implementation of this trait.
///
/// # Arguments
///
/// * `input` - A `MapInputKV` containing the input data for the map operation.
/// * `emitter` - A struct implementing the `EmitIntermediate` trait, provided by the map runner.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the map operation are sent out through
/// the `emitter`.
pub trait Map {
    type Key: Default + Serialize;
    type Value: Default + Serialize;
    fn map<E>(&self, input: MapInputKV, emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::IntermediateVecEmitter;

    struct TestMapper;
    impl Map for TestMapper {
        type Key = String;
        type Value = String;
        fn map<E>(&self, input: MapInputKV, mut emitter: E) -> Result<()>
        where
            E: EmitIntermediate<Self::Key, Self::Value>,
        {
            emitter.emit(input.value, "test".to_owned())?;
            Ok(())
        }
    }

    #[test]
    fn test_mapper_test_interface() {
        let mut vec: Vec<(String, String)> = Vec::new();
        let test_kv = MapInputKV::new("test_file".to_owned(), "this is a".to_owned());

        TestMapper
            .map(test_kv, IntermediateVecEmitter::new(&mut vec))
            .unwrap();

        assert_eq!("this is a", vec[0].0);
        assert_eq!("test", vec[0].1);
    }

    #[test]
    fn map_input_kv_construction() {
        let test_kv = MapInputKV::new("foo".to_owned(), "bar".to_owned());

        assert_eq!("foo", test_kv.key);
        assert_eq!("bar", test_kv.value);
    }
}
