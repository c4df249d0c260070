use serde::Serialize;

/// The `IntermediateInputKV` is one group as delivered by the shuffle: a key together with every
/// value emitted for it.
///
/// The order of `values` carries no meaning. It can be constructed normally or using
/// `IntermediateInputKV::new()`.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct IntermediateInputKV<V>
where
    V: Default + Serialize,
{
    pub key: String,
    pub values: Vec<V>,
}

impl<V> IntermediateInputKV<V>
where
    V: Default + Serialize,
{
    pub fn new(key: String, values: Vec<V>) -> Self {
        IntermediateInputKV { key, values }
    }
}
