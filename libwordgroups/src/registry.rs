use errors::*;
use mapper::Map;
use partition::Partition;
use reducer::Reduce;

/// `UserImplRegistry` tracks the implementations of `Map`, `Reduce` and `Partition` used by a
/// job.
///
/// Use the `UserImplRegistryBuilder` to create this and then pass it in to `run`.
pub struct UserImplRegistry<'a, M, R, P>
where
    M: Map + 'a,
    R: Reduce<Value = M::Value> + 'a,
    P: Partition<M::Key, M::Value> + 'a,
{
    pub mapper: &'a M,
    pub reducer: &'a R,
    pub partitioner: &'a P,
}

/// `UserImplRegistryBuilder` is used to create a `UserImplRegistry`.
pub struct UserImplRegistryBuilder<'a, M, R, P>
where
    M: Map + 'a,
    R: Reduce<Value = M::Value> + 'a,
    P: Partition<M::Key, M::Value> + 'a,
{
    mapper: Option<&'a M>,
    reducer: Option<&'a R>,
    partitioner: Option<&'a P>,
}

impl<'a, M, R, P> Default for UserImplRegistryBuilder<'a, M, R, P>
where
    M: Map + 'a,
    R: Reduce<Value = M::Value> + 'a,
    P: Partition<M::Key, M::Value> + 'a,
{
    fn default() -> UserImplRegistryBuilder<'a, M, R, P> {
        UserImplRegistryBuilder {
            mapper: None,
            reducer: None,
            partitioner: None,
        }
    }
}

impl<'a, M, R, P> UserImplRegistryBuilder<'a, M, R, P>
where
    M: Map + 'a,
    R: Reduce<Value = M::Value> + 'a,
    P: Partition<M::Key, M::Value> + 'a,
{
    pub fn new() -> UserImplRegistryBuilder<'a, M, R, P> {
        Default::default()
    }

    pub fn mapper(mut self, mapper: &'a M) -> UserImplRegistryBuilder<'a, M, R, P> {
        self.mapper = Some(mapper);
        self
    }

    pub fn reducer(mut self, reducer: &'a R) -> UserImplRegistryBuilder<'a, M, R, P> {
        self.reducer = Some(reducer);
        self
    }

    pub fn partitioner(mut self, partitioner: &'a P) -> UserImplRegistryBuilder<'a, M, R, P> {
        self.partitioner = Some(partitioner);
        self
    }

    pub fn build(&self) -> Result<UserImplRegistry<'a, M, R, P>> {
        let mapper = self.mapper
            .chain_err(|| "Error building UserImplRegistry: No Mapper provided")?;
        let reducer = self.reducer
            .chain_err(|| "Error building UserImplRegistry: No Reducer provided")?;
        let partitioner = self.partitioner
            .chain_err(|| "Error building UserImplRegistry: No Partitioner provided")?;

        Ok(UserImplRegistry {
            mapper,
            reducer,
            partitioner,
        })
    }
}
