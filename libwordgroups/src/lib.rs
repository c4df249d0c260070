#![recursion_limit = "1024"]

extern crate chrono;
extern crate clap;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate uuid;

pub mod errors {
    error_chain! {
        errors {
            InputDecoding(location: String) {
                description("malformed input encoding")
                display("malformed UTF-8 input at {}", location)
            }
            EmptyGroup(key: String) {
                description("empty group reached the aggregator")
                display("no words were delivered for group key '{}'", key)
            }
        }
    }
}

pub mod aggregate;
pub mod anagram;
pub mod canonical;
pub mod combiner;
pub mod emitter;
pub mod intermediate;
pub mod io;
pub mod mapper;
pub mod partition;
pub mod reducer;
pub mod registry;
pub mod runner;
pub mod serialise;
pub mod shuffle;
pub mod stop_words;

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

// Public interface
pub use aggregate::{aggregate, GroupSummary, WordTally};
pub use anagram::{AnagramCombiner, AnagramMapper, AnagramReducer, CombinedAnagramReducer};
pub use canonical::{canonical_key, CanonicalPairs, Canonicalizer};
pub use combiner::Combine;
pub use emitter::{EmitFinal, EmitIntermediate, EmitPartitionedIntermediate, FinalVecEmitter,
                  IntermediateVecEmitter};
pub use errors::*;
pub use intermediate::IntermediateInputKV;
pub use mapper::{Map, MapInputKV};
pub use partition::{HashPartitioner, Partition, PartitionInputKV};
pub use reducer::Reduce;
pub use registry::{UserImplRegistry, UserImplRegistryBuilder};
pub use runner::*;
pub use shuffle::Shuffle;
pub use stop_words::StopWords;
