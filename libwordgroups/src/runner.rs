use std::io::{stdin, stdout};

use chrono::prelude::*;
use clap::{App, Arg, ArgMatches, SubCommand};
use serde::Serialize;
use uuid::Uuid;

use combiner::Combine;
use emitter::{EmitPartitionedIntermediate, FinalVecEmitter, IntermediateVecEmitter};
use errors::*;
use intermediate::IntermediateInputKV;
use io::*;
use mapper::{Map, MapInputKV};
use partition::{Partition, PartitionInputKV};
use reducer::Reduce;
use registry::UserImplRegistry;
use serialise::{FinalOutputObject, IntermediateOutputObject, IntermediateOutputObjectEmitter};
use shuffle::Shuffle;
use stop_words::StopWords;
use super::VERSION;

/// `parse_command_line` uses `clap` to parse the command-line arguments passed to the payload.
///
/// The output of this function is required by the `run` function, to decide what subcommand to
/// run.
pub fn parse_command_line<'a>() -> ArgMatches<'a> {
    let current_time = Utc::now();
    let id = Uuid::new_v4();
    let payload_name = format!("{}_{}", current_time.format("%+"), id);
    let app = App::new(payload_name)
        .version(VERSION.unwrap_or("unknown"))
        .arg(
            Arg::with_name("partitions")
                .long("partitions")
                .help("Number of partitions map output is split into")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("stop-words")
                .long("stop-words")
                .help("JSON file listing stop words, replacing the built-in list")
                .takes_value(true)
                .required(false),
        )
        .subcommand(SubCommand::with_name("map"))
        .subcommand(SubCommand::with_name("reduce"))
        .subcommand(SubCommand::with_name("sanity-check"));
    app.get_matches()
}

/// Returns the stop words selected on the payload command line, or the built-in list.
pub fn stop_words_from_matches(matches: &ArgMatches) -> Result<StopWords> {
    match matches.value_of("stop-words") {
        Some(path) => StopWords::load(path),
        None => Ok(StopWords::default()),
    }
}

/// Returns the number of map output partitions selected on the payload command line.
pub fn partition_count_from_matches(matches: &ArgMatches) -> Result<u64> {
    let value = matches.value_of("partitions").unwrap_or("1");
    let partition_count: u64 = value
        .parse()
        .chain_err(|| format!("Invalid partition count: {}", value))?;
    if partition_count == 0 {
        bail!("Partition count must be at least 1.");
    }
    Ok(partition_count)
}

/// `run` begins the primary operations of the payload, and delegates to sub-functions.
///
/// # Arguments
///
/// `matches` - The output of the `parse_command_line` function.
/// `registry` - The output of the `UserImplRegistryBuilder`.
pub fn run<M, R, P>(matches: &ArgMatches, registry: &UserImplRegistry<M, R, P>) -> Result<()>
where
    M: Map,
    R: Reduce<Value = M::Value>,
    P: Partition<M::Key, M::Value>,
{
    match matches.subcommand_name() {
        Some("map") => Ok(run_map(registry.mapper, registry.partitioner)?),
        Some("reduce") => Ok(run_reduce(registry.reducer)?),
        Some("sanity-check") => {
            run_sanity_check();
            Ok(())
        }
        None => {
            eprintln!("{}", matches.usage());
            Ok(())
        }
        // This won't ever be reached, due to clap checking invalid commands before this.
        _ => Ok(()),
    }
}

/// `partition_map_output` assigns every pair emitted by a map operation to a partition.
pub fn partition_map_output<K, V, P>(
    pairs: Vec<(K, V)>,
    partitioner: &P,
) -> Result<IntermediateOutputObject<K, V>>
where
    K: Default + Serialize,
    V: Default + Serialize,
    P: Partition<K, V>,
{
    let mut output_object = IntermediateOutputObject::<K, V>::default();
    {
        let mut emitter = IntermediateOutputObjectEmitter::new(&mut output_object);
        for (key, value) in pairs {
            let partition = partitioner
                .partition(PartitionInputKV::new(&key, &value))
                .chain_err(|| "Error partitioning map output.")?;
            emitter.emit(partition, key, value)?;
        }
    }
    Ok(output_object)
}

/// `map_task` runs the mapper over one input and partitions what it emits.
pub fn map_task<M, P>(
    mapper: &M,
    partitioner: &P,
    input: MapInputKV,
) -> Result<IntermediateOutputObject<M::Key, M::Value>>
where
    M: Map,
    P: Partition<M::Key, M::Value>,
{
    let mut pairs_vec: Vec<(M::Key, M::Value)> = Vec::new();

    mapper
        .map(input, IntermediateVecEmitter::new(&mut pairs_vec))
        .chain_err(|| "Error running map operation.")?;

    partition_map_output(pairs_vec, partitioner)
}

/// `combine_map_output` runs the combiner over the output of one map task.
///
/// Values are grouped by key within each partition, and the partials the combiner emits stay in
/// the partition their key was assigned to.
pub fn combine_map_output<C: Combine>(
    combiner: &C,
    map_output: IntermediateOutputObject<String, C::Value>,
) -> Result<IntermediateOutputObject<String, C::Partial>> {
    let mut grouped = Shuffle::new();
    grouped.add_map_output(map_output);

    let mut output_object = IntermediateOutputObject::<String, C::Partial>::default();
    for (partition, groups) in grouped.into_partitions() {
        let mut partials: Vec<(String, C::Partial)> = Vec::new();
        for group in groups {
            let key = group.key.clone();
            combiner
                .combine(group, IntermediateVecEmitter::new(&mut partials))
                .chain_err(|| format!("Error running combine operation for key {}.", key))?;
        }

        let mut emitter = IntermediateOutputObjectEmitter::new(&mut output_object);
        for (key, partial) in partials {
            emitter.emit(partition, key, partial)?;
        }
    }
    Ok(output_object)
}

/// `reduce_task` runs the reducer over the complete set of values for one key.
pub fn reduce_task<R: Reduce>(
    reducer: &R,
    input: IntermediateInputKV<R::Value>,
) -> Result<Vec<R::Output>> {
    let key = input.key.clone();
    let mut outputs = Vec::new();

    reducer
        .reduce(input, FinalVecEmitter::new(&mut outputs))
        .chain_err(|| format!("Error running reduce operation for key {}.", key))?;

    Ok(outputs)
}

fn run_map<M, P>(mapper: &M, partitioner: &P) -> Result<()>
where
    M: Map,
    P: Partition<M::Key, M::Value>,
{
    let mut source = stdin();
    let mut sink = stdout();
    let input_kv = read_map_input(&mut source).chain_err(|| "Error getting input to map.")?;

    let output_object = map_task(mapper, partitioner, input_kv)?;

    write_map_output(&mut sink, &output_object)
        .chain_err(|| "Error writing map output to stdout.")?;
    Ok(())
}

fn run_reduce<R: Reduce>(reducer: &R) -> Result<()> {
    let mut source = stdin();
    let mut sink = stdout();
    let input_kv = read_reduce_input(&mut source).chain_err(|| "Error getting input to reduce.")?;

    let output_object = FinalOutputObject {
        values: reduce_task(reducer, input_kv)?,
    };

    write_reduce_output(&mut sink, &output_object)
        .chain_err(|| "Error writing reduce output to stdout.")?;
    Ok(())
}

fn run_sanity_check() {
    println!("sanity located");
}
