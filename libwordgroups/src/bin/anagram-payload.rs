extern crate util;
extern crate wordgroups;

use std::process;
use std::sync::Arc;

use wordgroups::*;

fn run() -> Result<()> {
    util::init_logger().chain_err(|| "Failed to initialise logging.")?;

    let matches = wordgroups::parse_command_line();

    let stop_words = wordgroups::stop_words_from_matches(&matches)?;
    let canonicalizer = Canonicalizer::new(stop_words)?;
    let mapper = AnagramMapper::new(Arc::new(canonicalizer));
    let reducer = AnagramReducer;
    let partitioner = HashPartitioner::new(wordgroups::partition_count_from_matches(&matches)?);

    let registry = UserImplRegistryBuilder::new()
        .mapper(&mapper)
        .reducer(&reducer)
        .partitioner(&partitioner)
        .build()
        .chain_err(|| "Error building UserImplRegistry.")?;

    wordgroups::run(&matches, &registry)
}

fn main() {
    if let Err(err) = run() {
        util::output_error(&err);
        process::exit(1);
    }
}
