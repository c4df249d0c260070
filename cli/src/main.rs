extern crate chrono;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate error_chain;
extern crate futures;
extern crate futures_cpupool;
#[macro_use]
extern crate log;
extern crate util;
extern crate uuid;
extern crate wordgroups;

use std::process;

use errors::*;

mod errors {
    error_chain! {
        links {
            Wordgroups(::wordgroups::Error, ::wordgroups::ErrorKind);
        }
    }
}

mod input;
mod job;
mod output;
mod parser;

fn main() {
    if let Err(err) = util::init_logger() {
        eprintln!("Failed to initialise logging: {}", err);
        process::exit(1);
    }

    let matches = parser::parse_command_line();

    if let Err(err) = run(&matches) {
        util::output_error(&err);
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let config = job::JobConfig::from_matches(matches).chain_err(|| "Invalid job arguments.")?;

    let report = job::run_job(&config).chain_err(|| "Anagram grouping job failed.")?;

    info!(
        "Wrote {} groups from {} map tasks to {}",
        report.groups,
        report.map_tasks,
        config.output.display()
    );
    Ok(())
}
