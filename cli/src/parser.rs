use clap::{App, Arg, ArgMatches};

pub fn parse_command_line<'a>() -> ArgMatches<'a> {
    App::new("wordgroups")
        .version(crate_version!())
        .author("Wordgroups Authors")
        .about("Groups the words of a text corpus into anagram classes")
        .arg(
            Arg::with_name("input")
                .help("Input file, or a directory of input files")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Output directory, must not already exist")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("partitions")
                .long("partitions")
                .short("p")
                .help("Number of reduce partitions, one output file is written per partition")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .short("t")
                .help("Number of worker threads running map and reduce tasks")
                .takes_value(true)
                .default_value("4"),
        )
        .arg(
            Arg::with_name("split-lines")
                .long("split-lines")
                .help("Maximum number of input lines handed to a single map task")
                .takes_value(true)
                .default_value("10000"),
        )
        .arg(
            Arg::with_name("stop-words")
                .long("stop-words")
                .short("s")
                .help("JSON file listing stop words, replacing the built-in list")
                .takes_value(true)
                .required(false),
        )
        .get_matches()
}
