use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use clap::ArgMatches;
use futures::Future;
use futures::future;
use futures_cpupool::{CpuFuture, CpuPool};
use uuid::Uuid;

use util;
use wordgroups::{combine_map_output, map_task, reduce_task, AnagramCombiner, AnagramMapper,
                 Canonicalizer, CombinedAnagramReducer, HashPartitioner, IntermediateInputKV,
                 Shuffle, StopWords, WordTally};

use errors::*;
use input::{list_input_files, InputSplits};
use output::{write_part_file, OutputCommitter};

/// `JobConfig` holds everything needed to run one anagram grouping job.
#[derive(Clone, Debug, PartialEq)]
pub struct JobConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub partitions: u64,
    pub threads: usize,
    pub split_lines: usize,
    pub stop_words: Option<PathBuf>,
}

fn parse_positive(matches: &ArgMatches, name: &str) -> Result<u64> {
    let value = matches
        .value_of(name)
        .chain_err(|| format!("Missing value for {}.", name))?;
    let number: u64 = value
        .parse()
        .chain_err(|| format!("Invalid value for {}: {}", name, value))?;
    if number == 0 {
        bail!("{} must be at least 1.", name);
    }
    Ok(number)
}

impl JobConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let input = matches
            .value_of("input")
            .chain_err(|| "Input path must be specified.")?;
        let output = matches
            .value_of("output")
            .chain_err(|| "Output path must be specified.")?;

        Ok(JobConfig {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
            partitions: parse_positive(matches, "partitions")?,
            threads: parse_positive(matches, "threads")? as usize,
            split_lines: parse_positive(matches, "split-lines")? as usize,
            stop_words: matches.value_of("stop-words").map(PathBuf::from),
        })
    }
}

/// Counts describing a finished job.
#[derive(Debug, Default, PartialEq)]
pub struct JobReport {
    pub map_tasks: usize,
    pub groups: usize,
    pub partitions: u64,
}

/// `run_job` reads the input, groups every word into its anagram class and writes one record per
/// group to the output directory.
///
/// Map and reduce tasks run on a shared thread pool. Output only becomes visible once every task
/// has succeeded; on failure the output directory is removed.
pub fn run_job(config: &JobConfig) -> Result<JobReport> {
    let run_id = Uuid::new_v4().to_string();
    let committer = OutputCommitter::create(&config.output, &run_id)?;
    run_with_committer(config, &committer)
}

fn run_with_committer(config: &JobConfig, committer: &OutputCommitter) -> Result<JobReport> {
    let start_time = Utc::now();

    let result = execute(config, committer.staging_directory()).and_then(|report| {
        committer.commit()?;
        Ok(report)
    });

    match result {
        Ok(report) => {
            let elapsed = Utc::now().signed_duration_since(start_time);
            info!("Job completed in {}ms", elapsed.num_milliseconds());
            Ok(report)
        }
        Err(err) => match committer.abort() {
            Ok(()) => Err(err),
            Err(abort_err) => {
                util::output_error(&err);
                Err(abort_err).chain_err(|| "Job failed and its output could not be removed.")
            }
        },
    }
}

/// Waits for every task to finish, successful or not, before reporting the first failure.
fn settle_all<T: Send + 'static>(tasks: Vec<CpuFuture<T, Error>>) -> Result<Vec<T>> {
    let settled = future::join_all(tasks.into_iter().map(|task| task.then(Ok::<_, ()>)))
        .wait()
        .map_err(|_| Error::from("Task was cancelled."))?;
    settled.into_iter().collect()
}

fn execute(config: &JobConfig, staging_directory: &Path) -> Result<JobReport> {
    let stop_words = match config.stop_words {
        Some(ref path) => StopWords::load(path)?,
        None => StopWords::default(),
    };
    let canonicalizer = Canonicalizer::new(stop_words)?;
    let mapper = AnagramMapper::new(Arc::new(canonicalizer));
    let partitioner = HashPartitioner::new(config.partitions);

    let input_files = list_input_files(&config.input)?;
    info!(
        "Starting job: {} input files, {} partitions, {} threads",
        input_files.len(),
        config.partitions,
        config.threads
    );
    let pool = CpuPool::new(config.threads);

    let mut map_futures = Vec::new();
    let mut split_error = None;
    for split in InputSplits::new(input_files, config.split_lines) {
        let split = match split {
            Ok(split) => split,
            Err(err) => {
                split_error = Some(err);
                break;
            }
        };
        let mapper = mapper.clone();
        let partitioner = partitioner.clone();
        debug!("Scheduling map task for {}", split.key);
        map_futures.push(pool.spawn_fn(move || {
            let key = split.key.clone();
            map_task(&mapper, &partitioner, split)
                .and_then(|output| combine_map_output(&AnagramCombiner, output))
                .chain_err(|| format!("Error running map task for {}.", key))
        }));
    }

    let map_tasks = map_futures.len();
    let map_outputs = settle_all(map_futures);
    if let Some(err) = split_error {
        return Err(err).chain_err(|| "Error reading job input.");
    }
    let map_outputs = map_outputs.chain_err(|| "Error running map tasks.")?;
    info!("Map phase completed: {} tasks", map_tasks);

    let mut shuffle = Shuffle::new();
    for map_output in map_outputs {
        shuffle.add_map_output(map_output);
    }
    let groups = shuffle.key_count();
    let mut partitions = shuffle.into_partitions();

    let mut reduce_futures = Vec::new();
    for partition in 0..config.partitions {
        let partition_groups = partitions.remove(&partition).unwrap_or_default();
        let directory = staging_directory.to_path_buf();
        reduce_futures.push(pool.spawn_fn(move || {
            reduce_partition(&directory, partition, partition_groups)
        }));
    }
    settle_all(reduce_futures).chain_err(|| "Error running reduce tasks.")?;
    info!("Reduce phase completed: {} groups", groups);

    Ok(JobReport {
        map_tasks,
        groups,
        partitions: config.partitions,
    })
}

fn reduce_partition(
    directory: &Path,
    partition: u64,
    groups: Vec<IntermediateInputKV<WordTally>>,
) -> Result<()> {
    debug!("Reducing partition {} with {} groups", partition, groups.len());

    let reducer = CombinedAnagramReducer;
    let mut records = Vec::with_capacity(groups.len());
    for group in groups {
        for summary in reduce_task(&reducer, group)? {
            records.push(summary.to_string());
        }
    }

    write_part_file(directory, partition, &records)
        .chain_err(|| format!("Error writing output for partition {}.", partition))
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs::{self, File};
    use std::io::{Read, Write};

    use super::*;

    fn temp_path(prefix: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("{}-{}", prefix, Uuid::new_v4()));
        path
    }

    fn config(input: &Path, output: &Path, partitions: u64) -> JobConfig {
        JobConfig {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            partitions,
            threads: 2,
            split_lines: 2,
            stop_words: None,
        }
    }

    fn write_input(contents: &[u8]) -> PathBuf {
        let dir = temp_path("wordgroups-job-input");
        fs::create_dir_all(&dir).unwrap();
        File::create(dir.join("corpus.txt"))
            .unwrap()
            .write_all(contents)
            .unwrap();
        dir
    }

    fn read_output(output: &Path, partitions: u64) -> Vec<String> {
        let mut records = Vec::new();
        for partition in 0..partitions {
            let mut contents = String::new();
            File::open(output.join(format!("part-r-{:05}", partition)))
                .unwrap()
                .read_to_string(&mut contents)
                .unwrap();
            records.extend(contents.lines().map(|line| line.to_owned()));
        }
        records.sort();
        records
    }

    #[test]
    fn groups_anagrams_across_lines() {
        let input = write_input(b"ale\nlea\ntea\nale\n");
        let output = temp_path("wordgroups-job-output");

        let report = run_job(&config(&input, &output, 1)).unwrap();

        assert_eq!(2, report.map_tasks);
        assert_eq!(2, report.groups);
        assert_eq!(vec!["1\t1\ttea", "2\t3\tale lea"], read_output(&output, 1));
        assert!(output.join("_SUCCESS").exists());

        fs::remove_dir_all(&input).unwrap();
        fs::remove_dir_all(&output).unwrap();
    }

    #[test]
    fn output_is_identical_across_runs_and_partitionings() {
        let input = write_input(b"The cat sat.\ndon't stop\nact tops spot pots\na an the\nSTOP");
        let single = temp_path("wordgroups-job-output");
        let repeat = temp_path("wordgroups-job-output");
        let many = temp_path("wordgroups-job-output");

        run_job(&config(&input, &single, 1)).unwrap();
        run_job(&config(&input, &repeat, 1)).unwrap();
        run_job(&config(&input, &many, 4)).unwrap();

        let expected = vec![
            "1\t1\tdon",
            "1\t1\tsat",
            "1\t1\tt",
            "2\t2\tact cat",
            "4\t5\tpots spot stop tops",
        ];
        assert_eq!(expected, read_output(&single, 1));
        assert_eq!(expected, read_output(&repeat, 1));
        assert_eq!(expected, read_output(&many, 4));

        let mut first = String::new();
        let mut second = String::new();
        File::open(single.join("part-r-00000")).unwrap().read_to_string(&mut first).unwrap();
        File::open(repeat.join("part-r-00000")).unwrap().read_to_string(&mut second).unwrap();
        assert_eq!(first, second);

        for dir in &[input, single, repeat, many] {
            fs::remove_dir_all(dir).unwrap();
        }
    }

    #[test]
    fn only_stop_words_produces_empty_output() {
        let input = write_input(b"a an the\nThe AND of");
        let output = temp_path("wordgroups-job-output");

        let report = run_job(&config(&input, &output, 1)).unwrap();

        assert_eq!(0, report.groups);
        assert!(read_output(&output, 1).is_empty());

        fs::remove_dir_all(&input).unwrap();
        fs::remove_dir_all(&output).unwrap();
    }

    #[test]
    fn malformed_input_leaves_no_output() {
        let input = write_input(b"ale\nlea\n\xFF\xFE\n");
        let output = temp_path("wordgroups-job-output");

        assert!(run_job(&config(&input, &output, 1)).is_err());
        assert!(!output.exists());

        fs::remove_dir_all(&input).unwrap();
    }

    #[test]
    fn custom_stop_words_are_applied() {
        let input = write_input(b"the cat act");
        let stop_words = temp_path("wordgroups-stop-words");
        File::create(&stop_words)
            .unwrap()
            .write_all(br#"{"stop_words":["cat"]}"#)
            .unwrap();
        let output = temp_path("wordgroups-job-output");
        let mut job_config = config(&input, &output, 1);
        job_config.stop_words = Some(stop_words.clone());

        run_job(&job_config).unwrap();

        assert_eq!(vec!["1\t1\tact", "1\t1\tthe"], read_output(&output, 1));

        fs::remove_dir_all(&input).unwrap();
        fs::remove_dir_all(&output).unwrap();
        fs::remove_file(&stop_words).unwrap();
    }

    #[test]
    fn failed_reduce_partition_removes_output() {
        let input = write_input(b"ale lea tea\ncat act dog god\n");
        let output = temp_path("wordgroups-job-output");
        let committer = OutputCommitter::create(&output, "run").unwrap();
        fs::create_dir(committer.staging_directory().join("part-r-00001")).unwrap();

        let result = run_with_committer(&config(&input, &output, 4), &committer);

        assert!(result.is_err());
        assert!(!output.exists());

        fs::remove_dir_all(&input).unwrap();
    }

    #[test]
    fn missing_stop_word_file_removes_output() {
        let input = write_input(b"ale lea");
        let output = temp_path("wordgroups-job-output");
        let mut job_config = config(&input, &output, 2);
        job_config.stop_words = Some(temp_path("wordgroups-missing-stop-words"));

        assert!(run_job(&job_config).is_err());
        assert!(!output.exists());

        fs::remove_dir_all(&input).unwrap();
    }
}
