/// This is a set of integration tests which run against the payload binary living in
/// `libwordgroups/src/bin/anagram-payload.rs`.

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::process::{self, Command, Output, Stdio};

const TEST_BIN_NAME: &str = "anagram-payload";

// This can't be a one-liner because cargo sometimes runs integration tests from
// `target/debug/deps`.
fn get_bin_path() -> PathBuf {
    let mut path = env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push(TEST_BIN_NAME);
    path
}

fn run_payload(subcommand: &str, input: &str) -> Output {
    run_payload_with_args(&[], subcommand, input)
}

fn run_payload_with_args(args: &[&str], subcommand: &str, input: &str) -> Output {
    let mut child = Command::new(get_bin_path())
        .args(args)
        .arg(subcommand)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

#[test]
fn run_sanity_check() {
    let output = Command::new(get_bin_path())
        .arg("sanity-check")
        .output()
        .unwrap();
    let output_str = String::from_utf8(output.stdout).unwrap();

    assert_eq!("sanity located\n", output_str);
}

#[test]
fn run_map_valid_input() {
    let json_input = r#"{"key":"input.txt","value":"The ale.\nthe lea"}"#;

    let output = run_payload("map", json_input);
    let output_str = String::from_utf8(output.stdout).unwrap();

    let expected_output =
        r#"{"partitions":{"0":[{"key":"ael","value":"ale"},{"key":"ael","value":"lea"}]}}"#;

    assert!(output.status.success());
    assert_eq!(expected_output, output_str);
}

#[test]
fn run_map_with_partitions() {
    let json_input = r#"{"key":"input.txt","value":"ale lea"}"#;

    let output = run_payload_with_args(&["--partitions", "8"], "map", json_input);
    let output_str = String::from_utf8(output.stdout).unwrap();

    // Both words share a key, so they must share a partition, whichever one that is.
    let expected_pairs = r#"[{"key":"ael","value":"ale"},{"key":"ael","value":"lea"}]"#;
    let in_one_partition = (0..8).any(|partition| {
        output_str == format!(r#"{{"partitions":{{"{}":{}}}}}"#, partition, expected_pairs)
    });

    assert!(output.status.success());
    assert!(in_one_partition, "unexpected map output: {}", output_str);
}

#[test]
fn run_map_zero_partitions_fails() {
    let json_input = r#"{"key":"input.txt","value":"ale"}"#;

    let output = run_payload_with_args(&["--partitions", "0"], "map", json_input);

    assert_eq!(false, output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn run_map_with_stop_word_file() {
    let mut path = env::temp_dir();
    path.push(format!("payload-stop-words-{}.json", process::id()));
    File::create(&path)
        .unwrap()
        .write_all(br#"{"stopWords":["ale"]}"#)
        .unwrap();
    let json_input = r#"{"key":"input.txt","value":"the ale"}"#;

    let output = run_payload_with_args(
        &["--stop-words", path.to_str().unwrap()],
        "map",
        json_input,
    );
    let output_str = String::from_utf8(output.stdout).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(output.status.success());
    assert_eq!(
        r#"{"partitions":{"0":[{"key":"eht","value":"the"}]}}"#,
        output_str
    );
}

#[test]
fn run_map_only_stop_words() {
    let json_input = r#"{"key":"input.txt","value":"a an the"}"#;

    let output = run_payload("map", json_input);
    let output_str = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(r#"{"partitions":{}}"#, output_str);
}

#[test]
fn run_map_invalid_input() {
    let output = run_payload("map", "foo");

    assert_eq!(false, output.status.success());
}

#[test]
fn run_reduce_valid_input() {
    let json_input = r#"{"key":"ael","values":["lea","ale","ale"]}"#;
    let expected_output = r#"{"values":[{"distinct_word_count":2,"total_occurrence_count":3,"words":["ale","lea"]}]}"#;

    let output = run_payload("reduce", json_input);
    let output_str = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(expected_output, output_str);
}

#[test]
fn run_reduce_empty_group_fails() {
    let output = run_payload("reduce", r#"{"key":"ael","values":[]}"#);

    assert_eq!(false, output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn run_reduce_invalid_input() {
    let output = run_payload("reduce", "foo");

    assert_eq!(false, output.status.success());
}
