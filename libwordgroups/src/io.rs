use std::io::{BufRead, Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json;

use errors::*;
use intermediate::IntermediateInputKV;
use mapper::MapInputKV;
use serialise::{FinalOutputObject, IntermediateOutputObject};

fn read_json<R, T>(source: &mut R, description: &str) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut input_string = String::new();
    let bytes_read = source
        .read_to_string(&mut input_string)
        .chain_err(|| "Error reading from source.")?;
    if bytes_read == 0 {
        warn!("bytes_read is 0");
    }
    let result = serde_json::from_str(input_string.as_str())
        .chain_err(|| format!("Error parsing input JSON to {}.", description))?;
    Ok(result)
}

/// `read_map_input` reads a string from a source and returns a `MapInputKV`.
///
/// It attempts to parse the string from the input source as JSON and returns an `errors::Error` if
/// the attempt fails.
pub fn read_map_input<R: Read>(source: &mut R) -> Result<MapInputKV> {
    read_json(source, "MapInputKV")
}

/// `read_reduce_input` reads a string from a source and returns an `IntermediateInputKV`.
///
/// It attempts to parse the string from the input source as JSON and returns an `errors::Error` if
/// the attempt fails.
pub fn read_reduce_input<R, V>(source: &mut R) -> Result<IntermediateInputKV<V>>
where
    R: Read,
    V: Default + Serialize + DeserializeOwned,
{
    read_json(source, "IntermediateInputKV")
}

/// `write_map_output` attempts to serialise an `IntermediateOutputObject` to a given sink.
pub fn write_map_output<W, K, V>(sink: &mut W, output: &IntermediateOutputObject<K, V>) -> Result<()>
where
    W: Write,
    K: Serialize,
    V: Serialize,
{
    serde_json::to_writer(sink, &output).chain_err(|| "Error writing to sink.")?;
    Ok(())
}

/// `write_reduce_output` attempts to serialise a `FinalOutputObject` to a given sink.
pub fn write_reduce_output<W, V>(sink: &mut W, output: &FinalOutputObject<V>) -> Result<()>
where
    W: Write,
    V: Serialize,
{
    serde_json::to_writer(sink, &output).chain_err(|| "Error writing to sink.")?;
    Ok(())
}

/// `decode_line` converts the raw bytes of one input line to a `String`.
///
/// Bytes which are not valid UTF-8 fail the whole line with `ErrorKind::InputDecoding`; nothing
/// from the line is recovered, since counting only part of it would skew the totals.
pub fn decode_line(mut bytes: Vec<u8>, location: &str) -> Result<String> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8(bytes).chain_err(|| ErrorKind::InputDecoding(location.to_owned()))
}

/// `DecodedLines` iterates over the lines of a source, decoding each one with `decode_line`.
///
/// Each item is a `(line number, line)` pair, with line numbers starting at 1.
pub struct DecodedLines<R: BufRead> {
    source: R,
    name: String,
    line_number: u64,
}

impl<R: BufRead> DecodedLines<R> {
    /// # Arguments
    ///
    /// * `source` - The reader to take lines from.
    /// * `name` - Used to describe the location of a failing line, e.g. a file path.
    pub fn new<S: Into<String>>(source: R, name: S) -> Self {
        DecodedLines {
            source,
            name: name.into(),
            line_number: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<R: BufRead> Iterator for DecodedLines<R> {
    type Item = Result<(u64, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.source.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                let location = format!("{}:{}", self.name, self.line_number);
                Some(decode_line(buf, &location).map(|line| (self.line_number, line)))
            }
            Err(err) => Some(Err(Error::with_chain(
                err,
                format!("Error reading from {}.", self.name),
            ))),
        }
    }
}
