use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::vec;

use wordgroups::MapInputKV;
use wordgroups::io::DecodedLines;

use errors::*;

// Files such as `_SUCCESS` or editor swap files are never treated as input.
fn is_hidden(path: &Path) -> bool {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.starts_with('.') || name.starts_with('_'),
        None => true,
    }
}

/// Returns the files making up the job input, in name order.
///
/// `input` may be a single file, or a directory whose regular files are all read.
pub fn list_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(input)
        .chain_err(|| format!("Input path {} does not exist.", input.display()))?;
    if metadata.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    let entries = fs::read_dir(input)
        .chain_err(|| format!("Unable to list input directory {}.", input.display()))?;
    for entry in entries {
        let entry = entry.chain_err(|| "Error reading input directory entry.")?;
        let path = entry.path();
        if path.is_file() && !is_hidden(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn open_lines(path: &Path) -> Result<DecodedLines<BufReader<File>>> {
    let file = File::open(path)
        .chain_err(|| format!("Unable to open input file {}.", path.display()))?;
    Ok(DecodedLines::new(
        BufReader::new(file),
        path.to_string_lossy().into_owned(),
    ))
}

/// `InputSplits` divides the input files into map inputs of at most `split_lines` lines each.
///
/// A split never spans two files. Its key names the file and the first line it holds, so a
/// failing map task can be traced back to the input.
pub struct InputSplits {
    files: vec::IntoIter<PathBuf>,
    current: Option<DecodedLines<BufReader<File>>>,
    split_lines: usize,
}

impl InputSplits {
    pub fn new(files: Vec<PathBuf>, split_lines: usize) -> Self {
        InputSplits {
            files: files.into_iter(),
            current: None,
            split_lines,
        }
    }

    fn read_split(&mut self) -> Result<Option<MapInputKV>> {
        let lines = match self.current {
            Some(ref mut lines) => lines,
            None => return Ok(None),
        };

        let mut first_line = None;
        let mut value = String::new();
        let mut count = 0;
        while count < self.split_lines {
            let (number, line) = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            if first_line.is_none() {
                first_line = Some(number);
            } else {
                value.push('\n');
            }
            value.push_str(&line);
            count += 1;
        }

        Ok(first_line.map(|number| MapInputKV::new(format!("{}:{}", lines.name(), number), value)))
    }
}

impl Iterator for InputSplits {
    type Item = Result<MapInputKV>;

    fn next(&mut self) -> Option<Result<MapInputKV>> {
        loop {
            if self.current.is_none() {
                let path = self.files.next()?;
                match open_lines(&path) {
                    Ok(lines) => self.current = Some(lines),
                    Err(err) => return Some(Err(err)),
                }
            }

            match self.read_split() {
                Ok(Some(split)) => return Some(Ok(split)),
                Ok(None) => self.current = None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
