use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use errors::*;

const TEMPORARY_DIRECTORY: &str = "_temporary";
const SUCCESS_MARKER: &str = "_SUCCESS";

pub fn part_file_name(partition: u64) -> String {
    format!("part-r-{:05}", partition)
}

/// Writes the records of one reduce partition, one record per line.
pub fn write_part_file(directory: &Path, partition: u64, records: &[String]) -> Result<()> {
    let mut path = directory.to_path_buf();
    path.push(part_file_name(partition));

    let file = File::create(&path)
        .chain_err(|| format!("Failed to create output file {}.", path.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writer
            .write_all(record.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .chain_err(|| format!("Failed to write to output file {}.", path.display()))?;
    }
    writer
        .flush()
        .chain_err(|| format!("Failed to write to output file {}.", path.display()))?;
    Ok(())
}

/// `OutputCommitter` makes the output of a job visible all at once.
///
/// Reduce tasks write into a staging directory under the output directory. Only when every task
/// has succeeded are the part files moved into the output directory and the `_SUCCESS` marker
/// written. A failed job removes the output directory entirely.
pub struct OutputCommitter {
    output_directory: PathBuf,
    staging_directory: PathBuf,
}

impl OutputCommitter {
    pub fn create(output_directory: &Path, run_id: &str) -> Result<Self> {
        if output_directory.exists() {
            bail!(
                "Output directory {} already exists.",
                output_directory.display()
            );
        }

        let mut staging_directory = output_directory.to_path_buf();
        staging_directory.push(TEMPORARY_DIRECTORY);
        staging_directory.push(run_id);
        fs::create_dir_all(&staging_directory).chain_err(|| {
            format!(
                "Failed to create output directory {}.",
                output_directory.display()
            )
        })?;

        Ok(OutputCommitter {
            output_directory: output_directory.to_path_buf(),
            staging_directory,
        })
    }

    pub fn staging_directory(&self) -> &Path {
        &self.staging_directory
    }

    pub fn commit(&self) -> Result<()> {
        let entries = fs::read_dir(&self.staging_directory)
            .chain_err(|| "Failed to list staged output.")?;
        for entry in entries {
            let entry = entry.chain_err(|| "Failed to list staged output.")?;
            let mut destination = self.output_directory.clone();
            destination.push(entry.file_name());
            fs::rename(entry.path(), &destination)
                .chain_err(|| format!("Failed to move output to {}.", destination.display()))?;
        }

        let mut temporary = self.output_directory.clone();
        temporary.push(TEMPORARY_DIRECTORY);
        fs::remove_dir_all(&temporary).chain_err(|| "Failed to remove staging directory.")?;

        let mut marker = self.output_directory.clone();
        marker.push(SUCCESS_MARKER);
        File::create(&marker).chain_err(|| "Failed to write success marker.")?;

        info!("Committed output to {}", self.output_directory.display());
        Ok(())
    }

    pub fn abort(&self) -> Result<()> {
        fs::remove_dir_all(&self.output_directory).chain_err(|| {
            format!(
                "Unable to remove output directory {}.",
                self.output_directory.display()
            )
        })?;

        warn!("Removed output of failed job {}", self.output_directory.display());
        Ok(())
    }
}
