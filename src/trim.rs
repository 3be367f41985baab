use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use compress_io::compress::CompressIo;

use crate::{cli::Config, error::PileupError, output::AtomicWriter};

/// Index of the first line containing `marker` (plain substring match)
pub fn find_marker<S: AsRef<str>>(lines: &[S], marker: &str) -> Result<usize, PileupError> {
    lines
        .iter()
        .position(|l| l.as_ref().contains(marker))
        .ok_or_else(|| PileupError::MissingMarker {
            marker: marker.to_owned(),
        })
}

/// Drop everything before the header line.  The returned slice starts with the
/// marker line and is otherwise untouched
pub fn trim_header<'a, S: AsRef<str>>(
    lines: &'a [S],
    marker: &str,
) -> Result<&'a [S], PileupError> {
    let ix = find_marker(lines, marker)?;
    trace!("Header marker found at line {}", ix + 1);
    Ok(&lines[ix..])
}

pub fn read_lines<P: AsRef<Path>>(file: P) -> anyhow::Result<Vec<String>> {
    let file = file.as_ref();
    let rdr = CompressIo::new().path(file).bufreader()?;
    debug!("Opened {} for input", file.display());
    let lines = rdr.lines().collect::<Result<Vec<_>, _>>()?;
    Ok(lines)
}

/// Name of the trimmed table produced from raw report `name`
pub fn trimmed_name(name: &str) -> String {
    format!("trm_{}.tsv", name)
}

/// Trim one raw report and write the result to the trimmed directory.
/// Returns the path of the new file
pub fn trim_file<P: AsRef<Path>>(file: P, cfg: &Config) -> anyhow::Result<PathBuf> {
    let file = file.as_ref();
    let name = file
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Invalid file name {}", file.display()))?;

    let lines = read_lines(file)?;
    let trimmed = trim_header(&lines, cfg.marker())?;
    debug!(
        "{}: {} lines read, {} retained",
        name,
        lines.len(),
        trimmed.len()
    );

    let out = cfg.trimmed_dir().join(trimmed_name(name));
    let mut wrt = AtomicWriter::create(&out)?;
    for line in trimmed {
        writeln!(wrt, "{}", line)?;
    }
    wrt.commit()?;
    Ok(out)
}
