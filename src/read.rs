use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Reads the entire file as one block.
pub fn read_whole(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Reads only the first line, keeping its terminator if present.
pub fn read_first_line(path: &Path) -> Result<String> {
    let file = open(path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .with_context(|| format!("reading first line of {}", path.display()))?;
    Ok(line)
}

/// Reads every line in file order, terminators stripped.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line.with_context(|| format!("reading line of {}", path.display()))?);
    }
    Ok(lines)
}

/// Writes the full read sequence to `out`: the whole content, then the
/// first line of a fresh handle, then the remaining lines of that same
/// handle one per output line.
pub fn dump<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    let content = read_whole(path)?;
    out.write_all(content.as_bytes())?;

    let file = open(path)?;
    let mut reader = BufReader::new(file);
    let mut first = String::new();
    reader
        .read_line(&mut first)
        .with_context(|| format!("reading first line of {}", path.display()))?;
    out.write_all(first.as_bytes())?;

    let mut rest = 0usize;
    for line in reader.lines() {
        let line = line.with_context(|| format!("reading line of {}", path.display()))?;
        writeln!(out, "{line}")?;
        rest += 1;
    }
    debug!(path = %path.display(), remaining_lines = rest, "dumped file");
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("opening {}", path.display()))
}
