//! File formats for saved matrices, vectors, and solutions.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use itertools::Itertools;
use num::BigUint;
use trisat_algebra::matrix::RowMatrix;
use trisat_algebra::poly::SparsePoly;

/// Parse one saved row: a 1-based row index followed by whitespace-
/// separated monomial indices.
fn parse_row(line: &str) -> Result<(usize, SparsePoly)> {
    let mut toks = line.split_whitespace();
    let row: usize = toks
        .next()
        .context("empty row line")?
        .parse()
        .context("row index is not a number")?;
    ensure!(row >= 1, "row indices are 1-based");
    let mut poly = SparsePoly::new();
    for tok in toks {
        let m: BigUint = tok
            .parse()
            .with_context(|| format!("bad monomial index {tok:?}"))?;
        poly.terms.insert(m);
    }
    Ok((row - 1, poly))
}

/// Read a saved matrix: one row per line, missing rows empty.
pub fn parse_matrix(reader: impl BufRead) -> Result<RowMatrix> {
    let mut out = RowMatrix::new();
    for line in reader.lines() {
        let line = line.context("reading matrix input")?;
        if line.trim().is_empty() {
            continue;
        }
        let (row, poly) = parse_row(&line)?;
        out.set_row(row, poly);
    }
    Ok(out)
}

pub fn read_matrix(path: &Path) -> Result<RowMatrix> {
    let f = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    parse_matrix(BufReader::new(f))
}

/// Read a single-row vector: one line in the matrix format.
pub fn parse_vector(reader: impl BufRead) -> Result<(usize, SparsePoly)> {
    let line = reader
        .lines()
        .next()
        .context("empty vector input")?
        .context("reading vector input")?;
    parse_row(&line)
}

pub fn read_vector(path: &Path) -> Result<(usize, SparsePoly)> {
    let f = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    parse_vector(BufReader::new(f))
}

pub fn write_matrix_to(h: &RowMatrix, mut out: impl Write) -> Result<()> {
    for (r, poly) in h.iter() {
        writeln!(out, "{} {}", r + 1, poly.iter().join(" "))?;
    }
    Ok(())
}

/// Save `h` next to `input` as `<input>.Hmat`, truncating any previous
/// copy.
pub fn save_matrix(h: &RowMatrix, input: &Path) -> Result<PathBuf> {
    let path = with_suffix(input, ".Hmat");
    let f = File::create(&path).with_context(|| format!("could not create {}", path.display()))?;
    write_matrix_to(h, BufWriter::new(f))?;
    Ok(path)
}

/// Streams solutions into `<input>.sol`, truncating any previous copy.
#[derive(Debug)]
pub struct SolutionWriter {
    out: BufWriter<File>,
    path: PathBuf,
    count: usize,
}

impl SolutionWriter {
    pub fn create(input: &Path) -> Result<Self> {
        let path = with_suffix(input, ".sol");
        let f =
            File::create(&path).with_context(|| format!("could not create {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(f),
            path,
            count: 0,
        })
    }

    /// Write one assignment `α₁..αₙ` as space-separated 0/1 values.
    pub fn write(&mut self, alpha: &[u8]) -> Result<()> {
        writeln!(self.out, "{}", alpha.iter().join(" "))?;
        self.count += 1;
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
