use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use env_logger::Env;
use log::info;
use structopt::StructOpt;
use trisat::cnf::Cnf;
use trisat::enumerate::for_each_solution;
use trisat::io::{read_matrix, read_vector, save_matrix, SolutionWriter};
use trisat::solve::{merge_vector, solve};
use trisat_algebra::matrix::RowMatrix;

#[derive(Clone, Debug, StructOpt)]
#[structopt(
    name = "trisat",
    about = "3-SAT solving over GF(2) polynomial constraint systems"
)]
enum Options {
    /// Solve a 3-CNF problem and enumerate every satisfying assignment.
    Solve {
        /// Path to the DIMACS-lite CNF file.
        #[structopt(parse(from_os_str))]
        cnf: PathBuf,
    },
    /// Merge a saved H matrix with a single-row vector, then enumerate.
    Merge {
        /// Path to the saved matrix.
        #[structopt(parse(from_os_str))]
        matrix: PathBuf,
        /// Path to the vector file.
        #[structopt(parse(from_os_str))]
        vector: PathBuf,
        /// Number of variables of the underlying problem.
        literals: usize,
    },
}

fn main() -> Result<()> {
    // Default log filter, overridable through `RUST_LOG`.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let start = Instant::now();

    match Options::from_args() {
        Options::Solve { cnf } => run_solve(&cnf)?,
        Options::Merge {
            matrix,
            vector,
            literals,
        } => run_merge(&matrix, &vector, literals)?,
    }

    info!("done in {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn run_solve(path: &Path) -> Result<()> {
    let f = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    let cnf = Cnf::parse(BufReader::new(f))?;
    let outcome = solve(&cnf);
    report(outcome.satisfiable, &outcome.system.h, cnf.vars, path)
}

fn run_merge(matrix: &Path, vector: &Path, literals: usize) -> Result<()> {
    let h = read_matrix(matrix)?;
    let (row, v) = read_vector(vector)?;
    ensure!(
        row < literals,
        "vector row {} is out of range for {} variables",
        row + 1,
        literals
    );
    let outcome = merge_vector(&h, row, &v, literals);
    report(outcome.satisfiable, &outcome.system.h, literals, matrix)
}

/// Print the conclusion; on SAT also save `<base>.Hmat` and stream the
/// enumerated solutions into `<base>.sol`.
fn report(satisfiable: bool, h: &RowMatrix, n: usize, base: &Path) -> Result<()> {
    if !satisfiable {
        println!("UNSATISFIABLE");
        return Ok(());
    }

    log::debug!("final matrix:\n{h}");
    let saved = save_matrix(h, base)?;
    info!("matrix saved to {}", saved.display());

    let mut sink = SolutionWriter::create(base)?;
    let mut write_err = None;
    for_each_solution(h, n, &mut |alpha| {
        if write_err.is_none() {
            if let Err(e) = sink.write(alpha) {
                write_err = Some(e);
            }
        }
    });
    if let Some(e) = write_err {
        return Err(e);
    }
    let count = sink.count();
    info!("solutions saved to {}", sink.path().display());
    sink.finish()?;

    println!("SATISFIABLE: {count} solutions");
    Ok(())
}
