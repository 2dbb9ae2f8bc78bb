//! Frequency-based variable relabelling, the pipeline stage run ahead of
//! the solver: the most clause-connected variables receive the smallest
//! indices, so the merge loop settles dense rows first. Prints the
//! relabelled CNF to stdout.

use std::cmp::Reverse;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::Env;
use log::debug;
use structopt::StructOpt;
use trisat::cnf::parse_raw;

#[derive(Clone, Debug, StructOpt)]
#[structopt(
    name = "relabel",
    about = "Relabel CNF variables by ascending clause frequency"
)]
struct Options {
    /// Path to the DIMACS-lite CNF file; the result goes to stdout.
    #[structopt(parse(from_os_str))]
    cnf: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let opts = Options::from_args();
    let f = File::open(&opts.cnf)
        .with_context(|| format!("could not open {}", opts.cnf.display()))?;
    let (vars, raw) = parse_raw(BufReader::new(f))?;

    // Per-slot frequencies; a literal repeated inside a clause counts each
    // time it appears.
    let mut freq = vec![0usize; vars];
    for clause in &raw {
        for &l in clause {
            freq[l.unsigned_abs() as usize - 1] += 1;
        }
    }
    for (v, f) in freq.iter().enumerate() {
        debug!("frequency[{}] = {}", v + 1, f);
    }

    // Least frequent variables get the largest new indices; ties keep
    // their original relative order.
    let mut order: Vec<usize> = (0..vars).collect();
    order.sort_by_key(|&v| (freq[v], v));
    let mut new_label = vec![0usize; vars];
    for (rank, &v) in order.iter().enumerate() {
        new_label[v] = vars - rank;
    }

    // Relabel and sort each clause by descending variable index.
    let clauses: Vec<[i64; 3]> = raw
        .iter()
        .map(|clause| {
            let mut c: Vec<i64> = clause
                .iter()
                .map(|&l| {
                    let nl = new_label[l.unsigned_abs() as usize - 1] as i64;
                    if l > 0 {
                        nl
                    } else {
                        -nl
                    }
                })
                .collect();
            c.sort_by_key(|l| Reverse(l.unsigned_abs()));
            [c[0], c[1], c[2]]
        })
        .collect();

    println!("c generated by relabel");
    println!("p cnf {} {}", vars, clauses.len());

    // Clauses ordered by descending leading variable, the positive block
    // before the negative one per value.
    let mut emitted = vec![false; clauses.len()];
    for i in (3..=vars).rev() {
        for sign in [1i64, -1] {
            for (c, clause) in clauses.iter().enumerate() {
                if clause[0] == sign * i as i64 {
                    println!(" {} {} {} 0", clause[0], clause[1], clause[2]);
                    emitted[c] = true;
                }
            }
        }
    }
    // Degenerate clauses whose leading variable sits below 3.
    for (c, clause) in clauses.iter().enumerate() {
        if !emitted[c] {
            println!(" {} {} {} 0", clause[0], clause[1], clause[2]);
        }
    }
    Ok(())
}
