//! DIMACS-lite CNF input.

use std::io::BufRead;

use anyhow::{ensure, Context, Result};
use itertools::Itertools;

/// A clause as written in the input: exactly three signed literals.
pub type RawClause = [i64; 3];

/// A CNF instance as a dense signed clause matrix.
///
/// Entry `(c, v)` is `+1` when clause `c` contains `α_{v+1}`, `−1` when it
/// contains its negation, and `0` otherwise. A literal repeated inside one
/// clause collapses to a single entry; on a contradictory repetition the
/// last occurrence wins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cnf {
    pub vars: usize,
    pub clauses: Vec<Vec<i8>>,
}

/// Parse the raw clause list: skip everything up to the `p cnf <vars>
/// <clauses>` header, then read exactly `clauses` groups of three non-zero
/// literals terminated by `0`, tolerating arbitrary whitespace and line
/// breaks. Content after the last clause is ignored.
pub fn parse_raw(reader: impl BufRead) -> Result<(usize, Vec<RawClause>)> {
    let mut lines = reader.lines();

    let mut vars = 0usize;
    let mut num_clauses = 0usize;
    let mut pending: Vec<String> = Vec::new();
    let mut found_header = false;
    for line in &mut lines {
        let line = line.context("reading CNF input")?;
        let mut toks = line.split_whitespace();
        if toks.next() == Some("p") {
            ensure!(
                toks.next() == Some("cnf"),
                "malformed problem line, expected `p cnf <vars> <clauses>`"
            );
            vars = toks
                .next()
                .context("problem line missing the variable count")?
                .parse()
                .context("variable count is not a number")?;
            num_clauses = toks
                .next()
                .context("problem line missing the clause count")?
                .parse()
                .context("clause count is not a number")?;
            pending = toks.map(str::to_string).collect();
            found_header = true;
            break;
        }
    }
    ensure!(found_header, "no `p cnf` header found");

    let wanted = num_clauses * 4;
    let mut nums: Vec<i64> = Vec::with_capacity(wanted);
    let take = |tok: &str, nums: &mut Vec<i64>| -> Result<()> {
        let v = tok
            .parse()
            .with_context(|| format!("bad token {tok:?} in clause data"))?;
        nums.push(v);
        Ok(())
    };
    for tok in &pending {
        if nums.len() == wanted {
            break;
        }
        take(tok.as_str(), &mut nums)?;
    }
    'outer: for line in lines {
        let line = line.context("reading CNF input")?;
        for tok in line.split_whitespace() {
            if nums.len() == wanted {
                break 'outer;
            }
            take(tok, &mut nums)?;
        }
    }
    ensure!(
        nums.len() == wanted,
        "expected {} clauses but the data ran out after {} literals",
        num_clauses,
        nums.len()
    );

    let mut raw = Vec::with_capacity(num_clauses);
    for (c, (l1, l2, l3, z)) in nums.into_iter().tuples().enumerate() {
        ensure!(z == 0, "clause {} is not terminated by 0", c + 1);
        for l in [l1, l2, l3] {
            ensure!(l != 0, "clause {} has fewer than three literals", c + 1);
            ensure!(
                l.unsigned_abs() as usize <= vars,
                "literal {} in clause {} exceeds the declared {} variables",
                l,
                c + 1,
                vars
            );
        }
        raw.push([l1, l2, l3]);
    }
    Ok((vars, raw))
}

impl Cnf {
    pub fn parse(reader: impl BufRead) -> Result<Self> {
        let (vars, raw) = parse_raw(reader)?;
        Self::from_raw(vars, &raw)
    }

    /// Collapse raw clauses into the signed matrix.
    pub fn from_raw(vars: usize, raw: &[RawClause]) -> Result<Self> {
        let mut clauses = vec![vec![0i8; vars]; raw.len()];
        for (c, clause) in raw.iter().enumerate() {
            for &l in clause {
                ensure!(
                    l != 0 && l.unsigned_abs() as usize <= vars,
                    "literal {} in clause {} out of range",
                    l,
                    c + 1
                );
                clauses[c][l.unsigned_abs() as usize - 1] = if l > 0 { 1 } else { -1 };
            }
        }
        Ok(Self { vars, clauses })
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Highest variable index appearing in clause `c` (1-based), `0` for an
    /// all-zero row.
    pub fn max_var(&self, c: usize) -> usize {
        self.clauses[c]
            .iter()
            .rposition(|&e| e != 0)
            .map_or(0, |i| i + 1)
    }

    /// Ground-truth check: does the 0/1 assignment `alpha` (indexed by
    /// variable minus one) satisfy every clause?
    pub fn satisfied_by(&self, alpha: &[u8]) -> bool {
        self.clauses.iter().all(|row| {
            row.iter().enumerate().any(|(v, &e)| {
                (e == 1 && alpha[v] == 1) || (e == -1 && alpha[v] == 0)
            })
        })
    }
}
