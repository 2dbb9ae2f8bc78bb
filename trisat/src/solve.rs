//! The clause-merge driver loop.

use log::{debug, info, log_enabled, Level};
use trisat_algebra::index::var_index;
use trisat_algebra::matrix::RowMatrix;
use trisat_algebra::poly::SparsePoly;

use crate::cnf::Cnf;
use crate::encode::encode_clause;
use crate::merge::{merge, MergeOutcome, System};
use crate::simplify::{rebuild_projections, simplify_matrix, simplify_vector};

/// Outcome of absorbing every clause.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    pub satisfiable: bool,
    /// The final system; its `h` drives the enumeration when satisfiable.
    pub system: System,
    /// Deepest merge recursion observed for a single clause.
    pub max_levels: usize,
    /// Recursive merges summed over all clauses.
    pub total_levels: usize,
}

/// Absorb the clauses of `cnf` one by one into a single constraint system.
///
/// Clause 0 seeds the system, missing rows are completed with the identity
/// constraint `α_{k+1}`, and every further clause is encoded, simplified
/// against the accumulated matrix, and merged. The first contradiction
/// short-circuits to UNSAT.
pub fn solve(cnf: &Cnf) -> SolveOutcome {
    let n = cnf.vars;
    let m = cnf.num_clauses();
    info!("problem: {} variables, {} clauses", n, m);

    let mut sys = System::new(n);
    if m > 0 {
        let first = encode_clause(cnf, 0);
        sys.h = first.h;
        sys.f = first.f;
        sys.g = first.g;
        sys.row_constraint[first.row] = true;
    }
    for k in 0..n {
        if !sys.h.has_row(k) {
            sys.h.toggle(k, var_index(k + 1, n));
        }
    }

    let mut max_levels = 0;
    let mut total_levels = 0;
    for c in 1..m {
        let clause = encode_clause(cnf, c);
        let cur_literal = cnf.max_var(c).max(2);

        // Snapshot of the system simplified below the clause's highest
        // variable. The projections are rebuilt from the unsimplified
        // matrix, not from the snapshot (see DESIGN.md).
        let mut h2 = simplify_matrix(&sys.h, n, cur_literal);
        let (f1, g1) = rebuild_projections(&sys.h, n);
        sys.f = f1;
        sys.g = g1;

        let reduced = simplify_vector(&sys.h, &clause.h.row_or_empty(clause.row), clause.row, n);
        h2.set_row(clause.row, reduced);
        let (f2, g2) = rebuild_projections(&h2, n);

        match merge(&mut sys, &h2, &f2, &g2, clause.row, n) {
            MergeOutcome::Contradiction => {
                info!("clause {} is incompatible with the system", c + 1);
                return SolveOutcome {
                    satisfiable: false,
                    system: sys,
                    max_levels,
                    total_levels,
                };
            }
            MergeOutcome::Consistent { levels } => {
                max_levels = max_levels.max(levels);
                total_levels += levels;
                debug!("clause {}: merged with {} recursion levels", c + 1, levels);
            }
        }
        if log_enabled!(Level::Debug) {
            log_row_population(&sys.h, n, c);
        }
    }

    info!("deepest merge recursion: {}", max_levels);
    info!("total recursive merges: {}", total_levels);
    SolveOutcome {
        satisfiable: true,
        system: sys,
        max_levels,
        total_levels,
    }
}

/// Merge a saved matrix with a single-row vector constraint.
///
/// The per-row constraint flags are inferred from row occupancy; a row
/// holding exactly one monomial is taken to be an identity placeholder and
/// counts as unconstrained.
pub fn merge_vector(h1: &RowMatrix, row: usize, v: &SparsePoly, n: usize) -> SolveOutcome {
    let mut sys = System::new(n);
    for l in 0..n {
        sys.row_constraint[l] = h1.row_len(l) > 1;
    }
    sys.h = simplify_matrix(h1, n, n);
    let (f1, g1) = rebuild_projections(&sys.h, n);
    sys.f = f1;
    sys.g = g1;

    let mut h2 = sys.h.clone();
    let reduced = simplify_vector(&sys.h, v, row, n);
    h2.set_row(row, reduced);
    let (f2, g2) = rebuild_projections(&h2, n);

    match merge(&mut sys, &h2, &f2, &g2, row, n) {
        MergeOutcome::Contradiction => {
            info!("the vector cannot be merged into the matrix");
            SolveOutcome {
                satisfiable: false,
                system: sys,
                max_levels: 0,
                total_levels: 0,
            }
        }
        MergeOutcome::Consistent { levels } => SolveOutcome {
            satisfiable: true,
            system: sys,
            max_levels: levels,
            total_levels: levels,
        },
    }
}

fn log_row_population(h: &RowMatrix, n: usize, c: usize) {
    let mut max_len = 0;
    let mut max_row = 0;
    for r in 0..n {
        let len = h.row_len(r);
        debug!(
            "clause {}: row {}: {} monomials | {}",
            c + 1,
            r + 1,
            len,
            h.row_or_empty(r).alphas(n)
        );
        if len > max_len {
            max_len = len;
            max_row = r + 1;
        }
    }
    debug!("clause {}: densest row {} ({} monomials)", c + 1, max_row, max_len);
}

#[cfg(test)]
mod tests {
    use trisat_algebra::algebra::highest_var_in;

    use super::*;
    use crate::enumerate::{brute_force_solutions, for_each_solution};

    fn solutions(cnf: &Cnf) -> Option<Vec<Vec<u8>>> {
        let outcome = solve(cnf);
        if !outcome.satisfiable {
            return None;
        }
        let mut found = Vec::new();
        for_each_solution(&outcome.system.h, cnf.vars, &mut |alpha| {
            found.push(alpha.to_vec());
        });
        Some(found)
    }

    /// One satisfiable clause over three variables: everything but (0,0,0).
    #[test]
    fn single_clause_has_seven_solutions() {
        let cnf = Cnf::parse("p cnf 3 1\n1 2 3 0\n".as_bytes()).unwrap();
        let sols = solutions(&cnf).unwrap();
        assert_eq!(sols.len(), 7);
        assert!(!sols.contains(&vec![0, 0, 0]));
        for sol in &sols {
            assert!(cnf.satisfied_by(sol));
        }
    }

    /// x and ¬x as degenerate clauses: unsatisfiable.
    #[test]
    fn opposite_units_are_unsat() {
        let cnf = Cnf::parse("p cnf 1 2\n1 1 1 0\n-1 -1 -1 0\n".as_bytes()).unwrap();
        assert!(solutions(&cnf).is_none());
    }

    /// Three chained clauses, checked against the brute-force ground truth.
    #[test]
    fn chain_matches_brute_force() {
        let cnf = Cnf::parse("p cnf 3 3\n1 2 3 0\n-1 2 3 0\n1 -2 3 0\n".as_bytes()).unwrap();
        let mut sols = solutions(&cnf).unwrap();
        sols.sort();

        let mut expected = Vec::new();
        for bits in 0..8u32 {
            let alpha: Vec<u8> = (0..3).map(|i| (bits >> i & 1) as u8).collect();
            if cnf.satisfied_by(&alpha) {
                expected.push(alpha);
            }
        }
        expected.sort();
        assert_eq!(sols, expected);
        // α₃ = 1 throughout, plus the lone (1, 1, 0).
        assert_eq!(expected.len(), 5);
        assert!(expected.contains(&vec![1, 1, 0]));
        assert!(expected.iter().filter(|a| a[2] == 1).count() == 4);
    }

    /// All eight sign patterns over three variables: unsatisfiable.
    #[test]
    fn all_sign_patterns_are_unsat() {
        let text = "p cnf 3 8\n\
                    1 2 3 0\n1 2 -3 0\n1 -2 3 0\n1 -2 -3 0\n\
                    -1 2 3 0\n-1 2 -3 0\n-1 -2 3 0\n-1 -2 -3 0\n";
        let cnf = Cnf::parse(text.as_bytes()).unwrap();
        assert!(solutions(&cnf).is_none());
    }

    /// Constrained rows never reference a variable above their own.
    #[test]
    fn rows_stay_triangular() {
        let cnf = Cnf::parse("p cnf 3 3\n1 2 3 0\n-1 2 3 0\n1 -2 3 0\n".as_bytes()).unwrap();
        let outcome = solve(&cnf);
        assert!(outcome.satisfiable);
        for r in 0..cnf.vars {
            if outcome.system.row_constraint[r] {
                let row = outcome.system.h.row_or_empty(r);
                assert!(highest_var_in(&row, cnf.vars) <= r + 1, "row {r}");
            }
        }
    }

    /// The pruned enumeration agrees with the exhaustive scan of H.
    #[test]
    fn tree_walk_matches_exhaustive_scan() {
        let cnf = Cnf::parse("p cnf 3 2\n1 2 3 0\n-1 -2 3 0\n".as_bytes()).unwrap();
        let outcome = solve(&cnf);
        assert!(outcome.satisfiable);
        let mut walked = Vec::new();
        for_each_solution(&outcome.system.h, cnf.vars, &mut |alpha| {
            walked.push(alpha.to_vec());
        });
        walked.sort();
        let mut scanned = brute_force_solutions(&outcome.system.h, cnf.vars);
        scanned.sort();
        assert_eq!(walked, scanned);
        for sol in &walked {
            assert!(cnf.satisfied_by(sol));
        }
    }

    /// A formula with no clauses constrains nothing.
    #[test]
    fn empty_formula_is_free() {
        let cnf = Cnf::parse("p cnf 2 0\n".as_bytes()).unwrap();
        let sols = solutions(&cnf).unwrap();
        assert_eq!(sols.len(), 4);
    }
}
