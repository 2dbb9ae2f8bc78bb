//! Encoding one clause as a polynomial constraint triple.

use num::BigUint;
use trisat_algebra::algebra::{mul, split};
use trisat_algebra::index::{three_literal_index, var_index};
use trisat_algebra::matrix::RowMatrix;
use trisat_algebra::poly::SparsePoly;

use crate::cnf::Cnf;

/// The `(F, G, H)` triple of a single clause, anchored at the clause's
/// highest variable: `row` is that variable minus one, `h` holds the clause
/// polynomial there, `f` its projection at `α = 0` and `g` at `α = 1`.
/// `h` additionally carries one anchor row `α_x` per lower clause variable.
#[derive(Clone, Debug)]
pub struct ClauseSystem {
    pub row: usize,
    pub f: RowMatrix,
    pub g: RowMatrix,
    pub h: RowMatrix,
}

/// Encode clause `c` of `cnf`.
///
/// A clause with three distinct variables goes through the eight explicit
/// sign-pattern expansions of `(1 ⊕ n₁)(1 ⊕ n₂)(1 ⊕ n₃)` below, where `n`
/// is `1 ⊕ α` for a positive literal and `α` for a negative one. A clause
/// that collapsed to fewer distinct variables falls back to the closed
/// form `H = α_max ⊕ ∏ nᵢ`, which agrees with the tables on the ternary
/// case.
pub fn encode_clause(cnf: &Cnf, c: usize) -> ClauseSystem {
    let n = cnf.vars;
    let lits: Vec<(usize, i8)> = cnf.clauses[c]
        .iter()
        .enumerate()
        .filter(|(_, &s)| s != 0)
        .map(|(v, &s)| (v + 1, s))
        .collect();
    assert!(!lits.is_empty(), "clause {} has no literals", c + 1);

    let mut f = RowMatrix::new();
    let mut g = RowMatrix::new();
    let mut h = RowMatrix::new();

    // Anchor rows for the clause variables below the highest one.
    let (x_max, _) = *lits.last().unwrap();
    for &(x, _) in &lits[..lits.len() - 1] {
        h.toggle(x - 1, var_index(x, n));
    }
    let row = x_max - 1;

    if let [(x1, s1), (x2, s2), (x3, s3)] = lits[..] {
        let m123 = three_literal_index(x1, x2, x3, n);
        let m12 = three_literal_index(x1, x2, 0, n);
        let m13 = three_literal_index(x1, 0, x3, n);
        let m23 = three_literal_index(0, x2, x3, n);
        let m1 = three_literal_index(x1, 0, 0, n);
        let m2 = three_literal_index(0, x2, 0, n);
        let m3 = three_literal_index(0, 0, x3, n);
        let one = three_literal_index(0, 0, 0, n);

        let push = |dst: &mut RowMatrix, m: &BigUint| dst.toggle(row, m.clone());
        match (s1 > 0, s2 > 0, s3 > 0) {
            (true, true, true) => {
                for m in [&m123, &m12, &m13, &m23, &m1, &m2, &one] {
                    push(&mut h, m);
                }
                for m in [&m12, &m1, &m2, &one] {
                    push(&mut f, m);
                }
                push(&mut g, &one);
            }
            (true, true, false) => {
                for m in [&m123, &m13, &m23] {
                    push(&mut h, m);
                }
                for m in [&m12, &m1, &m2] {
                    push(&mut g, m);
                }
            }
            (true, false, true) => {
                for m in [&m123, &m12, &m23, &m2, &m3] {
                    push(&mut h, m);
                }
                for m in [&m12, &m2] {
                    push(&mut f, m);
                }
                push(&mut g, &one);
            }
            (true, false, false) => {
                for m in [&m123, &m23, &m3] {
                    push(&mut h, m);
                }
                for m in [&m12, &m2, &one] {
                    push(&mut g, m);
                }
            }
            (false, true, true) => {
                for m in [&m123, &m12, &m13, &m1, &m3] {
                    push(&mut h, m);
                }
                for m in [&m12, &m1] {
                    push(&mut f, m);
                }
                push(&mut g, &one);
            }
            (false, true, false) => {
                for m in [&m123, &m13, &m3] {
                    push(&mut h, m);
                }
                for m in [&m12, &m1, &one] {
                    push(&mut g, m);
                }
            }
            (false, false, true) => {
                for m in [&m123, &m12, &m3] {
                    push(&mut h, m);
                }
                push(&mut f, &m12);
                push(&mut g, &one);
            }
            (false, false, false) => {
                for m in [&m123, &m3] {
                    push(&mut h, m);
                }
                for m in [&m12, &one] {
                    push(&mut g, m);
                }
            }
        }
    } else {
        // Fewer than three distinct variables: H = α_max ⊕ ∏ nᵢ.
        let mut prod = SparsePoly::constant();
        for &(x, s) in &lits {
            let mut factor = SparsePoly::variable(x, n);
            if s > 0 {
                factor += &SparsePoly::constant();
            }
            prod = mul(&prod, &factor);
        }
        prod += &SparsePoly::variable(x_max, n);
        let (i0, i1) = split(&prod, x_max, n);
        f.set_row(row, i0);
        g.set_row(row, i1);
        h.set_row(row, prod);
    }

    ClauseSystem { row, f, g, h }
}
