//! Gauss-like elimination in the polynomial algebra.

use trisat_algebra::algebra::{highest_var_in, mul, split};
use trisat_algebra::matrix::RowMatrix;
use trisat_algebra::poly::SparsePoly;

/// One elimination step: substitute the stipulation `α_{j+1} = H[j]` into
/// `v`. With `(v₀, v₁)` the projections of `v` along `α_{j+1}`, the result
/// is `(v₀ ⊕ v₁)·H[j] ⊕ v₀`; an empty row leaves just `v₀`.
fn eliminate(h: &RowMatrix, v: &SparsePoly, j: usize, n: usize) -> SparsePoly {
    let (v0, v1) = split(v, j + 1, n);
    match h.row(j) {
        Some(row) if !row.is_empty() => &mul(&(&v0 + &v1), row) + &v0,
        _ => v0,
    }
}

/// Eliminate the variables `α₁..α_r` from `v` using the first `r` rows of
/// `h`.
pub fn simplify_vector(h: &RowMatrix, v: &SparsePoly, r: usize, n: usize) -> SparsePoly {
    let mut out = v.clone();
    for j in 0..r {
        out = eliminate(h, &out, j, n);
    }
    out
}

/// Re-express the rows of `h` below `up_to` against their earlier rows,
/// each against the *input* matrix state. Rows at or above `up_to`, and
/// empty rows, come out empty. The first row that was simplified is then
/// restored to its input state, keeping the anchor row intact.
pub fn simplify_matrix(h: &RowMatrix, n: usize, up_to: usize) -> RowMatrix {
    let mut out = RowMatrix::new();
    let mut first_row = None;
    for r in 0..n {
        if h.row_len(r) > 0 && r < up_to {
            let reduced = simplify_vector(h, h.row(r).unwrap(), r, n);
            debug_assert!(
                highest_var_in(&reduced, n) <= r + 1,
                "simplified row {r} references a variable above α_{}",
                r + 1
            );
            out.set_row(r, reduced);
            if first_row.is_none() {
                first_row = Some(r);
            }
        } else {
            out.set_row(r, SparsePoly::new());
        }
    }
    if let Some(r) = first_row {
        out.set_row(r, h.row_or_empty(r));
    }
    out
}

/// Split every row of `h` along its own variable `α_{r+1}`, producing the
/// projection matrices `(F, G)`.
pub fn rebuild_projections(h: &RowMatrix, n: usize) -> (RowMatrix, RowMatrix) {
    let mut f = RowMatrix::new();
    let mut g = RowMatrix::new();
    for r in 0..n {
        let row = h.row_or_empty(r);
        let (i0, i1) = split(&row, r + 1, n);
        f.set_row(r, i0);
        g.set_row(r, i1);
    }
    (f, g)
}
