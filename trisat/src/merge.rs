//! Reconciling a new clause constraint with the accumulated system.

use log::{debug, trace};
use trisat_algebra::algebra::{highest_var_in, mul, split};
use trisat_algebra::matrix::RowMatrix;
use trisat_algebra::poly::SparsePoly;

use crate::simplify::simplify_vector;

/// The accumulated constraint system `(H₁, F₁, G₁)` together with the
/// per-row flags recording which rows already hold a non-trivial
/// constraint.
#[derive(Clone, Debug, Default)]
pub struct System {
    pub h: RowMatrix,
    pub f: RowMatrix,
    pub g: RowMatrix,
    pub row_constraint: Vec<bool>,
}

impl System {
    pub fn new(n: usize) -> Self {
        Self {
            h: RowMatrix::new(),
            f: RowMatrix::new(),
            g: RowMatrix::new(),
            row_constraint: vec![false; n],
        }
    }
}

/// Result of merging one constraint into the accumulated system.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
    /// The system stayed satisfiable; `levels` recursive merges were
    /// needed to settle residual constraints.
    Consistent { levels: usize },
    /// The new constraint contradicts the system.
    Contradiction,
}

/// Merge row `id` of the incoming `(H₂, F₂, G₂)` into `acc`.
///
/// A free row is taken over as-is. A collision combines the projections
/// into a replacement constraint; when the discrepancy polynomial
/// `(F₁ ⊕ F₂)·(G₁ ⊕ G₂)` does not simplify away against the system, the
/// residual is re-anchored at its highest variable and merged recursively,
/// strictly descending. A residual with no variable left is a
/// contradiction.
pub fn merge(
    acc: &mut System,
    h2: &RowMatrix,
    f2: &RowMatrix,
    g2: &RowMatrix,
    id: usize,
    n: usize,
) -> MergeOutcome {
    if !acc.row_constraint[id] {
        acc.h.set_row(id, h2.row_or_empty(id));
        acc.f.set_row(id, f2.row_or_empty(id));
        acc.g.set_row(id, g2.row_or_empty(id));
        acc.row_constraint[id] = true;
        return MergeOutcome::Consistent { levels: 0 };
    }

    debug!("constraint collision at row {}", id + 1);
    let p1 = acc.f.row_or_empty(id);
    let p2 = f2.row_or_empty(id);
    let q1 = acc.g.row_or_empty(id);
    let q2 = g2.row_or_empty(id);

    let f_sum = &p1 + &p2;
    let g_sum = &q1 + &q2;
    let f_prod = mul(&p1, &p2);
    let g_prod = mul(&q1, &q2);

    // F' = (F₁ ⊕ F₂)·(G₁·G₂) ⊕ F₁·F₂
    let f_new = &mul(&f_sum, &g_prod) + &f_prod;
    // G' = (G₁ ⊕ G₂)·(F₁ ⊕ F₂) ⊕ (G₁ ⊕ G₂)·(F₁·F₂) ⊕ G₁·G₂
    let g_new = &(&mul(&g_sum, &f_sum) + &mul(&g_sum, &f_prod)) + &g_prod;
    // H' = (1 ⊕ α)·F' ⊕ α·G' with α the row's own variable
    let alpha = SparsePoly::variable(id + 1, n);
    let alpha_p1 = &alpha + &SparsePoly::constant();
    let h_new = &mul(&alpha_p1, &f_new) + &mul(&alpha, &g_new);
    // Discrepancy between the two constraints
    let discrepancy = mul(&f_sum, &g_sum);

    acc.h.set_row(id, h_new);
    acc.f.set_row(id, f_new);
    acc.g.set_row(id, g_new);

    let max_row = highest_var_in(&discrepancy, n);
    let residual = simplify_vector(&acc.h, &discrepancy, max_row, n);
    trace!(
        "row {}: discrepancy {} -> residual {}",
        id + 1,
        discrepancy.alphas(n),
        residual.alphas(n)
    );
    if residual.is_empty() {
        return MergeOutcome::Consistent { levels: 0 };
    }

    let max_k = highest_var_in(&residual, n);
    if max_k == 0 {
        debug!("row {}: residual has no variable left", id + 1);
        return MergeOutcome::Contradiction;
    }
    debug!("row {}: residual constraint on α_{}, recursing", id + 1, max_k);

    let mut residual = residual;
    if acc.h.row_len(max_k - 1) > 0 {
        residual += &acc.h.row_or_empty(max_k - 1);
    }
    let (i0, i1) = split(&residual, max_k, n);
    let h2_next = RowMatrix::single(max_k - 1, residual);
    let f2_next = RowMatrix::single(max_k - 1, i0);
    let g2_next = RowMatrix::single(max_k - 1, i1);
    acc.h.remove_row(max_k - 1);

    match merge(acc, &h2_next, &f2_next, &g2_next, max_k - 1, n) {
        MergeOutcome::Consistent { levels } => MergeOutcome::Consistent { levels: levels + 1 },
        MergeOutcome::Contradiction => MergeOutcome::Contradiction,
    }
}
