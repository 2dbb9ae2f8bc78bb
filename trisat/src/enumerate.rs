//! Enumerating the satisfying assignments of a constraint matrix.

use num::BigUint;
use trisat_algebra::algebra::{assignment_mask, eval};
use trisat_algebra::matrix::RowMatrix;

fn eval_row(h: &RowMatrix, r: usize, mask: &BigUint) -> u8 {
    h.row(r).map_or(0, |row| eval(row, mask))
}

/// Walk the binary decision tree over `α₁..αₙ`, pruning with the rows of
/// `h`, and call `emit` with each satisfying assignment in ascending
/// order. Returns the number of solutions.
///
/// At depth `d` the candidate values of `α_{d+1}` are screened by
/// evaluating row `d`: when the row value differs between the two
/// children both branches are explored, otherwise only the branch whose
/// value matches the row. The tree is traversed recursively; no node
/// structure is materialised.
pub fn for_each_solution<F: FnMut(&[u8])>(h: &RowMatrix, n: usize, emit: &mut F) -> usize {
    if n == 0 {
        return 0;
    }
    let mut alpha = vec![0u8; n + 1];
    alpha[0] = 1;
    let mut mask = BigUint::default();
    descend(h, n, 0, &mut alpha, &mut mask, emit)
}

fn descend<F: FnMut(&[u8])>(
    h: &RowMatrix,
    n: usize,
    depth: usize,
    alpha: &mut Vec<u8>,
    mask: &mut BigUint,
    emit: &mut F,
) -> usize {
    let var = depth + 1;
    let bit = (n - var) as u64;

    let h_left = eval_row(h, depth, mask);
    mask.set_bit(bit, true);
    let h_right = eval_row(h, depth, mask);
    mask.set_bit(bit, false);

    let (take_left, take_right) = if h_left != h_right {
        (true, true)
    } else if h_left == 0 {
        (true, false)
    } else {
        (false, true)
    };

    let mut count = 0;
    for (take, value) in [(take_left, 0u8), (take_right, 1u8)] {
        if !take {
            continue;
        }
        alpha[var] = value;
        mask.set_bit(bit, value == 1);
        if var == n {
            emit(&alpha[1..]);
            count += 1;
        } else {
            count += descend(h, n, depth + 1, alpha, mask, emit);
        }
        alpha[var] = 0;
        mask.set_bit(bit, false);
    }
    count
}

/// Exhaustive scan over all `2ⁿ` assignments: an assignment is a solution
/// when every row of `h` evaluates to the value of its own variable. A
/// cross-check for the tree walk, only meant for small `n`.
pub fn brute_force_solutions(h: &RowMatrix, n: usize) -> Vec<Vec<u8>> {
    assert!(n < usize::BITS as usize, "brute force scan is limited to small n");
    let mut found = Vec::new();
    for bits in 0..1usize << n {
        let mut alpha = vec![0u8; n + 1];
        alpha[0] = 1;
        for i in 1..=n {
            alpha[i] = (bits >> (i - 1) & 1) as u8;
        }
        let mask = assignment_mask(&alpha, n);
        if (0..n).all(|r| eval_row(h, r, &mask) == alpha[r + 1]) {
            found.push(alpha[1..].to_vec());
        }
    }
    found
}
