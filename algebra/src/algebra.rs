//! Products, projections, and evaluation of GF(2) polynomials.

use num::{BigUint, Zero};

use crate::index::{contains_var, highest_var, without_var};
use crate::poly::SparsePoly;

/// Product of two polynomials modulo `α² = α`.
///
/// The product of two non-constant monomials is the bitwise OR of their
/// indices: a variable present in either factor is present once in the
/// product. The constant index `0` needs its own cases, since `0 | x = x`
/// would otherwise conflate `1·1` with `1·x`.
pub fn mul(p: &SparsePoly, q: &SparsePoly) -> SparsePoly {
    let mut out = SparsePoly::new();
    if p.is_empty() || q.is_empty() {
        return out;
    }
    for y in q.iter() {
        if y.is_zero() {
            for x in p.iter() {
                out.toggle(x.clone());
            }
        } else {
            for x in p.iter() {
                if x.is_zero() {
                    out.toggle(y.clone());
                } else {
                    out.toggle(x | y);
                }
            }
        }
    }
    out
}

/// Split `p` along `α_k` into `(I₀, I₁)`.
///
/// `I₀` keeps the monomials not divisible by `α_k`; `I₁` is the whole of
/// `p` with `α_k := 1`, i.e. divisible monomials lose the factor and the
/// rest carry over. Cancellation on collision is handled by the xor
/// insertion.
pub fn split(p: &SparsePoly, k: usize, n: usize) -> (SparsePoly, SparsePoly) {
    let mut i0 = SparsePoly::new();
    let mut i1 = SparsePoly::new();
    for m in p.iter() {
        if contains_var(m, k, n) {
            i1.toggle(without_var(m, k, n));
        } else {
            i0.toggle(m.clone());
            i1.toggle(m.clone());
        }
    }
    (i0, i1)
}

/// The highest variable index appearing anywhere in `p`, or `0` when `p`
/// is empty or constant.
pub fn highest_var_in(p: &SparsePoly, n: usize) -> usize {
    p.iter().map(|m| highest_var(m, n)).max().unwrap_or(0)
}

/// The index mask of an assignment: bit `n−i` is set iff `α_i = 1`.
/// `alpha[0]` is the constant slot and is ignored (it is always `1`).
pub fn assignment_mask(alpha: &[u8], n: usize) -> BigUint {
    let mut mask = BigUint::zero();
    for i in 1..=n {
        if alpha[i] == 1 {
            mask.set_bit((n - i) as u64, true);
        }
    }
    mask
}

/// Evaluate `p` under the assignment described by `mask`.
///
/// A monomial evaluates to `1` exactly when every variable it contains is
/// assigned `1`, i.e. when its index is covered by the mask; the constant
/// index `0` is covered by any mask. The value of `p` is the parity of the
/// evaluating monomials.
pub fn eval(p: &SparsePoly, mask: &BigUint) -> u8 {
    (p.iter().filter(|&m| m & mask == *m).count() % 2) as u8
}

#[cfg(test)]
mod tests {
    use num::bigint::RandBigInt;
    use rand::{thread_rng, Rng};

    use super::*;
    use crate::index::{three_literal_index, var_index};

    fn rand_poly(rng: &mut impl Rng, n: usize) -> SparsePoly {
        (0..rng.gen_range(0..16))
            .map(|_| rng.gen_biguint(n as u64))
            .collect()
    }

    #[test]
    fn monomial_is_idempotent() {
        let n = 6;
        let m = three_literal_index(2, 3, 5, n);
        let p: SparsePoly = [m.clone()].into_iter().collect();
        assert_eq!(mul(&p, &p), p);
    }

    #[test]
    fn empty_annihilates() {
        let mut rng = thread_rng();
        let p = rand_poly(&mut rng, 8);
        assert!(mul(&p, &SparsePoly::new()).is_empty());
        assert!(mul(&SparsePoly::new(), &p).is_empty());
    }

    #[test]
    fn constant_is_multiplicative_identity() {
        let mut rng = thread_rng();
        for _ in 0..20 {
            let p = rand_poly(&mut rng, 10);
            assert_eq!(mul(&SparsePoly::constant(), &p), p);
            assert_eq!(mul(&p, &SparsePoly::constant()), p);
        }
    }

    #[test]
    fn mul_is_commutative() {
        let mut rng = thread_rng();
        for _ in 0..20 {
            let p = rand_poly(&mut rng, 10);
            let q = rand_poly(&mut rng, 10);
            assert_eq!(mul(&p, &q), mul(&q, &p));
        }
    }

    /// Splitting along `α_k` and recombining as `(1 ⊕ α_k)·I₀ ⊕ α_k·I₁`
    /// recovers the original polynomial.
    #[test]
    fn split_round_trip() {
        let mut rng = thread_rng();
        let n = 10;
        for _ in 0..50 {
            let p = rand_poly(&mut rng, n);
            let k = rng.gen_range(1..=n);
            let (i0, i1) = split(&p, k, n);
            let alpha = SparsePoly::variable(k, n);
            let mut alpha_p1 = SparsePoly::constant();
            alpha_p1 += &alpha;
            let back = &mul(&alpha_p1, &i0) + &mul(&alpha, &i1);
            assert_eq!(back, p);
        }
    }

    #[test]
    fn split_halves_have_no_k() {
        let n = 5;
        let p: SparsePoly = [
            three_literal_index(1, 3, 5, n),
            three_literal_index(0, 3, 0, n),
            BigUint::zero(),
        ]
        .into_iter()
        .collect();
        let (i0, i1) = split(&p, 3, n);
        assert_eq!(highest_var_in(&i0, n), 0);
        for m in i0.iter().chain(i1.iter()) {
            assert!(!contains_var(m, 3, n) || m.is_zero());
        }
    }

    #[test]
    fn eval_counts_parity() {
        let n = 3;
        // p = 1 ⊕ α₁ ⊕ α₁α₃
        let p: SparsePoly = [
            BigUint::zero(),
            var_index(1, n),
            three_literal_index(1, 0, 3, n),
        ]
        .into_iter()
        .collect();
        // α = (1, 0, 1): 1 ⊕ 1 ⊕ 1 = 1
        let mask = assignment_mask(&[1, 1, 0, 1], n);
        assert_eq!(eval(&p, &mask), 1);
        // α = (0, 0, 0): only the constant survives.
        let mask = assignment_mask(&[1, 0, 0, 0], n);
        assert_eq!(eval(&p, &mask), 1);
        // α = (1, 0, 0): 1 ⊕ 1 = 0
        let mask = assignment_mask(&[1, 1, 0, 0], n);
        assert_eq!(eval(&p, &mask), 0);
    }
}
