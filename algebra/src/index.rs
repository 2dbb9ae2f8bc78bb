//! Monomial indices over the variables `α₁..αₙ`.
//!
//! A monomial `∏_{i∈S} α_i` with `S ⊆ {1..n}` is encoded as the integer
//! `∑_{i∈S} 2^(n−i)`, so the *smallest* variable index owns the *highest*
//! bit. Index `0` encodes the constant monomial `1`. The decoded form is a
//! bit vector of length `n+1` whose position `0` flags the constant; this
//! extra position is what lets the algebra tell the empty monomial apart
//! from a monomial that merely omits `α₁`.

use num::{BigUint, One, Zero};

/// Bit position of `α_k` inside an index, for `1 <= k <= n`.
#[inline]
fn bit_of(k: usize, n: usize) -> u64 {
    debug_assert!(k >= 1 && k <= n, "variable index {k} out of range 1..={n}");
    (n - k) as u64
}

/// The index of the single-variable monomial `α_k`, i.e. `2^(n−k)`.
pub fn var_index(k: usize, n: usize) -> BigUint {
    BigUint::one() << bit_of(k, n)
}

/// The index of `∏ α_k` over up to three variable slots, a slot of `0`
/// meaning "absent". All three absent yields the constant index `0`.
pub fn three_literal_index(i1: usize, i2: usize, i3: usize, n: usize) -> BigUint {
    let mut x = BigUint::zero();
    for k in [i1, i2, i3] {
        if k > 0 {
            x |= var_index(k, n);
        }
    }
    x
}

/// The `D` operator: decode an index into a bit vector of length `n+1`.
///
/// Position `0` holds `1` iff the monomial is the constant `1` (index `0`);
/// position `k ∈ {1..n}` holds `1` iff `α_k` divides the monomial.
pub fn decode(x: &BigUint, n: usize) -> Vec<u8> {
    let mut bits = vec![0u8; n + 1];
    if x.is_zero() {
        bits[0] = 1;
        return bits;
    }
    debug_assert!(x.bits() <= n as u64, "index references a variable below α₁");
    for k in 1..=n {
        if x.bit(bit_of(k, n)) {
            bits[k] = 1;
        }
    }
    bits
}

/// Re-encode a decoded bit vector. The constant flag at position `0` wins:
/// when set, the index is `0` regardless of the variable positions.
pub fn index_of_bits(bits: &[u8], n: usize) -> BigUint {
    debug_assert_eq!(bits.len(), n + 1);
    let mut x = BigUint::zero();
    if bits[0] == 1 {
        return x;
    }
    for k in 1..=n {
        if bits[k] == 1 {
            x |= var_index(k, n);
        }
    }
    x
}

/// Does `α_k` divide the monomial `x`?
pub fn contains_var(x: &BigUint, k: usize, n: usize) -> bool {
    x.bit(bit_of(k, n))
}

/// The monomial `x` with `α_k` removed.
pub fn without_var(x: &BigUint, k: usize, n: usize) -> BigUint {
    let mut out = x.clone();
    out.set_bit(bit_of(k, n), false);
    out
}

/// The highest variable index dividing `x`, or `0` for the constant.
pub fn highest_var(x: &BigUint, n: usize) -> usize {
    match x.trailing_zeros() {
        Some(p) => n - p as usize,
        None => 0,
    }
}
