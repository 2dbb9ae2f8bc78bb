//! Sparse polynomials over GF(2).

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, AddAssign};

use itertools::Itertools;
use num::{BigUint, Zero};
use serde::{Deserialize, Serialize};

use crate::index::{decode, var_index};

/// A polynomial over GF(2), stored as the set of its monomial indices.
///
/// The represented value is `∑ m_i mod 2`, so inserting a monomial twice
/// cancels it. Traversal order is the numeric order of the indices, which
/// keeps every derived computation deterministic.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SparsePoly {
    pub terms: BTreeSet<BigUint>,
}

impl SparsePoly {
    pub fn new() -> Self {
        Self::default()
    }

    /// The constant polynomial `1`.
    pub fn constant() -> Self {
        let mut p = Self::new();
        p.toggle(BigUint::zero());
        p
    }

    /// The single-variable polynomial `α_k`.
    pub fn variable(k: usize, n: usize) -> Self {
        let mut p = Self::new();
        p.toggle(var_index(k, n));
        p
    }

    /// Add one monomial mod 2: insert it if absent, cancel it if present.
    pub fn toggle(&mut self, m: BigUint) {
        if !self.terms.insert(m.clone()) {
            self.terms.remove(&m);
        }
    }

    pub fn contains(&self, m: &BigUint) -> bool {
        self.terms.contains(m)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BigUint> {
        self.terms.iter()
    }

    /// Render the monomials as products of `α`s, e.g. `1 a1a3 a2`.
    pub fn alphas(&self, n: usize) -> String {
        self.iter()
            .map(|m| {
                let bits = decode(m, n);
                if bits[0] == 1 {
                    "1".to_string()
                } else {
                    (1..=n).filter(|&k| bits[k] == 1).map(|k| format!("a{k}")).collect()
                }
            })
            .join(" ")
    }
}

impl FromIterator<BigUint> for SparsePoly {
    fn from_iter<I: IntoIterator<Item = BigUint>>(iter: I) -> Self {
        let mut p = Self::new();
        for m in iter {
            p.toggle(m);
        }
        p
    }
}

impl AddAssign<&Self> for SparsePoly {
    fn add_assign(&mut self, rhs: &Self) {
        for m in rhs.iter() {
            self.toggle(m.clone());
        }
    }
}

impl Add for &SparsePoly {
    type Output = SparsePoly;

    fn add(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl fmt::Display for SparsePoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use num::bigint::RandBigInt;
    use rand::{thread_rng, Rng};

    use super::*;

    fn rand_poly(rng: &mut impl Rng, n: usize) -> SparsePoly {
        (0..rng.gen_range(0..20))
            .map(|_| rng.gen_biguint(n as u64))
            .collect()
    }

    #[test]
    fn toggle_cancels() {
        let mut p = SparsePoly::new();
        p.toggle(BigUint::from(5u32));
        p.toggle(BigUint::from(5u32));
        assert!(p.is_empty());
    }

    #[test]
    fn self_sum_is_empty() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let p = rand_poly(&mut rng, 12);
            assert!((&p + &p).is_empty());
        }
    }

    #[test]
    fn addition_is_commutative_and_associative() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let p = rand_poly(&mut rng, 12);
            let q = rand_poly(&mut rng, 12);
            let r = rand_poly(&mut rng, 12);
            assert_eq!(&p + &q, &q + &p);
            assert_eq!(&(&p + &q) + &r, &p + &(&q + &r));
        }
    }

    #[test]
    fn empty_is_additive_identity() {
        let mut rng = thread_rng();
        let p = rand_poly(&mut rng, 8);
        assert_eq!(&p + &SparsePoly::new(), p);
    }

    #[test]
    fn alphas_rendering() {
        let n = 3;
        let mut p = SparsePoly::constant();
        p.toggle(var_index(1, n) | var_index(3, n));
        assert_eq!(p.alphas(n), "1 a1a3");
    }
}
