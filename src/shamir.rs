use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{PvssError, Result};
use crate::randutil::sample_below;
use crate::scalar::{mod_inverse, mod_sub};

/// Polynomial over Z_n represented by coefficients [c0, c1, ..., c_degree].
/// c0 anchors the encapsulated secret.
#[derive(Clone)]
pub struct Polynomial {
    coeffs: Vec<BigUint>,
}

impl Polynomial {
    /// Random polynomial of the given degree, coefficients uniform in [0, n).
    pub fn new(degree: usize, n: &BigUint) -> Self {
        let coeffs = (0..=degree).map(|_| sample_below(n)).collect();
        Polynomial { coeffs }
    }

    /// Polynomial with fixed coefficients, reduced mod n.
    pub fn from_coefficients(coeffs: Vec<BigUint>, n: &BigUint) -> Result<Self> {
        if coeffs.is_empty() {
            return Err(PvssError::InvalidThreshold);
        }
        Ok(Polynomial {
            coeffs: coeffs.into_iter().map(|c| c % n).collect(),
        })
    }

    pub fn coefficients(&self) -> &[BigUint] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Horner evaluation mod n.
    pub fn evaluate(&self, x: &BigUint, n: &BigUint) -> BigUint {
        self.coeffs
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, c| (acc * x + c) % n)
    }
}

// Coefficients are the dealer's secret; keep them out of logs.
impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polynomial")
            .field("degree", &self.degree())
            .finish_non_exhaustive()
    }
}

/// Lagrange coefficient at zero, λ_i = Π_{j∈SS\{i}} j/(j-i) mod n.
pub fn lagrange_coeff(i: u32, ss: &[u32], n: &BigUint) -> Result<BigUint> {
    let i_s = BigUint::from(i);
    let mut num = BigUint::one();
    let mut den = BigUint::one();
    for &j in ss {
        if j == i {
            continue;
        }
        let j_s = BigUint::from(j);
        num = (num * &j_s) % n;
        den = (den * mod_sub(&j_s, &i_s, n)) % n;
    }
    Ok((num * mod_inverse(&den, n)?) % n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(x: u64) -> BigUint {
        BigUint::from(x)
    }

    #[test]
    fn evaluate_at_zero_is_constant_term() {
        let n = b(1_000_003);
        for degree in 0..5 {
            let poly = Polynomial::new(degree, &n);
            assert_eq!(poly.coefficients().len(), degree + 1);
            assert_eq!(poly.evaluate(&b(0), &n), poly.coefficients()[0]);
        }
    }

    #[test]
    fn horner_matches_known_value() {
        // 3 + 2x + x^2 at x = 2 is 11 = 4 mod 7
        let n = b(7);
        let poly = Polynomial::from_coefficients(vec![b(3), b(2), b(1)], &n).unwrap();
        assert_eq!(poly.evaluate(&b(2), &n), b(4));
        assert_eq!(poly.degree(), 2);
    }

    #[test]
    fn degree_zero_is_constant_everywhere() {
        let n = b(101);
        let poly = Polynomial::from_coefficients(vec![b(42)], &n).unwrap();
        for x in 0..10 {
            assert_eq!(poly.evaluate(&b(x), &n), b(42));
        }
    }

    #[test]
    fn empty_coefficients_rejected() {
        assert!(Polynomial::from_coefficients(vec![], &b(7)).is_err());
    }

    #[test]
    fn lagrange_interpolates_constant_term() {
        let n = b(1_000_003);
        let poly = Polynomial::new(2, &n);
        let ss = [1u32, 3, 4];
        let mut acc = BigUint::zero();
        for &i in &ss {
            let l = lagrange_coeff(i, &ss, &n).unwrap();
            acc = (acc + l * poly.evaluate(&b(i as u64), &n)) % &n;
        }
        assert_eq!(acc, poly.coefficients()[0]);
    }

    #[test]
    fn lagrange_congruent_positions_not_invertible() {
        // 102 ≡ 1 mod 101, so j - i vanishes.
        let n = b(101);
        assert_eq!(
            lagrange_coeff(1, &[1, 102], &n),
            Err(PvssError::NotInvertible)
        );
    }
}
