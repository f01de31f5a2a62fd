// src/commitment.rs
//
// Feldman-style coefficient commitments under the auxiliary generator H.
// Anyone holding the commitments can evaluate them at a share position,
// which gives p(position)·H without learning p.

use num_bigint::BigUint;
use num_traits::One;

use crate::error::Result;
use crate::group::{linear_combination, Group};
use crate::shamir::Polynomial;
use crate::types::GroupParameters;

/// C_j := coefficient_j·H for every coefficient.
pub fn commit_coefficients<G: Group>(params: &GroupParameters<G>, poly: &Polynomial) -> Vec<G::Element> {
    poly.coefficients()
        .iter()
        .map(|a_j| params.group.mul(&params.h, a_j))
        .collect()
}

/// X_i := Σ_j (i^j mod n)·C_j.
pub fn evaluate_commitments<G: Group>(
    params: &GroupParameters<G>,
    commitments: &[G::Element],
    position: u32,
) -> G::Element {
    let n = params.order();
    let x = BigUint::from(position);
    let mut pow = BigUint::one();
    let mut terms = Vec::with_capacity(commitments.len());
    for c_j in commitments {
        terms.push((pow.clone(), c_j.clone()));
        pow = (pow * &x) % n;
    }
    linear_combination(&params.group, &terms)
}

pub fn encode_commitments<G: Group>(params: &GroupParameters<G>, commitments: &[G::Element]) -> Vec<Vec<u8>> {
    commitments.iter().map(|c| params.group.encode(c)).collect()
}

pub fn decode_commitments<G: Group>(params: &GroupParameters<G>, encoded: &[Vec<u8>]) -> Result<Vec<G::Element>> {
    encoded.iter().map(|c| params.group.decode_any(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::{setup_p256, setup_ristretto};

    fn evaluation_matches_polynomial<G: Group>(params: GroupParameters<G>) {
        let n = params.order().clone();
        let poly = Polynomial::new(3, &n);
        let coms = commit_coefficients(&params, &poly);
        assert_eq!(coms.len(), 4);

        for position in 1..=5u32 {
            let p_i = poly.evaluate(&BigUint::from(position), &n);
            assert_eq!(
                evaluate_commitments(&params, &coms, position),
                params.group.mul(&params.h, &p_i)
            );
        }

        // position 0 lands on the anchor commitment
        assert_eq!(evaluate_commitments(&params, &coms, 0), coms[0]);

        let decoded = decode_commitments(&params, &encode_commitments(&params, &coms)).unwrap();
        assert_eq!(decoded, coms);
    }

    #[test]
    fn evaluation_p256() {
        evaluation_matches_polynomial(setup_p256().unwrap());
    }

    #[test]
    fn evaluation_ristretto() {
        evaluation_matches_polynomial(setup_ristretto().unwrap());
    }
}
