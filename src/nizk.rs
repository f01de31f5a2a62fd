//! Chaum-Pedersen proof that log_G1(H1) = log_G2(H2), made non-interactive
//! with Fiat-Shamir over H(H1, H2, A1, A2).

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PvssError, Result};
use crate::group::Group;
use crate::hash::challenge;
use crate::scalar::{check_open_range, mod_sub};
use crate::types::GroupParameters;

/// Proof π := (c, r). The statement (G1, H1, G2, H2) is not carried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DleqProof {
    pub challenge: BigUint,
    pub response: BigUint,
}

/// Statement H1 = α·G1, H2 = α·G2.
#[derive(Clone, Debug)]
pub struct Dleq<G: Group> {
    pub g1: G::Element,
    pub h1: G::Element,
    pub g2: G::Element,
    pub h2: G::Element,
}

impl<G: Group> Dleq<G> {
    /// Statement with H1, H2 computed from α.
    pub fn new(params: &GroupParameters<G>, g1: G::Element, g2: G::Element, alpha: &BigUint) -> Result<Self> {
        check_open_range(alpha, params.order(), "alpha")?;
        let h1 = params.group.mul(&g1, alpha);
        let h2 = params.group.mul(&g2, alpha);
        Ok(Dleq { g1, h1, g2, h2 })
    }

    /// Statement over externally supplied H1, H2.
    pub fn from_publics(g1: G::Element, h1: G::Element, g2: G::Element, h2: G::Element) -> Self {
        Dleq { g1, h1, g2, h2 }
    }

    /// Prove with nonce w; both w and α must lie in (0, n).
    pub fn prove(&self, params: &GroupParameters<G>, w: &BigUint, alpha: &BigUint) -> Result<DleqProof> {
        let group = &params.group;
        let n = params.order();
        check_open_range(w, n, "nonce")?;
        check_open_range(alpha, n, "alpha")?;

        // A1 := w·G1, A2 := w·G2
        let a1 = group.mul(&self.g1, w);
        let a2 = group.mul(&self.g2, w);

        let c = challenge(group, &self.h1, &self.h2, &a1, &a2)?;
        if c.is_zero() {
            return Err(PvssError::ChallengeDegenerate);
        }

        // r := w - α·c mod n
        let r = mod_sub(w, &((alpha * &c) % n), n);
        if r.is_zero() {
            return Err(PvssError::OutOfRange { what: "response" });
        }

        Ok(DleqProof {
            challenge: c,
            response: r,
        })
    }

    /// Accept iff H(H1, H2, r·G1 + c·H1, r·G2 + c·H2) = c.
    /// Out-of-range c or r is an error, not a rejection.
    pub fn verify(&self, params: &GroupParameters<G>, proof: &DleqProof) -> Result<bool> {
        let group = &params.group;
        let n = params.order();
        check_open_range(&proof.challenge, n, "challenge")?;
        check_open_range(&proof.response, n, "response")?;

        let a1 = group.add(
            &group.mul(&self.g1, &proof.response),
            &group.mul(&self.h1, &proof.challenge),
        );
        let a2 = group.add(
            &group.mul(&self.g2, &proof.response),
            &group.mul(&self.h2, &proof.challenge),
        );

        match challenge(group, &self.h1, &self.h2, &a1, &a2) {
            Ok(c) => Ok(c == proof.challenge),
            Err(PvssError::IdentityElement) => {
                debug!("dleq commitment collapsed to identity");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// DLEQ over (G1, α·G1, G2, α·G2): returns the statement and its proof.
pub fn prove_new<G: Group>(
    params: &GroupParameters<G>,
    g1: G::Element,
    g2: G::Element,
    alpha: &BigUint,
    w: &BigUint,
) -> Result<(Dleq<G>, DleqProof)> {
    let dleq = Dleq::new(params, g1, g2, alpha)?;
    let proof = dleq.prove(params, w, alpha)?;
    Ok((dleq, proof))
}

/// DLEQ over caller-supplied H1, H2.
pub fn prove_for_known_publics<G: Group>(
    params: &GroupParameters<G>,
    g1: G::Element,
    h1: G::Element,
    g2: G::Element,
    h2: G::Element,
    w: &BigUint,
    alpha: &BigUint,
) -> Result<DleqProof> {
    Dleq::from_publics(g1, h1, g2, h2).prove(params, w, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::{setup_p256, setup_ristretto};
    use crate::randutil::sample_scalar;
    use num_traits::ToPrimitive;

    fn valid_proof_verifies<G: Group>(params: GroupParameters<G>) {
        let n = params.order().clone();
        let alpha = sample_scalar(&n);
        let w = sample_scalar(&n);
        let (dleq, proof) = prove_new(&params, params.g.clone(), params.h.clone(), &alpha, &w).unwrap();

        assert_eq!(dleq.h1, params.group.mul(&params.g, &alpha));
        assert_eq!(dleq.h2, params.group.mul(&params.h, &alpha));
        assert!(dleq.verify(&params, &proof).unwrap());

        let again = Dleq::from_publics(dleq.g1.clone(), dleq.h1.clone(), dleq.g2.clone(), dleq.h2.clone());
        assert!(again.verify(&params, &proof).unwrap());
    }

    fn forged_proof_rejected<G: Group>(params: GroupParameters<G>) {
        let n = params.order().clone();
        let alpha = sample_scalar(&n);
        let dleq = Dleq::new(&params, params.g.clone(), params.h.clone(), &alpha).unwrap();
        for _ in 0..8 {
            let forged = DleqProof {
                challenge: sample_scalar(&n),
                response: sample_scalar(&n),
            };
            assert!(!dleq.verify(&params, &forged).unwrap());
        }
    }

    fn unequal_logs_rejected<G: Group>(params: GroupParameters<G>) {
        let n = params.order().clone();
        let alpha = sample_scalar(&n);
        let beta = sample_scalar(&n);
        let w = sample_scalar(&n);
        let h1 = params.group.mul(&params.g, &alpha);
        let h2 = params.group.mul(&params.h, &beta);
        let proof =
            prove_for_known_publics(&params, params.g.clone(), h1.clone(), params.h.clone(), h2.clone(), &w, &alpha)
                .unwrap();
        let dleq = Dleq::from_publics(params.g.clone(), h1, params.h.clone(), h2);
        assert!(!dleq.verify(&params, &proof).unwrap());
    }

    fn tampered_response_rejected<G: Group>(params: GroupParameters<G>) {
        let n = params.order().clone();
        let alpha = sample_scalar(&n);
        let w = sample_scalar(&n);
        let (dleq, proof) = prove_new(&params, params.g.clone(), params.h.clone(), &alpha, &w).unwrap();
        let tampered = DleqProof {
            challenge: proof.challenge.clone(),
            response: (&proof.response + 1u32) % &n,
        };
        assert!(!dleq.verify(&params, &tampered).unwrap_or(false));
    }

    #[test]
    fn dleq_valid_p256() {
        valid_proof_verifies(setup_p256().unwrap());
    }

    #[test]
    fn dleq_valid_ristretto() {
        valid_proof_verifies(setup_ristretto().unwrap());
    }

    #[test]
    fn dleq_forged_p256() {
        forged_proof_rejected(setup_p256().unwrap());
    }

    #[test]
    fn dleq_forged_ristretto() {
        forged_proof_rejected(setup_ristretto().unwrap());
    }

    #[test]
    fn dleq_unequal_logs_p256() {
        unequal_logs_rejected(setup_p256().unwrap());
    }

    #[test]
    fn dleq_unequal_logs_ristretto() {
        unequal_logs_rejected(setup_ristretto().unwrap());
    }

    #[test]
    fn dleq_tampered_response_p256() {
        tampered_response_rejected(setup_p256().unwrap());
    }

    #[test]
    fn dleq_tampered_response_ristretto() {
        tampered_response_rejected(setup_ristretto().unwrap());
    }

    /// Order-11 subgroup of Z_23^*, generated by 2. Small enough that a
    /// zero challenge or a zero response turns up among a handful of nonces.
    #[derive(Clone, Debug)]
    struct Z23 {
        order: BigUint,
    }

    const P: u64 = 23;

    impl Group for Z23 {
        type Element = u64;

        fn name(&self) -> &'static str {
            "z23"
        }

        fn order(&self) -> &BigUint {
            &self.order
        }

        fn generator(&self) -> u64 {
            2
        }

        fn identity(&self) -> u64 {
            1
        }

        fn add(&self, a: &u64, b: &u64) -> u64 {
            a * b % P
        }

        fn mul(&self, p: &u64, k: &BigUint) -> u64 {
            BigUint::from(*p)
                .modpow(&(k % &self.order), &BigUint::from(P))
                .to_u64()
                .unwrap()
        }

        fn hash_bytes(&self, p: &u64) -> Option<Vec<u8>> {
            (*p != 1).then(|| crate::scalar::to_fixed_be(&BigUint::from(*p), 32).unwrap())
        }

        fn encode(&self, p: &u64) -> Vec<u8> {
            p.to_be_bytes().to_vec()
        }

        fn decode_any(&self, bytes: &[u8]) -> Result<u64> {
            let raw: [u8; 8] = bytes
                .try_into()
                .map_err(|_| PvssError::InvalidEncoding("want 8 bytes".into()))?;
            Ok(u64::from_be_bytes(raw))
        }
    }

    #[test]
    fn small_group_hits_degenerate_challenge_and_zero_response() {
        let params = GroupParameters::new(Z23 { order: BigUint::from(11u32) }, 8).unwrap();
        let (mut degenerate, mut zero_response, mut valid) = (0, 0, 0);
        for alpha in 1..11u32 {
            let alpha = BigUint::from(alpha);
            let dleq = Dleq::new(&params, params.g, params.h, &alpha).unwrap();
            for w in 1..11u32 {
                match dleq.prove(&params, &BigUint::from(w), &alpha) {
                    Ok(proof) => {
                        assert!(dleq.verify(&params, &proof).unwrap());
                        valid += 1;
                    }
                    Err(PvssError::ChallengeDegenerate) => degenerate += 1,
                    Err(PvssError::OutOfRange { what: "response" }) => zero_response += 1,
                    Err(e) => panic!("unexpected error: {e}"),
                }
            }
        }
        assert!(degenerate > 0);
        assert!(zero_response > 0);
        assert_eq!(degenerate + zero_response + valid, 100);
    }

    #[test]
    fn same_statement_proved_twice_differs() {
        let params = setup_p256().unwrap();
        let n = params.order().clone();
        let alpha = sample_scalar(&n);
        let dleq = Dleq::new(&params, params.g, params.h, &alpha).unwrap();
        let first = dleq.prove(&params, &sample_scalar(&n), &alpha).unwrap();
        let second = dleq.prove(&params, &sample_scalar(&n), &alpha).unwrap();
        assert_ne!(first.challenge, second.challenge);
        assert_ne!(first.response, second.response);
        assert!(dleq.verify(&params, &first).unwrap());
        assert!(dleq.verify(&params, &second).unwrap());
    }

    #[test]
    fn out_of_range_inputs_rejected() {
        let params = setup_ristretto().unwrap();
        let n = params.order().clone();
        let alpha = sample_scalar(&n);

        assert_eq!(
            Dleq::new(&params, params.g, params.h, &BigUint::zero()).unwrap_err(),
            PvssError::OutOfRange { what: "alpha" }
        );
        assert_eq!(
            Dleq::new(&params, params.g, params.h, &n).unwrap_err(),
            PvssError::OutOfRange { what: "alpha" }
        );

        let dleq = Dleq::new(&params, params.g, params.h, &alpha).unwrap();
        assert_eq!(
            dleq.prove(&params, &BigUint::zero(), &alpha).unwrap_err(),
            PvssError::OutOfRange { what: "nonce" }
        );
        assert_eq!(
            dleq.prove(&params, &n, &alpha).unwrap_err(),
            PvssError::OutOfRange { what: "nonce" }
        );

        let bad_c = DleqProof {
            challenge: BigUint::zero(),
            response: BigUint::from(1u32),
        };
        assert!(dleq.verify(&params, &bad_c).is_err());
        let bad_r = DleqProof {
            challenge: BigUint::from(1u32),
            response: n.clone(),
        };
        assert!(dleq.verify(&params, &bad_r).is_err());
    }
}
