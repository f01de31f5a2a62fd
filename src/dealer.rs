use std::collections::HashSet;

use num_bigint::BigUint;
use rayon::prelude::*;
use tracing::debug;

use crate::commitment::{commit_coefficients, encode_commitments};
use crate::error::{PvssError, Result};
use crate::group::Group;
use crate::hash::{mask, DIGEST_LEN};
use crate::nizk::prove_new;
use crate::randutil::sample_scalar;
use crate::shamir::Polynomial;
use crate::types::{DistributionBox, GroupParameters, Share};

const MAX_SECRET_BITS: u64 = (DIGEST_LEN * 8) as u64;

/// Split `secret` among `public_keys` so that any `threshold` of them can
/// recover it. Recipient i (0-based) gets position i + 1.
pub fn distribute<G: Group>(
    params: &GroupParameters<G>,
    secret: &BigUint,
    public_keys: &[Vec<u8>],
    threshold: usize,
) -> Result<DistributionBox> {
    if threshold == 0 {
        return Err(PvssError::InvalidThreshold);
    }
    if public_keys.len() < threshold {
        return Err(PvssError::InsufficientRecipients {
            have: public_keys.len(),
            need: threshold,
        });
    }
    let poly = Polynomial::new(threshold - 1, params.order());
    distribute_with_polynomial(params, secret, public_keys, &poly)
}

/// Distribution over a caller-chosen polynomial; its degree fixes the
/// threshold at degree + 1. Keys may arrive in any encoding the group
/// decodes; shares carry the group's canonical encoding.
pub fn distribute_with_polynomial<G: Group>(
    params: &GroupParameters<G>,
    secret: &BigUint,
    public_keys: &[Vec<u8>],
    poly: &Polynomial,
) -> Result<DistributionBox> {
    let group = &params.group;
    let n = params.order();
    let threshold = poly.degree() + 1;

    if public_keys.len() < threshold {
        return Err(PvssError::InsufficientRecipients {
            have: public_keys.len(),
            need: threshold,
        });
    }
    if secret.bits() > MAX_SECRET_BITS {
        return Err(PvssError::SecretTooLarge {
            bits: secret.bits(),
            max: MAX_SECRET_BITS,
        });
    }

    let mut recipients = Vec::with_capacity(public_keys.len());
    let mut seen = HashSet::with_capacity(public_keys.len());
    for (i, pk) in public_keys.iter().enumerate() {
        let position = u32::try_from(i + 1).map_err(|_| PvssError::OutOfRange { what: "position" })?;
        let point = group.decode(pk)?;
        let canonical = group.encode(&point);
        if !seen.insert(canonical.clone()) {
            return Err(PvssError::DuplicateRecipient(position));
        }
        recipients.push((position, canonical, point));
    }

    // C_j := a_j·H
    let commitments = commit_coefficients(params, poly);

    let shares = recipients
        .par_iter()
        .map(|(position, pk_bytes, pk)| -> Result<Share> {
            let p_i = poly.evaluate(&BigUint::from(*position), n);
            let w_i = sample_scalar(n);
            // binds p_i to both p_i·H (the evaluated commitment) and p_i·pk (the encrypted share)
            let (dleq, proof) = prove_new(params, params.h.clone(), pk.clone(), &p_i, &w_i)?;
            Ok(Share::new(pk_bytes.clone(), *position, group.encode(&dleq.h2), proof))
        })
        .collect::<Result<Vec<Share>>>()?;

    // U := s XOR H(a_0·G)
    let anchor = group.mul(&params.g, &poly.coefficients()[0]);
    let u = secret ^ &mask(group, &anchor)?;

    debug!(
        group = group.name(),
        threshold,
        recipients = shares.len(),
        "distributed secret"
    );

    Ok(DistributionBox {
        commitments: encode_commitments(params, &commitments),
        shares,
        u,
    })
}
