//! Public verification. Nothing here needs a private key.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::warn;

use crate::commitment::{decode_commitments, evaluate_commitments};
use crate::error::{PvssError, Result};
use crate::group::Group;
use crate::nizk::Dleq;
use crate::types::{DecryptedShare, DistributionBox, GroupParameters, Share};

/// Check box shape, then every share's DLEQ against the evaluated
/// commitments. Reports the first failing position in recipient order.
pub fn check_distribution<G: Group>(params: &GroupParameters<G>, dbox: &DistributionBox) -> Result<()> {
    if dbox.commitments.is_empty() {
        return Err(PvssError::MalformedBox("no commitments"));
    }
    if dbox.shares.is_empty() {
        return Err(PvssError::MalformedBox("no shares"));
    }
    if dbox.shares.len() < dbox.commitments.len() {
        return Err(PvssError::MalformedBox("fewer shares than threshold"));
    }

    let mut seen = HashSet::with_capacity(dbox.shares.len());
    for share in &dbox.shares {
        if share.position == 0 {
            return Err(PvssError::ReservedPosition);
        }
        if !seen.insert(share.position) {
            return Err(PvssError::DuplicatePosition(share.position));
        }
    }

    let commitments = decode_commitments(params, &dbox.commitments)?;

    let results: Vec<Result<()>> = dbox
        .shares
        .par_iter()
        .map(|share| check_share(params, &commitments, share))
        .collect();
    results.into_iter().collect()
}

fn check_share<G: Group>(params: &GroupParameters<G>, commitments: &[G::Element], share: &Share) -> Result<()> {
    let invalid = PvssError::ShareInvalid {
        position: share.position,
    };
    let pk = params.group.decode(&share.public_key).map_err(|_| invalid.clone())?;
    let s = params.group.decode(&share.encrypted_share).map_err(|_| invalid.clone())?;

    // X_i = Σ_j i^j·C_j, which equals p(i)·H for an honest dealer
    let x_i = evaluate_commitments(params, commitments, share.position);

    let dleq = Dleq::from_publics(params.h.clone(), x_i, pk, s);
    match dleq.verify(params, &share.proof) {
        Ok(true) => Ok(()),
        _ => Err(invalid),
    }
}

/// Boolean form of [`check_distribution`].
pub fn verify_distribution_shares<G: Group>(params: &GroupParameters<G>, dbox: &DistributionBox) -> bool {
    match check_distribution(params, dbox) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "distribution box rejected");
            false
        }
    }
}

/// DLEQ(G, pk, S, Y): the same key formed pk and turned S into Y.
pub fn check_decrypted_share<G: Group>(params: &GroupParameters<G>, dec: &DecryptedShare) -> Result<()> {
    let invalid = PvssError::DecryptedShareInvalid {
        position: dec.position,
    };
    if dec.position == 0 {
        return Err(PvssError::ReservedPosition);
    }
    let group = &params.group;
    let pk = group.decode(&dec.public_key).map_err(|_| invalid.clone())?;
    let s = group.decode(&dec.decrypted_share).map_err(|_| invalid.clone())?;
    let y = group.decode(&dec.y).map_err(|_| invalid.clone())?;

    let dleq = Dleq::from_publics(params.g.clone(), pk, s, y);
    match dleq.verify(params, &dec.proof) {
        Ok(true) => Ok(()),
        _ => Err(invalid),
    }
}

/// Boolean form of [`check_decrypted_share`].
pub fn verify_decrypted_share<G: Group>(params: &GroupParameters<G>, dec: &DecryptedShare) -> bool {
    match check_decrypted_share(params, dec) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "decrypted share rejected");
            false
        }
    }
}

/// [`check_decrypted_share`], plus Y must be the encrypted share the box
/// published for the same key and position.
pub fn check_decrypted_share_in_box<G: Group>(
    params: &GroupParameters<G>,
    dbox: &DistributionBox,
    dec: &DecryptedShare,
) -> Result<()> {
    check_decrypted_share(params, dec)?;
    let invalid = PvssError::DecryptedShareInvalid {
        position: dec.position,
    };
    let pk = params.group.decode(&dec.public_key).map_err(|_| invalid.clone())?;
    let share = dbox
        .share_for(&params.group, &pk)
        .ok_or(PvssError::NoMatchingShare)?;
    if share.position != dec.position {
        return Err(invalid);
    }
    let published = params.group.decode(&share.encrypted_share).map_err(|_| invalid.clone())?;
    let y = params.group.decode(&dec.y).map_err(|_| invalid.clone())?;
    if published != y {
        return Err(invalid);
    }
    Ok(())
}
