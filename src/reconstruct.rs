use std::collections::HashSet;

use num_bigint::BigUint;
use tracing::debug;

use crate::error::{PvssError, Result};
use crate::group::{linear_combination, Group};
use crate::hash::mask;
use crate::shamir::lagrange_coeff;
use crate::types::{DecryptedShare, DistributionBox, GroupParameters};
use crate::verify::check_decrypted_share_in_box;

fn positions(dec_shares: &[DecryptedShare]) -> Result<Vec<u32>> {
    if dec_shares.is_empty() {
        return Err(PvssError::InsufficientShares { have: 0, need: 1 });
    }
    let mut seen = HashSet::with_capacity(dec_shares.len());
    for ds in dec_shares {
        if ds.position == 0 {
            return Err(PvssError::ReservedPosition);
        }
        if !seen.insert(ds.position) {
            return Err(PvssError::DuplicatePosition(ds.position));
        }
    }
    Ok(dec_shares.iter().map(|ds| ds.position).collect())
}

/// a_0·G = Σ_i λ_i·S_i over the given positions.
pub fn reconstruct_anchor<G: Group>(params: &GroupParameters<G>, dec_shares: &[DecryptedShare]) -> Result<G::Element> {
    let ss = positions(dec_shares)?;
    let n = params.order();
    let terms = dec_shares
        .iter()
        .map(|ds| -> Result<(BigUint, G::Element)> {
            let lambda = lagrange_coeff(ds.position, &ss, n)?;
            let s = params.group.decode(&ds.decrypted_share)?;
            Ok((lambda, s))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(positions = ?ss, "interpolating anchor");
    Ok(linear_combination(&params.group, &terms))
}

/// secret = U XOR H(anchor). Too few shares yield an unrelated value, not
/// an error; verify shares first when that matters.
pub fn reconstruct_secret<G: Group>(
    params: &GroupParameters<G>,
    dec_shares: &[DecryptedShare],
    u: &BigUint,
) -> Result<BigUint> {
    let anchor = reconstruct_anchor(params, dec_shares)?;
    Ok(u ^ &mask(&params.group, &anchor)?)
}

/// Verify every decrypted share against the box, require the box's
/// threshold, then reconstruct with the box's U.
pub fn reconstruct_verified<G: Group>(
    params: &GroupParameters<G>,
    dbox: &DistributionBox,
    dec_shares: &[DecryptedShare],
) -> Result<BigUint> {
    let ss = positions(dec_shares)?;
    if ss.len() < dbox.threshold() {
        return Err(PvssError::InsufficientShares {
            have: ss.len(),
            need: dbox.threshold(),
        });
    }
    for ds in dec_shares {
        check_decrypted_share_in_box(params, dbox, ds)?;
    }
    reconstruct_secret(params, dec_shares, &dbox.u)
}
