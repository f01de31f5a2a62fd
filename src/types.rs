use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{PvssError, Result};
use crate::group::Group;
use crate::nizk::DleqProof;

/// Group, base generator G, and auxiliary generator H, passed explicitly to
/// every operation.
#[derive(Clone, Debug)]
pub struct GroupParameters<G: Group> {
    pub group: G,
    pub g: G::Element,
    pub h: G::Element,
}

impl<G: Group> GroupParameters<G> {
    /// G is the group's base point. H must differ from G and the identity.
    pub fn new(group: G, h: G::Element) -> Result<Self> {
        let g = group.generator();
        if group.is_identity(&h) || h == g {
            return Err(PvssError::InvalidEncoding(
                "auxiliary generator must be independent of G".into(),
            ));
        }
        Ok(GroupParameters { group, g, h })
    }

    pub fn order(&self) -> &BigUint {
        self.group.order()
    }
}

/// Encrypted share for one recipient, as published by the dealer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub public_key: Vec<u8>,
    /// 1-based; 0 is the secret's anchor.
    pub position: u32,
    /// S = p(position)·pk
    pub encrypted_share: Vec<u8>,
    pub proof: DleqProof,
}

impl Share {
    pub fn new(public_key: Vec<u8>, position: u32, encrypted_share: Vec<u8>, proof: DleqProof) -> Self {
        Share {
            public_key,
            position,
            encrypted_share,
            proof,
        }
    }
}

/// Authoritative public artifact of one distribution round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBox {
    /// coefficient_j·H for j = 0..threshold
    pub commitments: Vec<Vec<u8>>,
    pub shares: Vec<Share>,
    /// secret XOR H(anchor)
    pub u: BigUint,
}

impl DistributionBox {
    pub fn threshold(&self) -> usize {
        self.commitments.len()
    }

    /// Share addressed to `public_key`. Keys are compared as group
    /// elements, so any valid encoding of the same key matches.
    pub fn share_for<G: Group>(&self, group: &G, public_key: &G::Element) -> Option<&Share> {
        self.shares
            .iter()
            .find(|s| group.decode(&s.public_key).map_or(false, |pk| pk == *public_key))
    }
}

/// A participant's revealed share with its proof of correct decryption.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptedShare {
    pub public_key: Vec<u8>,
    pub position: u32,
    /// p(position)·G
    pub decrypted_share: Vec<u8>,
    /// x·decrypted_share, equal to the encrypted share for an honest participant
    pub y: Vec<u8>,
    pub proof: DleqProof,
}
