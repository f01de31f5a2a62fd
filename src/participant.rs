use num_bigint::BigUint;
use tracing::debug;

use crate::error::{PvssError, Result};
use crate::group::Group;
use crate::keygen::kgen;
use crate::nizk::prove_for_known_publics;
use crate::randutil::sample_scalar;
use crate::scalar::{check_open_range, mod_inverse};
use crate::types::{DecryptedShare, DistributionBox, GroupParameters};

/// Share recipient holding x with pk = x·G.
#[derive(Clone)]
pub struct Participant {
    private_key: BigUint,
    public_key: Vec<u8>,
}

impl core::fmt::Debug for Participant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Participant")
            .field("public_key", &hex::encode(&self.public_key))
            .finish_non_exhaustive()
    }
}

impl Participant {
    pub fn generate<G: Group>(params: &GroupParameters<G>) -> Self {
        let (private_key, pk) = kgen(params);
        Participant {
            private_key,
            public_key: params.group.encode(&pk),
        }
    }

    pub fn from_private_key<G: Group>(params: &GroupParameters<G>, private_key: BigUint) -> Result<Self> {
        check_open_range(&private_key, params.order(), "private key")?;
        let pk = params.group.mul(&params.g, &private_key);
        Ok(Participant {
            private_key,
            public_key: params.group.encode(&pk),
        })
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Decrypt this participant's share from the box and prove the
    /// decryption used the key behind `public_key`.
    pub fn extract_share<G: Group>(&self, params: &GroupParameters<G>, dbox: &DistributionBox) -> Result<DecryptedShare> {
        let group = &params.group;
        let n = params.order();

        let pk = group.decode(&self.public_key)?;
        let share = dbox.share_for(group, &pk).ok_or(PvssError::NoMatchingShare)?;
        let encrypted = group.decode(&share.encrypted_share)?;

        // S_i·x^-1 = p_i·x·G·x^-1 = p_i·G
        let x_inv = mod_inverse(&self.private_key, n)?;
        let decrypted = group.mul(&encrypted, &x_inv);

        // DLEQ(G, pk, decrypted, Y) with Y = x·decrypted = S_i
        let w = sample_scalar(n);
        let proof = prove_for_known_publics(
            params,
            params.g.clone(),
            pk,
            decrypted.clone(),
            encrypted.clone(),
            &w,
            &self.private_key,
        )?;

        debug!(position = share.position, "extracted share");

        Ok(DecryptedShare {
            public_key: self.public_key.clone(),
            position: share.position,
            decrypted_share: group.encode(&decrypted),
            y: group.encode(&encrypted),
            proof,
        })
    }
}
