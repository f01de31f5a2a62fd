use curve25519_dalek::ristretto::RistrettoPoint;
use num_bigint::BigUint;
use sha2::Sha512;
use sha3::{Digest, Sha3_256};

use crate::error::{PvssError, Result};
use crate::group::Group;
use crate::scalar::{to_fixed_be, SCALAR_LEN};

/// Output length of the domain hash, and so the largest secret in bytes.
pub const DIGEST_LEN: usize = 32;

/// ===== Domain hash =====
/// SHA3-256 over fixed-length big-endian blocks, in order.
pub fn domain_hash(blocks: &[&[u8]]) -> [u8; DIGEST_LEN] {
    let mut h = Sha3_256::new();
    for b in blocks {
        h.update(b);
    }
    h.finalize().into()
}

/// Hash a sequence of scalars, each as a 32-byte big-endian block.
pub fn hash_scalars(scalars: &[BigUint]) -> Result<[u8; DIGEST_LEN]> {
    let blocks = scalars
        .iter()
        .map(|s| to_fixed_be(s, SCALAR_LEN))
        .collect::<Result<Vec<_>>>()?;
    let refs: Vec<&[u8]> = blocks.iter().map(Vec::as_slice).collect();
    Ok(domain_hash(&refs))
}

/// Hash the coordinates of each point in order. `None` if any point is the
/// identity.
pub fn hash_points<G: Group>(group: &G, points: &[&G::Element]) -> Option<[u8; DIGEST_LEN]> {
    let blocks = points
        .iter()
        .map(|p| group.hash_bytes(p))
        .collect::<Option<Vec<_>>>()?;
    let refs: Vec<&[u8]> = blocks.iter().map(Vec::as_slice).collect();
    Some(domain_hash(&refs))
}

/// Fiat-Shamir challenge H(H1, H2, A1, A2) mod n.
pub fn challenge<G: Group>(
    group: &G,
    h1: &G::Element,
    h2: &G::Element,
    a1: &G::Element,
    a2: &G::Element,
) -> Result<BigUint> {
    let digest = hash_points(group, &[h1, h2, a1, a2]).ok_or(PvssError::IdentityElement)?;
    Ok(BigUint::from_bytes_be(&digest) % group.order())
}

/// Secret mask H(anchor.x, anchor.y) as a 256-bit integer.
pub fn mask<G: Group>(group: &G, anchor: &G::Element) -> Result<BigUint> {
    let digest = hash_points(group, &[anchor]).ok_or(PvssError::IdentityElement)?;
    Ok(BigUint::from_bytes_be(&digest))
}

/// ===== Generator derivation =====
/// Domain-separated SHA-512, mapped with RistrettoPoint::from_uniform_bytes.
pub fn derive_generator(tag: &[u8]) -> RistrettoPoint {
    let mut h = Sha512::new();
    h.update(b"PVSS::Gen");
    h.update(tag);
    let out = h.finalize();
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&out[..64]);
    RistrettoPoint::from_uniform_bytes(&wide)
}
