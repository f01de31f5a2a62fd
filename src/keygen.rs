use num_bigint::BigUint;

use crate::error::Result;
use crate::group::{Group, P256Group, RistrettoGroup};
use crate::hash::derive_generator;
use crate::randutil::sample_scalar;
use crate::types::GroupParameters;

/// Fixed nothing-up-my-sleeve auxiliary generator on P-256.
const P256_H_X: [u8; 32] = [
    0x69, 0x8b, 0xea, 0x63, 0xdc, 0x44, 0xa3, 0x44, 0x66, 0x3f, 0xf1, 0x42, 0x9a, 0xea, 0x10, 0x84,
    0x2d, 0xf2, 0x7b, 0x6b, 0x99, 0x1e, 0xf2, 0x58, 0x66, 0xb2, 0xc6, 0xc0, 0x2c, 0xdc, 0xc5, 0xbe,
];
const P256_H_Y: [u8; 32] = [
    0x49, 0x92, 0xf5, 0xf5, 0x7d, 0x7e, 0x55, 0xb0, 0xd6, 0x37, 0xed, 0x65, 0x9b, 0x98, 0x85, 0x72,
    0x42, 0x59, 0x7f, 0x00, 0xda, 0x1d, 0x89, 0x3e, 0x68, 0x1b, 0xf4, 0xc6, 0x26, 0x27, 0xb2, 0x49,
];

/// P-256 with the fixed auxiliary generator H.
pub fn setup_p256() -> Result<GroupParameters<P256Group>> {
    let group = P256Group::new();
    let h = group.from_affine(
        &BigUint::from_bytes_be(&P256_H_X),
        &BigUint::from_bytes_be(&P256_H_Y),
    )?;
    GroupParameters::new(group, h)
}

/// ristretto255 with a hash-derived auxiliary generator H.
pub fn setup_ristretto() -> Result<GroupParameters<RistrettoGroup>> {
    GroupParameters::new(RistrettoGroup::new(), derive_generator(b"h"))
}

/// Fresh key pair (x, x·G) with x uniform in [1, n-1].
pub fn kgen<G: Group>(params: &GroupParameters<G>) -> (BigUint, G::Element) {
    let x = sample_scalar(params.order());
    let pk = params.group.mul(&params.g, &x);
    (x, pk)
}
