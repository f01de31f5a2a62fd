//! Prime-order group abstraction.
//!
//! Two backends:
//! - NIST P-256 via the `p256` crate. Points hash as affine x‖y, each
//!   32 bytes big-endian, and travel as SEC1 compressed encodings.
//! - ristretto255 via `curve25519-dalek`. Points hash and travel as the
//!   canonical 32-byte encoding.

use core::fmt::Debug;

use num_bigint::BigUint;

use crate::error::{PvssError, Result};

pub trait Group: Clone + Debug + Send + Sync {
    type Element: Clone + Debug + PartialEq + Send + Sync;

    fn name(&self) -> &'static str;

    /// Prime order n of the group.
    fn order(&self) -> &BigUint;

    fn generator(&self) -> Self::Element;

    fn identity(&self) -> Self::Element;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// k·P, with k reduced mod n first.
    fn mul(&self, p: &Self::Element, k: &BigUint) -> Self::Element;

    fn is_identity(&self, p: &Self::Element) -> bool {
        *p == self.identity()
    }

    /// Bytes this point contributes to every hash. `None` for the identity.
    fn hash_bytes(&self, p: &Self::Element) -> Option<Vec<u8>>;

    /// Public-key / wire encoding.
    fn encode(&self, p: &Self::Element) -> Vec<u8>;

    /// Inverse of [`Group::encode`], identity included. Commitments use
    /// this, since a zero coefficient commits to the identity.
    fn decode_any(&self, bytes: &[u8]) -> Result<Self::Element>;

    /// [`Group::decode_any`] for keys, shares and bases, which must not be
    /// the identity.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Element> {
        let p = self.decode_any(bytes)?;
        if self.is_identity(&p) {
            return Err(PvssError::InvalidEncoding("identity".into()));
        }
        Ok(p)
    }
}

/// Σ k_i·P_i, starting from the identity.
pub fn linear_combination<G: Group>(group: &G, terms: &[(BigUint, G::Element)]) -> G::Element {
    terms
        .iter()
        .fold(group.identity(), |acc, (k, p)| group.add(&acc, &group.mul(p, k)))
}

pub use self::p256_backend::P256Group;
pub use self::ristretto_backend::RistrettoGroup;

mod p256_backend {
    use super::*;
    use p256::elliptic_curve::group::Group as _;
    use p256::elliptic_curve::ops::Reduce;
    use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
    use p256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256};

    use crate::scalar::{to_fixed_be, SCALAR_LEN};

    const ORDER_BE: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84, 0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63,
        0x25, 0x51,
    ];

    #[derive(Clone, Debug)]
    pub struct P256Group {
        order: BigUint,
    }

    impl Default for P256Group {
        fn default() -> Self {
            Self::new()
        }
    }

    impl P256Group {
        pub fn new() -> Self {
            P256Group {
                order: BigUint::from_bytes_be(&ORDER_BE),
            }
        }

        fn to_scalar(&self, k: &BigUint) -> Scalar {
            let be = (k % &self.order).to_bytes_be();
            let mut bytes = [0u8; SCALAR_LEN];
            bytes[SCALAR_LEN - be.len()..].copy_from_slice(&be);
            <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(bytes))
        }

        fn field_bytes(x: &BigUint) -> Result<FieldBytes> {
            let be = to_fixed_be(x, SCALAR_LEN)?;
            let mut out = FieldBytes::default();
            out.copy_from_slice(&be);
            Ok(out)
        }

        /// Point from big-endian affine coordinates; fails if off-curve.
        pub fn from_affine(&self, x: &BigUint, y: &BigUint) -> Result<ProjectivePoint> {
            let ep = EncodedPoint::from_affine_coordinates(&Self::field_bytes(x)?, &Self::field_bytes(y)?, false);
            let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&ep).into();
            affine
                .map(ProjectivePoint::from)
                .ok_or_else(|| PvssError::InvalidEncoding("point not on P-256".into()))
        }
    }

    impl Group for P256Group {
        type Element = ProjectivePoint;

        fn name(&self) -> &'static str {
            "p256"
        }

        fn order(&self) -> &BigUint {
            &self.order
        }

        fn generator(&self) -> ProjectivePoint {
            ProjectivePoint::GENERATOR
        }

        fn identity(&self) -> ProjectivePoint {
            ProjectivePoint::IDENTITY
        }

        fn add(&self, a: &ProjectivePoint, b: &ProjectivePoint) -> ProjectivePoint {
            a + b
        }

        fn mul(&self, p: &ProjectivePoint, k: &BigUint) -> ProjectivePoint {
            p * &self.to_scalar(k)
        }

        fn is_identity(&self, p: &ProjectivePoint) -> bool {
            bool::from(p.is_identity())
        }

        fn hash_bytes(&self, p: &ProjectivePoint) -> Option<Vec<u8>> {
            let ep = p.to_affine().to_encoded_point(false);
            let (x, y) = (ep.x()?, ep.y()?);
            let mut out = Vec::with_capacity(2 * SCALAR_LEN);
            out.extend_from_slice(&x[..]);
            out.extend_from_slice(&y[..]);
            Some(out)
        }

        fn encode(&self, p: &ProjectivePoint) -> Vec<u8> {
            p.to_affine().to_encoded_point(true).as_bytes().to_vec()
        }

        fn decode_any(&self, bytes: &[u8]) -> Result<ProjectivePoint> {
            let ep = EncodedPoint::from_bytes(bytes)
                .map_err(|e| PvssError::InvalidEncoding(e.to_string()))?;
            let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&ep).into();
            affine
                .map(ProjectivePoint::from)
                .ok_or_else(|| PvssError::InvalidEncoding("point not on P-256".into()))
        }
    }
}

mod ristretto_backend {
    use super::*;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
    use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
    use curve25519_dalek::scalar::Scalar;
    use curve25519_dalek::traits::{Identity, IsIdentity};

    // ℓ = 2^252 + 27742317777372353535851937790883648493
    const ORDER_BE: [u8; 32] = [
        0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x14, 0xde, 0xf9, 0xde, 0xa2, 0xf7, 0x9c, 0xd6, 0x58, 0x12, 0x63, 0x1a, 0x5c, 0xf5,
        0xd3, 0xed,
    ];

    #[derive(Clone, Debug)]
    pub struct RistrettoGroup {
        order: BigUint,
    }

    impl Default for RistrettoGroup {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RistrettoGroup {
        pub fn new() -> Self {
            RistrettoGroup {
                order: BigUint::from_bytes_be(&ORDER_BE),
            }
        }

        fn to_scalar(&self, k: &BigUint) -> Scalar {
            let le = (k % &self.order).to_bytes_le();
            let mut bytes = [0u8; 32];
            bytes[..le.len()].copy_from_slice(&le);
            Scalar::from_bytes_mod_order(bytes)
        }
    }

    impl Group for RistrettoGroup {
        type Element = RistrettoPoint;

        fn name(&self) -> &'static str {
            "ristretto255"
        }

        fn order(&self) -> &BigUint {
            &self.order
        }

        fn generator(&self) -> RistrettoPoint {
            RISTRETTO_BASEPOINT_POINT
        }

        fn identity(&self) -> RistrettoPoint {
            RistrettoPoint::identity()
        }

        fn add(&self, a: &RistrettoPoint, b: &RistrettoPoint) -> RistrettoPoint {
            a + b
        }

        fn mul(&self, p: &RistrettoPoint, k: &BigUint) -> RistrettoPoint {
            p * self.to_scalar(k)
        }

        fn is_identity(&self, p: &RistrettoPoint) -> bool {
            p.is_identity()
        }

        fn hash_bytes(&self, p: &RistrettoPoint) -> Option<Vec<u8>> {
            if p.is_identity() {
                return None;
            }
            Some(p.compress().to_bytes().to_vec())
        }

        fn encode(&self, p: &RistrettoPoint) -> Vec<u8> {
            p.compress().to_bytes().to_vec()
        }

        fn decode_any(&self, bytes: &[u8]) -> Result<RistrettoPoint> {
            let compressed = CompressedRistretto::from_slice(bytes)
                .map_err(|e| PvssError::InvalidEncoding(e.to_string()))?;
            compressed
                .decompress()
                .ok_or_else(|| PvssError::InvalidEncoding("not a ristretto point".into()))
        }
    }
}
