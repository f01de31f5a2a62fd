//! Arithmetic modulo the group order on `BigUint` scalars.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::error::{PvssError, Result};

/// Byte length of every scalar and coordinate fed to the domain hash.
pub const SCALAR_LEN: usize = 32;

fn egcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        (a, BigInt::one(), BigInt::zero())
    } else {
        let (g, x, y) = egcd(b.clone(), &a % &b);
        let q = &a / &b;
        (g, y.clone(), x - q * y)
    }
}

/// a^-1 mod n via the extended Euclidean algorithm.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(PvssError::NotInvertible);
    }
    let a_i = BigInt::from_biguint(Sign::Plus, a % n);
    let n_i = BigInt::from_biguint(Sign::Plus, n.clone());
    let (g, x, _) = egcd(a_i, n_i.clone());
    if !g.is_one() {
        return Err(PvssError::NotInvertible);
    }
    let mut x = x % &n_i;
    if x.sign() == Sign::Minus {
        x += &n_i;
    }
    x.to_biguint().ok_or(PvssError::NotInvertible)
}

/// (a - b) mod n, kept non-negative by adding n before reducing.
pub fn mod_sub(a: &BigUint, b: &BigUint, n: &BigUint) -> BigUint {
    ((a % n) + n - (b % n)) % n
}

/// Require 0 < x < n.
pub fn check_open_range(x: &BigUint, n: &BigUint, what: &'static str) -> Result<()> {
    if x.is_zero() || x >= n {
        return Err(PvssError::OutOfRange { what });
    }
    Ok(())
}

/// Left-pad the big-endian bytes of `x` to exactly `len` bytes.
pub fn to_fixed_be(x: &BigUint, len: usize) -> Result<Vec<u8>> {
    let bytes = if x.is_zero() { Vec::new() } else { x.to_bytes_be() };
    if bytes.len() > len {
        return Err(PvssError::OutOfRange { what: "fixed-length encoding" });
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}
