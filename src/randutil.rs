use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;

/// Uniform integer in [0, bound) by rejection sampling over the minimal
/// byte length covering `bound`. `bound` must be non-zero.
pub fn sample_below(bound: &BigUint) -> BigUint {
    let len = (bound.bits() as usize).div_ceil(8).max(1);
    let mut rng = rand::rng();
    let mut buf = vec![0u8; len];
    loop {
        rng.fill_bytes(&mut buf);
        let r = BigUint::from_bytes_be(&buf);
        if &r < bound {
            return r;
        }
    }
}

/// Uniform scalar in [1, n-1]. Draws of zero are rejected like any other
/// out-of-range draw.
pub fn sample_scalar(n: &BigUint) -> BigUint {
    loop {
        let r = sample_below(n);
        if !r.is_zero() {
            return r;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_never_zero_or_order() {
        let n = BigUint::from(3u32);
        for _ in 0..200 {
            let r = sample_scalar(&n);
            assert!(r == BigUint::from(1u32) || r == BigUint::from(2u32));
        }
    }

    #[test]
    fn below_covers_multi_byte_bound() {
        let n = BigUint::from(300u32);
        let mut saw_high = false;
        for _ in 0..2000 {
            let r = sample_below(&n);
            assert!(r < n);
            saw_high |= r >= BigUint::from(256u32);
        }
        assert!(saw_high);
    }
}
