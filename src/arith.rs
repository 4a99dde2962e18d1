// Modular arithmetic over Z_m.
// All results are reduced into [0, m); operands may be unreduced.
use num_bigint::BigUint;

use crate::common::RhoError;

pub fn addmod(x: &BigUint, y: &BigUint, m: &BigUint) -> BigUint {
    (x + y) % m
}

pub fn submod(x: &BigUint, y: &BigUint, m: &BigUint) -> BigUint {
    ((x % m) + (m - (y % m))) % m
}

pub fn mulmod(x: &BigUint, y: &BigUint, m: &BigUint) -> BigUint {
    (x * y) % m
}

/// Multiplicative inverse of x mod m, defined when gcd(x, m) = 1.
///
/// A non-invertible x means the caller hit a degenerate denominator
/// (curve addition) or an unusable collision (congruence solve), so
/// the error must propagate rather than be masked here.
pub fn invmod(x: &BigUint, m: &BigUint) -> Result<BigUint, RhoError> {
    x.modinv(m).ok_or(RhoError::NoInverse)
}

#[test]
fn test_invmod() {
    let p = BigUint::from(65519u32);
    for x in [2u32, 3, 154, 61833, 65518] {
        let x = BigUint::from(x);
        let x_inv = invmod(&x, &p).unwrap();
        assert_eq!(mulmod(&x, &x_inv, &p), BigUint::from(1u32));
    }
}

#[test]
fn test_invmod_noninvertible() {
    let p = BigUint::from(65519u32);
    assert_eq!(invmod(&BigUint::from(0u32), &p), Err(RhoError::NoInverse));
    assert_eq!(invmod(&p, &p), Err(RhoError::NoInverse));
    // composite modulus, shared factor
    let m = BigUint::from(15u32);
    assert_eq!(invmod(&BigUint::from(5u32), &m), Err(RhoError::NoInverse));
}

#[test]
fn test_submod_wraps() {
    let m = BigUint::from(7u32);
    let r = submod(&BigUint::from(2u32), &BigUint::from(5u32), &m);
    assert_eq!(r, BigUint::from(4u32));
    // unreduced operands
    let r = submod(&BigUint::from(16u32), &BigUint::from(30u32), &m);
    assert_eq!(r, BigUint::from(0u32));
}

#[test]
fn test_addmod_mulmod_reduce() {
    let m = BigUint::from(11u32);
    let r = addmod(&BigUint::from(9u32), &BigUint::from(9u32), &m);
    assert_eq!(r, BigUint::from(7u32));
    let r = mulmod(&BigUint::from(9u32), &BigUint::from(9u32), &m);
    assert_eq!(r, BigUint::from(4u32));
}
