// Floyd two-speed cycle search over the pseudo-random walk, plus the
// congruence solve that extracts the exponent from a collision.
use log::debug;
use num_bigint::BigUint;

use crate::arith::{invmod, mulmod, submod};
use crate::common::RhoError;
use crate::curve::{Curve, Point};
use crate::walk::WalkState;

/// Recovered exponent and the number of iterations it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub m: BigUint,
    pub steps: BigUint,
}

/// Find m with b = a^m, where a generates a subgroup of order n.
///
/// n doubles as the iteration bound: the slow walker takes one step
/// per iteration and the fast walker two, and if they have not met
/// after n iterations the search stops with `Exhausted`. A collision
/// with slow state (alpha, beta) and fast state (alpha2, beta2) gives
///   m = (beta2 - beta) / (alpha - alpha2)  (mod n).
/// A zero denominator is a real, if unlucky, rho outcome: the
/// collision carries no information and comes back as `NoInverse` so
/// the caller can retry with a fresh target.
pub fn solve(a: &Point, b: &Point, curve: &Curve, n: &BigUint) -> Result<Solution, RhoError> {
    let mut slow = WalkState::start();
    let mut fast = slow.clone();

    let mut k = BigUint::from(1u32);
    while &k <= n {
        slow = slow.step(a, b, curve)?;
        fast = fast.step(a, b, curve)?;
        fast = fast.step(a, b, curve)?;

        if slow.z == fast.z {
            debug!("collision after {} iterations", k);
            let num = submod(&fast.beta, &slow.beta, n);
            let den = submod(&slow.alpha, &fast.alpha, n);
            let m = mulmod(&num, &invmod(&den, n)?, n);
            return Ok(Solution { m, steps: k });
        }
        k += 1u32;
    }
    Err(RhoError::Exhausted)
}

#[cfg(test)]
fn demo_params() -> (Curve, Point, BigUint) {
    let curve = Curve::new(BigUint::from(154u32), BigUint::from(65519u32));
    let a = Point {
        x: BigUint::from(12u32),
        y: BigUint::from(61833u32),
    };
    (curve, a, BigUint::from(16339u32))
}

#[test]
fn test_round_trip() {
    let (curve, a, n) = demo_params();
    for m in [2u32, 77, 5000, 16338] {
        let m = BigUint::from(m);
        let b = curve.exp(&a, &m).unwrap();
        let sol = solve(&a, &b, &curve, &n).unwrap();
        assert_eq!(sol.m, m);
        assert!(sol.steps >= BigUint::from(1u32));
        assert!(sol.steps <= n);
    }
}

#[test]
fn test_recovered_exponent_rebuilds_target() {
    let (curve, a, n) = demo_params();
    let m = BigUint::from(1234u32);
    let b = curve.exp(&a, &m).unwrap();
    let sol = solve(&a, &b, &curve, &n).unwrap();
    assert_eq!(curve.exp(&a, &sol.m).unwrap(), b);
}

#[test]
fn test_exhaustion_at_tiny_bound() {
    let (curve, a, _) = demo_params();
    let b = curve.exp(&a, &BigUint::from(77u32)).unwrap();
    let sol = solve(&a, &b, &curve, &BigUint::from(1u32));
    assert_eq!(sol, Err(RhoError::Exhausted));
}
