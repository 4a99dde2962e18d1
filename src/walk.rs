// Pseudo-random walk for the rho cycle search. The branch taken
// depends only on x(z), so two walkers that reach the same point
// always transition identically from there on.
use num_bigint::BigUint;

use crate::common::RhoError;
use crate::curve::{Curve, Point};

/// One walker. The relation z = a^beta * b^alpha holds for every
/// state reachable from `start`; alpha and beta stay unreduced until
/// the final congruence solve takes them mod n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkState {
    pub alpha: BigUint,
    pub beta: BigUint,
    pub z: Point,
}

impl WalkState {
    /// Canonical start: alpha = beta = 0, z = (0, 1).
    pub fn start() -> Self {
        WalkState {
            alpha: BigUint::from(0u32),
            beta: BigUint::from(0u32),
            z: Point::identity(),
        }
    }

    /// One transition, keyed on x(z) mod 3.
    pub fn step(&self, a: &Point, b: &Point, curve: &Curve) -> Result<WalkState, RhoError> {
        let residue = (&self.z.x % 3u32).to_u32_digits().first().copied().unwrap_or(0);
        let next = match residue {
            // multiply by b
            0 => WalkState {
                alpha: &self.alpha + 1u32,
                beta: self.beta.clone(),
                z: curve.add(b, &self.z)?,
            },
            // double
            1 => WalkState {
                alpha: &self.alpha * 2u32,
                beta: &self.beta * 2u32,
                z: curve.add(&self.z, &self.z)?,
            },
            // multiply by a
            2 => WalkState {
                alpha: self.alpha.clone(),
                beta: &self.beta + 1u32,
                z: curve.add(a, &self.z)?,
            },
            _ => unreachable!("residue mod 3"),
        };
        Ok(next)
    }
}

#[cfg(test)]
fn demo_walk() -> (Curve, Point, Point) {
    let curve = Curve::new(BigUint::from(154u32), BigUint::from(65519u32));
    let a = Point {
        x: BigUint::from(12u32),
        y: BigUint::from(61833u32),
    };
    // b = a^77
    let b = curve.exp(&a, &BigUint::from(77u32)).unwrap();
    (curve, a, b)
}

#[test]
fn test_step_deterministic() {
    let (curve, a, b) = demo_walk();
    let mut s1 = WalkState::start();
    let mut s2 = WalkState::start();
    for _ in 0..20 {
        s1 = s1.step(&a, &b, &curve).unwrap();
        s2 = s2.step(&a, &b, &curve).unwrap();
        assert_eq!(s1, s2);
    }
}

#[test]
fn test_walk_invariant() {
    // z = a^beta * b^alpha after any number of steps
    let (curve, a, b) = demo_walk();
    let mut state = WalkState::start();
    for _ in 0..25 {
        state = state.step(&a, &b, &curve).unwrap();
        let expect = curve
            .add(
                &curve.exp(&a, &state.beta).unwrap(),
                &curve.exp(&b, &state.alpha).unwrap(),
            )
            .unwrap();
        assert_eq!(state.z, expect);
    }
}

#[test]
fn test_start_state() {
    let s = WalkState::start();
    assert_eq!(s.alpha, BigUint::from(0u32));
    assert_eq!(s.beta, BigUint::from(0u32));
    assert_eq!(s.z, Point::identity());
}
