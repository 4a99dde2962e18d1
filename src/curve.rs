// Group operations on a twisted Edwards curve:
// x^2 + y^2 = 1 + d*x^2*y^2 mod p
// The addition law is complete for suitable d, so the same formula
// serves addition and doubling. Parameters are never validated; a bad
// d or composite p surfaces as NoInverse at some denominator.
use num_bigint::BigUint;

use crate::arith::{addmod, invmod, mulmod, submod};
use crate::common::RhoError;

/// Affine point (x, y), residues mod p.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: BigUint,
    pub y: BigUint,
}

impl Point {
    /// Group identity (0, 1).
    pub fn identity() -> Self {
        Point {
            x: BigUint::from(0u32),
            y: BigUint::from(1u32),
        }
    }
}

/// Curve parameters, read-only for the lifetime of one solve.
#[derive(Debug, Clone)]
pub struct Curve {
    pub d: BigUint,
    pub p: BigUint,
}

impl Curve {
    pub fn new(d: BigUint, p: BigUint) -> Self {
        Curve { d, p }
    }

    /// Twisted Edwards addition:
    /// x3 = (x1*y2 + y1*x2) / (1 + d*x1*x2*y1*y2)
    /// y3 = (y1*y2 - x1*x2) / (1 - d*x1*x2*y1*y2)
    /// Division is multiplication by a modular inverse, so a zero
    /// denominator comes back as NoInverse.
    pub fn add(&self, p1: &Point, p2: &Point) -> Result<Point, RhoError> {
        let one = BigUint::from(1u32);

        let dxxyy = mulmod(
            &mulmod(
                &mulmod(&mulmod(&self.d, &p1.x, &self.p), &p2.x, &self.p),
                &p1.y,
                &self.p,
            ),
            &p2.y,
            &self.p,
        );

        let x_num = addmod(
            &mulmod(&p1.x, &p2.y, &self.p),
            &mulmod(&p1.y, &p2.x, &self.p),
            &self.p,
        );
        let x_den = addmod(&one, &dxxyy, &self.p);
        let x3 = mulmod(&x_num, &invmod(&x_den, &self.p)?, &self.p);

        let y_num = submod(
            &mulmod(&p1.y, &p2.y, &self.p),
            &mulmod(&p1.x, &p2.x, &self.p),
            &self.p,
        );
        let y_den = submod(&one, &dxxyy, &self.p);
        let y3 = mulmod(&y_num, &invmod(&y_den, &self.p)?, &self.p);

        Ok(Point { x: x3, y: y3 })
    }

    /// base^m by left-to-right square-and-multiply: after processing
    /// bit i the accumulator holds base^(m >> i). O(bits of m) group
    /// operations. m = 0 yields the identity.
    pub fn exp(&self, base: &Point, m: &BigUint) -> Result<Point, RhoError> {
        let mut acc = Point::identity();
        for i in (0..m.bits()).rev() {
            acc = self.add(&acc, &acc)?;
            if m.bit(i) {
                acc = self.add(&acc, base)?;
            }
        }
        Ok(acc)
    }
}

#[cfg(test)]
fn demo_params() -> (Curve, Point) {
    let curve = Curve::new(BigUint::from(154u32), BigUint::from(65519u32));
    let a = Point {
        x: BigUint::from(12u32),
        y: BigUint::from(61833u32),
    };
    (curve, a)
}

#[cfg(test)]
fn on_curve(curve: &Curve, pt: &Point) -> bool {
    let lhs = addmod(
        &mulmod(&pt.x, &pt.x, &curve.p),
        &mulmod(&pt.y, &pt.y, &curve.p),
        &curve.p,
    );
    let xxyy = mulmod(
        &mulmod(&pt.x, &pt.x, &curve.p),
        &mulmod(&pt.y, &pt.y, &curve.p),
        &curve.p,
    );
    let rhs = addmod(
        &BigUint::from(1u32),
        &mulmod(&curve.d, &xxyy, &curve.p),
        &curve.p,
    );
    lhs == rhs
}

#[test]
fn test_identity_law() {
    let (curve, a) = demo_params();
    assert_eq!(curve.add(&a, &Point::identity()).unwrap(), a);
    assert_eq!(curve.add(&Point::identity(), &a).unwrap(), a);
}

#[test]
fn test_add_stays_on_curve() {
    let (curve, a) = demo_params();
    assert!(on_curve(&curve, &a));
    let aa = curve.add(&a, &a).unwrap();
    assert!(on_curve(&curve, &aa));
    let aaa = curve.add(&aa, &a).unwrap();
    assert!(on_curve(&curve, &aaa));
}

#[test]
fn test_add_degenerate_denominator() {
    // On x^2 + y^2 = 1 + x^2*y^2 mod 5 the point (2, 1) doubles into
    // a zero denominator: 1 + 2*2*1*1 = 5.
    let curve = Curve::new(BigUint::from(1u32), BigUint::from(5u32));
    let pt = Point {
        x: BigUint::from(2u32),
        y: BigUint::from(1u32),
    };
    assert!(on_curve(&curve, &pt));
    assert_eq!(curve.add(&pt, &pt), Err(RhoError::NoInverse));
}

#[test]
fn test_exp_two_is_doubling() {
    let (curve, a) = demo_params();
    let doubled = curve.add(&a, &a).unwrap();
    let squared = curve.exp(&a, &BigUint::from(2u32)).unwrap();
    assert_eq!(squared, doubled);
    assert_eq!(doubled.x, BigUint::from(8975u32));
    assert_eq!(doubled.y, BigUint::from(60008u32));
}

#[test]
fn test_exp_splits_over_add() {
    let (curve, a) = demo_params();
    for (m1, m2) in [(1u32, 1u32), (4, 5), (100, 23), (0, 7)] {
        let whole = curve.exp(&a, &BigUint::from(m1 + m2)).unwrap();
        let split = curve
            .add(
                &curve.exp(&a, &BigUint::from(m1)).unwrap(),
                &curve.exp(&a, &BigUint::from(m2)).unwrap(),
            )
            .unwrap();
        assert_eq!(whole, split);
    }
}

#[test]
fn test_exp_edge_exponents() {
    let (curve, a) = demo_params();
    assert_eq!(
        curve.exp(&a, &BigUint::from(0u32)).unwrap(),
        Point::identity()
    );
    assert_eq!(curve.exp(&a, &BigUint::from(1u32)).unwrap(), a);
    // a generates a subgroup of order 16339
    assert_eq!(
        curve.exp(&a, &BigUint::from(16339u32)).unwrap(),
        Point::identity()
    );
}
