//! Numeric element domains supported by the harness.
//!
//! The kernel under test is specialized for one element type at a time. The
//! [`Element`] trait is the closed set of types the harness can drive: each
//! carries the domain tag used to pick a generation strategy, a widened
//! accumulator type for inner products, and a signed-equivalent conversion
//! used for all difference computation so that differences on unsigned
//! domains do not wrap.

use core::fmt;
use core::ops::Add;

/// Numeric domain of an element type, used to select the generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Bounded integer draws (1 through 10 inclusive).
    Integral,
    /// Bounded continuous draws (1.0 through 10.0).
    Real,
}

/// An element type the kernel under test can compute over.
pub trait Element: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Accumulator for inner products: wide enough that integral domains do
    /// not overflow and real domains keep sufficient precision.
    type Acc: Copy + Default + Add<Output = Self::Acc>;

    /// Domain tag consulted once per generated buffer.
    const DOMAIN: Domain;

    fn zero() -> Self;

    fn one() -> Self;

    /// Builds an element from an integral draw.
    fn from_i64(value: i64) -> Self;

    /// Builds an element from a real draw.
    fn from_f64(value: f64) -> Self;

    /// Product of two elements, widened into the accumulator domain.
    fn mul_wide(self, rhs: Self) -> Self::Acc;

    /// Narrows an accumulated inner product back to the element domain.
    fn from_acc(acc: Self::Acc) -> Self;

    /// Signed-equivalent representation. Every subtraction in the verifier
    /// happens on this representation, never on the raw element type.
    fn comparable(self) -> f64;
}

impl Element for f32 {
    type Acc = f64;

    const DOMAIN: Domain = Domain::Real;

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_i64(value: i64) -> Self {
        value as f32
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn mul_wide(self, rhs: Self) -> f64 {
        f64::from(self) * f64::from(rhs)
    }

    fn from_acc(acc: f64) -> Self {
        acc as f32
    }

    fn comparable(self) -> f64 {
        f64::from(self)
    }
}

impl Element for f64 {
    type Acc = f64;

    const DOMAIN: Domain = Domain::Real;

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_i64(value: i64) -> Self {
        value as f64
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn mul_wide(self, rhs: Self) -> f64 {
        self * rhs
    }

    fn from_acc(acc: f64) -> Self {
        acc
    }

    fn comparable(self) -> f64 {
        self
    }
}

impl Element for i32 {
    type Acc = i64;

    const DOMAIN: Domain = Domain::Integral;

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_i64(value: i64) -> Self {
        value as i32
    }

    fn from_f64(value: f64) -> Self {
        value as i32
    }

    fn mul_wide(self, rhs: Self) -> i64 {
        i64::from(self) * i64::from(rhs)
    }

    fn from_acc(acc: i64) -> Self {
        acc as i32
    }

    fn comparable(self) -> f64 {
        f64::from(self)
    }
}

impl Element for u16 {
    type Acc = u64;

    const DOMAIN: Domain = Domain::Integral;

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_i64(value: i64) -> Self {
        value as u16
    }

    fn from_f64(value: f64) -> Self {
        value as u16
    }

    fn mul_wide(self, rhs: Self) -> u64 {
        u64::from(self) * u64::from(rhs)
    }

    fn from_acc(acc: u64) -> Self {
        acc as u16
    }

    fn comparable(self) -> f64 {
        f64::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_difference_does_not_wrap() {
        // 3 - 5 on u16 would wrap to 65534; on the comparable
        // representation the difference is an honest -2.
        let small = 3u16.comparable();
        let large = 5u16.comparable();
        assert!((small - large + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_integral_accumulator_is_wide() {
        // Largest generated draw is 10; a long inner product must not
        // saturate the accumulator even for narrow element types.
        let mut acc = <u16 as Element>::Acc::default();
        for _ in 0..100_000 {
            acc = acc + 10u16.mul_wide(10);
        }
        assert_eq!(acc, 10_000_000);
    }

    #[test]
    fn test_real_roundtrip_through_acc() {
        let x = 2.5f32;
        assert_eq!(f32::from_acc(x.mul_wide(2.0)), 5.0);
    }

    #[test]
    fn test_domain_tags() {
        assert_eq!(f32::DOMAIN, Domain::Real);
        assert_eq!(f64::DOMAIN, Domain::Real);
        assert_eq!(i32::DOMAIN, Domain::Integral);
        assert_eq!(u16::DOMAIN, Domain::Integral);
    }
}
