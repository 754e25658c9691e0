//! Complex arithmetic for the escape-time kernels.
//!
//! A minimal hand-rolled complex type keeps the inner pixel loops free of
//! generic machinery. Exact `PartialEq` is deliberate: the Julia kernel's
//! fixed-point check compares an orbit value against the original sample
//! bit-for-bit.

use std::ops::{Add, Mul};

/// Simple complex struct used throughout the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Unit rotation factor `e^{i theta}` for an angle in radians.
    #[inline]
    pub fn from_angle(theta: f64) -> Self {
        Self {
            re: theta.cos(),
            im: theta.sin(),
        }
    }

    #[inline]
    pub fn mag_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn mul(&self, other: Complex) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    #[inline]
    pub fn add(&self, other: Complex) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    #[inline]
    pub fn scale(&self, f: f64) -> Self {
        Self {
            re: self.re * f,
            im: self.im * f,
        }
    }
}

impl Mul for Complex {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Complex::mul(&self, rhs)
    }
}

impl Add for Complex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Complex::add(&self, rhs)
    }
}
