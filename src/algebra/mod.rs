//! Geometric algebra kernel for the planar projective algebra Cl(2,0,1).
//!
//! This module provides the fundamental multivector arithmetic used by the
//! projective layer:
//! - [`GVec`] - A sparse multivector over the basis
//!   `{1, e0, e1, e2, e0∧e1, e0∧e2, e1∧e2, e0∧e1∧e2}`
//! - Wedge (outer) product, inner product, and the dual map
//! - Scalar extraction and pointwise combination
//!
//! ## Basis and metric
//!
//! Basis blades are keyed by a 3-bit mask: bit 0 is `e0`, bit 1 is `e1`,
//! bit 2 is `e2`. The metric is degenerate in `e0`:
//!
//! - `e0² = 0` (the projective/ideal direction)
//! - `e1² = e2² = +1`
//!
//! Under this signature grade-1 multivectors represent lines and grade-2
//! multivectors represent points (see the `pga` module).
//!
//! ## Numerical policy
//!
//! Additions drop exact zeros, so an all-cancelled product really is the
//! empty multivector. No epsilon is applied at this layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg};

/// Basis blade key: a 3-bit mask over `{e0, e1, e2}`.
pub type Blade = u8;

/// The scalar blade (grade 0).
pub const SCALAR: Blade = 0b000;
/// The degenerate basis vector `e0`.
pub const E0: Blade = 0b001;
/// The basis vector `e1`.
pub const E1: Blade = 0b010;
/// The basis vector `e2`.
pub const E2: Blade = 0b100;
/// The basis bivector `e0∧e1`.
pub const E01: Blade = 0b011;
/// The basis bivector `e0∧e2`.
pub const E02: Blade = 0b101;
/// The basis bivector `e1∧e2`.
pub const E12: Blade = 0b110;
/// The pseudoscalar `e0∧e1∧e2`.
pub const E012: Blade = 0b111;

/// Number of basis blades in Cl(2,0,1).
pub const BLADE_COUNT: usize = 8;

/// Grade of a basis blade (number of basis vectors in the product).
#[inline]
pub fn grade(blade: Blade) -> u32 {
    blade.count_ones()
}

/// Sign produced by sorting the concatenation of two basis blades into
/// canonical order. `-1` for an odd number of transpositions.
fn reorder_sign(a: Blade, b: Blade) -> f64 {
    let mut a = a >> 1;
    let mut swaps = 0;
    while a != 0 {
        swaps += (a & b).count_ones();
        a >>= 1;
    }
    if swaps % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Product of two basis blades under the Cl(2,0,1) metric.
///
/// Returns `None` when the blades share the degenerate vector `e0`
/// (the term is annihilated), otherwise the resulting blade and its sign.
fn blade_mul(a: Blade, b: Blade) -> Option<(Blade, f64)> {
    if a & b & E0 != 0 {
        return None;
    }
    Some((a ^ b, reorder_sign(a, b)))
}

/// A sparse multivector: a dense coefficient table over the eight basis
/// blades plus an occupancy mask. Absent blades are exactly zero.
///
/// Values are immutable in spirit: every operation returns a fresh `GVec`.
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GVec {
    coef: [f64; BLADE_COUNT],
    mask: u8,
}

impl GVec {
    /// The empty (zero) multivector.
    #[inline]
    pub const fn zero() -> Self {
        Self {
            coef: [0.0; BLADE_COUNT],
            mask: 0,
        }
    }

    /// Build a multivector from `(blade, coefficient)` pairs.
    pub fn from_pairs(pairs: &[(Blade, f64)]) -> Self {
        let mut v = Self::zero();
        for &(blade, value) in pairs {
            v = v.add_val(blade, value);
        }
        v
    }

    /// Insert-or-sum a coefficient at a blade key, dropping zero results.
    #[must_use]
    pub fn add_val(mut self, blade: Blade, value: f64) -> Self {
        let idx = blade as usize;
        let sum = self.coef[idx] + value;
        if sum == 0.0 {
            self.coef[idx] = 0.0;
            self.mask &= !(1 << blade);
        } else {
            self.coef[idx] = sum;
            self.mask |= 1 << blade;
        }
        self
    }

    /// Coefficient at a blade key (zero when absent).
    #[inline]
    pub fn coeff(&self, blade: Blade) -> f64 {
        self.coef[blade as usize]
    }

    /// True when no blade carries a non-zero coefficient.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Iterate over the present `(blade, coefficient)` pairs.
    pub fn terms(&self) -> impl Iterator<Item = (Blade, f64)> + '_ {
        (0..BLADE_COUNT as u8)
            .filter(move |b| self.mask & (1 << b) != 0)
            .map(move |b| (b, self.coef[b as usize]))
    }

    /// Wedge (outer) product. Anticommutative and grade-raising: terms that
    /// share a basis vector vanish.
    #[must_use]
    pub fn wedge(&self, other: &GVec) -> GVec {
        let mut out = GVec::zero();
        for (a, ca) in self.terms() {
            for (b, cb) in other.terms() {
                if a & b != 0 {
                    continue;
                }
                let (blade, sign) = (a ^ b, reorder_sign(a, b));
                out = out.add_val(blade, sign * ca * cb);
            }
        }
        out
    }

    /// Inner product: the grade-`|ga − gb|` part of the geometric product.
    ///
    /// For two grade-1 multivectors this extracts the scalar that decides
    /// parallelism (the cosine of the angle between normalized lines).
    #[must_use]
    pub fn dot(&self, other: &GVec) -> GVec {
        let mut out = GVec::zero();
        for (a, ca) in self.terms() {
            for (b, cb) in other.terms() {
                let target = grade(a).abs_diff(grade(b));
                if let Some((blade, sign)) = blade_mul(a, b) {
                    if grade(blade) == target {
                        out = out.add_val(blade, sign * ca * cb);
                    }
                }
            }
        }
        out
    }

    /// Dual map: swaps each blade with its complement, signs chosen so the
    /// dual of the dual is the identity on every grade.
    #[must_use]
    pub fn dual(&self) -> GVec {
        let mut out = GVec::zero();
        for (a, ca) in self.terms() {
            let comp = !a & E012;
            out = out.add_val(comp, reorder_sign(a, comp) * ca);
        }
        out
    }

    /// Split off the grade-0 part: `(scalar, remainder)`.
    #[must_use]
    pub fn scalarize(&self) -> (f64, GVec) {
        let scalar = self.coeff(SCALAR);
        let mut rest = *self;
        rest.coef[SCALAR as usize] = 0.0;
        rest.mask &= !(1 << SCALAR);
        (scalar, rest)
    }

    /// Pointwise division by a scalar.
    #[must_use]
    pub fn div_scalar(&self, divisor: f64) -> GVec {
        let mut out = GVec::zero();
        for (blade, c) in self.terms() {
            out = out.add_val(blade, c / divisor);
        }
        out
    }
}

impl Add for GVec {
    type Output = GVec;

    /// Pointwise sum, dropping blades that cancel exactly.
    fn add(self, other: GVec) -> GVec {
        let mut out = self;
        for (blade, c) in other.terms() {
            out = out.add_val(blade, c);
        }
        out
    }
}

impl Mul<f64> for GVec {
    type Output = GVec;

    fn mul(self, factor: f64) -> GVec {
        let mut out = GVec::zero();
        for (blade, c) in self.terms() {
            out = out.add_val(blade, c * factor);
        }
        out
    }
}

impl Neg for GVec {
    type Output = GVec;

    fn neg(self) -> GVec {
        self * -1.0
    }
}

impl fmt::Debug for GVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; BLADE_COUNT] =
            ["1", "e0", "e1", "e2", "e01", "e02", "e12", "e012"];
        let mut list = f.debug_list();
        for (blade, c) in self.terms() {
            list.entry(&format_args!("{}*{}", c, NAMES[blade as usize]));
        }
        list.finish()
    }
}
