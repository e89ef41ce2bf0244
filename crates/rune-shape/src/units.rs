//! Fixed-point distances used for every width and offset in the crate.
//!
//! A [`GlyphUnit`] is 1/[`SCALE`] of a device unit (a pixel on screen, a
//! point on paper). Shaping backends produce floating point advances; they
//! are converted once, at the boundary, and everything downstream stays in
//! integer arithmetic so that widths sum exactly.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Number of glyph units per device unit.
pub const SCALE: i32 = 1024;

/// Signed fixed-point distance, `SCALE` sub-units per device unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphUnit(pub i32);

impl GlyphUnit {
    pub const ZERO: GlyphUnit = GlyphUnit(0);

    /// Whole device units.
    pub const fn from_device_units(units: i32) -> Self {
        GlyphUnit(units * SCALE)
    }

    /// Fractional device units, rounded to the nearest glyph unit.
    pub fn from_f32(device_units: f32) -> Self {
        GlyphUnit((device_units * SCALE as f32).round() as i32)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert to device units, rounding to nearest.
    pub const fn pixels(self) -> i32 {
        (self.0 + (SCALE >> 1)) >> 10
    }

    /// Round to a whole number of device units, keeping the scale.
    pub const fn round_to_device_unit(self) -> Self {
        GlyphUnit((self.0 + (SCALE >> 1)) & !(SCALE - 1))
    }

    /// True when the value is an exact multiple of a device unit.
    pub const fn is_device_aligned(self) -> bool {
        self.0 & (SCALE - 1) == 0
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / SCALE as f32
    }

    pub const fn abs(self) -> Self {
        GlyphUnit(self.0.abs())
    }
}

impl Add for GlyphUnit {
    type Output = GlyphUnit;
    fn add(self, rhs: GlyphUnit) -> GlyphUnit {
        GlyphUnit(self.0 + rhs.0)
    }
}

impl AddAssign for GlyphUnit {
    fn add_assign(&mut self, rhs: GlyphUnit) {
        self.0 += rhs.0;
    }
}

impl Sub for GlyphUnit {
    type Output = GlyphUnit;
    fn sub(self, rhs: GlyphUnit) -> GlyphUnit {
        GlyphUnit(self.0 - rhs.0)
    }
}

impl SubAssign for GlyphUnit {
    fn sub_assign(&mut self, rhs: GlyphUnit) {
        self.0 -= rhs.0;
    }
}

impl Neg for GlyphUnit {
    type Output = GlyphUnit;
    fn neg(self) -> GlyphUnit {
        GlyphUnit(-self.0)
    }
}

impl Mul<i32> for GlyphUnit {
    type Output = GlyphUnit;
    fn mul(self, rhs: i32) -> GlyphUnit {
        GlyphUnit(self.0 * rhs)
    }
}

impl Div<i32> for GlyphUnit {
    type Output = GlyphUnit;
    fn div(self, rhs: i32) -> GlyphUnit {
        GlyphUnit(self.0 / rhs)
    }
}

impl Sum for GlyphUnit {
    fn sum<I: Iterator<Item = GlyphUnit>>(iter: I) -> GlyphUnit {
        iter.fold(GlyphUnit::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a GlyphUnit> for GlyphUnit {
    fn sum<I: Iterator<Item = &'a GlyphUnit>>(iter: I) -> GlyphUnit {
        iter.copied().sum()
    }
}

/// Axis-aligned rectangle in glyph units. `y` grows downward, so the
/// logical rectangle of a glyph usually has a negative `y` (the ascent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: GlyphUnit,
    pub y: GlyphUnit,
    pub width: GlyphUnit,
    pub height: GlyphUnit,
}

impl Rectangle {
    pub const fn new(x: GlyphUnit, y: GlyphUnit, width: GlyphUnit, height: GlyphUnit) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == GlyphUnit::ZERO || self.height == GlyphUnit::ZERO
    }

    pub fn right(&self) -> GlyphUnit {
        self.x + self.width
    }

    pub fn bottom(&self) -> GlyphUnit {
        self.y + self.height
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rectangle {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    pub fn translate(&self, dx: GlyphUnit, dy: GlyphUnit) -> Rectangle {
        Rectangle {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
