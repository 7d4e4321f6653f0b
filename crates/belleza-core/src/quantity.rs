//! # Quantity Module
//!
//! Provides the `Quantity` type for stock amounts.
//!
//! ## Why Thousandths?
//! Articles sold by weight carry fractional stock (e.g. 1.250 kg of bath
//! salts). The legacy schema stored stock as `DECIMAL(10,3)`; we keep the
//! same precision as an integer count of thousandths, for the same reason
//! [`crate::money::Money`] stores cents: exact arithmetic, exact
//! comparisons against minimum-stock thresholds.
//!
//! ## Usage
//! ```rust
//! use belleza_core::quantity::Quantity;
//!
//! let on_hand = Quantity::from_units(12);          // 12.000
//! let weighed = Quantity::from_thousandths(1250);  // 1.250
//!
//! assert_eq!((on_hand + weighed).thousandths(), 13_250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A stock quantity in thousandths of a sale unit.
///
/// For `SaleUnit::Unit` articles the fractional part is always zero in
/// practice; for `SaleUnit::Weight` articles it carries grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths of a unit.
    #[inline]
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Quantity(thousandths)
    }

    /// Creates a quantity from whole units.
    ///
    /// ## Example
    /// ```rust
    /// use belleza_core::quantity::Quantity;
    ///
    /// assert_eq!(Quantity::from_units(5).thousandths(), 5000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * 1000)
    }

    /// Returns the raw count of thousandths.
    #[inline]
    pub const fn thousandths(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 1000
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Checks if the quantity is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the quantity is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the quantity is negative (less than zero).
    ///
    /// A negative quantity is never persisted; this exists so adjustment
    /// logic can reject a decrement before it commits.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

/// Display shows the quantity with three decimals, e.g. "1.250".
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:03}", sign, self.units().abs(), (self.0 % 1000).abs())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

impl SubAssign for Quantity {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units_and_thousandths() {
        assert_eq!(Quantity::from_units(12).thousandths(), 12_000);
        assert_eq!(Quantity::from_thousandths(1250).units(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Quantity::from_thousandths(1250)), "1.250");
        assert_eq!(format!("{}", Quantity::from_units(3)), "3.000");
        assert_eq!(format!("{}", Quantity::from_thousandths(-500)), "-0.500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Quantity::from_units(10);
        let b = Quantity::from_thousandths(2500);

        assert_eq!((a + b).thousandths(), 12_500);
        assert_eq!((a - b).thousandths(), 7_500);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Quantity::zero().is_zero());
        assert!(Quantity::from_units(1).is_positive());
        assert!((Quantity::zero() - Quantity::from_units(1)).is_negative());
    }
}
