//! Q8.8 fixed-point numbers, used only to report compression ratios.

use core::fmt;

/// Number of fractional bits in a [`Q8_8`].
const FRAC_BITS: u32 = 8;

/// Unsigned fixed-point value with 8 integer and 8 fractional bits.
///
/// All arithmetic saturates at [`Q8_8::MAX`] instead of wrapping.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Q8_8(u16);

impl Q8_8 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << FRAC_BITS);
    pub const MAX: Self = Self(u16::MAX);

    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn from_int(value: u8) -> Self {
        Self((value as u16) << FRAC_BITS)
    }

    #[must_use]
    pub const fn integer_part(self) -> u8 {
        (self.0 >> FRAC_BITS) as u8
    }

    /// The 8 fractional bits, in 1/256 units.
    #[must_use]
    pub const fn fraction_bits(self) -> u8 {
        self.0 as u8
    }

    /// Computes `a / b` as a fixed-point quotient, truncating toward zero.
    ///
    /// Division by zero yields [`Q8_8::MAX`].
    #[must_use]
    pub const fn divide(a: usize, b: usize) -> Self {
        if b == 0 {
            return Self::MAX;
        }
        // u128 keeps the shift from overflowing on 64-bit usize.
        let q = ((a as u128) << FRAC_BITS) / b as u128;
        if q > u16::MAX as u128 {
            Self::MAX
        } else {
            Self(q as u16)
        }
    }

    #[must_use]
    pub const fn multiply(self, rhs: Self) -> Self {
        let p = (self.0 as u32 * rhs.0 as u32) >> FRAC_BITS;
        if p > u16::MAX as u32 {
            Self::MAX
        } else {
            Self(p as u16)
        }
    }
}

impl fmt::Display for Q8_8 {
    /// Formats with two decimals, truncated (e.g. `0x0040` is `0.25`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hundredths = (u32::from(self.fraction_bits()) * 100) >> FRAC_BITS;
        write!(f, "{}.{:02}", self.integer_part(), hundredths)
    }
}

/// Ratio of compressed to original size; `1.0` when `original_size` is zero.
#[must_use]
pub const fn calculate_ratio(original_size: usize, compressed_size: usize) -> Q8_8 {
    if original_size == 0 {
        Q8_8::ONE
    } else {
        Q8_8::divide(compressed_size, original_size)
    }
}
