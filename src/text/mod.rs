//! Fixed-width block encoding of text units on top of the scalar layer.
//!
//! Every unit (a byte or a Unicode code point) becomes exactly
//! [`block_width`] digits, left padded with the alphabet's zero digit, so an
//! encoded string can be split back into units without separators.

pub mod decode;
pub mod encode;

pub use decode::Decoder;
pub use encode::Encoder;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Unit {
    Byte,
    CodePoint,
}

impl Unit {
    /// Number of distinct values a single unit may take.
    pub const fn space(self) -> u64 {
        match self {
            Unit::Byte => 0x100,
            Unit::CodePoint => 0x11_0000,
        }
    }
}

/// Smallest `width` such that `base.pow(width) >= unit.space()`.
///
/// `base` must be at least 2, which every [`Alphabet`](crate::Alphabet) guarantees.
pub const fn block_width(base: u64, unit: Unit) -> usize {
    let space = unit.space();
    let mut width = 1;
    let mut capacity = base;
    while capacity < space {
        capacity = capacity.saturating_mul(base);
        width += 1;
    }
    width
}
