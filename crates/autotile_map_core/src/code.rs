//! Corner adjacency codes
//!
//! An autotile sheet encodes one logical tile as several square frames, each
//! drawn so that some subset of its four corners visually connects to a
//! neighboring tile. The subset is identified by a 4-bit code with the
//! top-left corner in the most significant bit.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The four corners of a tile frame, in code bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners, most significant bit first.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The bit this corner occupies in an [`AdjacencyCode`].
    pub const fn bit(self) -> u8 {
        match self {
            Corner::TopLeft => 0b1000,
            Corner::TopRight => 0b0100,
            Corner::BottomLeft => 0b0010,
            Corner::BottomRight => 0b0001,
        }
    }
}

/// Error for code values outside the 4-bit range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("adjacency code {0} is out of range (expected 0..=15)")]
pub struct CodeOutOfRange(pub u8);

/// 4-bit corner connectivity code
///
/// One bit per corner in the order top-left, top-right, bottom-left,
/// bottom-right (top-left most significant); a set bit means the corner is
/// filled. Derived once per frame at decode time and immutable afterwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct AdjacencyCode(u8);

impl AdjacencyCode {
    /// Number of distinct codes.
    pub const COUNT: usize = 16;

    /// No corner filled.
    pub const EMPTY: AdjacencyCode = AdjacencyCode(0b0000);

    /// All four corners filled.
    pub const FULL: AdjacencyCode = AdjacencyCode(0b1111);

    /// Build a code from a raw bit pattern in `0..=15`.
    pub fn from_bits(bits: u8) -> Result<Self, CodeOutOfRange> {
        if bits > 0b1111 {
            Err(CodeOutOfRange(bits))
        } else {
            Ok(Self(bits))
        }
    }

    /// Build a code from the four corner flags.
    pub fn from_corners(tl: bool, tr: bool, bl: bool, br: bool) -> Self {
        let mut bits = 0u8;
        for (filled, corner) in [tl, tr, bl, br].into_iter().zip(Corner::ALL) {
            if filled {
                bits |= corner.bit();
            }
        }
        Self(bits)
    }

    /// The raw 4-bit pattern.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the given corner is filled.
    pub const fn has(self, corner: Corner) -> bool {
        self.0 & corner.bit() != 0
    }

    /// All 16 codes in ascending bit order.
    pub fn all() -> impl Iterator<Item = AdjacencyCode> {
        (0..Self::COUNT as u8).map(AdjacencyCode)
    }
}

impl TryFrom<u8> for AdjacencyCode {
    type Error = CodeOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_bits(value)
    }
}

impl From<AdjacencyCode> for u8 {
    fn from(code: AdjacencyCode) -> Self {
        code.bits()
    }
}

impl fmt::Display for AdjacencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06b}", self.0)
    }
}
