//! Cartesian axis vocabulary.
//!
//! `Axis` identifies one of the three Cartesian axes, `AxisMask` is the
//! bitflag form used wherever a set of axes travels together (homed-axes
//! bookkeeping, position overrides), and `Coord` is the plain coordinate
//! triple exchanged with the motion pipeline.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::consts::AXIS_COUNT;

/// Cartesian position triple, indexed by [`Axis::index`].
pub type Coord = [f64; AXIS_COUNT];

/// One Cartesian axis.
///
/// The discriminant doubles as the coordinate index into a [`Coord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// All axes in coordinate order.
    pub const ALL: [Self; AXIS_COUNT] = [Self::X, Self::Y, Self::Z];

    /// Convert from a coordinate index. Returns `None` for invalid values.
    #[inline]
    pub const fn from_index(value: usize) -> Option<Self> {
        match value {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }

    /// Parse a lowercase axis letter.
    #[inline]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'x' => Some(Self::X),
            'y' => Some(Self::Y),
            'z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Coordinate index into a [`Coord`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase axis letter, as used in rail names and status reports.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
        }
    }

    /// Single-axis mask.
    #[inline]
    pub const fn mask(self) -> AxisMask {
        match self {
            Self::X => AxisMask::X,
            Self::Y => AxisMask::Y,
            Self::Z => AxisMask::Z,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

bitflags! {
    /// Set of Cartesian axes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisMask: u8 {
        const X = 0x01;
        const Y = 0x02;
        const Z = 0x04;
    }
}

impl AxisMask {
    /// Mask of all three axes.
    pub const XYZ: Self =
        Self::from_bits_truncate(Self::X.bits() | Self::Y.bits() | Self::Z.bits());

    /// Returns true if the given axis is in the set.
    #[inline]
    pub const fn contains_axis(&self, axis: Axis) -> bool {
        self.intersects(axis.mask())
    }

    /// Lowercase letters of the contained axes in `xyz` order.
    pub fn letters(&self) -> String {
        Axis::ALL
            .iter()
            .filter(|axis| self.contains_axis(**axis))
            .map(|axis| axis.letter())
            .collect()
    }
}

impl Default for AxisMask {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Axis> for AxisMask {
    fn from(axis: Axis) -> Self {
        axis.mask()
    }
}
