//! # Axis Pairs
//!
//! A copy frame is built from a primary direction (face-normal-like) and a
//! secondary, tangential one. An [`AxisPair`] names which local axes of the
//! template receive them: the first letter gets the primary direction, the
//! second the secondary.

use crate::error::{KernelError, KernelResult};
use crate::math::{Matrix4, Vector3};
use glam::DMat3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered pair of distinct axis letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisPair {
    XY,
    XZ,
    YX,
    YZ,
    #[default]
    ZX,
    ZY,
}

impl AxisPair {
    /// All six pairs.
    pub const ALL: [AxisPair; 6] = [
        Self::XY,
        Self::XZ,
        Self::YX,
        Self::YZ,
        Self::ZX,
        Self::ZY,
    ];

    /// Rows receiving `(xdir, y, zdir)` before the transpose.
    pub fn rows(self) -> [usize; 3] {
        match self {
            Self::XY => [1, 2, 0],
            Self::YX => [0, 2, 1],
            Self::XZ => [2, 1, 0],
            Self::ZX => [0, 1, 2],
            Self::YZ => [2, 0, 1],
            Self::ZY => [1, 0, 2],
        }
    }

    /// Local axis index (0 = X) mapped to the primary direction.
    pub fn primary(self) -> usize {
        self.rows()[2]
    }

    /// Local axis index (0 = X) mapped to the secondary direction.
    pub fn secondary(self) -> usize {
        self.rows()[0]
    }

    /// Two-letter name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::XY => "XY",
            Self::XZ => "XZ",
            Self::YX => "YX",
            Self::YZ => "YZ",
            Self::ZX => "ZX",
            Self::ZY => "ZY",
        }
    }

    /// Parses a two-letter name, case-insensitively.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen_kernel::math::AxisPair;
    ///
    /// assert_eq!(AxisPair::parse("xz").unwrap(), AxisPair::XZ);
    /// assert!(AxisPair::parse("XX").is_err());
    /// ```
    pub fn parse(name: &str) -> KernelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|pair| pair.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| KernelError::invalid_argument(format!("unknown axis pair `{name}`")))
    }
}

impl FromStr for AxisPair {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AxisPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rotation taking template axes to world directions.
///
/// `x`, `y` and `z` are written into the rows picked by `axes`, then the
/// matrix is transposed so it maps basis to world; the transposed rows are
/// the columns handed to `glam`.
pub fn basis_matrix(x: Vector3, y: Vector3, z: Vector3, axes: AxisPair) -> Matrix4 {
    let [x_row, y_row, z_row] = axes.rows();
    let mut rows = [Vector3::ZERO; 3];
    rows[x_row] = x;
    rows[y_row] = y;
    rows[z_row] = z;
    Matrix4::from_mat3(DMat3::from_cols(rows[0], rows[1], rows[2]))
}
