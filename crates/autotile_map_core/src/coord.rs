//! Integer grid coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the tile grid, one grid unit per tile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<GridPos> for (i32, i32) {
    fn from(pos: GridPos) -> Self {
        (pos.x, pos.y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_conversions() {
        let pos: GridPos = (3, -2).into();
        assert_eq!(pos, GridPos::new(3, -2));
        assert_eq!(<(i32, i32)>::from(pos), (3, -2));
    }
}
