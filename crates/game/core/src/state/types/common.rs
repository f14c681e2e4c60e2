use std::fmt;

use arrayvec::ArrayVec;

/// Stable identity of a unit taking part in the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a contiguous ground region (a floating platform, an island...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceId(pub u16);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface:{}", self.0)
    }
}

/// Discrete grid coordinate within a surface.
///
/// `x` grows east, `z` grows north.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { x: 0, z: 0 };

    /// Offsets of the 8-neighbourhood, orthogonals first, in a fixed order.
    pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
        (0, 1),
        (1, 0),
        (0, -1),
        (-1, 0),
        (1, 1),
        (1, -1),
        (-1, -1),
        (-1, 1),
    ];

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Manhattan distance, saturating at `u32::MAX` for cells far apart.
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.z.abs_diff(other.z))
    }

    pub fn is_diagonal_to(self, other: Cell) -> bool {
        self.x != other.x && self.z != other.z
    }

    /// The 8 surrounding cells in [`Cell::NEIGHBOR_OFFSETS`] order.
    pub fn neighbors(self) -> ArrayVec<Cell, 8> {
        Self::NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dz)| self.offset(dx, dz))
            .collect()
    }

    /// The cell adjacent to `self` on the side facing `from`.
    ///
    /// Each axis of `from - self` is clamped to `[-1, 1]`.
    pub fn adjacent_toward(self, from: Cell) -> Cell {
        self.offset((from.x - self.x).clamp(-1, 1), (from.z - self.z).clamp(-1, 1))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A cell scoped to the surface it lives on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub surface: SurfaceId,
    pub cell: Cell,
}

impl GridPos {
    pub const fn new(surface: SurfaceId, cell: Cell) -> Self {
        Self { surface, cell }
    }

    pub fn with_cell(self, cell: Cell) -> Self {
        Self {
            surface: self.surface,
            cell,
        }
    }

    /// Manhattan distance, or `None` when the positions lie on different surfaces.
    pub fn manhattan(self, other: GridPos) -> Option<u32> {
        (self.surface == other.surface).then(|| self.cell.manhattan(other.cell))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.cell, self.surface)
    }
}

/// Orthogonal direction on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    /// Fixed probing order used wherever a direction fallback is needed.
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }

    pub fn step(self, cell: Cell) -> Cell {
        let (dx, dz) = self.delta();
        cell.offset(dx, dz)
    }
}
