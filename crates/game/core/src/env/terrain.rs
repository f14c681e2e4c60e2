use std::collections::BTreeMap;

use crate::env::OracleError;
use crate::state::{Cell, GridPos, SurfaceId};

/// Static terrain oracle exposing per-surface ground and height information.
///
/// Heights are resolved once at load time by a loader collaborator; queries
/// here never probe geometry.
pub trait TerrainOracle: Send + Sync {
    fn surface(&self, id: SurfaceId) -> Option<&Surface>;

    fn has_ground(&self, pos: GridPos) -> bool {
        self.surface(pos.surface)
            .is_some_and(|surface| surface.has_ground(pos.cell))
    }

    /// Ground height at `pos`. Defined only where [`TerrainOracle::has_ground`] holds.
    fn height_at(&self, pos: GridPos) -> Option<f32> {
        self.surface(pos.surface)
            .and_then(|surface| surface.height_at(pos.cell))
    }

    fn is_within_bounds(&self, pos: GridPos) -> bool {
        self.surface(pos.surface)
            .is_some_and(|surface| surface.bounds().contains(pos.cell))
    }

    /// World-space `(x, z)` of the cell centre.
    fn world_xz(&self, pos: GridPos) -> Option<(f32, f32)> {
        self.surface(pos.surface)
            .map(|surface| surface.world_xz(pos.cell))
    }
}

/// Cell-space bounds of a surface: `0 <= x < width`, `0 <= z < depth`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub width: u32,
    pub depth: u32,
}

impl GridBounds {
    pub const fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }

    /// Derives bounds from an authored world extent divided by the cell size.
    pub fn from_extent(extent_x: f32, extent_z: f32, cell_size: f32) -> Self {
        let cells = |extent: f32| (extent / cell_size).floor().max(0.0) as u32;
        Self::new(cells(extent_x), cells(extent_z))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && (cell.x as u32) < self.width && (cell.z as u32) < self.depth
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.depth as usize
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.z as usize * self.width as usize + cell.x as usize)
    }
}

/// A contiguous ground region with its own origin and cached height map.
///
/// Cells inside the bounds may still lack ground (holes).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface {
    id: SurfaceId,
    origin: (f32, f32),
    cell_size: f32,
    bounds: GridBounds,
    /// Row-major (`z * width + x`) heights; `None` marks a hole.
    heights: Vec<Option<f32>>,
}

impl Surface {
    /// Creates a surface with no ground anywhere.
    pub fn new(
        id: SurfaceId,
        origin: (f32, f32),
        cell_size: f32,
        bounds: GridBounds,
    ) -> Result<Self, OracleError> {
        if cell_size.is_nan() || cell_size <= 0.0 {
            return Err(OracleError::InvalidCellSize { surface: id });
        }
        Ok(Self {
            id,
            origin,
            cell_size,
            bounds,
            heights: vec![None; bounds.cell_count()],
        })
    }

    /// Creates a surface sized from its world extent, with no ground anywhere.
    pub fn from_extent(
        id: SurfaceId,
        origin: (f32, f32),
        extent: (f32, f32),
        cell_size: f32,
    ) -> Result<Self, OracleError> {
        if cell_size.is_nan() || cell_size <= 0.0 {
            return Err(OracleError::InvalidCellSize { surface: id });
        }
        Self::new(
            id,
            origin,
            cell_size,
            GridBounds::from_extent(extent.0, extent.1, cell_size),
        )
    }

    /// Creates a unit-cell surface from height rows, row `z = 0` first.
    ///
    /// Rows may have different lengths; the surface is as wide as the longest row.
    pub fn from_rows(id: SurfaceId, rows: &[Vec<Option<f32>>]) -> Result<Self, OracleError> {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut surface = Self::new(id, (0.0, 0.0), 1.0, GridBounds::new(width, rows.len() as u32))?;
        for (z, row) in rows.iter().enumerate() {
            for (x, height) in row.iter().enumerate() {
                surface.set_height(Cell::new(x as i32, z as i32), *height)?;
            }
        }
        Ok(surface)
    }

    /// Creates a flat surface of the given size at height zero.
    pub fn flat(id: SurfaceId, width: u32, depth: u32) -> Self {
        Self {
            id,
            origin: (0.0, 0.0),
            cell_size: 1.0,
            bounds: GridBounds::new(width, depth),
            heights: vec![Some(0.0); width as usize * depth as usize],
        }
    }

    pub fn with_origin(mut self, origin: (f32, f32)) -> Self {
        self.origin = origin;
        self
    }

    /// Sets (or removes, with `None`) the ground height of a cell.
    pub fn set_height(&mut self, cell: Cell, height: Option<f32>) -> Result<(), OracleError> {
        let index = self.bounds.index(cell).ok_or(OracleError::OutOfBounds(GridPos::new(
            self.id, cell,
        )))?;
        self.heights[index] = height;
        Ok(())
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn has_ground(&self, cell: Cell) -> bool {
        self.height_at(cell).is_some()
    }

    pub fn height_at(&self, cell: Cell) -> Option<f32> {
        self.bounds.index(cell).and_then(|i| self.heights[i])
    }

    pub fn world_xz(&self, cell: Cell) -> (f32, f32) {
        let half = self.cell_size * 0.5;
        (
            self.origin.0 + cell.x as f32 * self.cell_size + half,
            self.origin.1 + cell.z as f32 * self.cell_size + half,
        )
    }

    /// Iterates cells with ground, row by row.
    pub fn ground_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.bounds.width.max(1) as usize;
        self.heights
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_some())
            .map(move |(i, _)| Cell::new((i % width) as i32, (i / width) as i32))
    }
}

/// Owned collection of surfaces implementing [`TerrainOracle`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    surfaces: BTreeMap<SurfaceId, Surface>,
}

impl Terrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, surface: Surface) -> Result<(), OracleError> {
        let id = surface.id();
        if self.surfaces.contains_key(&id) {
            return Err(OracleError::DuplicateSurface(id));
        }
        self.surfaces.insert(id, surface);
        Ok(())
    }

    pub fn with_surface(mut self, surface: Surface) -> Result<Self, OracleError> {
        self.insert(surface)?;
        Ok(self)
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> + '_ {
        self.surfaces.values()
    }
}

impl TerrainOracle for Terrain {
    fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_come_from_extent_over_cell_size() {
        let bounds = GridBounds::from_extent(10.0, 7.9, 2.0);
        assert_eq!(bounds, GridBounds::new(5, 3));
    }

    #[test]
    fn holes_have_no_ground() {
        let surface = Surface::from_rows(
            SurfaceId(0),
            &[vec![Some(0.0), None], vec![Some(1.5)]],
        )
        .unwrap();
        assert!(surface.has_ground(Cell::new(0, 0)));
        assert!(!surface.has_ground(Cell::new(1, 0)));
        assert!(!surface.has_ground(Cell::new(1, 1)));
        assert_eq!(surface.height_at(Cell::new(0, 1)), Some(1.5));
        assert!(!surface.has_ground(Cell::new(-1, 0)));
    }

    #[test]
    fn terrain_routes_queries_by_surface() {
        let terrain = Terrain::new()
            .with_surface(Surface::flat(SurfaceId(0), 2, 2))
            .unwrap()
            .with_surface(Surface::flat(SurfaceId(3), 1, 1).with_origin((100.0, 0.0)))
            .unwrap();

        let far = GridPos::new(SurfaceId(3), Cell::new(0, 0));
        assert!(terrain.has_ground(far));
        assert!(!terrain.is_within_bounds(GridPos::new(SurfaceId(3), Cell::new(1, 0))));
        assert!(!terrain.has_ground(GridPos::new(SurfaceId(9), Cell::ORIGIN)));
        assert_eq!(terrain.world_xz(far), Some((100.5, 0.5)));
    }

    #[test]
    fn duplicate_surface_is_rejected() {
        let mut terrain = Terrain::new();
        terrain.insert(Surface::flat(SurfaceId(1), 1, 1)).unwrap();
        assert_eq!(
            terrain.insert(Surface::flat(SurfaceId(1), 1, 1)),
            Err(OracleError::DuplicateSurface(SurfaceId(1)))
        );
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        assert!(Surface::from_extent(SurfaceId(0), (0.0, 0.0), (4.0, 4.0), 0.0).is_err());
    }
}
