//! Terrain loader.
//!
//! A terrain file lists one or more surfaces. Heights are authored as text
//! rows, row `z = 0` first, with whitespace-separated numbers per cell and
//! `_` (or `.`) for a hole:
//!
//! ```text
//! (
//!     surfaces: [
//!         (
//!             id: 0,
//!             cell_size: 1.0,
//!             heights: [
//!                 "0 0 1 _",
//!                 "0 0 2 2",
//!             ],
//!         ),
//!     ],
//! )
//! ```
//!
//! Bounds come from `extent` (world units divided by `cell_size`) when
//! given, otherwise from the rows themselves.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{Cell, GridBounds, Surface, SurfaceId, Terrain};

use crate::loaders::{LoadResult, read_file};

/// Terrain file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TerrainRon {
    surfaces: Vec<SurfaceRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SurfaceRon {
    id: u16,
    #[serde(default)]
    origin: (f32, f32),
    #[serde(default = "default_cell_size")]
    cell_size: f32,
    #[serde(default)]
    extent: Option<(f32, f32)>,
    heights: Vec<String>,
}

fn default_cell_size() -> f32 {
    1.0
}

/// Loader for terrain from RON files.
pub struct TerrainLoader;

impl TerrainLoader {
    /// Load terrain from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing the surface list
    ///
    /// # Returns
    ///
    /// Returns a Terrain holding every surface in the file.
    pub fn load(path: &Path) -> LoadResult<Terrain> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load terrain from {}: {}", path.display(), e))
    }

    /// Parse terrain from RON text.
    pub fn parse(content: &str) -> LoadResult<Terrain> {
        let data: TerrainRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse terrain RON: {}", e))?;

        let mut terrain = Terrain::new();
        for surface in data.surfaces {
            terrain.insert(build_surface(surface)?)?;
        }
        Ok(terrain)
    }
}

fn build_surface(data: SurfaceRon) -> LoadResult<Surface> {
    let id = SurfaceId(data.id);
    let rows = data
        .heights
        .iter()
        .enumerate()
        .map(|(z, row)| parse_row(row).map_err(|e| anyhow::anyhow!("{} row {}: {}", id, z, e)))
        .collect::<LoadResult<Vec<_>>>()?;

    let mut surface = match data.extent {
        Some(extent) => Surface::from_extent(id, data.origin, extent, data.cell_size)?,
        None => {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
            let bounds = GridBounds::new(width, rows.len() as u32);
            Surface::new(id, data.origin, data.cell_size, bounds)?
        }
    };

    for (z, row) in rows.iter().enumerate() {
        for (x, height) in row.iter().enumerate() {
            surface.set_height(Cell::new(x as i32, z as i32), *height)?;
        }
    }
    Ok(surface)
}

fn parse_row(row: &str) -> LoadResult<Vec<Option<f32>>> {
    row.split_whitespace()
        .map(|token| match token {
            "_" | "." => Ok(None),
            number => {
                let height: f32 = number
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid height '{}'", number))?;
                if height.is_finite() {
                    Ok(Some(height))
                } else {
                    Err(anyhow::anyhow!("invalid height '{}'", number))
                }
            }
        })
        .collect()
}
