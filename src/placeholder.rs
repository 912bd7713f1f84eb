//! Placeholder Layer
//!
//! Decorative "unused circuit" markers tiled around or behind the lattice.
//! Purely cosmetic: any tiling is acceptable as long as placeholders never
//! cover a real element, which the negative stacking order guarantees.
//!

use super::elements::*;
use super::util::*;
use serde::{Deserialize, Serialize};

/// where the placeholder grid goes relative to the lattice bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderMode {
    /// solid markers tiled to the right of the canvas
    GridBesideCanvas,
    /// solid markers tiled below the canvas
    GridBelowCanvas,
    /// faded dashed outlines stretched across the whole canvas
    BackgroundScatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    /// how many markers to tile
    pub count: u32,
    pub mode: PlaceholderMode,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            count: 16,
            mode: PlaceholderMode::GridBesideCanvas,
        }
    }
}

/// tiling columns of the beside and below grids
const GRID_COLUMNS: u32 = 8;
/// tiling columns of the background scatter
const SCATTER_COLUMNS: u32 = 40;
/// extra spacing around a marker in the beside and below grids
const GRID_SPACING: u32 = 40;
/// margin between the lattice bounding box and a side grid
const GRID_MARGIN: Coordinate = 150.;
/// inset of a side grid along its secondary axis
const GRID_INSET: Coordinate = 100.;

/// tiles `count` placeholder markers relative to the lattice bounding box;
/// pure function, ids are `unused-{i}` (grids) or `unused-bg-{i}` (scatter)
pub fn build_placeholders(
    config: &PlaceholderConfig,
    marker_size: u32,
    anchor_width: Coordinate,
    anchor_height: Coordinate,
) -> Vec<Element> {
    if config.count == 0 {
        return Vec::new();
    }
    let size = marker_size as Coordinate;
    let mut elements = Vec::with_capacity(config.count as usize);
    match config.mode {
        PlaceholderMode::GridBesideCanvas | PlaceholderMode::GridBelowCanvas => {
            let (start_x, start_y) = match config.mode {
                PlaceholderMode::GridBesideCanvas => (anchor_width + GRID_MARGIN, GRID_INSET),
                _ => (GRID_INSET, anchor_height + GRID_MARGIN),
            };
            let spacing = (marker_size + GRID_SPACING) as Coordinate;
            for i in 0..config.count {
                let row = i / GRID_COLUMNS;
                let col = i % GRID_COLUMNS;
                elements.push(Element::new(
                    format!("unused-{i}"),
                    ElementKind::UnusedPlaceholder,
                    start_x + col as Coordinate * spacing,
                    start_y + row as Coordinate * spacing,
                    size,
                    size,
                    ElementStyle::placeholder_marker(),
                ));
            }
        }
        PlaceholderMode::BackgroundScatter => {
            let rows = (config.count + SCATTER_COLUMNS - 1) / SCATTER_COLUMNS;
            let spacing_x = anchor_width / SCATTER_COLUMNS as Coordinate;
            let spacing_y = anchor_height / rows as Coordinate;
            for i in 0..config.count {
                let row = i / SCATTER_COLUMNS;
                let col = i % SCATTER_COLUMNS;
                elements.push(Element::new(
                    format!("unused-bg-{i}"),
                    ElementKind::UnusedPlaceholder,
                    col as Coordinate * spacing_x,
                    row as Coordinate * spacing_y,
                    size,
                    size,
                    ElementStyle::placeholder_outline(),
                ));
            }
        }
    }
    elements
}
