//! Layout Elements
//!
//! Positioned, typed shapes handed to an external diagram renderer.
//! Each element carries its id, kind, box geometry and enough style metadata
//! (fill, shape, stacking order) for the renderer to draw it without any
//! lattice knowledge.
//!

use super::util::*;
use serde::{Deserialize, Serialize};

/// background of an internal cell whose stabilizer is X type
pub const X_REGION_COLOR: &str = "#fca5a5";
/// background of an internal cell whose stabilizer is Z type
pub const Z_REGION_COLOR: &str = "#86efac";
/// measurement circles: stabilizer markers and boundary qubits
pub const MEASUREMENT_COLOR: &str = "#64748b";
/// data qubit fill
pub const DATA_QUBIT_COLOR: &str = "#ffffff";
/// data qubit ring
pub const DATA_QUBIT_BORDER_COLOR: &str = "#1e293b";
/// dashed outline of scattered placeholder circuits
pub const PLACEHOLDER_OUTLINE_COLOR: &str = "#e2e8f0";

/// every element category a layout can contain; serialized names match the
/// node type strings the rendering surface expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    DataQubit,
    XStabilizer,
    ZStabilizer,
    BoundaryQubit,
    BackgroundCell,
    BoundaryTriangle,
    UnusedPlaceholder,
}

/// which way a boundary triangle points, away from the patch interior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleDirection {
    Up,
    Down,
    Left,
    Right,
}

impl TriangleDirection {
    /// CSS clip path that carves the wedge out of its bounding box
    pub fn clip_path(&self) -> &'static str {
        match self {
            Self::Up => "polygon(0% 100%, 50% 0%, 100% 100%)",
            Self::Down => "polygon(0% 0%, 50% 100%, 100% 0%)",
            Self::Left => "polygon(100% 0%, 0% 50%, 100% 100%)",
            Self::Right => "polygon(0% 0%, 100% 50%, 0% 100%)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Square,
    Triangle(TriangleDirection),
}

/// style metadata attached to every element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// fill color, CSS notation
    pub fill: String,
    pub shape: Shape,
    /// stacking order, larger draws on top
    pub z_index: i32,
    /// optional CSS border
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// optional opacity, defaults to fully opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl ElementStyle {
    fn solid(fill: &str, shape: Shape, z_index: i32) -> Self {
        Self {
            fill: fill.to_string(),
            shape,
            z_index,
            border: None,
            opacity: None,
        }
    }

    /// white ring on the lattice vertex, drawn above everything else
    pub fn data_qubit() -> Self {
        Self {
            border: Some(format!("3px solid {}", DATA_QUBIT_BORDER_COLOR)),
            ..Self::solid(DATA_QUBIT_COLOR, Shape::Circle, 20)
        }
    }

    /// dark measurement circle centered in its background cell
    pub fn stabilizer() -> Self {
        Self::solid(MEASUREMENT_COLOR, Shape::Circle, 10)
    }

    /// dark circle just outside a patch edge
    pub fn boundary_qubit() -> Self {
        Self::solid(MEASUREMENT_COLOR, Shape::Circle, 5)
    }

    /// checkerboard cell behind a stabilizer marker
    pub fn background_cell(is_x: bool) -> Self {
        let fill = if is_x { X_REGION_COLOR } else { Z_REGION_COLOR };
        Self::solid(fill, Shape::Square, 1)
    }

    /// wedge closing the lattice at a patch edge, color matched to the
    /// stabilizer region it extends
    pub fn boundary_triangle(direction: TriangleDirection) -> Self {
        let fill = match direction {
            TriangleDirection::Up | TriangleDirection::Down => X_REGION_COLOR,
            TriangleDirection::Left | TriangleDirection::Right => Z_REGION_COLOR,
        };
        Self::solid(fill, Shape::Triangle(direction), 1)
    }

    /// solid placeholder marker for the side and below grids
    pub fn placeholder_marker() -> Self {
        Self::solid(MEASUREMENT_COLOR, Shape::Circle, -10)
    }

    /// dashed faded placeholder outline for the background scatter
    pub fn placeholder_outline() -> Self {
        Self {
            fill: "transparent".to_string(),
            shape: Shape::Circle,
            z_index: -10,
            border: Some(format!("1.5px dashed {}", PLACEHOLDER_OUTLINE_COLOR)),
            opacity: Some(0.35),
        }
    }
}

/// a positioned, typed shape; immutable once produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// unique within one layout; a deterministic function of the patch
    /// ordinal and local coordinates, stable across recomputations
    pub id: String,
    pub kind: ElementKind,
    /// top-left corner
    pub x: Coordinate,
    pub y: Coordinate,
    pub width: Coordinate,
    pub height: Coordinate,
    pub style: ElementStyle,
}

impl Element {
    pub fn new(
        id: String,
        kind: ElementKind,
        x: Coordinate,
        y: Coordinate,
        width: Coordinate,
        height: Coordinate,
        style: ElementStyle,
    ) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            width,
            height,
            style,
        }
    }
}
