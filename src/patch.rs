//! Patch Lattice
//!
//! This module builds the patch grid of a multi-logical-qubit surface code
//! layout and the positioned elements of every patch: checkerboard background
//! cells, centered stabilizer markers, data qubits on the lattice vertices,
//! boundary qubits outside each edge and the boundary triangles that close
//! the lattice visually.
//!
//! For a patch of distance d there are exactly d² data qubits and (d−1)²
//! stabilizer markers, X or Z by the parity of the internal cell coordinates.
//!

use super::elements::*;
use super::util::*;
use serde::{Deserialize, Serialize};

/// one logical qubit's square lattice instance within the overall layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    /// canvas offset of the patch's (0, 0) lattice vertex
    pub offset_x: Coordinate,
    pub offset_y: Coordinate,
    /// code distance of this patch
    pub distance: u32,
}

/// the four patch edges that carry boundary decorations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundarySide {
    Top,
    Bottom,
    Left,
    Right,
}

impl BoundarySide {
    pub const ALL: [BoundarySide; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// the direction a triangle on this side points, away from the patch
    pub fn outward(&self) -> TriangleDirection {
        match self {
            Self::Top => TriangleDirection::Up,
            Self::Bottom => TriangleDirection::Down,
            Self::Left => TriangleDirection::Left,
            Self::Right => TriangleDirection::Right,
        }
    }
}

/// which internal cell indices along each patch edge receive a boundary
/// triangle; an explicit policy instead of per-distance hard-coded lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// top and right sides take odd cell indices, bottom and left take even
    /// ones; yields 1 triangle per side at d=3 and 2 per side at d=5
    Alternating,
    /// caller-pinned per-side index lists
    Explicit {
        top: Vec<CellIndex>,
        bottom: Vec<CellIndex>,
        left: Vec<CellIndex>,
        right: Vec<CellIndex>,
    },
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self::Alternating
    }
}

impl BoundaryPolicy {
    /// the internal cell indices along `side` that receive a triangle,
    /// ascending; deterministic for a fixed distance
    pub fn triangle_positions(&self, distance: u32, side: BoundarySide) -> Vec<CellIndex> {
        let cells = (distance - 1) as CellIndex;
        match self {
            Self::Alternating => {
                let start = match side {
                    BoundarySide::Top | BoundarySide::Right => 1,
                    BoundarySide::Bottom | BoundarySide::Left => 0,
                };
                (start..cells).step_by(2).collect()
            }
            Self::Explicit { top, bottom, left, right } => match side {
                BoundarySide::Top => top.clone(),
                BoundarySide::Bottom => bottom.clone(),
                BoundarySide::Left => left.clone(),
                BoundarySide::Right => right.clone(),
            },
        }
    }

    /// explicit index lists must stay within the patch's internal cells
    pub fn sanity_check(&self, distance: u32) -> Result<(), InvalidParameter> {
        if let Self::Explicit { .. } = self {
            let cells = (distance - 1) as CellIndex;
            for side in BoundarySide::ALL {
                for index in self.triangle_positions(distance, side) {
                    if index >= cells {
                        return Err(InvalidParameter::new(
                            "boundary",
                            format!(
                                "{} triangle index {} out of range for distance {}",
                                side.name(),
                                index,
                                distance
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// builds the rows × cols_per_row patches in row-major order; the offset
/// step leaves `gap` between the bounding lattices of adjacent patches
pub fn build_patches(params: &LayoutParams) -> Result<Vec<Patch>, InvalidParameter> {
    params.sanity_check()?;
    let step = ((params.distance - 1) * params.cell_size + params.gap) as Coordinate;
    let mut patches = Vec::with_capacity((params.rows * params.cols_per_row) as usize);
    for row in 0..params.rows {
        for col in 0..params.cols_per_row {
            patches.push(Patch {
                offset_x: col as Coordinate * step,
                offset_y: row as Coordinate * step,
                distance: params.distance,
            });
        }
    }
    Ok(patches)
}

/// builds every element of one patch, a pure function of its inputs.
/// element ids carry the patch ordinal and local coordinates so patches
/// sharing a canvas never collide
pub fn build_patch_elements(patch: &Patch, index: PatchIndex, params: &LayoutParams) -> Vec<Element> {
    let d = patch.distance as CellIndex;
    let cells = d - 1;
    let cell = params.cell_size as Coordinate;
    let qubit = params.qubit_size as Coordinate;
    let stab = params.stabilizer_size as Coordinate;
    let ox = patch.offset_x;
    let oy = patch.offset_y;
    let mut elements = Vec::new();

    // checkerboard background cells, each with its centered stabilizer marker
    for r in 0..cells {
        for c in 0..cells {
            let x = ox + c as Coordinate * cell;
            let y = oy + r as Coordinate * cell;
            let is_x = (r + c) % 2 == 0;
            elements.push(Element::new(
                format!("bg-{index}-{r}-{c}"),
                ElementKind::BackgroundCell,
                x,
                y,
                cell,
                cell,
                ElementStyle::background_cell(is_x),
            ));
            elements.push(Element::new(
                format!("stab-{index}-{r}-{c}"),
                if is_x { ElementKind::XStabilizer } else { ElementKind::ZStabilizer },
                x + cell / 2. - stab / 2.,
                y + cell / 2. - stab / 2.,
                stab,
                stab,
                ElementStyle::stabilizer(),
            ));
        }
    }

    // data qubits on the d × d lattice vertices
    for r in 0..d {
        for c in 0..d {
            elements.push(Element::new(
                format!("data-{index}-{r}-{c}"),
                ElementKind::DataQubit,
                ox + c as Coordinate * cell - qubit / 2.,
                oy + r as Coordinate * cell - qubit / 2.,
                qubit,
                qubit,
                ElementStyle::data_qubit(),
            ));
        }
    }

    // boundary qubits half a cell outside each edge, one per boundary cell
    for c in 0..cells {
        let along = ox + c as Coordinate * cell + cell / 2. - stab / 2.;
        elements.push(Element::new(
            format!("boundary-top-{index}-{c}"),
            ElementKind::BoundaryQubit,
            along,
            oy - cell / 2. - stab / 2.,
            stab,
            stab,
            ElementStyle::boundary_qubit(),
        ));
        elements.push(Element::new(
            format!("boundary-bottom-{index}-{c}"),
            ElementKind::BoundaryQubit,
            along,
            oy + cells as Coordinate * cell + cell / 2. - stab / 2.,
            stab,
            stab,
            ElementStyle::boundary_qubit(),
        ));
    }
    for r in 0..cells {
        let along = oy + r as Coordinate * cell + cell / 2. - stab / 2.;
        elements.push(Element::new(
            format!("boundary-left-{index}-{r}"),
            ElementKind::BoundaryQubit,
            ox - cell / 2. - stab / 2.,
            along,
            stab,
            stab,
            ElementStyle::boundary_qubit(),
        ));
        elements.push(Element::new(
            format!("boundary-right-{index}-{r}"),
            ElementKind::BoundaryQubit,
            ox + cells as Coordinate * cell + cell / 2. - stab / 2.,
            along,
            stab,
            stab,
            ElementStyle::boundary_qubit(),
        ));
    }

    // boundary triangles, each paired with one boundary qubit on its apex
    for side in BoundarySide::ALL {
        let direction = side.outward();
        for i in params.boundary.triangle_positions(patch.distance, side) {
            let (x, y, width, height, apex_x, apex_y) = match side {
                BoundarySide::Top => {
                    let x = ox + i as Coordinate * cell;
                    let y = oy - cell / 2.;
                    (x, y, cell, cell / 2., x + cell / 2. - stab / 2., y - stab / 2.)
                }
                BoundarySide::Bottom => {
                    let x = ox + i as Coordinate * cell;
                    let y = oy + cells as Coordinate * cell;
                    (x, y, cell, cell / 2., x + cell / 2. - stab / 2., y + cell / 2.)
                }
                BoundarySide::Left => {
                    let x = ox - cell / 2.;
                    let y = oy + i as Coordinate * cell;
                    (x, y, cell / 2., cell, x - stab / 2., y + cell / 2. - stab / 2.)
                }
                BoundarySide::Right => {
                    let x = ox + cells as Coordinate * cell;
                    let y = oy + i as Coordinate * cell;
                    (x, y, cell / 2., cell, x + cell / 2., y + cell / 2. - stab / 2.)
                }
            };
            elements.push(Element::new(
                format!("tri-{}-{index}-{i}", side.name()),
                ElementKind::BoundaryTriangle,
                x,
                y,
                width,
                height,
                ElementStyle::boundary_triangle(direction),
            ));
            elements.push(Element::new(
                format!("boundary-{}-apex-{index}-{i}", side.name()),
                ElementKind::BoundaryQubit,
                apex_x,
                apex_y,
                stab,
                stab,
                ElementStyle::boundary_qubit(),
            ));
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn count_kind(elements: &[Element], kind: ElementKind) -> usize {
        elements.iter().filter(|element| element.kind == kind).count()
    }

    #[test]
    fn patch_grid_row_major_offsets() {
        // cargo test patch_grid_row_major_offsets -- --nocapture
        let params = LayoutParams::new(5, 2, 4);
        let patches = build_patches(&params).unwrap();
        assert_eq!(patches.len(), 8);
        let step = ((5 - 1) * 100 + 120) as Coordinate;
        for (i, patch) in patches.iter().enumerate() {
            let row = i / 4;
            let col = i % 4;
            assert_eq!(patch.offset_x, col as Coordinate * step);
            assert_eq!(patch.offset_y, row as Coordinate * step);
            assert_eq!(patch.distance, 5);
        }
    }

    #[test]
    fn patch_grid_rejects_invalid_parameters() {
        // cargo test patch_grid_rejects_invalid_parameters -- --nocapture
        assert_eq!(
            build_patches(&LayoutParams::new(4, 2, 4)).unwrap_err().field,
            "distance"
        );
        assert_eq!(build_patches(&LayoutParams::new(3, 0, 1)).unwrap_err().field, "rows");
    }

    #[test]
    fn patch_element_counts_match_distance() {
        // cargo test patch_element_counts_match_distance -- --nocapture
        for distance in [3, 5, 7, 9] {
            let params = LayoutParams::new(distance, 1, 1);
            let patches = build_patches(&params).unwrap();
            let elements = build_patch_elements(&patches[0], 0, &params);
            let d = distance as usize;
            let cells = d - 1;
            assert_eq!(count_kind(&elements, ElementKind::DataQubit), d * d);
            assert_eq!(count_kind(&elements, ElementKind::BackgroundCell), cells * cells);
            let x_count = count_kind(&elements, ElementKind::XStabilizer);
            let z_count = count_kind(&elements, ElementKind::ZStabilizer);
            assert_eq!(x_count + z_count, cells * cells);
            assert_eq!(x_count, (cells * cells + 1) / 2);
            assert_eq!(z_count, (cells * cells) / 2);
            let triangles = count_kind(&elements, ElementKind::BoundaryTriangle);
            // one boundary qubit per boundary cell per side, plus one per triangle apex
            assert_eq!(count_kind(&elements, ElementKind::BoundaryQubit), 4 * cells + triangles);
        }
    }

    #[test]
    fn patch_element_ids_are_unique() {
        // cargo test patch_element_ids_are_unique -- --nocapture
        let params = LayoutParams::new(5, 1, 1);
        let patches = build_patches(&params).unwrap();
        let elements = build_patch_elements(&patches[0], 0, &params);
        let ids: BTreeSet<&str> = elements.iter().map(|element| element.id.as_str()).collect();
        assert_eq!(ids.len(), elements.len());
    }

    #[test]
    fn patch_geometry_matches_reference_values() {
        // cargo test patch_geometry_matches_reference_values -- --nocapture
        let params = LayoutParams::new(3, 1, 1);
        let patches = build_patches(&params).unwrap();
        let elements = build_patch_elements(&patches[0], 0, &params);
        let find = |id: &str| elements.iter().find(|element| element.id == id).unwrap();
        // data qubit at the (0, 0) vertex is centered on the origin
        let corner = find("data-0-0-0");
        assert_eq!((corner.x, corner.y), (-12., -12.));
        // stabilizer marker centered in its cell
        let stab = find("stab-0-0-0");
        assert_eq!((stab.x, stab.y), (34., 34.));
        // top boundary qubit half a cell above the edge
        let top = find("boundary-top-0-0");
        assert_eq!((top.x, top.y), (34., -66.));
        // the single top triangle sits over internal cell 1
        let tri = find("tri-top-0-1");
        assert_eq!((tri.x, tri.y, tri.width, tri.height), (100., -50., 100., 50.));
        // its apex qubit is centered on the wedge tip
        let apex = find("boundary-top-apex-0-1");
        assert_eq!((apex.x, apex.y), (134., -66.));
    }

    #[test]
    fn boundary_policy_alternating_positions() {
        // cargo test boundary_policy_alternating_positions -- --nocapture
        let policy = BoundaryPolicy::Alternating;
        assert_eq!(policy.triangle_positions(3, BoundarySide::Top), vec![1]);
        assert_eq!(policy.triangle_positions(3, BoundarySide::Bottom), vec![0]);
        assert_eq!(policy.triangle_positions(3, BoundarySide::Left), vec![0]);
        assert_eq!(policy.triangle_positions(3, BoundarySide::Right), vec![1]);
        assert_eq!(policy.triangle_positions(5, BoundarySide::Top), vec![1, 3]);
        assert_eq!(policy.triangle_positions(5, BoundarySide::Bottom), vec![0, 2]);
        assert_eq!(policy.triangle_positions(5, BoundarySide::Left), vec![0, 2]);
        assert_eq!(policy.triangle_positions(5, BoundarySide::Right), vec![1, 3]);
        assert_eq!(policy.triangle_positions(7, BoundarySide::Top), vec![1, 3, 5]);
        assert_eq!(policy.triangle_positions(7, BoundarySide::Bottom), vec![0, 2, 4]);
    }

    #[test]
    fn boundary_policy_explicit_positions() {
        // cargo test boundary_policy_explicit_positions -- --nocapture
        let policy = BoundaryPolicy::Explicit {
            top: vec![0],
            bottom: vec![1],
            left: vec![],
            right: vec![0, 1],
        };
        policy.sanity_check(3).unwrap();
        assert_eq!(policy.triangle_positions(3, BoundarySide::Top), vec![0]);
        assert_eq!(policy.triangle_positions(3, BoundarySide::Left), Vec::<CellIndex>::new());
        assert_eq!(policy.triangle_positions(3, BoundarySide::Right), vec![0, 1]);
    }

    #[test]
    fn boundary_policy_explicit_out_of_range() {
        // cargo test boundary_policy_explicit_out_of_range -- --nocapture
        let policy = BoundaryPolicy::Explicit {
            top: vec![2],
            bottom: vec![],
            left: vec![],
            right: vec![],
        };
        let error = policy.sanity_check(3).unwrap_err();
        assert_eq!(error.field, "boundary");
        // the same lists are valid at a larger distance
        policy.sanity_check(5).unwrap();
    }

    #[test]
    fn patch_triangle_apexes_pair_with_triangles() {
        // cargo test patch_triangle_apexes_pair_with_triangles -- --nocapture
        let params = LayoutParams::new(5, 1, 1);
        let patches = build_patches(&params).unwrap();
        let elements = build_patch_elements(&patches[0], 3, &params);
        let triangles: Vec<&Element> = elements
            .iter()
            .filter(|element| element.kind == ElementKind::BoundaryTriangle)
            .collect();
        assert_eq!(triangles.len(), 8);
        for triangle in triangles {
            let apex_id = triangle.id.replacen("tri-", "boundary-", 1);
            let apex_id = {
                // tri-top-3-1 pairs with boundary-top-apex-3-1
                let mut parts: Vec<&str> = apex_id.split('-').collect();
                parts.insert(2, "apex");
                parts.join("-")
            };
            assert!(elements.iter().any(|element| element.id == apex_id), "missing {apex_id}");
        }
    }
}
