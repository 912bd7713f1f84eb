//! Layout Orchestrator
//!
//! Assembles the complete layout: the patch grid, every patch's elements,
//! the bounding box that anchors the placeholder layer and the closed-form
//! statistics readout. A pure, stateless recomputation; either all inputs
//! are valid and a full layout is produced, or an [`InvalidParameter`]
//! failure is raised before any element is built.
//!

use super::elements::*;
use super::patch::*;
use super::placeholder::*;
use super::util::*;
use crate::derivative::Derivative;
use serde::{Deserialize, Serialize};

/// closed-form per-patch counts; tests cross-check these against tallies of
/// the generated element list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchStats {
    pub distance: u32,
    /// d² markers on the lattice vertices
    pub data_qubits: u32,
    /// physical ancilla accounting shown in the readout: 2·(d−1)²
    pub ancilla_qubits: u32,
    /// rendered stabilizer markers, one per internal cell
    pub x_stabilizers: u32,
    pub z_stabilizers: u32,
    pub background_cells: u32,
    pub boundary_qubits: u32,
    pub boundary_triangles: u32,
}

/// closed-form totals across the whole patch grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutTotals {
    /// data plus ancilla accounting over every patch
    pub physical_qubits: u32,
    pub data_qubits: u32,
    pub ancilla_qubits: u32,
    pub x_stabilizers: u32,
    pub z_stabilizers: u32,
    pub background_cells: u32,
    pub boundary_qubits: u32,
    pub boundary_triangles: u32,
    /// placeholders actually included under the current visibility flags
    pub placeholders: u32,
}

/// read-only JSON-serializable summary intended for display and debugging,
/// never fed back into layout computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// e.g. "2 rows × 4 logical qubits"
    pub layout: String,
    pub logical_qubits: u32,
    pub per_patch: PatchStats,
    pub total: LayoutTotals,
    /// the active view name, e.g. "full_with_placeholders"
    pub view: String,
}

impl LayoutStats {
    /// derive every count from the parameters alone, without touching a
    /// generated element list
    pub fn derive(params: &LayoutParams, visibility: &VisibilityFlags) -> Self {
        let d = params.distance;
        let n = d - 1;
        let logical_qubits = params.rows * params.cols_per_row;
        let triangles: u32 = BoundarySide::ALL
            .iter()
            .map(|&side| params.boundary.triangle_positions(d, side).len() as u32)
            .sum();
        let per_patch = PatchStats {
            distance: d,
            data_qubits: d * d,
            ancilla_qubits: 2 * n * n,
            x_stabilizers: (n * n + 1) / 2,
            z_stabilizers: (n * n) / 2,
            background_cells: n * n,
            boundary_qubits: 4 * n + triangles,
            boundary_triangles: triangles,
        };
        let placeholders_visible = visibility.placeholders || visibility.placeholders_only;
        let total = LayoutTotals {
            physical_qubits: (per_patch.data_qubits + per_patch.ancilla_qubits) * logical_qubits,
            data_qubits: per_patch.data_qubits * logical_qubits,
            ancilla_qubits: per_patch.ancilla_qubits * logical_qubits,
            x_stabilizers: per_patch.x_stabilizers * logical_qubits,
            z_stabilizers: per_patch.z_stabilizers * logical_qubits,
            background_cells: per_patch.background_cells * logical_qubits,
            boundary_qubits: per_patch.boundary_qubits * logical_qubits,
            boundary_triangles: per_patch.boundary_triangles * logical_qubits,
            placeholders: if placeholders_visible { params.placeholder.count } else { 0 },
        };
        Self {
            layout: format!("{} rows × {} logical qubits", params.rows, params.cols_per_row),
            logical_qubits,
            per_patch,
            total,
            view: visibility.view_name().to_string(),
        }
    }
}

/// complete positioned layout handed to the renderer
#[derive(Derivative, Clone, Serialize, Deserialize)]
#[derivative(Debug)]
pub struct Layout {
    /// every positioned element, in deterministic paint order
    #[derivative(Debug = "ignore")]
    pub elements: Vec<Element>,
    /// max x + cell_size over the lattice elements
    pub total_width: Coordinate,
    /// max y + cell_size over the lattice elements
    pub total_height: Coordinate,
    pub stats: LayoutStats,
}

/// compute a full layout: validate, build the patch grid, concatenate every
/// patch's elements, then conditionally append the placeholder layer anchored
/// at the lattice bounding box
pub fn compute_layout(params: &LayoutParams, visibility: &VisibilityFlags) -> Result<Layout, InvalidParameter> {
    let patches = build_patches(params)?;
    let cell = params.cell_size as Coordinate;
    let mut lattice = Vec::new();
    for (index, patch) in patches.iter().enumerate() {
        lattice.extend(build_patch_elements(patch, index, params));
    }
    // the bounding box anchors the placeholder layer even when the lattice
    // itself is hidden
    let mut total_width: Coordinate = 0.;
    let mut total_height: Coordinate = 0.;
    for element in lattice.iter() {
        total_width = total_width.max(element.x + cell);
        total_height = total_height.max(element.y + cell);
    }
    let mut elements = if visibility.placeholders_only { Vec::new() } else { lattice };
    if visibility.placeholders || visibility.placeholders_only {
        elements.extend(build_placeholders(
            &params.placeholder,
            params.stabilizer_size,
            total_width,
            total_height,
        ));
    }
    let stats = LayoutStats::derive(params, visibility);
    Ok(Layout {
        elements,
        total_width,
        total_height,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand_xoshiro::rand_core::{RngCore, SeedableRng};
    use std::collections::BTreeSet;

    fn tally(layout: &Layout, kind: ElementKind) -> u32 {
        layout.elements.iter().filter(|element| element.kind == kind).count() as u32
    }

    /// every closed-form count must equal the tally of the generated list
    fn assert_stats_match_tally(layout: &Layout, visibility: &VisibilityFlags) {
        let total = &layout.stats.total;
        if !visibility.placeholders_only {
            assert_eq!(tally(layout, ElementKind::DataQubit), total.data_qubits);
            assert_eq!(tally(layout, ElementKind::XStabilizer), total.x_stabilizers);
            assert_eq!(tally(layout, ElementKind::ZStabilizer), total.z_stabilizers);
            assert_eq!(tally(layout, ElementKind::BackgroundCell), total.background_cells);
            assert_eq!(tally(layout, ElementKind::BoundaryQubit), total.boundary_qubits);
            assert_eq!(tally(layout, ElementKind::BoundaryTriangle), total.boundary_triangles);
        }
        assert_eq!(tally(layout, ElementKind::UnusedPlaceholder), total.placeholders);
    }

    #[test]
    fn layout_stats_match_tally_across_parameters() {
        // cargo test layout_stats_match_tally_across_parameters -- --nocapture
        for distance in [3, 5, 7] {
            for (rows, cols_per_row) in [(1, 1), (1, 3), (2, 4), (3, 2)] {
                let params = LayoutParams::new(distance, rows, cols_per_row);
                for visibility in [
                    VisibilityFlags::full(),
                    VisibilityFlags::with_placeholders(),
                    VisibilityFlags::only_placeholders(),
                ] {
                    let layout = compute_layout(&params, &visibility).unwrap();
                    assert_stats_match_tally(&layout, &visibility);
                }
            }
        }
    }

    #[test]
    fn layout_element_ids_are_pairwise_unique() {
        // cargo test layout_element_ids_are_pairwise_unique -- --nocapture
        let params = LayoutParams::new(5, 2, 4);
        let layout = compute_layout(&params, &VisibilityFlags::with_placeholders()).unwrap();
        let ids: BTreeSet<&str> = layout.elements.iter().map(|element| element.id.as_str()).collect();
        assert_eq!(ids.len(), layout.elements.len());
    }

    #[test]
    fn layout_distance_3_example_scenario() {
        // cargo test layout_distance_3_example_scenario -- --nocapture
        let params = LayoutParams::new(3, 2, 4);
        let layout = compute_layout(&params, &VisibilityFlags::full()).unwrap();
        let stats = &layout.stats;
        assert_eq!(stats.logical_qubits, 8);
        assert_eq!(stats.per_patch.data_qubits, 9);
        assert_eq!(stats.per_patch.ancilla_qubits, 8);
        assert_eq!(stats.total.data_qubits, 72);
        assert_eq!(stats.total.ancilla_qubits, 64);
        // the "136 physical" readout of the reference layout
        assert_eq!(stats.total.physical_qubits, 136);
        // rendered stabilizer markers, one per internal cell
        assert_eq!(tally(&layout, ElementKind::DataQubit), 72);
        assert_eq!(tally(&layout, ElementKind::XStabilizer), 16);
        assert_eq!(tally(&layout, ElementKind::ZStabilizer), 16);
    }

    #[test]
    fn layout_distance_5_example_scenario() {
        // cargo test layout_distance_5_example_scenario -- --nocapture
        let params = LayoutParams::new(5, 2, 4);
        let layout = compute_layout(&params, &VisibilityFlags::full()).unwrap();
        let stats = &layout.stats;
        assert_eq!(stats.per_patch.data_qubits, 25);
        assert_eq!(stats.per_patch.x_stabilizers, 8);
        assert_eq!(stats.per_patch.z_stabilizers, 8);
        assert_eq!(stats.total.data_qubits, 200);
        assert_eq!(stats.total.x_stabilizers + stats.total.z_stabilizers, 128);
        assert_eq!(tally(&layout, ElementKind::DataQubit), 200);
        assert_eq!(
            tally(&layout, ElementKind::XStabilizer) + tally(&layout, ElementKind::ZStabilizer),
            128
        );
    }

    #[test]
    fn layout_invalid_distance_produces_no_elements() {
        // cargo test layout_invalid_distance_produces_no_elements -- --nocapture
        let params = LayoutParams::new(4, 2, 4);
        let error = compute_layout(&params, &VisibilityFlags::full()).unwrap_err();
        assert_eq!(error.field, "distance");
    }

    #[test]
    fn layout_toggle_roundtrip_is_deterministic() {
        // cargo test layout_toggle_roundtrip_is_deterministic -- --nocapture
        let params = LayoutParams::new(3, 2, 2);
        let before = compute_layout(&params, &VisibilityFlags::with_placeholders()).unwrap();
        // toggle the placeholder layer off then on again
        compute_layout(&params, &VisibilityFlags::full()).unwrap();
        let after = compute_layout(&params, &VisibilityFlags::with_placeholders()).unwrap();
        assert_eq!(
            serde_json::to_string(&before).unwrap(),
            serde_json::to_string(&after).unwrap()
        );
    }

    #[test]
    fn layout_random_parameters_are_deterministic() {
        // cargo test layout_random_parameters_are_deterministic -- --nocapture
        let mut rng = DeterministicRng::seed_from_u64(42);
        for _ in 0..20 {
            let distance = 3 + 2 * (rng.next_u64() % 5) as u32;
            let rows = 1 + (rng.next_u64() % 3) as u32;
            let cols_per_row = 1 + (rng.next_u64() % 3) as u32;
            let params = LayoutParams::new(distance, rows, cols_per_row);
            let first = compute_layout(&params, &VisibilityFlags::full()).unwrap();
            let second = compute_layout(&params, &VisibilityFlags::full()).unwrap();
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn layout_bounding_box_anchors_placeholders() {
        // cargo test layout_bounding_box_anchors_placeholders -- --nocapture
        let params = LayoutParams::new(3, 1, 1);
        let full = compute_layout(&params, &VisibilityFlags::full()).unwrap();
        let only = compute_layout(&params, &VisibilityFlags::only_placeholders()).unwrap();
        // hiding the lattice must not move the placeholder anchor
        assert_eq!(full.total_width, only.total_width);
        assert_eq!(full.total_height, only.total_height);
        // beside-grid placeholders start beyond the lattice bounding box
        for element in only.elements.iter() {
            assert!(element.x >= only.total_width);
        }
    }

    #[test]
    fn layout_placeholders_stack_below_lattice() {
        // cargo test layout_placeholders_stack_below_lattice -- --nocapture
        let mut params = LayoutParams::new(3, 1, 2);
        params.placeholder.mode = PlaceholderMode::BackgroundScatter;
        params.placeholder.count = 40;
        let layout = compute_layout(&params, &VisibilityFlags::with_placeholders()).unwrap();
        let min_lattice_z = layout
            .elements
            .iter()
            .filter(|element| element.kind != ElementKind::UnusedPlaceholder)
            .map(|element| element.style.z_index)
            .min()
            .unwrap();
        for element in layout.elements.iter() {
            if element.kind == ElementKind::UnusedPlaceholder {
                assert!(element.style.z_index < min_lattice_z);
            }
        }
    }
}
