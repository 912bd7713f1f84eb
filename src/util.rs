use super::patch::BoundaryPolicy;
use super::placeholder::PlaceholderConfig;
use serde::{Deserialize, Serialize};

cfg_if::cfg_if! {
    if #[cfg(feature="f32_coordinate")] {
        /// use f32 to feed renderers that consume f32 vertex buffers without conversion
        pub type Coordinate = f32;
    } else {
        pub type Coordinate = f64;
    }
}

/// the ordinal position of a patch in the row-major patch grid
pub type PatchIndex = usize;
/// a local row or column within one patch, in internal-cell or vertex space
pub type CellIndex = usize;

/// use Xoshiro256StarStar for deterministic random number generator
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

/// the single failure kind: a layout parameter violates its documented constraint.
/// raised before any element is built, so a partial layout is never observable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidParameter {
    /// the offending field
    pub field: &'static str,
    /// diagnostic message for display
    pub reason: String,
}

impl InvalidParameter {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "invalid parameter `{}`: {}", self.field, self.reason)
    }
}

impl std::error::Error for InvalidParameter {}

/// all numeric configuration of a layout; plain data, shared between the
/// library entry points and the command line interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// edge length of one background cell
    pub cell_size: u32,
    /// diameter of a data qubit marker
    pub qubit_size: u32,
    /// diameter of a stabilizer or boundary marker
    pub stabilizer_size: u32,
    /// spacing between the bounding lattices of adjacent patches
    pub gap: u32,
    /// code distance of every patch, odd and at least 3
    pub distance: u32,
    /// number of patch rows
    pub rows: u32,
    /// number of patches per row
    pub cols_per_row: u32,
    /// which internal cells along each patch edge receive a boundary triangle
    #[serde(default)]
    pub boundary: BoundaryPolicy,
    /// decorative placeholder layer configuration
    #[serde(default)]
    pub placeholder: PlaceholderConfig,
}

impl LayoutParams {
    /// layout parameters with the default marker sizes
    pub fn new(distance: u32, rows: u32, cols_per_row: u32) -> Self {
        Self {
            distance,
            rows,
            cols_per_row,
            ..Self::default()
        }
    }

    /// check every documented constraint; called by the orchestrator before
    /// any element is built
    pub fn sanity_check(&self) -> Result<(), InvalidParameter> {
        if self.distance < 3 {
            return Err(InvalidParameter::new(
                "distance",
                format!("must be at least 3, got {}", self.distance),
            ));
        }
        if self.distance % 2 == 0 {
            return Err(InvalidParameter::new(
                "distance",
                format!("must be odd, got {}", self.distance),
            ));
        }
        if self.rows < 1 {
            return Err(InvalidParameter::new("rows", "must be at least 1"));
        }
        if self.cols_per_row < 1 {
            return Err(InvalidParameter::new("cols_per_row", "must be at least 1"));
        }
        for (field, value) in [
            ("cell_size", self.cell_size),
            ("qubit_size", self.qubit_size),
            ("stabilizer_size", self.stabilizer_size),
        ] {
            if value == 0 {
                return Err(InvalidParameter::new(field, "must be positive"));
            }
        }
        self.boundary.sanity_check(self.distance)?;
        Ok(())
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            cell_size: 100,
            qubit_size: 24,
            stabilizer_size: 32,
            gap: 120,
            distance: 5,
            rows: 2,
            cols_per_row: 4,
            boundary: BoundaryPolicy::default(),
            placeholder: PlaceholderConfig::default(),
        }
    }
}

/// which optional layers a computed layout includes; the rendering surface
/// owns the toggle state and passes the resolved flags down on every change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityFlags {
    /// include the decorative placeholder layer
    #[serde(default)]
    pub placeholders: bool,
    /// suppress the lattice layers and keep only the placeholders
    #[serde(default)]
    pub placeholders_only: bool,
}

impl VisibilityFlags {
    /// lattice only, no decorative layer
    pub fn full() -> Self {
        Self {
            placeholders: false,
            placeholders_only: false,
        }
    }
    /// lattice with the placeholder layer appended behind it
    pub fn with_placeholders() -> Self {
        Self {
            placeholders: true,
            placeholders_only: false,
        }
    }
    /// placeholder layer alone
    pub fn only_placeholders() -> Self {
        Self {
            placeholders: true,
            placeholders_only: true,
        }
    }
    /// the view name reported in the stats readout
    pub fn view_name(&self) -> &'static str {
        if self.placeholders_only {
            "placeholders_only"
        } else if self.placeholders {
            "full_with_placeholders"
        } else {
            "full"
        }
    }
}

impl Default for VisibilityFlags {
    fn default() -> Self {
        Self::full()
    }
}
