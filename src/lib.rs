extern crate cfg_if;
extern crate serde;
#[macro_use]
extern crate serde_json;
extern crate chrono;
extern crate derivative;
extern crate rand_xoshiro;
extern crate urlencoding;

pub mod elements;
pub mod layout;
pub mod patch;
pub mod placeholder;
pub mod util;
pub mod visualize;

use layout::*;
use util::*;

/// compute a complete surface code lattice layout (a pure function: repeated
/// calls with the same inputs produce identical results, so callers are free
/// to memoize)
pub fn generate_layout(params: &LayoutParams, visibility: &VisibilityFlags) -> Result<Layout, InvalidParameter> {
    // fail fast before any element is built
    params.sanity_check()?;
    layout::compute_layout(params, visibility)
}

/// compute only the closed-form statistics readout, without building elements
pub fn generate_stats(params: &LayoutParams, visibility: &VisibilityFlags) -> Result<LayoutStats, InvalidParameter> {
    params.sanity_check()?;
    Ok(LayoutStats::derive(params, visibility))
}
