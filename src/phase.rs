//! Phase-diagram curves.
//!
//! Each function walks a [`Fluid`](crate::fluid::Fluid) along temperature
//! from the triple point (or the critical point) and collects complete
//! [`FluidState`](crate::thermo::FluidState) values, so any property can be
//! plotted against any other.
//!
//! - [`saturation_line`]: saturated liquid and vapor up to the critical point
//! - [`spinodal_point`] and [`spinodal_line`]: the limits of metastability
//! - [`pseudocritical_line`]: the critical isochore above the critical point
//! - [`quality_isolines`]: lines of constant vapor quality under the dome

mod line;
mod pseudocritical;
mod quality;
mod saturation;
mod spinodal;

pub use line::PhaseLine;
pub use pseudocritical::pseudocritical_line;
pub use quality::{QualityIsoline, quality_isolines};
pub use saturation::saturation_line;
pub use spinodal::{spinodal_line, spinodal_point};
