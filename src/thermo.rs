//! Thermodynamic property modeling.
//!
//! Two APIs live side by side:
//!
//! - The typed capability API ([`capability`]) works on [`State<Fluid>`]
//!   values carrying `uom` quantities. Each model implements only what it
//!   supports, so unsupported calls fail to compile.
//! - The property-backend API ([`PropertyBackend`]) mirrors a low-level
//!   property library: update from an [`InputPair`], read back a complete
//!   [`FluidState`] in SI units. The [`crate::fluid::Fluid`] wrapper is
//!   built on it.

mod backend;
mod constants;
mod error;
mod fluid_state;
mod input;
mod property;
mod state;

pub mod capability;
pub mod model;
pub mod substance;

pub use backend::PropertyBackend;
pub use constants::FluidConstants;
pub use error::PropertyError;
pub use fluid_state::{FluidState, Phase};
pub use input::InputPair;
pub use property::{Property, UnknownPropertyError};
pub use state::State;
