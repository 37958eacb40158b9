//! Extensions to [`uom`].
//!
//! Typed APIs in this crate take and return [`uom`] quantities. Specific
//! energies and entropies aren't named in [`uom`], so they are defined here,
//! along with [`TemperatureDifference`] for subtracting absolute temperatures:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use coolpropx::support::units::TemperatureDifference;
//!
//! let t_sat = ThermodynamicTemperature::new::<kelvin>(373.124);
//! let t = ThermodynamicTemperature::new::<kelvin>(383.124);
//! let superheating = t.minus(t_sat);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::{
    SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, SpecificGibbsEnergy,
    SpecificInternalEnergy,
};
pub use temperature_difference::TemperatureDifference;

/// Universal gas constant, J/mol·K (CODATA 2018, exact).
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.314_462_618_153_24;
