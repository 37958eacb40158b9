use crate::support::units::UNIVERSAL_GAS_CONSTANT;

/// Fixed-point data of a pure fluid, in SI units.
///
/// These are the values a backend reports about the substance itself rather
/// than about any particular state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidConstants {
    /// Molar mass, kg/mol.
    pub molar_mass: f64,

    /// Specific gas constant, J/kg·K.
    pub gas_constant: f64,

    /// Critical temperature, K.
    pub t_crit: f64,

    /// Critical pressure, Pa.
    pub p_crit: f64,

    /// Critical density, kg/m³.
    pub rho_crit: f64,

    /// Triple-point temperature, K.
    ///
    /// Lower temperature limit of the saturation calculations.
    pub t_triple: f64,

    /// Maximum temperature of the model, K.
    pub t_max: f64,

    /// Maximum pressure of the model, Pa.
    pub p_max: f64,

    /// Maximum density of the model, kg/m³ (infinite when unbounded).
    pub rho_max: f64,
}

impl FluidConstants {
    /// Returns the specific gas constant for a molar mass in kg/mol.
    #[must_use]
    pub fn gas_constant_for(molar_mass: f64) -> f64 {
        UNIVERSAL_GAS_CONSTANT / molar_mass
    }

    /// Returns `true` if `temperature` lies in `[t_triple, t_max]`.
    #[must_use]
    pub fn contains_temperature(&self, temperature: f64) -> bool {
        (self.t_triple..=self.t_max).contains(&temperature)
    }
}
