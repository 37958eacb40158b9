//! Low-level interface to Helmholtz-energy equations of state.
//!
//! A fundamental equation of state gives the reduced Helmholtz energy
//! `α = a/(R·T)` as a function of density and temperature, split into an
//! ideal-gas part `α⁰` and a residual part `αʳ`. Every thermodynamic property
//! follows from these two parts and their derivatives in the reduced
//! variables `δ = ρ/ρc` and `τ = Tc/T`, which is all a model has to provide
//! through [`HelmholtzModel`].
//!
//! On top of that, this module evaluates the equation of state directly,
//! including inside the two-phase region:
//!
//! - [`density_roots`](HelmholtzModel::density_roots) and
//!   [`bracket_density_roots`]: densities on an isotherm at a given pressure
//! - [`spinodal_densities`]: limits of mechanical stability
//! - [`saturation_at_temperature`] and [`saturation_at_pressure`]:
//!   phase equilibrium from equal pressure and Gibbs energy
//! - [`equilibrium`]: flash from any [`InputPair`](crate::thermo::InputPair)
//! - [`metastable`]: states on the equation-of-state surface, without phase
//!   splitting

mod flash;
mod metastable;
mod point;
mod roots;
mod saturation;
mod spinodal;

use crate::thermo::{PropertyBackend, PropertyError};

pub use flash::equilibrium;
pub use metastable::{MetastableConfig, MetastableGuess, metastable};
pub use point::HelmholtzPoint;
pub use roots::{DensityRoots, bracket_density_roots};
pub use saturation::{SaturationDensities, saturation_at_pressure, saturation_at_temperature};
pub use spinodal::{SpinodalDensities, spinodal_densities};

/// Ideal-gas part of the reduced Helmholtz energy and its scaled
/// temperature derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealPart {
    /// `α⁰`
    pub alpha: f64,
    /// `τ·∂α⁰/∂τ`
    pub tau_dtau: f64,
    /// `τ²·∂²α⁰/∂τ²`
    pub tau2_dtau2: f64,
}

/// Residual part of the reduced Helmholtz energy and its scaled
/// derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualPart {
    /// `αʳ`
    pub alpha: f64,
    /// `δ·∂αʳ/∂δ`
    pub delta_ddelta: f64,
    /// `δ²·∂²αʳ/∂δ²`
    pub delta2_ddelta2: f64,
    /// `τ·∂αʳ/∂τ`
    pub tau_dtau: f64,
    /// `τ²·∂²αʳ/∂τ²`
    pub tau2_dtau2: f64,
    /// `δ·τ·∂²αʳ/∂δ∂τ`
    pub delta_tau_ddelta_dtau: f64,
}

/// Which side of the two-phase region a density belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Liquid,
    Vapor,
}

/// A fluid described by a Helmholtz-energy equation of state.
///
/// Implementors supply the two parts of the reduced Helmholtz energy at a
/// density (kg/m³) and temperature (K). The scaled derivatives make the
/// result independent of the reducing values a particular equation uses.
pub trait HelmholtzModel: PropertyBackend {
    /// Evaluates the ideal-gas part at `(density, temperature)`.
    fn ideal(&self, density: f64, temperature: f64) -> IdealPart;

    /// Evaluates the residual part at `(density, temperature)`.
    fn residual(&self, density: f64, temperature: f64) -> ResidualPart;

    /// Evaluates the equation of state at `(density, temperature)`.
    fn evaluate(&self, density: f64, temperature: f64) -> HelmholtzPoint {
        HelmholtzPoint {
            density,
            temperature,
            gas_constant: self.constants().gas_constant,
            ideal: self.ideal(density, temperature),
            residual: self.residual(density, temperature),
        }
    }

    /// Finds the densities on the `temperature` isotherm where the
    /// pressure equals `pressure`.
    ///
    /// The default implementation brackets each stable branch and bisects,
    /// see [`bracket_density_roots`]. Models with a closed-form solution
    /// should override it.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if no density matches.
    fn density_roots(
        &self,
        temperature: f64,
        pressure: f64,
    ) -> Result<DensityRoots, PropertyError> {
        bracket_density_roots(self, temperature, pressure)
    }
}

/// Checks that `temperature` is inside the model's temperature range.
pub(crate) fn check_temperature<M: HelmholtzModel + ?Sized>(
    model: &M,
    temperature: f64,
) -> Result<(), PropertyError> {
    if model.constants().contains_temperature(temperature) {
        Ok(())
    } else {
        Err(PropertyError::out_of_domain(format!(
            "temperature {temperature} K outside [{}, {}] K",
            model.constants().t_triple,
            model.constants().t_max
        )))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A van der Waals fluid with CO2-like constants.
    //!
    //! Simple enough to check the generic algorithms against closed forms,
    //! and it has no closed-form `density_roots` override, so the bracketing
    //! fallback is exercised.

    use crate::thermo::{FluidConstants, FluidState, InputPair, PropertyBackend, PropertyError};

    use super::{HelmholtzModel, IdealPart, ResidualPart, equilibrium};

    pub(crate) struct VanDerWaals {
        constants: FluidConstants,
        a: f64,
        b: f64,
    }

    impl VanDerWaals {
        pub(crate) fn new() -> Self {
            let r: f64 = 188.924;
            let t_c = 304.13;
            let p_c = 7.3773e6;
            let a = 27.0 * (r * t_c).powi(2) / (64.0 * p_c);
            let b = r * t_c / (8.0 * p_c);
            Self {
                constants: FluidConstants {
                    molar_mass: 0.044_01,
                    gas_constant: r,
                    t_crit: t_c,
                    p_crit: p_c,
                    rho_crit: 1.0 / (3.0 * b),
                    t_triple: 216.59,
                    t_max: 1000.0,
                    p_max: 1e9,
                    rho_max: 0.999 / b,
                },
                a,
                b,
            }
        }

        pub(crate) fn pressure(&self, density: f64, temperature: f64) -> f64 {
            let r = self.constants.gas_constant;
            density * r * temperature / (1.0 - self.b * density) - self.a * density.powi(2)
        }
    }

    impl PropertyBackend for VanDerWaals {
        fn name(&self) -> &str {
            "van der Waals"
        }

        fn constants(&self) -> &FluidConstants {
            &self.constants
        }

        fn update(
            &self,
            pair: InputPair,
            first: f64,
            second: f64,
        ) -> Result<FluidState, PropertyError> {
            equilibrium(self, pair, first, second)
        }
    }

    impl HelmholtzModel for VanDerWaals {
        fn ideal(&self, density: f64, temperature: f64) -> IdealPart {
            // Constant cv = 2.5 R, with u = cv·T and s = 0 at (T_c, ρ_c).
            let c = 2.5;
            let tau = self.constants.t_crit / temperature;
            let delta = density / self.constants.rho_crit;
            IdealPart {
                alpha: c + c * tau.ln() + delta.ln(),
                tau_dtau: c,
                tau2_dtau2: -c,
            }
        }

        fn residual(&self, density: f64, temperature: f64) -> ResidualPart {
            let r = self.constants.gas_constant;
            let eta = self.b * density;
            let att = self.a * density / (r * temperature);
            ResidualPart {
                alpha: -(1.0 - eta).ln() - att,
                delta_ddelta: eta / (1.0 - eta) - att,
                delta2_ddelta2: (eta / (1.0 - eta)).powi(2),
                tau_dtau: -att,
                tau2_dtau2: 0.0,
                delta_tau_ddelta_dtau: -att,
            }
        }
    }
}
