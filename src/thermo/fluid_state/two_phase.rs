use crate::support::constraint::UnitInterval;
use crate::thermo::PropertyError;

use super::{FluidState, Phase};

impl FluidState {
    /// Mixes saturated liquid and vapor states at vapor quality `quality`.
    ///
    /// Specific volume and the specific energies, entropy and heat
    /// capacities are mass-weighted. Compressibilities and transport
    /// properties are weighted by void fraction `α = q·ρ/ρ_v`. The speed of
    /// sound follows Wood's equation,
    /// `1/(ρ·a²) = α/(ρ_v·a_v²) + (1 − α)/(ρ_l·a_l²)`.
    /// The Joule-Thomson coefficient is left undefined.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] if `quality` is not in `[0, 1]`.
    pub fn two_phase(
        liquid: &FluidState,
        vapor: &FluidState,
        quality: f64,
    ) -> Result<FluidState, PropertyError> {
        let q = UnitInterval::new(quality)
            .map_err(|error| PropertyError::out_of_domain(format!("quality {quality}: {error}")))?
            .into_inner();

        let by_mass = |l: f64, v: f64| (1.0 - q) * l + q * v;

        let volume = by_mass(1.0 / liquid.density, 1.0 / vapor.density);
        let density = 1.0 / volume;
        let void_fraction = q * density / vapor.density;

        let by_volume = |l: f64, v: f64| (1.0 - void_fraction) * l + void_fraction * v;
        let by_volume_opt = |l: Option<f64>, v: Option<f64>| Some(by_volume(l?, v?));

        let wood = void_fraction / (vapor.density * vapor.speed_of_sound.powi(2))
            + (1.0 - void_fraction) / (liquid.density * liquid.speed_of_sound.powi(2));
        let speed_of_sound = (1.0 / (density * wood)).sqrt();

        Ok(FluidState {
            phase: Phase::TwoPhase,
            temperature: liquid.temperature,
            pressure: liquid.pressure,
            density,
            enthalpy: by_mass(liquid.enthalpy, vapor.enthalpy),
            entropy: by_mass(liquid.entropy, vapor.entropy),
            internal_energy: by_mass(liquid.internal_energy, vapor.internal_energy),
            gibbs_energy: by_mass(liquid.gibbs_energy, vapor.gibbs_energy),
            cp: by_mass(liquid.cp, vapor.cp),
            cv: by_mass(liquid.cv, vapor.cv),
            speed_of_sound,
            compressibility_factor: by_mass(
                liquid.compressibility_factor,
                vapor.compressibility_factor,
            ),
            isothermal_compressibility: by_volume(
                liquid.isothermal_compressibility,
                vapor.isothermal_compressibility,
            ),
            isobaric_expansion_coefficient: by_volume(
                liquid.isobaric_expansion_coefficient,
                vapor.isobaric_expansion_coefficient,
            ),
            joule_thomson: f64::NAN,
            quality_mass: Some(q),
            quality_volume: Some(void_fraction),
            viscosity: by_volume_opt(liquid.viscosity, vapor.viscosity),
            conductivity: by_volume_opt(liquid.conductivity, vapor.conductivity),
            supersaturation_degree: None,
            supersaturation_ratio: None,
        })
    }
}
