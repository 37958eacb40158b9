//! Complete property sets of single states.

mod phase;
mod two_phase;

use uom::si::{
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, MassDensity, Pressure, SpecificHeatCapacity, TemperatureInterval,
        ThermalConductivity, ThermodynamicTemperature, Velocity,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::units::{
    SpecificEnthalpy, SpecificEntropy, SpecificGibbsEnergy, SpecificInternalEnergy,
};
use crate::thermo::{FluidConstants, Property, model::helmholtz::HelmholtzPoint};

pub use phase::Phase;

/// Every property of one fluid state, in SI units.
///
/// Thermodynamic properties are always present and are `NaN` where they are
/// undefined. Values that only exist for some states (quality, transport
/// properties, departures from saturation) are optional.
///
/// Use the typed getters for `uom` quantities, or [`FluidState::get`] for
/// name-based access:
///
/// ```
/// use coolpropx::thermo::{FluidState, Property};
///
/// let state = FluidState::undefined();
/// assert!(state.get(Property::Pressure).is_nan());
/// assert!(state.quality_mass().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FluidState {
    pub(crate) phase: Phase,
    pub(crate) temperature: f64,
    pub(crate) pressure: f64,
    pub(crate) density: f64,
    pub(crate) enthalpy: f64,
    pub(crate) entropy: f64,
    pub(crate) internal_energy: f64,
    pub(crate) gibbs_energy: f64,
    pub(crate) cp: f64,
    pub(crate) cv: f64,
    pub(crate) speed_of_sound: f64,
    pub(crate) compressibility_factor: f64,
    pub(crate) isothermal_compressibility: f64,
    pub(crate) isobaric_expansion_coefficient: f64,
    pub(crate) joule_thomson: f64,
    pub(crate) quality_mass: Option<f64>,
    pub(crate) quality_volume: Option<f64>,
    pub(crate) viscosity: Option<f64>,
    pub(crate) conductivity: Option<f64>,
    pub(crate) supersaturation_degree: Option<f64>,
    pub(crate) supersaturation_ratio: Option<f64>,
}

impl FluidState {
    /// Returns a placeholder state with every value undefined.
    #[must_use]
    pub fn undefined() -> Self {
        Self {
            phase: Phase::Unknown,
            temperature: f64::NAN,
            pressure: f64::NAN,
            density: f64::NAN,
            enthalpy: f64::NAN,
            entropy: f64::NAN,
            internal_energy: f64::NAN,
            gibbs_energy: f64::NAN,
            cp: f64::NAN,
            cv: f64::NAN,
            speed_of_sound: f64::NAN,
            compressibility_factor: f64::NAN,
            isothermal_compressibility: f64::NAN,
            isobaric_expansion_coefficient: f64::NAN,
            joule_thomson: f64::NAN,
            quality_mass: None,
            quality_volume: None,
            viscosity: None,
            conductivity: None,
            supersaturation_degree: None,
            supersaturation_ratio: None,
        }
    }

    /// Builds a single-phase state from an equation-of-state evaluation.
    ///
    /// The phase is classified with [`Phase::classify`].
    #[must_use]
    pub fn from_point(point: &HelmholtzPoint, constants: &FluidConstants) -> Self {
        let temperature = point.temperature;
        let density = point.density;
        let pressure = point.pressure();

        Self {
            phase: Phase::classify(temperature, pressure, density, constants),
            temperature,
            pressure,
            density,
            enthalpy: point.enthalpy(),
            entropy: point.entropy(),
            internal_energy: point.internal_energy(),
            gibbs_energy: point.gibbs_energy(),
            cp: point.cp(),
            cv: point.cv(),
            speed_of_sound: point.speed_of_sound(),
            compressibility_factor: point.compressibility_factor(),
            isothermal_compressibility: point.isothermal_compressibility(),
            isobaric_expansion_coefficient: point.isobaric_expansion_coefficient(),
            joule_thomson: point.joule_thomson(),
            ..Self::undefined()
        }
    }

    /// Returns the value stored under `property`, or `NaN` if it is absent.
    #[must_use]
    pub fn get(&self, property: Property) -> f64 {
        let optional = |value: Option<f64>| value.unwrap_or(f64::NAN);
        match property {
            Property::Temperature => self.temperature,
            Property::Pressure => self.pressure,
            Property::Density => self.density,
            Property::Enthalpy => self.enthalpy,
            Property::Entropy => self.entropy,
            Property::InternalEnergy => self.internal_energy,
            Property::GibbsEnergy => self.gibbs_energy,
            Property::Cp => self.cp,
            Property::Cv => self.cv,
            Property::Gamma => self.cp / self.cv,
            Property::SpeedOfSound => self.speed_of_sound,
            Property::CompressibilityFactor => self.compressibility_factor,
            Property::IsothermalCompressibility => self.isothermal_compressibility,
            Property::IsobaricExpansionCoefficient => self.isobaric_expansion_coefficient,
            Property::JouleThomson => self.joule_thomson,
            Property::QualityMass => optional(self.quality_mass),
            Property::QualityVolume => optional(self.quality_volume),
            Property::Viscosity => optional(self.viscosity),
            Property::Conductivity => optional(self.conductivity),
            Property::SupersaturationDegree | Property::Superheating => {
                optional(self.supersaturation_degree)
            }
            Property::Subcooling => optional(self.supersaturation_degree.map(|d| -d)),
            Property::SupersaturationRatio => optional(self.supersaturation_ratio),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.temperature)
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure)
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(self.density)
    }

    #[must_use]
    pub fn enthalpy(&self) -> SpecificEnthalpy {
        SpecificEnthalpy::new::<joule_per_kilogram>(self.enthalpy)
    }

    #[must_use]
    pub fn entropy(&self) -> SpecificEntropy {
        SpecificEntropy::new::<joule_per_kilogram_kelvin>(self.entropy)
    }

    #[must_use]
    pub fn internal_energy(&self) -> SpecificInternalEnergy {
        SpecificInternalEnergy::new::<joule_per_kilogram>(self.internal_energy)
    }

    #[must_use]
    pub fn gibbs_energy(&self) -> SpecificGibbsEnergy {
        SpecificGibbsEnergy::new::<joule_per_kilogram>(self.gibbs_energy)
    }

    #[must_use]
    pub fn cp(&self) -> SpecificHeatCapacity {
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(self.cp)
    }

    #[must_use]
    pub fn cv(&self) -> SpecificHeatCapacity {
        SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(self.cv)
    }

    #[must_use]
    pub fn speed_of_sound(&self) -> Velocity {
        Velocity::new::<meter_per_second>(self.speed_of_sound)
    }

    /// Vapor mass fraction, for two-phase states or when generalized.
    #[must_use]
    pub fn quality_mass(&self) -> Option<f64> {
        self.quality_mass
    }

    /// Vapor volume fraction (void fraction).
    #[must_use]
    pub fn quality_volume(&self) -> Option<f64> {
        self.quality_volume
    }

    #[must_use]
    pub fn viscosity(&self) -> Option<DynamicViscosity> {
        self.viscosity.map(DynamicViscosity::new::<pascal_second>)
    }

    #[must_use]
    pub fn conductivity(&self) -> Option<ThermalConductivity> {
        self.conductivity
            .map(ThermalConductivity::new::<watt_per_meter_kelvin>)
    }

    /// Temperature above the saturation temperature at the same pressure.
    ///
    /// Negative for subcooled states.
    #[must_use]
    pub fn superheating(&self) -> Option<TemperatureInterval> {
        self.supersaturation_degree
            .map(TemperatureInterval::new::<delta_kelvin>)
    }

    /// Ratio of the pressure to the saturation pressure at the same temperature.
    #[must_use]
    pub fn supersaturation_ratio(&self) -> Option<f64> {
        self.supersaturation_ratio
    }
}
