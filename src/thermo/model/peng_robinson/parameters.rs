use thiserror::Error;
use uom::si::{
    f64::{MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    molar_mass::kilogram_per_mole,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::constraint::{Constraint, StrictlyPositive};
use crate::thermo::FluidConstants;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PengRobinsonParametersError {
    #[error("invalid critical temperature: {t_crit:?}")]
    CriticalTemperature { t_crit: ThermodynamicTemperature },
    #[error("invalid critical pressure: {p_crit:?}")]
    CriticalPressure { p_crit: Pressure },
    #[error("invalid acentric factor: {omega}")]
    AcentricFactor { omega: f64 },
    #[error("invalid molar mass: {molar_mass:?}")]
    MolarMass { molar_mass: MolarMass },
    #[error(
        "temperature limits must satisfy 0 < t_triple < t_crit < t_max; \
         t_triple={t_triple:?}, t_crit={t_crit:?}, t_max={t_max:?}"
    )]
    TemperatureLimits {
        t_triple: ThermodynamicTemperature,
        t_crit: ThermodynamicTemperature,
        t_max: ThermodynamicTemperature,
    },
    #[error("maximum pressure {p_max:?} must exceed the critical pressure {p_crit:?}")]
    MaxPressure { p_max: Pressure, p_crit: Pressure },
    #[error("ideal-gas cp must exceed the gas constant; cp={cp:?}, R={r} J/kg/K")]
    IdealGasCp { cp: SpecificHeatCapacity, r: f64 },
}

/// Substance data for the [`PengRobinson`](super::PengRobinson) model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicParameters {
    pub critical_temperature: ThermodynamicTemperature,
    pub critical_pressure: Pressure,
    pub acentric_factor: f64,
    pub molar_mass: MolarMass,

    /// Lower temperature limit, usually the triple point.
    pub triple_temperature: ThermodynamicTemperature,

    pub max_temperature: ThermodynamicTemperature,
    pub max_pressure: Pressure,

    /// Constant isobaric heat capacity of the ideal gas.
    pub ideal_gas_cp: SpecificHeatCapacity,
}

/// Fluid data required by the [`PengRobinson`](super::PengRobinson) model.
pub trait CubicFluid {
    /// Returns the substance data for use with the Peng-Robinson model.
    fn parameters() -> CubicParameters;
}

/// Parameters checked and converted to SI values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Validated {
    pub(super) t_crit: f64,
    pub(super) p_crit: f64,
    pub(super) omega: f64,
    pub(super) molar_mass: f64,
    pub(super) t_triple: f64,
    pub(super) t_max: f64,
    pub(super) p_max: f64,
    pub(super) cp0: f64,
}

impl CubicParameters {
    pub(super) fn validate(&self) -> Result<Validated, PengRobinsonParametersError> {
        let t_crit = self.critical_temperature.get::<kelvin>();
        if StrictlyPositive::check(&t_crit).is_err() {
            return Err(PengRobinsonParametersError::CriticalTemperature {
                t_crit: self.critical_temperature,
            });
        }

        let p_crit = self.critical_pressure.get::<pascal>();
        if StrictlyPositive::check(&p_crit).is_err() {
            return Err(PengRobinsonParametersError::CriticalPressure {
                p_crit: self.critical_pressure,
            });
        }

        let omega = self.acentric_factor;
        if !(omega.is_finite() && omega > -1.0) {
            return Err(PengRobinsonParametersError::AcentricFactor { omega });
        }

        let molar_mass = self.molar_mass.get::<kilogram_per_mole>();
        if StrictlyPositive::check(&molar_mass).is_err() {
            return Err(PengRobinsonParametersError::MolarMass {
                molar_mass: self.molar_mass,
            });
        }

        let t_triple = self.triple_temperature.get::<kelvin>();
        let t_max = self.max_temperature.get::<kelvin>();
        if !(t_triple > 0.0 && t_triple < t_crit && t_crit < t_max) {
            return Err(PengRobinsonParametersError::TemperatureLimits {
                t_triple: self.triple_temperature,
                t_crit: self.critical_temperature,
                t_max: self.max_temperature,
            });
        }

        let p_max = self.max_pressure.get::<pascal>();
        if !(p_max > p_crit) {
            return Err(PengRobinsonParametersError::MaxPressure {
                p_max: self.max_pressure,
                p_crit: self.critical_pressure,
            });
        }

        let r = FluidConstants::gas_constant_for(molar_mass);
        let cp0 = self.ideal_gas_cp.get::<joule_per_kilogram_kelvin>();
        if StrictlyPositive::check(&(cp0 - r)).is_err() {
            return Err(PengRobinsonParametersError::IdealGasCp {
                cp: self.ideal_gas_cp,
                r,
            });
        }

        Ok(Validated {
            t_crit,
            p_crit,
            omega,
            molar_mass,
            t_triple,
            t_max,
            p_max,
            cp0,
        })
    }
}
