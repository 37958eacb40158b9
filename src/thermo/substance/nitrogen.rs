use uom::si::{
    f64::{MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    molar_mass::gram_per_mole,
    pressure::megapascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::SpecificGasConstant;
use crate::thermo::model::{
    peng_robinson::{CubicFluid, CubicParameters},
    perfect_gas::{PerfectGasFluid, PerfectGasParameters},
};

/// Canonical identifier for nitrogen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nitrogen;

impl CubicFluid for Nitrogen {
    fn parameters() -> CubicParameters {
        CubicParameters {
            critical_temperature: ThermodynamicTemperature::new::<kelvin>(126.192),
            critical_pressure: Pressure::new::<megapascal>(3.3958),
            acentric_factor: 0.0372,
            molar_mass: MolarMass::new::<gram_per_mole>(28.01348),
            triple_temperature: ThermodynamicTemperature::new::<kelvin>(63.151),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(2000.0),
            max_pressure: Pressure::new::<megapascal>(2200.0),
            ideal_gas_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1039.0),
        }
    }
}

impl PerfectGasFluid for Nitrogen {
    fn parameters() -> PerfectGasParameters {
        PerfectGasParameters::new(
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(296.8),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1040.0),
        )
    }
}

#[cfg(feature = "coolprop")]
impl crate::thermo::model::coolprop::CoolPropFluid for Nitrogen {
    const BACKEND: &'static str = "HEOS";
    const NAME: &'static str = "Nitrogen";
}
