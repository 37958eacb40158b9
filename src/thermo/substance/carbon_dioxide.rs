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

/// Canonical identifier for carbon dioxide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarbonDioxide;

impl CubicFluid for CarbonDioxide {
    fn parameters() -> CubicParameters {
        CubicParameters {
            critical_temperature: ThermodynamicTemperature::new::<kelvin>(304.1282),
            critical_pressure: Pressure::new::<megapascal>(7.3773),
            acentric_factor: 0.22394,
            molar_mass: MolarMass::new::<gram_per_mole>(44.0098),
            triple_temperature: ThermodynamicTemperature::new::<kelvin>(216.592),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(2000.0),
            max_pressure: Pressure::new::<megapascal>(800.0),
            ideal_gas_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(843.0),
        }
    }
}

impl PerfectGasFluid for CarbonDioxide {
    fn parameters() -> PerfectGasParameters {
        PerfectGasParameters::new(
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(188.92),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(844.0),
        )
    }
}

#[cfg(feature = "coolprop")]
impl crate::thermo::model::coolprop::CoolPropFluid for CarbonDioxide {
    const BACKEND: &'static str = "HEOS";
    const NAME: &'static str = "CarbonDioxide";
}
