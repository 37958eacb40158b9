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

/// Canonical identifier for dry air, treated as a pseudo-pure fluid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Air;

impl CubicFluid for Air {
    fn parameters() -> CubicParameters {
        CubicParameters {
            critical_temperature: ThermodynamicTemperature::new::<kelvin>(132.5306),
            critical_pressure: Pressure::new::<megapascal>(3.786),
            acentric_factor: 0.0335,
            molar_mass: MolarMass::new::<gram_per_mole>(28.96546),
            triple_temperature: ThermodynamicTemperature::new::<kelvin>(59.75),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(2000.0),
            max_pressure: Pressure::new::<megapascal>(2000.0),
            ideal_gas_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1004.0),
        }
    }
}

impl PerfectGasFluid for Air {
    fn parameters() -> PerfectGasParameters {
        PerfectGasParameters::new(
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.053),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1005.0),
        )
    }
}

#[cfg(feature = "coolprop")]
impl crate::thermo::model::coolprop::CoolPropFluid for Air {
    const BACKEND: &'static str = "HEOS";
    const NAME: &'static str = "Air";
}
