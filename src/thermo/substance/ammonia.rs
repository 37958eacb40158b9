use uom::si::{
    f64::{MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    molar_mass::gram_per_mole,
    pressure::megapascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::thermo::model::peng_robinson::{CubicFluid, CubicParameters};

/// Canonical identifier for ammonia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ammonia;

impl CubicFluid for Ammonia {
    fn parameters() -> CubicParameters {
        CubicParameters {
            critical_temperature: ThermodynamicTemperature::new::<kelvin>(405.4),
            critical_pressure: Pressure::new::<megapascal>(11.333),
            acentric_factor: 0.25601,
            molar_mass: MolarMass::new::<gram_per_mole>(17.03052),
            triple_temperature: ThermodynamicTemperature::new::<kelvin>(195.495),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(700.0),
            max_pressure: Pressure::new::<megapascal>(1000.0),
            ideal_gas_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(2097.0),
        }
    }
}

#[cfg(feature = "coolprop")]
impl crate::thermo::model::coolprop::CoolPropFluid for Ammonia {
    const BACKEND: &'static str = "HEOS";
    const NAME: &'static str = "Ammonia";
}
