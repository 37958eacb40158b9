use uom::si::{
    f64::{MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    molar_mass::gram_per_mole,
    pressure::megapascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::thermo::model::peng_robinson::{CubicFluid, CubicParameters};

/// Canonical identifier for water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Water;

impl CubicFluid for Water {
    fn parameters() -> CubicParameters {
        CubicParameters {
            critical_temperature: ThermodynamicTemperature::new::<kelvin>(647.096),
            critical_pressure: Pressure::new::<megapascal>(22.064),
            acentric_factor: 0.3443,
            molar_mass: MolarMass::new::<gram_per_mole>(18.015268),
            triple_temperature: ThermodynamicTemperature::new::<kelvin>(273.16),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(2000.0),
            max_pressure: Pressure::new::<megapascal>(1000.0),
            ideal_gas_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1864.0),
        }
    }
}

#[cfg(feature = "coolprop")]
impl crate::thermo::model::coolprop::CoolPropFluid for Water {
    const BACKEND: &'static str = "HEOS";
    const NAME: &'static str = "Water";
}
