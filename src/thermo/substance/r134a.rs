use uom::si::{
    f64::{MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    molar_mass::gram_per_mole,
    pressure::megapascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::thermo::model::peng_robinson::{CubicFluid, CubicParameters};

/// Canonical identifier for the refrigerant R-134a (1,1,1,2-tetrafluoroethane).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct R134a;

impl CubicFluid for R134a {
    fn parameters() -> CubicParameters {
        CubicParameters {
            critical_temperature: ThermodynamicTemperature::new::<kelvin>(374.21),
            critical_pressure: Pressure::new::<megapascal>(4.05928),
            acentric_factor: 0.32684,
            molar_mass: MolarMass::new::<gram_per_mole>(102.032),
            triple_temperature: ThermodynamicTemperature::new::<kelvin>(169.85),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(455.0),
            max_pressure: Pressure::new::<megapascal>(70.0),
            ideal_gas_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(851.0),
        }
    }
}

#[cfg(feature = "coolprop")]
impl crate::thermo::model::coolprop::CoolPropFluid for R134a {
    const BACKEND: &'static str = "HEOS";
    const NAME: &'static str = "R134a";
}
