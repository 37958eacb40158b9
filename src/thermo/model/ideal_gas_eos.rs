//! The ideal-gas equation of state, `p = ρ·R·T`, on `uom` quantities.
//!
//! [`PerfectGas`](super::PerfectGas) is built on these. The Helmholtz models
//! reach the same limit through their ideal-gas part.

use uom::si::{
    f64::{MassDensity, Pressure, ThermodynamicTemperature},
    temperature_interval, thermodynamic_temperature,
};

use crate::support::units::SpecificGasConstant;

#[must_use]
pub(crate) fn pressure(
    temperature: ThermodynamicTemperature,
    density: MassDensity,
    gas_constant: SpecificGasConstant,
) -> Pressure {
    density * gas_constant * temperature
}

#[must_use]
pub(crate) fn density(
    temperature: ThermodynamicTemperature,
    pressure: Pressure,
    gas_constant: SpecificGasConstant,
) -> MassDensity {
    pressure / (gas_constant * temperature)
}

/// Solves `p = ρ·R·T` for the temperature.
///
/// `p/(ρ·R)` carries the dimension of a temperature interval, which is
/// rewrapped as an absolute temperature.
#[must_use]
pub(crate) fn temperature(
    pressure: Pressure,
    density: MassDensity,
    gas_constant: SpecificGasConstant,
) -> ThermodynamicTemperature {
    let interval = pressure / (density * gas_constant);
    ThermodynamicTemperature::new::<thermodynamic_temperature::kelvin>(
        interval.get::<temperature_interval::kelvin>(),
    )
}
