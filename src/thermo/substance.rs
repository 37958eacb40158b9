//! Canonical substance identifiers.
//!
//! A substance type names a fluid, and each model defines how that name is
//! interpreted through a trait implementation:
//!
//! - [`CubicFluid`](super::model::peng_robinson::CubicFluid): critical
//!   constants and ideal-gas data for [`PengRobinson`](super::model::PengRobinson)
//! - [`PerfectGasFluid`](super::model::perfect_gas::PerfectGasFluid):
//!   constants for [`PerfectGas`](super::model::PerfectGas), gases only
//! - `CoolPropFluid`: backend and fluid names for `CoolProp`, with the
//!   `coolprop` feature

mod air;
mod ammonia;
mod carbon_dioxide;
mod nitrogen;
mod r134a;
mod water;

pub use air::Air;
pub use ammonia::Ammonia;
pub use carbon_dioxide::CarbonDioxide;
pub use nitrogen::Nitrogen;
pub use r134a::R134a;
pub use water::Water;

#[cfg(test)]
mod tests {
    use super::*;

    use crate::thermo::{PropertyBackend, model::PengRobinson};

    #[test]
    fn cubic_data_is_valid() {
        let t_crit = [
            PengRobinson::<Air>::new().map(|m| m.constants().t_crit),
            PengRobinson::<Ammonia>::new().map(|m| m.constants().t_crit),
            PengRobinson::<CarbonDioxide>::new().map(|m| m.constants().t_crit),
            PengRobinson::<Nitrogen>::new().map(|m| m.constants().t_crit),
            PengRobinson::<R134a>::new().map(|m| m.constants().t_crit),
            PengRobinson::<Water>::new().map(|m| m.constants().t_crit),
        ];
        for t in t_crit {
            assert!(t.is_ok_and(|t| t > 100.0));
        }
    }

    #[test]
    fn water_gas_constant() {
        let water = PengRobinson::<Water>::new().unwrap();
        approx::assert_relative_eq!(water.constants().gas_constant, 461.52, max_relative = 1e-4);
    }
}
