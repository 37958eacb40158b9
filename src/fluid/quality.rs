use crate::thermo::{FluidState, InputPair, PropertyBackend, PropertyError};

use super::Fluid;

impl<B: PropertyBackend> Fluid<B> {
    /// Extends the quality of a single-phase state below the critical
    /// pressure, using the saturation states at the same pressure.
    ///
    /// Two-phase states keep their quality. Above the critical pressure or
    /// below the triple-point pressure the quality stays unset.
    pub(super) fn generalize_quality(&self, state: &mut FluidState) {
        if state.quality_mass.is_some() || !self.is_subcritical_pressure(state.pressure) {
            return;
        }

        let saturated = || -> Result<(FluidState, FluidState), PropertyError> {
            let liquid = self.backend.update(InputPair::PQ, state.pressure, 0.0)?;
            let vapor = self.backend.update(InputPair::PQ, state.pressure, 1.0)?;
            Ok((liquid, vapor))
        };

        match saturated() {
            Ok((liquid, vapor)) => {
                let quality =
                    (state.enthalpy - liquid.enthalpy) / (vapor.enthalpy - liquid.enthalpy);
                state.quality_mass = Some(quality);
                state.quality_volume = Some(quality * state.density / vapor.density);
            }
            Err(error) => {
                tracing::debug!(pressure = state.pressure, %error, "quality not generalized");
            }
        }
    }

    /// Adds the departure from saturation at the state's pressure and
    /// temperature.
    pub(super) fn add_supersaturation(&self, state: &mut FluidState) {
        if self.is_subcritical_pressure(state.pressure) {
            match self.backend.update(InputPair::PQ, state.pressure, 0.0) {
                Ok(saturated) => {
                    state.supersaturation_degree = Some(state.temperature - saturated.temperature);
                }
                Err(error) => {
                    tracing::debug!(
                        pressure = state.pressure,
                        %error,
                        "no saturation temperature"
                    );
                }
            }
        }

        let c = self.constants();
        if (c.t_triple..c.t_crit).contains(&state.temperature) {
            match self.backend.update(InputPair::QT, 0.0, state.temperature) {
                Ok(saturated) => {
                    state.supersaturation_ratio = Some(state.pressure / saturated.pressure);
                }
                Err(error) => {
                    tracing::debug!(
                        temperature = state.temperature,
                        %error,
                        "no saturation pressure"
                    );
                }
            }
        }
    }

    /// Pressures at which a saturation temperature exists.
    fn is_subcritical_pressure(&self, pressure: f64) -> bool {
        pressure > self.triple_point_liquid.pressure && pressure < self.constants().p_crit
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{
        fluid::{StateOptions, test_support::co2},
        thermo::{InputPair, Property, PropertyError},
    };

    const ALL: StateOptions = StateOptions {
        generalize_quality: true,
        supersaturation: true,
    };

    #[test]
    fn quality_beyond_the_saturation_states() -> Result<(), PropertyError> {
        let fluid = co2();

        let plain = fluid.state(InputPair::PT, 2e6, 300.0)?;
        assert!(plain.quality_mass().is_none());

        let vapor = fluid.state_with(InputPair::PT, 2e6, 300.0, ALL)?;
        assert!(vapor.quality_mass().is_some_and(|q| q > 1.0));

        let liquid = fluid.state_with(InputPair::PT, 6e6, 250.0, ALL)?;
        assert!(liquid.quality_mass().is_some_and(|q| q < 0.0));
        assert!(liquid.quality_volume().is_some_and(|a| a < 0.0));

        let supercritical = fluid.state_with(InputPair::PT, 1e7, 350.0, ALL)?;
        assert!(supercritical.quality_mass().is_none());
        Ok(())
    }

    #[test]
    fn generalized_quality_matches_inside_the_dome() -> Result<(), PropertyError> {
        let fluid = co2();
        let (liquid, vapor) = fluid.saturation(260.0)?;
        let h = 0.3 * vapor.enthalpy + 0.7 * liquid.enthalpy;

        let state = fluid.state_with(InputPair::HmassP, h, liquid.pressure, ALL)?;
        assert_relative_eq!(state.get(Property::QualityMass), 0.3, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn supersaturation_of_superheated_vapor() -> Result<(), PropertyError> {
        let fluid = co2();
        let state = fluid.state_with(InputPair::PT, 2e6, 300.0, ALL)?;

        let t_sat = fluid.state(InputPair::PQ, 2e6, 0.0)?.temperature;
        let (liquid, _) = fluid.saturation(300.0)?;

        assert_relative_eq!(state.get(Property::Superheating), 300.0 - t_sat, max_relative = 1e-9);
        assert_relative_eq!(state.get(Property::Subcooling), t_sat - 300.0, max_relative = 1e-9);
        assert_relative_eq!(
            state.get(Property::SupersaturationRatio),
            2e6 / liquid.pressure,
            max_relative = 1e-9
        );
        assert!(state.get(Property::SupersaturationRatio) < 1.0);
        Ok(())
    }

    #[test]
    fn saturated_states_have_no_departure() -> Result<(), PropertyError> {
        let fluid = co2();
        let state = fluid.state_with(InputPair::QT, 0.5, 270.0, ALL)?;
        assert_relative_eq!(state.get(Property::SupersaturationDegree), 0.0, epsilon = 1e-6);
        assert_relative_eq!(state.get(Property::SupersaturationRatio), 1.0, epsilon = 1e-8);
        assert_eq!(state.quality_mass(), Some(0.5));
        Ok(())
    }

    #[test]
    fn supercritical_states_have_no_departure() -> Result<(), PropertyError> {
        let state = co2().state_with(InputPair::PT, 1e7, 350.0, ALL)?;
        assert!(state.get(Property::SupersaturationDegree).is_nan());
        assert!(state.get(Property::SupersaturationRatio).is_nan());
        Ok(())
    }
}
