use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Subtraction of absolute temperatures.
///
/// `uom` has no `ThermodynamicTemperature - ThermodynamicTemperature`
/// operator, see
/// [#380](https://github.com/iliekturtles/uom/issues/380).
/// Superheating, subcooling and reference-state offsets all need one.
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::degree_celsius as delta_celsius,
        thermodynamic_temperature::{degree_celsius, degree_fahrenheit},
    };

    #[test]
    fn subcooling_is_negative_superheating() {
        let t_sat = ThermodynamicTemperature::new::<degree_celsius>(100.0);
        let liquid = ThermodynamicTemperature::new::<degree_celsius>(90.0);

        assert_relative_eq!(
            liquid.minus(t_sat).get::<delta_celsius>(),
            -10.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            t_sat.minus(liquid).get::<delta_kelvin>(),
            10.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn mixed_scales() {
        let t_in_c = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        let t_in_f = ThermodynamicTemperature::new::<degree_fahrenheit>(77.0);
        assert_relative_eq!(
            t_in_f.minus(t_in_c).get::<delta_kelvin>(),
            0.0,
            epsilon = 1e-12
        );
    }
}
