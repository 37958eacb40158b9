use crate::fluid::Fluid;
use crate::thermo::{PropertyBackend, PropertyError};

use super::{PhaseLine, line::linspace};

/// Saturated liquid and vapor at `n` temperatures from the triple point to
/// the critical point.
///
/// Both branches end at the cached critical state.
///
/// # Errors
///
/// Returns [`PropertyError`] if `n < 2` or a saturation state fails.
pub fn saturation_line<B: PropertyBackend>(
    fluid: &Fluid<B>,
    n: usize,
) -> Result<PhaseLine, PropertyError> {
    let c = fluid.constants();
    let temperatures = linspace(c.t_triple, c.t_crit, n)?;

    let mut line = PhaseLine {
        liquid: Vec::with_capacity(n),
        vapor: Vec::with_capacity(n),
    };
    for &temperature in &temperatures[..n - 1] {
        let (liquid, vapor) = fluid.saturation(temperature)?;
        line.liquid.push(liquid);
        line.vapor.push(vapor);
    }
    line.liquid.push(fluid.critical_point().clone());
    line.vapor.push(fluid.critical_point().clone());

    tracing::debug!(fluid = fluid.name(), n, "computed saturation line");
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{fluid::test_support::co2, thermo::Property};

    #[test]
    fn runs_from_triple_to_critical() -> Result<(), PropertyError> {
        let fluid = co2();
        let c = *fluid.constants();
        let line = saturation_line(&fluid, 20)?;

        assert_eq!(line.liquid.len(), 20);
        assert_eq!(line.vapor.len(), 20);

        let t = line.liquid_values(Property::Temperature);
        assert_relative_eq!(t[0], c.t_triple);
        assert_relative_eq!(t[19], c.t_crit);

        let (p_l, p_v) = (
            line.liquid_values(Property::Pressure),
            line.vapor_values(Property::Pressure),
        );
        for i in 0..19 {
            assert_relative_eq!(p_l[i], p_v[i], max_relative = 1e-8);
            assert!(p_l[i] < p_l[i + 1]);
            assert!(line.liquid[i].density > c.rho_crit);
            assert!(line.vapor[i].density < c.rho_crit);
        }
        assert_relative_eq!(p_l[19], c.p_crit, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn needs_two_points() {
        assert!(saturation_line(&co2(), 1).is_err());
    }
}
