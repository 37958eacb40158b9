use crate::fluid::Fluid;
use crate::thermo::{FluidState, InputPair, PropertyBackend, PropertyError};

use super::line::linspace;

/// States on the critical isochore at `n` temperatures from the critical
/// temperature to `t_max`.
///
/// The first state is the critical point.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] unless `t_max` lies above the
/// critical temperature, and any backend error along the line.
pub fn pseudocritical_line<B: PropertyBackend>(
    fluid: &Fluid<B>,
    n: usize,
    t_max: f64,
) -> Result<Vec<FluidState>, PropertyError> {
    let c = fluid.constants();
    if !(t_max > c.t_crit) {
        return Err(PropertyError::out_of_domain(format!(
            "pseudocritical line needs t_max above {} K, got {t_max} K",
            c.t_crit
        )));
    }

    let temperatures = linspace(c.t_crit, t_max, n)?;
    let mut states = Vec::with_capacity(n);
    states.push(fluid.critical_point().clone());
    for &temperature in &temperatures[1..] {
        states.push(fluid.state(InputPair::DmassT, c.rho_crit, temperature)?);
    }
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        fluid::test_support::co2,
        thermo::{Phase, Property},
    };

    #[test]
    fn follows_the_critical_isochore() -> Result<(), PropertyError> {
        let fluid = co2();
        let c = *fluid.constants();
        let line = pseudocritical_line(&fluid, 8, 400.0)?;

        assert_eq!(line.len(), 8);
        assert_eq!(line[0].phase(), Phase::CriticalPoint);
        assert_relative_eq!(line[7].temperature, 400.0);
        for pair in line.windows(2) {
            assert_relative_eq!(pair[1].get(Property::Density), c.rho_crit, max_relative = 1e-12);
            assert!(pair[1].pressure > pair[0].pressure);
            assert_eq!(pair[1].phase(), Phase::Supercritical);
        }
        Ok(())
    }

    #[test]
    fn rejects_subcritical_end() {
        let fluid = co2();
        assert!(matches!(
            pseudocritical_line(&fluid, 5, 250.0),
            Err(PropertyError::OutOfDomain { .. })
        ));
        assert!(pseudocritical_line(&fluid, 1, 400.0).is_err());
    }
}
