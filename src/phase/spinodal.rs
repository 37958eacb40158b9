use crate::fluid::Fluid;
use crate::thermo::{
    FluidState, PropertyError,
    model::helmholtz::{Branch, HelmholtzModel, spinodal_densities},
};

use super::{PhaseLine, line::linspace};

/// The metastable state at the spinodal density on `branch`.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] at or above the critical
/// temperature, where the isotherm has no unstable region.
pub fn spinodal_point<B: HelmholtzModel>(
    fluid: &Fluid<B>,
    temperature: f64,
    branch: Branch,
) -> Result<FluidState, PropertyError> {
    let spinodal = spinodal_densities(fluid.backend(), temperature)?.ok_or_else(|| {
        PropertyError::out_of_domain(format!(
            "no spinodal at {temperature} K (critical temperature {} K)",
            fluid.constants().t_crit
        ))
    })?;

    let density = match branch {
        Branch::Liquid => spinodal.liquid,
        Branch::Vapor => spinodal.vapor,
    };
    fluid.evaluate_metastable(density, temperature)
}

/// Spinodal states at `n` temperatures from the triple point to the
/// critical point, where both branches end.
///
/// # Errors
///
/// Returns [`PropertyError`] if `n < 2` or a spinodal cannot be located.
pub fn spinodal_line<B: HelmholtzModel>(
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
        line.liquid
            .push(spinodal_point(fluid, temperature, Branch::Liquid)?);
        line.vapor
            .push(spinodal_point(fluid, temperature, Branch::Vapor)?);
    }
    line.liquid.push(fluid.critical_point().clone());
    line.vapor.push(fluid.critical_point().clone());

    tracing::debug!(fluid = fluid.name(), n, "computed spinodal line");
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        fluid::test_support::co2,
        phase::saturation_line,
        thermo::{Phase, Property},
    };

    #[test]
    fn points_are_mechanically_unstable_limits() -> Result<(), PropertyError> {
        let fluid = co2();
        let t = 270.0;
        let (liquid, vapor) = fluid.saturation(t)?;

        let spin_l = spinodal_point(&fluid, t, Branch::Liquid)?;
        let spin_v = spinodal_point(&fluid, t, Branch::Vapor)?;

        assert!(vapor.density < spin_v.density);
        assert!(spin_v.density < spin_l.density);
        assert!(spin_l.density < liquid.density);

        // The liquid spinodal sits below the saturation pressure and the
        // vapor spinodal above it.
        assert!(spin_l.pressure < liquid.pressure);
        assert!(spin_v.pressure > vapor.pressure);

        // (∂p/∂ρ)_T vanishes, so the isothermal compressibility diverges.
        let point = fluid.backend().evaluate(spin_l.density, t);
        let scale = fluid.constants().gas_constant * t;
        assert!(point.dp_drho().abs() / scale < 1e-6);
        assert_eq!(spin_l.phase(), Phase::Liquid);
        assert_eq!(spin_v.phase(), Phase::Gas);
        Ok(())
    }

    #[test]
    fn none_above_critical() {
        assert!(matches!(
            spinodal_point(&co2(), 320.0, Branch::Liquid),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn line_encloses_nothing_outside_the_saturation_line() -> Result<(), PropertyError> {
        let fluid = co2();
        let spinodal = spinodal_line(&fluid, 12)?;
        let saturation = saturation_line(&fluid, 12)?;

        let (rho_spin_l, rho_spin_v) = (
            spinodal.liquid_values(Property::Density),
            spinodal.vapor_values(Property::Density),
        );
        let (rho_sat_l, rho_sat_v) = (
            saturation.liquid_values(Property::Density),
            saturation.vapor_values(Property::Density),
        );
        for i in 0..11 {
            assert!(rho_sat_v[i] < rho_spin_v[i]);
            assert!(rho_spin_l[i] < rho_sat_l[i]);
        }
        assert_relative_eq!(rho_spin_l[11], fluid.constants().rho_crit);
        assert_relative_eq!(rho_spin_v[11], fluid.constants().rho_crit);
        Ok(())
    }
}
