use crate::support::solve::{Probe, SolveConfig, find_root};
use crate::thermo::PropertyError;

use super::{Branch, HelmholtzModel, SpinodalDensities, spinodal_densities};

/// Densities on an isotherm at which the pressure takes a given value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityRoots {
    /// One mechanically stable density.
    Single(f64),

    /// One density on each side of the unstable region.
    Pair { liquid: f64, vapor: f64 },
}

impl DensityRoots {
    /// Returns the density on `branch`, or the only density there is.
    #[must_use]
    pub fn on(self, branch: Branch) -> f64 {
        match (self, branch) {
            (DensityRoots::Single(density), _) => density,
            (DensityRoots::Pair { liquid, .. }, Branch::Liquid) => liquid,
            (DensityRoots::Pair { vapor, .. }, Branch::Vapor) => vapor,
        }
    }
}

/// Finds the densities at `(temperature, pressure)` by bracketing.
///
/// Below the critical temperature the isotherm has an unstable region
/// between the spinodal densities. The vapor branch is searched over
/// `[10⁻³·p/(R·T), ρ_spin,v]` when `0 < p < p_spin,v`, and the liquid branch
/// over `[ρ_spin,l, ρ_max]` when `p > p_spin,l`. Without an unstable region a
/// single density is searched up to `ρ_max`. Each search bisects in `ln ρ`.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if no density matches `pressure`.
pub fn bracket_density_roots<M: HelmholtzModel + ?Sized>(
    model: &M,
    temperature: f64,
    pressure: f64,
) -> Result<DensityRoots, PropertyError> {
    let c = model.constants();
    let no_root = || {
        PropertyError::out_of_domain(format!(
            "no density at T = {temperature} K matches p = {pressure} Pa"
        ))
    };

    if !c.rho_max.is_finite() {
        return Err(PropertyError::Unsupported {
            context: "density bracketing requires a finite maximum density".to_string(),
        });
    }
    let dilute = 1e-3 * pressure / (c.gas_constant * temperature);

    let Some(spinodal) = spinodal_densities(model, temperature)? else {
        if pressure <= 0.0 {
            return Err(no_root());
        }
        let density = density_on_isotherm(model, temperature, pressure, [dilute, c.rho_max])
            .map_err(|_| no_root())?;
        return Ok(DensityRoots::Single(density));
    };

    let p_spin_v = model.evaluate(spinodal.vapor, temperature).pressure();
    let p_spin_l = model.evaluate(spinodal.liquid, temperature).pressure();

    let vapor = if pressure > 0.0 && pressure < p_spin_v {
        density_on_isotherm(model, temperature, pressure, [dilute, spinodal.vapor]).ok()
    } else {
        None
    };

    let liquid = if pressure > p_spin_l {
        density_on_isotherm(model, temperature, pressure, [spinodal.liquid, c.rho_max]).ok()
    } else {
        None
    };

    match (liquid, vapor) {
        (Some(liquid), Some(vapor)) => Ok(DensityRoots::Pair { liquid, vapor }),
        (Some(density), None) | (None, Some(density)) => Ok(DensityRoots::Single(density)),
        (None, None) => Err(no_root()),
    }
}

/// Relative distance below the critical temperature inside which
/// [`phase_pair`] always brackets both roots.
const NEAR_CRITICAL: f64 = 1e-2;

/// Returns the liquid and vapor densities at a pressure between the
/// spinodal pressures of `spinodal`.
///
/// Uses the model's own root finder away from the critical point, as long as
/// its roots lie outside the spinodal densities. Otherwise each branch is
/// bracketed by its spinodal density.
///
/// # Errors
///
/// Returns [`PropertyError`] if a branch has no root at `pressure` or the two
/// roots coincide.
pub(crate) fn phase_pair<M: HelmholtzModel + ?Sized>(
    model: &M,
    temperature: f64,
    pressure: f64,
    spinodal: &SpinodalDensities,
) -> Result<(f64, f64), PropertyError> {
    let c = model.constants();

    if temperature < c.t_crit * (1.0 - NEAR_CRITICAL)
        && let Ok(DensityRoots::Pair { liquid, vapor }) =
            model.density_roots(temperature, pressure)
        && liquid > spinodal.liquid
        && vapor < spinodal.vapor
    {
        return Ok((liquid, vapor));
    }

    let dilute = 1e-3 * pressure / (c.gas_constant * temperature);
    let liquid = density_on_isotherm(model, temperature, pressure, [spinodal.liquid, c.rho_max])?;
    let vapor = density_on_isotherm(model, temperature, pressure, [dilute, spinodal.vapor])?;
    if !(liquid > vapor) {
        return Err(PropertyError::calculation(format!(
            "liquid and vapor roots coincide at T = {temperature} K and p = {pressure} Pa"
        )));
    }
    Ok((liquid, vapor))
}

/// Bisects `ln ρ` for the density at which the pressure equals `pressure`.
///
/// The pressure mismatch is scaled by `|p| + ρ·|(∂p/∂ρ)_T|`, which keeps the
/// residual close to the error in `ln ρ` even on a steep liquid branch at a
/// tiny target pressure.
pub(crate) fn density_on_isotherm<M: HelmholtzModel + ?Sized>(
    model: &M,
    temperature: f64,
    pressure: f64,
    [lower, upper]: [f64; 2],
) -> Result<f64, PropertyError> {
    let root = find_root(
        |ln_rho: f64| {
            let density = ln_rho.exp();
            let point = model.evaluate(density, temperature);
            let scale = (pressure.abs() + density * point.dp_drho().abs()).max(f64::MIN_POSITIVE);
            Ok(Probe::new((point.pressure() - pressure) / scale, density))
        },
        [lower.ln(), upper.ln()],
        &SolveConfig::default(),
    )?;

    Ok(root.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::thermo::{PropertyBackend, model::helmholtz::test_support::VanDerWaals};

    #[test]
    fn supercritical_isotherm_has_one_root() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let (t, rho) = (400.0, 250.0);
        let p = vdw.pressure(rho, t);

        let roots = vdw.density_roots(t, p)?;
        assert!(matches!(roots, DensityRoots::Single(_)));
        assert_relative_eq!(roots.on(Branch::Vapor), rho, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn subcritical_isotherm_has_two_stable_roots() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();
        let t = 0.9 * c.t_crit;

        // Between the spinodal pressures of the vdW isotherm at T_r = 0.9.
        let p = 0.6 * c.p_crit;
        let DensityRoots::Pair { liquid, vapor } = vdw.density_roots(t, p)? else {
            panic!("expected two roots");
        };

        assert!(liquid > c.rho_crit && vapor < c.rho_crit);
        assert_relative_eq!(vdw.pressure(liquid, t), p, max_relative = 1e-8);
        assert_relative_eq!(vdw.pressure(vapor, t), p, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn negative_pressure_only_on_the_liquid_branch() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();
        let t = 0.8 * c.t_crit;
        let p = -0.2 * c.p_crit;

        let roots = vdw.density_roots(t, p)?;
        let DensityRoots::Single(liquid) = roots else {
            panic!("expected one root");
        };
        assert!(liquid > c.rho_crit);
        assert_relative_eq!(vdw.pressure(liquid, t), p, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn phase_pair_resolves_close_to_critical() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();

        for margin in [1e-3, 1e-5, 1e-6] {
            let t = c.t_crit * (1.0 - margin);
            let spinodal = spinodal_densities(&vdw, t)?
                .ok_or_else(|| PropertyError::calculation("subcritical isotherm"))?;
            let p_l = vdw.pressure(spinodal.liquid, t);
            let p_v = vdw.pressure(spinodal.vapor, t);

            for fraction in [1e-3, 0.5, 1.0 - 1e-3] {
                let p = p_l + fraction * (p_v - p_l);
                let (liquid, vapor) = phase_pair(&vdw, t, p, &spinodal)?;
                assert!(liquid > spinodal.liquid && spinodal.vapor > vapor);
                assert_relative_eq!(vdw.pressure(liquid, t), p, max_relative = 1e-10);
                assert_relative_eq!(vdw.pressure(vapor, t), p, max_relative = 1e-10);
            }
        }
        Ok(())
    }

    #[test]
    fn liquid_root_at_a_tiny_pressure() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();
        let t = c.t_triple;
        let spinodal = spinodal_densities(&vdw, t)?
            .ok_or_else(|| PropertyError::calculation("subcritical isotherm"))?;

        let p = 1e-6;
        let liquid = density_on_isotherm(&vdw, t, p, [spinodal.liquid, c.rho_max])?;
        let vapor = density_on_isotherm(&vdw, t, p, [1e-12, spinodal.vapor])?;
        assert!(vdw.pressure(liquid, t).abs() < 1e-3);
        assert_relative_eq!(vdw.pressure(vapor, t), p, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn no_root_above_the_critical_temperature_at_negative_pressure() {
        let vdw = VanDerWaals::new();
        assert!(matches!(
            vdw.density_roots(400.0, -1e5),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }
}
