use crate::support::solve::{Probe, SolveConfig, find_root};
use crate::thermo::PropertyError;

use super::HelmholtzModel;

/// Number of evenly spaced densities sampled when locating the unstable
/// region of an isotherm.
const SAMPLES: usize = 64;

/// Densities at which `(∂p/∂ρ)_T` vanishes on a subcritical isotherm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinodalDensities {
    pub vapor: f64,
    pub liquid: f64,
}

/// Locates the spinodal densities of the `temperature` isotherm.
///
/// Samples `(∂p/∂ρ)_T / (R·T)` on [`SAMPLES`] densities in `(0, ρ_max)` and
/// at the critical density, then bisects the sign change on each side of
/// the minimum.
///
/// Returns `None` at or above the critical temperature, and when the
/// isotherm has no unstable region.
///
/// # Errors
///
/// Returns [`PropertyError`] if a bisection fails.
pub fn spinodal_densities<M: HelmholtzModel + ?Sized>(
    model: &M,
    temperature: f64,
) -> Result<Option<SpinodalDensities>, PropertyError> {
    let c = model.constants();
    if !(temperature > 0.0 && temperature < c.t_crit) || !c.rho_max.is_finite() {
        return Ok(None);
    }

    let rt = c.gas_constant * temperature;
    let stability = |density: f64| model.evaluate(density, temperature).dp_drho() / rt;

    let mut samples: Vec<(f64, f64)> = (1..=SAMPLES)
        .map(|i| c.rho_max * i as f64 / (SAMPLES + 1) as f64)
        .chain([c.rho_crit])
        .map(|density| (density, stability(density)))
        .collect();
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));

    let Some((i_min, &(_, minimum))) = samples
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.1.total_cmp(&b.1.1))
    else {
        return Ok(None);
    };
    if !(minimum < 0.0) {
        return Ok(None);
    }

    let vapor_bracket = match samples[..i_min].iter().rposition(|s| s.1 > 0.0) {
        Some(j) => [samples[j].0, samples[j + 1].0],
        None => [c.rho_max * 1e-12, samples[0].0],
    };
    let liquid_bracket = match samples[i_min..].iter().position(|s| s.1 > 0.0) {
        Some(k) => [samples[i_min + k - 1].0, samples[i_min + k].0],
        None => [samples[samples.len() - 1].0, c.rho_max],
    };

    let solve = |[lower, upper]: [f64; 2]| -> Result<f64, PropertyError> {
        let root = find_root(
            |ln_rho: f64| {
                let density = ln_rho.exp();
                Ok(Probe::new(stability(density), density))
            },
            [lower.ln(), upper.ln()],
            &SolveConfig::default(),
        )?;
        Ok(root.value)
    };

    Ok(Some(SpinodalDensities {
        vapor: solve(vapor_bracket)?,
        liquid: solve(liquid_bracket)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::thermo::{PropertyBackend, model::helmholtz::test_support::VanDerWaals};

    #[test]
    fn van_der_waals_spinodal() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();

        // Reduced vdW spinodal: T_r = ρ_r·(3 − ρ_r)²/4.
        let t_r: f64 = 0.9;
        let t = t_r * c.t_crit;
        let spinodal = spinodal_densities(&vdw, t)?.expect("subcritical isotherm");

        for density in [spinodal.vapor, spinodal.liquid] {
            let rho_r = density / c.rho_crit;
            assert_relative_eq!(rho_r * (3.0 - rho_r).powi(2) / 4.0, t_r, max_relative = 1e-9);
            let slope = vdw.evaluate(density, t).dp_drho() / (c.gas_constant * t);
            assert!(slope.abs() < 1e-9);
        }
        assert!(spinodal.vapor < c.rho_crit && c.rho_crit < spinodal.liquid);
        Ok(())
    }

    #[test]
    fn none_at_and_above_critical() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let t_c = vdw.constants().t_crit;
        assert!(spinodal_densities(&vdw, t_c)?.is_none());
        assert!(spinodal_densities(&vdw, 1.2 * t_c)?.is_none());
        Ok(())
    }

    #[test]
    fn close_to_critical() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();
        let spinodal =
            spinodal_densities(&vdw, c.t_crit * (1.0 - 1e-6))?.expect("subcritical isotherm");
        assert!(spinodal.vapor < c.rho_crit && c.rho_crit < spinodal.liquid);
        assert!((spinodal.liquid - spinodal.vapor) / c.rho_crit < 1e-2);
        Ok(())
    }
}
