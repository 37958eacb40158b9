use crate::support::solve::{Probe, SolveConfig, find_root};
use crate::thermo::PropertyError;

use super::{HelmholtzModel, roots::phase_pair, spinodal_densities};

/// Margin kept from the spinodal pressures when bracketing the saturation
/// pressure, relative to the smaller of their difference and the vapor
/// spinodal pressure.
const SPINODAL_MARGIN: f64 = 1e-4;

/// Smallest difference between the spinodal pressures, relative to the
/// vapor spinodal pressure, at which saturation is still resolved.
const MIN_SPINODAL_GAP: f64 = 1e-12;

/// Lower bracket for the saturation pressure, relative to the vapor
/// spinodal pressure, when the liquid spinodal pressure is negative.
const MIN_PRESSURE_RATIO: f64 = 1e-12;

/// Relative distance below the critical temperature inside which the
/// two-phase region is treated as collapsed.
pub(crate) const CRITICAL_MARGIN: f64 = 1e-6;

/// Relative distances below the critical temperature tried, in order, for
/// the upper end of the saturation-temperature bracket.
const CRITICAL_BACKOFF: [f64; 5] = [CRITICAL_MARGIN, 1e-5, 1e-4, 1e-3, 1e-2];

/// Coexisting liquid and vapor at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationDensities {
    pub temperature: f64,
    pub pressure: f64,
    pub liquid: f64,
    pub vapor: f64,
}

/// Solves phase equilibrium at `temperature`.
///
/// Bisects `ln p` between the spinodal pressures of the isotherm for equal
/// Gibbs energy of the liquid and vapor roots. A negative liquid spinodal
/// pressure is replaced by a small positive fraction of the vapor one.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] unless
/// `t_triple ≤ temperature < t_crit`, or if the isotherm is too close to
/// critical for its spinodal pressures to be told apart.
pub fn saturation_at_temperature<M: HelmholtzModel + ?Sized>(
    model: &M,
    temperature: f64,
) -> Result<SaturationDensities, PropertyError> {
    let c = model.constants();
    if !(temperature >= c.t_triple && temperature < c.t_crit) {
        return Err(PropertyError::out_of_domain(format!(
            "saturation temperature {temperature} K outside [{}, {}) K",
            c.t_triple, c.t_crit
        )));
    }

    let spinodal = spinodal_densities(model, temperature)?.ok_or_else(|| {
        PropertyError::calculation(format!(
            "isotherm at {temperature} K has no unstable region"
        ))
    })?;

    let p_spin_v = model.evaluate(spinodal.vapor, temperature).pressure();
    let p_spin_l = model.evaluate(spinodal.liquid, temperature).pressure();
    let gap = p_spin_v - p_spin_l;
    if !(gap > MIN_SPINODAL_GAP * p_spin_v) {
        return Err(PropertyError::out_of_domain(format!(
            "isotherm at {temperature} K is too close to critical to resolve saturation"
        )));
    }

    let margin = SPINODAL_MARGIN * gap.min(p_spin_v);
    let lower = if p_spin_l > 0.0 {
        p_spin_l + margin
    } else {
        MIN_PRESSURE_RATIO * p_spin_v
    };
    let upper = p_spin_v - margin;

    let rt = c.gas_constant * temperature;
    let root = find_root(
        |ln_p: f64| {
            let pressure = ln_p.exp();
            let (liquid, vapor) = phase_pair(model, temperature, pressure, &spinodal)?;
            let g_l = model.evaluate(liquid, temperature).gibbs_energy();
            let g_v = model.evaluate(vapor, temperature).gibbs_energy();
            Ok(Probe::new(
                (g_v - g_l) / rt,
                SaturationDensities {
                    temperature,
                    pressure,
                    liquid,
                    vapor,
                },
            ))
        },
        [lower.ln(), upper.ln()],
        &SolveConfig::default(),
    )?;

    tracing::debug!(
        temperature,
        pressure = root.value.pressure,
        iters = root.iters,
        "saturation at temperature converged"
    );

    Ok(root.value)
}

/// Solves phase equilibrium at `pressure`.
///
/// Bisects the temperature for `p_sat(T) = pressure`, between the triple
/// point and the highest temperature below critical at which saturation
/// resolves.
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if `pressure` is not positive,
/// is above the highest resolved saturation pressure, or is below the
/// saturation pressure at the triple point.
pub fn saturation_at_pressure<M: HelmholtzModel + ?Sized>(
    model: &M,
    pressure: f64,
) -> Result<SaturationDensities, PropertyError> {
    let c = model.constants();
    if !(pressure > 0.0 && pressure < c.p_crit) {
        return Err(PropertyError::out_of_domain(format!(
            "saturation pressure {pressure} Pa outside (0, {}) Pa",
            c.p_crit
        )));
    }

    saturation_below_limit(model, pressure, &dome_limit(model)?)
}

/// Saturation at the highest temperature below critical that resolves.
///
/// Tries `t_crit·(1 − δ)` for `δ` from [`CRITICAL_MARGIN`] up to `10⁻²`,
/// one decade at a time.
///
/// # Errors
///
/// Returns the last [`PropertyError`] if none of them converges.
pub(crate) fn dome_limit<M: HelmholtzModel + ?Sized>(
    model: &M,
) -> Result<SaturationDensities, PropertyError> {
    let t_crit = model.constants().t_crit;

    let mut failure = None;
    for margin in CRITICAL_BACKOFF {
        match saturation_at_temperature(model, t_crit * (1.0 - margin)) {
            Ok(limit) => return Ok(limit),
            Err(error) => {
                tracing::debug!(margin, %error, "saturation unresolved below critical");
                failure = Some(error);
            }
        }
    }

    Err(failure.unwrap_or_else(|| {
        PropertyError::calculation("no saturation state below the critical temperature")
    }))
}

/// Solves phase equilibrium at `pressure` up to the saturation state
/// `limit` from [`dome_limit`].
///
/// # Errors
///
/// Returns [`PropertyError::OutOfDomain`] if `pressure` is above
/// `limit.pressure` or below the saturation pressure at the triple point.
pub(crate) fn saturation_below_limit<M: HelmholtzModel + ?Sized>(
    model: &M,
    pressure: f64,
    limit: &SaturationDensities,
) -> Result<SaturationDensities, PropertyError> {
    if pressure > limit.pressure {
        return Err(PropertyError::out_of_domain(format!(
            "saturation pressure {pressure} Pa above {} Pa, the highest resolved at {} K",
            limit.pressure, limit.temperature
        )));
    }
    if pressure == limit.pressure {
        return Ok(*limit);
    }

    let t_triple = model.constants().t_triple;
    let root = find_root(
        |temperature| {
            let saturation = saturation_at_temperature(model, temperature)?;
            Ok(Probe::new((saturation.pressure / pressure).ln(), saturation))
        },
        [t_triple, limit.temperature],
        &SolveConfig::default(),
    )?;

    tracing::debug!(
        pressure,
        temperature = root.x,
        iters = root.iters,
        "saturation at pressure converged"
    );

    Ok(root.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::thermo::{PropertyBackend, model::helmholtz::test_support::VanDerWaals};

    #[test]
    fn equal_pressure_and_gibbs_energy() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();

        for t_r in [0.75, 0.9, 0.99] {
            let t = t_r * c.t_crit;
            let sat = saturation_at_temperature(&vdw, t)?;
            let liquid = vdw.evaluate(sat.liquid, t);
            let vapor = vdw.evaluate(sat.vapor, t);

            assert_relative_eq!(liquid.pressure(), sat.pressure, max_relative = 1e-8);
            assert_relative_eq!(vapor.pressure(), sat.pressure, max_relative = 1e-8);
            assert_relative_eq!(
                liquid.gibbs_energy() / (c.gas_constant * t),
                vapor.gibbs_energy() / (c.gas_constant * t),
                epsilon = 1e-9
            );
            assert!(sat.liquid > c.rho_crit && c.rho_crit > sat.vapor);
        }
        Ok(())
    }

    #[test]
    fn van_der_waals_reduced_pressure() -> Result<(), PropertyError> {
        // Tabulated vdW coexistence: T_r = 0.9 → p_r = 0.64700.
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();
        let sat = saturation_at_temperature(&vdw, 0.9 * c.t_crit)?;
        assert_relative_eq!(sat.pressure / c.p_crit, 0.647, max_relative = 1e-3);
        Ok(())
    }

    #[test]
    fn pressure_inverts_temperature() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let t = 270.0;
        let by_t = saturation_at_temperature(&vdw, t)?;
        let by_p = saturation_at_pressure(&vdw, by_t.pressure)?;

        assert_relative_eq!(by_p.temperature, t, max_relative = 1e-9);
        assert_relative_eq!(by_p.liquid, by_t.liquid, max_relative = 1e-7);
        assert_relative_eq!(by_p.vapor, by_t.vapor, max_relative = 1e-7);
        Ok(())
    }

    #[test]
    fn resolves_close_to_critical() -> Result<(), PropertyError> {
        // vdW coexistence for ε = 1 − T_r → 0:
        // p_r ≈ 1 − 4ε + 24ε²/5 and (ρ_l − ρ_v)/ρ_c ≈ 4√ε.
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();

        for eps in [1e-4_f64, 1e-5, 1e-6] {
            let t = c.t_crit * (1.0 - eps);
            let sat = saturation_at_temperature(&vdw, t)?;

            assert_relative_eq!(
                sat.pressure / c.p_crit,
                1.0 - 4.0 * eps + 4.8 * eps * eps,
                max_relative = 1e-9 + 10.0 * eps.powi(3)
            );
            assert_relative_eq!(
                (sat.liquid - sat.vapor) / c.rho_crit,
                4.0 * eps.sqrt(),
                max_relative = 1e-2
            );
            assert_relative_eq!(vdw.pressure(sat.liquid, t), sat.pressure, max_relative = 1e-10);
            assert_relative_eq!(vdw.pressure(sat.vapor, t), sat.pressure, max_relative = 1e-10);
        }
        Ok(())
    }

    #[test]
    fn dome_limit_sits_at_the_critical_margin() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();
        let limit = dome_limit(&vdw)?;

        assert_relative_eq!(limit.temperature, c.t_crit * (1.0 - CRITICAL_MARGIN));
        assert!(limit.pressure < c.p_crit);
        assert!(matches!(
            saturation_at_pressure(&vdw, 0.5 * (limit.pressure + c.p_crit)),
            Err(PropertyError::OutOfDomain { .. })
        ));
        Ok(())
    }

    #[test]
    fn pressure_inverts_temperature_close_to_critical() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();

        for reduced in [0.99, 0.9999] {
            let t = reduced * c.t_crit;
            let by_t = saturation_at_temperature(&vdw, t)?;
            let by_p = saturation_at_pressure(&vdw, by_t.pressure)?;
            assert_relative_eq!(by_p.temperature, t, max_relative = 1e-9);
        }

        let limit = dome_limit(&vdw)?;
        let at_limit = saturation_at_pressure(&vdw, limit.pressure)?;
        assert_eq!(at_limit, limit);
        Ok(())
    }

    #[test]
    fn domain_limits() {
        let vdw = VanDerWaals::new();
        let c = *vdw.constants();

        assert!(matches!(
            saturation_at_temperature(&vdw, c.t_crit),
            Err(PropertyError::OutOfDomain { .. })
        ));
        assert!(matches!(
            saturation_at_temperature(&vdw, 0.5 * c.t_triple),
            Err(PropertyError::OutOfDomain { .. })
        ));
        assert!(matches!(
            saturation_at_pressure(&vdw, 1.5 * c.p_crit),
            Err(PropertyError::OutOfDomain { .. })
        ));
        assert!(matches!(
            saturation_at_pressure(&vdw, 1.0),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }
}
