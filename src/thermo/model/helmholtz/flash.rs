use crate::support::solve::{Probe, SolveConfig, find_root};
use crate::thermo::{FluidConstants, FluidState, InputPair, PropertyError};

use super::{
    Branch, DensityRoots, HelmholtzModel, SaturationDensities, check_temperature,
    saturation::{CRITICAL_MARGIN, dome_limit, saturation_below_limit},
    saturation_at_pressure, saturation_at_temperature,
};

/// Number of densities scanned for a bracket in the `HmassSmass` flash.
const HS_SCAN_POINTS: usize = 16;

/// A property value a flash has to match.
#[derive(Debug, Clone, Copy)]
enum Target {
    Pressure(f64),
    Enthalpy(f64),
    Entropy(f64),
}

impl Target {
    fn value(self) -> f64 {
        match self {
            Target::Pressure(x) | Target::Enthalpy(x) | Target::Entropy(x) => x,
        }
    }

    fn of(self, state: &FluidState) -> f64 {
        match self {
            Target::Pressure(_) => state.pressure,
            Target::Enthalpy(_) => state.enthalpy,
            Target::Entropy(_) => state.entropy,
        }
    }

    /// Dimensionless mismatch of `state`.
    fn residual(self, state: &FluidState, c: &FluidConstants) -> f64 {
        let scale = match self {
            Target::Pressure(p) => p,
            Target::Enthalpy(_) => c.gas_constant * c.t_crit,
            Target::Entropy(_) => c.gas_constant,
        };
        (self.of(state) - self.value()) / scale
    }
}

/// Computes the equilibrium state from any supported input pair.
///
/// The two values are given in the order of the pair name, so
/// [`InputPair::HmassP`] takes `(h, p)` and [`InputPair::PT`] takes `(p, T)`.
/// Inside the two-phase region the result mixes the saturated liquid and
/// vapor at the lever-rule quality.
///
/// # Errors
///
/// - [`PropertyError::InvalidState`] if an input is not finite.
/// - [`PropertyError::OutOfDomain`] if an input is outside the model range,
///   or no state matches the inputs.
/// - [`PropertyError::Calculation`] if an iteration fails.
pub fn equilibrium<M: HelmholtzModel + ?Sized>(
    model: &M,
    pair: InputPair,
    first: f64,
    second: f64,
) -> Result<FluidState, PropertyError> {
    if !(first.is_finite() && second.is_finite()) {
        return Err(PropertyError::invalid_state(format!(
            "{pair} inputs ({first}, {second}) are not finite"
        )));
    }

    match pair {
        InputPair::DmassT => flash_dt(model, first, second),
        InputPair::PT => flash_pt(model, first, second),
        InputPair::QT => flash_qt(model, first, second),
        InputPair::PQ => flash_pq(model, first, second),
        InputPair::HmassP => flash_isobaric(model, Target::Enthalpy(first), second),
        InputPair::PSmass => flash_isobaric(model, Target::Entropy(second), first),
        InputPair::DmassP => flash_isochoric(model, first, Target::Pressure(second)),
        InputPair::DmassHmass => flash_isochoric(model, first, Target::Enthalpy(second)),
        InputPair::DmassSmass => flash_isochoric(model, first, Target::Entropy(second)),
        InputPair::SmassT => flash_st(model, first, second),
        InputPair::HmassSmass => flash_hs(model, first, second),
    }
}

fn check_pressure(c: &FluidConstants, pressure: f64) -> Result<(), PropertyError> {
    if pressure > 0.0 && pressure <= c.p_max {
        Ok(())
    } else {
        Err(PropertyError::out_of_domain(format!(
            "pressure {pressure} Pa outside (0, {}] Pa",
            c.p_max
        )))
    }
}

fn check_density(c: &FluidConstants, density: f64) -> Result<(), PropertyError> {
    if density > 0.0 && density < c.rho_max {
        Ok(())
    } else {
        Err(PropertyError::out_of_domain(format!(
            "density {density} kg/m³ outside (0, {}) kg/m³",
            c.rho_max
        )))
    }
}

fn check_quality(quality: f64) -> Result<(), PropertyError> {
    if (0.0..=1.0).contains(&quality) {
        Ok(())
    } else {
        Err(PropertyError::out_of_domain(format!(
            "quality {quality} outside [0, 1]"
        )))
    }
}

/// Saturated liquid and vapor as single-phase states.
fn saturated_states<M: HelmholtzModel + ?Sized>(
    model: &M,
    sat: &SaturationDensities,
) -> (FluidState, FluidState) {
    let c = model.constants();
    let liquid = FluidState::from_point(&model.evaluate(sat.liquid, sat.temperature), c);
    let vapor = FluidState::from_point(&model.evaluate(sat.vapor, sat.temperature), c);
    (liquid, vapor)
}

fn mixture<M: HelmholtzModel + ?Sized>(
    model: &M,
    sat: &SaturationDensities,
    quality: f64,
) -> Result<FluidState, PropertyError> {
    let (liquid, vapor) = saturated_states(model, sat);
    FluidState::two_phase(&liquid, &vapor, quality)
}

/// Saturation at `temperature`, or `None` outside the resolvable dome.
fn dome_at<M: HelmholtzModel + ?Sized>(
    model: &M,
    temperature: f64,
) -> Result<Option<SaturationDensities>, PropertyError> {
    let t_crit = model.constants().t_crit;
    if temperature >= t_crit * (1.0 - CRITICAL_MARGIN) {
        return Ok(None);
    }
    saturation_at_temperature(model, temperature).map(Some)
}

fn flash_dt<M: HelmholtzModel + ?Sized>(
    model: &M,
    density: f64,
    temperature: f64,
) -> Result<FluidState, PropertyError> {
    let c = model.constants();
    check_temperature(model, temperature)?;
    check_density(c, density)?;

    if let Some(sat) = dome_at(model, temperature)? {
        if density >= sat.vapor && density <= sat.liquid {
            let quality =
                (1.0 / density - 1.0 / sat.liquid) / (1.0 / sat.vapor - 1.0 / sat.liquid);
            return mixture(model, &sat, quality.clamp(0.0, 1.0));
        }
    }

    Ok(FluidState::from_point(&model.evaluate(density, temperature), c))
}

/// Single-phase state on the stable root at `(pressure, temperature)`.
fn flash_pt<M: HelmholtzModel + ?Sized>(
    model: &M,
    pressure: f64,
    temperature: f64,
) -> Result<FluidState, PropertyError> {
    let c = model.constants();
    check_temperature(model, temperature)?;
    check_pressure(c, pressure)?;

    let density = match model.density_roots(temperature, pressure)? {
        DensityRoots::Single(density) => density,
        DensityRoots::Pair { liquid, vapor } => {
            let g_l = model.evaluate(liquid, temperature).gibbs_energy();
            let g_v = model.evaluate(vapor, temperature).gibbs_energy();
            if g_v <= g_l { vapor } else { liquid }
        }
    };

    Ok(FluidState::from_point(&model.evaluate(density, temperature), c))
}

fn flash_qt<M: HelmholtzModel + ?Sized>(
    model: &M,
    quality: f64,
    temperature: f64,
) -> Result<FluidState, PropertyError> {
    check_quality(quality)?;
    check_temperature(model, temperature)?;
    let Some(sat) = dome_at(model, temperature)? else {
        return Err(PropertyError::out_of_domain(format!(
            "temperature {temperature} K is within a relative {CRITICAL_MARGIN} of the \
             critical temperature {} K, where liquid and vapor coincide",
            model.constants().t_crit
        )));
    };
    mixture(model, &sat, quality)
}

fn flash_pq<M: HelmholtzModel + ?Sized>(
    model: &M,
    pressure: f64,
    quality: f64,
) -> Result<FluidState, PropertyError> {
    check_quality(quality)?;
    check_pressure(model.constants(), pressure)?;
    let sat = saturation_at_pressure(model, pressure)?;
    mixture(model, &sat, quality)
}

/// State on `branch` at `(pressure, temperature)`.
fn single_phase_on<M: HelmholtzModel + ?Sized>(
    model: &M,
    pressure: f64,
    temperature: f64,
    branch: Branch,
) -> Result<FluidState, PropertyError> {
    let density = model.density_roots(temperature, pressure)?.on(branch);
    Ok(FluidState::from_point(
        &model.evaluate(density, temperature),
        model.constants(),
    ))
}

/// `HmassP` and `PSmass`.
///
/// Below the resolved saturation pressures the search is split at the
/// saturation temperature. Between the highest resolved saturation pressure
/// and the critical pressure, the liquid search ends at the last resolved
/// saturation temperature and the vapor search starts at the critical one.
fn flash_isobaric<M: HelmholtzModel + ?Sized>(
    model: &M,
    target: Target,
    pressure: f64,
) -> Result<FluidState, PropertyError> {
    let c = model.constants();
    check_pressure(c, pressure)?;

    let mut brackets = vec![[c.t_triple, c.t_max]];
    if pressure < c.p_crit {
        let limit = dome_limit(model)?;
        if pressure <= limit.pressure {
            match saturation_below_limit(model, pressure, &limit) {
                Ok(sat) => return flash_isobaric_subcritical(model, target, pressure, &sat),
                // Below the triple-point pressure.
                Err(PropertyError::OutOfDomain { .. }) => {}
                Err(error) => return Err(error),
            }
        } else {
            brackets = vec![[c.t_triple, limit.temperature], [c.t_crit, c.t_max]];
        }
    }

    let split = brackets.len() > 1;
    let mut failure = None;
    for bracket in brackets {
        let result = isobaric_search(model, target, pressure, bracket, |t| {
            flash_pt(model, pressure, t)
        });
        match result {
            Err(error @ PropertyError::OutOfDomain { .. }) => failure = Some(error),
            result => return result,
        }
    }

    match failure {
        Some(_) if split => Err(PropertyError::out_of_domain(format!(
            "no state at p = {pressure} Pa matches {target:?} outside the unresolved \
             region next to the critical point"
        ))),
        Some(error) => Err(error),
        None => Err(PropertyError::out_of_domain(format!(
            "no state at p = {pressure} Pa matches {target:?}"
        ))),
    }
}

fn flash_isobaric_subcritical<M: HelmholtzModel + ?Sized>(
    model: &M,
    target: Target,
    pressure: f64,
    sat: &SaturationDensities,
) -> Result<FluidState, PropertyError> {
    let c = model.constants();
    let (liquid, vapor) = saturated_states(model, sat);
    let (x_l, x_v, x) = (target.of(&liquid), target.of(&vapor), target.value());

    if x >= x_l && x <= x_v {
        return FluidState::two_phase(&liquid, &vapor, (x - x_l) / (x_v - x_l));
    }

    if x < x_l {
        isobaric_search(model, target, pressure, [c.t_triple, sat.temperature], |t| {
            single_phase_on(model, pressure, t, Branch::Liquid)
        })
    } else {
        isobaric_search(model, target, pressure, [sat.temperature, c.t_max], |t| {
            single_phase_on(model, pressure, t, Branch::Vapor)
        })
    }
}

fn isobaric_search<M, F>(
    model: &M,
    target: Target,
    pressure: f64,
    bracket: [f64; 2],
    state_at: F,
) -> Result<FluidState, PropertyError>
where
    M: HelmholtzModel + ?Sized,
    F: Fn(f64) -> Result<FluidState, PropertyError>,
{
    let c = model.constants();
    let root = find_root(
        |temperature| {
            let state = state_at(temperature)?;
            Ok(Probe::new(target.residual(&state, c), state))
        },
        bracket,
        &SolveConfig::default(),
    )?;

    tracing::debug!(
        pressure,
        target = target.value(),
        temperature = root.x,
        iters = root.iters,
        "isobaric flash converged"
    );

    Ok(root.value)
}

/// `DmassP`, `DmassHmass` and `DmassSmass`.
fn flash_isochoric<M: HelmholtzModel + ?Sized>(
    model: &M,
    density: f64,
    target: Target,
) -> Result<FluidState, PropertyError> {
    let c = model.constants();
    check_density(c, density)?;
    if let Target::Pressure(pressure) = target {
        check_pressure(c, pressure)?;
    }

    let root = find_root(
        |temperature| {
            let state = flash_dt(model, density, temperature)?;
            Ok(Probe::new(target.residual(&state, c), state))
        },
        [c.t_triple, c.t_max],
        &SolveConfig::default(),
    )?;

    Ok(root.value)
}

fn flash_st<M: HelmholtzModel + ?Sized>(
    model: &M,
    entropy: f64,
    temperature: f64,
) -> Result<FluidState, PropertyError> {
    let c = model.constants();
    check_temperature(model, temperature)?;

    let target = Target::Entropy(entropy);
    let search = |[lower, upper]: [f64; 2]| -> Result<FluidState, PropertyError> {
        let root = find_root(
            |ln_rho: f64| {
                let point = model.evaluate(ln_rho.exp(), temperature);
                let state = FluidState::from_point(&point, c);
                Ok(Probe::new(target.residual(&state, c), state))
            },
            [lower.ln(), upper.ln()],
            &SolveConfig::default(),
        )?;
        Ok(root.value)
    };

    let Some(sat) = dome_at(model, temperature)? else {
        return search([1e-12 * c.rho_crit, c.rho_max]);
    };

    let (liquid, vapor) = saturated_states(model, &sat);
    if entropy > vapor.entropy {
        search([1e-12 * sat.vapor, sat.vapor])
    } else if entropy < liquid.entropy {
        search([sat.liquid, c.rho_max])
    } else {
        let quality = (entropy - liquid.entropy) / (vapor.entropy - liquid.entropy);
        FluidState::two_phase(&liquid, &vapor, quality)
    }
}

/// Scans `ln ρ` for a bracket on the enthalpy, then bisects it, each probe
/// solving the `DmassSmass` flash.
fn flash_hs<M: HelmholtzModel + ?Sized>(
    model: &M,
    enthalpy: f64,
    entropy: f64,
) -> Result<FluidState, PropertyError> {
    let c = model.constants();
    let target = Target::Enthalpy(enthalpy);

    let probe = |ln_rho: f64| -> Result<Probe<FluidState>, PropertyError> {
        let state = flash_isochoric(model, ln_rho.exp(), Target::Entropy(entropy))?;
        Ok(Probe::new(target.residual(&state, c), state))
    };

    let (lower, upper) = ((1e-6 * c.rho_crit).ln(), (0.99 * c.rho_max).ln());
    let grid: Vec<f64> = (0..HS_SCAN_POINTS)
        .map(|i| lower + (upper - lower) * i as f64 / (HS_SCAN_POINTS - 1) as f64)
        .collect();
    let residuals: Vec<Option<f64>> = grid
        .iter()
        .map(|&ln_rho| probe(ln_rho).ok().map(|p| p.residual))
        .collect();

    let bracket = grid
        .windows(2)
        .zip(residuals.windows(2))
        .find_map(|(x, r)| match (r[0], r[1]) {
            (Some(a), Some(b)) if a * b <= 0.0 => Some([x[0], x[1]]),
            _ => None,
        })
        .ok_or_else(|| {
            PropertyError::out_of_domain(format!(
                "no state matches h = {enthalpy} J/kg and s = {entropy} J/kg/K"
            ))
        })?;

    let root = find_root(probe, bracket, &SolveConfig::default())?;
    Ok(root.value)
}
