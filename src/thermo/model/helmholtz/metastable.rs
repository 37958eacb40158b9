use crate::thermo::{FluidConstants, FluidState, InputPair, PropertyError};

use super::{HelmholtzModel, HelmholtzPoint};

/// Maximum number of step halvings in one Newton iteration.
const MAX_HALVINGS: usize = 30;

/// Newton iteration settings for [`metastable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetastableConfig {
    /// Maximum Newton iterations.
    pub max_iters: usize,

    /// Convergence tolerance on the Euclidean norm of the scaled residuals.
    pub tolerance: f64,
}

impl Default for MetastableConfig {
    fn default() -> Self {
        Self {
            max_iters: 50,
            tolerance: 1e-10,
        }
    }
}

/// Starting point for [`metastable`], in kg/m³ and K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetastableGuess {
    pub density: f64,
    pub temperature: f64,
}

/// One equation of the Newton system.
#[derive(Debug, Clone, Copy)]
enum Equation {
    Temperature(f64),
    Density(f64),
    Pressure(f64),
    Enthalpy(f64),
    Entropy(f64),
}

impl Equation {
    /// Scaled residual and its gradient in `(ρ, T)`.
    fn linearize(self, point: &HelmholtzPoint, c: &FluidConstants) -> (f64, [f64; 2]) {
        let (value, target, gradient, scale) = match self {
            Equation::Temperature(t) => (point.temperature, t, [0.0, 1.0], c.t_crit),
            Equation::Density(rho) => (point.density, rho, [1.0, 0.0], c.rho_crit),
            Equation::Pressure(p) => (
                point.pressure(),
                p,
                [point.dp_drho(), point.dp_dt()],
                c.p_crit,
            ),
            Equation::Enthalpy(h) => (
                point.enthalpy(),
                h,
                [point.dh_drho(), point.dh_dt()],
                c.gas_constant * c.t_crit,
            ),
            Equation::Entropy(s) => (
                point.entropy(),
                s,
                [point.ds_drho(), point.ds_dt()],
                c.gas_constant,
            ),
        };
        ((value - target) / scale, [gradient[0] / scale, gradient[1] / scale])
    }
}

/// Computes a state on the equation-of-state surface without phase
/// splitting.
///
/// Inside the two-phase region this is the metastable (superheated liquid
/// or subcooled vapor) state connected to `guess`. A damped Newton
/// iteration in `(ρ, T)` drives both scaled residuals to zero; each step is
/// halved until density and temperature stay positive and the residual norm
/// decreases.
///
/// [`InputPair::DmassT`] is evaluated directly, without iterating.
///
/// # Errors
///
/// - [`PropertyError::InvalidState`] for quality inputs, non-finite inputs,
///   or a guess that is not strictly positive.
/// - [`PropertyError::Calculation`] if the iteration does not converge.
pub fn metastable<M: HelmholtzModel + ?Sized>(
    model: &M,
    pair: InputPair,
    first: f64,
    second: f64,
    guess: MetastableGuess,
    config: &MetastableConfig,
) -> Result<FluidState, PropertyError> {
    let c = model.constants();
    if !(first.is_finite() && second.is_finite()) {
        return Err(PropertyError::invalid_state(format!(
            "{pair} inputs ({first}, {second}) are not finite"
        )));
    }

    let specs = match pair {
        InputPair::DmassT => {
            if !(first > 0.0 && second > 0.0) {
                return Err(PropertyError::invalid_state(format!(
                    "density {first} and temperature {second} must be positive"
                )));
            }
            return Ok(FluidState::from_point(&model.evaluate(first, second), c));
        }
        InputPair::QT | InputPair::PQ => {
            return Err(PropertyError::invalid_state(format!(
                "{pair} has no metastable state"
            )));
        }
        InputPair::PT => [Equation::Pressure(first), Equation::Temperature(second)],
        InputPair::DmassP => [Equation::Density(first), Equation::Pressure(second)],
        InputPair::HmassP => [Equation::Enthalpy(first), Equation::Pressure(second)],
        InputPair::PSmass => [Equation::Pressure(first), Equation::Entropy(second)],
        InputPair::HmassSmass => [Equation::Enthalpy(first), Equation::Entropy(second)],
        InputPair::SmassT => [Equation::Entropy(first), Equation::Temperature(second)],
        InputPair::DmassHmass => [Equation::Density(first), Equation::Enthalpy(second)],
        InputPair::DmassSmass => [Equation::Density(first), Equation::Entropy(second)],
    };

    let MetastableGuess {
        mut density,
        mut temperature,
    } = guess;
    if !(density > 0.0 && temperature > 0.0 && density.is_finite() && temperature.is_finite()) {
        return Err(PropertyError::invalid_state(format!(
            "metastable guess ({density} kg/m³, {temperature} K) must be positive"
        )));
    }

    let system = |density: f64, temperature: f64| {
        let point = model.evaluate(density, temperature);
        let (r0, g0) = specs[0].linearize(&point, c);
        let (r1, g1) = specs[1].linearize(&point, c);
        ([r0, r1], [g0, g1])
    };
    let norm = |r: [f64; 2]| r[0].hypot(r[1]);

    let (mut residual, mut jacobian) = system(density, temperature);
    let mut current = norm(residual);
    if !current.is_finite() {
        return Err(PropertyError::calculation(format!(
            "{pair} residual is not finite at the guess"
        )));
    }

    for iter in 0..=config.max_iters {
        if current < config.tolerance {
            tracing::debug!(
                %pair,
                iters = iter,
                density,
                temperature,
                "metastable state converged"
            );
            return Ok(FluidState::from_point(
                &model.evaluate(density, temperature),
                c,
            ));
        }
        if iter == config.max_iters {
            break;
        }

        let [[a, b], [d, e]] = jacobian;
        let det = a * e - b * d;
        if det == 0.0 || !det.is_finite() {
            return Err(PropertyError::calculation(format!(
                "{pair} Jacobian is singular at ({density} kg/m³, {temperature} K)"
            )));
        }
        let d_rho = (b * residual[1] - e * residual[0]) / det;
        let d_t = (d * residual[0] - a * residual[1]) / det;

        let mut step = 1.0;
        let mut accepted = false;
        for _ in 0..=MAX_HALVINGS {
            let (rho_new, t_new) = (density + step * d_rho, temperature + step * d_t);
            if rho_new > 0.0 && t_new > 0.0 {
                let (r_new, j_new) = system(rho_new, t_new);
                let n_new = norm(r_new);
                if n_new.is_finite() && n_new < current {
                    (density, temperature) = (rho_new, t_new);
                    (residual, jacobian, current) = (r_new, j_new, n_new);
                    accepted = true;
                    break;
                }
            }
            step *= 0.5;
        }

        if !accepted {
            return Err(PropertyError::calculation(format!(
                "{pair} line search stalled at ({density} kg/m³, {temperature} K), \
                 residual {current:e}"
            )));
        }
    }

    Err(PropertyError::calculation(format!(
        "{pair} did not converge in {} iterations, residual {current:e}",
        config.max_iters
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::thermo::{
        PropertyBackend,
        model::helmholtz::{
            saturation_at_temperature, spinodal_densities, test_support::VanDerWaals,
        },
    };

    /// A superheated-liquid point between the saturated and spinodal liquid.
    fn superheated_liquid(vdw: &VanDerWaals, t: f64) -> Result<(f64, f64), PropertyError> {
        let sat = saturation_at_temperature(vdw, t)?;
        let spinodal = spinodal_densities(vdw, t)?.ok_or_else(|| {
            PropertyError::calculation("no spinodal")
        })?;
        Ok((0.5 * (sat.liquid + spinodal.liquid), sat.pressure))
    }

    #[test]
    fn recovers_direct_evaluation_inside_the_dome() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let t = 270.0;
        let (rho, p_sat) = superheated_liquid(&vdw, t)?;
        let direct = metastable(
            &vdw,
            InputPair::DmassT,
            rho,
            t,
            MetastableGuess { density: 1.0, temperature: 1.0 },
            &MetastableConfig::default(),
        )?;
        assert!(direct.pressure < p_sat);

        let guess = MetastableGuess {
            density: 1.01 * rho,
            temperature: t - 1.0,
        };
        for (pair, a, b) in [
            (InputPair::PT, direct.pressure, t),
            (InputPair::HmassP, direct.enthalpy, direct.pressure),
            (InputPair::PSmass, direct.pressure, direct.entropy),
            (InputPair::DmassHmass, rho, direct.enthalpy),
            (InputPair::HmassSmass, direct.enthalpy, direct.entropy),
        ] {
            let state = metastable(&vdw, pair, a, b, guess, &MetastableConfig::default())?;
            assert_relative_eq!(state.density, rho, max_relative = 1e-8);
            assert_relative_eq!(state.temperature, t, max_relative = 1e-8);
        }
        Ok(())
    }

    #[test]
    fn differs_from_equilibrium() -> Result<(), PropertyError> {
        let vdw = VanDerWaals::new();
        let t = 270.0;
        let (rho, _) = superheated_liquid(&vdw, t)?;
        let guess = MetastableGuess { density: rho, temperature: t };

        let stable = vdw.update(InputPair::DmassT, rho, t)?;
        let raw = metastable(&vdw, InputPair::DmassT, rho, t, guess, &MetastableConfig::default())?;
        assert!(stable.quality_mass().is_some());
        assert!(raw.quality_mass().is_none());
        assert!(raw.pressure < stable.pressure);
        Ok(())
    }

    #[test]
    fn quality_inputs_are_rejected() {
        let vdw = VanDerWaals::new();
        let guess = MetastableGuess { density: 500.0, temperature: 270.0 };
        for pair in [InputPair::QT, InputPair::PQ] {
            assert!(matches!(
                metastable(&vdw, pair, 0.5, 270.0, guess, &MetastableConfig::default()),
                Err(PropertyError::InvalidState { .. })
            ));
        }
    }

    #[test]
    fn iteration_limit_is_reported() {
        let vdw = VanDerWaals::new();
        let config = MetastableConfig { max_iters: 1, tolerance: 0.0 };
        let guess = MetastableGuess { density: 100.0, temperature: 400.0 };
        assert!(matches!(
            metastable(&vdw, InputPair::PT, 5e6, 350.0, guess, &config),
            Err(PropertyError::Calculation { .. })
        ));
    }
}
