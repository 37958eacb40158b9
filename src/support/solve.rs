//! Scalar root finding on top of the `twine-solvers` bisection.
//!
//! Almost every iterative calculation in this crate reduces to one unknown
//! with a bracketed, monotone residual: a density on one branch of an
//! isotherm, a saturation pressure, the temperature matching a target
//! enthalpy. [`find_root`] wraps a closure in the [`Model`] and
//! [`EquationProblem`] adapters `twine` expects and returns the converged
//! point together with whatever value the closure computed there.

mod error;

use std::{convert::Infallible, marker::PhantomData};

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use crate::thermo::PropertyError;

pub use error::SolveError;

/// Solver configuration for scalar bisection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveConfig {
    /// Maximum iteration count.
    pub max_iters: usize,

    /// Absolute tolerance on the search variable.
    pub x_abs_tol: f64,

    /// Relative tolerance on the search variable.
    pub x_rel_tol: f64,

    /// Absolute tolerance on the (dimensionless) residual.
    pub residual_tol: f64,

    /// Largest residual magnitude accepted once the bracket has closed.
    ///
    /// A bracket that shrinks onto a jump in the residual converges in the
    /// search variable but leaves a large residual behind.
    pub max_residual: f64,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            x_abs_tol: 1e-13,
            x_rel_tol: 1e-13,
            residual_tol: 1e-13,
            max_residual: 1e-6,
        }
    }
}

impl SolveConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(crate) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.x_abs_tol,
            x_rel_tol: self.x_rel_tol,
            residual_tol: self.residual_tol,
        }
    }
}

/// A residual evaluation, paired with the value it was computed from.
#[derive(Debug, Clone)]
pub struct Probe<T> {
    /// Dimensionless residual, zero at the root.
    pub residual: f64,

    /// Value computed alongside the residual.
    pub value: T,
}

impl<T> Probe<T> {
    /// Pairs `residual` with the `value` it was computed from.
    pub fn new(residual: f64, value: T) -> Self {
        Self { residual, value }
    }
}

/// A converged root.
#[derive(Debug, Clone)]
pub struct Root<T> {
    /// Location of the root in the search variable.
    pub x: f64,

    /// Residual at `x`.
    pub residual: f64,

    /// Value computed alongside the residual at `x`.
    pub value: T,

    /// Iteration count performed by the solver.
    pub iters: usize,
}

/// Finds a root of `f` inside `bracket`.
///
/// Both endpoints are evaluated first. They must evaluate successfully and
/// their residuals must differ in sign (a zero residual at either end is
/// returned directly). Inside the bracket, evaluation failures are treated
/// as a positive residual so the search moves away from them.
///
/// A converged point is only returned when its residual is within
/// [`SolveConfig::max_residual`].
///
/// # Errors
///
/// - [`SolveError::Property`] if an endpoint cannot be evaluated.
/// - [`SolveError::NoSignChange`] if the residual does not change sign.
/// - [`SolveError::Discontinuity`] if the bracket closes on a jump.
/// - [`SolveError::Bisection`] or [`SolveError::MaxIters`] if the solver fails.
pub fn find_root<T, F>(f: F, bracket: [f64; 2], config: &SolveConfig) -> Result<Root<T>, SolveError>
where
    T: Clone,
    F: Fn(f64) -> Result<Probe<T>, PropertyError>,
{
    let [lower, upper] = bracket;

    let at_lower = f(lower)?;
    if at_lower.residual == 0.0 {
        return Ok(endpoint(lower, at_lower));
    }
    let at_upper = f(upper)?;
    if at_upper.residual == 0.0 {
        return Ok(endpoint(upper, at_upper));
    }
    if !(at_lower.residual.signum() * at_upper.residual.signum() < 0.0) {
        return Err(SolveError::NoSignChange {
            lower: at_lower.residual,
            upper: at_upper.residual,
        });
    }

    let model = ScalarModel { f };
    let problem = ScalarProblem::<T>::new();

    let solution = bisection::solve(
        &model,
        &problem,
        bracket,
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(SolveError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    let Sample { x, probe } = solution.snapshot.output;
    if !(probe.residual.abs() <= config.max_residual) {
        return Err(SolveError::Discontinuity {
            x,
            residual: probe.residual,
        });
    }

    tracing::trace!(
        iters = solution.iters,
        x,
        residual = probe.residual,
        "bisection converged"
    );

    Ok(Root {
        x,
        residual: probe.residual,
        value: probe.value,
        iters: solution.iters,
    })
}

fn endpoint<T>(x: f64, probe: Probe<T>) -> Root<T> {
    Root {
        x,
        residual: probe.residual,
        value: probe.value,
        iters: 0,
    }
}

/// Model output: the probe plus the point it was taken at.
#[derive(Debug, Clone)]
struct Sample<T> {
    x: f64,
    probe: Probe<T>,
}

/// Model adapter exposing a scalar closure to `twine`.
struct ScalarModel<F> {
    f: F,
}

impl<T, F> Model for ScalarModel<F>
where
    F: Fn(f64) -> Result<Probe<T>, PropertyError>,
{
    type Input = f64;
    type Output = Sample<T>;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let probe = (self.f)(*input)?;
        Ok(Sample { x: *input, probe })
    }
}

/// Equation problem whose residual is carried by the model output.
struct ScalarProblem<T> {
    _output: PhantomData<T>,
}

impl<T> ScalarProblem<T> {
    fn new() -> Self {
        Self {
            _output: PhantomData,
        }
    }
}

impl<T> EquationProblem<1> for ScalarProblem<T> {
    type Input = f64;
    type Output = Sample<T>;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.probe.residual])
    }
}
