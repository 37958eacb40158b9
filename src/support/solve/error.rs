use thiserror::Error;
use twine_solvers::equation::bisection;

use crate::thermo::PropertyError;

/// Errors that can occur while solving for a scalar root.
#[derive(Debug, Error)]
pub enum SolveError {
    /// A bracket endpoint could not be evaluated.
    #[error("property evaluation failed")]
    Property(#[from] PropertyError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual}")]
    MaxIters { residual: f64, iters: usize },

    /// The residual has the same sign at both ends of the bracket.
    #[error("no sign change in bracket: residuals {lower} and {upper}")]
    NoSignChange { lower: f64, upper: f64 },

    /// The bracket closed on a jump in the residual rather than a root.
    #[error("bracket closed at x = {x} with residual {residual}")]
    Discontinuity { x: f64, residual: f64 },
}

impl From<SolveError> for PropertyError {
    fn from(error: SolveError) -> Self {
        match error {
            SolveError::Property(error) => error,
            SolveError::NoSignChange { .. } => PropertyError::OutOfDomain {
                context: format!("target not bracketed: {error}"),
            },
            SolveError::Discontinuity { .. } => PropertyError::OutOfDomain {
                context: format!("no continuous root: {error}"),
            },
            SolveError::Bisection(_) | SolveError::MaxIters { .. } => PropertyError::Calculation {
                context: error.to_string(),
            },
        }
    }
}
