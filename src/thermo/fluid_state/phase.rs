use std::fmt;

use crate::thermo::FluidConstants;

/// Relative distance from the critical point below which a state is
/// reported as [`Phase::CriticalPoint`].
const CRITICAL_POINT_TOLERANCE: f64 = 1e-9;

/// Phase region of a fluid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Liquid,
    Gas,
    TwoPhase,
    Supercritical,
    SupercriticalGas,
    SupercriticalLiquid,
    CriticalPoint,
    Unknown,
}

impl Phase {
    /// Classifies a single-phase state against the critical point.
    ///
    /// Below both the critical temperature and pressure the density decides:
    /// denser than critical is liquid, otherwise gas. The same rule applies
    /// to metastable states inside the two-phase region.
    #[must_use]
    pub fn classify(
        temperature: f64,
        pressure: f64,
        density: f64,
        constants: &FluidConstants,
    ) -> Self {
        let t_c = constants.t_crit;
        let p_c = constants.p_crit;
        let rho_c = constants.rho_crit;

        if !(temperature.is_finite() && pressure.is_finite() && density.is_finite()) {
            return Phase::Unknown;
        }

        let near = |x: f64, x_c: f64| ((x - x_c) / x_c).abs() <= CRITICAL_POINT_TOLERANCE;
        if near(temperature, t_c) && near(density, rho_c) {
            return Phase::CriticalPoint;
        }

        match (temperature >= t_c, pressure >= p_c) {
            (true, true) => Phase::Supercritical,
            (true, false) => Phase::SupercriticalGas,
            (false, true) => Phase::SupercriticalLiquid,
            (false, false) if density >= rho_c => Phase::Liquid,
            (false, false) => Phase::Gas,
        }
    }

    /// Returns the conventional lowercase name of the phase.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::Liquid => "liquid",
            Phase::Gas => "gas",
            Phase::TwoPhase => "twophase",
            Phase::Supercritical => "supercritical",
            Phase::SupercriticalGas => "supercritical_gas",
            Phase::SupercriticalLiquid => "supercritical_liquid",
            Phase::CriticalPoint => "critical_point",
            Phase::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
