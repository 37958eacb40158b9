//! A convenience wrapper that turns a property backend into named states.
//!
//! [`Fluid`] owns one [`PropertyBackend`] and caches the fixed points every
//! phase-diagram calculation needs: the critical state and the saturated
//! liquid and vapor at the triple point. On top of the backend's flash it
//! adds optional post-processing ([`StateOptions`]) and evaluation over
//! lists and grids of inputs ([`StateGrid`]).
//!
//! ```
//! use coolpropx::{
//!     fluid::Fluid,
//!     thermo::{InputPair, Phase, model::PengRobinson, substance::CarbonDioxide},
//! };
//!
//! let fluid = Fluid::new(PengRobinson::<CarbonDioxide>::new().unwrap()).unwrap();
//! let state = fluid.state(InputPair::QT, 0.5, 260.0).unwrap();
//! assert_eq!(state.phase(), Phase::TwoPhase);
//! ```

mod grid;
mod quality;

use crate::thermo::{
    FluidConstants, FluidState, InputPair, PropertyBackend, PropertyError,
    model::helmholtz::{HelmholtzModel, MetastableConfig, MetastableGuess, metastable},
};

pub use grid::StateGrid;

/// Post-processing applied to each computed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateOptions {
    /// Extends the vapor quality outside the two-phase region.
    ///
    /// Single-phase states below the critical pressure get
    /// `q = (h − h_l(p))/(h_v(p) − h_l(p))` and the matching void fraction.
    pub generalize_quality: bool,

    /// Adds the departure from saturation.
    ///
    /// The degree is `T − T_sat(p)` below the critical pressure and the
    /// ratio is `p/p_sat(T)` below the critical temperature.
    pub supersaturation: bool,
}

/// A pure fluid evaluated through a [`PropertyBackend`].
#[derive(Debug, Clone)]
pub struct Fluid<B> {
    backend: B,
    options: StateOptions,
    exceptions: bool,
    critical_point: FluidState,
    triple_point_liquid: FluidState,
    triple_point_vapor: FluidState,
}

impl<B: PropertyBackend> Fluid<B> {
    /// Wraps `backend` and computes its critical and triple-point states.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the backend cannot evaluate the critical
    /// state or saturation at the triple-point temperature.
    pub fn new(backend: B) -> Result<Self, PropertyError> {
        let c = *backend.constants();
        let critical_point = backend.update(InputPair::DmassT, c.rho_crit, c.t_crit)?;
        let triple_point_liquid = backend.update(InputPair::QT, 0.0, c.t_triple)?;
        let triple_point_vapor = backend.update(InputPair::QT, 1.0, c.t_triple)?;

        tracing::debug!(
            fluid = backend.name(),
            t_crit = c.t_crit,
            p_crit = critical_point.pressure,
            p_triple = triple_point_liquid.pressure,
            "created fluid"
        );

        Ok(Self {
            backend,
            options: StateOptions::default(),
            exceptions: true,
            critical_point,
            triple_point_liquid,
            triple_point_vapor,
        })
    }

    /// Sets the options applied by [`state`](Self::state) and the list and
    /// grid evaluations.
    #[must_use]
    pub fn with_options(self, options: StateOptions) -> Self {
        Self { options, ..self }
    }

    /// Sets how list and grid evaluations handle failed points.
    ///
    /// With exceptions enabled (the default) the first failure is returned.
    /// Otherwise a failed point is logged and replaced by
    /// [`FluidState::undefined`].
    #[must_use]
    pub fn with_exceptions(self, exceptions: bool) -> Self {
        Self { exceptions, ..self }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn name(&self) -> &str {
        self.backend.name()
    }

    pub fn constants(&self) -> &FluidConstants {
        self.backend.constants()
    }

    pub fn options(&self) -> StateOptions {
        self.options
    }

    pub fn exceptions(&self) -> bool {
        self.exceptions
    }

    /// The state at the critical density and temperature.
    pub fn critical_point(&self) -> &FluidState {
        &self.critical_point
    }

    /// Saturated liquid at the triple-point temperature.
    pub fn triple_point_liquid(&self) -> &FluidState {
        &self.triple_point_liquid
    }

    /// Saturated vapor at the triple-point temperature.
    pub fn triple_point_vapor(&self) -> &FluidState {
        &self.triple_point_vapor
    }

    /// Computes the equilibrium state defined by `pair`, with the fluid's
    /// default options.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the backend fails.
    pub fn state(
        &self,
        pair: InputPair,
        first: f64,
        second: f64,
    ) -> Result<FluidState, PropertyError> {
        self.state_with(pair, first, second, self.options)
    }

    /// Computes the equilibrium state defined by `pair` with `options`.
    ///
    /// Post-processing that cannot be carried out (for example a
    /// saturation state that fails to converge) leaves the corresponding
    /// values unset rather than failing the state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the backend fails.
    pub fn state_with(
        &self,
        pair: InputPair,
        first: f64,
        second: f64,
        options: StateOptions,
    ) -> Result<FluidState, PropertyError> {
        let mut state = self.backend.update(pair, first, second)?;
        if options.generalize_quality {
            self.generalize_quality(&mut state);
        }
        if options.supersaturation {
            self.add_supersaturation(&mut state);
        }
        Ok(state)
    }

    /// Computes one state per `(first, second)` input in `points`.
    ///
    /// # Errors
    ///
    /// With exceptions enabled, returns the first [`PropertyError`].
    pub fn states_along(
        &self,
        pair: InputPair,
        points: &[(f64, f64)],
    ) -> Result<Vec<FluidState>, PropertyError> {
        points
            .iter()
            .map(|&(first, second)| self.state_or_undefined(pair, first, second))
            .collect()
    }

    /// Saturated liquid and vapor at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if `temperature` is outside
    /// `[t_triple, t_crit)` or saturation cannot be computed.
    pub fn saturation(&self, temperature: f64) -> Result<(FluidState, FluidState), PropertyError> {
        let liquid = self.backend.update(InputPair::QT, 0.0, temperature)?;
        let vapor = self.backend.update(InputPair::QT, 1.0, temperature)?;
        Ok((liquid, vapor))
    }

    /// Evaluates one point, honoring the exception setting.
    fn state_or_undefined(
        &self,
        pair: InputPair,
        first: f64,
        second: f64,
    ) -> Result<FluidState, PropertyError> {
        match self.state(pair, first, second) {
            Ok(state) => Ok(state),
            Err(error) if !self.exceptions => {
                tracing::warn!(%pair, first, second, %error, "state replaced by undefined values");
                Ok(FluidState::undefined())
            }
            Err(error) => Err(error),
        }
    }
}

impl<B: HelmholtzModel> Fluid<B> {
    /// Evaluates the equation of state at `(density, temperature)` without
    /// phase splitting.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidState`] unless both inputs are
    /// positive and finite.
    pub fn evaluate_metastable(
        &self,
        density: f64,
        temperature: f64,
    ) -> Result<FluidState, PropertyError> {
        let valid = |x: f64| x.is_finite() && x > 0.0;
        if !(valid(density) && valid(temperature)) {
            return Err(PropertyError::invalid_state(format!(
                "density {density} kg/m³ and temperature {temperature} K must be positive"
            )));
        }
        Ok(FluidState::from_point(
            &self.backend.evaluate(density, temperature),
            self.constants(),
        ))
    }

    /// Solves for a metastable state from `guess` with the default Newton
    /// settings.
    ///
    /// # Errors
    ///
    /// See [`metastable`].
    pub fn state_metastable(
        &self,
        pair: InputPair,
        first: f64,
        second: f64,
        guess: MetastableGuess,
    ) -> Result<FluidState, PropertyError> {
        self.state_metastable_with(pair, first, second, guess, &MetastableConfig::default())
    }

    /// Solves for a metastable state from `guess` with `config`.
    ///
    /// # Errors
    ///
    /// See [`metastable`].
    pub fn state_metastable_with(
        &self,
        pair: InputPair,
        first: f64,
        second: f64,
        guess: MetastableGuess,
        config: &MetastableConfig,
    ) -> Result<FluidState, PropertyError> {
        metastable(&self.backend, pair, first, second, guess, config)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::thermo::{
        Phase,
        model::{PengRobinson, helmholtz::spinodal_densities, peng_robinson::CubicFluid},
        substance::{Air, Ammonia, CarbonDioxide, Nitrogen, R134a, Water},
    };

    use super::test_support::co2;

    /// Saturation inversion, two-phase flashes and generalized quality for
    /// one substance, across the dome.
    fn two_phase_consistency<F: CubicFluid>() -> Result<(), PropertyError> {
        let model = PengRobinson::<F>::new().expect("substance data is valid");
        let fluid = Fluid::new(model)?.with_options(StateOptions {
            generalize_quality: true,
            supersaturation: true,
        });
        let name = fluid.name().to_string();
        let c = *fluid.constants();

        for fraction in [0.2, 0.5, 0.8, 0.98] {
            let t = c.t_triple + fraction * (c.t_crit - c.t_triple);
            let (liquid, vapor) = fluid.saturation(t)?;
            let p = liquid.pressure;

            let by_p = fluid.state(InputPair::PQ, p, 1.0)?;
            assert_relative_eq!(by_p.temperature, t, max_relative = 1e-8);
            assert_relative_eq!(by_p.density, vapor.density, max_relative = 1e-6);

            let mixed = fluid.state(InputPair::QT, 0.3, t)?;
            for (pair, a, b) in [
                (InputPair::HmassP, mixed.enthalpy, p),
                (InputPair::PSmass, p, mixed.entropy),
            ] {
                let state = fluid.state(pair, a, b)?;
                assert_eq!(state.phase(), Phase::TwoPhase, "{name}: {pair} at {t} K");
                assert_relative_eq!(
                    state.quality_mass().unwrap_or(f64::NAN),
                    0.3,
                    epsilon = 1e-6
                );
            }

            let subcooled = fluid.state(InputPair::PT, p, t - 0.5 * (t - c.t_triple))?;
            let superheated = fluid.state(InputPair::PT, p, t + 0.5 * (c.t_crit - t))?;
            assert!(subcooled.quality_mass().is_some_and(|q| q < 0.0), "{name} at {t} K");
            assert!(superheated.quality_mass().is_some_and(|q| q > 1.0), "{name} at {t} K");
            assert_relative_eq!(
                superheated.supersaturation_degree.unwrap_or(f64::NAN),
                superheated.temperature - t,
                max_relative = 1e-4
            );
        }
        Ok(())
    }

    #[test]
    fn every_substance_is_two_phase_consistent() -> Result<(), PropertyError> {
        two_phase_consistency::<Air>()?;
        two_phase_consistency::<Ammonia>()?;
        two_phase_consistency::<CarbonDioxide>()?;
        two_phase_consistency::<Nitrogen>()?;
        two_phase_consistency::<R134a>()?;
        two_phase_consistency::<Water>()
    }

    #[test]
    fn water_enthalpy_at_the_normal_boiling_point() -> Result<(), PropertyError> {
        let fluid = Fluid::new(PengRobinson::<Water>::new().expect("water data is valid"))?;
        let mixed = fluid.state(InputPair::QT, 0.5, 373.15)?;

        let state = fluid.state(InputPair::HmassP, mixed.enthalpy, mixed.pressure)?;
        assert_eq!(state.phase(), Phase::TwoPhase);
        assert_relative_eq!(state.quality_mass().unwrap_or(f64::NAN), 0.5, epsilon = 1e-6);
        assert_relative_eq!(state.enthalpy, mixed.enthalpy, epsilon = 1e-3);
        assert_relative_eq!(state.temperature, 373.15, max_relative = 1e-8);
        Ok(())
    }

    #[test]
    fn caches_fixed_points() {
        let fluid = co2();
        let c = *fluid.constants();

        let critical = fluid.critical_point();
        assert_eq!(critical.phase(), Phase::CriticalPoint);
        assert_relative_eq!(critical.pressure, c.p_crit, max_relative = 1e-9);

        let (liquid, vapor) = (fluid.triple_point_liquid(), fluid.triple_point_vapor());
        assert_eq!(liquid.quality_mass(), Some(0.0));
        assert_eq!(vapor.quality_mass(), Some(1.0));
        assert_relative_eq!(liquid.pressure, vapor.pressure, max_relative = 1e-8);
        assert!(liquid.density > c.rho_crit && vapor.density < c.rho_crit);
        assert!(fluid.exceptions());
    }

    #[test]
    fn saturation_pair() -> Result<(), PropertyError> {
        let fluid = co2();
        let (liquid, vapor) = fluid.saturation(270.0)?;
        assert_relative_eq!(liquid.pressure, vapor.pressure, max_relative = 1e-8);
        assert!(liquid.density > vapor.density);
        assert!(fluid.saturation(320.0).is_err());
        Ok(())
    }

    #[test]
    fn states_along_honor_exceptions() -> Result<(), PropertyError> {
        let points = [(2e6, 300.0), (-1.0, 300.0), (8e6, 320.0)];

        assert!(co2().states_along(InputPair::PT, &points).is_err());

        let states = co2()
            .with_exceptions(false)
            .states_along(InputPair::PT, &points)?;
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].phase(), Phase::Gas);
        assert!(states[1].pressure.is_nan());
        assert_eq!(states[2].phase(), Phase::Supercritical);
        Ok(())
    }

    #[test]
    fn metastable_extensions() -> Result<(), PropertyError> {
        let fluid = co2();
        let t = 270.0;
        let (liquid, _) = fluid.saturation(t)?;
        let spinodal = spinodal_densities(fluid.backend(), t)?
            .ok_or_else(|| PropertyError::calculation("subcritical isotherm"))?;
        let rho = 0.5 * (liquid.density + spinodal.liquid);

        let direct = fluid.evaluate_metastable(rho, t)?;
        assert!(direct.pressure < liquid.pressure);
        assert!(direct.quality_mass().is_none());

        let guess = MetastableGuess {
            density: liquid.density,
            temperature: t,
        };
        let solved = fluid.state_metastable(InputPair::PT, direct.pressure, t, guess)?;
        assert_relative_eq!(solved.density, rho, max_relative = 1e-8);

        let tight = MetastableConfig {
            max_iters: 100,
            tolerance: 1e-11,
        };
        let by_h = fluid.state_metastable_with(
            InputPair::HmassP,
            direct.enthalpy,
            direct.pressure,
            guess,
            &tight,
        )?;
        assert_relative_eq!(by_h.temperature, t, max_relative = 1e-8);

        assert!(fluid.evaluate_metastable(-1.0, t).is_err());
        Ok(())
    }
}
