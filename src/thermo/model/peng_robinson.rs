//! Peng-Robinson cubic equation of state.
//!
//! `PengRobinson` writes the Peng-Robinson (1976) equation,
//!
//! `p = R·T/(v − b) − a·α(T)/(v² + 2·b·v − b²)`,
//!
//! in reduced Helmholtz-energy form, so that every property, including the
//! metastable and spinodal ones, follows from the [`HelmholtzModel`] layer.
//! The ideal-gas part uses a constant heat capacity.
//!
//! # Assumptions
//!
//! - `a = Ωa·R²·Tc²/pc` and `b = Ωb·R·Tc/pc` with the exact cubic constants,
//!   so the model reproduces the critical temperature and pressure.
//! - Soave-type temperature function
//!   `α(T) = [1 + m·(1 − √(T/Tc))]²`, `m = 0.37464 + 1.54226·ω − 0.26992·ω²`.
//! - Ideal gas with constant `cp⁰`; `h = 0` and `s = 0` for the ideal gas at
//!   298.15 K and 101 325 Pa.
//!
//! # When To Use
//!
//! Use this model when CoolProp is unavailable or when a closed-form
//! equation with cheap, smooth derivatives matters more than accuracy. Liquid
//! densities are typically off by several percent.

mod parameters;

use std::{
    f64::consts::{PI, SQRT_2},
    marker::PhantomData,
};

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{
        MassDensity, MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature, Velocity,
    },
    mass_density::kilogram_per_cubic_meter,
    molar_mass::kilogram_per_mole,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::{SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy};
use crate::thermo::{
    FluidConstants, FluidState, InputPair, PropertyBackend, PropertyError, State,
    capability::{
        HasCp, HasCv, HasEnthalpy, HasEntropy, HasInternalEnergy, HasMolarMass, HasPressure,
        HasSoundSpeed, StateFrom, ThermoModel,
    },
};

use super::helmholtz::{
    DensityRoots, HelmholtzModel, IdealPart, ResidualPart, bracket_density_roots, equilibrium,
};

pub use parameters::{CubicFluid, CubicParameters, PengRobinsonParametersError};

const OMEGA_A: f64 = 0.457_235_528_921_382;
const OMEGA_B: f64 = 0.077_796_073_903_888_5;
const Z_CRIT: f64 = 0.307_401_308_698;

/// Ideal-gas reference temperature, K.
const T_REF: f64 = 298.15;

/// Ideal-gas reference pressure, Pa.
const P_REF: f64 = 101_325.0;

/// Peng-Robinson model for the fluid `F`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PengRobinson<F> {
    constants: FluidConstants,
    a_crit: f64,
    b: f64,
    m: f64,
    cp0: f64,
    _marker: PhantomData<F>,
}

impl<F> ThermoModel for PengRobinson<F> {
    type Fluid = F;
}

impl<F: CubicFluid> PengRobinson<F> {
    /// Creates a Peng-Robinson model using the data defined by `F`.
    ///
    /// # Errors
    ///
    /// Returns [`PengRobinsonParametersError`] if the data is invalid.
    pub fn new() -> Result<Self, PengRobinsonParametersError> {
        Self::with_parameters(F::parameters())
    }
}

impl<F> PengRobinson<F> {
    /// Creates a Peng-Robinson model from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PengRobinsonParametersError`] if any value is not physical,
    /// the temperature limits are out of order, or `cp⁰ ≤ R`.
    pub fn with_parameters(
        parameters: CubicParameters,
    ) -> Result<Self, PengRobinsonParametersError> {
        let p = parameters.validate()?;
        let r = FluidConstants::gas_constant_for(p.molar_mass);

        let a_crit = OMEGA_A * (r * p.t_crit).powi(2) / p.p_crit;
        let b = OMEGA_B * r * p.t_crit / p.p_crit;
        let m = 0.37464 + 1.54226 * p.omega - 0.26992 * p.omega.powi(2);

        Ok(Self {
            constants: FluidConstants {
                molar_mass: p.molar_mass,
                gas_constant: r,
                t_crit: p.t_crit,
                p_crit: p.p_crit,
                rho_crit: p.p_crit / (Z_CRIT * r * p.t_crit),
                t_triple: p.t_triple,
                t_max: p.t_max,
                p_max: p.p_max,
                rho_max: 0.999 / b,
            },
            a_crit,
            b,
            m,
            cp0: p.cp0,
            _marker: PhantomData,
        })
    }

    /// Temperature function `α` and its first two temperature derivatives.
    fn alpha(&self, temperature: f64) -> (f64, f64, f64) {
        let t_c = self.constants.t_crit;
        let m = self.m;
        let sqrt_t_tc = (temperature * t_c).sqrt();
        let k = 1.0 + m * (1.0 - (temperature / t_c).sqrt());

        let alpha = k * k;
        let d_alpha = -m * k / sqrt_t_tc;
        let d2_alpha = m * m / (2.0 * temperature * t_c) + m * k / (2.0 * temperature * sqrt_t_tc);
        (alpha, d_alpha, d2_alpha)
    }

    /// Roots of the cubic in `Z`, refined with Newton steps.
    fn compressibility_roots(&self, temperature: f64, pressure: f64) -> (Vec<f64>, f64) {
        let rt = self.constants.gas_constant * temperature;
        let (alpha, _, _) = self.alpha(temperature);
        let a = self.a_crit * alpha * pressure / (rt * rt);
        let b = self.b * pressure / rt;

        let c2 = -(1.0 - b);
        let c1 = a - 3.0 * b * b - 2.0 * b;
        let c0 = -(a * b - b * b - b * b * b);

        let mut roots = solve_cubic(c2, c1, c0);
        for z in &mut roots {
            for _ in 0..3 {
                let f = ((*z + c2) * *z + c1) * *z + c0;
                let df = (3.0 * *z + 2.0 * c2) * *z + c1;
                if df == 0.0 {
                    break;
                }
                *z -= f / df;
            }
        }
        (roots, b)
    }
}

/// Real roots of `z³ + c2·z² + c1·z + c0 = 0`.
fn solve_cubic(c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let shift = c2 / 3.0;
    let p = c1 - c2 * c2 / 3.0;
    let q = 2.0 * c2.powi(3) / 27.0 - c2 * c1 / 3.0 + c0;
    let discriminant = (q / 2.0).powi(2) + (p / 3.0).powi(3);

    if discriminant > 0.0 || p >= 0.0 {
        let sqrt_d = discriminant.max(0.0).sqrt();
        let y = (-q / 2.0 + sqrt_d).cbrt() + (-q / 2.0 - sqrt_d).cbrt();
        return vec![y - shift];
    }

    let r = 2.0 * (-p / 3.0).sqrt();
    let cos_arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
    let phi = cos_arg.acos() / 3.0;
    (0..3)
        .map(|k| r * (phi - 2.0 * PI * f64::from(k) / 3.0).cos() - shift)
        .collect()
}

impl<F> PropertyBackend for PengRobinson<F> {
    fn name(&self) -> &str {
        "PengRobinson"
    }

    fn constants(&self) -> &FluidConstants {
        &self.constants
    }

    fn update(
        &self,
        pair: InputPair,
        first: f64,
        second: f64,
    ) -> Result<FluidState, PropertyError> {
        equilibrium(self, pair, first, second)
    }
}

impl<F> HelmholtzModel for PengRobinson<F> {
    fn ideal(&self, density: f64, temperature: f64) -> IdealPart {
        let r = self.constants.gas_constant;
        let cv0 = self.cp0 - r;
        let rho_ref = P_REF / (r * T_REF);

        let u0 = self.cp0 * (temperature - T_REF) - r * temperature;
        let s0 = cv0 * (temperature / T_REF).ln() - r * (density / rho_ref).ln();
        let rt = r * temperature;

        IdealPart {
            alpha: (u0 - temperature * s0) / rt,
            tau_dtau: u0 / rt,
            tau2_dtau2: -cv0 / r,
        }
    }

    fn residual(&self, density: f64, temperature: f64) -> ResidualPart {
        let r = self.constants.gas_constant;
        let (alpha, d_alpha, d2_alpha) = self.alpha(temperature);
        let c = self.a_crit / (self.b * r);

        let eta = self.b * density;
        let d = 1.0 + 2.0 * eta - eta * eta;
        let l = ((1.0 + (1.0 + SQRT_2) * eta) / (1.0 + (1.0 - SQRT_2) * eta)).ln() / (2.0 * SQRT_2);
        let att = c * alpha / temperature;
        let dt_att = c * (d_alpha - alpha / temperature);

        ResidualPart {
            alpha: -(1.0 - eta).ln() - att * l,
            delta_ddelta: eta / (1.0 - eta) - att * eta / d,
            delta2_ddelta2: (eta / (1.0 - eta)).powi(2)
                + 2.0 * att * eta * eta * (1.0 - eta) / (d * d),
            tau_dtau: dt_att * l,
            tau2_dtau2: -l * c * temperature * d2_alpha,
            delta_tau_ddelta_dtau: dt_att * eta / d,
        }
    }

    /// Solves the cubic in `Z` analytically for positive pressures.
    ///
    /// Roots with `Z ≤ B` or `(∂p/∂ρ)_T < 0` are discarded. Non-positive
    /// pressures, and the rare case of no admissible root, fall back to
    /// bracketing.
    fn density_roots(
        &self,
        temperature: f64,
        pressure: f64,
    ) -> Result<DensityRoots, PropertyError> {
        if !(pressure > 0.0) {
            return bracket_density_roots(self, temperature, pressure);
        }

        let rt = self.constants.gas_constant * temperature;
        let (roots, b) = self.compressibility_roots(temperature, pressure);
        let mut stable: Vec<f64> = roots
            .into_iter()
            .filter(|z| z.is_finite() && *z > b)
            .map(|z| pressure / (z * rt))
            .filter(|&density| self.evaluate(density, temperature).dp_drho() >= 0.0)
            .collect();
        stable.sort_by(f64::total_cmp);

        match stable.as_slice() {
            [] => bracket_density_roots(self, temperature, pressure),
            [density] => Ok(DensityRoots::Single(*density)),
            [vapor, .., liquid] => Ok(DensityRoots::Pair {
                liquid: *liquid,
                vapor: *vapor,
            }),
        }
    }
}

impl<F> PengRobinson<F> {
    /// Equilibrium state at a typed `(T, ρ)` state.
    fn flash(&self, state: &State<F>) -> Result<FluidState, PropertyError> {
        self.update(
            InputPair::DmassT,
            state.density.get::<kilogram_per_cubic_meter>(),
            state.temperature.get::<kelvin>(),
        )
    }

    fn state_for(
        &self,
        fluid: F,
        pair: InputPair,
        first: f64,
        second: f64,
    ) -> Result<State<F>, PropertyError> {
        let state = self.update(pair, first, second)?;
        Ok(State {
            temperature: state.temperature(),
            density: state.density(),
            fluid,
        })
    }
}

impl<F> HasPressure for PengRobinson<F> {
    fn pressure(&self, state: &State<F>) -> Result<Pressure, PropertyError> {
        Ok(self.flash(state)?.pressure())
    }
}

impl<F> HasInternalEnergy for PengRobinson<F> {
    fn internal_energy(&self, state: &State<F>) -> Result<SpecificInternalEnergy, PropertyError> {
        Ok(self.flash(state)?.internal_energy())
    }
}

impl<F> HasEnthalpy for PengRobinson<F> {
    fn enthalpy(&self, state: &State<F>) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(self.flash(state)?.enthalpy())
    }
}

impl<F> HasEntropy for PengRobinson<F> {
    fn entropy(&self, state: &State<F>) -> Result<SpecificEntropy, PropertyError> {
        Ok(self.flash(state)?.entropy())
    }
}

impl<F> HasCp for PengRobinson<F> {
    fn cp(&self, state: &State<F>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(self.flash(state)?.cp())
    }
}

impl<F> HasCv for PengRobinson<F> {
    fn cv(&self, state: &State<F>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(self.flash(state)?.cv())
    }
}

impl<F> HasSoundSpeed for PengRobinson<F> {
    fn speed_of_sound(&self, state: &State<F>) -> Result<Velocity, PropertyError> {
        let a = self.flash(state)?.speed_of_sound();
        if a.value.is_nan() {
            return Err(PropertyError::Undefined {
                context: "speed of sound in a mechanically unstable state".to_string(),
            });
        }
        Ok(a)
    }
}

impl<F> HasMolarMass for PengRobinson<F> {
    fn molar_mass(&self) -> Result<MolarMass, PropertyError> {
        Ok(MolarMass::new::<kilogram_per_mole>(self.constants.molar_mass))
    }
}

impl<F> StateFrom<(F, ThermodynamicTemperature, MassDensity)> for PengRobinson<F> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, density): (F, ThermodynamicTemperature, MassDensity),
    ) -> Result<State<F>, Self::Error> {
        let state = State {
            temperature,
            density,
            fluid,
        };
        // Flash once so out-of-range inputs fail here rather than later.
        self.flash(&state)?;
        Ok(state)
    }
}

impl<F> StateFrom<(F, ThermodynamicTemperature, Pressure)> for PengRobinson<F> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (F, ThermodynamicTemperature, Pressure),
    ) -> Result<State<F>, Self::Error> {
        self.state_for(
            fluid,
            InputPair::PT,
            pressure.get::<pascal>(),
            temperature.get::<kelvin>(),
        )
    }
}

impl<F> StateFrom<(F, Pressure, MassDensity)> for PengRobinson<F> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, density): (F, Pressure, MassDensity),
    ) -> Result<State<F>, Self::Error> {
        self.state_for(
            fluid,
            InputPair::DmassP,
            density.get::<kilogram_per_cubic_meter>(),
            pressure.get::<pascal>(),
        )
    }
}

impl<F> StateFrom<(F, Pressure, SpecificEnthalpy)> for PengRobinson<F> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, enthalpy): (F, Pressure, SpecificEnthalpy),
    ) -> Result<State<F>, Self::Error> {
        self.state_for(
            fluid,
            InputPair::HmassP,
            enthalpy.get::<joule_per_kilogram>(),
            pressure.get::<pascal>(),
        )
    }
}

impl<F> StateFrom<(F, Pressure, SpecificEntropy)> for PengRobinson<F> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, pressure, entropy): (F, Pressure, SpecificEntropy),
    ) -> Result<State<F>, Self::Error> {
        self.state_for(
            fluid,
            InputPair::PSmass,
            pressure.get::<pascal>(),
            entropy.get::<joule_per_kilogram_kelvin>(),
        )
    }
}

impl<F> StateFrom<(F, SpecificEnthalpy, SpecificEntropy)> for PengRobinson<F> {
    type Error = PropertyError;

    fn state_from(
        &self,
        (fluid, enthalpy, entropy): (F, SpecificEnthalpy, SpecificEntropy),
    ) -> Result<State<F>, Self::Error> {
        self.state_for(
            fluid,
            InputPair::HmassSmass,
            enthalpy.get::<joule_per_kilogram>(),
            entropy.get::<joule_per_kilogram_kelvin>(),
        )
    }
}
