//! Calorically perfect gas model.
//!
//! `PerfectGas` is an ideal gas with constant heat capacities, the cheapest
//! useful description of a gas far from saturation.
//!
//! # Assumptions
//!
//! - Ideal gas equation of state: `p = ρ·R·T`
//! - Calorically perfect: `cp` and `cv` do not vary with temperature
//!
//! # Matching A Real Fluid
//!
//! [`PerfectGasParameters::from_model`] fits the constants to another model
//! at one reference point, so the perfect gas reproduces that model's `cp`,
//! `h` and `s` there. This is the usual way to linearize a real-gas
//! calculation around an operating point.
//!
//! # Reference State
//!
//! Enthalpy and entropy are reported relative to a configurable reference
//! state (`T_ref`, `p_ref`, `h_ref`, `s_ref`).

use std::{convert::Infallible, marker::PhantomData};

use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        f64::{
            MassDensity, MolarMass, Pressure, SpecificHeatCapacity, ThermodynamicTemperature,
            Velocity,
        },
        molar_mass::kilogram_per_mole,
        pressure::{atmosphere, pascal},
        ratio::ratio,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin},
        velocity::meter_per_second,
    },
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    units::{
        SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, SpecificInternalEnergy,
        TemperatureDifference, UNIVERSAL_GAS_CONSTANT,
    },
};
use crate::thermo::{
    PropertyError, State,
    capability::{
        HasCp, HasCv, HasEnthalpy, HasEntropy, HasInternalEnergy, HasMolarMass, HasPressure,
        HasSoundSpeed, StateFrom, ThermoModel,
    },
};

use super::ideal_gas_eos;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PerfectGasParametersError {
    #[error("invalid gas constant R: {r:?}")]
    GasConstant { r: SpecificGasConstant },
    #[error("invalid cp: {cp:?}")]
    Cp { cp: SpecificHeatCapacity },
    #[error("invalid reference temperature: {t_ref:?}")]
    ReferenceTemperature { t_ref: ThermodynamicTemperature },
    #[error("invalid reference pressure: {p_ref:?}")]
    ReferencePressure { p_ref: Pressure },
    #[error("non-physical heat capacities: cv = cp - R must be > 0; cp={cp:?}, R={r:?}, cv={cv:?}")]
    NonPhysicalCv {
        r: SpecificGasConstant,
        cp: SpecificHeatCapacity,
        cv: SpecificHeatCapacity,
    },
}

/// Reference values used to define enthalpy/entropy offsets for a [`PerfectGas`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGasReference {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
}

impl PerfectGasReference {
    /// Returns a standard reference: 0°C, 1 atm, `h_ref = 0`, `s_ref = 0`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            temperature: ThermodynamicTemperature::new::<degree_celsius>(0.0),
            pressure: Pressure::new::<atmosphere>(1.0),
            enthalpy: SpecificEnthalpy::ZERO,
            entropy: SpecificEntropy::ZERO,
        }
    }
}

/// Constant parameters for the [`PerfectGas`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGasParameters {
    pub gas_constant: SpecificGasConstant,
    pub cp: SpecificHeatCapacity,
    pub reference: PerfectGasReference,
}

impl PerfectGasParameters {
    #[must_use]
    pub fn new(gas_constant: SpecificGasConstant, cp: SpecificHeatCapacity) -> Self {
        Self {
            gas_constant,
            cp,
            reference: PerfectGasReference::standard(),
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: PerfectGasReference) -> Self {
        self.reference = reference;
        self
    }

    /// Fits perfect-gas parameters to `model` at `(temperature, pressure)`.
    ///
    /// `R` comes from the model's molar mass. `cp`, `h_ref` and `s_ref` are
    /// the model's values at the reference point.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the model cannot evaluate the reference
    /// state.
    pub fn from_model<M, F>(
        model: &M,
        fluid: F,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<Self, PropertyError>
    where
        M: StateFrom<(F, ThermodynamicTemperature, Pressure), Fluid = F>
            + HasEnthalpy
            + HasEntropy
            + HasCp
            + HasMolarMass,
        PropertyError: From<<M as StateFrom<(F, ThermodynamicTemperature, Pressure)>>::Error>,
    {
        let state = model.state_from((fluid, temperature, pressure))?;
        let molar_mass = model.molar_mass()?.get::<kilogram_per_mole>();

        Ok(Self {
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(
                UNIVERSAL_GAS_CONSTANT / molar_mass,
            ),
            cp: model.cp(&state)?,
            reference: PerfectGasReference {
                temperature,
                pressure,
                enthalpy: model.enthalpy(&state)?,
                entropy: model.entropy(&state)?,
            },
        })
    }
}

/// Fluid constants required by the [`PerfectGas`] model.
pub trait PerfectGasFluid {
    /// Returns the constant parameters for use with [`PerfectGas`].
    fn parameters() -> PerfectGasParameters;
}

/// Perfect gas model (constant `cp`/`cv`) using the ideal gas equation of state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectGas<Fluid> {
    r: SpecificGasConstant,
    cp: SpecificHeatCapacity,
    cv: SpecificHeatCapacity,
    t_ref: ThermodynamicTemperature,
    p_ref: Pressure,
    h_ref: SpecificEnthalpy,
    s_ref: SpecificEntropy,
    _marker: PhantomData<Fluid>,
}

impl<Fluid> ThermoModel for PerfectGas<Fluid> {
    type Fluid = Fluid;
}

impl<Fluid: PerfectGasFluid> PerfectGas<Fluid> {
    /// Creates a perfect gas model using constants defined by `Fluid`.
    ///
    /// # Errors
    ///
    /// Returns [`PerfectGasParametersError`] if any required constant is
    /// invalid or if `cv = cp - R` is non-physical.
    pub fn new() -> Result<Self, PerfectGasParametersError> {
        Self::with_parameters(Fluid::parameters())
    }
}

impl<Fluid> PerfectGas<Fluid> {
    /// Creates a perfect gas model from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PerfectGasParametersError`] if `R`, `cp`, `T_ref` or `p_ref`
    /// is not strictly positive, or if `cv = cp - R` is non-physical.
    pub fn with_parameters(
        parameters: PerfectGasParameters,
    ) -> Result<Self, PerfectGasParametersError> {
        let gas_constant = parameters.gas_constant;
        if StrictlyPositive::check(&gas_constant.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::GasConstant { r: gas_constant });
        }

        let cp = parameters.cp;
        if StrictlyPositive::check(&cp.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::Cp { cp });
        }

        let t_ref = parameters.reference.temperature;
        if StrictlyPositive::check(&t_ref.get::<kelvin>()).is_err() {
            return Err(PerfectGasParametersError::ReferenceTemperature { t_ref });
        }

        let p_ref = parameters.reference.pressure;
        if StrictlyPositive::check(&p_ref.get::<pascal>()).is_err() {
            return Err(PerfectGasParametersError::ReferencePressure { p_ref });
        }

        let cv = cp - gas_constant;
        if StrictlyPositive::check(&cv.get::<joule_per_kilogram_kelvin>()).is_err() {
            return Err(PerfectGasParametersError::NonPhysicalCv {
                r: gas_constant,
                cp,
                cv,
            });
        }

        Ok(Self {
            r: gas_constant,
            cp,
            cv,
            t_ref,
            p_ref,
            h_ref: parameters.reference.enthalpy,
            s_ref: parameters.reference.entropy,
            _marker: PhantomData,
        })
    }

    /// Creates a state at the reference temperature and pressure.
    #[must_use]
    pub fn reference_state(&self, fluid: Fluid) -> State<Fluid> {
        let temperature = self.t_ref;
        let density = ideal_gas_eos::density(temperature, self.p_ref, self.r);
        State::new(temperature, density, fluid)
    }
}

impl<Fluid> HasPressure for PerfectGas<Fluid> {
    /// Computes pressure with `p = ρ·R·T`.
    fn pressure(&self, state: &State<Fluid>) -> Result<Pressure, PropertyError> {
        Ok(ideal_gas_eos::pressure(
            state.temperature,
            state.density,
            self.r,
        ))
    }
}

impl<Fluid> HasInternalEnergy for PerfectGas<Fluid> {
    /// Computes internal energy with `u = h − R·T`.
    fn internal_energy(
        &self,
        state: &State<Fluid>,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        Ok(self.enthalpy(state)? - self.r * state.temperature)
    }
}

impl<Fluid> HasEnthalpy for PerfectGas<Fluid> {
    /// Computes enthalpy with `h = h₀ + cp·(T − T₀)`.
    fn enthalpy(&self, state: &State<Fluid>) -> Result<SpecificEnthalpy, PropertyError> {
        Ok(self.h_ref + self.cp * state.temperature.minus(self.t_ref))
    }
}

impl<Fluid> HasEntropy for PerfectGas<Fluid> {
    /// Computes entropy with `s = s₀ + cp·ln(T⁄T₀) − R·ln(p⁄p₀)`.
    fn entropy(&self, state: &State<Fluid>) -> Result<SpecificEntropy, PropertyError> {
        let p = self.pressure(state)?;

        Ok(self.s_ref + self.cp * (state.temperature / self.t_ref).ln()
            - self.r * (p / self.p_ref).ln())
    }
}

impl<Fluid> HasCp for PerfectGas<Fluid> {
    /// Returns the constant `cp` of the fluid.
    fn cp(&self, _state: &State<Fluid>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(self.cp)
    }
}

impl<Fluid> HasCv for PerfectGas<Fluid> {
    /// Returns the constant `cv` of the fluid.
    fn cv(&self, _state: &State<Fluid>) -> Result<SpecificHeatCapacity, PropertyError> {
        Ok(self.cv)
    }
}

impl<Fluid> HasSoundSpeed for PerfectGas<Fluid> {
    /// Computes the speed of sound with `a = √(γ·R·T)`.
    fn speed_of_sound(&self, state: &State<Fluid>) -> Result<Velocity, PropertyError> {
        let gamma = (self.cp / self.cv).get::<ratio>();
        let rt = self.r.get::<joule_per_kilogram_kelvin>() * state.temperature.get::<kelvin>();
        Ok(Velocity::new::<meter_per_second>((gamma * rt).sqrt()))
    }
}

impl<Fluid> HasMolarMass for PerfectGas<Fluid> {
    /// Returns `M = R_u / R`.
    fn molar_mass(&self) -> Result<MolarMass, PropertyError> {
        Ok(MolarMass::new::<kilogram_per_mole>(
            UNIVERSAL_GAS_CONSTANT / self.r.get::<joule_per_kilogram_kelvin>(),
        ))
    }
}

impl<Fluid> StateFrom<(Fluid, ThermodynamicTemperature, MassDensity)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, temperature, density): (Fluid, ThermodynamicTemperature, MassDensity),
    ) -> Result<State<Fluid>, Self::Error> {
        Ok(State::new(temperature, density, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, ThermodynamicTemperature, Pressure)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (Fluid, ThermodynamicTemperature, Pressure),
    ) -> Result<State<Fluid>, Self::Error> {
        let density = ideal_gas_eos::density(temperature, pressure, self.r);
        Ok(State::new(temperature, density, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, MassDensity)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, pressure, density): (Fluid, Pressure, MassDensity),
    ) -> Result<State<Fluid>, Self::Error> {
        let temperature = ideal_gas_eos::temperature(pressure, density, self.r);
        Ok(State::new(temperature, density, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, SpecificEnthalpy)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, pressure, enthalpy): (Fluid, Pressure, SpecificEnthalpy),
    ) -> Result<State<Fluid>, Self::Error> {
        let temperature = self.t_ref + (enthalpy - self.h_ref) / self.cp;
        let density = ideal_gas_eos::density(temperature, pressure, self.r);
        Ok(State::new(temperature, density, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, Pressure, SpecificEntropy)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, pressure, entropy): (Fluid, Pressure, SpecificEntropy),
    ) -> Result<State<Fluid>, Self::Error> {
        let exponent = ((entropy - self.s_ref) + self.r * (pressure / self.p_ref).ln()) / self.cp;
        let temperature = self.t_ref * exponent.get::<ratio>().exp();
        let density = ideal_gas_eos::density(temperature, pressure, self.r);
        Ok(State::new(temperature, density, fluid))
    }
}

impl<Fluid> StateFrom<(Fluid, SpecificEnthalpy, SpecificEntropy)> for PerfectGas<Fluid> {
    type Error = Infallible;

    fn state_from(
        &self,
        (fluid, enthalpy, entropy): (Fluid, SpecificEnthalpy, SpecificEntropy),
    ) -> Result<State<Fluid>, Self::Error> {
        let temperature = self.t_ref + (enthalpy - self.h_ref) / self.cp;
        let exponent =
            (self.cp * (temperature / self.t_ref).ln() + self.s_ref - entropy) / self.r;
        let pressure = self.p_ref * exponent.get::<ratio>().exp();
        let density = ideal_gas_eos::density(temperature, pressure, self.r);
        Ok(State::new(temperature, density, fluid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram,
        mass_density::pound_per_cubic_foot,
        molar_mass::gram_per_mole,
        pressure::{bar, kilopascal, psi},
    };

    use crate::thermo::{
        model::PengRobinson,
        substance::{Air, CarbonDioxide},
    };

    #[derive(Debug, Clone, Copy, Default)]
    struct MockGas;

    impl PerfectGasFluid for MockGas {
        fn parameters() -> PerfectGasParameters {
            PerfectGasParameters::new(
                SpecificGasConstant::new::<joule_per_kilogram_kelvin>(400.0),
                SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1000.0),
            )
        }
    }

    fn mock_gas_model() -> PerfectGas<MockGas> {
        PerfectGas::<MockGas>::new().expect("mock gas parameters must be physically valid")
    }

    #[test]
    fn reference_state_properties() -> Result<(), PropertyError> {
        let thermo = mock_gas_model();
        let state = thermo.reference_state(MockGas);

        assert_relative_eq!(thermo.pressure(&state)?.get::<kilopascal>(), 101.325);
        assert_eq!(thermo.enthalpy(&state)?, SpecificEnthalpy::ZERO);
        assert_relative_eq!(
            thermo.internal_energy(&state)?.get::<joule_per_kilogram>(),
            -400.0 * 273.15,
            max_relative = 1e-12
        );
        Ok(())
    }

    #[test]
    fn increase_density_at_constant_temperature() -> Result<(), PropertyError> {
        let thermo = mock_gas_model();

        let pres = Pressure::new::<psi>(100.0);
        let dens = MassDensity::new::<pound_per_cubic_foot>(0.1);
        let state_a: State<MockGas> = thermo.state_from((pres, dens)).unwrap();
        let state_b = state_a.with_density(dens * 2.0);

        assert_relative_eq!(
            thermo.pressure(&state_b)?.get::<pascal>(),
            2.0 * thermo.pressure(&state_a)?.get::<pascal>(),
            max_relative = 1e-12
        );
        assert!(thermo.entropy(&state_b)? < thermo.entropy(&state_a)?);
        Ok(())
    }

    #[test]
    fn state_from_enthalpy_entropy_roundtrip() -> Result<(), PropertyError> {
        let thermo = mock_gas_model();

        let temp_in = ThermodynamicTemperature::new::<degree_celsius>(140.0);
        let pres_in = Pressure::new::<kilopascal>(220.0);
        let state_in: State<MockGas> = thermo.state_from((temp_in, pres_in)).unwrap();

        let h = thermo.enthalpy(&state_in)?;
        let s = thermo.entropy(&state_in)?;
        let by_ph: State<MockGas> = thermo.state_from((pres_in, h)).unwrap();
        let by_ps: State<MockGas> = thermo.state_from((pres_in, s)).unwrap();
        let by_hs: State<MockGas> = thermo.state_from((h, s)).unwrap();

        for state in [by_ph, by_ps, by_hs] {
            assert_relative_eq!(
                state.temperature.get::<kelvin>(),
                temp_in.get::<kelvin>(),
                epsilon = 1e-10
            );
            assert_relative_eq!(
                thermo.pressure(&state)?.get::<pascal>(),
                pres_in.get::<pascal>(),
                epsilon = 1e-8
            );
        }
        Ok(())
    }

    #[test]
    fn speed_of_sound_and_molar_mass() -> Result<(), PropertyError> {
        let air = PerfectGas::<Air>::new().unwrap();
        let state: State<Air> = air
            .state_from((
                ThermodynamicTemperature::new::<kelvin>(300.0),
                Pressure::new::<bar>(1.0),
            ))
            .unwrap();

        let gamma: f64 = 1005.0 / (1005.0 - 287.053);
        assert_relative_eq!(
            air.speed_of_sound(&state)?.get::<meter_per_second>(),
            (gamma * 287.053 * 300.0).sqrt(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            air.molar_mass()?.get::<gram_per_mole>(),
            28.965,
            max_relative = 1e-3
        );
        Ok(())
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let r = SpecificGasConstant::new::<joule_per_kilogram_kelvin>(400.0);

        let cp_below_r = PerfectGasParameters::new(
            r,
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(300.0),
        );
        assert!(matches!(
            PerfectGas::<MockGas>::with_parameters(cp_below_r),
            Err(PerfectGasParametersError::NonPhysicalCv { .. })
        ));

        let zero_pressure = PerfectGasParameters::new(
            r,
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1000.0),
        )
        .with_reference(PerfectGasReference {
            pressure: Pressure::ZERO,
            ..PerfectGasReference::standard()
        });
        assert!(matches!(
            PerfectGas::<MockGas>::with_parameters(zero_pressure),
            Err(PerfectGasParametersError::ReferencePressure { .. })
        ));
    }

    #[test]
    fn matches_a_real_fluid_at_the_reference() -> Result<(), PropertyError> {
        let real = PengRobinson::<CarbonDioxide>::new().unwrap();
        let t_ref = ThermodynamicTemperature::new::<kelvin>(400.0);
        let p_ref = Pressure::new::<bar>(20.0);

        let parameters = PerfectGasParameters::from_model(&real, CarbonDioxide, t_ref, p_ref)?;
        let ideal = PerfectGas::<CarbonDioxide>::with_parameters(parameters).unwrap();

        let real_state: State<CarbonDioxide> = real.state_from((t_ref, p_ref))?;
        let ideal_state: State<CarbonDioxide> = ideal.state_from((t_ref, p_ref)).unwrap();

        assert_relative_eq!(
            ideal.cp(&ideal_state)?.get::<joule_per_kilogram_kelvin>(),
            real.cp(&real_state)?.get::<joule_per_kilogram_kelvin>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            ideal.enthalpy(&ideal_state)?.get::<joule_per_kilogram>(),
            real.enthalpy(&real_state)?.get::<joule_per_kilogram>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            ideal.entropy(&ideal_state)?.get::<joule_per_kilogram_kelvin>(),
            real.entropy(&real_state)?.get::<joule_per_kilogram_kelvin>(),
            max_relative = 1e-12
        );
        Ok(())
    }
}
