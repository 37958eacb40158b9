//! CoolProp-backed fluid property model.
//!
//! [`CoolProp`] wraps one `AbstractState` from the `rfluids` bindings. It
//! serves both APIs: the typed capabilities for [`State`] values and the
//! [`PropertyBackend`] interface used by [`crate::fluid::Fluid`].

mod error;

use std::{
    marker::PhantomData,
    sync::{Mutex, MutexGuard},
};

use rfluids::{
    io::{FluidInputPair, FluidParam, FluidTrivialParam},
    native::AbstractState,
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
    velocity::meter_per_second,
};

use crate::support::units::{SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy};
use crate::thermo::{
    FluidConstants, FluidState, InputPair, Phase, PropertyBackend, PropertyError, State,
    capability::{
        HasCp, HasCv, HasEnthalpy, HasEntropy, HasInternalEnergy, HasMolarMass, HasPressure,
        HasSoundSpeed, StateFrom, ThermoModel,
    },
};

pub use error::CoolPropError;

/// Trait used to mark fluids as usable with the [`CoolProp`] model.
///
/// Implementors provide the backend and fluid identifiers needed to construct a
/// `CoolProp` `AbstractState`.
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub trait CoolPropFluid: Default + Send + Sync + 'static {
    const BACKEND: &'static str;
    const NAME: &'static str;
}

/// A fluid property model backed by `CoolProp`.
///
/// Fixed-point data (critical point, limits, molar mass) is read once at
/// construction. CoolProp has no density limit, so
/// [`FluidConstants::rho_max`] is infinite.
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub struct CoolProp<F: CoolPropFluid> {
    state: Mutex<AbstractState>,
    constants: FluidConstants,
    _f: PhantomData<F>,
}

impl<F: CoolPropFluid> ThermoModel for CoolProp<F> {
    type Fluid = F;
}

impl<F: CoolPropFluid> CoolProp<F> {
    /// Construct a new CoolProp-backed model instance.
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if the underlying `AbstractState` cannot be
    /// created for the given `F::BACKEND` and `F::NAME`, or if it cannot
    /// report the fluid's fixed-point data.
    pub fn new() -> Result<Self, CoolPropError> {
        let state = AbstractState::new(F::BACKEND, F::NAME)?;
        let constants = read_constants(&state)?;
        tracing::debug!(
            fluid = F::NAME,
            backend = F::BACKEND,
            t_crit = constants.t_crit,
            p_crit = constants.p_crit,
            "created CoolProp state"
        );
        Ok(Self {
            state: Mutex::new(state),
            constants,
            _f: PhantomData,
        })
    }

    /// Locks the underlying `AbstractState` and updates it from `state`.
    fn lock_with_state(
        &self,
        state: &State<F>,
    ) -> Result<MutexGuard<'_, AbstractState>, CoolPropError> {
        let mut abstract_state = self.state.lock()?;
        abstract_state.update(
            FluidInputPair::DMassT,
            state.density.get::<kilogram_per_cubic_meter>(),
            state.temperature.get::<kelvin>(),
        )?;
        Ok(abstract_state)
    }

    /// Reads one keyed output at `state`.
    fn output(&self, state: &State<F>, param: FluidParam) -> Result<f64, CoolPropError> {
        let abstract_state = self.lock_with_state(state)?;
        Ok(abstract_state.keyed_output(param)?)
    }

    /// Updates from `pair` and returns the resulting typed state.
    fn locate(
        &self,
        fluid: F,
        pair: FluidInputPair,
        first: f64,
        second: f64,
    ) -> Result<State<F>, CoolPropError> {
        let mut abstract_state = self.state.lock()?;
        abstract_state.update(pair, first, second)?;

        let temperature = abstract_state.keyed_output(FluidParam::T)?;
        let density = abstract_state.keyed_output(FluidParam::DMass)?;

        Ok(State {
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
            density: MassDensity::new::<kilogram_per_cubic_meter>(density),
            fluid,
        })
    }
}

fn read_constants(state: &AbstractState) -> Result<FluidConstants, CoolPropError> {
    let molar_mass = state.keyed_output(FluidTrivialParam::MolarMass)?;
    Ok(FluidConstants {
        molar_mass,
        gas_constant: FluidConstants::gas_constant_for(molar_mass),
        t_crit: state.keyed_output(FluidTrivialParam::TCritical)?,
        p_crit: state.keyed_output(FluidTrivialParam::PCritical)?,
        rho_crit: state.keyed_output(FluidTrivialParam::DMassCritical)?,
        t_triple: state.keyed_output(FluidTrivialParam::TMin)?,
        t_max: state.keyed_output(FluidTrivialParam::TMax)?,
        p_max: state.keyed_output(FluidTrivialParam::PMax)?,
        rho_max: f64::INFINITY,
    })
}

fn input_pair(pair: InputPair) -> FluidInputPair {
    match pair {
        InputPair::PT => FluidInputPair::PT,
        InputPair::DmassT => FluidInputPair::DMassT,
        InputPair::DmassP => FluidInputPair::DMassP,
        InputPair::HmassP => FluidInputPair::HMassP,
        InputPair::PSmass => FluidInputPair::PSMass,
        InputPair::HmassSmass => FluidInputPair::HMassSMass,
        InputPair::SmassT => FluidInputPair::SMassT,
        InputPair::QT => FluidInputPair::QT,
        InputPair::PQ => FluidInputPair::PQ,
        InputPair::DmassHmass => FluidInputPair::DMassHMass,
        InputPair::DmassSmass => FluidInputPair::DMassSMass,
    }
}

/// Reads a single-phase state from an updated `AbstractState`.
///
/// Transport properties are optional because not every CoolProp fluid has
/// correlations for them.
fn read_state(
    state: &AbstractState,
    constants: &FluidConstants,
) -> Result<FluidState, CoolPropError> {
    let output = |param: FluidParam| state.keyed_output(param);

    let temperature = output(FluidParam::T)?;
    let pressure = output(FluidParam::P)?;
    let density = output(FluidParam::DMass)?;
    let enthalpy = output(FluidParam::HMass)?;
    let entropy = output(FluidParam::SMass)?;
    let cp = output(FluidParam::CpMass)?;
    let beta = output(FluidParam::IsobaricExpansionCoefficient)?;

    Ok(FluidState {
        phase: Phase::classify(temperature, pressure, density, constants),
        temperature,
        pressure,
        density,
        enthalpy,
        entropy,
        internal_energy: output(FluidParam::UMass)?,
        gibbs_energy: enthalpy - temperature * entropy,
        cp,
        cv: output(FluidParam::CvMass)?,
        speed_of_sound: output(FluidParam::SoundSpeed).unwrap_or(f64::NAN),
        compressibility_factor: pressure / (density * constants.gas_constant * temperature),
        isothermal_compressibility: output(FluidParam::IsothermalCompressibility)?,
        isobaric_expansion_coefficient: beta,
        joule_thomson: (temperature * beta - 1.0) / (density * cp),
        viscosity: output(FluidParam::DynamicViscosity).ok(),
        conductivity: output(FluidParam::Conductivity).ok(),
        ..FluidState::undefined()
    })
}

impl<F: CoolPropFluid> PropertyBackend for CoolProp<F> {
    fn name(&self) -> &str {
        F::NAME
    }

    fn constants(&self) -> &FluidConstants {
        &self.constants
    }

    /// Updates the `AbstractState` and reads back every property.
    ///
    /// Inside the dome CoolProp's own mixture values are replaced by the
    /// saturated liquid and vapor at the same temperature, mixed with
    /// [`FluidState::two_phase`].
    fn update(
        &self,
        pair: InputPair,
        first: f64,
        second: f64,
    ) -> Result<FluidState, PropertyError> {
        let mut abstract_state = self.state.lock().map_err(CoolPropError::from)?;
        abstract_state
            .update(input_pair(pair), first, second)
            .map_err(CoolPropError::from)?;

        let quality = abstract_state
            .keyed_output(FluidParam::Q)
            .ok()
            .filter(|q| (0.0..=1.0).contains(q));

        let Some(quality) = quality else {
            return read_state(&abstract_state, &self.constants).map_err(PropertyError::from);
        };

        let temperature = abstract_state
            .keyed_output(FluidParam::T)
            .map_err(CoolPropError::from)?;
        let mut saturated = |q: f64| -> Result<FluidState, CoolPropError> {
            abstract_state.update(FluidInputPair::QT, q, temperature)?;
            read_state(&abstract_state, &self.constants)
        };
        let liquid = saturated(0.0)?;
        let vapor = saturated(1.0)?;

        FluidState::two_phase(&liquid, &vapor, quality)
    }
}

impl<F: CoolPropFluid> HasPressure for CoolProp<F> {
    fn pressure(&self, state: &State<Self::Fluid>) -> Result<Pressure, PropertyError> {
        let pressure = self.output(state, FluidParam::P)?;
        Ok(Pressure::new::<pascal>(pressure))
    }
}

impl<F: CoolPropFluid> HasInternalEnergy for CoolProp<F> {
    fn internal_energy(
        &self,
        state: &State<Self::Fluid>,
    ) -> Result<SpecificInternalEnergy, PropertyError> {
        let internal_energy = self.output(state, FluidParam::UMass)?;
        Ok(SpecificInternalEnergy::new::<joule_per_kilogram>(
            internal_energy,
        ))
    }
}

impl<F: CoolPropFluid> HasEnthalpy for CoolProp<F> {
    fn enthalpy(&self, state: &State<Self::Fluid>) -> Result<SpecificEnthalpy, PropertyError> {
        let enthalpy = self.output(state, FluidParam::HMass)?;
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(enthalpy))
    }
}

impl<F: CoolPropFluid> HasEntropy for CoolProp<F> {
    fn entropy(&self, state: &State<Self::Fluid>) -> Result<SpecificEntropy, PropertyError> {
        let entropy = self.output(state, FluidParam::SMass)?;
        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(entropy))
    }
}

impl<F: CoolPropFluid> HasCp for CoolProp<F> {
    fn cp(&self, state: &State<Self::Fluid>) -> Result<SpecificHeatCapacity, PropertyError> {
        let cp = self.output(state, FluidParam::CpMass)?;
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp))
    }
}

impl<F: CoolPropFluid> HasCv for CoolProp<F> {
    fn cv(&self, state: &State<Self::Fluid>) -> Result<SpecificHeatCapacity, PropertyError> {
        let cv = self.output(state, FluidParam::CvMass)?;
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cv))
    }
}

impl<F: CoolPropFluid> HasSoundSpeed for CoolProp<F> {
    fn speed_of_sound(&self, state: &State<Self::Fluid>) -> Result<Velocity, PropertyError> {
        let speed = self.output(state, FluidParam::SoundSpeed)?;
        Ok(Velocity::new::<meter_per_second>(speed))
    }
}

impl<F: CoolPropFluid> HasMolarMass for CoolProp<F> {
    fn molar_mass(&self) -> Result<MolarMass, PropertyError> {
        Ok(MolarMass::new::<kilogram_per_mole>(
            self.constants.molar_mass,
        ))
    }
}

impl<F: CoolPropFluid> StateFrom<(F, ThermodynamicTemperature, MassDensity)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, temperature, density): (F, ThermodynamicTemperature, MassDensity),
    ) -> Result<State<F>, Self::Error> {
        // Updating surfaces invalid inputs before the state is handed out.
        let mut abstract_state = self.state.lock()?;
        abstract_state.update(
            FluidInputPair::DMassT,
            density.get::<kilogram_per_cubic_meter>(),
            temperature.get::<kelvin>(),
        )?;

        Ok(State {
            temperature,
            density,
            fluid,
        })
    }
}

impl<F: CoolPropFluid> StateFrom<(F, ThermodynamicTemperature, Pressure)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, temperature, pressure): (F, ThermodynamicTemperature, Pressure),
    ) -> Result<State<F>, Self::Error> {
        self.locate(
            fluid,
            FluidInputPair::PT,
            pressure.get::<pascal>(),
            temperature.get::<kelvin>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, Pressure, MassDensity)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, pressure, density): (F, Pressure, MassDensity),
    ) -> Result<State<F>, Self::Error> {
        self.locate(
            fluid,
            FluidInputPair::DMassP,
            density.get::<kilogram_per_cubic_meter>(),
            pressure.get::<pascal>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, Pressure, SpecificEnthalpy)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, pressure, enthalpy): (F, Pressure, SpecificEnthalpy),
    ) -> Result<State<F>, Self::Error> {
        self.locate(
            fluid,
            FluidInputPair::HMassP,
            enthalpy.get::<joule_per_kilogram>(),
            pressure.get::<pascal>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, Pressure, SpecificEntropy)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, pressure, entropy): (F, Pressure, SpecificEntropy),
    ) -> Result<State<F>, Self::Error> {
        self.locate(
            fluid,
            FluidInputPair::PSMass,
            pressure.get::<pascal>(),
            entropy.get::<joule_per_kilogram_kelvin>(),
        )
    }
}

impl<F: CoolPropFluid> StateFrom<(F, SpecificEnthalpy, SpecificEntropy)> for CoolProp<F> {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (fluid, enthalpy, entropy): (F, SpecificEnthalpy, SpecificEntropy),
    ) -> Result<State<F>, Self::Error> {
        self.locate(
            fluid,
            FluidInputPair::HMassSMass,
            enthalpy.get::<joule_per_kilogram>(),
            entropy.get::<joule_per_kilogram_kelvin>(),
        )
    }
}

// CoolProp<F> must be Send + Sync for any CoolPropFluid. rfluids serializes
// the FFI calls; the local mutex keeps each update and its reads together.
#[allow(dead_code)]
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn check<F: CoolPropFluid>() {
        assert_send_sync::<CoolProp<F>>();
    }
};
