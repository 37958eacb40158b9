use uom::si::f64::{MolarMass, Pressure, SpecificHeatCapacity, Velocity};

use crate::support::units::{SpecificEnthalpy, SpecificEntropy, SpecificInternalEnergy};
use crate::thermo::{PropertyError, State};

use super::ThermoModel;

pub trait HasPressure: ThermoModel {
    /// Returns the pressure at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the pressure cannot be calculated.
    fn pressure(&self, state: &State<Self::Fluid>) -> Result<Pressure, PropertyError>;
}

pub trait HasInternalEnergy: ThermoModel {
    /// Returns the specific internal energy at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the internal energy cannot be calculated.
    fn internal_energy(
        &self,
        state: &State<Self::Fluid>,
    ) -> Result<SpecificInternalEnergy, PropertyError>;
}

pub trait HasEnthalpy: ThermoModel {
    /// Returns the specific enthalpy at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the enthalpy cannot be calculated.
    fn enthalpy(&self, state: &State<Self::Fluid>) -> Result<SpecificEnthalpy, PropertyError>;
}

pub trait HasEntropy: ThermoModel {
    /// Returns the specific entropy at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the entropy cannot be calculated.
    fn entropy(&self, state: &State<Self::Fluid>) -> Result<SpecificEntropy, PropertyError>;
}

pub trait HasCp: ThermoModel {
    /// Returns the isobaric specific heat capacity at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if `cp` cannot be calculated.
    fn cp(&self, state: &State<Self::Fluid>) -> Result<SpecificHeatCapacity, PropertyError>;
}

pub trait HasCv: ThermoModel {
    /// Returns the isochoric specific heat capacity at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if `cv` cannot be calculated.
    fn cv(&self, state: &State<Self::Fluid>) -> Result<SpecificHeatCapacity, PropertyError>;
}

pub trait HasSoundSpeed: ThermoModel {
    /// Returns the speed of sound at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the speed of sound is undefined, for
    /// example inside the spinodal region.
    fn speed_of_sound(&self, state: &State<Self::Fluid>) -> Result<Velocity, PropertyError>;
}

pub trait HasMolarMass: ThermoModel {
    /// Returns the molar mass of the fluid.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the backend cannot report it.
    fn molar_mass(&self) -> Result<MolarMass, PropertyError>;
}
