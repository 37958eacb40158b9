use crate::thermo::State;

use super::ThermoModel;

/// Capability for constructing a [`State`] from a typed input.
///
/// Each implementation names one combination of independent properties a
/// model can turn into a state. Inputs are plain tuples with the fluid value
/// first:
///
/// - `(Fluid, ThermodynamicTemperature, MassDensity)`
/// - `(Fluid, ThermodynamicTemperature, Pressure)`
/// - `(Fluid, Pressure, MassDensity)`
/// - `(Fluid, Pressure, SpecificEnthalpy)`
/// - `(Fluid, Pressure, SpecificEntropy)`
/// - `(Fluid, SpecificEnthalpy, SpecificEntropy)`
///
/// A model that can't handle an input simply lacks the impl, so the call
/// does not compile.
///
/// For marker fluids, a blanket impl also accepts the two-element form and
/// fills in `Fluid::default()`:
///
/// ```
/// use coolpropx::thermo::{
///     State, capability::StateFrom, model::PerfectGas, substance::Air,
/// };
/// use uom::si::{
///     f64::{Pressure, ThermodynamicTemperature},
///     pressure::kilopascal,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let air = PerfectGas::<Air>::new().unwrap();
/// let state: State<Air> = air
///     .state_from((
///         ThermodynamicTemperature::new::<kelvin>(300.0),
///         Pressure::new::<kilopascal>(101.325),
///     ))
///     .unwrap();
/// ```
pub trait StateFrom<Input>: ThermoModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates a thermodynamic state from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be created from `input`.
    fn state_from(&self, input: Input) -> Result<State<Self::Fluid>, Self::Error>;
}

impl<M, A, B> StateFrom<(A, B)> for M
where
    M: ThermoModel + StateFrom<(<M as ThermoModel>::Fluid, A, B)>,
    <M as ThermoModel>::Fluid: Default,
{
    type Error = <M as StateFrom<(<M as ThermoModel>::Fluid, A, B)>>::Error;

    fn state_from(&self, (a, b): (A, B)) -> Result<State<Self::Fluid>, Self::Error> {
        self.state_from((<M as ThermoModel>::Fluid::default(), a, b))
    }
}
