use super::{FluidConstants, FluidState, InputPair, PropertyError};

/// A low-level property interface: one fluid, updated from input pairs.
///
/// This is the seam between the [`crate::fluid::Fluid`] wrapper and the
/// equation of state that actually evaluates properties. Implementations
/// return equilibrium states, splitting into liquid and vapor inside the
/// two-phase region.
pub trait PropertyBackend {
    /// Returns a human-readable name of the fluid and backend.
    fn name(&self) -> &str;

    /// Returns the fixed-point data of the fluid.
    fn constants(&self) -> &FluidConstants;

    /// Evaluates the equilibrium state defined by `pair`.
    ///
    /// The values follow the order of the pair name, see [`InputPair`].
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the inputs are outside the model's domain
    /// or the state cannot be computed.
    fn update(&self, pair: InputPair, first: f64, second: f64)
    -> Result<FluidState, PropertyError>;
}
