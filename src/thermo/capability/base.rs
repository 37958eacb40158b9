/// Base trait for models in the typed capability API.
///
/// Every capability trait builds on this one, so a single associated type
/// ties together the fluid a model accepts in [`State`](crate::thermo::State)
/// and the fluid it returns from [`StateFrom`](super::StateFrom).
pub trait ThermoModel {
    type Fluid;
}
