//! Thermodynamic property models.

pub mod helmholtz;
pub mod peng_robinson;
pub mod perfect_gas;

pub(crate) mod ideal_gas_eos;

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub mod coolprop;

pub use helmholtz::HelmholtzModel;
pub use peng_robinson::PengRobinson;
pub use perfect_gas::PerfectGas;

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub use coolprop::CoolProp;
