use std::sync::PoisonError;

use thiserror::Error;

use crate::thermo::PropertyError;

/// Errors returned by the [`CoolProp`](super::CoolProp) model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoolPropError {
    #[error(transparent)]
    Rfluids(#[from] rfluids::error::CoolPropError),
    #[error("CoolProp abstract state mutex poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for CoolPropError {
    fn from(_: PoisonError<T>) -> Self {
        CoolPropError::Poisoned
    }
}

impl From<CoolPropError> for PropertyError {
    fn from(error: CoolPropError) -> Self {
        match error {
            CoolPropError::Rfluids(message) => classify(&message.to_string()),
            CoolPropError::Poisoned => {
                PropertyError::calculation("CoolProp abstract state mutex poisoned")
            }
        }
    }
}

/// Classifies a CoolProp error message.
///
/// CoolProp reports failures as free text, so the variant is chosen by
/// substring. Anything unrecognized is a [`PropertyError::Calculation`] with
/// the original message.
fn classify(message: &str) -> PropertyError {
    const UNDEFINED: &[&str] = &["not defined", "not implemented", "unable to calculate"];
    const OUT_OF_DOMAIN: &[&str] = &[
        "not in range",
        "out of range",
        "outside the range of validity",
        "must be in range",
        "must be between",
        "quality must be",
        "above the maximum",
        "below the minimum",
    ];
    const INVALID_STATE: &[&str] = &["not a valid number", "invalid state", "invalid number"];

    let lowered = message.to_lowercase();
    let matches = |markers: &[&str]| markers.iter().any(|m| lowered.contains(m));
    let context = message.to_string();

    if matches(UNDEFINED) {
        PropertyError::Undefined { context }
    } else if matches(OUT_OF_DOMAIN) {
        PropertyError::OutOfDomain { context }
    } else if matches(INVALID_STATE) {
        PropertyError::InvalidState { context }
    } else {
        PropertyError::Calculation { context }
    }
}
