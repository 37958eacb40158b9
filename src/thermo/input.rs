use std::fmt;

/// Pairs of independent properties that define an equilibrium state.
///
/// Values are always passed in the order of the pair name, so
/// `HmassP` takes `(h, p)` and `PSmass` takes `(p, s)`. Units are SI and mass
/// based: K, Pa, kg/m³, J/kg, J/kg·K, and a quality in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputPair {
    /// Pressure, temperature.
    PT,
    /// Density, temperature.
    DmassT,
    /// Density, pressure.
    DmassP,
    /// Enthalpy, pressure.
    HmassP,
    /// Pressure, entropy.
    PSmass,
    /// Enthalpy, entropy.
    HmassSmass,
    /// Entropy, temperature.
    SmassT,
    /// Quality, temperature.
    QT,
    /// Pressure, quality.
    PQ,
    /// Density, enthalpy.
    DmassHmass,
    /// Density, entropy.
    DmassSmass,
}

impl InputPair {
    /// Every supported pair.
    pub const ALL: [InputPair; 11] = [
        InputPair::PT,
        InputPair::DmassT,
        InputPair::DmassP,
        InputPair::HmassP,
        InputPair::PSmass,
        InputPair::HmassSmass,
        InputPair::SmassT,
        InputPair::QT,
        InputPair::PQ,
        InputPair::DmassHmass,
        InputPair::DmassSmass,
    ];

    /// Returns the conventional name of the pair, e.g. `"HmassP_INPUTS"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            InputPair::PT => "PT_INPUTS",
            InputPair::DmassT => "DmassT_INPUTS",
            InputPair::DmassP => "DmassP_INPUTS",
            InputPair::HmassP => "HmassP_INPUTS",
            InputPair::PSmass => "PSmass_INPUTS",
            InputPair::HmassSmass => "HmassSmass_INPUTS",
            InputPair::SmassT => "SmassT_INPUTS",
            InputPair::QT => "QT_INPUTS",
            InputPair::PQ => "PQ_INPUTS",
            InputPair::DmassHmass => "DmassHmass_INPUTS",
            InputPair::DmassSmass => "DmassSmass_INPUTS",
        }
    }

    /// Returns `true` if one of the inputs is a vapor quality.
    #[must_use]
    pub fn has_quality(self) -> bool {
        matches!(self, InputPair::QT | InputPair::PQ)
    }
}

impl fmt::Display for InputPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
