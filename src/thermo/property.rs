use std::{fmt, str::FromStr};

use thiserror::Error;

/// Keys for the values stored in a [`FluidState`](super::FluidState).
///
/// Every key has a canonical name and may have aliases; both parse with
/// [`str::parse`]:
///
/// ```
/// use coolpropx::thermo::Property;
///
/// assert_eq!("rho".parse::<Property>().unwrap(), Property::Density);
/// assert_eq!("rhomass".parse::<Property>().unwrap(), Property::Density);
/// assert_eq!("speed_sound".parse::<Property>().unwrap(), Property::SpeedOfSound);
/// assert!("enthalpy_of_formation".parse::<Property>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Temperature,
    Pressure,
    Density,
    Enthalpy,
    Entropy,
    InternalEnergy,
    GibbsEnergy,
    Cp,
    Cv,
    Gamma,
    SpeedOfSound,
    CompressibilityFactor,
    IsothermalCompressibility,
    IsobaricExpansionCoefficient,
    JouleThomson,
    QualityMass,
    QualityVolume,
    Viscosity,
    Conductivity,
    SupersaturationDegree,
    Superheating,
    Subcooling,
    SupersaturationRatio,
}

/// Error returned when parsing an unrecognized property name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown property name: {name:?}")]
pub struct UnknownPropertyError {
    pub name: String,
}

impl Property {
    /// Returns the canonical name of the property.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.names()[0]
    }

    /// Returns the canonical name followed by every accepted alias.
    #[must_use]
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Property::Temperature => &["T", "temperature"],
            Property::Pressure => &["p", "P", "pressure"],
            Property::Density => &["rho", "d", "rhomass", "dmass", "density"],
            Property::Enthalpy => &["h", "hmass", "enthalpy"],
            Property::Entropy => &["s", "smass", "entropy"],
            Property::InternalEnergy => &["u", "umass", "internal_energy"],
            Property::GibbsEnergy => &["g", "gmass", "gibbs_energy"],
            Property::Cp => &["cp", "cpmass"],
            Property::Cv => &["cv", "cvmass"],
            Property::Gamma => &["gamma"],
            Property::SpeedOfSound => &["a", "speed_sound", "speed_of_sound"],
            Property::CompressibilityFactor => &["Z", "compressibility_factor"],
            Property::IsothermalCompressibility => &["isothermal_compressibility"],
            Property::IsobaricExpansionCoefficient => &["isobaric_expansion_coefficient"],
            Property::JouleThomson => &["joule_thomson"],
            Property::QualityMass => &["Q", "quality_mass"],
            Property::QualityVolume => &["quality_volume", "void_fraction"],
            Property::Viscosity => &["mu", "viscosity"],
            Property::Conductivity => &["k", "conductivity"],
            Property::SupersaturationDegree => &["supersaturation_degree"],
            Property::Superheating => &["superheating"],
            Property::Subcooling => &["subcooling"],
            Property::SupersaturationRatio => &["supersaturation_ratio"],
        }
    }

    /// Every property key.
    pub const ALL: [Property; 23] = [
        Property::Temperature,
        Property::Pressure,
        Property::Density,
        Property::Enthalpy,
        Property::Entropy,
        Property::InternalEnergy,
        Property::GibbsEnergy,
        Property::Cp,
        Property::Cv,
        Property::Gamma,
        Property::SpeedOfSound,
        Property::CompressibilityFactor,
        Property::IsothermalCompressibility,
        Property::IsobaricExpansionCoefficient,
        Property::JouleThomson,
        Property::QualityMass,
        Property::QualityVolume,
        Property::Viscosity,
        Property::Conductivity,
        Property::SupersaturationDegree,
        Property::Superheating,
        Property::Subcooling,
        Property::SupersaturationRatio,
    ];
}

impl FromStr for Property {
    type Err = UnknownPropertyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|property| property.names().contains(&name))
            .ok_or_else(|| UnknownPropertyError {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_parse_to_the_same_key() {
        for property in Property::ALL {
            for name in property.names() {
                assert_eq!(name.parse::<Property>(), Ok(property), "alias {name}");
            }
        }
        assert_eq!("d".parse(), Ok(Property::Density));
        assert_eq!("void_fraction".parse(), Ok(Property::QualityVolume));
        assert_eq!("k".parse(), Ok(Property::Conductivity));
    }

    #[test]
    fn names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for property in Property::ALL {
            for name in property.names() {
                assert!(seen.insert(*name), "duplicate name {name}");
            }
        }
    }

    #[test]
    fn unknown_names_fail() {
        let error = "Hmolar".parse::<Property>().unwrap_err();
        assert_eq!(error.name, "Hmolar");
        assert!("".parse::<Property>().is_err());
    }

    #[test]
    fn display_uses_the_canonical_name() {
        assert_eq!(Property::SpeedOfSound.to_string(), "a");
        assert_eq!(Property::Pressure.to_string(), "p");
    }
}
