use crate::thermo::{FluidState, Property, PropertyError};

/// A two-branch curve that meets at the critical point.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseLine {
    pub liquid: Vec<FluidState>,
    pub vapor: Vec<FluidState>,
}

impl PhaseLine {
    /// Values of `property` along the liquid branch.
    pub fn liquid_values(&self, property: Property) -> Vec<f64> {
        self.liquid.iter().map(|state| state.get(property)).collect()
    }

    /// Values of `property` along the vapor branch.
    pub fn vapor_values(&self, property: Property) -> Vec<f64> {
        self.vapor.iter().map(|state| state.get(property)).collect()
    }

    /// Values of `property` around the whole curve.
    ///
    /// Runs up the liquid branch and back down the vapor branch, visiting
    /// the shared critical point once.
    pub fn dome_values(&self, property: Property) -> Vec<f64> {
        let vapor = self.vapor.iter().rev().skip(1);
        self.liquid
            .iter()
            .chain(vapor)
            .map(|state| state.get(property))
            .collect()
    }
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub(super) fn linspace(start: f64, end: f64, n: usize) -> Result<Vec<f64>, PropertyError> {
    if n < 2 {
        return Err(PropertyError::invalid_state(format!(
            "a line needs at least 2 points, got {n}"
        )));
    }
    let step = (end - start) / (n - 1) as f64;
    Ok((0..n)
        .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() -> Result<(), PropertyError> {
        assert_eq!(linspace(1.0, 2.0, 5)?, [1.0, 1.25, 1.5, 1.75, 2.0]);
        assert_eq!(linspace(0.1, 0.3, 2)?, [0.1, 0.3]);
        assert!(linspace(0.0, 1.0, 1).is_err());
        assert!(linspace(0.0, 1.0, 0).is_err());
        Ok(())
    }

    #[test]
    fn dome_visits_the_critical_point_once() {
        let at = |temperature: f64| FluidState {
            temperature,
            ..FluidState::undefined()
        };
        let line = PhaseLine {
            liquid: vec![at(1.0), at(2.0), at(3.0)],
            vapor: vec![at(1.5), at(2.5), at(3.0)],
        };

        assert_eq!(line.liquid_values(Property::Temperature), [1.0, 2.0, 3.0]);
        assert_eq!(line.vapor_values(Property::Temperature), [1.5, 2.5, 3.0]);
        assert_eq!(
            line.dome_values(Property::Temperature),
            [1.0, 2.0, 3.0, 2.5, 1.5]
        );
    }
}
