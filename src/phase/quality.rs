use crate::fluid::Fluid;
use crate::thermo::{FluidState, InputPair, PropertyBackend, PropertyError};

use super::line::linspace;

/// States of constant vapor quality.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityIsoline {
    pub quality: f64,
    pub states: Vec<FluidState>,
}

/// Lines of constant quality under the two-phase dome, one per entry of
/// `qualities`, each with `n` states from the triple point to the critical
/// point.
///
/// # Errors
///
/// Returns [`PropertyError`] if `n < 2`, a quality lies outside `[0, 1]`, or
/// a state fails.
pub fn quality_isolines<B: PropertyBackend>(
    fluid: &Fluid<B>,
    qualities: &[f64],
    n: usize,
) -> Result<Vec<QualityIsoline>, PropertyError> {
    let c = fluid.constants();
    let temperatures = linspace(c.t_triple, c.t_crit, n)?;

    qualities
        .iter()
        .map(|&quality| {
            if !(0.0..=1.0).contains(&quality) {
                return Err(PropertyError::out_of_domain(format!(
                    "quality {quality} outside [0, 1]"
                )));
            }
            let mut states = temperatures[..n - 1]
                .iter()
                .map(|&temperature| fluid.state(InputPair::QT, quality, temperature))
                .collect::<Result<Vec<_>, _>>()?;
            states.push(fluid.critical_point().clone());
            Ok(QualityIsoline { quality, states })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{fluid::test_support::co2, thermo::Property};

    #[test]
    fn lines_lie_between_the_saturation_branches() -> Result<(), PropertyError> {
        let fluid = co2();
        let lines = quality_isolines(&fluid, &[0.0, 0.25, 0.75, 1.0], 10)?;
        assert_eq!(lines.len(), 4);

        for i in 0..9 {
            let entropy: Vec<f64> = lines
                .iter()
                .map(|line| line.states[i].get(Property::Entropy))
                .collect();
            assert!(entropy.windows(2).all(|w| w[0] < w[1]));
        }
        for line in &lines {
            assert_eq!(line.states.len(), 10);
            assert_relative_eq!(
                line.states[0].get(Property::QualityMass),
                line.quality,
                epsilon = 1e-12
            );
            let critical = fluid.critical_point();
            assert_eq!(line.states[9].temperature, critical.temperature);
            assert_eq!(line.states[9].density, critical.density);
        }
        Ok(())
    }

    #[test]
    fn rejects_invalid_quality() {
        assert!(matches!(
            quality_isolines(&co2(), &[0.5, 1.5], 5),
            Err(PropertyError::OutOfDomain { .. })
        ));
    }
}
