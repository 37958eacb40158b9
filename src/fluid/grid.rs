use crate::thermo::{FluidState, InputPair, Property, PropertyBackend, PropertyError};

use super::Fluid;

/// States evaluated on the mesh of two input ranges.
///
/// Row `j` holds the states at `ys[j]`, column `i` the states at `xs[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    states: Vec<Vec<FluidState>>,
}

impl StateGrid {
    /// Values of the first input, one per column.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Values of the second input, one per row.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn states(&self) -> &[Vec<FluidState>] {
        &self.states
    }

    /// Returns the state at row `row` and column `col`.
    pub fn get(&self, row: usize, col: usize) -> Option<&FluidState> {
        self.states.get(row)?.get(col)
    }

    /// Returns `property` at every grid point, row-major.
    pub fn property(&self, property: Property) -> Vec<Vec<f64>> {
        self.states
            .iter()
            .map(|row| row.iter().map(|state| state.get(property)).collect())
            .collect()
    }
}

impl<B: PropertyBackend> Fluid<B> {
    /// Evaluates `pair` on every combination of `xs` (first input) and `ys`
    /// (second input).
    ///
    /// # Errors
    ///
    /// With exceptions enabled, returns the first [`PropertyError`].
    pub fn states_grid(
        &self,
        pair: InputPair,
        xs: &[f64],
        ys: &[f64],
    ) -> Result<StateGrid, PropertyError> {
        let states = ys
            .iter()
            .map(|&y| {
                xs.iter()
                    .map(|&x| self.state_or_undefined(pair, x, y))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StateGrid {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            states,
        })
    }
}
