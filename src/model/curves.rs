use itertools::Itertools;
use itertools_num::linspace;

use crate::error::{positive, CurveError, CurveResult};
use crate::model::{
    compute_short_circuit_current, Characteristic, LoadCharacteristic, SourceParameters,
    CURRENT_OVERSHOOT,
};

pub const DEFAULT_SAMPLE_COUNT: usize = 400;

/// Source and load characteristics sampled over a common current axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curves {
    pub currents: Vec<f64>,
    pub source_voltages: Vec<f64>,
    pub load_voltages: Vec<f64>,
}

impl Curves {
    /// `(current, source voltage, load voltage)` triples.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (f64, f64, f64)> + 'a {
        self.currents
            .iter()
            .cloned()
            .zip(self.source_voltages.iter().cloned())
            .zip(self.load_voltages.iter().cloned())
            .map(|((i, u_source), u_load)| (i, u_source, u_load))
    }

    /// Largest sampled current.
    pub fn max_current(&self) -> f64 {
        self.currents.last().cloned().unwrap_or(0.0)
    }
}

/// Upper end of the current axis: 10% past the short-circuit current.
pub fn max_current(source: &SourceParameters) -> CurveResult<f64> {
    positive(
        "max_current",
        CURRENT_OVERSHOOT * compute_short_circuit_current(source)?,
    )
}

/// `sample_count` evenly spaced currents over `[0, Imax]`, both ends included.
pub fn current_range(source: &SourceParameters, sample_count: usize) -> CurveResult<Vec<f64>> {
    if sample_count < 2 {
        return Err(CurveError::invalid("sample_count", sample_count as f64));
    }
    Ok(linspace(0.0, max_current(source)?, sample_count).collect_vec())
}

pub fn compute_curves(
    source: &SourceParameters,
    load_resistance: f64,
    sample_count: usize,
) -> CurveResult<Curves> {
    debug_time!("compute_curves");
    source.validate()?;
    let load = LoadCharacteristic::new(load_resistance)?;
    let currents = current_range(source, sample_count)?;
    if !load.voltage_at(max_current(source)?).is_finite() {
        return Err(CurveError::invalid("load_resistance", load_resistance));
    }

    // Past Imax / 1.1 the source voltage turns negative; kept for the plot margin.
    let source_line = source.characteristic();
    let source_voltages = currents
        .iter()
        .map(|i| source_line.voltage_at(*i))
        .collect_vec();
    let load_voltages = currents.iter().map(|i| load.voltage_at(*i)).collect_vec();

    Ok(Curves {
        currents,
        source_voltages,
        load_voltages,
    })
}
