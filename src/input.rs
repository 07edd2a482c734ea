use crate::error::CurveResult;
use crate::model::{LoadResistanceRange, DEFAULT_LOAD_RESISTANCE};

/// Picks the load resistance an evaluation runs with.
///
/// A confirmed numeric entry wins over the continuous slider value.
pub fn resolve_load_resistance(slider: f64, entry: f64, confirmed: bool) -> f64 {
    if confirmed {
        entry
    } else {
        slider
    }
}

/// The two competing load resistance inputs and whether the entry was confirmed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadSelection {
    pub slider: f64,
    pub entry: f64,
    pub confirmed: bool,
}

impl LoadSelection {
    pub fn new(slider: f64, entry: f64, confirmed: bool) -> Self {
        LoadSelection {
            slider,
            entry,
            confirmed,
        }
    }

    /// Both candidates must lie in `range`, whichever one ends up being used.
    pub fn resolve(&self, range: &LoadResistanceRange) -> CurveResult<f64> {
        range.check(self.slider)?;
        range.check(self.entry)?;
        Ok(resolve_load_resistance(self.slider, self.entry, self.confirmed))
    }
}

impl Default for LoadSelection {
    fn default() -> Self {
        LoadSelection::new(DEFAULT_LOAD_RESISTANCE, DEFAULT_LOAD_RESISTANCE, false)
    }
}
