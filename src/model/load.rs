use std::fmt::Display;

use crate::error::{positive, CurveError, CurveResult};
use crate::model::Characteristic;
use crate::util::Engineering;

pub const DEFAULT_LOAD_RESISTANCE: f64 = 2.5;

/// `U(I) = I * RL`
#[derive(Clone, Copy, Debug)]
pub struct LoadCharacteristic {
    load_resistance: f64,
}

impl LoadCharacteristic {
    pub fn new(load_resistance: f64) -> CurveResult<Self> {
        Ok(LoadCharacteristic {
            load_resistance: positive("load_resistance", load_resistance)?,
        })
    }
}

impl Characteristic for LoadCharacteristic {
    fn voltage_at(&self, current: f64) -> f64 {
        current * self.load_resistance
    }
}

impl Display for LoadCharacteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "R_L\t{}Ω", Engineering(self.load_resistance))
    }
}

/// Closed interval the load resistance input is forced into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadResistanceRange {
    pub min: f64,
    pub max: f64,
}

impl LoadResistanceRange {
    pub fn new(min: f64, max: f64) -> CurveResult<Self> {
        let min = positive("min_load_resistance", min)?;
        let max = positive("max_load_resistance", max)?;
        if max < min {
            return Err(CurveError::invalid("max_load_resistance", max));
        }
        Ok(LoadResistanceRange { min, max })
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Out-of-range values are rejected rather than clamped.
    pub fn check(&self, value: f64) -> CurveResult<f64> {
        if value.is_finite() && self.contains(value) {
            Ok(value)
        } else {
            Err(CurveError::invalid("load_resistance", value))
        }
    }
}

impl Default for LoadResistanceRange {
    fn default() -> Self {
        LoadResistanceRange {
            min: 0.001,
            max: 10.0,
        }
    }
}
