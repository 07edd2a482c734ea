#[macro_use]
extern crate log;
#[macro_use]
extern crate measure_time;
#[macro_use]
extern crate serde_derive;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod aoi;
pub mod error;
pub mod evaluation;
pub mod input;
pub mod model;
pub mod options;
pub mod render;
pub mod session;
pub mod util;

pub use crate::aoi::AreaOfInterest;
pub use crate::error::{CurveError, CurveResult};
pub use crate::evaluation::{evaluate, power_label, Evaluation};
pub use crate::input::{resolve_load_resistance, LoadSelection};
pub use crate::model::{
    compute_curves, compute_operating_point, compute_short_circuit_current, Curves,
    OperatingPoint, SourceParameters,
};

pub type Result<T> = std::result::Result<T, failure::Error>;
