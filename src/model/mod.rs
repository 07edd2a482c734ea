use std::fmt::Display;

pub mod curves;
pub mod load;
pub mod operating_point;
pub mod source;

pub use self::curves::*;
pub use self::load::*;
pub use self::operating_point::*;
pub use self::source::*;

/// A straight line in the current/voltage plane, evaluated as `U(I)`.
pub trait Characteristic: Display {
    fn voltage_at(&self, current: f64) -> f64;
}
