use num_traits::Float;
use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;
use std::fmt::Write;

/// Formats a quantity with an SI prefix and three decimals, e.g. `496.000m`.
pub struct Engineering<N: Float>(pub N);

impl<N: Float + Display> Display for Engineering<N> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        if self.0.is_zero() || !self.0.is_finite() {
            return write!(f, "{}", self.0);
        }
        let three = N::from(3).ok_or(Error)?;
        let exp = (self.0.abs().log10() / three)
            .floor()
            .to_i32()
            .ok_or(Error)?
            * 3;
        let mantissa = self.0 / N::from(10).ok_or(Error)?.powi(exp);
        write!(f, "{:.3}", mantissa)?;
        match exp {
            0 => {}
            -3 => f.write_char('m')?,
            -6 => f.write_char('µ')?,
            -9 => f.write_char('n')?,
            -12 => f.write_char('p')?,
            3 => f.write_char('k')?,
            6 => f.write_char('M')?,
            9 => f.write_char('G')?,
            exp => write!(f, "e{}", exp)?,
        }
        Ok(())
    }
}
