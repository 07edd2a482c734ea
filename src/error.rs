use failure::Fail;

/// Rejection of a source or load parameter by the curve engine.
#[derive(Clone, Copy, Debug, PartialEq, Fail)]
pub enum CurveError {
    #[fail(display = "invalid parameter {}: {}", name, value)]
    InvalidParameter { name: &'static str, value: f64 },
}

impl CurveError {
    pub fn invalid(name: &'static str, value: f64) -> Self {
        CurveError::InvalidParameter { name, value }
    }
}

pub type CurveResult<T> = std::result::Result<T, CurveError>;

/// Passes `value` through when it is finite and strictly positive.
pub fn positive(name: &'static str, value: f64) -> CurveResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CurveError::invalid(name, value))
    }
}

/// Like [`positive`], but also rejects subnormal values.
///
/// Derived quantities that underflow lose the precision the voltage
/// identity `U_A + U_i = U0` relies on.
pub fn normal(name: &'static str, value: f64) -> CurveResult<f64> {
    if value.is_normal() && value > 0.0 {
        Ok(value)
    } else {
        Err(CurveError::invalid(name, value))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{normal, positive, CurveError};

    #[test]
    fn positive_values_pass_through() {
        assert_eq!(positive("r", 2.5), Ok(2.5));
    }

    #[test]
    fn zero_negative_and_nan_are_rejected() {
        assert_eq!(positive("r", 0.0), Err(CurveError::invalid("r", 0.0)));
        assert_eq!(positive("r", -1.0), Err(CurveError::invalid("r", -1.0)));
        assert!(positive("r", std::f64::NAN).is_err());
        assert!(positive("r", std::f64::INFINITY).is_err());
    }

    #[test]
    fn subnormal_values_are_not_normal() {
        assert_eq!(normal("i", 1.0e-3), Ok(1.0e-3));
        assert!(positive("i", 1.0e-310).is_ok());
        assert_eq!(normal("i", 1.0e-310), Err(CurveError::invalid("i", 1.0e-310)));
        assert!(normal("i", 0.0).is_err());
        assert!(normal("i", std::f64::INFINITY).is_err());
    }

    #[test]
    fn message_names_the_parameter() {
        assert_eq!(
            CurveError::invalid("internal_resistance", 0.0).to_string(),
            "invalid parameter internal_resistance: 0"
        );
    }
}
