use std::fmt::Display;

use crate::error::{normal, positive, CurveError, CurveResult};
use crate::model::Characteristic;
use crate::util::Engineering;

pub const DEFAULT_OPEN_CIRCUIT_VOLTAGE: f64 = 4.95;
pub const DEFAULT_INTERNAL_RESISTANCE: f64 = 0.496;

/// Margin the current axis extends past the short-circuit current.
pub const CURRENT_OVERSHOOT: f64 = 1.1;

/// Margin the voltage axis extends above the open-circuit voltage.
pub const VOLTAGE_HEADROOM: f64 = 1.1;

/// Open-circuit voltage and internal resistance of a real voltage source.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SourceParameters {
    open_circuit_voltage: f64,
    internal_resistance: f64,
}

impl SourceParameters {
    pub fn new(open_circuit_voltage: f64, internal_resistance: f64) -> CurveResult<Self> {
        Ok(SourceParameters {
            open_circuit_voltage: positive("open_circuit_voltage", open_circuit_voltage)?,
            internal_resistance: positive("internal_resistance", internal_resistance)?,
        })
    }

    pub fn open_circuit_voltage(&self) -> f64 {
        self.open_circuit_voltage
    }

    pub fn internal_resistance(&self) -> f64 {
        self.internal_resistance
    }

    /// Re-checks the positivity contract.
    ///
    /// Values deserialized from outside bypass [`SourceParameters::new`],
    /// so every engine entry point validates again. The top of the voltage
    /// axis, `1.1 * U0`, must stay finite as well.
    pub fn validate(&self) -> CurveResult<()> {
        positive("open_circuit_voltage", self.open_circuit_voltage)?;
        positive("internal_resistance", self.internal_resistance)?;
        if !(VOLTAGE_HEADROOM * self.open_circuit_voltage).is_finite() {
            return Err(CurveError::invalid(
                "open_circuit_voltage",
                self.open_circuit_voltage,
            ));
        }
        Ok(())
    }

    pub fn characteristic(&self) -> SourceCharacteristic {
        SourceCharacteristic { source: *self }
    }
}

impl Default for SourceParameters {
    fn default() -> Self {
        SourceParameters {
            open_circuit_voltage: DEFAULT_OPEN_CIRCUIT_VOLTAGE,
            internal_resistance: DEFAULT_INTERNAL_RESISTANCE,
        }
    }
}

/// `U(I) = U0 - I * Ri`
#[derive(Clone, Copy, Debug)]
pub struct SourceCharacteristic {
    source: SourceParameters,
}

impl Characteristic for SourceCharacteristic {
    fn voltage_at(&self, current: f64) -> f64 {
        self.source.open_circuit_voltage - current * self.source.internal_resistance
    }
}

impl Display for SourceCharacteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "U_0\t{}V", Engineering(self.source.open_circuit_voltage))?;
        writeln!(f, "R_i\t{}Ω", Engineering(self.source.internal_resistance))?;
        Ok(())
    }
}

/// Current drawn with the terminals shorted, `U0 / Ri`.
pub fn compute_short_circuit_current(source: &SourceParameters) -> CurveResult<f64> {
    source.validate()?;
    normal(
        "short_circuit_current",
        source.open_circuit_voltage / source.internal_resistance,
    )
}

/// Builds parameters through serde, skipping the validating constructor.
#[cfg(test)]
pub(crate) fn source_from_tsv(u0: f64, ri: f64) -> SourceParameters {
    let data = format!("open_circuit_voltage\tinternal_resistance\n{}\t{}\n", u0, ri);
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(data.as_bytes());
    rdr.deserialize().next().unwrap().unwrap()
}

#[cfg(test)]
mod tests {
    use crate::error::CurveError;
    use crate::model::source::{
        compute_short_circuit_current, source_from_tsv, SourceParameters,
    };
    use crate::model::Characteristic;

    #[test]
    fn zero_internal_resistance_is_rejected() {
        assert_eq!(
            SourceParameters::new(4.95, 0.0),
            Err(CurveError::invalid("internal_resistance", 0.0))
        );
    }

    #[test]
    fn negative_voltage_is_rejected() {
        assert!(SourceParameters::new(-1.0, 0.5).is_err());
    }

    #[test]
    fn short_circuit_current_of_default_source() {
        let i_k = compute_short_circuit_current(&SourceParameters::default()).unwrap();
        assert_abs_diff_eq!(i_k, 9.9798, epsilon = 1e-3);
    }

    #[test]
    fn deserialized_zero_resistance_has_no_short_circuit_current() {
        assert_eq!(
            compute_short_circuit_current(&source_from_tsv(4.95, 0.0)),
            Err(CurveError::invalid("internal_resistance", 0.0))
        );
    }

    #[test]
    fn overflowing_short_circuit_current_is_rejected() {
        let source = SourceParameters::new(1e300, 1e-10).unwrap();
        match compute_short_circuit_current(&source) {
            Err(CurveError::InvalidParameter { name, value }) => {
                assert_eq!(name, "short_circuit_current");
                assert!(value.is_infinite());
            }
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn underflowing_short_circuit_current_is_rejected() {
        let source = SourceParameters::new(1e-300, 1e300).unwrap();
        assert!(compute_short_circuit_current(&source).is_err());
    }

    #[test]
    fn voltage_without_headroom_is_rejected() {
        let source = source_from_tsv(std::f64::MAX, 1.0);
        assert_eq!(
            source.validate(),
            Err(CurveError::invalid("open_circuit_voltage", std::f64::MAX))
        );
    }

    #[test]
    fn characteristic_starts_at_open_circuit_voltage() {
        let source = SourceParameters::new(12.0, 2.0).unwrap();
        let line = source.characteristic();
        assert_eq!(line.voltage_at(0.0), 12.0);
        assert_eq!(line.voltage_at(6.0), 0.0);
        assert!(line.voltage_at(6.6) < 0.0);
    }
}
