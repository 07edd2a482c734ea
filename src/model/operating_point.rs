use std::fmt::Display;

use crate::error::{normal, positive, CurveError, CurveResult};
use crate::model::SourceParameters;
use crate::util::Engineering;

/// Intersection of the source and load characteristics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperatingPoint {
    pub current: f64,
    pub load_voltage: f64,
    pub internal_voltage_drop: f64,
    pub power: f64,
}

impl OperatingPoint {
    /// Sum of the two voltage drops; equals the open-circuit voltage.
    pub fn total_voltage(&self) -> f64 {
        self.load_voltage + self.internal_voltage_drop
    }
}

impl Display for OperatingPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "I_A\t{}A", Engineering(self.current))?;
        writeln!(f, "U_A\t{}V", Engineering(self.load_voltage))?;
        writeln!(f, "U_i\t{}V", Engineering(self.internal_voltage_drop))?;
        writeln!(f, "P\t{}W", Engineering(self.power))?;
        Ok(())
    }
}

pub fn compute_operating_point(
    source: &SourceParameters,
    load_resistance: f64,
) -> CurveResult<OperatingPoint> {
    source.validate()?;
    let load_resistance = positive("load_resistance", load_resistance)?;

    let total_resistance = source.internal_resistance() + load_resistance;
    if !total_resistance.is_finite() || total_resistance <= 0.0 {
        return Err(CurveError::invalid("total_resistance", total_resistance));
    }

    let current = normal("current", source.open_circuit_voltage() / total_resistance)?;
    let load_voltage = current * load_resistance;
    let internal_voltage_drop = current * source.internal_resistance();
    let power = load_voltage * current;

    trace!(
        "Operating point for RL={}: I={}, U={}, P={}",
        load_resistance,
        current,
        load_voltage,
        power
    );

    Ok(OperatingPoint {
        current,
        load_voltage,
        internal_voltage_drop,
        power,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::CurveError;
    use crate::model::operating_point::compute_operating_point;
    use crate::model::source::source_from_tsv;
    use crate::model::{compute_curves, compute_short_circuit_current, SourceParameters};

    #[test]
    fn reference_operating_point() {
        let source = SourceParameters::new(4.95, 0.496).unwrap();
        let op = compute_operating_point(&source, 2.5).unwrap();
        assert_abs_diff_eq!(op.current, 1.6522, epsilon = 1e-3);
        assert_abs_diff_eq!(op.load_voltage, 4.1305, epsilon = 1e-3);
        assert_abs_diff_eq!(op.internal_voltage_drop, 0.8195, epsilon = 1e-3);
        assert_abs_diff_eq!(op.power, 6.8244, epsilon = 1e-3);
        assert_abs_diff_eq!(
            compute_short_circuit_current(&source).unwrap(),
            9.9798,
            epsilon = 1e-3
        );
    }

    #[test]
    fn voltage_drops_add_up_to_open_circuit_voltage() {
        for &u0 in &[0.1, 1.5, 4.95, 12.0, 230.0] {
            for &ri in &[0.001, 0.2, 0.496, 5.0, 100.0] {
                let source = SourceParameters::new(u0, ri).unwrap();
                for &rl in &[0.001, 0.01, 1.0, 2.5, 10.0, 1000.0] {
                    let op = compute_operating_point(&source, rl).unwrap();
                    assert_relative_eq!(op.total_voltage(), u0, max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn power_is_load_voltage_times_current() {
        let source = SourceParameters::new(12.0, 0.75).unwrap();
        for &rl in &[0.001, 0.5, 0.75, 3.0, 9.999] {
            let op = compute_operating_point(&source, rl).unwrap();
            assert_eq!(op.power, op.load_voltage * op.current);
        }
    }

    #[test]
    fn power_peaks_at_matched_load() {
        let source = SourceParameters::new(4.95, 0.496).unwrap();
        let matched = compute_operating_point(&source, 0.496).unwrap();
        for &rl in &[0.3, 0.45, 0.55, 1.0] {
            assert!(compute_operating_point(&source, rl).unwrap().power < matched.power);
        }
        assert_relative_eq!(matched.load_voltage, 4.95 / 2.0, max_relative = 1e-12);
    }

    #[test]
    fn operating_point_lies_on_both_lines() {
        let source = SourceParameters::new(4.95, 0.496).unwrap();
        let op = compute_operating_point(&source, 2.5).unwrap();
        assert_relative_eq!(op.load_voltage, 4.95 - op.current * 0.496, epsilon = 1e-12);
        assert_relative_eq!(op.load_voltage, op.current * 2.5, epsilon = 1e-12);

        let curves = compute_curves(&source, 2.5, 400).unwrap();
        assert!(op.current < curves.max_current());
    }

    #[test]
    fn non_positive_load_is_rejected() {
        let source = SourceParameters::default();
        assert_eq!(
            compute_operating_point(&source, 0.0),
            Err(CurveError::invalid("load_resistance", 0.0))
        );
        assert!(compute_operating_point(&source, -0.496).is_err());
    }

    #[test]
    fn deserialized_zero_resistance_is_rejected() {
        let broken = source_from_tsv(4.95, 0.0);
        assert_eq!(
            compute_operating_point(&broken, 2.5),
            Err(CurveError::invalid("internal_resistance", 0.0))
        );
        assert_eq!(
            compute_short_circuit_current(&broken),
            Err(CurveError::invalid("internal_resistance", 0.0))
        );
    }

    #[test]
    fn overflowing_total_resistance_is_rejected() {
        let source = SourceParameters::new(1.0, 1e308).unwrap();
        assert_eq!(
            compute_operating_point(&source, 1e308),
            Err(CurveError::invalid("total_resistance", std::f64::INFINITY))
        );
    }

    #[test]
    fn underflowing_current_is_rejected() {
        let source = SourceParameters::new(1e-300, 1e10).unwrap();
        match compute_operating_point(&source, 1e10) {
            Err(CurveError::InvalidParameter { name, .. }) => assert_eq!(name, "current"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
