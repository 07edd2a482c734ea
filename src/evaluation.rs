use crate::aoi::AreaOfInterest;
use crate::error::CurveResult;
use crate::model::{
    compute_curves, compute_operating_point, compute_short_circuit_current, Curves,
    OperatingPoint, SourceParameters,
};

/// Everything a renderer needs for one load resistance.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub source: SourceParameters,
    pub load_resistance: f64,
    pub curves: Curves,
    pub operating_point: OperatingPoint,
    pub short_circuit_current: f64,
    pub area_of_interest: AreaOfInterest,
}

impl Evaluation {
    pub fn power_label(&self) -> String {
        power_label(&self.operating_point)
    }
}

pub fn power_label(operating_point: &OperatingPoint) -> String {
    format!("{:.2} W", operating_point.power)
}

/// Runs the whole engine; nothing is returned unless every step succeeds.
pub fn evaluate(
    source: &SourceParameters,
    load_resistance: f64,
    sample_count: usize,
) -> CurveResult<Evaluation> {
    let curves = compute_curves(source, load_resistance, sample_count)?;
    let operating_point = compute_operating_point(source, load_resistance)?;
    let short_circuit_current = compute_short_circuit_current(source)?;
    let area_of_interest = AreaOfInterest::for_source(source)?;

    debug!(
        "Evaluated RL={} over {} samples: P={}",
        load_resistance,
        curves.currents.len(),
        operating_point.power
    );

    Ok(Evaluation {
        source: *source,
        load_resistance,
        curves,
        operating_point,
        short_circuit_current,
        area_of_interest,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::CurveError;
    use crate::evaluation::evaluate;
    use crate::model::SourceParameters;

    #[test]
    fn power_label_has_two_decimals() {
        let evaluation = evaluate(&SourceParameters::default(), 2.5, 400).unwrap();
        assert_eq!(evaluation.power_label(), "6.82 W");
    }

    #[test]
    fn evaluation_bundles_all_outputs() {
        let evaluation = evaluate(&SourceParameters::default(), 2.5, 10).unwrap();
        assert_eq!(evaluation.curves.currents.len(), 10);
        assert_eq!(evaluation.load_resistance, 2.5);
        assert_abs_diff_eq!(evaluation.short_circuit_current, 9.9798, epsilon = 1e-3);
        assert_relative_eq!(
            evaluation.area_of_interest.max_i,
            evaluation.curves.max_current(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn invalid_input_yields_no_partial_result() {
        assert_eq!(
            evaluate(&SourceParameters::default(), 0.0, 400),
            Err(CurveError::invalid("load_resistance", 0.0))
        );
        assert!(evaluate(&SourceParameters::default(), 2.5, 0).is_err());
    }
}
