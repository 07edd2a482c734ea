use crate::error::CurveResult;
use crate::model::{max_current, SourceParameters, VOLTAGE_HEADROOM};

/// Plot window in the current/voltage plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AreaOfInterest {
    pub min_i: f64,
    pub max_i: f64,
    pub min_v: f64,
    pub max_v: f64,
}

impl AreaOfInterest {
    pub fn new_pos_i_pos_v(i: f64, v: f64) -> Self {
        Self {
            min_i: 0.0,
            max_i: i,
            min_v: 0.0,
            max_v: v,
        }
    }

    /// Whole current axis, voltage axis with 10% headroom above U0.
    pub fn for_source(source: &SourceParameters) -> CurveResult<Self> {
        Ok(Self::new_pos_i_pos_v(
            max_current(source)?,
            source.open_circuit_voltage() * VOLTAGE_HEADROOM,
        ))
    }

    pub fn i_span(&self) -> f64 {
        self.max_i - self.min_i
    }

    pub fn v_span(&self) -> f64 {
        self.max_v - self.min_v
    }

    pub fn contains(&self, i: f64, v: f64) -> bool {
        self.min_i <= i && i <= self.max_i && self.min_v <= v && v <= self.max_v
    }
}

#[cfg(test)]
mod tests {
    use crate::aoi::AreaOfInterest;
    use crate::model::{compute_operating_point, SourceParameters};

    #[test]
    fn window_matches_axis_limits() {
        let source = SourceParameters::new(4.95, 0.496).unwrap();
        let aoi = AreaOfInterest::for_source(&source).unwrap();
        assert_eq!(aoi.min_i, 0.0);
        assert_eq!(aoi.min_v, 0.0);
        assert_relative_eq!(aoi.max_i, 1.1 * 4.95 / 0.496, max_relative = 1e-12);
        assert_relative_eq!(aoi.max_v, 1.1 * 4.95, max_relative = 1e-12);
    }

    #[test]
    fn operating_point_is_always_visible() {
        let source = SourceParameters::default();
        let aoi = AreaOfInterest::for_source(&source).unwrap();
        for &rl in &[0.001, 0.496, 2.5, 10.0] {
            let op = compute_operating_point(&source, rl).unwrap();
            assert!(aoi.contains(op.current, op.load_voltage));
        }
    }
}
