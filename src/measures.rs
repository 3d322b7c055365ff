//! Intermediate lengths derived from the ratio parameters.

use serde::Serialize;

use crate::ratio::RatioParameters;

/// Lengths and heights computed from `RatioParameters`.
///
/// Recomputed on every reposition; nothing here is cached between calls.
/// Adversarial inputs may yield zero or negative lengths, which are passed
/// through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMeasures {
    /// Length of one head
    pub head_size: f32,
    /// Height of the head joint (bottom of the skull)
    pub head_height: f32,
    pub shoulder_height: f32,
    pub hips_height: f32,
    /// Length of each of the hips, spine and chest segments
    pub hips_spine_chest: f32,
    /// Length of the whole arm, shoulder joint to wrist
    pub arm_length: f32,
    pub half_leg_interval: f32,
    pub knee_height: f32,
}

impl DerivedMeasures {
    pub fn from_params(params: &RatioParameters) -> Self {
        let head_size = params.height / params.heads;
        let head_height = head_size * (params.heads - 1.0);
        let shoulder_height = head_height - head_size * params.neck_length;
        let hips_height = params.crotch_height;

        Self {
            head_size,
            head_height,
            shoulder_height,
            hips_height,
            hips_spine_chest: (shoulder_height - hips_height) / 3.0,
            arm_length: shoulder_height - hips_height,
            half_leg_interval: params.leg_interval / 2.0,
            knee_height: (params.crotch_height - params.ankle_height) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    const TOLERANCE: f32 = 1e-3;

    fn assert_close(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "{} should be {}, got {}",
            what,
            expected,
            actual
        );
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_reference_body() {
        let m = DerivedMeasures::from_params(&RatioParameters::default());

        assert_close(m.head_size, 0.2667, "head_size");
        assert_close(m.head_height, 1.333, "head_height");
        assert_close(m.shoulder_height, 1.307, "shoulder_height");
        assert_eq!(m.hips_height, 0.8);
        assert_close(m.hips_spine_chest, 0.169, "hips_spine_chest");
        assert_close(m.arm_length, 0.507, "arm_length");
        assert_eq!(m.half_leg_interval, 0.05);
        assert_close(m.knee_height, 0.35, "knee_height");
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_same_input_same_bits() {
        let params = RatioParameters {
            height: 1.73,
            heads: 7.5,
            crotch_height: 0.86,
            ..RatioParameters::default()
        };
        let a = DerivedMeasures::from_params(&params);
        let b = DerivedMeasures::from_params(&params);
        assert_eq!(a.head_size.to_bits(), b.head_size.to_bits());
        assert_eq!(a.knee_height.to_bits(), b.knee_height.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_inputs_pass_through() {
        // Ankle above crotch: the knee ends up below the floor
        let params = RatioParameters {
            crotch_height: 0.2,
            ankle_height: 0.6,
            ..RatioParameters::default()
        };
        let m = DerivedMeasures::from_params(&params);
        assert!(m.knee_height < 0.0);

        // Crotch above the shoulders: negative spine and arm lengths
        let params = RatioParameters {
            crotch_height: 1.9,
            ..RatioParameters::default()
        };
        let m = DerivedMeasures::from_params(&params);
        assert!(m.arm_length < 0.0);
        assert!(m.hips_spine_chest < 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        let params = RatioParameters {
            heads: f32::NAN,
            ..RatioParameters::default()
        };
        let m = DerivedMeasures::from_params(&params);
        assert!(m.head_size.is_nan());
        assert!(m.shoulder_height.is_nan());
        // Fields that do not depend on heads stay intact
        assert_eq!(m.hips_height, 0.8);
    }
}
