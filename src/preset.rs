//! Named ratio presets, validated and embedded at compile time.

use crate::error::{Result, RigError};
use crate::ratio::RatioParameters;

include!(concat!(env!("OUT_DIR"), "/presets.rs"));

impl Preset {
    /// Look up a preset by file stem, ignoring case
    pub fn from_name(name: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| RigError::UnknownPreset(name.to_string()))
    }

    /// Parse the embedded record
    pub fn params(self) -> Result<RatioParameters> {
        RatioParameters::from_json(self.json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::DerivedMeasures;
    use wasm_bindgen_test::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_every_preset_parses_in_range() {
        assert!(Preset::COUNT > 0);
        for preset in Preset::ALL {
            let params = preset.params().unwrap();
            assert!(params.check_finite().is_ok(), "{}", preset.name());
            assert!(params.out_of_range().is_empty(), "{}", preset.name());

            let m = DerivedMeasures::from_params(&params);
            assert!(m.arm_length > 0.0, "{}", preset.name());
            assert!(m.knee_height > 0.0, "{}", preset.name());
        }
    }

    #[test]
    fn test_default_preset_matches_defaults() {
        let preset = Preset::from_name("default").unwrap();
        assert_eq!(preset.params().unwrap(), RatioParameters::default());
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(Preset::from_name("Heroic").unwrap(), Preset::Heroic);
        assert_eq!(Preset::from_name("CHIBI").unwrap(), Preset::Chibi);
    }

    #[test]
    fn test_unknown_preset() {
        let err = Preset::from_name("giant").unwrap_err();
        assert!(matches!(err, RigError::UnknownPreset(ref name) if name == "giant"));
    }
}
