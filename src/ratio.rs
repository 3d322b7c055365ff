//! Ratio parameters: the seven anthropometric inputs that drive the rig.
//!
//! The persisted shape is a flat JSON object with one number per field.
//! Missing keys fall back to the defaults, and the key names of the older
//! add-on configs are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RigError};
use crate::ratio_bounds::{self, FieldBounds};

/// The seven independent body measurements, in meters unless noted.
///
/// No cross-field invariant is enforced here: combinations such as
/// `ankle_height >= crotch_height` are accepted and simply produce a
/// degenerate rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatioParameters {
    /// Total body height
    #[serde(alias = "height_meter")]
    pub height: f32,
    /// Body height measured in head lengths (unitless)
    pub heads: f32,
    /// Height of the crotch above the floor
    #[serde(alias = "crotch_height_meter", alias = "crotch_height")]
    pub crotch_height: f32,
    /// Neck length, as a fraction of one head length
    #[serde(alias = "neck_meter", alias = "neck_len", alias = "neck_length")]
    pub neck_length: f32,
    /// Distance between the two hip joints
    #[serde(alias = "leg_interval_meter", alias = "leg_interval")]
    pub leg_interval: f32,
    /// Distance between the two upper arm heads, minus the clavicles
    #[serde(alias = "shoulder_width_meter", alias = "shoulder_width")]
    pub shoulder_width: f32,
    /// Height of the ankle joint above the floor
    #[serde(alias = "ankle_height_meter", alias = "ankle", alias = "ankle_height")]
    pub ankle_height: f32,
}

impl Default for RatioParameters {
    fn default() -> Self {
        Self {
            height: ratio_bounds::HEIGHT.default,
            heads: ratio_bounds::HEADS.default,
            crotch_height: ratio_bounds::CROTCH_HEIGHT.default,
            neck_length: ratio_bounds::NECK_LENGTH.default,
            leg_interval: ratio_bounds::LEG_INTERVAL.default,
            shoulder_width: ratio_bounds::SHOULDER_WIDTH.default,
            ankle_height: ratio_bounds::ANKLE_HEIGHT.default,
        }
    }
}

/// Display unit of a ratio field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Length,
    None,
}

/// Identifies one of the seven ratio fields, with the metadata a property
/// panel needs to present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatioField {
    Height,
    Heads,
    CrotchHeight,
    NeckLength,
    LegInterval,
    ShoulderWidth,
    AnkleHeight,
}

impl RatioField {
    pub const COUNT: usize = 7;

    /// Fields in panel order
    pub const ALL: [RatioField; Self::COUNT] = [
        RatioField::Height,
        RatioField::Heads,
        RatioField::CrotchHeight,
        RatioField::NeckLength,
        RatioField::ShoulderWidth,
        RatioField::LegInterval,
        RatioField::AnkleHeight,
    ];

    pub fn bounds(self) -> &'static FieldBounds {
        match self {
            RatioField::Height => &ratio_bounds::HEIGHT,
            RatioField::Heads => &ratio_bounds::HEADS,
            RatioField::CrotchHeight => &ratio_bounds::CROTCH_HEIGHT,
            RatioField::NeckLength => &ratio_bounds::NECK_LENGTH,
            RatioField::LegInterval => &ratio_bounds::LEG_INTERVAL,
            RatioField::ShoulderWidth => &ratio_bounds::SHOULDER_WIDTH,
            RatioField::AnkleHeight => &ratio_bounds::ANKLE_HEIGHT,
        }
    }

    /// JSON key of the field
    #[inline]
    pub fn key(self) -> &'static str {
        self.bounds().key
    }

    /// Panel label
    pub fn label(self) -> &'static str {
        match self {
            RatioField::Height => "HeightMeter",
            RatioField::Heads => "TotalHeightHeads",
            RatioField::CrotchHeight => "CrotchHeightMeter",
            RatioField::NeckLength => "NeckLengthMeter",
            RatioField::LegInterval => "LegIntervalMeter",
            RatioField::ShoulderWidth => "ShoulderWidthMeter",
            RatioField::AnkleHeight => "AnkleHeightMeter",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            RatioField::Heads => Unit::None,
            _ => Unit::Length,
        }
    }

    /// Increment applied by one step of a slider
    pub fn step(self) -> f32 {
        match self {
            RatioField::Heads => 0.1,
            _ => 0.01,
        }
    }

    /// Decimal places shown
    pub fn precision(self) -> u8 {
        match self {
            RatioField::Heads => 1,
            _ => 2,
        }
    }

    /// Narrower range a slider drags within, when it differs from the hard bounds
    pub fn soft_range(self) -> Option<(f32, f32)> {
        match self {
            RatioField::Height => Some((1.0, 1.9)),
            _ => None,
        }
    }

    /// Resolve a field from its JSON key, panel label or snake_case name
    pub fn from_name(name: &str) -> Option<RatioField> {
        RatioField::ALL.into_iter().find(|field| {
            field.key() == name
                || field.label() == name
                || field.snake_name() == name
        })
    }

    fn snake_name(self) -> &'static str {
        match self {
            RatioField::Height => "height",
            RatioField::Heads => "heads",
            RatioField::CrotchHeight => "crotch_height",
            RatioField::NeckLength => "neck_length",
            RatioField::LegInterval => "leg_interval",
            RatioField::ShoulderWidth => "shoulder_width",
            RatioField::AnkleHeight => "ankle_height",
        }
    }
}

impl RatioParameters {
    pub fn get(&self, field: RatioField) -> f32 {
        match field {
            RatioField::Height => self.height,
            RatioField::Heads => self.heads,
            RatioField::CrotchHeight => self.crotch_height,
            RatioField::NeckLength => self.neck_length,
            RatioField::LegInterval => self.leg_interval,
            RatioField::ShoulderWidth => self.shoulder_width,
            RatioField::AnkleHeight => self.ankle_height,
        }
    }

    /// Return a copy with one field replaced (Functional Set)
    pub fn with(self, field: RatioField, value: f32) -> Self {
        let mut params = self;
        let slot = match field {
            RatioField::Height => &mut params.height,
            RatioField::Heads => &mut params.heads,
            RatioField::CrotchHeight => &mut params.crotch_height,
            RatioField::NeckLength => &mut params.neck_length,
            RatioField::LegInterval => &mut params.leg_interval,
            RatioField::ShoulderWidth => &mut params.shoulder_width,
            RatioField::AnkleHeight => &mut params.ankle_height,
        };
        *slot = value;
        params
    }

    /// Reject NaN and infinite inputs before they reach the geometry
    pub fn check_finite(&self) -> Result<()> {
        for field in RatioField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(RigError::NotFinite {
                    field: field.key(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Fields whose value lies outside their documented range.
    ///
    /// Out-of-range values are still processed; this is for reporting only.
    pub fn out_of_range(&self) -> Vec<RatioField> {
        RatioField::ALL
            .into_iter()
            .filter(|field| !field.bounds().contains(self.get(*field)))
            .collect()
    }

    /// Clamp every field into its closed `[min, max]` range, the way a
    /// property slider would. NaN stays NaN.
    pub fn clamped(self) -> Self {
        RatioField::ALL.into_iter().fold(self, |params, field| {
            let bounds = field.bounds();
            params.with(field, params.get(field).clamp(bounds.min, bounds.max))
        })
    }

    /// Parse from a JSON config record
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert to a pretty JSON config record
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
