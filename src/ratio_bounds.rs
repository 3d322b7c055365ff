//! Shared ratio bounds used by both build.rs and runtime code.
//!
//! This module is included by both the build script (to validate the bundled
//! presets) and the `ratio` module, so preset validation at compile time and
//! range reporting at runtime can never disagree.

// Some items are only used by build.rs
#![allow(dead_code)]

/// Numeric range of a single ratio field.
///
/// `min_exclusive` marks fields whose lower bound is open, e.g. height (0.1, 2.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    /// JSON key of the field
    pub key: &'static str,
    pub min: f32,
    pub max: f32,
    pub min_exclusive: bool,
    /// Value used when the key is missing from a config record
    pub default: f32,
}

impl FieldBounds {
    /// True when `value` lies inside the range (NaN is never inside).
    pub fn contains(&self, value: f32) -> bool {
        let above_min = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        above_min && value <= self.max
    }
}

pub const HEIGHT: FieldBounds = FieldBounds {
    key: "height",
    min: 0.1,
    max: 2.0,
    min_exclusive: true,
    default: 1.6,
};

pub const HEADS: FieldBounds = FieldBounds {
    key: "heads",
    min: 2.0,
    max: 10.0,
    min_exclusive: false,
    default: 6.0,
};

pub const CROTCH_HEIGHT: FieldBounds = FieldBounds {
    key: "crotchHeight",
    min: 0.1,
    max: 2.0,
    min_exclusive: true,
    default: 0.8,
};

pub const NECK_LENGTH: FieldBounds = FieldBounds {
    key: "neckLength",
    min: 0.01,
    max: 1.0,
    min_exclusive: true,
    default: 0.1,
};

pub const LEG_INTERVAL: FieldBounds = FieldBounds {
    key: "legInterval",
    min: 0.01,
    max: 1.0,
    min_exclusive: true,
    default: 0.1,
};

pub const SHOULDER_WIDTH: FieldBounds = FieldBounds {
    key: "shoulderWidth",
    min: 0.01,
    max: 1.0,
    min_exclusive: true,
    default: 0.3,
};

pub const ANKLE_HEIGHT: FieldBounds = FieldBounds {
    key: "ankleHeight",
    min: 0.01,
    max: 1.0,
    min_exclusive: true,
    default: 0.1,
};

/// All bounds in config-record order.
pub const ALL_BOUNDS: [FieldBounds; 7] = [
    HEIGHT,
    HEADS,
    CROTCH_HEIGHT,
    NECK_LENGTH,
    LEG_INTERVAL,
    SHOULDER_WIDTH,
    ANKLE_HEIGHT,
];
