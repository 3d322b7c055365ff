//! Error types for rig building and repositioning.

use thiserror::Error;

use crate::adapter::TargetKind;

/// Top-level error type for rig operations.
///
/// Every variant is deterministic: retrying the same call with the same
/// inputs fails the same way.
#[derive(Debug, Error)]
pub enum RigError {
    /// The adapter does not wrap an empty armature that bones can be built into.
    #[error("invalid target: expected an empty armature, got {kind:?} holding {bone_count} bone(s)")]
    InvalidTarget { kind: TargetKind, bone_count: usize },

    /// A template bone is absent from the container (topology not built, or renamed).
    #[error("missing bone: {0}")]
    MissingBone(String),

    /// A ratio parameter is NaN or infinite.
    #[error("ratio parameter {field} is not finite: {value}")]
    NotFinite { field: &'static str, value: f32 },

    /// No ratio field matches the given key or label.
    #[error("unknown ratio field: {0}")]
    UnknownField(String),

    /// No bundled preset matches the given name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// JSON parsing or serialisation error.
    #[error("JSON config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = RigError> = std::result::Result<T, E>;
