//! Body Ratios - Humanoid Rig Core
//!
//! Builds a named, parented humanoid bone hierarchy and places every bone
//! from seven body measurements. Hosts plug in through `BoneContainer`;
//! `MemoryArmature` is the in-memory host used by the browser bindings.

pub mod adapter;
pub mod armature;
pub mod bone;
pub mod builder;
pub mod error;
pub mod measures;
pub mod positioner;
pub mod preset;
pub mod ratio;
mod ratio_bounds;
pub mod session;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod bindings;
        pub use bindings::{RigEditor, init, preset_names, ratio_fields};
    }
}

pub use adapter::{BoneContainer, EditScope, EditState, TargetKind};
pub use armature::{BoneHandle, BoneSnapshot, MemoryArmature};
pub use bone::{BONE_TEMPLATE, BoneId, BoneSpec, Side};
pub use builder::{build, delete_all, rebuild_topology};
pub use error::{Result, RigError};
pub use glam::Vec3;
pub use measures::DerivedMeasures;
pub use positioner::{BonePlacement, apply, layout, reposition};
pub use preset::Preset;
pub use ratio::{RatioField, RatioParameters, Unit};
pub use ratio_bounds::FieldBounds;
pub use session::RigSession;
