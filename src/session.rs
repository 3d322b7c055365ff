//! Rig session: one armature plus the ratio parameters that shape it.
//!
//! Every parameter change goes through the session, which validates it,
//! stores it and repositions the bones if the rig has been built. The
//! session owns its container outright; there is no global rig lookup.

use crate::adapter::{BoneContainer, TargetKind};
use crate::armature::{BoneSnapshot, MemoryArmature};
use crate::builder;
use crate::error::{Result, RigError};
use crate::measures::DerivedMeasures;
use crate::positioner;
use crate::preset::Preset;
use crate::ratio::{RatioField, RatioParameters};

/// Name of the armature `create_human` makes
pub const HUMAN_ARMATURE: &str = "human";

pub struct RigSession<C: BoneContainer = MemoryArmature> {
    container: C,
    params: RatioParameters,
}

impl<C: BoneContainer> RigSession<C> {
    /// Wrap an existing container with default parameters. Nothing is built
    /// or moved until asked.
    pub fn new(container: C) -> Self {
        Self {
            container,
            params: RatioParameters::default(),
        }
    }

    pub fn params(&self) -> RatioParameters {
        self.params
    }

    pub fn measures(&self) -> DerivedMeasures {
        DerivedMeasures::from_params(&self.params)
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn into_container(self) -> C {
        self.container
    }

    /// True when the container holds bones to reposition
    pub fn has_topology(&self) -> bool {
        self.container.bone_count() > 0
    }

    /// Remove every bone
    pub fn delete_bones(&mut self) -> Result<()> {
        builder::delete_all(&mut self.container)
    }

    /// Build the template into the (empty) container and place it for the
    /// current parameters
    pub fn create_bones(&mut self) -> Result<()> {
        builder::build(&mut self.container)?;
        positioner::apply(&mut self.container, &self.params)
    }

    /// Replace all parameters.
    ///
    /// NaN or infinite values are rejected and leave the session unchanged,
    /// as does a failed reposition. Out-of-range values are accepted with a
    /// warning.
    pub fn set_params(&mut self, params: RatioParameters) -> Result<()> {
        params.check_finite()?;

        for field in params.out_of_range() {
            let bounds = field.bounds();
            log::warn!(
                "{} = {} is outside [{}, {}], rig may be degenerate",
                field.key(),
                params.get(field),
                bounds.min,
                bounds.max
            );
        }

        if self.has_topology() {
            positioner::apply(&mut self.container, &params)?;
        }
        self.params = params;
        Ok(())
    }

    /// Change one field, looked up by JSON key, label or snake_case name
    pub fn set_field(&mut self, name: &str, value: f32) -> Result<()> {
        let field =
            RatioField::from_name(name).ok_or_else(|| RigError::UnknownField(name.to_string()))?;
        self.set_params(self.params.with(field, value))
    }

    /// Replace the parameters from a JSON config record
    pub fn load_config_json(&mut self, json: &str) -> Result<()> {
        let params = RatioParameters::from_json(json)?;
        self.set_params(params)
    }

    /// Current parameters as a JSON config record
    pub fn config_json(&self) -> Result<String> {
        self.params.to_json_string()
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        let preset = Preset::from_name(name)?;
        log::info!("applying preset '{}'", preset.name());
        self.set_params(preset.params()?)
    }

    /// Turn an existing armature into a human rig: clear whatever bones it
    /// holds, build the template and shape it from `config_json`.
    ///
    /// Fails with `InvalidTarget` before touching anything if the container
    /// is not an armature.
    pub fn human_from(container: C, config_json: &str) -> Result<Self> {
        let params = RatioParameters::from_json(config_json)?;
        params.check_finite()?;

        let kind = container.target_kind();
        if kind != TargetKind::Armature {
            return Err(RigError::InvalidTarget {
                kind,
                bone_count: container.bone_count(),
            });
        }

        let mut session = Self::new(container);
        builder::rebuild_topology(&mut session.container)?;
        session.set_params(params)?;
        log::info!(
            "built human rig ({:.2}m, {:.1} heads)",
            params.height,
            params.heads
        );
        Ok(session)
    }
}

impl RigSession<MemoryArmature> {
    /// Create a fresh "human" armature, build the full rig into it and shape
    /// it from `config_json`. Names are shown and X-mirrored editing is on.
    pub fn create_human(config_json: &str) -> Result<Self> {
        let mut armature = MemoryArmature::new(HUMAN_ARMATURE);
        armature.show_names = true;
        armature.mirror_x = true;
        Self::human_from(armature, config_json)
    }

    /// All bones, template order first
    pub fn snapshot(&self) -> Vec<BoneSnapshot> {
        self.container.snapshot()
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(self.container.snapshot_json()?)
    }
}
