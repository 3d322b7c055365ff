//! Skeleton positioner: places every template bone for a given body.
//!
//! Coordinates are right-handed with X pointing to the rig's left, Y
//! forward/back and Z up. Left and right bones differ only in the sign of X.

use glam::Vec3;
use serde::Serialize;

use crate::adapter::{BoneContainer, EditScope};
use crate::bone::{BoneId, Side};
use crate::error::{Result, RigError};
use crate::measures::DerivedMeasures;
use crate::ratio::RatioParameters;

/// Lateral offset of each shoulder head from the spine (meters)
pub const SHOULDER_OFFSET_X: f32 = 0.05;

/// Length of each hand bone (meters)
pub const HAND_LENGTH: f32 = 0.1;

/// How far the toe tip sits in front of the ankle, along -Y (meters)
pub const FOOT_FORWARD: f32 = 0.2;

/// Absolute placement of one bone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BonePlacement {
    pub head: Vec3,
    /// Only terminal bones get an explicit tail
    pub tail: Option<Vec3>,
}

impl BonePlacement {
    const fn head(head: Vec3) -> Self {
        Self { head, tail: None }
    }

    const fn segment(head: Vec3, tail: Vec3) -> Self {
        Self {
            head,
            tail: Some(tail),
        }
    }
}

/// Placement for every bone, indexed by `BoneId`
pub type Layout = [BonePlacement; BoneId::COUNT];

/// Compute where every bone goes for `params`.
///
/// Pure function of its input: equal parameters give bit-identical layouts.
pub fn layout(params: &RatioParameters) -> Layout {
    let m = DerivedMeasures::from_params(params);
    let mut out = [BonePlacement::head(Vec3::ZERO); BoneId::COUNT];

    // Spine chain
    let hips = Vec3::new(0.0, 0.0, m.hips_height);
    let spine = hips + Vec3::new(0.0, 0.0, m.hips_spine_chest);
    let chest = spine + Vec3::new(0.0, 0.0, m.hips_spine_chest);
    out[BoneId::Hips.index()] = BonePlacement::head(hips);
    out[BoneId::Spine.index()] = BonePlacement::head(spine);
    out[BoneId::Chest.index()] = BonePlacement::head(chest);
    out[BoneId::Neck.index()] = BonePlacement::head(Vec3::new(0.0, 0.0, m.shoulder_height));
    out[BoneId::Head.index()] = BonePlacement::segment(
        Vec3::new(0.0, 0.0, m.head_height),
        Vec3::new(0.0, 0.0, params.height),
    );

    for side in [Side::Left, Side::Right] {
        let s = side.sign();
        let [shoulder, upper_arm, lower_arm, hand, upper_leg, lower_leg, foot] = limb_ids(side);

        // Arm chain, outward along X
        let shoulder_head = Vec3::new(s * SHOULDER_OFFSET_X, 0.0, m.shoulder_height);
        let half_shoulders = Vec3::new(s * (params.shoulder_width / 2.0), 0.0, 0.0);
        let upper_arm_head = shoulder_head + half_shoulders;
        let half_arm = Vec3::new(s * (m.arm_length / 2.0), 0.0, 0.0);
        let lower_arm_head = upper_arm_head + half_arm;
        let hand_head = lower_arm_head + half_arm;
        let hand_tail = hand_head + Vec3::new(s * HAND_LENGTH, 0.0, 0.0);

        out[shoulder.index()] = BonePlacement::head(shoulder_head);
        out[upper_arm.index()] = BonePlacement::head(upper_arm_head);
        out[lower_arm.index()] = BonePlacement::head(lower_arm_head);
        out[hand.index()] = BonePlacement::segment(hand_head, hand_tail);

        // Leg chain, straight down
        let x = s * m.half_leg_interval;
        out[upper_leg.index()] = BonePlacement::head(Vec3::new(x, 0.0, m.hips_height));
        out[lower_leg.index()] = BonePlacement::head(Vec3::new(x, 0.0, m.knee_height));
        out[foot.index()] = BonePlacement::segment(
            Vec3::new(x, 0.0, params.ankle_height),
            Vec3::new(x, -FOOT_FORWARD, 0.0),
        );
    }

    out
}

/// Limb bones of one side: shoulder, upper arm, lower arm, hand, upper leg, lower leg, foot
fn limb_ids(side: Side) -> [BoneId; 7] {
    match side {
        Side::Left => [
            BoneId::LeftShoulder,
            BoneId::LeftUpperArm,
            BoneId::LeftLowerArm,
            BoneId::LeftHand,
            BoneId::LeftUpperLeg,
            BoneId::LeftLowerLeg,
            BoneId::LeftFoot,
        ],
        Side::Right => [
            BoneId::RightShoulder,
            BoneId::RightUpperArm,
            BoneId::RightLowerArm,
            BoneId::RightHand,
            BoneId::RightUpperLeg,
            BoneId::RightLowerLeg,
            BoneId::RightFoot,
        ],
    }
}

/// Look up every template bone, failing on the first one that is missing.
/// The result is indexed by `BoneId`.
fn resolve<C: BoneContainer + ?Sized>(container: &C) -> Result<Vec<C::Handle>> {
    BoneId::ALL
        .into_iter()
        .map(|id| {
            container
                .get_by_name(id.name())
                .ok_or_else(|| RigError::MissingBone(id.name().to_string()))
        })
        .collect()
}

/// Move every template bone to its place for `params`.
///
/// All bones are resolved before the first write, so a missing bone leaves
/// the container untouched. Names, parents and connected flags are never
/// changed. Non-finite parameters are not rejected here; they propagate into
/// the coordinates.
pub fn apply<C: BoneContainer + ?Sized>(container: &mut C, params: &RatioParameters) -> Result<()> {
    let handles = resolve(container)?;
    let placements = layout(params);

    let mut scope = EditScope::enter(container);
    for id in BoneId::ALL {
        let handle = handles[id.index()];
        let placement = placements[id.index()];
        scope.set_head(handle, placement.head);
        if placement.tail.is_some() {
            scope.set_tail(handle, placement.tail);
        }
    }

    log::debug!(
        "repositioned {} bones (height {:.2}m, {:.1} heads)",
        BoneId::COUNT,
        params.height,
        params.heads
    );
    Ok(())
}

/// Reposition an already-built rig for new parameters
pub fn reposition<C: BoneContainer + ?Sized>(container: &mut C, params: RatioParameters) -> Result<()> {
    apply(container, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::EditState;
    use crate::armature::MemoryArmature;
    use crate::builder::{build, delete_all};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use wasm_bindgen_test::*;

    const TOLERANCE: f32 = 1e-4;

    fn built() -> MemoryArmature {
        let mut armature = MemoryArmature::new("human");
        build(&mut armature).unwrap();
        armature
    }

    /// Plausible bodies: crotch below the shoulders, ankle below the crotch
    fn random_params(rng: &mut StdRng) -> RatioParameters {
        let height = rng.random_range(1.0..1.95);
        RatioParameters {
            height,
            heads: rng.random_range(4.0..9.0),
            crotch_height: height * rng.random_range(0.4..0.55),
            neck_length: rng.random_range(0.02..0.5),
            leg_interval: rng.random_range(0.05..0.4),
            shoulder_width: rng.random_range(0.1..0.6),
            ankle_height: rng.random_range(0.02..0.15),
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_reference_body_positions() {
        let mut armature = built();
        apply(&mut armature, &RatioParameters::default()).unwrap();

        let head = armature.bone("head").unwrap();
        assert_eq!(head.tail.unwrap().z, 1.6);
        assert!((head.head.z - 1.3333).abs() < TOLERANCE);

        assert_eq!(armature.bone("hips").unwrap().head, Vec3::new(0.0, 0.0, 0.8));
        assert_eq!(
            armature.bone("foot.L").unwrap().tail,
            Some(Vec3::new(0.05, -0.2, 0.0))
        );
        assert_eq!(
            armature.bone("foot.R").unwrap().tail,
            Some(Vec3::new(-0.05, -0.2, 0.0))
        );

        let neck = armature.bone("neck").unwrap();
        assert!((neck.head.z - 1.30667).abs() < TOLERANCE);

        let upper_arm = armature.bone("upper_arm.L").unwrap();
        assert!((upper_arm.head.x - 0.2).abs() < TOLERANCE);

        let hand = armature.bone("hand.L").unwrap();
        let arm_length = 1.30667 - 0.8;
        assert!((hand.head.x - (0.2 + arm_length)).abs() < TOLERANCE);
        assert!((hand.tail.unwrap().x - (0.3 + arm_length)).abs() < TOLERANCE);

        assert!((armature.bone("lower_leg.L").unwrap().head.z - 0.35).abs() < TOLERANCE);
        assert_eq!(armature.bone("foot.L").unwrap().head, Vec3::new(0.05, 0.0, 0.1));
    }

    #[test]
    fn test_mirror_symmetry() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..200 {
            let params = random_params(&mut rng);
            let placements = layout(&params);
            for id in BoneId::ALL.into_iter().filter(|id| id.side() == Some(Side::Left)) {
                let left = placements[id.index()];
                let right = placements[id.mirror().index()];
                assert_eq!(left.head.x, -right.head.x, "{} head x", id.name());
                assert_eq!(left.head.y, right.head.y);
                assert_eq!(left.head.z, right.head.z);
                match (left.tail, right.tail) {
                    (Some(l), Some(r)) => {
                        assert_eq!(l.x, -r.x, "{} tail x", id.name());
                        assert_eq!(l.y, r.y);
                        assert_eq!(l.z, r.z);
                    }
                    (None, None) => {}
                    _ => panic!("{} tails differ between sides", id.name()),
                }
            }
        }
    }

    #[test]
    fn test_center_bones_stay_on_sagittal_plane() {
        let placements = layout(&RatioParameters::default());
        for id in BoneId::ALL.into_iter().filter(|id| id.side().is_none()) {
            assert_eq!(placements[id.index()].head.x, 0.0, "{}", id.name());
        }
    }

    #[test]
    fn test_monotonic_stacking() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let params = random_params(&mut rng);
            let p = layout(&params);
            let z = |id: BoneId| p[id.index()].head.z;
            let head_tail = p[BoneId::Head.index()].tail.unwrap().z;

            assert!(z(BoneId::Hips) < z(BoneId::Spine), "{:?}", params);
            assert!(z(BoneId::Spine) < z(BoneId::Chest), "{:?}", params);
            assert!(z(BoneId::Chest) <= z(BoneId::Neck), "{:?}", params);
            assert!(z(BoneId::Neck) < z(BoneId::Head), "{:?}", params);
            assert!(z(BoneId::Head) < head_tail, "{:?}", params);
        }
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_apply_is_idempotent() {
        let params = RatioParameters {
            height: 1.75,
            heads: 7.0,
            ..RatioParameters::default()
        };
        let mut armature = built();
        apply(&mut armature, &params).unwrap();
        let first = armature.snapshot();
        apply(&mut armature, &params).unwrap();
        let second = armature.snapshot();

        assert_eq!(first, second);
    }

    #[test]
    fn test_apply_after_other_params_is_history_free() {
        let target = RatioParameters::default();
        let mut fresh = built();
        apply(&mut fresh, &target).unwrap();

        let mut reused = built();
        apply(
            &mut reused,
            &RatioParameters {
                height: 1.2,
                heads: 3.0,
                ..RatioParameters::default()
            },
        )
        .unwrap();
        apply(&mut reused, &target).unwrap();

        assert_eq!(fresh.snapshot(), reused.snapshot());
    }

    #[test]
    fn test_apply_keeps_topology() {
        let mut armature = built();
        let before: Vec<_> = armature
            .snapshot()
            .into_iter()
            .map(|b| (b.name, b.parent, b.connected))
            .collect();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            apply(&mut armature, &random_params(&mut rng)).unwrap();
        }

        let after: Vec<_> = armature
            .snapshot()
            .into_iter()
            .map(|b| (b.name, b.parent, b.connected))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_connected_heads_meet_parent_tails() {
        let mut armature = built();
        apply(&mut armature, &RatioParameters::default()).unwrap();

        for id in BoneId::ALL.into_iter().filter(|id| id.is_connected()) {
            let bone = armature.bone(id.name()).unwrap();
            let parent = armature.bone(bone.parent.as_deref().unwrap()).unwrap();
            assert_eq!(parent.tail, Some(bone.head), "{} joins its parent", id.name());
        }
    }

    #[test]
    fn test_apply_without_topology_fails_cleanly() {
        let mut armature = built();
        delete_all(&mut armature).unwrap();

        let err = apply(&mut armature, &RatioParameters::default()).unwrap_err();
        assert!(matches!(err, RigError::MissingBone(ref name) if name == "hips"));
        assert_eq!(armature.edit_state(), EditState::Object);
    }

    #[test]
    fn test_apply_with_missing_bone_writes_nothing() {
        let mut armature = built();
        let before = armature.snapshot();

        let foot = armature.get_by_name("foot.R").unwrap();
        armature.enter_editable_state();
        armature.remove_bone(foot);
        armature.restore_prior_state(EditState::Object);
        let remaining = armature.snapshot();

        let err = apply(&mut armature, &RatioParameters::default()).unwrap_err();
        assert!(matches!(err, RigError::MissingBone(ref name) if name == "foot.R"));
        assert_eq!(armature.snapshot(), remaining);
        assert_eq!(remaining.len(), before.len() - 1);
    }

    #[test]
    fn test_non_finite_params_propagate() {
        let mut armature = built();
        let params = RatioParameters {
            height: f32::NAN,
            ..RatioParameters::default()
        };
        apply(&mut armature, &params).unwrap();

        assert!(armature.bone("head").unwrap().head.z.is_nan());
        // Legs depend only on crotch, ankle and leg interval
        assert_eq!(armature.bone("hips").unwrap().head.z, 0.8);
    }

    #[test]
    fn test_reposition_matches_apply() {
        let params = RatioParameters {
            shoulder_width: 0.45,
            ..RatioParameters::default()
        };
        let mut a = built();
        let mut b = built();
        apply(&mut a, &params).unwrap();
        reposition(&mut b, params).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
