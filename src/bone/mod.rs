//! Humanoid bone template
//!
//! The template is a fixed tree of named bones:
//! hips → spine → chest → {neck → head, shoulders → arms → hands},
//! hips → legs → feet.
//!
//! - **BoneId**: Enum identifying each bone, in depth-first order
//! - **BONE_TEMPLATE**: Static table of names, parents, sides and rest geometry
//! - **CONNECTED**: Which bones the builder joins to their parent's tail

pub mod id;
pub mod topology;

pub use id::*;
pub use topology::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = BoneId::ALL.iter().map(|id| id.name()).collect();
        assert_eq!(names.len(), BoneId::COUNT);
    }

    #[test]
    fn test_from_name_round_trips_every_bone() {
        for id in BoneId::ALL {
            assert_eq!(BoneId::from_name(id.name()), Some(id));
        }
        assert_eq!(BoneId::from_name("tail"), None);
        assert_eq!(BoneId::from_name("upper_arm"), None);
    }

    #[test]
    fn test_root_is_hips() {
        let roots: Vec<BoneId> = BoneId::ALL
            .into_iter()
            .filter(|id| id.parent().is_none())
            .collect();
        assert_eq!(roots, vec![BoneId::Hips]);
    }

    #[test]
    fn test_order_is_depth_first() {
        // Every subtree occupies a contiguous run starting at its root
        for id in BoneId::ALL {
            let subtree = BoneMask::subtree_of(id);
            let start = id.index();
            for (offset, member) in subtree.iter().enumerate() {
                assert_eq!(member.index(), start + offset, "subtree of {}", id.name());
            }
        }
        assert_eq!(BoneMask::subtree_of(BoneId::Hips).len(), BoneId::COUNT);
    }

    #[test]
    fn test_children_in_template_order() {
        let hips: Vec<BoneId> = BoneId::Hips.children().collect();
        assert_eq!(
            hips,
            vec![BoneId::Spine, BoneId::LeftUpperLeg, BoneId::RightUpperLeg]
        );

        let chest: Vec<BoneId> = BoneId::Chest.children().collect();
        assert_eq!(
            chest,
            vec![BoneId::Neck, BoneId::LeftShoulder, BoneId::RightShoulder]
        );

        assert!(BoneId::Head.is_leaf());
        assert!(BoneId::LeftHand.is_leaf());
        assert!(BoneId::RightFoot.is_leaf());
    }

    #[test]
    fn test_connected_flags_follow_first_child() {
        let connected: Vec<&str> = BoneId::ALL
            .into_iter()
            .filter(|id| id.is_connected())
            .map(|id| id.name())
            .collect();

        assert_eq!(
            connected,
            vec![
                "spine",
                "chest",
                "neck",
                "head",
                "upper_arm.L",
                "lower_arm.L",
                "hand.L",
                "upper_arm.R",
                "lower_arm.R",
                "hand.R",
                "lower_leg.L",
                "foot.L",
                "lower_leg.R",
                "foot.R",
            ]
        );

        // Branch points hang off their parent without being joined to it
        assert!(!BoneId::Hips.is_connected());
        assert!(!BoneId::LeftShoulder.is_connected());
        assert!(!BoneId::RightShoulder.is_connected());
        assert!(!BoneId::LeftUpperLeg.is_connected());
        assert!(!BoneId::RightUpperLeg.is_connected());
    }

    #[test]
    fn test_only_leaves_carry_tails() {
        for id in BoneId::ALL {
            if id.spec().tail.is_some() {
                assert!(id.is_leaf(), "{} has a tail but is not a leaf", id.name());
            }
        }
        let with_tail = BoneId::ALL
            .iter()
            .filter(|id| id.spec().tail.is_some())
            .count();
        assert_eq!(with_tail, 5);
    }

    #[test]
    fn test_mirror_pairs() {
        assert_eq!(BoneId::LeftHand.mirror(), BoneId::RightHand);
        assert_eq!(BoneId::RightUpperLeg.mirror(), BoneId::LeftUpperLeg);
        assert_eq!(BoneId::Chest.mirror(), BoneId::Chest);
        assert_eq!(BoneId::LeftLowerArm.base_name(), "lower_arm");

        for id in BoneId::ALL {
            let twin = id.mirror();
            assert_eq!(twin.mirror(), id);
            let (a, b) = (id.spec(), twin.spec());
            assert_eq!(a.head.x, -b.head.x, "{} rest head", id.name());
            assert_eq!(a.head.y, b.head.y);
            assert_eq!(a.head.z, b.head.z);
            // Parents mirror too, so left and right chains have the same shape
            assert_eq!(id.parent().map(BoneId::mirror), twin.parent());
        }
    }

    #[test]
    fn test_side_suffix_matches_name() {
        for id in BoneId::ALL {
            match id.side() {
                Some(side) => assert!(id.name().ends_with(&format!(".{}", side.suffix()))),
                None => assert!(!id.name().contains('.')),
            }
        }
        assert_eq!(Side::Left.sign(), 1.0);
        assert_eq!(Side::Right.sign(), -1.0);
    }
}
