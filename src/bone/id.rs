use glam::Vec3;
use serde::Serialize;
use static_assertions::const_assert;

/// Which half of the body a bone belongs to.
///
/// `.L` bones sit on +X and `.R` bones on -X; mirroring negates X only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// +1 for left, -1 for right
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Name suffix used by the host ("L" / "R")
    pub const fn suffix(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }

    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Unique identifier for each bone in the humanoid template.
/// Ordered depth-first: parents before children, left subtree before right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum BoneId {
    // Root
    Hips = 0,

    // Spine chain
    Spine = 1,
    Chest = 2,
    Neck = 3,
    Head = 4,

    // Left arm chain
    LeftShoulder = 5,
    LeftUpperArm = 6,
    LeftLowerArm = 7,
    LeftHand = 8,

    // Right arm chain
    RightShoulder = 9,
    RightUpperArm = 10,
    RightLowerArm = 11,
    RightHand = 12,

    // Left leg chain
    LeftUpperLeg = 13,
    LeftLowerLeg = 14,
    LeftFoot = 15,

    // Right leg chain
    RightUpperLeg = 16,
    RightLowerLeg = 17,
    RightFoot = 18,
}

impl BoneId {
    /// Total number of bones in the template
    pub const COUNT: usize = 19;

    /// Convert to array index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// All bone IDs in depth-first order (parents before children)
    pub const ALL: [BoneId; Self::COUNT] = [
        BoneId::Hips,
        BoneId::Spine,
        BoneId::Chest,
        BoneId::Neck,
        BoneId::Head,
        BoneId::LeftShoulder,
        BoneId::LeftUpperArm,
        BoneId::LeftLowerArm,
        BoneId::LeftHand,
        BoneId::RightShoulder,
        BoneId::RightUpperArm,
        BoneId::RightLowerArm,
        BoneId::RightHand,
        BoneId::LeftUpperLeg,
        BoneId::LeftLowerLeg,
        BoneId::LeftFoot,
        BoneId::RightUpperLeg,
        BoneId::RightLowerLeg,
        BoneId::RightFoot,
    ];

    /// Static template entry for this bone
    #[inline]
    pub fn spec(self) -> &'static BoneSpec {
        &BONE_TEMPLATE[self.index()]
    }

    /// Host-facing bone name, e.g. `upper_arm.L`
    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    #[inline]
    pub fn parent(self) -> Option<BoneId> {
        self.spec().parent
    }

    #[inline]
    pub fn side(self) -> Option<Side> {
        self.spec().side
    }

    /// Look up a bone by its host-facing name
    pub fn from_name(name: &str) -> Option<BoneId> {
        BoneId::ALL.into_iter().find(|id| id.name() == name)
    }

    /// The bone on the other side of the sagittal plane, or `self` for center bones
    pub fn mirror(self) -> BoneId {
        match self.side() {
            None => self,
            Some(side) => {
                let base = self.base_name();
                BoneId::ALL
                    .into_iter()
                    .find(|id| id.side() == Some(side.opposite()) && id.base_name() == base)
                    .unwrap_or(self)
            }
        }
    }

    /// Name without the `.L`/`.R` suffix
    pub fn base_name(self) -> &'static str {
        let name = self.name();
        match self.side() {
            Some(_) => &name[..name.len() - 2],
            None => name,
        }
    }
}

/// Static template node: name, parent and rest-pose geometry.
///
/// `head`/`tail` are the template-space rest positions the builder gives a
/// freshly created bone. Only terminal bones (head, hands, feet) carry a tail.
#[derive(Debug, Clone, Copy)]
pub struct BoneSpec {
    pub id: BoneId,
    pub name: &'static str,
    /// Parent bone (None for root)
    pub parent: Option<BoneId>,
    pub side: Option<Side>,
    pub head: Vec3,
    pub tail: Option<Vec3>,
}

const fn center(id: BoneId, name: &'static str, parent: Option<BoneId>, head: Vec3) -> BoneSpec {
    BoneSpec {
        id,
        name,
        parent,
        side: None,
        head,
        tail: None,
    }
}

const fn sided(id: BoneId, name: &'static str, parent: BoneId, side: Side, head: Vec3) -> BoneSpec {
    BoneSpec {
        id,
        name,
        parent: Some(parent),
        side: Some(side),
        head,
        tail: None,
    }
}

const fn with_tail(spec: BoneSpec, tail: Vec3) -> BoneSpec {
    BoneSpec {
        tail: Some(tail),
        ..spec
    }
}

/// The humanoid template, indexed by `BoneId`.
///
/// hips -> spine -> chest -> {neck -> head, shoulders -> arms -> hands},
/// hips -> legs -> feet
pub(super) const TEMPLATE: [BoneSpec; BoneId::COUNT] = [
    center(BoneId::Hips, "hips", None, Vec3::new(0.0, 0.0, 0.8)),
    center(BoneId::Spine, "spine", Some(BoneId::Hips), Vec3::new(0.0, 0.0, 1.0)),
    center(BoneId::Chest, "chest", Some(BoneId::Spine), Vec3::new(0.0, 0.0, 1.1)),
    center(BoneId::Neck, "neck", Some(BoneId::Chest), Vec3::new(0.0, 0.0, 1.3)),
    with_tail(
        center(BoneId::Head, "head", Some(BoneId::Neck), Vec3::new(0.0, 0.0, 1.4)),
        Vec3::new(0.0, 0.0, 1.6),
    ),
    // Left arm
    sided(BoneId::LeftShoulder, "shoulder.L", BoneId::Chest, Side::Left, Vec3::new(0.04, 0.0, 1.3)),
    sided(BoneId::LeftUpperArm, "upper_arm.L", BoneId::LeftShoulder, Side::Left, Vec3::new(0.1, 0.0, 1.3)),
    sided(BoneId::LeftLowerArm, "lower_arm.L", BoneId::LeftUpperArm, Side::Left, Vec3::new(0.4, 0.0, 1.3)),
    with_tail(
        sided(BoneId::LeftHand, "hand.L", BoneId::LeftLowerArm, Side::Left, Vec3::new(0.7, 0.0, 1.3)),
        Vec3::new(0.8, 0.0, 1.3),
    ),
    // Right arm
    sided(BoneId::RightShoulder, "shoulder.R", BoneId::Chest, Side::Right, Vec3::new(-0.04, 0.0, 1.3)),
    sided(BoneId::RightUpperArm, "upper_arm.R", BoneId::RightShoulder, Side::Right, Vec3::new(-0.1, 0.0, 1.3)),
    sided(BoneId::RightLowerArm, "lower_arm.R", BoneId::RightUpperArm, Side::Right, Vec3::new(-0.4, 0.0, 1.3)),
    with_tail(
        sided(BoneId::RightHand, "hand.R", BoneId::RightLowerArm, Side::Right, Vec3::new(-0.7, 0.0, 1.3)),
        Vec3::new(-0.8, 0.0, 1.3),
    ),
    // Left leg
    sided(BoneId::LeftUpperLeg, "upper_leg.L", BoneId::Hips, Side::Left, Vec3::new(0.1, 0.0, 0.8)),
    sided(BoneId::LeftLowerLeg, "lower_leg.L", BoneId::LeftUpperLeg, Side::Left, Vec3::new(0.1, 0.0, 0.4)),
    with_tail(
        sided(BoneId::LeftFoot, "foot.L", BoneId::LeftLowerLeg, Side::Left, Vec3::new(0.1, 0.0, 0.1)),
        Vec3::new(0.1, -0.2, 0.0),
    ),
    // Right leg
    sided(BoneId::RightUpperLeg, "upper_leg.R", BoneId::Hips, Side::Right, Vec3::new(-0.1, 0.0, 0.8)),
    sided(BoneId::RightLowerLeg, "lower_leg.R", BoneId::RightUpperLeg, Side::Right, Vec3::new(-0.1, 0.0, 0.4)),
    with_tail(
        sided(BoneId::RightFoot, "foot.R", BoneId::RightLowerLeg, Side::Right, Vec3::new(-0.1, 0.0, 0.1)),
        Vec3::new(-0.1, -0.2, 0.0),
    ),
];

pub static BONE_TEMPLATE: [BoneSpec; BoneId::COUNT] = TEMPLATE;

/// Every entry sits at its own index and every parent precedes its child.
const fn template_is_ordered() -> bool {
    let mut i = 0;
    while i < BoneId::COUNT {
        let spec = &TEMPLATE[i];
        if spec.id as usize != i {
            return false;
        }
        if let Some(parent) = spec.parent {
            if parent as usize >= i {
                return false;
            }
        } else if i != 0 {
            return false;
        }
        i += 1;
    }
    true
}

const_assert!(template_is_ordered());
