use super::id::{BoneId, TEMPLATE};

/// Bitmask over `BoneId` indices; bit i corresponds to the bone with index i.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoneMask(u32);

const fn compute_child_masks() -> [u32; BoneId::COUNT] {
    let mut masks = [0u32; BoneId::COUNT];
    let mut child = 0;
    while child < BoneId::COUNT {
        if let Some(parent) = TEMPLATE[child].parent {
            masks[parent as usize] |= 1 << child;
        }
        child += 1;
    }
    masks
}

const fn compute_descendant_masks() -> [u32; BoneId::COUNT] {
    let children = compute_child_masks();
    let mut masks = [0u32; BoneId::COUNT];
    // Children always carry a higher index than their parent, so walking
    // backwards sees every subtree complete before its root.
    let mut i = BoneId::COUNT;
    while i > 0 {
        i -= 1;
        let mut mask = 1u32 << i;
        let mut j = i + 1;
        while j < BoneId::COUNT {
            if children[i] & (1 << j) != 0 {
                mask |= masks[j];
            }
            j += 1;
        }
        masks[i] = mask;
    }
    masks
}

/// A bone is connected when it is the first child listed under its parent.
/// The root has no parent and is never connected.
const fn compute_connected_flags() -> [bool; BoneId::COUNT] {
    let children = compute_child_masks();
    let mut flags = [false; BoneId::COUNT];
    let mut i = 0;
    while i < BoneId::COUNT {
        if let Some(parent) = TEMPLATE[i].parent {
            let siblings = children[parent as usize];
            // Lowest set bit is the first child in depth-first order
            flags[i] = siblings.trailing_zeros() as usize == i;
        }
        i += 1;
    }
    flags
}

const CHILD_MASKS: [u32; BoneId::COUNT] = compute_child_masks();
const DESCENDANT_MASKS: [u32; BoneId::COUNT] = compute_descendant_masks();

/// `connected` flag the builder assigns to each bone, indexed by `BoneId`
pub const CONNECTED: [bool; BoneId::COUNT] = compute_connected_flags();

impl BoneMask {
    pub const EMPTY: BoneMask = BoneMask(0);

    /// Direct children of `bone`
    #[inline]
    pub fn children_of(bone: BoneId) -> Self {
        Self(CHILD_MASKS[bone.index()])
    }

    /// `bone` and every bone below it
    #[inline]
    pub fn subtree_of(bone: BoneId) -> Self {
        Self(DESCENDANT_MASKS[bone.index()])
    }

    #[inline]
    pub fn contains(self, bone: BoneId) -> bool {
        (self.0 & (1 << bone.index())) != 0
    }

    #[inline]
    pub fn with(self, bone: BoneId) -> Self {
        Self(self.0 | (1 << bone.index()))
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in depth-first template order
    pub fn iter(self) -> impl Iterator<Item = BoneId> {
        BoneId::ALL.into_iter().filter(move |id| self.contains(*id))
    }
}

impl BoneId {
    /// Children in template order (left before right)
    pub fn children(self) -> impl Iterator<Item = BoneId> {
        BoneMask::children_of(self).iter()
    }

    /// Whether the builder marks this bone as connected to its parent
    #[inline]
    pub fn is_connected(self) -> bool {
        CONNECTED[self.index()]
    }

    /// Whether the template gives this bone no children
    #[inline]
    pub fn is_leaf(self) -> bool {
        BoneMask::children_of(self).is_empty()
    }
}
