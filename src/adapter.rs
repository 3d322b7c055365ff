//! Host adapter contract.
//!
//! The geometry core never touches a host scene directly. A host hands it a
//! `BoneContainer` for one specific rig, and the core creates, links, places
//! and removes bones through that trait only.

use glam::Vec3;
use serde::Serialize;

/// What kind of object the adapter wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TargetKind {
    Armature,
    Mesh,
    Empty,
    Other,
}

/// Editing state of the wrapped object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EditState {
    /// Bones are read-only
    Object,
    /// Bones may be created, removed and moved
    Edit,
}

/// Bone storage owned by a host editor.
///
/// Handles are only meaningful to the container that issued them.
pub trait BoneContainer {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    fn target_kind(&self) -> TargetKind;

    /// All bones currently in the container, in no particular order
    fn bone_handles(&self) -> Vec<Self::Handle>;

    fn create_bone(&mut self, name: &str) -> Self::Handle;

    fn remove_bone(&mut self, handle: Self::Handle);

    /// Remove every bone
    fn remove_all(&mut self) {
        for handle in self.bone_handles() {
            self.remove_bone(handle);
        }
    }

    fn get_by_name(&self, name: &str) -> Option<Self::Handle>;

    fn set_parent(&mut self, handle: Self::Handle, parent: Option<Self::Handle>);

    fn set_connected(&mut self, handle: Self::Handle, connected: bool);

    fn set_head(&mut self, handle: Self::Handle, head: Vec3);

    /// `None` leaves the tail unset
    fn set_tail(&mut self, handle: Self::Handle, tail: Option<Vec3>);

    /// Switch into the editable state, returning the state to restore later
    fn enter_editable_state(&mut self) -> EditState;

    fn restore_prior_state(&mut self, prior: EditState);

    fn bone_count(&self) -> usize {
        self.bone_handles().len()
    }
}

/// Scoped editable state.
///
/// Entering switches the container into its editable state; dropping the
/// scope restores whatever state it was in before, on every exit path.
pub struct EditScope<'a, C: BoneContainer + ?Sized> {
    container: &'a mut C,
    prior: EditState,
}

impl<'a, C: BoneContainer + ?Sized> EditScope<'a, C> {
    pub fn enter(container: &'a mut C) -> Self {
        let prior = container.enter_editable_state();
        if prior != EditState::Edit {
            log::debug!("enter {:?} state (was {:?})", EditState::Edit, prior);
        }
        Self { container, prior }
    }

    pub fn prior(&self) -> EditState {
        self.prior
    }
}

impl<C: BoneContainer + ?Sized> std::ops::Deref for EditScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.container
    }
}

impl<C: BoneContainer + ?Sized> std::ops::DerefMut for EditScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.container
    }
}

impl<C: BoneContainer + ?Sized> Drop for EditScope<'_, C> {
    fn drop(&mut self) {
        if self.prior != EditState::Edit {
            log::debug!("restore {:?} state", self.prior);
        }
        self.container.restore_prior_state(self.prior);
    }
}
