//! Skeleton builder: materializes the bone template inside a host container.
//!
//! Building only creates topology (names, parents, connected flags) and
//! leaves every bone at its template rest position. Placing bones for a
//! particular body is the positioner's job.

use crate::adapter::{BoneContainer, EditScope, TargetKind};
use crate::bone::BoneId;
use crate::error::{Result, RigError};

/// Check that `container` is an armature with no bones in it
fn check_target<C: BoneContainer + ?Sized>(container: &C) -> Result<()> {
    let kind = container.target_kind();
    let bone_count = container.bone_count();
    if kind != TargetKind::Armature || bone_count != 0 {
        return Err(RigError::InvalidTarget { kind, bone_count });
    }
    Ok(())
}

/// Create one bone per template entry, depth-first.
///
/// The first child of every parent is connected to it; later siblings
/// (shoulders, legs) hang free. Fails with `InvalidTarget` before touching
/// anything if the container is not an empty armature.
pub fn build<C: BoneContainer + ?Sized>(container: &mut C) -> Result<()> {
    check_target(container)?;

    let mut scope = EditScope::enter(container);
    let mut handles: [Option<C::Handle>; BoneId::COUNT] = [None; BoneId::COUNT];

    // BoneId::ALL is depth-first, so a parent's handle always exists before its children
    for id in BoneId::ALL {
        let spec = id.spec();
        let handle = scope.create_bone(spec.name);
        let parent = spec.parent.and_then(|p| handles[p.index()]);
        scope.set_parent(handle, parent);
        scope.set_connected(handle, id.is_connected());
        scope.set_head(handle, spec.head);
        if spec.tail.is_some() {
            scope.set_tail(handle, spec.tail);
        }
        handles[id.index()] = Some(handle);
        log::debug!(
            "created {} (parent: {:?}, connected: {})",
            spec.name,
            spec.parent.map(BoneId::name),
            id.is_connected()
        );
    }

    log::info!("built {} bones", BoneId::COUNT);
    Ok(())
}

/// Remove every bone from the container. Removing from an empty container
/// is a no-op.
pub fn delete_all<C: BoneContainer + ?Sized>(container: &mut C) -> Result<()> {
    let kind = container.target_kind();
    if kind != TargetKind::Armature {
        return Err(RigError::InvalidTarget {
            kind,
            bone_count: container.bone_count(),
        });
    }

    let count = container.bone_count();
    if count == 0 {
        return Ok(());
    }

    let mut scope = EditScope::enter(container);
    scope.remove_all();
    log::info!("deleted {} bones", count);
    Ok(())
}

/// Replace whatever bones the container holds with a fresh template build
pub fn rebuild_topology<C: BoneContainer + ?Sized>(container: &mut C) -> Result<()> {
    delete_all(container)?;
    build(container)
}
