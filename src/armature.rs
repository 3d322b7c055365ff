//! In-memory armature: the reference host used by the browser bindings and
//! by tests.
//!
//! It behaves like an editor's armature in edit mode:
//! - Handles stay valid until their bone is removed and are never reissued
//! - Duplicate names get a numeric suffix (`hand.L.001`)
//! - A connected bone's head and its parent's tail are the same point:
//!   moving one moves the other

use glam::Vec3;
use serde::Serialize;

use crate::adapter::{BoneContainer, EditState, TargetKind};
use crate::bone::BoneId;

/// Handle to a bone inside a `MemoryArmature`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoneHandle(u32);

#[derive(Debug, Clone, PartialEq)]
struct BoneRecord {
    name: String,
    parent: Option<BoneHandle>,
    connected: bool,
    head: Vec3,
    tail: Option<Vec3>,
}

/// Plain view of one bone, with the parent resolved to its name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoneSnapshot {
    pub name: String,
    pub parent: Option<String>,
    pub connected: bool,
    pub head: Vec3,
    pub tail: Option<Vec3>,
}

#[derive(Debug, Clone)]
pub struct MemoryArmature {
    name: String,
    kind: TargetKind,
    slots: Vec<Option<BoneRecord>>,
    /// Handle of `slots[0]`; grows when `remove_all` drops the whole table
    first_handle: u32,
    state: EditState,
    /// Draw bone names in the viewport
    pub show_names: bool,
    /// Mirror edits across the X axis
    pub mirror_x: bool,
    /// Mutations made while not in the editable state
    stray_edits: usize,
}

impl MemoryArmature {
    pub fn new(name: impl Into<String>) -> Self {
        Self::of_kind(name, TargetKind::Armature)
    }

    /// Wrap an object of any kind; only armatures accept bones from the builder
    pub fn of_kind(name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            slots: Vec::new(),
            first_handle: 0,
            state: EditState::Object,
            show_names: false,
            mirror_x: false,
            stray_edits: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edit_state(&self) -> EditState {
        self.state
    }

    /// Number of mutations that happened outside the editable state
    pub fn stray_edits(&self) -> usize {
        self.stray_edits
    }

    /// Slot index of `handle`, if it was issued since the last `remove_all`
    fn slot_of(&self, handle: BoneHandle) -> Option<usize> {
        handle.0.checked_sub(self.first_handle).map(|i| i as usize)
    }

    /// Number of slots held, live or removed
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn record(&self, handle: BoneHandle) -> Option<&BoneRecord> {
        let index = self.slot_of(handle)?;
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn record_mut(&mut self, handle: BoneHandle) -> Option<&mut BoneRecord> {
        if self.state != EditState::Edit {
            self.stray_edits += 1;
        }
        let index = self.slot_of(handle)?;
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    fn live(&self) -> impl Iterator<Item = (BoneHandle, &BoneRecord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.as_ref()
                    .map(|r| (BoneHandle(self.first_handle + i as u32), r))
            })
    }

    fn unique_name(&self, name: &str) -> String {
        if self.get_by_name(name).is_none() {
            return name.to_string();
        }
        (1..)
            .map(|n| format!("{}.{:03}", name, n))
            .find(|candidate| self.get_by_name(candidate).is_none())
            .unwrap_or_else(|| name.to_string())
    }

    /// Snapshot of one bone by name
    pub fn bone(&self, name: &str) -> Option<BoneSnapshot> {
        self.get_by_name(name).and_then(|h| self.snapshot_of(h))
    }

    fn snapshot_of(&self, handle: BoneHandle) -> Option<BoneSnapshot> {
        let record = self.record(handle)?;
        Some(BoneSnapshot {
            name: record.name.clone(),
            parent: record
                .parent
                .and_then(|p| self.record(p))
                .map(|p| p.name.clone()),
            connected: record.connected,
            head: record.head,
            tail: record.tail,
        })
    }

    /// All bones, template bones first in template order, then any others
    /// in creation order
    pub fn snapshot(&self) -> Vec<BoneSnapshot> {
        let mut handles: Vec<BoneHandle> = self.live().map(|(h, _)| h).collect();
        handles.sort_by_key(|h| {
            let template_index = self
                .record(*h)
                .and_then(|r| BoneId::from_name(&r.name))
                .map_or(usize::MAX, BoneId::index);
            (template_index, h.0)
        });
        handles
            .into_iter()
            .filter_map(|h| self.snapshot_of(h))
            .collect()
    }

    /// Snapshot as pretty JSON
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

impl BoneContainer for MemoryArmature {
    type Handle = BoneHandle;

    fn target_kind(&self) -> TargetKind {
        self.kind
    }

    fn bone_handles(&self) -> Vec<BoneHandle> {
        self.live().map(|(h, _)| h).collect()
    }

    fn create_bone(&mut self, name: &str) -> BoneHandle {
        if self.state != EditState::Edit {
            self.stray_edits += 1;
        }
        let name = self.unique_name(name);
        let handle = BoneHandle(self.first_handle + self.slots.len() as u32);
        self.slots.push(Some(BoneRecord {
            name,
            parent: None,
            connected: false,
            head: Vec3::ZERO,
            tail: None,
        }));
        handle
    }

    fn remove_bone(&mut self, handle: BoneHandle) {
        if self.record_mut(handle).is_none() {
            return;
        }
        let Some(index) = self.slot_of(handle) else {
            return;
        };
        self.slots[index] = None;
        // Orphaned children detach and keep their positions
        for record in self.slots.iter_mut().flatten() {
            if record.parent == Some(handle) {
                record.parent = None;
                record.connected = false;
            }
        }
    }

    /// Drops the whole slot table. Later handles continue past every one
    /// issued so far, so stale handles never alias new bones.
    fn remove_all(&mut self) {
        if self.state != EditState::Edit {
            self.stray_edits += 1;
        }
        self.first_handle += self.slots.len() as u32;
        self.slots.clear();
    }

    fn get_by_name(&self, name: &str) -> Option<BoneHandle> {
        self.live().find(|(_, r)| r.name == name).map(|(h, _)| h)
    }

    fn set_parent(&mut self, handle: BoneHandle, parent: Option<BoneHandle>) {
        let parent = parent.filter(|p| *p != handle && self.record(*p).is_some());
        if let Some(record) = self.record_mut(handle) {
            record.parent = parent;
            if parent.is_none() {
                record.connected = false;
            }
        }
    }

    fn set_connected(&mut self, handle: BoneHandle, connected: bool) {
        let parent_tail = self
            .record(handle)
            .and_then(|r| r.parent)
            .and_then(|p| self.record(p))
            .and_then(|p| p.tail);
        if let Some(record) = self.record_mut(handle) {
            // A bone without a parent has nothing to connect to
            record.connected = connected && record.parent.is_some();
            if let (true, Some(tail)) = (record.connected, parent_tail) {
                record.head = tail;
            }
        }
    }

    fn set_head(&mut self, handle: BoneHandle, head: Vec3) {
        let Some(record) = self.record_mut(handle) else {
            return;
        };
        record.head = head;
        let joined_parent = record.parent.filter(|_| record.connected);
        let parent_slot = joined_parent.and_then(|p| self.slot_of(p));
        if let Some(parent) = parent_slot
            .and_then(|i| self.slots.get_mut(i))
            .and_then(Option::as_mut)
        {
            parent.tail = Some(head);
        }
    }

    fn set_tail(&mut self, handle: BoneHandle, tail: Option<Vec3>) {
        let Some(record) = self.record_mut(handle) else {
            return;
        };
        record.tail = tail;
        if let Some(tail) = tail {
            for child in self.slots.iter_mut().flatten() {
                if child.parent == Some(handle) && child.connected {
                    child.head = tail;
                }
            }
        }
    }

    fn enter_editable_state(&mut self) -> EditState {
        let prior = self.state;
        self.state = EditState::Edit;
        prior
    }

    fn restore_prior_state(&mut self, prior: EditState) {
        self.state = prior;
    }
}
