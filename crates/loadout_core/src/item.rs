//! Item instances as the host reports them, and the two collaborator traits
//! the allocator and capture path drive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core_api::CoreError;

/// Kind of an item, shared by every copy of it.
///
/// Identifiers `<= 0` are placeholder or system objects and never take part
/// in capture or allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTypeId(pub i32);

impl ItemTypeId {
    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl From<i32> for ItemTypeId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of one physical item. Only compared, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Possession {
    Worn,
    Carried,
    Storage,
}

impl Possession {
    pub fn on_user(self) -> bool {
        matches!(self, Self::Worn | Self::Carried)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub instance: InstanceId,
    pub type_id: ItemTypeId,
    pub possession: Possession,
}

/// The two relation signals the classifier reads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRelations {
    /// The item sits inside a generic carry container.
    pub has_container_membership: bool,
    /// The item is plugged into a dedicated equipment slot.
    pub has_slot_attachment: bool,
}

/// Where a relocation should put an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Equip,
    Carry,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    KeepSeparate,
    AllowMerge,
}

pub trait ItemSource {
    /// Items currently at `location`, in the host's enumeration order.
    /// Invalid type ids are already filtered out.
    fn enumerate_items(&self, location: Possession) -> Vec<ItemRecord>;

    fn classify_relations(&self, item: &ItemRecord) -> Result<ItemRelations, CoreError>;

    /// Worn items followed by carried items.
    fn user_items(&self) -> Vec<ItemRecord> {
        let mut items = self.enumerate_items(Possession::Worn);
        items.extend(self.enumerate_items(Possession::Carried));
        items
    }
}

pub trait ItemMover {
    /// Moves one item. Never panics; `false` means the host refused.
    fn relocate(&mut self, item: &ItemRecord, target: Target, merge: MergePolicy) -> bool;

    /// Sends every item in `items` to storage and returns how many moved.
    fn bulk_relocate_to_storage(&mut self, items: &[ItemRecord]) -> usize {
        items
            .iter()
            .filter(|item| self.relocate(item, Target::Storage, MergePolicy::AllowMerge))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemTypeId, Possession};

    #[test]
    fn only_positive_type_ids_are_valid() {
        assert!(ItemTypeId(1).is_valid());
        assert!(!ItemTypeId(0).is_valid());
        assert!(!ItemTypeId(-7).is_valid());
    }

    #[test]
    fn storage_is_not_on_user() {
        assert!(Possession::Worn.on_user());
        assert!(Possession::Carried.on_user());
        assert!(!Possession::Storage.on_user());
    }
}
