//! An in-memory stand-in for the game host: a flat list of item instances
//! that can be enumerated, inspected and moved around. Used by the CLI's
//! `--world` files and by tests.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_api::{CoreError, CoreErrorCode};
use crate::item::{
    InstanceId, ItemMover, ItemRecord, ItemRelations, ItemSource, ItemTypeId, MergePolicy,
    Possession, Target,
};
use crate::storage::write_atomically;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldItem {
    pub instance: InstanceId,
    pub type_id: ItemTypeId,
    pub possession: Possession,
    #[serde(default)]
    pub in_container: bool,
    #[serde(default)]
    pub in_slot: bool,
    /// The host refuses to move pinned items.
    #[serde(default)]
    pub pinned: bool,
}

impl WorldItem {
    pub fn new(instance: u64, type_id: i32, possession: Possession) -> Self {
        let (in_container, in_slot) = match possession {
            Possession::Worn => (false, true),
            Possession::Carried => (true, false),
            Possession::Storage => (false, false),
        };
        Self {
            instance: InstanceId(instance),
            type_id: ItemTypeId(type_id),
            possession,
            in_container,
            in_slot,
            pinned: false,
        }
    }

    pub fn worn(instance: u64, type_id: i32) -> Self {
        Self::new(instance, type_id, Possession::Worn)
    }

    pub fn carried(instance: u64, type_id: i32) -> Self {
        Self::new(instance, type_id, Possession::Carried)
    }

    pub fn stored(instance: u64, type_id: i32) -> Self {
        Self::new(instance, type_id, Possession::Storage)
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn record(&self) -> ItemRecord {
        ItemRecord {
            instance: self.instance,
            type_id: self.type_id,
            possession: self.possession,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct World {
    #[serde(default)]
    pub items: Vec<WorldItem>,
}

impl World {
    pub fn new(items: Vec<WorldItem>) -> Self {
        Self { items }
    }

    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text).map_err(|e| {
            CoreError::new(CoreErrorCode::Parse, format!("failed to parse world: {e}"))
        })
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            CoreError::new(CoreErrorCode::Parse, format!("failed to encode world: {e}"))
        })
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = fs::read_to_string(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        Self::from_json(&text)
    }

    pub fn write(&self, path: &Path) -> Result<(), CoreError> {
        write_atomically(path, &self.to_json()?)
    }

    pub fn count_at(&self, possession: Possession) -> usize {
        self.items
            .iter()
            .filter(|item| item.possession == possession)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub instance: InstanceId,
    pub target: Target,
    pub merge: MergePolicy,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryHost {
    world: World,
    moves: Vec<Relocation>,
}

impl MemoryHost {
    pub fn new(world: World) -> Self {
        Self {
            world,
            moves: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Successful relocations, oldest first.
    pub fn moves(&self) -> &[Relocation] {
        &self.moves
    }

    fn find(&self, instance: InstanceId) -> Option<&WorldItem> {
        self.world
            .items
            .iter()
            .find(|item| item.instance == instance)
    }
}

impl ItemSource for MemoryHost {
    fn enumerate_items(&self, location: Possession) -> Vec<ItemRecord> {
        self.world
            .items
            .iter()
            .filter(|item| item.possession == location && item.type_id.is_valid())
            .map(WorldItem::record)
            .collect()
    }

    fn classify_relations(&self, item: &ItemRecord) -> Result<ItemRelations, CoreError> {
        let found = self.find(item.instance).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::RelationLookup,
                format!("item {} is not in the world", item.instance),
            )
        })?;
        Ok(ItemRelations {
            has_container_membership: found.in_container,
            has_slot_attachment: found.in_slot,
        })
    }
}

impl ItemMover for MemoryHost {
    fn relocate(&mut self, item: &ItemRecord, target: Target, merge: MergePolicy) -> bool {
        let Some(found) = self
            .world
            .items
            .iter_mut()
            .find(|candidate| candidate.instance == item.instance)
        else {
            return false;
        };
        if found.pinned {
            debug!(instance = %found.instance, "item is pinned");
            return false;
        }

        let (possession, in_container, in_slot) = match target {
            Target::Equip => (Possession::Worn, false, true),
            Target::Carry => (Possession::Carried, true, false),
            Target::Storage => (Possession::Storage, false, false),
        };
        found.possession = possession;
        found.in_container = in_container;
        found.in_slot = in_slot;

        self.moves.push(Relocation {
            instance: item.instance,
            target,
            merge,
        });
        true
    }
}
