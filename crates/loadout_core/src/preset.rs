//! Saved loadouts and the slot list that owns them.

use serde::{Deserialize, Serialize};

use crate::item::ItemTypeId;

/// A store never shrinks below this many presets through `remove`.
pub const MIN_PRESETS: usize = 3;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    pub name: String,
    pub equipped_ids: Vec<ItemTypeId>,
    pub carried_ids: Vec<ItemTypeId>,
}

impl PresetConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn total_count(&self) -> usize {
        self.equipped_ids.len() + self.carried_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    pub fn description(&self) -> String {
        if self.is_empty() {
            return "empty".to_string();
        }
        format!(
            "Equipped: {}  Carried: {}",
            self.equipped_ids.len(),
            self.carried_ids.len()
        )
    }
}

pub fn default_preset_name(position: usize) -> String {
    format!("Preset {}", position + 1)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetStore {
    presets: Vec<PresetConfig>,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self {
            presets: (0..MIN_PRESETS)
                .map(|i| PresetConfig::new(default_preset_name(i)))
                .collect(),
        }
    }
}

impl PresetStore {
    /// Wraps `presets` as-is. May hold fewer than [`MIN_PRESETS`] entries;
    /// see [`PresetStore::or_default`].
    pub fn from_presets(presets: Vec<PresetConfig>) -> Self {
        Self { presets }
    }

    /// Falls back to the bootstrap store when nothing was recovered, and
    /// gives unnamed presets their positional default name.
    pub fn or_default(mut self) -> Self {
        if self.presets.is_empty() {
            return Self::default();
        }
        for (index, preset) in self.presets.iter_mut().enumerate() {
            if preset.name.trim().is_empty() {
                preset.name = default_preset_name(index);
            }
        }
        self
    }

    pub fn presets(&self) -> &[PresetConfig] {
        &self.presets
    }

    pub fn get(&self, index: usize) -> Option<&PresetConfig> {
        self.presets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PresetConfig> {
        self.presets.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn add(&mut self) -> bool {
        let name = default_preset_name(self.presets.len());
        self.presets.push(PresetConfig::new(name));
        true
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if self.presets.len() <= MIN_PRESETS || index >= self.presets.len() {
            return false;
        }
        self.presets.remove(index);
        true
    }

    pub fn rename(&mut self, index: usize, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(preset) = self.presets.get_mut(index) else {
            return false;
        };
        preset.name = name.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{MIN_PRESETS, PresetConfig, PresetStore};
    use crate::item::ItemTypeId;

    #[test]
    fn description_reports_bucket_counts() {
        let mut preset = PresetConfig::new("Raid");
        assert_eq!(preset.description(), "empty");

        preset.equipped_ids = vec![ItemTypeId(4), ItemTypeId(4)];
        preset.carried_ids = vec![ItemTypeId(9)];
        assert_eq!(preset.total_count(), 3);
        assert_eq!(preset.description(), "Equipped: 2  Carried: 1");
    }

    #[test]
    fn or_default_fills_blank_names_by_position() {
        let store = PresetStore::from_presets(vec![
            PresetConfig::new("Keep"),
            PresetConfig::new("  "),
        ])
        .or_default();

        assert_eq!(store.len(), 2);
        assert_eq!(store.presets()[0].name, "Keep");
        assert_eq!(store.presets()[1].name, "Preset 2");
    }

    #[test]
    fn default_store_has_minimum_presets() {
        let store = PresetStore::default();
        assert_eq!(store.len(), MIN_PRESETS);
        assert!(store.presets().iter().all(PresetConfig::is_empty));
    }
}
