use tracing::info;

use crate::allocator::apply_preset;
use crate::capture::capture_into;
use crate::item::{ItemMover, ItemSource};
use crate::preset::{MIN_PRESETS, PresetStore};

use super::error::{CoreError, CoreErrorCode};
use super::types::{ApplyPolicy, ApplyReport, CaptureReport};

/// Entry point for the user-triggered operations.
///
/// The engine holds no presets: callers own the [`PresetStore`], pass it in,
/// and persist it after any call that changed it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine {
    policy: ApplyPolicy,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ApplyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ApplyPolicy {
        self.policy
    }

    pub fn save_loadout<S: ItemSource + ?Sized>(
        &self,
        store: &mut PresetStore,
        index: usize,
        source: &S,
    ) -> Result<CaptureReport, CoreError> {
        let len = store.len();
        let preset = store
            .get_mut(index)
            .ok_or_else(|| CoreError::slot_out_of_range(index, len))?;
        capture_into(source, preset)
    }

    pub fn apply_loadout<H: ItemSource + ItemMover + ?Sized>(
        &self,
        store: &PresetStore,
        index: usize,
        host: &mut H,
    ) -> Result<ApplyReport, CoreError> {
        let preset = store
            .get(index)
            .ok_or_else(|| CoreError::slot_out_of_range(index, store.len()))?;
        apply_preset(preset, host, self.policy)
    }

    /// Returns the index of the new preset.
    pub fn add_preset(&self, store: &mut PresetStore) -> usize {
        store.add();
        let index = store.len() - 1;
        info!(slot = index + 1, "added preset");
        index
    }

    pub fn remove_preset(&self, store: &mut PresetStore, index: usize) -> Result<(), CoreError> {
        if index >= store.len() {
            return Err(CoreError::slot_out_of_range(index, store.len()));
        }
        if !store.remove(index) {
            return Err(CoreError::new(
                CoreErrorCode::MinimumPresets,
                format!("at least {MIN_PRESETS} presets must be kept"),
            ));
        }
        info!(slot = index + 1, "removed preset");
        Ok(())
    }

    pub fn rename_preset(
        &self,
        store: &mut PresetStore,
        index: usize,
        name: &str,
    ) -> Result<(), CoreError> {
        if index >= store.len() {
            return Err(CoreError::slot_out_of_range(index, store.len()));
        }
        if !store.rename(index, name) {
            return Err(CoreError::new(
                CoreErrorCode::InvalidName,
                "preset name cannot be blank",
            ));
        }
        info!(slot = index + 1, name = name.trim(), "renamed preset");
        Ok(())
    }
}
