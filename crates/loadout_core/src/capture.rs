use tracing::{debug, info};

use crate::classifier::{Bucket, classify_item};
use crate::core_api::{CaptureReport, CoreError, CoreErrorCode};
use crate::item::{ItemSource, ItemTypeId};
use crate::preset::PresetConfig;

/// Replaces both lists of `preset` with what the user holds right now.
///
/// Nothing is written when no valid item is found.
pub fn capture_into<S: ItemSource + ?Sized>(
    source: &S,
    preset: &mut PresetConfig,
) -> Result<CaptureReport, CoreError> {
    let items = source.user_items();
    let mut equipped: Vec<ItemTypeId> = Vec::new();
    let mut carried: Vec<ItemTypeId> = Vec::new();
    let mut skipped_invalid = 0;

    for item in &items {
        if !item.type_id.is_valid() {
            debug!(instance = %item.instance, type_id = %item.type_id, "skipping placeholder item");
            skipped_invalid += 1;
            continue;
        }
        match classify_item(source, item) {
            Bucket::Equipped => equipped.push(item.type_id),
            Bucket::Carried => carried.push(item.type_id),
        }
    }

    if equipped.is_empty() && carried.is_empty() {
        return Err(CoreError::new(
            CoreErrorCode::NothingToSave,
            format!("no items found to save into '{}'", preset.name),
        ));
    }

    let report = CaptureReport {
        equipped: equipped.len(),
        carried: carried.len(),
        skipped_invalid,
    };
    preset.equipped_ids = equipped;
    preset.carried_ids = carried;

    info!(
        preset = %preset.name,
        equipped = report.equipped,
        carried = report.carried,
        "captured loadout"
    );
    Ok(report)
}
