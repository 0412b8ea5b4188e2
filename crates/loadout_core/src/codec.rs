//! Text form of a [`PresetStore`].
//!
//! The document is pretty-printed JSON with the field names earlier releases
//! wrote, so old files keep loading:
//!
//! ```json
//! {
//!   "Presets": [
//!     {
//!       "PresetName": "Preset 1",
//!       "EquippedItemTypeIDs": [10, 10],
//!       "InventoryItemTypeIDs": [20]
//!     }
//!   ]
//! }
//! ```
//!
//! Decoding is lenient: anything it cannot make sense of is dropped rather
//! than reported, and the codec never invents presets. Falling back to the
//! bootstrap slots is [`PresetStore::or_default`]'s job.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::item::ItemTypeId;
use crate::preset::{PresetConfig, PresetStore};

const PRESETS_KEY: &str = "Presets";
const NAME_KEY: &str = "PresetName";
const EQUIPPED_KEY: &str = "EquippedItemTypeIDs";
const CARRIED_KEY: &str = "InventoryItemTypeIDs";
const LIST_SEPARATOR: char = ',';

#[derive(Serialize)]
struct StoreDocument<'a> {
    #[serde(rename = "Presets")]
    presets: Vec<PresetDocument<'a>>,
}

#[derive(Serialize)]
struct PresetDocument<'a> {
    #[serde(rename = "PresetName")]
    name: &'a str,
    #[serde(rename = "EquippedItemTypeIDs")]
    equipped: &'a [ItemTypeId],
    #[serde(rename = "InventoryItemTypeIDs")]
    carried: &'a [ItemTypeId],
}

pub fn serialize(store: &PresetStore) -> String {
    let document = StoreDocument {
        presets: store
            .presets()
            .iter()
            .map(|preset| PresetDocument {
                name: &preset.name,
                equipped: &preset.equipped_ids,
                carried: &preset.carried_ids,
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&document) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "failed to encode preset store");
            "{}".to_string()
        }
    }
}

pub fn deserialize(text: &str) -> PresetStore {
    let text = text.trim();
    if text.is_empty() {
        return PresetStore::from_presets(Vec::new());
    }

    let document: Value = match serde_json::from_str(text) {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, "preset document is not readable, recovering an empty store");
            return PresetStore::from_presets(Vec::new());
        }
    };

    let Some(blocks) = preset_blocks(&document) else {
        debug!("preset document has no preset list");
        return PresetStore::from_presets(Vec::new());
    };

    let presets: Vec<PresetConfig> = blocks.iter().filter_map(parse_preset_block).collect();
    if presets.len() != blocks.len() {
        warn!(
            skipped = blocks.len() - presets.len(),
            "ignored preset entries that are not objects"
        );
    }
    PresetStore::from_presets(presets)
}

fn preset_blocks(document: &Value) -> Option<&Vec<Value>> {
    document
        .get(PRESETS_KEY)
        .and_then(Value::as_array)
        .or_else(|| document.as_array())
}

fn parse_preset_block(block: &Value) -> Option<PresetConfig> {
    let fields = block.as_object()?;
    Some(PresetConfig {
        name: fields
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        equipped_ids: fields.get(EQUIPPED_KEY).map(parse_id_list).unwrap_or_default(),
        carried_ids: fields.get(CARRIED_KEY).map(parse_id_list).unwrap_or_default(),
    })
}

fn parse_id_list(value: &Value) -> Vec<ItemTypeId> {
    match value {
        Value::Array(entries) => entries.iter().filter_map(parse_id_entry).collect(),
        // Hand-written files sometimes carry the list as "1, 2, 3".
        Value::String(joined) => joined
            .split(LIST_SEPARATOR)
            .filter_map(parse_id_text)
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_id_entry(entry: &Value) -> Option<ItemTypeId> {
    match entry {
        Value::Number(number) => number
            .as_i64()
            .and_then(|raw| i32::try_from(raw).ok())
            .map(ItemTypeId),
        Value::String(text) => parse_id_text(text),
        _ => None,
    }
}

fn parse_id_text(text: &str) -> Option<ItemTypeId> {
    text.trim().parse::<i32>().ok().map(ItemTypeId)
}
