use loadout_core::codec::{deserialize, serialize};
use loadout_core::item::ItemTypeId;
use loadout_core::preset::{PresetConfig, PresetStore};

fn ids(raw: &[i32]) -> Vec<ItemTypeId> {
    raw.iter().copied().map(ItemTypeId).collect()
}

fn preset(name: &str, equipped: &[i32], carried: &[i32]) -> PresetConfig {
    PresetConfig {
        name: name.to_string(),
        equipped_ids: ids(equipped),
        carried_ids: ids(carried),
    }
}

#[test]
fn roundtrip_preserves_awkward_names_and_id_order() {
    let store = PresetStore::from_presets(vec![
        preset("plain", &[10, 10, 3], &[20]),
        preset("quote \" and back\\slash", &[], &[7, 1, 7]),
        preset("multi\nline\r\nwith\ttab", &[-1, 0, 5], &[]),
        preset("", &[], &[]),
        preset("unicode 预设 ✓", &[2147483647], &[-2147483648]),
    ]);

    let text = serialize(&store);
    assert_eq!(deserialize(&text), store);
}

#[test]
fn serialize_emits_fields_in_fixed_order() {
    let store = PresetStore::from_presets(vec![preset("A", &[1], &[2])]);
    let text = serialize(&store);

    let name_at = text.find("\"PresetName\"").expect("name field");
    let equipped_at = text.find("\"EquippedItemTypeIDs\"").expect("equipped field");
    let carried_at = text.find("\"InventoryItemTypeIDs\"").expect("carried field");
    assert!(name_at < equipped_at);
    assert!(equipped_at < carried_at);
    assert_eq!(serialize(&store), text);
}

#[test]
fn empty_object_recovers_no_presets_and_falls_back_to_defaults() {
    let store = deserialize("{}");
    assert!(store.is_empty());
    assert_eq!(store.or_default(), PresetStore::default());
}

#[test]
fn degenerate_inputs_yield_empty_store() {
    for text in ["", "   \n\t", "null", "[]", "{\"Presets\": []}", "{\"Presets\": 5}"] {
        assert!(deserialize(text).is_empty(), "expected no presets for {text:?}");
    }
}

#[test]
fn unreadable_text_yields_empty_store() {
    assert!(deserialize("this is not a preset file").is_empty());
    assert!(deserialize("{\"Presets\": [ {\"PresetName\": \"cut off").is_empty());
}

#[test]
fn preset_count_is_not_assumed() {
    let store = PresetStore::from_presets(
        (0..7)
            .map(|i| preset(&format!("slot {i}"), &[i + 1], &[]))
            .collect(),
    );
    let loaded = deserialize(&serialize(&store));
    assert_eq!(loaded.len(), 7);
    assert_eq!(loaded.presets()[6].equipped_ids, ids(&[7]));
}

#[test]
fn legacy_documents_with_string_lists_and_junk_entries_load() {
    let text = r#"

    {
      "Presets": [
        {
          "PresetName": "Old",
          "EquippedItemTypeIDs": "12, 13 ,x, 14",
          "InventoryItemTypeIDs": [5, "6", 7.5, null]
        },
        "not a preset",
        {
          "EquippedItemTypeIDs": [1]
        }
      ],
      "Unrelated": true
    }

    "#;

    let store = deserialize(text);
    assert_eq!(store.len(), 2);
    assert_eq!(store.presets()[0], preset("Old", &[12, 13, 14], &[5, 6]));
    assert_eq!(store.presets()[1].name, "");

    let store = store.or_default();
    assert_eq!(store.presets()[1].name, "Preset 2");
    assert_eq!(store.presets()[1].equipped_ids, ids(&[1]));
}
