use std::fmt::Write as _;

use loadout_core::core_api::{
    AllocationStep, ApplyPolicy, ApplyReport, CaptureReport, StepOutcome,
};
use loadout_core::item::ItemTypeId;
use loadout_core::preset::{PresetConfig, PresetStore};
use serde_json::{Map as JsonMap, Value as JsonValue};

const SLOT_COL_WIDTH: usize = 5;
const NAME_COL_WIDTH: usize = 24;

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

pub fn render_store_text(store: &PresetStore) -> String {
    let mut out = String::new();
    for (index, preset) in store.presets().iter().enumerate() {
        let slot = format!("[{}]", index + 1);
        let _ = writeln!(
            out,
            "{slot:<SLOT_COL_WIDTH$}{:<NAME_COL_WIDTH$} {}",
            preset.name,
            preset.description()
        );
    }
    out
}

pub fn render_preset_text(index: usize, preset: &PresetConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Preset {}: {}", index + 1, preset.name);
    let _ = writeln!(out, "  {}", preset.description());
    let _ = writeln!(out, "  Equipped: {}", format_ids(&preset.equipped_ids));
    let _ = writeln!(out, "  Carried:  {}", format_ids(&preset.carried_ids));
    out
}

/// The message shown after an apply. Zero counters are left out.
pub fn render_apply_text(index: usize, report: &ApplyReport) -> String {
    let mut out = format!("Preset {} applied", index + 1);
    if report.policy == ApplyPolicy::ClearThenReapply {
        let _ = write!(out, "\n  Sent to storage first: {}", report.cleared_to_storage);
    }
    if report.moved_from_storage > 0 {
        let _ = write!(out, "\n  From storage: {}", report.moved_from_storage);
    }
    if report.already_satisfied > 0 {
        let _ = write!(out, "\n  Already on you: {}", report.already_satisfied);
    }
    if report.missing > 0 {
        let _ = write!(out, "\n  Missing: {}", report.missing);
    }
    if report.failed > 0 {
        let _ = write!(out, "\n  Failed to move: {}", report.failed);
    }
    out.push('\n');
    out
}

pub fn render_apply_steps_text(report: &ApplyReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        let _ = writeln!(
            out,
            "  {:<9}{:>8}  {}",
            step.bucket.as_str(),
            step.type_id.raw(),
            describe_outcome(step.outcome)
        );
    }
    out
}

pub fn render_capture_text(index: usize, report: &CaptureReport) -> String {
    let mut out = format!(
        "Preset {} saved\n  Equipped: {}  Carried: {}",
        index + 1,
        report.equipped,
        report.carried
    );
    if report.skipped_invalid > 0 {
        let _ = write!(out, "\n  Skipped placeholders: {}", report.skipped_invalid);
    }
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

pub fn render_store_json(store: &PresetStore) -> JsonValue {
    JsonValue::Array(
        store
            .presets()
            .iter()
            .enumerate()
            .map(|(index, preset)| render_preset_json(index, preset))
            .collect(),
    )
}

pub fn render_preset_json(index: usize, preset: &PresetConfig) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("slot".to_string(), JsonValue::from(index + 1));
    m.insert("name".to_string(), JsonValue::String(preset.name.clone()));
    m.insert(
        "description".to_string(),
        JsonValue::String(preset.description()),
    );
    m.insert("equipped".to_string(), ids_to_json(&preset.equipped_ids));
    m.insert("carried".to_string(), ids_to_json(&preset.carried_ids));
    JsonValue::Object(m)
}

pub fn render_apply_json(index: usize, report: &ApplyReport) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("slot".to_string(), JsonValue::from(index + 1));
    m.insert(
        "policy".to_string(),
        JsonValue::String(report.policy.as_str().to_string()),
    );
    m.insert(
        "cleared_to_storage".to_string(),
        JsonValue::from(report.cleared_to_storage),
    );
    m.insert(
        "moved_from_storage".to_string(),
        JsonValue::from(report.moved_from_storage),
    );
    m.insert(
        "already_satisfied".to_string(),
        JsonValue::from(report.already_satisfied),
    );
    m.insert("missing".to_string(), JsonValue::from(report.missing));
    m.insert("failed".to_string(), JsonValue::from(report.failed));
    m.insert(
        "steps".to_string(),
        JsonValue::Array(report.steps.iter().map(step_to_json).collect()),
    );
    JsonValue::Object(m)
}

pub fn render_capture_json(index: usize, report: &CaptureReport) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("slot".to_string(), JsonValue::from(index + 1));
    m.insert("equipped".to_string(), JsonValue::from(report.equipped));
    m.insert("carried".to_string(), JsonValue::from(report.carried));
    m.insert(
        "skipped_invalid".to_string(),
        JsonValue::from(report.skipped_invalid),
    );
    JsonValue::Object(m)
}

fn step_to_json(step: &AllocationStep) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "bucket".to_string(),
        JsonValue::String(step.bucket.as_str().to_string()),
    );
    m.insert("type_id".to_string(), JsonValue::from(step.type_id.raw()));
    let (outcome, instance) = match step.outcome {
        StepOutcome::AlreadyPresent => ("already_present", None),
        StepOutcome::Moved(instance) => ("moved", Some(instance)),
        StepOutcome::MoveFailed(instance) => ("move_failed", Some(instance)),
        StepOutcome::Missing => ("missing", None),
    };
    m.insert("outcome".to_string(), JsonValue::String(outcome.to_string()));
    m.insert(
        "instance".to_string(),
        match instance {
            Some(instance) => JsonValue::from(instance.0),
            None => JsonValue::Null,
        },
    );
    JsonValue::Object(m)
}

fn ids_to_json(ids: &[ItemTypeId]) -> JsonValue {
    JsonValue::Array(ids.iter().map(|id| JsonValue::from(id.raw())).collect())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn format_ids(ids: &[ItemTypeId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_outcome(outcome: StepOutcome) -> String {
    match outcome {
        StepOutcome::AlreadyPresent => "already on you".to_string(),
        StepOutcome::Moved(instance) => format!("moved {instance}"),
        StepOutcome::MoveFailed(instance) => format!("could not move {instance}"),
        StepOutcome::Missing => "missing".to_string(),
    }
}
