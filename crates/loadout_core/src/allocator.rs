//! Reconciles a preset against the items on the user and in storage.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::classifier::Bucket;
use crate::core_api::{
    AllocationStep, ApplyPolicy, ApplyReport, CoreError, CoreErrorCode, StepOutcome,
};
use crate::item::{
    InstanceId, ItemMover, ItemRecord, ItemSource, ItemTypeId, MergePolicy, Possession, Target,
};
use crate::preset::PresetConfig;

pub fn apply_preset<H: ItemSource + ItemMover + ?Sized>(
    preset: &PresetConfig,
    host: &mut H,
    policy: ApplyPolicy,
) -> Result<ApplyReport, CoreError> {
    if preset.is_empty() {
        return Err(CoreError::new(
            CoreErrorCode::EmptyPreset,
            format!(
                "preset '{}' is empty, save a loadout into it first",
                preset.name
            ),
        ));
    }

    let mut report = ApplyReport {
        policy,
        ..ApplyReport::default()
    };

    if policy == ApplyPolicy::ClearThenReapply {
        let on_user = host.user_items();
        report.cleared_to_storage = host.bulk_relocate_to_storage(&on_user);
        info!(
            cleared = report.cleared_to_storage,
            of = on_user.len(),
            "sent user items to storage before applying"
        );
    }

    // Taken once: items moved in this run never satisfy later entries.
    let user_items = match policy {
        ApplyPolicy::SkipIfPresent => host.user_items(),
        ApplyPolicy::ClearThenReapply => Vec::new(),
    };
    let storage_items = host.enumerate_items(Possession::Storage);
    debug!(
        on_user = user_items.len(),
        in_storage = storage_items.len(),
        "snapshotted item pools"
    );

    let mut pass = AllocationPass {
        user_items: &user_items,
        storage_items: &storage_items,
        claimed: HashSet::new(),
        report: &mut report,
    };
    for &type_id in &preset.equipped_ids {
        pass.resolve(host, Bucket::Equipped, type_id);
    }
    for &type_id in &preset.carried_ids {
        pass.resolve(host, Bucket::Carried, type_id);
    }

    info!(
        preset = %preset.name,
        policy = policy.as_str(),
        moved = report.moved_from_storage,
        already = report.already_satisfied,
        missing = report.missing,
        failed = report.failed,
        "applied preset"
    );
    Ok(report)
}

struct AllocationPass<'a> {
    user_items: &'a [ItemRecord],
    storage_items: &'a [ItemRecord],
    claimed: HashSet<InstanceId>,
    report: &'a mut ApplyReport,
}

impl AllocationPass<'_> {
    fn resolve<M: ItemMover + ?Sized>(
        &mut self,
        mover: &mut M,
        bucket: Bucket,
        type_id: ItemTypeId,
    ) {
        let outcome = self.decide(mover, bucket, type_id);
        match outcome {
            StepOutcome::AlreadyPresent => self.report.already_satisfied += 1,
            StepOutcome::Moved(_) => self.report.moved_from_storage += 1,
            StepOutcome::MoveFailed(_) => self.report.failed += 1,
            StepOutcome::Missing => self.report.missing += 1,
        }
        self.report.steps.push(AllocationStep {
            bucket,
            type_id,
            outcome,
        });
    }

    fn decide<M: ItemMover + ?Sized>(
        &mut self,
        mover: &mut M,
        bucket: Bucket,
        type_id: ItemTypeId,
    ) -> StepOutcome {
        if !type_id.is_valid() {
            warn!(%type_id, "preset holds an invalid type id");
            return StepOutcome::Missing;
        }

        if self.user_items.iter().any(|item| item.type_id == type_id) {
            debug!(%type_id, bucket = bucket.as_str(), "already on user");
            return StepOutcome::AlreadyPresent;
        }

        let Some(candidate) = self
            .storage_items
            .iter()
            .find(|item| item.type_id == type_id && !self.claimed.contains(&item.instance))
        else {
            debug!(%type_id, bucket = bucket.as_str(), "not found in storage");
            return StepOutcome::Missing;
        };

        self.claimed.insert(candidate.instance);
        let (target, merge) = match bucket {
            Bucket::Equipped => (Target::Equip, MergePolicy::KeepSeparate),
            Bucket::Carried => (Target::Carry, MergePolicy::AllowMerge),
        };
        if mover.relocate(candidate, target, merge) {
            debug!(%type_id, instance = %candidate.instance, ?target, "moved from storage");
            StepOutcome::Moved(candidate.instance)
        } else {
            warn!(%type_id, instance = %candidate.instance, ?target, "host refused to move item");
            StepOutcome::MoveFailed(candidate.instance)
        }
    }
}
