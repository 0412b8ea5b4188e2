use serde::{Deserialize, Serialize};

use crate::classifier::Bucket;
use crate::item::{InstanceId, ItemTypeId};

/// How an apply treats items the user already has.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyPolicy {
    /// Leave matching items on the user and only fetch what is absent.
    #[default]
    SkipIfPresent,
    /// Send everything on the user to storage, then fetch every wanted id.
    ClearThenReapply,
}

impl ApplyPolicy {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::SkipIfPresent => "skip-if-present",
            Self::ClearThenReapply => "clear-then-reapply",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    AlreadyPresent,
    Moved(InstanceId),
    MoveFailed(InstanceId),
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllocationStep {
    pub bucket: Bucket,
    pub type_id: ItemTypeId,
    pub outcome: StepOutcome,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplyReport {
    pub policy: ApplyPolicy,
    pub cleared_to_storage: usize,
    pub moved_from_storage: usize,
    pub already_satisfied: usize,
    pub missing: usize,
    pub failed: usize,
    pub steps: Vec<AllocationStep>,
}

impl ApplyReport {
    pub fn resolved(&self) -> usize {
        self.moved_from_storage + self.already_satisfied
    }

    pub fn unresolved(&self) -> usize {
        self.missing + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved() == 0
    }

    pub fn claimed_instances(&self) -> Vec<InstanceId> {
        self.steps
            .iter()
            .filter_map(|step| match step.outcome {
                StepOutcome::Moved(instance) | StepOutcome::MoveFailed(instance) => Some(instance),
                StepOutcome::AlreadyPresent | StepOutcome::Missing => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureReport {
    pub equipped: usize,
    pub carried: usize,
    pub skipped_invalid: usize,
}

impl CaptureReport {
    pub fn total(&self) -> usize {
        self.equipped + self.carried
    }
}
