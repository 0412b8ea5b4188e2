use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core_api::CoreError;
use crate::item::{ItemRecord, ItemRelations, ItemSource};

/// Which list of a preset an item on the user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucket {
    Equipped,
    Carried,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Equipped => "equipped",
            Self::Carried => "carried",
        }
    }
}

/// Container membership wins over slot attachment; an item with neither is
/// a top-level worn object such as the carry container itself.
pub fn classify(relations: ItemRelations) -> Bucket {
    if relations.has_container_membership {
        Bucket::Carried
    } else {
        Bucket::Equipped
    }
}

/// Like [`classify`], but a failed lookup falls back to `Equipped`.
pub fn classify_lookup(relations: Result<ItemRelations, CoreError>) -> Bucket {
    match relations {
        Ok(relations) => classify(relations),
        Err(e) => {
            warn!(error = %e, "relation lookup failed, treating item as equipped");
            Bucket::Equipped
        }
    }
}

pub fn classify_item<S: ItemSource + ?Sized>(source: &S, item: &ItemRecord) -> Bucket {
    let bucket = classify_lookup(source.classify_relations(item));
    debug!(
        instance = %item.instance,
        type_id = %item.type_id,
        bucket = bucket.as_str(),
        "classified item"
    );
    bucket
}

#[cfg(test)]
mod tests {
    use super::{Bucket, classify, classify_lookup};
    use crate::core_api::{CoreError, CoreErrorCode};
    use crate::item::ItemRelations;

    fn relations(container: bool, slot: bool) -> ItemRelations {
        ItemRelations {
            has_container_membership: container,
            has_slot_attachment: slot,
        }
    }

    #[test]
    fn container_membership_means_carried() {
        assert_eq!(classify(relations(true, false)), Bucket::Carried);
        assert_eq!(classify(relations(true, true)), Bucket::Carried);
    }

    #[test]
    fn slot_attachment_means_equipped() {
        assert_eq!(classify(relations(false, true)), Bucket::Equipped);
    }

    #[test]
    fn top_level_items_are_equipped() {
        assert_eq!(classify(relations(false, false)), Bucket::Equipped);
    }

    #[test]
    fn lookup_errors_fall_back_to_equipped() {
        let err = CoreError::new(CoreErrorCode::RelationLookup, "gone");
        assert_eq!(classify_lookup(Err(err)), Bucket::Equipped);
    }
}
