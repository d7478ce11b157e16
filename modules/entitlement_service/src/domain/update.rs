//! Field-masked partial update planning

use crate::contract::{EntitlementField, EntitlementPatch, FieldMask, FieldUpdate};

/// Compute the assignments a partial update actually performs.
///
/// The effective field set is `allow-list ∩ fields present in the patch`,
/// further intersected with the mask when one is given. The result is in
/// allow-list order; an empty result means the update is a no-op.
pub fn plan_updates(patch: &EntitlementPatch, mask: Option<&FieldMask>) -> Vec<FieldUpdate> {
    EntitlementField::ALL
        .into_iter()
        .filter(|field| mask.map_or(true, |m| m.contains(*field)))
        .filter_map(|field| patch.get(field))
        .collect()
}
