//! Simulation passes, one file per rule category.
//!
//! All passes share the same contract: `fn(&mut WorldState) -> Vec<String>`.
//! The returned strings are the player-facing event log for that pass; a bad
//! record is reported there and skipped, never aborting the sweep.
//!
//! The count/index helpers below are shared by the narrowing and limit
//! passes, which all start from the same building tallies.

pub mod availability;
pub mod consumption;
pub mod eligibility;
pub mod employment;
pub mod extraction;
pub mod land;
pub mod limits;
pub mod production;
pub mod required_buildings;

use crate::state::{BuildingInstance, Province, ProvinceId, Tag};
use rustc_hash::FxHashMap;

/// `province_id -> building_name -> instance count`.
pub fn building_counts_by_province(
    buildings: &[BuildingInstance],
) -> FxHashMap<ProvinceId, FxHashMap<String, i64>> {
    let mut counts: FxHashMap<ProvinceId, FxHashMap<String, i64>> = FxHashMap::default();
    for building in buildings {
        *counts
            .entry(building.province_id.clone())
            .or_default()
            .entry(building.building_name.clone())
            .or_insert(0) += 1;
    }
    counts
}

/// `owning state -> building_name -> instance count`, attributed through the
/// province a building stands in (not the building's own owner).
pub fn building_counts_by_state(
    buildings: &[BuildingInstance],
    provinces: &[Province],
) -> FxHashMap<Tag, FxHashMap<String, i64>> {
    let owner_of: FxHashMap<&str, &str> = provinces
        .iter()
        .map(|p| (p.id.as_str(), p.owner.as_str()))
        .collect();
    let mut counts: FxHashMap<Tag, FxHashMap<String, i64>> = FxHashMap::default();
    for building in buildings {
        let Some(owner) = owner_of.get(building.province_id.as_str()) else {
            continue;
        };
        *counts
            .entry((*owner).to_string())
            .or_default()
            .entry(building.building_name.clone())
            .or_insert(0) += 1;
    }
    counts
}

/// `building_name -> instance count` across the whole world.
pub fn building_counts_world(buildings: &[BuildingInstance]) -> FxHashMap<String, i64> {
    let mut counts: FxHashMap<String, i64> = FxHashMap::default();
    for building in buildings {
        *counts.entry(building.building_name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Narrows an allow-list in place to the entries satisfying `keep`,
/// preserving order, and returns the removed province IDs. Narrowing only
/// ever removes; re-seeding the lists is the eligibility recompute's job.
pub(crate) fn retain_matching(
    list: &mut Vec<ProvinceId>,
    mut keep: impl FnMut(&str) -> bool,
) -> Vec<ProvinceId> {
    let mut removed = Vec::new();
    list.retain(|id| {
        if keep(id) {
            true
        } else {
            removed.push(id.clone());
            false
        }
    });
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BuildingInstance;

    #[test]
    fn test_counts_by_province() {
        let buildings = vec![
            BuildingInstance::new("mine", "P1", "Nord"),
            BuildingInstance::new("mine", "P1", "Nord"),
            BuildingInstance::new("farm", "P2", "Sud"),
        ];
        let counts = building_counts_by_province(&buildings);
        assert_eq!(counts["P1"]["mine"], 2);
        assert_eq!(counts["P2"]["farm"], 1);
        assert!(counts["P1"].get("farm").is_none());
    }

    #[test]
    fn test_counts_by_state_follow_province_owner() {
        let provinces = vec![Province::new("P1", "Nord"), Province::new("P2", "Sud")];
        // Foreign-owned building in a Nord province counts toward Nord.
        let buildings = vec![
            BuildingInstance::new("mine", "P1", "Sud"),
            BuildingInstance::new("mine", "P2", "Sud"),
            BuildingInstance::new("mine", "P-unknown", "Sud"),
        ];
        let counts = building_counts_by_state(&buildings, &provinces);
        assert_eq!(counts["Nord"]["mine"], 1);
        assert_eq!(counts["Sud"]["mine"], 1);
    }

    #[test]
    fn test_retain_matching_preserves_order() {
        let mut list: Vec<ProvinceId> = vec!["P1".into(), "P2".into(), "P3".into()];
        let removed = retain_matching(&mut list, |id| id != "P2");
        assert_eq!(list, vec!["P1", "P3"]);
        assert_eq!(removed, vec!["P2"]);
    }
}
