//! Remove-only narrowing by what a province can currently supply: resource
//! stocks, idle workers, and free arable land.
//!
//! All three checks compare against the template's *base* requirements; level
//! and efficiency scaling only applies once an instance exists (the ledger
//! and allocator passes).

use super::retain_matching;
use crate::state::{BuildingTemplate, PopulationRecord, Province, WorldState};
use rustc_hash::FxHashMap;
use tracing::instrument;

/// Applies one keep-predicate to both allow-lists of every template,
/// collecting a message per removed province.
fn narrow_both_lists(
    templates: &mut [BuildingTemplate],
    mut applies: impl FnMut(&BuildingTemplate) -> bool,
    mut keep: impl FnMut(&BuildingTemplate, &str) -> Result<(), String>,
    messages: &mut Vec<String>,
) {
    for template in templates.iter_mut() {
        if !applies(template) {
            continue;
        }
        // retain_matching needs &mut on the list while keep reads the rest of
        // the template, so split the failure bookkeeping out.
        let mut failures: Vec<String> = Vec::new();
        let snapshot = template.clone();
        for list in [
            &mut template.allowed_building_state,
            &mut template.allowed_building_others,
        ] {
            retain_matching(list, |id| match keep(&snapshot, id) {
                Ok(()) => true,
                Err(reason) => {
                    failures.push(reason);
                    false
                }
            });
        }
        messages.append(&mut failures);
    }
}

/// Drops provinces that no longer hold the template's base extraction inputs
/// in sufficient quantity.
#[instrument(skip_all, name = "resource_availability")]
pub fn narrow_by_resource_stocks(state: &mut WorldState) -> Vec<String> {
    const TAG: &str = "[resource availability]";
    let mut messages = Vec::new();
    let WorldState {
        ref provinces,
        ref mut templates,
        ..
    } = *state;
    let province_by_id: FxHashMap<&str, &Province> =
        provinces.iter().map(|p| (p.id.as_str(), p)).collect();

    narrow_both_lists(
        templates,
        |t| t.resource_extraction.as_ref().is_some_and(|r| !r.is_empty()),
        |template, id| {
            let Some(province) = province_by_id.get(id) else {
                return Err(format!(
                    "{TAG} province \"{id}\" listed for building \"{}\" is missing from the data; removed",
                    template.name
                ));
            };
            let required = template.resource_extraction.as_deref().unwrap_or_default();
            for entry in required {
                let available = province.resource_quantity(&entry.resource);
                if available < entry.quantity {
                    return Err(format!(
                        "{TAG} province \"{id}\" no longer suits building \"{}\": \
                         resource \"{}\" short (required: {}, available: {})",
                        template.name, entry.resource, entry.quantity, available
                    ));
                }
            }
            Ok(())
        },
        &mut messages,
    );

    messages
}

/// Drops provinces whose idle labor pool cannot staff one instance.
#[instrument(skip_all, name = "worker_availability")]
pub fn narrow_by_workers(state: &mut WorldState) -> Vec<String> {
    const TAG: &str = "[worker availability]";
    let mut messages = Vec::new();
    let WorldState {
        ref population,
        ref mut templates,
        ..
    } = *state;
    let population_by_id: FxHashMap<&str, &PopulationRecord> = population
        .iter()
        .map(|p| (p.province_id.as_str(), p))
        .collect();

    narrow_both_lists(
        templates,
        |t| t.effective_required_workers() > 0,
        |template, id| {
            let required = template.effective_required_workers();
            let Some(pop) = population_by_id.get(id) else {
                return Err(format!(
                    "{TAG} no population record for province \"{id}\" listed for building \"{}\"; removed",
                    template.name
                ));
            };
            if pop.unemployed_workers < required {
                return Err(format!(
                    "{TAG} province \"{id}\" no longer suits building \"{}\": not enough free \
                     workers (required: {required}, free: {}, total: {}, employed: {})",
                    template.name, pop.unemployed_workers, pop.total_workers, pop.employed_workers
                ));
            }
            Ok(())
        },
        &mut messages,
    );

    messages
}

/// Drops provinces without enough free arable land for one instance.
#[instrument(skip_all, name = "land_availability")]
pub fn narrow_by_arable_land(state: &mut WorldState) -> Vec<String> {
    const TAG: &str = "[land availability]";
    let mut messages = Vec::new();
    let WorldState {
        ref provinces,
        ref mut templates,
        ..
    } = *state;
    let province_by_id: FxHashMap<&str, &Province> =
        provinces.iter().map(|p| (p.id.as_str(), p)).collect();

    narrow_both_lists(
        templates,
        |t| t.required_arable_land > 0.0,
        |template, id| {
            let Some(province) = province_by_id.get(id) else {
                return Err(format!(
                    "{TAG} province \"{id}\" listed for building \"{}\" is missing from the data; removed",
                    template.name
                ));
            };
            if province.free_arable_land < template.required_arable_land {
                return Err(format!(
                    "{TAG} province \"{id}\" no longer suits building \"{}\": not enough free \
                     arable land (required: {}, total: {}, occupied: {}, free: {})",
                    template.name,
                    template.required_arable_land,
                    province.total_arable_land,
                    province.occupied_arable_land,
                    province.free_arable_land
                ));
            }
            Ok(())
        },
        &mut messages,
    );

    messages
}
