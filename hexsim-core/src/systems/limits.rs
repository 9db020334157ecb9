//! Count-based caps on how many instances of a building may exist per
//! province, per owning state, and worldwide.
//!
//! Like the other narrowing passes these only remove allow-list entries. The
//! `-1` sentinel disables a check; a missing limit key or any other negative
//! value is malformed input and skips that template with a message.

use super::{building_counts_by_province, building_counts_by_state, building_counts_world};
use crate::state::WorldState;
use rustc_hash::FxHashMap;
use tracing::instrument;

const TAG: &str = "[building limits]";

/// Validates one limit field. `Ok(None)` means the check is disabled.
fn resolve_limit(
    limit: Option<i64>,
    template_name: &str,
    field: &str,
) -> Result<Option<i64>, String> {
    match limit {
        None => Err(format!(
            "{TAG} template \"{template_name}\" has no {field}; skipped"
        )),
        Some(-1) => Ok(None),
        Some(value) if value < 0 => Err(format!(
            "{TAG} template \"{template_name}\" has malformed {field} {value}; skipped"
        )),
        Some(value) => Ok(Some(value)),
    }
}

/// Removes provinces that already hold `province_limit` or more instances.
#[instrument(skip_all, name = "province_limits")]
pub fn enforce_province_limits(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let counts = building_counts_by_province(&state.buildings);

    for template in state.templates.iter_mut() {
        let limit = match resolve_limit(template.province_limit, &template.name, "province_limit") {
            Ok(Some(limit)) => limit,
            Ok(None) => continue,
            Err(message) => {
                messages.push(message);
                continue;
            }
        };
        let count_in = |id: &str| {
            counts
                .get(id)
                .and_then(|c| c.get(&template.name))
                .copied()
                .unwrap_or(0)
        };
        for list in [
            &mut template.allowed_building_state,
            &mut template.allowed_building_others,
        ] {
            list.retain(|id| {
                let count = count_in(id);
                if count >= limit {
                    messages.push(format!(
                        "{TAG} province \"{id}\" removed for building \"{}\": \
                         province limit {limit} reached (built: {count})",
                        template.name
                    ));
                    false
                } else {
                    true
                }
            });
        }
    }

    messages
}

/// Clears our allow-list when the acting state is at `state_limit`, and
/// removes each foreign owner's provinces when that owner is at the limit.
/// Instances count toward the state owning the province they stand in.
#[instrument(skip_all, name = "state_limits")]
pub fn enforce_state_limits(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let counts = building_counts_by_state(&state.buildings, &state.provinces);
    let owner_of: FxHashMap<&str, &str> = state
        .provinces
        .iter()
        .map(|p| (p.id.as_str(), p.owner.as_str()))
        .collect();
    let state_name = state.state_name.clone();

    for template in state.templates.iter_mut() {
        let limit = match resolve_limit(template.state_limit, &template.name, "state_limit") {
            Ok(Some(limit)) => limit,
            Ok(None) => continue,
            Err(message) => {
                messages.push(message);
                continue;
            }
        };
        let count_for = |owner: &str| {
            counts
                .get(owner)
                .and_then(|c| c.get(&template.name))
                .copied()
                .unwrap_or(0)
        };

        let our_count = count_for(&state_name);
        if our_count >= limit && !template.allowed_building_state.is_empty() {
            messages.push(format!(
                "{TAG} our state reached the state limit {limit} for building \"{}\" \
                 (built: {our_count}); provinces removed: {}",
                template.name,
                template.allowed_building_state.join(", ")
            ));
            template.allowed_building_state.clear();
        }

        let mut reported: Vec<String> = Vec::new();
        template.allowed_building_others.retain(|id| {
            let Some(owner) = owner_of.get(id.as_str()) else {
                messages.push(format!(
                    "{TAG} province \"{id}\" listed for building \"{}\" is missing from the data; removed",
                    template.name
                ));
                return false;
            };
            let count = count_for(owner);
            if count >= limit {
                if !reported.contains(&(*owner).to_string()) {
                    reported.push((*owner).to_string());
                    messages.push(format!(
                        "{TAG} state \"{owner}\" reached the state limit {limit} for building \"{}\" (built: {count})",
                        template.name
                    ));
                }
                false
            } else {
                true
            }
        });
    }

    messages
}

/// Clears both allow-lists once `world_limit` instances exist anywhere.
#[instrument(skip_all, name = "world_limits")]
pub fn enforce_world_limits(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let counts = building_counts_world(&state.buildings);

    for template in state.templates.iter_mut() {
        let limit = match resolve_limit(template.world_limit, &template.name, "world_limit") {
            Ok(Some(limit)) => limit,
            Ok(None) => continue,
            Err(message) => {
                messages.push(message);
                continue;
            }
        };
        let count = counts.get(&template.name).copied().unwrap_or(0);
        if count >= limit
            && !(template.allowed_building_state.is_empty()
                && template.allowed_building_others.is_empty())
        {
            messages.push(format!(
                "{TAG} world limit {limit} reached for building \"{}\" (built: {count}); \
                 no further placement anywhere",
                template.name
            ));
            template.allowed_building_state.clear();
            template.allowed_building_others.clear();
        }
    }

    messages
}
