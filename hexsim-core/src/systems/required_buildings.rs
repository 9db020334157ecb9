//! Remove-only narrowing of allow-lists by building-count prerequisites.
//!
//! Two scopes share one criteria grammar ([`CountCriteria`]):
//! * province scope: a listed province must itself contain the required
//!   buildings (`province_required_buildings`);
//! * state scope: the state owning the province must, across all of its
//!   provinces, satisfy `state_required_buildings`.
//!
//! Provinces are never added back here; only the eligibility recompute seeds
//! the lists.

use super::{building_counts_by_province, building_counts_by_state, retain_matching};
use crate::state::WorldState;
use rustc_hash::FxHashMap;
use tracing::instrument;

const TAG: &str = "[required buildings]";

/// Prunes provinces whose own building stock fails the template's
/// `province_required_buildings` criteria.
#[instrument(skip_all, name = "required_buildings_province")]
pub fn narrow_by_province_buildings(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let counts_by_province = building_counts_by_province(&state.buildings);
    let empty: FxHashMap<String, i64> = FxHashMap::default();

    for template in state.templates.iter_mut() {
        let Some(criteria) = template.province_required_buildings.as_ref() else {
            continue;
        };
        let matches = |id: &str| {
            let counts = counts_by_province.get(id).unwrap_or(&empty);
            criteria.evaluate(&|name| counts.get(name).copied().unwrap_or(0))
        };

        let removed = retain_matching(&mut template.allowed_building_state, matches);
        if !removed.is_empty() {
            messages.push(format!(
                "{TAG} our provinces {} no longer suit building \"{}\": the province must hold {}",
                removed.join(", "),
                template.name,
                criteria
            ));
        }
        let removed = retain_matching(&mut template.allowed_building_others, matches);
        if !removed.is_empty() {
            messages.push(format!(
                "{TAG} foreign provinces {} no longer suit building \"{}\": the province must hold {}",
                removed.join(", "),
                template.name,
                criteria
            ));
        }
    }

    messages
}

/// Prunes provinces whose owning state fails the template's
/// `state_required_buildings` criteria. A state passes or fails as a block:
/// all of its provinces survive or go together.
#[instrument(skip_all, name = "required_buildings_state")]
pub fn narrow_by_state_buildings(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let counts_by_state = building_counts_by_state(&state.buildings, &state.provinces);
    let owner_of: FxHashMap<String, String> = state
        .provinces
        .iter()
        .map(|p| (p.id.clone(), p.owner.clone()))
        .collect();
    let empty: FxHashMap<String, i64> = FxHashMap::default();
    let state_name = state.state_name.clone();

    for template in state.templates.iter_mut() {
        let Some(criteria) = template.state_required_buildings.as_ref() else {
            continue;
        };
        let state_matches = |owner: &str| {
            let counts = counts_by_state.get(owner).unwrap_or(&empty);
            criteria.evaluate(&|name| counts.get(name).copied().unwrap_or(0))
        };

        let removed = retain_matching(&mut template.allowed_building_state, |_| {
            state_matches(&state_name)
        });
        if !removed.is_empty() {
            messages.push(format!(
                "{TAG} our state no longer suits building \"{}\" (requires {}); provinces removed: {}",
                template.name,
                criteria,
                removed.join(", ")
            ));
        }
        let removed = retain_matching(&mut template.allowed_building_others, |id| {
            owner_of.get(id).is_some_and(|owner| state_matches(owner))
        });
        if !removed.is_empty() {
            messages.push(format!(
                "{TAG} foreign provinces {} no longer suit building \"{}\": their state must hold {}",
                removed.join(", "),
                template.name,
                criteria
            ));
        }
    }

    messages
}
