//! Labor allocator: staffs active buildings of the acting state from their
//! province's unemployed pool, or deactivates them on shortage.
//!
//! Keeps the population invariant `employed + unemployed == total`: workers
//! only ever move between the two pools, never appear or vanish.

use crate::state::{BuildingStatus, WorldState};
use rustc_hash::FxHashMap;
use tracing::instrument;

const TAG: &str = "[employment]";

#[instrument(skip_all, name = "employment")]
pub fn allocate_workers(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let WorldState {
        ref state_name,
        ref mut buildings,
        ref mut population,
        ref templates,
        ..
    } = *state;

    let template_by_name: FxHashMap<&str, usize> = templates
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();
    let population_index: FxHashMap<String, usize> = population
        .iter()
        .enumerate()
        .map(|(i, p)| (p.province_id.clone(), i))
        .collect();

    for building in buildings.iter_mut() {
        if !building.is_active() || building.building_owner != *state_name {
            continue;
        }
        let Some(&template_idx) = template_by_name.get(building.building_name.as_str()) else {
            messages.push(format!(
                "{TAG} no template named \"{}\" for the building in province \"{}\"; skipped",
                building.building_name, building.province_id
            ));
            continue;
        };
        let template = &templates[template_idx];
        let required = template.effective_required_workers();
        if required == 0 {
            continue;
        }
        let Some(&pop_idx) = population_index.get(&building.province_id) else {
            messages.push(format!(
                "{TAG} no population record for province \"{}\" hosting building \"{}\"; skipped",
                building.province_id, building.building_name
            ));
            continue;
        };
        let pop = &mut population[pop_idx];

        if pop.unemployed_workers < required {
            messages.push(format!(
                "{TAG} building \"{}\" in province \"{}\" deactivated: not enough free workers \
                 (required: {required}, free: {}, employed: {}, total: {})",
                building.building_name,
                building.province_id,
                pop.unemployed_workers,
                pop.employed_workers,
                pop.total_workers
            ));
            building.status = BuildingStatus::Inactive;
            continue;
        }

        pop.unemployed_workers -= required;
        pop.employed_workers += required;
        for requirement in &template.required_workers_professions {
            *pop.professions
                .entry(requirement.profession.clone())
                .or_insert(0) += requirement.quantity;
        }
        messages.push(format!(
            "{TAG} building \"{}\" in province \"{}\" staffed with {required} worker(s) \
             (free: {}, employed: {}, total: {})",
            building.building_name,
            building.province_id,
            pop.unemployed_workers,
            pop.employed_workers,
            pop.total_workers
        ));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        BuildingInstance, BuildingTemplate, PopulationRecord, ProfessionRequirement, Province,
    };
    use crate::testing::WorldStateBuilder;

    fn pop(province: &str, total: u32, employed: u32) -> PopulationRecord {
        PopulationRecord {
            province_id: province.into(),
            total_workers: total,
            employed_workers: employed,
            unemployed_workers: total - employed,
            ..Default::default()
        }
    }

    fn staffed_template(required: u32) -> BuildingTemplate {
        let mut t = BuildingTemplate::named("factory");
        t.required_workers = required;
        t
    }

    #[test]
    fn test_staffing_moves_workers_between_pools() {
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(Province::new("P1", "Nord"))
            .with_population(pop("P1", 10, 2))
            .with_building(BuildingInstance::new("factory", "P1", "Nord"))
            .with_template(staffed_template(5))
            .build();

        allocate_workers(&mut state);
        let p = &state.population[0];
        assert_eq!(p.unemployed_workers, 3);
        assert_eq!(p.employed_workers, 7);
        assert_eq!(p.employed_workers + p.unemployed_workers, p.total_workers);
        assert!(state.buildings[0].is_active());
    }

    #[test]
    fn test_shortage_deactivates_and_leaves_pools() {
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(Province::new("P1", "Nord"))
            .with_population(pop("P1", 10, 7))
            .with_building(BuildingInstance::new("factory", "P1", "Nord"))
            .with_template(staffed_template(5))
            .build();

        let messages = allocate_workers(&mut state);
        assert!(!state.buildings[0].is_active());
        assert_eq!(state.population[0].unemployed_workers, 3);
        assert_eq!(state.population[0].employed_workers, 7);
        assert!(messages[0].contains("required: 5, free: 3"));
    }

    #[test]
    fn test_professions_are_recorded() {
        let mut template = BuildingTemplate::named("mine");
        template.required_workers_professions = vec![
            ProfessionRequirement {
                profession: "шахтёр".into(),
                quantity: 4,
            },
            ProfessionRequirement {
                profession: "инженер".into(),
                quantity: 1,
            },
        ];
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(Province::new("P1", "Nord"))
            .with_population(pop("P1", 10, 0))
            .with_building(BuildingInstance::new("mine", "P1", "Nord"))
            .with_template(template)
            .build();

        allocate_workers(&mut state);
        // Profession list overrides the flat count: 4 + 1 = 5 staffed.
        assert_eq!(state.population[0].employed_workers, 5);
        assert_eq!(state.population[0].professions["шахтёр"], 4);
        assert_eq!(state.population[0].professions["инженер"], 1);
    }

    #[test]
    fn test_missing_population_record_is_reported() {
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(Province::new("P1", "Nord"))
            .with_building(BuildingInstance::new("factory", "P1", "Nord"))
            .with_template(staffed_template(5))
            .build();

        let messages = allocate_workers(&mut state);
        assert!(messages[0].contains("no population record"));
        assert!(state.buildings[0].is_active());
    }
}
