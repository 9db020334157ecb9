//! Land allocator: reserves a province's free arable land for active
//! buildings of the acting state, or deactivates them on shortfall.
//!
//! Keeps the province invariant `free + occupied == total`: land only moves
//! between the free and occupied pools.

use crate::state::{BuildingStatus, WorldState};
use rustc_hash::FxHashMap;
use tracing::instrument;

const TAG: &str = "[arable land]";

#[instrument(skip_all, name = "land")]
pub fn allocate_arable_land(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let WorldState {
        ref state_name,
        ref mut buildings,
        ref mut provinces,
        ref templates,
        ..
    } = *state;

    let template_by_name: FxHashMap<&str, usize> = templates
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();
    let province_index: FxHashMap<String, usize> = provinces
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
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
        if template.required_arable_land <= 0.0 {
            continue;
        }
        let Some(&province_idx) = province_index.get(&building.province_id) else {
            messages.push(format!(
                "{TAG} building \"{}\" stands in unknown province \"{}\"; skipped",
                building.building_name, building.province_id
            ));
            continue;
        };
        let province = &mut provinces[province_idx];

        let required = template.required_arable_land
            * building.building_level as f64
            * building.building_modifiers.land_efficiency;

        if province.free_arable_land < required {
            messages.push(format!(
                "{TAG} building \"{}\" in province \"{}\" deactivated: not enough free arable \
                 land (required: {required}, total: {}, occupied: {}, free: {})",
                building.building_name,
                province.id,
                province.total_arable_land,
                province.occupied_arable_land,
                province.free_arable_land
            ));
            building.status = BuildingStatus::Inactive;
            continue;
        }

        province.free_arable_land -= required;
        province.occupied_arable_land += required;
        building.used_arable_land = required;
        messages.push(format!(
            "{TAG} building \"{}\" in province \"{}\" occupies {required} arable land \
             (free: {}, occupied: {})",
            building.building_name,
            province.id,
            province.free_arable_land,
            province.occupied_arable_land
        ));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BuildingInstance, BuildingTemplate, Province};
    use crate::testing::WorldStateBuilder;

    fn farm_template(land: f64) -> BuildingTemplate {
        let mut t = BuildingTemplate::named("farm");
        t.required_arable_land = land;
        t
    }

    fn province_with_land(free: f64, occupied: f64) -> Province {
        let mut p = Province::new("P1", "Nord");
        p.free_arable_land = free;
        p.occupied_arable_land = occupied;
        p.total_arable_land = free + occupied;
        p
    }

    #[test]
    fn test_allocation_moves_land_between_pools() {
        let mut building = BuildingInstance::new("farm", "P1", "Nord");
        building.building_level = 2;
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(province_with_land(10.0, 0.0))
            .with_building(building)
            .with_template(farm_template(3.0))
            .build();

        allocate_arable_land(&mut state);
        let p = &state.provinces[0];
        // 3 x level 2 x efficiency 1 = 6.
        assert_eq!(p.free_arable_land, 4.0);
        assert_eq!(p.occupied_arable_land, 6.0);
        assert_eq!(p.free_arable_land + p.occupied_arable_land, p.total_arable_land);
        assert_eq!(state.buildings[0].used_arable_land, 6.0);
    }

    #[test]
    fn test_shortfall_deactivates_and_leaves_pools() {
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(province_with_land(2.0, 8.0))
            .with_building(BuildingInstance::new("farm", "P1", "Nord"))
            .with_template(farm_template(3.0))
            .build();

        let messages = allocate_arable_land(&mut state);
        assert!(!state.buildings[0].is_active());
        assert_eq!(state.provinces[0].free_arable_land, 2.0);
        assert_eq!(state.provinces[0].occupied_arable_land, 8.0);
        assert!(messages[0].contains("required: 3, total: 10, occupied: 8, free: 2"));
    }

    #[test]
    fn test_no_land_requirement_is_skipped() {
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(province_with_land(10.0, 0.0))
            .with_building(BuildingInstance::new("farm", "P1", "Nord"))
            .with_template(farm_template(0.0))
            .build();

        assert!(allocate_arable_land(&mut state).is_empty());
        assert_eq!(state.provinces[0].free_arable_land, 10.0);
    }
}
