//! Resource extraction ledger: active buildings of the acting state pull
//! their template's extraction rates out of the province stock and into their
//! own warehouse.
//!
//! Per resource the effective per-turn rate is
//! `base quantity x building_level x extraction_efficiency`. A depleted or
//! missing deposit deactivates the building but the remaining resources of
//! the same building are still processed; one bad entry never stops the pass.

use crate::state::{
    BuildingStatus, ResourceRate, WarehouseEntry, WorldState,
};
use rustc_hash::FxHashMap;
use tracing::instrument;

const TAG: &str = "[resource extraction]";

#[instrument(skip_all, name = "extraction")]
pub fn extract_resources(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let WorldState {
        ref state_name,
        ref settings,
        ref mut provinces,
        ref mut buildings,
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
        let Some(rates) = templates[template_idx].resource_extraction.as_ref() else {
            continue;
        };
        let Some(&province_idx) = province_index.get(&building.province_id) else {
            messages.push(format!(
                "{TAG} building \"{}\" stands in unknown province \"{}\"; skipped",
                building.building_name, building.province_id
            ));
            continue;
        };
        let province = &mut provinces[province_idx];

        let multiplier =
            building.building_level as f64 * building.building_modifiers.extraction_efficiency;
        let mut snapshot = Vec::with_capacity(rates.len());

        for rate in rates {
            let effective = rate.quantity * multiplier;
            snapshot.push(ResourceRate {
                resource: rate.resource.clone(),
                quantity: rate.quantity,
                current_quantity: effective,
            });

            let Some(stock_idx) = province
                .resources
                .iter()
                .position(|r| r.resource == rate.resource && r.quantity > 0.0)
            else {
                messages.push(format!(
                    "{TAG} province \"{}\" has no \"{}\" left for building \"{}\"; building deactivated",
                    province.id, rate.resource, building.building_name
                ));
                building.status = BuildingStatus::Inactive;
                continue;
            };

            let available = province.resources[stock_idx].quantity;
            let drawn = if available < effective {
                messages.push(format!(
                    "{TAG} \"{}\" in province \"{}\" is short for building \"{}\": \
                     requested {effective}, drew {available}",
                    rate.resource, province.id, building.building_name
                ));
                available
            } else {
                effective
            };

            province.resources[stock_idx].quantity -= drawn;
            let remaining = province.resources[stock_idx].quantity;
            if remaining <= 0.0 {
                province.resources.remove(stock_idx);
                messages.push(format!(
                    "{TAG} \"{}\" in province \"{}\" is exhausted",
                    rate.resource, province.id
                ));
            } else if effective > 0.0 {
                let turns_left = (remaining / effective).ceil() as u32;
                if turns_left < settings.exhaustion_warning_cycles {
                    messages.push(format!(
                        "{TAG} \"{}\" in province \"{}\" will be exhausted in {turns_left} turn(s) \
                         at the current rate of building \"{}\"",
                        rate.resource, province.id, building.building_name
                    ));
                }
            }

            building
                .warehouse
                .entry(rate.resource.clone())
                .or_insert(WarehouseEntry {
                    current_quantity: 0.0,
                    reserve_level: 0.0,
                })
                .current_quantity += drawn;
        }

        building.resource_extraction = Some(snapshot);
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::state::{
        BuildingInstance, BuildingTemplate, Province, ResourceQuantity, ResourceStock,
    };
    use crate::testing::WorldStateBuilder;

    fn iron_mine_template(rate: f64) -> BuildingTemplate {
        let mut t = BuildingTemplate::named("mine");
        t.resource_extraction = Some(vec![ResourceQuantity {
            resource: "iron".into(),
            quantity: rate,
        }]);
        t
    }

    fn province_with_iron(quantity: f64) -> Province {
        let mut p = Province::new("P1", "Nord");
        p.resources.push(ResourceStock {
            resource: "iron".into(),
            quantity,
        });
        p
    }

    #[test]
    fn test_normal_draw_fills_warehouse() {
        let mut building = BuildingInstance::new("mine", "P1", "Nord");
        building.building_level = 2;
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(province_with_iron(100.0))
            .with_building(building)
            .with_template(iron_mine_template(3.0))
            .build();

        extract_resources(&mut state);
        // 3 x level 2 x efficiency 1 = 6 drawn.
        assert_eq!(state.provinces[0].resource_quantity("iron"), 94.0);
        assert_eq!(
            state.buildings[0].warehouse["iron"].current_quantity,
            6.0
        );
        let snapshot = state.buildings[0].resource_extraction.as_ref().unwrap();
        assert_eq!(snapshot[0].quantity, 3.0);
        assert_eq!(snapshot[0].current_quantity, 6.0);
    }

    #[test]
    fn test_partial_draw_removes_entry_and_warns() {
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(province_with_iron(5.0))
            .with_building(BuildingInstance::new("mine", "P1", "Nord"))
            .with_template(iron_mine_template(8.0))
            .build();

        let messages = extract_resources(&mut state);
        assert_eq!(state.buildings[0].warehouse["iron"].current_quantity, 5.0);
        assert!(state.provinces[0].resources.is_empty());
        assert!(messages.iter().any(|m| m.contains("requested 8, drew 5")));
        assert!(messages.iter().any(|m| m.contains("is exhausted")));
        // Shortage alone does not deactivate.
        assert!(state.buildings[0].is_active());
    }

    #[test]
    fn test_missing_resource_deactivates_but_continues() {
        let mut template = iron_mine_template(2.0);
        template
            .resource_extraction
            .as_mut()
            .unwrap()
            .push(ResourceQuantity {
                resource: "coal".into(),
                quantity: 1.0,
            });
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(province_with_iron(10.0))
            .with_building(BuildingInstance::new("mine", "P1", "Nord"))
            .with_template(template)
            .build();

        let messages = extract_resources(&mut state);
        assert!(!state.buildings[0].is_active());
        assert!(messages.iter().any(|m| m.contains("no \"coal\" left")));
        // Iron was still drawn before the coal entry failed.
        assert_eq!(state.buildings[0].warehouse["iron"].current_quantity, 2.0);
    }

    #[test]
    fn test_exhaustion_warning_threshold() {
        // 10 remaining after drawing 5 at rate 5 => 2 turns left, below the
        // default threshold of 3.
        let mut state = WorldStateBuilder::new("Nord")
            .with_settings(Settings::default())
            .with_province(province_with_iron(15.0))
            .with_building(BuildingInstance::new("mine", "P1", "Nord"))
            .with_template(iron_mine_template(5.0))
            .build();

        let messages = extract_resources(&mut state);
        assert!(messages
            .iter()
            .any(|m| m.contains("will be exhausted in 2 turn(s)")));
    }

    #[test]
    fn test_no_warning_at_exact_threshold() {
        // 15 remaining after drawing 5 at rate 5 => exactly 3 turns left,
        // which is not below the default threshold of 3.
        let mut state = WorldStateBuilder::new("Nord")
            .with_settings(Settings::default())
            .with_province(province_with_iron(20.0))
            .with_building(BuildingInstance::new("mine", "P1", "Nord"))
            .with_template(iron_mine_template(5.0))
            .build();

        let messages = extract_resources(&mut state);
        assert!(!messages.iter().any(|m| m.contains("will be exhausted")));
        assert_eq!(state.provinces[0].resource_quantity("iron"), 15.0);
    }

    #[test]
    fn test_inactive_and_foreign_buildings_skipped() {
        let mut idle = BuildingInstance::new("mine", "P1", "Nord");
        idle.status = BuildingStatus::Inactive;
        let foreign = BuildingInstance::new("mine", "P1", "Sud");
        let mut state = WorldStateBuilder::new("Nord")
            .with_province(province_with_iron(10.0))
            .with_building(idle)
            .with_building(foreign)
            .with_template(iron_mine_template(5.0))
            .build();

        extract_resources(&mut state);
        assert_eq!(state.provinces[0].resource_quantity("iron"), 10.0);
    }
}
