//! Resource consumption ledger: active buildings of the acting state burn
//! their template's input rates from their own warehouse.
//!
//! Consumption is all-or-nothing per building: if any input is short, every
//! shortage is reported, the building goes Inactive, and nothing is deducted.

use crate::state::{BuildingStatus, ResourceRate, WorldState};
use rustc_hash::FxHashMap;
use tracing::instrument;

const TAG: &str = "[resource consumption]";

#[instrument(skip_all, name = "consumption")]
pub fn consume_resources(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let WorldState {
        ref state_name,
        ref mut buildings,
        ref templates,
        ..
    } = *state;

    let template_by_name: FxHashMap<&str, usize> = templates
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
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
        let Some(rates) = templates[template_idx].resource_consumption.as_ref() else {
            continue;
        };

        let multiplier =
            building.building_level as f64 * building.building_modifiers.consumption_efficiency;
        let mut snapshot = Vec::with_capacity(rates.len());
        let mut shortages = Vec::new();

        // First sweep only checks; the warehouse is untouched until every
        // input is known to be covered.
        for rate in rates {
            let effective = rate.quantity * multiplier;
            snapshot.push(ResourceRate {
                resource: rate.resource.clone(),
                quantity: rate.quantity,
                current_quantity: effective,
            });
            let available = building
                .warehouse
                .get(&rate.resource)
                .map_or(0.0, |e| e.current_quantity);
            if available < effective {
                shortages.push(format!(
                    "{TAG} building \"{}\" in province \"{}\" lacks \"{}\" \
                     (required: {effective}, available: {available})",
                    building.building_name, building.province_id, rate.resource
                ));
            }
        }

        if shortages.is_empty() {
            for rate in &snapshot {
                if let Some(entry) = building.warehouse.get_mut(&rate.resource) {
                    entry.current_quantity -= rate.current_quantity;
                }
            }
        } else {
            messages.append(&mut shortages);
            messages.push(format!(
                "{TAG} building \"{}\" in province \"{}\" deactivated: inputs not covered",
                building.building_name, building.province_id
            ));
            building.status = BuildingStatus::Inactive;
        }

        building.resource_consumption = Some(snapshot);
    }

    messages
}
