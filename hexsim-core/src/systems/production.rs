//! Resource production ledger: active buildings of the acting state mint
//! their template's production rates straight into their own warehouse.
//!
//! Unlike extraction there is no province stock on the input side; the only
//! failure mode here is a dangling template reference.

use crate::state::{ResourceRate, WarehouseEntry, WorldState};
use rustc_hash::FxHashMap;
use tracing::instrument;

const TAG: &str = "[resource production]";

#[instrument(skip_all, name = "production")]
pub fn produce_resources(state: &mut WorldState) -> Vec<String> {
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
        let Some(rates) = templates[template_idx].resource_production.as_ref() else {
            continue;
        };

        let multiplier =
            building.building_level as f64 * building.building_modifiers.production_efficiency;
        let mut snapshot = Vec::with_capacity(rates.len());

        for rate in rates {
            let effective = rate.quantity * multiplier;
            snapshot.push(ResourceRate {
                resource: rate.resource.clone(),
                quantity: rate.quantity,
                current_quantity: effective,
            });
            building
                .warehouse
                .entry(rate.resource.clone())
                .or_insert(WarehouseEntry {
                    current_quantity: 0.0,
                    reserve_level: 0.0,
                })
                .current_quantity += effective;
        }

        building.resource_production = Some(snapshot);
        messages.push(format!(
            "{TAG} building \"{}\" in province \"{}\" produced: {}",
            building.building_name,
            building.province_id,
            snapshot_summary(building.resource_production.as_deref().unwrap_or_default())
        ));
    }

    messages
}

fn snapshot_summary(rates: &[ResourceRate]) -> String {
    rates
        .iter()
        .map(|r| format!("{} x{}", r.resource, r.current_quantity))
        .collect::<Vec<_>>()
        .join(", ")
}
