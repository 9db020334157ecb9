//! Full recompute of template allow-lists from the basic province criteria.
//!
//! This is the one pass allowed to *grow* the allow-lists: it evaluates every
//! attribute criterion of every template against every province and assigns
//! the freshly matched sets, partitioned into our provinces vs. everyone
//! else's. All later eligibility passes only remove entries, so between two
//! recomputes the lists act as a monotonically shrinking cache.

use crate::criteria::{NumberCriteria, TextCriteria};
use crate::state::{BuildingTemplate, Province, WorldState};
use tracing::instrument;

struct TextCheck {
    label: &'static str,
    criteria: fn(&BuildingTemplate) -> Option<&TextCriteria>,
    value: fn(&Province) -> &[String],
}

struct NumberCheck {
    label: &'static str,
    criteria: fn(&BuildingTemplate) -> Option<&NumberCriteria>,
    value: fn(&Province) -> f64,
}

/// Template requirement <-> province attribute pairs. Absence of the
/// requirement on a template skips that check entirely.
const TEXT_CHECKS: &[TextCheck] = &[
    TextCheck {
        label: "landscape",
        criteria: |t| t.required_landscapes.as_ref(),
        value: |p| p.landscapes.as_slice(),
    },
    TextCheck {
        label: "planet",
        criteria: |t| t.required_planet.as_ref(),
        value: |p| p.planet.as_slice(),
    },
    TextCheck {
        label: "culture",
        criteria: |t| t.required_culture.as_ref(),
        value: |p| p.province_culture.as_slice(),
    },
    TextCheck {
        label: "religion",
        criteria: |t| t.required_religion.as_ref(),
        value: |p| p.province_religion.as_slice(),
    },
    TextCheck {
        label: "climate",
        criteria: |t| t.required_climate.as_ref(),
        value: |p| p.province_climate.as_slice(),
    },
];

const NUMBER_CHECKS: &[NumberCheck] = &[
    NumberCheck {
        label: "radiation",
        criteria: |t| t.required_radiation.as_ref(),
        value: |p| p.province_radiation,
    },
    NumberCheck {
        label: "pollution",
        criteria: |t| t.required_pollution.as_ref(),
        value: |p| p.province_pollution,
    },
    NumberCheck {
        label: "stability",
        criteria: |t| t.required_stability.as_ref(),
        value: |p| p.province_stability,
    },
];

const TAG: &str = "[building criteria]";

/// Recomputes `allowed_building_state` / `allowed_building_others` for every
/// template from scratch. A province matches when every criterion present on
/// the template holds.
#[instrument(skip_all, name = "eligibility")]
pub fn recompute_base_eligibility(state: &mut WorldState) -> Vec<String> {
    let mut messages = Vec::new();
    let WorldState {
        ref state_name,
        ref provinces,
        ref mut templates,
        ..
    } = *state;

    for template in templates.iter_mut() {
        let mut matching_state = Vec::new();
        let mut matching_others = Vec::new();
        let mut failures: Vec<(String, Vec<String>)> = Vec::new();

        for province in provinces {
            let reasons = failed_checks(template, province);
            if reasons.is_empty() {
                if province.owner == *state_name {
                    matching_state.push(province.id.clone());
                } else {
                    matching_others.push(province.id.clone());
                }
            } else {
                failures.push((province.id.clone(), reasons));
            }
        }

        if !matching_state.is_empty() {
            messages.push(format!(
                "{TAG} building \"{}\" can be placed in our provinces: {}",
                template.name,
                matching_state.join(", ")
            ));
        }
        if !matching_others.is_empty() {
            messages.push(format!(
                "{TAG} building \"{}\" can be placed in foreign provinces: {}",
                template.name,
                matching_others.join(", ")
            ));
        }
        // Only when nothing fits anywhere is the per-province breakdown worth
        // the log volume.
        if matching_state.is_empty() && matching_others.is_empty() {
            for (province_id, reasons) in &failures {
                messages.push(format!(
                    "{TAG} province \"{}\" does not suit building \"{}\": {}",
                    province_id,
                    template.name,
                    reasons.join("; ")
                ));
            }
        }

        template.allowed_building_state = matching_state;
        template.allowed_building_others = matching_others;
    }

    messages
}

/// Every failed criterion for this province, formatted with required vs.
/// found values. Empty means the province matches.
fn failed_checks(template: &BuildingTemplate, province: &Province) -> Vec<String> {
    let mut reasons = Vec::new();
    for check in TEXT_CHECKS {
        if let Some(criteria) = (check.criteria)(template) {
            let values = (check.value)(province);
            if !criteria.evaluate(values) {
                let found = if values.is_empty() {
                    "none".to_string()
                } else {
                    values.join(", ")
                };
                reasons.push(format!(
                    "unsuitable {} (required: {}, found: {})",
                    check.label, criteria, found
                ));
            }
        }
    }
    for check in NUMBER_CHECKS {
        if let Some(criteria) = (check.criteria)(template) {
            let value = (check.value)(province);
            if !criteria.evaluate(value) {
                reasons.push(format!(
                    "unsuitable {} level (required: {}, found: {})",
                    check.label, criteria, value
                ));
            }
        }
    }
    reasons
}
