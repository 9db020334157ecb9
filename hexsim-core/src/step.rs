//! One simulated turn: the fixed pass sequence over a [`WorldState`].

use crate::state::WorldState;
use crate::systems::{
    availability, consumption, eligibility, employment, extraction, land, limits, production,
    required_buildings,
};
use tracing::instrument;

/// Ordered, player-facing event log of one turn.
#[derive(Debug, Clone, Default)]
pub struct TurnReport {
    pub messages: Vec<String>,
}

type Pass = fn(&mut WorldState) -> Vec<String>;

/// Eligibility passes first (recompute, then remove-only narrowing), ledgers
/// next (extraction and production fill warehouses before consumption drains
/// them), allocators last. Order is part of the semantics.
const PASSES: &[Pass] = &[
    eligibility::recompute_base_eligibility,
    required_buildings::narrow_by_province_buildings,
    required_buildings::narrow_by_state_buildings,
    availability::narrow_by_resource_stocks,
    availability::narrow_by_workers,
    availability::narrow_by_arable_land,
    limits::enforce_province_limits,
    limits::enforce_state_limits,
    limits::enforce_world_limits,
    extraction::extract_resources,
    production::produce_resources,
    consumption::consume_resources,
    employment::allocate_workers,
    land::allocate_arable_land,
];

/// Runs every pass once, in order, collecting their messages. Passes recover
/// locally from bad records, so the turn always runs to completion.
#[instrument(skip_all, name = "turn")]
pub fn run_turn(state: &mut WorldState) -> TurnReport {
    let mut report = TurnReport::default();
    for pass in PASSES {
        let messages = pass(state);
        log::info!("pass produced {} message(s)", messages.len());
        report.messages.extend(messages);
    }
    report
}
