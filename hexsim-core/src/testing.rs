//! Test fixtures shared across the pass tests.

use crate::config::Settings;
use crate::state::{BuildingInstance, BuildingTemplate, PopulationRecord, Province, WorldState};

/// Fluent [`WorldState`] constructor for tests. Starts from an empty world
/// owned by `state_name` and accumulates records in insertion order.
#[derive(Debug, Default)]
pub struct WorldStateBuilder {
    state: WorldState,
}

impl WorldStateBuilder {
    pub fn new(state_name: impl Into<String>) -> Self {
        Self {
            state: WorldState {
                state_name: state_name.into(),
                settings: Settings::default(),
                ..Default::default()
            },
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.state.settings = settings;
        self
    }

    pub fn with_province(mut self, province: Province) -> Self {
        self.state.provinces.push(province);
        self
    }

    pub fn with_building(mut self, building: BuildingInstance) -> Self {
        self.state.buildings.push(building);
        self
    }

    pub fn with_template(mut self, template: BuildingTemplate) -> Self {
        self.state.templates.push(template);
        self
    }

    pub fn with_population(mut self, population: PopulationRecord) -> Self {
        self.state.population.push(population);
        self
    }

    pub fn build(self) -> WorldState {
        self.state
    }
}
