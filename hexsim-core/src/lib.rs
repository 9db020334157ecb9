//! # Hexsim Core
//!
//! Turn-based economic rules engine for a hex-map grand-strategy game.
//!
//! The engine is a sequence of pure-ish passes over one in-memory snapshot
//! ([`WorldState`]): building-eligibility narrowing driven by a small boolean
//! criteria DSL, resource extraction/production/consumption ledgers, and
//! worker/arable-land allocation. Each pass mutates the snapshot and returns
//! player-facing log messages; loading and persisting the snapshot is the
//! caller's job.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌──────────────┐
//! │  driver  │───▶│  run_turn   │───▶│  WorldState  │
//! │ (load)   │    │ (pass seq)  │    │  (mutated)   │
//! └──────────┘    └──────┬──────┘    └──────────────┘
//!                        │
//!                 ┌──────▼──────┐
//!                 │ TurnReport  │  ordered event-log messages
//!                 └─────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`WorldState`] | Full turn snapshot (provinces, buildings, templates, population) |
//! | [`BuildingTemplate`] | Static building config plus the derived allow-lists |
//! | [`TextCriteria`] / [`NumberCriteria`] / [`CountCriteria`] | Eligibility DSL |
//! | [`run_turn`] | Runs the fixed pass sequence for one turn |
//!
//! ## Pass contract
//!
//! Every pass is synchronous and single-threaded, touches the whole dataset,
//! and recovers locally: a malformed or dangling record produces a tagged
//! message and is skipped, never aborting the turn.

pub mod config;
pub mod criteria;
pub mod state;
pub mod step;
pub mod systems;
pub mod testing;

pub use config::Settings;
pub use criteria::{CountCriteria, CriteriaError, NumberCriteria, TextCriteria, TextNode};
pub use state::{
    BuildingInstance, BuildingModifiers, BuildingStatus, BuildingTemplate, PopulationRecord,
    ProfessionRequirement, Province, ProvinceId, ResourceQuantity, ResourceRate, ResourceStock,
    Tag, WarehouseEntry, WorldState,
};
pub use step::{run_turn, TurnReport};
