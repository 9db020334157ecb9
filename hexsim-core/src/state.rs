//! Typed snapshot of the simulated world: provinces, buildings, templates,
//! population, and the acting state for the current turn.
//!
//! The original data lived as serialized JSON rows in a spreadsheet; here the
//! whole turn snapshot is one in-memory [`WorldState`], serialized only at the
//! storage boundary. Wire-format quirks of the source data (Russian status
//! strings, comma-separated attribute lists, the one-element `professions`
//! array) are preserved by serde adapters so existing save files keep loading.

use crate::config::Settings;
use crate::criteria::{CountCriteria, NumberCriteria, TextCriteria};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ProvinceId = String;
/// State (country) name, e.g. "Новороссия".
pub type Tag = String;

/// One resource deposit or stockpile entry in a province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStock {
    pub resource: String,
    pub quantity: f64,
}

/// A map province. Classification attributes (`landscapes`, `planet`, ...)
/// are criteria inputs only; the resource and arable-land fields are mutated
/// by the ledger and allocator passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    /// Owning state name; empty string means unowned.
    #[serde(default)]
    pub owner: Tag,
    #[serde(default)]
    pub resources: Vec<ResourceStock>,
    #[serde(default)]
    pub free_arable_land: f64,
    #[serde(default)]
    pub occupied_arable_land: f64,
    #[serde(default)]
    pub total_arable_land: f64,
    #[serde(default, with = "attr_list")]
    pub landscapes: Vec<String>,
    #[serde(default, with = "attr_list")]
    pub planet: Vec<String>,
    #[serde(default, with = "attr_list")]
    pub province_culture: Vec<String>,
    #[serde(default, with = "attr_list")]
    pub province_religion: Vec<String>,
    #[serde(default, with = "attr_list")]
    pub province_climate: Vec<String>,
    #[serde(default)]
    pub province_radiation: f64,
    #[serde(default)]
    pub province_pollution: f64,
    #[serde(default)]
    pub province_stability: f64,
}

impl Province {
    pub fn new(id: impl Into<ProvinceId>, owner: impl Into<Tag>) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            ..Default::default()
        }
    }

    /// Current stock of a resource, zero when the entry is absent.
    pub fn resource_quantity(&self, resource: &str) -> f64 {
        self.resources
            .iter()
            .find(|r| r.resource == resource)
            .map_or(0.0, |r| r.quantity)
    }
}

/// Building activity status. The wire values are the Russian strings used by
/// the original save data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingStatus {
    #[default]
    #[serde(rename = "Активная")]
    Active,
    #[serde(rename = "Неактивная")]
    Inactive,
}

/// Per-instance efficiency multipliers applied to the template's base rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingModifiers {
    #[serde(default = "default_efficiency")]
    pub extraction_efficiency: f64,
    #[serde(default = "default_efficiency")]
    pub production_efficiency: f64,
    #[serde(default = "default_efficiency")]
    pub consumption_efficiency: f64,
    #[serde(default = "default_efficiency")]
    pub land_efficiency: f64,
}

fn default_efficiency() -> f64 {
    1.0
}

impl Default for BuildingModifiers {
    fn default() -> Self {
        Self {
            extraction_efficiency: 1.0,
            production_efficiency: 1.0,
            consumption_efficiency: 1.0,
            land_efficiency: 1.0,
        }
    }
}

/// One warehouse slot of a building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseEntry {
    #[serde(default)]
    pub current_quantity: f64,
    #[serde(default)]
    pub reserve_level: f64,
}

/// A resource flow rate: `quantity` is the template's base per-level rate,
/// `current_quantity` the effective per-turn amount after scaling by building
/// level and efficiency. Ledger passes write this snapshot onto the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRate {
    pub resource: String,
    pub quantity: f64,
    pub current_quantity: f64,
}

/// A constructed building in a province.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingInstance {
    pub building_name: String,
    pub province_id: ProvinceId,
    pub building_owner: Tag,
    #[serde(default)]
    pub status: BuildingStatus,
    #[serde(default = "default_level")]
    pub building_level: u32,
    #[serde(default)]
    pub building_modifiers: BuildingModifiers,
    /// Per-resource inventory. BTreeMap keeps message ordering deterministic.
    #[serde(default)]
    pub warehouse: BTreeMap<String, WarehouseEntry>,
    #[serde(default)]
    pub used_arable_land: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_extraction: Option<Vec<ResourceRate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_production: Option<Vec<ResourceRate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_consumption: Option<Vec<ResourceRate>>,
}

fn default_level() -> u32 {
    1
}

impl BuildingInstance {
    pub fn new(
        building_name: impl Into<String>,
        province_id: impl Into<ProvinceId>,
        building_owner: impl Into<Tag>,
    ) -> Self {
        Self {
            building_name: building_name.into(),
            province_id: province_id.into(),
            building_owner: building_owner.into(),
            building_level: 1,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BuildingStatus::Active
    }
}

/// A base resource quantity in a template's extraction/production/consumption
/// list, before level and efficiency scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceQuantity {
    pub resource: String,
    pub quantity: f64,
}

/// Worker demand for one profession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionRequirement {
    pub profession: String,
    pub quantity: u32,
}

/// Static configuration for one building type. Everything is fixed except the
/// two `allowed_building_*` lists, which the eligibility passes recompute or
/// prune each turn (ours vs. other states' provinces).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingTemplate {
    pub name: String,
    /// Count caps; `-1` means unlimited. Absent keys are malformed input for
    /// the corresponding limit pass (logged, template skipped there).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_landscapes: Option<TextCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_planet: Option<TextCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_culture: Option<TextCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_religion: Option<TextCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_climate: Option<TextCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_radiation: Option<NumberCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_pollution: Option<NumberCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_stability: Option<NumberCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_required_buildings: Option<CountCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_required_buildings: Option<CountCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_extraction: Option<Vec<ResourceQuantity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_production: Option<Vec<ResourceQuantity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_consumption: Option<Vec<ResourceQuantity>>,
    #[serde(default)]
    pub required_arable_land: f64,
    #[serde(default)]
    pub required_workers: u32,
    #[serde(default)]
    pub required_workers_professions: Vec<ProfessionRequirement>,
    /// Allow-lists: provinces currently eligible for this building, split by
    /// ownership. Seeded by the full recompute pass, only ever shrunk by the
    /// narrowing passes afterwards.
    #[serde(default)]
    pub allowed_building_state: Vec<ProvinceId>,
    #[serde(default)]
    pub allowed_building_others: Vec<ProvinceId>,
}

impl BuildingTemplate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Worker demand per instance: the profession list wins when present,
    /// otherwise the flat `required_workers` count.
    pub fn effective_required_workers(&self) -> u32 {
        if self.required_workers_professions.is_empty() {
            self.required_workers
        } else {
            self.required_workers_professions
                .iter()
                .map(|p| p.quantity)
                .sum()
        }
    }
}

/// Workforce bookkeeping for one province.
///
/// Invariant: `employed_workers + unemployed_workers == total_workers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub province_id: ProvinceId,
    #[serde(default)]
    pub total_workers: u32,
    #[serde(default)]
    pub employed_workers: u32,
    #[serde(default)]
    pub unemployed_workers: u32,
    /// Workers per profession. The source data wraps this map in a
    /// one-element array; the adapter keeps that wire shape.
    #[serde(default, with = "professions_wire")]
    pub professions: BTreeMap<String, u32>,
}

/// The full turn snapshot plus the acting state, passed by reference into
/// every pass. Collections keep their storage row order; passes build their
/// own lookup indexes over them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldState {
    pub state_name: Tag,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub provinces: Vec<Province>,
    #[serde(default)]
    pub buildings: Vec<BuildingInstance>,
    #[serde(default)]
    pub templates: Vec<BuildingTemplate>,
    #[serde(default)]
    pub population: Vec<PopulationRecord>,
}

impl WorldState {
    pub fn province(&self, id: &str) -> Option<&Province> {
        self.provinces.iter().find(|p| p.id == id)
    }

    pub fn template(&self, name: &str) -> Option<&BuildingTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }
}

/// Accepts either a JSON array of strings or the legacy comma-separated
/// string form ("лес, равнина"), always serializing back as an array.
mod attr_list {
    use serde::de::{self, SeqAccess, Visitor};
    use serde::{Deserializer, Serialize, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(values: &[String], ser: S) -> Result<S::Ok, S::Error> {
        values.serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
        struct ListOrString;

        impl<'de> Visitor<'de> for ListOrString {
            type Value = Vec<String>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an array of strings or a comma-separated string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v.trim().is_empty() {
                    return Ok(Vec::new());
                }
                Ok(v.split(',').map(|s| s.trim().to_string()).collect())
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::new();
                while let Some(item) = seq.next_element::<String>()? {
                    out.push(item);
                }
                Ok(out)
            }
        }

        de.deserialize_any(ListOrString)
    }
}

/// The original stores `professions` as `[{"miner": 3, ...}]`, a single map
/// wrapped in a one-element array (a spreadsheet-storage artifact; only index
/// 0 is ever used). In memory it is a flat map; on the wire the one-element
/// array shape is kept. A bare map is also accepted on input.
mod professions_wire {
    use serde::de::{self, MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeSeq;
    use serde::{Deserializer, Serializer};
    use std::collections::BTreeMap;
    use std::fmt;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<String, u32>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = ser.serialize_seq(Some(1))?;
        seq.serialize_element(map)?;
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<BTreeMap<String, u32>, D::Error> {
        struct WrappedMap;

        impl<'de> Visitor<'de> for WrappedMap {
            type Value = BTreeMap<String, u32>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a profession map or a one-element array holding one")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, u32>()? {
                    out.insert(key, value);
                }
                Ok(out)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let first: Option<BTreeMap<String, u32>> = seq.next_element()?;
                // Drain any extra slots; nothing in the source ever used them.
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(first.unwrap_or_default())
            }
        }

        de.deserialize_any(WrappedMap)
    }
}
