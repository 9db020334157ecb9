//! Tolerant snapshot loading.
//!
//! A snapshot is one JSON object with `state_name`, optional `settings`, and
//! the four record collections. Every collection element is parsed on its
//! own: a malformed element or one lacking its identifying key yields a
//! tagged message and is dropped, and loading continues. Only a missing
//! `state_name` or an unreadable file is fatal.

use hexsim_core::{
    BuildingInstance, BuildingTemplate, PopulationRecord, Province, Settings, WorldState,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot access snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot root must be a JSON object")]
    NotAnObject,
    #[error("snapshot is missing \"state_name\"")]
    MissingStateName,
}

/// A loaded world plus the per-record problems encountered on the way in.
#[derive(Debug)]
pub struct LoadedSnapshot {
    pub state: WorldState,
    pub messages: Vec<String>,
}

pub fn load_snapshot(path: &Path) -> Result<LoadedSnapshot, SnapshotError> {
    let reader = BufReader::new(File::open(path)?);
    let root: Value = serde_json::from_reader(reader)?;
    let Value::Object(mut root) = root else {
        return Err(SnapshotError::NotAnObject);
    };

    let state_name = root
        .get("state_name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SnapshotError::MissingStateName)?;

    let mut messages = Vec::new();

    let settings = match root.remove("settings") {
        None | Some(Value::Null) => Settings::default(),
        Some(value) => match serde_json::from_value(value) {
            Ok(settings) => settings,
            Err(err) => {
                messages.push(format!("[loader] bad settings record ({err}); defaults used"));
                Settings::default()
            }
        },
    };

    let provinces: Vec<Province> =
        parse_collection(root.remove("provinces"), "provinces", "id", &mut messages);
    let templates: Vec<BuildingTemplate> =
        parse_collection(root.remove("templates"), "templates", "name", &mut messages);
    let population: Vec<PopulationRecord> = parse_collection(
        root.remove("population"),
        "population",
        "province_id",
        &mut messages,
    );
    let buildings = parse_buildings(root.remove("buildings"), &mut messages);

    Ok(LoadedSnapshot {
        state: WorldState {
            state_name,
            settings,
            provinces,
            buildings,
            templates,
            population,
        },
        messages,
    })
}

pub fn save_snapshot(path: &Path, state: &WorldState) -> Result<(), SnapshotError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, state)?;
    Ok(())
}

/// Parses each array element independently, requiring `key` to be present
/// first so the message can name what was skipped.
fn parse_collection<T: DeserializeOwned>(
    value: Option<Value>,
    collection: &str,
    key: &str,
    messages: &mut Vec<String>,
) -> Vec<T> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Value::Array(elements) = value else {
        messages.push(format!("[loader] \"{collection}\" is not an array; ignored"));
        return Vec::new();
    };

    let mut out = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if element.get(key).is_none() {
            messages.push(format!(
                "[loader] {collection}[{index}] has no \"{key}\"; skipped"
            ));
            continue;
        }
        match serde_json::from_value(element) {
            Ok(record) => out.push(record),
            Err(err) => messages.push(format!(
                "[loader] {collection}[{index}] failed to parse ({err}); skipped"
            )),
        }
    }
    out
}

/// Buildings additionally allow one slot to hold an array of instances (the
/// source data packed several buildings into one cell); both shapes flatten
/// into a single list.
fn parse_buildings(value: Option<Value>, messages: &mut Vec<String>) -> Vec<BuildingInstance> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Value::Array(elements) = value else {
        messages.push("[loader] \"buildings\" is not an array; ignored".to_string());
        return Vec::new();
    };

    let mut out = Vec::new();
    for (index, element) in elements.into_iter().enumerate() {
        let nested = match element {
            Value::Array(nested) => nested,
            other => vec![other],
        };
        for element in nested {
            if element.get("province_id").is_none() {
                messages.push(format!(
                    "[loader] buildings[{index}] has no \"province_id\"; skipped"
                ));
                continue;
            }
            match serde_json::from_value(element) {
                Ok(record) => out.push(record),
                Err(err) => messages.push(format!(
                    "[loader] buildings[{index}] failed to parse ({err}); skipped"
                )),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_snapshot(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_snapshot_loads_with_defaults() {
        let file = write_snapshot(r#"{"state_name": "Nord"}"#);
        let loaded = load_snapshot(file.path()).unwrap();
        assert_eq!(loaded.state.state_name, "Nord");
        assert_eq!(loaded.state.settings.exhaustion_warning_cycles, 3);
        assert!(loaded.messages.is_empty());
    }

    #[test]
    fn test_missing_state_name_is_fatal() {
        let file = write_snapshot(r#"{"provinces": []}"#);
        assert!(matches!(
            load_snapshot(file.path()),
            Err(SnapshotError::MissingStateName)
        ));
    }

    #[test]
    fn test_bad_record_is_skipped_not_fatal() {
        let file = write_snapshot(
            r#"{
                "state_name": "Nord",
                "provinces": [
                    {"id": "P1", "owner": "Nord"},
                    {"owner": "Nord"},
                    {"id": "P2", "owner": "Nord", "free_arable_land": "not a number"}
                ]
            }"#,
        );
        let loaded = load_snapshot(file.path()).unwrap();
        assert_eq!(loaded.state.provinces.len(), 1);
        assert_eq!(loaded.state.provinces[0].id, "P1");
        assert_eq!(loaded.messages.len(), 2);
        assert!(loaded.messages[0].contains("has no \"id\""));
        assert!(loaded.messages[1].contains("failed to parse"));
    }

    #[test]
    fn test_building_slots_flatten() {
        let file = write_snapshot(
            r#"{
                "state_name": "Nord",
                "buildings": [
                    {"building_name": "mine", "province_id": "P1", "building_owner": "Nord"},
                    [
                        {"building_name": "farm", "province_id": "P2", "building_owner": "Nord"},
                        {"building_name": "mill", "province_id": "P2", "building_owner": "Nord"}
                    ]
                ]
            }"#,
        );
        let loaded = load_snapshot(file.path()).unwrap();
        let names: Vec<_> = loaded
            .state
            .buildings
            .iter()
            .map(|b| b.building_name.as_str())
            .collect();
        assert_eq!(names, vec!["mine", "farm", "mill"]);
    }

    #[test]
    fn test_save_round_trip() {
        let file = write_snapshot(
            r#"{
                "state_name": "Nord",
                "provinces": [{"id": "P1", "owner": "Nord", "landscapes": "лес, тайга"}],
                "population": [{"province_id": "P1", "total_workers": 5,
                                "unemployed_workers": 5, "employed_workers": 0,
                                "professions": [{"фермер": 2}]}]
            }"#,
        );
        let loaded = load_snapshot(file.path()).unwrap();

        let out = NamedTempFile::new().unwrap();
        save_snapshot(out.path(), &loaded.state).unwrap();
        let reloaded = load_snapshot(out.path()).unwrap();
        assert_eq!(reloaded.state.provinces[0].landscapes, vec!["лес", "тайга"]);
        assert_eq!(reloaded.state.population[0].professions["фермер"], 2);
        assert!(reloaded.messages.is_empty());
    }
}
