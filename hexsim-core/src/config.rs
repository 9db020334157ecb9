use serde::{Deserialize, Serialize};

/// Tunable simulation settings, loaded with the snapshot.
/// Missing keys fall back to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Extraction warns about imminent exhaustion when the remaining stock
    /// covers fewer than this many further turns at the current rate.
    #[serde(
        default = "default_exhaustion_warning_cycles",
        alias = "resource_extraction_exhaustion_message"
    )]
    pub exhaustion_warning_cycles: u32,
}

fn default_exhaustion_warning_cycles() -> u32 {
    3
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exhaustion_warning_cycles: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.exhaustion_warning_cycles, 3);
    }

    #[test]
    fn test_missing_key_falls_back() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.exhaustion_warning_cycles, 3);
    }

    #[test]
    fn test_legacy_key_accepted() {
        let settings: Settings =
            serde_json::from_str(r#"{"resource_extraction_exhaustion_message": 5}"#).unwrap();
        assert_eq!(settings.exhaustion_warning_cycles, 5);
    }
}
