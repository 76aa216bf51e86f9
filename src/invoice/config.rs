use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::BijakError;

/// Company-level configuration injected into payload construction.
///
/// Read once at start of session and passed explicitly — the payload
/// builder never reaches for ambient global state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    /// The distributor's own GSTIN.
    pub gstin: Option<String>,
    /// Home state code (2 digits), e.g. "27" for Maharashtra.
    pub state_code: Option<String>,
    /// Place of supply used when the customer record carries none.
    pub default_place_of_supply: Option<String>,
}

/// Load configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<CompanyConfig, BijakError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write configuration to a JSON file, overwriting any existing content.
pub fn save_config(path: &Path, config: &CompanyConfig) -> Result<(), BijakError> {
    let text = serde_json::to_string_pretty(config)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_file() {
        let path = std::env::temp_dir().join("bijak-config-test.json");
        let config = CompanyConfig {
            gstin: Some("27AABCS1429B1ZB".into()),
            state_code: Some("27".into()),
            default_place_of_supply: Some("27".into()),
        };
        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/bijak.json")).unwrap_err();
        assert!(matches!(err, BijakError::ConfigIo(_)));
    }
}
