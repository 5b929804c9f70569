//! # Register Configuration
//!
//! Configuration for a till: its name, balance tolerance, and the
//! denomination catalog of the drawer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     CASHUP_TILL_NAME="Front Counter"                                    │
//! │     CASHUP_BALANCE_TOLERANCE="0.01"                                     │
//! │                                                                         │
//! │  2. TOML Config File (register.toml, path given by the caller)          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     Pakistani-rupee drawer: notes 5000..10, coins 10..1                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # register.toml
//! [till]
//! name = "Front Counter"
//! balance_tolerance = "0.01"   # decimal string, must be > 0
//!
//! [[denomination]]
//! id = 1
//! name = "Rs 5000 note"
//! value = "5000"               # decimal string
//! kind = "note"                # note | coin
//! sort_order = 1
//! ```
//!
//! Monetary fields are strings so they pass through the same boundary parser
//! as operator input; nothing in the config file is ever read as a float.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cashup_core::{Denomination, DenominationKind, Money};

use crate::catalog::StaticCatalog;
use crate::error::{RegisterError, RegisterResult};

// =============================================================================
// Till Settings
// =============================================================================

/// Till identity and balance policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TillConfig {
    /// Human-readable till name (e.g., "Front Counter").
    #[serde(default = "default_till_name")]
    pub name: String,

    /// Absolute balance tolerance as a decimal string.
    /// Differences strictly below this value count as balanced.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: String,
}

fn default_till_name() -> String {
    "Front Counter".to_string()
}

fn default_balance_tolerance() -> String {
    "0.01".to_string()
}

impl Default for TillConfig {
    fn default() -> Self {
        TillConfig {
            name: default_till_name(),
            balance_tolerance: default_balance_tolerance(),
        }
    }
}

// =============================================================================
// Denomination Rows
// =============================================================================

/// One `[[denomination]]` row from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenominationRow {
    /// Unique denomination id.
    pub id: i64,

    /// Display label.
    pub name: String,

    /// Face value as a decimal string.
    pub value: String,

    /// note | coin
    pub kind: DenominationKind,

    /// Display/aggregation ordering.
    #[serde(default)]
    pub sort_order: i32,
}

impl DenominationRow {
    /// Parses this row into a catalog denomination.
    fn to_denomination(&self) -> RegisterResult<Denomination> {
        let value = Money::parse(&self.value).map_err(|_| {
            RegisterError::InvalidConfig(format!(
                "Denomination {}: invalid value '{}'",
                self.id, self.value
            ))
        })?;

        Ok(Denomination {
            id: self.id,
            name: self.name.clone(),
            value,
            kind: self.kind,
            sort_order: self.sort_order,
        })
    }
}

fn row(id: i64, name: &str, value: &str, kind: DenominationKind, sort_order: i32) -> DenominationRow {
    DenominationRow {
        id,
        name: name.to_string(),
        value: value.to_string(),
        kind,
        sort_order,
    }
}

/// The Pakistani-rupee drawer the original deployment uses.
fn default_denominations() -> Vec<DenominationRow> {
    use DenominationKind::{Coin, Note};

    vec![
        row(1, "Rs 5000 note", "5000", Note, 1),
        row(2, "Rs 1000 note", "1000", Note, 2),
        row(3, "Rs 500 note", "500", Note, 3),
        row(4, "Rs 100 note", "100", Note, 4),
        row(5, "Rs 50 note", "50", Note, 5),
        row(6, "Rs 20 note", "20", Note, 6),
        row(7, "Rs 10 note", "10", Note, 7),
        row(8, "Rs 10 coin", "10", Coin, 8),
        row(9, "Rs 5 coin", "5", Coin, 9),
        row(10, "Rs 2 coin", "2", Coin, 10),
        row(11, "Rs 1 coin", "1", Coin, 11),
    ]
}

// =============================================================================
// Main Register Configuration
// =============================================================================

/// Complete register configuration.
///
/// ## Example Config File
/// ```toml
/// [till]
/// name = "Front Counter"
/// balance_tolerance = "0.01"
///
/// [[denomination]]
/// id = 1
/// name = "Rs 5000 note"
/// value = "5000"
/// kind = "note"
/// sort_order = 1
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// Till settings.
    #[serde(default)]
    pub till: TillConfig,

    /// Drawer denominations.
    #[serde(default = "default_denominations")]
    pub denomination: Vec<DenominationRow>,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        RegisterConfig {
            till: TillConfig::default(),
            denomination: default_denominations(),
        }
    }
}

impl RegisterConfig {
    /// Creates a config with the default till and drawer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (register.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> RegisterResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading register config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if the load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load register config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates config from TOML text.
    pub fn from_toml(contents: &str) -> RegisterResult<Self> {
        let config: RegisterConfig = toml::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration by exercising both accessors.
    pub fn validate(&self) -> RegisterResult<()> {
        self.tolerance()?;
        self.catalog()?;

        Ok(())
    }

    /// The parsed balance tolerance.
    pub fn tolerance(&self) -> RegisterResult<Money> {
        let tolerance = Money::parse(&self.till.balance_tolerance).map_err(|_| {
            RegisterError::InvalidConfig(format!(
                "balance_tolerance must be a decimal string, got '{}'",
                self.till.balance_tolerance
            ))
        })?;

        if !tolerance.is_positive() {
            return Err(RegisterError::InvalidConfig(format!(
                "balance_tolerance must be greater than zero, got '{}'",
                self.till.balance_tolerance
            )));
        }

        Ok(tolerance)
    }

    /// Builds the validated drawer catalog.
    pub fn catalog(&self) -> RegisterResult<StaticCatalog> {
        let denominations = self
            .denomination
            .iter()
            .map(|row| row.to_denomination())
            .collect::<RegisterResult<Vec<_>>>()?;

        StaticCatalog::new(denominations)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("CASHUP_TILL_NAME") {
            debug!(till = %name, "Overriding till name from environment");
            self.till.name = name;
        }

        if let Ok(tolerance) = std::env::var("CASHUP_BALANCE_TOLERANCE") {
            debug!(tolerance = %tolerance, "Overriding balance tolerance from environment");
            self.till.balance_tolerance = tolerance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashup_core::CatalogError;

    #[test]
    fn test_default_config() {
        let config = RegisterConfig::default();
        assert_eq!(config.till.name, "Front Counter");
        assert_eq!(config.tolerance().unwrap(), Money::parse("0.01").unwrap());
        assert_eq!(config.denomination.len(), 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_drawer_splits_notes_and_coins() {
        let config = RegisterConfig::default();
        let notes = config
            .denomination
            .iter()
            .filter(|d| d.kind == DenominationKind::Note)
            .count();
        let coins = config
            .denomination
            .iter()
            .filter(|d| d.kind == DenominationKind::Coin)
            .count();

        assert_eq!(notes, 7);
        assert_eq!(coins, 4);
    }

    #[test]
    fn test_parse_example_file() {
        let config = RegisterConfig::from_toml(
            r#"
            [till]
            name = "Back Office"
            balance_tolerance = "0.05"

            [[denomination]]
            id = 1
            name = "Rs 5000 note"
            value = "5000"
            kind = "note"
            sort_order = 1

            [[denomination]]
            id = 2
            name = "Rs 1 coin"
            value = "1"
            kind = "coin"
            sort_order = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.till.name, "Back Office");
        assert_eq!(config.tolerance().unwrap(), Money::parse("0.05").unwrap());
        assert_eq!(config.denomination.len(), 2);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RegisterConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[till]"));
        assert!(toml_str.contains("[[denomination]]"));

        let reparsed = RegisterConfig::from_toml(&toml_str).unwrap();
        assert_eq!(reparsed.denomination.len(), config.denomination.len());
        assert_eq!(reparsed.tolerance().unwrap(), config.tolerance().unwrap());
    }

    #[test]
    fn test_bad_tolerance_rejected() {
        let mut config = RegisterConfig::default();

        config.till.balance_tolerance = "free".to_string();
        assert!(matches!(
            config.validate().unwrap_err(),
            RegisterError::InvalidConfig(_)
        ));

        config.till.balance_tolerance = "0".to_string();
        assert!(matches!(
            config.validate().unwrap_err(),
            RegisterError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_bad_denomination_value_rejected() {
        let mut config = RegisterConfig::default();
        config.denomination[0].value = "lots".to_string();

        assert!(matches!(
            config.validate().unwrap_err(),
            RegisterError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_duplicate_denomination_ids_rejected() {
        let mut config = RegisterConfig::default();
        config.denomination[1].id = config.denomination[0].id;

        assert!(matches!(
            config.validate().unwrap_err(),
            RegisterError::Catalog(CatalogError::DuplicateId { .. })
        ));
    }

    #[tokio::test]
    async fn test_catalog_sorted_from_unordered_rows() {
        use crate::catalog::DenominationCatalog;

        let config = RegisterConfig::from_toml(
            r#"
            [[denomination]]
            id = 2
            name = "Rs 1000 note"
            value = "1000"
            kind = "note"
            sort_order = 2

            [[denomination]]
            id = 1
            name = "Rs 5000 note"
            value = "5000"
            kind = "note"
            sort_order = 1
            "#,
        )
        .unwrap();

        let denominations = config.catalog().unwrap().denominations().await.unwrap();
        let ids: Vec<i64> = denominations.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
