//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax
//! configuration profiles from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::calculation::brackets::validate_brackets;
use crate::error::{EngineError, EngineResult};
use crate::models::ComplianceChecklistItem;

use super::types::{
    ComplianceConfig, FederalConfig, LimitsConfig, PerDiemConfig, SelfEmploymentConfig,
    StatesConfig, TaxBracket, TaxConfig, TaxProfileMetadata,
};

/// Loads and provides access to a tax configuration profile.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides methods to query bracket tables, state treatments, compliance
/// scoring weights, and reimbursement limits. Every bracket table is
/// validated on load, so calculations can assume well-formed tables.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/us2024/
/// ├── profile.yaml     # Jurisdiction, tax year, filing status
/// ├── federal.yaml     # Federal brackets and SE tax parameters
/// ├── states.yaml      # No-tax states and state bracket tables
/// ├── compliance.yaml  # Tax-home scoring weights and checklist
/// └── limits.yaml      # Per-diem ceilings and mileage rates
/// ```
///
/// # Example
///
/// ```no_run
/// use traveltax_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/us2024").unwrap();
///
/// assert_eq!(loader.profile().tax_year, 2024);
/// assert!(loader.is_no_tax_state("TX"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/us2024")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any bracket table is malformed (empty, not starting at zero,
    ///   non-contiguous, or bounded in its final bracket)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use traveltax_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/us2024")?;
    /// # Ok::<(), traveltax_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let profile = Self::load_yaml::<TaxProfileMetadata>(&path.join("profile.yaml"))?;
        let federal = Self::load_yaml::<FederalConfig>(&path.join("federal.yaml"))?;
        let states = Self::load_yaml::<StatesConfig>(&path.join("states.yaml"))?;
        let compliance = Self::load_yaml::<ComplianceConfig>(&path.join("compliance.yaml"))?;
        let limits = Self::load_yaml::<LimitsConfig>(&path.join("limits.yaml"))?;

        validate_brackets("federal", &federal.brackets)?;
        for (state, table) in &states.brackets {
            validate_brackets(state, table)?;
        }

        let config = TaxConfig::new(profile, federal, states, compliance, limits);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying tax configuration.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Returns the profile metadata.
    pub fn profile(&self) -> &TaxProfileMetadata {
        self.config.profile()
    }

    /// Returns the federal bracket table.
    pub fn federal_brackets(&self) -> &[TaxBracket] {
        self.config.federal_brackets()
    }

    /// Returns the self-employment tax parameters.
    pub fn self_employment(&self) -> &SelfEmploymentConfig {
        self.config.self_employment()
    }

    /// Whether the state levies no income tax on wages.
    pub fn is_no_tax_state(&self, state: &str) -> bool {
        self.config.is_no_tax_state(state)
    }

    /// Gets the bracket table for a state.
    ///
    /// # Arguments
    ///
    /// * `state` - The two-letter state code (case-insensitive)
    ///
    /// # Returns
    ///
    /// Returns the table if the state levies a progressive income tax, or
    /// `StateNotSupported` if the state is neither a no-tax state nor has
    /// a configured table. Use [`is_no_tax_state`](Self::is_no_tax_state)
    /// first for states with no income tax.
    pub fn get_state_brackets(&self, state: &str) -> EngineResult<&[TaxBracket]> {
        self.config
            .state_brackets(state)
            .ok_or_else(|| EngineError::StateNotSupported {
                state: state.to_uppercase(),
            })
    }

    /// Returns the compliance scoring configuration.
    pub fn compliance(&self) -> &ComplianceConfig {
        self.config.compliance()
    }

    /// Instantiates the default compliance checklist, all items incomplete.
    pub fn default_checklist(&self) -> Vec<ComplianceChecklistItem> {
        self.config.compliance().default_checklist()
    }

    /// Returns the GSA per-diem ceilings.
    pub fn per_diem(&self) -> &PerDiemConfig {
        self.config.per_diem()
    }

    /// Gets the IRS standard mileage rate for a year.
    ///
    /// # Returns
    ///
    /// Returns the rate in dollars per mile, or `MileageRateNotFound` if
    /// the year is not in the configured table.
    pub fn get_mileage_rate(&self, year: i32) -> EngineResult<Decimal> {
        self.config
            .mileage_rate(year)
            .ok_or(EngineError::MileageRateNotFound { year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/us2024"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.profile().jurisdiction, "US");
        assert_eq!(loader.profile().tax_year, 2024);
        assert_eq!(loader.profile().filing_status, "single");
    }

    #[test]
    fn test_federal_brackets_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let brackets = loader.federal_brackets();
        assert_eq!(brackets.len(), 7);
        assert_eq!(brackets[0].lower, Decimal::ZERO);
        assert_eq!(brackets[0].upper, Some(dec("11600")));
        assert_eq!(brackets[0].rate, dec("0.10"));
        assert_eq!(brackets[6].upper, None);
        assert_eq!(brackets[6].rate, dec("0.37"));
    }

    #[test]
    fn test_self_employment_parameters_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let se = loader.self_employment();
        assert_eq!(se.ss_wage_base, dec("168600"));
        assert_eq!(se.ss_rate, dec("0.124"));
        assert_eq!(se.medicare_rate, dec("0.029"));
        assert_eq!(se.net_earnings_factor, dec("0.9235"));
        assert_eq!(se.minimum_net_earnings, dec("400"));
    }

    #[test]
    fn test_no_tax_states() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert!(loader.is_no_tax_state("TX"));
        assert!(loader.is_no_tax_state("FL"));
        assert!(loader.is_no_tax_state("wa"));
        assert!(!loader.is_no_tax_state("CA"));
    }

    #[test]
    fn test_get_state_brackets() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let ca = loader.get_state_brackets("CA").unwrap();
        assert!(ca.len() > 1);
        assert_eq!(ca[0].lower, Decimal::ZERO);

        // Lookup is case-insensitive
        let also_ca = loader.get_state_brackets("ca").unwrap();
        assert_eq!(ca, also_ca);
    }

    #[test]
    fn test_unknown_state_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let result = loader.get_state_brackets("ZZ");
        match result {
            Err(EngineError::StateNotSupported { state }) => {
                assert_eq!(state, "ZZ");
            }
            _ => panic!("Expected StateNotSupported error"),
        }
    }

    #[test]
    fn test_compliance_checklist_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let checklist = loader.default_checklist();
        assert_eq!(checklist.len(), 10);
        assert_eq!(loader.compliance().checklist_max_points(), 85);

        let residence = checklist
            .iter()
            .find(|i| i.id == "maintain_residence")
            .unwrap();
        assert_eq!(residence.weight, 15);
    }

    #[test]
    fn test_per_diem_limits_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.per_diem().daily_lodging_limit, dec("107.00"));
        assert_eq!(loader.per_diem().daily_meals_limit, dec("59.00"));
    }

    #[test]
    fn test_mileage_rates_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.get_mileage_rate(2024).unwrap(), dec("0.67"));
        assert_eq!(loader.get_mileage_rate(2023).unwrap(), dec("0.655"));

        match loader.get_mileage_rate(1999) {
            Err(EngineError::MileageRateNotFound { year }) => assert_eq!(year, 1999),
            _ => panic!("Expected MileageRateNotFound error"),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("profile.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
