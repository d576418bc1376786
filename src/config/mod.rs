//! Configuration for the tax calculation engine.
//!
//! Fixed constant tables (bracket schedules, self-employment parameters,
//! state treatments, compliance scoring weights, reimbursement limits) are
//! loaded from YAML files in a profile directory, e.g.:
//!
//! ```no_run
//! use traveltax_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/us2024").unwrap();
//! assert_eq!(loader.profile().tax_year, 2024);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ChecklistItemConfig, ComplianceConfig, FederalConfig, LevelThresholds, LimitsConfig,
    PerDiemConfig, PresenceConfig, ReturnRuleConfig, SelfEmploymentConfig, StatesConfig,
    TaxBracket, TaxConfig, TaxProfileMetadata,
};
