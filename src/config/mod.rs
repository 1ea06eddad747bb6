//! Rate schedule configuration for the Child Care Subsidy engine.
//!
//! This module provides functionality to load a versioned rate schedule from
//! YAML files: subsidy taper parameters, hourly rate caps, the annual cap,
//! withholding, income tax brackets, the Medicare levy, the low income tax
//! offset and the regional average fee table.
//!
//! # Example
//!
//! ```no_run
//! use ccs_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/2025-26").unwrap();
//! println!("Loaded schedule: {}", config.rates().metadata.financial_year);
//! ```

#[cfg(test)]
pub(crate) mod fixtures;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AnnualCap, CcsRates, LowIncomeOffset, MedicareLevy, RateCapEntry, RateConfiguration,
    RegionalFeeTable, ScheduleMetadata, SiblingRates, TaxBracket, TaxRates,
};
