//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a rate
//! schedule and regional fee table from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{CcsRates, RateConfiguration, RegionalFeeTable, ScheduleMetadata, TaxRates};

/// Loads and provides access to a rate schedule.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them, and holds the resulting read-only configuration. It is
/// constructed once at process start and shared by reference afterwards.
///
/// # Directory Structure
///
/// ```text
/// config/2025-26/
/// ├── schedule.yaml       # Version, financial year, effective date
/// ├── ccs.yaml            # Subsidy taper, sibling rate, rate caps, annual cap
/// ├── tax.yaml            # Tax brackets, Medicare levy, low income offset
/// └── regional_fees.yaml  # Average daily fee by state and care type
/// ```
///
/// # Example
///
/// ```no_run
/// use ccs_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/2025-26").unwrap();
/// println!("Loaded schedule: {}", loader.rates().metadata.version);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rates: RateConfiguration,
    regional_fees: RegionalFeeTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing ([`EngineError::ConfigNotFound`])
    /// - Any file contains invalid YAML or is missing a field
    ///   ([`EngineError::ConfigParseError`])
    /// - The schedule is internally inconsistent
    ///   ([`EngineError::InvalidConfiguration`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let ccs = Self::load_yaml::<CcsRates>(&path.join("ccs.yaml"))?;
        let tax = Self::load_yaml::<TaxRates>(&path.join("tax.yaml"))?;
        let regional_fees = Self::load_yaml::<RegionalFeeTable>(&path.join("regional_fees.yaml"))?;

        let rates = RateConfiguration { metadata, ccs, tax };
        rates.validate()?;

        debug!(
            version = %rates.metadata.version,
            financial_year = %rates.metadata.financial_year,
            regions = regional_fees.fees.len(),
            "Loaded rate schedule"
        );

        Ok(Self::new(rates, regional_fees))
    }

    /// Creates a loader from already-built configuration.
    pub fn new(rates: RateConfiguration, regional_fees: RegionalFeeTable) -> Self {
        Self {
            rates,
            regional_fees,
        }
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

    /// Returns the rate schedule.
    pub fn rates(&self) -> &RateConfiguration {
        &self.rates
    }

    /// Returns the regional average fee table.
    pub fn regional_fees(&self) -> &RegionalFeeTable {
        &self.regional_fees
    }
}
