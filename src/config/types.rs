//! Configuration types for subsidy and tax calculation.
//!
//! This module contains the strongly-typed rate schedule structures that
//! are deserialized from YAML configuration files. A schedule is versioned
//! and read-only: calculators borrow it and never mutate it.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CareType, RateCapAgeGroup, State};

/// Metadata about a published rate schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Schedule version identifier (e.g., "2025-26.1").
    pub version: String,
    /// The financial year the schedule encodes (e.g., "2025-26").
    pub financial_year: String,
    /// The date the schedule takes effect.
    pub effective_date: NaiveDate,
    /// URL to the published government rates.
    pub source_url: String,
}

/// Higher-rate parameters for younger siblings in care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingRates {
    /// Percentage points added to the standard percentage.
    pub boost_points: Decimal,
    /// Ceiling on the boosted percentage.
    pub cap_percent: Decimal,
}

/// An hourly rate cap for a care type and age group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCapEntry {
    /// The care type the cap applies to.
    pub care_type: CareType,
    /// The age group the cap applies to, or `any`.
    pub age_group: RateCapAgeGroup,
    /// The maximum hourly fee eligible for subsidy.
    pub hourly_cap: Decimal,
}

/// The per-child annual subsidy cap for higher-income families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualCap {
    /// Maximum subsidy per child per financial year.
    pub amount: Decimal,
    /// Family income above which the cap applies.
    pub income_threshold: Decimal,
}

/// Child Care Subsidy parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcsRates {
    /// Percentage applying at or below the income threshold.
    pub max_percent: Decimal,
    /// Income at or below which the maximum percentage applies.
    pub income_threshold: Decimal,
    /// Size of each income increment above the threshold.
    pub income_increment: Decimal,
    /// Percentage points lost per (started) increment.
    pub reduction_per_increment: Decimal,
    /// The lowest percentage the taper can reach.
    pub floor_percent: Decimal,
    /// Higher-rate parameters for younger siblings.
    pub sibling: SiblingRates,
    /// Hourly rate caps by care type and age group.
    pub rate_caps: Vec<RateCapEntry>,
    /// Annual per-child cap.
    pub annual_cap: AnnualCap,
    /// Share of the subsidy withheld until year-end reconciliation.
    pub withholding_percent: Decimal,
    /// Weeks of care used to annualize weekly figures.
    pub care_weeks_per_year: u32,
}

impl CcsRates {
    /// Looks up the hourly rate cap for a care type and age group.
    ///
    /// An exact age-group entry wins; otherwise an `any` entry for the care
    /// type is used.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingRateCap`] if neither entry exists.
    pub fn rate_cap(
        &self,
        care_type: CareType,
        age_group: RateCapAgeGroup,
    ) -> EngineResult<Decimal> {
        let exact = self
            .rate_caps
            .iter()
            .find(|entry| entry.care_type == care_type && entry.age_group == age_group);

        exact
            .or_else(|| {
                self.rate_caps.iter().find(|entry| {
                    entry.care_type == care_type && entry.age_group == RateCapAgeGroup::Any
                })
            })
            .map(|entry| entry.hourly_cap)
            .ok_or(EngineError::MissingRateCap {
                care_type,
                age_group,
            })
    }
}

/// A progressive income tax bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lowest whole-dollar income in the bracket.
    pub min: Decimal,
    /// Highest whole-dollar income in the bracket; `None` for the top bracket.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Marginal rate as a fraction (e.g., 0.30).
    pub rate: Decimal,
    /// Tax payable on income up to `min - 1`.
    pub base_tax: Decimal,
}

/// Medicare levy parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicareLevy {
    /// Flat levy rate as a fraction.
    pub rate: Decimal,
    /// Income at or below which no levy is payable.
    pub low_income_threshold: Decimal,
    /// Income above which the flat rate applies to the whole income.
    pub shade_in_threshold: Decimal,
    /// Rate applied to income above the low-income threshold while shading in.
    pub phase_in_rate: Decimal,
}

/// Low income tax offset parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowIncomeOffset {
    /// The full offset.
    pub maximum: Decimal,
    /// Income at or below which the full offset applies.
    pub full_threshold: Decimal,
    /// End of the first phase-out band.
    pub middle_threshold: Decimal,
    /// Phase-out rate in the first band.
    pub middle_rate: Decimal,
    /// End of the second phase-out band.
    pub upper_threshold: Decimal,
    /// Phase-out rate in the second band.
    pub upper_rate: Decimal,
}

/// Resident individual income tax parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Brackets in ascending order of `min`.
    pub brackets: Vec<TaxBracket>,
    /// Medicare levy parameters.
    pub medicare_levy: MedicareLevy,
    /// Low income tax offset parameters.
    pub low_income_offset: LowIncomeOffset,
}

impl TaxRates {
    /// Finds the bracket an income falls into.
    ///
    /// Brackets are whole-dollar ranges; an income with cents between two
    /// brackets belongs to the lower one. Returns `None` only for incomes
    /// below the first bracket.
    pub fn bracket_for(&self, income: Decimal) -> Option<&TaxBracket> {
        self.brackets.iter().rev().find(|bracket| bracket.min <= income)
    }
}

/// A complete, versioned rate schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfiguration {
    /// Schedule metadata.
    pub metadata: ScheduleMetadata,
    /// Child Care Subsidy parameters.
    pub ccs: CcsRates,
    /// Income tax parameters.
    pub tax: TaxRates,
}

impl RateConfiguration {
    /// Checks the structural consistency of the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] describing the first
    /// inconsistency found.
    pub fn validate(&self) -> EngineResult<()> {
        let ccs = &self.ccs;
        let invalid = |message: String| Err(EngineError::InvalidConfiguration { message });

        if ccs.income_increment <= Decimal::ZERO {
            return invalid("ccs.income_increment must be positive".to_string());
        }
        if ccs.floor_percent < Decimal::ZERO || ccs.floor_percent > ccs.max_percent {
            return invalid("ccs.floor_percent must be between 0 and max_percent".to_string());
        }
        if ccs.max_percent > Decimal::ONE_HUNDRED {
            return invalid("ccs.max_percent must not exceed 100".to_string());
        }
        if ccs.sibling.cap_percent > Decimal::ONE_HUNDRED
            || ccs.sibling.cap_percent < ccs.max_percent
            || ccs.sibling.boost_points < Decimal::ZERO
        {
            return invalid(
                "ccs.sibling must have a non-negative boost and a cap between max_percent and 100"
                    .to_string(),
            );
        }
        if ccs.withholding_percent < Decimal::ZERO
            || ccs.withholding_percent > Decimal::ONE_HUNDRED
        {
            return invalid("ccs.withholding_percent must be between 0 and 100".to_string());
        }
        if ccs.care_weeks_per_year == 0 || ccs.care_weeks_per_year > 52 {
            return invalid("ccs.care_weeks_per_year must be between 1 and 52".to_string());
        }
        if let Some(entry) = ccs.rate_caps.iter().find(|e| e.hourly_cap <= Decimal::ZERO) {
            return invalid(format!(
                "rate cap for {}/{} must be positive",
                entry.care_type, entry.age_group
            ));
        }

        let brackets = &self.tax.brackets;
        if brackets.is_empty() {
            return invalid("tax.brackets must not be empty".to_string());
        }
        for pair in brackets.windows(2) {
            match pair[0].max {
                Some(max) if max + Decimal::ONE == pair[1].min => {}
                _ => {
                    return invalid(format!(
                        "tax bracket starting at {} is not contiguous with the next bracket",
                        pair[0].min
                    ));
                }
            }
        }
        if brackets.last().is_some_and(|b| b.max.is_some()) {
            return invalid("the top tax bracket must be open-ended".to_string());
        }

        let levy = &self.tax.medicare_levy;
        if levy.shade_in_threshold < levy.low_income_threshold {
            return invalid(
                "medicare_levy.shade_in_threshold is below the low income threshold".to_string(),
            );
        }

        let offset = &self.tax.low_income_offset;
        if !(offset.full_threshold <= offset.middle_threshold
            && offset.middle_threshold <= offset.upper_threshold)
        {
            return invalid("low_income_offset thresholds must be ascending".to_string());
        }

        Ok(())
    }
}

/// Average daily fees by state and care type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionalFeeTable {
    /// Map of state to care type to average daily fee.
    pub fees: HashMap<State, HashMap<CareType, Decimal>>,
}

impl RegionalFeeTable {
    /// Returns the average daily fee for a state and care type.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingRegionalAverage`] if the table has no
    /// entry for the pair.
    pub fn average_fee(&self, state: State, care_type: CareType) -> EngineResult<Decimal> {
        self.fees
            .get(&state)
            .and_then(|by_care_type| by_care_type.get(&care_type))
            .copied()
            .ok_or(EngineError::MissingRegionalAverage { state, care_type })
    }
}
