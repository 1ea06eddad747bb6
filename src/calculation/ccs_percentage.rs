//! Subsidy percentage calculation.
//!
//! This module derives the standard Child Care Subsidy percentage from
//! combined family income, and the higher percentage that applies to
//! younger siblings in care.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CcsRates;

/// The standard subsidy percentage for a family income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcsPercentageResult {
    /// The income the percentage was derived from.
    pub income: Decimal,
    /// The subsidy percentage (0 to `max_percent`).
    pub percent: Decimal,
    /// Number of started income increments above the threshold.
    pub increments_above_threshold: Decimal,
    /// The income threshold from the rate schedule.
    pub income_threshold: Decimal,
    /// The maximum percentage from the rate schedule.
    pub max_percent: Decimal,
}

/// The higher subsidy percentage for younger siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingBoostResult {
    /// The standard percentage the boost was applied to.
    pub standard_percent: Decimal,
    /// Percentage points added by the higher rate.
    pub boost_points: Decimal,
    /// Standard plus boost, before the cap.
    pub uncapped_percent: Decimal,
    /// The percentage that applies to younger siblings.
    pub boosted_percent: Decimal,
    /// The ceiling on the boosted percentage.
    pub cap_percent: Decimal,
    /// True if the cap reduced the boost.
    pub was_capped: bool,
}

/// Calculates the standard subsidy percentage for a combined family income.
///
/// At or below the income threshold the maximum percentage applies. Above
/// it, every started increment costs `reduction_per_increment` points:
///
/// ```text
/// increments = ceil((income - threshold) / increment)
/// percent    = max(floor, max - increments × reduction)
/// ```
///
/// The ceiling is deliberate: one dollar into a new increment costs a full
/// reduction step.
///
/// # Examples
///
/// ```
/// use ccs_engine::calculation::calculate_ccs_percentage;
/// use ccs_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/2025-26").unwrap();
/// let result = calculate_ccs_percentage(Decimal::from(95_000), &config.rates().ccs);
///
/// assert_eq!(result.increments_above_threshold, Decimal::from(2));
/// assert_eq!(result.percent, Decimal::from(88));
/// ```
pub fn calculate_ccs_percentage(income: Decimal, ccs: &CcsRates) -> CcsPercentageResult {
    let (percent, increments) = if income <= ccs.income_threshold {
        (ccs.max_percent, Decimal::ZERO)
    } else {
        let increments = ((income - ccs.income_threshold) / ccs.income_increment).ceil();
        let percent = (ccs.max_percent - increments * ccs.reduction_per_increment)
            .max(ccs.floor_percent);
        (percent, increments)
    };

    CcsPercentageResult {
        income,
        percent: percent.normalize(),
        increments_above_threshold: increments.normalize(),
        income_threshold: ccs.income_threshold,
        max_percent: ccs.max_percent,
    }
}

/// Applies the higher sibling rate to a standard percentage.
///
/// `boosted = min(cap, standard + boost)`. `was_capped` distinguishes a
/// family that received the full boost from one held back by the cap.
///
/// # Examples
///
/// ```
/// use ccs_engine::calculation::calculate_sibling_boost;
/// use ccs_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/2025-26").unwrap();
/// let result = calculate_sibling_boost(Decimal::from(67), &config.rates().ccs);
///
/// assert_eq!(result.boosted_percent, Decimal::from(95));
/// assert!(result.was_capped);
/// ```
pub fn calculate_sibling_boost(standard_percent: Decimal, ccs: &CcsRates) -> SiblingBoostResult {
    let uncapped_percent = standard_percent + ccs.sibling.boost_points;
    let was_capped = uncapped_percent > ccs.sibling.cap_percent;
    let boosted_percent = uncapped_percent.min(ccs.sibling.cap_percent);

    SiblingBoostResult {
        standard_percent,
        boost_points: ccs.sibling.boost_points,
        uncapped_percent: uncapped_percent.normalize(),
        boosted_percent: boosted_percent.normalize(),
        cap_percent: ccs.sibling.cap_percent,
        was_capped,
    }
}
