//! Combined childcare cost for a family.
//!
//! This module sequences the subsidy primitives for a whole family at a
//! given income and number of care days: standard percentage, the higher
//! sibling rate when eligible, the primary child's cost, the eldest-child
//! companion cost and the combined totals. The orchestrator and the
//! back-to-work scenarios both use it so their figures always agree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CcsRates;
use crate::error::EngineResult;
use crate::models::{CareType, RateCapAgeGroup, ResolvedInputs};

use super::ccs_percentage::{
    CcsPercentageResult, SiblingBoostResult, calculate_ccs_percentage, calculate_sibling_boost,
};
use super::session_cost::{
    AnnualCostResult, PeriodAmounts, SessionCostResult, annualize_session_cost,
    applicable_annual_cap, calculate_session_cost,
};

/// The childcare arrangement held fixed while income or days vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareProfile {
    /// Daily fee per child.
    pub daily_fee: Decimal,
    /// Hours of care per day.
    pub hours_per_day: Decimal,
    /// Type of care.
    pub care_type: CareType,
    /// Rate-cap age group of the youngest child.
    pub age_group: RateCapAgeGroup,
    /// Number of children in care.
    pub children_count: u8,
    /// Whether younger siblings attract the higher rate.
    pub sibling_rate_eligible: bool,
}

impl From<&ResolvedInputs> for CareProfile {
    fn from(inputs: &ResolvedInputs) -> Self {
        Self {
            daily_fee: inputs.daily_fee,
            hours_per_day: inputs.hours_per_day,
            care_type: inputs.care_type,
            age_group: inputs.rate_cap_age_group,
            children_count: inputs.children_count,
            sibling_rate_eligible: inputs.sibling_rate_eligible,
        }
    }
}

/// Combined annualized totals across all children in care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTotals {
    /// Number of children the totals cover.
    pub children_count: u8,
    /// Total fees charged.
    pub gross_fee: PeriodAmounts,
    /// Total subsidy after reconciliation.
    pub subsidy: PeriodAmounts,
    /// Total subsidy withheld during the year.
    pub withheld: PeriodAmounts,
    /// Total paid by the family during the year.
    pub out_of_pocket_during_year: PeriodAmounts,
    /// Total paid by the family after reconciliation.
    pub out_of_pocket: PeriodAmounts,
}

/// Costs for the whole family at one income and care pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyCostResult {
    /// The standard percentage for the family income.
    pub standard: CcsPercentageResult,
    /// The higher sibling rate, when eligible.
    pub sibling_boost: Option<SiblingBoostResult>,
    /// The percentage applied to the primary child.
    pub primary_percent: Decimal,
    /// Session cost for the primary child.
    pub primary_session: SessionCostResult,
    /// Annualized cost for the primary child.
    pub primary_annual: AnnualCostResult,
    /// Session cost at the standard percentage, when the higher rate applies.
    pub eldest_session: Option<SessionCostResult>,
    /// Annualized cost at the standard percentage, when the higher rate applies.
    pub eldest_annual: Option<AnnualCostResult>,
    /// Combined family totals.
    pub totals: FamilyTotals,
}

/// Calculates childcare costs for a family.
///
/// The primary child is costed at the boosted percentage when the family
/// is eligible for the sibling rate, otherwise at the standard percentage.
/// When boosted, an eldest-child companion is costed at the standard
/// percentage and the family totals are
/// `primary + (children_count - 1) × eldest`; otherwise the totals are the
/// primary child's figures.
///
/// # Errors
///
/// Propagates errors from [`calculate_session_cost`] and
/// [`annualize_session_cost`].
pub fn calculate_family_costs(
    family_income: Decimal,
    days_per_week: u8,
    profile: &CareProfile,
    ccs: &CcsRates,
) -> EngineResult<FamilyCostResult> {
    let standard = calculate_ccs_percentage(family_income, ccs);
    let sibling_boost = profile
        .sibling_rate_eligible
        .then(|| calculate_sibling_boost(standard.percent, ccs));
    let primary_percent = sibling_boost
        .as_ref()
        .map_or(standard.percent, |boost| boost.boosted_percent);
    let annual_cap = applicable_annual_cap(family_income, ccs);

    let session_at = |percent: Decimal| {
        calculate_session_cost(
            profile.daily_fee,
            profile.hours_per_day,
            percent,
            profile.care_type,
            profile.age_group,
            ccs,
        )
    };

    let primary_session = session_at(primary_percent)?;
    let primary_annual = annualize_session_cost(&primary_session, days_per_week, ccs, annual_cap)?;

    let (eldest_session, eldest_annual) = if sibling_boost.is_some() {
        let session = session_at(standard.percent)?;
        let annual = annualize_session_cost(&session, days_per_week, ccs, annual_cap)?;
        (Some(session), Some(annual))
    } else {
        (None, None)
    };

    let totals = combine_totals(profile.children_count, &primary_annual, eldest_annual.as_ref());

    Ok(FamilyCostResult {
        standard,
        sibling_boost,
        primary_percent,
        primary_session,
        primary_annual,
        eldest_session,
        eldest_annual,
        totals,
    })
}

fn combine_totals(
    children_count: u8,
    primary: &AnnualCostResult,
    eldest: Option<&AnnualCostResult>,
) -> FamilyTotals {
    match eldest {
        Some(eldest) => {
            let others = u32::from(children_count.saturating_sub(1));
            FamilyTotals {
                children_count,
                gross_fee: primary.gross_fee.plus_times(eldest.gross_fee, others),
                subsidy: primary.subsidy.plus_times(eldest.subsidy, others),
                withheld: primary.withheld.plus_times(eldest.withheld, others),
                out_of_pocket_during_year: primary
                    .out_of_pocket_during_year
                    .plus_times(eldest.out_of_pocket_during_year, others),
                out_of_pocket: primary
                    .out_of_pocket
                    .plus_times(eldest.out_of_pocket, others),
            }
        }
        None => FamilyTotals {
            children_count,
            gross_fee: primary.gross_fee,
            subsidy: primary.subsidy,
            withheld: primary.withheld,
            out_of_pocket_during_year: primary.out_of_pocket_during_year,
            out_of_pocket: primary.out_of_pocket,
        },
    }
}
