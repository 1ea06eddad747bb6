//! Calculation logic for the subsidy engine.
//!
//! This module contains the calculators that turn household inputs into a
//! subsidy estimate: input resolution, resident income tax, CCS percentage
//! and sibling rate, per-session and annualized costs, family totals, the
//! back-to-work comparison, the income sensitivity sweep, and the
//! orchestrator that runs them in sequence.

mod back_to_work;
mod ccs_percentage;
mod family_costs;
mod income_tax;
mod input_resolver;
mod orchestrator;
mod rounding;
mod sensitivity;
mod session_cost;

pub use back_to_work::{
    BackToWorkParams, BackToWorkResult, BackToWorkScenario, BaselineSituation, FULL_TIME_DAYS,
    WORK_HOURS_PER_DAY, WORK_WEEKS_PER_YEAR, analyze_back_to_work,
};
pub use ccs_percentage::{
    CcsPercentageResult, SiblingBoostResult, calculate_ccs_percentage, calculate_sibling_boost,
};
pub use family_costs::{CareProfile, FamilyCostResult, FamilyTotals, calculate_family_costs};
pub use income_tax::{TaxResult, calculate_income_tax};
pub use input_resolver::{MAX_HOURS_PER_DAY, MAX_MONEY_AMOUNT, MIN_HOURS_PER_DAY, resolve_inputs};
pub use orchestrator::{
    ENGINE_VERSION, WARN_ANNUAL_CAP_APPLIED, WARN_FEE_ABOVE_RATE_CAP, WARN_INCOME_FROM_BUCKET,
    WARN_REGIONAL_AVERAGE_FEE, WARN_SIBLING_BOOST_CAPPED, calculate,
};
pub use rounding::round_cents;
pub use sensitivity::{
    MarginalStep, SensitivityParams, SensitivityResult, SensitivityRow, SweepBounds,
    analyze_income_sensitivity,
};
pub use session_cost::{
    AnnualCostResult, MAX_CARE_DAYS_PER_WEEK, PeriodAmounts, SessionCostResult,
    annualize_session_cost, applicable_annual_cap, calculate_session_cost,
};
