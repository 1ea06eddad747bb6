//! Back-to-work comparison.
//!
//! This module models a parent returning to work one to five days a week
//! in a role with a given full-time-equivalent salary. Each scenario pays
//! a proportional salary, raises the family income (and so lowers the
//! subsidy percentage), may need extra care days and adds work-related
//! costs. Scenarios are compared against the family's current situation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateConfiguration;
use crate::error::{EngineError, EngineResult};

use super::ccs_percentage::calculate_ccs_percentage;
use super::family_costs::{CareProfile, calculate_family_costs};
use super::income_tax::{TaxResult, calculate_income_tax};
use super::rounding::round_cents;
use super::session_cost::MAX_CARE_DAYS_PER_WEEK;

/// Working hours in a full-time day (a 38-hour week).
pub const WORK_HOURS_PER_DAY: Decimal = Decimal::from_parts(76, 0, 0, false, 1);

/// Working weeks used to annualize work costs and hours.
pub const WORK_WEEKS_PER_YEAR: u32 = 52;

/// Days in a full-time working week.
pub const FULL_TIME_DAYS: u8 = 5;

/// Inputs to the back-to-work comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackToWorkParams {
    /// The other parent's income, held fixed across scenarios.
    pub partner_income: Decimal,
    /// The returning parent's current income.
    pub current_individual_income: Decimal,
    /// Full-time-equivalent salary of the proposed role.
    pub proposed_fte_salary: Decimal,
    /// Work-related costs per full-time week.
    pub weekly_work_costs: Decimal,
    /// Days of care currently used (0 to 5).
    pub current_care_days: u8,
    /// The childcare arrangement.
    pub care: CareProfile,
}

/// The family's current situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineSituation {
    /// The returning parent's current income.
    pub individual_income: Decimal,
    /// The other parent's income.
    pub partner_income: Decimal,
    /// Current combined family income.
    pub combined_family_income: Decimal,
    /// Tax on the returning parent's current income.
    pub tax: TaxResult,
    /// The returning parent's current net income.
    pub net_income: Decimal,
    /// Standard subsidy percentage at the current income.
    pub subsidy_percent: Decimal,
    /// Days of care currently used.
    pub care_days: u8,
    /// Current annual family childcare cost after reconciliation.
    pub annual_childcare_cost: Decimal,
}

/// One working-days scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackToWorkScenario {
    /// Days worked per week.
    pub days_worked: u8,
    /// Proportional gross salary.
    pub gross_income: Decimal,
    /// Gross salary above the parent's current income.
    pub additional_gross_income: Decimal,
    /// Partner income plus the proportional salary.
    pub combined_family_income: Decimal,
    /// Tax on the proportional salary.
    pub tax: TaxResult,
    /// The returning parent's net income.
    pub net_income: Decimal,
    /// Net income above the baseline.
    pub additional_net_income: Decimal,
    /// Standard subsidy percentage at the new combined income.
    pub subsidy_percent: Decimal,
    /// Days of care needed: the greater of current care days and days worked.
    pub care_days: u8,
    /// Annual family childcare cost after reconciliation.
    pub annual_childcare_cost: Decimal,
    /// Childcare cost above the baseline.
    pub additional_childcare_cost: Decimal,
    /// Annual work-related costs.
    pub annual_work_costs: Decimal,
    /// What the family is better off by per year.
    pub net_benefit: Decimal,
    /// Net benefit per hour worked.
    pub effective_hourly_rate: Option<Decimal>,
    /// Net benefit as a percentage of the additional gross income.
    pub percent_of_additional_gross_kept: Option<Decimal>,
}

/// The complete back-to-work comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackToWorkResult {
    /// The current situation.
    pub baseline: BaselineSituation,
    /// Scenarios for one to five working days, in order.
    pub scenarios: Vec<BackToWorkScenario>,
    /// The scenario with the highest positive net benefit.
    pub best_scenario: Option<BackToWorkScenario>,
}

/// Compares one to five working days against the current situation.
///
/// For each `d` in 1..=5:
///
/// ```text
/// gross        = d/5 × FTE salary
/// combined     = partner income + gross
/// care days    = max(current care days, d)
/// work costs   = weekly costs × d/5 × 52
/// net benefit  = Δ net income - Δ childcare cost - work costs
/// hourly rate  = net benefit / (d × 7.6 × 52)
/// ```
///
/// The best scenario is the first scenario (fewest days) holding the
/// strictly highest net benefit, considering only positive net benefits;
/// equal net benefits keep the smaller day count. It is `None` when no
/// scenario leaves the family better off.
///
/// # Errors
///
/// - [`EngineError::InvalidArgument`] if `current_care_days` exceeds 5.
/// - Errors from the subsidy calculators.
pub fn analyze_back_to_work(
    params: &BackToWorkParams,
    rates: &RateConfiguration,
) -> EngineResult<BackToWorkResult> {
    if params.current_care_days > MAX_CARE_DAYS_PER_WEEK {
        return Err(EngineError::invalid_argument(
            "current_care_days",
            format!(
                "must be between 0 and {}, got {}",
                MAX_CARE_DAYS_PER_WEEK, params.current_care_days
            ),
        ));
    }

    let individual_income = params.current_individual_income.max(Decimal::ZERO);
    let partner_income = params.partner_income.max(Decimal::ZERO);
    let baseline = baseline_situation(params, individual_income, partner_income, rates)?;

    let scenarios = (1..=FULL_TIME_DAYS)
        .map(|days| scenario(params, days, partner_income, &baseline, rates))
        .collect::<EngineResult<Vec<_>>>()?;

    let best_scenario = best_scenario(&scenarios).cloned();

    Ok(BackToWorkResult {
        baseline,
        scenarios,
        best_scenario,
    })
}

fn baseline_situation(
    params: &BackToWorkParams,
    individual_income: Decimal,
    partner_income: Decimal,
    rates: &RateConfiguration,
) -> EngineResult<BaselineSituation> {
    let combined = partner_income + individual_income;
    let tax = calculate_income_tax(individual_income, &rates.tax);

    Ok(BaselineSituation {
        individual_income: round_cents(individual_income),
        partner_income: round_cents(partner_income),
        combined_family_income: round_cents(combined),
        net_income: tax.net_income,
        tax,
        subsidy_percent: calculate_ccs_percentage(combined, &rates.ccs).percent,
        care_days: params.current_care_days,
        annual_childcare_cost: annual_childcare_cost(
            combined,
            params.current_care_days,
            &params.care,
            rates,
        )?,
    })
}

fn scenario(
    params: &BackToWorkParams,
    days: u8,
    partner_income: Decimal,
    baseline: &BaselineSituation,
    rates: &RateConfiguration,
) -> EngineResult<BackToWorkScenario> {
    let share = Decimal::from(days) / Decimal::from(FULL_TIME_DAYS);
    let gross_income = round_cents(share * params.proposed_fte_salary.max(Decimal::ZERO));
    let combined = partner_income + gross_income;
    let tax = calculate_income_tax(gross_income, &rates.tax);

    let care_days = params.current_care_days.max(days);
    let annual_childcare_cost = annual_childcare_cost(combined, care_days, &params.care, rates)?;
    let annual_work_costs = round_cents(
        params.weekly_work_costs.max(Decimal::ZERO) * share * Decimal::from(WORK_WEEKS_PER_YEAR),
    );

    let additional_net_income = tax.net_income - baseline.net_income;
    let additional_childcare_cost = annual_childcare_cost - baseline.annual_childcare_cost;
    let net_benefit = additional_net_income - additional_childcare_cost - annual_work_costs;
    let additional_gross_income = gross_income - baseline.individual_income;

    let hours_per_year =
        Decimal::from(days) * WORK_HOURS_PER_DAY * Decimal::from(WORK_WEEKS_PER_YEAR);
    let effective_hourly_rate =
        (!hours_per_year.is_zero()).then(|| round_cents(net_benefit / hours_per_year));
    let percent_of_additional_gross_kept = (additional_gross_income > Decimal::ZERO)
        .then(|| round_cents(net_benefit / additional_gross_income * Decimal::ONE_HUNDRED));

    Ok(BackToWorkScenario {
        days_worked: days,
        gross_income,
        additional_gross_income,
        combined_family_income: round_cents(combined),
        net_income: tax.net_income,
        tax,
        additional_net_income,
        subsidy_percent: calculate_ccs_percentage(combined, &rates.ccs).percent,
        care_days,
        annual_childcare_cost,
        additional_childcare_cost,
        annual_work_costs,
        net_benefit,
        effective_hourly_rate,
        percent_of_additional_gross_kept,
    })
}

/// Annual family childcare cost after reconciliation; zero when no care
/// days are used.
fn annual_childcare_cost(
    combined_income: Decimal,
    care_days: u8,
    care: &CareProfile,
    rates: &RateConfiguration,
) -> EngineResult<Decimal> {
    if care_days == 0 {
        return Ok(Decimal::ZERO);
    }
    let family = calculate_family_costs(combined_income, care_days, care, &rates.ccs)?;
    Ok(family.totals.out_of_pocket.annual)
}

fn best_scenario(scenarios: &[BackToWorkScenario]) -> Option<&BackToWorkScenario> {
    let mut best: Option<&BackToWorkScenario> = None;
    for candidate in scenarios.iter().filter(|s| s.net_benefit > Decimal::ZERO) {
        // strict comparison: ties keep the earlier (fewer days) scenario
        if best.is_none_or(|current| candidate.net_benefit > current.net_benefit) {
            best = Some(candidate);
        }
    }
    best
}
