//! Input resolution.
//!
//! This module turns the family's raw, possibly partial selections into
//! [`ResolvedInputs`]: every lookup (regional average fee, default hours,
//! rate-cap age group, sibling eligibility, partner income) is performed
//! here exactly once so downstream calculators never re-derive them.

use rust_decimal::Decimal;

use crate::config::RegionalFeeTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BackToWorkInput, FeeInput, FeeSource, HoursSource, IncomeSource, RawInputs,
    ResolvedBackToWork, ResolvedInputs,
};

use super::session_cost::MAX_CARE_DAYS_PER_WEEK;

/// Largest income, fee or back-to-work amount accepted ($100 million).
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Shortest session accepted when hours are entered (a quarter hour).
pub const MIN_HOURS_PER_DAY: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Longest session accepted when hours are entered.
pub const MAX_HOURS_PER_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Resolves raw inputs into concrete values.
///
/// Rules, in priority order:
///
/// 1. an exact non-negative income wins over the bucket midpoint;
/// 2. an exact non-negative fee wins over the regional average;
/// 3. care types without a regional average (in-home care) use the entered
///    fee or zero;
/// 4. missing or non-positive hours fall back to the care type default;
/// 5. the sibling rate needs at least two children and a youngest child
///    below school age.
///
/// Negative back-to-work amounts are clamped to zero.
///
/// # Errors
///
/// - [`EngineError::InvalidArgument`] if `children_count` is zero,
///   `days_per_week` is outside 1–5, positive hours are outside
///   [`MIN_HOURS_PER_DAY`]–[`MAX_HOURS_PER_DAY`] or any entered amount
///   exceeds [`MAX_MONEY_AMOUNT`].
/// - [`EngineError::MissingRegionalAverage`] if the regional average is
///   needed but the table has no entry for the state and care type.
///
/// # Examples
///
/// ```
/// use ccs_engine::calculation::resolve_inputs;
/// use ccs_engine::config::ConfigLoader;
/// use ccs_engine::models::*;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/2025-26").unwrap();
/// let raw = RawInputs {
///     children_count: 1,
///     youngest_age: AgeBracket::OneToTwo,
///     income: IncomeInput { exact: None, bucket: IncomeBucket::From80kTo120k },
///     care_type: CareType::CentreBasedDayCare,
///     state: State::Vic,
///     days_per_week: 3,
///     hours_per_day: None,
///     fee: FeeInput::UseRegionalAverage,
///     back_to_work: None,
/// };
///
/// let resolved = resolve_inputs(&raw, config.regional_fees()).unwrap();
/// assert_eq!(resolved.family_income, Decimal::from(100_000));
/// assert_eq!(resolved.daily_fee, Decimal::from(140));
/// assert_eq!(resolved.hours_per_day, Decimal::from(10));
/// ```
pub fn resolve_inputs(
    raw: &RawInputs,
    regional_fees: &RegionalFeeTable,
) -> EngineResult<ResolvedInputs> {
    if raw.children_count == 0 {
        return Err(EngineError::invalid_argument(
            "children_count",
            "at least one child must be in care",
        ));
    }
    if !(1..=MAX_CARE_DAYS_PER_WEEK).contains(&raw.days_per_week) {
        return Err(EngineError::invalid_argument(
            "days_per_week",
            format!(
                "must be between 1 and {}, got {}",
                MAX_CARE_DAYS_PER_WEEK, raw.days_per_week
            ),
        ));
    }

    if let Some(hours) = raw.hours_per_day.filter(|hours| *hours > Decimal::ZERO) {
        if !(MIN_HOURS_PER_DAY..=MAX_HOURS_PER_DAY).contains(&hours) {
            return Err(EngineError::invalid_argument(
                "hours_per_day",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_HOURS_PER_DAY, MAX_HOURS_PER_DAY, hours
                ),
            ));
        }
    }
    if let Some(income) = raw.income.exact {
        check_amount("income", income)?;
    }
    if let FeeInput::Exact(fee) = raw.fee {
        check_amount("fee", fee)?;
    }
    if let Some(input) = &raw.back_to_work {
        check_amount("current_individual_income", input.current_individual_income)?;
        check_amount("proposed_fte_salary", input.proposed_fte_salary)?;
        check_amount("weekly_work_costs", input.weekly_work_costs)?;
    }

    let (family_income, income_source) = match raw.income.exact {
        Some(exact) if exact >= Decimal::ZERO => (exact, IncomeSource::Exact),
        _ => (raw.income.bucket.midpoint(), IncomeSource::BucketMidpoint),
    };

    let (daily_fee, fee_source) = match raw.fee {
        FeeInput::Exact(fee) if fee >= Decimal::ZERO => (fee, FeeSource::UserEntered),
        _ if raw.care_type.has_regional_average() => (
            regional_fees.average_fee(raw.state, raw.care_type)?,
            FeeSource::RegionalAverage,
        ),
        _ => (Decimal::ZERO, FeeSource::NotProvided),
    };

    let (hours_per_day, hours_source) = match raw.hours_per_day {
        Some(hours) if hours > Decimal::ZERO => (hours, HoursSource::UserEntered),
        _ => (
            raw.care_type.default_hours_per_day(),
            HoursSource::CareTypeDefault,
        ),
    };

    let sibling_rate_eligible =
        raw.children_count >= 2 && raw.youngest_age.is_below_school_age();

    Ok(ResolvedInputs {
        children_count: raw.children_count,
        youngest_age: raw.youngest_age,
        rate_cap_age_group: raw.youngest_age.rate_cap_age_group(),
        sibling_rate_eligible,
        family_income,
        income_source,
        care_type: raw.care_type,
        state: raw.state,
        days_per_week: raw.days_per_week,
        hours_per_day,
        hours_source,
        daily_fee,
        fee_source,
        back_to_work: raw
            .back_to_work
            .as_ref()
            .map(|input| resolve_back_to_work(input, family_income)),
    })
}

fn check_amount(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount > MAX_MONEY_AMOUNT {
        return Err(EngineError::invalid_argument(
            field,
            format!("must not exceed {}, got {}", MAX_MONEY_AMOUNT, amount),
        ));
    }
    Ok(())
}

fn resolve_back_to_work(input: &BackToWorkInput, family_income: Decimal) -> ResolvedBackToWork {
    let current_individual_income = input.current_individual_income.max(Decimal::ZERO);

    ResolvedBackToWork {
        current_individual_income,
        partner_income: (family_income - current_individual_income).max(Decimal::ZERO),
        proposed_fte_salary: input.proposed_fte_salary.max(Decimal::ZERO),
        weekly_work_costs: input.weekly_work_costs.max(Decimal::ZERO),
    }
}
