//! End-to-end calculation.
//!
//! [`calculate`] runs the full pipeline for one family: resolve inputs,
//! work out subsidy percentages and costs for every child in care, run the
//! optional back-to-work comparison and the income sensitivity sweep, and
//! record each decision in the audit trace.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, instrument};

use crate::config::{RateConfiguration, RegionalFeeTable};
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, CalculationResult, FeeSource, IncomeSource, RawInputs, ResolvedInputs,
    SEVERITY_LOW, SEVERITY_MEDIUM,
};

use super::back_to_work::{BackToWorkParams, BackToWorkResult, analyze_back_to_work};
use super::family_costs::{CareProfile, FamilyCostResult, calculate_family_costs};
use super::input_resolver::resolve_inputs;
use super::sensitivity::{
    SensitivityParams, SensitivityResult, SweepBounds, analyze_income_sensitivity,
};

/// Version reported in every [`CalculationResult`].
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Warning code: income estimated from a bracket midpoint.
pub const WARN_INCOME_FROM_BUCKET: &str = "INCOME_FROM_BUCKET";
/// Warning code: daily fee taken from the regional average.
pub const WARN_REGIONAL_AVERAGE_FEE: &str = "REGIONAL_AVERAGE_FEE";
/// Warning code: hourly fee exceeds the hourly rate cap.
pub const WARN_FEE_ABOVE_RATE_CAP: &str = "FEE_ABOVE_RATE_CAP";
/// Warning code: annual subsidy limited by the per-child cap.
pub const WARN_ANNUAL_CAP_APPLIED: &str = "ANNUAL_CAP_APPLIED";
/// Warning code: sibling rate limited by its cap.
pub const WARN_SIBLING_BOOST_CAPPED: &str = "SIBLING_BOOST_CAPPED";

/// Runs the complete subsidy calculation for one family.
///
/// The primary child is costed at the sibling rate when the family is
/// eligible, with an eldest-child companion at the standard rate. The
/// back-to-work comparison runs only when the inputs request it; the
/// sensitivity sweep always runs over the default income range.
///
/// # Errors
///
/// - [`EngineError::InvalidArgument`](crate::error::EngineError::InvalidArgument)
///   for out-of-range inputs.
/// - Configuration errors when the rate schedule or regional fee table
///   lacks an entry the inputs need.
///
/// # Examples
///
/// ```
/// use ccs_engine::calculation::calculate;
/// use ccs_engine::config::ConfigLoader;
/// use ccs_engine::models::*;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/2025-26").unwrap();
/// let raw = RawInputs {
///     children_count: 1,
///     youngest_age: AgeBracket::OneToTwo,
///     income: IncomeInput { exact: Some(Decimal::from(95_000)), bucket: IncomeBucket::From80kTo120k },
///     care_type: CareType::CentreBasedDayCare,
///     state: State::Nsw,
///     days_per_week: 3,
///     hours_per_day: Some(Decimal::from(10)),
///     fee: FeeInput::Exact(Decimal::from(140)),
///     back_to_work: None,
/// };
///
/// let result = calculate(&raw, config.rates(), config.regional_fees()).unwrap();
/// assert_eq!(result.applied_percent, Decimal::from(88));
/// ```
#[instrument(skip_all, fields(
    care_type = %raw.care_type,
    state = %raw.state,
    children = raw.children_count,
    days = raw.days_per_week,
))]
pub fn calculate(
    raw: &RawInputs,
    rates: &RateConfiguration,
    regional_fees: &RegionalFeeTable,
) -> EngineResult<CalculationResult> {
    let mut trace = AuditTrace::default();

    let resolved = resolve_inputs(raw, regional_fees)?;
    record_resolution(&mut trace, raw, &resolved);

    let profile = CareProfile::from(&resolved);
    let family = calculate_family_costs(
        resolved.family_income,
        resolved.days_per_week,
        &profile,
        &rates.ccs,
    )?;
    record_family_costs(&mut trace, &resolved, &family);

    let back_to_work = match &resolved.back_to_work {
        Some(btw) => {
            let params = BackToWorkParams {
                partner_income: btw.partner_income,
                current_individual_income: btw.current_individual_income,
                proposed_fte_salary: btw.proposed_fte_salary,
                weekly_work_costs: btw.weekly_work_costs,
                current_care_days: resolved.days_per_week,
                care: profile,
            };
            let result = analyze_back_to_work(&params, rates)?;
            record_back_to_work(&mut trace, &params, &result);
            Some(result)
        }
        None => None,
    };

    let sensitivity = analyze_income_sensitivity(
        &SensitivityParams {
            actual_income: resolved.family_income,
            days_per_week: resolved.days_per_week,
            care: profile,
        },
        SweepBounds::default(),
        rates,
    )?;
    record_sensitivity(&mut trace, &sensitivity);

    debug!(
        family_income = %resolved.family_income,
        applied_percent = %family.primary_percent,
        annual_out_of_pocket = %family.totals.out_of_pocket.annual,
        steps = trace.steps.len(),
        warnings = trace.warnings.len(),
        "Calculation complete"
    );

    Ok(CalculationResult {
        engine_version: ENGINE_VERSION.to_string(),
        rate_version: rates.metadata.version.clone(),
        financial_year: rates.metadata.financial_year.clone(),
        ccs_percentage: family.standard,
        sibling_boost: family.sibling_boost,
        applied_percent: family.primary_percent,
        primary_session: family.primary_session,
        primary_annual: family.primary_annual,
        eldest_session: family.eldest_session,
        eldest_annual: family.eldest_annual,
        family_totals: family.totals,
        resolved_inputs: resolved,
        back_to_work,
        sensitivity,
        audit_trace: trace,
    })
}

fn record_resolution(trace: &mut AuditTrace, raw: &RawInputs, resolved: &ResolvedInputs) {
    trace.record(
        "resolve_inputs",
        "Resolve household inputs",
        json!(raw),
        json!({
            "family_income": resolved.family_income,
            "income_source": resolved.income_source,
            "daily_fee": resolved.daily_fee,
            "fee_source": resolved.fee_source,
            "hours_per_day": resolved.hours_per_day,
            "hours_source": resolved.hours_source,
            "rate_cap_age_group": resolved.rate_cap_age_group,
            "sibling_rate_eligible": resolved.sibling_rate_eligible,
        }),
        format!(
            "Income ${} ({:?}), fee ${}/day ({:?}), {} hours/day ({:?})",
            resolved.family_income,
            resolved.income_source,
            resolved.daily_fee,
            resolved.fee_source,
            resolved.hours_per_day,
            resolved.hours_source
        ),
    );

    if resolved.income_source == IncomeSource::BucketMidpoint {
        trace.warn(
            WARN_INCOME_FROM_BUCKET,
            format!(
                "Family income estimated at ${} from the selected income range",
                resolved.family_income
            ),
            SEVERITY_LOW,
        );
    }
    if resolved.fee_source == FeeSource::RegionalAverage {
        trace.warn(
            WARN_REGIONAL_AVERAGE_FEE,
            format!(
                "Daily fee of ${} is the {} average for {}; your provider's fee may differ",
                resolved.daily_fee, resolved.state, resolved.care_type
            ),
            SEVERITY_LOW,
        );
    }
}

fn record_family_costs(
    trace: &mut AuditTrace,
    resolved: &ResolvedInputs,
    family: &FamilyCostResult,
) {
    let standard = &family.standard;
    trace.record(
        "ccs_percentage",
        "Standard CCS percentage",
        json!({
            "income": standard.income,
            "income_threshold": standard.income_threshold,
        }),
        json!({
            "increments_above_threshold": standard.increments_above_threshold,
            "percent": standard.percent,
        }),
        format!(
            "{}% maximum less {} increment(s) above ${} gives {}%",
            standard.max_percent,
            standard.increments_above_threshold,
            standard.income_threshold,
            standard.percent
        ),
    );

    if let Some(boost) = &family.sibling_boost {
        trace.record(
            "sibling_boost",
            "Higher rate for younger sibling",
            json!({
                "standard_percent": boost.standard_percent,
                "boost_points": boost.boost_points,
            }),
            json!({
                "boosted_percent": boost.boosted_percent,
                "was_capped": boost.was_capped,
            }),
            format!(
                "{}% plus {} points, capped at {}%, gives {}%",
                boost.standard_percent, boost.boost_points, boost.cap_percent, boost.boosted_percent
            ),
        );
        if boost.was_capped {
            trace.warn(
                WARN_SIBLING_BOOST_CAPPED,
                format!(
                    "Sibling rate limited to {}% (uncapped {}%)",
                    boost.cap_percent, boost.uncapped_percent
                ),
                SEVERITY_LOW,
            );
        }
    }

    let session = &family.primary_session;
    trace.record(
        "session_cost",
        "Cost per session",
        json!({
            "daily_fee": session.daily_fee,
            "hours_per_day": session.hours_per_day,
            "subsidy_percent": session.subsidy_percent,
            "care_type": resolved.care_type,
            "age_group": resolved.rate_cap_age_group,
        }),
        json!(session),
        format!(
            "Subsidy {}% of ${}/hour over {} hours is ${}; gap ${}",
            session.subsidy_percent,
            session.effective_hourly_rate,
            session.hours_per_day,
            session.subsidy_per_session,
            session.out_of_pocket_per_session
        ),
    );
    if session.fee_above_cap_per_session > Decimal::ZERO {
        trace.warn(
            WARN_FEE_ABOVE_RATE_CAP,
            format!(
                "Hourly fee ${} exceeds the ${} rate cap; ${} per session is not subsidised",
                session.hourly_fee, session.rate_cap, session.fee_above_cap_per_session
            ),
            SEVERITY_MEDIUM,
        );
    }

    let annual = &family.primary_annual;
    trace.record(
        "annual_cost",
        "Annualised cost",
        json!({
            "days_per_week": annual.days_per_week,
            "weeks_per_year": annual.weeks_per_year,
            "annual_cap": annual.annual_cap,
        }),
        json!({
            "gross_fee": annual.gross_fee,
            "subsidy": annual.subsidy,
            "withheld": annual.withheld,
            "out_of_pocket": annual.out_of_pocket,
        }),
        format!(
            "{} day(s) a week over {} weeks: subsidy ${}, gap ${}",
            annual.days_per_week,
            annual.weeks_per_year,
            annual.subsidy.annual,
            annual.out_of_pocket.annual
        ),
    );
    if annual.annual_cap_applied {
        trace.warn(
            WARN_ANNUAL_CAP_APPLIED,
            format!(
                "Annual subsidy limited to ${} per child",
                annual.subsidy.annual
            ),
            SEVERITY_MEDIUM,
        );
    }

    let totals = &family.totals;
    trace.record(
        "family_totals",
        "Family totals",
        json!({
            "children_count": totals.children_count,
            "sibling_rate": family.sibling_boost.is_some(),
        }),
        json!(totals),
        if family.eldest_annual.is_some() {
            format!(
                "Youngest child at {}% plus {} other child(ren) at {}%",
                family.primary_percent,
                totals.children_count.saturating_sub(1),
                family.standard.percent
            )
        } else {
            format!("Single costing at {}%", family.primary_percent)
        },
    );
}

fn record_back_to_work(
    trace: &mut AuditTrace,
    params: &BackToWorkParams,
    result: &BackToWorkResult,
) {
    trace.record(
        "back_to_work",
        "Back-to-work comparison",
        json!({
            "current_individual_income": params.current_individual_income,
            "proposed_fte_salary": params.proposed_fte_salary,
            "weekly_work_costs": params.weekly_work_costs,
            "current_care_days": params.current_care_days,
        }),
        json!({
            "net_benefits": result
                .scenarios
                .iter()
                .map(|s| s.net_benefit)
                .collect::<Vec<_>>(),
            "best_days": result.best_scenario.as_ref().map(|s| s.days_worked),
        }),
        match &result.best_scenario {
            Some(best) => format!(
                "Working {} day(s) leaves the family ${} a year better off",
                best.days_worked, best.net_benefit
            ),
            None => "No working pattern leaves the family better off".to_string(),
        },
    );
}

fn record_sensitivity(trace: &mut AuditTrace, sensitivity: &SensitivityResult) {
    trace.record(
        "income_sensitivity",
        "Income sensitivity sweep",
        json!(sensitivity.bounds),
        json!({
            "rows": sensitivity.rows.len(),
            "zero_subsidy_income": sensitivity.zero_subsidy_income,
            "pain_point": sensitivity.pain_point.as_ref().map(|p| p.from_income),
            "sweet_spot": sensitivity.sweet_spot.as_ref().map(|s| s.from_income),
        }),
        match sensitivity.zero_subsidy_income {
            Some(income) => format!("Subsidy reaches zero at ${}", income),
            None => "Subsidy stays above zero across the range".to_string(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{self, dec};
    use crate::error::EngineError;
    use crate::models::{
        AgeBracket, BackToWorkInput, CareType, FeeInput, IncomeBucket, IncomeInput, State,
    };

    fn single_child_95k() -> RawInputs {
        RawInputs {
            children_count: 1,
            youngest_age: AgeBracket::OneToTwo,
            income: IncomeInput {
                exact: Some(dec("95000")),
                bucket: IncomeBucket::From80kTo120k,
            },
            care_type: CareType::CentreBasedDayCare,
            state: State::Nsw,
            days_per_week: 3,
            hours_per_day: Some(dec("10")),
            fee: FeeInput::Exact(dec("140")),
            back_to_work: None,
        }
    }

    fn run(raw: &RawInputs) -> EngineResult<CalculationResult> {
        calculate(raw, &fixtures::rates_2025_26(), &fixtures::regional_fees())
    }

    #[test]
    fn test_single_child_end_to_end() {
        let mut rates = fixtures::rates_2025_26();
        rates.ccs.care_weeks_per_year = 50;
        let result = calculate(&single_child_95k(), &rates, &fixtures::regional_fees()).unwrap();

        assert_eq!(result.applied_percent, dec("88"));
        assert_eq!(result.primary_session.subsidy_per_session, dec("123.20"));
        assert_eq!(result.primary_session.out_of_pocket_per_session, dec("16.80"));
        assert_eq!(result.primary_annual.out_of_pocket.annual, dec("2520.00"));
        assert_eq!(result.family_totals.out_of_pocket.annual, dec("2520.00"));
        assert!(result.sibling_boost.is_none());
        assert!(result.eldest_session.is_none());
        assert!(result.back_to_work.is_none());
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_two_children_sibling_rate_capped() {
        let mut raw = single_child_95k();
        raw.children_count = 2;
        raw.income.exact = Some(dec("200000"));
        let result = run(&raw).unwrap();

        assert_eq!(result.ccs_percentage.percent, dec("67"));
        let boost = result.sibling_boost.as_ref().unwrap();
        assert_eq!(boost.boosted_percent, dec("95"));
        assert!(boost.was_capped);
        assert_eq!(result.applied_percent, dec("95"));
        assert_eq!(
            result.eldest_session.as_ref().unwrap().subsidy_percent,
            dec("67")
        );
        assert_eq!(
            result.family_totals.out_of_pocket.annual,
            result.primary_annual.out_of_pocket.annual
                + result.eldest_annual.as_ref().unwrap().out_of_pocket.annual
        );
        assert!(result.audit_trace.has_warning(WARN_SIBLING_BOOST_CAPPED));
    }

    #[test]
    fn test_estimate_warnings() {
        let mut raw = single_child_95k();
        raw.income.exact = None;
        raw.fee = FeeInput::UseRegionalAverage;
        let result = run(&raw).unwrap();

        assert_eq!(result.resolved_inputs.daily_fee, dec("150"));
        assert!(result.audit_trace.has_warning(WARN_INCOME_FROM_BUCKET));
        assert!(result.audit_trace.has_warning(WARN_REGIONAL_AVERAGE_FEE));
    }

    #[test]
    fn test_fee_above_cap_warning() {
        let mut raw = single_child_95k();
        raw.fee = FeeInput::Exact(dec("160"));
        let result = run(&raw).unwrap();

        assert_eq!(result.primary_session.fee_above_cap_per_session, dec("13.70"));
        assert!(result.audit_trace.has_warning(WARN_FEE_ABOVE_RATE_CAP));
    }

    #[test]
    fn test_annual_cap_warning() {
        let mut raw = single_child_95k();
        raw.income.exact = Some(dec("400000"));
        raw.care_type = CareType::InHomeCare;
        raw.hours_per_day = Some(dec("8"));
        raw.fee = FeeInput::Exact(dec("400"));
        raw.days_per_week = 5;
        let result = run(&raw).unwrap();

        assert!(result.primary_annual.annual_cap_applied);
        assert_eq!(result.primary_annual.subsidy.annual, dec("11003"));
        assert!(result.audit_trace.has_warning(WARN_ANNUAL_CAP_APPLIED));
    }

    #[test]
    fn test_back_to_work_runs_when_requested() {
        let mut raw = single_child_95k();
        raw.income.exact = Some(dec("100000"));
        raw.days_per_week = 2;
        raw.back_to_work = Some(BackToWorkInput {
            current_individual_income: Decimal::ZERO,
            proposed_fte_salary: dec("80000"),
            weekly_work_costs: dec("50"),
        });
        let result = run(&raw).unwrap();

        let btw = result.back_to_work.as_ref().unwrap();
        assert_eq!(btw.scenarios.len(), 5);
        assert_eq!(btw.baseline.care_days, 2);
        assert_eq!(btw.scenarios[0].care_days, 2);
        assert_eq!(btw.scenarios[2].care_days, 3);
        assert!(
            result
                .audit_trace
                .steps
                .iter()
                .any(|step| step.rule_id == "back_to_work")
        );
    }

    #[test]
    fn test_back_to_work_uses_resolved_partner_income() {
        let mut raw = single_child_95k();
        raw.income.exact = Some(dec("150000"));
        raw.back_to_work = Some(BackToWorkInput {
            current_individual_income: dec("50000"),
            proposed_fte_salary: dec("80000"),
            weekly_work_costs: Decimal::ZERO,
        });
        let result = run(&raw).unwrap();

        let btw = result.back_to_work.as_ref().unwrap();
        assert_eq!(btw.baseline.partner_income, dec("100000"));
        assert_eq!(btw.scenarios[2].combined_family_income, dec("148000"));
    }

    #[test]
    fn test_sensitivity_always_present() {
        let result = run(&single_child_95k()).unwrap();
        assert_eq!(result.sensitivity.rows.len(), 113);
        assert_eq!(
            result.sensitivity.rows[result.sensitivity.nearest_row_index].income,
            dec("95000")
        );
    }

    #[test]
    fn test_audit_steps_sequential() {
        let result = run(&single_child_95k()).unwrap();
        let ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "resolve_inputs",
                "ccs_percentage",
                "session_cost",
                "annual_cost",
                "family_totals",
                "income_sensitivity",
            ]
        );
        for (index, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number as usize, index + 1);
        }
    }

    #[test]
    fn test_deterministic_serialization() {
        let first = serde_json::to_string(&run(&single_child_95k()).unwrap()).unwrap();
        let second = serde_json::to_string(&run(&single_child_95k()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rate_version_reported() {
        let result = run(&single_child_95k()).unwrap();
        assert_eq!(result.rate_version, fixtures::rates_2025_26().metadata.version);
        assert_eq!(result.engine_version, ENGINE_VERSION);
    }

    #[test]
    fn test_invalid_days_propagates() {
        let mut raw = single_child_95k();
        raw.days_per_week = 7;
        let err = run(&raw).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument { .. }));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_missing_rate_cap_is_configuration_error() {
        let mut rates = fixtures::rates_2025_26();
        rates.ccs.rate_caps.clear();
        let err = calculate(&single_child_95k(), &rates, &fixtures::regional_fees()).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
