//! Request types for the subsidy engine API.
//!
//! The `/calculate` body uses a flat wire format: nullable numbers for the
//! exact income and fee plus flags for the regional average fee and the
//! back-to-work comparison. [`CalculationRequest`] converts into the
//! engine's [`RawInputs`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AgeBracket, BackToWorkInput, CareType, FeeInput, IncomeBucket, IncomeInput, RawInputs, State,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Number of children in care.
    pub children_count: u8,
    /// Age bracket of the youngest child in care.
    pub youngest_age: AgeBracket,
    /// Exact combined family income, if known.
    #[serde(default)]
    pub income: Option<Decimal>,
    /// Income range used when no exact income is given.
    pub income_bucket: IncomeBucket,
    /// Type of care.
    pub care_type: CareType,
    /// State or territory.
    pub state: State,
    /// Days of care per week.
    pub days_per_week: u8,
    /// Hours of care per day; defaults by care type.
    #[serde(default)]
    pub hours_per_day: Option<Decimal>,
    /// Daily fee charged by the provider.
    #[serde(default)]
    pub fee: Option<Decimal>,
    /// Use the regional average fee even if `fee` is present. Ignored for
    /// care types with no regional average.
    #[serde(default)]
    pub use_average_fee: bool,
    /// Whether to run the back-to-work comparison.
    #[serde(default)]
    pub back_to_work: bool,
    /// The returning parent's current income.
    #[serde(default)]
    pub current_individual_income: Option<Decimal>,
    /// Full-time-equivalent salary of the proposed role.
    #[serde(default)]
    pub proposed_fte_salary: Option<Decimal>,
    /// Work-related costs per full-time week.
    #[serde(default)]
    pub weekly_work_costs: Option<Decimal>,
}

impl From<CalculationRequest> for RawInputs {
    fn from(req: CalculationRequest) -> Self {
        // care types without a published average keep the entered fee
        let average_available = req.use_average_fee && req.care_type.has_regional_average();
        let fee = match req.fee {
            Some(amount) if !average_available => FeeInput::Exact(amount),
            _ => FeeInput::UseRegionalAverage,
        };

        let back_to_work = req.back_to_work.then(|| BackToWorkInput {
            current_individual_income: req.current_individual_income.unwrap_or_default(),
            proposed_fte_salary: req.proposed_fte_salary.unwrap_or_default(),
            weekly_work_costs: req.weekly_work_costs.unwrap_or_default(),
        });

        RawInputs {
            children_count: req.children_count,
            youngest_age: req.youngest_age,
            income: IncomeInput {
                exact: req.income,
                bucket: req.income_bucket,
            },
            care_type: req.care_type,
            state: req.state,
            days_per_week: req.days_per_week,
            hours_per_day: req.hours_per_day,
            fee,
            back_to_work,
        }
    }
}
