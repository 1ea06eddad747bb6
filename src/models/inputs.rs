//! Raw and resolved calculation inputs.
//!
//! [`RawInputs`] captures the selections a family makes, some of which are
//! partial or bucketed. [`ResolvedInputs`] is the fully concrete projection
//! produced once per request by the input resolver; downstream calculators
//! only ever see resolved values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::household::{AgeBracket, CareType, IncomeBucket, RateCapAgeGroup, State};

/// Combined family income as entered.
///
/// The bucket is always present; an exact figure, when present and
/// non-negative, takes precedence over the bucket midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeInput {
    /// An exact annual income, if the family typed one.
    #[serde(default)]
    pub exact: Option<Decimal>,
    /// The selected income bucket.
    pub bucket: IncomeBucket,
}

/// The daily fee for a session of care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum FeeInput {
    /// A fee the family entered themselves.
    Exact(Decimal),
    /// Use the published average for the family's state and care type.
    UseRegionalAverage,
}

/// Optional details for the back-to-work comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackToWorkInput {
    /// The returning parent's current annual income (zero if not working).
    pub current_individual_income: Decimal,
    /// The full-time-equivalent annual salary of the proposed role.
    pub proposed_fte_salary: Decimal,
    /// Work-related costs per full-time week (travel, lunches, etc.).
    pub weekly_work_costs: Decimal,
}

/// The family's selections, as received from the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Number of children in care.
    pub children_count: u8,
    /// Age bracket of the youngest child in care.
    pub youngest_age: AgeBracket,
    /// Combined family income.
    pub income: IncomeInput,
    /// Type of care used.
    pub care_type: CareType,
    /// State or territory the care is delivered in.
    pub state: State,
    /// Days of care per week.
    pub days_per_week: u8,
    /// Hours of care per day, if known.
    #[serde(default)]
    pub hours_per_day: Option<Decimal>,
    /// The daily fee.
    pub fee: FeeInput,
    /// Back-to-work details, when the family opted in.
    #[serde(default)]
    pub back_to_work: Option<BackToWorkInput>,
}

/// Where the resolved family income came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    /// The family entered an exact figure.
    Exact,
    /// The midpoint of the selected bucket.
    BucketMidpoint,
}

/// Where the resolved daily fee came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeSource {
    /// The family entered the fee.
    UserEntered,
    /// The regional average for the state and care type.
    RegionalAverage,
    /// No fee was entered and the care type has no regional average.
    NotProvided,
}

/// Where the resolved hours per day came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursSource {
    /// The family entered a positive figure.
    UserEntered,
    /// The default for the care type.
    CareTypeDefault,
}

/// Fully resolved back-to-work details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBackToWork {
    /// The returning parent's current annual income.
    pub current_individual_income: Decimal,
    /// The other parent's income, derived as combined minus individual.
    pub partner_income: Decimal,
    /// The full-time-equivalent annual salary of the proposed role.
    pub proposed_fte_salary: Decimal,
    /// Work-related costs per full-time week.
    pub weekly_work_costs: Decimal,
}

/// The null-free projection of [`RawInputs`] that calculators consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInputs {
    /// Number of children in care (at least one).
    pub children_count: u8,
    /// Age bracket of the youngest child in care.
    pub youngest_age: AgeBracket,
    /// The age group used for the hourly rate cap.
    pub rate_cap_age_group: RateCapAgeGroup,
    /// Whether younger siblings attract the higher subsidy rate.
    pub sibling_rate_eligible: bool,
    /// Combined annual family income.
    pub family_income: Decimal,
    /// Where the family income came from.
    pub income_source: IncomeSource,
    /// Type of care used.
    pub care_type: CareType,
    /// State or territory.
    pub state: State,
    /// Days of care per week (1 to 5).
    pub days_per_week: u8,
    /// Hours of care per day (positive).
    pub hours_per_day: Decimal,
    /// Where the hours came from.
    pub hours_source: HoursSource,
    /// Daily fee per child (non-negative).
    pub daily_fee: Decimal,
    /// Where the fee came from.
    pub fee_source: FeeSource,
    /// Back-to-work details, when requested.
    pub back_to_work: Option<ResolvedBackToWork>,
}
