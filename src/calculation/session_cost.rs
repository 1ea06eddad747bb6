//! Per-session and annualized childcare cost.
//!
//! This module applies a subsidy percentage to a single day of care
//! (respecting the hourly rate cap) and scales the result to weekly,
//! fortnightly and annual totals, including withholding and the annual
//! per-child cap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CcsRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{CareType, RateCapAgeGroup};

use super::rounding::round_cents;

/// The most days of care per week the subsidy models.
pub const MAX_CARE_DAYS_PER_WEEK: u8 = 5;

/// Cost of a single session (day) of care for one child.
///
/// Hourly figures are kept at full precision; per-session currency
/// amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCostResult {
    /// The fee charged for the session.
    pub daily_fee: Decimal,
    /// Hours of care in the session.
    pub hours_per_day: Decimal,
    /// The fee per hour.
    pub hourly_fee: Decimal,
    /// The hourly rate cap for the care type and age group.
    pub rate_cap: Decimal,
    /// The hourly amount the subsidy is calculated on: `min(hourly_fee, rate_cap)`.
    pub effective_hourly_rate: Decimal,
    /// The hourly fee above the cap, always paid by the family.
    pub fee_above_cap_per_hour: Decimal,
    /// The fee above the cap over the whole session.
    pub fee_above_cap_per_session: Decimal,
    /// The subsidy percentage applied.
    pub subsidy_percent: Decimal,
    /// Subsidy for the session.
    pub subsidy_per_session: Decimal,
    /// The family's gap fee for the session.
    pub out_of_pocket_per_session: Decimal,
}

/// An amount expressed per week, per fortnight and per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodAmounts {
    /// Per week.
    pub weekly: Decimal,
    /// Per fortnight.
    pub fortnightly: Decimal,
    /// Per financial year.
    pub annual: Decimal,
}

impl PeriodAmounts {
    fn from_weekly(weekly: Decimal, weeks_per_year: u32) -> Self {
        Self {
            weekly,
            fortnightly: weekly * Decimal::TWO,
            annual: weekly * Decimal::from(weeks_per_year),
        }
    }

    fn map(self, f: impl Fn(Decimal) -> Decimal) -> Self {
        Self {
            weekly: f(self.weekly),
            fortnightly: f(self.fortnightly),
            annual: f(self.annual),
        }
    }

    fn zip(self, other: Self, f: impl Fn(Decimal, Decimal) -> Decimal) -> Self {
        Self {
            weekly: f(self.weekly, other.weekly),
            fortnightly: f(self.fortnightly, other.fortnightly),
            annual: f(self.annual, other.annual),
        }
    }

    /// Adds `count` copies of `other` to these amounts.
    pub fn plus_times(self, other: Self, count: u32) -> Self {
        let count = Decimal::from(count);
        self.zip(other, |a, b| round_cents(a + b * count))
    }
}

/// Annualized cost of care for one child.
///
/// `out_of_pocket` is the reconciled gap fee. `out_of_pocket_during_year`
/// adds the withheld subsidy, which the family pays during the year and
/// has refunded at reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualCostResult {
    /// Days of care per week.
    pub days_per_week: u8,
    /// Weeks of care per year used for annual figures.
    pub weeks_per_year: u32,
    /// Total fees charged.
    pub gross_fee: PeriodAmounts,
    /// Subsidy entitlement after reconciliation.
    pub subsidy: PeriodAmounts,
    /// Subsidy withheld during the year.
    pub withheld: PeriodAmounts,
    /// Subsidy paid to the provider during the year.
    pub subsidy_paid_during_year: PeriodAmounts,
    /// What the family pays during the year (gap fee plus withholding).
    pub out_of_pocket_during_year: PeriodAmounts,
    /// What the family pays once the year is reconciled.
    pub out_of_pocket: PeriodAmounts,
    /// The annual cap considered, if the family's income attracts one.
    pub annual_cap: Option<Decimal>,
    /// True if the annual cap reduced the subsidy.
    pub annual_cap_applied: bool,
}

/// Calculates the subsidy and gap fee for one session of care.
///
/// ```text
/// hourly_fee     = daily_fee / hours
/// effective rate = min(hourly_fee, rate_cap)
/// subsidy        = effective rate × percent × hours
/// out of pocket  = daily_fee - subsidy
/// ```
///
/// Any fee above the cap is never subsidised.
///
/// # Errors
///
/// - [`EngineError::InvalidArgument`] if `hours_per_day` is not positive,
///   `daily_fee` is negative or `subsidy_percent` is outside 0–100.
/// - [`EngineError::MissingRateCap`] if the schedule has no cap for the
///   care type and age group.
///
/// # Examples
///
/// ```
/// use ccs_engine::calculation::calculate_session_cost;
/// use ccs_engine::config::ConfigLoader;
/// use ccs_engine::models::{CareType, RateCapAgeGroup};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::load("./config/2025-26").unwrap();
/// let session = calculate_session_cost(
///     Decimal::from(140),
///     Decimal::from(10),
///     Decimal::from(88),
///     CareType::CentreBasedDayCare,
///     RateCapAgeGroup::BelowSchoolAge,
///     &config.rates().ccs,
/// )
/// .unwrap();
///
/// assert_eq!(session.subsidy_per_session, Decimal::from_str("123.20").unwrap());
/// assert_eq!(session.out_of_pocket_per_session, Decimal::from_str("16.80").unwrap());
/// ```
pub fn calculate_session_cost(
    daily_fee: Decimal,
    hours_per_day: Decimal,
    subsidy_percent: Decimal,
    care_type: CareType,
    age_group: RateCapAgeGroup,
    ccs: &CcsRates,
) -> EngineResult<SessionCostResult> {
    if hours_per_day <= Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "hours_per_day",
            format!("must be positive, got {}", hours_per_day),
        ));
    }
    if daily_fee < Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "daily_fee",
            format!("must not be negative, got {}", daily_fee),
        ));
    }
    if subsidy_percent < Decimal::ZERO || subsidy_percent > Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid_argument(
            "subsidy_percent",
            format!("must be between 0 and 100, got {}", subsidy_percent),
        ));
    }

    let rate_cap = ccs.rate_cap(care_type, age_group)?;

    let hourly_fee = daily_fee / hours_per_day;
    let effective_hourly_rate = hourly_fee.min(rate_cap);
    let fee_above_cap_per_hour = (hourly_fee - rate_cap).max(Decimal::ZERO);

    let daily_fee = round_cents(daily_fee);
    let subsidy_per_session = round_cents(
        effective_hourly_rate * subsidy_percent / Decimal::ONE_HUNDRED * hours_per_day,
    );

    Ok(SessionCostResult {
        daily_fee,
        hours_per_day,
        hourly_fee: hourly_fee.normalize(),
        rate_cap,
        effective_hourly_rate: effective_hourly_rate.normalize(),
        fee_above_cap_per_hour: fee_above_cap_per_hour.normalize(),
        fee_above_cap_per_session: round_cents(fee_above_cap_per_hour * hours_per_day),
        subsidy_percent,
        subsidy_per_session,
        out_of_pocket_per_session: daily_fee - subsidy_per_session,
    })
}

/// Returns the per-child annual subsidy cap if the family income exceeds
/// the cap's income threshold.
pub fn applicable_annual_cap(family_income: Decimal, ccs: &CcsRates) -> Option<Decimal> {
    (family_income > ccs.annual_cap.income_threshold).then_some(ccs.annual_cap.amount)
}

/// Scales a session cost to weekly, fortnightly and annual totals.
///
/// Weekly figures are the session figures times `days_per_week`; the
/// fortnight is two weeks and the year is `care_weeks_per_year` weeks.
/// Withholding is taken from the subsidy (not the gross fee) in each
/// period. When `annual_cap` is given and the annual subsidy exceeds it,
/// the annual subsidy is held to the cap, the excess moves to the gap fee
/// and weekly/fortnightly subsidy is re-spread evenly over the year.
///
/// Annual figures depend on the schedule's week count. The shipped
/// schedule uses 52 weeks, so examples worked on a 50-week year scale by
/// 52/50.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if `days_per_week` is outside
/// 1–5.
pub fn annualize_session_cost(
    session: &SessionCostResult,
    days_per_week: u8,
    ccs: &CcsRates,
    annual_cap: Option<Decimal>,
) -> EngineResult<AnnualCostResult> {
    if !(1..=MAX_CARE_DAYS_PER_WEEK).contains(&days_per_week) {
        return Err(EngineError::invalid_argument(
            "days_per_week",
            format!(
                "must be between 1 and {}, got {}",
                MAX_CARE_DAYS_PER_WEEK, days_per_week
            ),
        ));
    }

    let weeks = ccs.care_weeks_per_year;
    let days = Decimal::from(days_per_week);

    let gross_fee = PeriodAmounts::from_weekly(session.daily_fee * days, weeks);
    let mut subsidy = PeriodAmounts::from_weekly(session.subsidy_per_session * days, weeks);

    let binding_cap = annual_cap.filter(|cap| subsidy.annual > *cap);
    if let Some(cap) = binding_cap {
        let weekly = round_cents(cap / Decimal::from(weeks));
        subsidy = PeriodAmounts {
            weekly,
            fortnightly: weekly * Decimal::TWO,
            annual: cap,
        };
    }
    let annual_cap_applied = binding_cap.is_some();

    let withholding_rate = ccs.withholding_percent / Decimal::ONE_HUNDRED;
    let withheld = subsidy.map(|amount| round_cents(amount * withholding_rate));
    let out_of_pocket = gross_fee.zip(subsidy, |gross, paid| gross - paid);

    Ok(AnnualCostResult {
        days_per_week,
        weeks_per_year: weeks,
        gross_fee,
        subsidy,
        withheld,
        subsidy_paid_during_year: subsidy.zip(withheld, |paid, held| paid - held),
        out_of_pocket_during_year: out_of_pocket.zip(withheld, |gap, held| gap + held),
        out_of_pocket,
        annual_cap,
        annual_cap_applied,
    })
}
