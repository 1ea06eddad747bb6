//! Household and childcare classification types.
//!
//! This module defines the enumerations that describe a family's situation:
//! the type of care used, the state or territory, the youngest child's age
//! bracket and the bucketed income ranges offered by the input form.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The type of approved childcare service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareType {
    /// Long day care delivered at a centre.
    CentreBasedDayCare,
    /// Care delivered by an educator in their own home.
    FamilyDayCare,
    /// Before/after school and vacation care.
    OutsideSchoolHoursCare,
    /// Care delivered in the family's home. Fees are set per family, not
    /// per child, so there is no meaningful regional average.
    InHomeCare,
}

impl CareType {
    /// All care types, in a stable order.
    pub const ALL: [CareType; 4] = [
        CareType::CentreBasedDayCare,
        CareType::FamilyDayCare,
        CareType::OutsideSchoolHoursCare,
        CareType::InHomeCare,
    ];

    /// Returns the snake_case identifier used in configuration and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            CareType::CentreBasedDayCare => "centre_based_day_care",
            CareType::FamilyDayCare => "family_day_care",
            CareType::OutsideSchoolHoursCare => "outside_school_hours_care",
            CareType::InHomeCare => "in_home_care",
        }
    }

    /// Returns true if fees for this care type are published as a regional
    /// per-child average.
    pub fn has_regional_average(self) -> bool {
        !matches!(self, CareType::InHomeCare)
    }

    /// The hours of care assumed per session when the family does not
    /// provide a positive figure.
    pub fn default_hours_per_day(self) -> Decimal {
        match self {
            CareType::CentreBasedDayCare => Decimal::from(10),
            CareType::FamilyDayCare => Decimal::from(10),
            CareType::OutsideSchoolHoursCare => Decimal::from(3),
            CareType::InHomeCare => Decimal::from(8),
        }
    }
}

impl fmt::Display for CareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An Australian state or territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    /// New South Wales.
    Nsw,
    /// Victoria.
    Vic,
    /// Queensland.
    Qld,
    /// Western Australia.
    Wa,
    /// South Australia.
    Sa,
    /// Tasmania.
    Tas,
    /// Australian Capital Territory.
    Act,
    /// Northern Territory.
    Nt,
}

impl State {
    /// All states and territories, in a stable order.
    pub const ALL: [State; 8] = [
        State::Nsw,
        State::Vic,
        State::Qld,
        State::Wa,
        State::Sa,
        State::Tas,
        State::Act,
        State::Nt,
    ];

    /// Returns the upper-case postal code.
    pub fn code(self) -> &'static str {
        match self {
            State::Nsw => "NSW",
            State::Vic => "VIC",
            State::Qld => "QLD",
            State::Wa => "WA",
            State::Sa => "SA",
            State::Tas => "TAS",
            State::Act => "ACT",
            State::Nt => "NT",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The age bracket of the youngest child in care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    /// Under 12 months.
    UnderOne,
    /// One to two years old.
    OneToTwo,
    /// Three to five years old.
    ThreeToFive,
    /// Six and over (attending school).
    SchoolAge,
}

impl AgeBracket {
    /// Returns true if the child has not yet reached the school-age cutoff.
    pub fn is_below_school_age(self) -> bool {
        !matches!(self, AgeBracket::SchoolAge)
    }

    /// The rate-cap age group a child in this bracket falls into.
    pub fn rate_cap_age_group(self) -> RateCapAgeGroup {
        if self.is_below_school_age() {
            RateCapAgeGroup::BelowSchoolAge
        } else {
            RateCapAgeGroup::SchoolAge
        }
    }
}

/// The age group key used to look up hourly rate caps.
///
/// `Any` is a wildcard used by care types whose cap does not depend on age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateCapAgeGroup {
    /// Children below school age.
    BelowSchoolAge,
    /// Children attending school.
    SchoolAge,
    /// Any age.
    Any,
}

impl fmt::Display for RateCapAgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RateCapAgeGroup::BelowSchoolAge => "below_school_age",
            RateCapAgeGroup::SchoolAge => "school_age",
            RateCapAgeGroup::Any => "any",
        })
    }
}

/// A bucketed combined family income range.
///
/// Each bucket has a defined midpoint that stands in for the family's
/// income when no exact figure is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeBucket {
    /// $0 – $50,000.
    #[serde(rename = "under_50k")]
    Under50k,
    /// $50,000 – $80,000.
    #[serde(rename = "50k_80k")]
    From50kTo80k,
    /// $80,000 – $120,000.
    #[serde(rename = "80k_120k")]
    From80kTo120k,
    /// $120,000 – $180,000.
    #[serde(rename = "120k_180k")]
    From120kTo180k,
    /// $180,000 – $250,000.
    #[serde(rename = "180k_250k")]
    From180kTo250k,
    /// $250,000 – $350,000.
    #[serde(rename = "250k_350k")]
    From250kTo350k,
    /// $350,000 – $500,000.
    #[serde(rename = "350k_500k")]
    From350kTo500k,
    /// Over $500,000.
    #[serde(rename = "over_500k")]
    Over500k,
}

impl IncomeBucket {
    /// The income used for calculation when this bucket is selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use ccs_engine::models::IncomeBucket;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(IncomeBucket::From80kTo120k.midpoint(), Decimal::from(100_000));
    /// ```
    pub fn midpoint(self) -> Decimal {
        let value: i64 = match self {
            IncomeBucket::Under50k => 25_000,
            IncomeBucket::From50kTo80k => 65_000,
            IncomeBucket::From80kTo120k => 100_000,
            IncomeBucket::From120kTo180k => 150_000,
            IncomeBucket::From180kTo250k => 215_000,
            IncomeBucket::From250kTo350k => 300_000,
            IncomeBucket::From350kTo500k => 425_000,
            // open-ended, fixed stand-in
            IncomeBucket::Over500k => 550_000,
        };
        Decimal::from(value)
    }
}
