//! Rate schedule fixtures shared by unit tests.
//!
//! These mirror `config/2025-26/` so unit tests do not depend on the
//! working directory.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    AnnualCap, CcsRates, LowIncomeOffset, MedicareLevy, RateCapEntry, RateConfiguration,
    RegionalFeeTable, ScheduleMetadata, SiblingRates, TaxBracket, TaxRates,
};
use crate::models::{CareType, RateCapAgeGroup, State};

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn cap(care_type: CareType, age_group: RateCapAgeGroup, hourly_cap: &str) -> RateCapEntry {
    RateCapEntry {
        care_type,
        age_group,
        hourly_cap: dec(hourly_cap),
    }
}

fn bracket(min: &str, max: Option<&str>, rate: &str, base_tax: &str) -> TaxBracket {
    TaxBracket {
        min: dec(min),
        max: max.map(dec),
        rate: dec(rate),
        base_tax: dec(base_tax),
    }
}

pub(crate) fn rates_2025_26() -> RateConfiguration {
    RateConfiguration {
        metadata: ScheduleMetadata {
            version: "2025-26.1".to_string(),
            financial_year: "2025-26".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            source_url: "https://www.servicesaustralia.gov.au/child-care-subsidy".to_string(),
        },
        ccs: CcsRates {
            max_percent: dec("90"),
            income_threshold: dec("85279"),
            income_increment: dec("5000"),
            reduction_per_increment: dec("1"),
            floor_percent: dec("0"),
            sibling: SiblingRates {
                boost_points: dec("30"),
                cap_percent: dec("95"),
            },
            rate_caps: vec![
                cap(
                    CareType::CentreBasedDayCare,
                    RateCapAgeGroup::BelowSchoolAge,
                    "14.63",
                ),
                cap(
                    CareType::CentreBasedDayCare,
                    RateCapAgeGroup::SchoolAge,
                    "12.81",
                ),
                cap(CareType::FamilyDayCare, RateCapAgeGroup::Any, "13.56"),
                cap(CareType::OutsideSchoolHoursCare, RateCapAgeGroup::Any, "12.81"),
                cap(CareType::InHomeCare, RateCapAgeGroup::Any, "39.80"),
            ],
            annual_cap: AnnualCap {
                amount: dec("11003"),
                income_threshold: dec("362408"),
            },
            withholding_percent: dec("5"),
            care_weeks_per_year: 52,
        },
        tax: TaxRates {
            brackets: vec![
                bracket("0", Some("18200"), "0", "0"),
                bracket("18201", Some("45000"), "0.16", "0"),
                bracket("45001", Some("135000"), "0.30", "4288"),
                bracket("135001", Some("190000"), "0.37", "31288"),
                bracket("190001", None, "0.45", "51638"),
            ],
            medicare_levy: MedicareLevy {
                rate: dec("0.02"),
                low_income_threshold: dec("27222"),
                shade_in_threshold: dec("34027"),
                phase_in_rate: dec("0.10"),
            },
            low_income_offset: LowIncomeOffset {
                maximum: dec("700"),
                full_threshold: dec("37500"),
                middle_threshold: dec("45000"),
                middle_rate: dec("0.05"),
                upper_threshold: dec("66667"),
                upper_rate: dec("0.015"),
            },
        },
    }
}

pub(crate) fn regional_fees() -> RegionalFeeTable {
    let rows: [(State, &str, &str, &str); 8] = [
        (State::Nsw, "150.00", "120.00", "35.00"),
        (State::Vic, "140.00", "115.00", "33.00"),
        (State::Qld, "125.00", "110.00", "30.00"),
        (State::Wa, "135.00", "115.00", "32.00"),
        (State::Sa, "125.00", "110.00", "30.00"),
        (State::Tas, "120.00", "105.00", "28.00"),
        (State::Act, "160.00", "125.00", "36.00"),
        (State::Nt, "125.00", "110.00", "30.00"),
    ];

    let fees = rows
        .into_iter()
        .map(|(state, centre, family, oshc)| {
            let by_care_type = HashMap::from([
                (CareType::CentreBasedDayCare, dec(centre)),
                (CareType::FamilyDayCare, dec(family)),
                (CareType::OutsideSchoolHoursCare, dec(oshc)),
            ]);
            (state, by_care_type)
        })
        .collect();

    RegionalFeeTable { fees }
}
