//! Income sensitivity sweep.
//!
//! This module holds a family's childcare arrangement fixed and sweeps
//! combined income across a range, showing how the subsidy percentage and
//! the family's annual cost respond. It highlights the income step where
//! cost rises fastest ("pain point") and the step where it rises least
//! ("sweet spot").

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateConfiguration;
use crate::error::{EngineError, EngineResult};

use super::family_costs::{CareProfile, calculate_family_costs};

/// The income range and increment to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepBounds {
    /// Lowest income in the sweep.
    pub min_income: Decimal,
    /// Highest income in the sweep (inclusive when on a step).
    pub max_income: Decimal,
    /// Income increment between rows.
    pub step: Decimal,
}

impl Default for SweepBounds {
    fn default() -> Self {
        Self {
            min_income: Decimal::from(40_000),
            max_income: Decimal::from(600_000),
            step: Decimal::from(5_000),
        }
    }
}

/// Inputs to the sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityParams {
    /// The family's actual combined income.
    pub actual_income: Decimal,
    /// Days of care per week.
    pub days_per_week: u8,
    /// The childcare arrangement.
    pub care: CareProfile,
}

/// One income point in the sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityRow {
    /// Combined family income.
    pub income: Decimal,
    /// Standard subsidy percentage.
    pub subsidy_percent: Decimal,
    /// Annual family subsidy after reconciliation.
    pub annual_subsidy: Decimal,
    /// Annual family cost after reconciliation.
    pub annual_out_of_pocket: Decimal,
    /// Increase in annual cost over the previous row.
    pub cost_increase: Option<Decimal>,
}

/// The change in annual cost between two adjacent rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginalStep {
    /// Income of the earlier row.
    pub from_income: Decimal,
    /// Income of the later row.
    pub to_income: Decimal,
    /// Subsidy percentage of the earlier row.
    pub from_percent: Decimal,
    /// Subsidy percentage of the later row.
    pub to_percent: Decimal,
    /// Increase in annual family cost across the step.
    pub cost_increase: Decimal,
}

/// The complete sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityResult {
    /// The bounds swept.
    pub bounds: SweepBounds,
    /// The family's actual income.
    pub actual_income: Decimal,
    /// Rows in ascending income order.
    pub rows: Vec<SensitivityRow>,
    /// Index of the row nearest the actual income (lower row on a tie).
    pub nearest_row_index: usize,
    /// The lowest swept income at which the subsidy is zero.
    pub zero_subsidy_income: Option<Decimal>,
    /// The step with the largest cost increase.
    pub pain_point: Option<MarginalStep>,
    /// The step with the smallest positive cost increase.
    pub sweet_spot: Option<MarginalStep>,
}

/// Sweeps income across `bounds` with the care arrangement held fixed.
///
/// Pain point and sweet spot only consider steps that start from a row
/// with a subsidy above zero; once the subsidy has run out further steps
/// say nothing about the taper. On equal increases the lower step wins.
///
/// # Errors
///
/// - [`EngineError::InvalidArgument`] if `step` is not positive or
///   `min_income` exceeds `max_income`.
/// - Errors from the subsidy calculators.
pub fn analyze_income_sensitivity(
    params: &SensitivityParams,
    bounds: SweepBounds,
    rates: &RateConfiguration,
) -> EngineResult<SensitivityResult> {
    if bounds.step <= Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "step",
            format!("must be positive, got {}", bounds.step),
        ));
    }
    if bounds.min_income > bounds.max_income {
        return Err(EngineError::invalid_argument(
            "min_income",
            format!(
                "must not exceed max_income ({} > {})",
                bounds.min_income, bounds.max_income
            ),
        ));
    }

    let mut rows: Vec<SensitivityRow> = Vec::new();
    let mut income = bounds.min_income;
    while income <= bounds.max_income {
        let family =
            calculate_family_costs(income, params.days_per_week, &params.care, &rates.ccs)?;
        let annual_out_of_pocket = family.totals.out_of_pocket.annual;
        rows.push(SensitivityRow {
            income,
            subsidy_percent: family.standard.percent,
            annual_subsidy: family.totals.subsidy.annual,
            annual_out_of_pocket,
            cost_increase: rows
                .last()
                .map(|previous| annual_out_of_pocket - previous.annual_out_of_pocket),
        });
        income += bounds.step;
    }

    let nearest_row_index = nearest_row(&rows, params.actual_income);
    let zero_subsidy_income = rows
        .iter()
        .find(|row| row.subsidy_percent.is_zero())
        .map(|row| row.income);
    let (pain_point, sweet_spot) = marginal_extremes(&rows);

    Ok(SensitivityResult {
        bounds,
        actual_income: params.actual_income,
        rows,
        nearest_row_index,
        zero_subsidy_income,
        pain_point,
        sweet_spot,
    })
}

fn nearest_row(rows: &[SensitivityRow], income: Decimal) -> usize {
    let mut nearest = 0;
    let mut nearest_distance: Option<Decimal> = None;
    for (index, row) in rows.iter().enumerate() {
        let distance = (row.income - income).abs();
        if nearest_distance.is_none_or(|best| distance < best) {
            nearest = index;
            nearest_distance = Some(distance);
        }
    }
    nearest
}

fn marginal_extremes(rows: &[SensitivityRow]) -> (Option<MarginalStep>, Option<MarginalStep>) {
    let mut pain_point: Option<MarginalStep> = None;
    let mut sweet_spot: Option<MarginalStep> = None;

    for pair in rows.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if from.subsidy_percent <= Decimal::ZERO {
            continue;
        }
        let step = MarginalStep {
            from_income: from.income,
            to_income: to.income,
            from_percent: from.subsidy_percent,
            to_percent: to.subsidy_percent,
            cost_increase: to.annual_out_of_pocket - from.annual_out_of_pocket,
        };

        if pain_point
            .as_ref()
            .is_none_or(|best| step.cost_increase > best.cost_increase)
        {
            pain_point = Some(step.clone());
        }
        if step.cost_increase > Decimal::ZERO
            && sweet_spot
                .as_ref()
                .is_none_or(|best| step.cost_increase < best.cost_increase)
        {
            sweet_spot = Some(step);
        }
    }

    (pain_point, sweet_spot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{self, dec};
    use crate::models::{CareType, RateCapAgeGroup};

    fn params(actual_income: &str) -> SensitivityParams {
        SensitivityParams {
            actual_income: dec(actual_income),
            days_per_week: 3,
            care: CareProfile {
                daily_fee: dec("140"),
                hours_per_day: dec("10"),
                care_type: CareType::CentreBasedDayCare,
                age_group: RateCapAgeGroup::BelowSchoolAge,
                children_count: 1,
                sibling_rate_eligible: false,
            },
        }
    }

    fn sweep(actual_income: &str) -> SensitivityResult {
        analyze_income_sensitivity(
            &params(actual_income),
            SweepBounds::default(),
            &fixtures::rates_2025_26(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_sweep_row_count() {
        let result = sweep("95000");
        assert_eq!(result.rows.len(), 113);
        assert_eq!(result.rows[0].income, dec("40000"));
        assert_eq!(result.rows[112].income, dec("600000"));
        assert_eq!(result.rows[0].cost_increase, None);
    }

    #[test]
    fn test_nearest_row_to_actual_income() {
        let result = sweep("96400");
        assert_eq!(result.rows[result.nearest_row_index].income, dec("95000"));
    }

    #[test]
    fn test_nearest_row_tie_prefers_lower() {
        let result = sweep("97500");
        assert_eq!(result.rows[result.nearest_row_index].income, dec("95000"));
    }

    #[test]
    fn test_nearest_row_outside_range() {
        assert_eq!(sweep("10000").nearest_row_index, 0);
        assert_eq!(sweep("900000").nearest_row_index, 112);
    }

    #[test]
    fn test_zero_subsidy_income() {
        let result = sweep("95000");
        // 535,279 is the first income at 0%; the next swept point is 540,000
        assert_eq!(result.zero_subsidy_income, Some(dec("540000")));
        let first_zero = result
            .rows
            .iter()
            .position(|r| r.subsidy_percent.is_zero())
            .unwrap();
        assert!(result.rows[..first_zero]
            .iter()
            .all(|r| r.subsidy_percent > Decimal::ZERO));
    }

    #[test]
    fn test_zero_subsidy_income_is_idempotent() {
        assert_eq!(sweep("95000"), sweep("95000"));
    }

    #[test]
    fn test_no_zero_crossing_in_narrow_range() {
        let result = analyze_income_sensitivity(
            &params("95000"),
            SweepBounds {
                min_income: dec("40000"),
                max_income: dec("100000"),
                step: dec("5000"),
            },
            &fixtures::rates_2025_26(),
        )
        .unwrap();
        assert_eq!(result.zero_subsidy_income, None);
    }

    #[test]
    fn test_pain_point_and_sweet_spot() {
        let result = sweep("95000");
        let pain = result.pain_point.as_ref().unwrap();
        let sweet = result.sweet_spot.as_ref().unwrap();

        assert!(pain.from_percent > Decimal::ZERO);
        assert!(sweet.from_percent > Decimal::ZERO);
        assert!(sweet.cost_increase > Decimal::ZERO);
        assert!(pain.cost_increase >= sweet.cost_increase);

        for pair in result.rows.windows(2) {
            if pair[0].subsidy_percent > Decimal::ZERO {
                let increase = pair[1].annual_out_of_pocket - pair[0].annual_out_of_pocket;
                assert!(increase <= pain.cost_increase);
                if increase > Decimal::ZERO {
                    assert!(increase >= sweet.cost_increase);
                }
            }
        }
    }

    #[test]
    fn test_flat_region_has_no_sweet_spot() {
        // entirely below the threshold: cost never changes
        let result = analyze_income_sensitivity(
            &params("50000"),
            SweepBounds {
                min_income: dec("40000"),
                max_income: dec("80000"),
                step: dec("5000"),
            },
            &fixtures::rates_2025_26(),
        )
        .unwrap();
        assert!(result.sweet_spot.is_none());
        assert_eq!(result.pain_point.unwrap().cost_increase, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let rates = fixtures::rates_2025_26();
        let zero_step = SweepBounds {
            step: Decimal::ZERO,
            ..SweepBounds::default()
        };
        assert!(matches!(
            analyze_income_sensitivity(&params("95000"), zero_step, &rates),
            Err(EngineError::InvalidArgument { .. })
        ));

        let inverted = SweepBounds {
            min_income: dec("700000"),
            ..SweepBounds::default()
        };
        assert!(matches!(
            analyze_income_sensitivity(&params("95000"), inverted, &rates),
            Err(EngineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_single_point_sweep() {
        let result = analyze_income_sensitivity(
            &params("95000"),
            SweepBounds {
                min_income: dec("95000"),
                max_income: dec("95000"),
                step: dec("5000"),
            },
            &fixtures::rates_2025_26(),
        )
        .unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].subsidy_percent, dec("88"));
        assert!(result.pain_point.is_none());
    }
}
