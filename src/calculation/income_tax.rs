//! Individual income tax calculation.
//!
//! This module computes resident individual income tax for an annual
//! income: progressive bracket tax, the Medicare levy with its low-income
//! shade-in, and the low income tax offset.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{LowIncomeOffset, MedicareLevy, TaxRates};

use super::rounding::round_cents;

/// The result of an income tax calculation.
///
/// All currency amounts are rounded to cents. Rates are in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// The income the tax was calculated on (negative inputs are clamped to zero).
    pub gross_income: Decimal,
    /// Bracket tax before offsets.
    pub income_tax: Decimal,
    /// The low income tax offset entitlement.
    pub low_income_offset: Decimal,
    /// The part of the offset actually used (never more than `income_tax`).
    pub offset_applied: Decimal,
    /// The Medicare levy.
    pub medicare_levy: Decimal,
    /// Income tax after offsets plus the Medicare levy.
    pub total_tax: Decimal,
    /// Gross income less total tax.
    pub net_income: Decimal,
    /// The marginal bracket rate, in percent.
    pub marginal_rate: Decimal,
    /// Total tax as a share of gross income, in percent.
    pub effective_rate: Decimal,
}

impl TaxResult {
    /// The result for a zero (or negative) income.
    pub fn zero() -> Self {
        Self {
            gross_income: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            low_income_offset: Decimal::ZERO,
            offset_applied: Decimal::ZERO,
            medicare_levy: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            net_income: Decimal::ZERO,
            marginal_rate: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
        }
    }
}

/// Calculates income tax, Medicare levy and low income offset for an
/// annual income.
///
/// Non-positive incomes return [`TaxResult::zero`]. Otherwise:
///
/// 1. bracket tax = `base_tax + (income - (min - 1)) × rate` for the bracket
///    containing the income;
/// 2. the Medicare levy is nil up to the low-income threshold, shades in at
///    the phase-in rate up to the shade-in threshold, then applies at the
///    flat rate to the whole income;
/// 3. the low income offset reduces bracket tax, at most to zero;
/// 4. total tax = `max(0, bracket tax - offset) + levy`.
///
/// # Examples
///
/// ```
/// use ccs_engine::calculation::calculate_income_tax;
/// use ccs_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/2025-26").unwrap();
/// let result = calculate_income_tax(Decimal::from(95_000), &config.rates().tax);
///
/// assert_eq!(result.income_tax, Decimal::from(19_288));
/// assert_eq!(result.medicare_levy, Decimal::from(1_900));
/// assert_eq!(result.net_income, Decimal::from(73_812));
/// ```
pub fn calculate_income_tax(income: Decimal, rates: &TaxRates) -> TaxResult {
    if income <= Decimal::ZERO {
        return TaxResult::zero();
    }

    let (income_tax, marginal_rate) = match rates.bracket_for(income) {
        Some(bracket) => (
            bracket.base_tax + (income - (bracket.min - Decimal::ONE)) * bracket.rate,
            bracket.rate,
        ),
        None => (Decimal::ZERO, Decimal::ZERO),
    };

    let medicare_levy = medicare_levy(income, &rates.medicare_levy);
    let low_income_offset = low_income_offset(income, &rates.low_income_offset);

    let tax_after_offset = (income_tax - low_income_offset).max(Decimal::ZERO);
    let offset_applied = income_tax - tax_after_offset;
    let total_tax = round_cents(tax_after_offset + medicare_levy);
    let net_income = round_cents(income) - total_tax;

    TaxResult {
        gross_income: round_cents(income),
        income_tax: round_cents(income_tax),
        low_income_offset: round_cents(low_income_offset),
        offset_applied: round_cents(offset_applied),
        medicare_levy: round_cents(medicare_levy),
        total_tax,
        net_income,
        marginal_rate: (marginal_rate * Decimal::ONE_HUNDRED).normalize(),
        effective_rate: round_cents(total_tax / income * Decimal::ONE_HUNDRED),
    }
}

fn medicare_levy(income: Decimal, levy: &MedicareLevy) -> Decimal {
    if income <= levy.low_income_threshold {
        Decimal::ZERO
    } else if income <= levy.shade_in_threshold {
        levy.phase_in_rate * (income - levy.low_income_threshold)
    } else {
        levy.rate * income
    }
}

fn low_income_offset(income: Decimal, offset: &LowIncomeOffset) -> Decimal {
    let at_middle =
        offset.maximum - offset.middle_rate * (offset.middle_threshold - offset.full_threshold);

    let amount = if income <= offset.full_threshold {
        offset.maximum
    } else if income <= offset.middle_threshold {
        offset.maximum - offset.middle_rate * (income - offset.full_threshold)
    } else if income <= offset.upper_threshold {
        at_middle - offset.upper_rate * (income - offset.middle_threshold)
    } else {
        Decimal::ZERO
    };

    amount.max(Decimal::ZERO)
}
