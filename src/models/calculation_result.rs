//! Calculation result models for the subsidy engine.
//!
//! This module contains the [`CalculationResult`] type returned by the
//! orchestrator together with the audit trace that records every decision
//! taken while producing it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    AnnualCostResult, BackToWorkResult, CcsPercentageResult, FamilyTotals, SensitivityResult,
    SessionCostResult, SiblingBoostResult,
};

use super::ResolvedInputs;

/// Warning severity used by the calculation trace.
pub const SEVERITY_LOW: &str = "low";
/// Warning severity used by the calculation trace.
pub const SEVERITY_MEDIUM: &str = "medium";

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// Stable identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag estimates the family may want to refine, such as a fee
/// taken from the regional average rather than their provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low" or "medium").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use ccs_engine::models::AuditTrace;
/// use serde_json::json;
///
/// let mut trace = AuditTrace::default();
/// trace.record("ccs_percentage", "Standard percentage", json!({}), json!({}), "at threshold");
/// trace.warn("INCOME_FROM_BUCKET", "estimated income", "low");
/// assert_eq!(trace.steps[0].step_number, 1);
/// assert_eq!(trace.warnings.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the last recorded step.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) {
        let step_number = self.steps.last().map_or(1, |step| step.step_number + 1);
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning: reasoning.into(),
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: impl Into<String>, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message: message.into(),
            severity: severity.to_string(),
        });
    }

    /// Returns true if a warning with `code` was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }
}

/// The complete result of a subsidy calculation.
///
/// Identical inputs and rate configuration always produce an identical
/// result, so the struct carries no identifiers or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Version of the rate schedule used.
    pub rate_version: String,
    /// Financial year of the rate schedule used.
    pub financial_year: String,
    /// The inputs after defaults and lookups were applied.
    pub resolved_inputs: ResolvedInputs,
    /// Standard subsidy percentage breakdown for the family income.
    pub ccs_percentage: CcsPercentageResult,
    /// Higher sibling rate, when the family is eligible.
    pub sibling_boost: Option<SiblingBoostResult>,
    /// The percentage applied to the primary child.
    pub applied_percent: Decimal,
    /// Session cost for the primary child.
    pub primary_session: SessionCostResult,
    /// Annualized cost for the primary child.
    pub primary_annual: AnnualCostResult,
    /// Session cost for an eldest child at the standard percentage.
    pub eldest_session: Option<SessionCostResult>,
    /// Annualized cost for an eldest child at the standard percentage.
    pub eldest_annual: Option<AnnualCostResult>,
    /// Combined totals across all children in care.
    pub family_totals: FamilyTotals,
    /// Back-to-work comparison, when requested.
    pub back_to_work: Option<BackToWorkResult>,
    /// Income sensitivity sweep.
    pub sensitivity: SensitivityResult,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
