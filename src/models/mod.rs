//! Core data models for the subsidy engine.
//!
//! This module contains the household enumerations, raw and resolved
//! inputs, and the calculation result with its audit trace.

mod calculation_result;
mod household;
mod inputs;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, SEVERITY_LOW, SEVERITY_MEDIUM,
};
pub use household::{AgeBracket, CareType, IncomeBucket, RateCapAgeGroup, State};
pub use inputs::{
    BackToWorkInput, FeeInput, FeeSource, HoursSource, IncomeInput, IncomeSource, RawInputs,
    ResolvedBackToWork, ResolvedInputs,
};
