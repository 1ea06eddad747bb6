//! Child Care Subsidy estimation engine for Australian families
//!
//! This crate estimates a family's Child Care Subsidy (CCS) entitlement and
//! out-of-pocket childcare cost from household composition, income and
//! care usage, compares returning-to-work scenarios, and sweeps income to
//! show how cost responds. Rates come from a versioned YAML schedule and an
//! HTTP API exposes the calculation.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
