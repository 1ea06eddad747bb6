//! Performance benchmarks for the Child Care Subsidy engine.
//!
//! Covers the pieces a request spends its time in:
//! - a full calculation (including the 113-row sensitivity sweep)
//! - the sensitivity sweep alone, across sweep resolutions
//! - income tax
//! - a request through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use ccs_engine::api::{AppState, create_router};
use ccs_engine::calculation::{
    CareProfile, SensitivityParams, SweepBounds, analyze_income_sensitivity, calculate,
    calculate_income_tax,
};
use ccs_engine::config::ConfigLoader;
use ccs_engine::models::{
    AgeBracket, BackToWorkInput, CareType, FeeInput, IncomeBucket, IncomeInput, RateCapAgeGroup,
    RawInputs, State,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/2025-26").expect("Failed to load config")
}

fn household(back_to_work: bool) -> RawInputs {
    RawInputs {
        children_count: 2,
        youngest_age: AgeBracket::OneToTwo,
        income: IncomeInput {
            exact: Some(Decimal::from(150_000)),
            bucket: IncomeBucket::From120kTo180k,
        },
        care_type: CareType::CentreBasedDayCare,
        state: State::Nsw,
        days_per_week: 3,
        hours_per_day: None,
        fee: FeeInput::UseRegionalAverage,
        back_to_work: back_to_work.then_some(BackToWorkInput {
            current_individual_income: Decimal::from(40_000),
            proposed_fte_salary: Decimal::from(90_000),
            weekly_work_costs: Decimal::from(80),
        }),
    }
}

/// Benchmark: full calculation with and without the back-to-work comparison.
fn bench_full_calculation(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("calculate");

    for back_to_work in [false, true] {
        let raw = household(back_to_work);
        group.bench_with_input(
            BenchmarkId::new("back_to_work", back_to_work),
            &raw,
            |b, raw| {
                b.iter(|| {
                    calculate(
                        black_box(raw),
                        config.rates(),
                        config.regional_fees(),
                    )
                    .unwrap()
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: sensitivity sweep at several step sizes.
fn bench_sensitivity(c: &mut Criterion) {
    let config = load_config();
    let params = SensitivityParams {
        actual_income: Decimal::from(150_000),
        days_per_week: 3,
        care: CareProfile {
            daily_fee: Decimal::from(150),
            hours_per_day: Decimal::from(10),
            care_type: CareType::CentreBasedDayCare,
            age_group: RateCapAgeGroup::BelowSchoolAge,
            children_count: 2,
            sibling_rate_eligible: true,
        },
    };

    let mut group = c.benchmark_group("sensitivity");
    for step in [20_000i64, 5_000, 1_000] {
        let bounds = SweepBounds {
            step: Decimal::from(step),
            ..SweepBounds::default()
        };
        let rows = (560_000 / step + 1) as u64;
        group.throughput(Throughput::Elements(rows));
        group.bench_with_input(BenchmarkId::new("step", step), &bounds, |b, bounds| {
            b.iter(|| analyze_income_sensitivity(&params, *bounds, config.rates()).unwrap())
        });
    }
    group.finish();
}

/// Benchmark: income tax across the brackets.
fn bench_income_tax(c: &mut Criterion) {
    let config = load_config();
    let tax = &config.rates().tax;

    c.bench_function("income_tax", |b| {
        b.iter(|| {
            for income in [15_000, 40_000, 95_000, 160_000, 250_000] {
                black_box(calculate_income_tax(
                    black_box(Decimal::from(income)),
                    tax,
                ));
            }
        })
    });
}

/// Benchmark: a calculation request through the router.
fn bench_http_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({
        "children_count": 2,
        "youngest_age": "one_to_two",
        "income": 150000,
        "income_bucket": "120k_180k",
        "care_type": "centre_based_day_care",
        "state": "NSW",
        "days_per_week": 3,
        "back_to_work": true,
        "current_individual_income": 40000,
        "proposed_fte_salary": 90000,
        "weekly_work_costs": 80
    })
    .to_string();

    c.bench_function("http_calculate", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_full_calculation,
    bench_sensitivity,
    bench_income_tax,
    bench_http_request,
);
criterion_main!(benches);
