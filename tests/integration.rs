//! Integration tests for the Profit-Sharing Engine.
//!
//! This test suite covers the reference scenarios for every formula, both
//! through the library entry points and through the HTTP API:
//! - Simple percentage
//! - Fixed amount plus percentage
//! - Tiered brackets
//! - Special formula (cap and minimum gate)
//! - Dynamic increments
//! - Grouped stakeholders
//! - Unknown formula types, single and batch
//! - Configured projects loaded from YAML

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use profit_sharing_engine::api::{AppState, create_router};
use profit_sharing_engine::calculation::{calculate, calculate_batch};
use profit_sharing_engine::config::ConfigLoader;
use profit_sharing_engine::error::EngineError;
use profit_sharing_engine::models::{
    FormulaType, GroupConfig, ProfitSharingInput, ProfitSharingRules, TierConfig,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal from a JSON value, whether serialized as string or number.
fn json_decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        other => decimal(&other.to_string()),
    }
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Builds an input whose net profit is exactly `net_profit`.
fn input_with_profit(project_id: &str, net_profit: &str, rules: ProfitSharingRules) -> ProfitSharingInput {
    ProfitSharingInput::from_totals(
        project_id,
        "Proyecto de prueba",
        decimal(net_profit),
        Decimal::ZERO,
        rules,
    )
    .unwrap()
}

fn create_request(project_id: &str, net_profit: i64, rules: Value) -> Value {
    json!({
        "project_id": project_id,
        "project_name": "Proyecto de prueba",
        "total_income": net_profit,
        "total_cost": 0,
        "rules": rules
    })
}

fn breakdown_sum(result: &Value) -> Decimal {
    result["breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| json_decimal(&line["amount"]))
        .sum()
}

// =============================================================================
// Library Scenarios
// =============================================================================

#[test]
fn test_scenario_001_percent_simple() {
    let rules = ProfitSharingRules {
        percent_rate: Some(decimal("10")),
        ..ProfitSharingRules::new(FormulaType::PercentSimple)
    };

    let result = calculate(&input_with_profit("prj_001", "50000", rules)).unwrap();

    assert_eq!(result.total_share, decimal("5000"));
    assert_eq!(result.breakdown.len(), 1);
    assert_eq!(result.breakdown[0].percent_of_profit, Some(decimal("10")));
}

#[test]
fn test_scenario_002_fixed_plus_percent() {
    let rules = ProfitSharingRules {
        fixed_amount: Some(decimal("1000")),
        percent_rate: Some(decimal("5")),
        ..ProfitSharingRules::new(FormulaType::FixedPlusPercent)
    };

    let result = calculate(&input_with_profit("prj_002", "20000", rules)).unwrap();

    assert_eq!(result.total_share, decimal("2000"));
    assert_eq!(result.breakdown.len(), 2);
    assert_eq!(result.breakdown[0].amount, decimal("1000"));
    assert_eq!(result.breakdown[1].amount, decimal("1000"));
}

#[test]
fn test_scenario_003_tiered_marginal_brackets() {
    let rules = ProfitSharingRules {
        tiers: vec![
            TierConfig {
                min_profit: decimal("0"),
                max_profit: Some(decimal("50000")),
                percent_rate: decimal("5"),
            },
            TierConfig {
                min_profit: decimal("50000"),
                max_profit: None,
                percent_rate: decimal("10"),
            },
        ],
        ..ProfitSharingRules::new(FormulaType::Tiered)
    };

    let result = calculate(&input_with_profit("prj_003", "80000", rules)).unwrap();

    assert_eq!(result.breakdown.len(), 2);
    assert_eq!(result.breakdown[0].amount, decimal("2500"));
    assert_eq!(result.breakdown[1].amount, decimal("3000"));
    assert_eq!(result.total_share, decimal("5500"));
}

fn special_rules() -> ProfitSharingRules {
    ProfitSharingRules {
        percent_rate: Some(decimal("20")),
        minimum_profit: Some(decimal("10000")),
        maximum_share: Some(decimal("8000")),
        ..ProfitSharingRules::new(FormulaType::SpecialFormula)
    }
}

#[test]
fn test_scenario_004_special_formula_is_capped() {
    let result = calculate(&input_with_profit("prj_004", "50000", special_rules())).unwrap();

    assert_eq!(result.total_share, decimal("8000"));
}

#[test]
fn test_scenario_005_special_formula_below_minimum_pays_nothing() {
    let result = calculate(&input_with_profit("prj_005", "5000", special_rules())).unwrap();

    assert_eq!(result.total_share, Decimal::ZERO);
}

#[test]
fn test_scenario_006_dynamic_increments() {
    let rules = ProfitSharingRules {
        base_amount: Some(decimal("500")),
        increment_percent: Some(decimal("2")),
        increment_threshold: Some(decimal("100000")),
        ..ProfitSharingRules::new(FormulaType::Dynamic)
    };

    let result = calculate(&input_with_profit("prj_006", "250000", rules)).unwrap();

    assert_eq!(result.breakdown.len(), 2);
    assert_eq!(result.breakdown[1].amount, decimal("10000"));
    assert_eq!(result.total_share, decimal("10500"));
}

#[test]
fn test_scenario_007_grouped_shares() {
    let rules = ProfitSharingRules {
        groups: vec![
            GroupConfig {
                group_name: "A".to_string(),
                percent_rate: decimal("10"),
                members: vec![],
            },
            GroupConfig {
                group_name: "B".to_string(),
                percent_rate: decimal("15"),
                members: vec![],
            },
        ],
        ..ProfitSharingRules::new(FormulaType::Grouped)
    };

    let result = calculate(&input_with_profit("prj_007", "100000", rules)).unwrap();

    assert_eq!(result.breakdown[0].amount, decimal("10000"));
    assert_eq!(result.breakdown[1].amount, decimal("15000"));
    assert_eq!(result.total_share, decimal("25000"));
}

#[test]
fn test_scenario_008_unknown_formula_fails_single_and_batch() {
    let bogus = ProfitSharingRules {
        formula_type: "BOGUS".to_string(),
        ..ProfitSharingRules::default()
    };
    let bad_input = input_with_profit("prj_bad", "1000", bogus);

    match calculate(&bad_input) {
        Err(EngineError::UnknownFormulaType {
            project_id,
            formula_type,
        }) => {
            assert_eq!(project_id, "prj_bad");
            assert_eq!(formula_type, "BOGUS");
        }
        other => panic!("Expected UnknownFormulaType, got {:?}", other),
    }

    let good_input = input_with_profit(
        "prj_good",
        "1000",
        ProfitSharingRules {
            fixed_amount: Some(decimal("100")),
            ..ProfitSharingRules::new(FormulaType::FixedOnly)
        },
    );
    let batch = calculate_batch(&[good_input, bad_input]);
    assert!(matches!(batch, Err(EngineError::UnknownFormulaType { .. })));
}

#[test]
fn test_out_of_range_figures_fail_instead_of_panicking() {
    let dynamic = ProfitSharingRules {
        base_amount: Some(decimal("500")),
        increment_percent: Some(decimal("2")),
        increment_threshold: Some(decimal("1")),
        ..ProfitSharingRules::new(FormulaType::Dynamic)
    };
    let percent = ProfitSharingRules {
        percent_rate: Some(decimal("10000")),
        ..ProfitSharingRules::new(FormulaType::PercentSimple)
    };

    let dynamic_input = input_with_profit("prj_dyn", "10000000000000000", dynamic);
    let percent_input = input_with_profit("prj_pct", "1000000000000000000000000000", percent);

    for input in [&dynamic_input, &percent_input] {
        match calculate(input) {
            Err(EngineError::AmountOverflow { project_id }) => assert_eq!(project_id, input.project_id),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }
    assert!(matches!(
        calculate_batch(&[dynamic_input, percent_input]),
        Err(EngineError::AmountOverflow { .. })
    ));
}

#[test]
fn test_batch_results_follow_input_order() {
    let inputs: Vec<ProfitSharingInput> = (1..=50)
        .map(|i| {
            input_with_profit(
                &format!("prj_{:03}", i),
                &(i * 1000).to_string(),
                ProfitSharingRules {
                    percent_rate: Some(decimal("10")),
                    ..ProfitSharingRules::new(FormulaType::PercentSimple)
                },
            )
        })
        .collect();

    let results = calculate_batch(&inputs).unwrap();

    assert_eq!(results.len(), 50);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.project_id, inputs[i].project_id);
        assert_eq!(result.total_share, decimal(&((i + 1) * 100).to_string()));
    }
}

#[test]
fn test_loss_making_project_pays_nothing_under_every_formula() {
    let loader = ConfigLoader::load("./config/default").unwrap();

    for project in loader.config().projects() {
        let input = ProfitSharingInput::from_totals(
            &project.project_id,
            &project.project_name,
            decimal("10000"),
            decimal("25000"),
            project.rules.clone(),
        )
        .unwrap();
        let result = calculate(&input).unwrap();
        assert_eq!(
            result.total_share,
            Decimal::ZERO,
            "Project {} paid out on a loss",
            project.project_id
        );
    }
}

// =============================================================================
// HTTP API Scenarios
// =============================================================================

#[tokio::test]
async fn test_api_percent_simple_over_http() {
    let router = create_router_for_test();
    let body = create_request(
        "prj_001",
        50000,
        json!({"formula_type": "PERCENT_SIMPLE", "percent_rate": 10}),
    );

    let (status, json) = post_json(router, "/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    let result = &json["result"];
    assert_eq!(json_decimal(&result["total_share"]), decimal("5000"));
    assert_eq!(result["breakdown"][0]["description"], "10% de la utilidad neta");
    assert_eq!(breakdown_sum(result), json_decimal(&result["total_share"]));
}

#[tokio::test]
async fn test_api_tiered_over_http() {
    let router = create_router_for_test();
    let body = create_request(
        "prj_003",
        80000,
        json!({
            "formula_type": "TIERED",
            "tiers": [
                {"min_profit": 50000, "percent_rate": 10},
                {"min_profit": 0, "max_profit": 50000, "percent_rate": 5}
            ]
        }),
    );

    let (status, json) = post_json(router, "/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    let result = &json["result"];
    assert_eq!(json_decimal(&result["total_share"]), decimal("5500"));
    assert!(
        result["breakdown"][0]["description"]
            .as_str()
            .unwrap()
            .starts_with("Tramo 1")
    );
}

#[tokio::test]
async fn test_api_net_profit_override_is_trusted() {
    let router = create_router_for_test();
    let body = json!({
        "project_id": "prj_001",
        "total_income": 100000,
        "total_cost": 20000,
        "net_profit": 50000,
        "rules": {"formula_type": "PERCENT_SIMPLE", "percent_rate": 10}
    });

    let (status, json) = post_json(router, "/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_decimal(&json["result"]["net_profit"]), decimal("50000"));
    assert_eq!(json_decimal(&json["result"]["total_share"]), decimal("5000"));
}

#[tokio::test]
async fn test_api_unknown_formula_over_http() {
    let router = create_router_for_test();
    let body = create_request("prj_bad", 1000, json!({"formula_type": "BOGUS"}));

    let (status, json) = post_json(router, "/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "UNKNOWN_FORMULA_TYPE");
}

#[tokio::test]
async fn test_api_batch_over_http() {
    let router = create_router_for_test();
    let body = json!({
        "inputs": [
            create_request("prj_001", 50000, json!({"formula_type": "PERCENT_SIMPLE", "percent_rate": 10})),
            create_request("prj_002", 20000, json!({"formula_type": "FIXED_PLUS_PERCENT", "fixed_amount": 1000, "percent_rate": 5})),
            create_request("prj_003", -5000, json!({"formula_type": "FIXED_ONLY", "fixed_amount": 3000}))
        ]
    });

    let (status, json) = post_json(router, "/calculate/batch", body).await;

    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[1]["formula_type"], "FIXED_PLUS_PERCENT");
    assert_eq!(json["summary"]["profitable_projects"], 2);
    assert_eq!(json_decimal(&json["summary"]["total_share"]), decimal("7000"));
    assert_eq!(json_decimal(&json["summary"]["total_net_profit"]), decimal("65000"));
}

#[tokio::test]
async fn test_api_configured_special_project() {
    let router = create_router_for_test();
    let body = json!({"total_income": 90000, "total_cost": 40000});

    let (status, json) = post_json(router, "/projects/prj_special/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["formula_type"], "SPECIAL_FORMULA");
    assert_eq!(json_decimal(&json["result"]["total_share"]), decimal("8000"));
}

#[tokio::test]
async fn test_api_configured_dynamic_project() {
    let router = create_router_for_test();
    let body = json!({"total_income": 300000, "total_cost": 50000});

    let (status, json) = post_json(router, "/projects/prj_dynamic/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_decimal(&json["result"]["total_share"]), decimal("10500"));
}

#[tokio::test]
async fn test_api_configured_grouped_project_lists_members() {
    let router = create_router_for_test();
    let body = json!({"total_income": 100000, "total_cost": 0});

    let (status, json) = post_json(router, "/projects/prj_grouped/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    let result = &json["result"];
    assert_eq!(json_decimal(&result["total_share"]), decimal("25000"));
    assert!(
        result["breakdown"][1]["description"]
            .as_str()
            .unwrap()
            .contains("2 integrante(s)")
    );
}

#[tokio::test]
async fn test_api_unknown_project_returns_404() {
    let router = create_router_for_test();
    let body = json!({"total_income": 1, "total_cost": 0});

    let (status, json) = post_json(router, "/projects/prj_missing/calculate", body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "RULES_NOT_FOUND");
}
