//! Golden path E2E tests
//!
//! Configuration file -> tracing -> pool behind its executor -> scenarios.

use pool::DepositPolicy;
use pool_config::{init_tracing, PoolFileConfig};
use pool_e2e_tests::{
    FundedPoolSwap, LiquidityLifecycle, QuoteProjection, SlippageGuard, TestFramework, TestResult,
};
use std::fs;
use tempfile::tempdir;

fn framework_from_file(contents: &str) -> TestFramework {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pool.toml");
    fs::write(&path, contents).unwrap();

    let config = PoolFileConfig::load(Some(&path), None).unwrap();
    init_tracing(&config.logging).unwrap();
    TestFramework::new(config).unwrap()
}

fn assert_passed(result: &TestResult) {
    assert!(
        result.success,
        "{} failed: {}",
        result.scenario_name,
        serde_json::to_string_pretty(result).unwrap()
    );
}

const CONFIG: &str = r#"
[pool]
initial_shares = 100000
deposit_policy = "proportional"

[logging]
level = "pool=debug,info"

[executor]
mailbox_capacity = 4
"#;

#[tokio::test]
async fn test_golden_path_scenarios() {
    let framework = framework_from_file(CONFIG);
    assert_eq!(framework.config().executor.mailbox_capacity, 4);

    assert_passed(&framework.run_scenario(LiquidityLifecycle).await.unwrap());
    assert_passed(&framework.run_scenario(QuoteProjection).await.unwrap());
    assert_passed(&framework.run_scenario(SlippageGuard).await.unwrap());
    assert_passed(&framework.run_scenario(FundedPoolSwap).await.unwrap());
}

#[tokio::test]
async fn test_exact_ratio_policy_from_config() {
    let framework = framework_from_file(
        "[pool]\ndeposit_policy = \"exact_ratio\"\n\n[logging]\nformat = \"json\"\n",
    );
    assert_eq!(
        framework.config().pool.deposit_policy,
        DepositPolicy::ExactRatio
    );

    // in-ratio deposits only, so the golden numbers still hold
    assert_passed(&framework.run_scenario(LiquidityLifecycle).await.unwrap());
    assert_passed(&framework.run_scenario(FundedPoolSwap).await.unwrap());
}

#[tokio::test]
async fn test_result_reports_every_check() {
    let framework = framework_from_file("");
    let result = framework.run_scenario(SlippageGuard).await.unwrap();

    assert_passed(&result);
    let validators: Vec<&str> = result
        .validation_results
        .iter()
        .map(|r| r.validator.as_str())
        .collect();
    assert!(validators.contains(&"stale_minimum"));
    assert_eq!(validators.last(), Some(&"pool_invariants"));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["scenario_name"], "slippage_guard");
}
