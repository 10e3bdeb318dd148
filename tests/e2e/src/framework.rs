//! Core E2E testing framework

use anyhow::{Context, Result};
use pool::{AccountId, FungibleToken, InMemoryToken, Pool, SwapRequest, TokenId};
use pool_actors::PoolHandle;
use pool_config::PoolFileConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Main test framework coordinator
pub struct TestFramework {
    config: PoolFileConfig,
}

/// Test scenario trait
#[async_trait::async_trait]
pub trait TestScenario {
    async fn execute(&self, market: &Market) -> Result<Vec<ValidationResult>>;

    fn name(&self) -> &str;
    fn description(&self) -> &str;

    fn timeout(&self) -> Duration {
        Duration::from_secs(10)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub scenario_name: String,
    pub success: bool,
    pub duration: Duration,
    pub error_message: Option<String>,
    pub validation_results: Vec<ValidationResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub validator: String,
    pub passed: bool,
    pub message: String,
}

impl ValidationResult {
    /// Compare an observed value against the expected one
    pub fn expect_eq<T: PartialEq + std::fmt::Debug>(
        validator: &str,
        actual: T,
        expected: T,
    ) -> Self {
        let passed = actual == expected;
        let message = if passed {
            format!("{actual:?}")
        } else {
            format!("expected {expected:?}, got {actual:?}")
        };
        Self {
            validator: validator.to_string(),
            passed,
            message,
        }
    }
}

/// A fresh pool, its two tokens, and the executor in front of it
pub struct Market {
    pub token0: Arc<InMemoryToken>,
    pub token1: Arc<InMemoryToken>,
    pub pool: Arc<Pool>,
    pub handle: PoolHandle,
    task: JoinHandle<()>,
}

impl Market {
    pub fn open(config: &PoolFileConfig) -> Result<Self> {
        let token0 = Arc::new(InMemoryToken::new("BTC"));
        let token1 = Arc::new(InMemoryToken::new("USDC"));
        let pool = Arc::new(
            Pool::new(
                AccountId::from("pool"),
                token0.clone(),
                token1.clone(),
                config.pool.clone(),
            )
            .context("Failed to create pool")?,
        );
        let (handle, task) = PoolHandle::spawn(pool.clone(), config.executor.mailbox_capacity);

        Ok(Self {
            token0,
            token1,
            pool,
            handle,
            task,
        })
    }

    pub fn token0_id(&self) -> TokenId {
        self.token0.id().clone()
    }

    pub fn token1_id(&self) -> TokenId {
        self.token1.id().clone()
    }

    pub fn token0_balance(&self, holder: &AccountId) -> u128 {
        self.token0.balance_of(holder)
    }

    pub fn token1_balance(&self, holder: &AccountId) -> u128 {
        self.token1.balance_of(holder)
    }

    /// Mint both tokens to `name` and approve the pool for them
    pub fn fund(&self, name: &str, amount0: u128, amount1: u128) -> Result<AccountId> {
        let account = AccountId::from(name);
        for (token, amount) in [(&self.token0, amount0), (&self.token1, amount1)] {
            token
                .mint(&account, amount)
                .with_context(|| format!("Failed to mint {} to {name}", token.id()))?;
            token
                .approve(&account, self.pool.address(), amount)
                .with_context(|| format!("Failed to approve {}", token.id()))?;
        }
        Ok(account)
    }

    pub fn sell(&self, token_in: TokenId, amount_in: u128, amount_out_min: u128, to: &AccountId) -> SwapRequest {
        let token_out = if token_in == self.token0_id() {
            self.token1_id()
        } else {
            self.token0_id()
        };
        SwapRequest {
            amount_in,
            amount_out_min,
            token_in,
            token_out,
            to: to.clone(),
        }
    }

    /// Stop the executor and reconcile the pool against custody balances
    async fn close(self) -> Result<ValidationResult> {
        self.handle.shutdown().await.context("Executor already closed")?;
        self.task.await.context("Executor task panicked")?;

        let invariants = self.pool.check_invariants();
        Ok(ValidationResult {
            validator: "pool_invariants".to_string(),
            passed: invariants.is_ok(),
            message: match invariants {
                Ok(()) => "ledgers match custody balances".to_string(),
                Err(e) => e.to_string(),
            },
        })
    }
}

impl TestFramework {
    pub fn new(config: PoolFileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run a complete test scenario against its own market
    pub async fn run_scenario<S: TestScenario>(&self, scenario: S) -> Result<TestResult> {
        info!("Starting test scenario: {}", scenario.name());
        info!("Description: {}", scenario.description());

        let start_time = Instant::now();
        let market = Market::open(&self.config)?;

        let execution_result = tokio::time::timeout(scenario.timeout(), scenario.execute(&market)).await;

        let (mut validation_results, error_message) = match execution_result {
            Ok(Ok(results)) => (results, None),
            Ok(Err(e)) => {
                error!("Test execution failed: {:#}", e);
                (vec![], Some(format!("Execution failed: {e:#}")))
            }
            Err(_) => {
                error!("Test execution timed out");
                (vec![], Some("Test execution timed out".to_string()))
            }
        };
        validation_results.push(market.close().await?);

        for failed in validation_results.iter().filter(|r| !r.passed) {
            warn!(validator = %failed.validator, "{}", failed.message);
        }

        let success = error_message.is_none() && validation_results.iter().all(|r| r.passed);
        info!(
            "Test scenario completed: {} (success: {})",
            scenario.name(),
            success
        );

        Ok(TestResult {
            scenario_name: scenario.name().to_string(),
            success,
            duration: start_time.elapsed(),
            error_message,
            validation_results,
        })
    }

    /// Get test configuration
    pub fn config(&self) -> &PoolFileConfig {
        &self.config
    }
}
