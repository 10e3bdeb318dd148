//! Golden-path scenarios
//!
//! Each scenario drives a fresh market through the executor handle and
//! reports the observed numbers against the known-good ones.

use crate::framework::{Market, TestScenario, ValidationResult};
use anyhow::{bail, Result};
use pool::PoolError;
use pool_actors::ExecutorError;

/// Deposit, second deposit, full withdrawal of the first position
pub struct LiquidityLifecycle;

#[async_trait::async_trait]
impl TestScenario for LiquidityLifecycle {
    async fn execute(&self, market: &Market) -> Result<Vec<ValidationResult>> {
        let first = market.fund("first_lp", 1, 50_000)?;
        let second = market.fund("second_lp", 3, 150_000)?;
        let handle = &market.handle;
        let mut results = Vec::new();

        let minted = handle.add(&first, 1, 50_000).await?;
        let snapshot = handle.snapshot().await?;
        results.push(ValidationResult::expect_eq("initial_mint", minted, 100_000));
        results.push(ValidationResult::expect_eq(
            "initial_reserves",
            (snapshot.reserve0, snapshot.reserve1, snapshot.total_supply),
            (1, 50_000, 100_000),
        ));

        let minted = handle.add(&second, 3, 150_000).await?;
        let snapshot = handle.snapshot().await?;
        results.push(ValidationResult::expect_eq("proportional_mint", minted, 300_000));
        results.push(ValidationResult::expect_eq(
            "pooled_reserves",
            (snapshot.reserve0, snapshot.reserve1, snapshot.total_supply),
            (4, 200_000, 400_000),
        ));

        let withdrawn = handle.remove(&first, 100_000).await?;
        let snapshot = handle.snapshot().await?;
        results.push(ValidationResult::expect_eq("withdrawal", withdrawn, (1, 50_000)));
        results.push(ValidationResult::expect_eq(
            "remaining_reserves",
            (snapshot.reserve0, snapshot.reserve1, snapshot.total_supply),
            (3, 150_000, 300_000),
        ));
        results.push(ValidationResult::expect_eq(
            "remaining_positions",
            (handle.balance_of(&first).await?, handle.balance_of(&second).await?),
            (0, 300_000),
        ));
        Ok(results)
    }

    fn name(&self) -> &str {
        "liquidity_lifecycle"
    }

    fn description(&self) -> &str {
        "Two providers deposit in ratio; the first withdraws its whole position"
    }
}

/// Read-only quotes in both directions project post-trade reserves
pub struct QuoteProjection;

#[async_trait::async_trait]
impl TestScenario for QuoteProjection {
    async fn execute(&self, market: &Market) -> Result<Vec<ValidationResult>> {
        let lp = market.fund("lp", 25, 1_250_000)?;
        let handle = &market.handle;
        let mut results = Vec::new();

        handle.add(&lp, 5, 250_000).await?;
        let quote = handle.get_amount_out(1, &market.token0_id()).await?;
        results.push(ValidationResult::expect_eq(
            "sell_token0_quote",
            (quote.amount_out, quote.reserve0, quote.reserve1),
            (41_667, 6, 208_333),
        ));

        handle.remove(&lp, 100_000).await?;
        handle.add(&lp, 20, 1_000_000).await?;
        let quote = handle.get_amount_out(120_000, &market.token1_id()).await?;
        results.push(ValidationResult::expect_eq(
            "sell_token1_quote",
            (quote.amount_out, quote.reserve0, quote.reserve1),
            (3, 17, 1_120_000),
        ));

        // quoting never moves the pool
        let snapshot = handle.snapshot().await?;
        results.push(ValidationResult::expect_eq(
            "reserves_untouched",
            (snapshot.reserve0, snapshot.reserve1),
            (20, 1_000_000),
        ));
        Ok(results)
    }

    fn name(&self) -> &str {
        "quote_projection"
    }

    fn description(&self) -> &str {
        "Quotes round output up and report the reserves a trade would leave"
    }
}

/// A minimum taken from a stale quote rejects the second identical swap
pub struct SlippageGuard;

#[async_trait::async_trait]
impl TestScenario for SlippageGuard {
    async fn execute(&self, market: &Market) -> Result<Vec<ValidationResult>> {
        let lp = market.fund("lp", 20, 1_000_000)?;
        let trader = market.fund("trader", 2, 0)?;
        let handle = &market.handle;
        let mut results = Vec::new();

        handle.add(&lp, 20, 1_000_000).await?;
        let quoted = handle.get_amount_out(1, &market.token0_id()).await?.amount_out;
        results.push(ValidationResult::expect_eq("quoted", quoted, 47_620));

        let request = market.sell(market.token0_id(), 1, quoted, &trader);
        let filled = handle.swap(&trader, request.clone()).await?;
        results.push(ValidationResult::expect_eq("filled", filled, 47_620));

        let snapshot = handle.snapshot().await?;
        results.push(ValidationResult::expect_eq(
            "reserves_after_fill",
            (snapshot.reserve0, snapshot.reserve1),
            (21, 952_380),
        ));

        match handle.swap(&trader, request).await {
            Err(ExecutorError::Pool(err)) => results.push(ValidationResult::expect_eq(
                "stale_minimum",
                err,
                PoolError::SlippageExceeded {
                    expected_min: 47_620,
                    actual: 43_290,
                },
            )),
            Err(err) => return Err(err.into()),
            Ok(out) => bail!("swap below minimum filled for {out}"),
        }

        let snapshot = handle.snapshot().await?;
        results.push(ValidationResult::expect_eq(
            "reserves_after_rejection",
            (snapshot.reserve0, snapshot.reserve1),
            (21, 952_380),
        ));
        Ok(results)
    }

    fn name(&self) -> &str {
        "slippage_guard"
    }

    fn description(&self) -> &str {
        "A swap filling below its minimum fails and leaves the pool unchanged"
    }
}

/// Two deposits, then a swap delivering to a separate recipient
pub struct FundedPoolSwap;

#[async_trait::async_trait]
impl TestScenario for FundedPoolSwap {
    async fn execute(&self, market: &Market) -> Result<Vec<ValidationResult>> {
        let lp = market.fund("lp", 25, 1_250_000)?;
        let trader = market.fund("trader", 1, 0)?;
        let recipient = market.fund("recipient", 0, 0)?;
        let handle = &market.handle;
        let mut results = Vec::new();

        handle.add(&lp, 5, 250_000).await?;
        handle.add(&lp, 20, 1_000_000).await?;

        let request = market.sell(market.token0_id(), 1, 0, &recipient);
        let delivered = handle.swap(&trader, request).await?;
        results.push(ValidationResult::expect_eq("delivered", delivered, 48_077));
        results.push(ValidationResult::expect_eq(
            "recipient_balance",
            market.token1_balance(&recipient),
            48_077,
        ));
        results.push(ValidationResult::expect_eq(
            "trader_debited",
            market.token0_balance(&trader),
            0,
        ));
        Ok(results)
    }

    fn name(&self) -> &str {
        "funded_pool_swap"
    }

    fn description(&self) -> &str {
        "Swap against a pool funded by two deposits pays a third-party recipient"
    }
}
