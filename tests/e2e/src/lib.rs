//! End-to-End Test Framework for the liquidity pool
//!
//! Loads a configuration, opens a pool behind its executor, and runs
//! golden-path scenarios through the async handle, reconciling the pool
//! against custody balances after each one.

pub mod framework;
pub mod scenarios;

pub use framework::{Market, TestFramework, TestResult, TestScenario, ValidationResult};
pub use scenarios::*;
