//! Pool issuance and deposit settings

use serde::{Deserialize, Serialize};

/// Shares minted by the first deposit into an empty pool
pub const DEFAULT_INITIAL_SHARES: u64 = 100_000;

/// How `add` treats a deposit that is off the current reserve ratio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositPolicy {
    /// Mint against the smaller ratio; the excess stays in the reserves
    #[default]
    Proportional,
    /// Reject any deposit whose amounts are not in the reserve ratio
    ExactRatio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Fixed issuance for the first deposit, independent of its amounts
    pub initial_shares: u64,
    pub deposit_policy: DepositPolicy,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            initial_shares: DEFAULT_INITIAL_SHARES,
            deposit_policy: DepositPolicy::default(),
        }
    }
}
