//! Typed identifiers and asset orientation
//!
//! Account and token identifiers are string-backed newtypes so a holder can
//! never be passed where a token is expected. `Asset` and `Direction` name
//! the two sides of the pool without leaking raw indices into call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generate a string-backed typed identifier
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_string_id! {
    /// Holder identity: a liquidity provider, trader, recipient, or the pool itself
    AccountId
}

define_string_id! {
    /// Identifier of a fungible token contract
    TokenId
}

/// One of the two pooled assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Token0,
    Token1,
}

impl Asset {
    pub const fn index(self) -> usize {
        match self {
            Self::Token0 => 0,
            Self::Token1 => 1,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Token0 => Self::Token1,
            Self::Token1 => Self::Token0,
        }
    }
}

/// The direction of a swap through the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// token0 in, token1 out
    ZeroForOne,
    /// token1 in, token0 out
    OneForZero,
}

impl Direction {
    /// Direction whose input side is `asset`
    pub const fn from_input(asset: Asset) -> Self {
        match asset {
            Asset::Token0 => Self::ZeroForOne,
            Asset::Token1 => Self::OneForZero,
        }
    }

    pub const fn input(self) -> Asset {
        match self {
            Self::ZeroForOne => Asset::Token0,
            Self::OneForZero => Asset::Token1,
        }
    }

    pub const fn output(self) -> Asset {
        self.input().other()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "0>1"),
            Self::OneForZero => write!(f, "1>0"),
        }
    }
}
