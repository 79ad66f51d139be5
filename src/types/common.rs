use alloy_primitives::{Address, U160, U256};
use alloy_rpc_types::{Log, TransactionReceipt};
use serde::{Deserialize, Serialize};

use super::contracts::INonfungiblePositionManager;

/// Caller-supplied inputs for a mint. Nothing is validated locally; the
/// pool and the position manager enforce their own preconditions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AddLiquidityRequest {
    pub pool: Address,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    /// Raw ticks either side of the pool's current tick.
    pub width: i32,
}

/// The four values the position manager reports for a mint, relayed
/// unchanged from its `IncreaseLiquidity` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityAdded {
    pub token_id: U256,
    pub liquidity: u128,
    pub amount0: U256,
    pub amount1: U256,
}

impl LiquidityAdded {
    pub fn from_receipt(receipt: &TransactionReceipt, position_manager: Address) -> Option<Self> {
        Self::from_logs(receipt.inner.logs(), position_manager)
    }

    pub fn from_logs<'a>(
        logs: impl IntoIterator<Item = &'a Log>,
        position_manager: Address,
    ) -> Option<Self> {
        logs.into_iter()
            .filter(|log| log.address() == position_manager)
            .find_map(|log| {
                log.log_decode::<INonfungiblePositionManager::IncreaseLiquidity>()
                    .ok()
            })
            .map(|log| {
                let event = log.inner.data;
                Self {
                    token_id: event.tokenId,
                    liquidity: event.liquidity,
                    amount0: event.amount0,
                    amount1: event.amount1,
                }
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoolInfo {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
    pub sqrt_price_x96: U160,
    pub tick: i32,
}

/// Subset of the position manager's `positions` getter relevant to a
/// freshly minted position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PositionInfo {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: u128,
    pub tokens_owed0: u128,
    pub tokens_owed1: u128,
}

impl From<INonfungiblePositionManager::positionsReturn> for PositionInfo {
    fn from(value: INonfungiblePositionManager::positionsReturn) -> Self {
        Self {
            token0: value.token0,
            token1: value.token1,
            fee: value.fee.to::<u32>(),
            tick_lower: value.tickLower.try_into().unwrap_or(0),
            tick_upper: value.tickUpper.try_into().unwrap_or(0),
            liquidity: value.liquidity,
            tokens_owed0: value.tokensOwed0,
            tokens_owed1: value.tokensOwed1,
        }
    }
}
