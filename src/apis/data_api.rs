use alloy_primitives::{Address, U256};

use crate::types::{PoolInfo, PositionInfo};

/// Read-only views onto the deployed pool, token and position-manager
/// contracts.
pub trait UniV3DataApi {
    /// Pool immutables plus the current price slot, optionally pinned to a
    /// block.
    async fn pool_info(&self, pool: Address, block_number: Option<u64>)
    -> eyre::Result<PoolInfo>;

    /// `ownerOf` on the position manager. Reverts (propagated unchanged)
    /// for token ids that were never minted.
    async fn position_owner(
        &self,
        position_manager: Address,
        token_id: U256,
    ) -> eyre::Result<Address>;

    async fn position(
        &self,
        position_manager: Address,
        token_id: U256,
    ) -> eyre::Result<PositionInfo>;

    async fn token_balance(&self, token: Address, owner: Address) -> eyre::Result<U256>;

    async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> eyre::Result<U256>;
}
