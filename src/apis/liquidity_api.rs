use alloy_primitives::{Address, U256};

use super::data_api::UniV3DataApi;
use crate::types::{AddLiquidityRequest, LiquidityAdded};

/// State-changing liquidity operations. Implementations submit real
/// transactions and require a signing provider.
pub trait UniV3LiquidityApi: UniV3DataApi {
    /// Mints a new position on the requested pool through the position
    /// manager, with `recipient` as the NFT owner, and relays the four
    /// values of the manager's `IncreaseLiquidity` event.
    ///
    /// No local precondition checks: insufficient balance, a degenerate
    /// tick range or an expired deadline surface as the external revert
    /// of the mint transaction.
    async fn add_liquidity(
        &self,
        position_manager: Address,
        recipient: Address,
        request: AddLiquidityRequest,
    ) -> eyre::Result<LiquidityAdded>;

    /// Approves `spender` for `amount` of `token` unless the current
    /// allowance already covers it.
    async fn approve_if_needed(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> eyre::Result<()>;
}
