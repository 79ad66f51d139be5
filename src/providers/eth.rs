use alloy_eips::BlockId;
use alloy_primitives::{
    Address, TxKind, U256,
    aliases::{I24, U24},
};
use alloy_provider::Provider;
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use tracing::{debug, info};

use super::EthRpcProvider;
use crate::{
    apis::{
        UniV3DataApi, UniV3LiquidityApi,
        utils::{tick_range_around, view_call},
    },
    types::{
        AddLiquidityRequest, LiquidityAdded, PoolInfo, PositionInfo, UniV3SdkError,
        contracts::{IERC20, INonfungiblePositionManager, IUniswapV3Pool},
    },
};

/// Headroom added to the latest block timestamp for the mint deadline.
const MINT_DEADLINE_SECS: u64 = 1800;

impl<P> UniV3DataApi for EthRpcProvider<P>
where
    P: Provider + Clone,
{
    async fn pool_info(
        &self,
        pool: Address,
        block_number: Option<u64>,
    ) -> eyre::Result<PoolInfo> {
        let (token0, token1, fee, tick_spacing, slot0) = futures::try_join!(
            view_call(self.provider(), block_number, pool, IUniswapV3Pool::token0Call {}),
            view_call(self.provider(), block_number, pool, IUniswapV3Pool::token1Call {}),
            view_call(self.provider(), block_number, pool, IUniswapV3Pool::feeCall {}),
            view_call(self.provider(), block_number, pool, IUniswapV3Pool::tickSpacingCall {}),
            view_call(self.provider(), block_number, pool, IUniswapV3Pool::slot0Call {})
        )?;

        Ok(PoolInfo {
            address: pool,
            token0,
            token1,
            fee: fee.to::<u32>(),
            tick_spacing: tick_spacing.try_into().unwrap_or(0),
            sqrt_price_x96: slot0.sqrtPriceX96,
            tick: slot0.tick.try_into().unwrap_or(0),
        })
    }

    async fn position_owner(
        &self,
        position_manager: Address,
        token_id: U256,
    ) -> eyre::Result<Address> {
        view_call(
            self.provider(),
            None,
            position_manager,
            INonfungiblePositionManager::ownerOfCall { tokenId: token_id },
        )
        .await
    }

    async fn position(
        &self,
        position_manager: Address,
        token_id: U256,
    ) -> eyre::Result<PositionInfo> {
        let position = view_call(
            self.provider(),
            None,
            position_manager,
            INonfungiblePositionManager::positionsCall { tokenId: token_id },
        )
        .await?;

        Ok(position.into())
    }

    async fn token_balance(&self, token: Address, owner: Address) -> eyre::Result<U256> {
        view_call(self.provider(), None, token, IERC20::balanceOfCall { account: owner }).await
    }

    async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> eyre::Result<U256> {
        view_call(self.provider(), None, token, IERC20::allowanceCall { owner, spender }).await
    }
}

impl<P> UniV3LiquidityApi for EthRpcProvider<P>
where
    P: Provider + Clone,
{
    async fn add_liquidity(
        &self,
        position_manager: Address,
        recipient: Address,
        request: AddLiquidityRequest,
    ) -> eyre::Result<LiquidityAdded> {
        let pool = self.pool_info(request.pool, None).await?;
        let (tick_lower, tick_upper) =
            tick_range_around(pool.tick, pool.tick_spacing, request.width);
        debug!(
            pool = %pool.address,
            current_tick = pool.tick,
            tick_lower,
            tick_upper,
            "computed mint range"
        );

        self.approve_if_needed(pool.token0, recipient, position_manager, request.amount0_desired)
            .await?;
        self.approve_if_needed(pool.token1, recipient, position_manager, request.amount1_desired)
            .await?;

        let latest = self
            .provider()
            .get_block(BlockId::latest())
            .await?
            .ok_or_else(|| eyre::eyre!("no latest block from provider"))?;
        let deadline = U256::from(latest.header.timestamp + MINT_DEADLINE_SECS);

        let params = INonfungiblePositionManager::MintParams {
            token0: pool.token0,
            token1: pool.token1,
            fee: U24::from(pool.fee),
            tickLower: I24::try_from(tick_lower)?,
            tickUpper: I24::try_from(tick_upper)?,
            amount0Desired: request.amount0_desired,
            amount1Desired: request.amount1_desired,
            amount0Min: U256::ZERO,
            amount1Min: U256::ZERO,
            recipient,
            deadline,
        };
        let tx = TransactionRequest {
            from: Some(recipient),
            to: Some(TxKind::Call(position_manager)),
            input: TransactionInput::both(
                INonfungiblePositionManager::mintCall { params }.abi_encode().into(),
            ),
            ..Default::default()
        };

        let receipt = self.send_transaction_checked(tx).await?;
        let added = LiquidityAdded::from_receipt(&receipt, position_manager).ok_or(
            UniV3SdkError::MissingIncreaseLiquidity {
                position_manager,
                tx_hash: receipt.transaction_hash,
            },
        )?;

        info!(
            token_id = %added.token_id,
            liquidity = added.liquidity,
            amount0 = %added.amount0,
            amount1 = %added.amount1,
            "minted position"
        );
        Ok(added)
    }

    async fn approve_if_needed(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> eyre::Result<()> {
        let allowance = self.token_allowance(token, owner, spender).await?;
        if allowance >= amount {
            return Ok(());
        }

        debug!(%token, %spender, %amount, "raising allowance");
        let tx = TransactionRequest {
            from: Some(owner),
            to: Some(TxKind::Call(token)),
            input: TransactionInput::both(IERC20::approveCall { spender, amount }.abi_encode().into()),
            ..Default::default()
        };
        self.send_transaction_checked(tx).await?;

        Ok(())
    }
}
