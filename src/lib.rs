#![allow(async_fn_in_trait)]

pub mod apis;
pub mod providers;
#[cfg(test)]
pub mod test_utils;
pub mod types;

use alloy_network::TxSigner;
use alloy_primitives::{Address, Signature, U256};
use alloy_provider::Provider;
use alloy_signer::{Signer, SignerSync};

use crate::{
    apis::{UniV3DataApi, UniV3LiquidityApi},
    providers::{EthRpcProvider, RpcWalletProvider},
    types::{AddLiquidityRequest, LiquidityAdded, PoolInfo, PositionInfo, UniV3SdkError},
};

/// Client for adding liquidity to a Uniswap V3 pool through the deployed
/// position manager.
///
/// The client performs no pool math of its own. Tick accounting, liquidity
/// amounts and NFT minting all happen inside the external contracts; this
/// type orchestrates the calls and relays their results.
#[derive(Debug, Clone)]
pub struct UniV3Api<P>
where
    P: Provider + Clone,
{
    eth_provider: EthRpcProvider<P>,
    position_manager: Address,
    sender: Option<Address>,
}

impl<P> UniV3Api<P>
where
    P: Provider + Clone,
{
    /// Binds the client to a position manager. The address is immutable
    /// for the client's lifetime and readable via
    /// [`Self::position_manager`].
    pub fn new(eth_provider: EthRpcProvider<P>, position_manager: Address) -> Self {
        Self { eth_provider, position_manager, sender: None }
    }

    pub fn position_manager(&self) -> Address {
        self.position_manager
    }

    /// The account transactions originate from, once a signer is set.
    pub fn sender(&self) -> Option<Address> {
        self.sender
    }

    pub fn eth_provider(&self) -> &EthRpcProvider<P> {
        &self.eth_provider
    }

    pub fn with_signer<S>(self, signer: S) -> UniV3Api<RpcWalletProvider<P>>
    where
        S: Signer + SignerSync + TxSigner<Signature> + Send + Sync + 'static,
    {
        let sender = TxSigner::address(&signer);
        UniV3Api {
            eth_provider: self.eth_provider.with_wallet(signer),
            position_manager: self.position_manager,
            sender: Some(sender),
        }
    }

    /// For providers that already sign (wallet filler stacks): records
    /// which account transactions originate from.
    pub fn with_sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub async fn pool_info(&self, pool: Address) -> eyre::Result<PoolInfo> {
        self.eth_provider.pool_info(pool, None).await
    }

    pub async fn position_owner(&self, token_id: U256) -> eyre::Result<Address> {
        self.eth_provider
            .position_owner(self.position_manager, token_id)
            .await
    }

    pub async fn position(&self, token_id: U256) -> eyre::Result<PositionInfo> {
        self.eth_provider
            .position(self.position_manager, token_id)
            .await
    }

    /// Entry point mirroring the on-chain wrapper: two desired amounts
    /// plus a tick width, everything else delegated to the external
    /// contracts. The minted NFT belongs to the sender, never to this
    /// client.
    pub async fn add_liquidity(
        &self,
        pool: Address,
        amount0_desired: U256,
        amount1_desired: U256,
        width: i32,
    ) -> eyre::Result<LiquidityAdded> {
        let sender = self.sender.ok_or(UniV3SdkError::NoSigner)?;
        let request = AddLiquidityRequest { pool, amount0_desired, amount1_desired, width };

        self.eth_provider
            .add_liquidity(self.position_manager, sender, request)
            .await
    }
}
