mod balance_slots;

use alloy_node_bindings::AnvilInstance;
use alloy_primitives::{Address, TxKind, U256, address, keccak256};
use alloy_provider::{Provider, RootProvider, ext::AnvilApi};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{SolCall, SolValue};
use tokio::runtime::Handle;

use crate::{
    UniV3Api,
    providers::{AlloyRpcProvider, EthRpcProvider, RpcWalletProvider},
    types::{ForkConfig, POSITION_MANAGER_ADDRESS, contracts::IWETH},
};

pub const DAI: Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");
pub const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
/// The 0.3% fee DAI/WETH pool.
pub const DAI_WETH_POOL: Address = address!("0xC2e9F25Be6257c210d7Adf0D4Cd6E3E881ba25F8");

pub type ForkApi = UniV3Api<RpcWalletProvider<AlloyRpcProvider<RootProvider>>>;

/// A mainnet fork pinned to the configured block, with a ready-to-sign
/// client on anvil's first funded key.
pub struct AnvilFork {
    pub api: ForkApi,
    pub sender: Address,
    /// Block the fork was pinned to; everything above it happened locally.
    pub fork_block: u64,
    endpoint: String,
    handle: Handle,
    anvil: AnvilInstance,
}

impl AnvilFork {
    pub async fn spawn() -> eyre::Result<Self> {
        let config = ForkConfig::from_env()?;
        let fork_block = config.fork_block_number();
        let anvil = config.anvil().try_spawn()?;
        let endpoint = anvil.endpoint();
        let handle = Handle::current();

        let api = Self::api_at(&endpoint, &anvil, 0).await?;
        let sender = api.sender().unwrap();

        Ok(Self { api, sender, fork_block, endpoint, handle, anvil })
    }

    /// Independent client signing with another of anvil's funded keys.
    pub async fn api_for_key(&self, index: usize) -> eyre::Result<ForkApi> {
        Self::api_at(&self.endpoint, &self.anvil, index).await
    }

    async fn api_at(endpoint: &str, anvil: &AnvilInstance, index: usize) -> eyre::Result<ForkApi> {
        let signer: PrivateKeySigner = anvil.keys()[index].clone().into();
        let eth_provider = RootProvider::builder()
            .with_recommended_fillers()
            .connect(endpoint)
            .await?;

        Ok(UniV3Api::new(
            EthRpcProvider::new_with_provider(eth_provider),
            POSITION_MANAGER_ADDRESS,
        )
        .with_signer(signer))
    }

    /// Writes `amount` straight into the token's balance mapping for
    /// `user`, locating the mapping's storage index by probing.
    pub async fn fund_token(&self, user: Address, token: Address, amount: U256) -> eyre::Result<()> {
        let provider = self.api.eth_provider().provider();
        let slot_index =
            balance_slots::find_balance_slot_index(provider, token, self.handle.clone())?;
        let user_balance_slot = keccak256((user, slot_index).abi_encode());

        provider
            .anvil_set_storage_at(token, user_balance_slot.into(), amount.into())
            .await?;

        Ok(())
    }

    /// Funds WETH the regular way, depositing ether from `api`'s sender.
    pub async fn fund_weth(&self, api: &ForkApi, amount: U256) -> eyre::Result<()> {
        let tx = TransactionRequest {
            to: Some(TxKind::Call(WETH)),
            value: Some(amount),
            input: TransactionInput::both(IWETH::depositCall {}.abi_encode().into()),
            ..Default::default()
        };
        api.eth_provider().send_transaction_checked(tx).await?;

        Ok(())
    }
}
