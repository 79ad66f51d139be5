use alloy_network::{Ethereum, EthereumWallet, TxSigner};
use alloy_primitives::Signature;
use alloy_provider::{
    Identity, Provider, RootProvider,
    fillers::{
        BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
    },
};
use alloy_rpc_client::ClientBuilder;
use alloy_rpc_types::TransactionRequest;
use alloy_signer::{Signer, SignerSync};

use crate::types::UniV3SdkError;

pub type AlloyRpcProvider<P> = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    P,
>;

pub type RpcWalletProvider<P> = FillProvider<JoinFill<Identity, WalletFiller<EthereumWallet>>, P>;

#[derive(Debug, Clone)]
#[repr(transparent)]
pub struct EthRpcProvider<P>
where
    P: Provider + Clone,
{
    eth_provider: P,
}

impl EthRpcProvider<RootProvider> {
    pub fn new_http(http_url: impl ToString) -> eyre::Result<Self> {
        let client = ClientBuilder::default().http(http_url.to_string().parse()?);
        Ok(Self { eth_provider: RootProvider::new(client) })
    }

    #[cfg(feature = "ws")]
    pub async fn new_ws(ws_url: impl ToString) -> eyre::Result<Self> {
        let client = ClientBuilder::default()
            .ws(alloy_provider::WsConnect::new(ws_url.to_string()))
            .await?;
        Ok(Self { eth_provider: RootProvider::new(client) })
    }

    #[cfg(feature = "ipc")]
    pub async fn new_ipc(ipc_path: impl ToString) -> eyre::Result<Self> {
        let client = ClientBuilder::default()
            .ipc(alloy_provider::IpcConnect::new(ipc_path.to_string()))
            .await?;
        Ok(Self { eth_provider: RootProvider::new(client) })
    }
}

impl<P: Provider + Clone> EthRpcProvider<P> {
    pub fn new_with_provider(eth_provider: P) -> Self {
        Self { eth_provider }
    }

    pub fn provider(&self) -> &P {
        &self.eth_provider
    }

    /// Equips the provider with a local wallet so state-changing calls can
    /// be signed. The inner provider keeps its filler stack.
    pub fn with_wallet<S>(self, signer: S) -> EthRpcProvider<RpcWalletProvider<P>>
    where
        S: Signer + SignerSync + TxSigner<Signature> + Send + Sync + 'static,
    {
        let eth_provider = alloy_provider::builder::<Ethereum>()
            .wallet(EthereumWallet::new(signer))
            .on_provider(self.eth_provider);

        EthRpcProvider { eth_provider }
    }

    /// Submits a transaction and waits for its receipt, mapping a mined
    /// revert onto [`UniV3SdkError::TransactionReverted`]. With a filler
    /// stack that estimates gas, most reverts never reach the mempool and
    /// surface earlier as the RPC error from `send_transaction`; the
    /// typed variant covers transactions that revert only once mined.
    pub async fn send_transaction_checked(
        &self,
        tx: TransactionRequest,
    ) -> eyre::Result<alloy_rpc_types::TransactionReceipt> {
        let pending = self.eth_provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();

        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            return Err(UniV3SdkError::TransactionReverted(tx_hash).into());
        }

        Ok(receipt)
    }
}
