use alloy_node_bindings::Anvil;

use super::{DEFAULT_FORK_BLOCK, MAINNET_CHAIN_ID, UniV3SdkError};

pub const ETHEREUM_RPC_URL: &str = "ETHEREUM_RPC_URL";
pub const FORK_BLOCK_NUMBER: &str = "FORK_BLOCK_NUMBER";

/// Declarative description of the forked chain state tests run against.
/// Holds no connections; it only wires the environment into an anvil
/// builder.
#[derive(Debug, Clone)]
pub struct ForkConfig {
    eth_rpc_url: String,
    fork_block_number: u64,
    chain_id: u64,
}

impl ForkConfig {
    pub fn new(eth_rpc_url: impl ToString) -> Self {
        Self {
            eth_rpc_url: eth_rpc_url.to_string(),
            fork_block_number: DEFAULT_FORK_BLOCK,
            chain_id: MAINNET_CHAIN_ID,
        }
    }

    /// Reads `ETHEREUM_RPC_URL` (required) and `FORK_BLOCK_NUMBER`
    /// (optional, defaults to the pinned block) from the process
    /// environment, loading `.env` first.
    pub fn from_env() -> Result<Self, UniV3SdkError> {
        dotenv::dotenv().ok();
        Self::from_process_env()
    }

    /// Same as [`Self::from_env`] but without touching `.env`, so the
    /// process environment alone decides the outcome.
    pub fn from_process_env() -> Result<Self, UniV3SdkError> {
        let eth_rpc_url = std::env::var(ETHEREUM_RPC_URL)
            .map_err(|_| UniV3SdkError::MissingEnvVar(ETHEREUM_RPC_URL))?;
        let mut config = Self::new(eth_rpc_url);

        if let Ok(raw) = std::env::var(FORK_BLOCK_NUMBER) {
            config.fork_block_number = raw
                .parse()
                .map_err(|_| UniV3SdkError::InvalidEnvVar { var: FORK_BLOCK_NUMBER, value: raw })?;
        }

        Ok(config)
    }

    pub fn with_fork_block_number(mut self, block_number: u64) -> Self {
        self.fork_block_number = block_number;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn eth_rpc_url(&self) -> &str {
        &self.eth_rpc_url
    }

    pub fn fork_block_number(&self) -> u64 {
        self.fork_block_number
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Maps the config onto an anvil instance builder forking the
    /// configured endpoint at the configured block.
    pub fn anvil(&self) -> Anvil {
        Anvil::new()
            .chain_id(self.chain_id)
            .fork(&self.eth_rpc_url)
            .fork_block_number(self.fork_block_number)
    }
}
