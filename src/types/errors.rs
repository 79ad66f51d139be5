use alloy_primitives::{Address, TxHash};

#[derive(Debug, thiserror::Error)]
pub enum UniV3SdkError {
    #[error("environment variable {0} is not set")]
    MissingEnvVar(&'static str),
    #[error("environment variable {var} has unparseable value `{value}`")]
    InvalidEnvVar { var: &'static str, value: String },
    #[error("transaction {0} reverted")]
    TransactionReverted(TxHash),
    #[error("no IncreaseLiquidity event from {position_manager} in tx {tx_hash}")]
    MissingIncreaseLiquidity { position_manager: Address, tx_hash: TxHash },
    #[error("no signer configured, call `with_signer` first")]
    NoSigner,
}
