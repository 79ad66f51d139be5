use std::sync::Arc;

use alloy_eips::BlockId;
use alloy_primitives::{Address, TxKind, U256, keccak256};
use alloy_provider::Provider;
use alloy_sol_types::{SolCall, SolValue};
use revm::{
    Context, ExecuteEvm, MainBuilder,
    context::{BlockEnv, TxEnv},
    primitives::hardfork::SpecId,
};
use revm_database::{AlloyDB, CacheDB, EmptyDBTyped, WrapDatabaseAsync};
use tokio::runtime::Handle;

use crate::types::contracts::IERC20;

const PROBE_BALANCE: u64 = 123_456_789;

/// Finds the storage index of an ERC-20's balance mapping by writing a
/// marker value into candidate slots of a local cache overlay and
/// replaying `balanceOf` until the marker comes back. Nothing is written
/// to the forked chain.
pub(super) fn find_balance_slot_index<P: Provider + Clone>(
    provider: &P,
    token: Address,
    handle: Handle,
) -> eyre::Result<u64> {
    let probe_address = Address::random();

    let mut db = CacheDB::new(Arc::new(WrapDatabaseAsync::with_handle(
        AlloyDB::new(provider.root().clone(), BlockId::latest()),
        handle,
    )));

    // mappings near slot 0 in practice; 100 covers every mainstream token
    for index in 0..100u64 {
        let balance_slot = keccak256((probe_address, index).abi_encode());
        db.insert_account_storage(token, balance_slot.into(), U256::from(PROBE_BALANCE))?;

        let mut evm = Context::<BlockEnv>::new(EmptyDBTyped::default(), SpecId::default())
            .with_ref_db(&db)
            .modify_cfg_chained(|cfg| {
                cfg.disable_balance_check = true;
            })
            .modify_tx_chained(|tx: &mut TxEnv| {
                tx.caller = probe_address;
                tx.kind = TxKind::Call(token);
                tx.data = IERC20::balanceOfCall::new((probe_address,))
                    .abi_encode()
                    .into();
                tx.value = U256::from(0);
            })
            .build_mainnet();

        let outcome = evm.replay().map_err(|e| eyre::eyre!("{e:?}"))?;
        let Some(output) = outcome.result.output() else {
            continue;
        };
        // tokens with nonstandard balanceOf return data are skipped, not
        // treated as fatal
        let Ok(balance) = IERC20::balanceOfCall::abi_decode_returns(output) else {
            continue;
        };
        if balance == U256::from(PROBE_BALANCE) {
            return Ok(index);
        }
    }

    Err(eyre::eyre!("no balance mapping found in the first 100 storage indices of {token}"))
}
