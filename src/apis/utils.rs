use alloy_eips::BlockId;
use alloy_primitives::{Address, TxKind};
use alloy_provider::Provider;
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;

pub(crate) async fn view_call<P, IC>(
    provider: &P,
    block_number: Option<u64>,
    contract: Address,
    call: IC,
) -> eyre::Result<IC::Return>
where
    P: Provider,
    IC: SolCall + Send,
{
    let tx = TransactionRequest {
        to: Some(TxKind::Call(contract)),
        input: TransactionInput::both(call.abi_encode().into()),
        ..Default::default()
    };

    let data = provider
        .call(tx)
        .block(block_number.map(Into::into).unwrap_or(BlockId::latest()))
        .await?;
    Ok(IC::abi_decode_returns(&data)?)
}

/// Largest tick `<= tick` that is a multiple of the pool's tick spacing.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> i32 {
    tick.div_euclid(tick_spacing) * tick_spacing
}

/// Range of `width` raw ticks either side of `tick`, both bounds snapped
/// down to usable ticks. A width smaller than the spacing can collapse the
/// range; the position manager rejects that on mint, not us.
pub fn tick_range_around(tick: i32, tick_spacing: i32, width: i32) -> (i32, i32) {
    (
        nearest_usable_tick(tick - width, tick_spacing),
        nearest_usable_tick(tick + width, tick_spacing),
    )
}
