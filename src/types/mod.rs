mod common;
pub use common::*;

mod config;
pub use config::*;

mod errors;
pub use errors::*;

pub mod contracts;

/// The canonical NonfungiblePositionManager deployment on mainnet.
pub const POSITION_MANAGER_ADDRESS: alloy_primitives::Address =
    alloy_primitives::address!("0xC36442b4a4522E871399CD717aBDD847Ab11FE88");

pub const MAINNET_CHAIN_ID: u64 = 1;

/// Block the behavioral assertions are pinned to; the values the external
/// contracts produce are only reproducible against this state.
pub const DEFAULT_FORK_BLOCK: u64 = 20_715_424;
