pub mod data_api;
pub mod liquidity_api;
pub(crate) mod utils;

pub use data_api::UniV3DataApi;
pub use liquidity_api::UniV3LiquidityApi;
pub use utils::{nearest_usable_tick, tick_range_around};
