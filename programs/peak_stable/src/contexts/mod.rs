pub mod init_core;
pub use init_core::*;

pub mod register_collateral;
pub use register_collateral::*;

pub mod whitelist_peak;
pub use whitelist_peak::*;

pub mod set_peak_status;
pub use set_peak_status::*;

pub mod update_fee_config;
pub use update_fee_config::*;

pub mod mint_stable;
pub use mint_stable::*;

pub mod redeem_stable;
pub use redeem_stable::*;

pub mod report_peak_holdings;
pub use report_peak_holdings::*;

pub mod sync_system;
pub use sync_system::*;

pub mod init_stake_pool;
pub use init_stake_pool::*;

pub mod stake;
pub use stake::*;

pub mod withdraw;
pub use withdraw::*;

pub mod get_reward;
pub use get_reward::*;

pub mod exit;
pub use exit::*;

pub mod pause_core;
pub use pause_core::*;

pub mod resume_core;
pub use resume_core::*;

pub mod pause_staking;
pub use pause_staking::*;

pub mod resume_staking;
pub use resume_staking::*;
