// events.rs
use anchor_lang::prelude::*;

#[event]
pub struct CoreInitialized {
    pub admin: Pubkey,
    pub stable_mint: Pubkey,
    pub mint_fee_bps: u16,
    pub redeem_fee_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct CollateralRegistered {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub oracle: Pubkey,
    pub index: u32,
    pub decimals: u8,
    pub timestamp: i64,
}

#[event]
pub struct PeakWhitelisted {
    pub admin: Pubkey,
    pub peak: Pubkey,
    pub ceiling: u64,
    pub collateral_mask: u32,
    pub timestamp: i64,
}

#[event]
pub struct PeakStatusUpdated {
    pub admin: Pubkey,
    pub peak: Pubkey,
    pub ceiling: u64,
    pub status: u8,
    pub timestamp: i64,
}

#[event]
pub struct FeeConfigUpdated {
    pub admin: Pubkey,
    pub mint_fee_bps: u16,
    pub redeem_fee_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct StableMinted {
    pub peak: Pubkey,
    pub recipient: Pubkey,
    pub usd_value: u64,
    pub stable_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct StableRedeemed {
    pub peak: Pubkey,
    pub depositor: Pubkey,
    pub stable_amount: u64,
    pub usd_value: u64,
    pub collateral_amounts: Vec<u64>,
    pub timestamp: i64,
}

#[event]
pub struct PeakHoldingsReported {
    pub peak: Pubkey,
    pub holdings: Vec<u64>,
    pub timestamp: i64,
}

#[event]
pub struct SystemSynced {
    pub caller: Pubkey,
    pub total_assets: u64,
    pub total_supply: u64,
    pub period_income: u64,
    pub deficit: u64,
    pub timestamp: i64,
}

#[event]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub user: Pubkey,
    pub amount: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardPaid {
    pub user: Pubkey,
    pub reward: u64,
    pub timestamp: i64,
}

#[event]
pub struct Exited {
    pub user: Pubkey,
    pub payout: u64,
    pub forfeited: u64,
    pub reward: u64,
    pub timestamp: i64,
}

#[event]
pub struct CorePaused {
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct CoreResumed {
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct StakingPaused {
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct StakingResumed {
    pub admin: Pubkey,
    pub timestamp: i64,
}
