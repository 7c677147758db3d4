use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod states;

use contexts::*;
use states::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod peak_stable {
    use super::*;

    // Core Administration
    pub fn init_core(
        ctx: Context<InitCore>,
        mint_fee_bps: u16,
        redeem_fee_bps: u16,
    ) -> Result<()> {
        contexts::init_core(ctx, mint_fee_bps, redeem_fee_bps)
    }

    pub fn register_collateral(ctx: Context<RegisterCollateral>) -> Result<()> {
        contexts::register_collateral(ctx)
    }

    pub fn whitelist_peak(
        ctx: Context<WhitelistPeak>,
        ceiling: u64,
        collateral_mask: u32,
    ) -> Result<()> {
        contexts::whitelist_peak(ctx, ceiling, collateral_mask)
    }

    pub fn set_peak_status(
        ctx: Context<SetPeakStatus>,
        new_ceiling: u64,
        new_status: PeakStatus,
    ) -> Result<()> {
        contexts::set_peak_status(ctx, new_ceiling, new_status)
    }

    pub fn update_fee_config(
        ctx: Context<UpdateFeeConfig>,
        mint_fee_bps: u16,
        redeem_fee_bps: u16,
    ) -> Result<()> {
        contexts::update_fee_config(ctx, mint_fee_bps, redeem_fee_bps)
    }

    // Peak Operations
    pub fn mint_stable(
        ctx: Context<MintStable>,
        amounts: Vec<u64>,
        min_out: u64,
    ) -> Result<()> {
        contexts::mint_stable(ctx, amounts, min_out)
    }

    pub fn redeem_stable(
        ctx: Context<RedeemStable>,
        stable_amount: u64,
        min_out: Vec<u64>,
    ) -> Result<()> {
        contexts::redeem_stable(ctx, stable_amount, min_out)
    }

    pub fn report_peak_holdings(
        ctx: Context<ReportPeakHoldings>,
        holdings: Vec<u64>,
    ) -> Result<()> {
        contexts::report_peak_holdings(ctx, holdings)
    }

    // Settlement
    pub fn sync_system(ctx: Context<SyncSystem>) -> Result<()> {
        contexts::sync_system(ctx)
    }

    // Staking
    pub fn init_stake_pool(ctx: Context<InitStakePool>) -> Result<()> {
        contexts::init_stake_pool(ctx)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        contexts::stake(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        contexts::withdraw(ctx, amount)
    }

    pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
        contexts::get_reward(ctx)
    }

    pub fn exit(ctx: Context<Exit>) -> Result<()> {
        contexts::exit(ctx)
    }

    // Emergency Controls
    pub fn pause_core(ctx: Context<PauseCore>) -> Result<()> {
        contexts::pause_core(ctx)
    }

    pub fn resume_core(ctx: Context<ResumeCore>) -> Result<()> {
        contexts::resume_core(ctx)
    }

    pub fn pause_staking(ctx: Context<PauseStaking>) -> Result<()> {
        contexts::pause_staking(ctx)
    }

    pub fn resume_staking(ctx: Context<ResumeStaking>) -> Result<()> {
        contexts::resume_staking(ctx)
    }
}
