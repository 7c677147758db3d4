// pause_staking.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::StakingPaused;
use crate::states::{core_state::CoreState, stake_pool::StakePoolState};

#[derive(Accounts)]
pub struct PauseStaking<'info> {
    #[account(
        constraint = admin.key() == core_state.admin @ PeakError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [CORE_STATE_SEED],
        bump = core_state.bump,
    )]
    pub core_state: Box<Account<'info, CoreState>>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED],
        bump = stake_pool.bump,
    )]
    pub stake_pool: Box<Account<'info, StakePoolState>>,
}

pub fn pause_staking(ctx: Context<PauseStaking>) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    require!(!stake_pool.is_paused, PeakError::AlreadyPaused);

    stake_pool.is_paused = true;

    emit!(StakingPaused {
        admin: ctx.accounts.admin.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
