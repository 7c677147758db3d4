// resume_staking.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::StakingResumed;
use crate::states::{core_state::CoreState, stake_pool::StakePoolState};

#[derive(Accounts)]
pub struct ResumeStaking<'info> {
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

pub fn resume_staking(ctx: Context<ResumeStaking>) -> Result<()> {
    let stake_pool = &mut ctx.accounts.stake_pool;
    require!(stake_pool.is_paused, PeakError::NotPaused);

    stake_pool.is_paused = false;

    emit!(StakingResumed {
        admin: ctx.accounts.admin.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
