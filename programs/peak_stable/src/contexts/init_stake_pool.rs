// init_stake_pool.rs
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::constants::*;
use crate::errors::PeakError;
use crate::states::{core_state::CoreState, stake_pool::StakePoolState};

#[derive(Accounts)]
pub struct InitStakePool<'info> {
    #[account(
        mut,
        constraint = admin.key() == core_state.admin @ PeakError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [CORE_STATE_SEED],
        bump = core_state.bump,
    )]
    pub core_state: Box<Account<'info, CoreState>>,

    #[account(
        init,
        payer = admin,
        space = 8 + StakePoolState::INIT_SPACE,
        seeds = [STAKE_POOL_SEED],
        bump,
    )]
    pub stake_pool: Box<Account<'info, StakePoolState>>,

    #[account(address = core_state.stable_mint)]
    pub stable_mint: Box<Account<'info, Mint>>,

    /// Holds staked principal; owned by the pool PDA
    #[account(
        init,
        payer = admin,
        associated_token::mint = stable_mint,
        associated_token::authority = stake_pool,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn init_stake_pool(ctx: Context<InitStakePool>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let stake_pool = &mut ctx.accounts.stake_pool;
    stake_pool.core = ctx.accounts.core_state.key();
    stake_pool.vault = ctx.accounts.vault.key();
    stake_pool.is_paused = false;
    stake_pool.total_staked = 0;
    stake_pool.reward_per_token_stored = 0;
    stake_pool.time_weighted_reward_per_token = 0;
    stake_pool.last_update = now;
    stake_pool.last_income_update = now;
    stake_pool.deficit = 0;
    stake_pool.bump = ctx.bumps.stake_pool;
    stake_pool.reserved = [0; RESERVE_SPACE];

    msg!("Stake pool initialized, vault {}", ctx.accounts.vault.key());

    Ok(())
}
