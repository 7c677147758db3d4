// stake.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::Staked;
use crate::states::{stake_pool::StakePoolState, user_stake::UserStakeState};

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED],
        bump = stake_pool.bump,
        constraint = !stake_pool.is_paused @ PeakError::StakingPaused,
    )]
    pub stake_pool: Box<Account<'info, StakePoolState>>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserStakeState::INIT_SPACE,
        seeds = [USER_STAKE_SEED, user.key().as_ref()],
        bump,
    )]
    pub user_stake: Box<Account<'info, UserStakeState>>,

    #[account(
        mut,
        constraint = user_stable_account.owner == user.key() @ PeakError::Unauthorized,
        constraint = user_stable_account.mint == vault.mint @ PeakError::Unauthorized,
    )]
    pub user_stable_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = stake_pool.vault
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let stake_pool = &mut ctx.accounts.stake_pool;
    let user_stake = &mut ctx.accounts.user_stake;

    if user_stake.user == Pubkey::default() {
        user_stake.user = ctx.accounts.user.key();
        user_stake.bump = ctx.bumps.user_stake;
    }

    // Settle before the balance changes so past windows keep their weight
    stake_pool.update_reward_window(now)?;
    stake_pool.settle_user(user_stake)?;
    stake_pool.record_stake(user_stake, amount)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.user_stable_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(Staked {
        user: ctx.accounts.user.key(),
        amount,
        total_staked: ctx.accounts.stake_pool.total_staked,
        timestamp: now,
    });

    Ok(())
}
