// withdraw.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::Withdrawn;
use crate::states::{stake_pool::StakePoolState, user_stake::UserStakeState};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED],
        bump = stake_pool.bump,
    )]
    pub stake_pool: Box<Account<'info, StakePoolState>>,

    #[account(
        mut,
        seeds = [USER_STAKE_SEED, user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.user == user.key() @ PeakError::Unauthorized,
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

    pub token_program: Program<'info, Token>,
}

pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let stake_pool = &mut ctx.accounts.stake_pool;
    let user_stake = &mut ctx.accounts.user_stake;

    stake_pool.update_reward_window(now)?;
    stake_pool.settle_user(user_stake)?;

    // Rejects amounts beyond the liquid share while a deficit stands
    stake_pool.record_withdraw(user_stake, amount)?;

    let bump = stake_pool.bump;
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.user_stable_account.to_account_info(),
                authority: stake_pool.to_account_info(),
            },
            &[&[STAKE_POOL_SEED, &[bump]]],
        ),
        amount,
    )?;

    emit!(Withdrawn {
        user: ctx.accounts.user.key(),
        amount,
        total_staked: ctx.accounts.stake_pool.total_staked,
        timestamp: now,
    });

    Ok(())
}
