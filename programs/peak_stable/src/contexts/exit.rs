// exit.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::Exited;
use crate::states::{core_state::CoreState, stake_pool::StakePoolState, user_stake::UserStakeState};

#[derive(Accounts)]
pub struct Exit<'info> {
    pub user: Signer<'info>,

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

    #[account(
        mut,
        seeds = [USER_STAKE_SEED, user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.user == user.key() @ PeakError::Unauthorized,
    )]
    pub user_stake: Box<Account<'info, UserStakeState>>,

    #[account(
        mut,
        address = core_state.stable_mint
    )]
    pub stable_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = user_stable_account.owner == user.key() @ PeakError::Unauthorized,
        constraint = user_stable_account.mint == core_state.stable_mint @ PeakError::Unauthorized,
    )]
    pub user_stable_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = stake_pool.vault
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn exit(ctx: Context<Exit>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let stake_pool = &mut ctx.accounts.stake_pool;
    let user_stake = &mut ctx.accounts.user_stake;

    stake_pool.update_reward_window(now)?;
    stake_pool.settle_user(user_stake)?;

    let outcome = stake_pool.record_exit(user_stake)?;
    let reward = stake_pool.take_rewards(user_stake);
    msg!(
        "Exit: payout {} forfeited {} reward {}",
        outcome.payout,
        outcome.forfeited,
        reward
    );

    let pool_bump = stake_pool.bump;
    let pool_seeds: &[&[&[u8]]] = &[&[STAKE_POOL_SEED, &[pool_bump]]];

    if outcome.payout > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.user_stable_account.to_account_info(),
                    authority: stake_pool.to_account_info(),
                },
                pool_seeds,
            ),
            outcome.payout,
        )?;
    }

    // Forfeited principal was never asset-backed; burning it from the vault
    // shrinks supply by exactly the shortfall the exiting staker absorbed.
    if outcome.forfeited > 0 {
        token::burn(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::Burn {
                    mint: ctx.accounts.stable_mint.to_account_info(),
                    from: ctx.accounts.vault.to_account_info(),
                    authority: stake_pool.to_account_info(),
                },
                pool_seeds,
            ),
            outcome.forfeited,
        )?;
    }

    if reward > 0 {
        let core_bump = ctx.accounts.core_state.bump;
        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::MintTo {
                    mint: ctx.accounts.stable_mint.to_account_info(),
                    to: ctx.accounts.user_stable_account.to_account_info(),
                    authority: ctx.accounts.core_state.to_account_info(),
                },
                &[&[CORE_STATE_SEED, &[core_bump]]],
            ),
            reward,
        )?;
    }

    emit!(Exited {
        user: ctx.accounts.user.key(),
        payout: outcome.payout,
        forfeited: outcome.forfeited,
        reward,
        timestamp: now,
    });

    Ok(())
}
