// get_reward.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::RewardPaid;
use crate::states::{core_state::CoreState, stake_pool::StakePoolState, user_stake::UserStakeState};

#[derive(Accounts)]
pub struct GetReward<'info> {
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

    /// Rewards are minted fresh; the income they represent is already
    /// carried by the system as overcollateralization.
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

    pub token_program: Program<'info, Token>,
}

pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let stake_pool = &mut ctx.accounts.stake_pool;
    let user_stake = &mut ctx.accounts.user_stake;

    stake_pool.update_reward_window(now)?;
    stake_pool.settle_user(user_stake)?;

    let reward = stake_pool.take_rewards(user_stake);
    if reward > 0 {
        let bump = ctx.accounts.core_state.bump;
        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::MintTo {
                    mint: ctx.accounts.stable_mint.to_account_info(),
                    to: ctx.accounts.user_stable_account.to_account_info(),
                    authority: ctx.accounts.core_state.to_account_info(),
                },
                &[&[CORE_STATE_SEED, &[bump]]],
            ),
            reward,
        )?;

        emit!(RewardPaid {
            user: ctx.accounts.user.key(),
            reward,
            timestamp: now,
        });
    }

    Ok(())
}
