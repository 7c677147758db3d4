// sync_system.rs
use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use switchboard_solana::AggregatorAccountData;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::SystemSynced;
use crate::states::{core_state::CoreState, stake_pool::StakePoolState};

#[derive(Accounts)]
pub struct SyncSystem<'info> {
    /// Permissionless; anyone may settle the system
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [CORE_STATE_SEED],
        bump = core_state.bump,
        constraint = !core_state.is_paused @ PeakError::CorePaused,
    )]
    pub core_state: Box<Account<'info, CoreState>>,

    #[account(
        mut,
        seeds = [STAKE_POOL_SEED],
        bump = stake_pool.bump,
    )]
    pub stake_pool: Box<Account<'info, StakePoolState>>,

    #[account(address = core_state.stable_mint)]
    pub stable_mint: Box<Account<'info, Mint>>,
}

fn read_oracle_price(oracle_info: &AccountInfo) -> Result<u64> {
    let loader = AccountLoader::<AggregatorAccountData>::try_from(oracle_info)?;
    let feed = loader.load()?;
    let result = feed.latest_confirmed_round.result;
    let mantissa = result.mantissa.abs() as u128;

    let price = mantissa
        .checked_mul(PRICE_SCALE)
        .ok_or(PeakError::MathOverflow)?
        .checked_div(10u128.pow(result.scale))
        .ok_or(PeakError::MathOverflow)?;

    require!(price > 0, PeakError::InvalidOraclePrice);
    require!(price <= u64::MAX as u128, PeakError::MathOverflow);

    Ok(price as u64)
}

/// Refreshes every registered oracle, reprices peak holdings, settles the
/// income or deficit against supply, and streams the result into the
/// staking pool. Oracle accounts are passed as remaining accounts in
/// registry order.
pub fn sync_system(ctx: Context<SyncSystem>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let collateral_count = ctx.accounts.core_state.collaterals.len();
    require!(
        ctx.remaining_accounts.len() >= collateral_count,
        PeakError::MissingOracleAccount
    );

    // 1. Refresh the cached price for each collateral from its feed
    for i in 0..collateral_count {
        let oracle_info = &ctx.remaining_accounts[i];
        require!(
            oracle_info.key() == ctx.accounts.core_state.collaterals[i].oracle,
            PeakError::OracleMismatch
        );

        let price = read_oracle_price(oracle_info)?;
        ctx.accounts.core_state.refresh_price(i, price, now)?;
    }

    // 2. Re-value every peak's holdings at the fresh prices
    ctx.accounts.core_state.reprice_peaks()?;

    // 3. Settle overcollateralization against live supply
    let total_supply = ctx.accounts.stable_mint.supply;
    let outcome = ctx.accounts.core_state.settle_solvency(total_supply, now)?;
    msg!(
        "Sync: assets {} supply {} income {} deficit {}",
        ctx.accounts.core_state.total_assets,
        total_supply,
        outcome.period_income,
        outcome.deficit
    );

    // 4. Stream the outcome into the staking pool
    let stake_pool = &mut ctx.accounts.stake_pool;
    stake_pool.update_reward_window(now)?;
    stake_pool.notify_income(outcome.period_income, now)?;
    stake_pool.notify_deficit(outcome.deficit);

    emit!(SystemSynced {
        caller: ctx.accounts.caller.key(),
        total_assets: ctx.accounts.core_state.total_assets,
        total_supply,
        period_income: outcome.period_income,
        deficit: outcome.deficit,
        timestamp: now,
    });

    Ok(())
}
