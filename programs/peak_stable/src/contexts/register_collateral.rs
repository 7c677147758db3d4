// register_collateral.rs
use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use switchboard_solana::AggregatorAccountData;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::CollateralRegistered;
use crate::states::core_state::CoreState;

#[derive(Accounts)]
pub struct RegisterCollateral<'info> {
    #[account(
        constraint = admin.key() == core_state.admin @ PeakError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CORE_STATE_SEED],
        bump = core_state.bump,
    )]
    pub core_state: Box<Account<'info, CoreState>>,

    /// The collateral mint to register
    pub collateral_mint: Box<Account<'info, Mint>>,

    /// Switchboard aggregator pricing this collateral in USD
    pub oracle: AccountLoader<'info, AggregatorAccountData>,

    pub system_program: Program<'info, System>,
}

impl<'info> RegisterCollateral<'info> {
    pub fn get_oracle_price(&self) -> Result<u64> {
        let feed = self.oracle.load()?;
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
}

pub fn register_collateral(ctx: Context<RegisterCollateral>) -> Result<()> {
    msg!("Registering collateral: {}", ctx.accounts.collateral_mint.key());

    let now = Clock::get()?.unix_timestamp;
    let initial_price = ctx.accounts.get_oracle_price()?;
    msg!("Initial oracle price (scaled): {}", initial_price);

    let decimals = ctx.accounts.collateral_mint.decimals;
    let index = ctx.accounts.core_state.register_collateral(
        ctx.accounts.collateral_mint.key(),
        ctx.accounts.oracle.key(),
        decimals,
        initial_price,
        now,
    )?;

    emit!(CollateralRegistered {
        admin: ctx.accounts.admin.key(),
        mint: ctx.accounts.collateral_mint.key(),
        oracle: ctx.accounts.oracle.key(),
        index,
        decimals,
        timestamp: now,
    });

    Ok(())
}
