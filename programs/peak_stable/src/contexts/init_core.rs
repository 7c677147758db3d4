// init_core.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::CoreInitialized;
use crate::states::core_state::CoreState;

/// InitCore sets up the settlement ledger and the stablecoin mint.
/// This is the first instruction that must be called; the admin gains
/// control over collateral registration, peak whitelisting and fees.
#[derive(Accounts)]
pub struct InitCore<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The core state PDA holding the collateral registry, the peak table
    /// and all solvency bookkeeping.
    /// Seeds: ["core_state"]
    #[account(
        init,
        payer = admin,
        space = 8 + CoreState::INIT_SPACE,
        seeds = [CORE_STATE_SEED],
        bump,
    )]
    pub core_state: Box<Account<'info, CoreState>>,

    /// The stablecoin mint, authority held by the core PDA so only the
    /// ledger can mint or sign transfers of freshly issued supply
    #[account(
        init,
        payer = admin,
        mint::decimals = STABLE_DECIMALS,
        mint::authority = core_state,
    )]
    pub stable_mint: Box<Account<'info, Mint>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

impl<'info> InitCore<'info> {
    pub fn validate(&self, mint_fee_bps: u16, redeem_fee_bps: u16) -> Result<()> {
        require!(mint_fee_bps <= BPS_SCALE, PeakError::FeeTooLarge);
        require!(redeem_fee_bps <= BPS_SCALE, PeakError::FeeTooLarge);
        Ok(())
    }
}

pub fn init_core(ctx: Context<InitCore>, mint_fee_bps: u16, redeem_fee_bps: u16) -> Result<()> {
    ctx.accounts.validate(mint_fee_bps, redeem_fee_bps)?;

    let now = Clock::get()?.unix_timestamp;
    let core_state = &mut ctx.accounts.core_state;

    core_state.admin = ctx.accounts.admin.key();
    core_state.stable_mint = ctx.accounts.stable_mint.key();
    core_state.is_paused = false;
    core_state.mint_fee_bps = mint_fee_bps;
    core_state.redeem_fee_bps = redeem_fee_bps;
    core_state.total_assets = 0;
    core_state.last_overcollateralization = 0;
    core_state.last_sync = now;
    core_state.collaterals = Vec::with_capacity(MAX_COLLATERAL_TYPES);
    core_state.peaks = Vec::with_capacity(MAX_PEAKS);
    core_state.bump = ctx.bumps.core_state;
    core_state.reserved = [0; RESERVE_SPACE];

    emit!(CoreInitialized {
        admin: ctx.accounts.admin.key(),
        stable_mint: ctx.accounts.stable_mint.key(),
        mint_fee_bps,
        redeem_fee_bps,
        timestamp: now,
    });

    Ok(())
}
