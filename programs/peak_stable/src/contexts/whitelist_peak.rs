// whitelist_peak.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::PeakWhitelisted;
use crate::states::core_state::CoreState;

#[derive(Accounts)]
pub struct WhitelistPeak<'info> {
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

    /// The peak's signing identity for future mint/redeem calls
    /// CHECK: Identity only, never read or written
    pub peak_authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn whitelist_peak(ctx: Context<WhitelistPeak>, ceiling: u64, collateral_mask: u32) -> Result<()> {
    msg!("Whitelisting peak: {}", ctx.accounts.peak_authority.key());

    ctx.accounts.core_state.whitelist_peak(
        ctx.accounts.peak_authority.key(),
        ceiling,
        collateral_mask,
    )?;

    emit!(PeakWhitelisted {
        admin: ctx.accounts.admin.key(),
        peak: ctx.accounts.peak_authority.key(),
        ceiling,
        collateral_mask,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
