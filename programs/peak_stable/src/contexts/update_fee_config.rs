// update_fee_config.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::FeeConfigUpdated;
use crate::states::core_state::CoreState;

#[derive(Accounts)]
pub struct UpdateFeeConfig<'info> {
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
}

pub fn update_fee_config(
    ctx: Context<UpdateFeeConfig>,
    mint_fee_bps: u16,
    redeem_fee_bps: u16,
) -> Result<()> {
    require!(mint_fee_bps <= BPS_SCALE, PeakError::FeeTooLarge);
    require!(redeem_fee_bps <= BPS_SCALE, PeakError::FeeTooLarge);

    let core_state = &mut ctx.accounts.core_state;
    core_state.mint_fee_bps = mint_fee_bps;
    core_state.redeem_fee_bps = redeem_fee_bps;

    emit!(FeeConfigUpdated {
        admin: ctx.accounts.admin.key(),
        mint_fee_bps,
        redeem_fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
