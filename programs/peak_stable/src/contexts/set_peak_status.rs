// set_peak_status.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::PeakStatusUpdated;
use crate::states::{core_state::CoreState, peak::PeakStatus};

#[derive(Accounts)]
pub struct SetPeakStatus<'info> {
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

    /// CHECK: Identity only, looked up in the peak table
    pub peak_authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn set_peak_status(
    ctx: Context<SetPeakStatus>,
    new_ceiling: u64,
    new_status: PeakStatus,
) -> Result<()> {
    let peak_key = ctx.accounts.peak_authority.key();
    msg!("Updating peak {} to status {:?}", peak_key, new_status);

    let core_state = &mut ctx.accounts.core_state;
    let index = core_state.find_peak_index(&peak_key)?;

    let peak = &mut core_state.peaks[index];
    peak.transition_status(new_status)?;
    peak.ceiling = new_ceiling;

    emit!(PeakStatusUpdated {
        admin: ctx.accounts.admin.key(),
        peak: peak_key,
        ceiling: new_ceiling,
        status: new_status.as_u8(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
