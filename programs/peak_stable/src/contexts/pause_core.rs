// pause_core.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::CorePaused;
use crate::states::core_state::CoreState;

#[derive(Accounts)]
pub struct PauseCore<'info> {
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

pub fn pause_core(ctx: Context<PauseCore>) -> Result<()> {
    let core_state = &mut ctx.accounts.core_state;
    require!(!core_state.is_paused, PeakError::AlreadyPaused);

    core_state.is_paused = true;

    emit!(CorePaused {
        admin: ctx.accounts.admin.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
