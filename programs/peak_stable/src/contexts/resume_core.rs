// resume_core.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::CoreResumed;
use crate::states::core_state::CoreState;

#[derive(Accounts)]
pub struct ResumeCore<'info> {
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

pub fn resume_core(ctx: Context<ResumeCore>) -> Result<()> {
    let core_state = &mut ctx.accounts.core_state;
    require!(core_state.is_paused, PeakError::NotPaused);

    core_state.is_paused = false;

    emit!(CoreResumed {
        admin: ctx.accounts.admin.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
