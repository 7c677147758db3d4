// report_peak_holdings.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::PeakHoldingsReported;
use crate::states::core_state::CoreState;

#[derive(Accounts)]
pub struct ReportPeakHoldings<'info> {
    /// The reporting peak; must be whitelisted
    pub peak_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CORE_STATE_SEED],
        bump = core_state.bump,
        constraint = !core_state.is_paused @ PeakError::CorePaused,
    )]
    pub core_state: Box<Account<'info, CoreState>>,
}

pub fn report_peak_holdings(
    ctx: Context<ReportPeakHoldings>,
    holdings: Vec<u64>,
) -> Result<()> {
    let peak_key = ctx.accounts.peak_authority.key();

    let core_state = &mut ctx.accounts.core_state;
    let peak_index = core_state.find_peak_index(&peak_key)?;

    require!(
        holdings.len() == core_state.collaterals.len(),
        PeakError::LengthMismatch
    );

    // A peak may only report balances for collaterals it is masked for
    for (i, amount) in holdings.iter().enumerate() {
        if *amount > 0 {
            require!(
                core_state.peaks[peak_index].allows_collateral(i),
                PeakError::CollateralNotAllowed
            );
        }
    }

    for (i, amount) in holdings.iter().enumerate() {
        core_state.peaks[peak_index].holdings[i] = *amount;
    }

    emit!(PeakHoldingsReported {
        peak: peak_key,
        holdings,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
