// redeem_stable.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::StableRedeemed;
use crate::states::core_state::CoreState;

#[derive(Accounts)]
pub struct RedeemStable<'info> {
    /// The calling peak; must be whitelisted and not extinct
    pub peak_authority: Signer<'info>,

    /// The holder surrendering stablecoin
    pub depositor: Signer<'info>,

    #[account(
        mut,
        seeds = [CORE_STATE_SEED],
        bump = core_state.bump,
        constraint = !core_state.is_paused @ PeakError::CorePaused,
    )]
    pub core_state: Box<Account<'info, CoreState>>,

    #[account(
        mut,
        address = core_state.stable_mint
    )]
    pub stable_mint: Box<Account<'info, Mint>>,

    /// The depositor's stablecoin account, burned from directly
    #[account(
        mut,
        constraint = depositor_account.owner == depositor.key() @ PeakError::Unauthorized,
        constraint = depositor_account.mint == core_state.stable_mint @ PeakError::Unauthorized,
    )]
    pub depositor_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn redeem_stable(
    ctx: Context<RedeemStable>,
    stable_amount: u64,
    min_out: Vec<u64>,
) -> Result<()> {
    msg!("Starting redeem for peak {}", ctx.accounts.peak_authority.key());

    require!(stable_amount > 0, PeakError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;
    let peak_index = ctx
        .accounts
        .core_state
        .find_peak_index(&ctx.accounts.peak_authority.key())?;

    require!(
        ctx.accounts.core_state.peaks[peak_index].can_redeem(),
        PeakError::RedeemNotAllowed
    );
    require!(
        min_out.len() == ctx.accounts.core_state.collaterals.len(),
        PeakError::LengthMismatch
    );

    // Redemption pays out of the peak's holdings at cached prices, so
    // every collateral the peak holds must have a fresh price.
    ctx.accounts.core_state.validate_peak_prices(peak_index, now)?;

    // 1. Convert the surrendered stablecoin to USD under the underwater
    //    ratio, as seen before the burn below changes supply.
    let perceived_supply = ctx.accounts.stable_mint.supply;
    let usd_gross = ctx
        .accounts
        .core_state
        .usd_for_stable(stable_amount, perceived_supply)?;

    // 2. Redeem fee stays in the system and surfaces as income at the next sync
    let usd_net = ctx
        .accounts
        .core_state
        .apply_fee(usd_gross, ctx.accounts.core_state.redeem_fee_bps)?;
    msg!("Redeeming {} scaled USD from peak holdings", usd_net);

    // 3. Pro-rata share of the peak's holdings for that USD value
    let outputs = ctx
        .accounts
        .core_state
        .peak_redeem_outputs(peak_index, usd_net)?;

    for (i, amount) in outputs.iter().enumerate() {
        require!(*amount >= min_out[i], PeakError::ExcessiveSlippage);
    }

    // 4. Burn the full surrendered amount from the depositor
    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.stable_mint.to_account_info(),
                from: ctx.accounts.depositor_account.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        stable_amount,
    )?;

    // 5. Ledger update; the peak releases the collateral on its side
    ctx.accounts
        .core_state
        .record_redeem(peak_index, stable_amount, usd_net, &outputs)?;

    emit!(StableRedeemed {
        peak: ctx.accounts.peak_authority.key(),
        depositor: ctx.accounts.depositor.key(),
        usd_value: usd_net,
        stable_amount,
        collateral_amounts: outputs,
        timestamp: now,
    });

    Ok(())
}
