// mint_stable.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::PeakError;
use crate::events::StableMinted;
use crate::states::core_state::CoreState;

#[derive(Accounts)]
pub struct MintStable<'info> {
    /// The calling peak; must be whitelisted and active
    pub peak_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CORE_STATE_SEED],
        bump = core_state.bump,
        constraint = !core_state.is_paused @ PeakError::CorePaused,
    )]
    pub core_state: Box<Account<'info, CoreState>>,

    /// The stablecoin mint
    #[account(
        mut,
        address = core_state.stable_mint
    )]
    pub stable_mint: Box<Account<'info, Mint>>,

    /// Where the freshly minted stablecoin lands
    #[account(
        mut,
        constraint = recipient_account.mint == core_state.stable_mint @ PeakError::Unauthorized
    )]
    pub recipient_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

impl<'info> MintStable<'info> {
    pub fn validate(&self, peak_index: usize, amounts: &[u64], now: i64) -> Result<()> {
        require!(
            self.core_state.peaks[peak_index].can_mint(),
            PeakError::MintNotAllowed
        );

        self.core_state.validate_basket(peak_index, amounts, now)?;

        Ok(())
    }
}

pub fn mint_stable(ctx: Context<MintStable>, amounts: Vec<u64>, min_out: u64) -> Result<()> {
    msg!("Starting mint for peak {}", ctx.accounts.peak_authority.key());

    let now = Clock::get()?.unix_timestamp;
    let peak_index = ctx
        .accounts
        .core_state
        .find_peak_index(&ctx.accounts.peak_authority.key())?;

    // 1. Validate peak status, mask and price freshness
    ctx.accounts.validate(peak_index, &amounts, now)?;

    // 2. Value the deposited basket at cached prices
    let usd_value = ctx.accounts.core_state.basket_value(&amounts)?;
    require!(usd_value > 0, PeakError::ZeroAmount);
    msg!("Basket value (scaled USD): {}", usd_value);

    // 3. Apply the underwater ratio against supply as seen before this mint
    let perceived_supply = ctx.accounts.stable_mint.supply;
    let gross = ctx
        .accounts
        .core_state
        .stable_for_usd(usd_value, perceived_supply)?;

    // 4. Mint fee stays in the system and surfaces as income at the next sync
    let minted = ctx
        .accounts
        .core_state
        .apply_fee(gross, ctx.accounts.core_state.mint_fee_bps)?;
    msg!("Minting {} stablecoin units", minted);

    require!(minted >= min_out, PeakError::ExcessiveSlippage);

    // 5. Ceiling check and ledger update, atomic with the token mint below
    ctx.accounts
        .core_state
        .record_mint(peak_index, &amounts, usd_value, minted)?;

    // 6. Issue the stablecoin
    let bump = ctx.accounts.core_state.bump;
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.stable_mint.to_account_info(),
                to: ctx.accounts.recipient_account.to_account_info(),
                authority: ctx.accounts.core_state.to_account_info(),
            },
            &[&[CORE_STATE_SEED, &[bump]]],
        ),
        minted,
    )?;

    emit!(StableMinted {
        peak: ctx.accounts.peak_authority.key(),
        recipient: ctx.accounts.recipient_account.key(),
        usd_value,
        stable_amount: minted,
        timestamp: now,
    });

    Ok(())
}
