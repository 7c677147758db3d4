// states/stake_pool.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;
use crate::states::user_stake::UserStakeState;

/// What a full exit pays and what it forfeits to cover the deficit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitOutcome {
    pub payout: u64,
    pub forfeited: u64,
}

#[account]
#[derive(InitSpace)]
pub struct StakePoolState {
    pub core: Pubkey,                           // CoreState this pool settles against
    pub vault: Pubkey,                          // Token account holding staked principal
    pub is_paused: bool,                        // Blocks new stakes only

    pub total_staked: u64,

    // Income distribution accumulators, REWARD_SCALE fixed point
    pub reward_per_token_stored: u128,
    pub time_weighted_reward_per_token: u128,   // Token-seconds since the last income
    pub last_update: i64,
    pub last_income_update: i64,

    pub deficit: u64,                           // Shortfall charged pro rata to stakers

    pub bump: u8,
    pub reserved: [u8; 32],
}

impl StakePoolState {
    /// Accrues the time-weighted window. Must run before any balance change,
    /// income notification, or user settlement. Skipped while nothing is
    /// staked so an empty interval earns no weight.
    pub fn update_reward_window(&mut self, now: i64) -> Result<()> {
        if self.total_staked > 0 {
            let elapsed = now.saturating_sub(self.last_update).max(0) as u128;
            let delta = elapsed
                .checked_mul(REWARD_SCALE)
                .ok_or(PeakError::MathOverflow)?
                .checked_div(self.total_staked as u128)
                .ok_or(PeakError::MathOverflow)?;
            self.time_weighted_reward_per_token = self
                .time_weighted_reward_per_token
                .checked_add(delta)
                .ok_or(PeakError::MathOverflow)?;
        }

        self.last_update = now;
        Ok(())
    }

    /// Spreads a period's income over the token-seconds accumulated since the
    /// previous income, then starts a fresh window.
    pub fn notify_income(&mut self, amount: u64, now: i64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let window = now.saturating_sub(self.last_income_update);
        if window <= 0 {
            return Ok(());
        }

        let delta = self
            .time_weighted_reward_per_token
            .checked_mul(amount as u128)
            .ok_or(PeakError::MathOverflow)?
            .checked_div(window as u128)
            .ok_or(PeakError::MathOverflow)?;

        self.reward_per_token_stored = self
            .reward_per_token_stored
            .checked_add(delta)
            .ok_or(PeakError::MathOverflow)?;

        self.time_weighted_reward_per_token = 0;
        self.last_income_update = now;
        Ok(())
    }

    /// Records the absolute current shortfall. Setting rather than adding
    /// keeps repeated syncs idempotent and handles recovery symmetrically.
    pub fn notify_deficit(&mut self, shortfall: u64) {
        self.deficit = shortfall;
    }

    pub fn earned(&self, user: &UserStakeState) -> Result<u64> {
        let delta = self
            .reward_per_token_stored
            .checked_sub(user.user_reward_per_token_paid)
            .ok_or(PeakError::MathOverflow)?;

        let accrued = (user.staked_balance as u128)
            .checked_mul(delta)
            .ok_or(PeakError::MathOverflow)?
            .checked_div(REWARD_SCALE)
            .ok_or(PeakError::MathOverflow)?;

        let total = accrued
            .checked_add(user.rewards as u128)
            .ok_or(PeakError::MathOverflow)?;
        require!(total <= u64::MAX as u128, PeakError::MathOverflow);

        Ok(total as u64)
    }

    pub fn settle_user(&self, user: &mut UserStakeState) -> Result<()> {
        user.rewards = self.earned(user)?;
        user.user_reward_per_token_paid = self.reward_per_token_stored;
        Ok(())
    }

    /// The deficit charged to a balance, pro rata over all stakers.
    /// Charges round up; may exceed the balance when the pool is underwater
    /// beyond its principal.
    pub fn user_deficit_share(&self, staked_balance: u64) -> Result<u64> {
        if self.deficit == 0 || staked_balance == 0 || self.total_staked == 0 {
            return Ok(0);
        }

        let numerator = (self.deficit as u128)
            .checked_mul(staked_balance as u128)
            .ok_or(PeakError::MathOverflow)?;

        let share = numerator
            .checked_add(self.total_staked as u128 - 1)
            .ok_or(PeakError::MathOverflow)?
            .checked_div(self.total_staked as u128)
            .ok_or(PeakError::MathOverflow)?;

        require!(share <= u64::MAX as u128, PeakError::MathOverflow);

        Ok(share as u64)
    }

    pub fn withdraw_able(&self, staked_balance: u64) -> Result<u64> {
        let share = self.user_deficit_share(staked_balance)?;
        Ok(staked_balance.saturating_sub(share))
    }

    pub fn record_stake(&mut self, user: &mut UserStakeState, amount: u64) -> Result<()> {
        require!(amount > 0, PeakError::ZeroAmount);

        user.staked_balance = user
            .staked_balance
            .checked_add(amount)
            .ok_or(PeakError::MathOverflow)?;
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(PeakError::MathOverflow)?;

        Ok(())
    }

    pub fn record_withdraw(&mut self, user: &mut UserStakeState, amount: u64) -> Result<()> {
        require!(amount > 0, PeakError::ZeroAmount);
        require!(
            amount <= self.withdraw_able(user.staked_balance)?,
            PeakError::FundsIlliquid
        );

        user.staked_balance = user
            .staked_balance
            .checked_sub(amount)
            .ok_or(PeakError::InsufficientStakedBalance)?;
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(PeakError::MathOverflow)?;

        Ok(())
    }

    /// Pays out whatever is liquid and forfeits the deficit-attributed rest.
    /// The forfeited principal was never backed by assets; burning it closes
    /// an equal amount of the reported deficit.
    pub fn record_exit(&mut self, user: &mut UserStakeState) -> Result<ExitOutcome> {
        let payout = self.withdraw_able(user.staked_balance)?;
        let forfeited = user
            .staked_balance
            .checked_sub(payout)
            .ok_or(PeakError::MathOverflow)?;

        self.deficit = self.deficit.saturating_sub(forfeited);
        self.total_staked = self
            .total_staked
            .checked_sub(user.staked_balance)
            .ok_or(PeakError::MathOverflow)?;
        user.staked_balance = 0;

        Ok(ExitOutcome { payout, forfeited })
    }

    pub fn take_rewards(&self, user: &mut UserStakeState) -> u64 {
        let rewards = user.rewards;
        user.rewards = 0;
        rewards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000; // one stablecoin at 6 decimals

    fn pool() -> StakePoolState {
        StakePoolState {
            core: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            is_paused: false,
            total_staked: 0,
            reward_per_token_stored: 0,
            time_weighted_reward_per_token: 0,
            last_update: 0,
            last_income_update: 0,
            deficit: 0,
            bump: 255,
            reserved: [0; 32],
        }
    }

    fn staker() -> UserStakeState {
        UserStakeState {
            bump: 255,
            user: Pubkey::new_unique(),
            staked_balance: 0,
            user_reward_per_token_paid: 0,
            rewards: 0,
            reserved: [0; 32],
        }
    }

    fn stake(pool: &mut StakePoolState, user: &mut UserStakeState, amount: u64, now: i64) {
        pool.update_reward_window(now).unwrap();
        pool.settle_user(user).unwrap();
        pool.record_stake(user, amount).unwrap();
    }

    #[test]
    fn sole_staker_receives_full_income() {
        let mut pool = pool();
        let mut alice = staker();

        stake(&mut pool, &mut alice, 4 * UNIT, 0);

        pool.update_reward_window(100).unwrap();
        pool.notify_income(4 * UNIT, 100).unwrap();

        // income 4 over a sole stake of 4 pays exactly one unit per token
        assert_eq!(pool.reward_per_token_stored, REWARD_SCALE);
        assert_eq!(pool.earned(&alice).unwrap(), 4 * UNIT);
        assert_eq!(pool.time_weighted_reward_per_token, 0);
    }

    #[test]
    fn income_splits_by_stake_weight() {
        let mut pool = pool();
        let mut alice = staker();
        let mut bob = staker();

        stake(&mut pool, &mut alice, 4 * UNIT, 0);

        pool.update_reward_window(100).unwrap();
        pool.notify_income(4 * UNIT, 100).unwrap();

        stake(&mut pool, &mut bob, 6 * UNIT, 100);

        pool.update_reward_window(200).unwrap();
        pool.notify_income(6 * UNIT, 200).unwrap();

        // the second income of 6 splits 4/10 and 6/10
        assert_eq!(pool.earned(&alice).unwrap(), 4 * UNIT + 2_400_000);
        assert_eq!(pool.earned(&bob).unwrap(), 3_600_000);
    }

    #[test]
    fn earnings_are_stable_without_new_income() {
        let mut pool = pool();
        let mut alice = staker();

        stake(&mut pool, &mut alice, 4 * UNIT, 0);
        pool.update_reward_window(100).unwrap();
        pool.notify_income(4 * UNIT, 100).unwrap();

        let before = pool.earned(&alice).unwrap();
        pool.update_reward_window(500).unwrap();
        pool.update_reward_window(900).unwrap();
        assert_eq!(pool.earned(&alice).unwrap(), before);
    }

    #[test]
    fn zero_width_window_changes_nothing() {
        let mut pool = pool();
        let mut alice = staker();

        stake(&mut pool, &mut alice, 4 * UNIT, 0);
        pool.update_reward_window(100).unwrap();
        pool.notify_income(4 * UNIT, 100).unwrap();

        let rpt = pool.reward_per_token_stored;
        pool.update_reward_window(100).unwrap();
        pool.notify_income(0, 100).unwrap();
        pool.notify_income(4 * UNIT, 100).unwrap();
        assert_eq!(pool.reward_per_token_stored, rpt);
    }

    #[test]
    fn income_with_no_stakers_pays_nobody() {
        let mut pool = pool();
        pool.update_reward_window(100).unwrap();
        pool.notify_income(5 * UNIT, 100).unwrap();
        assert_eq!(pool.reward_per_token_stored, 0);
    }

    #[test]
    fn deficit_limits_withdrawals_pro_rata() {
        let mut pool = pool();
        let mut alice = staker();

        stake(&mut pool, &mut alice, 10 * UNIT, 0);

        // alice takes 2 out while the system is healthy
        pool.update_reward_window(10).unwrap();
        pool.settle_user(&mut alice).unwrap();
        pool.record_withdraw(&mut alice, 2 * UNIT).unwrap();
        assert_eq!(pool.withdraw_able(alice.staked_balance).unwrap(), 8 * UNIT);

        // a shortfall of 4 lands on the remaining stake of 8
        pool.notify_deficit(4 * UNIT);
        assert_eq!(pool.withdraw_able(alice.staked_balance).unwrap(), 4 * UNIT);

        let err = pool.record_withdraw(&mut alice, 5 * UNIT).unwrap_err();
        assert_eq!(err, PeakError::FundsIlliquid.into());

        pool.record_withdraw(&mut alice, 4 * UNIT).unwrap();
        assert_eq!(alice.staked_balance, 4 * UNIT);
    }

    #[test]
    fn withdrawing_more_than_staked_is_illiquid() {
        let mut pool = pool();
        let mut alice = staker();
        stake(&mut pool, &mut alice, 5 * UNIT, 0);

        let err = pool.record_withdraw(&mut alice, 6 * UNIT).unwrap_err();
        assert_eq!(err, PeakError::FundsIlliquid.into());
    }

    #[test]
    fn deficit_charges_round_up() {
        let mut pool = pool();
        let mut alice = staker();
        let mut bob = staker();
        let mut carol = staker();
        stake(&mut pool, &mut alice, 1, 0);
        stake(&mut pool, &mut bob, 1, 0);
        stake(&mut pool, &mut carol, 1, 0);

        pool.notify_deficit(1);
        // one lamport of deficit over three stakers charges each a full lamport
        assert_eq!(pool.user_deficit_share(1).unwrap(), 1);
        assert_eq!(pool.withdraw_able(1).unwrap(), 0);
    }

    #[test]
    fn exit_forfeits_the_deficit_share() {
        let mut pool = pool();
        let mut alice = staker();

        stake(&mut pool, &mut alice, 8 * UNIT, 0);
        pool.notify_deficit(4 * UNIT);

        pool.update_reward_window(10).unwrap();
        pool.settle_user(&mut alice).unwrap();
        let outcome = pool.record_exit(&mut alice).unwrap();

        assert_eq!(outcome, ExitOutcome { payout: 4 * UNIT, forfeited: 4 * UNIT });
        assert_eq!(pool.deficit, 0);
        assert_eq!(pool.total_staked, 0);
        assert_eq!(alice.staked_balance, 0);
        assert_eq!(pool.withdraw_able(alice.staked_balance).unwrap(), 0);
    }

    #[test]
    fn deficit_beyond_principal_consumes_the_whole_stake() {
        let mut pool = pool();
        let mut alice = staker();

        stake(&mut pool, &mut alice, 10 * UNIT, 0);
        pool.notify_deficit(34 * UNIT);

        assert_eq!(pool.withdraw_able(alice.staked_balance).unwrap(), 0);

        let outcome = pool.record_exit(&mut alice).unwrap();
        assert_eq!(outcome, ExitOutcome { payout: 0, forfeited: 10 * UNIT });
        // the uncovered remainder stays until redemptions close the gap
        assert_eq!(pool.deficit, 24 * UNIT);
    }

    #[test]
    fn recovery_restores_liquidity() {
        let mut pool = pool();
        let mut alice = staker();

        stake(&mut pool, &mut alice, 10 * UNIT, 0);
        pool.notify_deficit(4 * UNIT);
        assert_eq!(pool.withdraw_able(alice.staked_balance).unwrap(), 6 * UNIT);

        pool.notify_deficit(0);
        assert_eq!(pool.withdraw_able(alice.staked_balance).unwrap(), 10 * UNIT);
    }

    #[test]
    fn rewards_survive_exit_settlement() {
        let mut pool = pool();
        let mut alice = staker();

        stake(&mut pool, &mut alice, 4 * UNIT, 0);
        pool.update_reward_window(100).unwrap();
        pool.notify_income(4 * UNIT, 100).unwrap();

        pool.notify_deficit(4 * UNIT);
        pool.update_reward_window(200).unwrap();
        pool.settle_user(&mut alice).unwrap();
        let outcome = pool.record_exit(&mut alice).unwrap();

        // principal is fully forfeited but settled rewards are untouched
        assert_eq!(outcome.payout, 0);
        assert_eq!(pool.take_rewards(&mut alice), 4 * UNIT);
        assert_eq!(alice.rewards, 0);
    }
}
