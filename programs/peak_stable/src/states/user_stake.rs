// states/user_stake.rs
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct UserStakeState {
    pub bump: u8,
    pub user: Pubkey,
    pub staked_balance: u64,
    pub user_reward_per_token_paid: u128, // REWARD_SCALE fixed point
    pub rewards: u64,                     // Settled but unclaimed rewards
    pub reserved: [u8; 32],               // Space for future fields
}
