// constants.rs

// Core state seeds
pub const CORE_STATE_SEED: &[u8] = b"core_state";
pub const STAKE_POOL_SEED: &[u8] = b"stake_pool";
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

pub const PRICE_SCALE: u128 = 1_000_000;  // 6 decimals of precision
pub const BPS_SCALE: u16 = 10_000;        // Basis points (100% = 10000)

// Reward-per-token accumulator precision
pub const REWARD_SCALE: u128 = 1_000_000_000_000_000_000; // 1e18

// Stablecoin limits
pub const STABLE_DECIMALS: u8 = 6;           // Decimal places for the stablecoin

// For checking if cached collateral prices are stale
pub const ORACLE_STALENESS_THRESHOLD: i64 = 300; // 5 minutes in seconds

// Buffer sizes
pub const RESERVE_SPACE: usize = 32;               // Reserved space for future upgrades

// Maximum registered collateral types
pub const MAX_COLLATERAL_TYPES: usize = 8;

// Maximum whitelisted peaks
pub const MAX_PEAKS: usize = 8;
