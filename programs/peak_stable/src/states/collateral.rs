// collateral.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CollateralConfig {
    // Essential collateral identification
    pub mint: Pubkey,               // The collateral SPL token mint
    pub oracle: Pubkey,             // Switchboard aggregator pricing this collateral in USD

    // Normalization and cached pricing
    pub decimals: u8,               // Token decimals, used to normalize raw amounts
    pub last_price: u64,            // Cached USD price, PRICE_SCALE fixed point
    pub last_price_update: i64,     // When last_price was refreshed
}

impl anchor_lang::Space for CollateralConfig {
    const INIT_SPACE: usize =
        32 +    // Pubkey (mint)
        32 +    // Pubkey (oracle)
        1 +     // u8 (decimals)
        8 +     // u64 (last_price)
        8;      // i64 (last_price_update)
}

impl CollateralConfig {
    /// USD value of a raw token amount at the cached price, PRICE_SCALE fixed point.
    pub fn usd_value(&self, amount: u64) -> Result<u64> {
        let scaled = (amount as u128)
            .checked_mul(self.last_price as u128)
            .ok_or(PeakError::MathOverflow)?;

        let value = scaled
            .checked_div(10u128.pow(self.decimals as u32))
            .ok_or(PeakError::MathOverflow)?;

        require!(value <= u64::MAX as u128, PeakError::MathOverflow);

        Ok(value as u64)
    }

    pub fn is_price_fresh(&self, now: i64) -> bool {
        now - self.last_price_update <= ORACLE_STALENESS_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(decimals: u8, price: u64) -> CollateralConfig {
        CollateralConfig {
            mint: Pubkey::new_unique(),
            oracle: Pubkey::new_unique(),
            decimals,
            last_price: price,
            last_price_update: 0,
        }
    }

    #[test]
    fn values_normalize_across_decimals() {
        // 30 tokens at $1 with 18 decimals and 20 tokens at $1 with 6 decimals
        let c18 = entry(18, PRICE_SCALE as u64);
        let c6 = entry(6, PRICE_SCALE as u64);

        assert_eq!(c18.usd_value(30_000_000_000_000_000_000).unwrap(), 30_000_000);
        assert_eq!(c6.usd_value(20_000_000).unwrap(), 20_000_000);
    }

    #[test]
    fn value_follows_price() {
        let mut c = entry(6, PRICE_SCALE as u64);
        assert_eq!(c.usd_value(20_000_000).unwrap(), 20_000_000);

        // price drops to $0.80
        c.last_price = 800_000;
        assert_eq!(c.usd_value(20_000_000).unwrap(), 16_000_000);
    }

    #[test]
    fn staleness_window() {
        let mut c = entry(6, PRICE_SCALE as u64);
        c.last_price_update = 1_000;
        assert!(c.is_price_fresh(1_000 + ORACLE_STALENESS_THRESHOLD));
        assert!(!c.is_price_fresh(1_001 + ORACLE_STALENESS_THRESHOLD));
    }
}
