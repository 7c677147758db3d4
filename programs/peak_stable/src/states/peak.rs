// peak.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PeakError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeakStatus {
    Active,
    Dormant,
    Extinct,
}

impl PeakStatus {
    pub fn as_u8(&self) -> u8 {
        match self {
            PeakStatus::Active => 0,
            PeakStatus::Dormant => 1,
            PeakStatus::Extinct => 2,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct PeakConfig {
    // Peak identification
    pub authority: Pubkey,          // Signer identity for mint/redeem calls

    // Operational parameters
    pub status: PeakStatus,
    pub ceiling: u64,               // Max stablecoin this peak may have outstanding
    pub outstanding: u64,           // Stablecoin currently attributed to this peak
    pub collateral_mask: u32,       // Bitmask of registry indices this peak may use

    // Custody accounting
    pub held_value: u64,            // Last synced USD value of holdings
    pub holdings: Vec<u64>,         // Per-collateral raw amounts, registry order
}

impl anchor_lang::Space for PeakConfig {
    const INIT_SPACE: usize =
        32 +                            // Pubkey (authority)
        1 +                             // PeakStatus
        8 +                             // u64 (ceiling)
        8 +                             // u64 (outstanding)
        4 +                             // u32 (collateral_mask)
        8 +                             // u64 (held_value)
        4 + 8 * MAX_COLLATERAL_TYPES;   // Vec<u64> (holdings)
}

impl PeakConfig {
    pub fn allows_collateral(&self, index: usize) -> bool {
        self.collateral_mask & (1u32 << index) != 0
    }

    pub fn can_mint(&self) -> bool {
        self.status == PeakStatus::Active
    }

    pub fn can_redeem(&self) -> bool {
        self.status != PeakStatus::Extinct
    }

    /// Active is always reachable. Otherwise only Active -> Dormant and
    /// Dormant -> Extinct move forward; setting the current status again is a no-op.
    pub fn transition_status(&mut self, new_status: PeakStatus) -> Result<()> {
        let legal = matches!(
            (self.status, new_status),
            (_, PeakStatus::Active)
                | (PeakStatus::Active, PeakStatus::Dormant)
                | (PeakStatus::Dormant, PeakStatus::Extinct)
        ) || self.status == new_status;

        require!(legal, PeakError::InvalidStatusTransition);

        self.status = new_status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(status: PeakStatus) -> PeakConfig {
        PeakConfig {
            authority: Pubkey::new_unique(),
            status,
            ceiling: 1_000,
            outstanding: 0,
            collateral_mask: 0b0101,
            held_value: 0,
            holdings: vec![0; 4],
        }
    }

    #[test]
    fn mask_selects_registry_indices() {
        let p = peak(PeakStatus::Active);
        assert!(p.allows_collateral(0));
        assert!(!p.allows_collateral(1));
        assert!(p.allows_collateral(2));
        assert!(!p.allows_collateral(3));
    }

    #[test]
    fn dormant_blocks_mint_allows_redeem() {
        let p = peak(PeakStatus::Dormant);
        assert!(!p.can_mint());
        assert!(p.can_redeem());
    }

    #[test]
    fn extinct_blocks_both() {
        let p = peak(PeakStatus::Extinct);
        assert!(!p.can_mint());
        assert!(!p.can_redeem());
    }

    #[test]
    fn forward_transitions_are_legal() {
        let mut p = peak(PeakStatus::Active);
        p.transition_status(PeakStatus::Dormant).unwrap();
        p.transition_status(PeakStatus::Extinct).unwrap();
        p.transition_status(PeakStatus::Active).unwrap();
        assert_eq!(p.status, PeakStatus::Active);
    }

    #[test]
    fn skipping_dormant_is_illegal() {
        let mut p = peak(PeakStatus::Active);
        assert!(p.transition_status(PeakStatus::Extinct).is_err());
    }

    #[test]
    fn extinct_cannot_go_dormant() {
        let mut p = peak(PeakStatus::Extinct);
        assert!(p.transition_status(PeakStatus::Dormant).is_err());
    }
}
