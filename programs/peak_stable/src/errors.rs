// errors.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum PeakError {
    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Caller is not a whitelisted peak")]
    NotAuthorizedPeak,

    #[msg("Peak is not active for minting")]
    MintNotAllowed,

    #[msg("Mint would exceed the peak ceiling")]
    MintCeilingExceeded,

    #[msg("Peak is extinct and cannot redeem")]
    RedeemNotAllowed,

    #[msg("Excessive slippage")]
    ExcessiveSlippage,

    #[msg("Withdrawing more than staked or illiquid due to system deficit")]
    FundsIlliquid,

    #[msg("Collateral is already registered")]
    DuplicateCollateral,

    #[msg("Peak is already whitelisted")]
    PeakAlreadyExists,

    #[msg("Collateral index is not registered")]
    UnknownCollateral,

    #[msg("Collateral is not allowed for this peak")]
    CollateralNotAllowed,

    #[msg("Maximum number of collateral types reached")]
    RegistryFull,

    #[msg("Maximum number of peaks reached")]
    PeakTableFull,

    #[msg("Illegal peak status transition")]
    InvalidStatusTransition,

    #[msg("Oracle price is too stale")]
    StaleOraclePrice,

    #[msg("Oracle price is not valid")]
    InvalidOraclePrice,

    #[msg("Oracle account does not match the registered feed")]
    OracleMismatch,

    #[msg("Not enough oracle accounts supplied")]
    MissingOracleAccount,

    #[msg("Math overflow occurred")]
    MathOverflow,

    #[msg("Fee is too large")]
    FeeTooLarge,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Core is currently paused")]
    CorePaused,

    #[msg("Staking is currently paused")]
    StakingPaused,

    #[msg("Core is already paused")]
    AlreadyPaused,

    #[msg("Core is not paused")]
    NotPaused,

    #[msg("Amounts length does not match the collateral registry")]
    LengthMismatch,

    #[msg("Peak collateral value cannot cover this redemption")]
    NothingToRedeem,

    #[msg("Not enough staked balance")]
    InsufficientStakedBalance,
}
