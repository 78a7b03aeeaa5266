use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchpoolError {
    // access
    #[msg("Caller is not the presale owner")]
    NotOwner,
    #[msg("Caller is not the authorized factory")]
    NotFactory,
    #[msg("Presale is paused")]
    ContractPaused,
    #[msg("Operation not valid in the current lifecycle state")]
    InvalidLifecycleState,

    // construction
    #[msg("Soft cap must be nonzero and not exceed the hard cap")]
    InvalidCapConfiguration,
    #[msg("Contribution limits must satisfy 0 < min <= max <= hard cap")]
    InvalidContributionLimits,
    #[msg("Rates must be nonzero and the listing rate below the presale rate")]
    InvalidRateConfiguration,
    #[msg("Liquidity basis points outside the allowed range")]
    InvalidLiquidityAllocation,
    #[msg("Slippage basis points exceed 10000")]
    InvalidSlippageConfiguration,
    #[msg("Sale window must satisfy start < end")]
    InvalidSaleWindow,
    #[msg("Whitelist fields inconsistent with the whitelist kind")]
    InvalidWhitelistConfiguration,
    #[msg("Vesting parameters required for the Vest leftover option")]
    InvalidVestingConfiguration,
    #[msg("Platform fee basis points exceed 10000")]
    InvalidFeeConfiguration,
    #[msg("Lockup duration must be nonzero")]
    InvalidLockupConfiguration,
    #[msg("Token deposit below the amount the sale parameters require")]
    InsufficientDeposit,
    #[msg("Deposits must land before the sale window opens")]
    DepositWindowClosed,

    // contribution
    #[msg("Not within the purchase period")]
    NotInPurchasePeriod,
    #[msg("Contributor is not whitelisted")]
    NotWhitelisted,
    #[msg("Whitelist balance probe failed")]
    WhitelistProbeFailed,
    #[msg("Contribution amount is zero")]
    ZeroAmount,
    #[msg("Cumulative contribution below the per-address minimum")]
    BelowMinimumContribution,
    #[msg("Cumulative contribution above the per-address maximum")]
    AboveMaximumContribution,
    #[msg("Contribution would exceed the hard cap")]
    HardCapExceeded,
    #[msg("Payment does not match the configured currency")]
    WrongCurrency,

    // settlement
    #[msg("Soft cap not reached")]
    SoftCapNotReached,
    #[msg("Presale not ended")]
    PresaleNotEnded,
    #[msg("Presale already finalized")]
    AlreadyFinalized,
    #[msg("Liquidity pool already seeded")]
    LiquidityAlreadySeeded,
    #[msg("Liquidity pool not seeded yet")]
    LiquidityNotSeeded,
    #[msg("Liquidity pool tokens not locked yet")]
    LiquidityNotLocked,
    #[msg("Liquidity reserves round to zero")]
    InvalidPoolReserves,
    #[msg("Token balance fell below the settled allocations")]
    BalanceInvariantViolated,
    #[msg("Invalid quote mint for the configured currency")]
    InvalidQuoteMint,
    #[msg("Fee collector account does not match the configured collector")]
    InvalidFeeCollector,
    #[msg("Accounts for the configured leftover option are missing")]
    MissingLeftoverAccounts,

    // distribution
    #[msg("Presale not finalized")]
    NotFinalized,
    #[msg("Claim deadline has passed")]
    ClaimPeriodOver,
    #[msg("Nothing to claim")]
    NothingToClaim,
    #[msg("Refunds are not open")]
    RefundsNotOpen,
    #[msg("Nothing to refund")]
    NothingToRefund,
    #[msg("Contribution already refunded")]
    AlreadyRefunded,

    // administration
    #[msg("Presale already canceled")]
    AlreadyCanceled,
    #[msg("New claim deadline must extend the current one")]
    DeadlineNotExtended,
    #[msg("Sale tokens remain claimable, rescue refused")]
    TokensStillClaimable,
    #[msg("Liquidity is still locked")]
    LiquidityStillLocked,
    #[msg("Insufficient funds in vault")]
    InsufficientFunds,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
