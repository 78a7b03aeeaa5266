use anchor_lang::prelude::*;

use crate::{
    constants::{
        MAX_LIQUIDITY_BPS,
        MIN_LIQUIDITY_BPS,
    },
    error::LaunchpoolError,
    utils::required_deposit,
};

#[account]
#[derive(InitSpace)]
pub struct Presale {
    pub owner: Pubkey,
    pub token: Pubkey,
    /// `Pubkey::default()` means the raise is denominated in native SOL,
    /// anything else is the SPL mint contributions must be paid in.
    pub currency: Pubkey,
    pub fee_collector: Pubkey,
    pub fee_bps: u16,
    pub token_deposit: u64,
    pub hard_cap: u64,
    pub soft_cap: u64,
    pub min_contribution: u64,
    pub max_contribution: u64,
    /// Token base units granted per currency base unit contributed.
    pub presale_rate: u64,
    /// Token base units per currency base unit when seeding the pool.
    pub listing_rate: u64,
    pub liquidity_bps: u16,
    pub slippage_bps: u16,
    pub start_time: i64,
    pub end_time: i64,
    pub lockup_duration: i64,
    pub vesting_bps: u16,
    pub vesting_duration: i64,
    pub leftover_option: LeftoverOption,
    pub whitelist_kind: WhitelistKind,
    pub merkle_root: [u8; 32],
    pub nft_collection: Pubkey,
    pub lifecycle: Lifecycle,
    pub paused: bool,
    pub total_raised: u64,
    pub tokens_sold: u64,
    /// Sale tokens still escrowed by the presale, decremented as they are
    /// routed to liquidity, leftover disposition and contributor claims.
    pub token_balance: u64,
    /// Reserved for the pool at deposit time, sized from the hard cap so the
    /// escrow covers liquidity even when the raise ends below it.
    pub tokens_liquidity: u64,
    pub currency_for_liquidity: u64,
    pub liquidity_seeded: bool,
    pub liquidity_locked: bool,
    pub claim_deadline: i64,
    #[max_len(25)]
    pub identifier: String,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lifecycle {
    Pending,
    Active,
    Finalized,
    Canceled,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum LeftoverOption {
    Return,
    Burn,
    Vest,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum WhitelistKind {
    None,
    Merkle,
    Nft,
}

impl Space for Lifecycle {
    const INIT_SPACE: usize = 1;
}

impl Space for LeftoverOption {
    const INIT_SPACE: usize = 1;
}

impl Space for WhitelistKind {
    const INIT_SPACE: usize = 1;
}

/// Immutable sale parameters supplied at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct PresaleOptions {
    pub currency: Pubkey,
    pub fee_collector: Pubkey,
    pub fee_bps: u16,
    pub token_deposit: u64,
    pub hard_cap: u64,
    pub soft_cap: u64,
    pub min_contribution: u64,
    pub max_contribution: u64,
    pub presale_rate: u64,
    pub listing_rate: u64,
    pub liquidity_bps: u16,
    pub slippage_bps: u16,
    pub start_time: i64,
    pub end_time: i64,
    pub lockup_duration: i64,
    pub vesting_bps: u16,
    pub vesting_duration: i64,
    pub leftover_option: LeftoverOption,
    pub whitelist_kind: WhitelistKind,
    pub merkle_root: [u8; 32],
    pub nft_collection: Pubkey,
    pub identifier: String,
}

impl PresaleOptions {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.soft_cap > 0 && self.soft_cap <= self.hard_cap,
            LaunchpoolError::InvalidCapConfiguration
        );
        require!(
            self.min_contribution > 0
                && self.min_contribution <= self.max_contribution
                && self.max_contribution <= self.hard_cap,
            LaunchpoolError::InvalidContributionLimits
        );
        require!(
            self.presale_rate > 0
                && self.listing_rate > 0
                && self.listing_rate < self.presale_rate,
            LaunchpoolError::InvalidRateConfiguration
        );
        require!(
            self.liquidity_bps >= MIN_LIQUIDITY_BPS && self.liquidity_bps <= MAX_LIQUIDITY_BPS,
            LaunchpoolError::InvalidLiquidityAllocation
        );
        require!(
            self.slippage_bps <= 10000,
            LaunchpoolError::InvalidSlippageConfiguration
        );
        require!(
            self.start_time < self.end_time,
            LaunchpoolError::InvalidSaleWindow
        );
        require!(self.fee_bps <= 10000, LaunchpoolError::InvalidFeeConfiguration);
        require!(
            self.lockup_duration > 0,
            LaunchpoolError::InvalidLockupConfiguration
        );

        match self.whitelist_kind {
            WhitelistKind::None => require!(
                self.merkle_root == [0u8; 32] && self.nft_collection == Pubkey::default(),
                LaunchpoolError::InvalidWhitelistConfiguration
            ),
            WhitelistKind::Merkle => require!(
                self.merkle_root != [0u8; 32] && self.nft_collection == Pubkey::default(),
                LaunchpoolError::InvalidWhitelistConfiguration
            ),
            WhitelistKind::Nft => require!(
                self.merkle_root == [0u8; 32] && self.nft_collection != Pubkey::default(),
                LaunchpoolError::InvalidWhitelistConfiguration
            ),
        }

        if self.leftover_option == LeftoverOption::Vest {
            require!(
                self.vesting_bps > 0 && self.vesting_bps <= 10000 && self.vesting_duration > 0,
                LaunchpoolError::InvalidVestingConfiguration
            );
        }

        let (_, _, required) = required_deposit(
            self.hard_cap,
            self.presale_rate,
            self.listing_rate,
            self.liquidity_bps,
        )?;
        require!(
            self.token_deposit >= required,
            LaunchpoolError::InsufficientDeposit
        );

        Ok(())
    }
}

impl Presale {
    pub fn is_native(&self) -> bool {
        self.currency == Pubkey::default()
    }

    pub fn in_purchase_window(&self, now: i64) -> bool {
        now >= self.start_time && now <= self.end_time
    }

    /// Settlement may start strictly after the window closes, or early the
    /// moment the hard cap is filled.
    pub fn can_settle(&self, now: i64) -> bool {
        now > self.end_time || self.total_raised >= self.hard_cap
    }

    /// Refunds open on cancellation, and also once the window has expired
    /// below the soft cap even without an explicit cancel.
    pub fn refunds_open(&self, now: i64) -> bool {
        match self.lifecycle {
            Lifecycle::Canceled => true,
            Lifecycle::Active => now > self.end_time && self.total_raised < self.soft_cap,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> PresaleOptions {
        PresaleOptions {
            currency: Pubkey::default(),
            fee_collector: Pubkey::new_unique(),
            fee_bps: 500,
            token_deposit: 600_000,
            hard_cap: 10,
            soft_cap: 5,
            min_contribution: 1,
            max_contribution: 10,
            presale_rate: 1000,
            listing_rate: 800,
            liquidity_bps: 8000,
            slippage_bps: 100,
            start_time: 1_000,
            end_time: 2_000,
            lockup_duration: 3600,
            vesting_bps: 0,
            vesting_duration: 0,
            leftover_option: LeftoverOption::Return,
            whitelist_kind: WhitelistKind::None,
            merkle_root: [0u8; 32],
            nft_collection: Pubkey::default(),
            identifier: "sale-1".to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_options() {
        options().validate().unwrap();
    }

    #[test]
    fn rejects_soft_cap_above_hard_cap() {
        let mut opts = options();
        opts.soft_cap = 11;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_zero_soft_cap() {
        let mut opts = options();
        opts.soft_cap = 0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_min_above_max() {
        let mut opts = options();
        opts.min_contribution = 5;
        opts.max_contribution = 4;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_max_above_hard_cap() {
        let mut opts = options();
        opts.max_contribution = 11;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_listing_rate_not_below_presale_rate() {
        let mut opts = options();
        opts.listing_rate = opts.presale_rate;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_liquidity_bps_outside_allowed_band() {
        let mut opts = options();
        opts.liquidity_bps = 4999;
        assert!(opts.validate().is_err());
        opts.liquidity_bps = 10001;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_inverted_sale_window() {
        let mut opts = options();
        opts.start_time = opts.end_time;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_merkle_kind_without_root() {
        let mut opts = options();
        opts.whitelist_kind = WhitelistKind::Merkle;
        assert!(opts.validate().is_err());
        opts.merkle_root = [7u8; 32];
        opts.validate().unwrap();
    }

    #[test]
    fn rejects_nft_kind_without_collection() {
        let mut opts = options();
        opts.whitelist_kind = WhitelistKind::Nft;
        assert!(opts.validate().is_err());
        opts.nft_collection = Pubkey::new_unique();
        opts.validate().unwrap();
    }

    #[test]
    fn rejects_vest_option_without_schedule_parameters() {
        let mut opts = options();
        opts.leftover_option = LeftoverOption::Vest;
        assert!(opts.validate().is_err());
        opts.vesting_bps = 2500;
        opts.vesting_duration = 86_400;
        opts.validate().unwrap();
    }

    #[test]
    fn rejects_deposit_below_requirement() {
        let mut opts = options();
        // hard_cap * presale_rate + (hard_cap * 8000 / 10000) * listing_rate
        opts.token_deposit = 16_399;
        assert!(opts.validate().is_err());
        opts.token_deposit = 16_400;
        opts.validate().unwrap();
    }

    #[test]
    fn refunds_open_after_expiry_below_soft_cap() {
        let mut presale = Presale {
            owner: Pubkey::default(),
            token: Pubkey::default(),
            currency: Pubkey::default(),
            fee_collector: Pubkey::default(),
            fee_bps: 0,
            token_deposit: 0,
            hard_cap: 10,
            soft_cap: 5,
            min_contribution: 1,
            max_contribution: 10,
            presale_rate: 1000,
            listing_rate: 800,
            liquidity_bps: 8000,
            slippage_bps: 0,
            start_time: 1_000,
            end_time: 2_000,
            lockup_duration: 3600,
            vesting_bps: 0,
            vesting_duration: 0,
            leftover_option: LeftoverOption::Return,
            whitelist_kind: WhitelistKind::None,
            merkle_root: [0u8; 32],
            nft_collection: Pubkey::default(),
            lifecycle: Lifecycle::Active,
            paused: false,
            total_raised: 3,
            tokens_sold: 0,
            token_balance: 0,
            tokens_liquidity: 0,
            currency_for_liquidity: 0,
            liquidity_seeded: false,
            liquidity_locked: false,
            claim_deadline: 0,
            identifier: String::new(),
        };

        assert!(!presale.refunds_open(1_500));
        assert!(presale.refunds_open(2_001));

        presale.total_raised = 5;
        assert!(!presale.refunds_open(2_001));

        presale.lifecycle = Lifecycle::Canceled;
        assert!(presale.refunds_open(1_500));
    }
}
