use anchor_lang::prelude::*;

#[account]
pub struct ContributionState {
    pub contributor: Pubkey,
    /// Cumulative amount paid in, in currency base units.
    pub amount: u64,
    pub tokens_claimed: u64,
    pub refunded: bool,
}
