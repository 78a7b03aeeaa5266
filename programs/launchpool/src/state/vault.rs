use anchor_lang::prelude::*;

/// Lamport escrow for native-currency raises. Contributions land here and
/// leave only through settlement payouts and refunds.
#[account]
pub struct Vault {
    pub authority: Pubkey,
}
