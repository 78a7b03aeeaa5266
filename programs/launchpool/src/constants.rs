use anchor_lang::prelude::*;
use solana_program::{
    pubkey,
    pubkey::Pubkey,
};

#[constant]
pub const PRESALE_SEED: &[u8] = b"presale";

#[constant]
pub const VAULT_SEED: &[u8] = b"vault";

#[constant]
pub const CONTRIBUTE_SEED: &[u8] = b"contribute";

#[constant]
pub const LP_TOKEN_LOCK_SEED: &[u8] = b"lp_token_lock";

#[constant]
pub const VESTING_SEED: &[u8] = b"leftover_vesting";

#[constant]
pub const FACTORY_PROGRAM_ID: Pubkey = pubkey!("2e52Hn9bP9B1wJ6Ehy6T9y9Fmzd33poU3tSoCySYyqmj");

#[constant]
pub const WRAPPED_SOL_MINT_ADDRESS: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

/// Window after finalization during which purchased tokens stay claimable.
/// The owner can extend it, never shorten it.
#[constant]
pub const CLAIM_WINDOW: i64 = 90 * 24 * 3600;

// Share of the raise routed into the liquidity pool, bounded so a listing
// can never be seeded with less than half of the proceeds.
#[constant]
pub const MIN_LIQUIDITY_BPS: u16 = 5000;

#[constant]
pub const MAX_LIQUIDITY_BPS: u16 = 10000;
