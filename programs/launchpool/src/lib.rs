#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

declare_id!("5VFvyBybqEMVChCDBd6qncckSFcKUzn1owdjyThyxHx5");

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::presale::PresaleOptions;

#[program]
pub mod launchpool {
    use super::*;

    pub fn create_presale(ctx: Context<CreatePresale>, options: PresaleOptions) -> Result<()> {
        instructions::create_presale::create_presale(ctx, options)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>) -> Result<()> {
        instructions::deposit_tokens::deposit_tokens(ctx)
    }

    pub fn contribute(
        ctx: Context<Contribute>,
        amount: u64,
        merkle_proof: Option<Vec<[u8; 32]>>,
    ) -> Result<()> {
        instructions::contribute::contribute(ctx, amount, merkle_proof)
    }

    pub fn contribute_token(
        ctx: Context<ContributeToken>,
        amount: u64,
        merkle_proof: Option<Vec<[u8; 32]>>,
    ) -> Result<()> {
        instructions::contribute_token::contribute_token(ctx, amount, merkle_proof)
    }

    pub fn set_merkle_root(ctx: Context<SetMerkleRoot>, root: [u8; 32]) -> Result<()> {
        instructions::set_merkle_root::set_merkle_root(ctx, root)
    }

    pub fn finalize_pool(ctx: Context<FinalizePool>) -> Result<()> {
        instructions::finalize_pool::finalize_pool(ctx)
    }

    pub fn lock_liquidity(ctx: Context<LockLiquidity>) -> Result<()> {
        instructions::lock_liquidity::lock_liquidity(ctx)
    }

    pub fn finalize(ctx: Context<Finalize>) -> Result<()> {
        instructions::finalize::finalize(ctx)
    }

    pub fn claim_tokens(ctx: Context<ClaimTokens>) -> Result<()> {
        instructions::claim_tokens::claim_tokens(ctx)
    }

    pub fn refund(ctx: Context<Refund>) -> Result<()> {
        instructions::refund::refund(ctx)
    }

    pub fn cancel_presale(ctx: Context<CancelPresale>) -> Result<()> {
        instructions::cancel_presale::cancel_presale(ctx)
    }

    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        instructions::set_paused::set_paused(ctx, paused)
    }

    pub fn extend_claim_deadline(
        ctx: Context<ExtendClaimDeadline>,
        new_deadline: i64,
    ) -> Result<()> {
        instructions::extend_claim_deadline::extend_claim_deadline(ctx, new_deadline)
    }

    pub fn rescue_tokens(ctx: Context<RescueTokens>) -> Result<()> {
        instructions::rescue_tokens::rescue_tokens(ctx)
    }

    pub fn claim_vested(ctx: Context<ClaimVested>) -> Result<()> {
        instructions::claim_vested::claim_vested(ctx)
    }

    pub fn withdraw_locked_lp(ctx: Context<WithdrawLockedLp>) -> Result<()> {
        instructions::withdraw_locked_lp::withdraw_locked_lp(ctx)
    }
}
