use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked,
    Mint,
    TokenAccount,
    TokenInterface,
    TransferChecked,
};

use crate::{
    constants::{
        CONTRIBUTE_SEED,
        PRESALE_SEED,
    },
    error::LaunchpoolError,
    state::{
        contribution::ContributionState,
        presale::{
            Lifecycle,
            Presale,
        },
    },
};

#[event]
pub struct TokensClaimed {
    pub claimer: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct ClaimTokens<'info> {
    #[account(
        mut,
        seeds = [PRESALE_SEED, token.key().as_ref(), presale.identifier.as_ref()],
        bump,
    )]
    pub presale: Box<Account<'info, Presale>>,

    #[account(
        mut,
        seeds = [CONTRIBUTE_SEED, presale.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub contribution: Account<'info, ContributionState>,

    #[account(
        mut,
        constraint = token_vault_account.mint == token.key()
            && token_vault_account.owner == presale.key()
    )]
    pub token_vault_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = token,
        associated_token::authority = user,
        associated_token::token_program = token_program
    )]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token: InterfaceAccount<'info, Mint>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn claim_tokens(ctx: Context<ClaimTokens>) -> Result<()> {
    let presale = &ctx.accounts.presale;
    let contribution = &mut ctx.accounts.contribution;
    let now = Clock::get()?.unix_timestamp;

    require!(!presale.paused, LaunchpoolError::ContractPaused);
    require!(
        presale.lifecycle == Lifecycle::Finalized,
        LaunchpoolError::NotFinalized
    );
    require!(
        now <= presale.claim_deadline,
        LaunchpoolError::ClaimPeriodOver
    );
    require!(
        contribution.contributor == ctx.accounts.user.key(),
        LaunchpoolError::NothingToClaim
    );
    require!(contribution.amount > 0, LaunchpoolError::NothingToClaim);

    let total_allocation = (contribution.amount as u128)
        .checked_mul(presale.presale_rate as u128)
        .and_then(|f| u64::try_from(f).ok())
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;
    let claimable = total_allocation
        .checked_sub(contribution.tokens_claimed)
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;
    require!(claimable > 0, LaunchpoolError::NothingToClaim);

    // Mark before transferring.
    contribution.tokens_claimed = total_allocation;

    let token_key = ctx.accounts.token.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        PRESALE_SEED,
        token_key.as_ref(),
        presale.identifier.as_ref(),
        &[ctx.bumps.presale],
    ]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.token_vault_account.to_account_info(),
                mint: ctx.accounts.token.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: presale.to_account_info(),
            },
            signer_seeds,
        ),
        claimable,
        ctx.accounts.token.decimals,
    )?;

    emit!(TokensClaimed {
        claimer: ctx.accounts.user.key(),
        amount: claimable,
        timestamp: now,
    });

    Ok(())
}
