use anchor_lang::prelude::*;

use crate::{
    constants::{
        CONTRIBUTE_SEED,
        VAULT_SEED,
    },
    error::LaunchpoolError,
    state::{
        contribution::ContributionState,
        presale::Presale,
        vault::Vault,
    },
    utils::{
        check_whitelisted,
        record_contribution,
        transfer_sols,
    },
};

#[event]
pub struct Contribution {
    pub contributor: Pubkey,
    pub amount: u64,
    pub currency: Pubkey,
}

#[event]
pub struct Purchase {
    pub beneficiary: Pubkey,
    pub contribution: u64,
}

#[derive(Accounts)]
pub struct Contribute<'info> {
    #[account(mut)]
    pub presale: Box<Account<'info, Presale>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, presale.key().as_ref()],
        bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        init_if_needed,
        payer = user,
        seeds = [CONTRIBUTE_SEED, presale.key().as_ref(), user.key().as_ref()],
        bump,
        space = 8 + std::mem::size_of::<ContributionState>()
    )]
    pub contribution: Box<Account<'info, ContributionState>>,

    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: holder token account for NFT-gated sales, probed in code
    pub nft_token_account: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
}

pub fn contribute(
    ctx: Context<Contribute>,
    amount: u64,
    merkle_proof: Option<Vec<[u8; 32]>>,
) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    let contribution = &mut ctx.accounts.contribution;
    let now = Clock::get()?.unix_timestamp;

    require!(presale.is_native(), LaunchpoolError::WrongCurrency);

    check_whitelisted(
        presale,
        &ctx.accounts.user.key(),
        merkle_proof.as_ref(),
        ctx.accounts
            .nft_token_account
            .as_ref()
            .map(|a| a.to_account_info()),
    )?;

    record_contribution(
        presale,
        contribution,
        &ctx.accounts.user.key(),
        amount,
        now,
    )?;

    transfer_sols(
        &ctx.accounts.user.to_account_info(),
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.system_program.to_account_info(),
        amount,
    )?;

    emit!(Contribution {
        contributor: ctx.accounts.user.key(),
        amount,
        currency: Pubkey::default(),
    });
    emit!(Purchase {
        beneficiary: ctx.accounts.user.key(),
        contribution: amount,
    });

    Ok(())
}
