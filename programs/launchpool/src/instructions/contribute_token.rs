use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        Mint,
        TokenAccount,
        TokenInterface,
    },
};

use crate::{
    constants::CONTRIBUTE_SEED,
    error::LaunchpoolError,
    state::{
        contribution::ContributionState,
        presale::Presale,
    },
    utils::{
        check_whitelisted,
        record_contribution,
        transfer_tokens,
    },
};

use super::contribute::{
    Contribution,
    Purchase,
};

#[derive(Accounts)]
pub struct ContributeToken<'info> {
    #[account(mut)]
    pub presale: Box<Account<'info, Presale>>,

    #[account(
        init_if_needed,
        payer = user,
        seeds = [CONTRIBUTE_SEED, presale.key().as_ref(), user.key().as_ref()],
        bump,
        space = 8 + std::mem::size_of::<ContributionState>()
    )]
    pub contribution: Box<Account<'info, ContributionState>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = currency_mint,
        associated_token::authority = presale,
        associated_token::token_program = currency_token_program
    )]
    pub currency_vault_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = currency_mint,
        associated_token::authority = user,
        associated_token::token_program = currency_token_program
    )]
    pub user_currency_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub currency_mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: holder token account for NFT-gated sales, probed in code
    pub nft_token_account: Option<UncheckedAccount<'info>>,

    pub currency_token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn contribute_token(
    ctx: Context<ContributeToken>,
    amount: u64,
    merkle_proof: Option<Vec<[u8; 32]>>,
) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    let contribution = &mut ctx.accounts.contribution;
    let now = Clock::get()?.unix_timestamp;

    require!(
        !presale.is_native() && presale.currency == ctx.accounts.currency_mint.key(),
        LaunchpoolError::WrongCurrency
    );

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

    transfer_tokens(
        ctx.accounts.user_currency_account.to_account_info(),
        ctx.accounts.currency_vault_account.to_account_info(),
        ctx.accounts.user.to_account_info(),
        ctx.accounts.currency_token_program.to_account_info(),
        &ctx.accounts.currency_mint,
        amount,
    )?;

    emit!(Contribution {
        contributor: ctx.accounts.user.key(),
        amount,
        currency: ctx.accounts.currency_mint.key(),
    });
    emit!(Purchase {
        beneficiary: ctx.accounts.user.key(),
        contribution: amount,
    });

    Ok(())
}
