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
        VAULT_SEED,
    },
    error::LaunchpoolError,
    state::{
        contribution::ContributionState,
        presale::Presale,
        vault::Vault,
    },
    utils::transfer_sol_from_vault,
};

#[event]
pub struct Refunded {
    pub contributor: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct Refund<'info> {
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
        seeds = [VAULT_SEED, presale.key().as_ref()],
        bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    pub token: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub user: Signer<'info>,

    /// Currency accounts, required when the raise is SPL-denominated.
    pub currency_mint: Option<Box<InterfaceAccount<'info, Mint>>>,

    #[account(mut)]
    pub currency_vault_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(mut)]
    pub user_currency_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn refund(ctx: Context<Refund>) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    let contribution = &mut ctx.accounts.contribution;
    let now = Clock::get()?.unix_timestamp;

    require!(!presale.paused, LaunchpoolError::ContractPaused);
    require!(presale.refunds_open(now), LaunchpoolError::RefundsNotOpen);
    require!(
        contribution.contributor == ctx.accounts.user.key(),
        LaunchpoolError::NothingToRefund
    );
    require!(!contribution.refunded, LaunchpoolError::AlreadyRefunded);
    require!(contribution.amount > 0, LaunchpoolError::NothingToRefund);

    // Zero the books before funds move; a second call finds nothing.
    let refund_amount = contribution.amount;
    contribution.amount = 0;
    contribution.tokens_claimed = 0;
    contribution.refunded = true;

    if presale.is_native() {
        transfer_sol_from_vault(
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.user.to_account_info(),
            refund_amount,
        )?;
    } else {
        let currency_mint = ctx
            .accounts
            .currency_mint
            .as_ref()
            .ok_or(LaunchpoolError::WrongCurrency)?;
        require!(
            currency_mint.key() == presale.currency,
            LaunchpoolError::WrongCurrency
        );
        let currency_vault = ctx
            .accounts
            .currency_vault_account
            .as_ref()
            .ok_or(LaunchpoolError::WrongCurrency)?;
        let user_account = ctx
            .accounts
            .user_currency_account
            .as_ref()
            .ok_or(LaunchpoolError::WrongCurrency)?;
        require!(
            user_account.owner == ctx.accounts.user.key(),
            LaunchpoolError::WrongCurrency
        );

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
                    from: currency_vault.to_account_info(),
                    mint: currency_mint.to_account_info(),
                    to: user_account.to_account_info(),
                    authority: presale.to_account_info(),
                },
                signer_seeds,
            ),
            refund_amount,
            currency_mint.decimals,
        )?;
    }

    emit!(Refunded {
        contributor: ctx.accounts.user.key(),
        amount: refund_amount,
        timestamp: now,
    });

    Ok(())
}
