use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked,
    Mint,
    TokenAccount,
    TokenInterface,
    TransferChecked,
};

use crate::{
    constants::PRESALE_SEED,
    error::LaunchpoolError,
    state::presale::{
        Lifecycle,
        Presale,
    },
};

#[event]
pub struct TokensRescued {
    pub mint: Pubkey,
    pub amount: u64,
}

#[derive(Accounts)]
pub struct RescueTokens<'info> {
    #[account(
        seeds = [PRESALE_SEED, token.key().as_ref(), presale.identifier.as_ref()],
        bump,
    )]
    pub presale: Box<Account<'info, Presale>>,

    /// The sale token, anchoring the presale PDA.
    pub token: InterfaceAccount<'info, Mint>,

    /// The mint being rescued; may be the sale token only after cancellation
    /// or once the claim deadline has passed.
    pub rescued_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        constraint = rescue_vault_account.mint == rescued_mint.key()
            && rescue_vault_account.owner == presale.key()
    )]
    pub rescue_vault_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        constraint = owner_token_account.mint == rescued_mint.key()
            && owner_token_account.owner == owner.key()
    )]
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn rescue_tokens(ctx: Context<RescueTokens>) -> Result<()> {
    let presale = &ctx.accounts.presale;
    let now = Clock::get()?.unix_timestamp;

    require!(
        presale.owner == ctx.accounts.owner.key(),
        LaunchpoolError::NotOwner
    );

    // Foreign mints can be swept any time; the sale token stays out of reach
    // while contributors can still claim it.
    if ctx.accounts.rescued_mint.key() == presale.token {
        let claim_expired =
            presale.lifecycle == Lifecycle::Finalized && now > presale.claim_deadline;
        require!(
            presale.lifecycle == Lifecycle::Canceled || claim_expired,
            LaunchpoolError::TokensStillClaimable
        );
    }

    let amount = ctx.accounts.rescue_vault_account.amount;
    require!(amount > 0, LaunchpoolError::InsufficientFunds);

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
                from: ctx.accounts.rescue_vault_account.to_account_info(),
                mint: ctx.accounts.rescued_mint.to_account_info(),
                to: ctx.accounts.owner_token_account.to_account_info(),
                authority: presale.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.rescued_mint.decimals,
    )?;

    emit!(TokensRescued {
        mint: ctx.accounts.rescued_mint.key(),
        amount,
    });

    Ok(())
}
