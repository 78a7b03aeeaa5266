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
    constants::{
        FACTORY_PROGRAM_ID,
        PRESALE_SEED,
        VAULT_SEED,
    },
    error::LaunchpoolError,
    state::{
        presale::{
            Lifecycle,
            Presale,
        },
        vault::Vault,
    },
    utils::{
        required_deposit,
        transfer_tokens,
    },
};

#[event]
pub struct TokensDeposited {
    pub presale: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct DepositTokens<'info> {
    #[account(
        mut,
        seeds = [PRESALE_SEED, token.key().as_ref(), presale.identifier.as_ref()],
        bump,
    )]
    pub presale: Box<Account<'info, Presale>>,

    #[account(
        init_if_needed,
        payer = owner,
        seeds = [VAULT_SEED, presale.key().as_ref()],
        bump,
        space = 8 + std::mem::size_of::<Vault>()
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = token,
        associated_token::authority = presale,
        associated_token::token_program = token_program
    )]
    pub token_vault_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = token,
        associated_token::authority = owner,
        associated_token::token_program = token_program
    )]
    pub owner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: co-signing PDA owned by the deploying factory
    #[account(signer, owner = FACTORY_PROGRAM_ID @ LaunchpoolError::NotFactory)]
    pub factory_pda: AccountInfo<'info>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn deposit_tokens(ctx: Context<DepositTokens>) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    let now = Clock::get()?.unix_timestamp;

    require!(
        presale.owner == ctx.accounts.owner.key(),
        LaunchpoolError::NotOwner
    );
    require!(
        presale.lifecycle == Lifecycle::Pending,
        LaunchpoolError::InvalidLifecycleState
    );
    require!(now < presale.start_time, LaunchpoolError::DepositWindowClosed);

    let (_, tokens_liquidity, required) = required_deposit(
        presale.hard_cap,
        presale.presale_rate,
        presale.listing_rate,
        presale.liquidity_bps,
    )?;
    require!(
        presale.token_deposit >= required,
        LaunchpoolError::InsufficientDeposit
    );

    // The full requirement activates the sale; partial deposits do not.
    let amount = presale.token_deposit;
    presale.token_balance = amount;
    presale.tokens_liquidity = tokens_liquidity;
    presale.lifecycle = Lifecycle::Active;

    ctx.accounts.vault.authority = ctx.accounts.owner.key();

    transfer_tokens(
        ctx.accounts.owner_token_account.to_account_info(),
        ctx.accounts.token_vault_account.to_account_info(),
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.token,
        amount,
    )?;

    emit!(TokensDeposited {
        presale: presale.key(),
        amount,
        timestamp: now,
    });

    Ok(())
}
