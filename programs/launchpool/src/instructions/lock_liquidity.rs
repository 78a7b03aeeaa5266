use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::Token,
    token_2022::{
        transfer_checked,
        TransferChecked,
    },
    token_interface::{
        Mint,
        TokenAccount,
    },
};

use crate::{
    constants::{
        LP_TOKEN_LOCK_SEED,
        PRESALE_SEED,
    },
    error::LaunchpoolError,
    state::{
        lock::LiquidityLock,
        presale::{
            Lifecycle,
            Presale,
        },
    },
};

#[event]
pub struct LiquidityLocked {
    pub presale: Pubkey,
    pub amount: u64,
    pub unlock_time: i64,
}

#[derive(Accounts)]
pub struct LockLiquidity<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PRESALE_SEED, token_mint.key().as_ref(), presale.identifier.as_ref()],
        bump,
    )]
    pub presale: Box<Account<'info, Presale>>,

    #[account(
        init,
        payer = owner,
        seeds = [LP_TOKEN_LOCK_SEED, presale.key().as_ref()],
        bump,
        space = 8 + LiquidityLock::INIT_SPACE
    )]
    pub lp_token_lock: Box<Account<'info, LiquidityLock>>,

    #[account(
        init,
        payer = owner,
        associated_token::mint = lp_mint,
        associated_token::authority = lp_token_lock,
        associated_token::token_program = token_program
    )]
    pub lp_token_lock_ata: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: pool lp mint, init by cp-swap
    #[account(mut)]
    pub lp_mint: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn lock_liquidity(ctx: Context<LockLiquidity>) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    let now = Clock::get()?.unix_timestamp;

    require!(
        presale.owner == ctx.accounts.owner.key(),
        LaunchpoolError::NotOwner
    );
    require!(
        presale.lifecycle == Lifecycle::Active,
        LaunchpoolError::InvalidLifecycleState
    );
    require!(
        presale.liquidity_seeded,
        LaunchpoolError::LiquidityNotSeeded
    );

    let lock = &mut ctx.accounts.lp_token_lock;

    lock.owner = presale.owner;
    lock.locked_amount = ctx.accounts.creator_lp_token.amount;
    lock.unlock_time = now + presale.lockup_duration;

    presale.liquidity_locked = true;

    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.creator_lp_token.to_account_info(),
                mint: ctx.accounts.lp_mint.to_account_info(),
                to: ctx.accounts.lp_token_lock_ata.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        lock.locked_amount,
        9,
    )?;

    emit!(LiquidityLocked {
        presale: presale.key(),
        amount: lock.locked_amount,
        unlock_time: lock.unlock_time,
    });

    Ok(())
}
