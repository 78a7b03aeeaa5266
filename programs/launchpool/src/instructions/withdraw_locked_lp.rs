use anchor_lang::prelude::*;
use anchor_spl::{
    token::Token,
    token_2022::{
        transfer_checked,
        TransferChecked,
    },
    token_interface::TokenAccount,
};

use crate::{
    constants::LP_TOKEN_LOCK_SEED,
    error::LaunchpoolError,
    state::lock::LiquidityLock,
};

#[event]
pub struct LiquidityUnlocked {
    pub owner: Pubkey,
    pub amount: u64,
}

#[derive(Accounts)]
pub struct WithdrawLockedLp<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: presale the lock hangs off, used only as a PDA seed
    pub presale: AccountInfo<'info>,

    #[account(
        seeds = [LP_TOKEN_LOCK_SEED, presale.key().as_ref()],
        bump,
        has_one = owner @ LaunchpoolError::NotOwner
    )]
    pub lp_token_lock: Box<Account<'info, LiquidityLock>>,

    #[account(
        mut,
        constraint = lp_token_lock_ata.owner == lp_token_lock.key()
    )]
    pub lp_token_lock_ata: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: pool lp mint
    #[account(mut)]
    pub lp_mint: UncheckedAccount<'info>,

    #[account(mut)]
    pub owner_lp_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn withdraw_locked_lp(ctx: Context<WithdrawLockedLp>) -> Result<()> {
    let lock = &ctx.accounts.lp_token_lock;
    let now = Clock::get()?.unix_timestamp;

    require!(now > lock.unlock_time, LaunchpoolError::LiquidityStillLocked);

    let presale_key = ctx.accounts.presale.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        LP_TOKEN_LOCK_SEED,
        presale_key.as_ref(),
        &[ctx.bumps.lp_token_lock],
    ]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.lp_token_lock_ata.to_account_info(),
                mint: ctx.accounts.lp_mint.to_account_info(),
                to: ctx.accounts.owner_lp_token.to_account_info(),
                authority: lock.to_account_info(),
            },
            signer_seeds,
        ),
        lock.locked_amount,
        9,
    )?;

    emit!(LiquidityUnlocked {
        owner: ctx.accounts.owner.key(),
        amount: lock.locked_amount,
    });

    Ok(())
}
